//! Raster drawing surface, used to save PNG snapshots of the grid.

use crate::error::{Error, Result};
use crate::simulation::SimulationState;
use crate::surface::{self, DrawSurface, SurfaceRect};
use image::{Rgb, RgbImage};
use ratatui::style::Color;
use std::path::{Path, PathBuf};

pub struct ImageSurface {
    image: RgbImage,
}

impl ImageSurface {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidSurface { width, height });
        }
        Ok(Self {
            image: RgbImage::new(width, height),
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.image.save(path)?;
        Ok(())
    }

    fn fill_pixels(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, pixel: Rgb<u8>) {
        for y in y0..y1.min(self.image.height()) {
            for x in x0..x1.min(self.image.width()) {
                self.image.put_pixel(x, y, pixel);
            }
        }
    }
}

fn to_rgb(color: Color) -> Rgb<u8> {
    match color {
        Color::Rgb(r, g, b) => Rgb([r, g, b]),
        Color::Black => Rgb([0, 0, 0]),
        Color::DarkGray => Rgb([85, 85, 85]),
        Color::Gray => Rgb([170, 170, 170]),
        _ => Rgb([255, 255, 255]),
    }
}

impl DrawSurface for ImageSurface {
    fn size(&self) -> (f32, f32) {
        (self.image.width() as f32, self.image.height() as f32)
    }

    fn clear(&mut self, color: Color) {
        let pixel = to_rgb(color);
        self.image.pixels_mut().for_each(|p| *p = pixel);
    }

    fn fill_rects(&mut self, rects: &[SurfaceRect], color: Color) {
        let pixel = to_rgb(color);
        for rect in rects {
            let x0 = rect.x.max(0.0).floor() as u32;
            let y0 = rect.y.max(0.0).floor() as u32;
            let x1 = ((rect.x + rect.width).ceil() as u32).max(x0 + 1);
            let y1 = ((rect.y + rect.height).ceil() as u32).max(y0 + 1);
            self.fill_pixels(x0, y0, x1, y1, pixel);
        }
    }

    fn stroke_border(&mut self, color: Color) {
        let pixel = to_rgb(color);
        let (w, h) = self.image.dimensions();
        self.fill_pixels(0, 0, w, 1, pixel);
        self.fill_pixels(0, h - 1, w, h, pixel);
        self.fill_pixels(0, 0, 1, h, pixel);
        self.fill_pixels(w - 1, 0, w, h, pixel);
    }
}

/// Render `state` at the given size and write it as `life-gen-<generation>.png`
/// inside `dir`. Returns the written path.
pub fn save_snapshot(
    state: &SimulationState,
    generation: u64,
    width: u32,
    height: u32,
    dir: &Path,
) -> Result<PathBuf> {
    let mut surface = ImageSurface::new(width, height)?;
    surface::render(&mut surface, state);
    let path = dir.join(format!("life-gen-{}.png", generation));
    surface.save(&path)?;
    Ok(path)
}
