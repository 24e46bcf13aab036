use crate::surface::{DrawSurface, SurfaceRect};
use ratatui::style::Color;

/// Braille character rendering for high-resolution terminal graphics.
/// Each Braille character represents a 2x4 grid of dots (8 dots total).
///
/// Dot positions and their bit values:
/// ```text
/// (0,0)=0x01  (1,0)=0x08
/// (0,1)=0x02  (1,1)=0x10
/// (0,2)=0x04  (1,2)=0x20
/// (0,3)=0x40  (1,3)=0x80
/// ```
///
/// Unicode Braille patterns: U+2800 to U+28FF (256 patterns)
const BRAILLE_BASE: u32 = 0x2800;

/// Dot position to bit mapping for Braille characters
const BRAILLE_DOTS: [[u8; 4]; 2] = [
    [0x01, 0x02, 0x04, 0x40], // Left column (x=0): rows 0,1,2,3
    [0x08, 0x10, 0x20, 0x80], // Right column (x=1): rows 0,1,2,3
];

/// A single rendered Braille cell with position and color
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrailleCell {
    pub x: u16,
    pub y: u16,
    pub char: char,
    pub color: Color,
}

/// A dot painted by a fill, with the order it was painted in
#[derive(Clone, Copy)]
struct Dot {
    color: Color,
    layer: u16,
}

/// Drawing surface made of Braille dots. One dot is one surface unit, so a
/// `w` x `h` character canvas is `2w` x `4h` units.
pub struct BrailleCanvas {
    width: u16,
    height: u16,
    dots: Vec<Option<Dot>>,
    layer: u16,
}

impl BrailleCanvas {
    pub fn new(canvas_width: u16, canvas_height: u16) -> Self {
        let dot_count = canvas_width as usize * 2 * canvas_height as usize * 4;
        Self {
            width: canvas_width,
            height: canvas_height,
            dots: vec![None; dot_count],
            layer: 0,
        }
    }

    fn dot_width(&self) -> usize {
        self.width as usize * 2
    }

    fn dot_height(&self) -> usize {
        self.height as usize * 4
    }

    fn paint(&mut self, x: usize, y: usize, color: Color) {
        if x < self.dot_width() && y < self.dot_height() {
            let idx = y * self.dot_width() + x;
            self.dots[idx] = Some(Dot {
                color,
                layer: self.layer,
            });
        }
    }

    /// Collapse the dots into Braille characters. A character takes the
    /// color of its most recently painted dot.
    pub fn cells(&self) -> Vec<BrailleCell> {
        let mut cells = Vec::with_capacity(self.width as usize * self.height as usize);

        for cy in 0..self.height {
            for cx in 0..self.width {
                let mut pattern: u8 = 0;
                let mut top: Option<Dot> = None;

                let base_bx = cx as usize * 2;
                let base_by = cy as usize * 4;

                for dx in 0..2 {
                    for dy in 0..4 {
                        let idx = (base_by + dy) * self.dot_width() + base_bx + dx;
                        if let Some(dot) = self.dots[idx] {
                            pattern |= BRAILLE_DOTS[dx][dy];
                            if top.map_or(true, |t| dot.layer >= t.layer) {
                                top = Some(dot);
                            }
                        }
                    }
                }

                // Only emit cells that have at least one dot
                if let Some(dot) = top {
                    let braille_char = char::from_u32(BRAILLE_BASE + pattern as u32).unwrap_or(' ');
                    cells.push(BrailleCell {
                        x: cx,
                        y: cy,
                        char: braille_char,
                        color: dot.color,
                    });
                }
            }
        }

        cells
    }
}

impl DrawSurface for BrailleCanvas {
    fn size(&self) -> (f32, f32) {
        (self.dot_width() as f32, self.dot_height() as f32)
    }

    /// The terminal background shows through unpainted dots
    fn clear(&mut self, _color: Color) {
        self.dots.iter_mut().for_each(|dot| *dot = None);
        self.layer = 0;
    }

    fn fill_rects(&mut self, rects: &[SurfaceRect], color: Color) {
        self.layer = self.layer.saturating_add(1);
        for rect in rects {
            // A rect smaller than a dot still lights the dot it starts in
            let x0 = rect.x.max(0.0).floor() as usize;
            let y0 = rect.y.max(0.0).floor() as usize;
            let x1 = ((rect.x + rect.width).ceil() as usize).max(x0 + 1);
            let y1 = ((rect.y + rect.height).ceil() as usize).max(y0 + 1);
            for y in y0..y1.min(self.dot_height()) {
                for x in x0..x1.min(self.dot_width()) {
                    self.paint(x, y, color);
                }
            }
        }
    }

    fn stroke_border(&mut self, color: Color) {
        self.layer = self.layer.saturating_add(1);
        let (w, h) = (self.dot_width(), self.dot_height());
        if w == 0 || h == 0 {
            return;
        }
        for x in 0..w {
            self.paint(x, 0, color);
            self.paint(x, h - 1, color);
        }
        for y in 0..h {
            self.paint(0, y, color);
            self.paint(w - 1, y, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_braille_pattern() {
        // Test that single dot patterns work correctly
        assert_eq!(BRAILLE_DOTS[0][0], 0x01); // Top-left
        assert_eq!(BRAILLE_DOTS[1][0], 0x08); // Top-right
        assert_eq!(BRAILLE_DOTS[0][3], 0x40); // Bottom-left
        assert_eq!(BRAILLE_DOTS[1][3], 0x80); // Bottom-right

        // All dots should give 0xFF
        let all_dots: u8 = BRAILLE_DOTS[0].iter().sum::<u8>() + BRAILLE_DOTS[1].iter().sum::<u8>();
        assert_eq!(all_dots, 0xFF);
    }

    #[test]
    fn test_canvas_size_in_dots() {
        let canvas = BrailleCanvas::new(10, 5);
        assert_eq!(canvas.size(), (20.0, 20.0));
        assert!(canvas.cells().is_empty());
    }

    #[test]
    fn test_fill_single_dot() {
        let mut canvas = BrailleCanvas::new(2, 1);
        let rect = SurfaceRect {
            x: 3.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
        };
        canvas.fill_rects(&[rect], Color::White);

        let cells = canvas.cells();
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].x, 1);
        assert_eq!(cells[0].char, '\u{2808}');
    }

    #[test]
    fn test_sub_dot_rect_lights_one_dot() {
        let mut canvas = BrailleCanvas::new(1, 1);
        let rect = SurfaceRect {
            x: 0.4,
            y: 2.2,
            width: 0.3,
            height: 0.3,
        };
        canvas.fill_rects(&[rect], Color::White);
        assert_eq!(canvas.cells()[0].char, char::from_u32(BRAILLE_BASE + 0x04).unwrap());
    }

    #[test]
    fn test_later_fill_wins_color() {
        let mut canvas = BrailleCanvas::new(1, 1);
        let full = SurfaceRect {
            x: 0.0,
            y: 0.0,
            width: 2.0,
            height: 4.0,
        };
        canvas.fill_rects(&[full], Color::Gray);
        canvas.fill_rects(
            &[SurfaceRect {
                x: 0.0,
                y: 0.0,
                width: 1.0,
                height: 1.0,
            }],
            Color::White,
        );
        let cells = canvas.cells();
        assert_eq!(cells[0].char, '\u{28FF}');
        assert_eq!(cells[0].color, Color::White);

        canvas.clear(Color::Black);
        assert!(canvas.cells().is_empty());
    }

    #[test]
    fn test_border_outlines_canvas() {
        let mut canvas = BrailleCanvas::new(3, 2);
        canvas.stroke_border(Color::White);
        let cells = canvas.cells();
        // Every character touches the border on a 3x2 canvas
        assert_eq!(cells.len(), 6);
        // Top-left character: left column plus top row
        let expected = char::from_u32(BRAILLE_BASE + 0x01 + 0x02 + 0x04 + 0x40 + 0x08).unwrap();
        assert_eq!(cells[0].char, expected);
    }
}
