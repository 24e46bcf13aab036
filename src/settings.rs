use crate::animation::{self, MAX_FPS, MIN_FPS};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Startup settings for the simulation and its surfaces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Grid rows and columns (the grid is square)
    pub grid_size: usize,
    /// Generations per second while playing
    pub target_fps: u32,
    /// Initial value of the shape selector
    pub default_shape: String,
    /// PNG snapshot width in pixels
    pub surface_width: u32,
    /// PNG snapshot height in pixels
    pub surface_height: u32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            grid_size: 250,
            target_fps: 30,
            default_shape: "single".to_string(),
            surface_width: 600,
            surface_height: 600,
        }
    }
}

impl SimulationSettings {
    /// Reject settings that cannot build a simulation
    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 {
            return Err(Error::InvalidDimensions {
                rows: self.grid_size,
                cols: self.grid_size,
            });
        }
        animation::frame_interval(self.target_fps)?;
        if self.surface_width == 0 || self.surface_height == 0 {
            return Err(Error::InvalidSurface {
                width: self.surface_width,
                height: self.surface_height,
            });
        }
        Ok(())
    }
}

/// Frame rate slider step (clamped to MIN_FPS-MAX_FPS)
pub fn adjust_fps(fps: u32, delta: i32) -> u32 {
    (fps as i64 + delta as i64).clamp(MIN_FPS as i64, MAX_FPS as i64) as u32
}
