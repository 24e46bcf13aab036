use crate::grid::Cell;
use crate::simulation::SimulationState;
use ratatui::style::Color;

pub const BACKGROUND_COLOR: Color = Color::Rgb(0, 0, 0);
pub const CELL_COLOR: Color = Color::Rgb(255, 255, 255);
pub const PREVIEW_COLOR: Color = Color::Rgb(110, 110, 110);
pub const BORDER_COLOR: Color = Color::Rgb(255, 255, 255);

/// Axis-aligned rectangle in surface units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Something the simulation can be drawn onto
pub trait DrawSurface {
    /// Surface size in logical units
    fn size(&self) -> (f32, f32);
    fn clear(&mut self, color: Color);
    fn fill_rects(&mut self, rects: &[SurfaceRect], color: Color);
    /// One-unit border around the whole surface
    fn stroke_border(&mut self, color: Color);
}

/// Pointer position relative to a drawing surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePoint {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfacePoint {
    /// Grid cell under this point; x selects the column, y the row
    pub fn to_cell(&self, rows: usize, cols: usize) -> Cell {
        let col = (self.x * cols as f32 / self.width).floor() as i32;
        let row = (self.y * rows as f32 / self.height).floor() as i32;
        Cell::new(row, col)
    }
}

/// Rectangle covered by `cell` on a surface of the given size
fn cell_rect(cell: Cell, cell_width: f32, cell_height: f32) -> SurfaceRect {
    SurfaceRect {
        x: cell.col as f32 * cell_width,
        y: cell.row as f32 * cell_height,
        width: cell_width,
        height: cell_height,
    }
}

/// Draw a simulation snapshot
pub fn render<S: DrawSurface>(surface: &mut S, state: &SimulationState) {
    let (width, height) = surface.size();
    let cell_width = width / state.grid.cols() as f32;
    let cell_height = height / state.grid.rows() as f32;

    surface.clear(BACKGROUND_COLOR);

    if state.pointer_active {
        let preview: Vec<SurfaceRect> = state
            .placement_preview
            .iter()
            .filter(|&&cell| state.grid.is_in_bounds(cell))
            .map(|&cell| cell_rect(cell, cell_width, cell_height))
            .collect();
        surface.fill_rects(&preview, PREVIEW_COLOR);
    }

    let alive: Vec<SurfaceRect> = state
        .grid
        .alive_cells()
        .map(|cell| cell_rect(cell, cell_width, cell_height))
        .collect();
    surface.fill_rects(&alive, CELL_COLOR);

    surface.stroke_border(BORDER_COLOR);
}
