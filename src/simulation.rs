use crate::error::Result;
use crate::grid::{Cell, Grid};
use crate::shapes::ShapeCatalog;
use std::rc::Rc;

/// Keys forwarded to the reducer. None of them change state yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Other,
}

/// Everything that can change the simulation
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Start over; carries the shape selector's current value
    Reset { selected_shape: String },
    /// Toggle every in-bounds preview cell
    Click,
    /// Advance one generation
    Tick,
    /// Pointer is over this grid cell
    PointerMove(Cell),
    /// Pointer left the drawing surface
    PointerLeave,
    /// Shape selector changed
    ShapeSelect(String),
    KeyDown(Key),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Reset { .. } => "reset",
            Action::Click => "click",
            Action::Tick => "tick",
            Action::PointerMove(_) => "pointer-move",
            Action::PointerLeave => "pointer-leave",
            Action::ShapeSelect(_) => "shape-select",
            Action::KeyDown(_) => "keydown",
        }
    }
}

/// Complete simulation snapshot. The grid is shared between snapshots until
/// a transition needs to change it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimulationState {
    pub grid: Rc<Grid>,
    pub pointer_anchor: Cell,
    pub placement_preview: Vec<Cell>,
    pub selected_shape: String,
    pub pointer_active: bool,
}

impl SimulationState {
    /// Fresh state on an empty `rows` x `cols` grid
    pub fn new(rows: usize, cols: usize, selected_shape: impl Into<String>) -> Result<Self> {
        Ok(Self::fresh(Grid::new(rows, cols)?, selected_shape.into()))
    }

    fn fresh(grid: Grid, selected_shape: String) -> Self {
        Self {
            grid: Rc::new(grid),
            pointer_anchor: Cell::default(),
            placement_preview: Vec::new(),
            selected_shape,
            pointer_active: false,
        }
    }
}

/// Apply one action, producing the next state
pub fn reduce(state: SimulationState, action: &Action, shapes: &ShapeCatalog) -> SimulationState {
    match action {
        Action::Reset { selected_shape } => {
            SimulationState::fresh(state.grid.cleared(), selected_shape.clone())
        }
        Action::Click => click(state),
        Action::Tick => SimulationState {
            grid: Rc::new(state.grid.step()),
            ..state
        },
        Action::PointerMove(anchor) => {
            let placement_preview = shapes
                .find(&state.selected_shape)
                .map(|shape| shape.translate(*anchor))
                .unwrap_or_default();
            SimulationState {
                pointer_active: true,
                pointer_anchor: *anchor,
                placement_preview,
                ..state
            }
        }
        Action::PointerLeave => SimulationState {
            pointer_active: false,
            ..state
        },
        // The preview takes the raw offsets, not offsets moved to the
        // current anchor. It is re-anchored on the next pointer move.
        Action::ShapeSelect(name) => SimulationState {
            placement_preview: shapes.lookup(name).to_vec(),
            selected_shape: name.clone(),
            ..state
        },
        Action::KeyDown(_) => state,
    }
}

fn click(mut state: SimulationState) -> SimulationState {
    if state.placement_preview.is_empty() {
        return state;
    }
    let grid = Rc::make_mut(&mut state.grid);
    for &cell in &state.placement_preview {
        if grid.is_in_bounds(cell) {
            grid.toggle(cell);
        }
    }
    state
}
