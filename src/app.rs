use crate::animation::AnimationDriver;
use crate::config::AppConfig;
use crate::error::Result;
use crate::input::InputEvent;
use crate::settings::SimulationSettings;
use crate::shapes::ShapeCatalog;
use crate::simulation::{reduce, Action, SimulationState};
use crate::snapshot;
use std::path::PathBuf;
use std::time::Instant;

/// Main application state
pub struct App {
    pub state: SimulationState,
    pub shapes: ShapeCatalog,
    pub driver: AnimationDriver,
    /// Current value of the shape selector
    pub selector: String,
    /// Generations since the last reset
    pub generation: u64,
    pub settings: SimulationSettings,
    pub snapshot_dir: PathBuf,
    /// Where `ExportConfig` writes; `None` when no config directory exists
    pub config_path: Option<PathBuf>,
    pub show_help: bool,
    /// Last outcome of a snapshot or export, shown in the sidebar
    pub status_message: Option<String>,
}

impl App {
    pub fn new(settings: SimulationSettings, snapshot_dir: PathBuf) -> Result<Self> {
        settings.validate()?;
        let size = settings.grid_size;
        let shapes = ShapeCatalog::new(size);
        Ok(Self {
            state: SimulationState::new(size, size, settings.default_shape.clone())?,
            shapes,
            driver: AnimationDriver::new(settings.target_fps)?,
            selector: settings.default_shape.clone(),
            generation: 0,
            settings,
            snapshot_dir,
            config_path: None,
            show_help: false,
            status_message: None,
        })
    }

    /// Run one action through the reducer
    pub fn dispatch(&mut self, action: Action) {
        log::debug!("dispatch {}", action.name());
        match &action {
            Action::Tick => self.generation += 1,
            Action::Reset { .. } => self.generation = 0,
            _ => {}
        }
        // Moving the state in leaves the grid uniquely owned, so a click
        // toggles it in place
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, &action, &self.shapes);
    }

    /// Frame callback: let the driver decide whether a generation is due
    pub fn on_frame(&mut self, now: Instant) {
        if let Some(action) = self.driver.poll(now) {
            self.dispatch(action);
        }
    }

    pub fn is_playing(&self) -> bool {
        self.driver.is_running()
    }

    /// Handle one input event. Returns false when the app should quit.
    pub fn handle_event(&mut self, event: InputEvent, now: Instant) -> bool {
        match event {
            InputEvent::PointerMove(point) => {
                let cell = point.to_cell(self.state.grid.rows(), self.state.grid.cols());
                self.dispatch(Action::PointerMove(cell));
            }
            InputEvent::PointerDown => self.dispatch(Action::Click),
            InputEvent::PointerLeave => self.dispatch(Action::PointerLeave),
            InputEvent::ShapeSelected(name) => self.select_shape(name),
            InputEvent::PlayPause => self.toggle_play(now),
            InputEvent::SingleStep => self.dispatch(Action::Tick),
            InputEvent::Reset => self.reset(),
            InputEvent::FrameRate(fps) => self.set_fps(fps, now),
            InputEvent::KeyDown(key) => self.dispatch(Action::KeyDown(key)),
            InputEvent::Snapshot => self.save_snapshot(),
            InputEvent::ExportConfig => self.export_config(),
            InputEvent::ToggleHelp => self.show_help = !self.show_help,
            InputEvent::Quit => return false,
        }
        true
    }

    /// Play/pause button
    pub fn toggle_play(&mut self, now: Instant) {
        if self.driver.is_running() {
            let played = self
                .driver
                .started_at()
                .map_or(0.0, |start| now.saturating_duration_since(start).as_secs_f32());
            self.driver.stop();
            log::info!("Paused at generation {} after {:.1}s", self.generation, played);
        } else {
            self.driver.start(now);
            log::info!("Playing at {} fps", self.driver.target_fps());
        }
    }

    /// Reset button: fresh state and the animation stops
    pub fn reset(&mut self) {
        self.dispatch(Action::Reset {
            selected_shape: self.selector.clone(),
        });
        self.driver.stop();
        log::info!("Reset with shape '{}'", self.selector);
    }

    pub fn select_shape(&mut self, name: String) {
        if !self.shapes.contains(&name) {
            log::warn!("Unknown shape '{}', preview cleared", name);
        }
        self.selector = name.clone();
        self.dispatch(Action::ShapeSelect(name));
    }

    /// Frame rate slider
    pub fn set_fps(&mut self, fps: u32, now: Instant) {
        match self.driver.set_target_fps(fps, now) {
            Ok(()) => log::info!("Frame rate set to {} fps", fps),
            Err(e) => log::warn!("Ignoring frame rate {}: {}", fps, e),
        }
    }

    /// Settings as currently in effect, for export
    pub fn current_settings(&self) -> SimulationSettings {
        SimulationSettings {
            target_fps: self.driver.target_fps(),
            default_shape: self.selector.clone(),
            ..self.settings.clone()
        }
    }

    pub fn save_snapshot(&mut self) {
        let result = snapshot::save_snapshot(
            &self.state,
            self.generation,
            self.settings.surface_width,
            self.settings.surface_height,
            &self.snapshot_dir,
        );
        self.status_message = Some(match result {
            Ok(path) => {
                log::info!("Saved snapshot to {}", path.display());
                format!("Saved {}", path.display())
            }
            Err(e) => {
                log::warn!("Snapshot failed: {}", e);
                format!("Snapshot failed: {}", e)
            }
        });
    }

    pub fn export_config(&mut self) {
        let Some(path) = self.config_path.clone() else {
            log::warn!("Export skipped: no config directory");
            self.status_message = Some("No config directory".to_string());
            return;
        };
        let config = AppConfig::new(self.current_settings());
        self.status_message = Some(match config.save_to_file(&path) {
            Ok(()) => {
                log::info!("Exported settings to {}", path.display());
                format!("Exported {}", path.display())
            }
            Err(e) => {
                log::warn!("Export failed: {}", e);
                format!("Export failed: {}", e)
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;
    use crate::surface::SurfacePoint;
    use std::rc::Rc;
    use std::time::Duration;
    use tempfile::TempDir;

    fn app() -> App {
        let settings = SimulationSettings {
            grid_size: 20,
            target_fps: 20,
            default_shape: "box".to_string(),
            ..Default::default()
        };
        App::new(settings, std::env::temp_dir()).unwrap()
    }

    fn point(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMove(SurfacePoint {
            x,
            y,
            width: 40.0,
            height: 40.0,
        })
    }

    #[test]
    fn test_invalid_settings_fail_fast() {
        let settings = SimulationSettings {
            grid_size: 0,
            ..Default::default()
        };
        assert!(App::new(settings, PathBuf::from(".")).is_err());
    }

    #[test]
    fn test_pointer_events_place_shape() {
        let mut app = app();
        let now = Instant::now();
        // 40 units over 20 cells: (10, 6) is column 5, row 3
        app.handle_event(point(10.0, 6.0), now);
        assert_eq!(app.state.pointer_anchor, Cell::new(3, 5));
        assert!(app.state.pointer_active);

        app.handle_event(InputEvent::PointerDown, now);
        assert_eq!(app.state.grid.population(), 4);

        app.handle_event(InputEvent::PointerLeave, now);
        assert!(!app.state.pointer_active);
    }

    #[test]
    fn test_click_reuses_grid_allocation() {
        let mut app = app();
        let now = Instant::now();
        app.handle_event(point(10.0, 6.0), now);
        let before = Rc::as_ptr(&app.state.grid);

        app.handle_event(InputEvent::PointerDown, now);
        assert_eq!(Rc::strong_count(&app.state.grid), 1);
        assert_eq!(Rc::as_ptr(&app.state.grid), before);
        assert_eq!(app.state.grid.population(), 4);
    }

    #[test]
    fn test_single_step_counts_generations() {
        let mut app = app();
        let now = Instant::now();
        app.handle_event(InputEvent::SingleStep, now);
        app.handle_event(InputEvent::SingleStep, now);
        assert_eq!(app.generation, 2);
        assert!(!app.is_playing());
    }

    #[test]
    fn test_play_emits_ticks_on_frames() {
        let mut app = app();
        let t0 = Instant::now();
        app.handle_event(InputEvent::PlayPause, t0);
        assert!(app.is_playing());

        for i in 1..=10 {
            app.on_frame(t0 + Duration::from_millis(i * 16));
        }
        // 160ms at 50ms per generation
        assert_eq!(app.generation, 3);

        app.handle_event(InputEvent::PlayPause, t0 + Duration::from_millis(160));
        app.on_frame(t0 + Duration::from_secs(5));
        assert_eq!(app.generation, 3);
    }

    #[test]
    fn test_reset_stops_animation_and_uses_selector() {
        let mut app = app();
        let now = Instant::now();
        app.handle_event(point(10.0, 10.0), now);
        app.handle_event(InputEvent::PointerDown, now);
        app.handle_event(InputEvent::ShapeSelected("glider".into()), now);
        app.handle_event(InputEvent::PlayPause, now);
        app.handle_event(InputEvent::SingleStep, now);

        app.handle_event(InputEvent::Reset, now);
        assert!(!app.is_playing());
        assert_eq!(app.generation, 0);
        assert_eq!(app.state, SimulationState::new(20, 20, "glider").unwrap());
    }

    #[test]
    fn test_frame_rate_change_keeps_playing() {
        let mut app = app();
        let t0 = Instant::now();
        app.handle_event(InputEvent::PlayPause, t0);
        app.handle_event(InputEvent::FrameRate(10), t0 + Duration::from_millis(40));
        assert!(app.is_playing());
        assert_eq!(app.driver.target_fps(), 10);

        app.on_frame(t0 + Duration::from_millis(120));
        assert_eq!(app.generation, 0);
        app.on_frame(t0 + Duration::from_millis(141));
        assert_eq!(app.generation, 1);
    }

    #[test]
    fn test_frame_rate_change_while_paused() {
        let mut app = app();
        app.handle_event(InputEvent::FrameRate(45), Instant::now());
        assert!(!app.is_playing());
        assert_eq!(app.driver.target_fps(), 45);
    }

    #[test]
    fn test_unknown_shape_selection_degrades() {
        let mut app = app();
        let now = Instant::now();
        app.handle_event(InputEvent::ShapeSelected("spaceship".into()), now);
        assert_eq!(app.selector, "spaceship");
        app.handle_event(point(10.0, 10.0), now);
        assert!(app.state.placement_preview.is_empty());
        app.handle_event(InputEvent::PointerDown, now);
        assert_eq!(app.state.grid.population(), 0);
    }

    #[test]
    fn test_quit_and_help() {
        let mut app = app();
        let now = Instant::now();
        assert!(app.handle_event(InputEvent::ToggleHelp, now));
        assert!(app.show_help);
        assert!(!app.handle_event(InputEvent::Quit, now));
    }

    #[test]
    fn test_snapshot_writes_into_dir() {
        let dir = TempDir::new().unwrap();
        let mut app = app();
        app.snapshot_dir = dir.path().to_path_buf();
        app.settings.surface_width = 40;
        app.settings.surface_height = 40;
        app.handle_event(InputEvent::SingleStep, Instant::now());
        app.handle_event(InputEvent::Snapshot, Instant::now());

        assert!(dir.path().join("life-gen-1.png").exists());
        assert!(app.status_message.unwrap().starts_with("Saved"));
    }

    #[test]
    fn test_export_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let mut app = app();
        app.config_path = Some(path.clone());
        let now = Instant::now();
        app.handle_event(InputEvent::ShapeSelected("line".into()), now);
        app.handle_event(InputEvent::FrameRate(12), now);
        app.handle_event(InputEvent::ExportConfig, now);

        let loaded = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.settings.default_shape, "line");
        assert_eq!(loaded.settings.target_fps, 12);
        assert_eq!(loaded.settings.grid_size, 20);
    }

    #[test]
    fn test_export_without_config_dir() {
        let mut app = app();
        app.export_config();
        assert_eq!(app.status_message.as_deref(), Some("No config directory"));
    }
}
