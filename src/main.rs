mod animation;
mod app;
mod braille;
mod config;
mod error;
mod grid;
mod input;
mod settings;
mod shapes;
mod simulation;
mod snapshot;
mod surface;
mod ui;

use app::App;
use clap::Parser;
use config::AppConfig;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use input::{InputSource, TerminalInput};
use ratatui::{backend::CrosstermBackend, Terminal};
use settings::SimulationSettings;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "life-simulation")]
#[command(about = "Interactive Conway's Game of Life in the terminal")]
struct Args {
    /// Grid rows and columns (the grid is square)
    #[arg(long)]
    size: Option<usize>,

    /// Generations per second while playing (1-60)
    #[arg(long)]
    fps: Option<u32>,

    /// Initially selected shape (single, box, glider, line)
    #[arg(long)]
    shape: Option<String>,

    /// PNG snapshot width in pixels
    #[arg(long = "surface-width")]
    surface_width: Option<u32>,

    /// PNG snapshot height in pixels
    #[arg(long = "surface-height")]
    surface_height: Option<u32>,

    /// Settings file to load instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory PNG snapshots are written to
    #[arg(long = "snapshot-dir", default_value = ".")]
    snapshot_dir: PathBuf,

    /// Write logs to this file (RUST_LOG controls the level, default info)
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

impl Args {
    /// CLI flags override whatever the config file provided
    fn apply(&self, settings: &mut SimulationSettings) {
        if let Some(size) = self.size {
            settings.grid_size = size;
        }
        if let Some(fps) = self.fps {
            settings.target_fps = fps.clamp(animation::MIN_FPS, animation::MAX_FPS);
        }
        if let Some(shape) = &self.shape {
            settings.default_shape = shape.to_lowercase();
        }
        if let Some(width) = self.surface_width {
            settings.surface_width = width;
        }
        if let Some(height) = self.surface_height {
            settings.surface_height = height;
        }
    }
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// Settings from `--config`, else from the default location when present,
/// else built-in defaults
fn load_config(explicit: Option<&Path>, default_path: Option<&Path>) -> error::Result<AppConfig> {
    match (explicit, default_path) {
        (Some(path), _) => AppConfig::load_from_file(path),
        (None, Some(path)) if path.exists() => AppConfig::load_from_file(path),
        _ => Ok(AppConfig::default()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let default_path = AppConfig::default_path().ok();
    let mut settings = load_config(args.config.as_deref(), default_path.as_deref())?.settings;
    args.apply(&mut settings);

    // Misconfiguration fails here, before the terminal is touched
    let mut app = App::new(settings, args.snapshot_dir.clone())?;
    app.config_path = args.config.clone().or(default_path);
    log::info!(
        "Starting: {}x{} grid, {} fps, shape '{}'",
        app.settings.grid_size,
        app.settings.grid_size,
        app.settings.target_fps,
        app.selector
    );

    let mut input = TerminalInput::new(
        app.shapes.clone(),
        app.selector.clone(),
        app.driver.target_fps(),
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, &mut app, &mut input);

    // Cleanup
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        log::error!("Terminal error: {}", err);
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend, I: InputSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    input: &mut I,
) -> io::Result<()> {
    // Refresh cadence; the animation driver decides when a generation is due
    const FRAME_DURATION: Duration = Duration::from_millis(16);

    loop {
        // Render current state
        let frame = terminal.draw(|frame| ui::render(frame, app))?;
        input.set_canvas(ui::get_canvas_area(frame.area));

        // Poll for events with timeout
        if let Some(event) = input.next_event(FRAME_DURATION)? {
            if !app.handle_event(event, Instant::now()) {
                return Ok(());
            }
        }

        app.on_frame(Instant::now());
    }
}
