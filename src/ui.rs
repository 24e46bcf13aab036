use crate::app::App;
use crate::braille::BrailleCanvas;
use crate::surface;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const SIDEBAR_WIDTH: u16 = 22;

// UI color scheme
const BORDER_COLOR: Color = Color::Cyan;
const HIGHLIGHT_COLOR: Color = Color::Yellow;
const TEXT_COLOR: Color = Color::White;
const DIM_TEXT_COLOR: Color = Color::Gray;

/// Creates a standard styled block with rounded borders
fn styled_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_COLOR))
        .title(title)
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(area);

    render_sidebar(frame, layout[0], app);
    render_canvas(frame, get_canvas_area(area), app);

    if app.show_help {
        render_help_overlay(frame, area);
    }
}

/// Screen area of the grid canvas. The canvas is sized so that its Braille
/// dot resolution is square, since a dot is roughly square on screen.
pub fn get_canvas_area(frame_area: Rect) -> Rect {
    let avail_width = frame_area.width.saturating_sub(SIDEBAR_WIDTH);
    let avail_height = frame_area.height;
    let side_dots = (avail_width as u32 * 2).min(avail_height as u32 * 4);
    let width = (side_dots / 2) as u16;
    let height = (side_dots / 4) as u16;
    Rect {
        x: frame_area.x + SIDEBAR_WIDTH.min(frame_area.width) + (avail_width - width) / 2,
        y: frame_area.y + (avail_height - height) / 2,
        width,
        height,
    }
}

fn render_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Status
            Constraint::Length(app.shapes.names().len() as u16 + 2),
            Constraint::Min(10), // Controls
        ])
        .split(area);

    render_status_box(frame, sections[0], app);
    render_shapes_box(frame, sections[1], app);
    render_controls_box(frame, sections[2], app);
}

fn render_status_box(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block(" Game of Life ");

    let (status_text, status_color) = if app.is_playing() {
        ("PLAYING", Color::Green)
    } else {
        ("PAUSED", HIGHLIGHT_COLOR)
    };

    let text = Style::default().fg(TEXT_COLOR);
    let mut content = vec![
        Line::from(Span::styled(status_text, Style::default().fg(status_color))),
        Line::from(Span::styled(format!("Gen:   {}", app.generation), text)),
        Line::from(Span::styled(format!("Alive: {}", app.state.grid.population()), text)),
        Line::from(Span::styled(
            format!(
                "FPS:   {} ({}ms)",
                app.driver.target_fps(),
                app.driver.frame_interval().as_millis()
            ),
            text,
        )),
    ];
    if let Some(message) = &app.status_message {
        content.push(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(DIM_TEXT_COLOR),
        )));
    }

    let paragraph = Paragraph::new(content).block(block);
    frame.render_widget(paragraph, area);
}

fn render_shapes_box(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block(" Shape (1-4) ");

    let content: Vec<Line> = app
        .shapes
        .names()
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let selected = name == app.selector;
            let prefix = if selected { "> " } else { "  " };
            let style = if selected {
                Style::default().fg(HIGHLIGHT_COLOR)
            } else {
                Style::default().fg(TEXT_COLOR)
            };
            Line::from(Span::styled(format!("{}{} {}", prefix, i + 1, name), style))
        })
        .collect();

    let paragraph = Paragraph::new(content).block(block);
    frame.render_widget(paragraph, area);
}

fn render_controls_box(frame: &mut Frame, area: Rect, app: &App) {
    let key_style = Style::default().fg(HIGHLIGHT_COLOR);
    let desc_style = Style::default().fg(DIM_TEXT_COLOR);

    // Helper to create a control line
    let make_control = |key: &str, desc: &str| -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{:>5}", key), key_style),
            Span::styled(format!(" {}", desc), desc_style),
        ])
    };

    let play_label = if app.is_playing() { "pause" } else { "play" };

    let content = vec![
        make_control("Space", play_label),
        make_control(".", "step"),
        make_control("R", "reset"),
        make_control("Tab", "next shape"),
        make_control("+/-", "frame rate"),
        make_control("Mouse", "place shape"),
        make_control("P", "save PNG"),
        make_control("E", "export config"),
        make_control("H", "help"),
        make_control("Q", "quit"),
    ];

    let paragraph = Paragraph::new(content).block(styled_block(" Controls "));
    frame.render_widget(paragraph, area);
}

fn render_canvas(frame: &mut Frame, area: Rect, app: &App) {
    let mut canvas = BrailleCanvas::new(area.width, area.height);
    surface::render(&mut canvas, &app.state);

    let buffer = frame.buffer_mut();
    for cell in canvas.cells() {
        if let Some(target) = buffer.cell_mut((area.x + cell.x, area.y + cell.y)) {
            target.set_char(cell.char).set_fg(cell.color);
        }
    }
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help_width = 56.min(area.width.saturating_sub(4));
    let help_height = 24.min(area.height.saturating_sub(4));
    let help_area = Rect {
        x: area.x + (area.width.saturating_sub(help_width)) / 2,
        y: area.y + (area.height.saturating_sub(help_height)) / 2,
        width: help_width,
        height: help_height,
    };

    // Clear the background
    frame.render_widget(Clear, help_area);

    let heading = Style::default().fg(HIGHLIGHT_COLOR);
    let content = vec![
        Line::from(""),
        Line::from(Span::styled("CONWAY'S GAME OF LIFE", Style::default().fg(BORDER_COLOR))),
        Line::from(""),
        Line::from("A live cell with two or three live neighbors survives. A dead cell with exactly three live neighbors is born. The grid has hard edges: nothing wraps around."),
        Line::from(""),
        Line::from(Span::styled("PLACING SHAPES:", heading)),
        Line::from("Move the mouse over the grid to preview the selected shape, click to toggle its cells."),
        Line::from("1=Single, 2=Box, 3=Glider, 4=Line, Tab/Shift+Tab=cycle"),
        Line::from(""),
        Line::from(Span::styled("PLAYBACK:", heading)),
        Line::from("Space=Play/Pause, .=Single step, R=Reset (also pauses), +/-=Frame rate"),
        Line::from(""),
        Line::from(Span::styled("OUTPUT:", heading)),
        Line::from("P=Save PNG snapshot, E=Export settings, Q=Quit"),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(HIGHLIGHT_COLOR))
        .title(" Help (H to close) ");

    let paragraph = Paragraph::new(content).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, help_area);
}
