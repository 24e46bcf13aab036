use crate::settings::adjust_fps;
use crate::shapes::ShapeCatalog;
use crate::simulation::Key;
use crate::surface::SurfacePoint;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::layout::Rect;
use std::io;
use std::time::Duration;

/// Typed events coming from the host, before they become actions
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerMove(SurfacePoint),
    PointerDown,
    PointerLeave,
    /// Shape selector changed to this value
    ShapeSelected(String),
    PlayPause,
    SingleStep,
    Reset,
    /// Frame rate slider moved to this value
    FrameRate(u32),
    KeyDown(Key),
    Snapshot,
    ExportConfig,
    ToggleHelp,
    Quit,
}

/// Source of input events for the main loop
pub trait InputSource {
    /// Wait up to `timeout` for the next event
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<InputEvent>>;

    /// Screen area of the drawing surface, updated after every draw
    fn set_canvas(&mut self, _canvas: Rect) {}
}

/// Crossterm-backed input. Owns the widget values (shape selector and frame
/// rate slider) so it can report their new values on change.
pub struct TerminalInput {
    shapes: ShapeCatalog,
    selector: String,
    fps: u32,
    canvas: Rect,
    pointer_inside: bool,
}

impl TerminalInput {
    pub fn new(shapes: ShapeCatalog, selector: impl Into<String>, fps: u32) -> Self {
        Self {
            shapes,
            selector: selector.into(),
            fps,
            canvas: Rect::default(),
            pointer_inside: false,
        }
    }

    /// Translate one terminal event
    pub fn translate(&mut self, event: Event) -> Option<InputEvent> {
        match event {
            Event::Key(key) => self.translate_key(key),
            Event::Mouse(mouse) => self.translate_mouse(mouse),
            Event::FocusLost => self.leave(),
            _ => None,
        }
    }

    fn translate_key(&mut self, key: KeyEvent) -> Option<InputEvent> {
        // Only process Press events
        if key.kind != KeyEventKind::Press {
            return None;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(InputEvent::Quit);
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(InputEvent::Quit),
            KeyCode::Char(' ') => Some(InputEvent::PlayPause),
            KeyCode::Char('.') | KeyCode::Char('n') | KeyCode::Char('N') => {
                Some(InputEvent::SingleStep)
            }
            KeyCode::Char('r') | KeyCode::Char('R') => Some(InputEvent::Reset),
            KeyCode::Char('p') | KeyCode::Char('P') => Some(InputEvent::Snapshot),
            KeyCode::Char('e') | KeyCode::Char('E') => Some(InputEvent::ExportConfig),
            KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?') => {
                Some(InputEvent::ToggleHelp)
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.slide_fps(1),
            KeyCode::Char('-') | KeyCode::Char('_') => self.slide_fps(-1),
            KeyCode::Char(c @ '1'..='9') => {
                let idx = c as usize - '1' as usize;
                let name = self.shapes.names().get(idx)?.to_string();
                self.select(name)
            }
            KeyCode::Tab => {
                let name = self.shapes.next_name(&self.selector).to_string();
                self.select(name)
            }
            KeyCode::BackTab => {
                let name = self.shapes.prev_name(&self.selector).to_string();
                self.select(name)
            }
            KeyCode::Left => Some(InputEvent::KeyDown(Key::Left)),
            KeyCode::Right => Some(InputEvent::KeyDown(Key::Right)),
            _ => Some(InputEvent::KeyDown(Key::Other)),
        }
    }

    fn translate_mouse(&mut self, mouse: MouseEvent) -> Option<InputEvent> {
        let inside = self.canvas_contains(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                if inside {
                    self.pointer_inside = true;
                    Some(InputEvent::PointerMove(self.surface_point(mouse.column, mouse.row)))
                } else {
                    self.leave()
                }
            }
            MouseEventKind::Down(MouseButton::Left) if inside => Some(InputEvent::PointerDown),
            _ => None,
        }
    }

    /// Pointer leave fires once per exit from the canvas
    fn leave(&mut self) -> Option<InputEvent> {
        if self.pointer_inside {
            self.pointer_inside = false;
            Some(InputEvent::PointerLeave)
        } else {
            None
        }
    }

    fn select(&mut self, name: String) -> Option<InputEvent> {
        if name == self.selector {
            return None;
        }
        self.selector = name.clone();
        Some(InputEvent::ShapeSelected(name))
    }

    fn slide_fps(&mut self, delta: i32) -> Option<InputEvent> {
        let fps = adjust_fps(self.fps, delta);
        if fps == self.fps {
            return None;
        }
        self.fps = fps;
        Some(InputEvent::FrameRate(fps))
    }

    fn canvas_contains(&self, column: u16, row: u16) -> bool {
        column >= self.canvas.x
            && column < self.canvas.x + self.canvas.width
            && row >= self.canvas.y
            && row < self.canvas.y + self.canvas.height
    }

    /// Terminal cell to surface units (Braille dots), aimed at the middle of
    /// the character
    fn surface_point(&self, column: u16, row: u16) -> SurfacePoint {
        SurfacePoint {
            x: (column - self.canvas.x) as f32 * 2.0 + 1.0,
            y: (row - self.canvas.y) as f32 * 4.0 + 2.0,
            width: self.canvas.width as f32 * 2.0,
            height: self.canvas.height as f32 * 4.0,
        }
    }
}

impl InputSource for TerminalInput {
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<InputEvent>> {
        if event::poll(timeout)? {
            Ok(self.translate(event::read()?))
        } else {
            Ok(None)
        }
    }

    fn set_canvas(&mut self, canvas: Rect) {
        self.canvas = canvas;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;

    fn input() -> TerminalInput {
        let mut input = TerminalInput::new(ShapeCatalog::new(250), "single", 30);
        input.set_canvas(Rect::new(22, 0, 125, 63));
        input
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_button_keys() {
        let mut input = input();
        assert_eq!(input.translate(key(KeyCode::Char(' '))), Some(InputEvent::PlayPause));
        assert_eq!(input.translate(key(KeyCode::Char('.'))), Some(InputEvent::SingleStep));
        assert_eq!(input.translate(key(KeyCode::Char('r'))), Some(InputEvent::Reset));
        assert_eq!(input.translate(key(KeyCode::Char('q'))), Some(InputEvent::Quit));
        assert_eq!(
            input.translate(Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))),
            Some(InputEvent::Quit)
        );
    }

    #[test]
    fn test_arrow_keys_are_keydowns() {
        let mut input = input();
        assert_eq!(input.translate(key(KeyCode::Left)), Some(InputEvent::KeyDown(Key::Left)));
        assert_eq!(input.translate(key(KeyCode::Right)), Some(InputEvent::KeyDown(Key::Right)));
        assert_eq!(input.translate(key(KeyCode::Char('z'))), Some(InputEvent::KeyDown(Key::Other)));
    }

    #[test]
    fn test_shape_selector() {
        let mut input = input();
        assert_eq!(
            input.translate(key(KeyCode::Char('3'))),
            Some(InputEvent::ShapeSelected("glider".into()))
        );
        // Selecting the current value is not a change
        assert_eq!(input.translate(key(KeyCode::Char('3'))), None);
        assert_eq!(
            input.translate(key(KeyCode::Tab)),
            Some(InputEvent::ShapeSelected("line".into()))
        );
        assert_eq!(
            input.translate(key(KeyCode::Tab)),
            Some(InputEvent::ShapeSelected("single".into()))
        );
        assert_eq!(
            input.translate(key(KeyCode::BackTab)),
            Some(InputEvent::ShapeSelected("line".into()))
        );
        // No fifth shape
        assert_eq!(input.translate(key(KeyCode::Char('5'))), None);
    }

    #[test]
    fn test_frame_rate_slider() {
        let mut input = TerminalInput::new(ShapeCatalog::new(10), "single", 59);
        assert_eq!(input.translate(key(KeyCode::Char('+'))), Some(InputEvent::FrameRate(60)));
        assert_eq!(input.translate(key(KeyCode::Char('+'))), None);
        assert_eq!(input.translate(key(KeyCode::Char('-'))), Some(InputEvent::FrameRate(59)));
    }

    #[test]
    fn test_pointer_move_maps_to_surface() {
        let mut input = input();
        let event = input.translate(mouse(MouseEventKind::Moved, 22, 0));
        let Some(InputEvent::PointerMove(point)) = event else {
            panic!("expected pointer move, got {:?}", event);
        };
        assert_eq!((point.x, point.y), (1.0, 2.0));
        assert_eq!((point.width, point.height), (250.0, 252.0));
        assert_eq!(point.to_cell(250, 250), Cell::new(1, 1));

        let event = input.translate(mouse(MouseEventKind::Moved, 146, 62));
        let Some(InputEvent::PointerMove(point)) = event else {
            panic!("expected pointer move, got {:?}", event);
        };
        assert_eq!(point.to_cell(250, 250), Cell::new(248, 249));
    }

    #[test]
    fn test_pointer_leave_once() {
        let mut input = input();
        // Never entered: no leave
        assert_eq!(input.translate(mouse(MouseEventKind::Moved, 2, 2)), None);

        assert!(matches!(
            input.translate(mouse(MouseEventKind::Moved, 30, 10)),
            Some(InputEvent::PointerMove(_))
        ));
        assert_eq!(
            input.translate(mouse(MouseEventKind::Moved, 2, 2)),
            Some(InputEvent::PointerLeave)
        );
        assert_eq!(input.translate(mouse(MouseEventKind::Moved, 3, 2)), None);

        input.translate(mouse(MouseEventKind::Moved, 30, 10));
        assert_eq!(input.translate(Event::FocusLost), Some(InputEvent::PointerLeave));
    }

    #[test]
    fn test_pointer_down_only_on_canvas() {
        let mut input = input();
        assert_eq!(
            input.translate(mouse(MouseEventKind::Down(MouseButton::Left), 40, 5)),
            Some(InputEvent::PointerDown)
        );
        assert_eq!(
            input.translate(mouse(MouseEventKind::Down(MouseButton::Left), 5, 5)),
            None
        );
        assert_eq!(
            input.translate(mouse(MouseEventKind::Down(MouseButton::Right), 40, 5)),
            None
        );
    }
}
