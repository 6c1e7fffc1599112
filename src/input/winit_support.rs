//! Translation from winit window events to [`InputEvent`]s.
//!
//! winit reports cursor motion and button changes separately, so the
//! translator remembers the last cursor position and the held buttons.

use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::event::{InputEvent, Key, MouseButton, PointerEvent, WheelEvent, WheelOrientation};

/// Wheel delta of one line, in eighths of a degree.
const LINE_DELTA: f64 = 120.0;

/// Stateful winit bridge. Feed it every window event; forward what comes out.
#[derive(Debug, Clone, Default)]
pub struct WinitTranslator {
    cursor: (f64, f64),
    /// Buttons currently down, in press order.
    held: Vec<MouseButton>,
}

impl WinitTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> (f64, f64) {
        self.cursor
    }

    /// The most recently pressed button that is still down.
    pub fn held_button(&self) -> Option<MouseButton> {
        self.held.last().copied()
    }

    pub fn translate(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => Some(self.cursor_moved(position.x, position.y)),
            WindowEvent::MouseInput { state, button, .. } => {
                let button = map_mouse_button(*button)?;
                Some(self.button(*state, button))
            }
            WindowEvent::MouseWheel { delta, .. } => Some(self.wheel(*delta)),
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return None;
                }
                match event.physical_key {
                    PhysicalKey::Code(code) => Some(InputEvent::KeyPress(map_key_code(code))),
                    PhysicalKey::Unidentified(_) => Some(InputEvent::KeyPress(Key::Unknown)),
                }
            }
            WindowEvent::Focused(false) => {
                self.held.clear();
                Some(InputEvent::FocusLost)
            }
            WindowEvent::Resized(size) => Some(InputEvent::Resize {
                width: size.width,
                height: size.height,
            }),
            _ => None,
        }
    }

    pub fn cursor_moved(&mut self, x: f64, y: f64) -> InputEvent {
        self.cursor = (x, y);
        InputEvent::MouseMove(PointerEvent::new(x, y, self.held_button()))
    }

    pub fn button(&mut self, state: ElementState, button: MouseButton) -> InputEvent {
        let (x, y) = self.cursor;
        match state {
            ElementState::Pressed => {
                self.held.retain(|b| *b != button);
                self.held.push(button);
                InputEvent::MousePress(PointerEvent::new(x, y, Some(button)))
            }
            ElementState::Released => {
                self.held.retain(|b| *b != button);
                InputEvent::MouseRelease(PointerEvent::new(x, y, Some(button)))
            }
        }
    }

    pub fn wheel(&self, delta: MouseScrollDelta) -> InputEvent {
        let (dx, dy) = match delta {
            MouseScrollDelta::LineDelta(x, y) => (x as f64 * LINE_DELTA, y as f64 * LINE_DELTA),
            MouseScrollDelta::PixelDelta(p) => (p.x, p.y),
        };
        let (x, y) = self.cursor;
        let (delta, orientation) = if dy == 0.0 && dx != 0.0 {
            (dx, WheelOrientation::Horizontal)
        } else {
            (dy, WheelOrientation::Vertical)
        };
        InputEvent::Wheel(WheelEvent {
            x,
            y,
            delta: delta.round() as i32,
            orientation,
        })
    }
}

pub fn map_mouse_button(button: winit::event::MouseButton) -> Option<MouseButton> {
    match button {
        winit::event::MouseButton::Left => Some(MouseButton::Left),
        winit::event::MouseButton::Right => Some(MouseButton::Right),
        winit::event::MouseButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

pub fn map_key_code(code: KeyCode) -> Key {
    match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::Tab => Key::Tab,
        KeyCode::Enter => Key::Return,
        KeyCode::NumpadEnter => Key::Enter,
        KeyCode::Insert => Key::Insert,
        KeyCode::Delete => Key::Delete,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::ArrowLeft => Key::Left,
        KeyCode::ArrowUp => Key::Up,
        KeyCode::ArrowRight => Key::Right,
        KeyCode::ArrowDown => Key::Down,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
        KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
        KeyCode::AltLeft | KeyCode::AltRight => Key::Alt,
        KeyCode::Space => Key::Space,
        KeyCode::F1 => Key::F(1),
        KeyCode::F2 => Key::F(2),
        KeyCode::F3 => Key::F(3),
        KeyCode::F4 => Key::F(4),
        KeyCode::F5 => Key::F(5),
        KeyCode::F6 => Key::F(6),
        KeyCode::F7 => Key::F(7),
        KeyCode::F8 => Key::F(8),
        KeyCode::F9 => Key::F(9),
        KeyCode::F10 => Key::F(10),
        KeyCode::F11 => Key::F(11),
        KeyCode::F12 => Key::F(12),
        KeyCode::KeyA => Key::Char('A'),
        KeyCode::KeyB => Key::Char('B'),
        KeyCode::KeyC => Key::Char('C'),
        KeyCode::KeyD => Key::Char('D'),
        KeyCode::KeyE => Key::Char('E'),
        KeyCode::KeyF => Key::Char('F'),
        KeyCode::KeyG => Key::Char('G'),
        KeyCode::KeyH => Key::Char('H'),
        KeyCode::KeyI => Key::Char('I'),
        KeyCode::KeyJ => Key::Char('J'),
        KeyCode::KeyK => Key::Char('K'),
        KeyCode::KeyL => Key::Char('L'),
        KeyCode::KeyM => Key::Char('M'),
        KeyCode::KeyN => Key::Char('N'),
        KeyCode::KeyO => Key::Char('O'),
        KeyCode::KeyP => Key::Char('P'),
        KeyCode::KeyQ => Key::Char('Q'),
        KeyCode::KeyR => Key::Char('R'),
        KeyCode::KeyS => Key::Char('S'),
        KeyCode::KeyT => Key::Char('T'),
        KeyCode::KeyU => Key::Char('U'),
        KeyCode::KeyV => Key::Char('V'),
        KeyCode::KeyW => Key::Char('W'),
        KeyCode::KeyX => Key::Char('X'),
        KeyCode::KeyY => Key::Char('Y'),
        KeyCode::KeyZ => Key::Char('Z'),
        KeyCode::Digit0 => Key::Char('0'),
        KeyCode::Digit1 => Key::Char('1'),
        KeyCode::Digit2 => Key::Char('2'),
        KeyCode::Digit3 => Key::Char('3'),
        KeyCode::Digit4 => Key::Char('4'),
        KeyCode::Digit5 => Key::Char('5'),
        KeyCode::Digit6 => Key::Char('6'),
        KeyCode::Digit7 => Key::Char('7'),
        KeyCode::Digit8 => Key::Char('8'),
        KeyCode::Digit9 => Key::Char('9'),
        _ => Key::Unknown,
    }
}
