//! Normalized input events.
//!
//! Pointer coordinates are window pixels with the origin at the top-left
//! corner, as delivered by the windowing layer.

/// Mouse buttons the dispatcher distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// A raw press/move/release sample from the windowing collaborator.
///
/// For moves `button` is the button currently held, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
    pub button: Option<MouseButton>,
}

impl PointerEvent {
    pub fn new(x: f64, y: f64, button: Option<MouseButton>) -> Self {
        Self { x, y, button }
    }

    pub fn left(x: f64, y: f64) -> Self {
        Self::new(x, y, Some(MouseButton::Left))
    }

    pub fn right(x: f64, y: f64) -> Self {
        Self::new(x, y, Some(MouseButton::Right))
    }

    pub fn middle(x: f64, y: f64) -> Self {
        Self::new(x, y, Some(MouseButton::Middle))
    }

    /// A move with no button held.
    pub fn hover(x: f64, y: f64) -> Self {
        Self::new(x, y, None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WheelOrientation {
    Horizontal,
    #[default]
    Vertical,
}

/// Wheel rotation in eighths of a degree; one notch is usually 120.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    pub x: f64,
    pub y: f64,
    pub delta: i32,
    pub orientation: WheelOrientation,
}

impl WheelEvent {
    pub fn new(x: f64, y: f64, delta: i32) -> Self {
        Self {
            x,
            y,
            delta,
            orientation: WheelOrientation::Vertical,
        }
    }

    /// Scroll ticks as the camera controllers count them.
    pub fn ticks(&self) -> i32 {
        (self.delta / 8) * 2
    }
}

/// Platform-independent key identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Tab,
    Return,
    Enter,
    Insert,
    Delete,
    Home,
    End,
    Left,
    Up,
    Right,
    Down,
    PageUp,
    PageDown,
    Shift,
    Control,
    Alt,
    Space,
    /// Function key `F1`..`F12`.
    F(u8),
    /// Printable character; letters are upper case.
    Char(char),
    Unknown,
}

/// Pointer event as delivered to cameras and scene items.
///
/// `dx`/`dy` are the motion since the previous sample and are zero on press
/// and release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
    pub button: Option<MouseButton>,
}

impl MouseEvent {
    pub fn is_left(&self) -> bool {
        self.button == Some(MouseButton::Left)
    }
}

/// Derives [`MouseEvent`] deltas from successive pointer samples.
#[derive(Debug, Clone, Default)]
pub struct MouseTracker {
    last: Option<(f64, f64)>,
}

impl MouseTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, e: &PointerEvent) -> MouseEvent {
        self.last = Some((e.x, e.y));
        MouseEvent {
            x: e.x,
            y: e.y,
            dx: 0.0,
            dy: 0.0,
            button: e.button,
        }
    }

    pub fn moved(&mut self, e: &PointerEvent) -> MouseEvent {
        let (dx, dy) = match self.last {
            Some((lx, ly)) => (e.x - lx, e.y - ly),
            None => (0.0, 0.0),
        };
        self.last = Some((e.x, e.y));
        MouseEvent {
            x: e.x,
            y: e.y,
            dx,
            dy,
            button: e.button,
        }
    }

    pub fn release(&mut self, e: &PointerEvent) -> MouseEvent {
        self.last = Some((e.x, e.y));
        MouseEvent {
            x: e.x,
            y: e.y,
            dx: 0.0,
            dy: 0.0,
            button: e.button,
        }
    }

    /// Last known cursor position.
    pub fn position(&self) -> Option<(f64, f64)> {
        self.last
    }
}

/// Everything the dispatcher accepts from a platform binding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    MousePress(PointerEvent),
    MouseMove(PointerEvent),
    MouseRelease(PointerEvent),
    Wheel(WheelEvent),
    KeyPress(Key),
    FocusLost,
    Resize { width: u32, height: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_deltas() {
        let mut tracker = MouseTracker::new();
        let e = tracker.press(&PointerEvent::right(10.0, 10.0));
        assert_eq!((e.dx, e.dy), (0.0, 0.0));
        let e = tracker.moved(&PointerEvent::right(14.0, 7.0));
        assert_eq!((e.dx, e.dy), (4.0, -3.0));
        let e = tracker.moved(&PointerEvent::right(15.0, 7.0));
        assert_eq!((e.dx, e.dy), (1.0, 0.0));
        let e = tracker.release(&PointerEvent::right(15.0, 7.0));
        assert_eq!((e.dx, e.dy), (0.0, 0.0));
    }

    #[test]
    fn test_wheel_ticks() {
        assert_eq!(WheelEvent::new(0.0, 0.0, 120).ticks(), 30);
        assert_eq!(WheelEvent::new(0.0, 0.0, -120).ticks(), -30);
    }
}
