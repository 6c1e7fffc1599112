//! # Input
//!
//! Normalized pointer, wheel and key events, the winit bridge that produces
//! them and a queue for delivering them from another thread.

pub mod event;
pub mod queue;
pub mod winit_support;

pub use event::{
    InputEvent, Key, MouseButton, MouseEvent, MouseTracker, PointerEvent, WheelEvent, WheelOrientation,
};
pub use queue::{channel, InputQueue, InputSender};
pub use winit_support::WinitTranslator;
