//! Cross-thread event delivery.
//!
//! A platform binding that receives input on another thread pushes events
//! through an [`InputSender`]; the render thread drains the matching
//! [`InputQueue`] into the view once per frame.

use std::sync::mpsc::{self, Receiver, SendError, Sender, TryRecvError};

use super::event::InputEvent;
use crate::view::View;

/// Producer half. `Send`, clonable.
#[derive(Debug, Clone)]
pub struct InputSender {
    tx: Sender<InputEvent>,
}

impl InputSender {
    pub fn send(&self, event: InputEvent) -> Result<(), SendError<InputEvent>> {
        self.tx.send(event)
    }
}

/// Consumer half, owned by the thread that owns the view.
#[derive(Debug)]
pub struct InputQueue {
    rx: Receiver<InputEvent>,
}

/// Creates a connected sender/queue pair.
pub fn channel() -> (InputSender, InputQueue) {
    let (tx, rx) = mpsc::channel();
    (InputSender { tx }, InputQueue { rx })
}

impl InputQueue {
    /// Takes every event queued so far without blocking.
    pub fn pending(&self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    log::trace!("input sender disconnected");
                    break;
                }
            }
        }
        events
    }

    /// Delivers every queued event to `view`, in arrival order. Returns the
    /// number of events handled.
    pub fn drain(&self, view: &mut View) -> usize {
        let events = self.pending();
        for event in &events {
            view.handle_event(event);
        }
        events.len()
    }
}
