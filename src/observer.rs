//! Observer lists.
//!
//! A [`Signal`] holds callbacks and calls each of them on [`Signal::emit`].
//! Emitters fire only after their own state is updated, so a slot may read
//! back whatever changed.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Handle returned by [`Signal::connect`], used to disconnect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(u64);

type Slot<T> = Rc<RefCell<dyn FnMut(&T)>>;

/// Single-threaded list of callbacks taking `&T`.
pub struct Signal<T> {
    slots: RefCell<Vec<(SlotId, Slot<T>)>>,
    next_id: Cell<u64>,
}

impl<T> Signal<T> {
    pub fn new() -> Self {
        Self {
            slots: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    pub fn connect<F>(&self, slot: F) -> SlotId
    where
        F: FnMut(&T) + 'static,
    {
        let id = SlotId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        let slot: Slot<T> = Rc::new(RefCell::new(slot));
        self.slots.borrow_mut().push((id, slot));
        id
    }

    /// Removes a slot. Returns whether it was connected.
    pub fn disconnect(&self, id: SlotId) -> bool {
        let mut slots = self.slots.borrow_mut();
        let before = slots.len();
        slots.retain(|(sid, _)| *sid != id);
        slots.len() != before
    }

    pub fn is_connected(&self, id: SlotId) -> bool {
        self.slots.borrow().iter().any(|(sid, _)| *sid == id)
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }

    /// Calls every slot in connection order.
    ///
    /// Slots may connect and disconnect while running. A slot connected
    /// during an emit is first called by the next one; a slot disconnected
    /// during an emit is not called again, even later in the same emit. A
    /// slot that re-enters `emit` is skipped by the nested call.
    pub fn emit(&self, value: &T) {
        let snapshot: Vec<(SlotId, Slot<T>)> = self
            .slots
            .borrow()
            .iter()
            .map(|(id, slot)| (*id, Rc::clone(slot)))
            .collect();
        for (id, slot) in snapshot {
            if !self.is_connected(id) {
                continue;
            }
            if let Ok(mut f) = slot.try_borrow_mut() {
                (&mut *f)(value);
            }
        }
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal").field("slots", &self.len()).finish()
    }
}
