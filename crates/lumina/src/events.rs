//! # Input Events
//!
//! Everything the page tells the portrait arrives through an [`EventBus`].
//!
//! ```text
//! ┌──────────────┐                ┌──────────────┐   drain() at    ┌──────────────┐
//! │ resize       │──┐             │   channel    │   frame start   │              │
//! │ preferences  │──┼── send() ──>│ (unbounded)  │────────────────>│              │
//! │ teardown     │──┘             └──────────────┘                 │ PortraitView │
//! │              │                ┌──────────────┐                 │              │
//! │ pointermove  │─── send() ────>│ pointer slot │────────────────>│              │
//! └──────────────┘                │ (latest wins)│                 └──────────────┘
//!                                 └──────────────┘
//! ```
//!
//! Resize, preference and teardown events are never dropped while the view
//! is mounted. Pointer moves overwrite each other: only the newest position
//! matters to a frame, so a flood of moves costs one slot.
//!
//! Listeners never touch the particle field. The view drains the bus before
//! each frame step, so a resize replaces the particle set between frames and
//! no frame sees half a set.

use std::sync::{Arc, Weak};

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;

/// Events delivered from the page to the portrait.
#[derive(Clone, Debug, PartialEq)]
pub enum PortraitEvent {
    /// The container changed size or moved.
    Resized {
        /// New width in pixels.
        width: u32,
        /// New height in pixels.
        height: u32,
        /// Surface left edge in client space.
        origin_x: f64,
        /// Surface top edge in client space.
        origin_y: f64,
    },

    /// The pointer moved somewhere over the page.
    PointerMoved {
        /// Client-space x.
        client_x: f64,
        /// Client-space y.
        client_y: f64,
    },

    /// The reduced-motion preference changed.
    ReducedMotionChanged(bool),

    /// The host is tearing the view down.
    Teardown,
}

/// Newest unread pointer position, in client space.
type PointerSlot = Mutex<Option<(f64, f64)>>;

/// Channel plus pointer slot carrying [`PortraitEvent`]s.
pub struct EventBus {
    sender: Sender<PortraitEvent>,
    receiver: Receiver<PortraitEvent>,
    pointer: Arc<PointerSlot>,
}

impl EventBus {
    /// Creates an empty bus.
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self {
            sender,
            receiver,
            pointer: Arc::new(Mutex::new(None)),
        }
    }

    /// Splits the bus into its two ends.
    ///
    /// The receiver owns the pointer slot; once it is dropped every send
    /// fails.
    #[must_use]
    pub fn split(self) -> (EventSender, EventReceiver) {
        (
            EventSender {
                sender: self.sender,
                pointer: Arc::downgrade(&self.pointer),
            },
            EventReceiver {
                receiver: self.receiver,
                pointer: self.pointer,
            },
        )
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle for sending events (clone for multiple listeners).
#[derive(Clone, Debug)]
pub struct EventSender {
    sender: Sender<PortraitEvent>,
    pointer: Weak<PointerSlot>,
}

impl EventSender {
    /// Sends an event (non-blocking).
    ///
    /// Returns `false` only if the view has been torn down.
    #[inline]
    pub fn send(&self, event: PortraitEvent) -> bool {
        match event {
            PortraitEvent::PointerMoved { client_x, client_y } => {
                self.pointer_moved(client_x, client_y)
            }
            event => self.sender.send(event).is_ok(),
        }
    }

    /// Reports a container size change.
    pub fn resized(&self, width: u32, height: u32, origin_x: f64, origin_y: f64) -> bool {
        self.send(PortraitEvent::Resized {
            width,
            height,
            origin_x,
            origin_y,
        })
    }

    /// Reports a pointer move in client coordinates, replacing any move the
    /// view has not read yet.
    pub fn pointer_moved(&self, client_x: f64, client_y: f64) -> bool {
        let Some(slot) = self.pointer.upgrade() else {
            return false;
        };
        *slot.lock() = Some((client_x, client_y));
        true
    }
}

/// Handle for receiving events.
#[derive(Debug)]
pub struct EventReceiver {
    receiver: Receiver<PortraitEvent>,
    pointer: Arc<PointerSlot>,
}

impl EventReceiver {
    /// Receives all pending events (non-blocking).
    ///
    /// Queued events come out in send order, followed by the newest pointer
    /// move if there was one.
    pub fn drain(&self) -> Vec<PortraitEvent> {
        let mut events: Vec<_> = self.receiver.try_iter().collect();
        if let Some((client_x, client_y)) = self.pointer.lock().take() {
            events.push(PortraitEvent::PointerMoved { client_x, client_y });
        }
        events
    }

    /// Number of pending events.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len() + usize::from(self.pointer.lock().is_some())
    }
}
