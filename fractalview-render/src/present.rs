use tracing::debug;

use crate::frame::FrameBuffer;

/// An addressable RGBA surface that a finished frame is handed to.
///
/// Implementations must present the buffer atomically, with no
/// partial-frame visibility.
pub trait PresentTarget {
    fn present(&mut self, frame: &FrameBuffer);
}

/// Single-slot presentation register.
///
/// At most one pending presentation is outstanding at a time; scheduling a
/// newer completed frame replaces an older unpresented one (coalescing,
/// never queuing).
#[derive(Debug, Default)]
pub struct FrameSlot {
    pending: Option<FrameBuffer>,
}

impl FrameSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a frame, superseding any frame still waiting in the slot.
    pub fn schedule(&mut self, frame: FrameBuffer) {
        if self.pending.is_some() {
            debug!("coalescing unpresented frame");
        }
        self.pending = Some(frame);
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending frame out of the slot, if any.
    pub fn take(&mut self) -> Option<FrameBuffer> {
        self.pending.take()
    }

    /// Present the pending frame, if any.  Returns whether a frame was
    /// handed over; the slot is empty afterwards.
    pub fn present_to(&mut self, target: &mut dyn PresentTarget) -> bool {
        match self.pending.take() {
            Some(frame) => {
                target.present(&frame);
                true
            }
            None => false,
        }
    }
}
