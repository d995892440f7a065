use std::sync::atomic::{AtomicU64, Ordering};

/// Single-slot "current operation" register for in-flight fetches.
///
/// Issuing a new request bumps the generation; a job captures the generation
/// at issue time and its outcome is discarded if the generation has moved by
/// the time it completes.  Cancellation is cooperative: a superseded call
/// that still completes is dropped silently, never treated as an error.
#[derive(Debug, Default)]
pub struct FetchCancel {
    generation: AtomicU64,
}

impl FetchCancel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Supersede the current operation by advancing the generation.
    pub fn supersede(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Read the current generation.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Whether a job issued at `generation` has been superseded since.
    pub fn is_superseded(&self, generation: u64) -> bool {
        self.generation() != generation
    }
}
