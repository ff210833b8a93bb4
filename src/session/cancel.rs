//! Cooperative cancellation of a running session

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Shared flag checked before every ply.
///
/// Clones share the same flag, so a handle can be given to another thread
/// (a signal handler, a UI) while the session runs.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
