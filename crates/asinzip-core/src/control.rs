//! Run cancellation: a shared abort token checked between batches.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable handle; any clone can request the run to stop.
///
/// The orchestrator checks it before starting each batch. A batch that is
/// already running finishes and is stored.
#[derive(Debug, Clone, Default)]
pub struct RunControl {
    abort: Arc<AtomicBool>,
}

impl RunControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_abort(&self) {
        self.abort.store(true, Ordering::Relaxed);
    }

    pub fn is_aborted(&self) -> bool {
        self.abort.load(Ordering::Relaxed)
    }
}
