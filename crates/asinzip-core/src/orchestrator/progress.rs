//! Progress snapshots sent to the caller after each finished batch.

use crate::batch::BatchCounters;

#[derive(Debug, Clone)]
pub struct BatchProgress {
    /// Batches finished so far (1-based after the first batch).
    pub completed: usize,
    pub total: usize,
    pub label: String,
    pub counters: BatchCounters,
    pub locator: String,
}

impl BatchProgress {
    /// Fraction complete in [0.0, 1.0].
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        (self.completed as f64 / self.total as f64).min(1.0)
    }
}
