//! Batch partitioning and deterministic archive names.

use std::ops::Range;

/// How `total` identifiers split into batches of `size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan {
    pub total: usize,
    pub size: usize,
}

impl BatchPlan {
    /// `size` is clamped to at least 1.
    pub fn new(total: usize, size: usize) -> Self {
        Self {
            total,
            size: size.max(1),
        }
    }

    /// ceil(total / size).
    pub fn count(&self) -> usize {
        self.total.div_ceil(self.size)
    }

    /// Row range `[index·size, (index+1)·size)` clamped to `total`.
    pub fn range(&self, index: usize) -> Range<usize> {
        let start = (index * self.size).min(self.total);
        let end = (start + self.size).min(self.total);
        start..end
    }
}

/// `asin_batch_<index+1>_of_<total>.zip`, both zero-padded to the same width
/// (at least two digits) so names sort in batch order.
pub fn batch_label(index: usize, total: usize) -> String {
    let width = total.to_string().len().max(2);
    format!(
        "asin_batch_{:0w$}_of_{:0w$}.zip",
        index + 1,
        total,
        w = width
    )
}
