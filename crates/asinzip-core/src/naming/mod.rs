//! Positional filename suffixes: `Main`, `Swatch`, or sequential `PTnn`.
//!
//! The `PTnn` counter is per identifier: it starts at 1 for every row and only
//! advances for columns that actually produce a fetch.

mod stems;
mod suffix;

pub use stems::RowStems;
pub use suffix::{suffix_for, Suffix, SuffixAssigner};
