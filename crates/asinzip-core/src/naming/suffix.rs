//! Column name to suffix mapping.

use std::fmt;

/// Naming token appended to an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suffix {
    Main,
    Swatch,
    /// Sequential part number, rendered zero-padded to two digits (`PT01`).
    Part(u32),
}

impl fmt::Display for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Suffix::Main => f.write_str("Main"),
            Suffix::Swatch => f.write_str("Swatch"),
            Suffix::Part(n) => write!(f, "PT{:02}", n),
        }
    }
}

/// Returns the suffix for `column` and the next counter value.
///
/// Rules, first match wins, on the lowercased name with `_` read as space:
/// 1. contains `swatch` → `Swatch`, counter unchanged;
/// 2. is `main image` / `image main`, or has both words `main` and `image` → `Main`, counter unchanged;
/// 3. otherwise `PT{counter:02}` and the counter advances by one.
pub fn suffix_for(column: &str, counter: u32) -> (Suffix, u32) {
    let normalized = column.trim().to_lowercase().replace('_', " ");

    if normalized.contains("swatch") {
        return (Suffix::Swatch, counter);
    }

    let mut has_main = false;
    let mut has_image = false;
    for word in normalized.split_whitespace() {
        has_main |= word == "main";
        has_image |= word == "image";
    }
    if normalized == "main image" || normalized == "image main" || (has_main && has_image) {
        return (Suffix::Main, counter);
    }

    (Suffix::Part(counter), counter + 1)
}

/// Running `PTnn` counter for one identifier's row.
#[derive(Debug, Clone)]
pub struct SuffixAssigner {
    counter: u32,
}

impl Default for SuffixAssigner {
    fn default() -> Self {
        Self { counter: 1 }
    }
}

impl SuffixAssigner {
    /// Fresh assigner for a new row (counter at 1).
    pub fn new() -> Self {
        Self::default()
    }

    /// Suffix for the next fetched column of this row.
    pub fn assign(&mut self, column: &str) -> Suffix {
        let (suffix, next) = suffix_for(column, self.counter);
        self.counter = next;
        suffix
    }
}
