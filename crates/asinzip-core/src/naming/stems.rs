//! Per-row filename stems with collision markers.

use std::collections::HashSet;

use super::suffix::Suffix;

/// Tracks `<identifier>.<suffix>` stems already handed out in one row.
///
/// A repeated stem (e.g. two columns that both resolve to `Main`) gets a `-2`,
/// `-3`, … marker instead of overwriting the earlier entry.
#[derive(Debug, Default)]
pub struct RowStems {
    taken: HashSet<String>,
}

impl RowStems {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unique stem for `identifier` + `suffix`; returns `(stem, collided)`.
    pub fn claim(&mut self, identifier: &str, suffix: Suffix) -> (String, bool) {
        let base = format!("{}.{}", identifier, suffix);
        if self.taken.insert(base.clone()) {
            return (base, false);
        }
        let mut n = 2u32;
        loop {
            let candidate = format!("{}-{}", base, n);
            if self.taken.insert(candidate.clone()) {
                return (candidate, true);
            }
            n += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_suffixes_do_not_collide() {
        let mut s = RowStems::new();
        assert_eq!(s.claim("A1", Suffix::Main), ("A1.Main".to_string(), false));
        assert_eq!(s.claim("A1", Suffix::Part(1)), ("A1.PT01".to_string(), false));
    }

    #[test]
    fn repeated_suffix_gets_marker() {
        let mut s = RowStems::new();
        s.claim("A1", Suffix::Main);
        assert_eq!(s.claim("A1", Suffix::Main), ("A1.Main-2".to_string(), true));
        assert_eq!(s.claim("A1", Suffix::Main), ("A1.Main-3".to_string(), true));
    }
}
