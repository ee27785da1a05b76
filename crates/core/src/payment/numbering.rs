//! Human-readable instruction numbering.

use dashmap::DashMap;

/// Issues instruction numbers of the form `"{prefix}-{year}-{seq:05}"`.
///
/// The sequence is monotonic per calendar year and resets each year.
#[derive(Debug)]
pub struct InstructionNumberer {
    prefix: String,
    counters: DashMap<i32, u64>,
}

impl InstructionNumberer {
    /// Creates a numberer with the configured prefix.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counters: DashMap::new(),
        }
    }

    /// Issues the next number for `year`.
    #[must_use]
    pub fn next(&self, year: i32) -> String {
        let mut counter = self.counters.entry(year).or_insert(0);
        *counter += 1;
        format!("{}-{}-{:05}", self.prefix, year, *counter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_numbers() {
        let numberer = InstructionNumberer::new("PI");
        assert_eq!(numberer.next(2026), "PI-2026-00001");
        assert_eq!(numberer.next(2026), "PI-2026-00002");
        assert_eq!(numberer.next(2026), "PI-2026-00003");
    }

    #[test]
    fn test_sequence_per_year() {
        let numberer = InstructionNumberer::new("PI");
        assert_eq!(numberer.next(2026), "PI-2026-00001");
        assert_eq!(numberer.next(2027), "PI-2027-00001");
        assert_eq!(numberer.next(2026), "PI-2026-00002");
    }

    #[test]
    fn test_concurrent_numbers_unique() {
        use std::collections::HashSet;
        use std::sync::Arc;

        let numberer = Arc::new(InstructionNumberer::new("PI"));
        let threads: Vec<_> = (0..4)
            .map(|_| {
                let numberer = Arc::clone(&numberer);
                std::thread::spawn(move || {
                    (0..100).map(|_| numberer.next(2026)).collect::<Vec<_>>()
                })
            })
            .collect();

        let mut all = HashSet::new();
        for thread in threads {
            for number in thread.join().unwrap() {
                assert!(all.insert(number), "duplicate instruction number");
            }
        }
        assert_eq!(all.len(), 400);
    }
}
