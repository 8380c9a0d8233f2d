//! ==============================================================================
//! history.rs - bounded reading history
//! ==============================================================================
//!
//! purpose:
//!     keeps the most recent readings in insertion order. once the history is
//!     full, every append evicts exactly the oldest entry (fifo).
//!
//! relationships:
//!     - owned by: store.rs (behind the store mutex)
//!     - read by: stats.rs (full recomputation on every change)
//!
//! ==============================================================================

use std::collections::VecDeque;

use crate::domain::Reading;

/// number of readings retained by the dashboard
pub const HISTORY_CAPACITY: usize = 20;

#[derive(Clone, Debug)]
pub struct History {
    entries: VecDeque<Reading>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    /// a capacity of zero is clamped to one
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// append a reading, returning the evicted oldest entry if the bound was hit
    pub fn push(&mut self, reading: Reading) -> Option<Reading> {
        self.entries.push_back(reading);
        if self.entries.len() > self.capacity {
            self.entries.pop_front()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// most recently appended reading
    pub fn latest(&self) -> Option<&Reading> {
        self.entries.back()
    }

    /// newest first (list order)
    pub fn newest_first(&self) -> impl Iterator<Item = &Reading> {
        self.entries.iter().rev()
    }

    pub fn temperatures(&self) -> Vec<f64> {
        self.entries.iter().map(|r| r.temperature).collect()
    }

    pub fn to_vec(&self) -> Vec<Reading> {
        self.entries.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(n: usize) -> Reading {
        Reading::new(65.0 + n as f64 * 0.5, format!("00:00:{:02}", n % 60))
    }

    #[test]
    fn starts_empty() {
        let history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
        assert!(history.latest().is_none());
    }

    #[test]
    fn twenty_first_append_evicts_the_oldest() {
        let mut history = History::new();
        let readings: Vec<Reading> = (1..=21).map(reading).collect();

        for r in readings.iter().take(20) {
            assert!(history.push(r.clone()).is_none());
        }
        let evicted = history.push(readings[20].clone());

        assert_eq!(evicted.as_ref(), Some(&readings[0]));
        assert_eq!(history.len(), 20);
        assert_eq!(history.to_vec(), readings[1..].to_vec());
    }

    #[test]
    fn length_never_exceeds_capacity() {
        let mut history = History::new();
        for n in 0..100 {
            history.push(reading(n));
            assert!(history.len() <= HISTORY_CAPACITY);
        }
    }

    #[test]
    fn newest_first_reverses_insertion_order() {
        let mut history = History::new();
        let readings: Vec<Reading> = (0..3).map(reading).collect();
        for r in &readings {
            history.push(r.clone());
        }

        let ids: Vec<_> = history.newest_first().map(|r| r.id).collect();
        assert_eq!(ids, vec![readings[2].id, readings[1].id, readings[0].id]);
        assert_eq!(history.latest(), Some(&readings[2]));
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let mut history = History::with_capacity(0);
        history.push(reading(1));
        history.push(reading(2));
        assert_eq!(history.len(), 1);
        assert_eq!(history.latest().map(|r| r.temperature), Some(66.0));
    }
}
