//! ==============================================================================
//! store.rs - observable dashboard state
//! ==============================================================================
//!
//! purpose:
//!     holds the authoritative history and publishes a complete snapshot
//!     (readings + statistics + run state) after every change.
//!
//! consistency:
//!     append, trim, recompute and publish happen while the history lock is
//!     held, so observers see either the pre-tick or the post-tick snapshot,
//!     never a partial update.
//!
//! subscribing:
//!     backed by a tokio watch channel. a fresh receiver already holds the
//!     latest snapshot (subscribe-and-get-current) and is woken on each
//!     publish. slow observers skip intermediate snapshots, which is fine
//!     since every snapshot is complete.
//!
//! relationships:
//!     - written by: engine.rs (record, set_running)
//!     - read by: server.rs (current), any subscriber
//!
//! ==============================================================================

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::domain::Reading;
use crate::history::History;
use crate::stats::Statistics;

/// everything the presentation layer consumes
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// retained readings, oldest first
    pub readings: Vec<Reading>,
    pub statistics: Statistics,
    pub running: bool,
    /// timestamp of the most recent reading
    pub last_update: Option<String>,
    /// readings generated since the store was created (including evicted)
    pub total_readings: u64,
}

impl Snapshot {
    pub fn has_data(&self) -> bool {
        !self.readings.is_empty()
    }

    /// list order
    pub fn newest_first(&self) -> impl Iterator<Item = &Reading> {
        self.readings.iter().rev()
    }

    pub fn temperatures(&self) -> Vec<f64> {
        self.readings.iter().map(|r| r.temperature).collect()
    }
}

struct Inner {
    history: History,
    running: bool,
    total_readings: u64,
}

impl Inner {
    fn snapshot(&self) -> Snapshot {
        Snapshot {
            readings: self.history.to_vec(),
            statistics: Statistics::from_history(&self.history),
            running: self.running,
            last_update: self.history.latest().map(|r| r.timestamp.clone()),
            total_readings: self.total_readings,
        }
    }
}

/// clone-able handle to the shared state
#[derive(Clone)]
pub struct StateStore {
    inner: Arc<Mutex<Inner>>,
    tx: Arc<watch::Sender<Snapshot>>,
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore {
    pub fn new() -> Self {
        let inner = Inner {
            history: History::new(),
            running: false,
            total_readings: 0,
        };
        let (tx, _) = watch::channel(inner.snapshot());
        Self {
            inner: Arc::new(Mutex::new(inner)),
            tx: Arc::new(tx),
        }
    }

    /// append a reading and publish the recomputed snapshot
    ///
    /// returns the reading evicted from the history, if any
    pub fn record(&self, reading: Reading) -> Option<Reading> {
        let mut inner = self.inner.lock();
        let evicted = inner.history.push(reading);
        inner.total_readings += 1;
        self.tx.send_replace(inner.snapshot());
        evicted
    }

    pub fn set_running(&self, running: bool) {
        let mut inner = self.inner.lock();
        if inner.running == running {
            return;
        }
        inner.running = running;
        self.tx.send_modify(|snapshot| snapshot.running = running);
    }

    pub fn current(&self) -> Snapshot {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HISTORY_CAPACITY;

    #[test]
    fn initial_snapshot_is_empty_and_stopped() {
        let store = StateStore::new();
        let snapshot = store.current();

        assert!(!snapshot.has_data());
        assert!(!snapshot.running);
        assert_eq!(snapshot.statistics, Statistics::default());
        assert_eq!(snapshot.last_update, None);
    }

    #[test]
    fn record_publishes_readings_and_statistics_together() {
        let store = StateStore::new();
        for t in [70.0, 80.0, 75.0] {
            store.record(Reading::new(t, "09:30:00"));
        }

        let snapshot = store.current();
        assert_eq!(snapshot.temperatures(), vec![70.0, 80.0, 75.0]);
        assert_eq!(snapshot.statistics, Statistics::compute(&[70.0, 80.0, 75.0]));
        assert_eq!(snapshot.last_update.as_deref(), Some("09:30:00"));
        assert_eq!(snapshot.total_readings, 3);
    }

    #[test]
    fn newest_first_is_list_order() {
        let store = StateStore::new();
        store.record(Reading::new(70.0, "00:00:01"));
        store.record(Reading::new(71.0, "00:00:03"));

        let snapshot = store.current();
        let stamps: Vec<_> = snapshot.newest_first().map(|r| r.timestamp.as_str()).collect();
        assert_eq!(stamps, vec!["00:00:03", "00:00:01"]);
    }

    #[test]
    fn record_reports_eviction_once_full() {
        let store = StateStore::new();
        let first = Reading::new(65.0, "00:00:00");
        store.record(first.clone());
        for _ in 1..HISTORY_CAPACITY {
            assert!(store.record(Reading::new(70.0, "00:00:01")).is_none());
        }

        let evicted = store.record(Reading::new(71.0, "00:00:02"));
        assert_eq!(evicted, Some(first));
        assert_eq!(store.current().readings.len(), HISTORY_CAPACITY);
        assert_eq!(store.current().total_readings, HISTORY_CAPACITY as u64 + 1);
    }

    #[test]
    fn subscriber_sees_current_value_immediately() {
        let store = StateStore::new();
        store.record(Reading::new(77.0, "08:00:00"));

        let rx = store.subscribe();
        assert_eq!(rx.borrow().statistics.current, 77.0);
    }

    #[tokio::test]
    async fn subscriber_is_notified_on_change() {
        let store = StateStore::new();
        let mut rx = store.subscribe();

        store.set_running(true);
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().running);

        store.record(Reading::new(66.0, "08:00:02"));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().readings.len(), 1);
    }

    #[test]
    fn unchanged_run_state_is_not_republished() {
        let store = StateStore::new();
        let rx = store.subscribe();

        store.set_running(false);
        assert!(!rx.has_changed().unwrap());
    }
}
