//! ==============================================================================
//! engine.rs - simulation engine
//! ==============================================================================
//!
//! purpose:
//!     owns the periodic generator loop. every tick draws a temperature,
//!     stamps it, and records it in the state store (which trims the history
//!     and republishes statistics).
//!
//! run state:
//!     toggle() takes whichever transition applies. start() while running
//!     and stop() while stopped are no-ops.
//!
//! ```text
//!     ┌─────────┐   start()   ┌─────────┐
//!     │ stopped │ ──────────> │ running │
//!     │         │ <────────── │         │
//!     └─────────┘   stop()    └─────────┘
//! ```
//!
//! loop:
//!     one tokio task per run, holding that run's cancellation token. the
//!     token is checked under the run lock before every reading, so once
//!     stop() returns nothing else gets appended. the sleep between ticks
//!     also races the token, so a stopped loop exits without waiting out
//!     the interval. a restart gets a fresh token; a stale loop only ever
//!     sees its own cancelled token and exits.
//!
//! relationships:
//!     - uses: source.rs (temperature draw), store.rs (record + publish)
//!     - used by: main.rs (autostart, shutdown), server.rs (toggle)
//!
//! ==============================================================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::domain::Reading;
use crate::source::TemperatureSource;
use crate::store::StateStore;

/// fixed pause between two readings
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(2);

struct EngineInner {
    store: StateStore,
    source: Arc<dyn TemperatureSource>,
    interval: Duration,
    log_readings: AtomicBool,
    /// token of the active run, `None` while stopped
    run: Mutex<Option<CancellationToken>>,
}

/// clone-able handle to the engine
#[derive(Clone)]
pub struct SimulationEngine {
    inner: Arc<EngineInner>,
}

impl SimulationEngine {
    pub fn new(store: StateStore, source: Arc<dyn TemperatureSource>, interval: Duration) -> Self {
        Self {
            inner: Arc::new(EngineInner {
                store,
                source,
                interval,
                log_readings: AtomicBool::new(false),
                run: Mutex::new(None),
            }),
        }
    }

    /// log every reading at info level instead of debug
    pub fn set_reading_logs(&self, enabled: bool) {
        self.inner.log_readings.store(enabled, Ordering::Relaxed);
    }

    pub fn store(&self) -> &StateStore {
        &self.inner.store
    }

    pub fn is_running(&self) -> bool {
        self.inner.run.lock().is_some()
    }

    /// begin generating readings; returns false if already running
    ///
    /// must be called from within a tokio runtime
    pub fn start(&self) -> bool {
        let mut run = self.inner.run.lock();
        self.start_locked(&mut run)
    }

    /// stop generating readings; returns false if already stopped
    pub fn stop(&self) -> bool {
        let mut run = self.inner.run.lock();
        self.stop_locked(&mut run)
    }

    /// flip the run state, returning the new state (true = running)
    pub fn toggle(&self) -> bool {
        let mut run = self.inner.run.lock();
        if run.is_some() {
            self.stop_locked(&mut run);
            false
        } else {
            self.start_locked(&mut run);
            true
        }
    }

    /// generate and record one reading regardless of run state
    pub fn tick(&self) -> Reading {
        let reading = Reading::now(self.inner.source.sample());
        let evicted = self.inner.store.record(reading.clone());

        if self.inner.log_readings.load(Ordering::Relaxed) {
            info!("[SENSOR] Temp: {:.1}° at {}", reading.temperature, reading.timestamp);
        } else {
            debug!(
                temperature = reading.temperature,
                timestamp = %reading.timestamp,
                evicted = evicted.is_some(),
                "new reading"
            );
        }
        reading
    }

    fn start_locked(&self, run: &mut Option<CancellationToken>) -> bool {
        if run.is_some() {
            return false;
        }
        let token = CancellationToken::new();
        *run = Some(token.clone());
        self.inner.store.set_running(true);

        info!(interval_ms = self.inner.interval.as_millis() as u64, "simulation started");
        tokio::spawn(run_loop(self.clone(), token));
        true
    }

    fn stop_locked(&self, run: &mut Option<CancellationToken>) -> bool {
        let Some(token) = run.take() else {
            return false;
        };
        token.cancel();
        self.inner.store.set_running(false);
        info!("simulation stopped");
        true
    }

    /// one loop iteration's reading, skipped if `token` was cancelled
    fn tick_if_active(&self, token: &CancellationToken) -> bool {
        let run = self.inner.run.lock();
        if token.is_cancelled() {
            return false;
        }
        self.tick();
        drop(run);
        true
    }
}

async fn run_loop(engine: SimulationEngine, token: CancellationToken) {
    loop {
        if !engine.tick_if_active(&token) {
            break;
        }
        tokio::select! {
            _ = token.cancelled() => break,
            _ = tokio::time::sleep(engine.inner.interval) => {}
        }
    }
    debug!("generator loop exited");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::FixedSequence;

    fn engine(values: Vec<f64>) -> SimulationEngine {
        SimulationEngine::new(
            StateStore::new(),
            Arc::new(FixedSequence::new(values)),
            DEFAULT_INTERVAL,
        )
    }

    #[test]
    fn starts_stopped() {
        let engine = engine(vec![70.0]);
        assert!(!engine.is_running());
        assert!(!engine.store().current().running);
    }

    #[test]
    fn tick_records_without_running() {
        let engine = engine(vec![70.0, 80.0, 75.0]);
        for _ in 0..3 {
            engine.tick();
        }

        let stats = engine.store().current().statistics;
        assert_eq!(stats.current, 75.0);
        assert_eq!(stats.average, 75.0);
        assert!(!engine.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn double_start_is_a_no_op() {
        let engine = engine(vec![70.0]);
        assert!(engine.start());
        assert!(!engine.start());
        assert!(engine.stop());
        assert!(!engine.stop());
    }

    #[tokio::test(start_paused = true)]
    async fn toggle_twice_restores_state() {
        let engine = engine(vec![70.0]);
        assert!(engine.toggle());
        assert!(!engine.toggle());
        assert!(!engine.is_running());
        assert!(!engine.store().current().running);
    }

    #[test]
    fn clones_share_run_state() {
        let engine = engine(vec![70.0]);
        let other = engine.clone();
        other.set_reading_logs(true);
        assert!(engine.inner.log_readings.load(Ordering::Relaxed));

        other.tick();
        assert_eq!(engine.store().current().readings.len(), 1);
    }
}
