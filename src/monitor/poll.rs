//! The monitor and its poll loop.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::time;

use crate::alert::AlertDispatcher;
use crate::health::{run_cycle_report, CycleReport, DebounceStore, ProbeMode, Prober, TransitionEngine};
use crate::lifecycle::ShutdownSignal;
use crate::observability::metrics;
use crate::registry::TargetRegistry;

/// Drives poll cycles over a fixed registry.
pub struct Monitor {
    registry: TargetRegistry,
    store: DebounceStore,
    engine: TransitionEngine,
    prober: Arc<dyn Prober>,
    dispatcher: AlertDispatcher,
    interval: Duration,
    mode: ProbeMode,
    cycles: u64,
}

impl Monitor {
    /// Every registered target starts healthy.
    pub fn new(
        registry: TargetRegistry,
        engine: TransitionEngine,
        prober: Arc<dyn Prober>,
        dispatcher: AlertDispatcher,
        interval: Duration,
    ) -> Self {
        let store = DebounceStore::seeded(registry.keys());
        Self {
            registry,
            store,
            engine,
            prober,
            dispatcher,
            interval,
            mode: ProbeMode::Sequential,
            cycles: 0,
        }
    }

    pub fn with_probe_mode(mut self, mode: ProbeMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    pub fn store(&self) -> &DebounceStore {
        &self.store
    }

    pub fn engine(&self) -> &TransitionEngine {
        &self.engine
    }

    /// Completed cycles so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Run one cycle and dispatch its events in registry order.
    pub async fn tick(&mut self) -> CycleReport {
        self.cycles += 1;
        let started = Instant::now();
        tracing::debug!(cycle = self.cycles, targets = self.registry.len(), "Starting poll cycle");

        let report = run_cycle_report(
            &self.registry,
            &mut self.store,
            self.prober.as_ref(),
            &self.engine,
            self.mode,
        )
        .await;

        for event in &report.events {
            self.dispatcher.dispatch(event).await;
        }

        metrics::record_cycle_duration(started.elapsed());
        tracing::debug!(
            cycle = self.cycles,
            alerts = report.events.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Poll cycle finished"
        );
        report
    }

    /// Poll until `shutdown` fires. A cycle in progress is always completed.
    pub async fn run(mut self, mut shutdown: ShutdownSignal) {
        tracing::info!(
            targets = self.registry.len(),
            interval_secs = self.interval.as_secs(),
            "Monitor starting"
        );

        loop {
            self.tick().await;

            tokio::select! {
                _ = time::sleep(self.interval) => {}
                _ = shutdown.wait() => {
                    tracing::info!("Monitor received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}

impl std::fmt::Debug for Monitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Monitor")
            .field("targets", &self.registry.len())
            .field("threshold", &self.engine.threshold())
            .field("interval", &self.interval)
            .field("mode", &self.mode)
            .field("cycles", &self.cycles)
            .finish()
    }
}
