//! One poll cycle: probe every target, advance its counter, collect alerts.

use chrono::Utc;
use futures_util::future::join_all;
use serde::Serialize;

use crate::alert::AlertEvent;
use crate::health::engine::TransitionEngine;
use crate::health::probe::{ProbeResult, Prober};
use crate::health::state::{Debounce, DebounceStore};
use crate::registry::{TargetKind, TargetRegistry};

/// How probes within a cycle are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbeMode {
    /// One target after the other, in registry order.
    #[default]
    Sequential,
    /// All targets at once; results are still applied in registry order.
    Concurrent,
}

/// Per-target outcome of a cycle.
#[derive(Debug, Clone, Serialize)]
pub struct TargetStatus {
    pub key: String,
    pub url: String,
    pub kind: TargetKind,
    pub result: ProbeResult,
    pub counter: Debounce,
}

/// Everything a cycle produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CycleReport {
    pub statuses: Vec<TargetStatus>,
    pub events: Vec<AlertEvent>,
}

impl CycleReport {
    pub fn all_healthy(&self) -> bool {
        self.statuses.iter().all(|s| s.result.healthy)
    }
}

/// Run one cycle and return the alerts it emitted, in registry order.
pub async fn run_cycle(
    registry: &TargetRegistry,
    store: &mut DebounceStore,
    prober: &dyn Prober,
    engine: &TransitionEngine,
    mode: ProbeMode,
) -> Vec<AlertEvent> {
    run_cycle_report(registry, store, prober, engine, mode)
        .await
        .events
}

/// Like [`run_cycle`], but also returns each target's probe result.
pub async fn run_cycle_report(
    registry: &TargetRegistry,
    store: &mut DebounceStore,
    prober: &dyn Prober,
    engine: &TransitionEngine,
    mode: ProbeMode,
) -> CycleReport {
    let results = probe_all(registry, prober, mode).await;

    let mut report = CycleReport::default();
    for (target, result) in registry.iter().zip(results) {
        if let Some(event) = engine.apply(store, target, &result, Utc::now()) {
            report.events.push(event);
        }
        report.statuses.push(TargetStatus {
            key: target.key.clone(),
            url: target.url.clone(),
            kind: target.kind,
            counter: store.get(&target.key).unwrap_or_default(),
            result,
        });
    }
    report
}

async fn probe_all(registry: &TargetRegistry, prober: &dyn Prober, mode: ProbeMode) -> Vec<ProbeResult> {
    match mode {
        ProbeMode::Sequential => {
            let mut results = Vec::with_capacity(registry.len());
            for target in registry.iter() {
                results.push(prober.probe(target).await);
            }
            results
        }
        ProbeMode::Concurrent => join_all(registry.iter().map(|t| prober.probe(t))).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::AlertKind;
    use crate::health::probe::ProbeError;
    use crate::registry::Target;
    use async_trait::async_trait;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    /// Replays scripted outcomes per key; unscripted keys are healthy.
    struct ScriptedProber {
        script: Mutex<HashMap<String, VecDeque<bool>>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedProber {
        fn new(script: Vec<(&str, Vec<bool>)>) -> Self {
            let script = script
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.into_iter().collect()))
                .collect();
            Self {
                script: Mutex::new(script),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Prober for ScriptedProber {
        async fn probe(&self, target: &Target) -> ProbeResult {
            self.calls.lock().unwrap().push(target.key.clone());
            let healthy = self
                .script
                .lock()
                .unwrap()
                .get_mut(&target.key)
                .and_then(VecDeque::pop_front)
                .unwrap_or(true);
            if healthy {
                ProbeResult::healthy(200)
            } else {
                ProbeResult::unhealthy(502, ProbeError::Status(502))
            }
        }
    }

    fn registry() -> TargetRegistry {
        TargetRegistry::new(vec![
            Target::url("https://alpha.example.com/").unwrap(),
            Target::url("https://beta.example.com/").unwrap(),
            Target::url("https://gamma.example.com/").unwrap(),
        ])
        .unwrap()
    }

    #[tokio::test]
    async fn events_follow_registry_order() {
        for mode in [ProbeMode::Sequential, ProbeMode::Concurrent] {
            let registry = registry();
            let mut store = DebounceStore::seeded(registry.keys());
            let prober = ScriptedProber::new(vec![("gamma", vec![false]), ("alpha", vec![false])]);
            let engine = TransitionEngine::new(30);

            let events = run_cycle(&registry, &mut store, &prober, &engine, mode).await;
            let keys: Vec<_> = events.iter().map(|e| e.target_key.as_str()).collect();
            assert_eq!(keys, vec!["alpha", "gamma"]);
            assert!(events.iter().all(|e| e.kind == AlertKind::WentDown));
            assert!(events.iter().all(|e| e.response_code == 502));
            assert_eq!(prober.calls.lock().unwrap().len(), 3);
        }
    }

    #[tokio::test]
    async fn sequential_mode_probes_in_order() {
        let registry = registry();
        let mut store = DebounceStore::seeded(registry.keys());
        let prober = ScriptedProber::new(vec![]);
        let engine = TransitionEngine::new(30);

        run_cycle(&registry, &mut store, &prober, &engine, ProbeMode::Sequential).await;
        assert_eq!(*prober.calls.lock().unwrap(), vec!["alpha", "beta", "gamma"]);
    }

    #[tokio::test]
    async fn counters_persist_across_cycles() {
        let registry = registry();
        let mut store = DebounceStore::seeded(registry.keys());
        let prober = ScriptedProber::new(vec![("beta", vec![false, false, false, true])]);
        let engine = TransitionEngine::new(3);

        let mut kinds = Vec::new();
        for _ in 0..5 {
            let report =
                run_cycle_report(&registry, &mut store, &prober, &engine, ProbeMode::Sequential).await;
            assert_eq!(report.statuses.len(), 3);
            kinds.push(report.events.iter().map(|e| e.kind).collect::<Vec<_>>());
        }

        assert_eq!(
            kinds,
            vec![
                vec![AlertKind::WentDown],
                vec![],
                vec![AlertKind::StillDown],
                vec![AlertKind::Recovered],
                vec![],
            ]
        );
        // The reminder put the counter back at -1; the healthy poll after it
        // is still reported as a recovery.
        assert_eq!(store.get("beta"), Some(Debounce::Healthy));
    }

    #[tokio::test]
    async fn report_reflects_health() {
        let registry = registry();
        let mut store = DebounceStore::seeded(registry.keys());
        let prober = ScriptedProber::new(vec![("beta", vec![false])]);
        let engine = TransitionEngine::new(30);

        let report = run_cycle_report(&registry, &mut store, &prober, &engine, ProbeMode::Sequential).await;
        assert!(!report.all_healthy());
        let beta = &report.statuses[1];
        assert_eq!(beta.key, "beta");
        assert_eq!(beta.counter, Debounce::Unhealthy { polls: 0 });
    }
}
