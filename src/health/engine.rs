//! Transition engine: debounce counter + probe outcome → next counter + alert.
//!
//! ```text
//! Healthy        + healthy   → Healthy                  (no alert)
//! Healthy        + unhealthy → Unhealthy{0}             WentDown
//! Unhealthy{n}   + healthy   → Healthy                  Recovered
//! Unhealthy{n}   + unhealthy → Unhealthy{n+1}           (no alert)
//!   ... unless n+1 == t-1    → Reminded                 StillDown
//! Reminded       + unhealthy → Unhealthy{0}             WentDown
//! Reminded       + healthy   → Healthy                  Recovered
//! ```
//!
//! The failed poll that would bring the counter to `t-1` is the `t`-th
//! consecutive failure; it fires the reminder and the counter returns to
//! the -1 anchor, so a target that stays down re-alerts with `WentDown` on
//! the next poll, while one that comes back still reports the recovery.
//! Flapping targets are not suppressed: every alternation yields an alert.

use chrono::{DateTime, Utc};

use crate::alert::{AlertEvent, AlertKind};
use crate::health::probe::ProbeResult;
use crate::health::state::{Debounce, DebounceStore};
use crate::registry::Target;

/// Result of feeding one probe outcome into the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: Debounce,
    pub alert: Option<AlertKind>,
}

/// Edge-triggered alerting with a reminder every `threshold` failed polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionEngine {
    threshold: u32,
}

impl TransitionEngine {
    /// `threshold` is clamped to at least 1.
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold: threshold.max(1),
        }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Pure state transition.
    pub fn transition(&self, current: Debounce, healthy: bool) -> Transition {
        match (current, healthy) {
            (Debounce::Healthy, true) => Transition {
                next: Debounce::Healthy,
                alert: None,
            },
            (Debounce::Healthy | Debounce::Reminded, false) => Transition {
                next: Debounce::Unhealthy { polls: 0 },
                alert: Some(AlertKind::WentDown),
            },
            (Debounce::Unhealthy { .. } | Debounce::Reminded, true) => Transition {
                next: Debounce::Healthy,
                alert: Some(AlertKind::Recovered),
            },
            (Debounce::Unhealthy { polls }, false) if polls + 2 >= self.threshold => Transition {
                next: Debounce::Reminded,
                alert: Some(AlertKind::StillDown),
            },
            (Debounce::Unhealthy { polls }, false) => Transition {
                next: Debounce::Unhealthy { polls: polls + 1 },
                alert: None,
            },
        }
    }

    /// Apply a probe result to the target's counter in `store`.
    ///
    /// The counter is advanced before the alert is handed out; delivery
    /// failures never roll it back. An unseeded key starts from healthy.
    pub fn apply(
        &self,
        store: &mut DebounceStore,
        target: &Target,
        result: &ProbeResult,
        now: DateTime<Utc>,
    ) -> Option<AlertEvent> {
        let current = store.get(&target.key).unwrap_or_default();
        let transition = self.transition(current, result.healthy);
        store.set(&target.key, transition.next);

        tracing::trace!(
            key = %target.key,
            from = current.raw(),
            to = transition.next.raw(),
            "Debounce counter updated"
        );

        transition
            .alert
            .map(|kind| AlertEvent::new(target, kind, result.status_code, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::probe::ProbeError;

    /// Feed a sequence of outcomes from the baseline; returns alerts (with
    /// their 1-based poll index) and the raw counter after each poll.
    fn run(threshold: u32, polls: &[bool]) -> (Vec<(usize, AlertKind)>, Vec<i64>) {
        let engine = TransitionEngine::new(threshold);
        let mut state = Debounce::Healthy;
        let mut alerts = Vec::new();
        let mut counters = Vec::new();
        for (i, &healthy) in polls.iter().enumerate() {
            let t = engine.transition(state, healthy);
            if let Some(kind) = t.alert {
                alerts.push((i + 1, kind));
            }
            state = t.next;
            counters.push(state.raw());
        }
        (alerts, counters)
    }

    #[test]
    fn steady_healthy_is_silent() {
        let (alerts, counters) = run(30, &[true; 50]);
        assert!(alerts.is_empty());
        assert!(counters.iter().all(|&c| c == -1));
    }

    #[test]
    fn first_failure_goes_down() {
        let engine = TransitionEngine::new(30);
        let t = engine.transition(Debounce::Healthy, false);
        assert_eq!(t.next, Debounce::Unhealthy { polls: 0 });
        assert_eq!(t.alert, Some(AlertKind::WentDown));
    }

    #[test]
    fn success_while_down_recovers() {
        let engine = TransitionEngine::new(30);
        for polls in [0, 1, 17, 29] {
            let t = engine.transition(Debounce::Unhealthy { polls }, true);
            assert_eq!(t.next, Debounce::Healthy);
            assert_eq!(t.alert, Some(AlertKind::Recovered));
        }
    }

    #[test]
    fn reminder_cadence_threshold_three() {
        let (alerts, counters) = run(3, &[false, false, false, false]);
        assert_eq!(
            alerts,
            vec![
                (1, AlertKind::WentDown),
                (3, AlertKind::StillDown),
                (4, AlertKind::WentDown),
            ]
        );
        assert_eq!(counters, vec![0, 1, -1, 0]);
    }

    #[test]
    fn full_period_yields_one_down_and_one_reminder() {
        let threshold = 30;
        let polls = vec![false; threshold as usize];
        let (alerts, counters) = run(threshold, &polls);
        assert_eq!(
            alerts,
            vec![(1, AlertKind::WentDown), (30, AlertKind::StillDown)]
        );
        assert_eq!(*counters.last().unwrap(), -1);
    }

    #[test]
    fn recovery_before_reminder() {
        let mut polls = vec![false; 29];
        polls.push(true);
        let (alerts, _) = run(30, &polls);
        assert_eq!(
            alerts,
            vec![(1, AlertKind::WentDown), (30, AlertKind::Recovered)]
        );
    }

    #[test]
    fn recovery_after_reminder_is_reported() {
        let mut polls = vec![false; 3];
        polls.push(true);
        polls.push(true);
        let (alerts, counters) = run(3, &polls);
        assert_eq!(
            alerts,
            vec![
                (1, AlertKind::WentDown),
                (3, AlertKind::StillDown),
                (4, AlertKind::Recovered),
            ]
        );
        assert_eq!(counters, vec![0, 1, -1, -1, -1]);
    }

    #[test]
    fn flapping_is_not_suppressed() {
        let (alerts, _) = run(30, &[false, true, false, true]);
        let kinds: Vec<_> = alerts.into_iter().map(|(_, k)| k).collect();
        assert_eq!(
            kinds,
            vec![
                AlertKind::WentDown,
                AlertKind::Recovered,
                AlertKind::WentDown,
                AlertKind::Recovered,
            ]
        );
    }

    #[test]
    fn threshold_one_reminds_every_other_poll() {
        let (alerts, counters) = run(1, &[false, false, false]);
        assert_eq!(
            alerts,
            vec![
                (1, AlertKind::WentDown),
                (2, AlertKind::StillDown),
                (3, AlertKind::WentDown),
            ]
        );
        assert_eq!(counters, vec![0, -1, 0]);
    }

    #[test]
    fn zero_threshold_is_clamped() {
        assert_eq!(TransitionEngine::new(0).threshold(), 1);
    }

    #[test]
    fn counter_stays_in_range() {
        // Deterministic pseudo-random outcome stream.
        let mut seed: u32 = 0x2545_f491;
        let outcomes: Vec<bool> = (0..5000)
            .map(|_| {
                seed ^= seed << 13;
                seed ^= seed >> 17;
                seed ^= seed << 5;
                seed % 5 == 0
            })
            .collect();

        for threshold in [1, 2, 3, 30, 360] {
            let (_, counters) = run(threshold, &outcomes);
            assert!(counters
                .iter()
                .all(|&c| c >= -1 && c < i64::from(threshold)));
        }
    }

    #[test]
    fn sustained_outage_reminds_every_threshold_polls() {
        let (alerts, _) = run(30, &[false; 300]);
        let reminders: Vec<_> = alerts
            .iter()
            .filter(|(_, k)| *k == AlertKind::StillDown)
            .map(|(i, _)| *i)
            .collect();
        assert_eq!(reminders, vec![30, 60, 90, 120, 150, 180, 210, 240, 270, 300]);

        // Between reminders only the re-armed WentDown fires.
        let downs = alerts.iter().filter(|(_, k)| *k == AlertKind::WentDown).count();
        assert_eq!(downs, 10);
        assert_eq!(alerts.len(), 20);
    }

    #[test]
    fn apply_updates_store_and_builds_event() {
        let engine = TransitionEngine::new(30);
        let target = Target::url("https://cloud.example.com/").unwrap();
        let mut store = DebounceStore::seeded([target.key.as_str()]);
        let now = Utc::now();

        let down = ProbeResult::unhealthy(503, ProbeError::Status(503));
        let event = engine.apply(&mut store, &target, &down, now).unwrap();
        assert_eq!(event.kind, AlertKind::WentDown);
        assert_eq!(event.response_code, 503);
        assert_eq!(event.target_key, "cloud");
        assert_eq!(event.domain, "cloud.example.com");
        assert_eq!(event.timestamp, now);
        assert_eq!(store.get("cloud"), Some(Debounce::Unhealthy { polls: 0 }));

        assert!(engine.apply(&mut store, &target, &down, now).is_none());
        assert_eq!(store.get("cloud"), Some(Debounce::Unhealthy { polls: 1 }));

        let up = ProbeResult::healthy(200);
        let event = engine.apply(&mut store, &target, &up, now).unwrap();
        assert_eq!(event.kind, AlertKind::Recovered);
        assert_eq!(event.response_code, 200);
        assert_eq!(store.get("cloud"), Some(Debounce::Healthy));
    }
}
