//! Per-target debounce state.
//!
//! # States
//! - Healthy: baseline, no outage being tracked (raw value -1)
//! - Unhealthy { polls }: consecutive failed polls since the last alert
//!   (raw value 0..threshold-1, 0 = failed for the first time this poll)
//! - Reminded: a "still down" reminder just fired; encodes as -1 like the
//!   baseline, but a healthy poll still counts as a recovery
//!
//! # Design Decisions
//! - One counter per registered target, seeded before the first cycle
//! - Only the transition engine writes counters
//! - The store is owned by the poll loop; no locking

use std::collections::HashMap;

use serde::Serialize;

/// Debounce counter of one target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Debounce {
    #[default]
    Healthy,
    Unhealthy { polls: u32 },
    Reminded,
}

impl Debounce {
    /// Integer encoding: -1 for the baseline, otherwise the failed-poll count.
    pub fn raw(self) -> i64 {
        match self {
            Debounce::Healthy | Debounce::Reminded => -1,
            Debounce::Unhealthy { polls } => i64::from(polls),
        }
    }

    pub fn is_healthy(self) -> bool {
        matches!(self, Debounce::Healthy)
    }
}

/// Target key → debounce counter.
#[derive(Debug, Clone, Default)]
pub struct DebounceStore {
    counters: HashMap<String, Debounce>,
}

impl DebounceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store with every key seeded to healthy.
    pub fn seeded<'a, I>(keys: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let counters = keys
            .into_iter()
            .map(|key| (key.to_string(), Debounce::Healthy))
            .collect();
        Self { counters }
    }

    /// Counter of `key`; `None` if the key was never seeded.
    pub fn get(&self, key: &str) -> Option<Debounce> {
        self.counters.get(key).copied()
    }

    pub fn set(&mut self, key: &str, value: Debounce) {
        match self.counters.get_mut(key) {
            Some(slot) => *slot = value,
            None => {
                self.counters.insert(key.to_string(), value);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Debounce)> {
        self.counters.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}
