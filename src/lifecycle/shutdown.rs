//! Stop request for the poll loop.
//!
//! A latched flag on a `watch` channel: a signal handed out after
//! [`Shutdown::trigger`], or polled long after it, still observes the stop.

use tokio::sync::watch;

/// Owner side, held by whoever decides when monitoring ends.
#[derive(Debug)]
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

/// Waiting side, handed to [`Monitor::run`](crate::Monitor::run).
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    pub fn signal(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Request the stop. Idempotent.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownSignal {
    /// Resolve once a stop was requested or the owner is gone.
    pub async fn wait(&mut self) {
        while !self.is_set() {
            if self.rx.changed().await.is_err() {
                return;
            }
        }
    }

    fn is_set(&mut self) -> bool {
        *self.rx.borrow_and_update()
    }
}
