//! Hooks for the outcome of fire-and-forget replica requests.

use std::error::Error;
use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::replica::ReplicaId;

/// Receives failures of requests fired at secondary replicas.
///
/// Callers never see these failures. Observers only exist to count or
/// report them.
pub trait FanoutObserver: Debug + Send + Sync + 'static {
    /// Called once for every fired request whose route returned an error.
    fn on_failure(&self, replica: ReplicaId, key: &str, error: &(dyn Error + Send + Sync));
}

/// Observer counting failed fire-and-forget requests.
#[derive(Debug, Default)]
pub struct CountingObserver {
    failures: AtomicU64,
}

impl CountingObserver {
    /// Creates a new `CountingObserver`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            failures: AtomicU64::new(0),
        }
    }

    /// Number of failures observed so far.
    #[must_use]
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }
}

impl FanoutObserver for CountingObserver {
    fn on_failure(&self, _replica: ReplicaId, _key: &str, _error: &(dyn Error + Send + Sync)) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }
}
