use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::observer::FanoutObserver;

/// Options for a new `KeySplitRoute`.
pub struct KeySplitOptions<R> {
    /// Route every replica request is sent to.
    pub child: Arc<R>,

    /// Number of replicas of every key, in `[2, 1000]`.
    pub replicas: usize,

    /// Whether `set` requests are written to every replica.
    pub all_sync: bool,

    /// Value identifying this process, stable for its lifetime. Selects the
    /// replica this process reads from.
    pub host_id: u64,

    /// Optional observer of failed fire-and-forget requests.
    pub observer: Option<Arc<dyn FanoutObserver>>,
}

impl<R> Debug for KeySplitOptions<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeySplitOptions")
            .field("replicas", &self.replicas)
            .field("all_sync", &self.all_sync)
            .field("host_id", &self.host_id)
            .field("observer", &self.observer)
            .finish_non_exhaustive()
    }
}

/// Serializable part of the key split configuration, as found in a routing
/// tree definition.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct KeySplitConfig {
    /// Number of replicas of every key.
    pub replicas: usize,

    /// Whether `set` requests are written to every replica.
    #[serde(default)]
    pub all_sync: bool,
}

impl KeySplitConfig {
    /// Combines the configuration with its runtime collaborators.
    pub fn into_options<R>(self, child: Arc<R>, host_id: u64) -> KeySplitOptions<R> {
        KeySplitOptions {
            child,
            replicas: self.replicas,
            all_sync: self.all_sync,
            host_id,
            observer: None,
        }
    }
}
