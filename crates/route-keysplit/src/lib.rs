//! Routing-tree route that spreads hot keys over several replicas.
//!
//! Every logical key gets `replicas` physical copies: replica 0 under the key
//! itself and replica `n` under `key::n`. The downstream route decides which
//! cache node each physical key lives on, so copies of one hot key end up on
//! different nodes.
//!
//! Each process is pinned to one replica, selected from its host id:
//! - reads go to that replica only
//! - `set` goes to that replica, or to every replica when `all_sync` is on
//! - `delete` always goes to every replica
//! - every other operation goes to that replica only
//!
//! Requests to replicas other than the pinned one are fired in the background
//! and their replies are discarded. The caller always gets the reply of the
//! pinned replica. Keys too long to carry a replica marker are forwarded
//! unmodified.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

mod error;
mod options;

pub mod fanout;
pub mod key;
pub mod observer;
pub mod policy;
pub mod replica;

pub use error::Error;
pub use observer::{CountingObserver, FanoutObserver};
pub use options::{KeySplitConfig, KeySplitOptions};
pub use replica::{MAX_REPLICAS, MIN_REPLICAS, ReplicaId};

use std::fmt::{self, Display, Formatter};

use async_trait::async_trait;
use hotkey_route::{Reply, Request, Route, RouteInfo, Traverser, traverse_child};
use tracing::{debug, trace};

use crate::fanout::FanoutExecutor;
use crate::policy::{Dispatch, RoutingPolicy};

/// Route splitting every key over a fixed number of replicas.
#[derive(Debug)]
pub struct KeySplitRoute<R: Route> {
    executor: FanoutExecutor<R>,
    policy: RoutingPolicy,
    replicas: usize,
    all_sync: bool,
    replica_id: ReplicaId,
}

impl<R: Route> KeySplitRoute<R> {
    /// Creates a new `KeySplitRoute`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReplicaCountOutOfRange`] if `replicas` is outside of
    /// `[MIN_REPLICAS, MAX_REPLICAS]`.
    pub fn new(options: KeySplitOptions<R>) -> Result<Self, Error> {
        let KeySplitOptions {
            child,
            replicas,
            all_sync,
            host_id,
            observer,
        } = options;

        if !(MIN_REPLICAS..=MAX_REPLICAS).contains(&replicas) {
            return Err(Error::ReplicaCountOutOfRange(replicas));
        }

        let route = Self {
            executor: FanoutExecutor::new(child, replicas, observer),
            policy: RoutingPolicy::new(replicas, all_sync),
            replicas,
            all_sync,
            replica_id: replica::select_replica(host_id, replicas),
        };

        debug!(route = %route, child = %route.child().route_name(), "created key split route");

        Ok(route)
    }

    /// The replica this process routes to.
    #[must_use]
    pub const fn replica_id(&self) -> ReplicaId {
        self.replica_id
    }

    /// Number of replicas of every key.
    #[must_use]
    pub const fn replicas(&self) -> usize {
        self.replicas
    }

    /// Whether `set` requests are written to every replica.
    #[must_use]
    pub const fn all_sync(&self) -> bool {
        self.all_sync
    }

    /// The child route.
    #[must_use]
    pub fn child(&self) -> &R {
        self.executor.child()
    }

    /// Waits for every fire-and-forget request sent so far to finish.
    ///
    /// Routing never waits for them. This is for shutdown and tests.
    pub async fn wait_fanout(&self) {
        self.executor.wait().await;
    }
}

impl<R: Route> Display for KeySplitRoute<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "keysplit|replicas={}|all-sync={}|replicaId={}",
            self.replicas, self.all_sync, self.replica_id
        )
    }
}

impl<R: Route> RouteInfo for KeySplitRoute<R> {
    fn route_name(&self) -> String {
        self.to_string()
    }
}

#[async_trait]
impl<R: Route> Route for KeySplitRoute<R> {
    type Error = R::Error;

    async fn route(&self, request: &Request) -> Result<Reply, Self::Error> {
        let dispatch = self.policy.dispatch(request);

        trace!(
            operation = %request.operation(),
            key = request.key(),
            replica = self.replica_id,
            ?dispatch,
            "key split"
        );

        match dispatch {
            Dispatch::Passthrough => self.executor.route_passthrough(request).await,
            Dispatch::One => self.executor.route_one(request, self.replica_id).await,
            Dispatch::All => self.executor.route_all(request, self.replica_id).await,
        }
    }

    fn traverse(&self, request: &Request, traverser: &mut dyn Traverser) {
        if self.policy.can_augment(request) {
            let request = key::replica_request(request, self.replica_id);
            traverse_child(self.child(), &request, traverser);
        } else {
            traverse_child(self.child(), request, traverser);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use assert_matches::assert_matches;
    use hotkey_route_memory::MemoryRoute;
    use tracing_test::traced_test;

    fn options(replicas: usize, all_sync: bool, host_id: u64) -> KeySplitOptions<MemoryRoute> {
        KeySplitOptions {
            child: Arc::new(MemoryRoute::new()),
            replicas,
            all_sync,
            host_id,
            observer: None,
        }
    }

    #[test]
    fn test_rejects_too_few_replicas() {
        assert_matches!(
            KeySplitRoute::new(options(1, false, 0)),
            Err(Error::ReplicaCountOutOfRange(1))
        );
        assert_matches!(
            KeySplitRoute::new(options(0, false, 0)),
            Err(Error::ReplicaCountOutOfRange(0))
        );
    }

    #[test]
    fn test_rejects_too_many_replicas() {
        assert_matches!(
            KeySplitRoute::new(options(1001, true, 0)),
            Err(Error::ReplicaCountOutOfRange(1001))
        );
    }

    #[test]
    fn test_accepts_bounds() {
        assert!(KeySplitRoute::new(options(MIN_REPLICAS, false, 0)).is_ok());
        assert!(KeySplitRoute::new(options(MAX_REPLICAS, false, 0)).is_ok());
    }

    #[test]
    fn test_route_name() {
        let route = KeySplitRoute::new(options(5, true, 13)).unwrap();

        assert_eq!(route.replica_id(), 3);
        assert_eq!(route.route_name(), "keysplit|replicas=5|all-sync=true|replicaId=3");
        assert_eq!(route.to_string(), route.route_name());
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            Error::ReplicaCountOutOfRange(1).to_string(),
            "replica count 1 is outside of [2, 1000]"
        );
    }

    #[traced_test]
    #[test]
    fn test_logs_construction() {
        let _route = KeySplitRoute::new(options(2, false, 1)).unwrap();

        assert!(logs_contain("created key split route"));
        assert!(logs_contain("keysplit|replicas=2|all-sync=false|replicaId=1"));
    }
}
