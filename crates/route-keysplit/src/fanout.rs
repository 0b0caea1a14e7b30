//! Execution of single and all-replica dispatch against the child route.
//!
//! Executors are owned by a `KeySplitRoute` and only built through its
//! checked constructor.
//!
//! ```compile_fail
//! use std::sync::Arc;
//!
//! use hotkey_route_keysplit::fanout::FanoutExecutor;
//! use hotkey_route_memory::MemoryRoute;
//!
//! let executor = FanoutExecutor::new(Arc::new(MemoryRoute::new()), 0, None);
//! ```

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use hotkey_route::{Reply, Request, Route};
use tokio::sync::Mutex;
use tokio_util::task::TaskTracker;

use crate::key;
use crate::observer::FanoutObserver;
use crate::replica::ReplicaId;

/// Sends requests to replicas through a shared child route.
pub struct FanoutExecutor<R: Route> {
    child: Arc<R>,
    replicas: usize,
    tracker: TaskTracker,
    waiters: Mutex<()>,
    observer: Option<Arc<dyn FanoutObserver>>,
}

impl<R: Route> FanoutExecutor<R> {
    /// Creates an executor for `replicas` replicas behind `child`.
    #[must_use]
    pub(crate) fn new(
        child: Arc<R>,
        replicas: usize,
        observer: Option<Arc<dyn FanoutObserver>>,
    ) -> Self {
        Self {
            child,
            replicas,
            tracker: TaskTracker::new(),
            waiters: Mutex::new(()),
            observer,
        }
    }

    /// The child route.
    #[must_use]
    pub fn child(&self) -> &R {
        &self.child
    }

    /// Forwards the request without rewriting it.
    pub async fn route_passthrough(&self, request: &Request) -> Result<Reply, R::Error> {
        self.child.route(request).await
    }

    /// Routes the request to `replica` and returns its reply verbatim.
    pub async fn route_one(&self, request: &Request, replica: ReplicaId) -> Result<Reply, R::Error> {
        let request = key::replica_request(request, replica);
        self.child.route(&request).await
    }

    /// Fires the request at every replica but `replica`, then routes it to
    /// `replica` and returns that reply.
    ///
    /// Must be called from within a tokio runtime. Fired requests are not
    /// awaited and their outcome never reaches the caller.
    pub async fn route_all(&self, request: &Request, replica: ReplicaId) -> Result<Reply, R::Error> {
        for other in (0..self.replicas).filter(|&other| other != replica) {
            self.fire(key::replica_request(request, other).into_owned(), other);
        }

        self.route_one(request, replica).await
    }

    fn fire(&self, request: Request, replica: ReplicaId) {
        let child = Arc::clone(&self.child);
        let observer = self.observer.clone();

        self.tracker.spawn(async move {
            if let Err(error) = child.route(&request).await {
                if let Some(observer) = observer {
                    observer.on_failure(replica, request.key(), &error);
                }
            }
        });
    }

    /// Waits until every request fired so far has finished.
    ///
    /// Requests fired while waiting are waited for as well. Concurrent callers
    /// wait one after the other.
    pub async fn wait(&self) {
        let _waiting = self.waiters.lock().await;

        self.tracker.close();
        self.tracker.wait().await;
        self.tracker.reopen();
    }
}

impl<R: Route> Debug for FanoutExecutor<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FanoutExecutor")
            .field("replicas", &self.replicas)
            .field("in_flight", &self.tracker.len())
            .field("observer", &self.observer)
            .finish_non_exhaustive()
    }
}
