//! Per-operation fan-out policy.
//!
//! Policies are only built by `KeySplitRoute::new`, after the replica count
//! has been checked.
//!
//! ```compile_fail
//! use hotkey_route_keysplit::policy::RoutingPolicy;
//!
//! let policy = RoutingPolicy::new(0, false);
//! ```

use hotkey_route::{OperationCategory, Request};

use crate::key;

/// How many replicas an operation category is written to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Fanout {
    /// Only the replica of this process.
    One,
    /// Every replica when synchronous writes are enabled, otherwise one.
    AllIfSync,
    /// Every replica.
    All,
}

impl Fanout {
    /// The fan-out table.
    #[must_use]
    pub const fn of(category: OperationCategory) -> Self {
        match category {
            OperationCategory::ReadSingle | OperationCategory::Default => Self::One,
            OperationCategory::WriteConditional => Self::AllIfSync,
            OperationCategory::DeleteAll => Self::All,
        }
    }
}

/// What to do with a single request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Dispatch {
    /// Forward the request untouched.
    Passthrough,
    /// Route to the replica of this process.
    One,
    /// Route to the replica of this process and fire the request at every
    /// other replica.
    All,
}

/// Routing policy of a key split route.
#[derive(Clone, Copy, Debug)]
pub struct RoutingPolicy {
    replicas: usize,
    all_sync: bool,
}

impl RoutingPolicy {
    /// Creates a policy for `replicas` replicas.
    #[must_use]
    pub(crate) const fn new(replicas: usize, all_sync: bool) -> Self {
        Self { replicas, all_sync }
    }

    /// Whether the replica keys of this request fit the key length limit.
    #[must_use]
    pub fn can_augment(&self, request: &Request) -> bool {
        key::can_augment(request.key(), self.replicas)
    }

    /// Decides how `request` is routed.
    ///
    /// Keys too long to carry a replica marker are never rewritten, whatever
    /// the operation.
    #[must_use]
    pub fn dispatch(&self, request: &Request) -> Dispatch {
        if !self.can_augment(request) {
            return Dispatch::Passthrough;
        }

        match Fanout::of(request.operation().category()) {
            Fanout::One => Dispatch::One,
            Fanout::AllIfSync if self.all_sync => Dispatch::All,
            Fanout::AllIfSync => Dispatch::One,
            Fanout::All => Dispatch::All,
        }
    }
}
