//! Replica assignment of the current process.
//!
//! The selector assumes a replica count already checked by
//! `KeySplitRoute::new`, so it is not callable from outside the crate.
//!
//! ```compile_fail
//! use hotkey_route_keysplit::replica::select_replica;
//!
//! let replica = select_replica(7, 0);
//! ```

/// Index of a replica of a logical key, in `[0, replicas)`.
pub type ReplicaId = usize;

/// Smallest supported number of replicas.
pub const MIN_REPLICAS: usize = 2;

/// Largest supported number of replicas.
pub const MAX_REPLICAS: usize = 1000;

/// Selects the replica a process routes to by default.
///
/// `host_id` is a value that is stable for the lifetime of the process, so
/// the result is as well. `replicas` must be non-zero.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub(crate) const fn select_replica(host_id: u64, replicas: usize) -> ReplicaId {
    // the remainder is below `replicas`, which already fits in usize
    (host_id % replicas as u64) as ReplicaId
}
