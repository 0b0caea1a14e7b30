use crate::replica::{MAX_REPLICAS, MIN_REPLICAS};

use thiserror::Error;

/// Errors that can occur while building a key split route.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum Error {
    /// The configured number of replicas is not supported.
    #[error(
        "replica count {0} is outside of [{min}, {max}]",
        min = MIN_REPLICAS,
        max = MAX_REPLICAS
    )]
    ReplicaCountOutOfRange(usize),
}
