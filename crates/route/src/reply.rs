use bytes::Bytes;

/// Outcome of a cache operation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ReplyResult {
    /// The key was found.
    Found,
    /// The key was not found.
    NotFound,
    /// The value was stored.
    Stored,
    /// The value was not stored because a precondition failed.
    NotStored,
    /// The cas token no longer matches.
    Exists,
    /// The value was deleted.
    Deleted,
    /// The expiry was updated.
    Touched,
}

/// Reply to a [`Request`](crate::Request).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Reply {
    /// Outcome of the operation.
    pub result: ReplyResult,

    /// Value returned by reads.
    pub value: Option<Bytes>,

    /// Client flags stored with the value.
    pub flags: u64,

    /// Cas token (`gets`) or lease token (`lease-get` miss).
    pub token: Option<u64>,

    /// New counter value after `incr` or `decr`.
    pub counter: Option<u64>,
}

impl Reply {
    /// Creates a reply with only a result set.
    #[must_use]
    pub const fn new(result: ReplyResult) -> Self {
        Self {
            result,
            value: None,
            flags: 0,
            token: None,
            counter: None,
        }
    }

    /// A hit carrying `value`.
    #[must_use]
    pub fn found(value: Bytes, flags: u64) -> Self {
        Self {
            value: Some(value),
            flags,
            ..Self::new(ReplyResult::Found)
        }
    }

    /// A miss.
    #[must_use]
    pub const fn not_found() -> Self {
        Self::new(ReplyResult::NotFound)
    }

    /// A successful store.
    #[must_use]
    pub const fn stored() -> Self {
        Self::new(ReplyResult::Stored)
    }

    /// A store rejected by its precondition.
    #[must_use]
    pub const fn not_stored() -> Self {
        Self::new(ReplyResult::NotStored)
    }

    /// A successful delete.
    #[must_use]
    pub const fn deleted() -> Self {
        Self::new(ReplyResult::Deleted)
    }

    /// Attaches a cas or lease token.
    #[must_use]
    pub const fn with_token(mut self, token: u64) -> Self {
        self.token = Some(token);
        self
    }

    /// Whether the reply is a hit.
    #[must_use]
    pub const fn is_hit(&self) -> bool {
        matches!(self.result, ReplyResult::Found)
    }
}
