use crate::Operation;

use bytes::Bytes;

/// A single cache request travelling through the routing tree.
///
/// Routes never modify a request they receive. Rewriting routes forward an
/// independent copy instead (see [`Request::with_key`]).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Request {
    operation: Operation,
    key: String,
    value: Bytes,
    flags: u64,
    exptime: u32,
    token: u64,
    delta: u64,
}

impl Request {
    fn new<K: Into<String>>(operation: Operation, key: K) -> Self {
        Self {
            operation,
            key: key.into(),
            value: Bytes::new(),
            flags: 0,
            exptime: 0,
            token: 0,
            delta: 0,
        }
    }

    fn with_value<K: Into<String>>(operation: Operation, key: K, value: Bytes) -> Self {
        Self {
            value,
            ..Self::new(operation, key)
        }
    }

    /// Creates a `get` request.
    pub fn get<K: Into<String>>(key: K) -> Self {
        Self::new(Operation::Get, key)
    }

    /// Creates a `gets` request.
    pub fn gets<K: Into<String>>(key: K) -> Self {
        Self::new(Operation::Gets, key)
    }

    /// Creates a `lease-get` request.
    pub fn lease_get<K: Into<String>>(key: K) -> Self {
        Self::new(Operation::LeaseGet, key)
    }

    /// Creates a `lease-set` request filling the lease identified by `token`.
    pub fn lease_set<K: Into<String>>(key: K, value: Bytes, token: u64) -> Self {
        Self::with_value(Operation::LeaseSet, key, value).with_token(token)
    }

    /// Creates a `set` request.
    pub fn set<K: Into<String>>(key: K, value: Bytes) -> Self {
        Self::with_value(Operation::Set, key, value)
    }

    /// Creates an `add` request.
    pub fn add<K: Into<String>>(key: K, value: Bytes) -> Self {
        Self::with_value(Operation::Add, key, value)
    }

    /// Creates a `replace` request.
    pub fn replace<K: Into<String>>(key: K, value: Bytes) -> Self {
        Self::with_value(Operation::Replace, key, value)
    }

    /// Creates an `append` request.
    pub fn append<K: Into<String>>(key: K, value: Bytes) -> Self {
        Self::with_value(Operation::Append, key, value)
    }

    /// Creates a `prepend` request.
    pub fn prepend<K: Into<String>>(key: K, value: Bytes) -> Self {
        Self::with_value(Operation::Prepend, key, value)
    }

    /// Creates a `cas` request that only succeeds while `token` is current.
    pub fn cas<K: Into<String>>(key: K, value: Bytes, token: u64) -> Self {
        Self::with_value(Operation::Cas, key, value).with_token(token)
    }

    /// Creates a `delete` request.
    pub fn delete<K: Into<String>>(key: K) -> Self {
        Self::new(Operation::Delete, key)
    }

    /// Creates an `incr` request.
    pub fn incr<K: Into<String>>(key: K, delta: u64) -> Self {
        Self {
            delta,
            ..Self::new(Operation::Incr, key)
        }
    }

    /// Creates a `decr` request.
    pub fn decr<K: Into<String>>(key: K, delta: u64) -> Self {
        Self {
            delta,
            ..Self::new(Operation::Decr, key)
        }
    }

    /// Creates a `touch` request.
    pub fn touch<K: Into<String>>(key: K, exptime: u32) -> Self {
        Self::new(Operation::Touch, key).with_exptime(exptime)
    }

    /// Sets the client flags stored alongside the value.
    #[must_use]
    pub const fn with_flags(mut self, flags: u64) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the expiry time.
    #[must_use]
    pub const fn with_exptime(mut self, exptime: u32) -> Self {
        self.exptime = exptime;
        self
    }

    /// Sets the lease or cas token.
    #[must_use]
    pub const fn with_token(mut self, token: u64) -> Self {
        self.token = token;
        self
    }

    /// Returns a copy of this request addressed to `key`.
    #[must_use]
    pub fn with_key<K: Into<String>>(&self, key: K) -> Self {
        Self {
            key: key.into(),
            ..self.clone()
        }
    }

    /// The operation of the request.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        self.operation
    }

    /// The full key of the request.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The value carried by storage operations. Empty otherwise.
    #[must_use]
    pub const fn value(&self) -> &Bytes {
        &self.value
    }

    /// Client flags.
    #[must_use]
    pub const fn flags(&self) -> u64 {
        self.flags
    }

    /// Expiry time.
    #[must_use]
    pub const fn exptime(&self) -> u32 {
        self.exptime
    }

    /// Lease or cas token.
    #[must_use]
    pub const fn token(&self) -> u64 {
        self.token
    }

    /// Amount for `incr` and `decr`.
    #[must_use]
    pub const fn delta(&self) -> u64 {
        self.delta
    }
}
