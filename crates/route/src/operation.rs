use std::fmt;

/// Cache operations understood by the routing tree.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Operation {
    /// Read a value.
    Get,
    /// Read a value together with its cas token.
    Gets,
    /// Read a value, or obtain a lease to fill it on a miss.
    LeaseGet,
    /// Fill a value previously leased by `LeaseGet`.
    LeaseSet,
    /// Store a value unconditionally.
    Set,
    /// Store a value only if the key is absent.
    Add,
    /// Store a value only if the key is present.
    Replace,
    /// Append to an existing value.
    Append,
    /// Prepend to an existing value.
    Prepend,
    /// Store a value only if the cas token still matches.
    Cas,
    /// Remove a value.
    Delete,
    /// Increment a decimal value.
    Incr,
    /// Decrement a decimal value.
    Decr,
    /// Update the expiry of a value.
    Touch,
}

/// Static classification of an operation, used by routes that treat
/// operations differently depending on their consistency needs.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum OperationCategory {
    /// Served by a single copy of the value.
    ReadSingle,
    /// A write that may be replicated depending on route configuration.
    WriteConditional,
    /// Must reach every copy of the value.
    DeleteAll,
    /// Everything else.
    Default,
}

impl Operation {
    /// Returns the category this operation belongs to.
    #[must_use]
    pub const fn category(self) -> OperationCategory {
        match self {
            Self::Get | Self::LeaseGet | Self::LeaseSet => OperationCategory::ReadSingle,
            Self::Set => OperationCategory::WriteConditional,
            Self::Delete => OperationCategory::DeleteAll,
            Self::Gets
            | Self::Add
            | Self::Replace
            | Self::Append
            | Self::Prepend
            | Self::Cas
            | Self::Incr
            | Self::Decr
            | Self::Touch => OperationCategory::Default,
        }
    }

    /// Returns the memcache command name of the operation.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Gets => "gets",
            Self::LeaseGet => "lease-get",
            Self::LeaseSet => "lease-set",
            Self::Set => "set",
            Self::Add => "add",
            Self::Replace => "replace",
            Self::Append => "append",
            Self::Prepend => "prepend",
            Self::Cas => "cas",
            Self::Delete => "delete",
            Self::Incr => "incr",
            Self::Decr => "decr",
            Self::Touch => "touch",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
