//! Encoding of replica markers into keys.
//!
//! Replica `n > 0` of `key` is stored under `key::n`. Replica 0 keeps the
//! unmodified key so unreplicated data stays reachable.

use std::borrow::Cow;

use hotkey_route::Request;

use crate::replica::ReplicaId;

/// Separator between the logical key and the replica index.
pub const REPLICA_SEPARATOR: &str = "::";

/// Maximum length of a key on the wire.
pub const MAX_KEY_LENGTH: usize = 255;

const fn decimal_digits(mut value: usize) -> usize {
    let mut digits = 1;
    while value >= 10 {
        value /= 10;
        digits += 1;
    }
    digits
}

/// Worst case number of bytes a replica marker adds for `replicas` replicas.
#[must_use]
pub const fn extra_key_space(replicas: usize) -> usize {
    REPLICA_SEPARATOR.len() + decimal_digits(replicas.saturating_sub(1))
}

/// Whether every replica key of `key` fits in [`MAX_KEY_LENGTH`].
#[must_use]
pub const fn can_augment(key: &str, replicas: usize) -> bool {
    key.len() + extra_key_space(replicas) <= MAX_KEY_LENGTH
}

/// Whether requests for `replica` use a rewritten key.
#[must_use]
pub const fn should_augment(replica: ReplicaId) -> bool {
    replica > 0
}

/// Appends the marker of `replica` to `key`.
#[must_use]
pub fn augment(key: &str, replica: ReplicaId) -> String {
    format!("{key}{REPLICA_SEPARATOR}{replica}")
}

/// The request as `replica` should receive it.
///
/// Borrows the original for the canonical replica and returns a rewritten
/// copy otherwise.
#[must_use]
pub fn replica_request(request: &Request, replica: ReplicaId) -> Cow<'_, Request> {
    if should_augment(replica) {
        Cow::Owned(request.with_key(augment(request.key(), replica)))
    } else {
        Cow::Borrowed(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::replica::{MAX_REPLICAS, MIN_REPLICAS};

    use proptest::prelude::*;

    #[test]
    fn test_extra_key_space() {
        assert_eq!(extra_key_space(2), 3);
        assert_eq!(extra_key_space(10), 3);
        assert_eq!(extra_key_space(11), 4);
        assert_eq!(extra_key_space(MAX_REPLICAS), 5);
    }

    #[test]
    fn test_can_augment_boundary() {
        let fits = "k".repeat(MAX_KEY_LENGTH - 3);
        let too_long = "k".repeat(MAX_KEY_LENGTH - 2);

        assert!(can_augment(&fits, 2));
        assert!(!can_augment(&too_long, 2));
        assert!(!can_augment(&fits, MAX_REPLICAS));
    }

    #[test]
    fn test_augment() {
        assert_eq!(augment("foo", 1), "foo::1");
        assert_eq!(augment("foo", 999), "foo::999");
    }

    #[test]
    fn test_replica_request() {
        let request = Request::get("foo");

        assert!(matches!(replica_request(&request, 0), Cow::Borrowed(_)));
        assert_eq!(replica_request(&request, 0).key(), "foo");
        assert_eq!(replica_request(&request, 12).key(), "foo::12");
        assert_eq!(request.key(), "foo");
    }

    proptest! {
        #[test]
        fn augmented_keys_never_exceed_limit(
            key in "[a-z:]{0,260}",
            replicas in MIN_REPLICAS..=MAX_REPLICAS,
        ) {
            if can_augment(&key, replicas) {
                for replica in [1, replicas / 2, replicas - 1] {
                    prop_assert!(augment(&key, replica).len() <= MAX_KEY_LENGTH);
                }
            }
        }
    }
}
