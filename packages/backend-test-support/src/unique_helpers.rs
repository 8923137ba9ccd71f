//! Test helpers for generating unique test data
//!
//! ULID-based values keep seeded rows distinguishable across tests that share a
//! process (and, for Postgres runs, a database).

use ulid::Ulid;

/// Generate a unique string with the given prefix
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let id1 = unique_str("player");
/// let id2 = unique_str("player");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("player-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a short unique display name, e.g. `alice-01hv3k9q`.
///
/// The suffix is the tail of a ULID (its random part), lower-cased.
pub fn unique_display_name(prefix: &str) -> String {
    let ulid = Ulid::new().to_string().to_lowercase();
    let suffix = &ulid[ulid.len() - 8..];
    format!("{prefix}-{suffix}")
}
