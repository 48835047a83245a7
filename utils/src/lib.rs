//! # Stratus Utilities
//!
//! Syntactic shape checks shared by the CLI and the configuration layer.
//!
//! These predicates only look at the *shape* of a value. They never tell
//! whether a secret key is live or an organization exists.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

static UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$"
    )
    .expect("valid uuid regex")
});

static ZONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2}-[a-z]{3}-[1-9]$").expect("valid zone regex"));

static REGION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2}-[a-z]{3}$").expect("valid region regex"));

/// Length of a two-factor one-time code.
pub const TWO_FACTOR_CODE_LEN: usize = 6;

/// Check whether `value` looks like an email address.
///
/// # Examples
///
/// ```
/// use utils::is_email;
///
/// assert!(is_email("jane@example.com"));
/// assert!(!is_email("jane@"));
/// ```
#[must_use]
pub fn is_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Check whether `value` has the canonical hyphenated UUID shape.
#[must_use]
pub fn is_uuid(value: &str) -> bool {
    UUID_RE.is_match(value)
}

/// Secret keys are UUID-shaped.
#[must_use]
pub fn is_secret_key(value: &str) -> bool {
    is_uuid(value)
}

/// Organization IDs are UUID-shaped.
#[must_use]
pub fn is_organization_id(value: &str) -> bool {
    is_uuid(value)
}

/// Check whether `value` is a syntactically valid zone such as `fr-par-1`.
#[must_use]
pub fn is_zone(value: &str) -> bool {
    ZONE_RE.is_match(value)
}

/// Check whether `value` is a syntactically valid region such as `fr-par`.
#[must_use]
pub fn is_region(value: &str) -> bool {
    REGION_RE.is_match(value)
}

#[must_use]
pub fn is_two_factor_code(value: &str) -> bool {
    value.len() == TWO_FACTOR_CODE_LEN && value.bytes().all(|b| b.is_ascii_digit())
}
