//! Slug predicate shared by identifier newtypes.
//!
//! A slug is non-empty and made only of lowercase ASCII letters, digits, and
//! hyphens. Surrounding whitespace is rejected rather than trimmed.

/// Return `true` when `value` is a well-formed slug.
pub(crate) fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && !value.starts_with('-')
        && !value.ends_with('-')
        && value
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}
