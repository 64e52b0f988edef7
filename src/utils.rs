//! Common utility functions shared across the codebase.

/// Pick the singular or plural form of a noun for `count`.
///
/// # Examples
///
/// ```
/// use patchset::utils::pluralize;
///
/// assert_eq!(pluralize(1, "file", "files"), "file");
/// assert_eq!(pluralize(0, "file", "files"), "files");
/// assert_eq!(pluralize(3, "occurrence", "occurrences"), "occurrences");
/// ```
pub fn pluralize<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}

/// `count` followed by the matching noun form, e.g. `"2 files"`.
pub fn count_noun(count: usize, singular: &str, plural: &str) -> String {
    format!("{} {}", count, pluralize(count, singular, plural))
}
