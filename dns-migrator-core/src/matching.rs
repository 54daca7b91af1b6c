//! Customer/account name matching.
//!
//! Normalization strips punctuation, collapses whitespace runs, and lowercases
//! before an exact comparison. It knowingly does not canonicalize legal
//! suffixes ("Inc" vs "Incorporated" stay different); widening the match would
//! risk attaching a customer to the wrong account, and a false negative only
//! costs the operator one extra prompt.

/// Normalize a customer or account name for comparison.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    let stripped: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether two names are the same customer under normalization.
#[must_use]
pub fn names_match(a: &str, b: &str) -> bool {
    normalize_name(a) == normalize_name(b)
}
