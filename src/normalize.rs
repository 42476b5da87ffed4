//! Canonical keys and rule standardization for domain entries.

/// Rule-open marker of an Adblock Plus domain anchor.
pub const RULE_MARKER: &str = "||";

/// Separator character that terminates an Adblock Plus domain anchor.
pub const RULE_SEPARATOR: char = '^';

const WWW_PREFIX: &str = "www.";

/// Computes the comparison key of an entry.
///
/// The entry is lower-cased, a leading `||` is stripped, then a leading
/// `www.` is stripped. The key identifies duplicates and drives grouping and
/// sorting. It is empty when the entry consisted only of markers.
///
/// # Examples
///
/// ```
/// use abp_cleaner::canonicalize;
///
/// assert_eq!(canonicalize("||WWW.Example.com^"), "example.com^");
/// assert_eq!(canonicalize("www."), "");
/// ```
#[must_use]
pub fn canonicalize(entry: &str) -> String {
    let lowered = entry.to_lowercase();
    let key = lowered.strip_prefix(RULE_MARKER).unwrap_or(&lowered);
    let key = key.strip_prefix(WWW_PREFIX).unwrap_or(key);
    key.to_string()
}

/// Rewrites an entry into standardized rule form.
///
/// Prepends `||` unless already present and appends `^` unless the entry
/// contains one anywhere. Applying it twice equals applying it once.
///
/// # Examples
///
/// ```
/// use abp_cleaner::standardize;
///
/// assert_eq!(standardize("example.com"), "||example.com^");
/// assert_eq!(standardize("||already.formatted^"), "||already.formatted^");
/// ```
#[must_use]
pub fn standardize(entry: &str) -> String {
    let mut rule = String::with_capacity(entry.len() + RULE_MARKER.len() + 1);
    if !entry.starts_with(RULE_MARKER) {
        rule.push_str(RULE_MARKER);
    }
    rule.push_str(entry);
    if !rule.contains(RULE_SEPARATOR) {
        rule.push(RULE_SEPARATOR);
    }
    rule
}

/// Returns the bucket letter for a non-empty canonical key.
///
/// The first character is upper-cased; characters whose upper-case form is
/// longer than one character keep the whole form.
pub(crate) fn bucket_key(canonical: &str) -> Option<String> {
    canonical.chars().next().map(|c| c.to_uppercase().collect())
}
