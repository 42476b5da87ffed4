//! Rendering of grouped entries into an Adblock Plus rule document.

use crate::group::Grouping;
use crate::normalize::{canonicalize, standardize};

/// Renders the header line of a bucket.
fn header(key: &str) -> String {
    format!("#[{key}]")
}

/// Renders grouped entries into the final document text.
///
/// Buckets appear in ascending key order, each as a `#[<KEY>]` header, its
/// entries sorted by canonical key in standardized rule form, and one blank
/// separator line. An empty grouping renders as an empty string.
///
/// # Examples
///
/// ```
/// use abp_cleaner::{group_entries, parse_entries, render};
///
/// let grouping = group_entries(&parse_entries("foo.net\n||other.org^\n"));
/// assert_eq!(render(&grouping), "#[F]\n||foo.net^\n\n#[O]\n||other.org^\n");
/// ```
#[must_use]
pub fn render(grouping: &Grouping) -> String {
    let capacity = grouping.entry_count() + 2 * grouping.group_count();
    let mut lines: Vec<String> = Vec::with_capacity(capacity);

    for (key, entries) in grouping.buckets() {
        lines.push(header(key));

        let mut sorted: Vec<&String> = entries.iter().collect();
        sorted.sort_by_cached_key(|entry| canonicalize(entry));

        lines.extend(sorted.into_iter().map(|entry| standardize(entry)));
        lines.push(String::new());
    }

    lines.join("\n")
}
