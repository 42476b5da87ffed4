use crate::error::{Error, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, trace};

/// Distinct raw entries read from a domain list.
///
/// Entries are trimmed and non-empty. The set has no defined order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntries {
    entries: HashSet<String>,
    lines_read: usize,
}

impl RawEntries {
    /// Returns the number of distinct entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entries were read.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of non-empty lines read, duplicates included.
    #[must_use]
    pub const fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Returns true if the exact entry is present.
    ///
    /// # Examples
    ///
    /// ```
    /// use abp_cleaner::parse_entries;
    ///
    /// let entries = parse_entries(" ads.com \nAds.com\n");
    /// assert!(entries.contains("ads.com"));
    /// assert!(entries.contains("Ads.com"));
    /// assert!(!entries.contains(" ads.com "));
    /// ```
    #[must_use]
    pub fn contains(&self, entry: &str) -> bool {
        self.entries.contains(entry)
    }

    /// Iterates the entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

/// Splits text into distinct trimmed, non-empty lines.
///
/// `\n`, `\r\n` and a lone `\r` all end a line.
#[must_use]
pub fn parse_entries(text: &str) -> RawEntries {
    let mut entries = HashSet::new();
    let mut lines_read = 0;

    for line in text.split(['\n', '\r']).map(str::trim).filter(|l| !l.is_empty()) {
        lines_read += 1;
        if !entries.insert(line.to_string()) {
            trace!("Exact duplicate line: {}", line);
        }
    }

    debug!(
        "Parsed {} lines into {} distinct entries",
        lines_read,
        entries.len()
    );

    RawEntries {
        entries,
        lines_read,
    }
}

/// Reads a UTF-8 domain list and returns its distinct entries.
///
/// # Errors
///
/// Returns an error if:
/// - The file does not exist ([`Error::InputNotFound`])
/// - The file is not valid UTF-8
/// - The file cannot be read
pub fn read_entries(path: &Path) -> Result<RawEntries> {
    if !path.exists() {
        return Err(Error::input_not_found(path));
    }

    let text = fs::read_to_string(path).map_err(|e| Error::read(path, e))?;
    debug!("Read {} bytes from {}", text.len(), path.display());

    Ok(parse_entries(&text))
}
