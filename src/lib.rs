//! # abp-cleaner
//!
//! Turns a flat list of domain names into a sorted, deduplicated Adblock Plus
//! rule list grouped by first letter.
//!
//! ## Features
//!
//! - Exact and case-insensitive duplicate removal
//! - `||` and `www.` aware comparison keys
//! - Deterministic survivor choice between spellings of one domain
//! - Idempotent rule standardization (`||domain^`)
//! - Atomic output replacement with optional backups
//!
//! ## Quick Start
//!
//! ```no_run
//! use abp_cleaner::{resolve_input, Config, Pipeline};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::builder().work_dir(".").build()?;
//! let input = resolve_input(&config, || Ok(String::new()))?;
//!
//! let stats = Pipeline::new(config)?.run(&input.path)?;
//! println!("{} unique entries", stats.unique_entries);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The library follows a pipeline architecture:
//! 1. **Loader**: reads distinct trimmed lines
//! 2. **Normalizer**: derives the canonical comparison key
//! 3. **Grouper**: collapses duplicates and buckets by letter
//! 4. **Formatter**: sorts and renders the rule document

#![warn(
    missing_docs,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(clippy::module_name_repetitions)]

mod config;
mod discovery;
mod error;
mod format;
mod group;
mod loader;
mod normalize;
mod pipeline;
mod writer;

pub use config::{Config, ConfigBuilder, OUTPUT_FILE_NAME};
pub use discovery::{find_candidates, resolve_input, InputSource, ResolvedInput};
pub use error::{Error, Result};
pub use format::render;
pub use group::{group_entries, Grouping};
pub use loader::{parse_entries, read_entries, RawEntries};
pub use normalize::{canonicalize, standardize, RULE_MARKER, RULE_SEPARATOR};
pub use pipeline::{clean_text, CleanStats, Cleaned, Pipeline};

/// Cleans `input` into the configured output file.
///
/// This is the main entry point for the library.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration is invalid
/// - The input list doesn't exist or is not UTF-8
/// - The output file cannot be written
///
/// # Examples
///
/// ```no_run
/// use abp_cleaner::{Config, run};
/// use std::path::Path;
///
/// # fn main() -> anyhow::Result<()> {
/// let config = Config::builder().work_dir(".").build()?;
///
/// run(config, Path::new("domains.txt"))?;
/// # Ok(())
/// # }
/// ```
pub fn run(config: Config, input: &std::path::Path) -> Result<CleanStats> {
    Pipeline::new(config)?.run(input)
}
