//! Input list discovery in the working directory.

use crate::config::{Config, OUTPUT_FILE_NAME};
use crate::error::{Error, Result};
use globset::{Glob, GlobMatcher};
use once_cell::sync::Lazy;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

static LIST_GLOB: Lazy<GlobMatcher> = Lazy::new(|| {
    Glob::new("*.txt")
        .expect("list glob is valid")
        .compile_matcher()
});

/// Returns true if the file name looks like an input domain list.
fn is_candidate(name: &str) -> bool {
    name != OUTPUT_FILE_NAME && LIST_GLOB.is_match(name)
}

/// Lists candidate input files in `dir`, ordered by file name.
///
/// Only regular files directly inside `dir` with a `.txt` extension count,
/// symlinks to regular files included; the output file itself is excluded.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn find_candidates(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut candidates = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                let message = e.to_string();
                return Err(e.into_io_error().map_or_else(
                    || Error::config(message),
                    |io| Error::io(dir, io),
                ));
            }
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            trace!("Skipping non UTF-8 file name: {}", entry.path().display());
            continue;
        };

        if is_candidate(name) {
            trace!("Candidate list: {}", name);
            candidates.push(entry.into_path());
        }
    }

    debug!("Found {} candidate lists in {}", candidates.len(), dir.display());
    Ok(candidates)
}

/// Where the input list of a run came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    /// Given explicitly in the configuration
    Explicit,
    /// First candidate found in the working directory
    Discovered,
    /// Typed in by the user
    Prompted,
}

/// A resolved, existing input list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInput {
    /// Path to the list
    pub path: PathBuf,

    /// How the path was obtained
    pub source: InputSource,
}

/// Resolves the input list for a run.
///
/// An explicit input from the configuration wins. Otherwise the first
/// candidate in the working directory is used, and if there is none the
/// `prompt` callback is asked for a path. The resolved path must exist.
///
/// # Errors
///
/// Returns [`Error::InputNotFound`] if the resolved path does not exist,
/// or an IO error if the directory or the prompt fails.
pub fn resolve_input<F>(config: &Config, prompt: F) -> Result<ResolvedInput>
where
    F: FnOnce() -> std::io::Result<String>,
{
    let (path, source) = match config.input {
        Some(ref input) => (input.clone(), InputSource::Explicit),
        None => match find_candidates(&config.work_dir)?.into_iter().next() {
            Some(found) => (found, InputSource::Discovered),
            None => {
                debug!("No candidate lists, prompting for a path");
                let answer = prompt().map_err(|e| Error::io("<stdin>", e))?;
                (PathBuf::from(answer.trim()), InputSource::Prompted)
            }
        },
    };

    if path.as_os_str().is_empty() || !path.exists() {
        return Err(Error::input_not_found(path));
    }

    debug!("Resolved input {} ({:?})", path.display(), source);
    Ok(ResolvedInput { path, source })
}
