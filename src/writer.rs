use crate::{
    config::Config,
    error::{Error, Result},
};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// Writes the rule document with atomic replace semantics.
pub(crate) struct Writer {
    output_path: PathBuf,
    backup_existing: bool,
}

impl Writer {
    /// Creates a new writer from configuration.
    pub(crate) fn new(config: &Config) -> Self {
        Self {
            output_path: config.output_path(),
            backup_existing: config.backup_existing,
        }
    }

    /// Returns the destination path.
    pub(crate) fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Writes the document to the output file.
    ///
    /// # Errors
    ///
    /// Returns an error if the backup, the temporary file or the rename fails.
    pub(crate) fn write_document(&self, document: &str) -> Result<()> {
        self.write_file_atomic(&self.output_path, document)?;

        info!(
            "Wrote {} bytes to {}",
            document.len(),
            self.output_path.display()
        );
        Ok(())
    }

    /// Writes a file atomically with optional backup.
    ///
    /// # Process
    ///
    /// 1. Creates backup if file exists and backup is enabled
    /// 2. Writes content to temporary file
    /// 3. Syncs temporary file to disk
    /// 4. Atomically renames temporary file to target path
    ///
    /// An interrupted run leaves the previous output untouched, and a failed
    /// one removes its temporary file.
    fn write_file_atomic(&self, path: &Path, content: &str) -> Result<()> {
        if path.exists() && self.backup_existing {
            self.backup_file(path)?;
        }

        let temp_path = temp_path_for(path)?;
        if let Err(e) = write_synced(&temp_path, content) {
            let _ = fs::remove_file(&temp_path);
            return Err(Error::io(&temp_path, e));
        }

        if let Err(e) = fs::rename(&temp_path, path) {
            let _ = fs::remove_file(&temp_path);
            return Err(Error::io(path, e));
        }

        Ok(())
    }

    /// Creates a timestamped backup of an existing file.
    fn backup_file(&self, path: &Path) -> Result<()> {
        let timestamp = chrono::Local::now().format("%Y%m%d%H%M%S%f");

        let filename = path
            .file_name()
            .ok_or_else(|| Error::config("Invalid file path"))?
            .to_string_lossy();

        let backup_name = format!("{}.backup.{}", filename, timestamp);
        let backup_path = path
            .parent()
            .ok_or_else(|| Error::config("Invalid file path"))?
            .join(backup_name);

        fs::copy(path, &backup_path)
            .map_err(|e| Error::io(&backup_path, e))?;

        debug!("Created backup: {}", backup_path.display());
        Ok(())
    }
}

/// Hidden, per-process temporary file next to `path`.
fn temp_path_for(path: &Path) -> Result<PathBuf> {
    let filename = path
        .file_name()
        .ok_or_else(|| Error::config("Invalid file path"))?
        .to_string_lossy();

    Ok(path.with_file_name(format!(".{}.{}.tmp", filename, std::process::id())))
}

fn write_synced(path: &Path, content: &str) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()
}
