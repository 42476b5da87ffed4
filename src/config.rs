use crate::error::{Error, Result};
use std::path::PathBuf;

/// Fixed name of the cleaned rule list written to the working directory.
pub const OUTPUT_FILE_NAME: &str = "ABPcleanedList.txt";

/// Configuration for the abp-cleaner pipeline.
///
/// Use [`Config::builder()`] to construct a new configuration.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Config {
    /// Directory searched for an input list and receiving the output file
    pub work_dir: PathBuf,

    /// Explicit input list, bypassing discovery
    pub input: Option<PathBuf>,

    /// Dry run mode (no file writes)
    pub dry_run: bool,

    /// Keep a timestamped copy of an existing output file before replacing it
    pub backup_existing: bool,
}

impl Config {
    /// Creates a new configuration builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use abp_cleaner::Config;
    ///
    /// let config = Config::builder()
    ///     .work_dir(".")
    ///     .dry_run(true)
    ///     .build()
    ///     .expect("valid configuration");
    /// ```
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory doesn't exist or is not a directory.
    pub fn validate(&self) -> Result<()> {
        if !self.work_dir.exists() {
            return Err(Error::config(format!(
                "Working directory does not exist: {}",
                self.work_dir.display()
            )));
        }

        if !self.work_dir.is_dir() {
            return Err(Error::config(format!(
                "Working path is not a directory: {}",
                self.work_dir.display()
            )));
        }

        Ok(())
    }

    /// Returns the path of the output file.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.work_dir.join(OUTPUT_FILE_NAME)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("."),
            input: None,
            dry_run: false,
            backup_existing: false,
        }
    }
}

/// Builder for creating a [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    work_dir: Option<PathBuf>,
    input: Option<PathBuf>,
    dry_run: bool,
    backup_existing: bool,
}

impl ConfigBuilder {
    /// Sets the working directory.
    #[must_use]
    pub fn work_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.work_dir = Some(path.into());
        self
    }

    /// Sets an explicit input list, skipping discovery.
    #[must_use]
    pub fn input(mut self, path: impl Into<PathBuf>) -> Self {
        self.input = Some(path.into());
        self
    }

    /// Enables dry run mode (no file writes).
    #[must_use]
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Enables or disables backup creation.
    #[must_use]
    pub fn backup_existing(mut self, enabled: bool) -> Self {
        self.backup_existing = enabled;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn build(self) -> Result<Config> {
        let config = Config {
            work_dir: self.work_dir.unwrap_or_else(|| PathBuf::from(".")),
            input: self.input,
            dry_run: self.dry_run,
            backup_existing: self.backup_existing,
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn test_default_config() {
        let temp = assert_fs::TempDir::new().unwrap();
        let config = Config::builder().work_dir(temp.path()).build().unwrap();

        assert!(!config.dry_run);
        assert!(!config.backup_existing);
        assert!(config.input.is_none());
        assert_eq!(config.output_path(), temp.path().join(OUTPUT_FILE_NAME));
    }

    #[test]
    fn test_invalid_work_dir() {
        let result = Config::builder()
            .work_dir("/nonexistent/path/that/should/not/exist")
            .build();

        assert!(result.unwrap_err().is_config());
    }

    #[test]
    fn test_work_dir_must_be_directory() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("list.txt");
        file.write_str("example.com").unwrap();

        let result = Config::builder().work_dir(file.path()).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_input_is_not_a_config_error() {
        let temp = assert_fs::TempDir::new().unwrap();
        let config = Config::builder()
            .work_dir(temp.path())
            .input(temp.path().join("missing.txt"))
            .build();

        assert!(config.is_ok());
    }
}
