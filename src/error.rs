use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the abp-cleaner library.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum Error {
    /// The resolved input path does not exist.
    #[error("Input file not found: '{path}'")]
    InputNotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// IO error with context about the file path.
    #[error("IO error accessing '{path}': {message}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// Invalid UTF-8 encountered in the input file.
    #[error("Invalid UTF-8 encoding in file '{path}'. Domain lists must be UTF-8 text.")]
    InvalidUtf8 {
        /// Path to file with encoding issues
        path: PathBuf,
    },

    /// Configuration validation error.
    #[error("Invalid configuration: {message}")]
    Config {
        /// Detailed error message
        message: String,
    },
}

impl Error {
    /// Creates an IO error with path context.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Creates an error for a failed read of the input list.
    ///
    /// `NotFound` maps to [`Error::InputNotFound`] and `InvalidData` to
    /// [`Error::InvalidUtf8`].
    #[must_use]
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::InputNotFound { path },
            std::io::ErrorKind::InvalidData => Self::InvalidUtf8 { path },
            _ => Self::io(path, source),
        }
    }

    /// Creates an input-not-found error.
    #[must_use]
    pub fn input_not_found(path: impl Into<PathBuf>) -> Self {
        Self::InputNotFound { path: path.into() }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Returns true if the input file could not be found.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::InputNotFound { .. })
    }

    /// Returns true if this is an IO error.
    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Returns true if this is a configuration error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::config("test message");
        assert!(err.is_config());
        assert!(err.to_string().contains("test message"));
    }

    #[test]
    fn test_not_found_maps_to_input_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::read("/tmp/domains.txt", io_err);
        assert!(err.is_not_found());
        assert!(err.to_string().contains("/tmp/domains.txt"));
    }

    #[test]
    fn test_other_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::read("/tmp/domains.txt", io_err);
        assert!(err.is_io());
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_write_error_is_never_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such dir");
        let err = Error::io("/missing/ABPcleanedList.txt", io_err);
        assert!(err.is_io());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_invalid_data_maps_to_utf8() {
        let io_err = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad utf-8");
        let err = Error::read("list.txt", io_err);
        assert!(matches!(err, Error::InvalidUtf8 { .. }));
    }

    #[test]
    fn test_error_clone() {
        let err = Error::input_not_found("list.txt");
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }
}
