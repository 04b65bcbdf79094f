//! Error types for the rpgkit CLI.
//!
//! Library failures arrive as [`rpgkit_config::ConfigError`] and are wrapped
//! by [`CliError`]. Everything is turned into a miette report at the binary
//! edge by [`cli_error_to_miette`].

mod miette;

use std::path::PathBuf;
use thiserror::Error;

pub use self::miette::cli_error_to_miette;

#[derive(Debug, Error)]
pub enum CliError {
    /// Composition failed inside the library
    #[error("Configuration error: {0}")]
    Config(#[from] rpgkit_config::ConfigError),

    /// The layered options (defaults, `RPGKIT_*`, flags) did not extract
    #[error("Invalid options: {message}\n\nHint: {hint}")]
    Options { message: String, hint: String },

    /// A required project file was missing; details were already printed
    #[error("Configuration could not be built for {}", .0.display())]
    NotBuilt(PathBuf),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        CliError::Options {
            message: err.to_string(),
            hint: "Check RPGKIT_* environment variables and command-line flags".to_string(),
        }
    }
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Attach context to fallible operations.
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpgkit_config::ConfigError;

    #[test]
    fn wraps_library_errors() {
        let err: CliError = ConfigError::InvalidProjectType("arcade".to_string()).into();
        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().contains("arcade"));
    }

    #[test]
    fn not_built_names_the_directory() {
        let err = CliError::NotBuilt(PathBuf::from("/games/demo"));
        assert!(err.to_string().contains("/games/demo"));
    }

    #[test]
    fn with_path_maps_not_found() {
        let result: std::io::Result<()> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
        let err = result.with_path("/out/config.json").unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }
}
