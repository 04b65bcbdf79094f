//! Error types for manifest loading and bundler config composition.
//!
//! Fatal failures surface as [`ConfigError`]. A missing HTML entry is not
//! fatal in that sense: it goes through an [`ErrorReporter`] with a named
//! [`ErrorCode`] and the composer returns `Ok(None)`.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// `RPG_TYPE` holds something other than `rpg` or `mmorpg`
    #[error("invalid project type '{0}': choose between rpg or mmorpg")]
    InvalidProjectType(String),

    /// Malformed rpg.toml / rpg.json / .env file
    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("invalid manifest value: {0}")]
    InvalidValue(String),

    /// A browser polyfill module could not be located on disk
    #[error("cannot resolve '{specifier}' for alias '{alias}': {message}")]
    AliasResolution {
        alias: String,
        specifier: String,
        message: String,
    },

    #[error("cannot read package manifest {}: {message}", .path.display())]
    PackageJson { path: PathBuf, message: String },

    /// The composition hook rejected the resolved config
    #[error("config composition failed: {0}")]
    Compose(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Named codes for problems reported through the structured error channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The client HTML entry (`index.html`) is missing
    IndexNotFound,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::IndexNotFound => "INDEX_NOT_FOUND",
        }
    }

    /// Short actionable hint shown next to the error
    pub fn hint(&self) -> &'static str {
        match self {
            ErrorCode::IndexNotFound => {
                "Create an index.html file at the root of your project to serve as the client entry point"
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The HTML entry file checked before a client build could not be found.
#[derive(Debug, Error)]
#[error("client entry not found: {}", .path.display())]
pub struct EntryNotFound {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Sink for non-fatal, coded errors.
///
/// Reporting an error does not abort the process; the composer stops and
/// tells its caller through an empty result.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, code: ErrorCode, error: &(dyn std::error::Error + 'static));
}

/// Default reporter: emits a `tracing` error event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, code: ErrorCode, error: &(dyn std::error::Error + 'static)) {
        tracing::error!(code = %code, hint = code.hint(), "{error}");
    }
}
