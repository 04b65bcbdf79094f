//! rpgkit CLI - bundler configuration for RPG game projects.
//!
//! Thin command-line surface over [`rpgkit_config`]:
//!
//! - [`error`] - CLI error types and miette conversion
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - status messages and the terminal error reporter
//! - `commands` - `config`, `check` and `schema`
//! - `config` - layered option loading (defaults, `RPGKIT_*`, flags)
//!
//! # Example
//!
//! ```rust
//! use rpgkit_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result, ResultExt};
