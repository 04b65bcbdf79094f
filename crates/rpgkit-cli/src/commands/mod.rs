//! Command implementations.
//!
//! - [`config`] - print the composed bundler configuration
//! - [`check`] - compose and summarize
//! - [`schema`] - manifest JSON schema
//!
//! Each command exposes an `execute` function taking its parsed arguments.

pub mod check;
pub mod config;
pub mod schema;
pub(crate) mod utils;

pub use check::execute as check_execute;
pub use config::execute as config_execute;
pub use schema::execute as schema_execute;
