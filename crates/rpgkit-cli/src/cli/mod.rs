//! Command-line interface definition.
//!
//! - `rpgkit config` - print the composed bundler configuration
//! - `rpgkit check` - compose and summarize without printing the config
//! - `rpgkit schema` - JSON schema of the project manifest

mod commands;
pub mod enums;

use clap::Parser;

pub use commands::{CheckArgs, Command, ConfigArgs, SchemaArgs, TargetArgs};
pub use enums::*;

/// rpgkit - bundler configuration for RPG game projects
#[derive(Parser, Debug)]
#[command(
    name = "rpgkit",
    version,
    about = "Bundler configuration for RPG game projects",
    long_about = "rpgkit reads rpg.toml / rpg.json, package.json and .env files and composes\n\
                  the bundler configuration for the client or server side of a game."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}
