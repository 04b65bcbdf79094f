use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::enums::*;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the composed bundler configuration as JSON
    ///
    /// Runs the full pipeline (manifest, modes, output paths, plugins,
    /// aliases, dependency exclusions, project overrides) and writes the
    /// result to stdout or to --output.
    Config(ConfigArgs),

    /// Compose the configuration and print a short summary
    ///
    /// Exits with an error when the configuration cannot be built, for
    /// example when index.html is missing for a client build.
    Check(CheckArgs),

    /// Print the JSON schema of rpg.toml / rpg.json
    Schema(SchemaArgs),
}

/// Which configuration to compose.
///
/// Every flag is optional; unset flags fall back to `RPGKIT_*` environment
/// variables, then to the defaults (client, development, mmorpg).
#[derive(Args, Debug, Default, Clone)]
pub struct TargetArgs {
    /// Bundle side
    #[arg(long, value_enum)]
    pub side: Option<Side>,

    /// Build mode
    #[arg(long, value_enum)]
    pub mode: Option<Mode>,

    /// Project type
    #[arg(long = "type", value_enum, value_name = "TYPE")]
    pub project_type: Option<ProjectKind>,

    /// Compose for a production-style build
    #[arg(long, conflicts_with = "serve")]
    pub build: bool,

    /// Compose for a dev-server run
    #[arg(long)]
    pub serve: bool,

    /// Exclude a package from dependency pre-bundling (repeatable)
    #[arg(long, value_name = "PACKAGE")]
    pub exclude: Vec<String>,

    /// Build a single plugin from this entry instead of the game
    #[arg(long, value_name = "FILE")]
    pub plugin_entry: Option<String>,

    /// Server entry module, relative to the project directory
    #[arg(long, value_name = "FILE")]
    pub server_entry: Option<PathBuf>,

    /// Dev-server host
    #[arg(long)]
    pub host: Option<String>,

    /// Dev-server port
    #[arg(long)]
    pub port: Option<u16>,

    /// Bundler log level (info, warn, error, silent)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Project directory (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Write the configuration to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print compact JSON
    #[arg(long)]
    pub compact: bool,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Write the schema to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}
