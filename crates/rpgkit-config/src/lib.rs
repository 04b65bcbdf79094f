//! Bundler configuration for RPG game projects.
//!
//! Reads a project's `rpg.toml` / `rpg.json`, its `package.json` and
//! `.env` files, and composes the configuration object the bundler runs
//! with for one side (client or server) in one mode.

pub mod alias;
pub mod builder;
pub mod compose;
pub mod deps;
pub mod discovery;
pub mod emit;
pub mod env;
pub mod error;
pub mod manifest;
pub mod options;
pub mod paths;
pub mod plugins;

pub use alias::{ModuleResolver, OxcModuleResolver};
pub use builder::{BundlerConfig, ConfigBuilder, client_build_config};
pub use compose::{ConfigComposer, DefaultComposer};
pub use discovery::ManifestDiscovery;
pub use emit::{AssetNaming, ResolvedConfig};
pub use env::Environment;
pub use error::*;
pub use manifest::{BuildSettings, ProjectManifest};
pub use options::{BuildOptions, DevServerOptions, Mode, Modes, PluginEntry, ProjectType, Side};
pub use paths::OutputPlan;
pub use plugins::PluginDescriptor;
