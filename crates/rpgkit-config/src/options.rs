//! Caller-supplied build options and the mode flags derived from them.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ConfigError;
use crate::plugins::PluginDescriptor;

/// Which half of the game the bundle is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Client,
    Server,
}

/// Bundler mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Development,
    Production,
    Test,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Development => "development",
            Mode::Production => "production",
            Mode::Test => "test",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Project type.
///
/// `rpg` is a single-player game where client and server ship together;
/// `mmorpg` splits them into separate bundles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Rpg,
    #[default]
    Mmorpg,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Rpg => "rpg",
            ProjectType::Mmorpg => "mmorpg",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rpg" => Ok(ProjectType::Rpg),
            "mmorpg" => Ok(ProjectType::Mmorpg),
            other => Err(ConfigError::InvalidProjectType(other.to_string())),
        }
    }
}

/// Single entry point used when building one plugin instead of a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginEntry {
    pub entry: String,
}

/// Dev-server options forwarded to the bundler untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DevServerOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loglevel: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOptions {
    #[serde(default)]
    pub side: Side,

    #[serde(default)]
    pub mode: Mode,

    #[serde(default, rename = "type")]
    pub project_type: ProjectType,

    /// `Some(false)` means a production-style build, `Some(true)` a dev
    /// server run. `None` is neither: no watch mode, no build-only steps.
    #[serde(default, alias = "servemode", alias = "serve_mode")]
    pub serve_mode: Option<bool>,

    /// Extra plugins placed right after the base plugin set
    #[serde(default)]
    pub plugins: Vec<PluginDescriptor>,

    #[serde(default, alias = "optimizedepsexclude", alias = "optimize_deps_exclude")]
    pub optimize_deps_exclude: Vec<String>,

    #[serde(default)]
    pub plugin: Option<PluginEntry>,

    /// Appended after every other plugin
    #[serde(default, alias = "buildend", alias = "build_end")]
    pub build_end: Option<PluginDescriptor>,

    #[serde(default)]
    pub server: Option<DevServerOptions>,

    /// Top-level keys spread over the resolved config
    #[serde(default, alias = "overrideoptions", alias = "override_options")]
    pub override_options: Map<String, Value>,

    /// Server entry module; defaults to `src/server.ts` in the project
    #[serde(default, alias = "serverentry", alias = "server_entry")]
    pub server_entry: Option<PathBuf>,
}

impl BuildOptions {
    pub fn new(side: Side, mode: Mode, project_type: ProjectType) -> Self {
        Self {
            side,
            mode,
            project_type,
            ..Default::default()
        }
    }

    /// Production-style build (`serve_mode = Some(false)`)
    pub fn build(mut self) -> Self {
        self.serve_mode = Some(false);
        self
    }

    /// Dev-server run (`serve_mode = Some(true)`)
    pub fn serve(mut self) -> Self {
        self.serve_mode = Some(true);
        self
    }

    pub fn with_plugin(mut self, plugin: PluginDescriptor) -> Self {
        self.plugins.push(plugin);
        self
    }

    pub fn with_build_end(mut self, plugin: PluginDescriptor) -> Self {
        self.build_end = Some(plugin);
        self
    }

    pub fn with_plugin_entry(mut self, entry: impl Into<String>) -> Self {
        self.plugin = Some(PluginEntry {
            entry: entry.into(),
        });
        self
    }

    pub fn exclude_dependency(mut self, name: impl Into<String>) -> Self {
        self.optimize_deps_exclude.push(name.into());
        self
    }
}

/// The four independent axes every later stage branches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modes {
    pub is_server: bool,
    pub is_test: bool,
    pub is_rpg: bool,
    pub is_build: bool,
}

impl Modes {
    pub fn resolve(options: &BuildOptions) -> Self {
        Self {
            is_server: options.side == Side::Server,
            is_test: options.mode == Mode::Test,
            is_rpg: options.project_type == ProjectType::Rpg,
            is_build: options.serve_mode == Some(false),
        }
    }

    pub fn is_client(&self) -> bool {
        !self.is_server
    }
}

impl From<&BuildOptions> for Modes {
    fn from(options: &BuildOptions) -> Self {
        Self::resolve(options)
    }
}
