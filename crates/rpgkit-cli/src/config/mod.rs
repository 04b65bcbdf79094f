//! Layered build options.
//!
//! Merges the built-in defaults, `RPGKIT_*` environment variables and
//! command-line flags into [`rpgkit_config::BuildOptions`].
//! Priority: CLI > Environment > Defaults

mod loading;

use rpgkit_config::{Mode, ProjectType, Side};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use loading::ENV_PREFIX;

/// Flat, snake_case view of the options figment layers.
///
/// Keys match `RPGKIT_<KEY>` environment variables once lowercased.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayeredOptions {
    pub side: Side,
    pub mode: Mode,

    #[serde(rename = "type")]
    pub project_type: ProjectType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub serve_mode: Option<bool>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub optimize_deps_exclude: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin_entry: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_entry: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}
