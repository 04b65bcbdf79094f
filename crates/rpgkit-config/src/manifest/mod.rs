//! Project manifest (`rpg.toml` / `rpg.json`) types.
//!
//! Unknown keys are kept in `extra` maps at every level so a manifest
//! survives a load/serialize cycle untouched.

mod substitute;

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ConfigError, Result};

pub use substitute::{ENV_PLACEHOLDER, INTERNAL_KEY_MARKER, replace_env_vars};

/// Default output root when `compilerOptions.build.outputDir` is absent
pub const DEFAULT_OUTPUT_DIR: &str = "dist";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectManifest {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modules: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_map: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,

    /// Pre-rename spelling of `shortName`
    #[serde(default, rename = "short_name", skip_serializing_if = "Option::is_none")]
    pub legacy_short_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_color: Option<String>,

    /// Pre-rename spelling of `themeColor`
    #[serde(
        default,
        rename = "background_color",
        skip_serializing_if = "Option::is_none"
    )]
    pub legacy_background_color: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub icons: Vec<Icon>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_css: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub inputs: IndexMap<String, InputBinding>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<StartOptions>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spritesheet_directories: Vec<String>,

    #[serde(default)]
    pub compiler_options: CompilerOptions,

    /// Raw PWA plugin options; keys here win over the generated ones
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub pwa: Map<String, Value>,

    /// Project-level bundler override block
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub vite: Value,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Icon {
    pub src: String,

    #[serde(default)]
    pub sizes: Vec<u32>,

    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct InputBinding {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<bool>,

    pub bind: KeyBind,
}

/// One key or several keys bound to the same control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum KeyBind {
    One(String),
    Many(Vec<String>),
}

impl KeyBind {
    pub fn keys(&self) -> Vec<&str> {
        match self {
            KeyBind::One(key) => vec![key.as_str()],
            KeyBind::Many(keys) => keys.iter().map(String::as_str).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StartOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graphic: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hitbox: Option<[f64; 2]>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CompilerOptions {
    /// Project aliases; merged after the built-in ones and win on conflict
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub alias: IndexMap<String, String>,

    #[serde(default)]
    pub build: BuildSettings,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BuildSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pwa_enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BuildSettings {
    /// PWA generation is on unless explicitly disabled
    pub fn pwa_enabled(&self) -> bool {
        self.pwa_enabled.unwrap_or(true)
    }

    pub fn output_dir(&self) -> &str {
        self.output_dir.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR)
    }
}

impl ProjectManifest {
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue(e.to_string()))
    }

    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue(e.to_string()))
    }

    /// `shortName`, falling back to the legacy `short_name`
    pub fn resolved_short_name(&self) -> Option<&str> {
        non_empty(&self.short_name).or_else(|| non_empty(&self.legacy_short_name))
    }

    /// `themeColor`, falling back to the legacy `background_color`
    pub fn resolved_theme_color(&self) -> Option<&str> {
        non_empty(&self.theme_color).or_else(|| non_empty(&self.legacy_background_color))
    }

    /// Whether the project builds a redistributable library (`vite.build.lib`)
    pub fn library_mode(&self) -> bool {
        match self.vite.pointer("/build/lib") {
            None | Some(Value::Null) | Some(Value::Bool(false)) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
            Some(_) => true,
        }
    }

    /// `vite.build.rollupOptions`, if the project declares one
    pub fn rollup_overrides(&self) -> Map<String, Value> {
        object_at(&self.vite, "/build/rollupOptions")
    }

    /// `vite.build.rollupOptions.output`, if the project declares one
    pub fn rollup_output_overrides(&self) -> Map<String, Value> {
        object_at(&self.vite, "/build/rollupOptions/output")
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn object_at(value: &Value, pointer: &str) -> Map<String, Value> {
    value
        .pointer(pointer)
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}
