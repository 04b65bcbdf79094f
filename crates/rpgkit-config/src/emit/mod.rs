//! The resolved bundler configuration.

mod assets;

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ConfigError, Result};
use crate::options::{DevServerOptions, Mode};
use crate::plugins::PluginDescriptor;

pub use assets::AssetNaming;

/// Large maps and spritesheets are expected; warn only past 10 MB
pub const CHUNK_SIZE_WARNING_LIMIT: u32 = 10_000;

pub const RESOLVE_EXTENSIONS: &[&str] = &[
    ".ts", ".js", ".jsx", ".json", ".vue", ".css", ".scss", ".sass", ".html", "tmx", "tsx",
    ".toml",
];

pub const ASSETS_INCLUDE: &[&str] = &["**/*.tmx", "**/*.tsx"];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    pub mode: Mode,
    pub root: String,

    /// Project-local `vite.config.js`, used verbatim by the bundler
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,

    pub resolve: ResolveSection,
    pub assets_include: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<DevServerOptions>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<String>,

    pub build: BuildSection,
    pub plugins: Vec<PluginDescriptor>,
    pub server_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub define: Option<Map<String, Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_dir: Option<PathBuf>,

    pub optimize_deps: OptimizeDeps,

    /// Values client code reads as `import.meta.env.*`
    pub env: IndexMap<String, String>,

    /// Caller `overrideOptions`, spread over the top level by [`Self::to_value`]
    #[serde(skip)]
    pub overrides: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolveSection {
    pub alias: IndexMap<String, String>,
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSection {
    pub manifest: bool,
    pub out_dir: PathBuf,
    pub chunk_size_warning_limit: u32,
    pub assets_inline_limit: u32,
    pub empty_out_dir: bool,
    pub minify: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub watch: Option<Map<String, Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssr: Option<Map<String, Value>>,

    pub rollup_options: RollupOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct RollupOptions {
    /// Project `vite.build.rollupOptions` keys without a dedicated field
    #[serde(flatten)]
    pub passthrough: Map<String, Value>,

    pub output: RollupOutput,
    pub plugins: Vec<PluginDescriptor>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub external: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<IndexMap<String, String>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollupOutput {
    /// Project `vite.build.rollupOptions.output` keys without a dedicated field
    #[serde(flatten)]
    pub passthrough: Map<String, Value>,

    pub dir: PathBuf,
    pub asset_file_names: AssetNaming,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub globals: Option<IndexMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct OptimizeDeps {
    pub exclude: Vec<String>,
}

impl RollupOptions {
    const OWN_KEYS: &'static [&'static str] = &["output", "plugins", "external", "input"];

    pub fn new(passthrough: Map<String, Value>, output: RollupOutput) -> Self {
        Self {
            passthrough: without_keys(passthrough, Self::OWN_KEYS),
            output,
            plugins: Vec::new(),
            external: None,
            input: None,
        }
    }
}

impl RollupOutput {
    const OWN_KEYS: &'static [&'static str] = &["dir", "assetFileNames", "globals"];

    pub fn new(passthrough: Map<String, Value>, dir: PathBuf) -> Self {
        Self {
            passthrough: without_keys(passthrough, Self::OWN_KEYS),
            dir,
            asset_file_names: AssetNaming::default(),
            globals: None,
        }
    }
}

impl ResolvedConfig {
    /// Serialize, then spread the caller overrides over the top level.
    ///
    /// Client `define` and `publicDir` are not overridable, and
    /// `optimizeDeps.exclude` always keeps the computed list.
    pub fn to_value(&self) -> Result<Value> {
        let mut value =
            serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
        let Some(root) = value.as_object_mut() else {
            return Ok(value);
        };

        for (key, override_value) in &self.overrides {
            match key.as_str() {
                "define" | "publicDir" if self.define.is_some() => continue,
                "optimizeDeps" => {
                    let mut merged = override_value.as_object().cloned().unwrap_or_default();
                    merged.insert(
                        "exclude".to_string(),
                        serde_json::to_value(&self.optimize_deps.exclude)
                            .map_err(|e| ConfigError::InvalidValue(e.to_string()))?,
                    );
                    root.insert(key.clone(), Value::Object(merged));
                }
                _ => {
                    root.insert(key.clone(), override_value.clone());
                }
            }
        }

        Ok(value)
    }
}

fn without_keys(mut map: Map<String, Value>, keys: &[&str]) -> Map<String, Value> {
    for key in keys {
        map.remove(*key);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ResolvedConfig {
        let output = RollupOutput::new(
            Map::from_iter([
                ("dir".to_string(), json!("ignored")),
                ("format".to_string(), json!("es")),
            ]),
            PathBuf::from("/game/dist"),
        );
        ResolvedConfig {
            mode: Mode::Production,
            root: ".".to_string(),
            config_file: None,
            resolve: ResolveSection {
                alias: IndexMap::new(),
                extensions: RESOLVE_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            },
            assets_include: ASSETS_INCLUDE.iter().map(|s| s.to_string()).collect(),
            server: None,
            log_level: None,
            debug: None,
            build: BuildSection {
                manifest: true,
                out_dir: PathBuf::from("/game/dist"),
                chunk_size_warning_limit: CHUNK_SIZE_WARNING_LIMIT,
                assets_inline_limit: 0,
                empty_out_dir: false,
                minify: false,
                watch: None,
                ssr: None,
                rollup_options: RollupOptions::new(Map::new(), output),
            },
            plugins: Vec::new(),
            server_url: String::new(),
            define: Some(Map::from_iter([("process.env".to_string(), json!({}))])),
            public_dir: Some(PathBuf::from("/game/public")),
            optimize_deps: OptimizeDeps {
                exclude: vec!["@rpgjs/foo-plugin".to_string()],
            },
            env: IndexMap::new(),
            overrides: Map::new(),
        }
    }

    #[test]
    fn serializes_bundler_field_names() {
        let value = sample().to_value().unwrap();
        assert_eq!(value["build"]["chunkSizeWarningLimit"], json!(10_000));
        assert_eq!(value["build"]["assetsInlineLimit"], json!(0));
        assert_eq!(value["build"]["emptyOutDir"], json!(false));
        assert_eq!(value["build"]["rollupOptions"]["output"]["dir"], json!("/game/dist"));
        assert_eq!(value["build"]["rollupOptions"]["output"]["format"], json!("es"));
        assert_eq!(
            value["build"]["rollupOptions"]["output"]["assetFileNames"]["unhashed"],
            json!("assets/[name][extname]")
        );
        assert!(value.get("configFile").is_none());
    }

    #[test]
    fn overrides_spread_but_keep_protected_fields() {
        let mut config = sample();
        config.overrides = Map::from_iter([
            ("base".to_string(), json!("/play/")),
            ("publicDir".to_string(), json!("static")),
            ("optimizeDeps".to_string(), json!({ "include": ["pixi.js"], "exclude": [] })),
        ]);

        let value = config.to_value().unwrap();
        assert_eq!(value["base"], json!("/play/"));
        assert_eq!(value["publicDir"], json!("/game/public"));
        assert_eq!(value["optimizeDeps"]["include"], json!(["pixi.js"]));
        assert_eq!(value["optimizeDeps"]["exclude"], json!(["@rpgjs/foo-plugin"]));
    }
}
