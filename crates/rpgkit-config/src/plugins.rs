//! Ordered bundler plugin list.
//!
//! Plugins are emitted as named descriptors; the bundler side maps each
//! name to its implementation. Order matters: the config-toml transform
//! reads values the flag transform has already substituted.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::manifest::ProjectManifest;
use crate::options::{BuildOptions, Modes};
use crate::paths::OutputPlan;

pub const PLUGIN_LOADER: &str = "rpgjs-plugin-loader";
pub const FLAG_TRANSFORM: &str = "rpgjs-flag-transform";
pub const CONFIG_TOML: &str = "rpgjs-config-toml";
pub const REQUIRE_TRANSFORM: &str = "rpgjs-require-transform";
pub const WORLD_TRANSFORM: &str = "rpgjs-world-transform";
pub const TSX_XML: &str = "rpgjs-tsx-xml";
pub const RUNTIME: &str = "rpgjs-runtime";
pub const VUE: &str = "vite:vue";
pub const CSS: &str = "rpgjs-css";
pub const CODE_INJECTOR: &str = "rpgjs-code-injector";
pub const NODE_MODULES_POLYFILL: &str = "node-modules-polyfill";
pub const NODE_GLOBALS_POLYFILL: &str = "node-globals-polyfill";
pub const SPLIT_VENDOR_CHUNK: &str = "vite:split-vendor-chunk";
pub const PWA: &str = "vite-plugin-pwa";
pub const MAP_UPDATE: &str = "rpgjs-map-update";
pub const TMX_TSX_MOVER: &str = "rpgjs-tmx-tsx-mover";
pub const MAP_EXTRACT: &str = "rpgjs-map-extract";
pub const ROLLUP_NODE_POLYFILLS: &str = "rollup-plugin-node-polyfills";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    pub name: String,

    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub options: Value,
}

impl PluginDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Value::Null,
        }
    }

    pub fn with_options(name: impl Into<String>, options: Value) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }
}

/// Everything the plugin pipeline reads
pub struct PluginContext<'a> {
    pub options: &'a BuildOptions,
    pub manifest: &'a ProjectManifest,
    pub modes: Modes,
    pub plan: &'a OutputPlan,
    pub server_url: &'a str,
}

impl PluginContext<'_> {
    /// rpg projects run the server in-process and need no URL
    fn remote_server_url(&self) -> Value {
        if self.modes.is_rpg {
            Value::Null
        } else {
            Value::String(self.server_url.to_string())
        }
    }
}

/// Assemble the ordered plugin list for one run.
///
/// The list always starts with the transform plugins (loader, flag
/// transform, manifest injection, require/world transforms, TSX XML),
/// followed by the caller's plugins. After that:
/// 1. the runtime plugin, for library builds
/// 2. client plugins (Vue, CSS, code injector, Node polyfills, vendor
///    chunk splitting) and the web app manifest on client builds
/// 3. map hot-reload, on server dev runs
/// 4. map asset movers, on non-test builds
/// 5. the caller's build-end plugin
///
/// Options are plain JSON; the bundler side instantiates each plugin by name.
pub fn assemble_plugins(ctx: &PluginContext<'_>) -> Vec<PluginDescriptor> {
    let modes = ctx.modes;
    let options = ctx.options;
    let manifest = ctx.manifest;

    let mut plugins = vec![
        PluginDescriptor::with_options(
            PLUGIN_LOADER,
            json!({
                "outputDir": ctx.plan.dir_output_name,
                "serveMode": options.serve_mode,
            }),
        ),
        PluginDescriptor::with_options(FLAG_TRANSFORM, flag_options(options)),
        PluginDescriptor::with_options(
            CONFIG_TOML,
            json!({
                "flags": flag_options(options),
                "config": manifest.to_value().unwrap_or(Value::Null),
            }),
        ),
        PluginDescriptor::new(REQUIRE_TRANSFORM),
        PluginDescriptor::with_options(
            WORLD_TRANSFORM,
            json!({ "serverUrl": ctx.remote_server_url() }),
        ),
        PluginDescriptor::new(TSX_XML),
    ];
    plugins.extend(options.plugins.iter().cloned());

    if manifest.library_mode() {
        plugins.push(PluginDescriptor::with_options(
            RUNTIME,
            json!({
                "outputPath": ctx.plan.output_path,
                "vite": manifest.vite,
            }),
        ));
    }

    if modes.is_client() {
        plugins.extend([
            PluginDescriptor::new(VUE),
            PluginDescriptor::with_options(CSS, json!({ "themeCss": manifest.theme_css })),
            PluginDescriptor::new(CODE_INJECTOR),
            PluginDescriptor::new(NODE_MODULES_POLYFILL),
            PluginDescriptor::with_options(
                NODE_GLOBALS_POLYFILL,
                json!({ "process": true, "buffer": true }),
            ),
            PluginDescriptor::new(SPLIT_VENDOR_CHUNK),
        ]);

        if modes.is_build && manifest.compiler_options.build.pwa_enabled() {
            plugins.push(pwa_plugin(manifest));
        }
    } else if !modes.is_build {
        plugins.push(PluginDescriptor::with_options(
            MAP_UPDATE,
            json!({ "serverUrl": ctx.remote_server_url() }),
        ));
    }

    if modes.is_build && !modes.is_test {
        plugins.push(PluginDescriptor::with_options(
            TMX_TSX_MOVER,
            json!({ "outputDir": ctx.plan.server_assets_dir }),
        ));
        plugins.push(PluginDescriptor::with_options(
            MAP_EXTRACT,
            json!({ "outputDir": ctx.plan.dir_output_name }),
        ));
    }

    if let Some(build_end) = &options.build_end {
        plugins.push(build_end.clone());
    }

    tracing::debug!(
        count = plugins.len(),
        names = ?plugins.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
        "assembled plugins"
    );
    plugins
}

/// Web app manifest plugin; the project's raw `pwa` keys win on conflict
pub fn pwa_plugin(manifest: &ProjectManifest) -> PluginDescriptor {
    let mut web_manifest = Map::new();
    insert_some(&mut web_manifest, "name", manifest.name.as_deref());
    insert_some(&mut web_manifest, "short_name", manifest.resolved_short_name());
    insert_some(&mut web_manifest, "description", manifest.description.as_deref());
    insert_some(&mut web_manifest, "theme_color", manifest.resolved_theme_color());
    if !manifest.icons.is_empty() {
        web_manifest.insert(
            "icons".to_string(),
            serde_json::to_value(&manifest.icons).unwrap_or(Value::Null),
        );
    }

    let mut options = Map::new();
    options.insert("registerType".to_string(), json!("autoUpdate"));
    options.insert("manifest".to_string(), Value::Object(web_manifest));
    for (key, value) in &manifest.pwa {
        options.insert(key.clone(), value.clone());
    }

    PluginDescriptor::with_options(PWA, Value::Object(options))
}

fn flag_options(options: &BuildOptions) -> Value {
    json!({
        "side": options.side,
        "mode": options.mode,
        "type": options.project_type,
        "serveMode": options.serve_mode,
    })
}

fn insert_some(map: &mut Map<String, Value>, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        map.insert(key.to_string(), Value::String(value.to_string()));
    }
}
