//! Module alias table.
//!
//! Client bundles run in the browser, so Node built-ins are redirected to
//! `rollup-plugin-node-polyfills` modules. Each polyfill is resolved to an
//! absolute path while the config is composed; a polyfill that cannot be
//! found is a hard error.

use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::error::{ConfigError, Result};
use crate::options::Modes;

/// Full Vue build (with the runtime template compiler) used outside builds
pub const VUE_FULL_BUILD: &str = "vue/dist/vue.esm-bundler.js";

const POLYFILLS: &str = "rollup-plugin-node-polyfills/polyfills";

/// Node built-in → polyfill module, in emission order
pub const NODE_POLYFILLS: &[(&str, &str)] = &[
    ("util", "util"),
    ("sys", "util"),
    ("events", "events"),
    ("stream", "stream"),
    ("path", "path"),
    ("querystring", "qs"),
    ("punycode", "punycode"),
    ("url", "url"),
    ("string_decoder", "string-decoder"),
    ("http", "http"),
    ("https", "http"),
    ("os", "os"),
    ("assert", "assert"),
    ("constants", "constants"),
    ("_stream_duplex", "readable-stream/duplex"),
    ("_stream_passthrough", "readable-stream/passthrough"),
    ("_stream_readable", "readable-stream/readable"),
    ("_stream_writable", "readable-stream/writable"),
    ("_stream_transform", "readable-stream/transform"),
    ("timers", "timers"),
    ("console", "console"),
    ("vm", "vm"),
    ("zlib", "zlib"),
    ("tty", "tty"),
    ("domain", "domain"),
    ("process", "process-es6"),
];

/// Left out of test runs, where the test runner provides its own `Buffer`
pub const BUFFER_POLYFILL: (&str, &str) = ("buffer", "buffer-es6");

/// Resolves bare module specifiers to files on disk.
pub trait ModuleResolver: Send + Sync {
    fn resolve(&self, from: &Path, specifier: &str) -> std::result::Result<PathBuf, String>;
}

/// Node-style resolution backed by `oxc_resolver`
pub struct OxcModuleResolver {
    resolver: oxc_resolver::Resolver,
}

impl OxcModuleResolver {
    pub fn new() -> Self {
        let resolver = oxc_resolver::Resolver::new(oxc_resolver::ResolveOptions {
            condition_names: vec!["node".into(), "require".into(), "default".into()],
            extensions: vec![".js".into(), ".mjs".into(), ".cjs".into(), ".json".into()],
            ..Default::default()
        });
        Self { resolver }
    }
}

impl Default for OxcModuleResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OxcModuleResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OxcModuleResolver").finish_non_exhaustive()
    }
}

impl ModuleResolver for OxcModuleResolver {
    fn resolve(&self, from: &Path, specifier: &str) -> std::result::Result<PathBuf, String> {
        self.resolver
            .resolve(from, specifier)
            .map(|resolution| resolution.full_path())
            .map_err(|err| err.to_string())
    }
}

/// Inputs of the alias stage
pub struct AliasInputs<'a> {
    /// Project working directory; target of the `@` alias and the
    /// directory polyfills are resolved from
    pub cwd: &'a Path,
    pub modes: Modes,
    pub project_aliases: &'a IndexMap<String, String>,
}

/// Build the alias table.
///
/// Order: `@`, the Vue full build (non-build runs), client polyfills, then
/// project aliases, which override any built-in entry with the same key.
///
/// # Errors
///
/// Returns [`ConfigError::AliasResolution`] when a client polyfill cannot be
/// resolved from `cwd`, usually because `rollup-plugin-node-polyfills` is not
/// installed.
///
/// [`ConfigError::AliasResolution`]: crate::ConfigError::AliasResolution
pub fn build_alias_table(
    inputs: &AliasInputs<'_>,
    resolver: &dyn ModuleResolver,
) -> Result<IndexMap<String, String>> {
    let mut aliases = IndexMap::new();
    aliases.insert("@".to_string(), inputs.cwd.display().to_string());

    if !inputs.modes.is_build {
        aliases.insert("vue".to_string(), VUE_FULL_BUILD.to_string());
    }

    if inputs.modes.is_client() {
        let buffer = (!inputs.modes.is_test).then_some(&BUFFER_POLYFILL);
        for (alias, polyfill) in NODE_POLYFILLS.iter().chain(buffer) {
            let specifier = format!("{POLYFILLS}/{polyfill}");
            let path = resolver
                .resolve(inputs.cwd, &specifier)
                .map_err(|message| ConfigError::AliasResolution {
                    alias: (*alias).to_string(),
                    specifier: specifier.clone(),
                    message,
                })?;
            aliases.insert((*alias).to_string(), path.display().to_string());
        }
    }

    for (alias, target) in inputs.project_aliases {
        aliases.insert(alias.clone(), target.clone());
    }

    tracing::debug!(count = aliases.len(), "resolved aliases");
    Ok(aliases)
}
