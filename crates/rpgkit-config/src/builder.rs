//! Bundler config composition pipeline.
//!
//! manifest → modes → output paths → plugins → aliases and dependency
//! exclusions → emitted config → composition hook.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value, json};

use crate::alias::{AliasInputs, ModuleResolver, OxcModuleResolver, build_alias_table};
use crate::compose::{ConfigComposer, DefaultComposer};
use crate::deps::{optimize_deps_exclude, read_dependencies};
use crate::discovery::ManifestDiscovery;
use crate::emit::{
    ASSETS_INCLUDE, BuildSection, CHUNK_SIZE_WARNING_LIMIT, OptimizeDeps, RESOLVE_EXTENSIONS,
    ResolveSection, ResolvedConfig, RollupOptions, RollupOutput,
};
use crate::env::{CLIENT_RPG_TYPE_VAR, Environment, SERVER_URL_VAR};
use crate::error::{EntryNotFound, ErrorCode, ErrorReporter, Result, TracingReporter};
use crate::manifest::ProjectManifest;
use crate::options::{BuildOptions, Modes};
use crate::paths::{OutputPlan, resolve_server_url};
use crate::plugins::{PluginContext, PluginDescriptor, ROLLUP_NODE_POLYFILLS, assemble_plugins};

pub const INDEX_HTML: &str = "index.html";
pub const PROJECT_VITE_CONFIG: &str = "vite.config.js";
pub const DEFAULT_SERVER_ENTRY: &str = "src/server.ts";

/// Minification is forced off in every mode for now
pub const MINIFY: bool = false;

/// Config handed to the bundler, plus the typed form it was composed from
#[derive(Debug, Clone)]
pub struct BundlerConfig {
    pub resolved: ResolvedConfig,
    pub manifest: ProjectManifest,
    pub value: Value,
}

/// Composes bundler configs for one project.
///
/// # Example
///
/// ```no_run
/// # async fn run() -> rpgkit_config::Result<()> {
/// use rpgkit_config::{BuildOptions, ConfigBuilder, Mode, ProjectType, Side};
///
/// let options = BuildOptions::new(Side::Client, Mode::Production, ProjectType::Rpg).build();
/// match ConfigBuilder::new("./my-game").build(&options).await? {
///     Some(config) => println!("{}", serde_json::to_string_pretty(&config.value).unwrap()),
///     None => eprintln!("configuration could not be built"),
/// }
/// # Ok(())
/// # }
/// ```
pub struct ConfigBuilder {
    dir: PathBuf,
    cwd: PathBuf,
    env: Environment,
    resolver: Arc<dyn ModuleResolver>,
    reporter: Arc<dyn ErrorReporter>,
    composer: Arc<dyn ConfigComposer>,
}

impl ConfigBuilder {
    /// `dir` holds `index.html`, `public/`, `vite.config.js` and the output
    /// folder. It is also the working directory unless [`Self::cwd`] says
    /// otherwise.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref().to_path_buf();
        Self {
            cwd: dir.clone(),
            dir,
            env: Environment::from_process(),
            resolver: Arc::new(OxcModuleResolver::new()),
            reporter: Arc::new(TracingReporter),
            composer: Arc::new(DefaultComposer),
        }
    }

    /// Directory holding `rpg.toml`, `package.json` and `.env` files
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = cwd.as_ref().to_path_buf();
        self
    }

    pub fn env(mut self, env: Environment) -> Self {
        self.env = env;
        self
    }

    pub fn resolver(mut self, resolver: Arc<dyn ModuleResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn composer(mut self, composer: Arc<dyn ConfigComposer>) -> Self {
        self.composer = composer;
        self
    }

    /// Compose the bundler config.
    ///
    /// Returns `Ok(None)` when a required file is missing; the problem has
    /// already been sent to the error reporter and the caller must not start
    /// the bundler.
    ///
    /// # Errors
    ///
    /// Fails before any I/O when `RPG_TYPE` is set to an unknown value. Also
    /// fails on an unreadable or malformed manifest, a missing
    /// `package.json`, an unresolvable polyfill, or a composer error.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use rpgkit_config::{BuildOptions, ConfigBuilder, Mode, ProjectType, Side};
    ///
    /// # async fn run() -> rpgkit_config::Result<()> {
    /// let options = BuildOptions::new(Side::Client, Mode::Production, ProjectType::Rpg).build();
    /// if let Some(config) = ConfigBuilder::new("games/demo").build(&options).await? {
    ///     println!("{}", config.value);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build(&self, options: &BuildOptions) -> Result<Option<BundlerConfig>> {
        let modes = Modes::resolve(options);
        let env_type = self.env.project_type()?;

        let mode_env = self.env.load_mode_env(&self.cwd, options.mode).await?;
        let manifest = ManifestDiscovery::new(&self.cwd).load(&mode_env).await?;
        let build_settings = &manifest.compiler_options.build;
        let library_mode = manifest.library_mode();

        let server_url = resolve_server_url(&self.env, &mode_env, build_settings, modes);

        if modes.is_client() && !modes.is_test && options.plugin.is_none() && !library_mode {
            let index = self.dir.join(INDEX_HTML);
            if let Err(source) = tokio::fs::metadata(&index).await {
                let error = EntryNotFound {
                    path: index,
                    source,
                };
                self.reporter.report(ErrorCode::IndexNotFound, &error);
                return Ok(None);
            }
        }

        let plan = OutputPlan::plan(&self.dir, build_settings, modes);
        plan.ensure_dist_folder(&self.dir, modes).await?;
        tracing::debug!(
            side = ?options.side,
            mode = %options.mode,
            project_type = %options.project_type,
            out_dir = %plan.output_path.display(),
            "planned output"
        );

        let plugins = assemble_plugins(&PluginContext {
            options,
            manifest: &manifest,
            modes,
            plan: &plan,
            server_url: &server_url,
        });

        let config_file = self.project_config_file().await;

        let alias = build_alias_table(
            &AliasInputs {
                cwd: &self.cwd,
                modes,
                project_aliases: &manifest.compiler_options.alias,
            },
            self.resolver.as_ref(),
        )?;

        let dependencies = read_dependencies(&self.cwd).await?;
        let exclude = optimize_deps_exclude(&options.optimize_deps_exclude, &dependencies);

        let mut env = IndexMap::new();
        env.insert(SERVER_URL_VAR.to_string(), server_url.clone());
        env.insert(
            CLIENT_RPG_TYPE_VAR.to_string(),
            env_type.unwrap_or(options.project_type).to_string(),
        );

        let resolved = ResolvedConfig {
            mode: options.mode,
            root: ".".to_string(),
            config_file,
            resolve: ResolveSection {
                alias,
                extensions: RESOLVE_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            },
            assets_include: ASSETS_INCLUDE.iter().map(|s| s.to_string()).collect(),
            server: options.server.clone(),
            log_level: options.server.as_ref().and_then(|s| s.loglevel.clone()),
            debug: options.server.as_ref().and_then(|s| s.debug.clone()),
            build: self.build_section(options, modes, &manifest, &plan),
            plugins,
            server_url,
            define: modes
                .is_client()
                .then(|| Map::from_iter([("process.env".to_string(), json!({}))])),
            public_dir: modes.is_client().then(|| self.dir.join("public")),
            optimize_deps: OptimizeDeps { exclude },
            env,
            overrides: options.override_options.clone(),
        };

        let value = self.composer.compose(resolved.to_value()?, &manifest.vite)?;
        tracing::debug!(side = ?options.side, "bundler config composed");

        Ok(Some(BundlerConfig {
            resolved,
            manifest,
            value,
        }))
    }

    fn build_section(
        &self,
        options: &BuildOptions,
        modes: Modes,
        manifest: &ProjectManifest,
        plan: &OutputPlan,
    ) -> BuildSection {
        let library_mode = manifest.library_mode();

        let mut output = RollupOutput::new(
            manifest.rollup_output_overrides(),
            plan.output_path.clone(),
        );
        if library_mode {
            output.globals = Some(IndexMap::from([("vue".to_string(), "Vue".to_string())]));
        }

        let mut rollup = RollupOptions::new(manifest.rollup_overrides(), output);
        if modes.is_client() {
            rollup.plugins.push(PluginDescriptor::new(ROLLUP_NODE_POLYFILLS));
        }
        if library_mode {
            rollup.external = Some(vec!["vue".to_string()]);
        } else {
            rollup.input = Some(IndexMap::from([(
                "main".to_string(),
                self.entry_point(options, modes),
            )]));
        }

        BuildSection {
            manifest: true,
            out_dir: plan.output_path.clone(),
            chunk_size_warning_limit: CHUNK_SIZE_WARNING_LIMIT,
            assets_inline_limit: 0,
            empty_out_dir: false,
            minify: MINIFY,
            watch: (options.serve_mode == Some(true) && modes.is_client()).then(Map::new),
            ssr: modes.is_server.then(Map::new),
            rollup_options: rollup,
        }
    }

    fn entry_point(&self, options: &BuildOptions, modes: Modes) -> String {
        if let Some(plugin) = &options.plugin {
            return plugin.entry.clone();
        }
        let path = if modes.is_server {
            let entry = options
                .server_entry
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SERVER_ENTRY));
            self.dir.join(entry)
        } else {
            self.dir.join(INDEX_HTML)
        };
        path.display().to_string()
    }

    /// `vite.config.js` is optional; absence is not an error
    async fn project_config_file(&self) -> Option<PathBuf> {
        let path = self.dir.join(PROJECT_VITE_CONFIG);
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Some(path),
            _ => None,
        }
    }
}

/// Compose with the default resolver, reporter and composer.
///
/// Shorthand for `ConfigBuilder::new(dir).build(options)` with the process
/// environment.
pub async fn client_build_config(
    dir: impl AsRef<Path>,
    options: &BuildOptions,
) -> Result<Option<BundlerConfig>> {
    ConfigBuilder::new(dir).build(options).await
}
