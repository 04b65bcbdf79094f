//! Check command implementation.
//!
//! Runs the composition pipeline and prints what it resolved, without
//! emitting the configuration itself.

use rpgkit_config::{BundlerConfig, Mode};

use crate::cli::CheckArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

pub async fn execute(args: CheckArgs) -> Result<()> {
    ui::info("Checking project configuration...");

    let (dir, config) = utils::compose(&args.target).await?;

    for line in summary(&config) {
        ui::info(&line);
    }

    let manifest = &config.manifest;
    if manifest.name.is_none() && config.resolved.mode == Mode::Production {
        ui::warning("rpg.toml has no `name`; the web app manifest will be anonymous");
    }
    if config.resolved.config_file.is_some() {
        ui::warning("vite.config.js found; the bundler will also load it");
    }

    ui::success(&format!("Configuration for {} is valid", dir.display()));
    Ok(())
}

/// One line per resolved setting worth showing
pub fn summary(config: &BundlerConfig) -> Vec<String> {
    let resolved = &config.resolved;
    let plugins: Vec<&str> = resolved.plugins.iter().map(|p| p.name.as_str()).collect();

    let mut lines = vec![
        format!("mode: {}", resolved.mode),
        format!("output: {}", resolved.build.out_dir.display()),
        format!("plugins ({}): {}", plugins.len(), plugins.join(", ")),
        format!("aliases: {}", resolved.resolve.alias.len()),
    ];

    if !resolved.optimize_deps.exclude.is_empty() {
        lines.push(format!(
            "excluded from pre-bundling: {}",
            resolved.optimize_deps.exclude.join(", ")
        ));
    }
    if !resolved.server_url.is_empty() {
        lines.push(format!("server url: {}", resolved.server_url));
    }
    lines
}
