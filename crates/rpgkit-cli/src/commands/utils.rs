//! Shared helpers for command implementations.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rpgkit_config::{BundlerConfig, ConfigBuilder};

use crate::cli::TargetArgs;
use crate::config::LayeredOptions;
use crate::error::{CliError, Result, ResultExt};
use crate::ui;

/// Resolve a path relative to a working directory.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Project directory: `--cwd` resolved against the process directory
pub fn project_dir(args: &TargetArgs) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(match &args.cwd {
        Some(dir) => resolve_path(dir, &cwd),
        None => cwd,
    })
}

/// Layer the options, then run the composition pipeline.
///
/// A configuration that could not be built becomes [`CliError::NotBuilt`];
/// the reason has already been printed by the terminal reporter.
pub async fn compose(args: &TargetArgs) -> Result<(PathBuf, BundlerConfig)> {
    let dir = project_dir(args)?;
    let options = LayeredOptions::load(args)?.into_build_options();

    tracing::debug!(dir = %dir.display(), ?options, "composing bundler config");

    let config = ConfigBuilder::new(&dir)
        .reporter(Arc::new(ui::TerminalReporter))
        .build(&options)
        .await?
        .ok_or_else(|| CliError::NotBuilt(dir.clone()))?;

    Ok((dir, config))
}

/// Write `content` to `path` (creating parent directories) or to stdout.
pub async fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    let Some(path) = path else {
        println!("{content}");
        return Ok(());
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.with_path(parent)?;
    }
    tokio::fs::write(path, format!("{content}\n"))
        .await
        .with_path(path)?;
    ui::success(&format!("Wrote {}", path.display()));
    Ok(())
}
