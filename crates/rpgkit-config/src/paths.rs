//! Output directory planning and server URL resolution.

use std::path::{Path, PathBuf};

use path_clean::PathClean;

use crate::env::{Environment, SERVER_URL_VAR};
use crate::error::Result;
use crate::manifest::BuildSettings;
use crate::options::Modes;

/// Where one invocation writes its bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPlan {
    /// Output root as written in the manifest (`dist` by default)
    pub output_dir: PathBuf,

    /// Client output folder relative to the project: `<root>` for rpg
    /// projects, `<root>/client` for mmorpg
    pub dir_output_name: PathBuf,

    /// Absolute bundle output directory for this side
    pub output_path: PathBuf,

    /// Folder that receives relocated map files on build
    pub server_assets_dir: PathBuf,
}

impl OutputPlan {
    pub fn plan(dir: &Path, build: &BuildSettings, modes: Modes) -> Self {
        let output_dir = PathBuf::from(build.output_dir());

        let dir_output_name = if modes.is_rpg {
            output_dir.clone()
        } else {
            output_dir.join("client")
        };

        let server_assets_dir = if modes.is_rpg {
            output_dir.clone()
        } else {
            output_dir.join("server")
        };

        let side_dir = if modes.is_server {
            &server_assets_dir
        } else {
            &dir_output_name
        };
        let output_path = dir.join(side_dir).clean();

        Self {
            output_dir,
            dir_output_name,
            output_path,
            server_assets_dir,
        }
    }

    /// Only real builds touch the disk; test runs never do
    pub fn should_create_dist(modes: Modes) -> bool {
        modes.is_build && !modes.is_test
    }

    /// Pre-create the client output folder under `dir` when building.
    ///
    /// Returns whether a directory was created.
    pub async fn ensure_dist_folder(&self, dir: &Path, modes: Modes) -> Result<bool> {
        if !Self::should_create_dist(modes) {
            return Ok(false);
        }

        let target = dir.join(&self.dir_output_name);
        if tokio::fs::metadata(&target).await.is_ok() {
            return Ok(false);
        }

        tokio::fs::create_dir_all(&target).await?;
        tracing::debug!(dir = %target.display(), "created dist folder");
        Ok(true)
    }
}

/// Resolve the game server URL.
///
/// Builds take `VITE_SERVER_URL` (process first, then `.env` files), then
/// `compilerOptions.build.serverUrl`, then the empty string. Dev-server runs
/// prefix `VITE_SERVER_URL` with `http://`, or yield the empty string when it
/// is unset.
pub fn resolve_server_url(
    env: &Environment,
    mode_env: &indexmap::IndexMap<String, String>,
    build: &BuildSettings,
    modes: Modes,
) -> String {
    let from_env = env
        .get(SERVER_URL_VAR)
        .or_else(|| mode_env.get(SERVER_URL_VAR).map(String::as_str))
        .filter(|url| !url.is_empty());

    if modes.is_build {
        from_env
            .or(build.server_url.as_deref())
            .unwrap_or_default()
            .to_string()
    } else {
        from_env.map(|url| format!("http://{url}")).unwrap_or_default()
    }
}
