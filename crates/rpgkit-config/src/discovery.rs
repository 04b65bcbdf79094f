//! Project manifest discovery.
//!
//! Finds `rpg.toml` (preferred) or `rpg.json` in a project directory, parses
//! it and applies `$ENV:` substitution before deserializing.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::manifest::{ProjectManifest, replace_env_vars};

pub const TOML_MANIFEST: &str = "rpg.toml";
pub const JSON_MANIFEST: &str = "rpg.json";

/// File-based manifest discovery
///
/// # Example
///
/// ```no_run
/// # async fn run() -> rpgkit_config::Result<()> {
/// use indexmap::IndexMap;
/// use rpgkit_config::ManifestDiscovery;
///
/// let manifest = ManifestDiscovery::new(".").load(&IndexMap::new()).await?;
/// println!("{:?}", manifest.name);
/// # Ok(())
/// # }
/// ```
pub struct ManifestDiscovery {
    root: PathBuf,
}

impl ManifestDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Locate the manifest file.
    ///
    /// Searches in this order:
    /// 1. rpg.toml
    /// 2. rpg.json
    pub fn find(&self) -> Option<PathBuf> {
        [TOML_MANIFEST, JSON_MANIFEST]
            .into_iter()
            .map(|name| self.root.join(name))
            .find(|path| path.is_file())
    }

    /// Parse the manifest into a raw JSON value.
    ///
    /// A project without a manifest yields an empty object.
    pub async fn read_value(&self) -> Result<Value> {
        let Some(path) = self.find() else {
            tracing::debug!(root = %self.root.display(), "no project manifest, using zero config");
            return Ok(Value::Object(Default::default()));
        };

        let content = tokio::fs::read_to_string(&path).await?;
        parse_manifest(&path, &content)
    }

    /// Load the manifest, substituting `$ENV:` placeholders from `envs`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for invalid TOML or JSON, and
    /// [`ConfigError::InvalidValue`] when a known key has the wrong type.
    /// I/O errors are returned as they are.
    ///
    /// [`ConfigError::Parse`]: crate::ConfigError::Parse
    /// [`ConfigError::InvalidValue`]: crate::ConfigError::InvalidValue
    pub async fn load(&self, envs: &IndexMap<String, String>) -> Result<ProjectManifest> {
        let mut value = self.read_value().await?;
        replace_env_vars(&mut value, envs);
        ProjectManifest::from_value(value)
    }
}

fn parse_manifest(path: &Path, content: &str) -> Result<Value> {
    let is_toml = path.extension().is_some_and(|ext| ext == "toml");

    let value = if is_toml {
        let toml_val: toml::Value = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: format!("invalid TOML syntax: {e}"),
        })?;
        serde_json::to_value(toml_val).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: format!("TOML to JSON conversion failed: {e}"),
        })?
    } else {
        serde_json::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: format!("invalid JSON: {e}"),
        })?
    };

    tracing::debug!(file = %path.display(), "parsed project manifest");
    Ok(value)
}
