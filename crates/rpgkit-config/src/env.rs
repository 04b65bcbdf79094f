//! Environment snapshot and mode-specific `.env` loading.
//!
//! The process environment is captured once into an [`Environment`] and
//! passed explicitly through the pipeline. Nothing here writes back to the
//! process environment.

use std::collections::HashMap;
use std::path::Path;

use indexmap::IndexMap;

use crate::error::{ConfigError, Result};
use crate::options::{Mode, ProjectType};

/// Project type selector; must be `rpg` or `mmorpg` when set
pub const RPG_TYPE_VAR: &str = "RPG_TYPE";

/// Server URL override
pub const SERVER_URL_VAR: &str = "VITE_SERVER_URL";

/// Resolved project type as seen by client-side code
pub const CLIENT_RPG_TYPE_VAR: &str = "VITE_RPG_TYPE";

/// Only variables with this prefix are exposed to manifest substitution
pub const ENV_PREFIX: &str = "VITE_";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Snapshot the current process environment.
    ///
    /// Variables whose name or value is not valid unicode are skipped.
    pub fn from_process() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Validate `RPG_TYPE`.
    ///
    /// Performs no I/O so callers can run it before touching the disk.
    pub fn project_type(&self) -> Result<Option<ProjectType>> {
        match self.get(RPG_TYPE_VAR) {
            None | Some("") => Ok(None),
            Some(value) => value.parse().map(Some),
        }
    }

    /// Load `VITE_*` variables for `mode`.
    ///
    /// Reads `.env`, `.env.local`, `.env.<mode>` and `.env.<mode>.local`
    /// from `dir`, later files overriding earlier ones. Process variables
    /// win over every file.
    ///
    /// Missing files are skipped; a file that cannot be parsed is an error.
    pub async fn load_mode_env(&self, dir: &Path, mode: Mode) -> Result<IndexMap<String, String>> {
        let mut merged = IndexMap::new();

        for name in env_files(mode) {
            let path = dir.join(&name);
            let content = match tokio::fs::read_to_string(&path).await {
                Ok(content) => content,
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => continue,
                Err(err) => return Err(err.into()),
            };

            tracing::debug!(file = %path.display(), "loading env file");
            for item in dotenvy::from_read_iter(content.as_bytes()) {
                let (key, value) = item.map_err(|err| ConfigError::Parse {
                    path: path.clone(),
                    message: err.to_string(),
                })?;
                if key.starts_with(ENV_PREFIX) {
                    merged.insert(key, value);
                }
            }
        }

        let mut process: Vec<_> = self
            .vars
            .iter()
            .filter(|(key, _)| key.starts_with(ENV_PREFIX))
            .collect();
        process.sort();
        for (key, value) in process {
            merged.insert(key.clone(), value.clone());
        }

        Ok(merged)
    }
}

impl<K, V> FromIterator<(K, V)> for Environment
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn env_files(mode: Mode) -> [String; 4] {
    [
        ".env".to_string(),
        ".env.local".to_string(),
        format!(".env.{mode}"),
        format!(".env.{mode}.local"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn empty_rpg_type_is_unset() {
        let env = Environment::default().with_var(RPG_TYPE_VAR, "");
        assert_eq!(env.project_type().unwrap(), None);
    }

    #[test]
    fn invalid_rpg_type_is_rejected() {
        let env = Environment::default().with_var(RPG_TYPE_VAR, "arcade");
        assert!(matches!(
            env.project_type(),
            Err(ConfigError::InvalidProjectType(_))
        ));
    }

    #[test]
    fn valid_rpg_type_is_parsed() {
        let env: Environment = [(RPG_TYPE_VAR, "rpg")].into_iter().collect();
        assert_eq!(env.project_type().unwrap(), Some(ProjectType::Rpg));
    }

    #[tokio::test]
    async fn mode_files_override_base_files() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(".env"),
            "VITE_API=base\nVITE_KEEP=kept\nSECRET=hidden\n",
        )
        .unwrap();
        fs::write(dir.path().join(".env.production"), "VITE_API=prod\n").unwrap();
        fs::write(dir.path().join(".env.development"), "VITE_API=dev\n").unwrap();

        let envs = Environment::default()
            .load_mode_env(dir.path(), Mode::Production)
            .await
            .unwrap();

        assert_eq!(envs.get("VITE_API").map(String::as_str), Some("prod"));
        assert_eq!(envs.get("VITE_KEEP").map(String::as_str), Some("kept"));
        assert!(!envs.contains_key("SECRET"));
    }

    #[tokio::test]
    async fn process_vars_win_over_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".env"), "VITE_API=file\n").unwrap();

        let env = Environment::default()
            .with_var("VITE_API", "process")
            .with_var("HOME", "/home/player");
        let envs = env.load_mode_env(dir.path(), Mode::Development).await.unwrap();

        assert_eq!(envs.get("VITE_API").map(String::as_str), Some("process"));
        assert!(!envs.contains_key("HOME"));
    }
}
