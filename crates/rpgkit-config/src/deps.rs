//! Dependency pre-bundling exclusions.
//!
//! First-party engine plugins may ship untranspiled sources that the
//! dependency optimizer cannot process, so they are excluded from
//! pre-bundling. The allow-listed core packages are known to be safe.

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ConfigError, Result};

pub const PACKAGE_JSON: &str = "package.json";

/// Packages pre-bundled even though they are first-party
pub const PREBUNDLE_ALLOW_LIST: &[&str] = &[
    "@rpgjs/server",
    "@rpgjs/client",
    "@rpgjs/common",
    "@rpgjs/database",
    "@rpgjs/tiled",
    "@rpgjs/types",
    "@rpgjs/standalone",
];

const FIRST_PARTY_SCOPE: &str = "@rpgjs";
const FIRST_PARTY_PREFIX: &str = "rpgjs-";

#[derive(Debug, Default, Deserialize)]
struct PackageManifest {
    #[serde(default)]
    dependencies: Option<IndexMap<String, Value>>,
}

/// Read the dependency names declared in `<cwd>/package.json`.
///
/// A missing or null `dependencies` field yields an empty list.
///
/// # Errors
///
/// [`ConfigError::PackageJson`] when the file is missing or is not valid JSON.
pub async fn read_dependencies(cwd: &Path) -> Result<Vec<String>> {
    let path = cwd.join(PACKAGE_JSON);
    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|err| ConfigError::PackageJson {
            path: path.clone(),
            message: err.to_string(),
        })?;

    let manifest: PackageManifest =
        serde_json::from_str(&content).map_err(|err| ConfigError::PackageJson {
            path: path.clone(),
            message: format!("invalid JSON: {err}"),
        })?;

    Ok(manifest
        .dependencies
        .unwrap_or_default()
        .into_keys()
        .collect())
}

pub fn is_first_party(name: &str) -> bool {
    name.starts_with(FIRST_PARTY_SCOPE) || name.starts_with(FIRST_PARTY_PREFIX)
}

/// First-party dependencies that must not be pre-bundled
pub fn excluded_dependencies<'a, I>(dependencies: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    dependencies
        .into_iter()
        .filter(|dep| !PREBUNDLE_ALLOW_LIST.contains(dep))
        .filter(|dep| is_first_party(dep))
        .map(str::to_string)
        .collect()
}

/// Caller exclusions first, then the scanned first-party packages
pub fn optimize_deps_exclude(caller: &[String], dependencies: &[String]) -> Vec<String> {
    let mut exclude = caller.to_vec();
    exclude.extend(excluded_dependencies(dependencies.iter().map(String::as_str)));
    exclude
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn allow_listed_and_third_party_are_kept() {
        let excluded =
            excluded_dependencies(["@rpgjs/client", "@rpgjs/foo-plugin", "lodash"]);
        assert_eq!(excluded, vec!["@rpgjs/foo-plugin".to_string()]);
    }

    #[test]
    fn prefixed_packages_are_first_party() {
        let excluded = excluded_dependencies(["rpgjs-chat", "my-rpgjs-tool", "@rpgjs/tiled"]);
        assert_eq!(excluded, vec!["rpgjs-chat".to_string()]);
    }

    #[test]
    fn caller_exclusions_come_first() {
        let exclude = optimize_deps_exclude(
            &["three".to_string()],
            &["@rpgjs/gamepad".to_string(), "pixi.js".to_string()],
        );
        assert_eq!(exclude, vec!["three".to_string(), "@rpgjs/gamepad".to_string()]);
    }

    #[tokio::test]
    async fn reads_dependency_names_in_order() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(PACKAGE_JSON),
            r#"{"name":"game","dependencies":{"@rpgjs/client":"^4.0.0","@rpgjs/foo-plugin":"^1.0.0","lodash":"^4.17.0"}}"#,
        )
        .unwrap();

        let deps = read_dependencies(dir.path()).await.unwrap();
        assert_eq!(deps, vec!["@rpgjs/client", "@rpgjs/foo-plugin", "lodash"]);
    }

    #[tokio::test]
    async fn missing_package_json_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = read_dependencies(dir.path()).await.unwrap_err();
        assert!(matches!(err, ConfigError::PackageJson { .. }));
    }

    #[tokio::test]
    async fn package_without_dependencies_is_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PACKAGE_JSON), r#"{"name":"game"}"#).unwrap();
        assert!(read_dependencies(dir.path()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn null_dependencies_are_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(PACKAGE_JSON),
            r#"{"name":"game","dependencies":null}"#,
        )
        .unwrap();
        assert!(read_dependencies(dir.path()).await.unwrap().is_empty());
    }
}
