//! Shared fixtures for pipeline tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use rpgkit_config::{ConfigBuilder, Environment, ErrorCode, ErrorReporter, ModuleResolver};
use tempfile::TempDir;

/// Resolves every specifier to a fake path under `/node_modules`
pub struct FakeResolver;

impl ModuleResolver for FakeResolver {
    fn resolve(&self, _from: &Path, specifier: &str) -> Result<PathBuf, String> {
        Ok(PathBuf::from("/node_modules").join(format!("{specifier}.js")))
    }
}

/// Remembers reported codes and messages
#[derive(Default)]
pub struct RecordingReporter {
    pub reports: Mutex<Vec<(ErrorCode, String)>>,
}

impl RecordingReporter {
    pub fn codes(&self) -> Vec<ErrorCode> {
        self.reports.lock().unwrap().iter().map(|(c, _)| *c).collect()
    }
}

impl ErrorReporter for RecordingReporter {
    fn report(&self, code: ErrorCode, error: &(dyn std::error::Error + 'static)) {
        self.reports.lock().unwrap().push((code, error.to_string()));
    }
}

pub struct Project {
    pub dir: TempDir,
}

impl Project {
    /// A project with `package.json` and `index.html`
    pub fn new() -> Self {
        let project = Self::bare();
        project.write(
            "package.json",
            r#"{
  "name": "my-game",
  "dependencies": {
    "@rpgjs/client": "^4.0.0",
    "@rpgjs/server": "^4.0.0",
    "@rpgjs/foo-plugin": "^1.0.0",
    "rpgjs-chat": "^0.2.0",
    "pixi.js": "^7.0.0"
  }
}"#,
        );
        project.write("index.html", "<!doctype html><div id=\"rpg\"></div>");
        project
    }

    /// An empty directory
    pub fn bare() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, name: &str, content: &str) -> &Self {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
        self
    }

    pub fn remove(&self, name: &str) {
        fs::remove_file(self.dir.path().join(name)).unwrap();
    }

    /// Builder with an empty environment and the fake resolver
    pub fn builder(&self) -> ConfigBuilder {
        self.builder_with_env(Environment::default())
    }

    pub fn builder_with_env(&self, env: Environment) -> ConfigBuilder {
        ConfigBuilder::new(self.path())
            .env(env)
            .resolver(Arc::new(FakeResolver))
    }
}
