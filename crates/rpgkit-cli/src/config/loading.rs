use crate::cli::TargetArgs;
use crate::config::LayeredOptions;
use crate::error::Result;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use rpgkit_config::{BuildOptions, DevServerOptions};
use serde::Serialize;
use std::path::PathBuf;

/// Environment variables with this prefix feed the option layer
pub const ENV_PREFIX: &str = "RPGKIT_";

/// Only the flags actually passed on the command line
#[derive(Debug, Default, Serialize)]
struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    side: Option<rpgkit_config::Side>,

    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<rpgkit_config::Mode>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    project_type: Option<rpgkit_config::ProjectType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    serve_mode: Option<bool>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    optimize_deps_exclude: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    plugin_entry: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    server_entry: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    host: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    port: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    log_level: Option<String>,
}

impl From<&TargetArgs> for CliOverrides {
    fn from(args: &TargetArgs) -> Self {
        let serve_mode = match (args.build, args.serve) {
            (true, _) => Some(false),
            (_, true) => Some(true),
            _ => None,
        };

        Self {
            side: args.side.map(Into::into),
            mode: args.mode.map(Into::into),
            project_type: args.project_type.map(Into::into),
            serve_mode,
            optimize_deps_exclude: args.exclude.clone(),
            plugin_entry: args.plugin_entry.clone(),
            server_entry: args.server_entry.clone(),
            host: args.host.clone(),
            port: args.port,
            log_level: args.log_level.clone(),
        }
    }
}

impl LayeredOptions {
    /// Load options from defaults, `RPGKIT_*` variables and flags.
    pub fn load(args: &TargetArgs) -> Result<Self> {
        Self::figment(args).extract().map_err(Into::into)
    }

    /// The provider stack, lowest priority first.
    pub fn figment(args: &TargetArgs) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(LayeredOptions::default()))
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(CliOverrides::from(args)))
    }

    pub fn into_build_options(self) -> BuildOptions {
        let mut options = BuildOptions::new(self.side, self.mode, self.project_type);
        options.serve_mode = self.serve_mode;
        options.optimize_deps_exclude = self.optimize_deps_exclude;
        options.server_entry = self.server_entry;
        if let Some(entry) = self.plugin_entry {
            options = options.with_plugin_entry(entry);
        }

        if self.host.is_some() || self.port.is_some() || self.log_level.is_some() {
            options.server = Some(DevServerOptions {
                host: self.host,
                port: self.port,
                loglevel: self.log_level,
                ..Default::default()
            });
        }

        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli;
    use figment::Jail;
    use rpgkit_config::{Mode, ProjectType, Side};

    #[test]
    fn defaults_without_flags_or_env() {
        Jail::expect_with(|_| {
            let options = LayeredOptions::load(&TargetArgs::default()).unwrap();
            assert_eq!(options, LayeredOptions::default());

            let build = options.into_build_options();
            assert_eq!(build.side, Side::Client);
            assert_eq!(build.mode, Mode::Development);
            assert_eq!(build.project_type, ProjectType::Mmorpg);
            assert!(build.serve_mode.is_none());
            assert!(build.server.is_none());
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.set_env("RPGKIT_SIDE", "server");
            jail.set_env("RPGKIT_TYPE", "rpg");
            jail.set_env("RPGKIT_SERVE_MODE", "false");

            let options = LayeredOptions::load(&TargetArgs::default()).unwrap();
            assert_eq!(options.side, Side::Server);
            assert_eq!(options.project_type, ProjectType::Rpg);
            assert_eq!(options.serve_mode, Some(false));
            Ok(())
        });
    }

    #[test]
    fn flags_override_environment() {
        Jail::expect_with(|jail| {
            jail.set_env("RPGKIT_SIDE", "server");
            jail.set_env("RPGKIT_MODE", "test");

            let args = TargetArgs {
                side: Some(cli::Side::Client),
                serve: true,
                port: Some(3000),
                ..Default::default()
            };
            let options = LayeredOptions::load(&args).unwrap();
            assert_eq!(options.side, Side::Client);
            assert_eq!(options.mode, Mode::Test);
            assert_eq!(options.serve_mode, Some(true));

            let build = options.into_build_options();
            assert_eq!(build.server.and_then(|s| s.port), Some(3000));
            Ok(())
        });
    }

    #[test]
    fn invalid_environment_value_is_an_options_error() {
        Jail::expect_with(|jail| {
            jail.set_env("RPGKIT_SIDE", "both");
            let err = LayeredOptions::load(&TargetArgs::default()).unwrap_err();
            assert!(matches!(err, crate::CliError::Options { .. }));
            Ok(())
        });
    }

    #[test]
    fn plugin_entry_becomes_descriptor() {
        let options = LayeredOptions {
            plugin_entry: Some("src/plugin.ts".to_string()),
            ..Default::default()
        };
        let build = options.into_build_options();
        assert_eq!(build.plugin.map(|p| p.entry), Some("src/plugin.ts".to_string()));
    }
}
