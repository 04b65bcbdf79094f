//! Miette diagnostic conversion for CLI errors.

use crate::error::CliError;
use miette::Report;
use rpgkit_config::ConfigError;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(e) => config_error_to_miette(e),
        CliError::NotBuilt(dir) => miette::miette!(
            help = "Fix the problem reported above and run the command again",
            "Configuration could not be built for {}",
            dir.display()
        ),
        _ => miette::miette!("{}", err),
    }
}

/// Convert a library error to miette Report
pub fn config_error_to_miette(err: ConfigError) -> Report {
    match err {
        ConfigError::InvalidProjectType(value) => miette::miette!(
            code = "rpgkit::invalid_type",
            help = "Set RPG_TYPE to `rpg` or `mmorpg`, or unset it",
            "Invalid project type: {value}"
        ),
        ConfigError::Parse { path, message } => miette::miette!(
            code = "rpgkit::parse",
            help = "Fix the syntax error in the file",
            "Failed to parse {}: {message}",
            path.display()
        ),
        ConfigError::AliasResolution {
            alias,
            specifier,
            message,
        } => miette::miette!(
            code = "rpgkit::alias",
            help = "Install rollup-plugin-node-polyfills in the project",
            "Cannot resolve `{specifier}` for alias `{alias}`: {message}"
        ),
        ConfigError::PackageJson { path, message } => miette::miette!(
            code = "rpgkit::package_json",
            help = "Run the command from the project root, next to package.json",
            "Cannot read {}: {message}",
            path.display()
        ),
        other => miette::miette!("Configuration error: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_type_carries_help() {
        let report = cli_error_to_miette(CliError::Config(ConfigError::InvalidProjectType(
            "arcade".to_string(),
        )));
        assert!(report.to_string().contains("arcade"));
        assert!(report.help().is_some());
    }

    #[test]
    fn generic_errors_keep_message() {
        let report = cli_error_to_miette(CliError::FileNotFound("/out/config.json".into()));
        assert_eq!(report.to_string(), "File not found: /out/config.json");
    }
}
