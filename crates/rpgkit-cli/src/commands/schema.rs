//! Schema command implementation.

use rpgkit_config::ProjectManifest;

use crate::cli::SchemaArgs;
use crate::commands::utils;
use crate::error::Result;

/// JSON schema of `rpg.toml` / `rpg.json`
pub fn manifest_schema() -> Result<serde_json::Value> {
    let schema = schemars::schema_for!(ProjectManifest);
    Ok(serde_json::to_value(schema)?)
}

pub async fn execute(args: SchemaArgs) -> Result<()> {
    let json = serde_json::to_string_pretty(&manifest_schema()?)?;
    utils::write_output(args.output.as_deref(), &json).await
}
