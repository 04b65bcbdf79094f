//! Config command implementation.
//!
//! Composes the bundler configuration and prints it as JSON.

use crate::cli::ConfigArgs;
use crate::commands::utils;
use crate::error::Result;

pub async fn execute(args: ConfigArgs) -> Result<()> {
    let (_, config) = utils::compose(&args.target).await?;

    let json = if args.compact {
        serde_json::to_string(&config.value)?
    } else {
        serde_json::to_string_pretty(&config.value)?
    };

    utils::write_output(args.output.as_deref(), &json).await
}
