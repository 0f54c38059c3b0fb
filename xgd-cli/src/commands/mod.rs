pub(crate) mod config;
pub(crate) mod layerbreak;
pub(crate) mod sector;

use serde_json::Value;

use crate::error::CliError;

/// Print a JSON document to stdout.
pub(crate) fn print_json(value: &Value) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
