use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use serde_json::json;
use xgd_lib::Settings;

use super::print_json;
use crate::error::CliError;

/// Show the settings file location and the effective settings.
pub(crate) fn run_config_show(settings: &Settings, json: bool) -> Result<(), CliError> {
    let path = xgd_lib::settings_path();

    if json {
        return print_json(&json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "settings": settings,
        }));
    }

    println!("{}", "xgd Settings".if_supports_color(Stdout, |t| t.bold()));
    println!();
    if path.exists() {
        println!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        println!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    println!();
    for line in xgd_lib::settings::settings_string(settings).lines() {
        println!("  {}", line);
    }
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path(json: bool) -> Result<(), CliError> {
    let path = xgd_lib::settings_path();
    if json {
        return print_json(&json!({ "path": path.display().to_string() }));
    }
    println!("{}", path.display());
    Ok(())
}
