use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use serde_json::json;
use xgd_lib::WriteOptions;

use super::print_json;
use crate::error::CliError;

/// Print the generation of a security sector file.
pub(crate) fn run_classify(path: &Path, json: bool) -> Result<(), CliError> {
    let sector = xgd_lib::read_security_sector(path)?;
    let generation = sector.classify()?;

    if json {
        return print_json(&json!({
            "path": path.display().to_string(),
            "generation": generation,
            "name": generation.name(),
            "disc_generation": generation.disc_generation(),
            "marker": format!("{:06X}", sector.marker()),
            "clean": sector.is_clean(),
        }));
    }

    println!(
        "{}: {}",
        path.display().if_supports_color(Stdout, |t| t.cyan()),
        generation.name().if_supports_color(Stdout, |t| t.bold()),
    );
    Ok(())
}

/// Clean a security sector file in place, or with `check` only report
/// whether it is already canonical.
pub(crate) fn run_clean(
    path: &Path,
    check: bool,
    options: &WriteOptions,
    json: bool,
) -> Result<(), CliError> {
    if check {
        let clean = xgd_lib::check_clean_file(path)?;
        if json {
            print_json(&json!({
                "path": path.display().to_string(),
                "clean": clean,
            }))?;
        } else if clean {
            println!(
                "{}: {}",
                path.display().if_supports_color(Stdout, |t| t.cyan()),
                "canonical".if_supports_color(Stdout, |t| t.green()),
            );
        }
        return if clean {
            Ok(())
        } else {
            Err(CliError::NotCanonical(path.to_path_buf()))
        };
    }

    let report = xgd_lib::clean_file(path, options)?;

    if json {
        return print_json(&json!({
            "path": path.display().to_string(),
            "generation": report.generation,
            "changed": report.changed,
            "backup": report.backup.map(|p| p.display().to_string()),
        }));
    }

    let status = if report.changed {
        "cleaned".if_supports_color(Stdout, |t| t.green()).to_string()
    } else {
        "already canonical"
            .if_supports_color(Stdout, |t| t.dimmed())
            .to_string()
    };
    println!(
        "{}: {} ({})",
        path.display().if_supports_color(Stdout, |t| t.cyan()),
        status,
        report.generation,
    );
    if let Some(backup) = report.backup {
        println!("  Backup: {}", backup.display());
    }
    Ok(())
}

/// Print the logical ranges of a security sector file, one `start-end` per line.
pub(crate) fn run_ranges(path: &Path, json: bool) -> Result<(), CliError> {
    let ranges = xgd_lib::ranges_file(path)?;

    if json {
        return print_json(&json!({
            "path": path.display().to_string(),
            "generation": ranges.generation,
            "ranges": ranges.reported(),
        }));
    }

    for range in ranges.reported() {
        println!("{}", range);
    }
    Ok(())
}

/// Rebuild a raw security sector from a tool log's replay table.
pub(crate) fn run_reconstruct(
    ss_path: &Path,
    log_path: &Path,
    options: &WriteOptions,
    json: bool,
) -> Result<(), CliError> {
    let report = xgd_lib::reconstruct_file(ss_path, log_path, options)?;

    if json {
        return print_json(&json!({
            "path": ss_path.display().to_string(),
            "status": report.status,
            "backup": report.backup.map(|p| p.display().to_string()),
        }));
    }

    let status = match report.status {
        xgd_lib::ReconstructStatus::Reconstructed => report
            .status
            .description()
            .if_supports_color(Stdout, |t| t.green())
            .to_string(),
        _ => report
            .status
            .description()
            .if_supports_color(Stdout, |t| t.dimmed())
            .to_string(),
    };
    println!(
        "{}: {}",
        ss_path.display().if_supports_color(Stdout, |t| t.cyan()),
        status,
    );
    if let Some(backup) = report.backup {
        println!("  Backup: {}", backup.display());
    }
    Ok(())
}
