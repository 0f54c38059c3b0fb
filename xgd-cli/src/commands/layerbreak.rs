use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use serde_json::json;
use xgd_lib::format_bytes_approx;

use super::print_json;
use crate::error::CliError;

/// Compute and print the layerbreaks recorded in a PIC file.
///
/// The disc size comes from `--size` or from the size of `--image`.
pub(crate) fn run_layerbreak(
    pic: &Path,
    size: Option<u64>,
    image: Option<&Path>,
    json: bool,
) -> Result<(), CliError> {
    let total_bytes = match (size, image) {
        (Some(size), _) => size,
        (None, Some(image)) => xgd_lib::image_size(image)?,
        (None, None) => {
            return Err(CliError::usage(
                "layerbreak needs the disc size: pass --size or --image",
            ));
        }
    };

    let layerbreaks = xgd_lib::layerbreaks_from_pic(pic, total_bytes)?;

    if json {
        return print_json(&json!({
            "path": pic.display().to_string(),
            "total_bytes": total_bytes,
            "layers": layerbreaks.layer_count(),
            "layerbreaks": layerbreaks.as_array(),
        }));
    }

    println!(
        "{} ({} layer{}, {} disc)",
        pic.display().if_supports_color(Stdout, |t| t.cyan()),
        layerbreaks.layer_count(),
        if layerbreaks.layer_count() == 1 { "" } else { "s" },
        format_bytes_approx(total_bytes),
    );
    if layerbreaks.is_empty() {
        println!(
            "  {}",
            "no layerbreak".if_supports_color(Stdout, |t| t.dimmed())
        );
        return Ok(());
    }
    for (i, value) in layerbreaks.as_array().iter().enumerate() {
        if let Some(value) = value {
            println!("  Layerbreak {}: {}", i + 1, value);
        }
    }
    Ok(())
}
