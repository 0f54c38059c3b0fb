//! Layerbreak calculation from PIC dumps.

use std::fs;
use std::path::Path;

use xgd_core::{DiscInformation, Layerbreaks, XgdError, parse_disc_information};

/// Read and parse a PIC / disc-information file.
pub fn read_disc_information(path: &Path) -> Result<DiscInformation, XgdError> {
    let bytes = fs::read(path)?;
    parse_disc_information(&bytes)
}

/// Size of a disc image in bytes.
pub fn image_size(path: &Path) -> Result<u64, XgdError> {
    Ok(fs::metadata(path)?.len())
}

/// Compute layerbreaks from a PIC file and keep only those that fit a disc
/// of `total_bytes`.
pub fn layerbreaks_from_pic(pic_path: &Path, total_bytes: u64) -> Result<Layerbreaks, XgdError> {
    let info = read_disc_information(pic_path)?;
    let computed = Layerbreaks::from_units(&info.units)?;
    let accepted = computed.validated(total_bytes);
    if accepted != computed {
        log::warn!(
            "{}: dropped layerbreaks outside a {} byte disc",
            pic_path.display(),
            total_bytes
        );
    }
    Ok(accepted)
}
