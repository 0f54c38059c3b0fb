//! File-level operations for Xbox disc metadata.
//!
//! Wraps the security sector codec and the layerbreak calculator with the
//! file handling a dumping pipeline needs: reading sector and PIC dumps,
//! rewriting sectors in place with backups, and loading settings.

pub mod layerbreak;
pub mod sector_file;
pub mod settings;

pub use layerbreak::{image_size, layerbreaks_from_pic, read_disc_information};
pub use sector_file::{
    CleanReport, ReconstructReport, WriteOptions, check_clean_file, classify_file, clean_file,
    ranges_file, read_security_sector, reconstruct_file, write_security_sector,
};
pub use settings::{Settings, load_settings_from, settings_path};

// Re-export codec types so frontends only need this crate
pub use xgd_core::util::format_bytes_approx;
pub use xgd_core::{Layerbreaks, XgdError};
pub use xgd_microsoft::{
    ReconstructStatus, SectorRange, SecurityRanges, SecuritySector, XgdGeneration,
};
