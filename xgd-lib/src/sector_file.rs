//! File-level security sector operations.
//!
//! Each operation reads the sector file once and, when it changes the
//! sector, writes it back once through a temp file. An optional `.bak`
//! copy of the original is made before the first rewrite.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use xgd_core::XgdError;
use xgd_microsoft::{ReconstructStatus, SecurityRanges, SecuritySector, XgdGeneration};

/// Options controlling in-place rewrites.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Whether to create a `.bak` copy before modifying a file.
    pub create_backup: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            create_backup: true,
        }
    }
}

/// Result of cleaning a sector file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanReport {
    pub generation: XgdGeneration,
    /// False when the file was already canonical and was not rewritten.
    pub changed: bool,
    /// Backup created by this call, if any.
    pub backup: Option<PathBuf>,
}

/// Result of reconstructing a sector file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconstructReport {
    pub status: ReconstructStatus,
    pub backup: Option<PathBuf>,
}

/// Backup path for a file: `ss.bin` becomes `ss.bin.bak`.
pub fn backup_path(path: &Path) -> PathBuf {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => path.with_extension(format!("{}.bak", ext)),
        None => path.with_extension("bak"),
    }
}

/// Read a security sector file, which must be exactly 2048 bytes.
pub fn read_security_sector(path: &Path) -> Result<SecuritySector, XgdError> {
    let bytes = fs::read(path)?;
    SecuritySector::from_bytes(&bytes).map_err(|e| match e {
        XgdError::MalformedInput(msg) => {
            XgdError::malformed(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })
}

/// Write a sector back to `path`, making a backup first if requested.
///
/// Returns the backup path when this call created one. An existing backup
/// is never overwritten, so it always holds the oldest copy.
pub fn write_security_sector(
    path: &Path,
    sector: &SecuritySector,
    options: &WriteOptions,
) -> Result<Option<PathBuf>, XgdError> {
    let mut backup = None;
    if options.create_backup {
        let bak_path = backup_path(path);
        if !bak_path.exists() {
            fs::copy(path, &bak_path)?;
            log::debug!("Created backup {}", bak_path.display());
            backup = Some(bak_path);
        }
    }

    let tmp_path = path.with_extension("ss_tmp");
    if let Err(e) = replace_via_temp(path, &tmp_path, sector.as_bytes()) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    Ok(backup)
}

/// Write `bytes` to `tmp_path`, then rename it over `path`.
fn replace_via_temp(path: &Path, tmp_path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut tmp = fs::File::create(tmp_path)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    drop(tmp);
    fs::rename(tmp_path, path)
}

/// Classify the sector stored in a file.
pub fn classify_file(path: &Path) -> Result<XgdGeneration, XgdError> {
    read_security_sector(path)?.classify()
}

/// Check whether a sector file is already in canonical form.
pub fn check_clean_file(path: &Path) -> Result<bool, XgdError> {
    Ok(read_security_sector(path)?.is_clean())
}

/// Read the security range table from a sector file.
pub fn ranges_file(path: &Path) -> Result<SecurityRanges, XgdError> {
    read_security_sector(path)?.ranges()
}

/// Clean a sector file in place. Files that are already canonical are not rewritten.
pub fn clean_file(path: &Path, options: &WriteOptions) -> Result<CleanReport, XgdError> {
    let original = read_security_sector(path)?;
    let mut sector = original.clone();
    let generation = sector.clean()?;

    if sector == original {
        log::debug!("{} is already canonical", path.display());
        return Ok(CleanReport {
            generation,
            changed: false,
            backup: None,
        });
    }

    let backup = write_security_sector(path, &sector, options)?;
    log::debug!("Cleaned {} security sector {}", generation, path.display());
    Ok(CleanReport {
        generation,
        changed: true,
        backup,
    })
}

/// Rebuild a raw sector file from a tool log's replay table.
///
/// The log is only read when the sector is eligible for reconstruction, so
/// XGD1 and non-canonical sectors succeed even without a log.
pub fn reconstruct_file(
    ss_path: &Path,
    log_path: &Path,
    options: &WriteOptions,
) -> Result<ReconstructReport, XgdError> {
    let mut sector = read_security_sector(ss_path)?;
    if let Some(status) = sector.reconstruct_skip()? {
        log::debug!("{}: {}", ss_path.display(), status.description());
        return Ok(ReconstructReport {
            status,
            backup: None,
        });
    }

    let log_text = read_log(log_path)?;
    let status = sector.reconstruct(&log_text)?;
    let backup = write_security_sector(ss_path, &sector, options)?;
    log::debug!("{}: {}", ss_path.display(), status.description());
    Ok(ReconstructReport { status, backup })
}

/// Read a tool log as text. Logs are not always valid UTF-8, so invalid
/// sequences are replaced rather than rejected.
fn read_log(path: &Path) -> Result<String, XgdError> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
