//! Replay-table parsing and raw security sector reconstruction.
//!
//! Dumping tools log the authentication probes they replayed against the
//! drive as a fixed-width table:
//!
//! ```text
//! RT CID MOD DATA          Drive Response
//! -- --- --- ------------- --------------------
//! <9 rows>
//! ```
//!
//! Rows 4..=7 carry the drive's angle responses. Writing those back into a
//! canonical sector restores the bytes that [`SecuritySector::clean`]
//! replaced, except the timing byte of each entry.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use xgd_core::XgdError;
use xgd_core::util::{hex_string, parse_hex};

use crate::security_sector::{SS_SIZE, SecuritySector, XgdGeneration};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Header line that introduces the replay table.
pub const REPLAY_TABLE_HEADER: &str = "RT CID MOD DATA          Drive Response";

/// Rows in a replay table.
pub const REPLAY_ROW_COUNT: usize = 9;

/// Rows shorter than this cannot hold the response column.
const MIN_ROW_WIDTH: usize = 44;

/// Text columns holding the 5-byte drive response.
const RESPONSE_COLUMNS: Range<usize> = 34..44;

/// Rows that carry angle responses.
const RESPONSE_ROWS: Range<usize> = 4..8;

pub const RESPONSE_LEN: usize = 5;

/// Byte within each response that depends on drive timing; never written.
const TIMING_BYTE: usize = 2;

/// Distance between replay entries in the sector.
const ENTRY_STRIDE: usize = 9;

/// Replay entry base for the XGD2 / XGD3 SSv1 layout.
const XGD2_REPLAY_BASE: usize = 0x204;

/// Replay entry base for the XGD3 SSv2 layout.
const SSV2_REPLAY_BASE: usize = 0x24;

impl XgdGeneration {
    /// Offset of replay entry 0, or `None` for XGD1, which has no replay table.
    pub fn replay_base(&self) -> Option<usize> {
        match self {
            Self::Xgd1 => None,
            Self::Xgd2 | Self::Xgd3Ssv1 => Some(XGD2_REPLAY_BASE),
            Self::Xgd3Ssv2 => Some(SSV2_REPLAY_BASE),
        }
    }
}

// ---------------------------------------------------------------------------
// Replay table
// ---------------------------------------------------------------------------

/// One decoded drive response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayRow {
    /// Row index within the table (4..=7).
    pub row: usize,
    pub response: [u8; RESPONSE_LEN],
}

/// A replay table located in a dumping tool's log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayTable {
    /// The nine table rows as they appear in the log.
    pub lines: Vec<String>,
    /// Decoded responses for rows 4..=7.
    pub responses: Vec<ReplayRow>,
}

impl ReplayTable {
    /// Find and decode the replay table in a log.
    pub fn parse(log_text: &str) -> Result<Self, XgdError> {
        let mut lines = log_text.lines();
        if !lines.by_ref().any(|line| line.contains(REPLAY_TABLE_HEADER)) {
            return Err(XgdError::parse("replay table header not found"));
        }
        if lines.next().is_none() {
            return Err(XgdError::parse("replay table ends after header"));
        }

        let rows: Vec<String> = lines.take(REPLAY_ROW_COUNT).map(str::to_string).collect();
        if rows.len() < REPLAY_ROW_COUNT {
            return Err(XgdError::parse(format!(
                "replay table has {} rows, expected {}",
                rows.len(),
                REPLAY_ROW_COUNT
            )));
        }
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.chars().count() < MIN_ROW_WIDTH)
        {
            return Err(XgdError::malformed(format!(
                "replay row {} is {} characters, expected at least {}",
                index,
                row.chars().count(),
                MIN_ROW_WIDTH
            )));
        }

        let responses = RESPONSE_ROWS
            .map(|index| decode_response(index, &rows[index]))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            lines: rows,
            responses,
        })
    }
}

fn decode_response(row: usize, line: &str) -> Result<ReplayRow, XgdError> {
    // Columns count characters; rows may carry non-ASCII text before the response
    let field: String = line
        .chars()
        .skip(RESPONSE_COLUMNS.start)
        .take(RESPONSE_COLUMNS.len())
        .collect();
    let bytes = parse_hex(&field)?;
    let response: [u8; RESPONSE_LEN] = bytes.try_into().map_err(|_| {
        XgdError::parse(format!("replay row {} response '{}' is not 5 bytes", row, field))
    })?;
    Ok(ReplayRow { row, response })
}

// ---------------------------------------------------------------------------
// Reconstruction
// ---------------------------------------------------------------------------

/// Outcome of a reconstruction request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReconstructStatus {
    /// Drive responses were written into the sector.
    Reconstructed,
    /// The sector was not canonical, so it is assumed to be raw already.
    AlreadyRaw,
    /// XGD1 sectors have no replay table.
    NotApplicable,
}

impl ReconstructStatus {
    pub fn description(&self) -> &'static str {
        match self {
            Self::Reconstructed => "reconstructed",
            Self::AlreadyRaw => "already raw, left unchanged",
            Self::NotApplicable => "no replay table for this generation, left unchanged",
        }
    }
}

impl SecuritySector {
    /// Decide whether reconstruction would be a no-op for this sector.
    ///
    /// Returns `Some(status)` when the sector must be left alone and `None`
    /// when a replay table should be applied.
    pub fn reconstruct_skip(&self) -> Result<Option<ReconstructStatus>, XgdError> {
        let generation = self.classify()?;
        if generation.replay_base().is_none() {
            return Ok(Some(ReconstructStatus::NotApplicable));
        }
        if !self.is_clean() {
            log::warn!(
                "{} security sector is not canonical; assuming it is already raw",
                generation
            );
            return Ok(Some(ReconstructStatus::AlreadyRaw));
        }
        Ok(None)
    }

    /// Restore drive-specific bytes from a tool log's replay table.
    ///
    /// On error the sector is left unmodified.
    pub fn reconstruct(&mut self, log_text: &str) -> Result<ReconstructStatus, XgdError> {
        if let Some(status) = self.reconstruct_skip()? {
            return Ok(status);
        }
        let table = ReplayTable::parse(log_text)?;
        self.apply_replay_table(&table)?;
        Ok(ReconstructStatus::Reconstructed)
    }

    /// Write the table's responses into the replay entries, skipping each
    /// entry's timing byte. Fails for XGD1.
    pub fn apply_replay_table(&mut self, table: &ReplayTable) -> Result<(), XgdError> {
        let generation = self.classify()?;
        let base = generation.replay_base().ok_or_else(|| {
            XgdError::unsupported(format!("{} has no replay table", generation))
        })?;

        if let Some(entry) = table
            .responses
            .iter()
            .find(|entry| base + ENTRY_STRIDE * entry.row + RESPONSE_LEN > SS_SIZE)
        {
            return Err(XgdError::malformed(format!(
                "replay row {} lies outside the security sector",
                entry.row
            )));
        }

        let data = self.bytes_mut();
        for entry in &table.responses {
            let offset = base + ENTRY_STRIDE * entry.row;
            log::debug!(
                "Replay row {} -> offset {}: {}",
                entry.row,
                offset,
                hex_string(&entry.response)
            );
            for (i, &byte) in entry.response.iter().enumerate() {
                if i != TIMING_BYTE {
                    data[offset + i] = byte;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/replay_tests.rs"]
mod tests;
