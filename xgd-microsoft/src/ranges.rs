//! Logical address ranges occupied by the security sector region.
//!
//! The sector stores a table of start/end physical sector numbers (PSN).
//! Layer 1 runs opposite to layer 0, so its PSNs are stored complemented
//! and must be mirrored around the layerbreak to get a logical address.

use std::fmt;

use serde::{Deserialize, Serialize};
use xgd_core::XgdError;
use xgd_core::util::read_be24;

use crate::security_sector::{SecuritySector, XgdGeneration};

/// First entry of the range table.
const RANGE_TABLE_OFFSET: usize = 1636;

/// Each entry is 9 bytes; start PSN at +0, end PSN at +3.
const RANGE_ENTRY_STRIDE: usize = 9;
const RANGE_END_OFFSET: usize = 3;

/// PSN of logical sector 0.
const LAYER0_START_PSN: i64 = 0x030000;

/// Layer 0 length in sectors.
const XGD1_LAYER0_SECTORS: i64 = 1_913_776;
const XGD2_LAYER0_SECTORS: i64 = 1_913_760;

/// Complement mask for layer 1 PSNs.
const PSN_MASK: i64 = 0xFF_FFFF;

/// Table slots reported for XGD2/XGD3; the middle two are drive bookkeeping.
const XGD2_REPORTED_SLOTS: [usize; 2] = [0, 3];

impl XgdGeneration {
    /// Number of entries in the range table.
    pub fn range_count(&self) -> usize {
        match self {
            Self::Xgd1 => 16,
            _ => 4,
        }
    }

    /// First PSN that belongs to layer 1.
    pub fn layer_one_threshold(&self) -> i64 {
        let layer0 = match self {
            Self::Xgd1 => XGD1_LAYER0_SECTORS,
            _ => XGD2_LAYER0_SECTORS,
        };
        layer0 + LAYER0_START_PSN
    }

    /// Convert a physical sector number to a logical address.
    pub fn psn_to_lba(&self, psn: u32) -> i64 {
        let psn = i64::from(psn);
        let threshold = self.layer_one_threshold();
        if psn < threshold {
            psn - LAYER0_START_PSN
        } else {
            2 * threshold - (psn ^ PSN_MASK) - LAYER0_START_PSN - 1
        }
    }
}

/// An inclusive logical address range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SectorRange {
    pub start: i64,
    pub end: i64,
}

impl fmt::Display for SectorRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Every range in a sector's table, in table order (sorted for XGD1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityRanges {
    pub generation: XgdGeneration,
    pub ranges: Vec<SectorRange>,
}

impl SecurityRanges {
    /// The ranges that belong in catalog metadata.
    ///
    /// XGD1 reports all 16; XGD2/XGD3 report table slots 0 and 3.
    pub fn reported(&self) -> Vec<SectorRange> {
        match self.generation {
            XgdGeneration::Xgd1 => self.ranges.clone(),
            _ => XGD2_REPORTED_SLOTS
                .iter()
                .filter_map(|&slot| self.ranges.get(slot).copied())
                .collect(),
        }
    }
}

impl fmt::Display for SecurityRanges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.reported().iter().map(|r| r.to_string()).collect();
        f.write_str(&lines.join("\n"))
    }
}

impl SecuritySector {
    /// Read and convert the security range table.
    pub fn ranges(&self) -> Result<SecurityRanges, XgdError> {
        let generation = self.classify()?;
        let data = self.as_bytes();

        let mut ranges: Vec<SectorRange> = (0..generation.range_count())
            .map(|index| {
                let entry = RANGE_TABLE_OFFSET + index * RANGE_ENTRY_STRIDE;
                SectorRange {
                    start: generation.psn_to_lba(read_be24(data, entry)),
                    end: generation.psn_to_lba(read_be24(data, entry + RANGE_END_OFFSET)),
                }
            })
            .collect();

        // XGD1 tables are not stored in order
        if generation == XgdGeneration::Xgd1 {
            ranges.sort_by_key(|r| r.start);
        }

        Ok(SecurityRanges { generation, ranges })
    }
}

#[cfg(test)]
#[path = "tests/ranges_tests.rs"]
mod tests;
