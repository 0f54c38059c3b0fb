//! Xbox security sector (SS) container and generation classifier.
//!
//! The security sector is a 2048-byte block whose fields are positional.
//! Which offsets mean what depends on the disc generation, so every
//! operation classifies the sector first and picks its layout from the
//! resulting [`XgdGeneration`].

use std::fmt;

use serde::{Deserialize, Serialize};
use xgd_core::XgdError;
use xgd_core::util::read_be24;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Size of a security sector in bytes.
pub const SS_SIZE: usize = 2048;

/// The generation marker is a 24-bit big-endian value at this offset.
const MARKER_OFFSET: usize = 13;

const XGD1_MARKER: u32 = 0x2033AF;
const XGD2_MARKER: u32 = 0x20339F;
const XGD3_MARKER: u32 = 0x238E0F;

/// XGD3 sectors carry their replay entries inside this span only in the
/// SSv2 layout; SSv1 leaves it zeroed.
const SSV2_PROBE_START: usize = 32;
const SSV2_PROBE_LEN: usize = 72;

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Xbox disc security generation, with the XGD3 layout variant resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum XgdGeneration {
    /// Original Xbox.
    Xgd1,
    /// Early Xbox 360.
    Xgd2,
    /// Later Xbox 360, SSv1 layout (same offsets as XGD2).
    Xgd3Ssv1,
    /// Later Xbox 360, SSv2 layout (replay entries shifted down by 480 bytes).
    Xgd3Ssv2,
}

impl XgdGeneration {
    /// Classify a raw buffer. Anything other than a full sector is rejected.
    pub fn from_sector_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != SS_SIZE {
            log::debug!(
                "Refusing to classify {} byte buffer (need {})",
                bytes.len(),
                SS_SIZE
            );
            return None;
        }
        match read_be24(bytes, MARKER_OFFSET) {
            XGD1_MARKER => Some(Self::Xgd1),
            XGD2_MARKER => Some(Self::Xgd2),
            XGD3_MARKER => {
                let probe = &bytes[SSV2_PROBE_START..SSV2_PROBE_START + SSV2_PROBE_LEN];
                if probe.iter().any(|&b| b != 0) {
                    Some(Self::Xgd3Ssv2)
                } else {
                    Some(Self::Xgd3Ssv1)
                }
            }
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Xgd1 => "XGD1",
            Self::Xgd2 => "XGD2",
            Self::Xgd3Ssv1 => "XGD3 (SSv1)",
            Self::Xgd3Ssv2 => "XGD3 (SSv2)",
        }
    }

    /// Disc-level generation number (1, 2 or 3).
    pub fn disc_generation(&self) -> u8 {
        match self {
            Self::Xgd1 => 1,
            Self::Xgd2 => 2,
            Self::Xgd3Ssv1 | Self::Xgd3Ssv2 => 3,
        }
    }

    /// True for the SSv2 layout, whose canonical bytes start at offset 72.
    pub fn is_ssv2(&self) -> bool {
        matches!(self, Self::Xgd3Ssv2)
    }
}

impl fmt::Display for XgdGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Security sector
// ---------------------------------------------------------------------------

/// An owned 2048-byte security sector.
#[derive(Clone, PartialEq, Eq)]
pub struct SecuritySector {
    data: [u8; SS_SIZE],
}

impl SecuritySector {
    pub fn new(data: [u8; SS_SIZE]) -> Self {
        Self { data }
    }

    /// Copy a security sector out of a byte slice that must be exactly 2048 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, XgdError> {
        let data: [u8; SS_SIZE] = bytes.try_into().map_err(|_| {
            XgdError::malformed(format!(
                "security sector must be {} bytes, got {}",
                SS_SIZE,
                bytes.len()
            ))
        })?;
        Ok(Self { data })
    }

    pub fn as_bytes(&self) -> &[u8; SS_SIZE] {
        &self.data
    }

    pub fn into_bytes(self) -> [u8; SS_SIZE] {
        self.data
    }

    pub(crate) fn bytes_mut(&mut self) -> &mut [u8; SS_SIZE] {
        &mut self.data
    }

    /// The raw 24-bit generation marker at offset 13.
    pub fn marker(&self) -> u32 {
        read_be24(&self.data, MARKER_OFFSET)
    }

    /// The generation of this sector, or `None` if the marker is unknown.
    pub fn generation(&self) -> Option<XgdGeneration> {
        XgdGeneration::from_sector_bytes(&self.data)
    }

    /// Like [`generation`](Self::generation), but an unknown marker is an error.
    pub fn classify(&self) -> Result<XgdGeneration, XgdError> {
        self.generation().ok_or_else(|| {
            log::debug!("Unrecognized security sector marker 0x{:06X}", self.marker());
            XgdError::Classification {
                marker: self.marker(),
            }
        })
    }
}

impl fmt::Debug for SecuritySector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecuritySector")
            .field("marker", &format_args!("0x{:06X}", self.marker()))
            .field("generation", &self.generation())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/security_sector_tests.rs"]
mod tests;
