//! Layer geometry for multi-layer optical media.
//!
//! Each disc-information unit past the first layer describes one layer
//! transition. The layerbreak for a transition is the span stored in the
//! unit's format-dependent region, accumulated across units.

use serde::{Deserialize, Serialize};

use crate::XgdError;
use crate::util::read_be32;

/// Logical sector size used to convert layerbreaks into byte offsets.
pub const SECTOR_SIZE: u64 = 2048;

/// Offset of the layer-zero start address within the format-dependent region.
const LAYER_ZERO_OFFSET_FIELD: usize = 0x0C;

/// Offset of the layer end address within the format-dependent region.
const END_VALUE_FIELD: usize = 0x10;

/// Media with more than four layers is not defined; only three breaks are tracked.
const MAX_LAYERBREAKS: usize = 3;

/// One disc-information unit, as produced by a PIC deserializer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscInformationUnit {
    /// Unit sequence number within the block.
    pub sequence_number: u8,
    /// Disc type identifier (e.g. "BDO", "BDR").
    pub disc_type: String,
    /// Opaque format-dependent region. Only the two big-endian fields at
    /// 0x0C and 0x10 are interpreted here.
    pub format_dependent: Vec<u8>,
}

impl DiscInformationUnit {
    pub fn new(format_dependent: Vec<u8>) -> Self {
        Self {
            format_dependent,
            ..Self::default()
        }
    }

    fn field(&self, offset: usize, name: &str) -> Result<u32, XgdError> {
        read_be32(&self.format_dependent, offset).ok_or_else(|| {
            XgdError::malformed(format!(
                "disc information unit {} region is {} bytes, too short for {}",
                self.sequence_number,
                self.format_dependent.len(),
                name
            ))
        })
    }

    /// Start address of layer zero (big-endian u32 at 0x0C).
    pub fn layer_zero_offset(&self) -> Result<u32, XgdError> {
        self.field(LAYER_ZERO_OFFSET_FIELD, "layer zero offset")
    }

    /// End address of the layer (big-endian u32 at 0x10).
    pub fn end_value(&self) -> Result<u32, XgdError> {
        self.field(END_VALUE_FIELD, "end address")
    }

    /// Number of sectors this unit's layer contributes to the next layerbreak.
    pub fn layer_span(&self) -> Result<i64, XgdError> {
        Ok(i64::from(self.end_value()?) - i64::from(self.layer_zero_offset()?) + 2)
    }
}

/// Layerbreak addresses for media with up to four layers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layerbreaks {
    pub layerbreak1: Option<i64>,
    pub layerbreak2: Option<i64>,
    pub layerbreak3: Option<i64>,
}

impl Layerbreaks {
    /// Compute layerbreaks from an ordered list of disc-information units.
    ///
    /// Fewer than two units means single-layer media, which has no
    /// layerbreak and is not an error.
    pub fn from_units(units: &[DiscInformationUnit]) -> Result<Self, XgdError> {
        if units.len() < 2 {
            return Ok(Self::default());
        }

        let mut breaks = [None; MAX_LAYERBREAKS];
        let count = (units.len() - 1).min(MAX_LAYERBREAKS);
        let mut running = 0i64;
        for (slot, unit) in breaks.iter_mut().zip(&units[..count]) {
            running += unit.layer_span()?;
            *slot = Some(running);
        }

        log::debug!(
            "Computed layerbreaks from {} units: {:?}",
            units.len(),
            breaks
        );
        Ok(Self::from_array(breaks))
    }

    fn from_array(values: [Option<i64>; MAX_LAYERBREAKS]) -> Self {
        Self {
            layerbreak1: values[0],
            layerbreak2: values[1],
            layerbreak3: values[2],
        }
    }

    pub fn as_array(&self) -> [Option<i64>; MAX_LAYERBREAKS] {
        [self.layerbreak1, self.layerbreak2, self.layerbreak3]
    }

    /// Keep only layerbreaks that fit inside a disc of `total_bytes`.
    ///
    /// A value is accepted when it is positive, strictly greater than the last
    /// accepted layerbreak (zero for the first) and `value * 2048 < total_bytes`.
    /// Rejected values become `None`.
    pub fn validated(&self, total_bytes: u64) -> Self {
        let mut previous = 0i64;
        let mut accepted = [None; MAX_LAYERBREAKS];
        for (index, value) in self.as_array().into_iter().enumerate() {
            let Some(value) = value else { continue };
            let fits = u64::try_from(value)
                .ok()
                .and_then(|v| v.checked_mul(SECTOR_SIZE))
                .is_some_and(|bytes| bytes < total_bytes);
            if value > 0 && value > previous && fits {
                accepted[index] = Some(value);
                previous = value;
            } else {
                log::warn!(
                    "Rejecting layerbreak{} = {} for disc of {} bytes",
                    index + 1,
                    value,
                    total_bytes
                );
            }
        }
        Self::from_array(accepted)
    }

    /// True when no layerbreak is present (single-layer media).
    pub fn is_empty(&self) -> bool {
        self.as_array().iter().all(Option::is_none)
    }

    /// Number of layers implied by the present layerbreaks.
    pub fn layer_count(&self) -> usize {
        1 + self.as_array().iter().filter(|v| v.is_some()).count()
    }
}

#[cfg(test)]
#[path = "tests/disc_tests.rs"]
mod tests;
