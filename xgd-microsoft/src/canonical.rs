//! Canonical form for security sectors.
//!
//! Drives return different per-challenge response bytes for the same disc.
//! Cleaning overwrites those bytes with fixed values so two dumps of one
//! disc compare equal; [`SecuritySector::is_clean`] checks the same table.

use xgd_core::XgdError;

use crate::security_sector::{SecuritySector, XgdGeneration};

/// XGD2: four primary pairs at base 552, plus four zeroed secondary pairs.
const XGD2_CANONICAL: &[(usize, u8)] = &[
    (552, 0x01),
    (553, 0x00),
    (555, 0x00),
    (556, 0x00),
    (561, 0x5B),
    (562, 0x00),
    (564, 0x00),
    (565, 0x00),
    (570, 0xB5),
    (571, 0x00),
    (573, 0x00),
    (574, 0x00),
    (579, 0x0F),
    (580, 0x01),
    (582, 0x00),
    (583, 0x00),
];

/// XGD3 SSv1: primary pairs only. The secondary pairs are left as dumped.
const XGD3_SSV1_CANONICAL: &[(usize, u8)] = &[
    (552, 0x01),
    (553, 0x00),
    (561, 0x5B),
    (562, 0x00),
    (570, 0xB5),
    (571, 0x00),
    (579, 0x0F),
    (580, 0x01),
];

/// XGD3 SSv2: base 72, secondary pairs repeat the primary values.
const XGD3_SSV2_CANONICAL: &[(usize, u8)] = &[
    (72, 0x01),
    (73, 0x00),
    (75, 0x01),
    (76, 0x00),
    (81, 0x5B),
    (82, 0x00),
    (84, 0x5B),
    (85, 0x00),
    (90, 0xB5),
    (91, 0x00),
    (93, 0xB5),
    (94, 0x00),
    (99, 0x0F),
    (100, 0x01),
    (102, 0x0F),
    (103, 0x01),
];

impl XgdGeneration {
    /// `(offset, byte)` pairs that define the canonical form.
    ///
    /// XGD1 has no drive-dependent bytes, so its table is empty.
    pub fn canonical_table(&self) -> &'static [(usize, u8)] {
        match self {
            Self::Xgd1 => &[],
            Self::Xgd2 => XGD2_CANONICAL,
            Self::Xgd3Ssv1 => XGD3_SSV1_CANONICAL,
            Self::Xgd3Ssv2 => XGD3_SSV2_CANONICAL,
        }
    }
}

impl SecuritySector {
    /// Rewrite drive-dependent bytes to their canonical values in place.
    ///
    /// Returns the generation that selected the table. Unrecognized sectors
    /// are left untouched and reported as a classification error.
    pub fn clean(&mut self) -> Result<XgdGeneration, XgdError> {
        let generation = self.classify()?;
        let table = generation.canonical_table();
        log::debug!(
            "Cleaning {} security sector ({} canonical bytes)",
            generation,
            table.len()
        );
        let data = self.bytes_mut();
        for &(offset, value) in table {
            data[offset] = value;
        }
        Ok(generation)
    }

    /// Return a cleaned copy, leaving `self` unchanged.
    pub fn cleaned(&self) -> Result<Self, XgdError> {
        let mut copy = self.clone();
        copy.clean()?;
        Ok(copy)
    }

    /// True if the sector classifies and every canonical byte already holds
    /// its expected value.
    pub fn is_clean(&self) -> bool {
        let Some(generation) = self.generation() else {
            return false;
        };
        let data = self.as_bytes();
        generation
            .canonical_table()
            .iter()
            .all(|&(offset, value)| data[offset] == value)
    }
}

#[cfg(test)]
#[path = "tests/canonical_tests.rs"]
mod tests;
