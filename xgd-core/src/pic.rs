//! Disc-information (PIC) block reader.
//!
//! A PIC dump starts with a 4-byte header (big-endian data length counting
//! the bytes after the length field, then two reserved bytes), followed by
//! 64-byte disc-information units:
//!
//! | offset | size | field |
//! |--------|------|-------|
//! | 0      | 2    | identifier `"DI"` |
//! | 2      | 1    | format |
//! | 3      | 1    | units in block |
//! | 4      | 1    | reserved |
//! | 5      | 1    | sequence number |
//! | 6      | 1    | bytes in use |
//! | 7      | 1    | reserved |
//! | 8      | 3    | disc type identifier |
//! | 11     | 1    | size class / version |
//! | 12     | 52   | format-dependent region |

use crate::XgdError;
use crate::disc::DiscInformationUnit;
use crate::util::read_ascii;

/// Size of the PIC header preceding the first unit.
pub const PIC_HEADER_SIZE: usize = 4;

/// Size of one disc-information unit.
pub const DI_UNIT_SIZE: usize = 64;

const DI_IDENTIFIER: &[u8; 2] = b"DI";
const SEQUENCE_NUMBER: usize = 5;
const DISC_TYPE: usize = 8;
const FORMAT_DEPENDENT: usize = 12;

/// A parsed disc-information block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscInformation {
    /// Declared length of the data following the length field.
    pub data_length: u16,
    /// Units in block order.
    pub units: Vec<DiscInformationUnit>,
}

/// Parse a raw PIC block into its disc-information units.
///
/// Parsing stops at the first unit that lacks the `"DI"` identifier, or when
/// either the declared length or the buffer runs out.
pub fn parse_disc_information(data: &[u8]) -> Result<DiscInformation, XgdError> {
    if data.len() < PIC_HEADER_SIZE {
        return Err(XgdError::TooSmall {
            expected: PIC_HEADER_SIZE as u64,
            actual: data.len() as u64,
        });
    }

    let data_length = u16::from_be_bytes([data[0], data[1]]);
    let end = data.len().min(2 + usize::from(data_length));

    let mut units = Vec::new();
    let mut offset = PIC_HEADER_SIZE;
    while offset + DI_UNIT_SIZE <= end {
        let unit = &data[offset..offset + DI_UNIT_SIZE];
        if &unit[..2] != DI_IDENTIFIER {
            log::debug!("No DI identifier at offset {}, stopping", offset);
            break;
        }
        units.push(DiscInformationUnit {
            sequence_number: unit[SEQUENCE_NUMBER],
            disc_type: read_ascii(&unit[DISC_TYPE..FORMAT_DEPENDENT - 1]),
            format_dependent: unit[FORMAT_DEPENDENT..].to_vec(),
        });
        offset += DI_UNIT_SIZE;
    }

    log::debug!(
        "Parsed {} disc information unit(s) from {} byte PIC",
        units.len(),
        data.len()
    );
    Ok(DiscInformation { data_length, units })
}

#[cfg(test)]
#[path = "tests/pic_tests.rs"]
mod tests;
