//! Shared types for Xbox disc metadata tooling.
//!
//! Holds the common error type, byte-level helpers, and the layer-geometry
//! calculator used for multi-layer media.

pub mod disc;
pub mod error;
pub mod pic;
pub mod util;

pub use disc::{DiscInformationUnit, Layerbreaks, SECTOR_SIZE};
pub use error::XgdError;
pub use pic::{DiscInformation, parse_disc_information};
