//! Xbox and Xbox 360 security sector codec.
//!
//! This crate understands the security sectors of the three Xbox disc
//! generations:
//!
//! - XGD1 (original Xbox)
//! - XGD2 (early Xbox 360)
//! - XGD3, in both SSv1 and SSv2 layouts (later Xbox 360)
//!
//! It classifies sectors, converts them to and from canonical form, reads
//! the security range table, and rebuilds raw sectors from replay tables.

pub mod canonical;
pub mod ranges;
pub mod replay;
pub mod security_sector;

pub use ranges::{SectorRange, SecurityRanges};
pub use replay::{ReconstructStatus, ReplayRow, ReplayTable};
pub use security_sector::{SS_SIZE, SecuritySector, XgdGeneration};
