//! Errors ending a load pass.

use stepleton_core::{sector::SectorId, storage::ReadError};
use thiserror::Error;

/// Why a load pass failed.
///
/// Every variant is fatal: the pass stops and the loaded data is never run.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BootError {
    /// The ROM could not read a sector.
    #[error("failed to read sector {id}: {source}")]
    Read {
        id: SectorId,
        #[source]
        source: ReadError,
    },
    /// The payload does not match the checksum of its terminal tag.
    #[error("checksum mismatch: stored {stored:#06x}, computed {computed:#06x}")]
    ChecksumMismatch { stored: u16, computed: u16 },
    /// The destination buffer has no room for the sector.
    #[error("destination full at sector {id}")]
    DestinationFull { id: SectorId },
}

pub type Result<T> = core::result::Result<T, BootError>;
