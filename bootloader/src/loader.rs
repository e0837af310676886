//! Reading one sector at a time.

use stepleton_core::{
    sector::{Sector, SectorId},
    storage::{ReadError, ReadSector},
};

/// Reads sectors into a staging buffer through the ROM read routine.
///
/// The staging buffer mirrors the ROM's own sector buffer: data and tag land
/// there, and the caller decides whether the data belongs to the payload.
pub struct SectorLoader {
    staging: Sector,
    loaded: usize,
}

impl SectorLoader {
    #[must_use]
    #[inline]
    pub const fn new() -> Self {
        Self {
            staging: Sector::zeroed(),
            loaded: 0,
        }
    }

    /// Reads the sector `id`.
    ///
    /// The identifier is handed to the ROM in its own field order. Failures are
    /// passed through untouched; nothing is retried here.
    pub fn load_one<R: ReadSector + ?Sized>(
        &mut self,
        rom: &mut R,
        id: SectorId,
    ) -> Result<&Sector, ReadError> {
        rom.read_sector(id.rom_address(), &mut self.staging)?;
        self.loaded += 1;
        log::trace!("read sector {id}: tag {:?}", self.staging.tag);
        Ok(&self.staging)
    }

    /// Number of sectors read successfully so far.
    #[must_use]
    #[inline]
    pub const fn sectors_read(&self) -> usize {
        self.loaded
    }
}

impl Default for SectorLoader {
    fn default() -> Self {
        Self::new()
    }
}
