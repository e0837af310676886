//! Sector identifiers and raw sector buffers.
//!
//! A [`SectorId`] packs `(drive, side, track, sector)` into one ordered `u32`,
//! drive in the most significant byte and sector in the least significant one.
//! Incrementing the packed value therefore walks sectors first, then tracks,
//! then sides and finally drives.

use crate::tag::SectorTag;

/// Number of data bytes in a sector. The 12-byte tag comes on top.
pub const DATA_SIZE: usize = 512;

crate::static_assert!(DATA_SIZE % 2 == 0, "checksum words must not straddle sectors");

/// Drive code of the upper (or only) drive.
pub const DRIVE_UPPER: u8 = 0x00;
/// Drive code of the lower drive.
pub const DRIVE_LOWER: u8 = 0x80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct SectorId(u32);

impl SectorId {
    #[must_use]
    #[inline]
    pub const fn new(drive: u8, side: u8, track: u8, sector: u8) -> Self {
        Self(u32::from_be_bytes([drive, side, track, sector]))
    }

    #[must_use]
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The first sector after the boot sector on the given drive.
    #[must_use]
    #[inline]
    pub const fn first_payload(drive: u8) -> Self {
        Self::new(drive, 0, 0, 1)
    }

    #[must_use]
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    #[must_use]
    #[inline]
    pub const fn drive(self) -> u8 {
        self.0.to_be_bytes()[0]
    }

    #[must_use]
    #[inline]
    pub const fn side(self) -> u8 {
        self.0.to_be_bytes()[1]
    }

    #[must_use]
    #[inline]
    pub const fn track(self) -> u8 {
        self.0.to_be_bytes()[2]
    }

    #[must_use]
    #[inline]
    pub const fn sector(self) -> u8 {
        self.0.to_be_bytes()[3]
    }

    /// Returns the next identifier in packed order.
    ///
    /// The sector field carries into the track, the track into the side and the
    /// side into the drive. The packed value wraps at `2^32`.
    #[must_use]
    #[inline]
    pub const fn increment(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// First sector of the next track, on the same side.
    #[must_use]
    #[inline]
    pub const fn next_track(self) -> Self {
        Self(((self.0 >> 8).wrapping_add(1)) << 8)
    }

    /// First sector of the first track of the next side.
    #[must_use]
    #[inline]
    pub const fn next_side(self) -> Self {
        Self(((self.0 >> 16).wrapping_add(1)) << 16)
    }

    /// First sector of the next drive.
    #[must_use]
    #[inline]
    pub const fn next_drive(self) -> Self {
        Self(((self.0 >> 24).wrapping_add(1)) << 24)
    }

    /// Reorders the fields into the layout the ROM read routine expects.
    #[must_use]
    #[inline]
    pub const fn rom_address(self) -> RomAddress {
        RomAddress {
            drive: self.drive(),
            side: self.side(),
            sector: self.sector(),
            track: self.track(),
        }
    }
}

impl From<SectorId> for u32 {
    #[inline]
    fn from(id: SectorId) -> Self {
        id.0
    }
}

impl core::fmt::Display for SectorId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}

/// A sector address in the field order of the ROM read routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RomAddress {
    pub drive: u8,
    pub side: u8,
    pub sector: u8,
    pub track: u8,
}

/// One sector as read from the medium: 512 data bytes and the 12-byte tag.
#[derive(Clone, PartialEq, Eq)]
pub struct Sector {
    pub data: [u8; DATA_SIZE],
    pub tag: SectorTag,
}

impl Sector {
    #[must_use]
    #[inline]
    pub const fn zeroed() -> Self {
        Self {
            data: [0; DATA_SIZE],
            tag: SectorTag::zeroed(),
        }
    }
}

impl Default for Sector {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl core::fmt::Debug for Sector {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Sector")
            .field("data", &format_args!("[{} bytes]", DATA_SIZE))
            .field("tag", &self.tag)
            .finish()
    }
}
