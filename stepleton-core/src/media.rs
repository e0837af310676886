//! Media profiles and identifier validation.
//!
//! A [`SectorId`] means nothing on its own: whether `(side, track, sector)`
//! exists depends on the medium. Media are described by implementors of
//! [`MediaValidator`], which the loader takes as a parameter.
//!
//! Two profiles are provided:
//! - [`MediaProfile`]: every track has the same number of sectors;
//! - [`ZonedProfile`]: tracks are grouped into zones, outer zones holding more
//!   sectors than inner ones. This is how the Lisa's Sony and Twiggy drives
//!   lay out their disks.

use crate::sector::{DATA_SIZE, SectorId};

/// Result of validating an identifier against a medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    Valid,
    /// The identifier does not exist on the medium.
    ///
    /// `advance` is never smaller than the rejected identifier and never larger
    /// than the next valid one. It is either valid itself or the immediate
    /// predecessor of the next valid identifier. Returning the rejected
    /// identifier unchanged is always allowed.
    ///
    /// The provided profiles always hint the next valid identifier, unless the
    /// identifier space ends first.
    Invalid { advance: SectorId },
}

impl Validity {
    #[must_use]
    #[inline]
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// A physical format the loader can walk.
///
/// A medium must accept at least one identifier. The loader searches forward
/// for the next valid identifier without bound, so a medium accepting none
/// would never let it issue another read.
pub trait MediaValidator {
    /// Whether `id` names a sector that exists on this medium.
    ///
    /// The drive field is not checked: an absent drive is the read routine's concern.
    fn is_valid(&self, id: SectorId) -> bool;

    /// Validates `id`, possibly suggesting where to resume if it is invalid.
    ///
    /// The default implementation never skips ahead.
    fn validate(&self, id: SectorId) -> Validity {
        if self.is_valid(id) {
            Validity::Valid
        } else {
            Validity::Invalid { advance: id }
        }
    }
}

impl<T: MediaValidator + ?Sized> MediaValidator for &T {
    #[inline]
    fn is_valid(&self, id: SectorId) -> bool {
        (**self).is_valid(id)
    }

    #[inline]
    fn validate(&self, id: SectorId) -> Validity {
        (**self).validate(id)
    }
}

/// One jump past an invalid identifier.
///
/// Moves to the start of the next track, side or drive depending on which
/// field is out of range. None of these jumps can pass over a valid sector.
///
/// Past the last side the jump goes to drive code + 1 (`0x81` after the lower
/// drive), which names no real drive. Media never check the drive field, so
/// that identifier is accepted and the read routine is the one to reject it.
const fn skip_ahead(id: SectorId, sides: u8, track_count: u16, sectors: u16) -> SectorId {
    if id.side() >= sides {
        if id.drive() == u8::MAX {
            id
        } else {
            id.next_drive()
        }
    } else if id.track() as u16 >= track_count {
        id.next_side()
    } else if id.sector() as u16 >= sectors {
        id.next_track()
    } else {
        id
    }
}

/// Chains `jump` until it lands on a valid identifier or stops making progress.
fn seek<M: MediaValidator + ?Sized>(
    media: &M,
    id: SectorId,
    jump: impl Fn(SectorId) -> SectorId,
) -> SectorId {
    let mut current = id;
    loop {
        let next = jump(current);
        if next <= current {
            return current;
        }
        if media.is_valid(next) {
            return next;
        }
        current = next;
    }
}

/// A medium with the same number of sectors on every track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaProfile {
    /// Number of tracks per side.
    tracks: u16,
    /// Number of sectors per track.
    sectors_per_track: u16,
    /// Number of sides, 1 or 2.
    sides: u8,
}

impl MediaProfile {
    /// ## Panics
    ///
    /// Panics if any count is zero: such a medium holds no sector.
    #[must_use]
    #[inline]
    pub const fn new(tracks: u16, sectors_per_track: u16, sides: u8) -> Self {
        assert!(
            tracks > 0 && sectors_per_track > 0 && sides > 0,
            "medium without sectors"
        );
        Self {
            tracks,
            sectors_per_track,
            sides,
        }
    }

    /// Number of sectors on the whole medium.
    #[must_use]
    #[inline]
    pub const fn sector_count(&self) -> u32 {
        self.tracks as u32 * self.sectors_per_track as u32 * self.sides as u32
    }
}

impl MediaValidator for MediaProfile {
    fn is_valid(&self, id: SectorId) -> bool {
        id.side() < self.sides
            && u16::from(id.track()) < self.tracks
            && u16::from(id.sector()) < self.sectors_per_track
    }

    fn validate(&self, id: SectorId) -> Validity {
        if self.is_valid(id) {
            Validity::Valid
        } else {
            Validity::Invalid {
                advance: seek(self, id, |id| {
                    skip_ahead(id, self.sides, self.tracks, self.sectors_per_track)
                }),
            }
        }
    }
}

/// A medium whose tracks are grouped into zones of decreasing sector counts.
///
/// `zone_ends[i]` is the last track of zone `i`; tracks of zone `i` hold
/// `outer_sectors - i` sectors. The last entry is the last track of the disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZonedProfile {
    zone_ends: &'static [u8],
    /// Sectors per track in the outermost zone.
    outer_sectors: u8,
    sides: u8,
}

impl ZonedProfile {
    /// ## Panics
    ///
    /// Panics if the medium holds no sector, or if `zone_ends` is not strictly
    /// increasing.
    #[must_use]
    pub const fn new(zone_ends: &'static [u8], outer_sectors: u8, sides: u8) -> Self {
        assert!(
            !zone_ends.is_empty() && outer_sectors > 0 && sides > 0,
            "medium without sectors"
        );
        let mut zone = 1;
        while zone < zone_ends.len() {
            assert!(zone_ends[zone - 1] < zone_ends[zone], "zones out of order");
            zone += 1;
        }
        Self {
            zone_ends,
            outer_sectors,
            sides,
        }
    }

    #[must_use]
    #[inline]
    pub const fn sides(&self) -> u8 {
        self.sides
    }

    /// Number of tracks per side.
    #[must_use]
    pub const fn tracks(&self) -> u16 {
        match self.zone_ends.last() {
            Some(&last) => last as u16 + 1,
            None => 0,
        }
    }

    /// Number of sectors on `track`, or `None` past the last track.
    #[must_use]
    pub const fn sectors_on(&self, track: u8) -> Option<u8> {
        let mut zone = 0;
        while zone < self.zone_ends.len() {
            if track <= self.zone_ends[zone] {
                #[allow(clippy::cast_possible_truncation)]
                return Some(self.outer_sectors.saturating_sub(zone as u8));
            }
            zone += 1;
        }
        None
    }

    #[must_use]
    pub const fn sectors_per_side(&self) -> u32 {
        let mut total = 0;
        let mut zone = 0;
        let mut first_track = 0u16;
        while zone < self.zone_ends.len() {
            let last_track = self.zone_ends[zone] as u16;
            #[allow(clippy::cast_possible_truncation)]
            let sectors = self.outer_sectors.saturating_sub(zone as u8) as u32;
            total += (last_track + 1 - first_track) as u32 * sectors;
            first_track = last_track + 1;
            zone += 1;
        }
        total
    }

    /// Number of sectors on the whole medium.
    #[must_use]
    #[inline]
    pub const fn sector_count(&self) -> u32 {
        self.sectors_per_side() * self.sides as u32
    }

    /// Number of data bytes on the whole medium.
    #[must_use]
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.sector_count() as usize * DATA_SIZE
    }
}

impl MediaValidator for ZonedProfile {
    fn is_valid(&self, id: SectorId) -> bool {
        id.side() < self.sides
            && self
                .sectors_on(id.track())
                .is_some_and(|sectors| id.sector() < sectors)
    }

    fn validate(&self, id: SectorId) -> Validity {
        if self.is_valid(id) {
            return Validity::Valid;
        }
        Validity::Invalid {
            advance: seek(self, id, |id| {
                let sectors = self.sectors_on(id.track()).map_or(0, u16::from);
                skip_ahead(id, self.sides, self.tracks(), sectors)
            }),
        }
    }
}

const SONY_ZONES: &[u8] = &[15, 31, 47, 63, 79];
const TWIGGY_ZONES: &[u8] = &[3, 10, 16, 22, 28, 34, 41, 45];

/// Single-sided 400k Sony 3.5" disk.
pub const SONY_400K: ZonedProfile = ZonedProfile::new(SONY_ZONES, 12, 1);

/// Double-sided 800k Sony 3.5" disk.
pub const SONY_800K: ZonedProfile = ZonedProfile::new(SONY_ZONES, 12, 2);

/// Double-sided 5.25" Twiggy disk.
pub const TWIGGY: ZonedProfile = ZonedProfile::new(TWIGGY_ZONES, 22, 2);

crate::static_assert!(SONY_400K.capacity() == 0x6_4000);
crate::static_assert!(SONY_800K.capacity() == 0xC_8000);
crate::static_assert!(TWIGGY.capacity() == 0xD_4C00);
