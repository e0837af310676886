//! The load loop.
//!
//! A pass walks the disk one sector at a time:
//!
//! ```text
//! Loading --progress tag--> Loading
//! Loading --terminal tag--> Verifying --checksum ok--> Ready
//! Loading --read error----> Failed    --mismatch-----> Failed
//! ```
//!
//! Every sector read is appended to the destination buffer and folded into the
//! running checksum before its tag is looked at. The sector carrying the
//! terminal tag is the last sector of the payload.

use crate::{
    error::{BootError, Result},
    loader::SectorLoader,
};
use stepleton_core::{
    checksum::Checksum,
    media::{MediaValidator, Validity},
    sector::{DATA_SIZE, SectorId},
    storage::{DisplayText, ReadSector},
    tag::TagKind,
};

/// Mutable state of one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadState {
    /// Next sector to read.
    pub id: SectorId,
    /// Offset of the next free byte in the destination buffer.
    pub cursor: usize,
    pub checksum: Checksum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    /// The terminal tag was read; `stored` is the checksum it carries.
    Verifying { stored: u16 },
    Ready,
    Failed(BootError),
}

impl Phase {
    #[must_use]
    #[inline]
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Ready | Self::Failed(_))
    }
}

/// A verified payload, waiting for control to be handed over.
#[derive(Debug)]
pub struct Ready<'a> {
    image: &'a mut [u8],
    len: usize,
}

impl<'a> Ready<'a> {
    /// The loaded payload.
    #[must_use]
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.image[..self.len]
    }

    /// Number of payload bytes loaded.
    #[must_use]
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Address execution starts at: the base of the destination buffer.
    #[must_use]
    #[inline]
    pub const fn entry_point(&self) -> *const u8 {
        self.image.as_ptr()
    }

    /// Gives up the whole destination buffer, to be owned by the loaded program.
    #[must_use]
    #[inline]
    pub fn into_image(self) -> &'a mut [u8] {
        self.image
    }
}

/// Drives one load pass over a medium.
pub struct BootDispatcher<'a, F, M> {
    rom: F,
    media: M,
    loader: SectorLoader,
    destination: &'a mut [u8],
    state: LoadState,
    phase: Phase,
}

impl<'a, F: ReadSector + DisplayText, M: MediaValidator> BootDispatcher<'a, F, M> {
    /// Prepares a pass starting at `first` and loading into `destination`.
    #[must_use]
    pub const fn new(rom: F, media: M, first: SectorId, destination: &'a mut [u8]) -> Self {
        Self {
            rom,
            media,
            loader: SectorLoader::new(),
            destination,
            state: LoadState {
                id: first,
                cursor: 0,
                checksum: Checksum::new(),
            },
            phase: Phase::Loading,
        }
    }

    #[must_use]
    #[inline]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    #[inline]
    pub const fn state(&self) -> &LoadState {
        &self.state
    }

    /// Number of sectors read so far, including the terminal one.
    #[must_use]
    #[inline]
    pub const fn sectors_read(&self) -> usize {
        self.loader.sectors_read()
    }

    /// Performs one transition and returns the new phase.
    ///
    /// Once the pass is over, the phase no longer changes.
    pub fn step(&mut self) -> Phase {
        self.phase = match self.phase {
            Phase::Loading => self.load_next(),
            Phase::Verifying { stored } => self.verify(stored),
            done => done,
        };
        self.phase
    }

    /// Runs the pass to completion.
    ///
    /// ## Errors
    ///
    /// Returns the reason of the failure if a read fails, the destination
    /// overflows or the checksum does not match.
    pub fn run(mut self) -> Result<Ready<'a>> {
        loop {
            match self.step() {
                Phase::Loading | Phase::Verifying { .. } => {}
                Phase::Ready => {
                    return Ok(Ready {
                        image: self.destination,
                        len: self.state.cursor,
                    });
                }
                Phase::Failed(err) => return Err(err),
            }
        }
    }

    fn load_next(&mut self) -> Phase {
        let id = self.state.id;

        let sector = match self.loader.load_one(&mut self.rom, id) {
            Ok(sector) => sector,
            Err(source) => {
                log::error!("Failed to read sector {id}: {source}");
                return Phase::Failed(BootError::Read { id, source });
            }
        };

        let start = self.state.cursor;
        let Some(slot) = self.destination.get_mut(start..start + DATA_SIZE) else {
            log::error!("No room left for sector {id} at offset {start:#x}");
            return Phase::Failed(BootError::DestinationFull { id });
        };
        slot.copy_from_slice(&sector.data);
        self.state.checksum.absorb_bytes(&sector.data);
        self.state.cursor += DATA_SIZE;

        match sector.tag.classify() {
            TagKind::Terminal { checksum } => {
                log::info!(
                    "End of payload at sector {id}, {} bytes loaded",
                    self.state.cursor
                );
                return Phase::Verifying { stored: checksum };
            }
            TagKind::Progress { display } if !display.is_empty() => self.rom.display(display),
            TagKind::Progress { .. } => {}
        }

        self.state.id = next_valid(&self.media, id);
        Phase::Loading
    }

    fn verify(&self, stored: u16) -> Phase {
        let computed = self.state.checksum.finalize();
        if computed == stored {
            log::info!("Checksum {stored:#06x} verified");
            Phase::Ready
        } else {
            log::error!("Checksum mismatch: stored {stored:#06x}, computed {computed:#06x}");
            Phase::Failed(BootError::ChecksumMismatch { stored, computed })
        }
    }
}

/// First identifier after `id` that exists on `media`.
///
/// There is no bound on the walk: running off the medium is left to the read
/// routine, which fails on the identifier that does not exist.
fn next_valid<M: MediaValidator>(media: &M, id: SectorId) -> SectorId {
    let mut next = id.increment();
    loop {
        match media.validate(next) {
            Validity::Valid => return next,
            Validity::Invalid { advance } if advance > next => {
                log::debug!("Skipping from {next} to {advance}");
                next = advance;
            }
            Validity::Invalid { .. } => next = next.increment(),
        }
    }
}
