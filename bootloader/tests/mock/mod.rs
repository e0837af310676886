#![allow(dead_code)]

use bootloader::Firmware;
use std::collections::BTreeMap;
use stepleton_core::{
    checksum::Checksum,
    media::MediaValidator,
    sector::{DATA_SIZE, RomAddress, Sector, SectorId},
    storage::{DisplayText, ReadError, ReadSector},
    tag::SectorTag,
};

/// What a panicking `Firmware` call unwinds with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exit {
    Transfer { payload: Vec<u8>, image_len: usize },
    Halt(Option<Vec<u8>>),
}

/// A disk image addressed by sector identifier.
pub struct MockDisk<M> {
    media: M,
    sectors: BTreeMap<SectorId, Sector>,
    /// Identifiers handed to the read routine, in order.
    pub reads: Vec<SectorId>,
    /// Text shown through the display routine, in order.
    pub shown: Vec<Vec<u8>>,
    /// Reading this identifier fails with the given error.
    pub fail_at: Option<(SectorId, ReadError)>,
    /// Payload length to report when control is transferred.
    pub payload_len: usize,
}

impl<M: MediaValidator> MockDisk<M> {
    pub fn new(media: M) -> Self {
        Self {
            media,
            sectors: BTreeMap::new(),
            reads: Vec::new(),
            shown: Vec::new(),
            fail_at: None,
            payload_len: 0,
        }
    }

    /// Lays `chunks` out from `first` on. All chunks but the last are tagged
    /// with `labels`; the last one carries the terminal tag with the checksum
    /// of the whole payload.
    ///
    /// Returns the identifiers written.
    pub fn write_payload(
        &mut self,
        first: SectorId,
        chunks: &[[u8; DATA_SIZE]],
        labels: &[&[u8]],
    ) -> Vec<SectorId> {
        let mut sum = Checksum::new();
        for chunk in chunks {
            sum.absorb_bytes(chunk);
        }
        self.write_payload_with(first, chunks, labels, sum.finalize())
    }

    /// Same as [`Self::write_payload`] with an arbitrary stored checksum.
    pub fn write_payload_with(
        &mut self,
        first: SectorId,
        chunks: &[[u8; DATA_SIZE]],
        labels: &[&[u8]],
        stored: u16,
    ) -> Vec<SectorId> {
        assert!(!chunks.is_empty(), "a payload holds at least one sector");

        let mut ids = Vec::new();
        let mut id = first;
        for (i, chunk) in chunks.iter().enumerate() {
            if i > 0 {
                id = self.next_after(id);
            }
            let tag = if i + 1 == chunks.len() {
                SectorTag::terminal(stored)
            } else {
                labels
                    .get(i)
                    .map_or_else(SectorTag::zeroed, |label| SectorTag::from_slice(label))
            };
            self.sectors.insert(id, Sector { data: *chunk, tag });
            ids.push(id);
        }
        ids
    }

    /// The sector stored at `id`, if any.
    pub fn sector_mut(&mut self, id: SectorId) -> Option<&mut Sector> {
        self.sectors.get_mut(&id)
    }

    /// Next identifier on the medium, found one increment at a time.
    pub fn next_after(&self, id: SectorId) -> SectorId {
        let mut next = id.increment();
        while !self.media.is_valid(next) {
            next = next.increment();
        }
        next
    }

    pub fn invalid_reads(&self) -> Vec<SectorId> {
        self.reads
            .iter()
            .copied()
            .filter(|&id| !self.media.is_valid(id))
            .collect()
    }
}

impl<M: MediaValidator> ReadSector for MockDisk<M> {
    fn read_sector(&mut self, address: RomAddress, dst: &mut Sector) -> Result<(), ReadError> {
        let id = SectorId::new(address.drive, address.side, address.track, address.sector);
        self.reads.push(id);

        if let Some((at, err)) = self.fail_at {
            if at == id {
                return Err(err);
            }
        }
        if !self.media.is_valid(id) {
            return Err(ReadError::OutOfBounds);
        }

        // Blank sectors read back as zeroes.
        match self.sectors.get(&id) {
            Some(sector) => dst.clone_from(sector),
            None => *dst = Sector::zeroed(),
        }
        Ok(())
    }
}

impl<M> DisplayText for MockDisk<M> {
    fn display(&mut self, text: &[u8]) {
        self.shown.push(text.to_vec());
    }
}

impl<M: MediaValidator> Firmware for MockDisk<M> {
    fn halt(&mut self, message: Option<&[u8]>) -> ! {
        std::panic::panic_any(Exit::Halt(message.map(<[u8]>::to_vec)))
    }

    fn transfer(&mut self, image: &mut [u8]) -> ! {
        std::panic::panic_any(Exit::Transfer {
            payload: image[..self.payload_len].to_vec(),
            image_len: image.len(),
        })
    }
}

/// Runs `f`, which must leave through a `Firmware` exit.
pub fn exit_of(f: impl FnOnce()) -> Exit {
    let payload = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f))
        .expect_err("firmware exits never return");
    *payload
        .downcast::<Exit>()
        .expect("unwound with something other than a firmware exit")
}

/// A 512-byte chunk filled with a pattern derived from `seed`.
pub fn chunk(seed: u8) -> [u8; DATA_SIZE] {
    core::array::from_fn(|i| {
        #[allow(clippy::cast_possible_truncation)]
        let low = i as u8;
        low.wrapping_mul(31).wrapping_add(seed)
    })
}
