//! Running payload checksum.
//!
//! Words are absorbed big-endian with an add-then-rotate rule:
//! `acc = rotl1(acc + word)`, all in 16 bits.
//!
//! The value stored in the terminal tag is *not* the final accumulator: it is
//! the negation of the accumulator as it was before the last word went in.
//! The engine therefore keeps both values around.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Checksum {
    current: u16,
    before_last: u16,
}

impl Checksum {
    #[must_use]
    #[inline]
    pub const fn new() -> Self {
        Self {
            current: 0,
            before_last: 0,
        }
    }

    #[inline]
    pub const fn reset(&mut self) {
        *self = Self::new();
    }

    #[inline]
    pub const fn absorb(&mut self, word: u16) {
        self.before_last = self.current;
        self.current = self.current.wrapping_add(word).rotate_left(1);
    }

    /// Absorbs `bytes` as a sequence of big-endian words.
    ///
    /// A trailing odd byte is ignored; sector data always has an even length.
    pub fn absorb_bytes(&mut self, bytes: &[u8]) {
        for pair in bytes.chunks_exact(2) {
            self.absorb(u16::from_be_bytes([pair[0], pair[1]]));
        }
    }

    /// The accumulator after every absorbed word.
    #[must_use]
    #[inline]
    pub const fn value(&self) -> u16 {
        self.current
    }

    /// The value the terminal tag must hold for the data absorbed so far.
    #[must_use]
    #[inline]
    pub const fn finalize(&self) -> u16 {
        self.before_last.wrapping_neg()
    }

    #[must_use]
    #[inline]
    pub const fn matches(&self, stored: u16) -> bool {
        self.finalize() == stored
    }
}
