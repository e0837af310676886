//! Failure messages for the ROM.
//!
//! The ROM font only covers uppercase letters, digits, `-./?` and space, so
//! messages stick to that set. They are built on the stack: there is no heap
//! this early.

use crate::error::BootError;
use core::fmt::Write;
use stepleton_core::storage::ReadError;

/// Longest message handed to the ROM.
pub const MESSAGE_CAPACITY: usize = 64;

/// Fixed-capacity text buffer. Text past the capacity is dropped.
pub struct MessageBuf<const N: usize> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> MessageBuf<N> {
    #[must_use]
    #[inline]
    pub const fn new() -> Self {
        Self {
            buf: [0; N],
            len: 0,
        }
    }

    #[must_use]
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

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
}

impl<const N: usize> Default for MessageBuf<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Write for MessageBuf<N> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let room = N - self.len;
        let taken = s.len().min(room);
        self.buf[self.len..self.len + taken].copy_from_slice(&s.as_bytes()[..taken]);
        self.len += taken;
        if taken < s.len() {
            Err(core::fmt::Error)
        } else {
            Ok(())
        }
    }
}

impl BootError {
    /// Renders the error for the ROM's halt routine.
    #[must_use]
    pub fn describe(&self) -> MessageBuf<MESSAGE_CAPACITY> {
        let mut msg = MessageBuf::new();
        // A truncated message is still worth showing.
        let _ = match *self {
            Self::Read { id, source } => {
                write!(msg, "READ ERROR AT {id}").and_then(|()| match source {
                    ReadError::Io => msg.write_str(" - IO"),
                    ReadError::NoDisk => msg.write_str(" - NO DISK"),
                    ReadError::OutOfBounds => msg.write_str(" - NO SUCH SECTOR"),
                    ReadError::Rom(code) => write!(msg, " - CODE {code:02X}"),
                })
            }
            Self::ChecksumMismatch { stored, computed } => {
                write!(msg, "CHECKSUM ERROR STORED {stored:04X} COMPUTED {computed:04X}")
            }
            Self::DestinationFull { id } => write!(msg, "OUT OF MEMORY AT {id}"),
        };
        msg
    }
}
