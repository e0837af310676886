use thiserror::Error;

use crate::sector::{RomAddress, Sector};

#[derive(Debug, Error, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
/// An error reported by the sector read routine.
pub enum ReadError {
    #[error("I/O error")]
    Io,
    #[error("No disk in drive")]
    NoDisk,
    #[error("Out of bounds")]
    OutOfBounds,
    #[error("ROM error code {0:#04x}")]
    Rom(u8),
}

/// The ROM routine reading one sector and its tag.
///
/// Retrying failed reads, if at all, is up to the implementor.
pub trait ReadSector {
    /// Reads the sector at `address` into `dst`.
    ///
    /// ## Errors
    ///
    /// Returns an error if the sector could not be read. The content of `dst`
    /// is unspecified in that case.
    fn read_sector(&mut self, address: RomAddress, dst: &mut Sector) -> Result<(), ReadError>;
}

/// The ROM routine showing a line of text in the loader's status area.
///
/// Only ASCII letters, digits, `-./?` and space are guaranteed to render.
pub trait DisplayText {
    fn display(&mut self, text: &[u8]);
}

impl<T: ReadSector + ?Sized> ReadSector for &mut T {
    #[inline]
    fn read_sector(&mut self, address: RomAddress, dst: &mut Sector) -> Result<(), ReadError> {
        (**self).read_sector(address, dst)
    }
}

impl<T: DisplayText + ?Sized> DisplayText for &mut T {
    #[inline]
    fn display(&mut self, text: &[u8]) {
        (**self).display(text);
    }
}
