//! Sector tags.
//!
//! Every sector carries 12 bytes of out-of-band tag data. The loader reads them
//! in one of two ways:
//!
//! - a *terminal* tag marks the last payload sector: the literal `"Last out!"`,
//!   a NUL byte, then the big-endian checksum the payload must match;
//! - any other tag is a *progress* tag, shown to the user as NUL-terminated text.

/// Number of tag bytes attached to every sector.
pub const TAG_SIZE: usize = 12;

/// Marker opening the tag of the last payload sector.
pub const TERMINAL_MARKER: &[u8; 10] = b"Last out!\0";

crate::static_assert!(TERMINAL_MARKER.len() + 2 == TAG_SIZE);

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct SectorTag([u8; TAG_SIZE]);

/// Interpretation of a sector tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind<'a> {
    /// End of payload, carrying the checksum stored on disk.
    Terminal { checksum: u16 },
    /// Progress text.
    ///
    /// `display` stops before the first NUL byte. An empty slice means the
    /// text currently on screen should be left alone.
    Progress { display: &'a [u8] },
}

impl SectorTag {
    #[must_use]
    #[inline]
    pub const fn new(bytes: [u8; TAG_SIZE]) -> Self {
        Self(bytes)
    }

    #[must_use]
    #[inline]
    pub const fn zeroed() -> Self {
        Self([0; TAG_SIZE])
    }

    /// Builds a tag from up to 12 bytes, padding with NULs.
    ///
    /// Bytes past the twelfth are ignored.
    #[must_use]
    pub fn from_slice(bytes: &[u8]) -> Self {
        let mut tag = [0; TAG_SIZE];
        let len = bytes.len().min(TAG_SIZE);
        tag[..len].copy_from_slice(&bytes[..len]);
        Self(tag)
    }

    /// Builds the tag of the last payload sector.
    #[must_use]
    pub fn terminal(checksum: u16) -> Self {
        let mut tag = [0; TAG_SIZE];
        tag[..TERMINAL_MARKER.len()].copy_from_slice(TERMINAL_MARKER);
        tag[TERMINAL_MARKER.len()..].copy_from_slice(&checksum.to_be_bytes());
        Self(tag)
    }

    #[must_use]
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; TAG_SIZE] {
        &self.0
    }

    #[must_use]
    pub fn classify(&self) -> TagKind<'_> {
        let (marker, checksum) = self.0.split_at(TERMINAL_MARKER.len());
        if marker == TERMINAL_MARKER {
            return TagKind::Terminal {
                checksum: u16::from_be_bytes([checksum[0], checksum[1]]),
            };
        }

        let end = self.0.iter().position(|&b| b == 0).unwrap_or(TAG_SIZE);
        TagKind::Progress {
            display: &self.0[..end],
        }
    }

    #[must_use]
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self.classify(), TagKind::Terminal { .. })
    }
}

impl From<[u8; TAG_SIZE]> for SectorTag {
    #[inline]
    fn from(bytes: [u8; TAG_SIZE]) -> Self {
        Self(bytes)
    }
}

impl core::fmt::Debug for SectorTag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SectorTag(\"")?;
        for &b in &self.0 {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", char::from(b))?;
            } else {
                write!(f, "\\x{b:02x}")?;
            }
        }
        f.write_str("\")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_tag() {
        let tag = SectorTag::new(*b"Last out!\0\x12\x34");
        assert_eq!(tag.classify(), TagKind::Terminal { checksum: 0x1234 });
        assert!(tag.is_terminal());
    }

    #[test]
    fn test_terminal_roundtrip() {
        let tag = SectorTag::terminal(0xBEEF);
        assert_eq!(tag.classify(), TagKind::Terminal { checksum: 0xBEEF });
    }

    #[test]
    fn test_marker_without_nul_is_progress() {
        let tag = SectorTag::new(*b"Last out!!AB");
        assert_eq!(
            tag.classify(),
            TagKind::Progress {
                display: b"Last out!!AB"
            }
        );
    }

    #[test]
    fn test_progress_stops_at_nul() {
        let tag = SectorTag::new([b'A', b'B', 0, b'C', b'D', 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(tag.classify(), TagKind::Progress { display: b"AB" });
    }

    #[test]
    fn test_zero_tag_is_empty_progress() {
        assert_eq!(
            SectorTag::zeroed().classify(),
            TagKind::Progress { display: &[] }
        );
    }

    #[test]
    fn test_full_width_progress() {
        let tag = SectorTag::new(*b"READ 100.5K ");
        assert_eq!(
            tag.classify(),
            TagKind::Progress {
                display: b"READ 100.5K "
            }
        );
    }

    #[test]
    fn test_from_slice_pads_and_clips() {
        assert_eq!(SectorTag::from_slice(b"HI").as_bytes(), b"HI\0\0\0\0\0\0\0\0\0\0");
        assert_eq!(
            SectorTag::from_slice(b"LOADING DISK 1").as_bytes(),
            b"LOADING DISK"
        );
    }
}
