//! Stepleton: a second-stage loader for Apple Lisa floppies.
//!
//! The boot sector hands over to this loader, which streams the sectors that
//! follow it into memory. Sector tags drive the process: ordinary tags are
//! printed as progress text, and the `"Last out!"` tag ends the payload and
//! carries its checksum. The payload only runs once the checksum matches.
//!
//! The loader talks to the machine exclusively through [`Firmware`], so it
//! runs the same against the Lisa ROM and against test doubles.
#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::missing_panics_doc, clippy::similar_names)]

pub mod diag;
pub mod dispatch;
pub mod error;
pub mod loader;
pub mod logging;

pub use dispatch::{BootDispatcher, LoadState, Phase, Ready};
pub use error::{BootError, Result};

use stepleton_core::{
    media::{self, MediaValidator, ZonedProfile},
    sector::SectorId,
    storage::{DisplayText, ReadSector},
};

/// Media profile of a fixed-media build, chosen by Cargo feature.
#[cfg(feature = "twiggy")]
pub const BUILD_MEDIA: ZonedProfile = media::TWIGGY;
/// Media profile of a fixed-media build, chosen by Cargo feature.
#[cfg(all(feature = "sony-400k", not(feature = "twiggy")))]
pub const BUILD_MEDIA: ZonedProfile = media::SONY_400K;
/// Media profile of a fixed-media build, chosen by Cargo feature.
#[cfg(not(any(feature = "twiggy", feature = "sony-400k")))]
pub const BUILD_MEDIA: ZonedProfile = media::SONY_800K;

/// Everything the loader needs from the machine.
pub trait Firmware: ReadSector + DisplayText {
    /// Shows `message`, if any, and stops the machine.
    fn halt(&mut self, message: Option<&[u8]>) -> !;

    /// Jumps to the start of `image`, which now belongs to the loaded program.
    fn transfer(&mut self, image: &mut [u8]) -> !;
}

/// Loads the payload starting at `first` into `destination` and runs it.
///
/// On failure the reason is shown through [`Firmware::halt`] and the payload
/// is never run.
pub fn boot<F, M>(firmware: &mut F, media: M, first: SectorId, destination: &mut [u8]) -> !
where
    F: Firmware + ?Sized,
    M: MediaValidator,
{
    let outcome = BootDispatcher::new(&mut *firmware, media, first, destination).run();
    match outcome {
        Ok(ready) => {
            log::info!("Starting payload ({} bytes)", ready.len());
            firmware.transfer(ready.into_image())
        }
        Err(err) => {
            log::error!("Boot failed: {err}");
            let message = err.describe();
            firmware.halt(Some(message.as_bytes()))
        }
    }
}

/// [`boot`] with the media profile compiled into this build.
pub fn boot_fixed<F: Firmware + ?Sized>(
    firmware: &mut F,
    first: SectorId,
    destination: &mut [u8],
) -> ! {
    boot(firmware, BUILD_MEDIA, first, destination)
}
