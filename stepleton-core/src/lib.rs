//! Core building blocks of the Stepleton loader.
//!
//! Everything in here is pure data and arithmetic: sector identifiers, media
//! profiles, sector tags and the running checksum. The only I/O is described
//! by the traits in [`storage`], which the firmware (or a test double) implements.
#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::doc_markdown)]

pub mod checksum;
pub mod media;
pub mod sector;
pub mod storage;
pub mod tag;

#[macro_export]
macro_rules! static_assert {
    ($condition:expr $(, $($arg:tt)+)?) => {
        const _: () = assert!($condition $(, $($arg)+)?);
    };
}
