//! # VSBS
//!
//! The **VSBS** (**V**ideo **S**ignificant **B**it**s**) library provides the traits and
//! implementations useful for concealing messages in, and revealing them from, the least
//! significant bits of video frames.
//!
//! ## Video implementation
//!
//! The [`video`] module hides one byte per frame, prefixed by a frame holding the message
//! length. See its [documentation][`video`] for the exact layout.
//!
//! The hidden payload is neither encrypted nor protected against steganalysis or lossy
//! re-encoding.

pub mod error;
pub mod video;

pub use error::{Error, Result};

use video::{FrameSource, Revealed};

/// A trait for objects able to conceal steganographic messages, or carriers.
///
/// Carriers are defined by a single required method, [`conceal`][Conceal::conceal],
/// which hides the payload in the frames of the given cover.
///
/// # Examples
///
/// [`video::Carrier`] can be used to conceal secret messages in video frames.
pub trait Conceal {
    /// Conceals the payload in the given cover and returns how many frames were written in
    /// total.
    ///
    /// # Errors
    ///
    /// This function returns any form of error encountered to the caller. Implementations
    /// should reject a payload that cannot fit before writing anything.
    fn conceal<S: FrameSource>(self, payload: &[u8], cover: S) -> Result<usize>;
}

/// A trait for objects able to reveal steganographic messages, or packages.
///
/// Packages are defined by a single required method, [`reveal`][Reveal::reveal],
/// which reads the hidden message.
///
/// # Examples
///
/// [`video::Package`] can be used to reveal secret messages hidden in video frames.
pub trait Reveal {
    /// Reads the hidden message.
    ///
    /// A message cut short by the end of its package is returned as far as it was read; see
    /// [`Revealed::is_truncated`].
    ///
    /// # Errors
    ///
    /// This function returns any form of error encountered to the caller, including
    /// messages that are not valid UTF-8.
    fn reveal(self) -> Result<Revealed>;
}
