//! Video implementations of [`Conceal`][crate::Conceal] and [`Reveal`][crate::Reveal] traits.
//!
//! The [`Carrier`] and [`Package`] structures can be used to conceal and reveal hidden
//! messages within the least significant bits of decoded video frames.
//!
//! ## Layout
//!
//! Every frame carries exactly one *payload unit*, a single byte spread over the lowest bit
//! of the first eight channel samples of the frame in raster order (rows, then columns, then
//! channels), most significant bit first.
//!
//! | frame      | payload unit              |
//! |------------|---------------------------|
//! | `0`        | message length `L`        |
//! | `1..=L`    | message bytes, in order   |
//! | `L+1..`    | none, left untouched      |
//!
//! Because the length prefix is a single byte, at most [`MAX_MESSAGE_LEN`] bytes can be
//! concealed, and a video of `n` frames holds at most `n - 1` of them; see
//! [`VideoInfo::capacity`].
//!
//! ## Frame Sources and Sinks
//!
//! Container and codec handling is left to implementations of [`FrameSource`] and
//! [`FrameSink`]. Sinks must store samples exactly: any lossy re-compression destroys the
//! concealed bits, so [`Carrier`] refuses sinks that are not
//! [lossless][FrameSink::is_lossless]. [`MemoryVideo`] and [`RawReader`]/[`RawWriter`] are
//! provided for in-memory frames and headerless raw video streams.
//!
//! ## Examples
//!
//! Concealing a message in a raw video stream:
//!
//! ```no_run
//! use vsbs::{video, Conceal};
//! use std::fs::File;
//!
//! let shape = video::Shape::new(480, 640, 3);
//!
//! let cover = video::RawReader::new(File::open("cover.rgb")?, shape, 300, 30.0);
//! let package = video::RawWriter::new(File::create("package.rgb")?, shape);
//!
//! video::Carrier::new(package).conceal("a very secret message".as_bytes(), cover)?;
//! # Ok::<(), vsbs::Error>(())
//! ```
//!
//! Revealing it again:
//!
//! ```no_run
//! use vsbs::{video, Reveal};
//! use std::fs::File;
//!
//! let shape = video::Shape::new(480, 640, 3);
//! let package = video::RawReader::new(File::open("package.rgb")?, shape, 300, 30.0);
//!
//! let revealed = video::Package::new(package).reveal()?;
//! println!("{}", revealed.text());
//! # Ok::<(), vsbs::Error>(())
//! ```

mod bits;
mod carrier;
mod codec;
mod frame;
mod memory;
mod package;
mod raw;
mod sequencer;

pub use bits::BIT_DEPTH;
pub use carrier::Carrier;
pub use codec::{embed_byte, extract_byte};
pub use frame::{FrameSink, FrameSource, PixelBuffer, Shape, VideoInfo, MAX_MESSAGE_LEN};
pub use memory::MemoryVideo;
pub use package::{Package, Revealed};
pub use raw::{RawReader, RawWriter};
pub use sequencer::{Lsbs, Position, Raster};
