use crate::video::Shape;
use std::{io, str::Utf8Error};

/// Errors that can occur while concealing or revealing a message.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A frame holds fewer channel samples than a payload unit has bits.
    #[error("frame has {samples} channel samples, at least 8 are required")]
    InsufficientFrameBits { samples: usize },

    /// The message cannot be described by the length prefix or does not fit the cover.
    #[error("message is {len} bytes long, at most {max} can be concealed")]
    MessageTooLong { len: usize, max: usize },

    /// The recovered bytes are not valid UTF-8.
    #[error("revealed message is not valid UTF-8 (valid up to byte {valid_up_to})")]
    InvalidEncodedText {
        valid_up_to: usize,
        #[source]
        source: Utf8Error,
    },

    /// The frame source did not yield a single frame.
    #[error("video contains no frames")]
    NoFrames,

    /// The frame sink would re-quantize samples and destroy the concealed bits.
    #[error("frame sink is not lossless")]
    LossySink,

    /// A frame does not have the dimensions of the stream it belongs to.
    #[error("frame shape {found} does not match stream shape {expected}")]
    ShapeMismatch { expected: Shape, found: Shape },

    /// A pixel buffer was built from the wrong number of samples.
    #[error("pixel buffer needs {expected} samples, got {found}")]
    BufferSize { expected: usize, found: usize },

    /// The frame source ended before every message byte was embedded.
    #[error("cover ran out of frames after {embedded} of {expected} message bytes")]
    CoverExhausted { embedded: usize, expected: usize },

    /// The frame source or sink failed.
    #[error("video I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
