use crate::{
    video::{codec, FrameSource},
    Error, Result, Reveal,
};

/// A video package that contains a steganographic message.
///
/// In the [`reveal`][crate::Reveal::reveal] method the first frame is read for the message
/// length, after which exactly that many frames are read, one message byte each. Reading
/// stops early if the source runs out of frames, in which case the message is reported as
/// [truncated][Revealed::is_truncated] rather than failing.
///
/// # Examples
///
/// Revealing a message hidden in an in-memory video:
///
/// ```
/// use vsbs::{video, Conceal, Reveal};
///
/// let shape = video::Shape::new(4, 4, 3);
/// let cover = video::MemoryVideo::new(vec![video::PixelBuffer::new(shape); 10], 30.0)?;
///
/// let mut frames: Vec<video::PixelBuffer> = Vec::new();
/// video::Carrier::new(&mut frames).conceal("hi".as_bytes(), cover)?;
///
/// let package = video::MemoryVideo::new(frames, 30.0)?;
/// let revealed = video::Package::new(package).reveal()?;
///
/// assert_eq!(revealed.text(), "hi");
/// assert!(!revealed.is_truncated());
/// # Ok::<(), vsbs::Error>(())
/// ```
#[derive(Debug)]
pub struct Package<S: FrameSource> {
    source: S,
}

impl<S: FrameSource> Package<S> {
    /// Creates a new [`Package<S>`] that reads the package frames from `source`.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Consumes the package, returning the source.
    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S: FrameSource> Reveal for Package<S> {
    fn reveal(mut self) -> Result<Revealed> {
        let Some(first) = self.source.next_frame()? else {
            return Err(Error::NoFrames);
        };

        let shape = first.shape();
        let declared_len = usize::from(codec::extract_byte(&first)?);
        drop(first);

        tracing::debug!(declared_len, shape = %shape, "revealing message");

        let mut bytes = Vec::with_capacity(declared_len);
        while bytes.len() < declared_len {
            let Some(frame) = self.source.next_frame()? else {
                break;
            };

            if frame.shape() != shape {
                return Err(Error::ShapeMismatch {
                    expected: shape,
                    found: frame.shape(),
                });
            }

            let byte = codec::extract_byte(&frame)?;
            tracing::trace!(index = bytes.len(), byte, "extracted payload unit");
            bytes.push(byte);
        }

        if bytes.len() < declared_len {
            tracing::warn!(
                recovered = bytes.len(),
                declared_len,
                "video ended before the whole message was revealed, message is truncated"
            );
        }

        let revealed = Revealed::decode(bytes, declared_len)?;
        tracing::debug!(len = revealed.text().len(), "message revealed");

        Ok(revealed)
    }
}

/// A message revealed from a package, possibly cut short by the end of the video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revealed {
    text: String,
    recovered_len: usize,
    declared_len: usize,
}

impl Revealed {
    fn decode(bytes: Vec<u8>, declared_len: usize) -> Result<Self> {
        let recovered_len = bytes.len();

        let text = String::from_utf8(bytes).map_err(|err| Error::InvalidEncodedText {
            valid_up_to: err.utf8_error().valid_up_to(),
            source: err.utf8_error(),
        })?;

        Ok(Self {
            text,
            recovered_len,
            declared_len,
        })
    }

    /// The revealed message.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consumes the result, returning the revealed message.
    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }

    /// The message length announced by the length prefix.
    #[must_use]
    pub fn declared_len(&self) -> usize {
        self.declared_len
    }

    /// Number of message bytes actually read from the video.
    #[must_use]
    pub fn recovered_len(&self) -> usize {
        self.recovered_len
    }

    /// Returns `true` if the video ended before the declared number of bytes was read.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.recovered_len < self.declared_len
    }
}
