use crate::{Error, Result};
use std::{fmt, io};

/// The greatest message length the one-byte length prefix can describe.
pub const MAX_MESSAGE_LEN: usize = u8::MAX as usize;

/// Dimensions of a frame: rows, columns and samples per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Shape {
    pub height: usize,
    pub width: usize,
    pub channels: usize,
}

impl Shape {
    /// Creates a shape of `height` rows, `width` columns and `channels` samples per pixel.
    ///
    /// # Examples
    ///
    /// ```
    /// use vsbs::video::Shape;
    ///
    /// let shape = Shape::new(480, 640, 3);
    /// assert_eq!(shape.samples(), 921_600);
    /// ```
    #[must_use]
    pub const fn new(height: usize, width: usize, channels: usize) -> Self {
        Self {
            height,
            width,
            channels,
        }
    }

    /// Total number of channel samples in a frame of this shape.
    #[must_use]
    pub const fn samples(&self) -> usize {
        self.height * self.width * self.channels
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.height, self.width, self.channels)
    }
}

/// A decoded video frame: unsigned 8-bit samples indexed by row, column and channel.
///
/// Samples are stored in raster order, so the sample at `(row, column, channel)` lives at
/// `(row * width + column) * channels + channel`.
///
/// # Examples
///
/// ```
/// use vsbs::video::{PixelBuffer, Shape};
///
/// let shape = Shape::new(1, 2, 3);
/// let frame = PixelBuffer::from_vec(shape, vec![0, 1, 2, 3, 4, 5])?;
///
/// assert_eq!(frame.get(0, 1, 2), Some(5));
/// # Ok::<(), vsbs::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    shape: Shape,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Creates a frame of the given shape with every sample set to zero.
    #[must_use]
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            data: vec![0; shape.samples()],
        }
    }

    /// Wraps raster-ordered samples as a frame of the given shape.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferSize`] if `data` does not hold exactly `shape.samples()` values.
    pub fn from_vec(shape: Shape, data: Vec<u8>) -> Result<Self> {
        if data.len() != shape.samples() {
            return Err(Error::BufferSize {
                expected: shape.samples(),
                found: data.len(),
            });
        }

        Ok(Self { shape, data })
    }

    /// Dimensions of the frame.
    #[must_use]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Returns the sample at the given coordinates, or `None` if they are out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, column: usize, channel: usize) -> Option<u8> {
        self.index(row, column, channel).map(|i| self.data[i])
    }

    /// Returns a mutable reference to the sample at the given coordinates.
    pub fn get_mut(&mut self, row: usize, column: usize, channel: usize) -> Option<&mut u8> {
        self.index(row, column, channel).map(|i| &mut self.data[i])
    }

    /// All samples in raster order.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the frame, returning its samples in raster order.
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    fn index(&self, row: usize, column: usize, channel: usize) -> Option<usize> {
        let Shape {
            height,
            width,
            channels,
        } = self.shape;

        (row < height && column < width && channel < channels)
            .then(|| (row * width + column) * channels + channel)
    }
}

/// Properties of a video stream reported by its [`FrameSource`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoInfo {
    pub frame_count: usize,
    pub shape: Shape,
    pub frame_rate: f64,
}

impl VideoInfo {
    /// Columns per frame.
    #[must_use]
    pub fn width(&self) -> usize {
        self.shape.width
    }

    /// Rows per frame.
    #[must_use]
    pub fn height(&self) -> usize {
        self.shape.height
    }

    /// Samples per pixel.
    #[must_use]
    pub fn channels(&self) -> usize {
        self.shape.channels
    }

    /// Number of message bytes the frames can carry: one frame is taken by the length prefix.
    #[must_use]
    pub fn max_payload_bytes(&self) -> usize {
        self.frame_count.saturating_sub(1)
    }

    /// Longest message that can be concealed, bounded by both the frames and the prefix.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.max_payload_bytes().min(MAX_MESSAGE_LEN)
    }
}

/// A stream of decoded frames, read in order.
///
/// Every frame yielded must have the shape reported by [`info`][FrameSource::info].
pub trait FrameSource {
    /// Frame count, frame shape and frame rate of the stream.
    fn info(&self) -> VideoInfo;

    /// Reads the next frame, or returns `None` once the stream is exhausted.
    ///
    /// # Errors
    ///
    /// Returns any error the underlying decoder or reader encounters.
    fn next_frame(&mut self) -> io::Result<Option<PixelBuffer>>;

    /// Number of frames the stream reports, which bounds the message capacity.
    fn frame_count(&self) -> usize {
        self.info().frame_count
    }

    /// Columns per frame.
    fn width(&self) -> usize {
        self.info().width()
    }

    /// Rows per frame.
    fn height(&self) -> usize {
        self.info().height()
    }

    /// Frames per second.
    fn frame_rate(&self) -> f64 {
        self.info().frame_rate
    }
}

/// A destination for frames, written in order.
///
/// Concealed bits only survive sinks that store samples exactly as given; a sink
/// that re-quantizes or lossily compresses must report so via
/// [`is_lossless`][FrameSink::is_lossless].
pub trait FrameSink {
    /// Writes a frame after all previously written ones.
    ///
    /// # Errors
    ///
    /// Returns any error the underlying encoder or writer encounters.
    fn write_frame(&mut self, frame: PixelBuffer) -> io::Result<()>;

    /// Returns `true` if every written sample is stored exactly as given.
    fn is_lossless(&self) -> bool;

    /// Flushes any buffered frames. Called once after the last frame was written.
    ///
    /// # Errors
    ///
    /// Returns any error the underlying encoder or writer encounters.
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S: FrameSource + ?Sized> FrameSource for &mut S {
    fn info(&self) -> VideoInfo {
        (**self).info()
    }

    fn next_frame(&mut self) -> io::Result<Option<PixelBuffer>> {
        (**self).next_frame()
    }
}

impl<K: FrameSink + ?Sized> FrameSink for &mut K {
    fn write_frame(&mut self, frame: PixelBuffer) -> io::Result<()> {
        (**self).write_frame(frame)
    }

    fn is_lossless(&self) -> bool {
        (**self).is_lossless()
    }

    fn finish(&mut self) -> io::Result<()> {
        (**self).finish()
    }
}
