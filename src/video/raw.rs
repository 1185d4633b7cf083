use crate::video::{FrameSink, FrameSource, PixelBuffer, Shape, VideoInfo};
use std::io::{self, BufReader, BufWriter, ErrorKind, Read, Write};

/// Reads headerless raw video: packed 8-bit frames in raster order, one after another.
///
/// This is the layout `ffmpeg -f rawvideo -pix_fmt rgb24` produces for three-channel video.
/// Reading stops after `frame_count` frames or at end of input, whichever comes first.
///
/// # Examples
///
/// ```
/// use vsbs::video::{FrameSource, RawReader, Shape};
///
/// let stream = [0u8; 2 * 2 * 3 * 4];
/// let mut reader = RawReader::new(stream.as_slice(), Shape::new(2, 2, 3), 4, 25.0);
///
/// assert_eq!(reader.frame_count(), 4);
/// assert!(reader.next_frame()?.is_some());
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct RawReader<R: Read> {
    reader: BufReader<R>,
    info: VideoInfo,
    frames_read: usize,
}

impl<R: Read> RawReader<R> {
    /// Creates a new [`RawReader<R>`] yielding up to `frame_count` frames of `shape` from `reader`.
    ///
    /// The frame count and rate cannot be read from a headerless stream, so they are supplied
    /// by the caller and reported back through [`FrameSource::info`].
    #[must_use]
    pub fn new(reader: R, shape: Shape, frame_count: usize, frame_rate: f64) -> Self {
        Self {
            reader: BufReader::new(reader),
            info: VideoInfo {
                frame_count,
                shape,
                frame_rate,
            },
            frames_read: 0,
        }
    }

    /// Consumes the reader, returning the underlying stream.
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }

    fn fill(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut filled = 0usize;

        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }

        Ok(filled)
    }
}

impl<R: Read> FrameSource for RawReader<R> {
    fn info(&self) -> VideoInfo {
        self.info
    }

    fn next_frame(&mut self) -> io::Result<Option<PixelBuffer>> {
        if self.frames_read == self.info.frame_count {
            return Ok(None);
        }

        let mut data = vec![0; self.info.shape.samples()];
        match self.fill(&mut data)? {
            0 => {
                tracing::debug!(
                    frames_read = self.frames_read,
                    frame_count = self.info.frame_count,
                    "raw video ended early"
                );
                return Ok(None);
            }
            n if n < data.len() => {
                return Err(io::Error::new(
                    ErrorKind::UnexpectedEof,
                    format!(
                        "raw frame {} is {n} bytes, expected {}",
                        self.frames_read,
                        data.len()
                    ),
                ))
            }
            _ => {}
        }

        self.frames_read += 1;

        PixelBuffer::from_vec(self.info.shape, data)
            .map(Some)
            .map_err(|err| io::Error::new(ErrorKind::InvalidData, err))
    }
}

/// Writes headerless raw video, the counterpart of [`RawReader`].
///
/// Samples are stored verbatim, so the sink is lossless.
#[derive(Debug)]
pub struct RawWriter<W: Write> {
    writer: BufWriter<W>,
    shape: Shape,
}

impl<W: Write> RawWriter<W> {
    /// Creates a new [`RawWriter<W>`] that accepts frames of `shape` and writes them to `writer`.
    ///
    /// # Examples
    ///
    /// ```
    /// use vsbs::video::{FrameSink, PixelBuffer, RawWriter, Shape};
    ///
    /// let shape = Shape::new(2, 2, 3);
    /// let mut writer = RawWriter::new(Vec::new(), shape);
    ///
    /// writer.write_frame(PixelBuffer::new(shape))?;
    /// writer.finish()?;
    ///
    /// assert_eq!(writer.into_inner()?.len(), 12);
    /// # Ok::<(), std::io::Error>(())
    /// ```
    #[must_use]
    pub fn new(writer: W, shape: Shape) -> Self {
        Self {
            writer: BufWriter::new(writer),
            shape,
        }
    }

    /// Flushes buffered frames and returns the underlying stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffered frames cannot be flushed.
    pub fn into_inner(self) -> io::Result<W> {
        self.writer.into_inner().map_err(io::IntoInnerError::into_error)
    }
}

impl<W: Write> FrameSink for RawWriter<W> {
    fn write_frame(&mut self, frame: PixelBuffer) -> io::Result<()> {
        if frame.shape() != self.shape {
            return Err(io::Error::new(
                ErrorKind::InvalidInput,
                format!("frame shape {} does not match {}", frame.shape(), self.shape),
            ));
        }

        self.writer.write_all(frame.as_bytes())
    }

    fn is_lossless(&self) -> bool {
        true
    }

    fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
