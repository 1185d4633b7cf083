use crate::{
    video::{codec, FrameSink, FrameSource, BIT_DEPTH, MAX_MESSAGE_LEN},
    Conceal, Error, Result,
};
use std::iter;

/// A video carrier that can conceal a steganographic message.
///
/// In the [`conceal`][crate::Conceal::conceal] method the message length is embedded into
/// the first cover frame, followed by one message byte per frame. Every frame of the cover,
/// modified or not, is written to the sink in the order it was read, so the output has
/// exactly as many frames as the cover.
///
/// The message is validated against the cover before any frame is read, so an oversized
/// message never leaves a half-written output behind.
///
/// # Examples
///
/// Concealing a secret message in an in-memory video:
///
/// ```
/// use vsbs::{video, Conceal};
///
/// let shape = video::Shape::new(4, 4, 3);
/// let cover = video::MemoryVideo::new(vec![video::PixelBuffer::new(shape); 10], 30.0)?;
///
/// let mut package: Vec<video::PixelBuffer> = Vec::new();
///
/// let frames_written = video::Carrier::new(&mut package).conceal(b"hi", cover)?;
/// assert_eq!(frames_written, 10);
/// # Ok::<(), vsbs::Error>(())
/// ```
#[derive(Debug)]
pub struct Carrier<K: FrameSink> {
    sink: K,
}

impl<K: FrameSink> Carrier<K> {
    /// Creates a new [`Carrier<K>`] that writes the package frames into `sink`.
    #[must_use]
    pub fn new(sink: K) -> Self {
        Self { sink }
    }

    /// Consumes the carrier, returning the sink.
    pub fn into_inner(self) -> K {
        self.sink
    }
}

impl<K: FrameSink> Conceal for Carrier<K> {
    fn conceal<S: FrameSource>(mut self, payload: &[u8], mut cover: S) -> Result<usize> {
        if !self.sink.is_lossless() {
            return Err(Error::LossySink);
        }

        let info = cover.info();
        if info.frame_count == 0 {
            return Err(Error::NoFrames);
        }

        let len = u8::try_from(payload.len()).map_err(|_| Error::MessageTooLong {
            len: payload.len(),
            max: MAX_MESSAGE_LEN,
        })?;

        if payload.len() > info.capacity() {
            return Err(Error::MessageTooLong {
                len: payload.len(),
                max: info.capacity(),
            });
        }

        if info.shape.samples() < BIT_DEPTH {
            return Err(Error::InsufficientFrameBits {
                samples: info.shape.samples(),
            });
        }

        tracing::debug!(
            len = payload.len(),
            capacity = info.capacity(),
            frames = info.frame_count,
            shape = %info.shape,
            "concealing message"
        );

        let mut units = iter::once(len).chain(payload.iter().copied());
        let mut units_embedded = 0usize;
        let mut frames_written = 0usize;

        while let Some(mut frame) = cover.next_frame()? {
            if frame.shape() != info.shape {
                return Err(Error::ShapeMismatch {
                    expected: info.shape,
                    found: frame.shape(),
                });
            }

            if let Some(unit) = units.next() {
                codec::embed_byte(&mut frame, unit)?;
                tracing::trace!(frame = frames_written, unit, "embedded payload unit");
                units_embedded += 1;
            }

            self.sink.write_frame(frame)?;
            frames_written += 1;
        }

        // Errors returned before this point skip `finish`; the sink is still dropped with `self`.
        self.sink.finish()?;

        let embedded = units_embedded.saturating_sub(1);
        if embedded < payload.len() || units_embedded == 0 {
            tracing::warn!(
                embedded,
                expected = payload.len(),
                frames_written,
                "cover ran out of frames"
            );

            return Err(Error::CoverExhausted {
                embedded,
                expected: payload.len(),
            });
        }

        tracing::debug!(frames_written, "message concealed");

        Ok(frames_written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::{extract_byte, MemoryVideo, PixelBuffer, Shape, VideoInfo};
    use std::{
        collections::VecDeque,
        io,
        sync::{
            atomic::{AtomicBool, Ordering},
            Arc,
        },
    };

    /// Yields the given frames while reporting `info`, and sets `released` once dropped.
    struct TrackedCover {
        info: VideoInfo,
        frames: VecDeque<PixelBuffer>,
        released: Arc<AtomicBool>,
    }

    impl FrameSource for TrackedCover {
        fn info(&self) -> VideoInfo {
            self.info
        }

        fn next_frame(&mut self) -> io::Result<Option<PixelBuffer>> {
            Ok(self.frames.pop_front())
        }
    }

    impl Drop for TrackedCover {
        fn drop(&mut self) {
            self.released.store(true, Ordering::SeqCst);
        }
    }

    #[derive(Default)]
    struct TrackedSink {
        finished: Arc<AtomicBool>,
        released: Arc<AtomicBool>,
    }

    impl FrameSink for TrackedSink {
        fn write_frame(&mut self, _frame: PixelBuffer) -> io::Result<()> {
            Ok(())
        }

        fn is_lossless(&self) -> bool {
            true
        }

        fn finish(&mut self) -> io::Result<()> {
            self.finished.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    impl Drop for TrackedSink {
        fn drop(&mut self) {
            self.released.store(true, Ordering::SeqCst);
        }
    }

    fn tracked_cover(
        frames: Vec<PixelBuffer>,
        frame_count: usize,
    ) -> (TrackedCover, Arc<AtomicBool>) {
        let released = Arc::new(AtomicBool::new(false));
        let cover = TrackedCover {
            info: VideoInfo {
                frame_count,
                shape: Shape::new(4, 4, 3),
                frame_rate: 24.0,
            },
            frames: frames.into(),
            released: Arc::clone(&released),
        };

        (cover, released)
    }

    fn cover(frames: usize) -> MemoryVideo {
        let shape = Shape::new(4, 4, 3);
        MemoryVideo::new(vec![PixelBuffer::new(shape); frames], 24.0).unwrap()
    }

    struct LossySink;

    impl FrameSink for LossySink {
        fn write_frame(&mut self, _frame: PixelBuffer) -> io::Result<()> {
            Ok(())
        }

        fn is_lossless(&self) -> bool {
            false
        }
    }

    /// Reports more frames than it actually yields.
    struct ShortCover {
        inner: MemoryVideo,
        reported: usize,
    }

    impl FrameSource for ShortCover {
        fn info(&self) -> VideoInfo {
            VideoInfo {
                frame_count: self.reported,
                ..self.inner.info()
            }
        }

        fn next_frame(&mut self) -> io::Result<Option<PixelBuffer>> {
            self.inner.next_frame()
        }
    }

    #[test]
    fn embeds_length_then_message_bytes() {
        let mut package: Vec<PixelBuffer> = Vec::new();
        Carrier::new(&mut package).conceal(b"hi", cover(10)).unwrap();

        assert_eq!(package.len(), 10);
        assert_eq!(extract_byte(&package[0]).unwrap(), 2);
        assert_eq!(extract_byte(&package[1]).unwrap(), b'h');
        assert_eq!(extract_byte(&package[2]).unwrap(), b'i');

        let blank = PixelBuffer::new(Shape::new(4, 4, 3));
        assert!(package[3..].iter().all(|frame| *frame == blank));
    }

    #[test]
    fn rejects_messages_longer_than_the_cover() {
        let mut package: Vec<PixelBuffer> = Vec::new();
        let err = Carrier::new(&mut package)
            .conceal(b"0123456789", cover(10))
            .unwrap_err();

        assert!(matches!(err, Error::MessageTooLong { len: 10, max: 9 }));
        assert!(package.is_empty());
    }

    #[test]
    fn rejects_messages_longer_than_the_length_prefix() {
        let mut package: Vec<PixelBuffer> = Vec::new();
        let err = Carrier::new(&mut package)
            .conceal(&[b'x'; 256], cover(300))
            .unwrap_err();

        assert!(matches!(err, Error::MessageTooLong { len: 256, max: 255 }));
        assert!(package.is_empty());
    }

    #[test]
    fn rejects_lossy_sinks() {
        let err = Carrier::new(LossySink).conceal(b"hi", cover(10)).unwrap_err();
        assert!(matches!(err, Error::LossySink));
    }

    #[test]
    fn rejects_empty_covers() {
        let mut package: Vec<PixelBuffer> = Vec::new();
        let err = Carrier::new(&mut package).conceal(b"", cover(0)).unwrap_err();
        assert!(matches!(err, Error::NoFrames));
    }

    #[test]
    fn rejects_frames_too_small_for_a_byte() {
        let tiny = MemoryVideo::new(vec![PixelBuffer::new(Shape::new(1, 2, 3)); 4], 24.0).unwrap();

        let mut package: Vec<PixelBuffer> = Vec::new();
        let err = Carrier::new(&mut package).conceal(b"a", tiny).unwrap_err();

        assert!(matches!(err, Error::InsufficientFrameBits { samples: 6 }));
        assert!(package.is_empty());
    }

    #[test]
    fn forwards_every_frame_when_the_cover_ends_early() {
        let short = ShortCover {
            inner: cover(3),
            reported: 10,
        };

        let mut package: Vec<PixelBuffer> = Vec::new();
        let err = Carrier::new(&mut package).conceal(b"hello", short).unwrap_err();

        assert!(matches!(
            err,
            Error::CoverExhausted {
                embedded: 2,
                expected: 5
            }
        ));
        assert_eq!(package.len(), 3);
    }

    #[test]
    fn releases_handles_when_a_frame_changes_shape() {
        let frames = vec![
            PixelBuffer::new(Shape::new(4, 4, 3)),
            PixelBuffer::new(Shape::new(4, 4, 3)),
            PixelBuffer::new(Shape::new(4, 4, 4)),
            PixelBuffer::new(Shape::new(4, 4, 3)),
        ];
        let (cover, cover_released) = tracked_cover(frames, 4);

        let sink = TrackedSink::default();
        let finished = Arc::clone(&sink.finished);
        let sink_released = Arc::clone(&sink.released);

        let err = Carrier::new(sink).conceal(b"ab", cover).unwrap_err();

        assert!(matches!(err, Error::ShapeMismatch { .. }));
        assert!(cover_released.load(Ordering::SeqCst));
        assert!(sink_released.load(Ordering::SeqCst));
        assert!(!finished.load(Ordering::SeqCst));
    }

    #[test]
    fn releases_handles_when_the_cover_ends_early() {
        let frames = vec![PixelBuffer::new(Shape::new(4, 4, 3)); 2];
        let (cover, cover_released) = tracked_cover(frames, 8);

        let sink = TrackedSink::default();
        let finished = Arc::clone(&sink.finished);
        let sink_released = Arc::clone(&sink.released);

        let err = Carrier::new(sink).conceal(b"abcd", cover).unwrap_err();

        assert!(matches!(
            err,
            Error::CoverExhausted {
                embedded: 1,
                expected: 4
            }
        ));
        assert!(cover_released.load(Ordering::SeqCst));
        assert!(sink_released.load(Ordering::SeqCst));
        assert!(finished.load(Ordering::SeqCst));
    }

    #[test]
    fn releases_handles_when_the_message_is_too_long() {
        let frames = vec![PixelBuffer::new(Shape::new(4, 4, 3)); 3];
        let (cover, cover_released) = tracked_cover(frames, 3);

        let sink = TrackedSink::default();
        let sink_released = Arc::clone(&sink.released);

        let err = Carrier::new(sink).conceal(b"abc", cover).unwrap_err();

        assert!(matches!(err, Error::MessageTooLong { len: 3, max: 2 }));
        assert!(cover_released.load(Ordering::SeqCst));
        assert!(sink_released.load(Ordering::SeqCst));
    }
}
