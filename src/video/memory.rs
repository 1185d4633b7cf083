use crate::{
    video::{FrameSink, FrameSource, PixelBuffer, Shape, VideoInfo},
    Error, Result,
};
use std::{collections::VecDeque, io};

/// A decoded video held entirely in memory.
///
/// Frames are yielded in the order they were given and removed as they are read.
#[derive(Debug, Clone)]
pub struct MemoryVideo {
    info: VideoInfo,
    frames: VecDeque<PixelBuffer>,
}

impl MemoryVideo {
    /// Creates a video from frames that all share one shape.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if a frame differs in shape from the first one.
    pub fn new(frames: Vec<PixelBuffer>, frame_rate: f64) -> Result<Self> {
        let shape = frames.first().map(PixelBuffer::shape).unwrap_or_default();

        if let Some(frame) = frames.iter().find(|frame| frame.shape() != shape) {
            return Err(Error::ShapeMismatch {
                expected: shape,
                found: frame.shape(),
            });
        }

        Ok(Self {
            info: VideoInfo {
                frame_count: frames.len(),
                shape,
                frame_rate,
            },
            frames: frames.into(),
        })
    }

    /// Frames not yet read.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }

    /// Shape shared by every frame, or an empty shape for a video without frames.
    #[must_use]
    pub fn shape(&self) -> Shape {
        self.info.shape
    }
}

impl FrameSource for MemoryVideo {
    fn info(&self) -> VideoInfo {
        self.info
    }

    fn next_frame(&mut self) -> io::Result<Option<PixelBuffer>> {
        Ok(self.frames.pop_front())
    }
}

impl FrameSink for Vec<PixelBuffer> {
    fn write_frame(&mut self, frame: PixelBuffer) -> io::Result<()> {
        self.push(frame);
        Ok(())
    }

    fn is_lossless(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yields_frames_in_order() {
        let shape = Shape::new(1, 1, 1);
        let frames = (0..3)
            .map(|i| PixelBuffer::from_vec(shape, vec![i]).unwrap())
            .collect();

        let mut video = MemoryVideo::new(frames, 30.0).unwrap();
        assert_eq!(video.shape(), shape);
        assert_eq!(video.frame_count(), 3);
        assert_eq!(video.frame_rate(), 30.0);

        for i in 0..3 {
            assert_eq!(video.next_frame().unwrap().unwrap().as_bytes(), [i]);
        }
        assert!(video.next_frame().unwrap().is_none());
        assert_eq!(video.remaining(), 0);
    }

    #[test]
    fn empty_videos_have_an_empty_shape() {
        let video = MemoryVideo::new(Vec::new(), 30.0).unwrap();

        assert_eq!(video.shape(), Shape::default());
        assert_eq!(video.frame_count(), 0);
    }

    #[test]
    fn rejects_mixed_shapes() {
        let frames = vec![
            PixelBuffer::new(Shape::new(2, 2, 3)),
            PixelBuffer::new(Shape::new(2, 3, 3)),
        ];

        assert!(matches!(
            MemoryVideo::new(frames, 30.0),
            Err(Error::ShapeMismatch { .. })
        ));
    }
}
