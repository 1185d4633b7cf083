use crate::{
    video::{bits::BIT_DEPTH, PixelBuffer, Shape},
    Error, Result,
};

/// Coordinates of a single channel sample within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub column: usize,
    pub channel: usize,
}

/// A raster-order walk over the sample positions of a frame shape.
///
/// Rows advance slowest and channels fastest: every channel of column 0 in row 0 comes
/// first, then column 1 of row 0, and so on. The walk keeps explicit counters rather than
/// borrowing the frame, so a fresh one can be started for every frame.
///
/// # Examples
///
/// ```
/// use vsbs::video::{Position, Raster, Shape};
///
/// let mut raster = Raster::new(Shape::new(2, 2, 3));
///
/// assert_eq!(raster.nth(4), Some(Position { row: 0, column: 1, channel: 1 }));
/// assert_eq!(raster.count(), 7);
/// ```
#[derive(Debug, Clone)]
pub struct Raster {
    shape: Shape,
    next: Option<Position>,
}

impl Raster {
    /// Starts a walk at the first sample of a frame of the given shape.
    #[must_use]
    pub fn new(shape: Shape) -> Self {
        let next = (shape.samples() > 0).then_some(Position {
            row: 0,
            column: 0,
            channel: 0,
        });

        Self { shape, next }
    }
}

impl Iterator for Raster {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;

        let mut following = current;
        following.channel += 1;
        if following.channel == self.shape.channels {
            following.channel = 0;
            following.column += 1;
        }
        if following.column == self.shape.width {
            following.column = 0;
            following.row += 1;
        }

        self.next = (following.row < self.shape.height).then_some(following);

        Some(current)
    }
}

/// Least significant bits of a frame's samples, in [`Raster`] order.
#[derive(Debug, Clone)]
pub struct Lsbs<'a> {
    frame: &'a PixelBuffer,
    raster: Raster,
}

impl<'a> Lsbs<'a> {
    /// Starts reading bits at the first sample of `frame`.
    #[must_use]
    pub fn new(frame: &'a PixelBuffer) -> Self {
        Self {
            frame,
            raster: Raster::new(frame.shape()),
        }
    }
}

impl Iterator for Lsbs<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        let Position {
            row,
            column,
            channel,
        } = self.raster.next()?;

        self.frame.get(row, column, channel).map(|sample| sample & 1)
    }
}

/// The first [`BIT_DEPTH`] positions of a frame, which carry its payload unit.
pub(super) fn payload_positions(shape: Shape) -> Result<[Position; BIT_DEPTH]> {
    let mut raster = Raster::new(shape);
    let mut positions = [Position {
        row: 0,
        column: 0,
        channel: 0,
    }; BIT_DEPTH];

    for slot in &mut positions {
        *slot = raster.next().ok_or(Error::InsufficientFrameBits {
            samples: shape.samples(),
        })?;
    }

    Ok(positions)
}
