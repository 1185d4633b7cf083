use crate::{
    video::{
        bits::{self, MsbFirst},
        sequencer::{self, Lsbs},
        PixelBuffer,
    },
    Error, Result,
};

/// Embeds a payload unit into the first eight least significant bits of `frame`.
///
/// The bits of `value` are written most significant first in raster order. Only the lowest
/// bit of exactly eight samples is replaced; every other bit of the frame is left as it was.
///
/// # Errors
///
/// Returns [`Error::InsufficientFrameBits`] if the frame holds fewer than eight samples, in
/// which case the frame is not modified.
///
/// # Examples
///
/// ```
/// use vsbs::video::{embed_byte, extract_byte, PixelBuffer, Shape};
///
/// let mut frame = PixelBuffer::new(Shape::new(4, 4, 3));
/// embed_byte(&mut frame, b'h')?;
///
/// assert_eq!(extract_byte(&frame)?, b'h');
/// # Ok::<(), vsbs::Error>(())
/// ```
pub fn embed_byte(frame: &mut PixelBuffer, value: u8) -> Result<()> {
    let samples = frame.shape().samples();
    let positions = sequencer::payload_positions(frame.shape())?;

    for (position, bit) in positions.into_iter().zip(MsbFirst::from(value)) {
        let sample = frame
            .get_mut(position.row, position.column, position.channel)
            .ok_or(Error::InsufficientFrameBits { samples })?;

        *sample = (*sample & !1) | bit;
    }

    Ok(())
}

/// Extracts the payload unit held by the first eight least significant bits of `frame`.
///
/// # Errors
///
/// Returns [`Error::InsufficientFrameBits`] if the frame holds fewer than eight samples.
pub fn extract_byte(frame: &PixelBuffer) -> Result<u8> {
    sequencer::payload_positions(frame.shape())?;

    Ok(bits::pack(Lsbs::new(frame).take(bits::BIT_DEPTH)))
}
