/// Number of bits in a payload unit, and thus the number of samples it occupies in a frame.
pub const BIT_DEPTH: usize = 8;

/// The bits of a payload unit, most significant first.
pub(super) struct MsbFirst {
    byte: u8,
    offset: usize,
}

impl From<u8> for MsbFirst {
    fn from(value: u8) -> Self {
        Self {
            byte: value,
            offset: 0,
        }
    }
}

impl Iterator for MsbFirst {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset == BIT_DEPTH {
            return None;
        }

        let bit = (self.byte >> (BIT_DEPTH - 1 - self.offset)) & 1;
        self.offset += 1;

        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = BIT_DEPTH - self.offset;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MsbFirst {}

/// Reassembles bits, most significant first, into a payload unit.
pub(super) fn pack<I: IntoIterator<Item = u8>>(bits: I) -> u8 {
    bits.into_iter().fold(0, |byte, bit| (byte << 1) | (bit & 1))
}
