/// A color quantized to 5 bits red, 6 bits green and 5 bits blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb565 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb565 {
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r >> 3,
            g: g >> 2,
            b: b >> 3,
        }
    }

    /// Quantizes a 3- or 4-component sample. Anything past blue is ignored.
    pub fn from_sample(sample: &[u8]) -> Self {
        let [r, g, b] = [sample[0], sample[1], sample[2]];
        Self::from_rgb(r, g, b)
    }

    pub fn packed(self) -> u16 {
        let [r, g, b] = [self.r, self.g, self.b].map(u16::from);
        (r << 11) | (g << 5) | b
    }

    /// Slot in the 64-entry index cache.
    pub fn hash(self) -> usize {
        let [r, g, b] = [self.r, self.g, self.b].map(usize::from);
        (r * 3 + g * 5 + b * 7) % 64
    }

    pub(crate) fn signed(self) -> [i16; 3] {
        [self.r, self.g, self.b].map(i16::from)
    }

    /// Payload of OP_RGB: `rrrrrggg gggbbbbb`.
    pub(crate) fn to_raw_bytes(self) -> [u8; 2] {
        self.packed().to_be_bytes()
    }
}
