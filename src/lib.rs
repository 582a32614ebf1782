//! Encoder for QOI565, a variant of the "Quite OK Image" format that trades
//! 24-bit RGB for 16-bit RGB565 before applying the usual QOI operators.
//!
//! Alpha is discarded and no end-of-stream marker is written.

mod encode;
mod error;
mod rgb565;
mod source;

pub use encode::*;
pub use error::EncodeError;
pub use rgb565::Rgb565;
pub use source::{PixelSource, SourceImage, open};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    pub width: u32,
    pub height: u32,
    pub channels: Channels,
    pub colorspace: Colorspace,
}

impl Header {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// The 14 header bytes, multi-byte fields big-endian.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        bytes[0..4].copy_from_slice(MAGIC);
        bytes[4..8].copy_from_slice(&self.width.to_be_bytes());
        bytes[8..12].copy_from_slice(&self.height.to_be_bytes());
        bytes[12] = self.channels as u8;
        bytes[13] = self.colorspace as u8;
        bytes
    }
}

pub const MAGIC: &[u8; 4] = b"qoif";
pub const HEADER_LEN: usize = 14;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Channels {
    /// Custom marker, not part of the upstream QOI format.
    #[default]
    Rgb565 = 200,
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Colorspace {
    #[default]
    Srgb = 0,
}
