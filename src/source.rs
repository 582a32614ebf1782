use std::path::Path;

use image::{DynamicImage, Pixel, RgbImage, RgbaImage};

use crate::EncodeError;

/// Read-only access to a decoded image, visited by the encoder in
/// row-major order.
pub trait PixelSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// A 3- or 4-component 8-bit sample at `(x, y)`.
    fn sample(&self, x: u32, y: u32) -> &[u8];
}

impl PixelSource for RgbImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn sample(&self, x: u32, y: u32) -> &[u8] {
        self.get_pixel(x, y).channels()
    }
}

impl PixelSource for RgbaImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn sample(&self, x: u32, y: u32) -> &[u8] {
        self.get_pixel(x, y).channels()
    }
}

/// A decoded image normalized to 8-bit RGB, or RGBA when the source
/// carries an alpha channel.
#[derive(Debug, Clone)]
pub enum SourceImage {
    Rgb(RgbImage),
    Rgba(RgbaImage),
}

impl From<DynamicImage> for SourceImage {
    fn from(image: DynamicImage) -> Self {
        match image {
            DynamicImage::ImageRgb8(buffer) => Self::Rgb(buffer),
            DynamicImage::ImageRgba8(buffer) => Self::Rgba(buffer),
            other if other.color().has_alpha() => Self::Rgba(other.into_rgba8()),
            other => Self::Rgb(other.into_rgb8()),
        }
    }
}

impl PixelSource for SourceImage {
    fn width(&self) -> u32 {
        match self {
            Self::Rgb(buffer) => PixelSource::width(buffer),
            Self::Rgba(buffer) => PixelSource::width(buffer),
        }
    }

    fn height(&self) -> u32 {
        match self {
            Self::Rgb(buffer) => PixelSource::height(buffer),
            Self::Rgba(buffer) => PixelSource::height(buffer),
        }
    }

    fn sample(&self, x: u32, y: u32) -> &[u8] {
        match self {
            Self::Rgb(buffer) => buffer.sample(x, y),
            Self::Rgba(buffer) => buffer.sample(x, y),
        }
    }
}

/// Opens and decodes any image format supported by the `image` crate.
pub fn open(path: impl AsRef<Path>) -> Result<SourceImage, EncodeError> {
    let image = image::open(path)?;
    Ok(SourceImage::from(image))
}

#[cfg(test)]
mod tests {
    use image::{GrayImage, Luma, Rgb, Rgba};

    use super::*;

    #[test]
    fn rgba_sample_has_four_components() {
        let image = RgbaImage::from_pixel(2, 1, Rgba([1, 2, 3, 4]));
        assert_eq!(image.sample(1, 0), &[1, 2, 3, 4]);
    }

    #[test]
    fn grayscale_is_expanded_to_rgb() {
        let gray = DynamicImage::ImageLuma8(GrayImage::from_pixel(3, 2, Luma([77])));
        let source = SourceImage::from(gray);
        assert!(matches!(source, SourceImage::Rgb(_)));
        assert_eq!((source.width(), source.height()), (3, 2));
        assert_eq!(source.sample(2, 1), &[77, 77, 77]);
    }

    #[test]
    fn rgb_is_kept_as_is() {
        let rgb = DynamicImage::ImageRgb8(RgbImage::from_pixel(1, 1, Rgb([9, 8, 7])));
        assert_eq!(SourceImage::from(rgb).sample(0, 0), &[9, 8, 7]);
    }
}
