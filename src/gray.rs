use crate::error::ConvertError;
use image::{
    DynamicImage, GrayImage, ImageBuffer, ImageDecoder, ImageError, ImageReader, Luma, RgbImage,
};
use log::debug;
use std::path::Path;

/// Single channel f32 image, row-major.
pub type Gray32FImage = ImageBuffer<Luma<f32>, Vec<f32>>;

/// Decode `path` as 8-bit grayscale and cast every sample to f32 (0..=255, no normalization).
///
/// EXIF orientation is applied, so rows and cols follow the displayed image.
pub fn decode_and_cast(path: &Path) -> Result<Gray32FImage, ConvertError> {
    let image = open_oriented(path).map_err(|source| ConvertError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        "decoded {} ({:?}, {}x{})",
        path.display(),
        image.color(),
        image.width(),
        image.height()
    );

    let luma = if image.color().has_color() {
        bt601_luma(&image.into_rgb8())
    } else {
        image.into_luma8()
    };
    let mut image_f32 = Gray32FImage::new(luma.width(), luma.height());

    for (x, y, pixel) in luma.enumerate_pixels() {
        image_f32.put_pixel(x, y, Luma([pixel.0[0] as f32]));
    }

    Ok(image_f32)
}

fn open_oriented(path: &Path) -> Result<DynamicImage, ImageError> {
    let mut decoder = ImageReader::open(path)?
        .with_guessed_format()?
        .into_decoder()?;
    let orientation = decoder.orientation()?;

    let mut image = DynamicImage::from_decoder(decoder)?;
    image.apply_orientation(orientation);
    Ok(image)
}

/// OpenCV's fixed-point RGB to gray: 0.299 R + 0.587 G + 0.114 B, 14-bit, rounded.
fn bt601_luma(rgb: &RgbImage) -> GrayImage {
    const R: u32 = 4899;
    const G: u32 = 9617;
    const B: u32 = 1868;

    let mut luma = GrayImage::new(rgb.width(), rgb.height());
    for (x, y, pixel) in rgb.enumerate_pixels() {
        let [r, g, b] = pixel.0;
        let v = (r as u32 * R + g as u32 * G + b as u32 * B + (1 << 13)) >> 14;
        luma.put_pixel(x, y, Luma([v as u8]));
    }
    luma
}
