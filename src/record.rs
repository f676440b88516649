use crate::error::ConvertError;
use crate::gray::Gray32FImage;
use bytemuck::Zeroable;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// OpenCV's depth code for 32-bit float samples.
pub const CV_32F: i32 = 5;

pub const HEADER_LEN: usize = std::mem::size_of::<Header>();

/// Fixed header preceding the float payload, native byte order.
///
/// `depth` and `ty` both carry [`CV_32F`], never the full OpenCV type code.
#[repr(C)]
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub struct Header {
    pub rows: i32,
    pub cols: i32,
    pub depth: i32,
    pub ty: i32,
    pub channels: i32,
    pub payload_size: i32,
}

unsafe impl Zeroable for Header {}
unsafe impl bytemuck::Pod for Header {}

impl Header {
    pub fn for_image(width: u32, height: u32) -> Result<Self, ConvertError> {
        let too_large = || ConvertError::TooLarge {
            rows: height,
            cols: width,
        };

        let rows = i32::try_from(height).map_err(|_| too_large())?;
        let cols = i32::try_from(width).map_err(|_| too_large())?;
        let payload_size = rows
            .checked_mul(cols)
            .and_then(|n| n.checked_mul(std::mem::size_of::<f32>() as i32))
            .ok_or_else(too_large)?;

        Ok(Self {
            rows,
            cols,
            depth: CV_32F,
            ty: CV_32F,
            channels: 1,
            payload_size,
        })
    }

    /// Number of f32 samples in the payload.
    pub fn samples(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    pub fn check(&self) -> Result<(), ConvertError> {
        if self.rows < 0 || self.cols < 0 {
            return Err(ConvertError::Malformed(format!(
                "negative dimensions {}x{}",
                self.rows, self.cols
            )));
        }
        if self.depth != CV_32F || self.ty != CV_32F {
            return Err(ConvertError::Malformed(format!(
                "unsupported depth/type tags {}/{}",
                self.depth, self.ty
            )));
        }
        if self.channels != 1 {
            return Err(ConvertError::Malformed(format!(
                "expected 1 channel, found {}",
                self.channels
            )));
        }
        if self.payload_size as i64 != self.samples() as i64 * 4 {
            return Err(ConvertError::Malformed(format!(
                "payload size {} does not match {}x{}",
                self.payload_size, self.rows, self.cols
            )));
        }
        Ok(())
    }
}

/// Write header and payload to `path`, creating or truncating it.
///
/// A failed write can leave a partial file behind.
pub fn write_record(path: &Path, image: &Gray32FImage) -> Result<(), ConvertError> {
    let header = Header::for_image(image.width(), image.height())?;

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writer.write_all(bytemuck::bytes_of(&header))?;
    writer.write_all(bytemuck::cast_slice(image.as_raw()))?;
    writer.flush()?;

    info!(
        "wrote {} ({} bytes)",
        path.display(),
        HEADER_LEN + header.payload_size as usize
    );

    Ok(())
}
