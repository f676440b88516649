use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Could not open or find the image {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image of {rows}x{cols} does not fit an int32 record header")]
    TooLarge { rows: u32, cols: u32 },
    #[error("Malformed record: {0}")]
    Malformed(String),
    #[error("Record read back does not match the converted image")]
    Mismatch,
}

impl ConvertError {
    /// Decode failures happen before any output is written.
    pub fn is_decode(&self) -> bool {
        matches!(self, ConvertError::Decode { .. })
    }
}
