use crate::error::ConvertError;
use crate::gray::{decode_and_cast, Gray32FImage};
use crate::raw::read_raw;
use crate::record::{write_record, Header};
use log::debug;
use std::path::Path;

/// Decode `input` as grayscale and write it to `output` as a float32 record.
///
/// `on_decoded` receives `(width, height)` once decoding succeeded, before
/// anything is written. Nothing is created at `output` when decoding fails.
pub fn convert(
    input: &Path,
    output: &Path,
    verify: bool,
    on_decoded: impl FnOnce(u32, u32),
) -> Result<(), ConvertError> {
    let image = decode_and_cast(input)?;
    on_decoded(image.width(), image.height());

    write_record(output, &image)?;

    if verify {
        verify_record(output, &image)?;
    }

    Ok(())
}

fn verify_record(path: &Path, image: &Gray32FImage) -> Result<(), ConvertError> {
    let record = read_raw(path)?;

    if record.header != Header::for_image(image.width(), image.height())?
        || record.data != *image.as_raw()
    {
        return Err(ConvertError::Mismatch);
    }

    debug!("verified {}", path.display());
    Ok(())
}
