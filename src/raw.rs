use crate::error::ConvertError;
use crate::record::{Header, HEADER_LEN};
use std::path::Path;

/// A binary record read back from disk.
#[derive(Debug)]
pub struct RawRecord {
    pub header: Header,
    pub data: Vec<f32>,
}

pub fn read_raw(path: &Path) -> Result<RawRecord, ConvertError> {
    let content = std::fs::read(path)?;
    parse_raw(&content)
}

pub fn parse_raw(content: &[u8]) -> Result<RawRecord, ConvertError> {
    if content.len() < HEADER_LEN {
        return Err(ConvertError::Malformed(format!(
            "{} bytes is shorter than the header",
            content.len()
        )));
    }

    let (head, payload) = content.split_at(HEADER_LEN);
    let header: Header = bytemuck::pod_read_unaligned(head);
    header.check()?;

    if payload.len() != header.payload_size as usize {
        return Err(ConvertError::Malformed(format!(
            "expected {} payload bytes, found {}",
            header.payload_size,
            payload.len()
        )));
    }

    let data = payload
        .chunks_exact(4)
        .map(bytemuck::pod_read_unaligned::<f32>)
        .collect();

    Ok(RawRecord { header, data })
}

#[cfg(test)]
mod tests {
    use super::{parse_raw, read_raw};
    use crate::error::ConvertError;
    use crate::gray::Gray32FImage;
    use crate::record::{write_record, Header, CV_32F};
    use crate::scratch::{scratch_path, Scratch};

    fn record_bytes(image: &Gray32FImage) -> Vec<u8> {
        let out = Scratch::new(scratch_path("bin"));
        write_record(&out, image).unwrap();
        std::fs::read(&*out).unwrap()
    }

    #[test]
    fn test_read_back() {
        fastrand::seed(7);
        let image = Gray32FImage::from_fn(5, 4, |_, _| [fastrand::u8(..) as f32].into());
        let out = Scratch::new(scratch_path("bin"));
        write_record(&out, &image).unwrap();

        let record = read_raw(&out).unwrap();

        assert_eq!(record.header, Header::for_image(5, 4).unwrap());
        assert_eq!(record.header.depth, CV_32F);
        assert_eq!(&record.data, image.as_raw());
        // row 3, col 4
        assert_eq!(record.data[3 * 5 + 4], image.get_pixel(4, 3).0[0]);
    }

    #[test]
    fn test_empty_image() {
        let record = parse_raw(&record_bytes(&Gray32FImage::new(0, 0))).unwrap();
        assert_eq!(record.header.payload_size, 0);
        assert!(record.data.is_empty());
    }

    #[test]
    fn test_truncated() {
        let bytes = record_bytes(&Gray32FImage::new(3, 3));

        for len in [0, 10, 23, 24, bytes.len() - 1] {
            let err = parse_raw(&bytes[..len]).err().unwrap();
            assert!(matches!(err, ConvertError::Malformed(_)), "len {}", len);
        }
    }

    #[test]
    fn test_trailing_bytes() {
        let mut bytes = record_bytes(&Gray32FImage::new(2, 2));
        bytes.extend_from_slice(&[0; 4]);
        assert!(parse_raw(&bytes).is_err());
    }

    #[test]
    fn test_wrong_channels() {
        let mut bytes = record_bytes(&Gray32FImage::new(2, 2));
        bytes[16..20].copy_from_slice(&3i32.to_ne_bytes());
        assert!(matches!(
            parse_raw(&bytes).err().unwrap(),
            ConvertError::Malformed(_)
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = read_raw(&scratch_path("bin")).err().unwrap();
        assert!(matches!(err, ConvertError::Io(_)));
    }
}
