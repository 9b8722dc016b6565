use bytes::Bytes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Webp,
    Bmp,
}

impl ImageFormat {
    /// Identifies an image by its leading magic bytes.
    pub fn sniff(data: &[u8]) -> Option<ImageFormat> {
        match data {
            [0xFF, 0xD8, 0xFF, ..] => Some(ImageFormat::Jpeg),
            [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some(ImageFormat::Png),
            [b'G', b'I', b'F', b'8', ..] => Some(ImageFormat::Gif),
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => {
                Some(ImageFormat::Webp)
            }
            [b'B', b'M', ..] => Some(ImageFormat::Bmp),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Png => "png",
            ImageFormat::Gif => "gif",
            ImageFormat::Webp => "webp",
            ImageFormat::Bmp => "bmp",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoverImage {
    pub format: ImageFormat,
    pub bytes: Bytes,
}

impl CoverImage {
    pub fn decode(bytes: Bytes) -> anyhow::Result<CoverImage> {
        match ImageFormat::sniff(&bytes) {
            Some(format) => Ok(CoverImage { format, bytes }),
            None => Err(anyhow::Error::msg(format!(
                "unrecognised image data ({} bytes)",
                bytes.len()
            ))),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::{CoverImage, ImageFormat};

    #[test]
    fn sniff_known_formats() {
        assert_eq!(
            Some(ImageFormat::Jpeg),
            ImageFormat::sniff(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10])
        );
        assert_eq!(
            Some(ImageFormat::Png),
            ImageFormat::sniff(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00])
        );
        assert_eq!(Some(ImageFormat::Gif), ImageFormat::sniff(b"GIF89a\x00\x00"));
        assert_eq!(
            Some(ImageFormat::Webp),
            ImageFormat::sniff(b"RIFF\x00\x00\x00\x00WEBP")
        );
        assert_eq!(Some(ImageFormat::Bmp), ImageFormat::sniff(b"BM\x00\x00"));
    }

    #[test]
    fn sniff_rejects_truncated_and_text() {
        assert_eq!(None, ImageFormat::sniff(&[]));
        assert_eq!(None, ImageFormat::sniff(&[0xFF, 0xD8]));
        assert_eq!(None, ImageFormat::sniff(b"RIFF\x00\x00\x00\x00WAVE"));
        assert_eq!(None, ImageFormat::sniff(b"<html>not found</html>"));
    }

    #[test]
    fn decode_keeps_bytes() -> anyhow::Result<()> {
        let data = Bytes::from_static(b"GIF87a\x01\x00\x01\x00");

        let cover = CoverImage::decode(data.clone())?;

        assert_eq!(ImageFormat::Gif, cover.format);
        assert_eq!(data, cover.bytes);
        assert_eq!(10, cover.len());

        Ok(())
    }

    #[test]
    fn decode_unrecognised() {
        assert!(CoverImage::decode(Bytes::from_static(b"plain text")).is_err());
    }
}
