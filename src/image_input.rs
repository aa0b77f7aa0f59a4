use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::ImageFormat;
use log::debug;

use crate::error::ArenaError;

/// Content sniffing, not extension matching: a renamed text file is still
/// rejected. Only the formats the query side accepts pass, even when the
/// `image` crate recognises other magic numbers (`BM`, `P1`..`P7`, ...).
pub fn sniff_format(bytes: &[u8]) -> Result<ImageFormat, ArenaError> {
    if bytes.is_empty() {
        return Err(ArenaError::InvalidImage("file is empty".into()));
    }
    let format = image::guess_format(bytes)
        .map_err(|_| ArenaError::InvalidImage("unrecognized image format".into()))?;
    match format {
        ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Gif | ImageFormat::WebP => Ok(format),
        other => Err(ArenaError::InvalidImage(format!(
            "unsupported image format {:?}",
            other
        ))),
    }
}

pub fn read_image_file(path: &Path) -> Result<Vec<u8>, ArenaError> {
    let bytes = std::fs::read(path)
        .map_err(|e| ArenaError::InvalidImage(format!("cannot read {:?}: {}", path, e)))?;
    let format = sniff_format(&bytes)
        .map_err(|e| ArenaError::InvalidImage(format!("{:?}: {}", path, e)))?;
    debug!("Loaded {:?} image from {:?} ({} bytes)", format, path, bytes.len());
    Ok(bytes)
}

/// Plain base64 with no `data:image/...;base64,` prefix, as nearImage expects.
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    #[test]
    fn test_sniff_png() {
        assert_eq!(sniff_format(PNG_HEADER).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn test_sniff_rejects_text() {
        let err = sniff_format(b"just some notes\n").unwrap_err();
        assert!(matches!(err, ArenaError::InvalidImage(_)));
        assert!(sniff_format(b"").is_err());
    }

    #[test]
    fn test_sniff_rejects_text_with_foreign_magic() {
        for text in [
            &b"BMW service on friday\n"[..],
            b"P1 priorities for the week\n",
            b"II*\0 looks like tiff",
        ] {
            let err = sniff_format(text).unwrap_err();
            assert!(matches!(err, ArenaError::InvalidImage(_)));
        }
        assert_eq!(sniff_format(b"GIF89a\x01\0\x01\0").unwrap(), ImageFormat::Gif);
    }

    #[test]
    fn test_read_image_file_rejects_renamed_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        std::fs::write(&path, "not really a png").unwrap();
        assert!(read_image_file(&path).is_err());
    }

    #[test]
    fn test_read_image_file_accepts_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("upload.bin");
        std::fs::write(&path, b"\xFF\xD8\xFF\xE0\0\x10JFIF\0").unwrap();
        let bytes = read_image_file(&path).unwrap();
        assert_eq!(bytes.len(), 11);
    }

    #[test]
    fn test_encode_has_no_data_uri_prefix() {
        let encoded = encode_base64(PNG_HEADER);
        assert!(encoded.starts_with("iVBORw0KGgo"));
        assert!(!encoded.contains(','));
    }
}
