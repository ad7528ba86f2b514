use crate::{Error, Result};

pub fn detect_image_mime(bytes: &[u8]) -> &'static str {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [0x89, 0x50, 0x4E, 0x47, ..] => "image/png",
        [0x47, 0x49, 0x46, 0x38, ..] => "image/gif",
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => "image/webp",
        _ => {
            tracing::warn!(
                "Unrecognized image format (first 4 bytes: {:02X?}), falling back to image/png",
                &bytes[..bytes.len().min(4)]
            );
            "image/png"
        }
    }
}

/// Format a base64 payload as `data:<mime>;base64,<payload>`.
pub fn to_data_uri(mime_type: &str, base64_data: &str) -> String {
    format!("data:{};base64,{}", mime_type, base64_data)
}

/// Split a base64 data URI into its MIME type and payload.
pub fn parse_data_uri(uri: &str) -> Result<(&str, &str)> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| Error::InvalidResponse("Data URI must start with 'data:'".to_string()))?;

    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| Error::InvalidResponse("Data URI is missing a payload".to_string()))?;

    let mime_type = header.strip_suffix(";base64").ok_or_else(|| {
        Error::InvalidResponse("Only base64-encoded data URIs are supported".to_string())
    })?;

    if mime_type.is_empty() || payload.is_empty() {
        return Err(Error::InvalidResponse(
            "Data URI has an empty MIME type or payload".to_string(),
        ));
    }

    Ok((mime_type, payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_png() {
        assert_eq!(
            detect_image_mime(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A]),
            "image/png"
        );
    }

    #[test]
    fn test_detect_jpeg() {
        assert_eq!(detect_image_mime(&[0xFF, 0xD8, 0xFF, 0xE0]), "image/jpeg");
    }

    #[test]
    fn test_detect_gif() {
        assert_eq!(detect_image_mime(b"GIF89a"), "image/gif");
    }

    #[test]
    fn test_detect_webp() {
        assert_eq!(
            detect_image_mime(&[
                0x52, 0x49, 0x46, 0x46, 0x00, 0x00, 0x00, 0x00, 0x57, 0x45, 0x42, 0x50
            ]),
            "image/webp"
        );
    }

    #[test]
    fn test_empty_falls_back_to_png() {
        assert_eq!(detect_image_mime(&[]), "image/png");
    }

    #[test]
    fn test_to_data_uri() {
        assert_eq!(
            to_data_uri("image/png", "iVBORw=="),
            "data:image/png;base64,iVBORw=="
        );
    }

    #[test]
    fn test_parse_data_uri() {
        let (mime, data) = parse_data_uri("data:image/jpeg;base64,/9j/4A==").unwrap();
        assert_eq!(mime, "image/jpeg");
        assert_eq!(data, "/9j/4A==");
    }

    #[test]
    fn test_parse_data_uri_rejects_non_base64() {
        assert!(parse_data_uri("data:text/plain,hello").is_err());
        assert!(parse_data_uri("https://example.com/cat.png").is_err());
        assert!(parse_data_uri("data:image/png;base64,").is_err());
    }
}
