use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;

pub const DEFAULT_EXTENSION: &str = "png";
pub const RESULT_FILE_PREFIX: &str = "segmentado-";

/// Formats accepted for upload, by the browser picker and the server alike.
pub const ACCEPTED_MIME_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];

#[derive(Debug, thiserror::Error)]
pub enum ImageDecodeError {
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Raw image bytes tagged with their mime type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageData {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageData {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn from_base64(mime_type: impl Into<String>, data: &str) -> Result<Self, ImageDecodeError> {
        let bytes = BASE64_STANDARD.decode(data.trim())?;
        Ok(Self::new(mime_type, bytes))
    }

    pub fn to_base64(&self) -> String {
        BASE64_STANDARD.encode(&self.bytes)
    }

}

/// Locally addressable segmentation result.
#[derive(Debug, PartialEq)]
pub struct SegmentedImage<R> {
    pub mime_type: String,
    pub resource: R,
}

impl<R> SegmentedImage<R> {
    pub fn new(mime_type: impl Into<String>, resource: R) -> Self {
        Self {
            mime_type: mime_type.into(),
            resource,
        }
    }
}

pub fn is_accepted_mime_type(mime_type: &str) -> bool {
    ACCEPTED_MIME_TYPES.contains(&mime_type)
}

/// File extension for a mime type: its subtype, or `png` when there is none.
pub fn extension_for_mime(mime_type: &str) -> &str {
    mime_type
        .split(';')
        .next()
        .and_then(|essence| essence.split('/').nth(1))
        .map(str::trim)
        .filter(|subtype| !subtype.is_empty())
        .unwrap_or(DEFAULT_EXTENSION)
}

/// Download name for a segmented result, e.g. `segmentado-traffic_light.png`.
pub fn result_filename(label: &str, mime_type: &str) -> String {
    let mut stem = String::with_capacity(label.len());
    let mut in_whitespace = false;
    for c in label.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                stem.push('_');
            }
            in_whitespace = true;
        } else {
            stem.push(c);
            in_whitespace = false;
        }
    }

    format!("{}{}.{}", RESULT_FILE_PREFIX, stem, extension_for_mime(mime_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_replaces_spaces_and_uses_subtype() {
        assert_eq!(
            result_filename("traffic light", "image/png"),
            "segmentado-traffic_light.png"
        );
        assert_eq!(
            result_filename("copo  de\tvidro", "image/jpeg"),
            "segmentado-copo_de_vidro.jpeg"
        );
    }

    #[test]
    fn extension_defaults_to_png() {
        assert_eq!(extension_for_mime("image/webp"), "webp");
        assert_eq!(extension_for_mime("image/"), "png");
        assert_eq!(extension_for_mime(""), "png");
        assert_eq!(extension_for_mime("image/png;charset=binary"), "png");
        assert_eq!(result_filename("bola", "application"), "segmentado-bola.png");
    }

    #[test]
    fn base64_payloads_decode() {
        let image = ImageData::from_base64("image/png", " iVBORw== ").unwrap();
        assert_eq!(image, ImageData::new("image/png", vec![137, 80, 78, 71]));
        assert_eq!(image.to_base64(), "iVBORw==");

        assert!(matches!(
            ImageData::from_base64("image/png", "***"),
            Err(ImageDecodeError::Base64(_))
        ));
    }

    #[test]
    fn only_png_jpeg_and_webp_are_accepted() {
        assert!(is_accepted_mime_type("image/png"));
        assert!(is_accepted_mime_type("image/jpeg"));
        assert!(is_accepted_mime_type("image/webp"));
        assert!(!is_accepted_mime_type("image/gif"));
        assert!(!is_accepted_mime_type("image/svg+xml"));
        assert!(!is_accepted_mime_type("text/plain"));
    }
}
