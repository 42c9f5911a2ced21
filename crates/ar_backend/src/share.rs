//! Public viewer links and their scannable codes.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::QrCode;
use url::Url;

use crate::error::ShareError;

/// Smallest edge length of a rendered code, in pixels.
pub const CODE_MIN_SIZE: u32 = 256;

/// Build the public viewer URL for an asset: `<origin>/ar/<id>`.
///
/// Any path, query or fragment on `origin` is discarded.
pub fn share_url(origin: &str, asset_id: &str) -> Result<Url, ShareError> {
    let mut url = Url::parse(origin).map_err(|e| ShareError::InvalidOrigin(e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ShareError::InvalidOrigin(format!("{} cannot be a base URL", origin)));
    }

    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|_| ShareError::InvalidOrigin(origin.to_string()))?
        .clear()
        .push("ar")
        .push(asset_id);

    Ok(url)
}

/// A share link rendered as a PNG scannable code.
#[derive(Clone, Debug)]
pub struct ScanCode {
    pub url: Url,
    pub png: Vec<u8>,
}

impl ScanCode {
    pub fn generate(url: Url) -> Result<Self, ShareError> {
        let code = QrCode::new(url.as_str().as_bytes())
            .map_err(|e| ShareError::Encode(e.to_string()))?;

        let pixels = code
            .render::<Luma<u8>>()
            .min_dimensions(CODE_MIN_SIZE, CODE_MIN_SIZE)
            .build();

        let mut png = Vec::new();
        DynamicImage::ImageLuma8(pixels).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

        log::debug!("Generated scan code for {} ({} bytes)", url, png.len());
        Ok(Self { url, png })
    }

    /// `data:image/png;base64,...` form for embedding in a page.
    pub fn data_url(&self) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(&self.png))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_url_basic() {
        let url = share_url("https://studio.example.com", "abc-123").unwrap();
        assert_eq!(url.as_str(), "https://studio.example.com/ar/abc-123");
    }

    #[test]
    fn test_share_url_drops_existing_path() {
        let url = share_url("https://studio.example.com/editor/abc?tab=1#x", "abc").unwrap();
        assert_eq!(url.as_str(), "https://studio.example.com/ar/abc");
    }

    #[test]
    fn test_share_url_escapes_id() {
        let url = share_url("http://localhost:3000", "a b/c").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/ar/a%20b%2Fc");
    }

    #[test]
    fn test_share_url_rejects_garbage() {
        assert!(matches!(share_url("not a url", "a"), Err(ShareError::InvalidOrigin(_))));
        assert!(matches!(share_url("mailto:me@example.com", "a"), Err(ShareError::InvalidOrigin(_))));
    }

    #[test]
    fn test_scan_code_is_png() {
        let url = share_url("https://studio.example.com", "abc").unwrap();
        let code = ScanCode::generate(url).unwrap();

        assert_eq!(&code.png[..8], b"\x89PNG\r\n\x1a\n");
        assert!(code.data_url().starts_with("data:image/png;base64,iVBORw0KGgo"));
    }
}
