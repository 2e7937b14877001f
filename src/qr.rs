//! QR code rendering for shareable menu links.

use image::{DynamicImage, ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};

use crate::error::{AppError, Result};

/// Render a URL as a PNG QR code: low error-correction tier, quiet-zone
/// border, 10px modules. Regenerated per request, nothing cached.
pub fn render_png(url: &str) -> Result<Vec<u8>> {
    let code = QrCode::with_error_correction_level(url.as_bytes(), EcLevel::L)
        .map_err(|e| AppError::Internal(format!("qr encoding failed: {e}")))?;

    let bitmap = code
        .render::<Luma<u8>>()
        .quiet_zone(true)
        .module_dimensions(10, 10)
        .build();

    let mut png = Vec::new();
    DynamicImage::ImageLuma8(bitmap)
        .write_to(&mut std::io::Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| AppError::Internal(format!("png encoding failed: {e}")))?;
    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_a_png_byte_stream() {
        let png = render_png("http://localhost:8080/menu/abc123").unwrap();

        assert!(png.len() > 100);
        assert_eq!(&png[..4], &[0x89, b'P', b'N', b'G']);
    }
}
