//! Front-line check that uploaded bytes really are an image.

use std::io::Cursor;

use anyhow::{Context, Result};
use image::{ImageFormat, ImageReader};

/// Sniffs the format from magic bytes and reads the header, without decoding
/// pixel data. The original bytes are what travels to the model; nothing is
/// re-encoded. Any failure (empty input, unknown magic, truncated header)
/// means the upload is not a usable image.
pub fn probe_image(bytes: &[u8]) -> Result<ImageFormat> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .context("failed to sniff image format")?;
    let format = reader.format().context("unrecognized image format")?;
    reader
        .into_dimensions()
        .with_context(|| format!("truncated or malformed {format:?} data"))?;
    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_fixture() -> Vec<u8> {
        let mut bytes = Vec::new();
        image::RgbImage::new(1, 1)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn accepts_a_generated_png() {
        let format = probe_image(&png_fixture()).unwrap();
        assert_eq!(format, ImageFormat::Png);
        assert_eq!(format.to_mime_type(), "image/png");
    }

    #[test]
    fn rejects_empty_input() {
        assert!(probe_image(&[]).is_err());
    }

    #[test]
    fn rejects_plain_text() {
        assert!(probe_image(b"this is a text file wearing a .png name").is_err());
    }

    #[test]
    fn rejects_truncated_header() {
        // PNG magic survives but the IHDR chunk is cut off.
        let bytes = png_fixture();
        assert!(probe_image(&bytes[..16]).is_err());
    }
}
