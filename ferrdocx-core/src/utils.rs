use std::io::Cursor;

use image::{DynamicImage, ImageFormat};

/// Encodes `image` as PNG in memory.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, image::ImageError> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}
