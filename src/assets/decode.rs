use std::io::Cursor;
use std::path::Path;

use anyhow::Context;
use image::{DynamicImage, RgbaImage};

use crate::foundation::error::ShadowcastResult;

/// Decode encoded image bytes, keeping the source channel layout.
pub fn decode_image(bytes: &[u8]) -> ShadowcastResult<DynamicImage> {
    let img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(img)
}

/// Open and decode an image file, keeping the source channel layout.
pub fn open_image(path: impl AsRef<Path>) -> ShadowcastResult<DynamicImage> {
    let path = path.as_ref();
    let img = image::open(path).with_context(|| format!("open image '{}'", path.display()))?;
    Ok(img)
}

/// Encode straight-alpha RGBA8 pixels as PNG.
pub fn encode_png(img: &RgbaImage) -> ShadowcastResult<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
