use image::{DynamicImage, GenericImageView as _, GrayImage, Luma, RgbaImage};

use crate::foundation::core::{PixelBounds, ensure_same_size};
use crate::foundation::error::{ShadowcastError, ShadowcastResult};

/// Interpret an explicitly supplied mask image as a single-channel opacity mask.
///
/// Luma images are used as-is, anything with an alpha channel contributes that channel, and
/// remaining layouts are converted to luminance.
pub fn mask_from_image(img: &DynamicImage) -> GrayImage {
    match img {
        DynamicImage::ImageLuma8(l) => l.clone(),
        DynamicImage::ImageLuma16(_) => img.to_luma8(),
        _ if img.color().has_alpha() => alpha_plane(img),
        _ => img.to_luma8(),
    }
}

/// Extract the foreground's own alpha channel.
pub fn mask_from_foreground(fg: &DynamicImage) -> ShadowcastResult<GrayImage> {
    if !fg.color().has_alpha() {
        return Err(ShadowcastError::MissingAlpha);
    }
    Ok(alpha_plane(fg))
}

/// Produce the subject mask for `fg`, from `mask` when given, else from `fg`'s alpha.
pub fn resolve_mask(
    fg: &DynamicImage,
    mask: Option<&DynamicImage>,
) -> ShadowcastResult<GrayImage> {
    let alpha = match mask {
        Some(m) => mask_from_image(m),
        None => mask_from_foreground(fg)?,
    };
    ensure_same_size("mask", fg.dimensions(), alpha.dimensions())?;
    Ok(alpha)
}

/// Tight bounds of the non-zero pixels of `mask`, or `None` when every pixel is zero.
pub fn bounding_box(mask: &GrayImage) -> Option<PixelBounds> {
    let (w, h) = mask.dimensions();
    if w == 0 || h == 0 {
        return None;
    }

    let mut bounds: Option<PixelBounds> = None;
    for (y, row) in mask.as_raw().chunks_exact(w as usize).enumerate() {
        let Some(first) = row.iter().position(|&v| v != 0) else {
            continue;
        };
        let last = row.iter().rposition(|&v| v != 0).unwrap_or(first);
        let (first, last, y) = (first as u32, last as u32, y as u32);

        bounds = Some(match bounds {
            None => PixelBounds {
                left: first,
                top: y,
                right: last + 1,
                bottom: y + 1,
            },
            Some(b) => PixelBounds {
                left: b.left.min(first),
                top: b.top,
                right: b.right.max(last + 1),
                bottom: y + 1,
            },
        });
    }
    bounds
}

fn alpha_plane(img: &DynamicImage) -> GrayImage {
    match img {
        DynamicImage::ImageRgba8(rgba) => rgba_alpha(rgba),
        DynamicImage::ImageLumaA8(la) => {
            GrayImage::from_fn(la.width(), la.height(), |x, y| Luma([la.get_pixel(x, y)[1]]))
        }
        _ => rgba_alpha(&img.to_rgba8()),
    }
}

fn rgba_alpha(rgba: &RgbaImage) -> GrayImage {
    GrayImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        Luma([rgba.get_pixel(x, y)[3]])
    })
}

#[cfg(test)]
#[path = "../../tests/unit/mask/source.rs"]
mod tests;
