use image::{GrayImage, Rgba, RgbaImage};

use crate::foundation::core::ensure_same_size;
use crate::foundation::error::ShadowcastResult;

/// Premultiplied RGBA pixel with channels in `[0, 1]`.
pub type PremulRgba = [f32; 4];

/// Porter-Duff source-over of premultiplied pixels.
pub fn over(dst: PremulRgba, src: PremulRgba) -> PremulRgba {
    let inv = 1.0 - src[3];
    [
        src[0] + dst[0] * inv,
        src[1] + dst[1] * inv,
        src[2] + dst[2] * inv,
        src[3] + dst[3] * inv,
    ]
}

/// Transparent black canvas whose alpha is `alpha`.
pub fn shadow_only_layer(alpha: &GrayImage) -> RgbaImage {
    RgbaImage::from_fn(alpha.width(), alpha.height(), |x, y| {
        Rgba([0, 0, 0, alpha.get_pixel(x, y)[0]])
    })
}

/// The foreground's color with its alpha replaced by `mask`.
pub fn masked_foreground(fg: &RgbaImage, mask: &GrayImage) -> ShadowcastResult<RgbaImage> {
    ensure_same_size("mask", fg.dimensions(), mask.dimensions())?;
    let mut out = fg.clone();
    for (px, m) in out.pixels_mut().zip(mask.pixels()) {
        px[3] = m[0];
    }
    Ok(out)
}

/// Composite straight-alpha `layers` over `bg`, bottom to top.
///
/// Blending accumulates in premultiplied `f32`; the result is converted back to straight
/// RGBA8 once at the end.
pub fn composite_layers(bg: &RgbaImage, layers: &[&RgbaImage]) -> ShadowcastResult<RgbaImage> {
    for layer in layers {
        ensure_same_size("layer", bg.dimensions(), layer.dimensions())?;
    }

    let mut acc: Vec<PremulRgba> = bg.pixels().map(|p| premultiply(*p)).collect();
    for layer in layers {
        for (d, s) in acc.iter_mut().zip(layer.pixels()) {
            if s[3] != 0 {
                *d = over(*d, premultiply(*s));
            }
        }
    }

    let (w, h) = bg.dimensions();
    let raw: Vec<u8> = acc.into_iter().flat_map(|p| unpremultiply(p).0).collect();
    let out = RgbaImage::from_raw(w, h, raw)
        .ok_or_else(|| anyhow::anyhow!("invalid rgba buffer size"))?;
    Ok(out)
}

pub(crate) fn premultiply(px: Rgba<u8>) -> PremulRgba {
    let a = f32::from(px[3]) / 255.0;
    [
        f32::from(px[0]) / 255.0 * a,
        f32::from(px[1]) / 255.0 * a,
        f32::from(px[2]) / 255.0 * a,
        a,
    ]
}

pub(crate) fn unpremultiply(px: PremulRgba) -> Rgba<u8> {
    let a = px[3].clamp(0.0, 1.0);
    let alpha = to_u8(a);
    if alpha == 0 {
        return Rgba([0, 0, 0, 0]);
    }
    Rgba([to_u8(px[0] / a), to_u8(px[1] / a), to_u8(px[2] / a), alpha])
}

fn to_u8(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
