//! Two-tier shadow falloff.
//!
//! The projected shadow is blurred twice, once tightly for the contact shadow and once
//! widely for the ambient shadow. Each copy is attenuated by a linear ramp along the
//! directional distance from the contact line, and the two are merged with a per-pixel max.

use image::{GrayImage, Luma};
use rayon::prelude::*;

use crate::config::params::ShadowParams;
use crate::effects::blur::blur_alpha8;
use crate::foundation::core::Vec2;
use crate::foundation::error::ShadowcastResult;
use crate::foundation::math::mul_div255_floor;
use crate::geometry::projection::{ShadowGeometry, project_with_geometry};

/// Blur sigma of the sharp contact tier.
pub const CONTACT_BLUR_SIGMA: f32 = 2.0;
/// Blur sigma of the soft ambient tier.
pub const SOFT_BLUR_SIGMA: f32 = CONTACT_BLUR_SIGMA * 6.0;
/// Smallest fade fraction; keeps ramps from collapsing into a hard edge.
pub const MIN_FADE_FRACTION: f64 = 0.01;

/// Shadow planes produced for one request.
#[derive(Clone, Debug)]
pub struct ShadowLayers {
    /// Mask after ground projection, before blurring.
    pub projected: GrayImage,
    /// Tightly blurred shadow attenuated by the contact ramp.
    pub contact: GrayImage,
    /// Widely blurred shadow attenuated by the soft ramp.
    pub soft: GrayImage,
    /// Per-pixel maximum of `contact` and `soft`.
    pub combined: GrayImage,
}

/// Signed distance of pixel `(x, y)` from the contact line along `fade_dir`.
#[inline]
pub fn directional_distance(x: u32, y: u32, contact_y: u32, fade_dir: Vec2) -> f64 {
    fade_dir.x * f64::from(x) + fade_dir.y * (f64::from(y) - f64::from(contact_y))
}

/// Largest directional distance over the four corner pixels, floored at 1.
pub fn compute_shadow_extent(width: u32, height: u32, contact_y: u32, fade_dir: Vec2) -> f64 {
    let (xmax, ymax) = (width.saturating_sub(1), height.saturating_sub(1));
    [(0, 0), (xmax, 0), (0, ymax), (xmax, ymax)]
        .into_iter()
        .map(|(x, y)| directional_distance(x, y, contact_y, fade_dir))
        .fold(1.0, f64::max)
}

/// Linear falloff ramp: 255 at or behind the contact line, 0 at `max_distance` and beyond.
///
/// `max_distance` is floored at 1.
pub fn build_fade_mask(
    width: u32,
    height: u32,
    contact_y: u32,
    fade_dir: Vec2,
    max_distance: f64,
) -> GrayImage {
    let max_distance = max_distance.max(1.0);
    let mut out = GrayImage::new(width, height);
    if width == 0 || height == 0 {
        return out;
    }

    out.par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, px) in row.iter_mut().enumerate() {
                let t = directional_distance(x as u32, y as u32, contact_y, fade_dir);
                *px = fade_alpha(t, max_distance);
            }
        });
    out
}

fn fade_alpha(t: f64, max_distance: f64) -> u8 {
    if t <= 0.0 {
        255
    } else if t >= max_distance {
        0
    } else {
        (255.0 * (1.0 - t / max_distance)) as u8
    }
}

/// Project `mask` and shape it into contact, soft and combined shadow planes.
pub fn build_shadow_layers(
    mask: &GrayImage,
    params: &ShadowParams,
) -> ShadowcastResult<ShadowLayers> {
    let geometry = ShadowGeometry::from_mask(mask, params.light.angle)?;
    shadow_layers_with_geometry(mask, &geometry, params)
}

/// Combined shadow alpha for `mask`.
pub fn build_shadow_alpha(
    mask: &GrayImage,
    params: &ShadowParams,
) -> ShadowcastResult<GrayImage> {
    Ok(build_shadow_layers(mask, params)?.combined)
}

#[tracing::instrument(skip_all, fields(contact_y = geometry.contact_y))]
pub(crate) fn shadow_layers_with_geometry(
    mask: &GrayImage,
    geometry: &ShadowGeometry,
    params: &ShadowParams,
) -> ShadowcastResult<ShadowLayers> {
    let (w, h) = mask.dimensions();
    let projected = project_with_geometry(mask, geometry, &params.light);

    let fade_dir = geometry.fade_direction();
    let extent = compute_shadow_extent(w, h, geometry.contact_y, fade_dir);
    let contact_distance = extent * params.fade.contact_fade.max(MIN_FADE_FRACTION);
    let soft_distance = extent * params.fade.soft_fade.max(MIN_FADE_FRACTION);
    tracing::debug!(extent, contact_distance, soft_distance, "fade distances");

    let contact_ramp = build_fade_mask(w, h, geometry.contact_y, fade_dir, contact_distance);
    let soft_ramp = build_fade_mask(w, h, geometry.contact_y, fade_dir, soft_distance);

    let contact = multiply(&blur_alpha8(&projected, CONTACT_BLUR_SIGMA)?, &contact_ramp);
    let soft = multiply(&blur_alpha8(&projected, SOFT_BLUR_SIGMA)?, &soft_ramp);
    let combined = lighter(&contact, &soft);

    Ok(ShadowLayers {
        projected,
        contact,
        soft,
        combined,
    })
}

fn multiply(a: &GrayImage, b: &GrayImage) -> GrayImage {
    zip_planes(a, b, mul_div255_floor)
}

fn lighter(a: &GrayImage, b: &GrayImage) -> GrayImage {
    zip_planes(a, b, u8::max)
}

fn zip_planes(a: &GrayImage, b: &GrayImage, f: impl Fn(u8, u8) -> u8) -> GrayImage {
    GrayImage::from_fn(a.width(), a.height(), |x, y| {
        Luma([f(a.get_pixel(x, y)[0], b.get_pixel(x, y)[0])])
    })
}

#[cfg(test)]
#[path = "../../tests/unit/effects/fade.rs"]
mod tests;
