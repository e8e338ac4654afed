//! Ground-plane projection of the subject mask.
//!
//! The shadow is approximated by a single affine map that shears rows horizontally in
//! proportion to their height above the contact line and stretches them vertically, so the
//! contact row `y0` stays fixed while the rest of the silhouette lies down along the cast
//! direction.

use image::GrayImage;

use crate::config::params::LightParams;
use crate::foundation::core::{Affine, Vec2};
use crate::foundation::error::{ShadowcastError, ShadowcastResult};
use crate::geometry::resample::resample_affine_bicubic;
use crate::mask::source::bounding_box;

/// Floor applied to `tan(elevation)` so grazing light cannot produce an unbounded shear.
pub const MIN_ELEVATION_TAN: f64 = 1e-3;

/// Per-request geometry shared by the projector and the fade shaper.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowGeometry {
    /// Bottom edge (exclusive) of the subject's bounding box: the ground contact line.
    pub contact_y: u32,
    /// Unit cast direction `(cos angle, sin angle)` in image space.
    pub direction: Vec2,
}

impl ShadowGeometry {
    /// Derive the contact line from `mask` and the cast direction from `angle_deg`.
    pub fn from_mask(mask: &GrayImage, angle_deg: f64) -> ShadowcastResult<Self> {
        let bounds = bounding_box(mask).ok_or(ShadowcastError::EmptyMask)?;
        let (dy, dx) = angle_deg.to_radians().sin_cos();
        Ok(Self {
            contact_y: bounds.bottom,
            direction: Vec2::new(dx, dy),
        })
    }

    /// Direction along which the directional distance grows, away from the light.
    pub fn fade_direction(self) -> Vec2 {
        -self.direction
    }
}

/// Shear magnitude `k` and the resulting vertical denominator `1 + k·dy`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shear {
    /// Horizontal shear magnitude.
    pub k: f64,
    /// Vertical scale denominator; the vertical stretch is `1 / denom`.
    pub denom: f64,
}

/// Derive the shear for `light` given the vertical component `dy` of the cast direction.
///
/// When `|1 + k·dy|` drops below `light.min_denominator` the shear is pulled back to
/// `(min_denominator - 1) / dy`, pinning the denominator at the threshold.
pub fn shear_magnitude(light: &LightParams, dy: f64) -> Shear {
    let tan_elev = light.elevation.to_radians().tan().max(MIN_ELEVATION_TAN);
    let mut k = (light.shadow_scale / tan_elev).min(light.max_shear);
    let mut denom = 1.0 + k * dy;
    if dy != 0.0 && denom.abs() < light.min_denominator {
        k = (light.min_denominator - 1.0) / dy;
        denom = 1.0 + k * dy;
    }
    Shear { k, denom }
}

/// Build the output-to-input mapping used to resample the mask into its shadow.
///
/// In `(a, b, c, d, e, f)` form, with `x_in = a·x + b·y + c` and `y_in = d·x + e·y + f`:
/// `a = 1`, `b = -k·dx/denom`, `c = k·dx·y0/denom`, `d = 0`, `e = 1/denom`,
/// `f = k·dy·y0/denom`.
pub fn shadow_transform(geometry: &ShadowGeometry, light: &LightParams) -> Affine {
    let Vec2 { x: dx, y: dy } = geometry.direction;
    let Shear { k, denom } = shear_magnitude(light, dy);
    let y0 = f64::from(geometry.contact_y);

    let a = 1.0;
    let b = -k * dx / denom;
    let c = k * dx * y0 / denom;
    let d = 0.0;
    let e = 1.0 / denom;
    let f = k * dy * y0 / denom;

    tracing::debug!(k, denom, y0, "derived shadow shear");

    // kurbo orders coefficients column-major: [a, d, b, e, c, f].
    Affine::new([a, d, b, e, c, f])
}

/// Project `mask` onto the ground plane for the given light.
///
/// Fails with [`ShadowcastError::EmptyMask`] when the mask has no covered pixel.
pub fn project_shadow(mask: &GrayImage, light: &LightParams) -> ShadowcastResult<GrayImage> {
    let geometry = ShadowGeometry::from_mask(mask, light.angle)?;
    Ok(project_with_geometry(mask, &geometry, light))
}

pub(crate) fn project_with_geometry(
    mask: &GrayImage,
    geometry: &ShadowGeometry,
    light: &LightParams,
) -> GrayImage {
    let inverse = shadow_transform(geometry, light);
    resample_affine_bicubic(mask, inverse)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/projection.rs"]
mod tests;
