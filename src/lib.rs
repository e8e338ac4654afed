//! shadowcast synthesizes a plausible cast shadow for a foreground cutout and composites it
//! onto a background image.
//!
//! # Pipeline overview
//!
//! 1. **Mask**: `foreground (+ optional mask) -> GrayImage` subject opacity
//! 2. **Project**: shear the mask onto the ground plane along the light direction
//! 3. **Shape**: blur the projected mask twice and fade each copy with distance from the
//!    contact line (sharp contact tier, soft ambient tier), merged by per-pixel max
//! 4. **Composite**: `background <- shadow <- masked foreground` with Porter-Duff "over"
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Pure**: every call is a function of its inputs; repeated calls are byte-identical.
//! - **All-or-nothing**: outputs are only returned when every stage succeeded.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod config;
mod effects;
mod foundation;
mod geometry;
mod mask;
mod pipeline;

pub use assets::decode::{decode_image, encode_png, open_image};
pub use config::params::{FadeParams, LightParams, ShadowParams, read_form_float};
pub use effects::blur::blur_alpha8;
pub use effects::composite::{
    PremulRgba, composite_layers, masked_foreground, over, shadow_only_layer,
};
pub use effects::fade::{
    CONTACT_BLUR_SIGMA, MIN_FADE_FRACTION, SOFT_BLUR_SIGMA, ShadowLayers, build_fade_mask,
    build_shadow_alpha, build_shadow_layers, compute_shadow_extent, directional_distance,
};
pub use foundation::core::{Affine, PixelBounds, Point, Vec2, ensure_same_size};
pub use foundation::error::{ShadowcastError, ShadowcastResult};
pub use geometry::projection::{
    MIN_ELEVATION_TAN, Shear, ShadowGeometry, project_shadow, shadow_transform, shear_magnitude,
};
pub use geometry::resample::resample_affine_bicubic;
pub use mask::source::{bounding_box, mask_from_foreground, mask_from_image, resolve_mask};
pub use pipeline::{ComposeArtifacts, ShadowOutputs, compose, compose_with_artifacts};
