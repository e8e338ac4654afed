use image::{DynamicImage, GenericImageView as _, GrayImage, RgbaImage};

use crate::{
    config::params::ShadowParams,
    effects::composite::{composite_layers, masked_foreground, shadow_only_layer},
    effects::fade::{ShadowLayers, shadow_layers_with_geometry},
    foundation::core::ensure_same_size,
    foundation::error::ShadowcastResult,
    geometry::projection::ShadowGeometry,
    mask::source::resolve_mask,
};

/// Final images of one compose call, straight-alpha RGBA8.
#[derive(Clone, Debug)]
pub struct ShadowOutputs {
    /// Shadow alone on a transparent canvas.
    pub shadow_only: RgbaImage,
    /// Background, shadow and masked foreground composited together.
    pub composite: RgbaImage,
}

/// Everything a compose call produced, including intermediate planes.
#[derive(Clone, Debug)]
pub struct ComposeArtifacts {
    /// Subject mask actually used.
    pub mask: GrayImage,
    /// Projected and shaped shadow planes.
    pub layers: ShadowLayers,
    /// Final images.
    pub outputs: ShadowOutputs,
}

/// Cast a shadow for `fg` onto `bg` and composite the three.
///
/// `mask` overrides the foreground's own alpha. Foreground, background and mask must share
/// one size. Either both outputs are produced or an error is returned.
pub fn compose(
    fg: &DynamicImage,
    bg: &DynamicImage,
    mask: Option<&DynamicImage>,
    params: &ShadowParams,
) -> ShadowcastResult<ShadowOutputs> {
    Ok(compose_with_artifacts(fg, bg, mask, params)?.outputs)
}

/// Like [`compose`], also returning the mask and intermediate shadow planes.
#[tracing::instrument(skip_all, fields(width = fg.width(), height = fg.height()))]
pub fn compose_with_artifacts(
    fg: &DynamicImage,
    bg: &DynamicImage,
    mask: Option<&DynamicImage>,
    params: &ShadowParams,
) -> ShadowcastResult<ComposeArtifacts> {
    params.validate()?;
    ensure_same_size("background", fg.dimensions(), bg.dimensions())?;

    let mask = resolve_mask(fg, mask)?;
    let geometry = ShadowGeometry::from_mask(&mask, params.light.angle)?;
    let layers = shadow_layers_with_geometry(&mask, &geometry, params)?;

    let shadow_only = shadow_only_layer(&layers.combined);
    let subject = masked_foreground(&fg.to_rgba8(), &mask)?;
    let composite = composite_layers(&bg.to_rgba8(), &[&shadow_only, &subject])?;

    Ok(ComposeArtifacts {
        mask,
        layers,
        outputs: ShadowOutputs {
            shadow_only,
            composite,
        },
    })
}

#[cfg(test)]
#[path = "../tests/unit/pipeline/compose.rs"]
mod tests;
