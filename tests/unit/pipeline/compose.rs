use image::{Luma, Rgb, RgbImage, Rgba};

use super::*;
use crate::foundation::error::ShadowcastError;

fn subject(w: u32, h: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(w, h, |x, y| {
        let inside = (w / 3..2 * w / 3).contains(&x) && (h / 4..3 * h / 4).contains(&y);
        if inside {
            Rgba([220, 40, 40, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    }))
}

fn background(w: u32, h: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb([200, 200, 200])))
}

#[test]
fn outputs_match_input_size() {
    let out = compose(
        &subject(60, 40),
        &background(60, 40),
        None,
        &ShadowParams::default(),
    )
    .unwrap();
    assert_eq!(out.shadow_only.dimensions(), (60, 40));
    assert_eq!(out.composite.dimensions(), (60, 40));
}

#[test]
fn shadow_only_carries_combined_alpha() {
    let a = compose_with_artifacts(
        &subject(48, 48),
        &background(48, 48),
        None,
        &ShadowParams::default(),
    )
    .unwrap();
    for (px, alpha) in a.outputs.shadow_only.pixels().zip(a.layers.combined.pixels()) {
        assert_eq!(px.0, [0, 0, 0, alpha[0]]);
    }
}

#[test]
fn subject_pixels_sit_on_top() {
    let out = compose(
        &subject(30, 30),
        &background(30, 30),
        None,
        &ShadowParams::default(),
    )
    .unwrap();
    assert_eq!(out.composite.get_pixel(15, 15).0, [220, 40, 40, 255]);
}

#[test]
fn explicit_mask_drives_subject_alpha() {
    let fg = subject(30, 30);
    let mask = GrayImage::from_fn(30, 30, |x, y| {
        Luma([if x < 15 && (10..20).contains(&y) { 255 } else { 0 }])
    });
    let a = compose_with_artifacts(
        &fg,
        &background(30, 30),
        Some(&DynamicImage::ImageLuma8(mask.clone())),
        &ShadowParams::default(),
    )
    .unwrap();
    assert_eq!(a.mask, mask);
    // Subject color outside the explicit mask is not shown.
    assert_ne!(a.outputs.composite.get_pixel(18, 15).0, [220, 40, 40, 255]);
}

#[test]
fn background_size_mismatch_is_reported_first() {
    let err = compose(
        &DynamicImage::ImageRgb8(RgbImage::new(200, 200)),
        &background(100, 100),
        None,
        &ShadowParams::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ShadowcastError::DimensionMismatch {
            what: "background",
            ..
        }
    ));
}

#[test]
fn missing_alpha_without_mask_fails() {
    let err = compose(
        &DynamicImage::ImageRgb8(RgbImage::new(10, 10)),
        &background(10, 10),
        None,
        &ShadowParams::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ShadowcastError::MissingAlpha));
}

#[test]
fn invalid_params_fail_before_pixel_work() {
    let mut params = ShadowParams::default();
    params.fade.soft_fade = f64::INFINITY;
    let err = compose(&subject(10, 10), &background(10, 10), None, &params).unwrap_err();
    assert!(matches!(err, ShadowcastError::Validation(_)));
}
