use image::GrayImage;
use rayon::prelude::*;

use crate::foundation::error::{ShadowcastError, ShadowcastResult};
use crate::foundation::math::q16_to_u8;

/// Gaussian-blur a single-channel plane with standard deviation `sigma`.
///
/// The kernel spans `ceil(3·sigma)` pixels on each side, capped at the larger image
/// dimension; edges are clamped.
pub fn blur_alpha8(src: &GrayImage, sigma: f32) -> ShadowcastResult<GrayImage> {
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(ShadowcastError::validation("blur sigma must be finite and >= 0"));
    }
    let cap = src.width().max(src.height());
    let radius = (3.0 * f64::from(sigma)).ceil().min(f64::from(cap)) as u32;
    blur_alpha8_with_radius(src, radius, sigma)
}

pub(crate) fn blur_alpha8_with_radius(
    src: &GrayImage,
    radius: u32,
    sigma: f32,
) -> ShadowcastResult<GrayImage> {
    let (width, height) = src.dimensions();
    let radius = radius.min(width.max(height));
    if radius == 0 || width == 0 || height == 0 {
        return Ok(src.clone());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = GrayImage::new(width, height);
    let mut out = GrayImage::new(width, height);

    horizontal_pass(src.as_raw(), &mut tmp, width, &kernel);
    vertical_pass(tmp.as_raw(), &mut out, width, height, &kernel);
    Ok(out)
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> ShadowcastResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(ShadowcastError::validation("blur sigma must be > 0"));
    }

    let taps = usize::try_from(radius)
        .ok()
        .and_then(|r| r.checked_mul(2))
        .and_then(|n| n.checked_add(1))
        .ok_or_else(|| ShadowcastError::validation("blur radius too large"))?;
    let r = i64::from(radius);
    let mut weights_f = Vec::<f64>::with_capacity(taps);
    let mut sum = 0.0f64;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    for i in -r..=r {
        let x = i as f64;
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let new_mid = (i64::from(weights[mid]) + delta).clamp(0, 65536);
        weights[mid] = new_mid as u32;
    }

    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i64;
    let w = width as usize;
    let max_x = i64::from(width) - 1;
    dst.par_chunks_mut(w)
        .zip(src.par_chunks(w))
        .for_each(|(out_row, in_row)| {
            for (x, px) in out_row.iter_mut().enumerate() {
                let mut acc = 0u64;
                for (ki, &kw) in k.iter().enumerate() {
                    let sx = (x as i64 + ki as i64 - radius).clamp(0, max_x) as usize;
                    acc += u64::from(kw) * u64::from(in_row[sx]);
                }
                *px = q16_to_u8(acc);
            }
        });
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i64;
    let w = width as usize;
    let max_y = i64::from(height) - 1;
    dst.par_chunks_mut(w).enumerate().for_each(|(y, out_row)| {
        for (x, px) in out_row.iter_mut().enumerate() {
            let mut acc = 0u64;
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y as i64 + ki as i64 - radius).clamp(0, max_y) as usize;
                acc += u64::from(kw) * u64::from(src[sy * w + x]);
            }
            *px = q16_to_u8(acc);
        }
    });
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
