use image::GrayImage;
use rayon::prelude::*;

use crate::foundation::core::{Affine, Point};
use crate::foundation::math::catmull_rom_weights;

/// Resample `src` through `inverse`, which maps output pixel centers to source coordinates.
///
/// Sampling is bicubic with edge-clamped taps. Output pixels whose source position lies
/// outside the source image are zero.
pub fn resample_affine_bicubic(src: &GrayImage, inverse: Affine) -> GrayImage {
    let (w, h) = src.dimensions();
    let mut out = GrayImage::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }

    out.par_chunks_mut(w as usize)
        .enumerate()
        .for_each(|(y, row)| {
            let cy = y as f64 + 0.5;
            for (x, px) in row.iter_mut().enumerate() {
                let p = inverse * Point::new(x as f64 + 0.5, cy);
                *px = sample_bicubic(src, p);
            }
        });
    out
}

fn sample_bicubic(src: &GrayImage, p: Point) -> u8 {
    let (w, h) = src.dimensions();
    let inside = p.x >= 0.0 && p.x < f64::from(w) && p.y >= 0.0 && p.y < f64::from(h);
    if !inside {
        return 0;
    }

    let sx = p.x - 0.5;
    let sy = p.y - 0.5;
    let fx = sx.floor();
    let fy = sy.floor();
    let wx = catmull_rom_weights(sx - fx);
    let wy = catmull_rom_weights(sy - fy);

    let stride = w as usize;
    let raw = src.as_raw();
    let max_x = i64::from(w) - 1;
    let max_y = i64::from(h) - 1;

    let mut acc = 0.0f64;
    for (j, &wyj) in wy.iter().enumerate() {
        if wyj == 0.0 {
            continue;
        }
        let yy = (fy as i64 + j as i64 - 1).clamp(0, max_y) as usize;
        let row = &raw[yy * stride..(yy + 1) * stride];
        let mut racc = 0.0f64;
        for (i, &wxi) in wx.iter().enumerate() {
            let xx = (fx as i64 + i as i64 - 1).clamp(0, max_x) as usize;
            racc += wxi * f64::from(row[xx]);
        }
        acc += wyj * racc;
    }
    acc.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/resample.rs"]
mod tests;
