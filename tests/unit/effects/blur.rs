use image::Luma;

use super::*;

#[test]
fn blur_sigma_0_is_identity() {
    let src = GrayImage::from_fn(3, 2, |x, y| Luma([(x + 10 * y) as u8]));
    let out = blur_alpha8(&src, 0.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_constant_plane_is_identity() {
    let src = GrayImage::from_pixel(6, 5, Luma([173]));
    let out = blur_alpha8(&src, 2.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let mut src = GrayImage::new(9, 9);
    src.put_pixel(4, 4, Luma([255]));

    let out = blur_alpha8_with_radius(&src, 2, 1.2).unwrap();

    let nonzero = out.as_raw().iter().filter(|&&v| v != 0).count();
    assert!(nonzero > 1);

    let sum: u32 = out.as_raw().iter().map(|&v| u32::from(v)).sum();
    assert!((sum as i32 - 255).abs() <= 13, "sum={sum}");
}

#[test]
fn blur_is_symmetric_around_an_impulse() {
    let mut src = GrayImage::new(11, 11);
    src.put_pixel(5, 5, Luma([255]));
    let out = blur_alpha8(&src, 1.5).unwrap();
    assert_eq!(out.get_pixel(3, 5), out.get_pixel(7, 5));
    assert_eq!(out.get_pixel(5, 3), out.get_pixel(5, 7));
    assert!(out.get_pixel(5, 5)[0] > out.get_pixel(4, 5)[0]);
}

#[test]
fn blur_rejects_bad_sigma() {
    let src = GrayImage::new(2, 2);
    assert!(blur_alpha8(&src, f32::NAN).is_err());
    assert!(blur_alpha8(&src, -1.0).is_err());
}

#[test]
fn huge_sigma_is_capped_to_image_size() {
    let mut src = GrayImage::new(4, 4);
    src.put_pixel(1, 2, Luma([255]));
    let out = blur_alpha8(&src, 1.0e9).unwrap();
    assert_eq!(out.dimensions(), (4, 4));

    let flat = GrayImage::from_pixel(4, 4, Luma([90]));
    assert_eq!(blur_alpha8(&flat, f32::MAX).unwrap(), flat);
}

#[test]
fn oversized_radius_matches_capped_radius() {
    let src = GrayImage::from_fn(5, 3, |x, y| Luma([(x * 40 + y * 7) as u8]));
    let capped = blur_alpha8_with_radius(&src, 5, 4.0).unwrap();
    let huge = blur_alpha8_with_radius(&src, u32::MAX, 4.0).unwrap();
    assert_eq!(capped, huge);
}
