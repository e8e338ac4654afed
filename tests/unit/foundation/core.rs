use super::*;

#[test]
fn pixel_bounds_extent() {
    let b = PixelBounds {
        left: 10,
        top: 20,
        right: 15,
        bottom: 80,
    };
    assert_eq!(b.width(), 5);
    assert_eq!(b.height(), 60);
}

#[test]
fn ensure_same_size_accepts_equal_and_rejects_different() {
    ensure_same_size("mask", (4, 3), (4, 3)).unwrap();

    let err = ensure_same_size("mask", (4, 3), (3, 4)).unwrap_err();
    assert!(matches!(
        err,
        ShadowcastError::DimensionMismatch {
            what: "mask",
            expected_w: 4,
            expected_h: 3,
            actual_w: 3,
            actual_h: 4,
        }
    ));
}
