use super::*;

#[test]
fn mul_div255_keeps_extremes() {
    assert_eq!(mul_div255_floor(255, 255), 255);
    assert_eq!(mul_div255_floor(0, 255), 0);
    assert_eq!(mul_div255_floor(200, 255), 200);
}

#[test]
fn mul_div255_truncates() {
    // 200·128 / 255 = 100.39, 254·254 / 255 = 253.0039, 1·254 / 255 = 0.996
    assert_eq!(mul_div255_floor(200, 128), 100);
    assert_eq!(mul_div255_floor(254, 254), 253);
    assert_eq!(mul_div255_floor(1, 254), 0);
    assert_eq!(mul_div255_floor(128, 129), 64);
}

#[test]
fn q16_rounds_half_up_and_saturates() {
    assert_eq!(q16_to_u8(0), 0);
    assert_eq!(q16_to_u8(1 << 16), 1);
    assert_eq!(q16_to_u8((1 << 16) + 32768), 2);
    assert_eq!(q16_to_u8(300 << 16), 255);
}

#[test]
fn catmull_rom_interpolates_at_integer_offsets() {
    assert_eq!(catmull_rom_weights(0.0), [0.0, 1.0, 0.0, 0.0]);
    let w = catmull_rom_weights(1.0);
    assert!(w[0].abs() < 1e-12);
    assert!(w[1].abs() < 1e-12);
    assert!((w[2] - 1.0).abs() < 1e-12);
    assert!(w[3].abs() < 1e-12);
}

#[test]
fn catmull_rom_weights_sum_to_one() {
    for t in [0.1, 0.25, 0.5, 0.75, 0.9] {
        let sum: f64 = catmull_rom_weights(t).iter().sum();
        assert!((sum - 1.0).abs() < 1e-12, "t={t} sum={sum}");
    }
    let half = catmull_rom_weights(0.5);
    assert!((half[0] - -0.0625).abs() < 1e-12);
    assert!((half[1] - 0.5625).abs() < 1e-12);
}
