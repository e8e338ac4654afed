/// `x·y / 255`, truncated.
pub(crate) fn mul_div255_floor(x: u8, y: u8) -> u8 {
    ((u16::from(x) * u16::from(y)) / 255) as u8
}

/// Rounds a Q16 fixed-point accumulator back to a saturated byte.
pub(crate) fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    (v.min(255)) as u8
}

/// Catmull-Rom weights (Mitchell-Netravali with B = 0, C = 0.5) for the four taps around a
/// sample at fractional offset `t` in `[0, 1)`.
pub(crate) fn catmull_rom_weights(t: f64) -> [f64; 4] {
    const M: [[f64; 4]; 4] = cubic_resampler(0.0, 0.5);
    let t2 = t * t;
    let t3 = t2 * t;
    let mut w = [0.0; 4];
    for (i, row) in M.iter().enumerate() {
        w[i] = row[0] + row[1] * t + row[2] * t2 + row[3] * t3;
    }
    w
}

const fn cubic_resampler(b: f64, c: f64) -> [[f64; 4]; 4] {
    [
        [
            (1.0 / 6.0) * b,
            -(3.0 / 6.0) * b - c,
            (3.0 / 6.0) * b + 2.0 * c,
            -(1.0 / 6.0) * b - c,
        ],
        [
            1.0 - (2.0 / 6.0) * b,
            0.0,
            -3.0 + (12.0 / 6.0) * b + c,
            2.0 - (9.0 / 6.0) * b - c,
        ],
        [
            (1.0 / 6.0) * b,
            (3.0 / 6.0) * b + c,
            3.0 - (15.0 / 6.0) * b - 2.0 * c,
            -2.0 + (9.0 / 6.0) * b + c,
        ],
        [0.0, 0.0, -c, (1.0 / 6.0) * b + c],
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
