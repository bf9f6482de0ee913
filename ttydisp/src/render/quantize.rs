/*!
    YUV to 256-color palette quantization.
*/

/**
    First index of the 6x6x6 color cube in the 256-color palette.
*/
const CUBE_OFFSET: u8 = 16;

/**
    Map one YUV sample to an index into the 256-color palette.

    Converts with BT.601 coefficients, then picks the nearest of the six
    levels per channel in the xterm color cube. Always returns a value in
    `16..=231`.

    Channels outside `0..=255` are not clamped: the value is truncated
    toward zero and wrapped into a byte, so a very saturated red can come
    out darker than a less saturated one.
*/
pub fn quantize(y: u8, u: u8, v: u8) -> u8 {
    let y = f64::from(y);
    let u = f64::from(u) - 128.0;
    let v = f64::from(v) - 128.0;

    let r = to_sample(y + 1.402 * v);
    let g = to_sample(y - 0.344 * u - 0.714 * v);
    let b = to_sample(y + 1.772 * u);

    CUBE_OFFSET + 36 * cube_level(r) + 6 * cube_level(g) + cube_level(b)
}

#[inline]
fn to_sample(value: f64) -> u8 {
    value as i32 as u8
}

/// 0..=255 to 0..=5
#[inline]
fn cube_level(sample: u8) -> u8 {
    (f64::from(sample) * 5.0 / 256.0).round() as u8
}
