//! sRGB gamma correction.
//!
//! The APA102 PWM output is linear in the channel value, while colours picked
//! by eye (or decoded from images) are sRGB encoded. Running a colour through
//! [`correct`] before sending it makes brightness ramps look even instead of
//! washing out in the upper half.

use palette::LinSrgb;

use crate::Pixel;

/// Decode an sRGB pixel into linear channel values.
///
/// Black and full white are unchanged, mid-tones get darker
/// (`128` becomes roughly `55`).
pub fn correct(pixel: Pixel) -> Pixel {
    let linear: LinSrgb<f32> = pixel.into_format::<f32>().into_linear();
    let linear: LinSrgb<u8> = linear.into_format();
    // same bytes, now meant as linear PWM duty
    Pixel::new(linear.red, linear.green, linear.blue)
}
