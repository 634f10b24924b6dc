//! Tone mapping from unclamped linear radiance to displayable values.

use glint_core::{Color, ToneMap};
use glint_math::Vec3;

/// Apply the selected operator to a linear color. The result is still
/// linear; gamma correction happens in `color_to_rgb`.
pub fn tone_map(mode: ToneMap, exposure: f32, color: Color) -> Color {
    match mode {
        ToneMap::Linear => color,
        ToneMap::Reinhard => reinhard(color),
        ToneMap::Exposure => exposure_map(color, exposure),
        ToneMap::Aces => aces(color),
    }
}

/// Reinhard operator: c / (c + 1), compresses highlights smoothly.
fn reinhard(color: Color) -> Color {
    color / (color + Vec3::ONE)
}

/// Exposure operator: 1 - exp(-c * exposure).
fn exposure_map(color: Color, exposure: f32) -> Color {
    Vec3::new(
        1.0 - (-color.x * exposure).exp(),
        1.0 - (-color.y * exposure).exp(),
        1.0 - (-color.z * exposure).exp(),
    )
}

/// ACES filmic curve fit.
fn aces(color: Color) -> Color {
    fn channel(x: f32) -> f32 {
        const A: f32 = 2.51;
        const B: f32 = 0.03;
        const C: f32 = 2.43;
        const D: f32 = 0.59;
        const E: f32 = 0.14;
        ((x * (A * x + B)) / (x * (C * x + D) + E)).clamp(0.0, 1.0)
    }

    Vec3::new(channel(color.x), channel(color.y), channel(color.z))
}

/// Gamma 2.2 correction for one channel.
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.powf(1.0 / 2.2)
    } else {
        0.0
    }
}

/// Quantize a tone-mapped color to 8-bit RGB with gamma correction.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let r = (255.0 * linear_to_gamma(color.x).clamp(0.0, 1.0)) as u8;
    let g = (255.0 * linear_to_gamma(color.y).clamp(0.0, 1.0)) as u8;
    let b = (255.0 * linear_to_gamma(color.z).clamp(0.0, 1.0)) as u8;
    [r, g, b]
}
