//! Light sources.

use glint_math::Vec3;

use crate::Color;

/// A light source: either a point emitter or a rectangular area emitter
/// that shading samples stochastically for soft shadows.
#[derive(Clone, Debug)]
pub enum Light {
    Point {
        position: Vec3,
        intensity: Color,
    },
    Area {
        center: Vec3,
        intensity: Color,
        /// First edge direction of the rectangle (unit length)
        u_axis: Vec3,
        /// Second edge direction of the rectangle (unit length)
        v_axis: Vec3,
        width: f32,
        height: f32,
    },
}

impl Light {
    pub fn intensity(&self) -> Color {
        match self {
            Light::Point { intensity, .. } => *intensity,
            Light::Area { intensity, .. } => *intensity,
        }
    }
}

/// A point on an area light's rectangular support for the unit sample
/// coordinates (ru, rv) in [0, 1).
pub fn area_sample_point(
    center: Vec3,
    u_axis: Vec3,
    v_axis: Vec3,
    width: f32,
    height: f32,
    ru: f32,
    rv: f32,
) -> Vec3 {
    center + ru * width * u_axis + rv * height * v_axis
}
