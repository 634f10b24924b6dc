//! Surface material for Blinn-Phong shading.

use std::sync::Arc;

use glint_math::Vec3;

use crate::texture::Texture;

/// Color type alias (linear RGB, typically 0-1 but unclamped).
pub type Color = Vec3;

/// Blinn-Phong material with optional mirror reflection, dielectric
/// refraction and an image texture for the diffuse term.
#[derive(Clone, Debug)]
pub struct Material {
    /// Diffuse coefficient
    pub kd: f32,
    /// Specular coefficient
    pub ks: f32,
    /// Specular (shininess) exponent
    pub specular_exponent: f32,
    pub diffuse_color: Color,
    pub specular_color: Color,
    pub is_reflective: bool,
    /// Fraction of the reflected ray's color added when reflective
    pub reflectivity: f32,
    pub is_refractive: bool,
    pub refractive_index: f32,
    /// Fraction of the refracted ray's color added when refractive
    pub transparency: f32,
    /// Optional diffuse texture, shared between shapes
    pub texture: Option<Arc<Texture>>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            kd: 0.0,
            ks: 0.0,
            specular_exponent: 0.0,
            diffuse_color: Color::ZERO,
            specular_color: Color::ZERO,
            is_reflective: false,
            reflectivity: 0.0,
            is_refractive: false,
            refractive_index: 1.0,
            transparency: 0.5,
            texture: None,
        }
    }
}

impl Material {
    /// Diffuse color at the given UV coordinates: the texture sample when
    /// a texture is attached, the constant diffuse color otherwise.
    pub fn diffuse_at(&self, u: f32, v: f32) -> Color {
        match &self.texture {
            Some(texture) => texture.sample(u, v),
            None => self.diffuse_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diffuse_without_texture() {
        let material = Material {
            diffuse_color: Color::new(0.2, 0.4, 0.6),
            ..Default::default()
        };

        assert_eq!(material.diffuse_at(0.5, 0.5), Color::new(0.2, 0.4, 0.6));
    }
}
