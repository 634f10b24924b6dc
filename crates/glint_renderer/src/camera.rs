//! Pinhole camera for primary ray generation.

use glint_core::CameraSettings;
use glint_math::{Ray, Vec3};
use rand::RngCore;

use crate::gen_f32;

/// Pinhole camera. The viewport basis is computed once from the scene's
/// camera settings; ray generation is then read-only.
#[derive(Clone, Debug)]
pub struct Camera {
    width: u32,
    height: u32,
    center: Vec3,
    viewport_u: Vec3,
    viewport_v: Vec3,
    upper_left: Vec3,
}

impl Camera {
    /// Build the camera from scene settings.
    pub fn new(settings: &CameraSettings) -> Self {
        let aspect = settings.width as f32 / settings.height as f32;
        let viewport_height = 2.0 * (settings.fov.to_radians() / 2.0).tan();
        let viewport_width = aspect * viewport_height;

        // Right-handed basis: w points backward, u right, v up
        let w = (settings.position - settings.look_at).normalize();
        let u = settings.up.cross(w).normalize();
        let v = w.cross(u);

        let center = settings.position;
        let viewport_u = viewport_width * u;
        let viewport_v = -viewport_height * v;
        let upper_left = center - w - viewport_u / 2.0 - viewport_v / 2.0;

        Self {
            width: settings.width,
            height: settings.height,
            center,
            viewport_u,
            viewport_v,
            upper_left,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Ray through normalized viewport coordinates (s, t) in [0, 1),
    /// t running top-down.
    pub fn ray_through(&self, s: f32, t: f32) -> Ray {
        let target = self.upper_left + s * self.viewport_u + t * self.viewport_v;
        Ray::new(self.center, target - self.center)
    }

    /// Ray through the center of pixel (x, y).
    pub fn pixel_ray(&self, x: u32, y: u32) -> Ray {
        let s = (x as f32 + 0.5) / self.width as f32;
        let t = (y as f32 + 0.5) / self.height as f32;
        self.ray_through(s, t)
    }

    /// Ray through a jittered position inside pixel (x, y), for
    /// antialiasing.
    pub fn sample_ray(&self, x: u32, y: u32, rng: &mut dyn RngCore) -> Ray {
        let s = (x as f32 + gen_f32(rng)) / self.width as f32;
        let t = (y as f32 + gen_f32(rng)) / self.height as f32;
        self.ray_through(s, t)
    }
}
