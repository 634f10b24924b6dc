//! Shared fixtures for the crate's tests.

use glint_core::{CameraSettings, Color, Light, Primitive, RenderMode, Scene, ToneMap};
use glint_math::Vec3;

/// A scene with fixed camera/settings around the given shapes and lights.
pub(crate) fn test_scene(shapes: Vec<Primitive>, lights: Vec<Light>) -> Scene {
    Scene {
        shapes,
        lights,
        background: Color::ZERO,
        render_mode: RenderMode::Phong,
        tone_map: ToneMap::Linear,
        camera: CameraSettings {
            width: 8,
            height: 8,
            position: Vec3::ZERO,
            look_at: Vec3::NEG_Z,
            up: Vec3::Y,
            fov: 45.0,
            exposure: 1.0,
        },
        nbounces: 4,
        use_bvh: true,
        antialiasing: false,
    }
}
