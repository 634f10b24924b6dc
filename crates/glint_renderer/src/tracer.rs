//! Nearest-intersection dispatcher.
//!
//! One query surface for the renderer: the BVH path when the hierarchy
//! is enabled, a linear scan otherwise. Both paths return the same
//! nearest hit for identical inputs; the tests hold them to that.

use glint_core::Scene;
use glint_math::{Interval, Ray};

use crate::bvh::Bvh;

/// Distance below which an intersection counts as the ray's own origin
/// and is ignored, excluding self-intersection of secondary rays.
pub const RAY_EPSILON: f32 = 1e-4;

/// A nearest-intersection result: hit distance and the index of the hit
/// shape in the scene's table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub t: f32,
    pub shape: usize,
}

/// Intersection dispatcher over a finalized scene.
///
/// Holds the read-only BVH built once at construction; rays can then be
/// traced from any number of threads.
pub struct Tracer<'a> {
    scene: &'a Scene,
    bvh: Option<Bvh>,
}

impl<'a> Tracer<'a> {
    /// Build the dispatcher for a scene, constructing the BVH when the
    /// scene enables it.
    pub fn new(scene: &'a Scene) -> Self {
        let bvh = if scene.use_bvh {
            Bvh::build(&scene.shapes)
        } else {
            log::debug!("hierarchy disabled, using linear intersection scan");
            None
        };

        Self { scene, bvh }
    }

    pub fn scene(&self) -> &Scene {
        self.scene
    }

    /// Nearest hit along the ray with RAY_EPSILON < t < max_t.
    pub fn intersect(&self, ray: &Ray, max_t: f32) -> Option<Hit> {
        match &self.bvh {
            Some(bvh) => bvh.intersect(&self.scene.shapes, ray, max_t),
            None => self.intersect_linear(ray, max_t),
        }
    }

    /// Brute-force scan over the whole shape table, same epsilon and
    /// max-distance semantics as the BVH path.
    pub fn intersect_linear(&self, ray: &Ray, max_t: f32) -> Option<Hit> {
        let mut closest = max_t;
        let mut best = None;

        for (index, shape) in self.scene.shapes.iter().enumerate() {
            if let Some(t) = shape.hit(ray, Interval::new(RAY_EPSILON, closest)) {
                closest = t;
                best = Some(Hit { t, shape: index });
            }
        }

        best
    }
}
