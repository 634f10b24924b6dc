//! Sphere primitive.

use std::f32::consts::PI;

use glint_math::{Aabb, Interval, Ray, Vec3};

use crate::Material;

/// A sphere primitive.
#[derive(Clone, Debug)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Material,
    bbox: Aabb,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        let radius = radius.max(0.0);
        let rvec = Vec3::splat(radius);
        let bbox = Aabb::from_points(center - rvec, center + rvec);

        Self {
            center,
            radius,
            material,
            bbox,
        }
    }

    /// Nearest intersection distance within the interval.
    ///
    /// Tries the near quadratic root first, then the far one, so that
    /// rays starting inside the sphere (refraction exit rays) still find
    /// the backside.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<f32> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        Some(root)
    }

    /// Outward surface normal at a point on the sphere.
    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        (point - self.center) / self.radius
    }

    /// Spherical UV coordinates at a point on the sphere.
    ///
    /// u is the angle around the Y axis from -X, v the angle down from +Y.
    pub fn uv_at(&self, point: Vec3) -> (f32, f32) {
        let p = self.normal_at(point);
        let theta = (-p.y).acos();
        let phi = (-p.z).atan2(p.x) + PI;

        (phi / (2.0 * PI), theta / PI)
    }

    pub fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}
