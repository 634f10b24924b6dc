//! Triangle primitive.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use glint_math::{Aabb, Interval, Ray, Vec3};

use crate::Material;

/// A triangle primitive with a precomputed face normal.
#[derive(Clone, Debug)]
pub struct Triangle {
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    /// Precomputed face normal (unit length)
    normal: Vec3,
    material: Material,
    bbox: Aabb,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, material: Material) -> Self {
        let edge1 = v1 - v0;
        let edge2 = v2 - v0;
        let normal = edge1.cross(edge2).normalize();

        // Pad thin dimensions so an axis-aligned triangle still gets a
        // box the slab test can enter.
        let delta = Vec3::splat(1e-4);
        let bbox = Aabb::from_points(v0.min(v1).min(v2) - delta, v0.max(v1).max(v2) + delta);

        Self {
            v0,
            v1,
            v2,
            normal,
            material,
            bbox,
        }
    }

    /// Möller-Trumbore ray-triangle intersection.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<f32> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let h = ray.direction().cross(edge2);
        let a = edge1.dot(h);

        // Ray is parallel to the triangle plane
        if a.abs() < 1e-8 {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin() - self.v0;
        let u = f * s.dot(h);

        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction().dot(q);

        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(q);
        if !ray_t.surrounds(t) {
            return None;
        }

        Some(t)
    }

    /// Face normal; the same on both sides, shading orients it against
    /// the incident ray.
    pub fn normal_at(&self, _point: Vec3) -> Vec3 {
        self.normal
    }

    /// Barycentric (u, v) of a point in the triangle's plane, measured
    /// against the v0->v1 and v0->v2 edges.
    pub fn uv_at(&self, point: Vec3) -> (f32, f32) {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        let p = point - self.v0;

        let d11 = edge1.dot(edge1);
        let d12 = edge1.dot(edge2);
        let d22 = edge2.dot(edge2);
        let dp1 = p.dot(edge1);
        let dp2 = p.dot(edge2);

        let denom = d11 * d22 - d12 * d12;
        if denom.abs() < 1e-12 {
            return (0.0, 0.0);
        }

        let u = (d22 * dp1 - d12 * dp2) / denom;
        let v = (d11 * dp2 - d12 * dp1) / denom;
        (u, v)
    }

    pub fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_triangle() -> Triangle {
        Triangle::new(
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(0.0, 1.0, -1.0),
            Material::default(),
        )
    }

    #[test]
    fn test_triangle_hit_centroid() {
        let tri = test_triangle();
        let centroid = (Vec3::new(-1.0, -1.0, -1.0)
            + Vec3::new(1.0, -1.0, -1.0)
            + Vec3::new(0.0, 1.0, -1.0))
            / 3.0;

        // Approach the centroid against the face normal
        let origin = centroid + tri.normal_at(centroid) * 3.0;
        let ray = Ray::new(origin, -tri.normal_at(centroid));

        let t = tri.hit(&ray, Interval::new(1e-4, f32::INFINITY)).unwrap();
        assert!((t - 3.0).abs() < 1e-4);

        let (u, v) = tri.uv_at(ray.at(t));
        assert!(u >= 0.0 && v >= 0.0 && u + v <= 1.0 + 1e-5);
    }

    #[test]
    fn test_triangle_parallel_ray_misses() {
        let tri = test_triangle();

        // Direction perpendicular to the normal: parallel to the plane
        let ray = Ray::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(tri.hit(&ray, Interval::new(1e-4, f32::INFINITY)).is_none());
    }

    #[test]
    fn test_triangle_miss_outside_edges() {
        let tri = test_triangle();

        let ray = Ray::new(Vec3::new(2.0, 2.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(tri.hit(&ray, Interval::new(1e-4, f32::INFINITY)).is_none());
    }

    #[test]
    fn test_triangle_uv_at_vertices() {
        let tri = test_triangle();

        let (u, v) = tri.uv_at(Vec3::new(-1.0, -1.0, -1.0));
        assert!(u.abs() < 1e-5 && v.abs() < 1e-5);

        let (u, v) = tri.uv_at(Vec3::new(1.0, -1.0, -1.0));
        assert!((u - 1.0).abs() < 1e-5 && v.abs() < 1e-5);

        let (u, v) = tri.uv_at(Vec3::new(0.0, 1.0, -1.0));
        assert!(u.abs() < 1e-5 && (v - 1.0).abs() < 1e-5);
    }
}
