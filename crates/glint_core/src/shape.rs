//! The closed set of geometry primitives.

use glint_math::{Aabb, Interval, Ray, Vec3};

use crate::{Cylinder, Material, Sphere, Triangle};

/// A scene primitive. One capability surface over a closed set of
/// variants: intersection, surface normal, UV mapping, bounds, material.
///
/// Primitives live in the scene's shape table; the BVH references them
/// by index into that table.
#[derive(Clone, Debug)]
pub enum Primitive {
    Sphere(Sphere),
    Triangle(Triangle),
    Cylinder(Cylinder),
}

impl Primitive {
    /// Nearest intersection distance within the interval, or None.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<f32> {
        match self {
            Primitive::Sphere(s) => s.hit(ray, ray_t),
            Primitive::Triangle(t) => t.hit(ray, ray_t),
            Primitive::Cylinder(c) => c.hit(ray, ray_t),
        }
    }

    /// Outward surface normal at a point on the primitive.
    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        match self {
            Primitive::Sphere(s) => s.normal_at(point),
            Primitive::Triangle(t) => t.normal_at(point),
            Primitive::Cylinder(c) => c.normal_at(point),
        }
    }

    /// UV texture coordinates at a point on the primitive.
    pub fn uv_at(&self, point: Vec3) -> (f32, f32) {
        match self {
            Primitive::Sphere(s) => s.uv_at(point),
            Primitive::Triangle(t) => t.uv_at(point),
            Primitive::Cylinder(c) => c.uv_at(point),
        }
    }

    pub fn bounding_box(&self) -> Aabb {
        match self {
            Primitive::Sphere(s) => s.bounding_box(),
            Primitive::Triangle(t) => t.bounding_box(),
            Primitive::Cylinder(c) => c.bounding_box(),
        }
    }

    pub fn material(&self) -> &Material {
        match self {
            Primitive::Sphere(s) => s.material(),
            Primitive::Triangle(t) => t.material(),
            Primitive::Cylinder(c) => c.material(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_dispatch() {
        let sphere = Primitive::Sphere(Sphere::new(Vec3::ZERO, 1.0, Material::default()));

        let ray = Ray::new(Vec3::new(0.0, 0.0, 3.0), Vec3::new(0.0, 0.0, -1.0));
        let t = sphere.hit(&ray, Interval::new(1e-4, f32::INFINITY)).unwrap();
        assert!((t - 2.0).abs() < 1e-4);

        let n = sphere.normal_at(ray.at(t));
        assert!((n - Vec3::Z).length() < 1e-4);
        assert!(!sphere.bounding_box().is_empty());
    }
}
