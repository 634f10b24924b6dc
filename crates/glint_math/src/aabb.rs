//! Axis-aligned bounding box for spatial acceleration structures (BVH).
//!
//! The box is stored as two corner points. An empty box uses the
//! min=+inf / max=-inf sentinel so that merging it with any real box
//! yields that box unchanged.

use crate::{Interval, Ray};
use glam::Vec3;

/// Axis-aligned bounding box defined by its min and max corners.
///
/// Invariant for non-empty boxes: `min[axis] <= max[axis]` on every axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from its two corners.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB from two arbitrary corner points.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// An empty AABB (contains nothing). Merging it with any box returns
    /// that box; it must not be handed to the traversal as a real volume.
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };

    /// True for the empty sentinel.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }

    /// Merge two AABBs into the smallest box containing both.
    /// Componentwise min/max, so the operation is commutative and associative.
    pub fn merge(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Widen the box to include a point.
    pub fn expand(&self, point: Vec3) -> Aabb {
        Aabb {
            min: self.min.min(point),
            max: self.max.max(point),
        }
    }

    /// Midpoint of the two corners.
    pub fn centroid(&self) -> Vec3 {
        0.5 * (self.min + self.max)
    }

    /// Size along each axis (max - min).
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// Test if a ray intersects this AABB within the given interval.
    ///
    /// Slab method. The ray's sign flags select the near/far corner per
    /// axis so no per-axis swap is needed.
    pub fn hit(&self, ray: &Ray, mut ray_t: Interval) -> bool {
        let bounds = [self.min, self.max];
        let origin = ray.origin();
        let inv = ray.inv_direction();
        let sign = ray.sign();

        for axis in 0..3 {
            let t0 = (bounds[sign[axis]][axis] - origin[axis]) * inv[axis];
            let t1 = (bounds[1 - sign[axis]][axis] - origin[axis]) * inv[axis];

            ray_t.min = t0.max(ray_t.min);
            ray_t.max = t1.min(ray_t.max);
            if ray_t.max <= ray_t.min {
                return false;
            }
        }

        true
    }

    /// Slab test that also reports the entry/exit parameter range.
    ///
    /// Returns the [t_min, t_max] interval over which the ray is inside
    /// the box, or None on a miss. The traversal uses the entry distance
    /// to order and prune subtree visits.
    pub fn hit_distance(&self, ray: &Ray) -> Option<Interval> {
        let bounds = [self.min, self.max];
        let origin = ray.origin();
        let inv = ray.inv_direction();
        let sign = ray.sign();

        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;

        for axis in 0..3 {
            let t_near = (bounds[sign[axis]][axis] - origin[axis]) * inv[axis];
            let t_far = (bounds[1 - sign[axis]][axis] - origin[axis]) * inv[axis];

            t_min = t_min.max(t_near);
            t_max = t_max.min(t_far);
            if t_min > t_max {
                return None;
            }
        }

        Some(Interval::new(t_min, t_max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_from_points() {
        let aabb = Aabb::from_points(Vec3::new(10.0, 0.0, 3.0), Vec3::new(0.0, 10.0, 7.0));

        assert_eq!(aabb.min, Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(aabb.max, Vec3::new(10.0, 10.0, 7.0));
    }

    #[test]
    fn test_aabb_merge() {
        let box1 = Aabb::from_points(Vec3::ZERO, Vec3::new(5.0, 5.0, 5.0));
        let box2 = Aabb::from_points(Vec3::new(3.0, 3.0, 3.0), Vec3::new(10.0, 10.0, 10.0));
        let merged = box1.merge(&box2);

        assert_eq!(merged.min, Vec3::ZERO);
        assert_eq!(merged.max, Vec3::splat(10.0));
    }

    #[test]
    fn test_aabb_merge_commutative_associative() {
        let a = Aabb::from_points(Vec3::new(-1.0, 0.0, 2.0), Vec3::new(1.0, 3.0, 4.0));
        let b = Aabb::from_points(Vec3::new(0.0, -2.0, 0.0), Vec3::new(5.0, 1.0, 3.0));
        let c = Aabb::from_points(Vec3::new(-4.0, 1.0, 1.0), Vec3::new(0.0, 2.0, 9.0));

        assert_eq!(a.merge(&b), b.merge(&a));
        assert_eq!(a.merge(&b).merge(&c), a.merge(&b.merge(&c)));
    }

    #[test]
    fn test_aabb_merge_empty_is_identity() {
        let a = Aabb::from_points(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(Aabb::EMPTY.merge(&a), a);
        assert_eq!(a.merge(&Aabb::EMPTY), a);
    }

    #[test]
    fn test_aabb_expand() {
        let aabb = Aabb::EMPTY
            .expand(Vec3::new(1.0, 2.0, 3.0))
            .expand(Vec3::new(-1.0, 0.0, 5.0));

        assert_eq!(aabb.min, Vec3::new(-1.0, 0.0, 3.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 2.0, 5.0));
    }

    #[test]
    fn test_aabb_centroid_extent() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::new(10.0, 4.0, 2.0));
        assert_eq!(aabb.centroid(), Vec3::new(5.0, 2.0, 1.0));
        assert_eq!(aabb.extent(), Vec3::new(10.0, 4.0, 2.0));
    }

    #[test]
    fn test_aabb_hit() {
        let aabb = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));

        // Ray pointing at the box
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(aabb.hit(&ray, Interval::new(0.0, 100.0)));

        // Ray pointing away
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(!aabb.hit(&ray, Interval::new(0.0, 100.0)));

        // Ray missing the box
        let ray = Ray::new(Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(!aabb.hit(&ray, Interval::new(0.0, 100.0)));

        // Ray along a negative axis direction
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        assert!(aabb.hit(&ray, Interval::new(0.0, 100.0)));
    }

    #[test]
    fn test_aabb_hit_distance() {
        let aabb = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));

        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
        let t = aabb.hit_distance(&ray).unwrap();
        assert!((t.min - 4.0).abs() < 1e-5);
        assert!((t.max - 6.0).abs() < 1e-5);

        // Origin inside the box: entry is behind the origin
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        let t = aabb.hit_distance(&ray).unwrap();
        assert!(t.min < 0.0);
        assert!((t.max - 1.0).abs() < 1e-5);

        let ray = Ray::new(Vec3::new(0.0, 10.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(aabb.hit_distance(&ray).is_none());
    }
}
