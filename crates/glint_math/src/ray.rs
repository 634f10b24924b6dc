//! Ray type for intersection queries.
//!
//! Besides origin and direction, a ray carries a precomputed componentwise
//! inverse direction and per-axis sign flags so that slab tests against
//! bounding boxes can pick the near/far corner without branching.

use glam::Vec3;

/// A ray with origin and normalized direction.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
    /// Componentwise inverse of the direction.
    /// Zero components become +infinity regardless of the sign of the zero.
    inv_direction: Vec3,
    /// Per axis: 1 if the direction component is negative, 0 otherwise.
    sign: [usize; 3],
}

impl Ray {
    /// Create a new ray. The direction is normalized and the inverse
    /// direction and sign flags are derived once here.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        let direction = direction.normalize();
        let inv_direction = Vec3::new(
            if direction.x == 0.0 { f32::INFINITY } else { 1.0 / direction.x },
            if direction.y == 0.0 { f32::INFINITY } else { 1.0 / direction.y },
            if direction.z == 0.0 { f32::INFINITY } else { 1.0 / direction.z },
        );
        let sign = [
            (direction.x < 0.0) as usize,
            (direction.y < 0.0) as usize,
            (direction.z < 0.0) as usize,
        ];

        Self {
            origin,
            direction,
            inv_direction,
            sign,
        }
    }

    /// Get the ray's origin point.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the ray's direction vector (unit length).
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the componentwise inverse direction.
    #[inline]
    pub fn inv_direction(&self) -> Vec3 {
        self.inv_direction
    }

    /// Get the per-axis sign flags.
    #[inline]
    pub fn sign(&self) -> [usize; 3] {
        self.sign
    }

    /// Compute a point along the ray at parameter t.
    /// P(t) = origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + t * self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0));

        // Direction is normalized on construction
        assert_eq!(ray.direction(), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(ray.at(0.0), Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(ray.at(2.5), Vec3::new(2.5, 0.0, 0.0));
    }

    #[test]
    fn test_ray_inv_direction() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.5, 0.0, -0.5));

        let inv = ray.inv_direction();
        assert!((inv.x - 2.0_f32.sqrt()).abs() < 1e-5);
        assert_eq!(inv.y, f32::INFINITY);
        assert!((inv.z + 2.0_f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn test_ray_sign_flags() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, -1.0, 1.0));
        assert_eq!(ray.sign(), [0, 1, 0]);

        // Negative zero must not count as negative
        let ray = Ray::new(Vec3::ZERO, Vec3::new(-0.0, 1.0, 0.0));
        assert_eq!(ray.sign(), [0, 0, 0]);
        assert_eq!(ray.inv_direction().x, f32::INFINITY);
    }
}
