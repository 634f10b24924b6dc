//! Capped cylinder primitive.

use std::f32::consts::PI;

use glint_math::{Aabb, Interval, Ray, Vec3};

use crate::Material;

/// A capped cylinder. `center` is the midpoint of the axis segment; the
/// body spans `center - height * axis` to `center + height * axis` with
/// flat caps at both ends.
#[derive(Clone, Debug)]
pub struct Cylinder {
    center: Vec3,
    /// Unit vector along the axis
    axis: Vec3,
    radius: f32,
    /// Half-extent along the axis
    height: f32,
    material: Material,
    bbox: Aabb,
}

impl Cylinder {
    /// Create a new cylinder. The axis is normalized here.
    pub fn new(center: Vec3, axis: Vec3, radius: f32, height: f32, material: Material) -> Self {
        let axis = axis.normalize();
        let top = center + axis * height;
        let bottom = center - axis * height;

        // Per-axis reach of the cap disks: r * sqrt(1 - axis[i]^2)
        let disk = radius
            * Vec3::new(
                (1.0 - axis.x * axis.x).max(0.0).sqrt(),
                (1.0 - axis.y * axis.y).max(0.0).sqrt(),
                (1.0 - axis.z * axis.z).max(0.0).sqrt(),
            );
        let bbox = Aabb::new(bottom.min(top) - disk, bottom.max(top) + disk);

        Self {
            center,
            axis,
            radius,
            height,
            material,
            bbox,
        }
    }

    /// Nearest intersection among the body and the two caps.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<f32> {
        let o = ray.origin();
        let d = ray.direction();

        let mut closest: Option<f32> = None;
        let mut consider = |t: f32| {
            if ray_t.surrounds(t) && closest.map_or(true, |best| t < best) {
                closest = Some(t);
            }
        };

        // Body: solve on the components perpendicular to the axis
        let v = d - self.axis * d.dot(self.axis);
        let w = (o - self.center) - self.axis * (o - self.center).dot(self.axis);

        let a = v.dot(v);
        let b = 2.0 * v.dot(w);
        let c = w.dot(w) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant >= 0.0 && a > 1e-12 {
            let sqrtd = discriminant.sqrt();
            for t in [(-b - sqrtd) / (2.0 * a), (-b + sqrtd) / (2.0 * a)] {
                let y = (ray.at(t) - self.center).dot(self.axis);
                if y.abs() <= self.height {
                    consider(t);
                }
            }
        }

        // Caps: plane intersection, point must fall inside the disk
        let denom = d.dot(self.axis);
        if denom.abs() > 1e-6 {
            for cap in [
                self.center - self.axis * self.height,
                self.center + self.axis * self.height,
            ] {
                let t = (cap - o).dot(self.axis) / denom;
                let p = ray.at(t);
                if (p - cap).length_squared() <= self.radius * self.radius {
                    consider(t);
                }
            }
        }

        closest
    }

    /// Outward surface normal: the axis direction on the caps, radial on
    /// the body.
    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        let top = self.center + self.axis * self.height;
        let bottom = self.center - self.axis * self.height;

        if (point - top).dot(self.axis).abs() < 1e-4 {
            return self.axis;
        }
        if (point - bottom).dot(self.axis).abs() < 1e-4 {
            return -self.axis;
        }

        let axis_point = self.center + (point - self.center).dot(self.axis) * self.axis;
        (point - axis_point).normalize()
    }

    /// Cylindrical UV: u is the angle around the axis, v the fraction of
    /// the height from the bottom cap.
    pub fn uv_at(&self, point: Vec3) -> (f32, f32) {
        let (u_ref, v_ref) = self.axis.any_orthonormal_pair();
        let rel = point - self.center;

        let angle = rel.dot(v_ref).atan2(rel.dot(u_ref));
        let u = (angle + PI) / (2.0 * PI);
        let v = (rel.dot(self.axis) + self.height) / (2.0 * self.height);

        (u, v.clamp(0.0, 1.0))
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

    fn unit_cylinder() -> Cylinder {
        // Y axis, radius 1, from y=-1 to y=1
        Cylinder::new(Vec3::ZERO, Vec3::Y, 1.0, 1.0, Material::default())
    }

    #[test]
    fn test_cylinder_body_hit() {
        let cylinder = unit_cylinder();

        let ray = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0));
        let t = cylinder.hit(&ray, Interval::new(1e-4, f32::INFINITY)).unwrap();
        assert!((t - 4.0).abs() < 1e-4);

        let n = cylinder.normal_at(ray.at(t));
        assert!((n - Vec3::X).length() < 1e-4);
    }

    #[test]
    fn test_cylinder_cap_hit() {
        let cylinder = unit_cylinder();

        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let t = cylinder.hit(&ray, Interval::new(1e-4, f32::INFINITY)).unwrap();
        assert!((t - 4.0).abs() < 1e-4);

        let n = cylinder.normal_at(ray.at(t));
        assert!((n - Vec3::Y).length() < 1e-4);
    }

    #[test]
    fn test_cylinder_miss_beyond_height() {
        let cylinder = unit_cylinder();

        // Aimed at the body's infinite extension, above the cap
        let ray = Ray::new(Vec3::new(5.0, 1.5, 0.0), Vec3::new(-1.0, 0.0, 0.0));
        assert!(cylinder
            .hit(&ray, Interval::new(1e-4, f32::INFINITY))
            .is_none());
    }

    #[test]
    fn test_cylinder_ray_along_axis() {
        let cylinder = unit_cylinder();

        // Parallel to the axis, inside the radius: hits the top cap
        let ray = Ray::new(Vec3::new(0.5, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let t = cylinder.hit(&ray, Interval::new(1e-4, f32::INFINITY)).unwrap();
        assert!((t - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_cylinder_bounding_box() {
        let cylinder = unit_cylinder();
        let bbox = cylinder.bounding_box();

        assert!((bbox.min - Vec3::new(-1.0, -1.0, -1.0)).length() < 1e-5);
        assert!((bbox.max - Vec3::new(1.0, 1.0, 1.0)).length() < 1e-5);
    }
}
