//! Depth-bounded recursive Blinn-Phong shading.
//!
//! Local illumination with shadow rays (point lights and sampled area
//! lights), plus mirror reflection and dielectric refraction that
//! recursively re-enter the intersection dispatcher. The depth counter
//! strictly decreases and cuts recursion at zero; an occluded light
//! contributes nothing.

use glint_core::{area_sample_point, Color, Light, Material};
use glint_math::{Ray, Vec3};
use rand::RngCore;

use crate::gen_f32;
use crate::tracer::{Tracer, RAY_EPSILON};

/// Shadow-ray samples per area light.
const AREA_LIGHT_SAMPLES: u32 = 16;

impl Tracer<'_> {
    /// Color seen along the ray. `depth` bounds the remaining secondary
    /// bounces; at zero only local illumination is evaluated.
    pub fn shade(&self, ray: &Ray, depth: u32, rng: &mut dyn RngCore) -> Color {
        let Some(hit) = self.intersect(ray, f32::INFINITY) else {
            return self.scene().background;
        };

        let shape = &self.scene().shapes[hit.shape];
        let material = shape.material();
        let point = ray.at(hit.t);

        let outward = shape.normal_at(point);
        // Shading normal faces the incident ray; the outward normal keeps
        // the entering/exiting information for refraction.
        let normal = if ray.direction().dot(outward) < 0.0 {
            outward
        } else {
            -outward
        };

        let (u, v) = shape.uv_at(point);
        let diffuse_color = material.diffuse_at(u, v);
        let view_dir = -ray.direction();

        let mut color = self.local_illumination(point, normal, view_dir, material, diffuse_color, rng);

        if material.is_reflective && depth > 0 {
            let d = ray.direction();
            let reflected = d - 2.0 * d.dot(normal) * normal;
            let reflect_ray = Ray::new(point + reflected * RAY_EPSILON, reflected);
            color += material.reflectivity * self.shade(&reflect_ray, depth - 1, rng);
        }

        if material.is_refractive && depth > 0 {
            // Total internal reflection contributes nothing
            if let Some(refracted) =
                refract_direction(ray.direction(), outward, material.refractive_index)
            {
                let refract_ray = Ray::new(point + refracted * RAY_EPSILON, refracted);
                color += material.transparency * self.shade(&refract_ray, depth - 1, rng);
            }
        }

        color
    }

    /// Blinn-Phong contribution of every light, shadow rays included.
    fn local_illumination(
        &self,
        point: Vec3,
        normal: Vec3,
        view_dir: Vec3,
        material: &Material,
        diffuse_color: Color,
        rng: &mut dyn RngCore,
    ) -> Color {
        let mut color = Color::ZERO;

        for light in &self.scene().lights {
            match light {
                Light::Point {
                    position,
                    intensity,
                } => {
                    color += self.light_contribution(
                        point,
                        normal,
                        view_dir,
                        material,
                        diffuse_color,
                        *position,
                        *intensity,
                    );
                }
                Light::Area {
                    center,
                    intensity,
                    u_axis,
                    v_axis,
                    width,
                    height,
                } => {
                    let mut sum = Color::ZERO;
                    for _ in 0..AREA_LIGHT_SAMPLES {
                        let sample = area_sample_point(
                            *center,
                            *u_axis,
                            *v_axis,
                            *width,
                            *height,
                            gen_f32(rng),
                            gen_f32(rng),
                        );
                        sum += self.light_contribution(
                            point,
                            normal,
                            view_dir,
                            material,
                            diffuse_color,
                            sample,
                            *intensity,
                        );
                    }
                    color += sum / AREA_LIGHT_SAMPLES as f32;
                }
            }
        }

        color
    }

    /// Shadowed Blinn-Phong term for one light position.
    #[allow(clippy::too_many_arguments)]
    fn light_contribution(
        &self,
        point: Vec3,
        normal: Vec3,
        view_dir: Vec3,
        material: &Material,
        diffuse_color: Color,
        light_pos: Vec3,
        intensity: Color,
    ) -> Color {
        let to_light = light_pos - point;
        let distance = to_light.length();
        let light_dir = to_light / distance;

        // Shadow ray, origin stepped off the surface along the light
        // direction; anything closer than the light occludes it fully.
        let shadow_ray = Ray::new(point + light_dir * RAY_EPSILON, light_dir);
        if self.intersect(&shadow_ray, distance).is_some() {
            return Color::ZERO;
        }

        let diffuse_intensity = normal.dot(light_dir).max(0.0);
        let diffuse = material.kd * diffuse_intensity * diffuse_color * intensity;

        let halfway = (light_dir + view_dir).normalize();
        let spec_intensity = normal.dot(halfway).max(0.0).powf(material.specular_exponent);
        let specular = material.ks * spec_intensity * material.specular_color * intensity;

        diffuse + specular
    }
}

/// Snell refraction of `d` through a surface with outward normal
/// `outward` and refractive index `ior`. The sign of `-outward . d`
/// decides entering vs. exiting; None means total internal reflection.
fn refract_direction(d: Vec3, outward: Vec3, ior: f32) -> Option<Vec3> {
    let mut normal = outward;
    let mut eta = 1.0 / ior;
    let mut cos_i = -d.dot(outward);

    if cos_i < 0.0 {
        // Exiting the medium: flip the normal, invert the index ratio
        cos_i = -cos_i;
        normal = -normal;
        eta = ior;
    }

    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        return None;
    }

    Some((eta * d + (eta * cos_i - k.sqrt()) * normal).normalize())
}
