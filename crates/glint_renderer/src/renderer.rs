//! Parallel frame rendering.
//!
//! Buckets are rendered concurrently with rayon; every pixel owns a
//! deterministically seeded RNG, so no generator is shared between
//! workers and a frame is reproducible for a given seed. Pixels land at
//! their raster position no matter which bucket finishes first.

use glint_core::{Color, RenderMode, Scene};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

use crate::bucket::{generate_buckets, Bucket, DEFAULT_BUCKET_SIZE};
use crate::camera::Camera;
use crate::tracer::Tracer;

/// Render configuration not carried by the scene itself.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Jittered samples per pixel when the scene enables antialiasing
    pub samples_per_pixel: u32,
    /// Base seed for the per-pixel RNGs
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 8,
            seed: 0,
        }
    }
}

/// Frame of linear, unclamped colors in raster order.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Pixels in raster order (row-major, top-down).
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }
}

/// Render the scene into a linear frame.
pub fn render(scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    let tracer = Tracer::new(scene);
    let camera = Camera::new(&scene.camera);
    let (width, height) = (camera.width(), camera.height());

    let buckets = generate_buckets(width, height, DEFAULT_BUCKET_SIZE);
    log::info!(
        "rendering {}x{} in {} buckets ({:?} mode)",
        width,
        height,
        buckets.len(),
        scene.render_mode
    );

    let results: Vec<(Bucket, Vec<Color>)> = buckets
        .par_iter()
        .map(|bucket| (*bucket, render_bucket(bucket, &camera, &tracer, config)))
        .collect();

    let mut image = ImageBuffer::new(width, height);
    for (bucket, pixels) in results {
        let mut index = 0;
        for dy in 0..bucket.height {
            for dx in 0..bucket.width {
                image.set(bucket.x + dx, bucket.y + dy, pixels[index]);
                index += 1;
            }
        }
    }

    image
}

/// Render one bucket to a vector of colors in row-major order.
fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    tracer: &Tracer,
    config: &RenderConfig,
) -> Vec<Color> {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let color = render_pixel(tracer, camera, bucket.x + local_x, bucket.y + local_y, config);
            pixels.push(color);
        }
    }

    pixels
}

/// Shade one pixel with its own deterministically seeded RNG.
pub fn render_pixel(
    tracer: &Tracer,
    camera: &Camera,
    x: u32,
    y: u32,
    config: &RenderConfig,
) -> Color {
    let mut rng = SmallRng::seed_from_u64(pixel_seed(config.seed, x, y));
    let scene = tracer.scene();

    if scene.antialiasing {
        let mut sum = Color::ZERO;
        for _ in 0..config.samples_per_pixel {
            let ray = camera.sample_ray(x, y, &mut rng);
            sum += shade_mode(tracer, &ray, &mut rng);
        }
        sum / config.samples_per_pixel as f32
    } else {
        let ray = camera.pixel_ray(x, y);
        shade_mode(tracer, &ray, &mut rng)
    }
}

/// Dispatch on the scene's render mode.
fn shade_mode(tracer: &Tracer, ray: &glint_math::Ray, rng: &mut dyn RngCore) -> Color {
    let scene = tracer.scene();
    match scene.render_mode {
        RenderMode::Binary => {
            if tracer.intersect(ray, f32::INFINITY).is_some() {
                Color::new(1.0, 0.0, 0.0)
            } else {
                scene.background
            }
        }
        RenderMode::Phong => tracer.shade(ray, scene.nbounces, rng),
    }
}

/// splitmix64 over the packed pixel coordinates.
fn pixel_seed(seed: u64, x: u32, y: u32) -> u64 {
    let mut z = seed ^ (((x as u64) << 32) | y as u64);
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::test_scene;
    use glint_core::{Light, Material, Primitive, Sphere};
    use glint_math::Vec3;

    fn sphere_scene() -> Scene {
        let material = Material {
            kd: 0.9,
            diffuse_color: Color::new(0.8, 0.2, 0.2),
            ..Default::default()
        };
        let mut scene = test_scene(
            vec![Primitive::Sphere(Sphere::new(
                Vec3::new(0.0, 0.0, -5.0),
                1.0,
                material,
            ))],
            vec![Light::Point {
                position: Vec3::new(0.0, 5.0, 0.0),
                intensity: Color::ONE,
            }],
        );
        scene.camera.width = 16;
        scene.camera.height = 16;
        scene
    }

    #[test]
    fn test_render_is_deterministic() {
        let scene = sphere_scene();
        let config = RenderConfig {
            samples_per_pixel: 4,
            seed: 42,
        };

        let a = render(&scene, &config);
        let b = render(&scene, &config);
        assert_eq!(a.pixels(), b.pixels());
    }

    #[test]
    fn test_center_pixel_hits_sphere() {
        let scene = sphere_scene();
        let image = render(&scene, &RenderConfig::default());

        // Center of the frame looks straight at the lit sphere
        let center = image.get(8, 8);
        assert!(center.x > 0.0);

        // A corner ray misses and returns the black background
        let corner = image.get(0, 0);
        assert_eq!(corner, Color::ZERO);
    }

    #[test]
    fn test_binary_mode_marks_hits() {
        let mut scene = sphere_scene();
        scene.render_mode = RenderMode::Binary;
        let image = render(&scene, &RenderConfig::default());

        assert_eq!(image.get(8, 8), Color::new(1.0, 0.0, 0.0));
        assert_eq!(image.get(0, 0), scene.background);
    }

    #[test]
    fn test_antialiasing_is_deterministic() {
        let mut scene = sphere_scene();
        scene.antialiasing = true;
        let config = RenderConfig {
            samples_per_pixel: 8,
            seed: 7,
        };
        let image = render(&scene, &config);

        // Still deterministic with the same seed
        let again = render(&scene, &config);
        assert_eq!(image.pixels(), again.pixels());
    }

    #[test]
    fn test_pixel_seed_varies_per_pixel() {
        let a = pixel_seed(0, 1, 2);
        let b = pixel_seed(0, 2, 1);
        let c = pixel_seed(0, 1, 3);
        assert_ne!(a, b);
        assert_ne!(a, c);

        // And per base seed
        assert_ne!(pixel_seed(1, 1, 2), a);
    }
}
