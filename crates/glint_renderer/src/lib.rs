//! CPU Whitted ray tracer for glint.
//!
//! Builds a BVH over the scene's shape table, answers nearest-intersection
//! queries through one dispatcher (BVH or linear scan), and shades hits
//! with depth-bounded recursive Blinn-Phong illumination.

mod bucket;
mod bvh;
mod camera;
mod renderer;
mod shading;
#[cfg(test)]
mod test_util;
mod tone_mapping;
mod tracer;

pub use bucket::{generate_buckets, Bucket, DEFAULT_BUCKET_SIZE};
pub use bvh::Bvh;
pub use camera::Camera;
pub use renderer::{render, render_pixel, ImageBuffer, RenderConfig};
pub use tone_mapping::{color_to_rgb, linear_to_gamma, tone_map};
pub use tracer::{Hit, Tracer, RAY_EPSILON};

use rand::RngCore;

/// Uniform f32 in [0, 1) from a type-erased RNG.
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    // 24 random bits, the full precision of an f32 mantissa
    (rng.next_u32() >> 8) as f32 / (1 << 24) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_gen_f32_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let x = gen_f32(&mut rng);
            assert!((0.0..1.0).contains(&x));
        }
    }
}
