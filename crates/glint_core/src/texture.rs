//! Image-backed diffuse textures.

use std::fmt;
use std::path::Path;

use glint_math::Vec3;
use image::RgbImage;

use crate::Color;

/// A diffuse texture sampled by UV coordinates.
///
/// Coordinates wrap (repeat) outside [0, 1); lookup is nearest-texel.
pub struct Texture {
    image: RgbImage,
}

impl Texture {
    /// Load a texture from an image file.
    pub fn open(path: &Path) -> Result<Self, image::ImageError> {
        let image = image::open(path)?.to_rgb8();
        log::debug!(
            "loaded texture {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(Self { image })
    }

    /// Build a texture from raw image data. Mostly useful in tests.
    pub fn from_image(image: RgbImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Sample the texture at (u, v). V runs bottom-up, matching the UV
    /// conventions of the shapes; image rows run top-down.
    pub fn sample(&self, u: f32, v: f32) -> Color {
        let u = wrap(u);
        let v = wrap(v);

        let x = (u * self.image.width() as f32) as u32;
        let y = ((1.0 - v) * self.image.height() as f32) as u32;
        let x = x.min(self.image.width() - 1);
        let y = y.min(self.image.height() - 1);

        let pixel = self.image.get_pixel(x, y);
        Vec3::new(
            pixel[0] as f32 / 255.0,
            pixel[1] as f32 / 255.0,
            pixel[2] as f32 / 255.0,
        )
    }
}

/// Wrap a coordinate into [0, 1).
fn wrap(x: f32) -> f32 {
    let x = x.fract();
    if x < 0.0 {
        x + 1.0
    } else {
        x
    }
}

impl fmt::Debug for Texture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Texture")
            .field("width", &self.image.width())
            .field("height", &self.image.height())
            .finish()
    }
}
