//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that can be rendered
//! independently and in parallel using rayon.

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
}

impl Bucket {
    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Generate the grid of buckets covering an image exactly.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let mut buckets = Vec::new();

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            buckets.push(Bucket {
                x,
                y,
                width: bucket_size.min(width - x),
                height: bucket_size.min(height - y),
            });
            x += bucket_size;
        }
        y += bucket_size;
    }

    buckets
}
