//! Primary ray generation.

use lux_math::{Ray, Vec3};

/// Pinhole camera looking down +Z through a unit-distance image plane.
///
/// Pixel columns are mirrored before ray generation (column `x` shoots
/// through image-plane column `size - x`). Together with the inverted
/// framebuffer addressing this puts the image upright and unflipped.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    position: Vec3,
    image_size: u32,
}

impl Camera {
    /// Create a camera for a square image.
    pub fn new(position: Vec3, image_size: u32) -> Self {
        Self {
            position,
            image_size,
        }
    }

    /// Direction through pixel (x, y), not normalized.
    pub fn direction(&self, x: u32, y: u32) -> Vec3 {
        let size = self.image_size as f32;
        let mirrored_x = self.image_size.saturating_sub(x) as f32;
        Vec3::new(mirrored_x / size - 0.5, -(y as f32 / size - 0.5), 1.0)
    }

    /// Generate the primary ray for pixel (x, y).
    pub fn get_ray(&self, x: u32, y: u32) -> Ray {
        Ray::new(self.position, self.direction(x, y))
    }
}
