//! Output framebuffer and presentation.

use lux_core::Color;
use lux_math::Interval;

/// Consumer of finished or in-progress frames (a window, an image file, ...).
pub trait FrameSink {
    type Error;

    /// Present a flat `width * height` color array. Rows run bottom-up:
    /// the first `width` entries are the bottom row of the image.
    fn present(&mut self, pixels: &[Color], width: u32, height: u32) -> Result<(), Self::Error>;
}

/// Image buffer for render output.
///
/// Pixels are addressed through [`FrameBuffer::index`], which stores the
/// image inverted: pixel (0, 0) lives in the last slot of the array.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    pub width: u32,
    pub height: u32,
    pixels: Vec<Color>,
}

impl FrameBuffer {
    /// Create a new buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Create a square buffer.
    pub fn square(size: u32) -> Self {
        Self::new(size, size)
    }

    /// Array slot of pixel (x, y).
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        let width = self.width as usize;
        let last = width * self.height as usize - 1;
        last - (y as usize * width + x as usize)
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    /// The flat color array, in storage order.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Hand the current image to a sink.
    pub fn present<S: FrameSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        sink.present(&self.pixels, self.width, self.height)
    }
}

/// Convert a color to 8-bit RGBA, clamping each channel to [0, 1].
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = (255.0 * Interval::UNIT.clamp(color.x)) as u8;
    let g = (255.0 * Interval::UNIT.clamp(color.y)) as u8;
    let b = (255.0 * Interval::UNIT.clamp(color.z)) as u8;
    [r, g, b, 255]
}
