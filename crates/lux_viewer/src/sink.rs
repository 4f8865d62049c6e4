//! PNG output for rendered frames.

use std::path::{Path, PathBuf};

use lux_renderer::{color_to_rgba, Color, FrameSink};

/// Writes every presented frame to one PNG file, replacing the previous one.
pub struct PngSink {
    path: PathBuf,
    frames: usize,
}

impl PngSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            frames: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of frames written so far.
    pub fn frames(&self) -> usize {
        self.frames
    }
}

/// Convert bottom-up framebuffer rows to top-down 8-bit RGBA.
pub fn to_top_down_rgba(pixels: &[Color], width: u32) -> Vec<[u8; 4]> {
    pixels
        .chunks(width.max(1) as usize)
        .rev()
        .flat_map(|row| row.iter().map(|c| color_to_rgba(*c)))
        .collect()
}

impl FrameSink for PngSink {
    type Error = image::ImageError;

    fn present(&mut self, pixels: &[Color], width: u32, height: u32) -> Result<(), Self::Error> {
        let rgba = to_top_down_rgba(pixels, width);
        image::save_buffer(
            &self.path,
            bytemuck::cast_slice(&rgba),
            width,
            height,
            image::ColorType::Rgba8,
        )?;
        self.frames += 1;
        log::debug!("Wrote frame {} to {}", self.frames, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_are_flipped() {
        // Bottom row red, top row blue
        let pixels = [
            Color::new(1.0, 0.0, 0.0),
            Color::new(1.0, 0.0, 0.0),
            Color::new(0.0, 0.0, 1.0),
            Color::new(0.0, 0.0, 2.0),
        ];
        let rgba = to_top_down_rgba(&pixels, 2);
        assert_eq!(rgba[0], [0, 0, 255, 255]);
        assert_eq!(rgba[1], [0, 0, 255, 255]);
        assert_eq!(rgba[2], [255, 0, 0, 255]);
    }

    #[test]
    fn test_sink_writes_png() {
        let path = std::env::temp_dir().join(format!("lux_sink_{}.png", std::process::id()));
        let mut sink = PngSink::new(&path);
        let pixels = vec![Color::splat(0.5); 16];

        sink.present(&pixels, 4, 4).expect("write png");
        assert_eq!(sink.frames(), 1);

        let img = image::open(&path).expect("read back").to_rgba8();
        assert_eq!(img.dimensions(), (4, 4));
        assert_eq!(img.get_pixel(0, 0).0, [127, 127, 127, 255]);
        let _ = std::fs::remove_file(&path);
    }
}
