//! Image textures for surface base colors.
//!
//! Texels are kept as linear RGB and looked up by nearest neighbour, the
//! only filtering the base-color query needs.

use std::path::Path;

use lux_math::{Vec2, Vec3};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to open texture {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Texture size {width}x{height} does not match {texels} texels")]
    BadSize { width: u32, height: u32, texels: usize },
}

pub type TextureResult<T> = Result<T, TextureError>;

/// Linear RGB texel grid, top row first.
#[derive(Clone, Debug)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    texels: Vec<Vec3>,
    /// Where the texels came from, for log messages
    pub label: String,
}

impl Texture {
    /// Wrap a texel grid; fails unless `texels` holds exactly
    /// `width * height` entries and the texture is non-empty.
    pub fn new(
        width: u32,
        height: u32,
        texels: Vec<Vec3>,
        label: impl Into<String>,
    ) -> TextureResult<Self> {
        if width == 0 || height == 0 || texels.len() != (width as usize) * (height as usize) {
            return Err(TextureError::BadSize {
                width,
                height,
                texels: texels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            texels,
            label: label.into(),
        })
    }

    /// Single-texel texture.
    pub fn solid_color(color: Vec3) -> Self {
        Self {
            width: 1,
            height: 1,
            texels: vec![color],
            label: "solid".to_string(),
        }
    }

    /// Nearest texel at `uv`. UVs wrap, and v = 0 is the bottom row.
    pub fn sample(&self, uv: Vec2) -> Vec3 {
        let col = texel_coord(uv.x.rem_euclid(1.0), self.width);
        let row = texel_coord(1.0 - uv.y.rem_euclid(1.0), self.height);
        self.texels[row * self.width as usize + col]
    }
}

/// Index of the texel covering `t` in [0, 1] on an axis of `size` texels.
fn texel_coord(t: f32, size: u32) -> usize {
    ((t * size as f32) as usize).min(size as usize - 1)
}

/// Load an image file as a linear texture.
pub fn load_texture(path: impl AsRef<Path>) -> TextureResult<Texture> {
    let path = path.as_ref();
    let rgb = image::open(path)
        .map_err(|source| TextureError::Open {
            path: path.display().to_string(),
            source,
        })?
        .into_rgb8();

    let (width, height) = rgb.dimensions();
    let texels = rgb
        .pixels()
        .map(|p| Vec3::new(decode_srgb(p[0]), decode_srgb(p[1]), decode_srgb(p[2])))
        .collect();

    let texture = Texture::new(width, height, texels, path.display().to_string())?;
    log::debug!("Loaded texture {} ({}x{})", texture.label, texture.width, texture.height);
    Ok(texture)
}

/// sRGB-encoded byte to linear intensity.
fn decode_srgb(byte: u8) -> f32 {
    let c = byte as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
