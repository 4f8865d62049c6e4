//! Surface materials for the reference scene.

use std::sync::Arc;

use lux_math::{Vec2, Vec3};

use crate::query::SurfaceKind;
use crate::texture::Texture;

/// Color type alias (RGB, conceptually unbounded)
pub type Color = Vec3;

/// A surface material: a light-interaction class plus a base color.
#[derive(Clone, Debug)]
pub struct Material {
    /// Material name
    pub name: String,

    /// How the surface treats light
    pub kind: SurfaceKind,

    /// Flat base color, used when there is no texture
    pub color: Color,

    /// Optional base-color texture
    pub texture: Option<Arc<Texture>>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: SurfaceKind::Diffuse,
            color: Color::ONE,
            texture: None,
        }
    }
}

impl Material {
    /// Create an untextured material.
    pub fn new(name: impl Into<String>, kind: SurfaceKind, color: Color) -> Self {
        Self {
            name: name.into(),
            kind,
            color,
            texture: None,
        }
    }

    /// Create a material whose kind comes from a free-form tag.
    pub fn tagged(name: impl Into<String>, tag: &str, color: Color) -> Self {
        Self::new(name, SurfaceKind::from_tag(tag), color)
    }

    /// Set the base-color texture.
    pub fn with_texture(mut self, texture: Arc<Texture>) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Base color at the given surface coordinates.
    pub fn base_color(&self, uv: Vec2) -> Color {
        match &self.texture {
            Some(texture) => texture.sample(uv),
            None => self.color,
        }
    }
}
