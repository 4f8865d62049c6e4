//! The ray-query contract between a scene and the transport code.

use lux_math::{Vec2, Vec3};

use crate::material::Color;

/// Stable identity of a surface, used as a map key by photon storage and
/// the hit-color cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u32);

/// How a surface interacts with light.
///
/// The set is closed: every surface is exactly one of these, and anything
/// that cannot be classified is treated as `Diffuse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SurfaceKind {
    /// Constant white emitter, terminates paths.
    Light,
    /// Perfect mirror.
    Reflective,
    /// Glass (index of refraction 1.5 against air).
    Refractive,
    /// Lambertian scatterer.
    #[default]
    Diffuse,
}

impl SurfaceKind {
    /// Classify a surface from a free-form tag.
    ///
    /// Matching is case-insensitive. Unknown or empty tags fall back to
    /// `Diffuse`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "light" => SurfaceKind::Light,
            "reflective" => SurfaceKind::Reflective,
            "refractive" => SurfaceKind::Refractive,
            _ => SurfaceKind::Diffuse,
        }
    }
}

/// Result of a successful ray cast.
///
/// A `Hit` is a plain value: everything the transport code needs about the
/// intersection travels with it, nothing is read back from the scene later.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Point of intersection
    pub point: Vec3,
    /// Outward geometric normal (unit length, not flipped toward the ray)
    pub normal: Vec3,
    /// Distance from the ray origin along the normalized direction
    pub distance: f32,
    /// Identity of the struck surface
    pub surface: SurfaceId,
    /// Material classification of the struck surface
    pub kind: SurfaceKind,
    /// Base color at the hit (texture at `uv` if textured, else flat color)
    pub base_color: Color,
    /// Surface parameterization at the hit
    pub uv: Vec2,
}

/// A point light source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
}

impl PointLight {
    pub fn new(position: Vec3) -> Self {
        Self { position }
    }
}

/// Ray/scene intersection oracle.
///
/// Implementations must return the closest intersection within
/// `max_distance` (measured along the normalized direction). Ties between
/// equidistant surfaces may be broken arbitrarily. Transport code only
/// issues queries; it never mutates the scene.
pub trait SceneQuery {
    /// Cast a ray and return the closest hit, if any.
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<Hit>;

    /// Enumerate the point lights of the scene.
    fn point_lights(&self) -> Vec<PointLight>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_kind_from_tag() {
        assert_eq!(SurfaceKind::from_tag("Light"), SurfaceKind::Light);
        assert_eq!(SurfaceKind::from_tag("reflective"), SurfaceKind::Reflective);
        assert_eq!(SurfaceKind::from_tag(" REFRACTIVE "), SurfaceKind::Refractive);
        assert_eq!(SurfaceKind::from_tag("Diffuse"), SurfaceKind::Diffuse);
    }

    #[test]
    fn test_unknown_tag_falls_back_to_diffuse() {
        assert_eq!(SurfaceKind::from_tag("Untagged"), SurfaceKind::Diffuse);
        assert_eq!(SurfaceKind::from_tag(""), SurfaceKind::Diffuse);
        assert_eq!(SurfaceKind::default(), SurfaceKind::Diffuse);
    }
}
