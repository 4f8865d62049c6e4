//! Reference scene: a flat list of analytic surfaces plus point lights.
//!
//! This is the collaborator the renderers are exercised against. It makes
//! no attempt at acceleration; scenes here are a handful of surfaces.

use std::sync::Arc;

use lux_math::{Interval, Ray, Vec3};

use crate::material::Material;
use crate::query::{Hit, PointLight, SceneQuery, SurfaceId};
use crate::shape::Shape;

/// Minimum hit distance, keeps rays leaving a surface from re-hitting it.
pub const SELF_HIT_EPSILON: f32 = 1e-4;

/// A shape with an identity and a material.
#[derive(Clone, Debug)]
pub struct Surface {
    pub id: SurfaceId,
    pub shape: Shape,
    pub material: Arc<Material>,
}

/// A complete scene of surfaces and point lights.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    /// Surfaces, indexed by their `SurfaceId`
    pub surfaces: Vec<Surface>,

    /// Point lights
    pub lights: Vec<PointLight>,

    /// Scene name
    pub name: String,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add a surface and return its identity.
    pub fn add_surface(&mut self, shape: Shape, material: Material) -> SurfaceId {
        self.add_shared_surface(shape, Arc::new(material))
    }

    /// Add a surface that shares a material with other surfaces.
    pub fn add_shared_surface(&mut self, shape: Shape, material: Arc<Material>) -> SurfaceId {
        let id = SurfaceId(self.surfaces.len() as u32);
        self.surfaces.push(Surface {
            id,
            shape,
            material,
        });
        id
    }

    /// Add a point light.
    pub fn add_point_light(&mut self, position: Vec3) {
        self.lights.push(PointLight::new(position));
    }

    /// Get surface count.
    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }
}

impl SceneQuery for Scene {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<Hit> {
        let ray = Ray::new(origin, direction).normalized();
        if ray.direction == Vec3::ZERO || max_distance <= SELF_HIT_EPSILON {
            return None;
        }

        let mut closest_so_far = max_distance;
        let mut closest = None;

        for surface in &self.surfaces {
            let interval = Interval::new(SELF_HIT_EPSILON, f32::INFINITY).with_max(closest_so_far);
            if let Some(hit) = surface.shape.intersect(&ray, interval) {
                closest_so_far = hit.t;
                closest = Some((surface, hit));
            }
        }

        closest.map(|(surface, hit)| Hit {
            point: hit.point,
            normal: hit.normal,
            distance: hit.t,
            surface: surface.id,
            kind: surface.material.kind,
            base_color: surface.material.base_color(hit.uv),
            uv: hit.uv,
        })
    }

    fn point_lights(&self) -> Vec<PointLight> {
        self.lights.clone()
    }
}
