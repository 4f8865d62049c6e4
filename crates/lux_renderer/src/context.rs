//! Scene context shared by the emitter, the scheduler and the integrator.

use lux_core::{Hit, PointLight, SceneQuery};
use lux_math::Vec3;

/// Everything the transport code knows about the scene.
///
/// Built once per run: the light list is collected up front and the camera
/// position is fixed, so no component has to look either up lazily.
pub struct SceneContext<'a> {
    scene: &'a dyn SceneQuery,
    lights: Vec<PointLight>,
    camera: Vec3,
}

impl<'a> SceneContext<'a> {
    /// Create a context with the camera at the origin.
    pub fn new(scene: &'a dyn SceneQuery) -> Self {
        let lights = scene.point_lights();
        log::debug!("Scene context: {} point lights", lights.len());
        Self {
            scene,
            lights,
            camera: Vec3::ZERO,
        }
    }

    /// Set the camera position.
    pub fn with_camera(mut self, position: Vec3) -> Self {
        self.camera = position;
        self
    }

    /// Closest hit along a ray within `max_distance`.
    #[inline]
    pub fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<Hit> {
        self.scene.raycast(origin, direction, max_distance)
    }

    /// Point lights collected when the context was built.
    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    /// Camera position.
    pub fn camera(&self) -> Vec3 {
        self.camera
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lux_core::{Material, Scene, Shape, SurfaceKind};

    #[test]
    fn test_lights_collected_once() {
        let mut scene = Scene::new("lit");
        scene.add_point_light(Vec3::new(0.0, 1.0, 0.0));
        scene.add_point_light(Vec3::new(1.0, 1.0, 0.0));

        let ctx = SceneContext::new(&scene).with_camera(Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(ctx.lights().len(), 2);
        assert_eq!(ctx.camera(), Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_raycast_forwards_to_scene() {
        let mut scene = Scene::new("floor");
        scene.add_surface(
            Shape::plane(Vec3::ZERO, Vec3::Y),
            Material::new("floor", SurfaceKind::Diffuse, Vec3::ONE),
        );

        let ctx = SceneContext::new(&scene);
        assert!(ctx.raycast(Vec3::Y, -Vec3::Y, 2.0).is_some());
        assert!(ctx.raycast(Vec3::Y, Vec3::Y, 2.0).is_none());
    }
}
