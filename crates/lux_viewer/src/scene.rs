//! Demo scene: a closed room seen from the origin, looking down +Z.
//!
//! The photon pipeline lights it from a point light under the ceiling; the
//! path tracer sees the emissive ceiling panel instead.

use std::sync::Arc;

use lux_core::{Color, Material, Scene, Shape, Texture};
use lux_math::Vec3;

/// Build the demo room, optionally texturing the floor.
pub fn demo_room(floor_texture: Option<Arc<Texture>>) -> Scene {
    let mut scene = Scene::new("demo room");

    let mut floor = Material::tagged("floor", "diffuse", Color::new(0.9, 0.9, 0.9));
    if let Some(texture) = floor_texture {
        floor = floor.with_texture(texture);
    }
    scene.add_surface(Shape::plane(Vec3::new(0.0, -1.0, 0.0), Vec3::Y), floor);

    let white = Arc::new(Material::tagged("white", "diffuse", Color::new(0.9, 0.9, 0.9)));
    let white_walls = [
        (Vec3::new(0.0, 1.0, 0.0), -Vec3::Y),
        (Vec3::new(0.0, 0.0, 3.0), -Vec3::Z),
        (Vec3::new(0.0, 0.0, -1.0), Vec3::Z),
    ];
    for (point, normal) in white_walls {
        scene.add_shared_surface(Shape::plane(point, normal), white.clone());
    }
    scene.add_surface(
        Shape::plane(Vec3::new(-1.0, 0.0, 0.0), Vec3::X),
        Material::tagged("left", "diffuse", Color::new(0.85, 0.2, 0.2)),
    );
    scene.add_surface(
        Shape::plane(Vec3::new(1.0, 0.0, 0.0), -Vec3::X),
        Material::tagged("right", "diffuse", Color::new(0.2, 0.85, 0.2)),
    );

    // Emissive panel just below the ceiling, facing down
    scene.add_surface(
        Shape::quad(Vec3::new(-0.3, 0.99, 1.2), Vec3::new(0.6, 0.0, 0.0), Vec3::new(0.0, 0.0, 0.6)),
        Material::tagged("panel", "light", Color::ONE),
    );

    scene.add_surface(
        Shape::sphere(Vec3::new(-0.45, -0.6, 2.2), 0.4),
        Material::tagged("mirror", "reflective", Color::new(0.95, 0.95, 0.95)),
    );
    scene.add_surface(
        Shape::sphere(Vec3::new(0.45, -0.6, 1.6), 0.4),
        Material::tagged("glass", "refractive", Color::new(0.98, 0.98, 1.0)),
    );

    scene.add_point_light(Vec3::new(0.0, 0.8, 1.5));

    log::debug!(
        "Built '{}': {} surfaces, {} point lights",
        scene.name,
        scene.surface_count(),
        scene.lights.len()
    );
    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use lux_core::{SceneQuery, SurfaceKind};

    #[test]
    fn test_room_is_closed() {
        let scene = demo_room(None);
        let dirs = [Vec3::X, -Vec3::X, Vec3::Y, -Vec3::Y, Vec3::Z, -Vec3::Z, Vec3::new(0.3, 0.7, 0.2)];
        for d in dirs {
            assert!(scene.raycast(Vec3::ZERO, d, f32::INFINITY).is_some(), "escaped along {:?}", d);
        }
    }

    #[test]
    fn test_tags_resolve_to_kinds() {
        let scene = demo_room(None);
        let kinds: Vec<_> = scene.surfaces.iter().map(|s| s.material.kind).collect();
        assert!(kinds.contains(&SurfaceKind::Light));
        assert!(kinds.contains(&SurfaceKind::Reflective));
        assert!(kinds.contains(&SurfaceKind::Refractive));
        assert_eq!(scene.point_lights().len(), 1);
    }

    #[test]
    fn test_floor_texture_is_sampled() {
        let texture = Arc::new(Texture::solid_color(Color::new(0.1, 0.2, 0.3)));
        let scene = demo_room(Some(texture));
        let hit = scene
            .raycast(Vec3::ZERO, Vec3::new(0.0, -1.0, 0.3), f32::INFINITY)
            .expect("floor");
        assert_eq!(hit.base_color, Color::new(0.1, 0.2, 0.3));
    }
}
