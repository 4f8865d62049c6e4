//! Recursive stochastic path tracing.

use std::collections::HashMap;

use lux_core::{Color, Hit, SurfaceId, SurfaceKind};
use lux_math::{Ray, Vec3};
use rand::RngCore;

use crate::context::SceneContext;
use crate::sampling::{cosine_hemisphere, gen_f32, reflect};
use crate::settings::RenderSettings;

/// Depth at which camera rays enter [`PathIntegrator::trace`].
pub const PRIMARY_DEPTH: u32 = 1;

/// Deepest level at which refraction always follows the transmitted ray.
/// Below it, reflection and transmission are chosen by Russian roulette.
const DETERMINISTIC_REFRACTION_DEPTH: u32 = 2;

const AIR_IOR: f32 = 1.0;
const GLASS_IOR: f32 = 1.5;

/// Base color per surface, fixed by the first hit on that surface.
///
/// Textured surfaces therefore render with the color sampled at whichever
/// point was hit first.
#[derive(Debug, Clone, Default)]
pub struct HitColorCache {
    colors: HashMap<SurfaceId, Color>,
}

impl HitColorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached color for the hit surface, recording the hit's color if the
    /// surface has not been seen yet.
    pub fn color_for(&mut self, hit: &Hit) -> Color {
        *self.colors.entry(hit.surface).or_insert(hit.base_color)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Estimates the radiance arriving along a ray.
pub struct PathIntegrator<'a> {
    ctx: &'a SceneContext<'a>,
    max_depth: u32,
    cache: HitColorCache,
}

impl<'a> PathIntegrator<'a> {
    pub fn new(ctx: &'a SceneContext<'a>, settings: &RenderSettings) -> Self {
        Self {
            ctx,
            max_depth: settings.max_depth,
            cache: HitColorCache::new(),
        }
    }

    /// Radiance along `ray` at recursion level `depth`.
    ///
    /// Lights emit white; everything else multiplies what arrives along one
    /// scattered ray by its base color. Paths that reach `max_depth` or leave
    /// the scene contribute black.
    pub fn trace(&mut self, ray: &Ray, depth: u32, rng: &mut dyn RngCore) -> Color {
        if depth >= self.max_depth {
            return Color::ZERO;
        }

        let Some(hit) = self.ctx.raycast(ray.origin, ray.direction, f32::INFINITY) else {
            return Color::ZERO;
        };

        if hit.kind == SurfaceKind::Light {
            return Color::ONE;
        }

        let base_color = self.cache.color_for(&hit);
        let direction = ray.direction.normalize_or_zero();

        let (scattered, weight) = match hit.kind {
            SurfaceKind::Reflective => (reflect(direction, hit.normal), 1.0),
            SurfaceKind::Refractive => refract(direction, hit.normal, depth, rng),
            SurfaceKind::Diffuse | SurfaceKind::Light => {
                (cosine_hemisphere(direction, hit.normal, rng), 1.0)
            }
        };

        let incoming = self.trace(&Ray::new(hit.point, scattered), depth + 1, rng);
        base_color * incoming * weight
    }

    /// Surface colors seen so far.
    pub fn cache(&self) -> &HitColorCache {
        &self.cache
    }
}

/// Glass scattering: choose between the mirror and the transmitted ray and
/// return the direction with the radiance weight for that choice.
fn refract(direction: Vec3, normal: Vec3, depth: u32, rng: &mut dyn RngCore) -> (Vec3, f32) {
    let reflected = reflect(direction, normal);

    // Normal facing the incoming ray
    let forward = if normal.dot(direction) < 0.0 {
        normal
    } else {
        -normal
    };
    let entering = normal.dot(forward) > 0.0;
    let ratio = if entering {
        AIR_IOR / GLASS_IOR
    } else {
        GLASS_IOR / AIR_IOR
    };

    let cos_incident = direction.dot(forward);
    let cos2t = 1.0 - ratio * ratio * (1.0 - cos_incident * cos_incident);
    if cos2t <= 0.0 {
        // Total internal reflection
        return (reflected, 1.0);
    }

    let transmitted = (direction * ratio - forward * (cos_incident * ratio + cos2t.sqrt())).normalize();

    // Schlick's approximation
    let r0 = ((GLASS_IOR - AIR_IOR) / (GLASS_IOR + AIR_IOR)).powi(2);
    let c = if entering {
        1.0 + cos_incident
    } else {
        1.0 - transmitted.dot(normal)
    };
    let re = r0 + (1.0 - r0) * c.powi(5);
    let tr = 1.0 - re;

    if depth <= DETERMINISTIC_REFRACTION_DEPTH {
        return (transmitted, tr);
    }

    let p = 0.25 + 0.5 * re;
    if gen_f32(rng) < p {
        (reflected, re / p)
    } else {
        (transmitted, tr / (1.0 - p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lux_core::{Material, Scene, Shape};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn light(name: &str) -> Material {
        Material::new(name, SurfaceKind::Light, Color::ONE)
    }

    #[test]
    fn test_max_depth_and_miss_are_black() {
        let mut scene = Scene::new("light");
        scene.add_surface(Shape::plane(Vec3::new(0.0, 0.0, 2.0), -Vec3::Z), light("sky"));
        let ctx = SceneContext::new(&scene);
        let settings = RenderSettings::default();
        let mut integrator = PathIntegrator::new(&ctx, &settings);
        let mut rng = StdRng::seed_from_u64(0);

        let toward = Ray::new(Vec3::ZERO, Vec3::Z);
        assert_eq!(integrator.trace(&toward, settings.max_depth, &mut rng), Color::ZERO);
        assert_eq!(integrator.trace(&toward, settings.max_depth + 3, &mut rng), Color::ZERO);

        let away = Ray::new(Vec3::ZERO, -Vec3::Z);
        assert_eq!(integrator.trace(&away, PRIMARY_DEPTH, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_light_is_exactly_white() {
        let mut scene = Scene::new("light");
        scene.add_surface(Shape::sphere(Vec3::new(0.0, 0.0, 3.0), 1.0), light("bulb"));
        let ctx = SceneContext::new(&scene);
        let settings = RenderSettings::default();
        let mut integrator = PathIntegrator::new(&ctx, &settings);
        let mut rng = StdRng::seed_from_u64(0);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.1, 1.0));
        for depth in PRIMARY_DEPTH..settings.max_depth {
            assert_eq!(integrator.trace(&ray, depth, &mut rng), Color::ONE);
        }
        assert!(integrator.cache().is_empty());
    }

    /// Plane at y = 0 hit from below at a grazing angle, with a light below.
    fn grazing_scene(kind: SurfaceKind) -> Scene {
        let mut scene = Scene::new("grazing");
        scene.add_surface(
            Shape::plane(Vec3::ZERO, Vec3::Y),
            Material::new("surface", kind, Color::new(0.5, 0.8, 1.0)),
        );
        scene.add_surface(Shape::plane(Vec3::new(0.0, -2.0, 0.0), Vec3::Y), light("floor"));
        scene
    }

    #[test]
    fn test_total_internal_reflection_matches_mirror() {
        let ray = Ray::new(Vec3::new(0.0, -1.0, 0.0), Vec3::new(1.0, 0.3, 0.0).normalize());
        let settings = RenderSettings::default();

        let glass = grazing_scene(SurfaceKind::Refractive);
        let ctx = SceneContext::new(&glass);
        let through_glass = PathIntegrator::new(&ctx, &settings).trace(&ray, PRIMARY_DEPTH, &mut StdRng::seed_from_u64(1));

        let mirror = grazing_scene(SurfaceKind::Reflective);
        let ctx = SceneContext::new(&mirror);
        let off_mirror = PathIntegrator::new(&ctx, &settings).trace(&ray, PRIMARY_DEPTH, &mut StdRng::seed_from_u64(1));

        assert_eq!(through_glass, off_mirror);
        assert_eq!(through_glass, Color::new(0.5, 0.8, 1.0));
    }

    #[test]
    fn test_normal_incidence_transmits_fresnel_weight() {
        let base = Color::new(0.9, 0.9, 0.6);
        let mut scene = Scene::new("pane");
        scene.add_surface(
            Shape::plane(Vec3::new(0.0, 0.0, 1.0), -Vec3::Z),
            Material::new("pane", SurfaceKind::Refractive, base),
        );
        scene.add_surface(Shape::plane(Vec3::new(0.0, 0.0, 3.0), -Vec3::Z), light("back"));
        let ctx = SceneContext::new(&scene);
        let settings = RenderSettings::default();
        let mut integrator = PathIntegrator::new(&ctx, &settings);
        let mut rng = StdRng::seed_from_u64(0);

        // R0 = 0.04 at normal incidence
        let color = integrator.trace(&Ray::new(Vec3::ZERO, Vec3::Z), PRIMARY_DEPTH, &mut rng);
        assert!((color - base * 0.96).length() < 1e-5, "color = {:?}", color);
    }

    #[test]
    fn test_russian_roulette_is_unbiased() {
        // Glass pane inside a light: both branches end on the light
        let mut scene = Scene::new("enclosed");
        scene.add_surface(Shape::sphere(Vec3::ZERO, 10.0), light("dome"));
        scene.add_surface(
            Shape::plane(Vec3::new(0.0, 0.0, 1.0), -Vec3::Z),
            Material::new("pane", SurfaceKind::Refractive, Color::ONE),
        );
        let ctx = SceneContext::new(&scene);
        let settings = RenderSettings::default();
        let mut integrator = PathIntegrator::new(&ctx, &settings);
        let mut rng = StdRng::seed_from_u64(4);

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let n = 4000;
        let mut sum = Color::ZERO;
        for _ in 0..n {
            sum += integrator.trace(&ray, DETERMINISTIC_REFRACTION_DEPTH + 1, &mut rng);
        }
        let mean = sum / n as f32;
        assert!((mean.x - 1.0).abs() < 0.05, "mean = {:?}", mean);
    }

    #[test]
    fn test_diffuse_under_light_returns_base_color() {
        let base = Color::new(0.5, 0.25, 0.75);
        let mut scene = Scene::new("dome");
        scene.add_surface(Shape::sphere(Vec3::ZERO, 10.0), light("dome"));
        scene.add_surface(
            Shape::plane(Vec3::new(0.0, -1.0, 0.0), Vec3::Y),
            Material::new("floor", SurfaceKind::Diffuse, base),
        );
        let ctx = SceneContext::new(&scene);
        let settings = RenderSettings::default();
        let mut integrator = PathIntegrator::new(&ctx, &settings);
        let mut rng = StdRng::seed_from_u64(2);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.2, -1.0, 0.1));
        for _ in 0..100 {
            let color = integrator.trace(&ray, PRIMARY_DEPTH, &mut rng);
            assert!((color - base).length() < 1e-6);
        }
        assert_eq!(integrator.cache().len(), 1);
    }

    #[test]
    fn test_cache_keeps_first_color() {
        let mut cache = HitColorCache::new();
        let mut hit = Hit {
            point: Vec3::ZERO,
            normal: Vec3::Y,
            distance: 1.0,
            surface: SurfaceId(3),
            kind: SurfaceKind::Diffuse,
            base_color: Color::new(1.0, 0.0, 0.0),
            uv: Default::default(),
        };
        assert_eq!(cache.color_for(&hit), Color::new(1.0, 0.0, 0.0));

        hit.base_color = Color::new(0.0, 1.0, 0.0);
        assert_eq!(cache.color_for(&hit), Color::new(1.0, 0.0, 0.0));

        hit.surface = SurfaceId(4);
        assert_eq!(cache.color_for(&hit), Color::new(0.0, 1.0, 0.0));
        assert_eq!(cache.len(), 2);
    }
}
