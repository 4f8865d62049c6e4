//! Random sampling and direction helpers.

use std::f32::consts::PI;

use lux_math::Vec3;
use rand::{Rng, RngCore};

/// Uniform float in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Uniformly distributed unit vector (isotropic over the sphere).
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    // Rejection sampling inside the unit ball, then project to the sphere
    loop {
        let v = Vec3::new(
            gen_f32(rng) * 2.0 - 1.0,
            gen_f32(rng) * 2.0 - 1.0,
            gen_f32(rng) * 2.0 - 1.0,
        );
        let len_sq = v.length_squared();
        if len_sq > 1e-6 && len_sq <= 1.0 {
            return v / len_sq.sqrt();
        }
    }
}

/// Cosine-weighted direction in the hemisphere around `normal`, which is
/// first flipped to face against `incoming`.
pub fn cosine_hemisphere(incoming: Vec3, normal: Vec3, rng: &mut dyn RngCore) -> Vec3 {
    let w = if normal.dot(incoming) >= 0.0 {
        -normal
    } else {
        normal
    };

    let r1 = 2.0 * PI * gen_f32(rng);
    let r2 = gen_f32(rng);
    let r2s = r2.sqrt();

    // X is the helper axis unless w is nearly parallel to it
    let helper = if w.x.abs() > 0.9 { Vec3::Z } else { Vec3::X };
    let u = helper.cross(w).normalize();
    let v = w.cross(u);

    (u * r1.cos() * r2s + v * r1.sin() * r2s + w * (1.0 - r2).sqrt()).normalize()
}
