//! Photon density estimation.

use lux_core::{Color, Hit, SurfaceId};
use lux_math::Vec3;

use crate::photon::PhotonMap;
use crate::settings::RenderSettings;

/// Gated squared distance between `a` and `b`.
///
/// Axes are summed one at a time and the partial sum is tested against
/// `sq_radius` after each; most photons are rejected on the first axis.
/// Returns the squared distance if it is within `sq_radius`.
#[inline]
pub fn gated_sq_dist(a: Vec3, b: Vec3, sq_radius: f32) -> Option<f32> {
    let c = a.x - b.x;
    let mut d = c * c;
    if d > sq_radius {
        return None;
    }
    let c = a.y - b.y;
    d += c * c;
    if d > sq_radius {
        return None;
    }
    let c = a.z - b.z;
    d += c * c;
    if d > sq_radius {
        return None;
    }
    Some(d)
}

/// Estimates incident light at a surface point from nearby photons.
pub struct DensityEstimator<'a> {
    photons: &'a PhotonMap,
    sq_radius: f32,
    exposure: f32,
}

impl<'a> DensityEstimator<'a> {
    /// Create an estimator over `photons` using the gather radius and
    /// exposure from `settings`.
    pub fn new(photons: &'a PhotonMap, settings: &RenderSettings) -> Self {
        Self {
            photons,
            sq_radius: settings.sq_radius,
            exposure: settings.exposure,
        }
    }

    /// Sum the weighted energy of photons on `surface` near `point`.
    ///
    /// The result is not normalized by photon count; `sq_radius` and
    /// `exposure` are the only brightness calibration.
    pub fn gather(&self, point: Vec3, surface: SurfaceId, normal: Vec3) -> Color {
        let mut energy = Color::ZERO;

        for photon in self.photons.photons_on(surface) {
            let Some(sq_dist) = gated_sq_dist(point, photon.location, self.sq_radius) else {
                continue;
            };

            // Single photon diffuse lighting, weighted by distance
            let mut weight = (-normal.dot(photon.direction)).max(0.0);
            weight *= (1.0 - sq_dist.sqrt()) / self.exposure;

            energy += photon.energy * weight;
        }

        energy
    }

    /// Gather at a ray hit.
    pub fn gather_hit(&self, hit: &Hit) -> Color {
        self.gather(hit.point, hit.surface, hit.normal)
    }
}
