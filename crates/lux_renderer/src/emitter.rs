//! Photon emission from point lights.
//!
//! Every emission round sends one photon path from each point light in an
//! isotropic random direction. At each hit the photon is filtered by the
//! surface color, attenuated by `1 / sqrt(bounce)`, stored, and mirrored
//! onward. Each stored photon also drops a negative-energy shadow photon on
//! whatever lies behind the hit along the same line.

use std::time::Instant;

use lux_core::{Color, Hit};
use lux_math::Vec3;
use rand::RngCore;

use crate::context::SceneContext;
use crate::error::{RenderError, RenderResult};
use crate::photon::{filter_color, Photon, PhotonMap};
use crate::sampling::{random_unit_vector, reflect};
use crate::settings::RenderSettings;

/// Traces photon paths from the lights of a scene into a [`PhotonMap`].
pub struct PhotonEmitter<'a> {
    ctx: &'a SceneContext<'a>,
    settings: &'a RenderSettings,
}

impl<'a> PhotonEmitter<'a> {
    /// Create an emitter.
    pub fn new(ctx: &'a SceneContext<'a>, settings: &'a RenderSettings) -> Self {
        Self { ctx, settings }
    }

    /// Run every emission round and return the populated map.
    ///
    /// Fails with [`RenderError::NoPointLights`] if the scene has no point
    /// lights to emit from.
    pub fn emit(&self, rng: &mut dyn RngCore) -> RenderResult<PhotonMap> {
        let lights = self.ctx.lights();
        if lights.is_empty() {
            return Err(RenderError::NoPointLights);
        }

        let start = Instant::now();
        let mut map = PhotonMap::new();

        for _ in 0..self.settings.nr_photons {
            for light in lights {
                self.trace_photon(light.position, &mut map, rng);
            }
        }

        log::info!(
            "Photon emission: {} photons on {} surfaces from {} lights in {:.1?}",
            map.len(),
            map.surface_count(),
            lights.len(),
            start.elapsed()
        );

        Ok(map)
    }

    /// Trace a single photon path from `origin`.
    ///
    /// Returns the number of photons stored, shadow photons included.
    pub fn trace_photon(&self, origin: Vec3, map: &mut PhotonMap, rng: &mut dyn RngCore) -> usize {
        let max_length = self.settings.max_ray_length;

        let mut energy = Color::ONE;
        let mut direction = random_unit_vector(rng);
        let mut hit = self.ctx.raycast(origin, direction, max_length);
        let mut bounce = 1;
        let mut stored = 0;

        while let Some(current) = hit {
            if bounce > self.settings.nr_bounces {
                break;
            }

            energy = filter_color(energy, current.base_color) / (bounce as f32).sqrt();

            let photon = Photon {
                direction,
                location: current.point,
                energy,
            };
            if map.store(current.surface, photon) {
                stored += 1;
            }
            if self.shadow_photon(&current, direction, map) {
                stored += 1;
            }

            direction = reflect(direction, current.normal);
            hit = self.ctx.raycast(current.point, direction, max_length);
            bounce += 1;
        }

        stored
    }

    /// Deposit a shadow photon on the next surface behind `hit`.
    fn shadow_photon(&self, hit: &Hit, direction: Vec3, map: &mut PhotonMap) -> bool {
        let bumped = hit.point + direction * self.settings.shadow_bias;
        match self.ctx.raycast(bumped, direction, f32::INFINITY) {
            Some(behind) => map.store(
                behind.surface,
                Photon {
                    direction,
                    location: behind.point,
                    energy: self.settings.shadow_color(),
                },
            ),
            None => false,
        }
    }
}
