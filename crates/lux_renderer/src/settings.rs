//! Render configuration.
//!
//! Every tunable of both pipelines lives here. Settings deserialize from
//! JSON with missing fields taking their defaults, and must pass
//! [`RenderSettings::validate`] before a renderer will start.

use std::path::Path;

use lux_core::Color;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest accepted image side length.
pub const MAX_IMAGE_SIZE: u32 = 1 << 15;

/// Errors that can occur while loading or validating settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid setting `{name}`: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Render configuration shared by the photon-map and path-tracing pipelines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Emission rounds; each round emits one photon path per point light
    pub nr_photons: u32,
    /// Maximum surface hits recorded per photon path
    pub nr_bounces: u32,
    /// Side length of the square image (power of two)
    pub image_size: u32,
    /// Recursion ceiling of the path integrator
    pub max_depth: u32,
    /// Number of path-tracing passes
    pub max_passes: u32,
    /// Camera rays per pixel per pass
    pub rays_per_pixel: u32,
    /// Squared photon gather radius
    pub sq_radius: f32,
    /// Brightness divisor of the density estimate
    pub exposure: f32,
    /// Length limit for emission and photon-map primary rays
    pub max_ray_length: f32,
    /// RNG seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
    /// Grey level deposited by shadow photons
    pub shadow_energy: f32,
    /// Offset past a hit before the shadow ray starts
    pub shadow_bias: f32,
    /// Minimum pixels evaluated per photon-map step
    pub pixels_per_step: u32,
    /// Photon-map color for rays that leave the scene
    pub background: [f32; 3],
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            nr_photons: 2000,
            nr_bounces: 3,
            image_size: 512,
            max_depth: 8,
            max_passes: 64,
            rays_per_pixel: 32,
            sq_radius: 0.7,
            exposure: 10.0,
            max_ray_length: 5.9,
            seed: Some(0),
            shadow_energy: -0.25,
            shadow_bias: 1e-5,
            pixels_per_step: 512,
            background: [1.0, 1.0, 1.0],
        }
    }
}

impl RenderSettings {
    /// Parse settings from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Check that the settings describe a runnable render.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.image_size < 2
            || !self.image_size.is_power_of_two()
            || self.image_size > MAX_IMAGE_SIZE
        {
            return Err(invalid(
                "image_size",
                format!(
                    "must be a power of two in 2..={}, got {}",
                    MAX_IMAGE_SIZE, self.image_size
                ),
            ));
        }

        let counts = [
            ("nr_photons", self.nr_photons),
            ("nr_bounces", self.nr_bounces),
            ("max_depth", self.max_depth),
            ("max_passes", self.max_passes),
            ("rays_per_pixel", self.rays_per_pixel),
            ("pixels_per_step", self.pixels_per_step),
        ];
        for (name, value) in counts {
            if value == 0 {
                return Err(invalid(name, "must be at least 1".to_string()));
            }
        }

        if !(self.exposure.is_finite() && self.exposure > 0.0) {
            return Err(invalid("exposure", format!("must be positive, got {}", self.exposure)));
        }
        if !(self.sq_radius.is_finite() && self.sq_radius > 0.0) {
            return Err(invalid("sq_radius", format!("must be positive, got {}", self.sq_radius)));
        }
        if self.max_ray_length.is_nan() || self.max_ray_length <= 0.0 {
            return Err(invalid(
                "max_ray_length",
                format!("must be positive, got {}", self.max_ray_length),
            ));
        }
        if !(self.shadow_bias.is_finite() && self.shadow_bias >= 0.0) {
            return Err(invalid("shadow_bias", format!("must be >= 0, got {}", self.shadow_bias)));
        }
        if !self.shadow_energy.is_finite() {
            return Err(invalid("shadow_energy", "must be finite".to_string()));
        }
        if self.background.iter().any(|c| !c.is_finite()) {
            return Err(invalid("background", "must be finite".to_string()));
        }

        if self.sq_radius > 1.0 {
            log::warn!(
                "sq_radius {} exceeds 1: photons farther than unit distance get negative weight",
                self.sq_radius
            );
        }

        Ok(())
    }

    /// Photon-map miss color.
    pub fn background_color(&self) -> Color {
        Color::from_array(self.background)
    }

    /// Energy carried by shadow photons.
    pub fn shadow_color(&self) -> Color {
        Color::splat(self.shadow_energy)
    }

    /// Build the random source these settings ask for.
    pub fn make_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => {
                log::info!("No seed configured, sampling from OS entropy");
                StdRng::from_entropy()
            }
        }
    }
}

fn invalid(name: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { name, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    #[test]
    fn test_defaults_are_valid() {
        let settings = RenderSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.nr_photons, 2000);
        assert_eq!(settings.image_size, 512);
        assert_eq!(settings.rays_per_pixel, 32);
        assert_eq!(settings.background_color(), Color::ONE);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings =
            RenderSettings::from_json_str(r#"{ "image_size": 64, "seed": 7 }"#).expect("valid json");
        assert_eq!(settings.image_size, 64);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.max_depth, 8);
        assert_eq!(settings.exposure, 10.0);
    }

    #[test]
    fn test_null_seed_means_entropy() {
        let settings = RenderSettings::from_json_str(r#"{ "seed": null }"#).expect("valid json");
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_rejects_non_power_of_two_image() {
        let settings = RenderSettings {
            image_size: 500,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::Invalid { name: "image_size", .. })
        ));
    }

    #[test]
    fn test_rejects_oversized_image() {
        let largest = RenderSettings {
            image_size: MAX_IMAGE_SIZE,
            ..Default::default()
        };
        assert!(largest.validate().is_ok());

        let oversized = RenderSettings {
            image_size: MAX_IMAGE_SIZE * 2,
            ..Default::default()
        };
        assert!(matches!(
            oversized.validate(),
            Err(ConfigError::Invalid { name: "image_size", .. })
        ));
    }

    #[test]
    fn test_rejects_zero_counts_and_bad_floats() {
        let zero_rays = RenderSettings {
            rays_per_pixel: 0,
            ..Default::default()
        };
        assert!(zero_rays.validate().is_err());

        let bad_exposure = RenderSettings {
            exposure: 0.0,
            ..Default::default()
        };
        assert!(bad_exposure.validate().is_err());

        let nan_radius = RenderSettings {
            sq_radius: f32::NAN,
            ..Default::default()
        };
        assert!(nan_radius.validate().is_err());
    }

    #[test]
    fn test_large_radius_warns_but_validates() {
        let _ = env_logger::builder().is_test(true).try_init();
        let settings = RenderSettings {
            sq_radius: 1.5,
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_json_round_trip_from_file() {
        let path = std::env::temp_dir().join(format!("lux_settings_{}.json", std::process::id()));
        let settings = RenderSettings {
            image_size: 32,
            seed: None,
            ..Default::default()
        };
        std::fs::write(&path, serde_json::to_string_pretty(&settings).expect("serialize")).expect("write");

        let loaded = RenderSettings::from_json_file(&path).expect("load");
        assert_eq!(loaded, settings);
        let _ = std::fs::remove_file(&path);

        assert!(matches!(RenderSettings::from_json_file(&path), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            RenderSettings::from_json_str("{ image_size: }"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let settings = RenderSettings {
            seed: Some(42),
            ..Default::default()
        };
        let a = settings.make_rng().next_u64();
        let b = settings.make_rng().next_u64();
        assert_eq!(a, b);
    }
}
