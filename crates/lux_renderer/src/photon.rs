//! Photon storage.

use std::collections::HashMap;

use lux_core::{Color, SurfaceId};
use lux_math::Vec3;

/// A recorded sample of transported light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Photon {
    /// Travel direction when the photon was deposited
    pub direction: Vec3,
    /// Where it was deposited
    pub location: Vec3,
    /// Carried energy; negative for shadow photons
    pub energy: Color,
}

/// Photons grouped by the surface they were deposited on.
///
/// Append-only while photons are emitted, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct PhotonMap {
    photons: HashMap<SurfaceId, Vec<Photon>>,
    count: usize,
}

impl PhotonMap {
    /// Create an empty photon map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a photon under `surface`.
    ///
    /// Photons with non-finite energy are dropped; returns whether the
    /// photon was stored.
    pub fn store(&mut self, surface: SurfaceId, photon: Photon) -> bool {
        if !photon.energy.is_finite() {
            log::warn!("Dropping photon with non-finite energy on surface {:?}", surface);
            return false;
        }
        self.photons.entry(surface).or_default().push(photon);
        self.count += 1;
        true
    }

    /// All photons stored on `surface` (empty if none).
    pub fn photons_on(&self, surface: SurfaceId) -> &[Photon] {
        self.photons.get(&surface).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate over every stored photon with its surface.
    pub fn iter(&self) -> impl Iterator<Item = (SurfaceId, &Photon)> {
        self.photons
            .iter()
            .flat_map(|(surface, photons)| photons.iter().map(move |p| (*surface, p)))
    }

    /// Total number of stored photons.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Check if no photons are stored.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of surfaces holding at least one photon.
    pub fn surface_count(&self) -> usize {
        self.photons.len()
    }
}

/// Selective absorption: light leaving a surface keeps at most the
/// surface's own color in each channel (white light on a red wall
/// bounces back red).
#[inline]
pub fn filter_color(energy: Color, surface_color: Color) -> Color {
    energy.min(surface_color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn photon(energy: Color) -> Photon {
        Photon {
            direction: -Vec3::Y,
            location: Vec3::ZERO,
            energy,
        }
    }

    #[test]
    fn test_store_and_lookup() {
        let mut map = PhotonMap::new();
        assert!(map.is_empty());

        assert!(map.store(SurfaceId(1), photon(Color::ONE)));
        assert!(map.store(SurfaceId(1), photon(Color::splat(-0.25))));
        assert!(map.store(SurfaceId(2), photon(Color::ONE)));

        assert_eq!(map.len(), 3);
        assert_eq!(map.surface_count(), 2);
        assert_eq!(map.photons_on(SurfaceId(1)).len(), 2);
        assert_eq!(map.photons_on(SurfaceId(1))[1].energy, Color::splat(-0.25));
        assert_eq!(map.iter().count(), 3);
    }

    #[test]
    fn test_missing_surface_is_empty() {
        let map = PhotonMap::new();
        assert!(map.photons_on(SurfaceId(7)).is_empty());
    }

    #[test]
    fn test_non_finite_energy_is_rejected() {
        let mut map = PhotonMap::new();
        assert!(!map.store(SurfaceId(0), photon(Color::new(f32::NAN, 0.0, 0.0))));
        assert!(!map.store(SurfaceId(0), photon(Color::splat(f32::INFINITY))));
        assert!(map.is_empty());
        assert_eq!(map.surface_count(), 0);
    }

    #[test]
    fn test_filter_color_keeps_channel_minimum() {
        let white = Color::ONE;
        let red = Color::new(1.0, 0.0, 0.0);
        assert_eq!(filter_color(white, red), red);
        assert_eq!(filter_color(Color::new(0.3, 0.8, 0.5), Color::new(0.6, 0.2, 0.5)), Color::new(0.3, 0.2, 0.5));
    }

    #[test]
    fn test_filter_color_idempotent_and_non_increasing() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let x = Color::new(rng.gen_range(-1.0..2.0), rng.gen_range(-1.0..2.0), rng.gen_range(-1.0..2.0));
            let y = Color::new(rng.gen_range(-1.0..2.0), rng.gen_range(-1.0..2.0), rng.gen_range(-1.0..2.0));

            let once = filter_color(x, y);
            assert_eq!(filter_color(once, y), once);

            for i in 0..3 {
                assert!(once[i] <= x[i].min(y[i]));
            }
        }
    }
}
