//! Lux Math - glam plus the two small types the renderers share.

pub use glam::*;

mod interval;
mod ray;
pub use interval::Interval;
pub use ray::Ray;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_min_is_channel_wise() {
        let a = Vec3::new(1.0, 0.2, 0.7);
        let b = Vec3::new(0.5, 0.9, 0.7);
        assert_eq!(a.min(b), Vec3::new(0.5, 0.2, 0.7));
    }

    #[test]
    fn test_vec3_product_is_channel_wise() {
        let light = Vec3::new(1.0, 0.5, 0.25);
        let surface = Vec3::new(0.5, 0.5, 4.0);
        assert_eq!(light * surface, Vec3::new(0.5, 0.25, 1.0));
    }
}
