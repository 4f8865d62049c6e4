use crate::Vec3;

/// Half-line from `origin` along `direction`.
///
/// The direction is not required to be unit length. Camera rays, for
/// instance, point through a unit-distance image plane and are only
/// normalized by whoever needs distances in world units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// `origin + t * direction`
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// The same ray with a unit-length direction; a zero direction stays
    /// zero so callers can detect it.
    pub fn normalized(&self) -> Self {
        Self::new(self.origin, self.direction.normalize_or_zero())
    }
}
