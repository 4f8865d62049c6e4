/// Closed range of `f32` values.
///
/// Used for accepted hit distances along a ray and for clamping color
/// channels to the displayable range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// The displayable range of a color channel.
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };

    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// `min <= x <= max`
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// `min < x < max`; a hit exactly at either end is rejected.
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    pub fn clamp(&self, x: f32) -> f32 {
        x.max(self.min).min(self.max)
    }

    /// Narrow the upper end, e.g. to the closest hit found so far.
    pub fn with_max(&self, max: f32) -> Interval {
        Interval { max, ..*self }
    }
}
