/// Viewport size in logical points.
///
/// Shares its unit system with [`TouchPoint`](super::TouchPoint); the scan
/// transform divides one by the other.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when both extents are positive and finite, i.e. safe to divide by.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Point a size change resets the touch location to, before any touch arrives.
    #[inline]
    pub fn default_touch(self) -> super::TouchPoint {
        super::TouchPoint::new(self.width / 1.5, self.height / 1.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_extent_is_invalid() {
        assert!(!Viewport::new(0.0, 100.0).is_valid());
        assert!(!Viewport::new(100.0, 0.0).is_valid());
        assert!(!Viewport::default().is_valid());
    }

    #[test]
    fn non_finite_is_invalid() {
        assert!(!Viewport::new(f32::INFINITY, 10.0).is_valid());
        assert!(!Viewport::new(10.0, f32::NAN).is_valid());
    }

    #[test]
    fn default_touch_is_two_thirds_of_extent() {
        let p = Viewport::new(300.0, 600.0).default_touch();
        assert_eq!(p.x, 200.0);
        assert_eq!(p.y, 400.0);
    }
}
