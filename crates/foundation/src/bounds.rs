use crate::math::Vec2;

/// Axis-aligned bounding box in the plane.
///
/// For geographic data `min` is `[west, south]` and `max` is `[east, north]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb2 {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl Aabb2 {
    pub fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        Aabb2 { min, max }
    }

    /// Builds the box spanned by two arbitrary corners.
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Aabb2 {
            min: [a.x.min(b.x), a.y.min(b.y)],
            max: [a.x.max(b.x), a.y.max(b.y)],
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min[0] && p.x <= self.max[0] && p.y >= self.min[1] && p.y <= self.max[1]
    }
}

#[cfg(test)]
mod tests {
    use super::Aabb2;
    use crate::math::Vec2;

    #[test]
    fn from_corners_orders_min_max() {
        let b = Aabb2::from_corners(Vec2::new(3.0, -1.0), Vec2::new(-2.0, 4.0));
        assert_eq!(b, Aabb2::new([-2.0, -1.0], [3.0, 4.0]));
    }

    #[test]
    fn contains_is_inclusive() {
        let b = Aabb2::new([0.0, 0.0], [1.0, 1.0]);
        assert!(b.contains(Vec2::new(1.0, 0.0)));
        assert!(b.contains(Vec2::new(0.5, 0.5)));
        assert!(!b.contains(Vec2::new(1.0001, 0.5)));
    }
}
