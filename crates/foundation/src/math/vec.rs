use serde::{Deserialize, Serialize};

/// A 2-D coordinate. Geographic data stores `x = longitude`, `y = latitude`.
///
/// Serializes as a two-element array so it lines up with GeoJSON positions.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(self, other: Self) -> f64 {
        (other - self).length()
    }

    pub fn distance_sq(self, other: Self) -> f64 {
        let d = other - self;
        d.x * d.x + d.y * d.y
    }

    /// Point at parameter `t` on the segment `self -> other` (`t = 0` is `self`).
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self::new(
            self.x - self.x * t + other.x * t,
            self.y - self.y * t + other.y * t,
        )
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f64; 2]> for Vec2 {
    fn from(v: [f64; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

impl From<Vec2> for [f64; 2] {
    fn from(v: Vec2) -> Self {
        [v.x, v.y]
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

#[cfg(test)]
mod tests {
    use super::Vec2;

    #[test]
    fn vec2_sub() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(-0.5, 4.0);
        assert_eq!(a - b, Vec2::new(1.5, -2.0));
    }

    #[test]
    fn distance_and_lerp() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(a.distance_sq(b), 25.0);
        assert_eq!(a.lerp(b, 0.5), Vec2::new(1.5, 2.0));
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn serializes_as_position_array() {
        let v = Vec2::new(-3.5, 40.25);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "[-3.5,40.25]");
        let back: Vec2 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }
}
