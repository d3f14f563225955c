//! Screen-Space 2D Vector
//!
//! Small `f32` vector used by every simulated entity.
//! Coordinates follow the playfield convention: origin top-left, +y down.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};
use serde::{Serialize, Deserialize};

use super::constants::{SCREEN_WIDTH, SCREEN_HEIGHT};

/// 2D vector with `f32` components.
#[derive(Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component (grows to the right)
    pub x: f32,
    /// Y component (grows downwards)
    pub y: f32,
}

impl Vec2 {
    /// Zero vector
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Unit vector pointing right (+X)
    pub const RIGHT: Self = Self { x: 1.0, y: 0.0 };

    /// Unit vector pointing left (-X)
    pub const LEFT: Self = Self { x: -1.0, y: 0.0 };

    /// Create a new vector.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector at `degrees` (0 = right, 90 = down).
    #[inline]
    pub fn from_degrees(degrees: f32) -> Self {
        let radians = degrees.to_radians();
        Self::new(radians.cos(), radians.sin())
    }

    /// Vector of the given length at `degrees`.
    #[inline]
    pub fn from_polar(length: f32, degrees: f32) -> Self {
        Self::from_degrees(degrees).scale(length)
    }

    /// Scale by a scalar.
    #[inline]
    pub fn scale(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }

    /// Squared length (avoids sqrt - prefer this for comparisons).
    #[inline]
    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// Length (magnitude). Prefer `length_squared` when possible.
    #[inline]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Squared distance to another point.
    #[inline]
    pub fn distance_squared(self, other: Self) -> f32 {
        (self - other).length_squared()
    }

    /// Distance to another point. Prefer `distance_squared` when possible.
    #[inline]
    pub fn distance(self, other: Self) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Normalize to unit length.
    /// Returns ZERO if length is zero.
    #[inline]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            return Self::ZERO;
        }
        self.scale(1.0 / len)
    }

    /// Dot product with another vector.
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Rotate around the origin by `degrees` (clockwise on screen).
    #[inline]
    pub fn rotate_degrees(self, degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    /// Clamp each component into its own range.
    #[inline]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        Self {
            x: self.x.max(min.x).min(max.x),
            y: self.y.max(min.y).min(max.y),
        }
    }

    /// Check if the point lies on the playfield (edges included).
    #[inline]
    pub fn is_on_screen(self) -> bool {
        self.x >= 0.0 && self.x <= SCREEN_WIDTH && self.y >= 0.0 && self.y <= SCREEN_HEIGHT
    }

    /// Linear interpolation between two vectors.
    /// t = 0 returns self, t = 1 returns other.
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self).scale(t)
    }

    /// Convert to a tuple for rendering.
    #[inline]
    pub fn to_tuple(self) -> (f32, f32) {
        (self.x, self.y)
    }
}

// Operator overloads for ergonomics
impl Add for Vec2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f32) -> Self {
        self.scale(rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl fmt::Debug for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vec2({:.3}, {:.3})", self.x, self.y)
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_vec2_add_sub() {
        let a = Vec2::new(3.0, 4.0);
        let b = Vec2::new(1.0, 2.0);
        assert_eq!(a + b, Vec2::new(4.0, 6.0));
        assert_eq!(a - b, Vec2::new(2.0, 2.0));
        assert_eq!(-a, Vec2::new(-3.0, -4.0));
    }

    #[test]
    fn test_vec2_length() {
        // 3-4-5 triangle
        let v = Vec2::new(3.0, 4.0);
        assert_eq!(v.length_squared(), 25.0);
        assert_eq!(v.length(), 5.0);
        assert_eq!(Vec2::ZERO.distance(v), 5.0);
    }

    #[test]
    fn test_vec2_normalize() {
        let norm = Vec2::new(3.0, 4.0).normalize();
        assert!(approx(norm.length(), 1.0));

        // Zero vector normalizes to zero
        assert_eq!(Vec2::ZERO.normalize(), Vec2::ZERO);
    }

    #[test]
    fn test_vec2_polar() {
        let right = Vec2::from_degrees(0.0);
        assert!(approx(right.x, 1.0) && approx(right.y, 0.0));

        // 180 degrees points left
        let left = Vec2::from_polar(5.0, 180.0);
        assert!(approx(left.x, -5.0) && approx(left.y, 0.0));

        // 90 degrees points down the screen
        let down = Vec2::from_degrees(90.0);
        assert!(approx(down.x, 0.0) && approx(down.y, 1.0));
    }

    #[test]
    fn test_vec2_rotate() {
        let v = Vec2::new(10.0, 0.0).rotate_degrees(90.0);
        assert!(approx(v.x, 0.0));
        assert!(approx(v.y, 10.0));
    }

    #[test]
    fn test_vec2_clamp() {
        let min = Vec2::new(80.0, 80.0);
        let max = Vec2::new(720.0, 520.0);

        // Inside bounds - unchanged
        let inside = Vec2::new(400.0, 300.0);
        assert_eq!(inside.clamp(min, max), inside);

        // Outside bounds - clamped
        let outside = Vec2::new(900.0, -20.0);
        assert_eq!(outside.clamp(min, max), Vec2::new(720.0, 80.0));
    }

    #[test]
    fn test_vec2_on_screen() {
        assert!(Vec2::new(0.0, 0.0).is_on_screen());
        assert!(Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT).is_on_screen());
        assert!(!Vec2::new(-0.5, 10.0).is_on_screen());
        assert!(!Vec2::new(10.0, SCREEN_HEIGHT + 1.0).is_on_screen());
    }
}
