//! 2D Arena Coordinates
//!
//! Positions and distances for the battle arena. Combat resolution only
//! needs points, straight-line distance, and the fixed arena rectangle.

use std::fmt;
use std::ops::{Add, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Arena bounds on the X axis.
pub const ARENA_MIN_X: f64 = -500.0;
/// Arena bounds on the X axis.
pub const ARENA_MAX_X: f64 = 500.0;
/// Arena bounds on the Y axis.
pub const ARENA_MIN_Y: f64 = -100.0;
/// Arena bounds on the Y axis.
pub const ARENA_MAX_Y: f64 = 300.0;

/// Spawn position for side A.
pub const SPAWN_A: Vec2 = Vec2 { x: -100.0, y: 0.0 };
/// Spawn position for side B.
pub const SPAWN_B: Vec2 = Vec2 { x: 100.0, y: 0.0 };

/// A 2D point in arena space.
#[derive(Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
}

impl Vec2 {
    /// Origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared distance to another point. Prefer this for comparisons.
    #[inline]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Straight-line distance to another point.
    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Check whether this point lies inside the arena rectangle.
    #[inline]
    pub fn in_arena(self) -> bool {
        self.x >= ARENA_MIN_X
            && self.x <= ARENA_MAX_X
            && self.y >= ARENA_MIN_Y
            && self.y <= ARENA_MAX_Y
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Neg for Vec2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl fmt::Debug for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(a.distance_squared(b), 25.0);
    }

    #[test]
    fn test_arena_bounds() {
        assert!(Vec2::ZERO.in_arena());
        assert!(Vec2::new(-500.0, -100.0).in_arena());
        assert!(Vec2::new(500.0, 300.0).in_arena());
        assert!(!Vec2::new(-500.1, 0.0).in_arena());
        assert!(!Vec2::new(0.0, 300.1).in_arena());
        assert!(!Vec2::new(1000.0, 0.0).in_arena());
    }

    #[test]
    fn test_spawns_inside_arena() {
        assert!(SPAWN_A.in_arena());
        assert!(SPAWN_B.in_arena());
    }

    #[test]
    fn test_arith() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, -1.0);
        assert_eq!(a + b, Vec2::new(4.0, 1.0));
        assert_eq!(a - b, Vec2::new(-2.0, 3.0));
        assert_eq!(-a, Vec2::new(-1.0, -2.0));
    }
}
