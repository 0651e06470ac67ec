//! Minimal 2D vector used for positions, velocities and genome forces.

use std::ops::{Add, AddAssign, Mul, Sub};

use geo::algorithm::Distance;
use geo::{Euclidean, Point};
use serde::{Deserialize, Serialize};

/// A 2D vector with `f32` components.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component.
    pub y: f32,
}

impl Vector2 {
    /// The zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a vector from its components.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Creates a vector pointing at `angle` radians with the given length.
    pub fn from_polar(angle: f32, magnitude: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(cos * magnitude, sin * magnitude)
    }

    /// Multiplies both components by `factor` in place.
    pub fn scale(&mut self, factor: f32) {
        self.x *= factor;
        self.y *= factor;
    }

    /// Euclidean length.
    pub fn magnitude(&self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Self) -> f32 {
        Euclidean.distance(Point::from(*self), Point::from(*other))
    }

    /// Returns this vector rotated counter-clockwise by `angle` radians.
    pub fn rotate(&self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }
}

impl Add for Vector2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl From<Vector2> for Point<f32> {
    fn from(v: Vector2) -> Self {
        Point::new(v.x, v.y)
    }
}

impl From<(f32, f32)> for Vector2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}
