//! Immutable 2D vector for positions and directions
//!
//! Every operation returns a new value. There is no in-place mutation API, so a
//! paddle or ball can never observe a vector being changed underneath it.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use glam::Vec2;

/// Arithmetic failure in vector math
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    /// Division by a zero scalar (or normalizing a zero-length vector)
    DivideByZero,
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MathError::DivideByZero => write!(f, "division by zero"),
        }
    }
}

impl std::error::Error for MathError {}

/// A two-dimensional vector value
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn add(self, other: Vector2) -> Vector2 {
        (Vec2::from(self) + Vec2::from(other)).into()
    }

    #[inline]
    pub fn subtract(self, other: Vector2) -> Vector2 {
        (Vec2::from(self) - Vec2::from(other)).into()
    }

    #[inline]
    pub fn scale(self, k: f32) -> Vector2 {
        (Vec2::from(self) * k).into()
    }

    /// Divide both components by `k`
    pub fn divide(self, k: f32) -> Result<Vector2, MathError> {
        if k == 0.0 {
            return Err(MathError::DivideByZero);
        }
        Ok((Vec2::from(self) / k).into())
    }

    /// Euclidean length
    #[inline]
    pub fn magnitude(self) -> f32 {
        Vec2::from(self).length()
    }

    /// Unit vector in the same direction
    pub fn normalized(self) -> Result<Vector2, MathError> {
        self.divide(self.magnitude())
    }

    /// Same vector with the y component replaced
    #[inline]
    pub fn with_y(self, y: f32) -> Vector2 {
        Vector2::new(self.x, y)
    }
}

impl From<Vec2> for Vector2 {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector2> for Vec2 {
    fn from(v: Vector2) -> Self {
        Vec2::new(v.x, v.y)
    }
}

impl From<(f32, f32)> for Vector2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Vector2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Vector2::add(self, other)
    }
}

impl Sub for Vector2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        self.subtract(other)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Self;
    fn mul(self, k: f32) -> Self {
        self.scale(k)
    }
}

impl Neg for Vector2 {
    type Output = Self;
    fn neg(self) -> Self {
        self.scale(-1.0)
    }
}
