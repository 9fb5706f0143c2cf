// =========================
// 2D vector primitives
// =========================

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// Plain 2D vector (x, y) used for every position and direction in the
/// spatial engine.
///
/// All operations take their operands by value and return a fresh value;
/// nothing is mutated in place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2D {
    pub x: f32,
    pub y: f32,
}

impl Vector2D {
    pub const ZERO: Self = Self::new(0.0, 0.0);
    pub const X: Self = Self::new(1.0, 0.0);
    pub const Y: Self = Self::new(0.0, 1.0);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean length, `sqrt(v·v)`, without intermediate overflow: finite
    /// components up to `f32::MAX / √2` give a finite length.
    #[inline]
    pub fn magnitude(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Sum of the per-component products.
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        Vec2::from(self).dot(other.into())
    }

    /// `self - other`, i.e. the vector pointing from `other` to `self`.
    ///
    /// Not symmetric: `a.difference(b) == -b.difference(a)`.
    #[inline]
    pub fn difference(self, other: Self) -> Self {
        Self::from(Vec2::from(self) - Vec2::from(other))
    }

    #[inline]
    pub fn scale(self, s: f32) -> Self {
        Self::from(Vec2::from(self) * s)
    }

    /// 2D cross product (z component of the 3D cross product).
    #[inline]
    pub fn cross(self, other: Self) -> f32 {
        Vec2::from(self).perp_dot(other.into())
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Unit vector with the same direction, or `None` when the length is zero
    /// or not finite.
    pub fn try_normalize(self) -> Option<Self> {
        let m = self.magnitude();
        // division composante par composante : 1/m serait sous-normal pour m très grand
        if m > 0.0 && m.is_finite() {
            Some(Self::from(Vec2::from(self) / m))
        } else {
            None
        }
    }

    /// Unit vector with the same direction.
    ///
    /// A degenerate input (zero length, NaN or infinite components) yields
    /// [`Vector2D::ZERO`]; the result never contains NaN or infinity.
    pub fn normalize(self) -> Self {
        self.try_normalize().unwrap_or(Self::ZERO)
    }

    /// Angle between `self` and `other`, in degrees.
    ///
    /// - `signed == false`: range `[0, 180]`.
    /// - `signed == true`: range `[-180, 180]`. The result is negative when
    ///   `other` lies counter-clockwise from `self` (positive 2D cross
    ///   product), positive when clockwise.
    ///
    /// If either vector is degenerate the angle is `0.0`.
    pub fn angle_between(self, other: Self, signed: bool) -> f32 {
        let (Some(a), Some(b)) = (self.try_normalize(), other.try_normalize()) else {
            return 0.0;
        };

        // Deux vecteurs unitaires peuvent donner |dot| > 1 à cause des arrondis
        let dot = a.dot(b).clamp(-1.0, 1.0);
        let angle = dot.acos().to_degrees();

        if signed && a.cross(b) > 0.0 {
            -angle
        } else {
            angle
        }
    }
}

// Free-function forms, matching the names used throughout the engine.

#[inline]
pub fn magnitude(v: Vector2D) -> f32 {
    v.magnitude()
}

#[inline]
pub fn dot_product(a: Vector2D, b: Vector2D) -> f32 {
    a.dot(b)
}

#[inline]
pub fn difference(a: Vector2D, b: Vector2D) -> Vector2D {
    a.difference(b)
}

#[inline]
pub fn scale(v: Vector2D, s: f32) -> Vector2D {
    v.scale(s)
}

#[inline]
pub fn normalize(v: Vector2D) -> Vector2D {
    v.normalize()
}

#[inline]
pub fn angle_between(a: Vector2D, b: Vector2D, signed: bool) -> f32 {
    a.angle_between(b, signed)
}

impl Add for Vector2D {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2D {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self.difference(rhs)
    }
}

impl Mul<f32> for Vector2D {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        self.scale(rhs)
    }
}

impl Neg for Vector2D {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl From<(f32, f32)> for Vector2D {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f32; 2]> for Vector2D {
    fn from([x, y]: [f32; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<glam::Vec2> for Vector2D {
    fn from(v: glam::Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector2D> for glam::Vec2 {
    fn from(v: Vector2D) -> Self {
        glam::Vec2::new(v.x, v.y)
    }
}
