//! Fixed-point vector and 3x3 matrix primitives
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use crate::fixed::{dot3, Fix};

/// A 3D point or direction in fixed point
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: Fix,
    pub y: Fix,
    pub z: Fix,
}

impl Vector3 {
    pub const ZERO: Self = Self::new(Fix::ZERO, Fix::ZERO, Fix::ZERO);
    pub const X: Self = Self::new(Fix::ONE, Fix::ZERO, Fix::ZERO);
    pub const Y: Self = Self::new(Fix::ZERO, Fix::ONE, Fix::ZERO);
    pub const Z: Self = Self::new(Fix::ZERO, Fix::ZERO, Fix::ONE);

    pub const fn new(x: Fix, y: Fix, z: Fix) -> Self {
        Self { x, y, z }
    }

    /// Build from integer components
    pub const fn from_ints(x: i32, y: i32, z: i32) -> Self {
        Self::new(Fix::from_int(x), Fix::from_int(y), Fix::from_int(z))
    }

    pub fn from_f32(x: f32, y: f32, z: f32) -> Self {
        Self::new(Fix::from_f32(x), Fix::from_f32(y), Fix::from_f32(z))
    }

    #[inline]
    pub const fn to_array(self) -> [Fix; 3] {
        [self.x, self.y, self.z]
    }

    /// Fixed-point dot product, rescaled once after the sum
    #[inline]
    pub const fn dot(self, other: Self) -> Fix {
        dot3(self.to_array(), other.to_array())
    }
}

impl Add for Vector3 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vector3 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vector3 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vector3 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl From<Vector3> for nalgebra::Vector3<f32> {
    fn from(v: Vector3) -> Self {
        nalgebra::Vector3::new(v.x.to_f32(), v.y.to_f32(), v.z.to_f32())
    }
}

impl From<nalgebra::Vector3<f32>> for Vector3 {
    fn from(v: nalgebra::Vector3<f32>) -> Self {
        Self::from_f32(v.x, v.y, v.z)
    }
}

/// A 3x3 fixed-point matrix stored as three row vectors
///
/// `m * v` computes one row dot product per output component, so row `a`
/// produces `x`, row `b` produces `y` and row `c` produces `z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Matrix3 {
    pub a: Vector3,
    pub b: Vector3,
    pub c: Vector3,
}

impl Matrix3 {
    pub const IDENTITY: Self = Self::from_rows(Vector3::X, Vector3::Y, Vector3::Z);

    pub const fn from_rows(a: Vector3, b: Vector3, c: Vector3) -> Self {
        Self { a, b, c }
    }

    pub const fn column_x(&self) -> Vector3 {
        Vector3::new(self.a.x, self.b.x, self.c.x)
    }

    pub const fn column_y(&self) -> Vector3 {
        Vector3::new(self.a.y, self.b.y, self.c.y)
    }

    pub const fn column_z(&self) -> Vector3 {
        Vector3::new(self.a.z, self.b.z, self.c.z)
    }

    pub fn transpose(&self) -> Self {
        Self::from_rows(self.column_x(), self.column_y(), self.column_z())
    }

    /// Matrix-vector product, 9 multiplies rescaled per row
    #[inline]
    pub fn mul_vector(&self, v: Vector3) -> Vector3 {
        Vector3::new(self.a.dot(v), self.b.dot(v), self.c.dot(v))
    }

    /// Matrix product `self * rhs`, 27 multiplies rescaled per entry
    pub fn mul_matrix(&self, rhs: &Self) -> Self {
        let cols = [rhs.column_x(), rhs.column_y(), rhs.column_z()];
        let row = |r: Vector3| Vector3::new(r.dot(cols[0]), r.dot(cols[1]), r.dot(cols[2]));
        Self::from_rows(row(self.a), row(self.b), row(self.c))
    }
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Matrix3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.mul_matrix(&rhs)
    }
}

impl Mul<Vector3> for Matrix3 {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Vector3 {
        self.mul_vector(rhs)
    }
}

impl From<Matrix3> for nalgebra::Matrix3<f32> {
    #[rustfmt::skip]
    fn from(m: Matrix3) -> Self {
        nalgebra::Matrix3::new(
            m.a.x.to_f32(), m.a.y.to_f32(), m.a.z.to_f32(),
            m.b.x.to_f32(), m.b.y.to_f32(), m.b.z.to_f32(),
            m.c.x.to_f32(), m.c.y.to_f32(), m.c.z.to_f32(),
        )
    }
}
