//! 16.16 fixed-point scalar shared by every quantity in the engine.
//!
//! Coordinates, matrix entries and angles (in degrees) all use [`Fix`].
//! Products are formed in `i64` and shifted back by [`FRAC_BITS`].
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// Number of fractional bits in a [`Fix`].
pub const FRAC_BITS: u32 = 16;

/// Signed fixed-point number scaled by `2^FRAC_BITS`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Fix(i32);

impl Fix {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1 << FRAC_BITS);
    /// A full turn, in degrees.
    pub const DEG_360: Self = Self::from_int(360);

    /// Convert an integer to fixed point.
    pub const fn from_int(value: i32) -> Self {
        Self(value << FRAC_BITS)
    }

    /// Wrap an already scaled raw value.
    pub const fn from_bits(bits: i32) -> Self {
        Self(bits)
    }

    pub const fn to_bits(self) -> i32 {
        self.0
    }

    /// Integer part, rounded toward negative infinity.
    pub const fn to_int(self) -> i32 {
        self.0 >> FRAC_BITS
    }

    pub fn from_f32(value: f32) -> Self {
        Self((value * (1u32 << FRAC_BITS) as f32).round() as i32)
    }

    pub fn to_f32(self) -> f32 {
        self.0 as f32 / (1u32 << FRAC_BITS) as f32
    }

    /// Fixed-point multiply: `(a * b) >> FRAC_BITS`.
    #[inline]
    pub const fn mul(self, rhs: Self) -> Self {
        Self(((self.0 as i64 * rhs.0 as i64) >> FRAC_BITS) as i32)
    }

    /// Fixed-point divide: `(a << FRAC_BITS) / b`.
    ///
    /// # Panics
    ///
    /// Panics if `rhs` is zero.
    #[inline]
    pub const fn div(self, rhs: Self) -> Self {
        Self((((self.0 as i64) << FRAC_BITS) / rhs.0 as i64) as i32)
    }

    pub const fn abs(self) -> Self {
        Self(self.0.abs())
    }
}

impl Add for Fix {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Fix {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Fix {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Fix {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Fix {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Mul for Fix {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Fix::mul(self, rhs)
    }
}

impl fmt::Display for Fix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.to_f32())
    }
}

/// Sum three raw products and scale the result back to fixed point.
///
/// This is the multiply-accumulate step behind every matrix row product;
/// the shift happens once, after the sum.
#[inline]
pub(crate) const fn dot3(a: [Fix; 3], b: [Fix; 3]) -> Fix {
    let sum = a[0].0 as i64 * b[0].0 as i64
        + a[1].0 as i64 * b[1].0 as i64
        + a[2].0 as i64 * b[2].0 as i64;
    Fix((sum >> FRAC_BITS) as i32)
}
