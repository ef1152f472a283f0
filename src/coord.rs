//! Signed 24.8 fixed-point coordinates
//!
//! A [`Coord`] is a 32-bit signed integer holding a value scaled by 256. The
//! line rasterizers work in this representation so that pixel-boundary
//! decisions are made with exact integer arithmetic instead of accumulating
//! floating-point drift.
//!
//! `floor` and `frac` mask the low eight bits. On a two's-complement value
//! that is the mathematical floor, so `frac` is always in `[0, 256)` and
//! `floor(x) + frac(x) == x` holds for negative values too.
//!
//! Addition and subtraction saturate at the ends of the range, like
//! [`Coord::from_f32`]. Use [`Coord::delta_to`] for an exact difference.
//!
//! ## Example
//!
//! ```
//! use tilegfx::Coord;
//!
//! let x = Coord::from_f32(2.75);
//! assert_eq!(x.floor(), Coord::from_int(2));
//! assert_eq!(x.frac().raw(), 192);
//! assert_eq!(x.round(), Coord::from_int(3));
//!
//! let y = Coord::from_f32(-0.25);
//! assert_eq!(y.floor_int(), -1);
//! assert_eq!(y.floor() + y.frac(), y);
//! ```

use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Number of fractional bits in a [`Coord`]
pub const FRAC_BITS: u32 = 8;

const SCALE: i32 = 1 << FRAC_BITS;
const FRAC_MASK: i32 = SCALE - 1;

/// Signed 24.8 fixed-point number
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Coord(i32);

impl Coord {
    /// Zero
    pub const ZERO: Self = Self(0);
    /// One whole unit (raw 256)
    pub const ONE: Self = Self(SCALE);
    /// One half (raw 128)
    pub const HALF: Self = Self(SCALE / 2);
    /// Smallest representable value
    pub const MIN: Self = Self(i32::MIN);
    /// Largest representable value
    pub const MAX: Self = Self(i32::MAX);

    /// Wrap a raw scaled value
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// The raw scaled value (value × 256)
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Convert from a float, truncating toward zero at 1/256 resolution
    ///
    /// Values outside the representable range saturate.
    pub fn from_f32(x: f32) -> Self {
        Self((x * SCALE as f32) as i32)
    }

    /// Convert to a float
    pub fn to_f32(self) -> f32 {
        self.0 as f32 / SCALE as f32
    }

    /// Convert from an integer (shift left by 8)
    pub const fn from_int(x: i32) -> Self {
        Self(x << FRAC_BITS)
    }

    /// Integer part, truncated toward zero
    pub const fn to_int(self) -> i32 {
        self.0 / SCALE
    }

    /// Integer part, rounded toward negative infinity
    ///
    /// This is the pixel index containing the coordinate.
    pub const fn floor_int(self) -> i32 {
        self.0 >> FRAC_BITS
    }

    /// Fixed-point product, rescaled by 256
    ///
    /// # Panics
    ///
    /// Panics if the integer part of the product does not fit in 24 bits.
    pub fn product(self, rhs: Self) -> Self {
        let p = (i64::from(self.0) * i64::from(rhs.0)) / i64::from(SCALE);
        assert!(
            i64::from(i32::MIN) <= p && p <= i64::from(i32::MAX),
            "coord product out of range: {self} * {rhs}"
        );
        Self(p as i32)
    }

    /// Fixed-point quotient, rescaled by 256
    ///
    /// # Panics
    ///
    /// Panics if `rhs` is zero or the result does not fit in 24 bits.
    pub fn quotient(self, rhs: Self) -> Self {
        assert!(rhs.0 != 0, "coord quotient divides by zero");
        let q = (i64::from(SCALE) * i64::from(self.0)) / i64::from(rhs.0);
        assert!(
            i64::from(i32::MIN) <= q && q <= i64::from(i32::MAX),
            "coord quotient out of range: {self} / {rhs}"
        );
        Self(q as i32)
    }

    /// Largest whole value not greater than `self`
    pub const fn floor(self) -> Self {
        Self(self.0 & !FRAC_MASK)
    }

    /// Fractional part, always in `[0, 1)`
    pub const fn frac(self) -> Self {
        Self(self.0 & FRAC_MASK)
    }

    /// `1 - frac(self)`, in `(0, 1]`
    pub const fn rfrac(self) -> Self {
        Self(SCALE - (self.0 & FRAC_MASK))
    }

    /// Nearest whole value, halves rounding up
    pub const fn round(self) -> Self {
        Self((self.0 + SCALE / 2) & !FRAC_MASK)
    }

    /// Absolute value
    pub const fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Exact raw difference `to - self`, widened so it cannot overflow
    pub const fn delta_to(self, to: Self) -> i64 {
        to.0 as i64 - self.0 as i64
    }
}

impl Add for Coord {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Coord {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Coord {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Coord {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl Neg for Coord {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl core::fmt::Display for Coord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.to_f32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_round_trip() {
        for i in [-1000, -1, 0, 1, 7, 1000] {
            assert_eq!(Coord::from_int(i).to_int(), i);
            assert_eq!(Coord::from_int(i).floor_int(), i);
        }
    }

    #[test]
    fn test_float_conversion() {
        assert_eq!(Coord::from_f32(1.5).raw(), 384);
        assert_eq!(Coord::from_f32(-1.5).raw(), -384);
        assert_eq!(Coord::from_raw(640).to_f32(), 2.5);
    }

    #[test]
    fn test_to_int_truncates_floor_int_floors() {
        let x = Coord::from_f32(-1.5);
        assert_eq!(x.to_int(), -1);
        assert_eq!(x.floor_int(), -2);
    }

    #[test]
    fn test_floor_plus_frac_is_identity() {
        for raw in [-1025, -256, -255, -1, 0, 1, 255, 256, 1025] {
            let x = Coord::from_raw(raw);
            assert_eq!(x.floor() + x.frac(), x);
            assert!((0..256).contains(&x.frac().raw()));
            assert_eq!(x.frac() + x.rfrac(), Coord::ONE);
        }
    }

    #[test]
    fn test_round() {
        assert_eq!(Coord::from_f32(2.49).round(), Coord::from_int(2));
        assert_eq!(Coord::from_f32(2.5).round(), Coord::from_int(3));
        assert_eq!(Coord::from_f32(-2.25).round(), Coord::from_int(-2));
        assert_eq!(Coord::from_f32(-2.75).round(), Coord::from_int(-3));
    }

    #[test]
    fn test_product_and_quotient() {
        let a = Coord::from_f32(1.5);
        let b = Coord::from_f32(-2.0);
        assert_eq!(a.product(b), Coord::from_f32(-3.0));
        assert_eq!(Coord::from_int(3).quotient(Coord::from_int(2)), a);
        assert_eq!(Coord::HALF.product(Coord::HALF).raw(), 64);
    }

    #[test]
    fn test_arithmetic_saturates_at_the_range_ends() {
        assert_eq!(Coord::MAX - Coord::MIN, Coord::MAX);
        assert_eq!(Coord::MIN - Coord::ONE, Coord::MIN);
        assert_eq!(Coord::MAX + Coord::HALF, Coord::MAX);
        assert_eq!(-Coord::MIN, Coord::MAX);
        assert_eq!(Coord::MIN.abs(), Coord::MAX);

        let mut x = Coord::from_f32(1e9);
        assert_eq!(x, Coord::MAX);
        x += Coord::ONE;
        assert_eq!(x, Coord::MAX);
        assert_eq!(Coord::MIN.delta_to(Coord::MAX), i64::from(u32::MAX));
        assert_eq!(Coord::from_int(3).delta_to(Coord::from_int(1)), -512);
    }

    #[test]
    #[should_panic(expected = "divides by zero")]
    fn test_quotient_by_zero_panics() {
        let _ = Coord::ONE.quotient(Coord::ZERO);
    }

    #[test]
    #[should_panic(expected = "product out of range")]
    fn test_product_overflow_panics() {
        let big = Coord::from_int(1 << 20);
        let _ = big.product(big);
    }
}
