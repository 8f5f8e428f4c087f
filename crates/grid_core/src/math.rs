//! Fixed-point math utilities for deterministic placement.
//!
//! All grid math uses fixed-point arithmetic to ensure deterministic
//! behavior across platforms. Floating-point operations can produce
//! different results on different CPUs.

use fixed::types::I32F32;
use serde::{Deserialize, Serialize};

/// Fixed-point number type for all grid math.
///
/// Uses 32 bits for integer part and 32 bits for fractional part.
/// Range: approximately -2,147,483,648 to 2,147,483,647
/// Precision: approximately 0.00000000023
pub type Fixed = I32F32;

/// Fixed-point 2D vector describing a world position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Vec2Fixed {
    /// X coordinate.
    #[serde(with = "fixed_serde")]
    pub x: Fixed,
    /// Y coordinate.
    #[serde(with = "fixed_serde")]
    pub y: Fixed,
}

/// Serde support for fixed-point numbers.
///
/// Serializes fixed-point numbers as their raw bit representation (i64)
/// to preserve exact precision across serialization boundaries.
pub mod fixed_serde {
    use super::Fixed;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a fixed-point number as its raw bit representation.
    pub fn serialize<S>(value: &Fixed, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.to_bits().serialize(serializer)
    }

    /// Deserialize a fixed-point number from its raw bit representation.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Fixed, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bits = i64::deserialize(deserializer)?;
        Ok(Fixed::from_bits(bits))
    }
}

impl Vec2Fixed {
    /// Create a new fixed-point vector.
    #[must_use]
    pub const fn new(x: Fixed, y: Fixed) -> Self {
        Self { x, y }
    }

    /// Zero vector.
    pub const ZERO: Self = Self {
        x: Fixed::ZERO,
        y: Fixed::ZERO,
    };
}

impl std::ops::Add for Vec2Fixed {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2Fixed {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(n: i32) -> Fixed {
        Fixed::from_num(n)
    }

    #[test]
    fn test_vector_arithmetic() {
        let a = Vec2Fixed::new(fixed(3), fixed(4));
        let b = Vec2Fixed::new(fixed(1), fixed(2));

        assert_eq!(a + b, Vec2Fixed::new(fixed(4), fixed(6)));
        assert_eq!(a - b, Vec2Fixed::new(fixed(2), fixed(2)));
        assert_eq!(Vec2Fixed::ZERO + a, a);
    }

    #[test]
    fn test_round_ties_away_from_zero() {
        // The converter relies on this tie rule from the fixed crate.
        assert_eq!(Fixed::from_num(0.5).round(), fixed(1));
        assert_eq!(Fixed::from_num(-0.5).round(), fixed(-1));
        assert_eq!(Fixed::from_num(1.4).round(), fixed(1));
        assert_eq!(Fixed::from_num(-1.6).round(), fixed(-2));
    }

    #[test]
    fn test_fixed_serde_roundtrip_bits() {
        let v = Fixed::from_num(2.25);
        assert_eq!(Fixed::from_bits(v.to_bits()), v);
    }
}
