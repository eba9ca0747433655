//! Fixed-point 3-component vector and its basic operations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::wide::{wide_mul, wide_sqrt, wide_to_fixed};
use crate::FixedNum;

/// Error returned when normalizing a zero-magnitude vector.
///
/// Degenerate input is a caller responsibility: check for zero-length vectors
/// (or collinear points, for surface normals) before asking for a unit vector.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
#[error("cannot normalize a zero-magnitude vector")]
pub struct DivideByZero;

/// A 3D vector with fixed-point components.
///
/// Component-wise addition, subtraction, scaling and division use the native
/// fixed-point width and wrap on overflow like the underlying integers; the
/// products inside [`dot`](Self::dot) and [`magnitude`](Self::magnitude) are
/// accumulated in 64-bit intermediates so they cannot overflow on the way to
/// the final sum; a sum of products that exceeds even the wide width wraps
/// rather than panicking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FixedVec3 {
    pub x: FixedNum,
    pub y: FixedNum,
    pub z: FixedNum,
}

impl FixedVec3 {
    pub const ZERO: Self = Self {
        x: FixedNum::ZERO,
        y: FixedNum::ZERO,
        z: FixedNum::ZERO,
    };

    pub fn new(x: FixedNum, y: FixedNum, z: FixedNum) -> Self {
        Self { x, y, z }
    }

    pub fn from_f32(x: f32, y: f32, z: f32) -> Self {
        Self {
            x: FixedNum::from_num(x),
            y: FixedNum::from_num(y),
            z: FixedNum::from_num(z),
        }
    }

    pub fn to_f32(self) -> [f32; 3] {
        [self.x.to_num(), self.y.to_num(), self.z.to_num()]
    }

    /// Dot product, accumulated in a wide intermediate so that the three
    /// component products cannot overflow before the final sum is narrowed.
    /// A sum that exceeds even the wide width wraps like the underlying
    /// integers.
    pub fn dot(self, other: Self) -> FixedNum {
        let sum = wide_mul(self.x, other.x)
            .wrapping_add(wide_mul(self.y, other.y))
            .wrapping_add(wide_mul(self.z, other.z));
        wide_to_fixed(sum)
    }

    /// Euclidean length, computed as the integer square root of a wide
    /// sum of squares. A sum that exceeds even the wide width wraps like
    /// the underlying integers.
    pub fn magnitude(self) -> FixedNum {
        let sum = wide_mul(self.x, self.x)
            .wrapping_add(wide_mul(self.y, self.y))
            .wrapping_add(wide_mul(self.z, self.z));
        wide_sqrt(sum)
    }

    /// Scales the vector to unit length.
    ///
    /// # Errors
    ///
    /// Returns [`DivideByZero`] if the vector has zero magnitude.
    pub fn normalize(self) -> Result<Self, DivideByZero> {
        let mag = self.magnitude();
        if mag == FixedNum::ZERO {
            return Err(DivideByZero);
        }
        Ok(Self {
            x: self.x / mag,
            y: self.y / mag,
            z: self.z / mag,
        })
    }
}

impl std::ops::Add for FixedVec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl std::ops::Sub for FixedVec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl std::ops::Mul<FixedNum> for FixedVec3 {
    type Output = Self;
    fn mul(self, rhs: FixedNum) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
        }
    }
}

impl std::ops::Div<FixedNum> for FixedVec3 {
    type Output = Self;
    fn div(self, rhs: FixedNum) -> Self::Output {
        Self {
            x: self.x / rhs,
            y: self.y / rhs,
            z: self.z / rhs,
        }
    }
}

impl std::ops::Neg for FixedVec3 {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn random_vec(rng: &mut fastrand::Rng) -> FixedVec3 {
        FixedVec3::from_f32(
            rng.f32() * 200.0 - 100.0,
            rng.f32() * 200.0 - 100.0,
            rng.f32() * 200.0 - 100.0,
        )
    }

    fn assert_close(actual: FixedNum, expected: f32, tolerance: f32, what: &str) {
        let actual: f32 = actual.to_num();
        assert!(
            (actual - expected).abs() <= tolerance,
            "{what}: expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_add_sub_round_trip_is_exact() {
        let mut rng = fastrand::Rng::with_seed(0x5eed);
        for _ in 0..100 {
            let a = random_vec(&mut rng);
            let b = random_vec(&mut rng);
            assert_eq!((a - b) + b, a, "(a - b) + b should reconstruct a exactly");
        }
    }

    #[test]
    fn test_dot_is_commutative() {
        let mut rng = fastrand::Rng::with_seed(0xd07);
        for _ in 0..100 {
            let a = random_vec(&mut rng);
            let b = random_vec(&mut rng);
            assert_eq!(a.dot(b), b.dot(a));
        }
    }

    #[test]
    fn test_dot_wide_intermediates_cancel() {
        // Each component product is 40000, far outside the ±32768 native
        // range, but the wide accumulator lets them cancel exactly
        let a = FixedVec3::from_f32(200.0, 200.0, 0.0);
        let b = FixedVec3::from_f32(200.0, -200.0, 0.0);
        assert_eq!(a.dot(b), FixedNum::ZERO);
    }

    #[test]
    fn test_wide_accumulator_wraps_instead_of_panicking() {
        // Every component is representable, but the sum of the three squared
        // products exceeds even the wide 64-bit width; the accumulator wraps
        // like the underlying integers instead of panicking
        let v = FixedVec3::from_f32(30000.0, 30000.0, 30000.0);
        let square = {
            let bits = i64::from(v.x.to_bits());
            bits * bits
        };
        let wrapped = square.wrapping_add(square).wrapping_add(square);
        assert_eq!(v.dot(v), FixedNum::from_bits((wrapped >> 16) as i32));
        assert_eq!(
            v.magnitude(),
            FixedNum::from_bits((wrapped as u64).isqrt() as i32)
        );
    }

    #[test]
    fn test_magnitude_of_pythagorean_triples() {
        let cases = [
            ((3.0, 4.0, 0.0), 5.0),
            ((1.0, 2.0, 2.0), 3.0),
            ((2.0, 3.0, 6.0), 7.0),
        ];
        for ((x, y, z), expected) in cases {
            let v = FixedVec3::from_f32(x, y, z);
            assert_eq!(v.magnitude(), FixedNum::from_num(expected));
        }
    }

    #[test]
    fn test_magnitude_scales_linearly() {
        let mut rng = fastrand::Rng::with_seed(0x5ca1e);
        for _ in 0..100 {
            let v = random_vec(&mut rng);
            let k = rng.f32() * 7.5 + 0.5;
            let expected: f32 = v.magnitude().to_num::<f32>() * k;
            assert_close(
                (v * FixedNum::from_num(k)).magnitude(),
                expected,
                0.05,
                "magnitude(v * k)",
            );
        }
    }

    #[test]
    fn test_normalize_yields_unit_length() {
        let mut rng = fastrand::Rng::with_seed(0x0081);
        for _ in 0..100 {
            let v = random_vec(&mut rng);
            if v.magnitude() < FixedNum::from_num(0.1) {
                continue;
            }
            let unit = v.normalize().expect("non-zero vector must normalize");
            assert_close(unit.magnitude(), 1.0, 0.001, "magnitude of normalized vector");
        }
    }

    #[test]
    fn test_normalize_zero_vector_fails() {
        assert_eq!(FixedVec3::ZERO.normalize(), Err(DivideByZero));
    }

    #[test]
    fn test_scale_then_unscale_round_trips() {
        let v = FixedVec3::from_f32(12.5, -3.75, 88.0);
        let k = FixedNum::from_num(4);
        assert_eq!((v * k) / k, v);
    }

    #[test]
    fn test_negation_flips_every_component() {
        let v = FixedVec3::from_f32(1.5, -2.0, 0.25);
        assert_eq!(-v, FixedVec3::from_f32(-1.5, 2.0, -0.25));
        assert_eq!(-FixedVec3::ZERO, FixedVec3::ZERO);
    }

    #[test]
    fn test_serde_round_trip_preserves_bits() {
        let v = FixedVec3::from_f32(1.5, -32767.25, 0.0000153);
        let json = serde_json::to_string(&v).expect("serialize");
        let back: FixedVec3 = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, v);
    }
}
