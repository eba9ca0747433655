//! Double-width intermediate arithmetic.
//!
//! The product of two 16.16 values carries 32 fractional bits and needs 64
//! bits of storage. These helpers move values between [`FixedNum`] and that
//! wide 32.32 domain: multiply into it, narrow back out of it, and take the
//! square root of an accumulator built in it.

use crate::FixedNum;

/// Multiplies two fixed-point values into a wide 32.32 intermediate.
pub(crate) fn wide_mul(a: FixedNum, b: FixedNum) -> i64 {
    i64::from(a.to_bits()) * i64::from(b.to_bits())
}

/// Narrows a wide 32.32 value back to 16.16.
///
/// Bits above the native 32-bit width are discarded; callers that cannot
/// tolerate wraparound must scale the wide value into range first.
pub(crate) fn wide_to_fixed(r: i64) -> FixedNum {
    FixedNum::from_bits((r >> 16) as i32)
}

/// Integer square root of a wide 32.32 accumulator.
///
/// The root of a value with 32 fractional bits carries 16 fractional bits, so
/// the raw root is already the `FixedNum` bit pattern. A negative accumulator
/// (wraparound from out-of-range input) yields an implementation-defined
/// value rather than a panic.
pub(crate) fn wide_sqrt(r: i64) -> FixedNum {
    FixedNum::from_bits((r as u64).isqrt() as i32)
}
