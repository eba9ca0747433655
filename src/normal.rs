//! Surface-normal computation from three points.
//!
//! The cross product of two triangle edges is a product of differences of
//! arbitrary-magnitude coordinates, so its components routinely exceed the
//! native fixed-point width. Each component is therefore formed in a wide
//! 64-bit intermediate, and when any of them would not narrow safely, all
//! three are scaled down by the same power of two before narrowing. The
//! shift amount is found in coarse 8-bit steps plus one table lookup rather
//! than bit by bit.

use crate::wide::{wide_mul, wide_to_fixed};
use crate::{DivideByZero, FixedVec3};

/// Right-shift that reduces a byte to zero, indexed by byte value.
const SHIFT_TABLE: [u32; 256] = build_shift_table();

const fn build_shift_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut value = 1;
    while value < 256 {
        table[value] = 8 - (value as u8).leading_zeros();
        value += 1;
    }
    table
}

/// Integer part of twice a wide cross-product term's absolute value.
///
/// Non-zero exactly when the term is too large to narrow to the native
/// width with headroom.
fn overflow_word(r: i64) -> u32 {
    (r.unsigned_abs() >> 31) as u32
}

/// Computes a vector proportional to the surface normal of the triangle
/// `v0, v1, v2`. DOES NOT NORMALIZE.
///
/// The direction follows the right-hand rule over the winding order, and the
/// relative magnitudes of the components are always preserved. The absolute
/// magnitude is reduced by a power of two whenever the cross product would
/// overflow the native fixed-point width, so callers that need a consistent
/// scale must use [`surface_normal`] instead.
///
/// Collinear points produce the zero vector.
pub fn surface_normal_quick(v0: FixedVec3, v1: FixedVec3, v2: FixedVec3) -> FixedVec3 {
    let e0 = v1 - v0;
    let e1 = v2 - v1;

    let rx = wide_mul(e1.z, e0.y) - wide_mul(e1.y, e0.z);
    let ry = wide_mul(e1.x, e0.z) - wide_mul(e1.z, e0.x);
    let rz = wide_mul(e1.y, e0.x) - wide_mul(e1.x, e0.y);

    let mut word = overflow_word(rx) | overflow_word(ry) | overflow_word(rz);
    if word == 0 {
        // Everything fits in the native width as-is.
        return FixedVec3::new(wide_to_fixed(rx), wide_to_fixed(ry), wide_to_fixed(rz));
    }

    // Coarse 8-bit steps until a single byte remains, then the table
    // resolves the final bits.
    let mut shiftcount = 0;
    while word >= 0x0100 {
        shiftcount += 8;
        word >>= 8;
    }
    shiftcount += SHIFT_TABLE[word as usize];

    // Arithmetic shift: the sign of each component must survive. It rounds
    // negative components toward -infinity, so one can land at exactly -0.5;
    // that still narrows losslessly.
    FixedVec3::new(
        wide_to_fixed(rx >> shiftcount),
        wide_to_fixed(ry >> shiftcount),
        wide_to_fixed(rz >> shiftcount),
    )
}

/// Computes the normalized surface normal of the triangle `v0, v1, v2`.
///
/// Any power-of-two scaling applied by the overflow correction in
/// [`surface_normal_quick`] cannot change a direction, so the result here is
/// the same unit vector whether or not that path was taken.
///
/// # Errors
///
/// Returns [`DivideByZero`] if the points are collinear (zero cross
/// product). Callers must check for degenerate triangles before asking for
/// a unit normal.
pub fn surface_normal(v0: FixedVec3, v1: FixedVec3, v2: FixedVec3) -> Result<FixedVec3, DivideByZero> {
    surface_normal_quick(v0, v1, v2).normalize()
}
