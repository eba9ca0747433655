//! Deterministic fixed-point 3D vector mathematics.
//!
//! This crate provides the vector arithmetic a software renderer's geometry
//! pipeline needs: addition, subtraction, scaling, dot product, magnitude,
//! normalization, and surface-normal computation from three points. All
//! operations use fixed-point arithmetic to ensure identical behavior across
//! different platforms and architectures.
//!
//! The interesting part is [`surface_normal_quick`]: the cross product of two
//! edge vectors can far exceed the native fixed-point width, so it is formed
//! in 64-bit intermediates and adaptively scaled down by a power of two when
//! it would not fit. Direction is always preserved; callers that need a
//! consistent magnitude use [`surface_normal`], which normalizes the result.

use fixed::types::I16F16;

pub use normal::{surface_normal, surface_normal_quick};
pub use vec3::{DivideByZero, FixedVec3};

mod normal;
mod vec3;
mod wide;

/// Fixed-point number type used throughout the crate.
///
/// Uses I16F16 format: 16 bits for the integer part, 16 bits for the
/// fractional part. This provides a range of ±32768 with a precision of
/// ~0.000015.
pub type FixedNum = I16F16;
