// ============================================================================
// Numeric Module
// Arbitrary-precision fixed-point arithmetic for monetary calculations
// ============================================================================
//
// This module provides:
// - FixedDecimal: fixed-point decimal with a runtime scale over a BigInt
// - NumericError: Error types for arithmetic operations
// - Rounding helpers shared with the money layer
//
// Design principles:
// - No floating-point operations (f64 only at explicit API boundaries)
// - All fallible arithmetic returns Result (no panics)
// - One rounding rule everywhere: half away from zero

mod errors;
mod fixed_decimal;
pub(crate) mod rounding;

pub use errors::{NumericError, NumericResult};
pub(crate) use fixed_decimal::check_scale;
pub use fixed_decimal::{FixedDecimal, MAX_SCALE};
