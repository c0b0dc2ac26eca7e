//! # Checked Arithmetic
//!
//! Safe decimal arithmetic for pricing.
//!
//! This module provides:
//! - [`ArithmeticError`] - Error type for arithmetic failures
//! - [`CheckedArithmetic`] - Trait for safe arithmetic operations
//! - [`percentage_factor`] - Converts a percentage into a multiplier
//! - [`format_fixed`] - Fixed-point string rendering of money values
//!
//! # Examples
//!
//! ```
//! use provider_gateway::domain::value_objects::arithmetic::{CheckedArithmetic, format_fixed};
//! use rust_decimal::Decimal;
//!
//! let sum = Decimal::new(100, 0).safe_add(Decimal::new(10, 0)).unwrap();
//! assert_eq!(format_fixed(sum, 2), "110.00");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Checked arithmetic failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ArithmeticError {
    /// Arithmetic operation resulted in overflow.
    #[error("arithmetic overflow")]
    Overflow,

    /// Division by zero attempted.
    #[error("division by zero")]
    DivisionByZero,
}

/// Result type for arithmetic operations.
pub type ArithmeticResult<T> = Result<T, ArithmeticError>;

/// Decimal operations that report overflow instead of panicking.
pub trait CheckedArithmetic: Sized {
    /// Safely add two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the result would overflow.
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Safely multiply two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the result would overflow.
    fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Safely divide two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::DivisionByZero` if the divisor is zero.
    fn safe_div(self, rhs: Self) -> ArithmeticResult<Self>;
}

impl CheckedArithmetic for Decimal {
    #[inline]
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_add(rhs).ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_mul(rhs).ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    fn safe_div(self, rhs: Self) -> ArithmeticResult<Self> {
        if rhs.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        self.checked_div(rhs).ok_or(ArithmeticError::Overflow)
    }
}

/// Converts a percentage into a multiplier: `1 + percent / 100`.
///
/// # Errors
///
/// Returns `ArithmeticError::Overflow` if the result cannot be represented.
///
/// # Examples
///
/// ```
/// use provider_gateway::domain::value_objects::arithmetic::percentage_factor;
/// use rust_decimal::Decimal;
///
/// let factor = percentage_factor(Decimal::new(20, 0)).unwrap();
/// assert_eq!(factor, Decimal::new(12, 1));
/// ```
#[inline]
pub fn percentage_factor(percent: Decimal) -> ArithmeticResult<Decimal> {
    Decimal::ONE.safe_add(percent.safe_div(Decimal::ONE_HUNDRED)?)
}

/// Renders a value with exactly `decimal_places` digits after the point.
///
/// Rounds half away from zero, uses `.` as the decimal separator and no
/// grouping separator. A value that rounds to zero renders unsigned.
///
/// # Examples
///
/// ```
/// use provider_gateway::domain::value_objects::arithmetic::format_fixed;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_fixed(Decimal::new(12345, 3), 2), "12.35");
/// assert_eq!(format_fixed(Decimal::new(1_250_000, 0), 2), "1250000.00");
/// ```
#[must_use]
pub fn format_fixed(value: Decimal, decimal_places: u32) -> String {
    let mut rounded =
        value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded = Decimal::ZERO;
    }
    format!("{:.*}", decimal_places as usize, rounded)
}
