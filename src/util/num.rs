use crate::{ast::Position, error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Safely converts an `f64` to a `usize` index if the value is finite,
/// non-negative, within range and not fractional.
///
/// ## Errors
/// Returns `RuntimeError::InvalidIndex` for any value that is not an exact
/// non-negative integer.
///
/// ## Example
/// ```
/// use technologic::{ast::Position, error::RuntimeError, util::num::f64_to_usize_checked};
///
/// let position = Position::new(3, 1);
/// assert_eq!(f64_to_usize_checked(7.0, position).unwrap(), 7);
///
/// let err = f64_to_usize_checked(-1.0, position).unwrap_err();
/// assert!(matches!(err, RuntimeError::InvalidIndex { .. }));
///
/// let err = f64_to_usize_checked(1.5, position).unwrap_err();
/// assert!(matches!(err, RuntimeError::InvalidIndex { .. }));
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
#[allow(clippy::cast_sign_loss)]
pub fn f64_to_usize_checked(value: f64, position: Position) -> EvalResult<usize> {
    if !value.is_finite() || value < 0.0 || value > MAX_SAFE_U64_INT as f64 || value.fract() != 0.0
    {
        return Err(RuntimeError::InvalidIndex { value, position });
    }

    usize::try_from(value as u64).map_err(|_| RuntimeError::InvalidIndex { value, position })
}

/// Converts a numeric character code into a `char`.
///
/// ## Errors
/// Returns `RuntimeError::InvalidCharacter` if the value is not an integer, or
/// is not a Unicode scalar value.
///
/// ## Example
/// ```
/// use technologic::{ast::Position, util::num::f64_to_char_checked};
///
/// assert_eq!(f64_to_char_checked(65.0, Position::default()).unwrap(), 'A');
/// assert!(f64_to_char_checked(65.5, Position::default()).is_err());
/// assert!(f64_to_char_checked(-1.0, Position::default()).is_err());
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
pub fn f64_to_char_checked(value: f64, position: Position) -> EvalResult<char> {
    if !value.is_finite() || value < 0.0 || value > f64::from(u32::MAX) || value.fract() != 0.0 {
        return Err(RuntimeError::InvalidCharacter { value, position });
    }

    char::from_u32(value as u32).ok_or(RuntimeError::InvalidCharacter { value, position })
}

/// Renders a number the way `send` writes it.
///
/// Integral values are written without a fractional part.
///
/// ## Example
/// ```
/// use technologic::util::num::format_number;
///
/// assert_eq!(format_number(5.0), "5");
/// assert_eq!(format_number(-4.0), "-4");
/// assert_eq!(format_number(2.5), "2.5");
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE_U64_INT as f64 {
        return format!("{}", value as i64);
    }

    format!("{value}")
}
