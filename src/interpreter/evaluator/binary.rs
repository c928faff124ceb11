use crate::{
    ast::{BinaryOperator, Position},
    error::RuntimeError,
    interpreter::evaluator::core::EvalResult,
};

/// Applies a binary operator to two already evaluated operands.
///
/// Comparisons yield exactly `1` or `0`. Integer division floors toward
/// negative infinity, so `-7 /i 2` is `-4`. Remainder keeps the sign of the
/// dividend.
///
/// # Errors
/// Returns [`RuntimeError::DivisionByZero`] when either division or the
/// remainder has a zero divisor.
///
/// # Example
/// ```
/// use technologic::{
///     ast::{BinaryOperator, Position},
///     interpreter::evaluator::binary::eval_binary,
/// };
///
/// let position = Position::default();
/// assert_eq!(eval_binary(BinaryOperator::IntDiv, -7.0, 2.0, position).unwrap(), -4.0);
/// assert_eq!(eval_binary(BinaryOperator::Less, 1.0, 2.0, position).unwrap(), 1.0);
/// assert!(eval_binary(BinaryOperator::Mod, 1.0, 0.0, position).is_err());
/// ```
pub fn eval_binary(op: BinaryOperator, left: f64, right: f64, position: Position) -> EvalResult<f64> {
    let result = match op {
        BinaryOperator::Add => left + right,
        BinaryOperator::Sub => left - right,
        BinaryOperator::Mul => left * right,
        BinaryOperator::FloatDiv => checked_divisor(right, position).map(|r| left / r)?,
        BinaryOperator::IntDiv => checked_divisor(right, position).map(|r| (left / r).floor())?,
        BinaryOperator::Mod => checked_divisor(right, position).map(|r| left % r)?,
        BinaryOperator::Equal => truth(left == right),
        BinaryOperator::Less => truth(left < right),
        BinaryOperator::Greater => truth(left > right),
    };
    Ok(result)
}

/// Numeric encoding of a truth value.
#[must_use]
pub const fn truth(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}

fn checked_divisor(divisor: f64, position: Position) -> EvalResult<f64> {
    if divisor == 0.0 {
        return Err(RuntimeError::DivisionByZero { position });
    }
    Ok(divisor)
}
