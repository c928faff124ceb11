use crate::{ast::UnaryOperator, interpreter::evaluator::binary::truth};

/// Applies one of the pure unary operators.
///
/// `Negate` flips the sign and `Not` yields `1` for zero and `0` for anything
/// else. `Paste` and `Return` touch interpreter state and never reach this
/// function; they pass the operand through unchanged.
///
/// # Example
/// ```
/// use technologic::{ast::UnaryOperator, interpreter::evaluator::unary::eval_unary};
///
/// assert_eq!(eval_unary(UnaryOperator::Negate, 5.0), -5.0);
/// assert_eq!(eval_unary(UnaryOperator::Not, 0.0), 1.0);
/// assert_eq!(eval_unary(UnaryOperator::Not, 3.0), 0.0);
/// ```
#[must_use]
pub fn eval_unary(op: UnaryOperator, value: f64) -> f64 {
    match op {
        UnaryOperator::Negate => -value,
        UnaryOperator::Not => truth(value == 0.0),
        UnaryOperator::Paste | UnaryOperator::Return => value,
    }
}
