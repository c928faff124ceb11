use std::iter::Peekable;

use crate::{
    ast::{Node, Position},
    interpreter::lexer::{Operator, Token},
};

/// Wraps an already parsed expression in any postfix unary operators that
/// follow it.
///
/// Operators apply innermost first, so `x turn unlock` returns `-x`.
///
/// Grammar: `unary := expression unary_operator*`
///
/// # Parameters
/// - `tokens`: Token iterator positioned after the expression.
/// - `node`: The expression to wrap.
///
/// # Returns
/// The wrapped expression, or `node` unchanged if no unary operator follows.
pub(crate) fn might_be_unary<'a, I>(tokens: &mut Peekable<I>, mut node: Node) -> Node
    where I: Iterator<Item = &'a (Token, Position)>
{
    while let Some((Token::Operator(Operator::Unary(op)), _)) = tokens.peek() {
        let operator = *op;
        tokens.next();
        node = Node::Unary { operator,
                             operand: Box::new(node) };
    }
    node
}
