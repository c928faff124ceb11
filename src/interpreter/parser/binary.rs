use std::iter::Peekable;

use crate::{
    ast::{Node, Position},
    interpreter::{
        lexer::{Operator, Token},
        parser::{core::ParseResult, primary::parse_operand},
    },
};

/// Extends `left` with binary operators binding tighter than
/// `min_precedence`.
///
/// Standard precedence climbing: when the next operator's precedence is
/// above the threshold it is consumed, its right-hand side is parsed at the
/// operator's own precedence, and the loop continues at the outer threshold.
/// Operators of equal precedence therefore associate to the left, while a
/// tighter operator on the right groups with the right operand.
///
/// Grammar: `binary := operand (binary_operator operand)*`
///
/// # Parameters
/// - `tokens`: Token iterator positioned after `left`.
/// - `left`: The already parsed left operand.
/// - `min_precedence`: Operators must bind tighter than this to be absorbed.
/// - `in_argument_list`: Whether bare words are accepted as placeholders.
/// - `fallback`: Position reported if the input ends early.
///
/// # Returns
/// The resulting expression tree.
pub(crate) fn might_be_binary<'a, I>(tokens: &mut Peekable<I>,
                                     mut left: Node,
                                     min_precedence: u8,
                                     in_argument_list: bool,
                                     fallback: Position)
                                     -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    while let Some((Token::Operator(Operator::Binary(op)), position)) = tokens.peek() {
        let (operator, position) = (*op, *position);
        if operator.precedence() <= min_precedence {
            break;
        }
        tokens.next();

        let operand = parse_operand(tokens, in_argument_list, position)?;
        let right =
            might_be_binary(tokens, operand, operator.precedence(), in_argument_list, fallback)?;

        left = Node::Binary { operator,
                              left: Box::new(left),
                              right: Box::new(right) };
    }

    Ok(left)
}
