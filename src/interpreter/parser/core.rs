use std::iter::Peekable;

use crate::{
    ast::{Instruction, Node, Position, Program},
    error::ParseError,
    interpreter::{
        lexer::{SyntaxWord, Token},
        parser::{
            binary::might_be_binary, primary::parse_atom, unary::might_be_unary,
            utils::is_next_syntax,
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a whole token stream into the flat program.
///
/// Every statement becomes exactly one instruction, tagged with the position
/// of its first token. Parsing continues until the tokens run out.
///
/// # Errors
/// Returns the first [`ParseError`] met.
///
/// # Example
/// ```
/// use technologic::{
///     ast::{Keyword, Node},
///     interpreter::{lexer::tokenize, parser::core::parse_program},
/// };
///
/// let tokens = tokenize("view it, send it").unwrap();
/// let program = parse_program(&tokens).unwrap();
/// assert_eq!(program.node(0), Some(&Node::NumberLiteral(3.0)));
/// assert_eq!(program.node(1), Some(&Node::Keyword(Keyword::Send)));
/// ```
pub fn parse_program(tokens: &[(Token, Position)]) -> ParseResult<Program> {
    let mut iter = tokens.iter().peekable();
    let mut instructions = Vec::new();

    while let Some((_, position)) = iter.peek() {
        let position = *position;
        let node = parse_expression(&mut iter, false, position)?;
        instructions.push(Instruction { node, position });
    }

    Ok(Program::new(instructions))
}

/// Parses one expression or marker.
///
/// An atom is read first. Markers (keywords, labels and function
/// definitions) stand alone; anything else may absorb binary operators and
/// then postfix unary operators. A trailing `format` is consumed and
/// dropped.
///
/// Grammar: `expression := atom binary* unary* "format"?`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, Position)` pairs.
/// - `in_argument_list`: Whether bare words are accepted as placeholders.
/// - `fallback`: Position reported if the input ends early.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>,
                               in_argument_list: bool,
                               fallback: Position)
                               -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let atom = parse_atom(tokens, in_argument_list, fallback)?;

    let node = if atom.is_marker() {
        atom
    } else {
        let node = might_be_binary(tokens, atom, 0, in_argument_list, fallback)?;
        might_be_unary(tokens, node)
    };

    if is_next_syntax(tokens, SyntaxWord::Format) {
        tokens.next();
    }

    Ok(node)
}

/// Parses an expression that must produce a value.
///
/// # Errors
/// Returns [`ParseError::ExpectedValue`] if the expression is a marker.
pub fn parse_value_expression<'a, I>(tokens: &mut Peekable<I>,
                                     in_argument_list: bool,
                                     fallback: Position)
                                     -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let position = tokens.peek().map_or(fallback, |(_, p)| *p);
    let node = parse_expression(tokens, in_argument_list, fallback)?;

    if node.is_marker() {
        return Err(ParseError::ExpectedValue { found: node.to_string(),
                                               position });
    }
    Ok(node)
}
