use std::iter::Peekable;

use crate::{
    ast::{Node, Position},
    error::ParseError,
    interpreter::{
        lexer::{SyntaxWord, Token},
        parser::{
            core::{ParseResult, parse_value_expression},
            function::parse_function_form,
            unary::might_be_unary,
            utils::{expect_syntax, parse_variable_name},
        },
        vocabulary::{self, DECIMAL_POINT},
    },
};

/// Parses an atom, the smallest unit of an expression.
///
/// Atoms include:
/// - numbers assembled from consecutive digit words
/// - `name … rename` variable references
/// - `zip … unzip` grouped sub-expressions
/// - `use ( … ) name code|call` function headers
/// - keywords, labels and expression keywords, passed through verbatim
///
/// A bare word is only accepted inside an argument list, where it stands for
/// a variable placeholder.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of an atom.
/// - `in_argument_list`: Whether bare words are accepted.
/// - `fallback`: Position reported if the input has already ended.
///
/// # Returns
/// The parsed [`Node`] or a `ParseError` on failure.
pub(crate) fn parse_atom<'a, I>(tokens: &mut Peekable<I>,
                                in_argument_list: bool,
                                fallback: Position)
                                -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let (token, position) =
        tokens.next()
              .ok_or(ParseError::UnexpectedEndOfInput { position: fallback })?;
    let position = *position;

    match token {
        Token::Syntax(SyntaxWord::Zip) => parse_grouping(tokens, position),
        Token::Syntax(SyntaxWord::Use) => parse_function_form(tokens, position),
        Token::Syntax(SyntaxWord::Name) => parse_variable_reference(tokens, position),
        Token::Digit(first) => parse_number(tokens, *first, position),
        Token::Keyword(keyword) => Ok(Node::Keyword(*keyword)),
        Token::Label => Ok(Node::Label),
        Token::ExpressionKeyword(keyword) => Ok(Node::ExpressionKeyword(*keyword)),
        Token::Variable(word) if !vocabulary::is_variable_name(word) => {
            Err(ParseError::ReservedWord { word: word.clone(),
                                           position })
        },
        Token::Variable(word) if in_argument_list => Ok(Node::VariableRef(word.clone())),
        Token::Variable(word) => Err(ParseError::UnresolvedVariable { word: word.clone(),
                                                                      position }),
        tok => Err(ParseError::UnexpectedToken { token: tok.to_string(),
                                                 position }),
    }
}

/// Parses an atom that must produce a value, as required on the right of a
/// binary operator.
///
/// # Errors
/// Returns [`ParseError::ExpectedValue`] if the atom is a marker.
pub(crate) fn parse_operand<'a, I>(tokens: &mut Peekable<I>,
                                   in_argument_list: bool,
                                   fallback: Position)
                                   -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let position = tokens.peek().map_or(fallback, |(_, p)| *p);
    let atom = parse_atom(tokens, in_argument_list, fallback)?;

    if atom.is_marker() {
        return Err(ParseError::ExpectedValue { found: atom.to_string(),
                                               position });
    }
    Ok(atom)
}

/// Parses a grouped expression of the form `zip <expression> unzip`.
///
/// Postfix unary operators after `unzip` apply to the group, also when it is
/// the right operand of a binary operator.
///
/// # Errors
/// Returns a `ParseError` if the inner expression fails to parse or the
/// closing `unzip` is missing.
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>, position: Position) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let inner = parse_value_expression(tokens, false, position)?;
    expect_syntax(tokens, SyntaxWord::Unzip, position)?;
    Ok(might_be_unary(tokens, inner))
}

/// Parses a variable reference of the form `name <word> rename`.
///
/// # Errors
/// Returns a `ParseError` if the word is reserved or `rename` is missing.
fn parse_variable_reference<'a, I>(tokens: &mut Peekable<I>,
                                   position: Position)
                                   -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)>
{
    let name = parse_variable_name(tokens, position)?;
    expect_syntax(tokens, SyntaxWord::Rename, position)?;
    Ok(Node::VariableRef(name))
}

/// Assembles consecutive digit words into one decimal number.
///
/// Each digit word contributes its positional value; the word with value 10
/// contributes the decimal point.
///
/// # Errors
/// Returns [`ParseError::MalformedNumber`] if the digits do not form a
/// number, such as when two decimal points appear.
fn parse_number<'a, I>(tokens: &mut Peekable<I>, first: u8, position: Position) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)>
{
    let mut digits = String::new();
    push_digit(&mut digits, first);

    while let Some((Token::Digit(digit), _)) = tokens.peek() {
        let digit = *digit;
        tokens.next();
        push_digit(&mut digits, digit);
    }

    digits.parse::<f64>()
          .map(Node::NumberLiteral)
          .map_err(|_| ParseError::MalformedNumber { digits, position })
}

fn push_digit(digits: &mut String, digit: u8) {
    if digit == DECIMAL_POINT {
        digits.push('.');
    } else {
        digits.push(char::from(b'0' + digit));
    }
}
