use std::iter::Peekable;

use crate::{
    ast::Position,
    error::ParseError,
    interpreter::{
        lexer::{SyntaxWord, Token},
        parser::core::ParseResult,
        vocabulary,
    },
};

/// Checks whether the next token is the given structural word, without
/// consuming it.
pub(in crate::interpreter::parser) fn is_next_syntax<'a, I>(tokens: &mut Peekable<I>,
                                                            word: SyntaxWord)
                                                            -> bool
    where I: Iterator<Item = &'a (Token, Position)>
{
    matches!(tokens.peek(), Some((Token::Syntax(w), _)) if *w == word)
}

/// Consumes the given structural word.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the expected word.
/// - `word`: The required word.
/// - `fallback`: Position reported if the input ends.
///
/// # Errors
/// Returns a `ParseError` if the next token is anything else or the input
/// ends.
pub(in crate::interpreter::parser) fn expect_syntax<'a, I>(tokens: &mut Peekable<I>,
                                                           word: SyntaxWord,
                                                           fallback: Position)
                                                           -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, Position)>
{
    match tokens.next() {
        Some((Token::Syntax(w), _)) if *w == word => Ok(()),
        Some((tok, position)) => Err(ParseError::ExpectedWord { expected: word.word(),
                                                                found:    tok.to_string(),
                                                                position: *position, }),
        None => Err(ParseError::UnexpectedEndOfInput { position: fallback }),
    }
}

/// Consumes the given punctuation character.
///
/// # Errors
/// Returns a `ParseError` if the next token is anything else or the input
/// ends.
pub(in crate::interpreter::parser) fn expect_punctuation<'a, I>(tokens: &mut Peekable<I>,
                                                                punctuation: char,
                                                                fallback: Position)
                                                                -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, Position)>
{
    match tokens.next() {
        Some((Token::Punctuation(c), _)) if *c == punctuation => Ok(()),
        Some((tok, position)) => {
            Err(ParseError::UnexpectedToken { token:    format!("expected '{punctuation}', found {tok}"),
                                              position: *position, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { position: fallback }),
    }
}

/// Parses a plain variable word and returns its name.
///
/// The next token must be `Token::Variable`; any word with a meaning in the
/// language is rejected as reserved.
///
/// # Errors
/// Returns a `ParseError` if the next token is not a variable word or the
/// input ends.
pub(in crate::interpreter::parser) fn parse_variable_name<'a, I>(tokens: &mut Peekable<I>,
                                                                 fallback: Position)
                                                                 -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, Position)>
{
    match tokens.next() {
        Some((Token::Variable(name), _)) if vocabulary::is_variable_name(name) => Ok(name.clone()),
        Some((tok, position)) => Err(ParseError::ReservedWord { word:     tok.to_string(),
                                                                position: *position, }),
        None => Err(ParseError::UnexpectedEndOfInput { position: fallback }),
    }
}
