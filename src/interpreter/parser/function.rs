use std::iter::Peekable;

use crate::{
    ast::{Node, Position},
    error::ParseError,
    interpreter::{
        lexer::{SyntaxWord, Token},
        parser::{
            core::{ParseResult, parse_value_expression},
            utils::expect_punctuation,
        },
        vocabulary,
    },
};

/// Parses a function header following `use`.
///
/// Syntax:
/// ```text
///     use ( <arg> [bring|plug] <arg> [bring|plug] ... ) <name> code
///     use ( <arg> [bring|plug] <arg> [bring|plug] ... ) <name> call
/// ```
/// With `code` the header defines a function and every argument must be a
/// plain, distinct name. With `call` the arguments are full expressions
/// evaluated by the caller.
///
/// # Parameters
/// - `tokens`: Token stream positioned after `use`.
/// - `position`: Position of the `use` token.
///
/// # Returns
/// A [`Node::FunctionDefinition`] or a [`Node::FunctionCall`].
///
/// # Errors
/// - `UnexpectedToken` if the argument list does not open with `(`.
/// - `InvalidFunctionDefinition` if the name is not an identifier, the
///   header does not end in `code` or `call`, or a parameter is not a plain
///   name.
pub(in crate::interpreter::parser) fn parse_function_form<'a, I>(tokens: &mut Peekable<I>,
                                                                 position: Position)
                                                                 -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    expect_punctuation(tokens, '(', position)?;
    let args = parse_argument_list(tokens, position)?;

    let name = match tokens.next() {
        Some((Token::Variable(name), _)) if vocabulary::is_variable_name(name) => name.clone(),
        Some((tok, _)) => {
            return Err(ParseError::InvalidFunctionDefinition { details:
                                                                   format!("the function name must be an identifier, found {tok}"),
                                                               position });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { position }),
    };

    match tokens.next() {
        Some((Token::Syntax(SyntaxWord::Code), _)) => {
            let params = into_parameters(args, position)?;
            Ok(Node::FunctionDefinition { name, params })
        },
        Some((Token::Syntax(SyntaxWord::Call), _)) => Ok(Node::FunctionCall { name, args }),
        Some((tok, _)) => Err(ParseError::InvalidFunctionDefinition { details:
                                                                          format!("the header must end with 'code it' or 'call it', found {tok}"),
                                                                      position }),
        None => Err(ParseError::UnexpectedEndOfInput { position }),
    }
}

/// Parses arguments up to and including the closing `)`.
///
/// Each argument is a full expression in which bare words are accepted as
/// placeholders. `bring` and `plug` may follow any argument as separators.
fn parse_argument_list<'a, I>(tokens: &mut Peekable<I>, position: Position) -> ParseResult<Vec<Node>>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let mut args = Vec::new();

    loop {
        match tokens.peek() {
            Some((Token::Punctuation(')'), _)) => {
                tokens.next();
                return Ok(args);
            },
            Some(_) => {},
            None => return Err(ParseError::UnexpectedEndOfInput { position }),
        }

        args.push(parse_value_expression(tokens, true, position)?);

        if let Some((Token::Syntax(SyntaxWord::Bring | SyntaxWord::Plug), _)) = tokens.peek() {
            tokens.next();
        }
    }
}

/// Turns definition arguments into parameter names.
fn into_parameters(args: Vec<Node>, position: Position) -> ParseResult<Vec<String>> {
    let mut params: Vec<String> = Vec::with_capacity(args.len());

    for arg in args {
        match arg {
            Node::VariableRef(name) if params.contains(&name) => {
                return Err(ParseError::InvalidFunctionDefinition { details:
                                                                       format!("parameter '{name}' appears twice"),
                                                                   position });
            },
            Node::VariableRef(name) => params.push(name),
            other => {
                return Err(ParseError::InvalidFunctionDefinition { details:
                                                                       format!("parameter '{other}' is not a plain name"),
                                                                   position });
            },
        }
    }

    Ok(params)
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::{BinaryOperator, Node},
        error::ParseError,
        interpreter::{lexer::tokenize, parser::core::parse_program},
    };

    fn parse_one(source: &str) -> Result<Node, ParseError> {
        let program = parse_program(&tokenize(source).unwrap())?;
        Ok(program.instructions[0].node.clone())
    }

    #[test]
    fn definition_collects_parameter_names() {
        assert_eq!(parse_one("use it (a bring it b) add code it").unwrap(),
                   Node::FunctionDefinition { name:   "add".to_string(),
                                              params: vec!["a".to_string(), "b".to_string()], });
    }

    #[test]
    fn naming_form_is_accepted_as_a_parameter() {
        assert_eq!(parse_one("use (name it n rename it) f code").unwrap(),
                   Node::FunctionDefinition { name:   "f".to_string(),
                                              params: vec!["n".to_string()], });
    }

    #[test]
    fn call_arguments_are_expressions() {
        assert_eq!(parse_one("use (watch touch view plug it click) add call it").unwrap(),
                   Node::FunctionCall { name: "add".to_string(),
                                        args: vec![Node::Binary { operator:
                                                                      BinaryOperator::Add,
                                                                  left:
                                                                      Box::new(Node::NumberLiteral(2.0)),
                                                                  right:
                                                                      Box::new(Node::NumberLiteral(3.0)), },
                                                   Node::NumberLiteral(1.0)], });
    }

    #[test]
    fn bare_call_argument_is_a_variable_placeholder() {
        assert_eq!(parse_one("use (x) f call").unwrap(),
                   Node::FunctionCall { name: "f".to_string(),
                                        args: vec![Node::VariableRef("x".to_string())], });
    }

    #[test]
    fn empty_argument_list() {
        assert_eq!(parse_one("use () f call").unwrap(),
                   Node::FunctionCall { name: "f".to_string(),
                                        args: Vec::new(), });
    }

    #[test]
    fn numbers_are_not_parameters() {
        assert!(matches!(parse_one("use (click) f code"),
                         Err(ParseError::InvalidFunctionDefinition { .. })));
    }

    #[test]
    fn duplicate_parameters_are_rejected() {
        assert!(matches!(parse_one("use (a bring a) f code"),
                         Err(ParseError::InvalidFunctionDefinition { .. })));
    }

    #[test]
    fn header_needs_code_or_call() {
        assert!(matches!(parse_one("use (a) f send"),
                         Err(ParseError::InvalidFunctionDefinition { .. })));
    }

    #[test]
    fn function_name_must_be_an_identifier() {
        assert!(matches!(parse_one("use (a) print code"),
                         Err(ParseError::InvalidFunctionDefinition { .. })));
        assert!(matches!(parse_one("use (a) drop code"),
                         Err(ParseError::InvalidFunctionDefinition { .. })));
    }

    #[test]
    fn header_requires_parentheses() {
        assert!(matches!(parse_one("use a bring f code"), Err(ParseError::UnexpectedToken { .. })));
    }
}
