/// Lexing errors.
///
/// Raised while turning source characters into tokens: characters outside the
/// language's alphabet and fixed keyword continuations that are not honoured.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while building the flat program from
/// tokens. Parse errors include unexpected tokens, unterminated bracket forms,
/// malformed function headers and malformed number literals.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while executing a program.
/// Runtime errors include unmatched control-flow markers, stack underflow,
/// unknown variables and functions, and failed input or output.
pub mod runtime_error;

pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
