use crate::ast::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while tokenizing.
pub enum LexError {
    /// A character that is neither a separator, a word character nor
    /// punctuation.
    UnexpectedCharacter {
        /// The offending text.
        character: String,
        /// Where it was found.
        position:  Position,
    },
    /// A keyword that requires a fixed continuation was followed by something
    /// else.
    BrokenContinuation {
        /// The keyword that started the phrase.
        keyword:  String,
        /// The word that was expected next.
        expected: &'static str,
        /// The word actually found, or `None` at end of input.
        found:    Option<String>,
        /// Where the keyword was found.
        position: Position,
    },
}

impl LexError {
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::UnexpectedCharacter { position, .. } | Self::BrokenContinuation { position, .. } => {
                *position
            },
        }
    }
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedCharacter { character, position } => {
                write!(f, "Error at {position}: Unexpected character '{character}'.")
            },
            Self::BrokenContinuation { keyword,
                                       expected,
                                       found,
                                       position, } => match found {
                Some(found) => write!(f,
                                      "Error at {position}: Keyword '{keyword}' must be followed by '{expected}', found '{found}'."),
                None => write!(f,
                               "Error at {position}: Keyword '{keyword}' must be followed by '{expected}', found end of input."),
            },
        }
    }
}

impl std::error::Error for LexError {}
