use crate::ast::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during parsing.
pub enum ParseError {
    /// Found an unexpected token while parsing.
    UnexpectedToken {
        /// The token encountered.
        token:    String,
        /// Where the token was found.
        position: Position,
    },
    /// Reached the end of input unexpectedly.
    UnexpectedEndOfInput {
        /// Position of the last token read.
        position: Position,
    },
    /// A structural word was required but something else was found.
    ExpectedWord {
        /// The word that was required.
        expected: &'static str,
        /// What was found instead.
        found:    String,
        /// Where the mismatch occurred.
        position: Position,
    },
    /// A bare word appeared where only a `name … rename` reference is allowed.
    UnresolvedVariable {
        /// The bare word.
        word:     String,
        /// Where the word was found.
        position: Position,
    },
    /// A word with meaning in the language was used as a variable or
    /// function name.
    ReservedWord {
        /// The reserved token, as displayed.
        word:     String,
        /// Where the word was found.
        position: Position,
    },
    /// A marker (keyword, label or function definition) appeared where a
    /// value is required.
    ExpectedValue {
        /// The marker found.
        found:    String,
        /// Where the marker was found.
        position: Position,
    },
    /// The function header syntax was invalid.
    InvalidFunctionDefinition {
        /// What was wrong with it.
        details:  String,
        /// Where the header starts.
        position: Position,
    },
    /// A run of digit words did not form a decimal number.
    MalformedNumber {
        /// The digits as read, with `.` for each decimal point word.
        digits:   String,
        /// Where the number starts.
        position: Position,
    },
}

impl ParseError {
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::UnexpectedToken { position, .. }
            | Self::UnexpectedEndOfInput { position }
            | Self::ExpectedWord { position, .. }
            | Self::UnresolvedVariable { position, .. }
            | Self::ReservedWord { position, .. }
            | Self::ExpectedValue { position, .. }
            | Self::InvalidFunctionDefinition { position, .. }
            | Self::MalformedNumber { position, .. } => *position,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { token, position } => {
                write!(f, "Error at {position}: Unexpected token: {token}.")
            },

            Self::UnexpectedEndOfInput { position } => {
                write!(f, "Error at {position}: Unexpected end of input.")
            },

            Self::ExpectedWord { expected,
                                 found,
                                 position, } => {
                write!(f, "Error at {position}: Expected '{expected}', found {found}.")
            },

            Self::UnresolvedVariable { word, position } => write!(f,
                                                                  "Error at {position}: Unexpected identifier '{word}'. Variables are referenced as: name it, {word}, rename it"),

            Self::ReservedWord { word, position } => {
                write!(f, "Error at {position}: {word} is reserved and cannot name anything.")
            },

            Self::ExpectedValue { found, position } => {
                write!(f, "Error at {position}: Expected a value, found marker '{found}'.")
            },

            Self::InvalidFunctionDefinition { details, position } => write!(f,
                                                                            "Error at {position}: Invalid function header: {details}. Example: use it (a bring it b) add code it"),

            Self::MalformedNumber { digits, position } => {
                write!(f, "Error at {position}: '{digits}' is not a valid number.")
            },
        }
    }
}

impl std::error::Error for ParseError {}
