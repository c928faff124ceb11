use crate::ast::Position;

#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur while running a program.
///
/// Every variant records the position of the instruction being executed when
/// the fault happened.
pub enum RuntimeError {
    /// A keyword consumed the last-expression register before anything was
    /// evaluated.
    MissingValue {
        /// The consuming keyword.
        keyword:  &'static str,
        /// The source position.
        position: Position,
    },
    /// A keyword that reads the node after it found nothing usable there.
    MissingOperand {
        /// The keyword.
        keyword:  &'static str,
        /// The source position.
        position: Position,
    },
    /// No `break` closes an opening marker before the end of the program.
    UnmatchedMarker {
        /// The opening marker.
        marker:   String,
        /// The source position.
        position: Position,
    },
    /// A `break` or `leave` has no enclosing construct to close.
    OrphanBreak {
        /// The closing keyword.
        keyword:  &'static str,
        /// The source position.
        position: Position,
    },
    /// A `lock` or `start` is not followed by a condition and `check`.
    MalformedLoop {
        /// The loop keyword.
        keyword:  &'static str,
        /// The source position.
        position: Position,
    },
    /// Tried to read a variable that was never written.
    UnknownVariable {
        /// The name of the variable.
        name:     String,
        /// The source position.
        position: Position,
    },
    /// Called a function whose definition has not been reached.
    UnknownFunction {
        /// The name of the function.
        name:     String,
        /// The source position.
        position: Position,
    },
    /// The wrong number of arguments was supplied to a function.
    ArgumentCountMismatch {
        /// The name of the function.
        name:     String,
        /// Number of formal parameters.
        expected: usize,
        /// Number of arguments supplied.
        found:    usize,
        /// The source position.
        position: Position,
    },
    /// Popped from an empty value stack.
    StackUnderflow {
        /// The source position.
        position: Position,
    },
    /// Indexed past the bottom of the value stack.
    StackIndexOutOfBounds {
        /// The requested index, counted from the top.
        index:    usize,
        /// The number of values on the stack.
        depth:    usize,
        /// The source position.
        position: Position,
    },
    /// Jumped to a label that does not exist.
    LabelOutOfRange {
        /// The requested 1-based label index.
        index:    usize,
        /// The number of labels in the program.
        labels:   usize,
        /// The source position.
        position: Position,
    },
    /// A value used as an index was negative, fractional or not finite.
    InvalidIndex {
        /// The offending value.
        value:    f64,
        /// The source position.
        position: Position,
    },
    /// `write`, `scan` or `press` was not followed by a variable reference.
    ExpectedVariableName {
        /// The keyword needing the name.
        keyword:  &'static str,
        /// The source position.
        position: Position,
    },
    /// The input source has no more lines.
    InputExhausted {
        /// The source position.
        position: Position,
    },
    /// An input line could not be read as a number.
    InvalidInput {
        /// The line as read.
        line:     String,
        /// The source position.
        position: Position,
    },
    /// `print` was given a value that is not a character code.
    InvalidCharacter {
        /// The offending value.
        value:    f64,
        /// The source position.
        position: Position,
    },
    /// Attempted division or remainder by zero.
    DivisionByZero {
        /// The source position.
        position: Position,
    },
    /// `unlock` was evaluated with no active call.
    ReturnOutsideFunction {
        /// The source position.
        position: Position,
    },
    /// A marker node was evaluated as a value.
    NotAValue {
        /// The marker found.
        found:    String,
        /// The source position.
        position: Position,
    },
    /// Too many nested calls.
    CallDepthExceeded {
        /// The configured limit.
        limit:    usize,
        /// The source position.
        position: Position,
    },
    /// A called function kept executing past the end of the program.
    RanOffEnd {
        /// The function being executed.
        name:     String,
        /// The source position.
        position: Position,
    },
    /// Writing output or reading input failed.
    Io {
        /// The underlying error message.
        details:  String,
        /// The source position.
        position: Position,
    },
}

impl RuntimeError {
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::MissingValue { position, .. }
            | Self::MissingOperand { position, .. }
            | Self::UnmatchedMarker { position, .. }
            | Self::OrphanBreak { position, .. }
            | Self::MalformedLoop { position, .. }
            | Self::UnknownVariable { position, .. }
            | Self::UnknownFunction { position, .. }
            | Self::ArgumentCountMismatch { position, .. }
            | Self::StackUnderflow { position }
            | Self::StackIndexOutOfBounds { position, .. }
            | Self::LabelOutOfRange { position, .. }
            | Self::InvalidIndex { position, .. }
            | Self::ExpectedVariableName { position, .. }
            | Self::InputExhausted { position }
            | Self::InvalidInput { position, .. }
            | Self::InvalidCharacter { position, .. }
            | Self::DivisionByZero { position }
            | Self::ReturnOutsideFunction { position }
            | Self::NotAValue { position, .. }
            | Self::CallDepthExceeded { position, .. }
            | Self::RanOffEnd { position, .. }
            | Self::Io { position, .. } => *position,
        }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingValue { keyword, position } => write!(f,
                                                               "Error at {position}: '{keyword}' used without a previously evaluated expression."),
            Self::MissingOperand { keyword, position } => write!(f,
                                                                 "Error at {position}: '{keyword}' must be followed by an expression."),
            Self::UnmatchedMarker { marker, position } => {
                write!(f, "Error at {position}: Unmatched break: nothing closes '{marker}'.")
            },
            Self::OrphanBreak { keyword, position } => {
                write!(f, "Error at {position}: '{keyword}' has no enclosing construct to close.")
            },
            Self::MalformedLoop { keyword, position } => write!(f,
                                                                "Error at {position}: '{keyword}' must be followed by a condition and 'check'."),
            Self::UnknownVariable { name, position } => {
                write!(f, "Error at {position}: Unknown variable '{name}'.")
            },
            Self::UnknownFunction { name, position } => write!(f,
                                                               "Error at {position}: Unknown function '{name}'. Functions must be defined before they are called."),
            Self::ArgumentCountMismatch { name,
                                          expected,
                                          found,
                                          position, } => write!(f,
                                                                "Error at {position}: Function '{name}' takes {expected} argument(s), but {found} were supplied."),
            Self::StackUnderflow { position } => {
                write!(f, "Error at {position}: Value stack is empty.")
            },
            Self::StackIndexOutOfBounds { index,
                                          depth,
                                          position, } => write!(f,
                                                                "Error at {position}: Stack index {index} is out of bounds for a stack of {depth} value(s)."),
            Self::LabelOutOfRange { index,
                                    labels,
                                    position, } => write!(f,
                                                          "Error at {position}: Label {index} does not exist; the program has {labels} label(s)."),
            Self::InvalidIndex { value, position } => write!(f,
                                                             "Error at {position}: {value} is not a valid index. Indices are non-negative integers."),
            Self::ExpectedVariableName { keyword, position } => write!(f,
                                                                       "Error at {position}: '{keyword}' must be followed by a variable: name it, <variable>, rename it"),
            Self::InputExhausted { position } => {
                write!(f, "Error at {position}: No more input to read.")
            },
            Self::InvalidInput { line, position } => {
                write!(f, "Error at {position}: Input '{line}' is not a number.")
            },
            Self::InvalidCharacter { value, position } => {
                write!(f, "Error at {position}: {value} is not a character code.")
            },
            Self::DivisionByZero { position } => {
                write!(f, "Error at {position}: Division by zero.")
            },
            Self::ReturnOutsideFunction { position } => {
                write!(f, "Error at {position}: Return outside of a function call.")
            },
            Self::NotAValue { found, position } => {
                write!(f, "Error at {position}: '{found}' does not produce a value.")
            },
            Self::CallDepthExceeded { limit, position } => write!(f,
                                                                  "Error at {position}: Call depth exceeded the limit of {limit}."),
            Self::RanOffEnd { name, position } => write!(f,
                                                         "Error at {position}: Function '{name}' ran past the end of the program without returning."),
            Self::Io { details, position } => {
                write!(f, "Error at {position}: I/O failure: {details}.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
