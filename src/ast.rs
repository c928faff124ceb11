use std::fmt;

/// A location in the source text, tracked from lexing onwards.
///
/// Lines and columns are both 1-based. Columns count bytes from the start of
/// the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Source line.
    pub line:   usize,
    /// Source column.
    pub column: usize,
}

impl Position {
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Operators taking two operands.
///
/// Each operator carries a fixed precedence used by the precedence-climbing
/// parser. Higher numbers bind tighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// `touch`
    Add,
    /// `trash`
    Sub,
    /// `cross`
    Mul,
    /// `cut`
    FloatDiv,
    /// `crack`
    IntDiv,
    /// `rip`
    Mod,
    /// `drag and drop`
    Equal,
    /// `pay`, `buy`
    Less,
    /// `charge`
    Greater,
}

impl BinaryOperator {
    /// Returns the binding strength of the operator.
    ///
    /// ```
    /// use technologic::ast::BinaryOperator;
    ///
    /// assert!(BinaryOperator::Mul.precedence() > BinaryOperator::Add.precedence());
    /// assert!(BinaryOperator::Add.precedence() > BinaryOperator::Sub.precedence());
    /// ```
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Equal => 1,
            Self::Less | Self::Greater => 7,
            Self::Sub => 10,
            Self::Add => 15,
            Self::Mul | Self::Mod => 20,
            Self::FloatDiv | Self::IntDiv => 25,
        }
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::FloatDiv => "/f",
            Self::IntDiv => "/i",
            Self::Mod => "%",
            Self::Equal => "==",
            Self::Less => "<",
            Self::Greater => ">",
        }
    }
}

/// Postfix operators taking a single operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// `turn`: arithmetic negation.
    Negate,
    /// `switch`: 1 for zero, 0 for anything else.
    Not,
    /// `paste`: pushes the operand onto the value stack and yields it.
    Paste,
    /// `unlock`: returns the operand from the current function.
    Return,
}

impl UnaryOperator {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Negate => "-",
            Self::Not => "!",
            Self::Paste => "paste",
            Self::Return => "return",
        }
    }
}

/// Bare statement and control-flow markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Print,
    Send,
    Scroll,
    Save,
    Load,
    Change,
    Write,
    Scan,
    Press,
    Burn,
    Check,
    Fix,
    Jam,
    Lock,
    Start,
    Break,
    Leave,
    Find,
}

impl Keyword {
    /// The source word spelling this keyword.
    #[must_use]
    pub const fn word(self) -> &'static str {
        match self {
            Self::Print => "print",
            Self::Send => "send",
            Self::Scroll => "scroll",
            Self::Save => "save",
            Self::Load => "load",
            Self::Change => "change",
            Self::Write => "write",
            Self::Scan => "scan",
            Self::Press => "press",
            Self::Burn => "burn",
            Self::Check => "check",
            Self::Fix => "fix",
            Self::Jam => "jam",
            Self::Lock => "lock",
            Self::Start => "start",
            Self::Break => "break",
            Self::Leave => "leave",
            Self::Find => "find",
        }
    }

    /// Whether this keyword separates the true and false branches of a
    /// conditional.
    #[must_use]
    pub const fn is_else_marker(self) -> bool {
        matches!(self, Self::Fix | Self::Jam)
    }

    /// Whether this keyword turns the `check` two nodes later into a loop
    /// guard.
    #[must_use]
    pub const fn is_loop_marker(self) -> bool {
        matches!(self, Self::Lock | Self::Start)
    }
}

/// Keywords that produce a value when evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpressionKeyword {
    /// `fax`: pops the value stack.
    Pop,
}

impl ExpressionKeyword {
    #[must_use]
    pub const fn word(self) -> &'static str {
        match self {
            Self::Pop => "fax",
        }
    }
}

/// One element of the flat program.
///
/// Expressions nest through `Binary` and `Unary`, but statement structure
/// never does: conditionals, loops and function bodies are delimited by
/// marker keywords appearing in the flat sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    NumberLiteral(f64),
    VariableRef(String),
    Binary {
        operator: BinaryOperator,
        left:     Box<Self>,
        right:    Box<Self>,
    },
    Unary {
        operator: UnaryOperator,
        operand:  Box<Self>,
    },
    Keyword(Keyword),
    Label,
    FunctionDefinition {
        name:   String,
        params: Vec<String>,
    },
    FunctionCall {
        name: String,
        args: Vec<Self>,
    },
    ExpressionKeyword(ExpressionKeyword),
}

impl Node {
    /// Whether the node is a structural marker rather than a value.
    #[must_use]
    pub const fn is_marker(&self) -> bool {
        matches!(self, Self::Keyword(_) | Self::Label | Self::FunctionDefinition { .. })
    }

    /// Whether the node is the given keyword.
    #[must_use]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        matches!(self, Self::Keyword(k) if *k == keyword)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NumberLiteral(n) => write!(f, "{n}"),
            Self::VariableRef(name) => write!(f, "{name}"),
            Self::Binary { operator,
                           left,
                           right, } => write!(f, "({left} {} {right})", operator.symbol()),
            Self::Unary { operator, operand } => write!(f, "{}({operand})", operator.symbol()),
            Self::Keyword(keyword) => write!(f, "{}", keyword.word()),
            Self::Label => write!(f, "technologic"),
            Self::FunctionDefinition { name, params } => {
                write!(f, "define {name}({})", params.join(", "))
            },
            Self::FunctionCall { name, args } => {
                write!(f, "{name}(")?;
                for (index, arg) in args.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            },
            Self::ExpressionKeyword(keyword) => write!(f, "{}", keyword.word()),
        }
    }
}

/// A program node paired with the position of its first token.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub node:     Node,
    pub position: Position,
}

/// The ordered, flat sequence of instructions produced by the parser.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub instructions: Vec<Instruction>,
}

impl Program {
    #[must_use]
    pub const fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    /// Builds a program from bare nodes, numbering each one as its own line.
    ///
    /// Mostly useful for exercising the interpreter without going through the
    /// parser.
    #[must_use]
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        let instructions = nodes.into_iter()
                                .enumerate()
                                .map(|(index, node)| Instruction { node,
                                                                   position:
                                                                       Position::new(index + 1,
                                                                                     1) })
                                .collect();
        Self { instructions }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    #[must_use]
    pub fn node(&self, index: usize) -> Option<&Node> {
        self.instructions.get(index).map(|i| &i.node)
    }

    /// Position of the instruction at `index`, or of the last instruction
    /// when `index` is past the end.
    #[must_use]
    pub fn position(&self, index: usize) -> Position {
        self.instructions
            .get(index)
            .or_else(|| self.instructions.last())
            .map_or_else(Position::default, |i| i.position)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, instruction) in self.instructions.iter().enumerate() {
            writeln!(f,
                     "{index:>4}  {:>4}:{:<3} {}",
                     instruction.position.line, instruction.position.column, instruction.node)?;
        }
        Ok(())
    }
}
