/// The evaluator module executes the flat program.
///
/// The evaluator walks the instruction sequence with an instruction pointer,
/// recovers conditionals, loops and function bodies from their marker
/// keywords, and keeps all runtime state in one resettable value.
///
/// # Responsibilities
/// - Evaluates expression nodes and executes statement keywords.
/// - Matches markers by depth counting, forward and backward.
/// - Drives function calls by re-entering the step loop.
/// - Reports runtime errors with the position of the failing instruction.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text word by word and produces a stream of
/// tokens, each tagged with its line and column. Synonyms are normalized,
/// filler words and comments vanish, and fixed phrases are checked here.
///
/// # Responsibilities
/// - Converts the input character stream into positioned tokens.
/// - Classifies words as digits, operators, keywords or variables.
/// - Reports lexical errors for stray characters and broken phrases.
pub mod lexer;
/// The parser module builds the flat program from tokens.
///
/// Expressions become nested trees, but every statement is appended to a
/// single ordered sequence. Control structure stays implicit in the marker
/// keywords.
///
/// # Responsibilities
/// - Assembles numbers, variable references, groups and function headers.
/// - Applies operator precedence and postfix unary operators.
/// - Reports syntax errors with location info.
pub mod parser;
/// The vocabulary module holds the word tables of the language.
///
/// # Responsibilities
/// - Maps synonyms, digit words, operators and keywords.
/// - Decides which words are free to name variables.
pub mod vocabulary;
