/// Core execution engine and interpreter state.
///
/// Contains the instruction pointer loop, the runtime state, expression
/// evaluation and the shared result type.
pub mod core;

/// Marker matching over the flat program.
///
/// Pure depth-counting scans that recover conditionals, loops and function
/// bodies from their marker keywords.
pub mod control_flow;

/// Statement keyword execution.
///
/// Implements the effect of every bare keyword reached by the instruction
/// pointer.
pub mod keyword;

/// Binary operator evaluation logic.
///
/// Arithmetic and comparisons over the single numeric type.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Negation and logical not. The stateful operators are handled by the core.
pub mod unary;

/// Function definition and call protocol.
///
/// Registers function bodies and drives calls by re-entering the step loop.
pub mod function;

/// Line input collaborator used by the reading keywords.
pub mod io;
