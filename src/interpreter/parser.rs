/// Program-level parsing.
///
/// Drives the statement loop that turns the token stream into the flat
/// program, and defines the shared expression entry point.
pub mod core;

/// Atom parsing.
///
/// Numbers assembled from digit words, `name … rename` references,
/// `zip … unzip` groups, and markers passed through verbatim.
pub mod primary;

/// Binary operator parsing.
///
/// Precedence climbing over the fixed operator precedence table.
pub mod binary;

/// Unary operator parsing.
///
/// Postfix operators wrapping an already parsed expression.
pub mod unary;

/// Function header parsing.
///
/// The `use ( … ) name code|call` form, producing either a definition marker
/// or a call expression.
pub mod function;

/// Utility functions for the parser.
///
/// Lookahead checks and expectations on structural words shared by the other
/// parser modules.
pub mod utils;
