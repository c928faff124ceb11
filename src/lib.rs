//! # technologic
//!
//! technologic is an interpreter for a small imperative scripting language
//! spelled entirely in everyday verbs. Source text is tokenized, parsed into a
//! flat instruction sequence and executed by an interpreter that recovers
//! conditionals, loops and function bodies from marker keywords.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::Write;

use crate::{
    ast::Program,
    interpreter::{
        evaluator::{
            core::{Interpreter, InterpreterConfig},
            io::LineSource,
        },
        lexer::tokenize,
        parser::core::parse_program,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Node` enum and the flat `Program` it is stored
/// in. Expressions nest; statements do not. Every instruction carries the
/// source position of its first token.
///
/// # Responsibilities
/// - Defines node, operator and keyword types for all language constructs.
/// - Attaches source positions to instructions for error reporting.
/// - Renders programs as a readable instruction listing.
pub mod ast;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// This module defines all errors that can be raised while running code. Each
/// error carries the line and column it refers to and renders as a
/// human-readable message.
///
/// # Responsibilities
/// - Defines one error enum per phase (lexer, parser, evaluator).
/// - Attaches positions and detailed messages for context.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together the vocabulary, lexing, parsing and evaluation,
/// and exposes each phase on its own.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser and evaluator.
/// - Provides entry points for each phase.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for safe numeric conversion and helpers.
///
/// # Responsibilities
/// - Safely convert `f64` values into indices and characters.
/// - Render numbers the way the language prints them.
pub mod util;

/// Tokenizes and parses source text into a flat program.
///
/// # Errors
/// Returns the lexing or parsing error that stopped the pipeline.
///
/// # Examples
/// ```
/// use technologic::parse_source;
///
/// let program = parse_source("click touch watch send").unwrap();
/// assert_eq!(program.len(), 2);
///
/// // A bare word outside an argument list must use the naming form.
/// assert!(parse_source("counter send").is_err());
/// ```
pub fn parse_source(source: &str) -> Result<Program, Box<dyn std::error::Error>> {
    let tokens = tokenize(source)?;
    Ok(parse_program(&tokens)?)
}

/// Runs source text to completion.
///
/// Output is written to `output` and `scan`/`press` read from `input`. If
/// execution succeeds, it returns `Ok(())`; otherwise, it returns the first
/// error met in any phase.
///
/// # Errors
/// Returns an error if lexing, parsing or evaluation fails.
///
/// # Examples
/// ```
/// use technologic::run_source;
///
/// let mut output = Vec::new();
/// run_source("surf send scroll", &mut output, std::io::empty()).unwrap();
/// assert_eq!(output, b"5\n");
///
/// // Nothing has been pushed yet.
/// assert!(run_source("load", &mut Vec::new(), std::io::empty()).is_err());
/// ```
pub fn run_source<W: Write, R: LineSource>(source: &str,
                                           output: W,
                                           input: R)
                                           -> Result<(), Box<dyn std::error::Error>> {
    run_source_with_config(source, output, input, InterpreterConfig::default())
}

/// Like [`run_source`], with explicit interpreter limits.
///
/// # Errors
/// Returns an error if lexing, parsing or evaluation fails.
pub fn run_source_with_config<W: Write, R: LineSource>(source: &str,
                                                       output: W,
                                                       input: R,
                                                       config: InterpreterConfig)
                                                       -> Result<(), Box<dyn std::error::Error>> {
    let program = parse_source(source)?;
    let mut interpreter = Interpreter::with_config(program, output, input, config);
    interpreter.run()?;
    Ok(())
}
