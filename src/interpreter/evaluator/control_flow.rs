//! The program carries no block nodes. Conditionals, loops and function
//! bodies exist only as marker keywords in the flat instruction sequence, so
//! their extent is recovered here by counting nesting depth the same way one
//! matches brackets.
//!
//! Openers are `check` and function definitions; every opener is closed by
//! exactly one `break`. `fix` and `jam` split a conditional without closing
//! it.

use crate::ast::{Keyword, Node, Program};

/// The construct a `break` or `leave` belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enclosing {
    /// An `if`, opened by the `check` at the given index.
    Conditional { check: usize },
    /// A `lock` or `start` loop.
    Loop {
        /// Index of the `lock`/`start` keyword, where each iteration begins.
        guard: usize,
        /// Index of the `check` that opens the body.
        check: usize,
        /// Whether the guard is inverted (`start`).
        until: bool,
    },
    /// A function body opened by the definition at the given index.
    Function { definition: usize },
}

fn opens_block(node: &Node) -> bool {
    node.is_keyword(Keyword::Check) || matches!(node, Node::FunctionDefinition { .. })
}

/// Finds the marker closing the construct whose body starts at `from`.
///
/// Scans forward with a depth counter: openers deepen, a `break` at depth
/// zero is the match, any other `break` closes one level. With
/// `accept_else`, a `fix`/`jam` at depth zero also matches, which is how a
/// false condition lands in its else branch.
///
/// Returns `None` when the program ends before a match.
///
/// # Example
/// ```
/// use technologic::{
///     ast::{Keyword, Node, Program},
///     interpreter::evaluator::control_flow::match_marker,
/// };
///
/// let program = Program::from_nodes(vec![Node::Keyword(Keyword::Check),
///                                        Node::Keyword(Keyword::Check),
///                                        Node::Keyword(Keyword::Break),
///                                        Node::Keyword(Keyword::Fix),
///                                        Node::Keyword(Keyword::Break)]);
/// assert_eq!(match_marker(&program, 1, true), Some(3));
/// assert_eq!(match_marker(&program, 1, false), Some(4));
/// ```
#[must_use]
pub fn match_marker(program: &Program, from: usize, accept_else: bool) -> Option<usize> {
    let mut depth = 0_usize;

    for (index, instruction) in program.instructions.iter().enumerate().skip(from) {
        match &instruction.node {
            node if opens_block(node) => depth += 1,
            Node::Keyword(Keyword::Break) if depth == 0 => return Some(index),
            Node::Keyword(Keyword::Break) => depth -= 1,
            Node::Keyword(k) if accept_else && depth == 0 && k.is_else_marker() => {
                return Some(index);
            },
            _ => {},
        }
    }

    None
}

/// Finds the innermost construct still open just before index `at`.
///
/// Scans backward: every `break` met on the way closes one opener further
/// back, so openers are only considered once the depth is back at zero. A
/// `check` whose node two positions earlier is `lock` or `start` is a loop
/// guard; any other `check` opens a conditional.
///
/// With `skip_conditionals`, open conditionals are passed over and the
/// nearest loop or function is returned instead.
#[must_use]
pub fn resolve_enclosing(program: &Program, at: usize, skip_conditionals: bool) -> Option<Enclosing> {
    let mut depth = 0_usize;

    for index in (0..at.min(program.len())).rev() {
        let Some(node) = program.node(index) else {
            continue;
        };

        if node.is_keyword(Keyword::Break) {
            depth += 1;
            continue;
        }
        if !opens_block(node) {
            continue;
        }
        if depth > 0 {
            depth -= 1;
            continue;
        }

        if let Node::FunctionDefinition { .. } = node {
            return Some(Enclosing::Function { definition: index });
        }

        match loop_guard(program, index) {
            Some((guard, until)) => {
                return Some(Enclosing::Loop { guard,
                                              check: index,
                                              until });
            },
            None if skip_conditionals => {},
            None => return Some(Enclosing::Conditional { check: index }),
        }
    }

    None
}

/// Returns the guard index of the loop whose body the `check` at `check`
/// opens, and whether that loop is an until loop.
#[must_use]
pub fn loop_guard(program: &Program, check: usize) -> Option<(usize, bool)> {
    let guard = check.checked_sub(2)?;

    match program.node(guard)? {
        Node::Keyword(keyword) if keyword.is_loop_marker() => {
            Some((guard, *keyword == Keyword::Start))
        },
        _ => None,
    }
}

/// Finds the `n`-th label (1-based) in document order.
#[must_use]
pub fn find_label(program: &Program, n: usize) -> Option<usize> {
    let index = n.checked_sub(1)?;

    program.instructions
           .iter()
           .enumerate()
           .filter(|(_, i)| i.node == Node::Label)
           .nth(index)
           .map(|(position, _)| position)
}

/// Counts the labels in the program.
#[must_use]
pub fn label_count(program: &Program) -> usize {
    program.instructions.iter().filter(|i| i.node == Node::Label).count()
}
