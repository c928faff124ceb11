use std::io::Write;

use crate::{
    ast::{Keyword, Node, Position},
    error::RuntimeError,
    interpreter::evaluator::{
        control_flow::{Enclosing, find_label, label_count, loop_guard, match_marker,
                       resolve_enclosing},
        core::{EvalResult, Interpreter, io_error},
        io::LineSource,
    },
    util::num::{f64_to_char_checked, f64_to_usize_checked, format_number},
};

/// Character code bound by `press` when the line read is empty.
const EMPTY_LINE_CODE: f64 = 10.0;

impl<W: Write, R: LineSource> Interpreter<W, R> {
    /// Executes the keyword found at index `at`.
    ///
    /// The pointer already points past the keyword. Keywords that take an
    /// operand from the following node move it one further.
    pub(crate) fn exec_keyword(&mut self, keyword: Keyword, at: usize, position: Position) -> EvalResult<()> {
        match keyword {
            Keyword::Print => {
                let value = self.last_value(keyword.word(), position)?;
                let character = f64_to_char_checked(value, position)?;
                self.write_output(character.encode_utf8(&mut [0; 4]), position)
            },
            Keyword::Send => {
                let value = self.last_value(keyword.word(), position)?;
                self.write_output(&format_number(value), position)
            },
            Keyword::Scroll => self.write_output("\n", position),
            Keyword::Save => {
                let value = self.last_value(keyword.word(), position)?;
                self.state.stack.push(value);
                Ok(())
            },
            Keyword::Load => self.pop(position).map(|_| ()),
            Keyword::Change => self.exec_change(at, position),
            Keyword::Write => {
                let value = self.last_value(keyword.word(), position)?;
                let name = self.variable_operand(keyword, at, position)?;
                self.state.assign(&name, value);
                Ok(())
            },
            Keyword::Scan => {
                let name = self.variable_operand(keyword, at, position)?;
                let line = self.read_line(position)?;
                let value = line.trim()
                                .parse::<f64>()
                                .map_err(|_| RuntimeError::InvalidInput { line: line.clone(),
                                                                          position })?;
                self.state.assign(&name, value);
                Ok(())
            },
            Keyword::Press => {
                let name = self.variable_operand(keyword, at, position)?;
                let line = self.read_line(position)?;
                let value = line.chars()
                                .next()
                                .map_or(EMPTY_LINE_CODE, |c| f64::from(u32::from(c)));
                self.state.assign(&name, value);
                Ok(())
            },
            Keyword::Burn => {
                self.halt();
                Ok(())
            },
            Keyword::Check => self.exec_check(at, position),
            Keyword::Fix | Keyword::Jam => {
                // Reached by finishing the true branch.
                let end = self.matching_break(keyword, at, false, position)?;
                self.state.pointer = end + 1;
                Ok(())
            },
            Keyword::Lock | Keyword::Start => self.validate_loop(keyword, at, position),
            Keyword::Break => self.exec_break(keyword, at, false, position),
            Keyword::Leave => self.exec_break(keyword, at, true, position),
            Keyword::Find => self.exec_find(position),
        }
    }

    /// Stops the whole program, including any functions still running.
    pub(crate) fn halt(&mut self) {
        self.state.halted = true;
        self.state.pointer = self.program.len();
    }

    /// Tests the last expression and enters or skips the body opened at `at`.
    ///
    /// A false conditional lands after its `fix`/`jam` when there is one. A
    /// loop that should stop lands after its `break`.
    fn exec_check(&mut self, at: usize, position: Position) -> EvalResult<()> {
        let value = self.last_value(Keyword::Check.word(), position)?;
        let guard = loop_guard(&self.program, at);

        let enter = match guard {
            Some((_, true)) => value == 0.0,
            _ => value != 0.0,
        };
        if enter {
            return Ok(());
        }

        let target = self.matching_break(Keyword::Check, at, guard.is_none(), position)?;
        self.state.pointer = target + 1;
        Ok(())
    }

    /// Closes the innermost open construct.
    ///
    /// A loop jumps back to its guard, or past its `break` when leaving. A
    /// function body returns 0. A conditional needs nothing; `leave` never
    /// stops at one.
    fn exec_break(&mut self, keyword: Keyword, at: usize, leaving: bool, position: Position) -> EvalResult<()> {
        let enclosing = resolve_enclosing(&self.program, at, leaving).ok_or(RuntimeError::OrphanBreak {
            keyword: keyword.word(),
            position,
        })?;

        match enclosing {
            Enclosing::Conditional { .. } => Ok(()),
            Enclosing::Loop { guard, .. } if !leaving => {
                self.state.pointer = guard;
                Ok(())
            },
            Enclosing::Loop { check, .. } => {
                let end = self.matching_break(keyword, check, false, position)?;
                self.state.pointer = end + 1;
                Ok(())
            },
            Enclosing::Function { .. } => self.return_from_function(0.0, position).map(|_| ()),
        }
    }

    /// Jumps to the label numbered by the last expression.
    fn exec_find(&mut self, position: Position) -> EvalResult<()> {
        let value = self.last_value(Keyword::Find.word(), position)?;
        let index = f64_to_usize_checked(value, position)?;

        if index == 0 {
            self.halt();
            return Ok(());
        }

        let label = find_label(&self.program, index).ok_or_else(|| {
                        RuntimeError::LabelOutOfRange { index,
                                                        labels: label_count(&self.program),
                                                        position }
                    })?;
        self.state.pointer = label + 1;
        Ok(())
    }

    /// Overwrites a value-stack slot, counted from the top, with the last
    /// expression. The index is the node right after `change`.
    fn exec_change(&mut self, at: usize, position: Position) -> EvalResult<()> {
        let value = self.last_value(Keyword::Change.word(), position)?;
        let program = std::rc::Rc::clone(&self.program);
        let operand = program.node(at + 1)
                             .filter(|node| !node.is_marker())
                             .ok_or(RuntimeError::MissingOperand { keyword: Keyword::Change.word(),
                                                                   position })?;

        // Calls in the index resume after it.
        self.state.pointer = at + 2;
        let index = self.eval(operand, position)?;
        let index = f64_to_usize_checked(index, position)?;

        let depth = self.state.stack.len();
        if index >= depth {
            return Err(RuntimeError::StackIndexOutOfBounds { index,
                                                             depth,
                                                             position });
        }
        self.state.stack[depth - 1 - index] = value;
        Ok(())
    }

    /// Checks that a loop keyword is followed by its guard and `check`.
    fn validate_loop(&self, keyword: Keyword, at: usize, position: Position) -> EvalResult<()> {
        let has_guard = self.program.node(at + 1).is_some_and(|node| !node.is_marker());
        let has_check = self.program.node(at + 2).is_some_and(|node| node.is_keyword(Keyword::Check));

        if has_guard && has_check {
            Ok(())
        } else {
            Err(RuntimeError::MalformedLoop { keyword: keyword.word(),
                                              position })
        }
    }

    /// Takes the variable name from the `name … rename` node after the
    /// keyword at `at` and moves the pointer past it.
    fn variable_operand(&mut self, keyword: Keyword, at: usize, position: Position) -> EvalResult<String> {
        match self.program.node(at + 1) {
            Some(Node::VariableRef(name)) => {
                let name = name.clone();
                self.state.pointer = at + 2;
                Ok(name)
            },
            _ => Err(RuntimeError::ExpectedVariableName { keyword: keyword.word(),
                                                          position }),
        }
    }

    fn matching_break(&self, opener: Keyword, at: usize, accept_else: bool, position: Position) -> EvalResult<usize> {
        match_marker(&self.program, at + 1, accept_else).ok_or_else(|| {
            RuntimeError::UnmatchedMarker { marker: opener.word().to_string(),
                                            position }
        })
    }

    /// Flushes pending output, then blocks for one line of input.
    fn read_line(&mut self, position: Position) -> EvalResult<String> {
        self.output.flush().map_err(|e| io_error(&e, position))?;
        self.input
            .next_line()
            .map_err(|e| io_error(&e, position))?
            .ok_or(RuntimeError::InputExhausted { position })
    }
}
