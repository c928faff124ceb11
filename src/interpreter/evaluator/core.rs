use std::{collections::HashMap, io::Write, rc::Rc};

use crate::{
    ast::{ExpressionKeyword, Node, Position, Program, UnaryOperator},
    error::RuntimeError,
    interpreter::evaluator::{binary::eval_binary, io::LineSource, unary::eval_unary},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Default bound on nested function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 200;

/// Tunable limits of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpreterConfig {
    /// Most call frames allowed at once. One more call fails with
    /// [`RuntimeError::CallDepthExceeded`].
    pub max_call_depth: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self { max_call_depth: DEFAULT_MAX_CALL_DEPTH }
    }
}

/// One active function invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct CallFrame {
    /// Instruction the caller resumes at.
    pub return_address: usize,
    /// Local variables, starting with the parameters.
    pub scope:          HashMap<String, f64>,
    /// Name of the called function, for diagnostics.
    pub function:       String,
}

/// A registered function body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionEntry {
    /// Index of the definition marker. The body starts right after it.
    pub start:  usize,
    /// Index of the `break` closing the body.
    pub end:    usize,
    pub params: Vec<String>,
}

/// Everything a run mutates.
///
/// The state is created empty, filled by a single run and can be cleared
/// with [`InterpreterState::reset`] to run the same program again.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InterpreterState {
    /// Index of the next instruction to execute.
    pub pointer:     usize,
    /// Value of the most recently evaluated expression statement.
    pub last_value:  Option<f64>,
    /// Value carried by the most recent return.
    pub last_return: f64,
    pub globals:     HashMap<String, f64>,
    pub call_stack:  Vec<CallFrame>,
    /// The explicit value stack. The top is the last element.
    pub stack:       Vec<f64>,
    pub functions:   HashMap<String, FunctionEntry>,
    /// Set by `burn` and `find` with index 0.
    pub halted:      bool,
}

impl InterpreterState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the state to how [`InterpreterState::new`] left it.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Reads a variable from the innermost call frame, falling back to the
    /// globals.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<f64> {
        self.call_stack
            .last()
            .and_then(|frame| frame.scope.get(name))
            .or_else(|| self.globals.get(name))
            .copied()
    }

    /// Binds a variable.
    ///
    /// An existing binding in the innermost frame wins, then an existing
    /// global. A new name lands in the innermost frame, or in the globals
    /// when no function is running.
    pub fn assign(&mut self, name: &str, value: f64) {
        match self.call_stack.last_mut() {
            Some(frame) if frame.scope.contains_key(name) || !self.globals.contains_key(name) => {
                frame.scope.insert(name.to_string(), value);
            },
            _ => {
                self.globals.insert(name.to_string(), value);
            },
        }
    }
}

/// Executes a flat program.
///
/// The interpreter owns the program, its state and the two collaborators:
/// an output sink written to by `print`, `send` and `scroll`, and a line
/// source read by `scan` and `press`.
///
/// ## Example
/// ```
/// use technologic::{
///     interpreter::{evaluator::core::Interpreter, lexer::tokenize, parser::core::parse_program},
/// };
///
/// let program = parse_program(&tokenize("view touch work send").unwrap()).unwrap();
/// let mut output = Vec::new();
/// let mut interpreter = Interpreter::new(program, &mut output, std::io::empty());
/// interpreter.run().unwrap();
/// drop(interpreter);
/// assert_eq!(output, b"7");
/// ```
pub struct Interpreter<W, R> {
    pub(crate) program: Rc<Program>,
    pub(crate) state:   InterpreterState,
    pub(crate) config:  InterpreterConfig,
    pub(crate) output:  W,
    pub(crate) input:   R,
}

impl<W: Write, R: LineSource> Interpreter<W, R> {
    #[must_use]
    pub fn new(program: Program, output: W, input: R) -> Self {
        Self::with_config(program, output, input, InterpreterConfig::default())
    }

    #[must_use]
    pub fn with_config(program: Program, output: W, input: R, config: InterpreterConfig) -> Self {
        Self { program: Rc::new(program),
               state: InterpreterState::new(),
               config,
               output,
               input }
    }

    #[must_use]
    pub const fn state(&self) -> &InterpreterState {
        &self.state
    }

    #[must_use]
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Clears all runtime state so the program can run again.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Runs the program from the current pointer until it halts or the
    /// pointer leaves the program, then flushes the output.
    ///
    /// # Errors
    /// Returns the first [`RuntimeError`] met. The state is left as it was at
    /// the fault and must not be resumed.
    pub fn run(&mut self) -> EvalResult<()> {
        while !self.state.halted && self.state.pointer < self.program.len() {
            self.step()?;
        }

        let position = self.program.position(self.state.pointer);
        self.output.flush().map_err(|e| io_error(&e, position))
    }

    /// Executes the instruction under the pointer.
    ///
    /// The pointer moves past the instruction first; keywords and function
    /// definitions may then move it anywhere.
    ///
    /// # Errors
    /// Propagates any [`RuntimeError`] raised by the instruction.
    pub fn step(&mut self) -> EvalResult<()> {
        let program = Rc::clone(&self.program);
        let at = self.state.pointer;
        let Some(instruction) = program.instructions.get(at) else {
            return Ok(());
        };
        let position = instruction.position;
        self.state.pointer = at + 1;

        match &instruction.node {
            Node::Keyword(keyword) => self.exec_keyword(*keyword, at, position),
            Node::Label => Ok(()),
            Node::FunctionDefinition { name, params } => {
                self.define_function(name, params, at, position)
            },
            node => {
                let value = self.eval(node, position)?;
                self.state.last_value = Some(value);
                Ok(())
            },
        }
    }

    /// Keeps stepping until the call stack shrinks back to `depth` frames.
    ///
    /// # Errors
    /// Returns [`RuntimeError::RanOffEnd`] if the pointer leaves the program
    /// while a frame above `depth` is still active.
    pub(crate) fn run_until(&mut self, depth: usize, name: &str, position: Position) -> EvalResult<()> {
        while self.state.call_stack.len() > depth {
            if self.state.halted {
                return Ok(());
            }
            if self.state.pointer >= self.program.len() {
                return Err(RuntimeError::RanOffEnd { name: name.to_string(),
                                                     position });
            }
            self.step()?;
        }
        Ok(())
    }

    /// Evaluates an expression node.
    ///
    /// Markers are not values; reaching one here means a keyword expected an
    /// operand and found structure instead.
    ///
    /// # Errors
    /// Returns a [`RuntimeError`] for unknown names, an empty value stack,
    /// zero divisors, failed calls and markers.
    pub fn eval(&mut self, node: &Node, position: Position) -> EvalResult<f64> {
        match node {
            Node::NumberLiteral(n) => Ok(*n),
            Node::VariableRef(name) => {
                self.state
                    .lookup(name)
                    .ok_or_else(|| RuntimeError::UnknownVariable { name: name.clone(),
                                                                   position })
            },
            Node::Binary { operator,
                           left,
                           right, } => {
                let left = self.eval(left, position)?;
                let right = self.eval(right, position)?;
                eval_binary(*operator, left, right, position)
            },
            Node::Unary { operator, operand } => {
                let value = self.eval(operand, position)?;
                self.eval_unary_op(*operator, value, position)
            },
            Node::FunctionCall { name, args } => self.call_function(name, args, position),
            Node::ExpressionKeyword(ExpressionKeyword::Pop) => self.pop(position),
            marker @ (Node::Keyword(_) | Node::Label | Node::FunctionDefinition { .. }) => {
                Err(RuntimeError::NotAValue { found: marker.to_string(),
                                              position })
            },
        }
    }

    fn eval_unary_op(&mut self, op: UnaryOperator, value: f64, position: Position) -> EvalResult<f64> {
        match op {
            UnaryOperator::Paste => {
                self.state.stack.push(value);
                Ok(value)
            },
            UnaryOperator::Return => self.return_from_function(value, position),
            UnaryOperator::Negate | UnaryOperator::Not => Ok(eval_unary(op, value)),
        }
    }

    /// Pops the value stack.
    pub(crate) fn pop(&mut self, position: Position) -> EvalResult<f64> {
        self.state.stack.pop().ok_or(RuntimeError::StackUnderflow { position })
    }

    /// Reads the last-expression register.
    pub(crate) fn last_value(&self, keyword: &'static str, position: Position) -> EvalResult<f64> {
        self.state.last_value.ok_or(RuntimeError::MissingValue { keyword, position })
    }

    pub(crate) fn write_output(&mut self, text: &str, position: Position) -> EvalResult<()> {
        self.output.write_all(text.as_bytes()).map_err(|e| io_error(&e, position))
    }
}

/// Wraps an I/O failure of a collaborator.
pub(crate) fn io_error(error: &std::io::Error, position: Position) -> RuntimeError {
    RuntimeError::Io { details: error.to_string(),
                       position }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(name: &str, scope: &[(&str, f64)]) -> CallFrame {
        CallFrame { return_address: 0,
                    scope:          scope.iter().map(|(k, v)| ((*k).to_string(), *v)).collect(),
                    function:       name.to_string(), }
    }

    #[test]
    fn lookup_prefers_innermost_frame() {
        let mut state = InterpreterState::new();
        state.globals.insert("x".to_string(), 1.0);
        state.globals.insert("y".to_string(), 2.0);
        state.call_stack.push(frame("f", &[("x", 10.0)]));

        assert_eq!(state.lookup("x"), Some(10.0));
        assert_eq!(state.lookup("y"), Some(2.0));
        assert_eq!(state.lookup("z"), None);
    }

    #[test]
    fn assign_writes_only_the_innermost_binding() {
        let mut state = InterpreterState::new();
        state.globals.insert("x".to_string(), 1.0);
        state.call_stack.push(frame("f", &[("x", 10.0)]));

        state.assign("x", 11.0);
        assert_eq!(state.call_stack[0].scope.get("x"), Some(&11.0));
        assert_eq!(state.globals.get("x"), Some(&1.0));
    }

    #[test]
    fn assign_updates_existing_globals_from_a_function() {
        let mut state = InterpreterState::new();
        state.globals.insert("total".to_string(), 1.0);
        state.call_stack.push(frame("f", &[]));

        state.assign("total", 5.0);
        state.assign("fresh", 3.0);
        assert_eq!(state.globals.get("total"), Some(&5.0));
        assert_eq!(state.call_stack[0].scope.get("fresh"), Some(&3.0));
        assert!(!state.globals.contains_key("fresh"));
    }

    #[test]
    fn assign_at_top_level_is_global() {
        let mut state = InterpreterState::new();
        state.assign("x", 4.0);
        assert_eq!(state.globals.get("x"), Some(&4.0));
    }

    #[test]
    fn reset_clears_everything() {
        let mut state = InterpreterState::new();
        state.pointer = 7;
        state.stack.push(1.0);
        state.last_value = Some(3.0);
        state.halted = true;
        state.reset();
        assert_eq!(state, InterpreterState::new());
    }

    #[test]
    fn interpreter_exposes_program_and_state_between_runs() {
        use crate::interpreter::{lexer::tokenize, parser::core::parse_program};

        let tokens = tokenize("click save watch save").unwrap();
        let program = parse_program(&tokens).unwrap();
        let mut interpreter = Interpreter::new(program, Vec::new(), std::io::empty());

        assert_eq!(interpreter.program().len(), 4);
        interpreter.step().unwrap();
        assert_eq!(interpreter.state().pointer, 1);
        assert_eq!(interpreter.state().last_value, Some(1.0));

        interpreter.run().unwrap();
        assert_eq!(interpreter.state().stack, vec![1.0, 2.0]);
        assert_eq!(interpreter.state().pointer, 4);

        interpreter.reset();
        assert_eq!(interpreter.state(), &InterpreterState::new());
        interpreter.run().unwrap();
        assert_eq!(interpreter.state().stack, vec![1.0, 2.0]);
    }
}
