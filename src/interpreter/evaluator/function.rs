use std::{collections::HashMap, io::Write};

use crate::{
    ast::{Node, Position},
    error::RuntimeError,
    interpreter::evaluator::{
        control_flow::match_marker,
        core::{CallFrame, EvalResult, FunctionEntry, Interpreter},
        io::LineSource,
    },
};

impl<W: Write, R: LineSource> Interpreter<W, R> {
    /// Registers the function whose definition marker sits at `at` and moves
    /// the pointer past its body.
    ///
    /// Bodies only run when called. A later definition with the same name
    /// replaces the earlier one.
    ///
    /// # Errors
    /// Returns [`RuntimeError::UnmatchedMarker`] if the body has no closing
    /// `break`.
    pub(crate) fn define_function(&mut self,
                                  name: &str,
                                  params: &[String],
                                  at: usize,
                                  position: Position)
                                  -> EvalResult<()> {
        let end = match_marker(&self.program, at + 1, false).ok_or_else(|| {
                      RuntimeError::UnmatchedMarker { marker: format!("definition of '{name}'"),
                                                      position }
                  })?;

        self.state.functions.insert(name.to_string(),
                                    FunctionEntry { start: at,
                                                    end,
                                                    params: params.to_vec() });
        self.state.pointer = end + 1;
        Ok(())
    }

    /// Calls a registered function and yields its return value.
    ///
    /// Arguments are evaluated in the caller's scope before the frame is
    /// pushed. The body then runs on the same step loop until its frame is
    /// popped by `unlock` or by the closing `break`.
    ///
    /// # Errors
    /// - `UnknownFunction` if no definition has been reached yet.
    /// - `ArgumentCountMismatch` if the arity differs.
    /// - `CallDepthExceeded` if the call would exceed the configured depth.
    /// - Any error raised while evaluating arguments or running the body.
    pub(crate) fn call_function(&mut self, name: &str, args: &[Node], position: Position) -> EvalResult<f64> {
        let entry =
            self.state
                .functions
                .get(name)
                .cloned()
                .ok_or_else(|| RuntimeError::UnknownFunction { name: name.to_string(),
                                                               position })?;

        if entry.params.len() != args.len() {
            return Err(RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                             expected: entry.params.len(),
                                                             found: args.len(),
                                                             position });
        }

        let depth = self.state.call_stack.len();
        if depth >= self.config.max_call_depth {
            return Err(RuntimeError::CallDepthExceeded { limit: self.config.max_call_depth,
                                                         position });
        }

        let mut scope = HashMap::with_capacity(args.len());
        for (param, arg) in entry.params.iter().zip(args) {
            let value = self.eval(arg, position)?;
            scope.insert(param.clone(), value);
        }

        self.state.call_stack.push(CallFrame { return_address: self.state.pointer,
                                               scope,
                                               function: name.to_string() });
        self.state.pointer = entry.start + 1;

        self.run_until(depth, name, position)?;
        Ok(self.state.last_return)
    }

    /// Pops the current frame and resumes the caller.
    ///
    /// # Errors
    /// Returns [`RuntimeError::ReturnOutsideFunction`] when no function is
    /// running.
    pub(crate) fn return_from_function(&mut self, value: f64, position: Position) -> EvalResult<f64> {
        let frame = self.state
                        .call_stack
                        .pop()
                        .ok_or(RuntimeError::ReturnOutsideFunction { position })?;

        self.state.pointer = frame.return_address;
        self.state.last_return = value;
        Ok(value)
    }
}
