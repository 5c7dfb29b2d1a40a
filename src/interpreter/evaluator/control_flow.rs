use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{ControlFlow, EvalResult, Evaluator},
        value::Value,
    },
};

impl Evaluator<'_> {
    /// Executes an `if` statement.
    ///
    /// The condition is coerced to a boolean, then the chosen branch runs in
    /// its own scope. A flag raised inside the branch propagates to the
    /// caller untouched.
    pub(crate) fn eval_if(&mut self,
                          condition: &Node,
                          then_block: &[Node],
                          else_block: &[Node])
                          -> EvalResult<Value> {
        let condition = self.eval(condition)?.is_truthy();
        self.in_scope(|interpreter| {
                if condition {
                    interpreter.run_block(then_block)
                } else {
                    interpreter.run_block(else_block)
                }
            })?;
        Ok(Value::Nil)
    }

    /// Executes a `while` loop.
    ///
    /// Each iteration gets a fresh scope. `break` exits the loop and resets
    /// the flag, `continue` resets the flag and re-evaluates the condition,
    /// `return` exits the loop and keeps propagating.
    pub(crate) fn eval_while(&mut self, condition: &Node, body: &[Node]) -> EvalResult<Value> {
        loop {
            if !self.eval(condition)?.is_truthy() {
                break;
            }
            self.in_scope(|interpreter| interpreter.run_block(body))?;
            if !self.continue_loop() {
                break;
            }
        }
        Ok(Value::Nil)
    }

    /// Executes a `for <variable> in <sequence>` loop.
    ///
    /// Strings iterate per byte, each bound as a one-character string; lists
    /// iterate over a snapshot of their elements, so body mutations of the
    /// list do not disturb the walk.
    pub(crate) fn eval_for(&mut self,
                           variable: &str,
                           sequence: &Node,
                           body: &[Node])
                           -> EvalResult<Value> {
        match self.eval(sequence)? {
            Value::String(text) => {
                for byte in text.bytes() {
                    let element = Value::from(String::from_utf8_lossy(&[byte]).into_owned());
                    if !self.run_iteration(variable, element, body)? {
                        break;
                    }
                }
            },
            Value::List(list) => {
                let elements = list.borrow().elements.clone();
                for element in elements {
                    if !self.run_iteration(variable, element, body)? {
                        break;
                    }
                }
            },
            _ => return Err(RuntimeError::NotIterable),
        }
        Ok(Value::Nil)
    }

    /// One `for` iteration: fresh scope, bind the loop variable, run the
    /// body. Returns whether the loop should keep going.
    fn run_iteration(&mut self,
                     variable: &str,
                     element: Value,
                     body: &[Node])
                     -> EvalResult<bool> {
        self.in_scope(|interpreter| {
                interpreter.set_variable(variable, element);
                interpreter.run_block(body)
            })?;
        Ok(self.continue_loop())
    }

    /// Applies the loop protocol to the current flag: `break` and `continue`
    /// are consumed here, a propagating `return` stops the loop without
    /// being consumed.
    fn continue_loop(&mut self) -> bool {
        match self.control_flow {
            ControlFlow::Default => true,
            ControlFlow::Continue => {
                self.control_flow = ControlFlow::Default;
                true
            },
            ControlFlow::Break => {
                self.control_flow = ControlFlow::Default;
                false
            },
            ControlFlow::Return(_) => false,
        }
    }
}
