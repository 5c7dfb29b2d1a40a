use std::mem;

use crate::{
    ast::{FunctionDefinition, Node},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{ControlFlow, EvalResult, Evaluator},
        value::Value,
    },
};

impl Evaluator<'_> {
    /// Calls a function through a bare name.
    ///
    /// The name must have been registered as a function binding at some
    /// scope level (the wording of the first failure differs deliberately
    /// from the second: a name never bound to a function reads
    /// `Function x not found`, a stale or missing binding reads
    /// `Function 'x' not found`). Named calls check arity; a mismatch names
    /// the supplied count.
    pub(crate) fn eval_function_call(&mut self, name: &str, args: &[Node]) -> EvalResult<Value> {
        if !self.is_function_name(name) {
            return Err(RuntimeError::FunctionNotFound { name: name.to_string() });
        }

        let Some(value) = self.find_variable(name).cloned() else {
            return Err(RuntimeError::FunctionUndefined { name: name.to_string() });
        };
        let Value::Function(function) = value else {
            return Err(RuntimeError::FunctionUndefined { name: name.to_string() });
        };

        if function.arg_names.len() != args.len() {
            return Err(RuntimeError::ArityMismatch { name:  name.to_string(),
                                                     count: args.len(), });
        }

        self.call_function(&function, args)
    }

    /// Calls the result of an arbitrary expression, e.g. `f()()`.
    ///
    /// The callee must evaluate to a function value; no arity check is
    /// performed, surplus arguments are ignored and missing parameters stay
    /// unbound.
    pub(crate) fn eval_unnamed_call(&mut self, callee: &Node, args: &[Node]) -> EvalResult<Value> {
        let Value::Function(function) = self.eval(callee)? else {
            return Err(RuntimeError::NotAFunction);
        };
        self.call_function(&function, args)
    }

    /// The shared call protocol.
    ///
    /// Arguments are evaluated in the caller's context, then bound to the
    /// parameter names inside a fresh scope; the body runs until a `return`
    /// fires. The call produces the returned value, or `nil` when the body
    /// fell through, and always leaves the control-flow flag cleared.
    fn call_function(&mut self, function: &FunctionDefinition, args: &[Node]) -> EvalResult<Value> {
        let bound = function.arg_names.len().min(args.len());
        let mut arguments = Vec::with_capacity(bound);
        for arg in &args[..bound] {
            arguments.push(self.eval(arg)?);
        }

        self.in_scope(|interpreter| {
                for (name, value) in function.arg_names.iter().zip(arguments) {
                    interpreter.set_variable(name, value);
                }
                for statement in &function.body {
                    interpreter.eval(statement)?;
                    if matches!(interpreter.control_flow, ControlFlow::Return(_)) {
                        break;
                    }
                }
                Ok(())
            })?;

        Ok(match mem::take(&mut self.control_flow) {
               ControlFlow::Return(value) => value,
               _ => Value::Nil,
           })
    }
}
