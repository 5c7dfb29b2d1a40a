use std::{
    collections::{HashMap, HashSet},
    io::{BufRead, Write},
    rc::Rc,
};

use rand::{SeedableRng, rngs::SmallRng};

use crate::{ast::Node, error::RuntimeError, interpreter::value::Value};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Signals that an enclosing loop or function call must interrupt normal
/// sequential execution.
///
/// The flag is set by `break`, `continue` and `return` and cleared by the
/// innermost construct responsible for it; `Return` carries the value the
/// call will produce.
#[derive(Debug, Default)]
pub enum ControlFlow {
    /// Normal sequential execution.
    #[default]
    Default,
    /// A `break` is looking for its loop.
    Break,
    /// A `continue` is looking for its loop.
    Continue,
    /// A `return` is looking for its function call, carrying the value.
    Return(Value),
}

/// The tree-walking evaluator.
///
/// Holds the scope stack, the parallel stack of names currently known to be
/// bound to functions, the control-flow flag, the program's input and output
/// streams and the process-wide generator behind `rnd()`.
///
/// Scope lookup walks the stack from the top; assignment updates the nearest
/// scope holding the name and falls back to creating the binding in the top
/// scope.
pub struct Evaluator<'io> {
    pub(crate) scopes:         Vec<HashMap<String, Value>>,
    pub(crate) function_names: Vec<HashSet<String>>,
    pub(crate) control_flow:   ControlFlow,
    pub(crate) output:         &'io mut dyn Write,
    pub(crate) input:          &'io mut dyn BufRead,
    pub(crate) rng:            SmallRng,
}

impl<'io> Evaluator<'io> {
    /// Creates an evaluator with a single (global) scope.
    #[must_use]
    pub fn new(input: &'io mut dyn BufRead, output: &'io mut dyn Write) -> Self {
        Self { scopes: vec![HashMap::new()],
               function_names: vec![HashSet::new()],
               control_flow: ControlFlow::Default,
               output,
               input,
               rng: SmallRng::from_entropy() }
    }

    /// Executes a parsed program.
    ///
    /// Top-level statements run in order; a propagating `break`, `continue`
    /// or `return` stops the remaining ones.
    ///
    /// # Errors
    /// The first runtime error aborts the run.
    pub fn run(&mut self, program: &Node) -> EvalResult<()> {
        match program {
            Node::Root(statements) => self.run_block(statements),
            other => self.eval(other).map(|_| ()),
        }
    }

    /// Evaluates one node to a value.
    ///
    /// Statements evaluate to `nil`; their effect lives in the evaluator
    /// state.
    pub fn eval(&mut self, node: &Node) -> EvalResult<Value> {
        match node {
            Node::Root(statements) => {
                self.run_block(statements)?;
                Ok(Value::Nil)
            },
            Node::NumberLiteral(value) => Ok(Value::Number(*value)),
            Node::StringLiteral(text) => Ok(Value::from(text.as_str())),
            Node::NilLiteral => Ok(Value::Nil),
            Node::ListLiteral(elements) => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    values.push(self.eval(element)?);
                }
                Ok(Value::from(values))
            },
            Node::Variable(name) => {
                self.find_variable(name)
                    .cloned()
                    .ok_or_else(|| RuntimeError::VariableNotFound { name: name.clone() })
            },
            Node::BinaryOp { op, lhs, rhs } => self.eval_binary_node(*op, lhs, rhs),
            Node::UnaryOp { op, operand } => {
                let operand = self.eval(operand)?;
                crate::interpreter::evaluator::unary::eval_unary(*op, &operand)
            },
            Node::If { condition,
                       then_block,
                       else_block, } => self.eval_if(condition, then_block, else_block),
            Node::While { condition, body } => self.eval_while(condition, body),
            Node::For { variable,
                        sequence,
                        body, } => self.eval_for(variable, sequence, body),
            Node::Break => {
                self.control_flow = ControlFlow::Break;
                Ok(Value::Nil)
            },
            Node::Continue => {
                self.control_flow = ControlFlow::Continue;
                Ok(Value::Nil)
            },
            Node::Return(value) => {
                let value = self.eval(value)?;
                self.control_flow = ControlFlow::Return(value);
                Ok(Value::Nil)
            },
            Node::FunctionImplementation(definition) => {
                Ok(Value::Function(Rc::clone(definition)))
            },
            Node::FunctionCall { name, args } => self.eval_function_call(name, args),
            Node::UnnamedFunctionCall { callee, args } => self.eval_unnamed_call(callee, args),
            Node::GlobalFunctionCall { function, args } => {
                self.eval_global_function(*function, args)
            },
        }
    }

    /// Runs a statement sequence, stopping early when any control-flow flag
    /// is raised.
    pub(crate) fn run_block(&mut self, statements: &[Node]) -> EvalResult<()> {
        for statement in statements {
            self.eval(statement)?;
            if !matches!(self.control_flow, ControlFlow::Default) {
                break;
            }
        }
        Ok(())
    }

    /// Runs `body` inside a fresh scope.
    ///
    /// The scope (and its function-name set) is popped on every exit path,
    /// including error propagation, which keeps the stack balanced.
    pub(crate) fn in_scope<T>(&mut self,
                              body: impl FnOnce(&mut Self) -> EvalResult<T>)
                              -> EvalResult<T> {
        self.scopes.push(HashMap::new());
        self.function_names.push(HashSet::new());
        let result = body(self);
        self.scopes.pop();
        self.function_names.pop();
        result
    }

    /// Looks a name up, walking the scope stack from the top; the first
    /// match wins.
    pub(crate) fn find_variable(&self, name: &str) -> Option<&Value> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Binds a value to a name.
    ///
    /// The nearest enclosing scope already holding the name is updated;
    /// otherwise the binding is created in the top scope. A function value
    /// additionally registers the name in the top function-name set, which
    /// is what later allows `name(...)` calls to resolve.
    pub(crate) fn set_variable(&mut self, name: &str, value: Value) {
        let is_function = value.is_function();

        if let Some(slot) = self.scopes
                                .iter_mut()
                                .rev()
                                .find_map(|scope| scope.get_mut(name))
        {
            *slot = value;
        } else if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), value);
        }

        if is_function && let Some(names) = self.function_names.last_mut() {
            names.insert(name.to_string());
        }
    }

    /// Whether any scope level has registered `name` as a function binding.
    pub(crate) fn is_function_name(&self, name: &str) -> bool {
        self.function_names.iter().any(|names| names.contains(name))
    }
}
