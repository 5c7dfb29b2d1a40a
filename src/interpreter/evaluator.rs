/// The evaluator state and the main dispatch over AST nodes.
pub mod core;
/// `if`, `while` and `for` execution, including the break/continue/return
/// protocol.
pub mod control_flow;
/// Binary operations: assignment plumbing plus operand dispatch.
pub mod binary;
/// Unary operations.
pub mod unary;
/// The call protocol for named and unnamed functions.
pub mod function;
/// The built-in function library.
pub mod builtins;

pub use core::{ControlFlow, EvalResult, Evaluator};
