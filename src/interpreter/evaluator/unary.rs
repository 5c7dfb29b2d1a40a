use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::Value},
};

/// Applies a prefix operator to an evaluated operand.
///
/// `+` and `-` require a number; `not` coerces any value to a boolean and
/// yields `1.0` or `0.0`.
pub fn eval_unary(op: UnaryOperator, operand: &Value) -> EvalResult<Value> {
    match op {
        UnaryOperator::Minus => match operand.as_number() {
            Some(value) => Ok(Value::Number(-value)),
            None => Err(RuntimeError::UnaryNumberExpected { operator: "minus" }),
        },
        UnaryOperator::Plus => match operand.as_number() {
            Some(value) => Ok(Value::Number(value)),
            None => Err(RuntimeError::UnaryNumberExpected { operator: "plus" }),
        },
        UnaryOperator::Not => Ok(Value::from(!operand.is_truthy())),
    }
}
