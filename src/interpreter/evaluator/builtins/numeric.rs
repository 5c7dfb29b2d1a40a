use rand::Rng;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::Value,
    },
};

/// Applies a numeric function to a single number argument.
///
/// Shared by `abs`, `sqrt`, `ceil`, `floor` and `round`; the name only
/// feeds the diagnostic.
pub fn unary_numeric(name: &str, args: &[Value], operation: fn(f64) -> f64) -> EvalResult<Value> {
    match args[0].as_number() {
        Some(value) => Ok(Value::Number(operation(value))),
        None => Err(RuntimeError::InvalidArgument { details:
                                                        format!("{name}() can be applied only to the number"), }),
    }
}

/// `parse_num(s)`: parses a double out of a string.
///
/// The whole string must participate in the parse; anything else, including
/// non-string arguments, yields `nil`.
pub fn parse_num(args: &[Value]) -> EvalResult<Value> {
    let parsed = match &args[0] {
        Value::String(text) => text.parse::<f64>().ok().map(Value::Number),
        _ => None,
    };
    Ok(parsed.unwrap_or(Value::Nil))
}

impl Evaluator<'_> {
    /// `rnd(n)`: a pseudo-random non-negative integer below 2^31 from the
    /// evaluator's process-wide generator. The argument must be a number
    /// but its value is ignored.
    pub(crate) fn builtin_rnd(&mut self, args: &[Value]) -> EvalResult<Value> {
        if args[0].as_number().is_none() {
            return Err(RuntimeError::InvalidArgument { details:
                                                           "rnd() can be applied only to the number".to_string(), });
        }
        Ok(Value::Number(self.rng.gen_range(0..2_147_483_648_i64) as f64))
    }
}
