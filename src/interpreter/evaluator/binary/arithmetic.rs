use std::rc::Rc;

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::Value},
};

/// `+`: adds numbers, concatenates strings, concatenates lists into a new
/// list.
pub fn add(left: &Value, right: &Value) -> EvalResult<Value> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (Value::String(a), Value::String(b)) => {
            let mut text = String::with_capacity(a.len() + b.len());
            text.push_str(a);
            text.push_str(b);
            Ok(Value::from(text))
        },
        (Value::List(a), Value::List(b)) => {
            let mut elements = a.borrow().elements.clone();
            elements.extend(b.borrow().elements.iter().cloned());
            Ok(Value::from(elements))
        },
        _ => Err(RuntimeError::IncorrectOperands { operator: "+" }),
    }
}

/// `-`: subtracts numbers; on strings, removes `right` from the end of
/// `left` when it is a suffix and returns `left` unchanged otherwise.
pub fn subtract(left: &Value, right: &Value) -> EvalResult<Value> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a - b)),
        (Value::String(a), Value::String(b)) => {
            let stripped = a.strip_suffix(b.as_ref()).unwrap_or(a.as_ref());
            Ok(Value::from(stripped))
        },
        _ => Err(RuntimeError::IncorrectOperands { operator: "-" }),
    }
}

/// `*`: multiplies numbers; repeats a string or list by a non-negative
/// factor.
///
/// Repetition produces `⌊n · len⌋` items taken as `source[i mod len]`, so a
/// fractional factor keeps a proportional prefix of one more cycle.
pub fn multiply(left: &Value, right: &Value) -> EvalResult<Value> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a * b)),
        (Value::List(list), Value::Number(factor)) => {
            if *factor < 0.0 {
                return Err(RuntimeError::NegativeRepeat { kind: "list" });
            }
            let elements = &list.borrow().elements;
            let new_length = (factor * elements.len() as f64).floor() as usize;
            let mut buffer = Vec::with_capacity(new_length);
            for index in 0..new_length {
                buffer.push(elements[index % elements.len()].clone());
            }
            Ok(Value::from(buffer))
        },
        (Value::String(text), Value::Number(factor)) => {
            if *factor < 0.0 {
                return Err(RuntimeError::NegativeRepeat { kind: "string" });
            }
            let bytes = text.as_bytes();
            let new_length = (factor * bytes.len() as f64).floor() as usize;
            let mut buffer = Vec::with_capacity(new_length);
            for index in 0..new_length {
                buffer.push(bytes[index % bytes.len()]);
            }
            Ok(Value::String(Rc::from(String::from_utf8_lossy(&buffer).as_ref())))
        },
        _ => Err(RuntimeError::IncorrectOperands { operator: "*" }),
    }
}

/// `/`: IEEE-754 division; dividing by zero yields an infinity or NaN, not
/// an error.
pub fn divide(left: &Value, right: &Value) -> EvalResult<Value> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a / b)),
        _ => Err(RuntimeError::IncorrectOperands { operator: "/" }),
    }
}

/// `%`: floating-point remainder with the sign of the dividend.
pub fn modulo(left: &Value, right: &Value) -> EvalResult<Value> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a % b)),
        _ => Err(RuntimeError::IncorrectOperands { operator: "%" }),
    }
}

/// `^`: exponentiation.
pub fn power(left: &Value, right: &Value) -> EvalResult<Value> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a.powf(*b))),
        _ => Err(RuntimeError::IncorrectOperands { operator: "^" }),
    }
}
