use std::rc::Rc;

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::Value},
};

fn string_argument(value: &Value, details: &str) -> EvalResult<Rc<str>> {
    value.as_string()
         .ok_or_else(|| RuntimeError::InvalidArgument { details: details.to_string() })
}

/// `lower(s)`: ASCII-wise lower-casing; produces a new string.
pub fn lower(args: &[Value]) -> EvalResult<Value> {
    let text = string_argument(&args[0], "lower() can be applied only to the string")?;
    Ok(Value::from(text.to_ascii_lowercase()))
}

/// `upper(s)`: ASCII-wise upper-casing; produces a new string.
pub fn upper(args: &[Value]) -> EvalResult<Value> {
    let text = string_argument(&args[0], "upper() can be applied only to the string")?;
    Ok(Value::from(text.to_ascii_uppercase()))
}

/// `capitalize(s)`: upper-cases the first byte.
///
/// Strings are immutable values here, so the result is a fresh string and
/// the argument keeps its spelling. An empty string stays empty.
pub fn capitalize(args: &[Value]) -> EvalResult<Value> {
    let text = string_argument(&args[0], "capitalize() can be applied only to the string")?;
    let mut bytes = text.as_bytes().to_vec();
    if let Some(first) = bytes.first_mut() {
        first.make_ascii_uppercase();
    }
    Ok(Value::from(String::from_utf8_lossy(&bytes).into_owned()))
}

/// `split(s, sep)`: the list of substrings between occurrences of `sep`.
///
/// The trailing segment is always included, so splitting `"a,"` on `","`
/// yields `["a", ""]`.
pub fn split(args: &[Value]) -> EvalResult<Value> {
    let source = string_argument(&args[0], "all arguments of split() must be strings")?;
    let delimiter = string_argument(&args[1], "all arguments of split() must be strings")?;

    let mut pieces = Vec::new();
    let mut rest = source.as_ref();
    while let Some(position) = rest.find(delimiter.as_ref()) {
        pieces.push(Value::from(&rest[..position]));
        rest = &rest[position + delimiter.len()..];
    }
    pieces.push(Value::from(rest));
    Ok(Value::from(pieces))
}

/// `join(list, sep)`: concatenates the stringified elements with `sep`
/// between them. String elements are inserted raw, everything else through
/// the canonical stringification.
pub fn join(args: &[Value]) -> EvalResult<Value> {
    let Value::List(list) = &args[0] else {
        return Err(RuntimeError::InvalidArgument { details:
                                                       "First argument of join() must be list".to_string(), });
    };
    let delimiter = string_argument(&args[1], "Second argument of join() must be string")?;

    let elements = &list.borrow().elements;
    let mut joined = String::new();
    for (index, element) in elements.iter().enumerate() {
        match element {
            Value::String(text) => joined.push_str(text),
            other => joined.push_str(&other.to_string()),
        }
        if index != elements.len() - 1 {
            joined.push_str(&delimiter);
        }
    }
    Ok(Value::from(joined))
}

/// `replace(s, old, new)`: replaces every non-overlapping occurrence of
/// `old`, scanning left to right and resuming just after each inserted
/// `new`.
pub fn replace(args: &[Value]) -> EvalResult<Value> {
    let source = string_argument(&args[0], "all arguments of replace() must be strings")?;
    let old = string_argument(&args[1], "all arguments of replace() must be strings")?;
    let new = string_argument(&args[2], "all arguments of replace() must be strings")?;

    if old.is_empty() {
        return Ok(Value::String(source));
    }

    let mut result = String::with_capacity(source.len());
    let mut rest = source.as_ref();
    while let Some(position) = rest.find(old.as_ref()) {
        result.push_str(&rest[..position]);
        result.push_str(&new);
        rest = &rest[position + old.len()..];
    }
    result.push_str(rest);
    Ok(Value::from(result))
}

/// `to_string(v)`: the canonical stringification of any value.
pub fn to_string(args: &[Value]) -> EvalResult<Value> {
    Ok(Value::from(args[0].to_string()))
}
