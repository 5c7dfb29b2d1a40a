use std::{cell::RefCell, cmp::Ordering, mem, rc::Rc};

use ordered_float::OrderedFloat;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{List, Value},
    },
};

fn list_argument(value: &Value, details: &str) -> EvalResult<Rc<RefCell<List>>> {
    value.as_list()
         .ok_or_else(|| RuntimeError::InvalidArgument { details: details.to_string() })
}

fn number_argument(value: &Value, details: &str) -> EvalResult<f64> {
    value.as_number()
         .ok_or_else(|| RuntimeError::InvalidArgument { details: details.to_string() })
}

/// `len(v)`: the byte length of a string or element count of a list.
pub fn len(args: &[Value]) -> EvalResult<Value> {
    match &args[0] {
        Value::String(text) => Ok(Value::Number(text.len() as f64)),
        Value::List(list) => Ok(Value::Number(list.borrow().elements.len() as f64)),
        _ => Err(RuntimeError::InvalidArgument { details:
                                                     "len() can be applied only to the iterable object".to_string(), }),
    }
}

/// `range(a, b, step)`: the list of doubles from `a` (inclusive) towards
/// `b` (exclusive), advancing by `step`.
///
/// The step must be non-zero and point from `a` towards `b`.
pub fn range(args: &[Value]) -> EvalResult<Value> {
    let start = number_argument(&args[0], "all arguments of range() must be numbers")?;
    let end = number_argument(&args[1], "all arguments of range() must be numbers")?;
    let step = number_argument(&args[2], "all arguments of range() must be numbers")?;

    if step == 0.0 {
        return Err(RuntimeError::ZeroStep);
    }
    if step > 0.0 && start >= end {
        return Err(RuntimeError::InvalidArgument { details:
                                                       "Start of range() must be less than end if step is positive".to_string(), });
    }
    if step < 0.0 && start <= end {
        return Err(RuntimeError::InvalidArgument { details:
                                                       "Start of range() must be greater than end if step is negative".to_string(), });
    }

    let mut sequence = Vec::new();
    let mut current = start;
    while if step > 0.0 { current < end } else { current > end } {
        sequence.push(Value::Number(current));
        current += step;
    }
    Ok(Value::from(sequence))
}

/// `push(list, v)`: appends in place and evaluates to the list.
pub fn push(args: &[Value]) -> EvalResult<Value> {
    let list = list_argument(&args[0], "First argument of push() must be list")?;
    list.borrow_mut().elements.push(args[1].clone());
    Ok(args[0].clone())
}

/// `pop(list)`: removes the last element in place and evaluates to the
/// list; popping an empty list is an error.
pub fn pop(args: &[Value]) -> EvalResult<Value> {
    let list = list_argument(&args[0], "Argument of pop() must be list")?;
    if list.borrow_mut().elements.pop().is_none() {
        return Err(RuntimeError::EmptyPop);
    }
    Ok(args[0].clone())
}

/// `insert(list, i, v)`: inserts `v` at index `i` (truncated toward zero)
/// and evaluates to the list. The index must lie in `[0, len]`.
pub fn insert(args: &[Value]) -> EvalResult<Value> {
    let list = list_argument(&args[0], "First argument of insert() must be list")?;
    let index = number_argument(&args[1], "Second argument of insert() must be number")? as i64;

    let mut borrowed = list.borrow_mut();
    if index < 0 || index as usize > borrowed.elements.len() {
        return Err(RuntimeError::IndexOutOfRange { action: "inserting into list" });
    }
    borrowed.elements.insert(index as usize, args[2].clone());
    drop(borrowed);
    Ok(args[0].clone())
}

/// `remove(list, i)`: removes the element at index `i` (truncated toward
/// zero) and evaluates to the list. Negative and out-of-range indices are
/// errors.
pub fn remove(args: &[Value]) -> EvalResult<Value> {
    let list = list_argument(&args[0], "First argument of remove() must be list")?;
    let index = number_argument(&args[1], "Second argument of remove() must be number")? as i64;

    let mut borrowed = list.borrow_mut();
    if index < 0 || index as usize >= borrowed.elements.len() {
        return Err(RuntimeError::IndexOutOfRange { action: "removing from list" });
    }
    borrowed.elements.remove(index as usize);
    drop(borrowed);
    Ok(args[0].clone())
}

/// What a list element sorts as; used to verify homogeneity before the
/// actual sort.
#[derive(PartialEq, Eq, Clone, Copy)]
enum SortKind {
    Nil,
    Number,
    String,
    List,
}

/// Verifies that a list is sortable: no function elements, one kind only.
fn check_sortable(elements: &[Value]) -> EvalResult<()> {
    let mut kind = None;
    for element in elements {
        let element_kind = match element {
            Value::Nil => SortKind::Nil,
            Value::Number(_) => SortKind::Number,
            Value::String(_) => SortKind::String,
            Value::List(_) => SortKind::List,
            Value::Function(_) => {
                return Err(RuntimeError::InvalidArgument { details:
                                                               "sort() can not be applied to the list of the function".to_string(), });
            },
        };
        if *kind.get_or_insert(element_kind) != element_kind {
            return Err(RuntimeError::InvalidArgument { details:
                                                           "sort() can be applied only to the list of the same type".to_string(), });
        }
    }
    Ok(())
}

/// `sort(list)`: sorts in place and evaluates to the list.
///
/// The elements must all be of one kind: numbers sort by value (through a
/// total order, so NaN is admitted), strings bytewise, lists by length and
/// a nil-only list is trivially sorted. Functions cannot be sorted, and
/// mixing kinds is an error.
pub fn sort(args: &[Value]) -> EvalResult<Value> {
    let list = list_argument(&args[0], "Argument of sort() must be list")?;

    // Take the elements out for the duration of the sort so comparators may
    // borrow nested lists freely.
    let mut elements = mem::take(&mut list.borrow_mut().elements);

    if let Err(error) = check_sortable(&elements) {
        list.borrow_mut().elements = elements;
        return Err(error);
    }

    elements.sort_by(|left, right| match (left, right) {
                 (Value::Number(a), Value::Number(b)) => {
                     OrderedFloat(*a).cmp(&OrderedFloat(*b))
                 },
                 (Value::String(a), Value::String(b)) => a.as_ref().cmp(b.as_ref()),
                 (Value::List(a), Value::List(b)) => {
                     a.borrow().elements.len().cmp(&b.borrow().elements.len())
                 },
                 _ => Ordering::Equal,
             });

    list.borrow_mut().elements = elements;
    Ok(args[0].clone())
}

/// `slice(target, i[, j[, k]])`: indexing and slicing for lists and
/// strings.
///
/// Fractional indices truncate toward zero. On lists, one index picks an
/// element (negative counts from the back), two indices take the inclusive
/// sublist `[i, j-1]` and a third walks it with stride `k`. On strings, one
/// index takes the one-byte substring at `i` and two indices the byte range
/// `[i, j)`; a third index is accepted and ignored.
pub fn slice(args: &[Value]) -> EvalResult<Value> {
    let target = &args[0];

    let mut indices = Vec::with_capacity(args.len() - 1);
    for arg in &args[1..] {
        let index = number_argument(arg, "All arguments of slice() must be numbers")?;
        indices.push(index as i64);
    }

    match target {
        Value::List(list) => {
            let borrowed = list.borrow();
            match indices.len() {
                1 => borrowed.element(indices[0]),
                2 => Ok(Value::from(borrowed.sublist(indices[0], indices[1] - 1, 1)?)),
                _ => Ok(Value::from(borrowed.sublist(indices[0], indices[1] - 1, indices[2])?)),
            }
        },
        Value::String(text) => slice_string(text, &indices),
        _ => Err(RuntimeError::InvalidArgument { details:
                                                     "Slice can be applied only to the iterable object".to_string(), }),
    }
}

/// String slicing: byte-indexed substrings.
///
/// The start index must lie in `[0, len]`; an end before the start takes
/// the rest of the string, an end past it is clamped. Slices that would cut
/// a multi-byte character are repaired lossily.
fn slice_string(text: &str, indices: &[i64]) -> EvalResult<Value> {
    let bytes = text.as_bytes();
    let start = indices[0];
    if start < 0 || start as usize > bytes.len() {
        return Err(RuntimeError::InvalidArgument { details:
                                                       "String index is out of range".to_string(), });
    }
    let start = start as usize;

    let taken = match indices.len() {
        1 => (bytes.len() - start).min(1),
        _ => {
            let end = indices[1];
            if end < start as i64 {
                bytes.len() - start
            } else {
                ((end as usize) - start).min(bytes.len() - start)
            }
        },
    };

    Ok(Value::from(String::from_utf8_lossy(&bytes[start..start + taken]).into_owned()))
}
