use std::{cmp::Ordering, rc::Rc};

use crate::{
    ast::BinaryOperator,
    interpreter::{evaluator::core::EvalResult, value::Value},
};

/// Evaluates a comparison of the form `Value <operator> Value`, producing
/// `1.0` or `0.0`.
///
/// Same-kind operands compare for real: numbers by IEEE rules (every
/// comparison against NaN is false except `!=`), strings bytewise
/// lexicographically, lists by their lengths, `nil` equal to `nil`, and
/// functions by identity of their shared definition. Operands of different
/// kinds always compare to `0.0`, including under `!=`.
pub fn compare(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
    let result = match (left, right) {
        (Value::Number(a), Value::Number(b)) => match op {
            BinaryOperator::Equal => a == b,
            BinaryOperator::NotEqual => a != b,
            BinaryOperator::Less => a < b,
            BinaryOperator::LessEqual => a <= b,
            BinaryOperator::Greater => a > b,
            BinaryOperator::GreaterEqual => a >= b,
            _ => false,
        },
        (Value::String(a), Value::String(b)) => apply_ordering(op, a.as_ref().cmp(b.as_ref())),
        (Value::List(a), Value::List(b)) => {
            let ordering = a.borrow().elements.len().cmp(&b.borrow().elements.len());
            apply_ordering(op, ordering)
        },
        (Value::Nil, Value::Nil) => apply_ordering(op, Ordering::Equal),
        (Value::Function(a), Value::Function(b)) => {
            if Rc::ptr_eq(a, b) {
                apply_ordering(op, Ordering::Equal)
            } else {
                matches!(op, BinaryOperator::NotEqual)
            }
        },
        _ => false,
    };

    Ok(Value::from(result))
}

/// Maps a total ordering of two same-kind operands through the comparison
/// operator.
fn apply_ordering(op: BinaryOperator, ordering: Ordering) -> bool {
    match op {
        BinaryOperator::Equal => ordering.is_eq(),
        BinaryOperator::NotEqual => ordering.is_ne(),
        BinaryOperator::Less => ordering.is_lt(),
        BinaryOperator::LessEqual => ordering.is_le(),
        BinaryOperator::Greater => ordering.is_gt(),
        BinaryOperator::GreaterEqual => ordering.is_ge(),
        _ => false,
    }
}
