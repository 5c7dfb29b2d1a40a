use crate::{error::RuntimeError, interpreter::value::Value};

/// A growable, ordered sequence of values.
///
/// Lists are always handled through `Rc<RefCell<List>>`, so pushes, pops and
/// in-place sorts performed through one binding are observable through every
/// alias.
#[derive(Debug, Default, PartialEq)]
pub struct List {
    /// The stored values, in order.
    pub elements: Vec<Value>,
}

impl List {
    /// Wraps a vector of values.
    #[must_use]
    pub const fn new(elements: Vec<Value>) -> Self {
        Self { elements }
    }

    /// Returns the element at `index`.
    ///
    /// Negative indices count from the back: `-1` is the last element.
    ///
    /// # Errors
    /// `IndexOutOfRange` when the index lies outside `[-len, len)`.
    pub fn element(&self, index: i64) -> Result<Value, RuntimeError> {
        let length = self.elements.len() as i64;
        if index >= length || index < -length {
            return Err(RuntimeError::IndexOutOfRange { action: "getting element from list" });
        }
        let index = if index < 0 { index + length } else { index };
        Ok(self.elements[index as usize].clone())
    }

    /// Collects the sublist from `start` to `end` inclusive, walking by
    /// `step`.
    ///
    /// Negative endpoints count from the back, but mixing signs between the
    /// two endpoints yields an empty list. At least one element is taken
    /// before the end condition is checked, so a start at or past the end
    /// still produces the start element.
    ///
    /// # Errors
    /// - `IndexOutOfRange` when the walk leaves the list.
    /// - `InvalidArgument` for a zero step.
    pub fn sublist(&self, start: i64, end: i64, step: i64) -> Result<Vec<Value>, RuntimeError> {
        if step == 0 {
            return Err(RuntimeError::InvalidArgument { details:
                                                           "Step of slice() must be non-zero".to_string(), });
        }

        let length = self.elements.len() as i64;
        if (start > 0 && end < 0) || (start < 0 && end > 0) {
            return Ok(Vec::new());
        }
        let start = if start < 0 { start + length } else { start };
        let end = if end < 0 { end + length } else { end };

        let mut result = Vec::new();
        let mut index = start;
        loop {
            if index < 0 || index >= length {
                return Err(RuntimeError::IndexOutOfRange { action: "slicing list" });
            }
            result.push(self.elements[index as usize].clone());
            if (step < 0 && index <= end) || (step > 0 && index >= end) {
                break;
            }
            index += step;
        }
        Ok(result)
    }
}
