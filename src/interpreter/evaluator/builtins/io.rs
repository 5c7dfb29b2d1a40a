use std::{
    io::{BufRead, Write},
    rc::Rc,
};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::Value,
    },
};

impl Evaluator<'_> {
    /// `print(v)`: writes `v` to the output stream.
    ///
    /// Top-level strings are written raw; every other kind goes through the
    /// canonical stringification (which is why strings inside printed lists
    /// appear quoted).
    pub(crate) fn builtin_print(&mut self, args: &[Value]) -> EvalResult<Value> {
        let result = match &args[0] {
            Value::String(text) => write!(self.output, "{text}"),
            other => write!(self.output, "{other}"),
        };
        result.map_err(|error| RuntimeError::Io { details: error.to_string() })?;
        Ok(Value::Nil)
    }

    /// `println(v)`: `print(v)` followed by a newline.
    pub(crate) fn builtin_println(&mut self, args: &[Value]) -> EvalResult<Value> {
        self.builtin_print(args)?;
        writeln!(self.output).map_err(|error| RuntimeError::Io { details: error.to_string() })?;
        Ok(Value::Nil)
    }

    /// `read()`: reads one line from the input stream, without the trailing
    /// newline. At end of input the result is the empty string.
    pub(crate) fn builtin_read(&mut self) -> EvalResult<Value> {
        let mut line = String::new();
        self.input
            .read_line(&mut line)
            .map_err(|error| RuntimeError::Io { details: error.to_string() })?;
        if line.ends_with('\n') {
            line.pop();
        }
        Ok(Value::from(line))
    }

    /// `stacktrace()`: a string listing every binding of the topmost scope,
    /// one `variable name: <name>, value: <value>` line each.
    ///
    /// The bindings are sorted by name so that repeated runs of the same
    /// program print identical traces.
    pub(crate) fn builtin_stacktrace(&mut self) -> EvalResult<Value> {
        let Some(scope) = self.scopes.last() else {
            return Ok(Value::String(Rc::from("Empty trace")));
        };

        let mut names: Vec<&String> = scope.keys().collect();
        names.sort();

        let mut trace = String::new();
        for name in names {
            trace.push_str(&format!("variable name: {}, value: {}\n", name, scope[name]));
        }
        Ok(Value::from(trace))
    }
}
