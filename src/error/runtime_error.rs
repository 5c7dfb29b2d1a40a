#[derive(Debug)]
/// Represents all errors that can occur during evaluation.
///
/// The wordings are part of the language's observable behavior and are kept
/// stable; none of them carry source positions because the tree walker does
/// not track them.
pub enum RuntimeError {
    /// Tried to read a variable that is not bound in any scope.
    VariableNotFound {
        /// The name of the variable.
        name: String,
    },
    /// Called a name that was never bound to a function value.
    FunctionNotFound {
        /// The name that was called.
        name: String,
    },
    /// Called a name that no longer resolves to a function value.
    FunctionUndefined {
        /// The name that was called.
        name: String,
    },
    /// Called a function with the wrong number of arguments.
    ArityMismatch {
        /// The name that was called.
        name:  String,
        /// How many arguments the call supplied.
        count: usize,
    },
    /// Applied `()` to a value that is not a function.
    NotAFunction,
    /// The left side of an assignment was not a variable.
    AssignmentTarget,
    /// A binary operator was applied to an unsupported pair of operands.
    IncorrectOperands {
        /// The operator spelling.
        operator: &'static str,
    },
    /// Unary `+` or `-` applied to a non-number.
    UnaryNumberExpected {
        /// `"plus"` or `"minus"`.
        operator: &'static str,
    },
    /// `*` with a negative repeat count on a string or list.
    NegativeRepeat {
        /// `"string"` or `"list"`.
        kind: &'static str,
    },
    /// A `for` loop sequence that is neither a string nor a list.
    NotIterable,
    /// A built-in was called with the wrong number of arguments.
    BuiltinArity {
        /// The built-in's name.
        name:     &'static str,
        /// The required argument count.
        expected: usize,
    },
    /// A built-in rejected an argument; the details carry the full message.
    InvalidArgument {
        /// The diagnostic text.
        details: String,
    },
    /// A list index was outside the valid range.
    IndexOutOfRange {
        /// What was being attempted, e.g. `"removing from list"`.
        action: &'static str,
    },
    /// `pop()` on an empty list.
    EmptyPop,
    /// `range()` with a zero step.
    ZeroStep,
    /// Reading from or writing to the interpreter's streams failed.
    Io {
        /// The underlying error text.
        details: String,
    },
}

/// Spells out a small argument count for arity diagnostics.
const fn count_word(count: usize) -> &'static str {
    match count {
        0 => "no",
        1 => "one",
        2 => "two",
        3 => "three",
        _ => "four",
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VariableNotFound { name } => write!(f, "Variable '{name}' not found"),

            Self::FunctionNotFound { name } => write!(f, "Function {name} not found"),

            Self::FunctionUndefined { name } => write!(f, "Function '{name}' not found"),

            Self::ArityMismatch { name, count } => {
                write!(f, "Function '{name}' with {count} arguments not found")
            },

            Self::NotAFunction => write!(f, "() operator can be applied only to the function"),

            Self::AssignmentTarget => {
                write!(f, "The left operand of the assignment must be a variable")
            },

            Self::IncorrectOperands { operator } => {
                write!(f, "Incorrect operands in binary expression: A {operator} B")
            },

            Self::UnaryNumberExpected { operator } => {
                write!(f, "Unary {operator} can be applied only to the number")
            },

            Self::NegativeRepeat { kind } => {
                write!(f, "Can not multiply a {kind} by a negative number")
            },

            Self::NotIterable => write!(f, "Sequence must be iterable"),

            Self::BuiltinArity { name, expected } => {
                write!(f,
                       "{name}() requires {} argument{}",
                       count_word(*expected),
                       if *expected == 1 { "" } else { "s" })
            },

            Self::InvalidArgument { details } => write!(f, "{details}"),

            Self::IndexOutOfRange { action } => {
                write!(f, "Index is out of range when {action}")
            },

            Self::EmptyPop => write!(f, "Can not pop from empty list"),

            Self::ZeroStep => write!(f, "Step of range() must be non-zero"),

            Self::Io { details } => write!(f, "I/O error: {details}"),
        }
    }
}

impl std::error::Error for RuntimeError {}
