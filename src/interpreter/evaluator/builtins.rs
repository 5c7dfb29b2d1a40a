use crate::{
    ast::{GlobalFunction, Node},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::Value,
    },
};

/// Input/output built-ins: `print`, `println`, `read`, `stacktrace`.
pub mod io;
/// List built-ins: `len`, `range`, `push`, `pop`, `insert`, `remove`,
/// `sort` and slicing.
pub mod lists;
/// Numeric built-ins: `abs`, `sqrt`, `ceil`, `floor`, `round`, `rnd`,
/// `parse_num`.
pub mod numeric;
/// String built-ins: `lower`, `upper`, `capitalize`, `split`, `join`,
/// `replace`, `to_string`.
pub mod strings;

/// Specifies the allowed number of arguments for a built-in.
#[derive(Clone, Copy)]
pub(crate) enum Arity {
    /// The built-in must receive exactly this many arguments.
    Exact(usize),
    /// The built-in accepts any count in this inclusive range.
    Between(usize, usize),
}

impl Arity {
    /// Tests whether the given argument count satisfies this constraint.
    const fn check(self, count: usize) -> bool {
        match self {
            Self::Exact(expected) => count == expected,
            Self::Between(low, high) => count >= low && count <= high,
        }
    }
}

/// The arity table for the built-in library.
///
/// `Slice` counts its target as the first argument, so the 1–3 index slots
/// the parser allows arrive here as 2–4 arguments.
pub(crate) const fn arity_of(function: GlobalFunction) -> Arity {
    match function {
        GlobalFunction::Read | GlobalFunction::StackTrace => Arity::Exact(0),
        GlobalFunction::Print
        | GlobalFunction::Println
        | GlobalFunction::Len
        | GlobalFunction::Lower
        | GlobalFunction::Upper
        | GlobalFunction::Capitalize
        | GlobalFunction::Abs
        | GlobalFunction::Sqrt
        | GlobalFunction::Ceil
        | GlobalFunction::Floor
        | GlobalFunction::Round
        | GlobalFunction::Rnd
        | GlobalFunction::ParseNumber
        | GlobalFunction::ToString
        | GlobalFunction::Pop
        | GlobalFunction::Sort => Arity::Exact(1),
        GlobalFunction::Split
        | GlobalFunction::Join
        | GlobalFunction::Push
        | GlobalFunction::Remove => Arity::Exact(2),
        GlobalFunction::Replace | GlobalFunction::Range | GlobalFunction::Insert => Arity::Exact(3),
        GlobalFunction::Slice => Arity::Between(2, 4),
    }
}

impl Evaluator<'_> {
    /// Invokes a built-in: checks the arity, evaluates the arguments left to
    /// right, then dispatches.
    pub(crate) fn eval_global_function(&mut self,
                                       function: GlobalFunction,
                                       args: &[Node])
                                       -> EvalResult<Value> {
        let arity = arity_of(function);
        if !arity.check(args.len()) {
            return Err(match arity {
                           Arity::Exact(expected) => {
                               RuntimeError::BuiltinArity { name: function.name(),
                                                            expected }
                           },
                           Arity::Between(..) => {
                               RuntimeError::InvalidArgument { details:
                                                                   "Incorrect number of arguments in slice".to_string(), }
                           },
                       });
        }

        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval(arg)?);
        }

        match function {
            GlobalFunction::Print => self.builtin_print(&values),
            GlobalFunction::Println => self.builtin_println(&values),
            GlobalFunction::Read => self.builtin_read(),
            GlobalFunction::StackTrace => self.builtin_stacktrace(),
            GlobalFunction::Rnd => self.builtin_rnd(&values),
            GlobalFunction::Len => lists::len(&values),
            GlobalFunction::Lower => strings::lower(&values),
            GlobalFunction::Upper => strings::upper(&values),
            GlobalFunction::Capitalize => strings::capitalize(&values),
            GlobalFunction::Split => strings::split(&values),
            GlobalFunction::Join => strings::join(&values),
            GlobalFunction::Replace => strings::replace(&values),
            GlobalFunction::ToString => strings::to_string(&values),
            GlobalFunction::Abs => numeric::unary_numeric("abs", &values, f64::abs),
            GlobalFunction::Sqrt => numeric::unary_numeric("sqrt", &values, f64::sqrt),
            GlobalFunction::Ceil => numeric::unary_numeric("ceil", &values, f64::ceil),
            GlobalFunction::Floor => numeric::unary_numeric("floor", &values, f64::floor),
            GlobalFunction::Round => numeric::unary_numeric("round", &values, f64::round),
            GlobalFunction::ParseNumber => numeric::parse_num(&values),
            GlobalFunction::Range => lists::range(&values),
            GlobalFunction::Push => lists::push(&values),
            GlobalFunction::Pop => lists::pop(&values),
            GlobalFunction::Insert => lists::insert(&values),
            GlobalFunction::Remove => lists::remove(&values),
            GlobalFunction::Sort => lists::sort(&values),
            GlobalFunction::Slice => lists::slice(&values),
        }
    }
}
