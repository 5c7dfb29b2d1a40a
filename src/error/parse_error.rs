#[derive(Debug)]
/// Represents all errors that can occur during lexing or parsing.
///
/// Tokens the lexer could not make sense of are not errors of their own:
/// they surface as an incorrect pseudo-token and end up reported here as
/// `IncorrectExpression` or `UnknownBinaryOperation`, depending on where
/// the parser trips over them.
pub enum ParseError {
    /// Reached the end of input in the middle of a construct.
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `/* ... */` comment was opened but never closed. This is the only
    /// failure the lexer reports directly.
    UnclosedComment {
        /// The source line where the comment starts.
        line: usize,
    },
    /// A specific token was required but something else was found.
    Expected {
        /// Description of what was required, e.g. `')'` or
        /// `"end if", but got only "end"`.
        what: &'static str,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An operator was required to continue an expression.
    UnknownBinaryOperation {
        /// The source line where the error occurred.
        line: usize,
    },
    /// No expression could be parsed at this position.
    IncorrectExpression {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A slice `[...]` with nothing between the brackets.
    EmptySlice {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A slice with more than three index slots.
    SliceArity {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedEndOfInput { line } => {
                write!(f, "Error on line {line}: Unexpected end of input")
            },

            Self::UnclosedComment { line } => {
                write!(f, "Error on line {line}: Unclosed comment")
            },

            Self::Expected { what, line } => write!(f, "Error on line {line}: Expected {what}"),

            Self::UnknownBinaryOperation { line } => {
                write!(f, "Error on line {line}: Unknown binary operation")
            },

            Self::IncorrectExpression { line } => {
                write!(f, "Error on line {line}: Incorrect expression")
            },

            Self::EmptySlice { line } => {
                write!(f, "Error on line {line}: Empty slice expression")
            },

            Self::SliceArity { line } => write!(f,
                                                "Error on line {line}: Slice expression must have 1, 2, or 3 arguments"),
        }
    }
}

impl std::error::Error for ParseError {}
