/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code. Parse errors include syntax mistakes, unexpected tokens, invalid
/// literals, and any other issues detected before evaluation.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation and
/// execution. Runtime errors include type mismatches, unknown names, invalid
/// built-in arguments, and failed stream operations.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

#[derive(Debug)]
/// Any error a full interpreter run can produce.
///
/// A run fails either while turning source text into a tree or while walking
/// it; this type is the sum of the two so that [`crate::run`] has a single
/// error channel.
pub enum Error {
    /// Lexing or parsing failed.
    Parse(ParseError),
    /// Evaluation failed.
    Runtime(RuntimeError),
}

impl From<ParseError> for Error {
    fn from(error: ParseError) -> Self {
        Self::Parse(error)
    }
}

impl From<RuntimeError> for Error {
    fn from(error: RuntimeError) -> Self {
        Self::Runtime(error)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(error) => write!(f, "{error}"),
            Self::Runtime(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(error) => Some(error),
            Self::Runtime(error) => Some(error),
        }
    }
}
