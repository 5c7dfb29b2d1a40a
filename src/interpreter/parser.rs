use crate::{ast::Node, error::ParseError, interpreter::lexer::tokenize};

/// Expression parsing: the Pratt loop, binding powers, calls and slices.
pub mod expression;
/// Statement parsing: blocks, control-flow constructs and function literals.
pub mod statement;

/// Result type used by all parsing functions.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a complete program into its AST root.
///
/// # Errors
/// Returns the first lexing or parsing error; there is no recovery.
///
/// # Example
/// ```
/// use basil::{ast::Node, interpreter::parser::parse};
///
/// let program = parse("a = 1\nprint(a)").unwrap();
/// assert!(matches!(program, Node::Root(statements) if statements.len() == 2));
/// ```
pub fn parse(source: &str) -> ParseResult<Node> {
    let tokens = tokenize(source)?;
    let mut iter = tokens.iter().peekable();
    statement::parse_program(&mut iter)
}
