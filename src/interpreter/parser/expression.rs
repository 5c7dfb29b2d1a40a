use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, GlobalFunction, Node, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{ParseResult, statement::parse_function_literal},
    },
};

/// The number literal standing in for an omitted slice endpoint.
///
/// The parser cannot express "no index" in the argument list of the slice
/// call, so an empty slot before or after a `:` becomes the smallest positive
/// double. Truncating it to an integer index yields 0, which is exactly the
/// behavior an omitted endpoint should have.
pub const SLICE_SENTINEL: f64 = f64::MIN_POSITIVE;

/// Binding powers of the infix operators, `(left, right)`.
///
/// A right binding power below the left one makes the operator
/// right-associative; that encodes both `^` and the assignment family.
#[must_use]
pub const fn infix_binding_power(token: &Token) -> Option<(i32, i32)> {
    match token {
        Token::Assign
        | Token::PlusAssign
        | Token::MinusAssign
        | Token::StarAssign
        | Token::SlashAssign
        | Token::PercentAssign
        | Token::CaretAssign => Some((-1, -2)),
        Token::Or => Some((1, 2)),
        Token::And => Some((3, 4)),
        Token::EqualEqual | Token::BangEqual => Some((5, 6)),
        Token::Less | Token::LessEqual | Token::Greater | Token::GreaterEqual => Some((7, 8)),
        Token::Plus | Token::Minus => Some((9, 10)),
        Token::Star | Token::Slash | Token::Percent => Some((11, 12)),
        Token::Caret => Some((15, 14)),
        _ => None,
    }
}

/// Binding power of the prefix operators `not`, unary `+` and unary `-`.
///
/// All three bind tighter than any infix operator, so `-2 ^ 2` is `(-2) ^ 2`.
#[must_use]
pub const fn prefix_binding_power(token: &Token) -> Option<i32> {
    match token {
        Token::Not | Token::Plus | Token::Minus => Some(17),
        _ => None,
    }
}

/// Maps an operator token to its AST operator.
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Percent => Some(BinaryOperator::Mod),
        Token::Caret => Some(BinaryOperator::Pow),
        Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        Token::Less => Some(BinaryOperator::Less),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::And => Some(BinaryOperator::And),
        Token::Or => Some(BinaryOperator::Or),
        Token::Assign => Some(BinaryOperator::Assign),
        Token::PlusAssign => Some(BinaryOperator::AddAssign),
        Token::MinusAssign => Some(BinaryOperator::SubAssign),
        Token::StarAssign => Some(BinaryOperator::MulAssign),
        Token::SlashAssign => Some(BinaryOperator::DivAssign),
        Token::PercentAssign => Some(BinaryOperator::ModAssign),
        Token::CaretAssign => Some(BinaryOperator::PowAssign),
        _ => None,
    }
}

const fn token_to_unary_operator(token: &Token) -> Option<UnaryOperator> {
    match token {
        Token::Plus => Some(UnaryOperator::Plus),
        Token::Minus => Some(UnaryOperator::Minus),
        Token::Not => Some(UnaryOperator::Not),
        _ => None,
    }
}

/// Tokens that end an expression without being consumed by it.
const fn is_expression_terminator(token: &Token) -> bool {
    matches!(token,
             Token::Colon
             | Token::NewLine
             | Token::RParen
             | Token::End
             | Token::Then
             | Token::ElseIf
             | Token::Else
             | Token::Comma
             | Token::RBracket)
}

/// Parses a full expression with the lowest possible binding power.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)>
{
    parse_expression_bp(tokens, i32::MIN)
}

/// The Pratt loop.
///
/// First parses a prefix element (unary operator, grouping, list literal,
/// atom or function literal), then repeatedly extends it: a `(` continues
/// into a call, a `[` into a slice, and an operator whose left binding power
/// is at least `min_bp` into a binary node whose right side recurses with
/// the operator's right binding power.
///
/// # Errors
/// - `IncorrectExpression` when no prefix element starts here.
/// - `UnknownBinaryOperation` when a non-operator follows an expression in
///   operator position.
/// - Propagates any errors from nested constructs.
pub fn parse_expression_bp<'a, I>(tokens: &mut Peekable<I>, min_bp: i32) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let Some((token, line)) = tokens.next() else {
        return Err(ParseError::UnexpectedEndOfInput { line: 0 });
    };
    let line = *line;

    let mut lhs = if let Some(power) = prefix_binding_power(token) {
        let operand = parse_expression_bp(tokens, power)?;
        match token_to_unary_operator(token) {
            Some(op) => Node::UnaryOp { op,
                                        operand: Box::new(operand) },
            None => return Err(ParseError::IncorrectExpression { line }),
        }
    } else {
        match token {
            Token::LBracket => parse_list_literal(tokens, line)?,
            Token::LParen => {
                let inner = parse_expression(tokens)?;
                match tokens.next() {
                    Some((Token::RParen, _)) => inner,
                    Some((_, found)) => {
                        return Err(ParseError::Expected { what: "')'",
                                                          line: *found });
                    },
                    None => {
                        return Err(ParseError::Expected { what: "')'",
                                                          line });
                    },
                }
            },
            Token::Identifier(name) => {
                if let Some((Token::LParen, _)) = tokens.peek() {
                    parse_call(tokens, name, line)?
                } else {
                    Node::Variable(name.clone())
                }
            },
            Token::Number(value) => Node::NumberLiteral(*value),
            Token::String(value) => Node::StringLiteral(value.clone()),
            Token::True => Node::NumberLiteral(1.0),
            Token::False => Node::NumberLiteral(0.0),
            Token::Nil => Node::NilLiteral,
            Token::Function => Node::FunctionImplementation(parse_function_literal(tokens, line)?),
            _ => return Err(ParseError::IncorrectExpression { line }),
        }
    };

    loop {
        let Some((operation, operation_line)) = tokens.peek().copied() else {
            break;
        };
        let operation_line = *operation_line;
        if is_expression_terminator(operation) {
            break;
        }
        if matches!(operation, Token::LParen) {
            let args = parse_call_arguments(tokens, operation_line)?;
            lhs = Node::UnnamedFunctionCall { callee: Box::new(lhs),
                                              args };
            continue;
        }
        if matches!(operation, Token::LBracket) {
            lhs = parse_slice(tokens, lhs, operation_line)?;
            continue;
        }

        let Some((left_power, right_power)) = infix_binding_power(operation) else {
            return Err(ParseError::UnknownBinaryOperation { line: operation_line });
        };
        if left_power < min_bp {
            break;
        }

        let Some(op) = token_to_binary_operator(operation) else {
            return Err(ParseError::UnknownBinaryOperation { line: operation_line });
        };
        tokens.next();

        let rhs = parse_expression_bp(tokens, right_power)?;
        lhs = Node::BinaryOp { op,
                               lhs: Box::new(lhs),
                               rhs: Box::new(rhs) };
    }

    Ok(lhs)
}

/// Parses a call on a bare identifier.
///
/// Names from the built-in table become [`Node::GlobalFunctionCall`] right
/// here; anything else is a [`Node::FunctionCall`] resolved by scope lookup
/// at runtime.
fn parse_call<'a, I>(tokens: &mut Peekable<I>, name: &str, line: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let args = parse_call_arguments(tokens, line)?;

    Ok(match GlobalFunction::from_name(name) {
           Some(function) => Node::GlobalFunctionCall { function, args },
           None => Node::FunctionCall { name: name.to_string(),
                                        args },
       })
}

/// Parses a parenthesized, comma-separated argument list.
///
/// Newlines between arguments are skipped, so calls may be wrapped across
/// lines.
pub fn parse_call_arguments<'a, I>(tokens: &mut Peekable<I>,
                                   line: usize)
                                   -> ParseResult<Vec<Node>>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::LParen, _)) => {},
        _ => {
            return Err(ParseError::Expected { what: "'(' after function name",
                                              line });
        },
    }

    let mut args = Vec::new();
    let mut expect_separator = false;
    loop {
        match tokens.peek() {
            None => {
                return Err(ParseError::Expected { what: "')' after function arguments",
                                                  line });
            },
            Some((Token::RParen, _)) => break,
            Some((Token::NewLine, _)) => {
                tokens.next();
                continue;
            },
            Some((Token::Comma, _)) if expect_separator => {
                tokens.next();
                expect_separator = false;
                continue;
            },
            Some((_, found)) if expect_separator => {
                return Err(ParseError::Expected { what: "',' between function arguments",
                                                  line: *found });
            },
            Some(_) => {},
        }
        args.push(parse_expression(tokens)?);
        expect_separator = true;
    }
    tokens.next();

    Ok(args)
}

/// Parses a `[a, b, c]` literal; the opening bracket is already consumed.
///
/// Empty literals and trailing commas are accepted, and newlines between
/// elements are skipped.
fn parse_list_literal<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let mut elements = Vec::new();
    let mut expect_separator = false;
    loop {
        match tokens.peek() {
            None => {
                return Err(ParseError::Expected { what: "']' after list elements",
                                                  line });
            },
            Some((Token::RBracket, _)) => break,
            Some((Token::NewLine, _)) => {
                tokens.next();
                continue;
            },
            Some((Token::Comma, _)) if expect_separator => {
                tokens.next();
                expect_separator = false;
                continue;
            },
            Some((_, found)) if expect_separator => {
                return Err(ParseError::Expected { what: "',' between list elements",
                                                  line: *found });
            },
            Some(_) => {},
        }
        elements.push(parse_expression(tokens)?);
        expect_separator = true;
    }
    tokens.next();

    Ok(Node::ListLiteral(elements))
}

/// Parses the `target[...]` postfix into a slice call.
///
/// The bracket holds one to three colon-separated index slots; an empty slot
/// contributes [`SLICE_SENTINEL`]. The resulting node is a
/// [`Node::GlobalFunctionCall`] on [`GlobalFunction::Slice`] with the target
/// prepended to the indices.
fn parse_slice<'a, I>(tokens: &mut Peekable<I>, target: Node, line: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)>
{
    tokens.next();

    if let Some((Token::RBracket, bracket_line)) = tokens.peek() {
        return Err(ParseError::EmptySlice { line: *bracket_line });
    }

    let mut args = vec![target];
    loop {
        match tokens.peek() {
            None => {
                return Err(ParseError::Expected { what: "']' after slice arguments",
                                                  line });
            },
            Some((Token::RBracket, _)) => break,
            Some((Token::NewLine, _)) => {
                tokens.next();
                continue;
            },
            Some((Token::Colon, _)) => {
                args.push(Node::NumberLiteral(SLICE_SENTINEL));
                tokens.next();
                continue;
            },
            Some(_) => {},
        }
        args.push(parse_expression(tokens)?);
        match tokens.peek() {
            Some((Token::Colon, _)) => {
                tokens.next();
            },
            Some((Token::RBracket, _)) => {},
            Some((_, found)) => {
                return Err(ParseError::Expected { what: "']' after slice arguments",
                                                  line: *found });
            },
            None => {
                return Err(ParseError::Expected { what: "']' after slice arguments",
                                                  line });
            },
        }
    }

    if args.len() < 2 || args.len() > 4 {
        return Err(ParseError::SliceArity { line });
    }
    tokens.next();

    Ok(Node::GlobalFunctionCall { function: GlobalFunction::Slice,
                                  args })
}
