use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{FunctionDefinition, Node},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{ParseResult, expression::parse_expression},
    },
};

/// Parses a whole program: statements separated by newlines, until the
/// token stream runs out.
pub fn parse_program<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let mut statements = Vec::new();
    loop {
        skip_newlines(tokens);
        if tokens.peek().is_none() {
            break;
        }
        statements.push(parse_statement(tokens)?);
    }
    Ok(Node::Root(statements))
}

/// Parses a single statement.
///
/// Leading newlines are consumed, then the first significant token decides:
/// `if`, `while`, `for`, `break`, `continue` and `return` have dedicated
/// forms, anything else is an expression statement.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)>
{
    skip_newlines(tokens);

    let Some((token, _)) = tokens.peek().copied() else {
        return Err(ParseError::UnexpectedEndOfInput { line: 0 });
    };

    match token {
        Token::If => parse_if(tokens),
        Token::While => parse_while(tokens),
        Token::For => parse_for(tokens),
        Token::Break => {
            tokens.next();
            Ok(Node::Break)
        },
        Token::Continue => {
            tokens.next();
            Ok(Node::Continue)
        },
        Token::Return => {
            tokens.next();
            Ok(Node::Return(Box::new(parse_expression(tokens)?)))
        },
        _ => parse_expression(tokens),
    }
}

/// Discards any number of consecutive newline tokens.
fn skip_newlines<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a (Token, usize)>
{
    while let Some((Token::NewLine, _)) = tokens.peek() {
        tokens.next();
    }
}

/// Parses statements until one of the terminator keywords shows up.
///
/// The terminators themselves are left in the stream for the caller.
/// Running out of input instead is an error described by `eof_expectation`.
fn parse_block<'a, I>(tokens: &mut Peekable<I>,
                      is_terminator: fn(&Token) -> bool,
                      eof_expectation: &'static str)
                      -> ParseResult<Vec<Node>>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let mut statements = Vec::new();
    loop {
        skip_newlines(tokens);
        match tokens.peek() {
            None => {
                return Err(ParseError::Expected { what: eof_expectation,
                                                  line: 0 });
            },
            Some((token, _)) if is_terminator(token) => return Ok(statements),
            Some(_) => statements.push(parse_statement(tokens)?),
        }
    }
}

/// Parses an `if` statement, including `elseif` chains and a final `else`.
///
/// Syntax:
/// ```text
///     if <condition> then
///         ...
///     elseif <condition> then
///         ...
///     else
///         ...
///     end if
/// ```
/// An `elseif` chain is represented by nesting the follow-up `If` as the
/// sole statement of the else block; the innermost branch consumes the
/// single shared `end if`.
fn parse_if<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let Some((Token::If | Token::ElseIf, line)) = tokens.next() else {
        return Err(ParseError::Expected { what: "\"if\"",
                                          line: 0 });
    };
    let line = *line;

    let condition = parse_expression(tokens)?;
    match tokens.next() {
        Some((Token::Then, _)) => {},
        Some((_, found)) => {
            return Err(ParseError::Expected { what: "\"then\" after if-block",
                                              line: *found });
        },
        None => {
            return Err(ParseError::Expected { what: "\"then\" after if-block",
                                              line });
        },
    }

    let then_block = parse_block(tokens,
                                 |token| {
                                     matches!(token, Token::End | Token::Else | Token::ElseIf)
                                 },
                                 "\"end if\", but got EOF")?;

    let mut else_block = Vec::new();
    match tokens.peek() {
        Some((Token::End, _)) => {
            tokens.next();
            match tokens.next() {
                Some((Token::If, _)) => {},
                _ => {
                    return Err(ParseError::Expected { what: "\"end if\", but got only \"end\"",
                                                      line });
                },
            }
        },
        Some((Token::ElseIf, _)) => {
            else_block.push(parse_if(tokens)?);
        },
        _ => {
            tokens.next();
            else_block = parse_block(tokens,
                                     |token| matches!(token, Token::End),
                                     "\"end if\"")?;
            tokens.next();
            match tokens.next() {
                Some((Token::If, _)) => {},
                _ => {
                    return Err(ParseError::Expected { what: "\"end if\"",
                                                      line });
                },
            }
        },
    }

    Ok(Node::If { condition: Box::new(condition),
                  then_block,
                  else_block })
}

/// Parses a `while` loop. A `then` after the condition is allowed and
/// discarded.
fn parse_while<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let Some((Token::While, line)) = tokens.next() else {
        return Err(ParseError::Expected { what: "\"while\"",
                                          line: 0 });
    };
    let line = *line;

    let condition = parse_expression(tokens)?;
    if let Some((Token::Then, _)) = tokens.peek() {
        tokens.next();
    }

    let body = parse_block(tokens,
                           |token| matches!(token, Token::End),
                           "\"end while\", but got EOF")?;

    tokens.next();
    match tokens.next() {
        Some((Token::While, _)) => {},
        _ => {
            return Err(ParseError::Expected { what: "\"end while\", but got only \"end\"",
                                              line });
        },
    }

    Ok(Node::While { condition: Box::new(condition),
                     body })
}

/// Parses a `for <name> in <sequence>` loop. A `then` after the header is
/// allowed and discarded.
fn parse_for<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let Some((Token::For, line)) = tokens.next() else {
        return Err(ParseError::Expected { what: "\"for\"",
                                          line: 0 });
    };
    let line = *line;

    let variable = match tokens.next() {
        Some((Token::Identifier(name), _)) => name.clone(),
        Some((_, found)) => {
            return Err(ParseError::Expected { what: "identifier",
                                              line: *found });
        },
        None => {
            return Err(ParseError::Expected { what: "identifier",
                                              line });
        },
    };

    match tokens.next() {
        Some((Token::In, _)) => {},
        Some((_, found)) => {
            return Err(ParseError::Expected { what: "\"in\" after \"for\"",
                                              line: *found });
        },
        None => {
            return Err(ParseError::Expected { what: "\"in\" after \"for\"",
                                              line });
        },
    }

    let sequence = parse_expression(tokens)?;
    if let Some((Token::Then, _)) = tokens.peek() {
        tokens.next();
    }

    let body = parse_block(tokens,
                           |token| matches!(token, Token::End),
                           "\"end for\", but got EOF")?;

    tokens.next();
    match tokens.next() {
        Some((Token::For, _)) => {},
        _ => {
            return Err(ParseError::Expected { what: "\"end for\", but got only \"end\"",
                                              line });
        },
    }

    Ok(Node::For { variable,
                   sequence: Box::new(sequence),
                   body })
}

/// Parses a function literal body; the `function` keyword is already
/// consumed.
///
/// Syntax:
/// ```text
///     function (a, b)
///         ...
///     end function
/// ```
/// The parameter list may be empty and may be wrapped across lines. The
/// returned definition is shared between the AST node and any runtime
/// values that end up holding the function.
pub fn parse_function_literal<'a, I>(tokens: &mut Peekable<I>,
                                     line: usize)
                                     -> ParseResult<Rc<FunctionDefinition>>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::LParen, _)) => {},
        _ => {
            return Err(ParseError::Expected { what: "'(' after function definition",
                                              line });
        },
    }

    let mut arg_names = Vec::new();
    let mut expect_separator = false;
    loop {
        match tokens.peek() {
            None => {
                return Err(ParseError::Expected { what: "')' after function arguments",
                                                  line });
            },
            Some((Token::RParen, _)) => {
                tokens.next();
                break;
            },
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
        match tokens.next() {
            Some((Token::Identifier(name), _)) => {
                arg_names.push(name.clone());
                expect_separator = true;
            },
            Some((_, found)) => {
                return Err(ParseError::Expected { what: "identifier as function argument",
                                                  line: *found });
            },
            None => {
                return Err(ParseError::Expected { what: "')' after function arguments",
                                                  line });
            },
        }
    }

    let body = parse_block(tokens,
                           |token| matches!(token, Token::End),
                           "\"end function\" after function body")?;

    tokens.next();
    match tokens.next() {
        Some((Token::Function, _)) => {},
        _ => {
            return Err(ParseError::Expected { what: "\"end function\", but got only \"end\"",
                                              line });
        },
    }

    Ok(Rc::new(FunctionDefinition { arg_names, body }))
}
