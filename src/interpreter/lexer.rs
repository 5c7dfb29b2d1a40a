use logos::Logos;

use crate::error::ParseError;

/// Represents a lexical token in the source input.
///
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// Newlines are significant (they separate statements) and therefore produce
/// a dedicated [`Token::NewLine`] instead of being skipped. Only the plain
/// space character is whitespace; tabs and carriage returns fall through to
/// [`Token::Incorrect`] like any other unrecognizable byte.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(error = LexingError)]
pub enum Token {
    /// Numeric literal tokens such as `42`, `3.14` or `2e10`.
    ///
    /// A literal starts with a digit and greedily takes digits, `.` and a
    /// lowercase `e`; there is no sign inside the exponent. Text that looks
    /// like a number but does not parse is a lex error.
    #[regex(r"[0-9][0-9.e]*", parse_number)]
    Number(f64),
    /// A `"`-delimited string literal with the escapes
    /// `\n \t \r \" \\ \0`; any other escaped character stands for itself.
    /// Literals may span multiple lines.
    #[token("\"", lex_string)]
    String(String),
    /// Identifier tokens; variable or function names such as `x` or `sum`.
    /// Identifiers must not start with a digit or an underscore.
    #[regex(r"[a-zA-Z][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `true`
    #[token("true")]
    True,
    /// `false`
    #[token("false")]
    False,
    /// `nil`
    #[token("nil")]
    Nil,
    /// `while`
    #[token("while")]
    While,
    /// `for`
    #[token("for")]
    For,
    /// `function`
    #[token("function")]
    Function,
    /// `break`
    #[token("break")]
    Break,
    /// `continue`
    #[token("continue")]
    Continue,
    /// `end`
    #[token("end")]
    End,
    /// `return`
    #[token("return")]
    Return,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `elseif`
    #[token("elseif")]
    ElseIf,
    /// `in`
    #[token("in")]
    In,
    /// `then`
    #[token("then")]
    Then,
    /// `and`
    #[token("and")]
    And,
    /// `or`
    #[token("or")]
    Or,
    /// `not`
    #[token("not")]
    Not,
    /// `,`
    #[token(",")]
    Comma,
    /// `:`
    #[token(":")]
    Colon,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `^`
    #[token("^")]
    Caret,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `=`
    #[token("=")]
    Assign,
    /// `+=`
    #[token("+=")]
    PlusAssign,
    /// `-=`
    #[token("-=")]
    MinusAssign,
    /// `*=`
    #[token("*=")]
    StarAssign,
    /// `/=`
    #[token("/=")]
    SlashAssign,
    /// `%=`
    #[token("%=")]
    PercentAssign,
    /// `^=`
    #[token("^=")]
    CaretAssign,
    /// A statement separator produced for every `\n` in the source.
    #[token("\n", |lex| lex.extras.line += 1)]
    NewLine,
    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip)]
    Comment,
    /// `/* Multi line comments. */` — scanned by a callback so that an
    /// unclosed comment surfaces a dedicated error.
    #[token("/*", lex_block_comment)]
    BlockComment,
    /// Spaces between tokens. Only `0x20` counts as whitespace.
    #[regex(r" +", logos::skip)]
    Ignored,
    /// A byte no other rule recognizes.
    ///
    /// The scanner emits a single incorrect token and gives up on the rest
    /// of the input; the parser reports it wherever it surfaces, as
    /// `Incorrect expression` in operand position or
    /// `Unknown binary operation` in operator position.
    #[regex(r"[\s\S]", priority = 0)]
    Incorrect,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Why a token callback rejected its input.
///
/// Only [`LexingError::UnclosedComment`] aborts the scan; the other kinds
/// degrade to [`Token::Incorrect`] so the parser can report them in context.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LexingError {
    /// No token rule matched.
    #[default]
    UnrecognizedToken,
    /// A `/*` comment ran to the end of input.
    UnclosedComment,
    /// A `"` literal ran to the end of input.
    UnterminatedString,
    /// A number literal that does not parse as a double.
    MalformedNumber,
}

/// Parses a number literal from the current token slice.
fn parse_number(lex: &logos::Lexer<Token>) -> Result<f64, LexingError> {
    lex.slice().parse().map_err(|_| LexingError::MalformedNumber)
}

/// Scans a string literal starting right after the opening quote.
///
/// Escape sequences are resolved in place; a backslash before any character
/// outside the escape table yields that character unchanged. Newlines inside
/// the literal are kept and counted for line tracking.
fn lex_string(lex: &mut logos::Lexer<Token>) -> Result<String, LexingError> {
    let remainder = lex.remainder();
    let mut value = String::new();
    let mut characters = remainder.char_indices();

    while let Some((position, character)) = characters.next() {
        match character {
            '"' => {
                lex.bump(position + 1);
                return Ok(value);
            },
            '\\' => match characters.next() {
                Some((_, escaped)) => value.push(match escaped {
                                                     'n' => '\n',
                                                     't' => '\t',
                                                     'r' => '\r',
                                                     '"' => '"',
                                                     '\\' => '\\',
                                                     '0' => '\0',
                                                     other => other,
                                                 }),
                None => break,
            },
            '\n' => {
                lex.extras.line += 1;
                value.push('\n');
            },
            other => value.push(other),
        }
    }

    Err(LexingError::UnterminatedString)
}

/// Skips a `/* ... */` comment, counting the newlines it spans.
fn lex_block_comment(lex: &mut logos::Lexer<Token>) -> logos::FilterResult<(), LexingError> {
    match lex.remainder().find("*/") {
        Some(position) => {
            let newlines = lex.remainder()[..position].matches('\n').count();
            lex.extras.line += newlines;
            lex.bump(position + 2);
            logos::FilterResult::Skip
        },
        None => logos::FilterResult::Error(LexingError::UnclosedComment),
    }
}

/// Tokenizes a whole source buffer into `(token, line)` pairs.
///
/// The parser consumes the result through a peekable iterator, which gives it
/// the one-token lookahead the grammar needs. An unterminated string or a
/// number literal that does not parse degrades to a single
/// [`Token::Incorrect`], after which the scanner gives up on the rest of the
/// input and leaves the reporting to the parser.
///
/// # Errors
/// Returns a [`ParseError`] only for an unclosed block comment, the one
/// fatal lexing failure.
///
/// # Example
/// ```
/// use basil::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("x = 1").unwrap();
/// assert_eq!(tokens[0].0, Token::Identifier("x".to_string()));
/// assert_eq!(tokens[1].0, Token::Assign);
/// assert_eq!(tokens[2].0, Token::Number(1.0));
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next() {
        match token {
            Ok(Token::Incorrect) => {
                tokens.push((Token::Incorrect, lexer.extras.line));
                break;
            },
            Ok(token) => tokens.push((token, lexer.extras.line)),
            Err(LexingError::UnclosedComment) => {
                return Err(ParseError::UnclosedComment { line: lexer.extras.line });
            },
            Err(_) => {
                tokens.push((Token::Incorrect, lexer.extras.line));
                break;
            },
        }
    }

    Ok(tokens)
}
