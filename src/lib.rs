//! # basil
//!
//! basil is an interpreter for a small dynamically-typed imperative
//! scripting language with first-class functions, numbers, strings, lists
//! and a fixed built-in library. Source text is tokenized, parsed into a
//! tree and walked to completion; the first error of any kind aborts the
//! run with a single diagnostic line.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::{BufRead, Write};

use crate::interpreter::evaluator::Evaluator;

/// Defines the structure of parsed code.
///
/// This module declares the `Node` enum and related types that represent the
/// syntactic structure of source code as a tree. The AST is built by the
/// parser and consumed by the evaluator.
///
/// # Responsibilities
/// - Defines node variants for all language constructs.
/// - Declares the operator enums and the built-in function table shared by
///   the parser and the evaluator.
/// - Owns the shared function-definition type referenced by both the tree
///   and runtime values.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing,
/// or evaluating code. Parse errors carry source line numbers; runtime
/// errors carry the exact diagnostic wording the language promises.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Supports integration with standard error handling traits.
/// - Exposes a top-level error sum for whole-run entry points.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations and error handling to provide a complete runtime for
/// source code execution.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides the data flow `source → tokens → tree → output`.
pub mod interpreter;

pub use error::Error;

/// Parses and executes a program.
///
/// `input` feeds the program's `read()` built-in; everything the program
/// prints, and nothing else, goes to `output`.
///
/// # Errors
/// Returns the first parse or runtime error; nothing is written to `output`
/// beyond what the program produced before failing.
///
/// # Examples
/// ```
/// use std::io;
///
/// let mut output = Vec::new();
/// basil::run("print(2 + 2)", &mut io::empty(), &mut output).unwrap();
/// assert_eq!(output, b"4");
/// ```
///
/// ```
/// use std::io;
///
/// // An unknown variable aborts the run with a diagnostic.
/// let mut output = Vec::new();
/// let result = basil::run("print(x)", &mut io::empty(), &mut output);
/// assert!(result.is_err());
/// ```
pub fn run(source: &str,
           input: &mut impl BufRead,
           output: &mut impl Write)
           -> Result<(), Error> {
    let program = interpreter::parser::parse(source)?;
    let mut evaluator = Evaluator::new(input, output);
    evaluator.run(&program)?;
    Ok(())
}

/// Interprets a whole input stream as a program.
///
/// The stream is read to its end and executed; on failure the diagnostic
/// message followed by a newline is written to `output` and `false` is
/// returned. `read()` calls performed by the program continue from the same
/// (by then exhausted) stream and yield empty strings.
pub fn interpret(input: &mut impl BufRead, output: &mut impl Write) -> bool {
    let mut source = String::new();
    if input.read_to_string(&mut source).is_err() {
        return false;
    }

    match run(&source, input, output) {
        Ok(()) => true,
        Err(error) => {
            let _ = writeln!(output, "{error}");
            false
        },
    }
}
