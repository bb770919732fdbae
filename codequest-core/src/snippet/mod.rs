//! A tiny teaching language for the code-execution activities.
//!
//! Programs use `let`, assignment, `print`, `for i in a..b`, `while`,
//! `if`/`else`, `fn` and `return` over integers, strings and booleans.
//! Execution is sandboxed: no I/O besides captured `print` output, and a
//! step budget stops runaway loops. Strings, printed output and nesting
//! depth are capped so hostile input fails with an error instead of
//! exhausting memory or the stack.

mod interpreter;
mod lexer;
mod parser;

pub use interpreter::{Value, MAX_DEPTH, MAX_OUTPUT_LEN, MAX_STEPS, MAX_STRING_LEN};
pub use parser::MAX_NESTING;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnippetError {
    #[error("line {line}: unexpected character '{ch}'")]
    UnexpectedChar { line: usize, ch: char },

    #[error("line {line}: unterminated string")]
    UnterminatedString { line: usize },

    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("runtime error: {0}")]
    Runtime(String),

    #[error("program did not finish within {0} steps")]
    StepLimit(usize),
}

/// Run a snippet and return everything it printed, one entry per `print`
pub fn run(source: &str) -> Result<Vec<String>, SnippetError> {
    let tokens = lexer::tokenize(source)?;
    let program = parser::Parser::new(tokens).parse_program()?;
    tracing::debug!("Running snippet with {} statements", program.len());
    interpreter::Interpreter::new().run(&program)
}
