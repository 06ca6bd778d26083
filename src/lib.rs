//! Monkey - a small dynamically-typed scripting language
//!
//! # Overview
//!
//! Monkey has integers, booleans, strings, arrays, hashes, first-class
//! functions with closures, variadic parameters, `if`/`else if` chains and
//! C-style `for` loops. This crate bundles the interpreter core and offers a
//! one-call entry point for hosts.
//!
//! # Quick Start
//!
//! ```
//! use monkey::{Environment, run};
//! use bumpalo::Bump;
//!
//! let arena = Bump::new();
//! let env = Environment::new();
//!
//! let result = run(&arena, "let twice = fn(f, x) { f(f(x)) }; twice(fn(n) { n * 3 }, 2)", &env).unwrap();
//! assert_eq!(result.as_int(), Some(18));
//! ```
//!
//! Bindings made by one call stay in `env` for the next, so a driver can
//! feed a session line by line.

use bumpalo::Bump;
use thiserror::Error;

// Re-export public API from monkey_core
pub use monkey_core::api::{ExecutionOptions, Session};
pub use monkey_core::object::{self, Environment, Object};
pub use monkey_core::{ast, builtins, evaluator, lexer, parser};

// Re-export errors
pub use monkey_core::evaluator::RuntimeError;
pub use monkey_core::parser::ParseError;

/// Why [`run`] did not produce a value.
#[derive(Debug, Error)]
pub enum Error {
    /// The source did not parse; nothing was evaluated.
    #[error("{}", summarize(.errors))]
    Parse { errors: Vec<ParseError> },

    /// Evaluation stopped with an error object carrying this message.
    #[error("{0}")]
    Runtime(String),
}

fn summarize(errors: &[ParseError]) -> String {
    match errors {
        [] => "parse failed".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{} (and {} more)", first, rest.len()),
    }
}

impl Error {
    /// All messages, in the order they were produced.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Error::Parse { errors } => errors.iter().map(ToString::to_string).collect(),
            Error::Runtime(message) => vec![message.clone()],
        }
    }
}

/// Parse and evaluate `source` in `env` with default limits.
pub fn run<'a>(arena: &'a Bump, source: &str, env: &Environment<'a>) -> Result<Object<'a>, Error> {
    run_with_options(ExecutionOptions::default(), arena, source, env)
}

/// Parse and evaluate `source` in `env`.
///
/// Runtime failures, which the core reports as [`Object::Error`] values, are
/// turned into [`Error::Runtime`] here.
pub fn run_with_options<'a>(
    options: ExecutionOptions,
    arena: &'a Bump,
    source: &str,
    env: &Environment<'a>,
) -> Result<Object<'a>, Error> {
    let parsed = parser::parse(arena, source);
    if !parsed.is_ok() {
        return Err(Error::Parse {
            errors: parsed.errors,
        });
    }
    match evaluator::eval_with_options(options, parsed.program, env) {
        Object::Error(message) => Err(Error::Runtime(message.to_string())),
        value => Ok(value),
    }
}
