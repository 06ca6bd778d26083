//! A long-lived evaluation session.

use super::ExecutionOptions;
use crate::evaluator::{self, RuntimeError};
use crate::object::{Environment, Object};
use crate::parser::{self, ParseError};
use crate::Vec;
use bumpalo::Bump;
use tracing::debug;

/// Parses and evaluates successive inputs against one global environment.
///
/// Top-level `let` bindings made by one input are visible to the next, the
/// way an interactive session expects.
///
/// # Lifetimes
///
/// - `'a`: Lifetime of the arena holding every parsed program. Functions
///   defined by one input keep pointing into it, so the arena must outlive
///   the session.
///
/// # Example
///
/// ```
/// use monkey_core::api::{ExecutionOptions, Session};
/// use bumpalo::Bump;
///
/// let arena = Bump::new();
/// let session = Session::new(&arena, ExecutionOptions::default());
///
/// session.eval("let add = fn(a, b) { a + b };").unwrap();
/// let result = session.eval("add(40, 2)").unwrap();
/// assert_eq!(result.as_int(), Some(42));
/// ```
pub struct Session<'a> {
    arena: &'a Bump,
    environment: Environment<'a>,
    options: ExecutionOptions,
}

impl<'a> Session<'a> {
    pub fn new(arena: &'a Bump, options: ExecutionOptions) -> Self {
        Self {
            arena,
            environment: Environment::new(),
            options,
        }
    }

    /// Bind a host-provided value in the global scope.
    pub fn define(&self, name: &str, value: Object<'a>) -> Result<(), RuntimeError> {
        let name = self.arena.alloc_str(name);
        self.environment.define(name, value)
    }

    /// Access the global environment.
    pub fn environment(&self) -> &Environment<'a> {
        &self.environment
    }

    pub fn options(&self) -> &ExecutionOptions {
        &self.options
    }

    /// Parse and evaluate `source`.
    ///
    /// Parse errors are returned as `Err` and nothing is evaluated. Runtime
    /// errors are a successful result holding an [`Object::Error`].
    pub fn eval(&self, source: &str) -> Result<Object<'a>, Vec<ParseError>> {
        let parsed = parser::parse(self.arena, source);
        if !parsed.is_ok() {
            debug!(errors = parsed.errors.len(), "Input rejected by parser");
            return Err(parsed.errors);
        }
        Ok(evaluator::eval_with_options(
            self.options,
            parsed.program,
            &self.environment,
        ))
    }
}
