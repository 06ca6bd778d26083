//! Tree-walking evaluator.
//!
//! The evaluator interprets a parsed [`Program`] against an [`Environment`]
//! and produces a runtime [`Object`].
//!
//! ## Design Principles
//!
//! - **Never panic**: All adversarial inputs must be handled gracefully
//! - **Errors are values**: a failed evaluation yields [`Object::Error`]
//! - **Stack-safe**: Depth tracking bounds recursion through user functions,
//!   and the host stack is grown on demand so the bound is reached before
//!   the host runs out of stack
//!
//! ## Example
//!
//! ```
//! use monkey_core::{evaluator, object::Environment, parser};
//! use bumpalo::Bump;
//!
//! let arena = Bump::new();
//! let parsed = parser::parse(&arena, "let x = 40; x + 2");
//! assert!(parsed.is_ok());
//!
//! let env = Environment::new();
//! let result = evaluator::eval(parsed.program, &env);
//! assert_eq!(result.as_int(), Some(42));
//! ```

mod error;
mod eval;
mod operators;


pub use error::{ResourceExceededError, RuntimeError, Unwind};
pub use eval::Evaluator;

use crate::{api::ExecutionOptions, ast::Program, object::Environment, object::Object};

/// Evaluate a program with default limits.
///
/// Uses a call depth limit of 256 and no loop iteration limit.
pub fn eval<'a>(program: &'a Program<'a>, env: &Environment<'a>) -> Object<'a> {
    eval_with_options(ExecutionOptions::default(), program, env)
}

/// Evaluate a program with custom limits.
///
/// ## Example
///
/// ```ignore
/// // Allow deeper recursion for specific use case
/// let options = ExecutionOptions { max_depth: 5000, max_iterations: None };
/// let result = eval_with_options(options, program, &env);
/// ```
pub fn eval_with_options<'a>(
    options: ExecutionOptions,
    program: &'a Program<'a>,
    env: &Environment<'a>,
) -> Object<'a> {
    Evaluator::new(options).eval_program(program, env)
}
