//! Public API for embedding the interpreter.
//!
//! Two entry points are offered:
//!
//! 1. **One-shot**: [`parser::parse`](crate::parser::parse) followed by
//!    [`evaluator::eval`](crate::evaluator::eval) against an
//!    [`Environment`](crate::object::Environment) of your choice.
//! 2. **Session**: [`Session`] keeps a global environment alive between
//!    inputs, for interactive drivers.
//!
//! Both honour [`ExecutionOptions`].

pub mod options;
pub mod session;

pub use options::ExecutionOptions;
pub use session::Session;
