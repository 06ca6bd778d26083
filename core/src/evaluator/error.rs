//! Runtime evaluation errors.
//!
//! A [`RuntimeError`] aborts the whole evaluation: it propagates out of every
//! enclosing expression, block, loop and call until it reaches the program
//! level, where it is turned into an [`Object::Error`] carrying the message.
//!
//! # Error Categories
//!
//! - **Runtime errors**: operator misuse, unknown names, bad indexes, arity
//!   mismatches and similar problems caused by the program itself.
//!
//! - **Resource exceeded errors**: limits configured through
//!   [`ExecutionOptions`](crate::api::ExecutionOptions) were hit.

use crate::String;
use crate::object::Object;
use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Infix operator applied to operands of different types.
    TypeMismatch {
        left: &'static str,
        op: &'static str,
        right: &'static str,
    },
    UnknownPrefixOperator {
        op: &'static str,
        operand: &'static str,
    },
    UnknownInfixOperator {
        left: &'static str,
        op: &'static str,
        right: &'static str,
    },
    UnknownIdentifier {
        name: String,
    },
    /// `let` of a name already bound in the same scope.
    AlreadyDefined {
        name: String,
    },
    InvalidAssignTarget,
    /// Binding the result of an expression that produced no value.
    EmptyAssignment,
    MisplacedVariadic,
    WrongArgumentCount {
        expected: usize,
        got: usize,
    },
    NotAFunction {
        type_name: &'static str,
    },
    UnusableHashKey {
        type_name: &'static str,
    },
    IndexNotSupported {
        type_name: &'static str,
    },
    IndexOutOfBounds {
        index: i64,
    },
    NegativeIndex {
        index: i64,
    },
    DivisionByZero,
    /// Built-in called with an argument of the wrong type.
    UnsupportedArgument {
        builtin: &'static str,
        type_name: &'static str,
    },
    /// `first`, `last`, `rest` or `pop` on `[]`.
    EmptyArray,
    ResourceExceeded(ResourceExceededError),
}

/// Configured evaluation limits that were exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceExceededError {
    /// Too many nested user-function calls.
    StackOverflow { max_depth: usize },
    /// A single `for` loop ran its body too many times.
    IterationLimit { max_iterations: usize },
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::TypeMismatch { left, op, right } => {
                write!(f, "type mismatch: {} {} {}", left, op, right)
            }
            RuntimeError::UnknownPrefixOperator { op, operand } => {
                write!(f, "unknown operator: {}{}", op, operand)
            }
            RuntimeError::UnknownInfixOperator { left, op, right } => {
                write!(f, "unknown operator: {} {} {}", left, op, right)
            }
            RuntimeError::UnknownIdentifier { name } => {
                write!(f, "identifier not found: {}", name)
            }
            RuntimeError::AlreadyDefined { name } => {
                write!(f, "identifier already exists: {}", name)
            }
            RuntimeError::InvalidAssignTarget => {
                write!(f, "Left side of assign expression must be a variable")
            }
            RuntimeError::EmptyAssignment => write!(f, "cannot assign empty value to variable"),
            RuntimeError::MisplacedVariadic => write!(
                f,
                "variadic parameter must be the last parameter of a function"
            ),
            RuntimeError::WrongArgumentCount { expected, got } => write!(
                f,
                "wrong number of arguments: expected={}, got={}",
                expected, got
            ),
            RuntimeError::NotAFunction { type_name } => {
                write!(f, "not a function: {}", type_name)
            }
            RuntimeError::UnusableHashKey { type_name } => {
                write!(f, "unusable as hash key: {}", type_name)
            }
            RuntimeError::IndexNotSupported { type_name } => {
                write!(f, "index operator not supported: {}", type_name)
            }
            RuntimeError::IndexOutOfBounds { index } => {
                write!(f, "index outside array bounds: {}", index)
            }
            RuntimeError::NegativeIndex { index } => {
                write!(f, "array index must be non-negative: {}", index)
            }
            RuntimeError::DivisionByZero => write!(f, "division by zero"),
            RuntimeError::UnsupportedArgument { builtin, type_name } => {
                write!(f, "argument to `{}` not supported: {}", builtin, type_name)
            }
            RuntimeError::EmptyArray => write!(f, "array has no elements"),
            RuntimeError::ResourceExceeded(e) => write!(f, "{}", e),
        }
    }
}

impl fmt::Display for ResourceExceededError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceExceededError::StackOverflow { max_depth } => write!(
                f,
                "stack overflow: call depth exceeded maximum of {}",
                max_depth
            ),
            ResourceExceededError::IterationLimit { max_iterations } => {
                write!(f, "loop iteration limit exceeded: {}", max_iterations)
            }
        }
    }
}

impl From<ResourceExceededError> for RuntimeError {
    fn from(e: ResourceExceededError) -> Self {
        RuntimeError::ResourceExceeded(e)
    }
}

impl std::error::Error for RuntimeError {}

impl std::error::Error for ResourceExceededError {}

/// Non-local exit from the evaluation of a node.
///
/// `Return` travels up to the nearest enclosing function call (or the
/// program); `Error` travels all the way up to the program.
#[derive(Debug)]
pub enum Unwind<'a> {
    Return(Object<'a>),
    Error(RuntimeError),
}

impl From<RuntimeError> for Unwind<'_> {
    fn from(e: RuntimeError) -> Self {
        Unwind::Error(e)
    }
}

impl From<ResourceExceededError> for Unwind<'_> {
    fn from(e: ResourceExceededError) -> Self {
        Unwind::Error(e.into())
    }
}
