//! Native functions available to every program.
//!
//! Built-ins are looked up only after the scope chain misses, so a program
//! can shadow any of them with its own binding. Every built-in checks its own
//! arity and argument types and reports violations as a [`RuntimeError`].
//!
//! None of them mutates its input: array built-ins return new arrays.

mod array;


use hashbrown::HashMap;
use lazy_static::lazy_static;
use tracing::trace;

use crate::evaluator::RuntimeError;
use crate::object::Object;

/// Signature shared by all native functions.
pub type BuiltinFn = for<'a> fn(&[Object<'a>]) -> Result<Object<'a>, RuntimeError>;

pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl Builtin {
    pub fn call<'a>(&self, args: &[Object<'a>]) -> Result<Object<'a>, RuntimeError> {
        trace!(builtin = self.name, args = args.len(), "Calling builtin");
        (self.func)(args)
    }
}

impl core::fmt::Debug for Builtin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}

lazy_static! {
    static ref BUILTINS: HashMap<&'static str, Builtin> = {
        let table: [(&'static str, BuiltinFn); 6] = [
            ("len", len),
            ("first", array::first),
            ("last", array::last),
            ("rest", array::rest),
            ("push", array::push),
            ("pop", array::pop),
        ];
        table
            .into_iter()
            .map(|(name, func)| (name, Builtin { name, func }))
            .collect()
    };
}

/// Find the built-in called `name`.
pub fn lookup(name: &str) -> Option<&'static Builtin> {
    BUILTINS.get(name)
}

/// Names of all built-ins, in no particular order.
pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTINS.keys().copied()
}

/// Fail unless exactly `expected` arguments were passed.
pub(crate) fn check_arity(args: &[Object<'_>], expected: usize) -> Result<(), RuntimeError> {
    if args.len() != expected {
        return Err(RuntimeError::WrongArgumentCount {
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

/// Length of a string in characters, or of an array in elements.
fn len<'a>(args: &[Object<'a>]) -> Result<Object<'a>, RuntimeError> {
    check_arity(args, 1)?;
    let length = match &args[0] {
        Object::String(value) => value.chars().count(),
        Object::Array(elements) => elements.len(),
        other => {
            return Err(RuntimeError::UnsupportedArgument {
                builtin: "len",
                type_name: other.type_name(),
            });
        }
    };
    Ok(Object::Integer(length as i64))
}
