//! Runtime values.
//!
//! [`Object`] is a closed sum of everything a program can compute. Scalars
//! are stored inline; strings and arrays use `ecow`'s reference-counted,
//! clone-on-write containers, so copying an `Object` is always cheap and an
//! array is never changed in place behind another holder's back.

mod environment;

#[cfg(test)]
mod object_test;

pub use environment::Environment;

use alloc::rc::Rc;
use core::fmt;

use ecow::{EcoString, EcoVec};
use hashbrown::HashMap;

use crate::ast::{Block, Parameter};
use crate::{String, Vec, format};
use crate::builtins::Builtin;

#[derive(Clone)]
pub enum Object<'a> {
    Integer(i64),
    Boolean(bool),
    String(EcoString),
    Null,
    Array(EcoVec<Object<'a>>),
    Hash(Rc<HashMap<HashKey, HashPair<'a>>>),
    Function(Rc<Function<'a>>),
    Builtin(&'static Builtin),
    /// Final result of a failed evaluation. Never an operand.
    Error(EcoString),
}

/// Key of a hash entry. Only integers, booleans and strings can be keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashKey {
    Integer(i64),
    Boolean(bool),
    String(EcoString),
}

/// A hash entry keeps the original key object for display.
#[derive(Debug, Clone)]
pub struct HashPair<'a> {
    pub key: Object<'a>,
    pub value: Object<'a>,
}

/// A user-defined function closed over its defining scope.
pub struct Function<'a> {
    pub params: &'a [Parameter<'a>],
    pub body: &'a Block<'a>,
    pub env: Environment<'a>,
}

impl<'a> Object<'a> {
    pub fn string(value: impl Into<EcoString>) -> Self {
        Object::String(value.into())
    }

    pub fn array(elements: impl IntoIterator<Item = Object<'a>>) -> Self {
        Object::Array(elements.into_iter().collect())
    }

    /// Name of the value's type as it appears in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Integer(_) => "INTEGER",
            Object::Boolean(_) => "BOOLEAN",
            Object::String(_) => "STRING",
            Object::Null => "NULL",
            Object::Array(_) => "ARRAY",
            Object::Hash(_) => "HASH",
            Object::Function(_) => "FUNCTION",
            Object::Builtin(_) => "BUILTIN",
            Object::Error(_) => "ERROR",
        }
    }

    /// Only `false` and `null` are falsy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Boolean(false) | Object::Null)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }

    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Object::Integer(value) => Some(HashKey::Integer(*value)),
            Object::Boolean(value) => Some(HashKey::Boolean(*value)),
            Object::String(value) => Some(HashKey::String(value.clone())),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Object::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Object::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Object::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Object<'a>]> {
        match self {
            Object::Array(elements) => Some(elements.as_slice()),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&str> {
        match self {
            Object::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Look up `key` in a hash object.
    pub fn hash_get(&self, key: &HashKey) -> Option<&Object<'a>> {
        match self {
            Object::Hash(pairs) => pairs.get(key).map(|pair| &pair.value),
            _ => None,
        }
    }

    /// Identity comparison used by `==` and `!=` on operands that are neither
    /// integers nor strings.
    ///
    /// Empty arrays own no allocation, so any two of them are the same.
    pub fn same(&self, other: &Object<'a>) -> bool {
        match (self, other) {
            (Object::Boolean(a), Object::Boolean(b)) => a == b,
            (Object::Null, Object::Null) => true,
            (Object::Array(a), Object::Array(b)) if a.is_empty() || b.is_empty() => {
                a.is_empty() && b.is_empty()
            }
            (Object::Array(a), Object::Array(b)) => {
                a.len() == b.len() && core::ptr::eq(a.as_ptr(), b.as_ptr())
            }
            (Object::Hash(a), Object::Hash(b)) => Rc::ptr_eq(a, b),
            (Object::Function(a), Object::Function(b)) => Rc::ptr_eq(a, b),
            (Object::Builtin(a), Object::Builtin(b)) => core::ptr::eq(*a, *b),
            _ => false,
        }
    }
}

impl From<i64> for Object<'_> {
    fn from(value: i64) -> Self {
        Object::Integer(value)
    }
}

impl From<bool> for Object<'_> {
    fn from(value: bool) -> Self {
        Object::Boolean(value)
    }
}

impl From<&str> for Object<'_> {
    fn from(value: &str) -> Self {
        Object::String(value.into())
    }
}

impl fmt::Display for Object<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{}", value),
            Object::Boolean(value) => write!(f, "{}", value),
            Object::String(value) => f.write_str(value),
            Object::Null => f.write_str("null"),
            Object::Array(elements) => {
                f.write_str("[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", Inspect(element))?;
                }
                f.write_str("]")
            }
            Object::Hash(pairs) => {
                // Map order is unstable; sort so output is reproducible.
                let mut entries: Vec<String> = pairs
                    .values()
                    .map(|pair| format!("{}: {}", Inspect(&pair.key), Inspect(&pair.value)))
                    .collect();
                entries.sort();
                write!(f, "{{{}}}", entries.join(", "))
            }
            Object::Function(function) => write!(f, "{}", function),
            Object::Builtin(builtin) => write!(f, "builtin function {}", builtin.name),
            Object::Error(message) => write!(f, "ERROR: {}", message),
        }
    }
}

/// Renders strings quoted, as they appear nested inside arrays and hashes.
struct Inspect<'o, 'a>(&'o Object<'a>);

impl fmt::Display for Inspect<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Object::String(value) => write!(f, "{:?}", value.as_str()),
            other => write!(f, "{}", other),
        }
    }
}

impl fmt::Debug for Object<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::String(value) => write!(f, "String({:?})", value.as_str()),
            Object::Error(message) => write!(f, "Error({:?})", message.as_str()),
            other => write!(f, "{}({})", other.type_name(), other),
        }
    }
}

impl fmt::Display for Function<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("fn(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", param)?;
        }
        write!(f, ") {}", self.body)
    }
}
