//! Array built-ins: `first`, `last`, `rest`, `push`, `pop`.

use ecow::EcoVec;

use super::check_arity;
use crate::evaluator::RuntimeError;
use crate::object::Object;

fn array_arg<'o, 'a>(
    builtin: &'static str,
    arg: &'o Object<'a>,
) -> Result<&'o EcoVec<Object<'a>>, RuntimeError> {
    match arg {
        Object::Array(elements) => Ok(elements),
        other => Err(RuntimeError::UnsupportedArgument {
            builtin,
            type_name: other.type_name(),
        }),
    }
}

pub(super) fn first<'a>(args: &[Object<'a>]) -> Result<Object<'a>, RuntimeError> {
    check_arity(args, 1)?;
    let elements = array_arg("first", &args[0])?;
    elements.first().cloned().ok_or(RuntimeError::EmptyArray)
}

pub(super) fn last<'a>(args: &[Object<'a>]) -> Result<Object<'a>, RuntimeError> {
    check_arity(args, 1)?;
    let elements = array_arg("last", &args[0])?;
    elements.last().cloned().ok_or(RuntimeError::EmptyArray)
}

/// Every element but the first.
pub(super) fn rest<'a>(args: &[Object<'a>]) -> Result<Object<'a>, RuntimeError> {
    check_arity(args, 1)?;
    match array_arg("rest", &args[0])?.split_first() {
        Some((_, tail)) => Ok(Object::Array(EcoVec::from(tail))),
        None => Err(RuntimeError::EmptyArray),
    }
}

pub(super) fn push<'a>(args: &[Object<'a>]) -> Result<Object<'a>, RuntimeError> {
    check_arity(args, 2)?;
    // Cloning shares the buffer; `push` copies it before writing.
    let mut elements = array_arg("push", &args[0])?.clone();
    elements.push(args[1].clone());
    Ok(Object::Array(elements))
}

/// Every element but the last.
pub(super) fn pop<'a>(args: &[Object<'a>]) -> Result<Object<'a>, RuntimeError> {
    check_arity(args, 1)?;
    match array_arg("pop", &args[0])?.split_last() {
        Some((_, init)) => Ok(Object::Array(EcoVec::from(init))),
        None => Err(RuntimeError::EmptyArray),
    }
}
