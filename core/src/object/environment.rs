use alloc::rc::Rc;
use core::cell::RefCell;

use hashbrown::HashMap;

use super::Object;
use crate::evaluator::RuntimeError;

/// A handle to one scope of name bindings.
///
/// Cloning the handle shares the scope: a closure that captured it sees
/// later assignments made through any other handle, and vice versa.
#[derive(Clone, Default)]
pub struct Environment<'a> {
    scope: Rc<RefCell<Scope<'a>>>,
}

#[derive(Default)]
struct Scope<'a> {
    values: HashMap<&'a str, Object<'a>>,
    outer: Option<Environment<'a>>,
}

impl<'a> Environment<'a> {
    /// A fresh root scope with no bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// A new empty scope whose lookups fall back to `outer`.
    pub fn enclosed(outer: &Environment<'a>) -> Self {
        Self {
            scope: Rc::new(RefCell::new(Scope {
                values: HashMap::new(),
                outer: Some(outer.clone()),
            })),
        }
    }

    /// Resolve `name`, innermost scope first.
    pub fn get(&self, name: &str) -> Option<Object<'a>> {
        let mut current = self.clone();
        loop {
            let next = {
                let scope = current.scope.borrow();
                if let Some(value) = scope.values.get(name) {
                    return Some(value.clone());
                }
                scope.outer.clone()?
            };
            current = next;
        }
    }

    /// Bind `name` in this scope. Fails when this scope already has it;
    /// bindings in outer scopes are shadowed.
    pub fn define(&self, name: &'a str, value: Object<'a>) -> Result<(), RuntimeError> {
        let mut scope = self.scope.borrow_mut();
        if scope.values.contains_key(name) {
            return Err(RuntimeError::AlreadyDefined {
                name: name.into(),
            });
        }
        scope.values.insert(name, value);
        Ok(())
    }

    /// Update the nearest existing binding of `name`.
    pub fn assign(&self, name: &str, value: Object<'a>) -> Result<(), RuntimeError> {
        let mut current = self.clone();
        loop {
            let next = {
                let mut scope = current.scope.borrow_mut();
                if let Some(slot) = scope.values.get_mut(name) {
                    *slot = value;
                    return Ok(());
                }
                scope.outer.clone()
            };
            match next {
                Some(outer) => current = outer,
                None => {
                    return Err(RuntimeError::UnknownIdentifier {
                        name: name.into(),
                    });
                }
            }
        }
    }
}
