use alloc::rc::Rc;

use ecow::EcoString;
use hashbrown::HashMap;
use pretty_assertions::assert_eq;

use super::{HashKey, HashPair, Object};
use crate::builtins;

fn hash_of<'a>(entries: &[(Object<'a>, Object<'a>)]) -> Object<'a> {
    let mut pairs = HashMap::new();
    for (key, value) in entries {
        pairs.insert(
            key.hash_key().unwrap(),
            HashPair {
                key: key.clone(),
                value: value.clone(),
            },
        );
    }
    Object::Hash(Rc::new(pairs))
}

#[test]
fn test_type_names() {
    assert_eq!(Object::Integer(1).type_name(), "INTEGER");
    assert_eq!(Object::Boolean(true).type_name(), "BOOLEAN");
    assert_eq!(Object::from("s").type_name(), "STRING");
    assert_eq!(Object::Null.type_name(), "NULL");
    assert_eq!(Object::array([]).type_name(), "ARRAY");
    assert_eq!(hash_of(&[]).type_name(), "HASH");
    assert_eq!(Object::Error("boom".into()).type_name(), "ERROR");
}

#[test]
fn test_truthiness() {
    assert!(Object::Integer(0).is_truthy());
    assert!(Object::from("").is_truthy());
    assert!(Object::array([]).is_truthy());
    assert!(Object::Boolean(true).is_truthy());
    assert!(!Object::Boolean(false).is_truthy());
    assert!(!Object::Null.is_truthy());
}

#[test]
fn test_hash_keys() {
    assert_eq!(Object::Integer(1).hash_key(), Some(HashKey::Integer(1)));
    assert_eq!(Object::Boolean(false).hash_key(), Some(HashKey::Boolean(false)));
    assert_eq!(
        Object::from("a").hash_key(),
        Some(HashKey::String(EcoString::from("a")))
    );
    assert_eq!(Object::from("a").hash_key(), Object::string("a").hash_key());
    assert_eq!(Object::Null.hash_key(), None);
    assert_eq!(Object::array([]).hash_key(), None);
}

#[test]
fn test_hash_get() {
    let hash = hash_of(&[
        (Object::from("one"), Object::Integer(1)),
        (Object::Integer(2), Object::from("two")),
    ]);
    let one = hash.hash_get(&HashKey::String("one".into()));
    assert_eq!(one.and_then(|v| v.as_int()), Some(1));
    let two = hash.hash_get(&HashKey::Integer(2));
    assert_eq!(two.and_then(|v| v.as_str()), Some("two"));
    assert!(hash.hash_get(&HashKey::Boolean(true)).is_none());
}

#[test]
fn test_display() {
    assert_eq!(Object::Integer(-7).to_string(), "-7");
    assert_eq!(Object::Boolean(true).to_string(), "true");
    assert_eq!(Object::from("hi").to_string(), "hi");
    assert_eq!(Object::Null.to_string(), "null");
    assert_eq!(
        Object::array([Object::Integer(1), Object::from("a"), Object::Null]).to_string(),
        r#"[1, "a", null]"#
    );
    assert_eq!(
        hash_of(&[(Object::from("k"), Object::Integer(1))]).to_string(),
        r#"{"k": 1}"#
    );
    assert_eq!(Object::Error("boom".into()).to_string(), "ERROR: boom");
}

#[test]
fn test_hash_display_is_sorted() {
    let hash = hash_of(&[
        (Object::from("b"), Object::Integer(2)),
        (Object::Integer(7), Object::Boolean(true)),
        (Object::from("a"), Object::Integer(1)),
    ]);
    assert_eq!(hash.to_string(), r#"{"a": 1, "b": 2, 7: true}"#);
}

#[test]
fn test_builtin_display() {
    let len = builtins::lookup("len").unwrap();
    assert_eq!(Object::Builtin(len).to_string(), "builtin function len");
}

#[test]
fn test_identity_comparison() {
    let array = Object::array([Object::Integer(1)]);
    assert!(array.same(&array.clone()));
    assert!(!array.same(&Object::array([Object::Integer(1)])));

    let empty = Object::array([]);
    assert!(empty.same(&Object::array([])));
    assert!(!empty.same(&array));

    let hash = hash_of(&[]);
    assert!(hash.same(&hash.clone()));
    assert!(!hash.same(&hash_of(&[])));

    assert!(Object::Null.same(&Object::Null));
    assert!(Object::Boolean(true).same(&Object::Boolean(true)));
    assert!(!Object::Boolean(true).same(&Object::Null));

    let len = builtins::lookup("len").unwrap();
    assert!(Object::Builtin(len).same(&Object::Builtin(len)));
}

#[test]
fn test_clone_on_write_arrays() {
    let original = Object::array([Object::Integer(1), Object::Integer(2)]);
    let Object::Array(mut copy) = original.clone() else {
        unreachable!()
    };
    copy.push(Object::Integer(3));
    assert_eq!(original.as_array().map(<[_]>::len), Some(2));
    assert_eq!(copy.len(), 3);
}
