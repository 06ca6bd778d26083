//! Prefix and infix operator implementations.
//!
//! Assignment is not handled here: it needs the unevaluated left operand.

use crate::{
    ast::{InfixOp, PrefixOp},
    evaluator::RuntimeError,
    object::Object,
};

pub(super) fn eval_prefix<'a>(op: PrefixOp, right: Object<'a>) -> Result<Object<'a>, RuntimeError> {
    match op {
        PrefixOp::Not => Ok(Object::Boolean(!right.is_truthy())),
        PrefixOp::Neg => match right {
            Object::Integer(value) => Ok(Object::Integer(value.wrapping_neg())),
            other => Err(RuntimeError::UnknownPrefixOperator {
                op: op.symbol(),
                operand: other.type_name(),
            }),
        },
    }
}

/// Apply a non-assignment infix operator to two evaluated operands.
///
/// Integer pairs and string pairs have their own operator sets. Any other
/// pair of the same type only supports `==` and `!=`, by identity.
pub(super) fn eval_infix<'a>(
    op: InfixOp,
    left: Object<'a>,
    right: Object<'a>,
) -> Result<Object<'a>, RuntimeError> {
    match (&left, &right) {
        (Object::Integer(l), Object::Integer(r)) => eval_binary_int(op, *l, *r),
        (Object::String(l), Object::String(r)) => eval_binary_str(op, l, r),
        _ if left.type_name() != right.type_name() => Err(RuntimeError::TypeMismatch {
            left: left.type_name(),
            op: op.symbol(),
            right: right.type_name(),
        }),
        _ => match op {
            InfixOp::Eq => Ok(Object::Boolean(left.same(&right))),
            InfixOp::NotEq => Ok(Object::Boolean(!left.same(&right))),
            _ => Err(unknown_infix(op, &left, &right)),
        },
    }
}

/// Evaluate a binary operation on two integers.
///
/// Uses wrapping arithmetic to prevent panics on overflow.
/// Division by zero returns an error.
pub(super) fn eval_binary_int<'a>(op: InfixOp, left: i64, right: i64) -> Result<Object<'a>, RuntimeError> {
    let value = match op {
        InfixOp::Add => Object::Integer(left.wrapping_add(right)),
        InfixOp::Sub => Object::Integer(left.wrapping_sub(right)),
        InfixOp::Mul => Object::Integer(left.wrapping_mul(right)),
        InfixOp::Div => {
            if right == 0 {
                return Err(RuntimeError::DivisionByZero);
            }
            // Use wrapping_div to handle i64::MIN / -1 case
            Object::Integer(left.wrapping_div(right))
        }
        InfixOp::Lt => Object::Boolean(left < right),
        InfixOp::Gt => Object::Boolean(left > right),
        InfixOp::Eq => Object::Boolean(left == right),
        InfixOp::NotEq => Object::Boolean(left != right),
        InfixOp::Assign => {
            return Err(RuntimeError::UnknownInfixOperator {
                left: "INTEGER",
                op: op.symbol(),
                right: "INTEGER",
            });
        }
    };
    Ok(value)
}

/// Concatenation and lexicographic comparison.
fn eval_binary_str<'a>(op: InfixOp, left: &str, right: &str) -> Result<Object<'a>, RuntimeError> {
    let value = match op {
        InfixOp::Add => {
            let mut joined = ecow::EcoString::from(left);
            joined.push_str(right);
            Object::String(joined)
        }
        InfixOp::Lt => Object::Boolean(left < right),
        InfixOp::Gt => Object::Boolean(left > right),
        InfixOp::Eq => Object::Boolean(left == right),
        InfixOp::NotEq => Object::Boolean(left != right),
        _ => {
            return Err(RuntimeError::UnknownInfixOperator {
                left: "STRING",
                op: op.symbol(),
                right: "STRING",
            });
        }
    };
    Ok(value)
}

fn unknown_infix(op: InfixOp, left: &Object<'_>, right: &Object<'_>) -> RuntimeError {
    RuntimeError::UnknownInfixOperator {
        left: left.type_name(),
        op: op.symbol(),
        right: right.type_name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ToString;

    fn int(op: InfixOp, left: i64, right: i64) -> Object<'static> {
        eval_binary_int(op, left, right).unwrap()
    }

    #[test]
    fn test_int_arithmetic() {
        assert_eq!(int(InfixOp::Add, 2, 3).as_int(), Some(5));
        assert_eq!(int(InfixOp::Add, -5, 3).as_int(), Some(-2));
        assert_eq!(int(InfixOp::Sub, 3, 10).as_int(), Some(-7));
        assert_eq!(int(InfixOp::Mul, -2, 5).as_int(), Some(-10));
    }

    #[test]
    fn test_int_div_truncates() {
        assert_eq!(int(InfixOp::Div, 10, 2).as_int(), Some(5));
        assert_eq!(int(InfixOp::Div, 7, 3).as_int(), Some(2));
        assert_eq!(int(InfixOp::Div, -7, 2).as_int(), Some(-3));
    }

    #[test]
    fn test_int_div_by_zero() {
        let result = eval_binary_int(InfixOp::Div, 10, 0);
        assert!(matches!(result, Err(RuntimeError::DivisionByZero)));
    }

    #[test]
    fn test_int_wrapping_overflow() {
        // Test that we wrap on overflow rather than panic
        assert_eq!(int(InfixOp::Add, i64::MAX, 1).as_int(), Some(i64::MIN));
        assert_eq!(int(InfixOp::Mul, i64::MAX, 2).as_int(), Some(-2));
        assert_eq!(int(InfixOp::Div, i64::MIN, -1).as_int(), Some(i64::MIN));
        let negated = eval_prefix(PrefixOp::Neg, Object::Integer(i64::MIN)).unwrap();
        assert_eq!(negated.as_int(), Some(i64::MIN));
    }

    #[test]
    fn test_int_comparison() {
        assert_eq!(int(InfixOp::Lt, 1, 2).as_bool(), Some(true));
        assert_eq!(int(InfixOp::Gt, 1, 2).as_bool(), Some(false));
        assert_eq!(int(InfixOp::Eq, 2, 2).as_bool(), Some(true));
        assert_eq!(int(InfixOp::NotEq, 2, 2).as_bool(), Some(false));
    }

    #[test]
    fn test_strings() {
        let joined = eval_infix(InfixOp::Add, Object::from("foo"), Object::from("bar")).unwrap();
        assert_eq!(joined.as_str(), Some("foobar"));
        let less = eval_infix(InfixOp::Lt, Object::from("abc"), Object::from("abd")).unwrap();
        assert_eq!(less.as_bool(), Some(true));
        let equal = eval_infix(InfixOp::Eq, Object::from("a"), Object::from("a")).unwrap();
        assert_eq!(equal.as_bool(), Some(true));

        let err = eval_infix(InfixOp::Sub, Object::from("a"), Object::from("b")).unwrap_err();
        assert_eq!(err.to_string(), "unknown operator: STRING - STRING");
    }

    #[test]
    fn test_mixed_types() {
        let err = eval_infix(InfixOp::Add, Object::Integer(5), Object::Boolean(true)).unwrap_err();
        assert_eq!(err.to_string(), "type mismatch: INTEGER + BOOLEAN");
        // Equality across types is still a mismatch.
        let err = eval_infix(InfixOp::Eq, Object::Integer(1), Object::from("1")).unwrap_err();
        assert_eq!(err.to_string(), "type mismatch: INTEGER == STRING");
    }

    #[test]
    fn test_same_type_identity_equality() {
        let eq = eval_infix(InfixOp::Eq, Object::Boolean(true), Object::Boolean(true)).unwrap();
        assert_eq!(eq.as_bool(), Some(true));
        let ne = eval_infix(InfixOp::NotEq, Object::Null, Object::Null).unwrap();
        assert_eq!(ne.as_bool(), Some(false));
        let err = eval_infix(InfixOp::Add, Object::Boolean(true), Object::Boolean(false)).unwrap_err();
        assert_eq!(err.to_string(), "unknown operator: BOOLEAN + BOOLEAN");
    }

    #[test]
    fn test_prefix() {
        assert_eq!(
            eval_prefix(PrefixOp::Not, Object::Integer(0)).unwrap().as_bool(),
            Some(false)
        );
        assert_eq!(eval_prefix(PrefixOp::Not, Object::Null).unwrap().as_bool(), Some(true));
        let err = eval_prefix(PrefixOp::Neg, Object::Boolean(true)).unwrap_err();
        assert_eq!(err.to_string(), "unknown operator: -BOOLEAN");
    }
}
