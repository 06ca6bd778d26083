#![allow(dead_code)]

use bumpalo::Bump;
use monkey::{Environment, Error, run};
use once_cell::sync::Lazy;

/// An end-to-end program and the result it must produce.
pub struct Scenario {
    pub name: &'static str,
    pub input: &'static str,
    pub expected: Result<&'static str, &'static str>,
}

pub static SCENARIOS: Lazy<Vec<Scenario>> = Lazy::new(|| {
    vec![
        Scenario {
            name: "let_chain",
            input: "let a = 5; let b = a; let c = a + b + 5; c;",
            expected: Ok("15"),
        },
        Scenario {
            name: "closure_adder",
            input: "let newAdder = fn(x) { fn(y) { x + y } }; let addTwo = newAdder(2); addTwo(3);",
            expected: Ok("5"),
        },
        Scenario {
            name: "loop_variable_after_loop",
            input: "for (let i = 0; i < 5; i = i + 1) {} i;",
            expected: Ok("5"),
        },
        Scenario {
            name: "missing_argument",
            input: "fn(x) { }()",
            expected: Err("wrong number of arguments: expected=1, got=0"),
        },
        Scenario {
            name: "type_mismatch",
            input: "5 + true;",
            expected: Err("type mismatch: INTEGER + BOOLEAN"),
        },
    ]
});

/// Run `input` in a fresh environment and render the outcome.
///
/// A value is rendered with `Display`; a runtime error yields its message;
/// parse errors yield the first message.
pub fn eval(input: &str) -> Result<String, String> {
    let arena = Bump::new();
    let env = Environment::new();
    match run(&arena, input, &env) {
        Ok(value) => Ok(value.to_string()),
        Err(Error::Runtime(message)) => Err(message),
        Err(err @ Error::Parse { .. }) => Err(err.messages().remove(0)),
    }
}

pub fn assert_output(input: &str, expected: &str) {
    match eval(input) {
        Ok(actual) => pretty_assertions::assert_eq!(actual, expected, "input: {}", input),
        Err(message) => panic!("evaluation failed for: {}\nError: {}", input, message),
    }
}

pub fn assert_runtime_error(input: &str, expected: &str) {
    let arena = Bump::new();
    let env = Environment::new();
    match run(&arena, input, &env) {
        Err(Error::Runtime(message)) => {
            pretty_assertions::assert_eq!(message, expected, "input: {}", input)
        }
        other => panic!("expected runtime error for: {}\nGot: {:?}", input, other),
    }
}

pub fn assert_parse_error(input: &str, expected: &str) {
    let arena = Bump::new();
    let env = Environment::new();
    match run(&arena, input, &env) {
        Err(err @ Error::Parse { .. }) => {
            pretty_assertions::assert_eq!(err.messages()[0], expected, "input: {}", input)
        }
        other => panic!("expected parse error for: {}\nGot: {:?}", input, other),
    }
}

#[macro_export]
macro_rules! test_case {
    ($name:ident, input: $input:expr, output: $output:expr $(,)?) => {
        #[test]
        fn $name() {
            cases::assert_output($input, $output);
        }
    };
    ($name:ident, input: $input:expr, error: $error:expr $(,)?) => {
        #[test]
        fn $name() {
            cases::assert_runtime_error($input, $error);
        }
    };
    ($name:ident, input: $input:expr, parse_error: $error:expr $(,)?) => {
        #[test]
        fn $name() {
            cases::assert_parse_error($input, $error);
        }
    };
}
