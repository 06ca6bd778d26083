mod cases;

use indoc::indoc;

test_case!(
    loop_variable_visible_after,
    input: "for (let i = 0; i < 5; i = i + 1) {} i;",
    output: "5",
);

test_case!(
    accumulate,
    input: "let x = 0; for (let i = 0; i < 10; i = i + 1) { x = x + i; } x",
    output: "45",
);

test_case!(
    omitted_init,
    input: "let i = 0; for (; i < 10; i = i + 1) { } i",
    output: "10",
);

test_case!(
    condition_only,
    input: "let n = 1; for (; n < 100;) { n = n * 2; } n",
    output: "128",
);

test_case!(
    single_statement_body,
    input: "let s = \"\"; for (let i = 0; i < 3; i = i + 1) s = s + \"ab\"; s",
    output: "ababab",
);

test_case!(
    loop_yields_no_value,
    input: "for (let i = 0; i < 3; i = i + 1) { i }",
    output: "null",
);

test_case!(
    infinite_loop_with_return,
    input: indoc! {"
        let firstOver = fn(limit) {
            let n = 1;
            for (;;) {
                if (n > limit) { return n; }
                n = n * 3;
            }
        };
        firstOver(100)
    "},
    output: "243",
);

test_case!(
    nested_loops,
    input: indoc! {"
        let count = 0;
        for (let i = 0; i < 3; i = i + 1) {
            for (let j = 0; j < 4; j = j + 1) {
                count = count + 1;
            }
        }
        count
    "},
    output: "12",
);

test_case!(
    error_in_step,
    input: "for (let i = 0; i < 3; i = i + true) { }",
    error: "type mismatch: INTEGER + BOOLEAN",
);

test_case!(
    missing_init_semicolon,
    input: "for (let i = 0 i < 3;) {}",
    parse_error: "no semicolon after for loop initialization, found INT",
);

// The header binds in the surrounding scope, so it cannot redeclare a name
// that scope already has.
test_case!(
    init_collides_with_existing_binding,
    input: indoc! {"
        let x = 0;
        let i = 5;
        for (let i = 0; i < 10; i = i + 1) { x = x + 1; }
        x;
    "},
    error: "identifier already exists: i",
);

test_case!(
    second_loop_redeclaring_variable,
    input: indoc! {"
        for (let i = 0; i < 2; i = i + 1) { }
        for (let i = 0; i < 2; i = i + 1) { }
    "},
    error: "identifier already exists: i",
);

test_case!(
    second_loop_reusing_variable,
    input: indoc! {"
        let x = 0;
        for (let i = 0; i < 2; i = i + 1) { x = x + 1; }
        for (i = 0; i < 3; i = i + 1) { x = x + 1; }
        [x, i]
    "},
    output: "[5, 3]",
);

test_case!(
    loop_in_block_leaves_outer_scope_free,
    input: indoc! {"
        let x = 0;
        let i = 5;
        { let y = 0; for (let i = 0; i < 10; i = i + 1) { x = x + 1; } }
        [x, i]
    "},
    output: "[10, 5]",
);
