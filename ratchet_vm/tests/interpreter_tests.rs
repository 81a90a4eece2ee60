mod common;

use common::{assert_normal, assert_throws};

#[test]
fn arithmetic_and_comparison_operators() {
    assert_normal("1 + 2 * 3", "7");
    assert_normal("10 % 3", "1");
    assert_normal("2 ** 10", "1024");
    assert_normal("7 / 2", "3.5");
    assert_normal("1 / 0", "Infinity");
    assert_normal("0 / 0", "NaN");
    assert_normal("5 | 3", "7");
    assert_normal("5 & 3", "1");
    assert_normal("5 ^ 3", "6");
    assert_normal("1 << 5", "32");
    assert_normal("-8 >> 1", "-4");
    assert_normal("-1 >>> 28", "15");
    assert_normal("~0", "-1");
    assert_normal("1 < 2", "true");
    assert_normal("'a' < 'b'", "true");
    assert_normal("2 <= 2", "true");
    assert_normal("NaN <= NaN", "false");
    assert_normal("1 == '1'", "true");
    assert_normal("1 === '1'", "false");
    assert_normal("null == undefined", "true");
    assert_normal("null === undefined", "false");
}

#[test]
fn string_concatenation_and_templates() {
    assert_normal("'a' + 'b'", "'ab'");
    assert_normal("1 + '2'", "'12'");
    assert_normal("'' + true", "'true'");
    assert_normal("'' + null + undefined", "'nullundefined'");
    assert_normal("`a${1 + 1}b${'c'}`", "'a2bc'");
    assert_normal(
        "function tag(strings, v) { return strings[0] + strings.raw[1] + v; } tag`x${5}y`",
        "'xy5'",
    );
}

#[test]
fn bigint_arithmetic() {
    assert_normal("1n + 2n", "3n");
    assert_normal("10n ** 20n", "100000000000000000000n");
    assert_normal("7n / 2n", "3n");
    assert_normal("typeof 1n", "'bigint'");
    assert_normal("1n < 2", "true");
    assert_normal("2n == 2", "true");
    assert_throws("1n + 1", "TypeError");
}

#[test]
fn typeof_operator() {
    assert_normal("typeof undefined", "'undefined'");
    assert_normal("typeof null", "'object'");
    assert_normal("typeof 1", "'number'");
    assert_normal("typeof 'a'", "'string'");
    assert_normal("typeof true", "'boolean'");
    assert_normal("typeof {}", "'object'");
    assert_normal("typeof function () {}", "'function'");
    assert_normal("typeof Symbol()", "'symbol'");
    // typeof of an unresolvable name does not throw.
    assert_normal("typeof missing", "'undefined'");
}

#[test]
fn logical_and_conditional_operators() {
    assert_normal("true && 'yes'", "'yes'");
    assert_normal("false && missing()", "false");
    assert_normal("false || 'fallback'", "'fallback'");
    assert_normal("null ?? 'default'", "'default'");
    assert_normal("0 ?? 'default'", "0");
    assert_normal("1 ? 'a' : 'b'", "'a'");
    assert_normal("var x = 0; x ||= 5; x", "5");
    assert_normal("var y = 1; y &&= 7; y", "7");
    assert_normal("var z; z ??= 9; z", "9");
}

#[test]
fn variables_and_scoping() {
    assert_normal("var a = 1; a = a + 1; a", "2");
    assert_normal("let b = 1; { let b = 2; } b", "1");
    assert_normal("const c = 3; c", "3");
    assert_normal("var d = 1; function f() { var d = 2; return d; } f() + d", "3");
    // Closures capture the environment, not the value.
    assert_normal(
        "function counter() { var n = 0; return function () { n += 1; return n; }; } \
         var next = counter(); next(); next(); next()",
        "3",
    );
    // Function declarations are scoped to their block.
    assert_normal(
        "var r; { function g() { return 4; } r = g(); } [r, typeof g]",
        "[ 4, 'undefined' ]",
    );
}

#[test]
fn loops_and_labels() {
    assert_normal(
        "var total = 0; for (var i = 1; i <= 10; i++) total += i; total",
        "55",
    );
    assert_normal("var n = 0; while (n < 5) n += 2; n", "6");
    assert_normal("var m = 10; do { m -= 3; } while (m > 0); m", "-2",);
    assert_normal(
        "var r = []; outer: for (var i = 0; i < 3; i++) { \
           for (var j = 0; j < 3; j++) { \
             if (j === 1) continue outer; \
             if (i === 2) break outer; \
             r.push(i + '-' + j); } } r.join()",
        "'0-0,1-0'",
    );
    // Per-iteration let bindings.
    assert_normal(
        "var fns = []; for (let i = 0; i < 3; i++) fns.push(function () { return i; }); \
         fns[0]() + fns[1]() + fns[2]()",
        "3",
    );
}

#[test]
fn switch_statements_fall_through() {
    assert_normal(
        "function f(x) { var r = ''; switch (x) { \
           case 1: r += 'a'; \
           case 2: r += 'b'; break; \
           default: r += 'd'; } return r; } \
         f(1) + f(2) + f(3)",
        "'abbd'",
    );
    // The default clause in the middle still falls through.
    assert_normal(
        "function f(x) { var r = ''; switch (x) { \
           default: r += 'd'; \
           case 9: r += 'z'; } return r; } \
         f(9) + f(0)",
        "'zdz'",
    );
}

#[test]
fn functions_arguments_and_defaults() {
    assert_normal("function f(a, b) { return a + b; } f(1, 2)", "3");
    assert_normal("function f(a, b = 10) { return a + b; } f(1)", "11");
    assert_normal("function f(...rest) { return rest.join(); } f(1, 2, 3)", "'1,2,3'");
    assert_normal(
        "function f() { return arguments.length + arguments[0]; } f(10, 20)",
        "12",
    );
    assert_normal("var f = (a) => a * 2; f(21)", "42");
    assert_normal("var f = (a) => { return a + 1; }; f(1)", "2");
    // Arrows share the enclosing this.
    assert_normal(
        "var o = { x: 5, m() { var f = () => this.x; return f(); } }; o.m()",
        "5",
    );
    assert_normal("function f(a, b) {} f.length", "2");
    assert_normal("function f(a, b = 1, c) {} f.length", "1");
    assert_normal("function named() {} named.name", "'named'");
    assert_normal("var anon = function () {}; anon.name", "'anon'");
}

#[test]
fn destructuring_binding_and_assignment() {
    assert_normal(
        "var { a, b = 10, ...rest } = { a: 1, c: 3, d: 4 }; \
         var [x, , z = 9] = [7, 8]; \
         [a, b, rest.c + rest.d, x, z]",
        "[ 1, 10, 7, 7, 9 ]",
    );
    assert_normal(
        "var a, b; [a, b] = [b, a] = [1, 2]; [a, b]",
        "[ 1, 2 ]",
    );
    assert_normal(
        "function dist({ x: x1, y: y1 }, { x: x2, y: y2 }) { return (x2 - x1) + (y2 - y1); } \
         dist({ x: 1, y: 2 }, { x: 4, y: 6 })",
        "7",
    );
    assert_normal("var [a = 1, [b] = [2]] = []; [a, b]", "[ 1, 2 ]");
    assert_normal("var o = {}; [o.prop] = [5]; o.prop", "5");
}

#[test]
fn spread_and_optional_chaining() {
    assert_normal("function f(a, b, c) { return a + b + c; } f(...[1, 2, 3])", "6");
    assert_normal("[0, ...[1, 2], 3].join()", "'0,1,2,3'");
    assert_normal("var o = { a: 1 }; var c = { ...o, b: 2 }; [c.a, c.b]", "[ 1, 2 ]");
    assert_normal(
        "var o = { a: { b: 1 } }; [o.a?.b, o.x?.b, o.x?.b.c, o.m?.()]",
        "[ 1, undefined, undefined, undefined ]",
    );
    assert_normal("delete undefined?.x", "true");
}

#[test]
fn update_and_sequence_expressions() {
    assert_normal("var i = 1; [i++, i, ++i, i--]", "[ 1, 2, 3, 3 ]");
    assert_normal("var x = (1, 2, 3); x", "3");
    assert_normal("var o = { n: 1 }; o.n++; o.n", "2");
}

#[test]
fn with_statement_and_unscopables() {
    // Array.prototype[Symbol.unscopables] hides `values` from with scopes.
    assert_normal(
        "var values = 'outer'; var r; with ([1]) { r = values; } r",
        "'outer'",
    );
    assert_normal(
        "var o = { a: 40 }; var r; with (o) { r = a + 2; } r",
        "42",
    );
    assert_normal("var o = { a: 1 }; with (o) { a = 9; } o.a", "9");
}

#[test]
fn script_completion_value() {
    assert_normal("1; 2; 3", "3");
    assert_normal("if (true) { 'taken'; }", "'taken'");
    assert_normal("var a = 5;", "undefined");
}
