mod common;

use common::{assert_normal, assert_throws};

#[test]
fn array_literals_and_length() {
    assert_normal("[1, 2, 3].length", "3");
    assert_normal("[1, , 3].length", "3");
    assert_normal("[1, , 3][1]", "undefined");
    assert_normal("var a = []; a[4] = 'x'; a.length", "5");
    assert_normal("var a = [1, 2]; a.length = 0; [a.length, 0 in a]", "[ 0, false ]");
}

#[test]
fn array_set_length_truncates_in_descending_order() {
    // The observable of S1: truncation deletes the indices above the new
    // length.
    assert_normal(
        "var a = [1, 2, 3]; a.length = 2; \
         [Object.getOwnPropertyNames(a).join(), a.length, a.join()]",
        "[ '0,1,length', 2, '1,2' ]",
    );
    // Truncation halts at the first non-configurable element and reports
    // failure; the length records the partial progress.
    assert_throws(
        "'use strict'; var a = [1, 2, 3, 4]; \
         Object.defineProperty(a, 1, { value: 2, configurable: false }); \
         a.length = 0;",
        "TypeError",
    );
    assert_normal(
        "var a = [1, 2, 3, 4]; \
         Object.defineProperty(a, 1, { value: 2, configurable: false }); \
         a.length = 0; \
         [a.length, a.join()]",
        "[ 2, '1,2' ]",
    );
    // Length is never configurable and over-large lengths are rejected.
    assert_normal(
        "var d = Object.getOwnPropertyDescriptor([], 'length'); \
         [d.writable, d.enumerable, d.configurable]",
        "[ true, false, false ]",
    );
    assert_throws("[].length = -1", "RangeError");
    assert_throws("[].length = 4294967296", "RangeError");
    // A non-writable length rejects index growth.
    assert_normal(
        "var a = [1]; Object.defineProperty(a, 'length', { writable: false }); \
         a[5] = 'x'; [a.length, 5 in a]",
        "[ 1, false ]",
    );
}

#[test]
fn array_length_coercion_runs_value_of_twice() {
    // ArraySetLength coerces the new length with ToUint32 and ToNumber.
    assert_normal(
        "var calls = 0; var a = [1, 2, 3]; \
         a.length = { valueOf() { calls += 1; return 1; } }; \
         [calls, a.length]",
        "[ 2, 1 ]",
    );
}

#[test]
fn array_methods() {
    assert_normal("var a = [1]; a.push(2, 3); [a.length, a.join()]", "[ 3, '1,2,3' ]");
    assert_normal("var a = [1, 2]; [a.pop(), a.length]", "[ 2, 1 ]");
    assert_normal("[1, 2, 3].indexOf(2)", "1");
    assert_normal("[1, 2, 3].indexOf(9)", "-1");
    assert_normal("[1, NaN].includes(NaN)", "true");
    assert_normal("[1, NaN].indexOf(NaN)", "-1");
    assert_normal("[1, 2, 3].map(function (x) { return x * 2; }).join()", "'2,4,6'");
    assert_normal("[1, 2, 3, 4].filter(function (x) { return x % 2 === 0; }).join()", "'2,4'");
    assert_normal("[1, 2, 3, 4].slice(1, 3).join()", "'2,3'");
    assert_normal("[1, 2, 3].slice(-2).join()", "'2,3'");
    assert_normal(
        "var seen = []; [10, 20].forEach(function (v, i) { seen.push(i + ':' + v); }); seen.join()",
        "'0:10,1:20'",
    );
    assert_normal("Array.isArray([])", "true");
    assert_normal("Array.isArray({ length: 0 })", "false");
    assert_normal("Array.of(1, 2, 3).join()", "'1,2,3'");
    assert_normal("Array.from([1, 2], function (x) { return x + 1; }).join()", "'2,3'");
    assert_normal("Array(3).length", "3");
    assert_normal("Array(1, 2).join()", "'1,2'");
    assert_throws("Array(2.5)", "RangeError");
}

#[test]
fn array_iteration() {
    assert_normal(
        "var total = 0; for (const v of [1, 2, 3]) total += v; total",
        "6",
    );
    assert_normal(
        "var pairs = []; for (const [i, v] of [['a', 1], ['b', 2]]) pairs.push(i + v); pairs.join()",
        "'a1,b2'",
    );
    assert_normal(
        "var it = [7, 8].values(); [it.next().value, it.next().value, it.next().done]",
        "[ 7, 8, true ]",
    );
    assert_normal(
        "var it = ['x'].entries().next().value; [it[0], it[1]]",
        "[ 0, 'x' ]",
    );
    assert_normal("var keys = []; for (var k in [9, 9, 9]) keys.push(k); keys.join()", "'0,1,2'");
}

#[test]
fn for_of_closes_the_iterator_on_break() {
    // The observable of S5: break invokes the iterator's return method
    // exactly once.
    assert_normal(
        "var closed = 0; \
         var iterable = { [Symbol.iterator]() { var i = 0; return { \
           next() { i += 1; return { value: i, done: i > 3 }; }, \
           return() { closed += 1; return { done: true }; } }; } }; \
         var r = []; \
         for (const x of iterable) { if (x === 2) break; r.push(x); } \
         [r.join(), closed]",
        "[ '1', 1 ]",
    );
    // A throw in the body also closes, and the throw wins.
    assert_normal(
        "var closed = 0; \
         var iterable = { [Symbol.iterator]() { var i = 0; return { \
           next() { i += 1; return { value: i, done: false }; }, \
           return() { closed += 1; return { done: true }; } }; } }; \
         var caught; \
         try { for (const x of iterable) { throw 'boom'; } } catch (e) { caught = e; } \
         [caught, closed]",
        "[ 'boom', 1 ]",
    );
    // Exhausting the iterator does not call return.
    assert_normal(
        "var closed = 0; \
         var iterable = { [Symbol.iterator]() { var i = 0; return { \
           next() { i += 1; return { value: i, done: i > 2 }; }, \
           return() { closed += 1; return { done: true }; } }; } }; \
         for (const x of iterable) {} closed",
        "0",
    );
}

#[test]
fn array_species_create() {
    // The observable of S4: a species override reroutes map's output.
    assert_normal(
        "class B extends Array { static get [Symbol.species]() { return Array; } } \
         var b = new B(1, 2); \
         var r = b.map(function (x) { return x; }); \
         [Array.isArray(r), r.length, Object.getPrototypeOf(r) === Array.prototype, \
          Object.getPrototypeOf(b) === B.prototype]",
        "[ true, 2, true, true ]",
    );
    // Without an override, the subclass constructor is used.
    assert_normal(
        "class C extends Array {} \
         var c = new C(1, 2); \
         var r = c.map(function (x) { return x; }); \
         Object.getPrototypeOf(r) === C.prototype",
        "true",
    );
}

#[test]
fn array_index_keys_are_canonical() {
    assert_normal("var a = [7]; [a['0'], a[0]]", "[ 7, 7 ]");
    // "01" is not a canonical index and lands in the string bucket.
    assert_normal(
        "var a = []; a['01'] = 'str'; [a.length, a['01']]",
        "[ 0, 'str' ]",
    );
    // 2³²−1 is not an array index; writing it does not move length.
    assert_normal(
        "var a = []; a[4294967295] = 'x'; [a.length, a[4294967295]]",
        "[ 0, 'x' ]",
    );
}
