mod common;

use common::{assert_normal, assert_throws};

#[test]
fn object_literals() {
    assert_normal("var o = { a: 1, b: 2 }; o.a + o.b", "3");
    assert_normal("var k = 'dyn'; var o = { [k + 'amic']: 7 }; o.dynamic", "7");
    assert_normal("var a = 1; var o = { a }; o.a", "1");
    assert_normal("var o = { m() { return 3; } }; o.m()", "3");
    assert_normal(
        "var o = { _v: 1, get v() { return this._v; }, set v(n) { this._v = n * 2; } }; \
         o.v = 4; o.v",
        "8",
    );
    assert_normal(
        "var proto = { kind: 'p' }; var o = { __proto__: proto }; \
         [o.kind, Object.getPrototypeOf(o) === proto]",
        "[ 'p', true ]",
    );
}

#[test]
fn property_access_and_deletion() {
    assert_normal("var o = { a: 1 }; 'a' in o", "true");
    assert_normal("var o = { a: 1 }; delete o.a; 'a' in o", "false");
    assert_normal("var o = {}; o['x'] = 1; o.x", "1");
    assert_normal("var o = { 10: 'ten' }; o[10]", "'ten'");
    assert_throws("null.x", "TypeError");
    assert_throws("undefined.x", "TypeError");
    assert_normal("({}).missing", "undefined");
}

#[test]
fn descriptor_validation_and_retention() {
    // Unspecified attributes are retained across redefinition.
    assert_normal(
        "var o = {}; Object.defineProperty(o, 'a', { configurable: true }); \
         Object.defineProperty(o, 'a', { enumerable: true, value: 1 }); \
         var d = Object.getOwnPropertyDescriptor(o, 'a'); \
         [d.value, d.writable, d.enumerable, d.configurable]",
        "[ 1, false, true, true ]",
    );
    // Non-configurable properties reject reconfiguration.
    assert_throws(
        "'use strict'; var o = {}; \
         Object.defineProperty(o, 'a', { value: 1 }); \
         Object.defineProperty(o, 'a', { value: 2 });",
        "TypeError",
    );
    // Same-value redefinition of a frozen property is allowed.
    assert_normal(
        "var o = {}; Object.defineProperty(o, 'a', { value: 1 }); \
         Object.defineProperty(o, 'a', { value: 1 }); o.a",
        "1",
    );
    assert_normal(
        "var o = {}; Object.defineProperty(o, 'a', { get() { return 9; }, configurable: true }); \
         [o.a, Object.getOwnPropertyDescriptor(o, 'a').writable]",
        "[ 9, undefined ]",
    );
}

#[test]
fn freeze_and_extensibility() {
    assert_normal(
        "var o = Object.freeze({ a: 1 }); o.a = 2; [o.a, Object.isFrozen(o)]",
        "[ 1, true ]",
    );
    assert_throws(
        "'use strict'; var o = Object.freeze({ a: 1 }); o.a = 2;",
        "TypeError",
    );
    assert_normal(
        "var o = {}; Object.preventExtensions(o); o.b = 1; \
         [Object.isExtensible(o), 'b' in o]",
        "[ false, false ]",
    );
    assert_throws(
        "'use strict'; var o = {}; Object.preventExtensions(o); o.b = 1;",
        "TypeError",
    );
}

#[test]
fn prototype_chains() {
    assert_normal(
        "var base = { greet() { return 'hi'; } }; \
         var derived = Object.create(base); derived.greet()",
        "'hi'",
    );
    assert_normal("Object.getPrototypeOf(Object.create(null))", "null");
    assert_normal(
        "var a = {}; var b = Object.create(a); a.isPrototypeOf(b)",
        "true",
    );
    // SetPrototypeOf refuses to create cycles.
    assert_throws(
        "'use strict'; var a = {}; var b = Object.create(a); Object.setPrototypeOf(a, b);",
        "TypeError",
    );
    // Setter on the prototype chain is honoured by assignment.
    assert_normal(
        "var log = []; var proto = { set x(v) { log.push(v); } }; \
         var o = Object.create(proto); o.x = 5; [log.join(), 'x' in o]",
        "[ '5', true ]",
    );
}

#[test]
fn own_keys_ordering() {
    assert_normal(
        "var o = { b: 1, 2: 'two', a: 2, 0: 'zero' }; Object.keys(o).join()",
        "'0,2,b,a'",
    );
    assert_normal(
        "var o = { x: 1, y: 2 }; Object.values(o).join()",
        "'1,2'",
    );
    assert_normal(
        "var o = { a: 1 }; var entries = Object.entries(o); \
         [entries[0][0], entries[0][1]]",
        "[ 'a', 1 ]",
    );
}

#[test]
fn for_in_enumeration() {
    assert_normal(
        "var o = { a: 1, b: 2 }; var keys = []; for (var k in o) keys.push(k); keys.join()",
        "'a,b'",
    );
    // Shadowed and non-enumerable properties are suppressed.
    assert_normal(
        "var proto = { a: 'p', c: 'p' }; var o = Object.create(proto); \
         o.a = 1; o.b = 2; \
         var keys = []; for (var k in o) keys.push(k); keys.join()",
        "'a,b,c'",
    );
    assert_normal(
        "var o = { a: 1 }; Object.defineProperty(o, 'hidden', { value: 2, enumerable: false }); \
         var keys = []; for (var k in o) keys.push(k); keys.join()",
        "'a'",
    );
    assert_normal("var count = 0; for (var k in null) count++; count", "0");
}

#[test]
fn object_prototype_methods() {
    assert_normal("({ a: 1 }).hasOwnProperty('a')", "true");
    assert_normal("({}).hasOwnProperty('toString')", "false");
    assert_normal("'' + {}", "'[object Object]'");
    assert_normal("'' + []", "''");
    assert_normal("'' + [1, 2]", "'1,2'");
    assert_normal(
        "var o = { [Symbol.toStringTag]: 'Custom' }; Object.prototype.toString.call(o)",
        "'[object Custom]'",
    );
    assert_normal("Object.prototype.toString.call(null)", "'[object Null]'");
    assert_normal("Object.prototype.toString.call([])", "'[object Array]'");
}

#[test]
fn object_statics() {
    assert_normal("Object.is(NaN, NaN)", "true");
    assert_normal("Object.is(0, -0)", "false");
    assert_normal(
        "var t = Object.assign({ a: 1 }, { b: 2 }, { a: 3 }); [t.a, t.b]",
        "[ 3, 2 ]",
    );
    assert_normal("Object.hasOwn({ q: 1 }, 'q')", "true");
    assert_normal(
        "var o = Object.create({}, { a: { value: 5, enumerable: true } }); o.a",
        "5",
    );
    assert_normal(
        "Object.getOwnPropertyNames({ a: 1, [Symbol.iterator]: 2 }).join()",
        "'a'",
    );
}

#[test]
fn symbols_as_keys() {
    assert_normal(
        "var s = Symbol('k'); var o = { [s]: 7 }; [o[s], Object.keys(o).join()]",
        "[ 7, '' ]",
    );
    assert_normal("Symbol('desc').description", "'desc'");
    assert_normal("typeof Symbol.iterator", "'symbol'");
    assert_throws("Symbol() + ''", "TypeError");
}
