mod common;

use common::{assert_normal, assert_throws};

#[test]
fn throw_and_catch() {
    // The observable of S2.
    assert_normal(
        "var r; try { null.x } catch (e) { r = e instanceof TypeError } r",
        "true",
    );
    assert_normal("try { throw 'plain' } catch (e) { e }", "'plain'");
    assert_normal(
        "try { throw new RangeError('r') } catch (e) { [e instanceof RangeError, e instanceof Error, e.message] }",
        "[ true, true, 'r' ]",
    );
    assert_normal("try { throw 1 } catch { 'no binding' }", "'no binding'");
    assert_normal(
        "try { throw { code: 42, kind: 'x' } } catch ({ code }) { code }",
        "42",
    );
    assert_throws("throw new SyntaxError('early')", "SyntaxError");
}

#[test]
fn error_objects() {
    assert_normal("new TypeError('m').message", "'m'");
    assert_normal("new TypeError('m').name", "'TypeError'");
    assert_normal("'' + new TypeError('m')", "'TypeError: m'");
    assert_normal("'' + new Error()", "'Error'");
    assert_normal("new Error('m', { cause: 7 }).cause", "7");
    assert_normal(
        "Object.getPrototypeOf(TypeError.prototype) === Error.prototype",
        "true",
    );
    assert_normal("Error('no new') instanceof Error", "true");
    // The message property is an own, non-enumerable data property.
    assert_normal(
        "var keys = []; for (var k in new Error('m')) keys.push(k); \
         [keys.length, new Error('m').hasOwnProperty('message')]",
        "[ 0, true ]",
    );
}

#[test]
fn temporal_dead_zone() {
    assert_normal(
        "var r; try { z; } catch (e) { r = e instanceof ReferenceError } let z = 1; r",
        "true",
    );
    assert_normal(
        "var r; { try { inner; } catch (e) { r = e instanceof ReferenceError } let inner = 1; } r",
        "true",
    );
    assert_throws("const k = 1; k = 2;", "TypeError");
    assert_throws("missing_binding", "ReferenceError");
    assert_throws("'use strict'; missing_binding = 1", "ReferenceError");
    // Sloppy assignment to an unresolvable name creates a global property.
    assert_normal("function f() { sloppy_global = 5; } f(); sloppy_global", "5");
}

#[test]
fn try_finally_discipline() {
    // The finalizer always runs, and its abrupt completion overrides.
    assert_normal(
        "function f() { try { return 1 } finally { return 2 } } f()",
        "2",
    );
    assert_normal(
        "var log = []; \
         function f() { try { throw 'x' } finally { log.push('fin') } } \
         try { f() } catch (e) { log.push('caught:' + e) } \
         log.join()",
        "'fin,caught:x'",
    );
    assert_normal(
        "var log = []; \
         outer: for (var i = 0; i < 2; i++) { \
           try { break outer; } finally { log.push('fin' + i); } } \
         log.join()",
        "'fin0'",
    );
    assert_normal(
        "function f() { try { return 'tried' } finally { } } f()",
        "'tried'",
    );
    // Catch then finally.
    assert_normal(
        "var log = []; \
         try { throw 'boom' } catch (e) { log.push('catch') } finally { log.push('fin') } \
         log.join()",
        "'catch,fin'",
    );
}

#[test]
fn strict_mode_failures() {
    assert_throws(
        "'use strict'; var o = Object.freeze({ a: 1 }); o.a = 2;",
        "TypeError",
    );
    assert_throws(
        "'use strict'; var o = {}; Object.defineProperty(o, 'a', { value: 1 }); delete o.a;",
        "TypeError",
    );
    assert_normal("'use strict'; function f() { return this; } f() === undefined", "true");
    // Sloppy functions see the global object as this.
    assert_normal("function f() { return this === globalThis; } f()", "true");
}

#[test]
fn callable_and_constructor_errors() {
    assert_throws("var x = 1; x()", "TypeError");
    assert_throws("undefined()", "TypeError");
    assert_throws("new ({}.missing)", "TypeError");
    assert_throws("new Symbol()", "TypeError");
    assert_throws("1 in 'not an object'", "TypeError");
    assert_throws("for (const x of 5) {}", "TypeError");
    assert_throws("class A extends (() => {}) {}", "TypeError");
}

#[test]
fn redeclaration_errors() {
    assert_throws("let dup = 1; var dup = 2;", "SyntaxError");
    assert_normal("var ok = 1; var ok = 2; ok", "2");
    assert_throws("let tw = 1; let tw = 2;", "SyntaxError");
}
