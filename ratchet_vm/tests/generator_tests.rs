mod common;

use common::{assert_normal, assert_throws};

#[test]
fn generators_suspend_and_resume() {
    assert_normal(
        "function* g() { yield 1; yield 2; } \
         var it = g(); \
         [it.next().value, it.next().value, it.next().done]",
        "[ 1, 2, true ]",
    );
    // The resume value becomes the yield expression's result.
    assert_normal(
        "function* g() { var x = yield 1; yield x + 1; } \
         var it = g(); \
         [it.next().value, it.next(41).value]",
        "[ 1, 42 ]",
    );
    // The function body does not start until the first next().
    assert_normal(
        "var started = false; \
         function* g() { started = true; yield; } \
         var it = g(); var before = started; it.next(); \
         [before, started]",
        "[ false, true ]",
    );
    // Generators interleave with the caller.
    assert_normal(
        "var log = []; \
         function* g() { log.push('a'); yield; log.push('c'); } \
         var it = g(); it.next(); log.push('b'); it.next(); \
         log.join()",
        "'a,b,c'",
    );
}

#[test]
fn generator_return_and_throw() {
    assert_normal(
        "function* g() { yield 1; yield 2; } \
         var it = g(); it.next(); \
         var r = it.return(9); \
         [r.value, r.done, it.next().done]",
        "[ 9, true, true ]",
    );
    // return() runs finally blocks at the suspension point.
    assert_normal(
        "var cleaned = false; \
         function* g() { try { yield 1; } finally { cleaned = true; } } \
         var it = g(); it.next(); it.return(0); cleaned",
        "true",
    );
    // throw() raises at the suspension point and is catchable there.
    assert_normal(
        "function* g() { try { yield 1; } catch (e) { yield e + '!'; } } \
         var it = g(); it.next(); it.throw('err').value",
        "'err!'",
    );
    // An uncaught throw() escapes to the caller and completes the
    // generator.
    assert_throws(
        "function* g() { yield 1; } var it = g(); it.next(); it.throw(new TypeError('x'));",
        "TypeError",
    );
    assert_normal(
        "function* g() { yield 1; } var it = g(); \
         try { it.next(); it.throw('x'); } catch (e) {} \
         it.next().done",
        "true",
    );
}

#[test]
fn yield_star_delegates() {
    assert_normal(
        "function* inner() { yield 1; yield 2; return 3; } \
         function* outer() { var got = yield* inner(); yield got; } \
         var it = outer(); \
         [it.next().value, it.next().value, it.next().value, it.next().done]",
        "[ 1, 2, 3, true ]",
    );
    // Delegation forwards throw() to the inner iterator's catch.
    assert_normal(
        "function* inner() { try { yield 1; } catch (e) { yield 'caught:' + e; } } \
         function* outer() { yield* inner(); } \
         var it = outer(); it.next(); it.throw('e').value",
        "'caught:e'",
    );
}

#[test]
fn generators_are_iterable() {
    assert_normal(
        "function* g() { yield 'x'; yield 'y'; } \
         var parts = []; for (const v of g()) parts.push(v); parts.join()",
        "'x,y'",
    );
    assert_normal(
        "function* g() { yield 1; yield 2; yield 3; } \
         var [a, ...rest] = g(); [a, rest.join()]",
        "[ 1, '2,3' ]",
    );
    // A break in for-of return()s the generator, running its finally.
    assert_normal(
        "var cleaned = false; \
         function* g() { try { yield 1; yield 2; } finally { cleaned = true; } } \
         for (const v of g()) break; cleaned",
        "true",
    );
}

#[test]
fn generator_methods_and_branding() {
    assert_normal(
        "var o = { *gen() { yield 5; } }; o.gen().next().value",
        "5",
    );
    assert_normal(
        "class C { *values() { yield 'v'; } } new C().values().next().value",
        "'v'",
    );
    // Generator prototype methods brand-check their receiver.
    assert_throws(
        "function* g() {} g().next.call({})",
        "TypeError",
    );
    // A running generator rejects re-entrant resumption.
    assert_throws(
        "var it; function* g() { it.next(); yield; } it = g(); it.next();",
        "TypeError",
    );
}
