mod common;

use common::{assert_normal, assert_throws};

#[test]
fn class_definitions() {
    assert_normal(
        "class Point { constructor(x, y) { this.x = x; this.y = y; } \
           sum() { return this.x + this.y; } } \
         new Point(1, 2).sum()",
        "3",
    );
    assert_normal("class A {} typeof A", "'function'");
    assert_normal("class A {} new A() instanceof A", "true");
    assert_normal("class A {} A.prototype.constructor === A", "true");
    assert_normal("class A {} A.name", "'A'");
    assert_normal("var B = class {}; B.name", "'B'");
    // Class constructors require new.
    assert_throws("class A {} A()", "TypeError");
    // Class bindings are in the TDZ until the declaration runs.
    assert_throws("new A(); class A {}", "ReferenceError");
}

#[test]
fn class_methods_and_accessors() {
    assert_normal(
        "class C { static double(n) { return n * 2; } } C.double(21)",
        "42",
    );
    assert_normal(
        "class C { get v() { return 5; } set v(n) { this.set = n; } } \
         var c = new C(); c.v = 9; [c.v, c.set]",
        "[ 5, 9 ]",
    );
    assert_normal(
        "class C { ['computed' + 'Name']() { return 1; } } \
         new C().computedName()",
        "1",
    );
    // Prototype methods are not enumerable.
    assert_normal(
        "class C { m() {} } var keys = []; \
         for (var k in new C()) keys.push(k); keys.length",
        "0",
    );
}

#[test]
fn class_fields() {
    // The observable of S3.
    assert_normal(
        "class A { #x = 1; get() { return this.#x; } } new A().get()",
        "1",
    );
    assert_normal("class A { x = 1; y = this.x + 1; } var a = new A(); [a.x, a.y]", "[ 1, 2 ]");
    assert_normal(
        "class A { static total = 0; x = A.total += 1; } \
         new A(); new A(); A.total",
        "2",
    );
    // Private access from outside the class fails to parse.
    assert_throws("class A { #x = 1; } new A().#x", "SyntaxError");
}

#[test]
fn private_methods_and_accessors() {
    assert_normal(
        "class P { #v = 1; \
           get value() { return this.#v; } \
           set value(n) { this.#v = n; } \
           static read(p) { return #v in p; } } \
         var p = new P(); p.value = 5; \
         [p.value, P.read(p), P.read({})]",
        "[ 5, true, false ]",
    );
    assert_normal(
        "class Counter { #count = 0; #bump() { this.#count += 1; } \
           tick() { this.#bump(); return this.#count; } } \
         var c = new Counter(); c.tick(); c.tick()",
        "2",
    );
    // Private methods of one class do not exist on foreign objects.
    assert_throws(
        "class A { #m() {} call(other) { return other.#m(); } } \
         new A().call({})",
        "TypeError",
    );
    // Accessor without a setter rejects writes.
    assert_throws(
        "class A { get #v() { return 1; } set(n) { this.#v = n; } } \
         new A().set(2)",
        "TypeError",
    );
}

#[test]
fn class_inheritance_and_super() {
    assert_normal(
        "class A { greet() { return 'a'; } } \
         class B extends A { greet() { return super.greet() + 'b'; } } \
         new B().greet()",
        "'ab'",
    );
    assert_normal(
        "class A { constructor(v) { this.v = v; } } \
         class B extends A { constructor() { super(7); } } \
         new B().v",
        "7",
    );
    // The implicit derived constructor forwards its arguments.
    assert_normal(
        "class A { constructor(a, b) { this.sum = a + b; } } \
         class B extends A {} \
         new B(3, 4).sum",
        "7",
    );
    assert_normal(
        "class A {} class B extends A {} \
         var b = new B(); \
         [b instanceof B, b instanceof A, \
          Object.getPrototypeOf(B.prototype) === A.prototype, \
          Object.getPrototypeOf(B) === A]",
        "[ true, true, true, true ]",
    );
    assert_normal(
        "class N extends null { constructor() { return Object.create(N.prototype); } } \
         Object.getPrototypeOf(N.prototype)",
        "null",
    );
    assert_throws("class A extends 5 {}", "TypeError");
}

#[test]
fn derived_this_binding() {
    // Reading this before super() is a ReferenceError.
    assert_normal(
        "class A {} \
         class D extends A { constructor() { \
           var threw; \
           try { this; threw = false; } catch (e) { threw = e instanceof ReferenceError; } \
           super(); \
           this.threw = threw; } } \
         new D().threw",
        "true",
    );
    // Calling super() twice is a ReferenceError.
    assert_throws(
        "class A {} class D extends A { constructor() { super(); super(); } } new D()",
        "ReferenceError",
    );
    // Instance fields initialize when super() returns.
    assert_normal(
        "class A {} \
         class D extends A { x = 'field'; constructor() { super(); this.after = this.x; } } \
         new D().after",
        "'field'",
    );
}

#[test]
fn static_blocks() {
    assert_normal(
        "class C { static ready = false; static { C.ready = true; C.who = this === C; } } \
         [C.ready, C.who]",
        "[ true, true ]",
    );
    assert_normal(
        "var order = []; \
         class C { static { order.push('first'); } static { order.push('second'); } } \
         order.join()",
        "'first,second'",
    );
    // Static blocks see var declarations of their own scope only.
    assert_normal(
        "class C { static { var local = 1; C.value = local; } } \
         [C.value, typeof local]",
        "[ 1, 'undefined' ]",
    );
}

#[test]
fn class_expressions_and_named_evaluation() {
    assert_normal("(class Named {}).name", "'Named'");
    assert_normal(
        "var C = class Inner { static who() { return Inner.name; } }; C.who()",
        "'Inner'",
    );
    assert_normal(
        "var make = function (n) { return class { m() { return n; } }; }; \
         new (make(9))().m()",
        "9",
    );
}
