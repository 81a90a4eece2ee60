//! ### [7.2 Testing and Comparison Operations](https://tc39.es/ecma262/#sec-testing-and-comparison-operations)

use crate::ecmascript::{
    abstract_operations::type_conversion::{to_numeric, to_primitive, PreferredType},
    execution::agent::{Agent, ExceptionType, JsResult},
    types::language::{
        bigint::BigInt,
        number::{number_same_value, number_same_value_zero},
        function::Function,
        object::{internal_methods::InternalMethods, Object},
        value::Value,
    },
};

/// ### [7.2.1 RequireObjectCoercible ( argument )](https://tc39.es/ecma262/#sec-requireobjectcoercible)
pub(crate) fn require_object_coercible(agent: &mut Agent, argument: Value) -> JsResult<Value> {
    if argument.is_nullish() {
        Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Cannot convert undefined or null to object",
        ))
    } else {
        Ok(argument)
    }
}

/// ### [7.2.2 IsArray ( argument )](https://tc39.es/ecma262/#sec-isarray)
pub(crate) fn is_array(_agent: &Agent, argument: Value) -> JsResult<bool> {
    // 1. If argument is not an Object, return false.
    // 2. If argument is an Array exotic object, return true.
    // 3. If argument is a Proxy exotic object: proxies are an extension
    //    point and carry their own kind when present.
    // 4. Return false.
    Ok(matches!(argument, Value::Array(_)))
}

/// ### [7.2.3 IsCallable ( argument )](https://tc39.es/ecma262/#sec-iscallable)
///
/// Returns the argument as a Function when it implements \[\[Call\]\].
pub(crate) fn is_callable(argument: Value) -> Option<Function> {
    // 1. If argument is not an Object, return false.
    // 2. If argument has a [[Call]] internal method, return true.
    // 3. Return false.
    Function::try_from(argument).ok()
}

/// ### [7.2.4 IsConstructor ( argument )](https://tc39.es/ecma262/#sec-isconstructor)
///
/// Returns the argument as a Function when it implements \[\[Construct\]\].
pub(crate) fn is_constructor(agent: &Agent, argument: Value) -> Option<Function> {
    // 1. If argument is not an Object, return false.
    // 2. If argument has a [[Construct]] internal method, return true.
    let function = Function::try_from(argument).ok()?;
    // 3. Return false.
    if function.is_constructor(agent) {
        Some(function)
    } else {
        None
    }
}

/// ### [7.2.5 IsExtensible ( O )](https://tc39.es/ecma262/#sec-isextensible-o)
pub(crate) fn is_extensible(agent: &mut Agent, o: Object) -> JsResult<bool> {
    // 1. Return ? O.[[IsExtensible]]().
    o.internal_is_extensible(agent)
}

/// ### [7.2.6 IsIntegralNumber ( argument )](https://tc39.es/ecma262/#sec-isintegralnumber)
pub(crate) fn is_integral_number(argument: Value) -> bool {
    // 1. If argument is not a Number, return false.
    let Value::Number(n) = argument else {
        return false;
    };
    // 2. If argument is not finite, return false.
    // 3. If truncate(ℝ(argument)) ≠ ℝ(argument), return false.
    // 4. Return true.
    n.is_finite() && n.trunc() == n
}

/// ### [7.2.10 SameValue ( x, y )](https://tc39.es/ecma262/#sec-samevalue)
pub(crate) fn same_value(agent: &Agent, x: Value, y: Value) -> bool {
    match (x, y) {
        // 2. If x is a Number, then
        // a. Return Number::sameValue(x, y).
        (Value::Number(x), Value::Number(y)) => number_same_value(x, y),
        // 1. If Type(x) is not Type(y), return false.
        // 3. Return SameValueNonNumber(x, y).
        _ => same_value_non_number(agent, x, y),
    }
}

/// ### [7.2.11 SameValueZero ( x, y )](https://tc39.es/ecma262/#sec-samevaluezero)
pub(crate) fn same_value_zero(agent: &Agent, x: Value, y: Value) -> bool {
    match (x, y) {
        // 2. If x is a Number, then
        // a. Return Number::sameValueZero(x, y).
        (Value::Number(x), Value::Number(y)) => number_same_value_zero(x, y),
        // 3. Return SameValueNonNumber(x, y).
        _ => same_value_non_number(agent, x, y),
    }
}

/// ### [7.2.12 SameValueNonNumber ( x, y )](https://tc39.es/ecma262/#sec-samevaluenonnumber)
pub(crate) fn same_value_non_number(agent: &Agent, x: Value, y: Value) -> bool {
    match (x, y) {
        (Value::Undefined, Value::Undefined) => true,
        (Value::Null, Value::Null) => true,
        (Value::Boolean(x), Value::Boolean(y)) => x == y,
        // Strings are interned; handle equality is value equality.
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Symbol(x), Value::Symbol(y)) => x == y,
        (Value::BigInt(x), Value::BigInt(y)) => x == y || BigInt::equal(agent, x, y),
        // Objects: x and y are the same Object value.
        _ => {
            let (Ok(x), Ok(y)) = (Object::try_from(x), Object::try_from(y)) else {
                return false;
            };
            x == y
        }
    }
}

/// ### [7.2.13 IsLessThan ( x, y, LeftFirst )](https://tc39.es/ecma262/#sec-islessthan)
///
/// Implements the `<`, `>`, `<=` and `>=` semantics. Returns `None` where
/// the specification returns undefined (a NaN was involved).
pub(crate) fn is_less_than<const LEFT_FIRST: bool>(
    agent: &mut Agent,
    x: Value,
    y: Value,
) -> JsResult<Option<bool>> {
    // 1. If LeftFirst is true, then
    let (px, py) = if LEFT_FIRST {
        // a. Let px be ? ToPrimitive(x, NUMBER).
        let px = to_primitive(agent, x, Some(PreferredType::Number))?;
        // b. Let py be ? ToPrimitive(y, NUMBER).
        let py = to_primitive(agent, y, Some(PreferredType::Number))?;
        (px, py)
    } else {
        // 2. Else,
        // a. NOTE: The order of evaluation needs to be reversed to preserve
        //    left to right evaluation.
        // b. Let py be ? ToPrimitive(y, NUMBER).
        let py = to_primitive(agent, y, Some(PreferredType::Number))?;
        // c. Let px be ? ToPrimitive(x, NUMBER).
        let px = to_primitive(agent, x, Some(PreferredType::Number))?;
        (px, py)
    };

    // 3. If px is a String and py is a String, then
    if let (Value::String(sx), Value::String(sy)) = (px, py) {
        // a-h. Lexicographic code unit comparison.
        return Ok(Some(sx.as_str(agent) < sy.as_str(agent)));
    }

    // 4. Else,
    match (px, py) {
        // a. If px is a BigInt and py is a String / vice versa.
        (Value::BigInt(bx), Value::String(sy)) => {
            let text = sy.as_str(agent).to_owned();
            let Ok(ny) = text.trim().parse::<num_bigint::BigInt>() else {
                return Ok(None);
            };
            Ok(Some(agent[bx].data < ny))
        }
        (Value::String(sx), Value::BigInt(by)) => {
            let text = sx.as_str(agent).to_owned();
            let Ok(nx) = text.trim().parse::<num_bigint::BigInt>() else {
                return Ok(None);
            };
            Ok(Some(nx < agent[by].data))
        }
        _ => {
            // c. NOTE: Because px and py are primitive values, evaluation
            //    order is not important.
            // d. Let nx be ? ToNumeric(px).
            let nx = to_numeric(agent, px)?;
            // e. Let ny be ? ToNumeric(py).
            let ny = to_numeric(agent, py)?;
            match (nx, ny) {
                // f. If Type(nx) is Type(ny), then
                (Value::Number(nx), Value::Number(ny)) => {
                    // i. Return Number::lessThan(nx, ny).
                    if nx.is_nan() || ny.is_nan() {
                        Ok(None)
                    } else {
                        Ok(Some(nx < ny))
                    }
                }
                (Value::BigInt(nx), Value::BigInt(ny)) => {
                    Ok(Some(BigInt::less_than(agent, nx, ny)))
                }
                // g-j. Mixed BigInt and Number comparison.
                (Value::BigInt(nx), Value::Number(ny)) => {
                    Ok(BigInt::compare_with_f64(agent, nx, ny)
                        .map(|ord| ord == core::cmp::Ordering::Less))
                }
                (Value::Number(nx), Value::BigInt(ny)) => {
                    Ok(BigInt::compare_with_f64(agent, ny, nx)
                        .map(|ord| ord == core::cmp::Ordering::Greater))
                }
                _ => unreachable!(),
            }
        }
    }
}

/// ### [7.2.14 IsLooselyEqual ( x, y )](https://tc39.es/ecma262/#sec-islooselyequal)
pub(crate) fn is_loosely_equal(agent: &mut Agent, x: Value, y: Value) -> JsResult<bool> {
    // 1. If Type(x) is Type(y), then
    if is_same_type(x, y) {
        // a. Return IsStrictlyEqual(x, y).
        return Ok(is_strictly_equal(agent, x, y));
    }

    match (x, y) {
        // 2. If x is null and y is undefined, return true.
        // 3. If x is undefined and y is null, return true.
        (Value::Null, Value::Undefined) | (Value::Undefined, Value::Null) => Ok(true),
        // 5. If x is a Number and y is a String, return
        //    ! IsLooselyEqual(x, ! ToNumber(y)).
        (Value::Number(_), Value::String(sy)) => {
            let text = sy.as_str(agent).to_owned();
            let ny = super::type_conversion::string_to_number(&text);
            is_loosely_equal(agent, x, Value::Number(ny))
        }
        // 6. If x is a String and y is a Number, return
        //    ! IsLooselyEqual(! ToNumber(x), y).
        (Value::String(sx), Value::Number(_)) => {
            let text = sx.as_str(agent).to_owned();
            let nx = super::type_conversion::string_to_number(&text);
            is_loosely_equal(agent, Value::Number(nx), y)
        }
        // 7. If x is a BigInt and y is a String, then
        (Value::BigInt(bx), Value::String(sy)) => {
            // a. Let n be StringToBigInt(y).
            let text = sy.as_str(agent).trim().to_owned();
            let n = if text.is_empty() {
                Some(num_bigint::BigInt::from(0))
            } else {
                text.parse::<num_bigint::BigInt>().ok()
            };
            // b. If n is undefined, return false.
            // c. Return IsLooselyEqual(x, n).
            Ok(n.is_some_and(|n| agent[bx].data == n))
        }
        // 8. If x is a String and y is a BigInt, return
        //    IsLooselyEqual(y, x).
        (Value::String(_), Value::BigInt(_)) => is_loosely_equal(agent, y, x),
        // 9. If x is a Boolean, return IsLooselyEqual(! ToNumber(x), y).
        (Value::Boolean(bx), _) => {
            is_loosely_equal(agent, Value::Number(bx as u8 as f64), y)
        }
        // 10. If y is a Boolean, return IsLooselyEqual(x, ! ToNumber(y)).
        (_, Value::Boolean(by)) => {
            is_loosely_equal(agent, x, Value::Number(by as u8 as f64))
        }
        // 12. If x is a BigInt and y is a Number, or if x is a Number and y
        //     is a BigInt, then
        (Value::BigInt(bx), Value::Number(ny)) => {
            // a. If x is not finite or y is not finite, return false.
            // b. If ℝ(x) = ℝ(y), return true; otherwise return false.
            Ok(BigInt::compare_with_f64(agent, bx, ny)
                .is_some_and(|ord| ord == core::cmp::Ordering::Equal && ny.fract() == 0.0))
        }
        (Value::Number(nx), Value::BigInt(by)) => {
            Ok(BigInt::compare_with_f64(agent, by, nx)
                .is_some_and(|ord| ord == core::cmp::Ordering::Equal && nx.fract() == 0.0))
        }
        // 11. If x is either a Number or a BigInt and y is an Object,
        //     return IsLooselyEqual(x, ? ToPrimitive(y)).
        (Value::Number(_) | Value::BigInt(_) | Value::String(_) | Value::Symbol(_), _)
            if y.is_object() =>
        {
            let py = to_primitive(agent, y, None)?;
            is_loosely_equal(agent, x, py)
        }
        // 13. If x is an Object and y is either a Number or a BigInt,
        //     return IsLooselyEqual(? ToPrimitive(x), y).
        (_, Value::Number(_) | Value::BigInt(_) | Value::String(_) | Value::Symbol(_))
            if x.is_object() =>
        {
            let px = to_primitive(agent, x, None)?;
            is_loosely_equal(agent, px, y)
        }
        // 14. Return false.
        _ => Ok(false),
    }
}

pub(crate) fn is_same_type(x: Value, y: Value) -> bool {
    match (x, y) {
        (Value::Undefined, Value::Undefined)
        | (Value::Null, Value::Null)
        | (Value::Boolean(_), Value::Boolean(_))
        | (Value::String(_), Value::String(_))
        | (Value::Symbol(_), Value::Symbol(_))
        | (Value::Number(_), Value::Number(_))
        | (Value::BigInt(_), Value::BigInt(_)) => true,
        _ => x.is_object() && y.is_object(),
    }
}

/// ### [7.2.15 IsStrictlyEqual ( x, y )](https://tc39.es/ecma262/#sec-isstrictlyequal)
pub(crate) fn is_strictly_equal(agent: &Agent, x: Value, y: Value) -> bool {
    // 1. If Type(x) is not Type(y), return false.
    if !is_same_type(x, y) {
        return false;
    }

    // 2. If x is a Number, then
    if let (Value::Number(x), Value::Number(y)) = (x, y) {
        // a. Return Number::equal(x, y).
        return x == y;
    }

    // 3. Return SameValueNonNumber(x, y).
    same_value_non_number(agent, x, y)
}

/// IsPrototypeOf walk shared by OrdinaryHasInstance and
/// Object.prototype.isPrototypeOf.
pub(crate) fn is_prototype_of_loop(
    agent: &mut Agent,
    o: Object,
    v: Object,
) -> JsResult<bool> {
    // Walk V's prototype chain looking for O; SetPrototypeOf's cycle
    // prevention guarantees termination.
    let mut v = v;
    loop {
        let proto = v.internal_get_prototype_of(agent)?;
        let Some(proto) = proto else {
            return Ok(false);
        };
        if proto == o {
            return Ok(true);
        }
        v = proto;
    }
}
