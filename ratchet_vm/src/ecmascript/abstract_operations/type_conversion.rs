//! ### [7.1 Type Conversion](https://tc39.es/ecma262/#sec-type-conversion)
//!
//! The ECMAScript language implicitly performs automatic type conversion as
//! needed. Conversion abstract operations are polymorphic: they can accept a
//! value of any ECMAScript language type.

use crate::{
    ecmascript::{
        abstract_operations::operations_on_objects::{call_function, get, get_method},
        builtins::primitive_objects::{PrimitiveObjectData, PrimitiveObjectHeapData},
        execution::agent::{Agent, ExceptionType, JsResult},
        types::{
            language::{
                bigint::BigInt,
                number::number_to_string,
                object::{property_key::PropertyKey, IntoObject, Object},
                string::String,
                symbol::Symbol,
                value::{IntoValue, Value},
            },
        },
    },
    heap::{CreateHeapData, WellKnownSymbolIndexes},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferredType {
    Default,
    String,
    Number,
}

/// ### [7.1.1 ToPrimitive ( input \[ , preferredType \] )](https://tc39.es/ecma262/#sec-toprimitive)
///
/// The abstract operation ToPrimitive converts its input argument to a
/// non-Object type. If an object is capable of converting to more than one
/// primitive type, it may use the optional hint preferredType to favour
/// that type.
pub(crate) fn to_primitive(
    agent: &mut Agent,
    input: Value,
    preferred_type: Option<PreferredType>,
) -> JsResult<Value> {
    // 1. If input is an Object, then
    let Ok(input_object) = Object::try_from(input) else {
        // 2. Return input.
        return Ok(input);
    };

    // a. Let exoticToPrim be ? GetMethod(input, %Symbol.toPrimitive%).
    let exotic_to_prim = get_method(
        agent,
        input,
        PropertyKey::from(WellKnownSymbolIndexes::ToPrimitive),
    )?;

    // b. If exoticToPrim is not undefined, then
    if let Some(exotic_to_prim) = exotic_to_prim {
        // i. If preferredType is not present, let hint be "default".
        let hint = match preferred_type {
            None | Some(PreferredType::Default) => "default",
            // ii. Else if preferredType is STRING, let hint be "string".
            Some(PreferredType::String) => "string",
            // iii. Else, let hint be "number".
            Some(PreferredType::Number) => "number",
        };
        let hint = String::from_str(agent, hint).into_value();
        // iv. Let result be ? Call(exoticToPrim, input, « hint »).
        let result = call_function(agent, exotic_to_prim, input, Some(&[hint]))?;
        // v. If result is not an Object, return result.
        if result.is_primitive() {
            return Ok(result);
        }
        // vi. Throw a TypeError exception.
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Cannot convert object to primitive value",
        ));
    }

    // c. If preferredType is not present, let preferredType be NUMBER.
    let preferred_type = match preferred_type {
        None | Some(PreferredType::Default) | Some(PreferredType::Number) => {
            PreferredType::Number
        }
        Some(PreferredType::String) => PreferredType::String,
    };

    // d. Return ? OrdinaryToPrimitive(input, preferredType).
    ordinary_to_primitive(agent, input_object, preferred_type)
}

/// ### [7.1.1.1 OrdinaryToPrimitive ( O, hint )](https://tc39.es/ecma262/#sec-ordinarytoprimitive)
pub(crate) fn ordinary_to_primitive(
    agent: &mut Agent,
    o: Object,
    hint: PreferredType,
) -> JsResult<Value> {
    // 1. If hint is STRING, then
    let method_names: [&str; 2] = if hint == PreferredType::String {
        // a. Let methodNames be « "toString", "valueOf" ».
        ["toString", "valueOf"]
    } else {
        // 2. Else,
        // a. Let methodNames be « "valueOf", "toString" ».
        ["valueOf", "toString"]
    };

    // 3. For each element name of methodNames, do
    for name in method_names {
        // a. Let method be ? Get(O, name).
        let name = PropertyKey::from_str(agent, name);
        let method = get(agent, o, name)?;
        // b. If IsCallable(method) is true, then
        if let Some(method) =
            crate::ecmascript::abstract_operations::testing_and_comparison::is_callable(method)
        {
            // i. Let result be ? Call(method, O).
            let result = call_function(agent, method, o.into_value(), None)?;
            // ii. If result is not an Object, return result.
            if result.is_primitive() {
                return Ok(result);
            }
        }
    }

    // 4. Throw a TypeError exception.
    Err(agent.throw_exception_with_static_message(
        ExceptionType::TypeError,
        "Cannot convert object to primitive value",
    ))
}

/// ### [7.1.2 ToBoolean ( argument )](https://tc39.es/ecma262/#sec-toboolean)
pub(crate) fn to_boolean(agent: &Agent, argument: Value) -> bool {
    match argument {
        // 1. If argument is a Boolean, return argument.
        Value::Boolean(b) => b,
        // 2. If argument is one of undefined, null, +0𝔽, -0𝔽, NaN, 0ℤ, or
        //    the empty String, return false.
        Value::Undefined | Value::Null => false,
        Value::Number(n) => !(n == 0.0 || n.is_nan()),
        Value::String(s) => !s.is_empty(agent),
        Value::BigInt(b) => !b.is_zero(agent),
        // 4. Return true.
        _ => true,
    }
}

/// ### [7.1.3 ToNumeric ( value )](https://tc39.es/ecma262/#sec-tonumeric)
///
/// Returns either a Number or a BigInt value.
pub(crate) fn to_numeric(agent: &mut Agent, value: Value) -> JsResult<Value> {
    // 1. Let primValue be ? ToPrimitive(value, NUMBER).
    let prim_value = to_primitive(agent, value, Some(PreferredType::Number))?;

    // 2. If primValue is a BigInt, return primValue.
    if prim_value.is_bigint() {
        return Ok(prim_value);
    }

    // 3. Return ? ToNumber(primValue).
    Ok(Value::Number(to_number(agent, prim_value)?))
}

/// ### [7.1.4 ToNumber ( argument )](https://tc39.es/ecma262/#sec-tonumber)
pub(crate) fn to_number(agent: &mut Agent, argument: Value) -> JsResult<f64> {
    match argument {
        // 1. If argument is a Number, return argument.
        Value::Number(n) => Ok(n),
        // 2. If argument is either a Symbol or a BigInt, throw a TypeError
        //    exception.
        Value::Symbol(_) => Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Cannot convert a Symbol to a number",
        )),
        Value::BigInt(_) => Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Cannot convert a BigInt to a number",
        )),
        // 3. If argument is undefined, return NaN.
        Value::Undefined => Ok(f64::NAN),
        // 4. If argument is either null or false, return +0𝔽.
        Value::Null | Value::Boolean(false) => Ok(0.0),
        // 5. If argument is true, return 1𝔽.
        Value::Boolean(true) => Ok(1.0),
        // 6. If argument is a String, return StringToNumber(argument).
        Value::String(s) => {
            let text = s.as_str(agent).to_owned();
            Ok(string_to_number(&text))
        }
        // 7. Assert: argument is an Object.
        _ => {
            // 8. Let primValue be ? ToPrimitive(argument, NUMBER).
            let prim_value = to_primitive(agent, argument, Some(PreferredType::Number))?;
            // 9. Assert: primValue is not an Object.
            debug_assert!(prim_value.is_primitive());
            // 10. Return ? ToNumber(primValue).
            to_number(agent, prim_value)
        }
    }
}

/// ### [7.1.4.1.1 StringToNumber ( str )](https://tc39.es/ecma262/#sec-stringtonumber)
pub(crate) fn string_to_number(str: &str) -> f64 {
    let text = str.trim_matches(is_trimmable_whitespace);
    match text {
        "" => return 0.0,
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    // Non-decimal integer literals.
    if let Some(rest) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        return u128::from_str_radix(rest, 16).map_or(f64::NAN, |v| v as f64);
    }
    if let Some(rest) = text.strip_prefix("0o").or_else(|| text.strip_prefix("0O")) {
        return u128::from_str_radix(rest, 8).map_or(f64::NAN, |v| v as f64);
    }
    if let Some(rest) = text.strip_prefix("0b").or_else(|| text.strip_prefix("0B")) {
        return u128::from_str_radix(rest, 2).map_or(f64::NAN, |v| v as f64);
    }
    // StrDecimalLiteral. fast-float accepts the same grammar plus "inf"
    // spellings and trailing garbage, which must be rejected here.
    if text.contains(['i', 'I', 'n', 'N']) && !text.contains(['e', 'E']) {
        // "inf", "nan" and friends are not StrDecimalLiterals.
        return f64::NAN;
    }
    match fast_float::parse_partial::<f64, _>(text) {
        Ok((value, consumed)) if consumed == text.len() => value,
        _ => f64::NAN,
    }
}

pub const fn is_trimmable_whitespace(c: char) -> bool {
    // WhiteSpace and LineTerminator productions.
    matches!(
        c,
        '\u{0009}' | '\u{000B}' | '\u{000C}' | '\u{0020}' | '\u{00A0}' | '\u{FEFF}' |
        '\u{000A}' | '\u{000D}' | '\u{2028}' | '\u{2029}' |
        '\u{1680}' | '\u{2000}'..='\u{200A}' | '\u{202F}' | '\u{205F}' | '\u{3000}'
    )
}

/// ### [7.1.5 ToIntegerOrInfinity ( argument )](https://tc39.es/ecma262/#sec-tointegerorinfinity)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IntegerOrInfinity {
    Integer(i64),
    PositiveInfinity,
    NegativeInfinity,
}

impl IntegerOrInfinity {
    /// The integer value, with the infinities saturated.
    pub(crate) fn into_i64(self) -> i64 {
        match self {
            IntegerOrInfinity::Integer(n) => n,
            IntegerOrInfinity::PositiveInfinity => i64::MAX,
            IntegerOrInfinity::NegativeInfinity => i64::MIN,
        }
    }
}

pub(crate) fn to_integer_or_infinity(agent: &mut Agent, argument: Value) -> JsResult<IntegerOrInfinity> {
    // 1. Let number be ? ToNumber(argument).
    let number = to_number(agent, argument)?;
    Ok(to_integer_or_infinity_number(number))
}

pub(crate) fn to_integer_or_infinity_number(number: f64) -> IntegerOrInfinity {
    // 2. If number is one of NaN, +0𝔽, or -0𝔽, return 0.
    if number.is_nan() || number == 0.0 {
        return IntegerOrInfinity::Integer(0);
    }
    // 3. If number is +∞𝔽, return +∞.
    if number == f64::INFINITY {
        return IntegerOrInfinity::PositiveInfinity;
    }
    // 4. If number is -∞𝔽, return -∞.
    if number == f64::NEG_INFINITY {
        return IntegerOrInfinity::NegativeInfinity;
    }
    // 5. Return truncate(ℝ(number)).
    IntegerOrInfinity::Integer(number.trunc() as i64)
}

/// ### [7.1.6 ToInt32 ( argument )](https://tc39.es/ecma262/#sec-toint32)
pub(crate) fn to_int32(agent: &mut Agent, argument: Value) -> JsResult<i32> {
    let number = to_number(agent, argument)?;
    Ok(to_int32_number(number))
}

pub(crate) fn to_int32_number(number: f64) -> i32 {
    to_uint32_number(number) as i32
}

/// ### [7.1.7 ToUint32 ( argument )](https://tc39.es/ecma262/#sec-touint32)
pub(crate) fn to_uint32(agent: &mut Agent, argument: Value) -> JsResult<u32> {
    let number = to_number(agent, argument)?;
    Ok(to_uint32_number(number))
}

pub(crate) fn to_uint32_number(number: f64) -> u32 {
    // 2. If number is not finite or number is either +0𝔽 or -0𝔽, return
    //    +0𝔽.
    if !number.is_finite() || number == 0.0 {
        return 0;
    }
    // 3. Let int be truncate(ℝ(number)).
    // 4. Let int32bit be int modulo 2³².
    let int = number.trunc();
    let int32bit = int.rem_euclid(4294967296.0);
    int32bit as u32
}

/// ### [7.1.17 ToString ( argument )](https://tc39.es/ecma262/#sec-tostring)
pub(crate) fn to_string(agent: &mut Agent, argument: Value) -> JsResult<String> {
    match argument {
        // 1. If argument is a String, return argument.
        Value::String(s) => Ok(s),
        // 2. If argument is a Symbol, throw a TypeError exception.
        Value::Symbol(_) => Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Cannot convert a Symbol to a string",
        )),
        // 3. If argument is undefined, return "undefined".
        Value::Undefined => Ok(String::from_str(agent, "undefined")),
        // 4. If argument is null, return "null".
        Value::Null => Ok(String::from_str(agent, "null")),
        // 5. If argument is true, return "true".
        // 6. If argument is false, return "false".
        Value::Boolean(b) => Ok(String::from_str(agent, if b { "true" } else { "false" })),
        // 7. If argument is a Number, return Number::toString(argument, 10).
        Value::Number(n) => Ok(number_to_string(agent, n)),
        // 8. If argument is a BigInt, return BigInt::toString(argument, 10).
        Value::BigInt(b) => Ok(b.to_string(agent)),
        // 9. Assert: argument is an Object.
        _ => {
            // 10. Let primValue be ? ToPrimitive(argument, STRING).
            let prim_value = to_primitive(agent, argument, Some(PreferredType::String))?;
            // 11. Assert: primValue is not an Object.
            debug_assert!(prim_value.is_primitive());
            // 12. Return ? ToString(primValue).
            to_string(agent, prim_value)
        }
    }
}

/// ### [7.1.18 ToObject ( argument )](https://tc39.es/ecma262/#sec-toobject)
///
/// Converts argument to a value of type Object: primitives box into their
/// wrapper objects, objects pass through.
pub(crate) fn to_object(agent: &mut Agent, argument: Value) -> JsResult<Object> {
    match argument {
        Value::Undefined | Value::Null => Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Cannot convert undefined or null to object",
        )),
        // Return a new Boolean object whose [[BooleanData]] internal slot
        // is set to argument.
        Value::Boolean(b) => Ok(agent
            .heap
            .create(PrimitiveObjectHeapData::new(PrimitiveObjectData::Boolean(b)))
            .into_object()),
        Value::Number(n) => Ok(agent
            .heap
            .create(PrimitiveObjectHeapData::new(PrimitiveObjectData::Number(n)))
            .into_object()),
        Value::String(s) => Ok(agent
            .heap
            .create(PrimitiveObjectHeapData::new(PrimitiveObjectData::String(s)))
            .into_object()),
        Value::Symbol(s) => Ok(agent
            .heap
            .create(PrimitiveObjectHeapData::new(PrimitiveObjectData::Symbol(s)))
            .into_object()),
        Value::BigInt(b) => Ok(agent
            .heap
            .create(PrimitiveObjectHeapData::new(PrimitiveObjectData::BigInt(b)))
            .into_object()),
        _ => Ok(Object::try_from(argument).unwrap()),
    }
}

/// ### [7.1.19 ToPropertyKey ( argument )](https://tc39.es/ecma262/#sec-topropertykey)
pub(crate) fn to_property_key(agent: &mut Agent, argument: Value) -> JsResult<PropertyKey> {
    // 1. Let key be ? ToPrimitive(argument, STRING).
    let key = to_primitive(agent, argument, Some(PreferredType::String))?;

    // 2. If key is a Symbol, then
    if let Value::Symbol(key) = key {
        // a. Return key.
        return Ok(PropertyKey::Symbol(key));
    }

    // 3. Return ! ToString(key).
    let string = to_string(agent, key)?;
    let text = string.as_str(agent);
    if let Some(integer_key) = parse_string_to_integer_property_key(text) {
        Ok(integer_key)
    } else {
        Ok(PropertyKey::String(string))
    }
}

/// Parse a string that is the canonical form of an array index (a uint32
/// below 2³²−1 whose decimal round-trip equals the string) into its integer
/// property key.
pub(crate) fn parse_string_to_integer_property_key(str: &str) -> Option<PropertyKey> {
    if str == "0" {
        return Some(PropertyKey::Integer(0));
    }
    if str.is_empty() || !str.as_bytes()[0].is_ascii_digit() || str.as_bytes()[0] == b'0' {
        return None;
    }
    if !str.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u64 = str.parse().ok()?;
    if value < u32::MAX as u64 {
        Some(PropertyKey::Integer(value as u32))
    } else {
        None
    }
}

/// ### [7.1.20 ToLength ( argument )](https://tc39.es/ecma262/#sec-tolength)
pub(crate) fn to_length(agent: &mut Agent, argument: Value) -> JsResult<i64> {
    // 1. Let len be ? ToIntegerOrInfinity(argument).
    let len = to_integer_or_infinity(agent, argument)?;
    // 2. If len ≤ 0, return +0𝔽.
    // 3. Return 𝔽(min(len, 2⁵³ - 1)).
    Ok(len.into_i64().clamp(0, 2i64.pow(53) - 1))
}

/// StringToBigInt plus the BigInt cases of ToBigInt that the `+`/relational
/// operators need.
pub(crate) fn to_big_int(agent: &mut Agent, argument: Value) -> JsResult<BigInt> {
    // 1. Let prim be ? ToPrimitive(argument, NUMBER).
    let prim = to_primitive(agent, argument, Some(PreferredType::Number))?;
    match prim {
        Value::BigInt(b) => Ok(b),
        Value::Boolean(b) => Ok(BigInt::from_i64(agent, b as i64)),
        Value::String(s) => {
            let text = s.as_str(agent).trim_matches(is_trimmable_whitespace).to_owned();
            if text.is_empty() {
                return Ok(BigInt::from_i64(agent, 0));
            }
            match text.parse::<num_bigint::BigInt>() {
                Ok(data) => Ok(BigInt::from_data(agent, data)),
                Err(_) => Err(agent.throw_exception_with_static_message(
                    ExceptionType::SyntaxError,
                    "Cannot convert string to a BigInt",
                )),
            }
        }
        _ => Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Cannot convert value to a BigInt",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_to_number_matches_the_grammar() {
        assert_eq!(string_to_number(""), 0.0);
        assert_eq!(string_to_number("  42  "), 42.0);
        assert_eq!(string_to_number("0x10"), 16.0);
        assert_eq!(string_to_number("0b101"), 5.0);
        assert_eq!(string_to_number("0o17"), 15.0);
        assert_eq!(string_to_number("-Infinity"), f64::NEG_INFINITY);
        assert_eq!(string_to_number("1e3"), 1000.0);
        assert!(string_to_number("12px").is_nan());
        assert!(string_to_number("inf").is_nan());
        assert!(string_to_number("nan").is_nan());
    }

    #[test]
    fn uint32_conversion_is_modular() {
        assert_eq!(to_uint32_number(-1.0), u32::MAX);
        assert_eq!(to_uint32_number(4294967296.0), 0);
        assert_eq!(to_uint32_number(f64::NAN), 0);
        assert_eq!(to_int32_number(2147483648.0), i32::MIN);
    }

    #[test]
    fn integer_property_keys_are_canonical() {
        assert_eq!(
            parse_string_to_integer_property_key("0"),
            Some(PropertyKey::Integer(0))
        );
        assert_eq!(
            parse_string_to_integer_property_key("42"),
            Some(PropertyKey::Integer(42))
        );
        assert_eq!(parse_string_to_integer_property_key("01"), None);
        assert_eq!(parse_string_to_integer_property_key("-1"), None);
        assert_eq!(parse_string_to_integer_property_key("4294967295"), None);
        assert_eq!(
            parse_string_to_integer_property_key("4294967294"),
            Some(PropertyKey::Integer(4294967294))
        );
    }
}
