use crate::{
    ecmascript::{
        abstract_operations::{
            operations_on_objects::{
                call_function, create_data_property_or_throw, delete_property_or_throw, get,
                has_property, length_of_array_like, set,
            },
            testing_and_comparison::{is_callable, is_strictly_equal, same_value_zero},
            type_conversion::{to_boolean, to_integer_or_infinity, to_object, to_string},
        },
        builtins::{
            array::abstract_operations::{array_create, array_species_create},
            builtin_function::{ArgumentsList, Behaviour, Builtin},
            indexed_collections::array_objects::array_iterator_objects::array_iterator::{
                ArrayIterator, CollectionIteratorKind,
            },
        },
        execution::{
            agent::{Agent, ExceptionType, JsResult},
            realm::RealmIdentifier,
        },
        types::{
            language::{
                object::{
                    internal_slots::InternalSlots, property_key::PropertyKey, IntoObject, Object,
                },
                string::String,
                value::{IntoValue, Value},
            },
        },
    },
    heap::WellKnownSymbolIndexes,
};

pub(crate) struct ArrayPrototype;

struct ArrayPrototypeEntries;
impl Builtin for ArrayPrototypeEntries {
    const NAME: &'static str = "entries";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::entries);
}
struct ArrayPrototypeFilter;
impl Builtin for ArrayPrototypeFilter {
    const NAME: &'static str = "filter";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::filter);
}
struct ArrayPrototypeForEach;
impl Builtin for ArrayPrototypeForEach {
    const NAME: &'static str = "forEach";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::for_each);
}
struct ArrayPrototypeIncludes;
impl Builtin for ArrayPrototypeIncludes {
    const NAME: &'static str = "includes";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::includes);
}
struct ArrayPrototypeIndexOf;
impl Builtin for ArrayPrototypeIndexOf {
    const NAME: &'static str = "indexOf";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::index_of);
}
struct ArrayPrototypeJoin;
impl Builtin for ArrayPrototypeJoin {
    const NAME: &'static str = "join";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::join);
}
struct ArrayPrototypeKeys;
impl Builtin for ArrayPrototypeKeys {
    const NAME: &'static str = "keys";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::keys);
}
struct ArrayPrototypeMap;
impl Builtin for ArrayPrototypeMap {
    const NAME: &'static str = "map";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::map);
}
struct ArrayPrototypePop;
impl Builtin for ArrayPrototypePop {
    const NAME: &'static str = "pop";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::pop);
}
struct ArrayPrototypePush;
impl Builtin for ArrayPrototypePush {
    const NAME: &'static str = "push";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::push);
}
struct ArrayPrototypeSlice;
impl Builtin for ArrayPrototypeSlice {
    const NAME: &'static str = "slice";
    const LENGTH: u8 = 2;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::slice);
}
struct ArrayPrototypeToString;
impl Builtin for ArrayPrototypeToString {
    const NAME: &'static str = "toString";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::to_string);
}
struct ArrayPrototypeValues;
impl Builtin for ArrayPrototypeValues {
    const NAME: &'static str = "values";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::values);
}

impl ArrayPrototype {
    /// ### [23.1.3.5 Array.prototype.entries ( )](https://tc39.es/ecma262/#sec-array.prototype.entries)
    fn entries(agent: &mut Agent, this_value: Value, _arguments: ArgumentsList) -> JsResult<Value> {
        // 1. Let O be ? ToObject(this value).
        let o = to_object(agent, this_value)?;
        // 2. Return CreateArrayIterator(O, KEY+VALUE).
        Ok(ArrayIterator::from_object(agent, o, CollectionIteratorKind::KeyAndValue).into_value())
    }

    /// ### [23.1.3.8 Array.prototype.filter ( callback \[ , thisArg \] )](https://tc39.es/ecma262/#sec-array.prototype.filter)
    fn filter(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1. Let O be ? ToObject(this value).
        let o = to_object(agent, this_value)?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let len = length_of_array_like(agent, o)?;
        // 3. If IsCallable(callback) is false, throw a TypeError exception.
        let Some(callback) = is_callable(arguments.get(0)) else {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Callback is not callable",
            ));
        };
        let this_arg = arguments.get(1);
        // 4. Let A be ? ArraySpeciesCreate(O, 0).
        let a = array_species_create(agent, o, 0)?;
        // 5.-6. Iterate, keeping values the callback selects.
        let mut to = 0u32;
        for k in 0..len {
            let pk = PropertyKey::Integer(k as u32);
            // c. If kPresent is true, then
            if has_property(agent, o, pk)? {
                let k_value = get(agent, o, pk)?;
                let selected = call_function(
                    agent,
                    callback,
                    this_arg,
                    Some(&[k_value, Value::Number(k as f64), o.into_value()]),
                )?;
                if to_boolean(agent, selected) {
                    create_data_property_or_throw(agent, a, PropertyKey::Integer(to), k_value)?;
                    to += 1;
                }
            }
        }
        // 7. Return A.
        Ok(a.into_value())
    }

    /// ### [23.1.3.15 Array.prototype.forEach ( callback \[ , thisArg \] )](https://tc39.es/ecma262/#sec-array.prototype.foreach)
    fn for_each(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let o = to_object(agent, this_value)?;
        let len = length_of_array_like(agent, o)?;
        let Some(callback) = is_callable(arguments.get(0)) else {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Callback is not callable",
            ));
        };
        let this_arg = arguments.get(1);
        for k in 0..len {
            let pk = PropertyKey::Integer(k as u32);
            if has_property(agent, o, pk)? {
                let k_value = get(agent, o, pk)?;
                call_function(
                    agent,
                    callback,
                    this_arg,
                    Some(&[k_value, Value::Number(k as f64), o.into_value()]),
                )?;
            }
        }
        Ok(Value::Undefined)
    }

    /// ### [23.1.3.16 Array.prototype.includes ( searchElement \[ , fromIndex \] )](https://tc39.es/ecma262/#sec-array.prototype.includes)
    fn includes(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let o = to_object(agent, this_value)?;
        let len = length_of_array_like(agent, o)?;
        if len == 0 {
            return Ok(false.into());
        }
        let n = to_integer_or_infinity(agent, arguments.get(1))?.into_i64();
        let mut k = if n >= 0 { n } else { (len + n).max(0) };
        let search_element = arguments.get(0);
        while k < len {
            let element = get(agent, o, PropertyKey::Integer(k as u32))?;
            if same_value_zero(agent, search_element, element) {
                return Ok(true.into());
            }
            k += 1;
        }
        Ok(false.into())
    }

    /// ### [23.1.3.17 Array.prototype.indexOf ( searchElement \[ , fromIndex \] )](https://tc39.es/ecma262/#sec-array.prototype.indexof)
    fn index_of(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let o = to_object(agent, this_value)?;
        let len = length_of_array_like(agent, o)?;
        if len == 0 {
            return Ok(Value::Number(-1.0));
        }
        let n = to_integer_or_infinity(agent, arguments.get(1))?.into_i64();
        let mut k = if n >= 0 { n } else { (len + n).max(0) };
        let search_element = arguments.get(0);
        while k < len {
            let pk = PropertyKey::Integer(k as u32);
            if has_property(agent, o, pk)? {
                let element = get(agent, o, pk)?;
                if is_strictly_equal(agent, search_element, element) {
                    return Ok(Value::Number(k as f64));
                }
            }
            k += 1;
        }
        Ok(Value::Number(-1.0))
    }

    /// ### [23.1.3.18 Array.prototype.join ( separator )](https://tc39.es/ecma262/#sec-array.prototype.join)
    fn join(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let o = to_object(agent, this_value)?;
        let len = length_of_array_like(agent, o)?;
        // 3.-4. Separator defaults to ",".
        let separator = arguments.get(0);
        let separator = if separator.is_undefined() {
            ",".to_owned()
        } else {
            to_string(agent, separator)?.as_str(agent).to_owned()
        };
        // 5.-6. Concatenate the stringified elements.
        let mut result = std::string::String::new();
        for k in 0..len {
            if k > 0 {
                result.push_str(&separator);
            }
            let element = get(agent, o, PropertyKey::Integer(k as u32))?;
            if !element.is_nullish() {
                let next = to_string(agent, element)?;
                result.push_str(next.as_str(agent));
            }
        }
        // 7. Return R.
        Ok(String::from_string(agent, result).into_value())
    }

    /// ### [23.1.3.19 Array.prototype.keys ( )](https://tc39.es/ecma262/#sec-array.prototype.keys)
    fn keys(agent: &mut Agent, this_value: Value, _arguments: ArgumentsList) -> JsResult<Value> {
        let o = to_object(agent, this_value)?;
        Ok(ArrayIterator::from_object(agent, o, CollectionIteratorKind::Key).into_value())
    }

    /// ### [23.1.3.21 Array.prototype.map ( callback \[ , thisArg \] )](https://tc39.es/ecma262/#sec-array.prototype.map)
    fn map(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1. Let O be ? ToObject(this value).
        let o = to_object(agent, this_value)?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let len = length_of_array_like(agent, o)?;
        // 3. If IsCallable(callback) is false, throw a TypeError exception.
        let Some(callback) = is_callable(arguments.get(0)) else {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Callback is not callable",
            ));
        };
        let this_arg = arguments.get(1);
        // 4. Let A be ? ArraySpeciesCreate(O, len).
        let a = array_species_create(agent, o, len as usize)?;
        // 5.-6. Map each present element.
        for k in 0..len {
            let pk = PropertyKey::Integer(k as u32);
            if has_property(agent, o, pk)? {
                let k_value = get(agent, o, pk)?;
                let mapped_value = call_function(
                    agent,
                    callback,
                    this_arg,
                    Some(&[k_value, Value::Number(k as f64), o.into_value()]),
                )?;
                create_data_property_or_throw(agent, a, pk, mapped_value)?;
            }
        }
        // 7. Return A.
        Ok(a.into_value())
    }

    /// ### [23.1.3.22 Array.prototype.pop ( )](https://tc39.es/ecma262/#sec-array.prototype.pop)
    fn pop(agent: &mut Agent, this_value: Value, _arguments: ArgumentsList) -> JsResult<Value> {
        let o = to_object(agent, this_value)?;
        let len = length_of_array_like(agent, o)?;
        let length_key = PropertyKey::from_str(agent, "length");
        // 3. If len = 0, then
        if len == 0 {
            // a. Perform ? Set(O, "length", +0𝔽, true).
            set(agent, o, length_key, Value::Number(0.0), true)?;
            // b. Return undefined.
            return Ok(Value::Undefined);
        }
        // 4. Else: read, delete and shorten.
        let index = PropertyKey::Integer((len - 1) as u32);
        let element = get(agent, o, index)?;
        delete_property_or_throw(agent, o, index)?;
        set(agent, o, length_key, Value::Number((len - 1) as f64), true)?;
        Ok(element)
    }

    /// ### [23.1.3.23 Array.prototype.push ( ...items )](https://tc39.es/ecma262/#sec-array.prototype.push)
    fn push(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1. Let O be ? ToObject(this value).
        let o = to_object(agent, this_value)?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let mut len = length_of_array_like(agent, o)?;
        // 3. Let argCount be the number of elements in items.
        // 4. If len + argCount > 2⁵³ - 1, throw a TypeError exception.
        if len + arguments.len() as i64 > 2i64.pow(53) - 1 {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::RangeError,
                "Invalid array length",
            ));
        }
        // 5. For each element E of items, do
        for element in arguments.iter() {
            // a. Perform ? Set(O, ! ToString(𝔽(len)), E, true).
            set(agent, o, PropertyKey::Integer(len as u32), *element, true)?;
            // b. Set len to len + 1.
            len += 1;
        }
        // 6. Perform ? Set(O, "length", 𝔽(len), true).
        let length_key = PropertyKey::from_str(agent, "length");
        let len_value = Value::Number(len as f64);
        set(agent, o, length_key, len_value, true)?;
        // 7. Return 𝔽(len).
        Ok(len_value)
    }

    /// ### [23.1.3.28 Array.prototype.slice ( start, end )](https://tc39.es/ecma262/#sec-array.prototype.slice)
    fn slice(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let o = to_object(agent, this_value)?;
        let len = length_of_array_like(agent, o)?;
        // 3.-5. Resolve the start index.
        let relative_start = to_integer_or_infinity(agent, arguments.get(0))?.into_i64();
        let mut k = if relative_start < 0 {
            (len + relative_start).max(0)
        } else {
            relative_start.min(len)
        };
        // 6.-8. Resolve the end index.
        let end = arguments.get(1);
        let relative_end = if end.is_undefined() {
            len
        } else {
            to_integer_or_infinity(agent, end)?.into_i64()
        };
        let final_index = if relative_end < 0 {
            (len + relative_end).max(0)
        } else {
            relative_end.min(len)
        };
        // 9. Let count be max(final - k, 0).
        let count = (final_index - k).max(0);
        // 10. Let A be ? ArraySpeciesCreate(O, count).
        let a = array_species_create(agent, o, count as usize)?;
        // 11.-12. Copy the elements.
        let mut n = 0u32;
        while k < final_index {
            let pk = PropertyKey::Integer(k as u32);
            if has_property(agent, o, pk)? {
                let k_value = get(agent, o, pk)?;
                create_data_property_or_throw(agent, a, PropertyKey::Integer(n), k_value)?;
            }
            k += 1;
            n += 1;
        }
        // 13. Perform ? Set(A, "length", 𝔽(n), true).
        let length_key = PropertyKey::from_str(agent, "length");
        set(agent, a, length_key, Value::Number(n as f64), true)?;
        // 14. Return A.
        Ok(a.into_value())
    }

    /// ### [23.1.3.36 Array.prototype.toString ( )](https://tc39.es/ecma262/#sec-array.prototype.tostring)
    fn to_string(agent: &mut Agent, this_value: Value, _arguments: ArgumentsList) -> JsResult<Value> {
        // 1. Let array be ? ToObject(this value).
        let array = to_object(agent, this_value)?;
        // 2. Let func be ? Get(array, "join").
        let join_key = PropertyKey::from_str(agent, "join");
        let func = get(agent, array, join_key)?;
        // 3.-4. Call func, or %Object.prototype.toString% when join is not
        //       callable.
        match is_callable(func) {
            Some(func) => call_function(agent, func, array.into_value(), None),
            None => {
                let to_string_key = PropertyKey::from_str(agent, "toString");
                crate::ecmascript::abstract_operations::operations_on_objects::invoke(
                    agent,
                    array.into_value(),
                    to_string_key,
                    None,
                )
            }
        }
    }

    /// ### [23.1.3.40 Array.prototype.values ( )](https://tc39.es/ecma262/#sec-array.prototype.values)
    fn values(agent: &mut Agent, this_value: Value, _arguments: ArgumentsList) -> JsResult<Value> {
        // 1. Let O be ? ToObject(this value).
        let o = to_object(agent, this_value)?;
        // 2. Return CreateArrayIterator(O, VALUE).
        Ok(ArrayIterator::from_object(agent, o, CollectionIteratorKind::Value).into_value())
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent, realm: RealmIdentifier) {
        // %Array.prototype% is itself an Array exotic object.
        let object_prototype = agent.get_realm(realm).intrinsics().object_prototype();
        let array_prototype = array_create(agent, 0, Some(object_prototype)).unwrap();
        agent
            .get_realm_mut(realm)
            .intrinsics_mut()
            .set("%Array.prototype%", array_prototype);

        for install in [
            install_method::<ArrayPrototypeEntries>,
            install_method::<ArrayPrototypeFilter>,
            install_method::<ArrayPrototypeForEach>,
            install_method::<ArrayPrototypeIncludes>,
            install_method::<ArrayPrototypeIndexOf>,
            install_method::<ArrayPrototypeJoin>,
            install_method::<ArrayPrototypeKeys>,
            install_method::<ArrayPrototypeMap>,
            install_method::<ArrayPrototypePop>,
            install_method::<ArrayPrototypePush>,
            install_method::<ArrayPrototypeSlice>,
            install_method::<ArrayPrototypeToString>,
        ] {
            install(agent, realm, array_prototype);
        }

        // values doubles as %Array.prototype.values% and
        // %Array.prototype%[%Symbol.iterator%].
        let values_fn = crate::ecmascript::builtins::builtin_function::create_builtin_function(
            agent,
            ArrayPrototypeValues::BEHAVIOUR,
            crate::ecmascript::builtins::builtin_function::BuiltinFunctionArgs::new(
                0, "values", realm,
            ),
        );
        agent
            .get_realm_mut(realm)
            .intrinsics_mut()
            .set("%Array.prototype.values%", values_fn);
        let backing_object = array_prototype.get_or_create_backing_object(agent);
        let values_key = PropertyKey::from_str(agent, "values");
        for key in [
            values_key,
            PropertyKey::from(WellKnownSymbolIndexes::Iterator),
        ] {
            agent[backing_object].storage.set(
                key,
                crate::ecmascript::types::language::object::property_storage::PropertyData::Data {
                    value: values_fn.into_value(),
                    writable: true,
                    enumerable: false,
                    configurable: true,
                },
            );
        }

        // %Symbol.unscopables%: the with-statement exclusions.
        let unscopables =
            crate::ecmascript::builtins::ordinary::ordinary_object_create(agent, None);
        for name in ["entries", "filter", "includes", "keys", "values"] {
            let key = PropertyKey::from_str(agent, name);
            agent[unscopables].storage.set(
                key,
                crate::ecmascript::types::language::object::property_storage::PropertyData::Data {
                    value: true.into(),
                    writable: true,
                    enumerable: true,
                    configurable: true,
                },
            );
        }
        let unscopables_key = PropertyKey::from(WellKnownSymbolIndexes::Unscopables);
        agent[backing_object].storage.set(
            unscopables_key,
            crate::ecmascript::types::language::object::property_storage::PropertyData::Data {
                value: unscopables.into_value(),
                writable: false,
                enumerable: false,
                configurable: true,
            },
        );
    }
}

fn install_method<T: Builtin>(
    agent: &mut Agent,
    realm: RealmIdentifier,
    target: crate::ecmascript::builtins::array::Array,
) {
    let function = crate::ecmascript::builtins::builtin_function::create_builtin_function(
        agent,
        T::BEHAVIOUR,
        crate::ecmascript::builtins::builtin_function::BuiltinFunctionArgs::new(
            T::LENGTH as u32,
            T::NAME,
            realm,
        ),
    );
    let key = crate::ecmascript::builders::builtin_function_builder::builtin_property_key::<T>(
        agent,
    );
    let backing_object = target.get_or_create_backing_object(agent);
    agent[backing_object].storage.set(
        key,
        crate::ecmascript::types::language::object::property_storage::PropertyData::Data {
            value: function.into_value(),
            writable: T::WRITABLE,
            enumerable: T::ENUMERABLE,
            configurable: T::CONFIGURABLE,
        },
    );
}
