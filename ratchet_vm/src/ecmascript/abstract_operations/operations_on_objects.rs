//! ### [7.3 Operations on Objects](https://tc39.es/ecma262/#sec-operations-on-objects)

use crate::ecmascript::{
    abstract_operations::{
        testing_and_comparison::{is_callable, is_constructor, is_prototype_of_loop, same_value},
        type_conversion::{to_length, to_object},
    },
    builtins::{
        array::abstract_operations::array_create,
        builtin_function::ArgumentsList,
        ecmascript_function::ClassFieldDefinitionRecord,
        ordinary::ordinary_object_create_with_intrinsics,
    },
    execution::{
        agent::{Agent, ExceptionType, JsResult},
        realm::{ProtoIntrinsics, RealmIdentifier},
    },
    types::{
        language::{
            function::{Function, IntoFunction},
            object::{
                internal_methods::InternalMethods, internal_slots::InternalSlots,
                property_key::PropertyKey, IntoObject, Object,
            },
            value::{IntoValue, Value},
        },
        spec::{
            private_name::{PrivateElement, PrivateElementKind, PrivateName},
            property_descriptor::PropertyDescriptor,
        },
    },
};

/// ### [7.3.2 Get ( O, P )](https://tc39.es/ecma262/#sec-get-o-p)
///
/// The abstract operation Get is used to retrieve the value of a specific
/// property of an object.
pub(crate) fn get(
    agent: &mut Agent,
    o: impl InternalMethods,
    p: PropertyKey,
) -> JsResult<Value> {
    // 1. Return ? O.[[Get]](P, O).
    let receiver = o.into_object().into_value();
    o.internal_get(agent, p, receiver)
}

/// ### [7.3.3 GetV ( V, P )](https://tc39.es/ecma262/#sec-getv)
///
/// The abstract operation GetV is used to retrieve the value of a specific
/// property of an ECMAScript language value. If the value is not an object,
/// the property lookup is performed using a wrapper object appropriate for
/// the type of the value.
pub(crate) fn get_v(agent: &mut Agent, v: Value, p: PropertyKey) -> JsResult<Value> {
    // 1. Let O be ? ToObject(V).
    let o = to_object(agent, v)?;
    // 2. Return ? O.[[Get]](P, V).
    o.internal_get(agent, p, v)
}

/// ### [7.3.4 Set ( O, P, V, Throw )](https://tc39.es/ecma262/#sec-set-o-p-v-throw)
pub(crate) fn set(
    agent: &mut Agent,
    o: impl InternalMethods,
    p: PropertyKey,
    v: Value,
    throw: bool,
) -> JsResult<()> {
    // 1. Let success be ? O.[[Set]](P, V, O).
    let receiver = o.into_object().into_value();
    let success = o.internal_set(agent, p, v, receiver)?;
    // 2. If success is false and Throw is true, throw a TypeError exception.
    if !success && throw {
        return Err(throw_set_error(agent, p));
    }
    // 3. Return UNUSED.
    Ok(())
}

pub(crate) fn throw_set_error(agent: &mut Agent, p: PropertyKey) -> crate::ecmascript::execution::agent::JsError {
    let name = p.to_display_string(agent);
    let error_message = format!("Could not set property '{}'.", name);
    agent.throw_exception(ExceptionType::TypeError, error_message)
}

/// ### [7.3.5 CreateDataProperty ( O, P, V )](https://tc39.es/ecma262/#sec-createdataproperty)
pub(crate) fn create_data_property(
    agent: &mut Agent,
    object: impl InternalMethods,
    property_key: PropertyKey,
    value: Value,
) -> JsResult<bool> {
    // 1. Let newDesc be the PropertyDescriptor { [[Value]]: V,
    //    [[Writable]]: true, [[Enumerable]]: true, [[Configurable]]: true }.
    let new_desc = PropertyDescriptor::new_data_descriptor(value);
    // 2. Return ? O.[[DefineOwnProperty]](P, newDesc).
    object.internal_define_own_property(agent, property_key, new_desc)
}

/// ### [7.3.7 CreateDataPropertyOrThrow ( O, P, V )](https://tc39.es/ecma262/#sec-createdatapropertyorthrow)
pub(crate) fn create_data_property_or_throw(
    agent: &mut Agent,
    object: impl InternalMethods,
    property_key: PropertyKey,
    value: Value,
) -> JsResult<()> {
    // 1. Let success be ? CreateDataProperty(O, P, V).
    let success = create_data_property(agent, object, property_key, value)?;
    // 2. If success is false, throw a TypeError exception.
    if !success {
        let name = property_key.to_display_string(agent);
        let error_message = format!("Could not create property '{}'.", name);
        return Err(agent.throw_exception(ExceptionType::TypeError, error_message));
    }
    // 3. Return UNUSED.
    Ok(())
}

/// ### [7.3.8 DefinePropertyOrThrow ( O, P, desc )](https://tc39.es/ecma262/#sec-definepropertyorthrow)
pub(crate) fn define_property_or_throw(
    agent: &mut Agent,
    object: impl InternalMethods,
    property_key: PropertyKey,
    desc: PropertyDescriptor,
) -> JsResult<()> {
    // 1. Let success be ? O.[[DefineOwnProperty]](P, desc).
    let success = object.internal_define_own_property(agent, property_key, desc)?;
    // 2. If success is false, throw a TypeError exception.
    if !success {
        let name = property_key.to_display_string(agent);
        let error_message = format!("Cannot redefine property '{}'.", name);
        return Err(agent.throw_exception(ExceptionType::TypeError, error_message));
    }
    // 3. Return UNUSED.
    Ok(())
}

/// ### [7.3.9 DeletePropertyOrThrow ( O, P )](https://tc39.es/ecma262/#sec-deletepropertyorthrow)
pub(crate) fn delete_property_or_throw(
    agent: &mut Agent,
    o: impl InternalMethods,
    p: PropertyKey,
) -> JsResult<()> {
    // 1. Let success be ? O.[[Delete]](P).
    let success = o.internal_delete(agent, p)?;
    // 2. If success is false, throw a TypeError exception.
    if !success {
        let name = p.to_display_string(agent);
        let error_message = format!("Cannot delete property '{}'.", name);
        return Err(agent.throw_exception(ExceptionType::TypeError, error_message));
    }
    // 3. Return UNUSED.
    Ok(())
}

/// ### [7.3.10 GetMethod ( V, P )](https://tc39.es/ecma262/#sec-getmethod)
pub(crate) fn get_method(
    agent: &mut Agent,
    v: Value,
    p: PropertyKey,
) -> JsResult<Option<Function>> {
    // 1. Let func be ? GetV(V, P).
    let func = get_v(agent, v, p)?;
    // 2. If func is either undefined or null, return undefined.
    if func.is_nullish() {
        return Ok(None);
    }
    // 3. If IsCallable(func) is false, throw a TypeError exception.
    let Some(func) = is_callable(func) else {
        let name = p.to_display_string(agent);
        let error_message = format!("'{}' is not a function.", name);
        return Err(agent.throw_exception(ExceptionType::TypeError, error_message));
    };
    // 4. Return func.
    Ok(Some(func))
}

/// ### [7.3.11 HasProperty ( O, P )](https://tc39.es/ecma262/#sec-hasproperty)
pub(crate) fn has_property(
    agent: &mut Agent,
    o: impl InternalMethods,
    p: PropertyKey,
) -> JsResult<bool> {
    // 1. Return ? O.[[HasProperty]](P).
    o.internal_has_property(agent, p)
}

/// ### [7.3.12 HasOwnProperty ( O, P )](https://tc39.es/ecma262/#sec-hasownproperty)
pub(crate) fn has_own_property(
    agent: &mut Agent,
    o: impl InternalMethods,
    p: PropertyKey,
) -> JsResult<bool> {
    // 1. Let desc be ? O.[[GetOwnProperty]](P).
    let desc = o.internal_get_own_property(agent, p)?;
    // 2. If desc is undefined, return false.
    // 3. Return true.
    Ok(desc.is_some())
}

/// ### [7.3.13 Call ( F, V \[ , argumentsList \] )](https://tc39.es/ecma262/#sec-call)
pub(crate) fn call(
    agent: &mut Agent,
    f: Value,
    v: Value,
    arguments_list: Option<ArgumentsList>,
) -> JsResult<Value> {
    // 1. If argumentsList is not present, set argumentsList to a new empty
    //    List.
    let arguments_list = arguments_list.unwrap_or_default();
    // 2. If IsCallable(F) is false, throw a TypeError exception.
    let Some(f) = is_callable(f) else {
        return Err(throw_not_callable(agent));
    };
    // 3. Return ? F.[[Call]](V, argumentsList).
    f.internal_call(agent, v, arguments_list)
}

pub(crate) fn throw_not_callable(agent: &mut Agent) -> crate::ecmascript::execution::agent::JsError {
    agent.throw_exception_with_static_message(ExceptionType::TypeError, "Not a callable object")
}

/// Call variant for a known Function value.
pub(crate) fn call_function(
    agent: &mut Agent,
    f: Function,
    v: Value,
    arguments_list: Option<&[Value]>,
) -> JsResult<Value> {
    let arguments_list = ArgumentsList(arguments_list.unwrap_or(&[]));
    f.internal_call(agent, v, arguments_list)
}

/// ### [7.3.14 Construct ( F \[ , argumentsList \[ , newTarget \] \] )](https://tc39.es/ecma262/#sec-construct)
pub(crate) fn construct(
    agent: &mut Agent,
    f: Function,
    arguments_list: Option<ArgumentsList>,
    new_target: Option<Function>,
) -> JsResult<Object> {
    // 1. If newTarget is not present, set newTarget to F.
    let new_target = new_target.unwrap_or(f);
    // 2. If argumentsList is not present, set argumentsList to a new empty
    //    List.
    let arguments_list = arguments_list.unwrap_or_default();
    // 3. Return ? F.[[Construct]](argumentsList, newTarget).
    f.internal_construct(agent, arguments_list, new_target)
}

/// ### [7.3.20 Invoke ( V, P \[ , argumentsList \] )](https://tc39.es/ecma262/#sec-invoke)
pub(crate) fn invoke(
    agent: &mut Agent,
    v: Value,
    p: PropertyKey,
    arguments_list: Option<ArgumentsList>,
) -> JsResult<Value> {
    // 1. If argumentsList is not present, set argumentsList to a new empty
    //    List.
    let arguments_list = arguments_list.unwrap_or_default();
    // 2. Let func be ? GetV(V, P).
    let func = get_v(agent, v, p)?;
    // 3. Return ? Call(func, V, argumentsList).
    call(agent, func, v, Some(arguments_list))
}

/// ### [7.3.21 OrdinaryHasInstance ( C, O )](https://tc39.es/ecma262/#sec-ordinaryhasinstance)
pub(crate) fn ordinary_has_instance(agent: &mut Agent, c: Value, o: Value) -> JsResult<bool> {
    // 1. If IsCallable(C) is false, return false.
    let Some(c) = is_callable(c) else {
        return Ok(false);
    };
    // 2. If C has a [[BoundTargetFunction]] internal slot, then
    if let Function::BoundFunction(c) = c {
        // a. Let BC be C.[[BoundTargetFunction]].
        let bc = agent[c].bound_target_function;
        // b. Return ? InstanceofOperator(O, BC).
        return instanceof_operator(agent, o, bc.into_value());
    }
    // 3. If O is not an Object, return false.
    let Ok(o) = Object::try_from(o) else {
        return Ok(false);
    };
    // 4. Let P be ? Get(C, "prototype").
    let key = PropertyKey::from_str(agent, "prototype");
    let p = get(agent, c, key)?;
    // 5. If P is not an Object, throw a TypeError exception.
    let Ok(p) = Object::try_from(p) else {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Non-object prototype found",
        ));
    };
    // 6. Repeat: walk O's prototype chain looking for P.
    is_prototype_of_loop(agent, p, o)
}

/// ### [13.10.2 InstanceofOperator ( V, target )](https://tc39.es/ecma262/#sec-instanceofoperator)
pub(crate) fn instanceof_operator(
    agent: &mut Agent,
    value: Value,
    target: Value,
) -> JsResult<bool> {
    // 1. If target is not an Object, throw a TypeError exception.
    if !target.is_object() {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Right-hand side of 'instanceof' is not an object",
        ));
    }
    // 2. Let instOfHandler be ? GetMethod(target, %Symbol.hasInstance%).
    let inst_of_handler = get_method(
        agent,
        target,
        PropertyKey::from(crate::heap::WellKnownSymbolIndexes::HasInstance),
    )?;
    // 3. If instOfHandler is not undefined, then
    if let Some(inst_of_handler) = inst_of_handler {
        // a. Return ToBoolean(? Call(instOfHandler, target, « V »)).
        let result = call_function(agent, inst_of_handler, target, Some(&[value]))?;
        return Ok(super::type_conversion::to_boolean(agent, result));
    }
    // 4. If IsCallable(target) is false, throw a TypeError exception.
    if is_callable(target).is_none() {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Right-hand side of 'instanceof' is not callable",
        ));
    }
    // 5. Return ? OrdinaryHasInstance(target, V).
    ordinary_has_instance(agent, target, value)
}

/// ### [7.3.15 SetIntegrityLevel ( O, level )](https://tc39.es/ecma262/#sec-setintegritylevel)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IntegrityLevel {
    Sealed,
    Frozen,
}

pub(crate) fn set_integrity_level(
    agent: &mut Agent,
    o: Object,
    level: IntegrityLevel,
) -> JsResult<bool> {
    // 1. Let status be ? O.[[PreventExtensions]]().
    let status = o.internal_prevent_extensions(agent)?;
    // 2. If status is false, return false.
    if !status {
        return Ok(false);
    }
    // 3. Let keys be ? O.[[OwnPropertyKeys]]().
    let keys = o.internal_own_property_keys(agent)?;
    // 4. If level is SEALED, then
    if level == IntegrityLevel::Sealed {
        // a. For each element k of keys, do
        for k in keys {
            // i. Perform ? DefinePropertyOrThrow(O, k,
            //    PropertyDescriptor { [[Configurable]]: false }).
            define_property_or_throw(
                agent,
                o,
                k,
                PropertyDescriptor {
                    configurable: Some(false),
                    ..Default::default()
                },
            )?;
        }
    } else {
        // 5. Else,
        // a. Assert: level is FROZEN.
        // b. For each element k of keys, do
        for k in keys {
            // i. Let currentDesc be ? O.[[GetOwnProperty]](k).
            let current_desc = o.internal_get_own_property(agent, k)?;
            // ii. If currentDesc is not undefined, then
            let Some(current_desc) = current_desc else {
                continue;
            };
            // 1. If IsAccessorDescriptor(currentDesc) is true, then
            let desc = if current_desc.is_accessor_descriptor() {
                // a. Let desc be the PropertyDescriptor
                //    { [[Configurable]]: false }.
                PropertyDescriptor {
                    configurable: Some(false),
                    ..Default::default()
                }
            } else {
                // 2. Else, let desc be the PropertyDescriptor
                //    { [[Configurable]]: false, [[Writable]]: false }.
                PropertyDescriptor {
                    configurable: Some(false),
                    writable: Some(false),
                    ..Default::default()
                }
            };
            // 3. Perform ? DefinePropertyOrThrow(O, k, desc).
            define_property_or_throw(agent, o, k, desc)?;
        }
    }
    // 6. Return true.
    Ok(true)
}

/// ### [7.3.16 TestIntegrityLevel ( O, level )](https://tc39.es/ecma262/#sec-testintegritylevel)
pub(crate) fn test_integrity_level(
    agent: &mut Agent,
    o: Object,
    level: IntegrityLevel,
) -> JsResult<bool> {
    // 1. Let extensible be ? IsExtensible(O).
    // 2. If extensible is true, return false.
    if o.internal_is_extensible(agent)? {
        return Ok(false);
    }
    // 4. Let keys be ? O.[[OwnPropertyKeys]]().
    let keys = o.internal_own_property_keys(agent)?;
    // 5. For each element k of keys, do
    for k in keys {
        // a. Let currentDesc be ? O.[[GetOwnProperty]](k).
        let Some(current_desc) = o.internal_get_own_property(agent, k)? else {
            continue;
        };
        // b. If currentDesc is not undefined, then
        // i. If currentDesc.[[Configurable]] is true, return false.
        if current_desc.configurable == Some(true) {
            return Ok(false);
        }
        // ii. If level is FROZEN and IsDataDescriptor(currentDesc) is true,
        //     then
        if level == IntegrityLevel::Frozen
            && current_desc.is_data_descriptor()
            && current_desc.writable == Some(true)
        {
            // 1. If currentDesc.[[Writable]] is true, return false.
            return Ok(false);
        }
    }
    // 6. Return true.
    Ok(true)
}

/// ### [7.3.17 CreateArrayFromList ( elements )](https://tc39.es/ecma262/#sec-createarrayfromlist)
pub(crate) fn create_array_from_list(
    agent: &mut Agent,
    elements: &[Value],
) -> crate::ecmascript::builtins::array::Array {
    // 1. Let array be ! ArrayCreate(0).
    let array = array_create(agent, elements.len(), None).unwrap();
    // 2. Let n be 0.
    // 3. For each element e of elements, do
    for (n, e) in elements.iter().enumerate() {
        // a. Perform ! CreateDataPropertyOrThrow(array, ! ToString(𝔽(n)), e).
        create_data_property_or_throw(agent, array, PropertyKey::Integer(n as u32), *e).unwrap();
        // b. Set n to n + 1.
    }
    // 4. Return array.
    array
}

/// ### [7.3.18 LengthOfArrayLike ( obj )](https://tc39.es/ecma262/#sec-lengthofarraylike)
pub(crate) fn length_of_array_like(agent: &mut Agent, obj: Object) -> JsResult<i64> {
    // 1. Return ℝ(? ToLength(? Get(obj, "length"))).
    let key = PropertyKey::from_str(agent, "length");
    let length = get(agent, obj, key)?;
    to_length(agent, length)
}

/// ### [7.3.19 CreateListFromArrayLike ( obj \[ , elementTypes \] )](https://tc39.es/ecma262/#sec-createlistfromarraylike)
pub(crate) fn create_list_from_array_like(agent: &mut Agent, obj: Value) -> JsResult<Vec<Value>> {
    // 1. If obj is not an Object, throw a TypeError exception.
    let Ok(obj) = Object::try_from(obj) else {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Not an object",
        ));
    };
    // 2. Let len be ? LengthOfArrayLike(obj).
    let len = length_of_array_like(agent, obj)?;
    // 3. Let list be a new empty List.
    let mut list = Vec::with_capacity(len as usize);
    // 4. Let index be 0.
    // 5. Repeat, while index < len,
    for index in 0..len {
        // a. Let indexName be ! ToString(𝔽(index)).
        // b. Let next be ? Get(obj, indexName).
        let next = get(agent, obj, PropertyKey::Integer(index as u32))?;
        // d. Append next to list.
        list.push(next);
        // e. Set index to index + 1.
    }
    // 6. Return list.
    Ok(list)
}

/// ### [7.3.25 GetFunctionRealm ( obj )](https://tc39.es/ecma262/#sec-getfunctionrealm)
pub(crate) fn get_function_realm(agent: &Agent, obj: Function) -> RealmIdentifier {
    // 1. If obj has a [[Realm]] internal slot, return obj.[[Realm]].
    match obj {
        Function::ECMAScriptFunction(f) => agent[f].realm,
        Function::BuiltinFunction(f) => agent[f].realm,
        Function::BuiltinConstructorFunction(f) => agent[f].realm,
        // 2. If obj is a bound function exotic object, then
        //    a. Let boundTargetFunction be obj.[[BoundTargetFunction]].
        //    b. Return ? GetFunctionRealm(boundTargetFunction).
        Function::BoundFunction(f) => {
            get_function_realm(agent, agent[f].bound_target_function)
        }
        // 4. Return the current Realm Record: proxies are an extension
        //    point; every core function kind carries a realm.
    }
}

/// ### [7.3.26 CopyDataProperties ( target, source, excludedItems )](https://tc39.es/ecma262/#sec-copydataproperties)
pub(crate) fn copy_data_properties(
    agent: &mut Agent,
    target: Object,
    source: Value,
    excluded_items: &[PropertyKey],
) -> JsResult<()> {
    // 1. If source is either undefined or null, return UNUSED.
    if source.is_nullish() {
        return Ok(());
    }
    // 2. Let from be ! ToObject(source).
    let from = to_object(agent, source).unwrap();
    // 3. Let keys be ? from.[[OwnPropertyKeys]]().
    let keys = from.internal_own_property_keys(agent)?;
    // 4. For each element nextKey of keys, do
    for next_key in keys {
        // a. Let excluded be false.
        // b. For each element e of excludedItems: if SameValue(e, nextKey)
        //    is true, set excluded to true.
        if excluded_items.contains(&next_key) {
            continue;
        }
        // c. If excluded is false, then
        // i. Let desc be ? from.[[GetOwnProperty]](nextKey).
        let desc = from.internal_get_own_property(agent, next_key)?;
        // ii. If desc is not undefined and desc.[[Enumerable]] is true,
        //     then
        if let Some(desc) = desc {
            if desc.enumerable == Some(true) {
                // 1. Let propValue be ? Get(from, nextKey).
                let prop_value = get(agent, from, next_key)?;
                // 2. Perform ! CreateDataPropertyOrThrow(target, nextKey,
                //    propValue).
                create_data_property_or_throw(agent, target, next_key, prop_value).unwrap();
            }
        }
    }
    // 5. Return UNUSED.
    Ok(())
}

/// CopyDataProperties variant used by rest elements in destructuring: the
/// target is a fresh ordinary object.
pub(crate) fn copy_data_properties_into_object(
    agent: &mut Agent,
    source: Value,
    excluded_items: &[PropertyKey],
) -> JsResult<Object> {
    let target = ordinary_object_create_with_intrinsics(agent, Some(ProtoIntrinsics::Object));
    copy_data_properties(agent, target.into_object(), source, excluded_items)?;
    Ok(target.into_object())
}

/// ### [7.3.31 DefineField ( receiver, fieldRecord )](https://tc39.es/ecma262/#sec-definefield)
pub(crate) fn define_field(
    agent: &mut Agent,
    receiver: Object,
    field_record: &ClassFieldDefinitionRecord,
) -> JsResult<()> {
    // 1. Let fieldName be fieldRecord.[[Name]].
    let field_name = field_record.name;
    // 2. Let initializer be fieldRecord.[[Initializer]].
    // 3. If initializer is not EMPTY, then
    let init_value = if let Some(initializer) = field_record.initializer {
        // a. Let initValue be ? Call(initializer, receiver).
        call_function(
            agent,
            initializer.into_function(),
            receiver.into_value(),
            None,
        )?
    } else {
        // 4. Else, let initValue be undefined.
        Value::Undefined
    };
    // 5. If fieldName is a Private Name, then
    if let PropertyKey::PrivateName(private_name) = field_name {
        // a. Perform ? PrivateFieldAdd(receiver, fieldName, initValue).
        private_field_add(agent, receiver, private_name, init_value)
    } else {
        // 6. Else,
        // a. Assert: IsPropertyKey(fieldName) is true.
        // b. Perform ? CreateDataPropertyOrThrow(receiver, fieldName,
        //    initValue).
        create_data_property_or_throw(agent, receiver, field_name, init_value)
    }
    // 7. Return UNUSED.
}

/// ### [7.3.32 InitializeInstanceElements ( O, constructor )](https://tc39.es/ecma262/#sec-initializeinstanceelements)
pub(crate) fn initialize_instance_elements(
    agent: &mut Agent,
    o: Object,
    constructor: Function,
) -> JsResult<()> {
    let (methods, fields) = match constructor {
        Function::ECMAScriptFunction(f) => {
            (agent[f].private_methods.clone(), agent[f].fields.clone())
        }
        Function::BuiltinConstructorFunction(f) => {
            (agent[f].private_methods.clone(), agent[f].fields.clone())
        }
        _ => (Vec::new(), Vec::new()),
    };
    // 1. Let methods be the value of constructor.[[PrivateMethods]].
    // 2. For each PrivateElement method of methods, do
    for method in methods {
        // a. Perform ? PrivateMethodOrAccessorAdd(O, method).
        private_method_or_accessor_add(agent, o, method)?;
    }
    // 3. Let fields be the value of constructor.[[Fields]].
    // 4. For each element fieldRecord of fields, do
    for field_record in fields {
        // a. Perform ? DefineField(O, fieldRecord).
        define_field(agent, o, &field_record)?;
    }
    // 5. Return UNUSED.
    Ok(())
}

/// ### [7.3.33 AddValueToKeyedGroup]-adjacent enumeration support:
/// EnumerableOwnProperties ( O, kind ).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EnumPropKind {
    Key,
    Value,
    KeyValue,
}

/// ### [7.3.24 EnumerableOwnProperties ( O, kind )](https://tc39.es/ecma262/#sec-enumerableownproperties)
pub(crate) fn enumerable_own_properties(
    agent: &mut Agent,
    o: Object,
    kind: EnumPropKind,
) -> JsResult<Vec<Value>> {
    // 1. Let ownKeys be ? O.[[OwnPropertyKeys]]().
    let own_keys = o.internal_own_property_keys(agent)?;
    // 2. Let results be a new empty List.
    let mut results = Vec::with_capacity(own_keys.len());
    // 3. For each element key of ownKeys, do
    for key in own_keys {
        // a. If key is a String, then
        if matches!(key, PropertyKey::Symbol(_)) {
            continue;
        }
        // i. Let desc be ? O.[[GetOwnProperty]](key).
        let desc = o.internal_get_own_property(agent, key)?;
        // ii. If desc is not undefined and desc.[[Enumerable]] is true,
        //     then
        let Some(desc) = desc else {
            continue;
        };
        if desc.enumerable != Some(true) {
            continue;
        }
        // 1. If kind is KEY, then append key to results.
        match kind {
            EnumPropKind::Key => {
                results.push(key.into_value(agent));
            }
            // 2. Else,
            EnumPropKind::Value => {
                // a. Let value be ? Get(O, key).
                let value = get(agent, o, key)?;
                // b. If kind is VALUE, then append value to results.
                results.push(value);
            }
            EnumPropKind::KeyValue => {
                // c. Else: kind is KEY+VALUE; let entry be
                //    CreateArrayFromList(« key, value »); append entry.
                let value = get(agent, o, key)?;
                let key_value = key.into_value(agent);
                let entry = create_array_from_list(agent, &[key_value, value]);
                results.push(entry.into_value());
            }
        }
    }
    // 4. Return results.
    Ok(results)
}

/// ### [7.3.27 PrivateElementFind ( O, P )](https://tc39.es/ecma262/#sec-privateelementfind)
pub(crate) fn private_element_find(
    agent: &Agent,
    o: Object,
    p: PrivateName,
) -> Option<PrivateElement> {
    let backing_object = o.get_backing_object(agent)?;
    // 1. If O.[[PrivateElements]] contains a PrivateElement pe such that
    //    pe.[[Key]] is P, then return pe.
    agent[backing_object]
        .private_elements
        .iter()
        .find(|pe| pe.key == p)
        .copied()
    // 2. Return EMPTY.
}

/// ### [7.3.28 PrivateFieldAdd ( O, P, value )](https://tc39.es/ecma262/#sec-privatefieldadd)
pub(crate) fn private_field_add(
    agent: &mut Agent,
    o: Object,
    p: PrivateName,
    value: Value,
) -> JsResult<()> {
    // 1. If the host is a web browser: HostEnsureCanAddPrivateElement is
    //    host-defined; ordinary objects always allow private elements.
    // 2. Let entry be PrivateElementFind(O, P).
    // 3. If entry is not EMPTY, throw a TypeError exception.
    if private_element_find(agent, o, p).is_some() {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Cannot initialize private field twice on the same object",
        ));
    }
    // 4. Append PrivateElement { [[Key]]: P, [[Kind]]: FIELD,
    //    [[Value]]: value } to O.[[PrivateElements]].
    let backing_object = o.get_or_create_backing_object(agent);
    agent[backing_object]
        .private_elements
        .push(PrivateElement::field(p, value));
    // 5. Return UNUSED.
    Ok(())
}

/// ### [7.3.29 PrivateMethodOrAccessorAdd ( O, method )](https://tc39.es/ecma262/#sec-privatemethodoraccessoradd)
pub(crate) fn private_method_or_accessor_add(
    agent: &mut Agent,
    o: Object,
    method: PrivateElement,
) -> JsResult<()> {
    // 1. Assert: method.[[Kind]] is either METHOD or ACCESSOR.
    debug_assert!(method.kind != PrivateElementKind::Field);
    // 2. Let entry be PrivateElementFind(O, method.[[Key]]).
    // 3. If entry is not EMPTY, throw a TypeError exception.
    if private_element_find(agent, o, method.key).is_some() {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Cannot install private method twice on the same object",
        ));
    }
    // 4. Append method to O.[[PrivateElements]].
    let backing_object = o.get_or_create_backing_object(agent);
    agent[backing_object].private_elements.push(method);
    // 5. Return UNUSED.
    Ok(())
}

/// ### [7.3.30 PrivateGet ( O, P )](https://tc39.es/ecma262/#sec-privateget)
pub(crate) fn private_get(agent: &mut Agent, o: Object, p: PrivateName) -> JsResult<Value> {
    // 1. Let entry be PrivateElementFind(O, P).
    // 2. If entry is EMPTY, throw a TypeError exception.
    let Some(entry) = private_element_find(agent, o, p) else {
        return Err(throw_no_private_name_error(agent, p));
    };
    match entry.kind {
        // 3. If entry.[[Kind]] is either FIELD or METHOD, then
        PrivateElementKind::Field | PrivateElementKind::Method => {
            // a. Return entry.[[Value]].
            Ok(entry.value.unwrap())
        }
        PrivateElementKind::Accessor => {
            // 4. Assert: entry.[[Kind]] is ACCESSOR.
            // 5. If entry.[[Get]] is undefined, throw a TypeError exception.
            let Some(getter) = entry.get else {
                return Err(agent.throw_exception_with_static_message(
                    ExceptionType::TypeError,
                    "Private accessor was defined without a getter",
                ));
            };
            // 6. Let getter be entry.[[Get]].
            // 7. Return ? Call(getter, O).
            call_function(agent, getter, o.into_value(), None)
        }
    }
}

/// ### [7.3.31 PrivateSet ( O, P, value )](https://tc39.es/ecma262/#sec-privateset)
pub(crate) fn private_set(
    agent: &mut Agent,
    o: Object,
    p: PrivateName,
    value: Value,
) -> JsResult<()> {
    // 1. Let entry be PrivateElementFind(O, P).
    // 2. If entry is EMPTY, throw a TypeError exception.
    let Some(entry) = private_element_find(agent, o, p) else {
        return Err(throw_no_private_name_error(agent, p));
    };
    match entry.kind {
        // 3. If entry.[[Kind]] is FIELD, then
        PrivateElementKind::Field => {
            // a. Set entry.[[Value]] to value.
            let backing_object = o.get_backing_object(agent).unwrap();
            let entry = agent[backing_object]
                .private_elements
                .iter_mut()
                .find(|pe| pe.key == p)
                .unwrap();
            entry.value = Some(value);
            Ok(())
        }
        // 4. Else if entry.[[Kind]] is METHOD, then
        PrivateElementKind::Method => {
            // a. Throw a TypeError exception.
            Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Cannot assign to a private method",
            ))
        }
        // 5. Else,
        PrivateElementKind::Accessor => {
            // a. Assert: entry.[[Kind]] is ACCESSOR.
            // b. If entry.[[Set]] is undefined, throw a TypeError exception.
            let Some(setter) = entry.set else {
                return Err(agent.throw_exception_with_static_message(
                    ExceptionType::TypeError,
                    "Private accessor was defined without a setter",
                ));
            };
            // c. Let setter be entry.[[Set]].
            // d. Perform ? Call(setter, O, « value »).
            call_function(agent, setter, o.into_value(), Some(&[value]))?;
            // e. Return UNUSED.
            Ok(())
        }
    }
}

pub(crate) fn throw_no_private_name_error(
    agent: &mut Agent,
    p: PrivateName,
) -> crate::ecmascript::execution::agent::JsError {
    let name = PropertyKey::PrivateName(p).to_display_string(agent);
    let error_message = format!(
        "Cannot read private member {} from an object whose class did not declare it",
        name
    );
    agent.throw_exception(ExceptionType::TypeError, error_message)
}
