use crate::{
    ecmascript::{
        abstract_operations::{
            operations_on_objects::{
                define_property_or_throw, enumerable_own_properties, get, has_own_property, set,
                set_integrity_level, test_integrity_level, EnumPropKind, IntegrityLevel,
            },
            testing_and_comparison::same_value,
            type_conversion::{to_object, to_property_key},
        },
        builders::builtin_function_builder::BuiltinFunctionBuilder,
        builtins::{
            builtin_function::{ArgumentsList, Behaviour, Builtin},
            ordinary::{ordinary_create_from_constructor, ordinary_object_create},
        },
        execution::{
            agent::{Agent, ExceptionType, JsResult},
            realm::{ProtoIntrinsics, RealmIdentifier},
        },
        types::{
            language::{
                function::Function,
                object::{
                    internal_methods::InternalMethods, property_key::PropertyKey, IntoObject,
                    Object,
                },
                value::{IntoValue, Value},
            },
            spec::property_descriptor::PropertyDescriptor,
        },
    },
};

pub(crate) struct ObjectConstructor;

struct ObjectAssign;
impl Builtin for ObjectAssign {
    const NAME: &'static str = "assign";
    const LENGTH: u8 = 2;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ObjectConstructor::assign);
}
struct ObjectCreate;
impl Builtin for ObjectCreate {
    const NAME: &'static str = "create";
    const LENGTH: u8 = 2;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ObjectConstructor::create);
}
struct ObjectDefineProperties;
impl Builtin for ObjectDefineProperties {
    const NAME: &'static str = "defineProperties";
    const LENGTH: u8 = 2;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ObjectConstructor::define_properties);
}
struct ObjectDefineProperty;
impl Builtin for ObjectDefineProperty {
    const NAME: &'static str = "defineProperty";
    const LENGTH: u8 = 3;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ObjectConstructor::define_property);
}
struct ObjectEntries;
impl Builtin for ObjectEntries {
    const NAME: &'static str = "entries";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ObjectConstructor::entries);
}
struct ObjectFreeze;
impl Builtin for ObjectFreeze {
    const NAME: &'static str = "freeze";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ObjectConstructor::freeze);
}
struct ObjectGetOwnPropertyDescriptor;
impl Builtin for ObjectGetOwnPropertyDescriptor {
    const NAME: &'static str = "getOwnPropertyDescriptor";
    const LENGTH: u8 = 2;
    const BEHAVIOUR: Behaviour =
        Behaviour::Regular(ObjectConstructor::get_own_property_descriptor);
}
struct ObjectGetOwnPropertyNames;
impl Builtin for ObjectGetOwnPropertyNames {
    const NAME: &'static str = "getOwnPropertyNames";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ObjectConstructor::get_own_property_names);
}
struct ObjectGetPrototypeOf;
impl Builtin for ObjectGetPrototypeOf {
    const NAME: &'static str = "getPrototypeOf";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ObjectConstructor::get_prototype_of);
}
struct ObjectHasOwn;
impl Builtin for ObjectHasOwn {
    const NAME: &'static str = "hasOwn";
    const LENGTH: u8 = 2;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ObjectConstructor::has_own);
}
struct ObjectIs;
impl Builtin for ObjectIs {
    const NAME: &'static str = "is";
    const LENGTH: u8 = 2;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ObjectConstructor::is);
}
struct ObjectIsExtensible;
impl Builtin for ObjectIsExtensible {
    const NAME: &'static str = "isExtensible";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ObjectConstructor::is_extensible);
}
struct ObjectIsFrozen;
impl Builtin for ObjectIsFrozen {
    const NAME: &'static str = "isFrozen";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ObjectConstructor::is_frozen);
}
struct ObjectKeys;
impl Builtin for ObjectKeys {
    const NAME: &'static str = "keys";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ObjectConstructor::keys);
}
struct ObjectPreventExtensions;
impl Builtin for ObjectPreventExtensions {
    const NAME: &'static str = "preventExtensions";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ObjectConstructor::prevent_extensions);
}
struct ObjectSetPrototypeOf;
impl Builtin for ObjectSetPrototypeOf {
    const NAME: &'static str = "setPrototypeOf";
    const LENGTH: u8 = 2;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ObjectConstructor::set_prototype_of);
}
struct ObjectValues;
impl Builtin for ObjectValues {
    const NAME: &'static str = "values";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ObjectConstructor::values);
}

impl ObjectConstructor {
    /// ### [20.1.1.1 Object ( \[ value \] )](https://tc39.es/ecma262/#sec-object-value)
    fn constructor(
        agent: &mut Agent,
        _this_value: Value,
        arguments: ArgumentsList,
        new_target: Option<Object>,
    ) -> JsResult<Value> {
        let value = arguments.get(0);
        // 1. If NewTarget is neither undefined nor the active function
        //    object, then
        if let Some(new_target) = new_target {
            if new_target != agent.active_function_object().into_object() {
                // a. Return ? OrdinaryCreateFromConstructor(NewTarget,
                //    "%Object.prototype%").
                let new_target = Function::try_from(new_target.into_value()).unwrap();
                return Ok(ordinary_create_from_constructor(
                    agent,
                    new_target,
                    ProtoIntrinsics::Object,
                )?
                .into_value());
            }
        }
        // 2. If value is either undefined or null, return
        //    OrdinaryObjectCreate(%Object.prototype%).
        if value.is_nullish() {
            let prototype = agent.current_realm().intrinsics().object_prototype();
            return Ok(ordinary_object_create(agent, Some(prototype)).into_value());
        }
        // 3. Return ! ToObject(value).
        Ok(to_object(agent, value).unwrap().into_value())
    }

    /// ### [20.1.2.1 Object.assign ( target, ...sources )](https://tc39.es/ecma262/#sec-object.assign)
    fn assign(agent: &mut Agent, _this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1. Let to be ? ToObject(target).
        let to = to_object(agent, arguments.get(0))?;
        // 2. If only one argument was passed, return to.
        // 3. For each element nextSource of sources, do
        for next_source in arguments.iter().skip(1) {
            // a. If nextSource is neither undefined nor null, then
            if next_source.is_nullish() {
                continue;
            }
            // i. Let from be ! ToObject(nextSource).
            let from = to_object(agent, *next_source).unwrap();
            // ii. Let keys be ? from.[[OwnPropertyKeys]]().
            let keys = from.internal_own_property_keys(agent)?;
            // iii. For each element nextKey of keys, do
            for next_key in keys {
                // 1. Let desc be ? from.[[GetOwnProperty]](nextKey).
                let desc = from.internal_get_own_property(agent, next_key)?;
                // 2. If desc is not undefined and desc.[[Enumerable]] is
                //    true, then
                let Some(desc) = desc else { continue };
                if desc.enumerable != Some(true) {
                    continue;
                }
                // a. Let propValue be ? Get(from, nextKey).
                let prop_value = get(agent, from, next_key)?;
                // b. Perform ? Set(to, nextKey, propValue, true).
                set(agent, to, next_key, prop_value, true)?;
            }
        }
        // 4. Return to.
        Ok(to.into_value())
    }

    /// ### [20.1.2.2 Object.create ( O, Properties )](https://tc39.es/ecma262/#sec-object.create)
    fn create(agent: &mut Agent, _this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let o = arguments.get(0);
        // 1. If O is not an Object and O is not null, throw a TypeError
        //    exception.
        let proto = match o {
            Value::Null => None,
            _ => match Object::try_from(o) {
                Ok(object) => Some(object),
                Err(()) => {
                    return Err(agent.throw_exception_with_static_message(
                        ExceptionType::TypeError,
                        "Object prototype may only be an Object or null",
                    ));
                }
            },
        };
        // 2. Let obj be OrdinaryObjectCreate(O).
        let obj = ordinary_object_create(agent, proto);
        // 3. If Properties is not undefined, then
        let properties = arguments.get(1);
        if !properties.is_undefined() {
            // a. Return ? ObjectDefineProperties(obj, Properties).
            object_define_properties(agent, obj.into_object(), properties)?;
        }
        // 4. Return obj.
        Ok(obj.into_value())
    }

    /// ### [20.1.2.3 Object.defineProperties ( O, Properties )](https://tc39.es/ecma262/#sec-object.defineproperties)
    fn define_properties(
        agent: &mut Agent,
        _this_value: Value,
        arguments: ArgumentsList,
    ) -> JsResult<Value> {
        // 1. If O is not an Object, throw a TypeError exception.
        let Ok(o) = Object::try_from(arguments.get(0)) else {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Object.defineProperties called on non-object",
            ));
        };
        // 2. Return ? ObjectDefineProperties(O, Properties).
        object_define_properties(agent, o, arguments.get(1))?;
        Ok(o.into_value())
    }

    /// ### [20.1.2.4 Object.defineProperty ( O, P, Attributes )](https://tc39.es/ecma262/#sec-object.defineproperty)
    fn define_property(
        agent: &mut Agent,
        _this_value: Value,
        arguments: ArgumentsList,
    ) -> JsResult<Value> {
        // 1. If O is not an Object, throw a TypeError exception.
        let Ok(o) = Object::try_from(arguments.get(0)) else {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Object.defineProperty called on non-object",
            ));
        };
        // 2. Let key be ? ToPropertyKey(P).
        let key = to_property_key(agent, arguments.get(1))?;
        // 3. Let desc be ? ToPropertyDescriptor(Attributes).
        let desc = PropertyDescriptor::to_property_descriptor(agent, arguments.get(2))?;
        // 4. Perform ? DefinePropertyOrThrow(O, key, desc).
        define_property_or_throw(agent, o, key, desc)?;
        // 5. Return O.
        Ok(o.into_value())
    }

    /// ### [20.1.2.5 Object.entries ( O )](https://tc39.es/ecma262/#sec-object.entries)
    fn entries(agent: &mut Agent, _this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1. Let obj be ? ToObject(O).
        let obj = to_object(agent, arguments.get(0))?;
        // 2. Let entryList be ? EnumerableOwnProperties(obj, KEY+VALUE).
        let entry_list = enumerable_own_properties(agent, obj, EnumPropKind::KeyValue)?;
        // 3. Return CreateArrayFromList(entryList).
        Ok(
            crate::ecmascript::abstract_operations::operations_on_objects::create_array_from_list(
                agent,
                &entry_list,
            )
            .into_value(),
        )
    }

    /// ### [20.1.2.6 Object.freeze ( O )](https://tc39.es/ecma262/#sec-object.freeze)
    fn freeze(agent: &mut Agent, _this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1. If O is not an Object, return O.
        let o = arguments.get(0);
        let Ok(object) = Object::try_from(o) else {
            return Ok(o);
        };
        // 2. Let status be ? SetIntegrityLevel(O, FROZEN).
        let status = set_integrity_level(agent, object, IntegrityLevel::Frozen)?;
        // 3. If status is false, throw a TypeError exception.
        if !status {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Could not freeze object",
            ));
        }
        // 4. Return O.
        Ok(o)
    }

    /// ### [20.1.2.8 Object.getOwnPropertyDescriptor ( O, P )](https://tc39.es/ecma262/#sec-object.getownpropertydescriptor)
    fn get_own_property_descriptor(
        agent: &mut Agent,
        _this_value: Value,
        arguments: ArgumentsList,
    ) -> JsResult<Value> {
        // 1. Let obj be ? ToObject(O).
        let obj = to_object(agent, arguments.get(0))?;
        // 2. Let key be ? ToPropertyKey(P).
        let key = to_property_key(agent, arguments.get(1))?;
        // 3. Let desc be ? obj.[[GetOwnProperty]](key).
        let desc = obj.internal_get_own_property(agent, key)?;
        // 4. Return FromPropertyDescriptor(desc).
        PropertyDescriptor::from_property_descriptor(agent, desc)
    }

    /// ### [20.1.2.10 Object.getOwnPropertyNames ( O )](https://tc39.es/ecma262/#sec-object.getownpropertynames)
    fn get_own_property_names(
        agent: &mut Agent,
        _this_value: Value,
        arguments: ArgumentsList,
    ) -> JsResult<Value> {
        // 1. Return CreateArrayFromList(? GetOwnPropertyKeys(O, STRING)).
        let obj = to_object(agent, arguments.get(0))?;
        let keys = obj.internal_own_property_keys(agent)?;
        let mut names = Vec::with_capacity(keys.len());
        for key in keys {
            match key {
                PropertyKey::Integer(_) | PropertyKey::String(_) => {
                    names.push(key.into_value(agent));
                }
                _ => {}
            }
        }
        Ok(
            crate::ecmascript::abstract_operations::operations_on_objects::create_array_from_list(
                agent, &names,
            )
            .into_value(),
        )
    }

    /// ### [20.1.2.12 Object.getPrototypeOf ( O )](https://tc39.es/ecma262/#sec-object.getprototypeof)
    fn get_prototype_of(
        agent: &mut Agent,
        _this_value: Value,
        arguments: ArgumentsList,
    ) -> JsResult<Value> {
        // 1. Let obj be ? ToObject(O).
        let obj = to_object(agent, arguments.get(0))?;
        // 2. Return ? obj.[[GetPrototypeOf]]().
        Ok(obj
            .internal_get_prototype_of(agent)?
            .map_or(Value::Null, |proto| proto.into_value()))
    }

    /// ### [20.1.2.13 Object.hasOwn ( O, P )](https://tc39.es/ecma262/#sec-object.hasown)
    fn has_own(agent: &mut Agent, _this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1. Let obj be ? ToObject(O).
        let obj = to_object(agent, arguments.get(0))?;
        // 2. Let key be ? ToPropertyKey(P).
        let key = to_property_key(agent, arguments.get(1))?;
        // 3. Return ? HasOwnProperty(obj, key).
        Ok(has_own_property(agent, obj, key)?.into())
    }

    /// ### [20.1.2.14 Object.is ( value1, value2 )](https://tc39.es/ecma262/#sec-object.is)
    fn is(agent: &mut Agent, _this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1. Return SameValue(value1, value2).
        Ok(same_value(agent, arguments.get(0), arguments.get(1)).into())
    }

    /// ### [20.1.2.15 Object.isExtensible ( O )](https://tc39.es/ecma262/#sec-object.isextensible)
    fn is_extensible(
        agent: &mut Agent,
        _this_value: Value,
        arguments: ArgumentsList,
    ) -> JsResult<Value> {
        // 1. If O is not an Object, return false.
        let Ok(object) = Object::try_from(arguments.get(0)) else {
            return Ok(false.into());
        };
        // 2. Return ? IsExtensible(O).
        Ok(object.internal_is_extensible(agent)?.into())
    }

    /// ### [20.1.2.16 Object.isFrozen ( O )](https://tc39.es/ecma262/#sec-object.isfrozen)
    fn is_frozen(
        agent: &mut Agent,
        _this_value: Value,
        arguments: ArgumentsList,
    ) -> JsResult<Value> {
        // 1. If O is not an Object, return true.
        let Ok(object) = Object::try_from(arguments.get(0)) else {
            return Ok(true.into());
        };
        // 2. Return ? TestIntegrityLevel(O, FROZEN).
        Ok(test_integrity_level(agent, object, IntegrityLevel::Frozen)?.into())
    }

    /// ### [20.1.2.18 Object.keys ( O )](https://tc39.es/ecma262/#sec-object.keys)
    fn keys(agent: &mut Agent, _this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1. Let obj be ? ToObject(O).
        let obj = to_object(agent, arguments.get(0))?;
        // 2. Let keyList be ? EnumerableOwnProperties(obj, KEY).
        let key_list = enumerable_own_properties(agent, obj, EnumPropKind::Key)?;
        // 3. Return CreateArrayFromList(keyList).
        Ok(
            crate::ecmascript::abstract_operations::operations_on_objects::create_array_from_list(
                agent, &key_list,
            )
            .into_value(),
        )
    }

    /// ### [20.1.2.19 Object.preventExtensions ( O )](https://tc39.es/ecma262/#sec-object.preventextensions)
    fn prevent_extensions(
        agent: &mut Agent,
        _this_value: Value,
        arguments: ArgumentsList,
    ) -> JsResult<Value> {
        let o = arguments.get(0);
        // 1. If O is not an Object, return O.
        let Ok(object) = Object::try_from(o) else {
            return Ok(o);
        };
        // 2. Let status be ? O.[[PreventExtensions]]().
        let status = object.internal_prevent_extensions(agent)?;
        // 3. If status is false, throw a TypeError exception.
        if !status {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Could not prevent extensions",
            ));
        }
        // 4. Return O.
        Ok(o)
    }

    /// ### [20.1.2.21 Object.setPrototypeOf ( O, proto )](https://tc39.es/ecma262/#sec-object.setprototypeof)
    fn set_prototype_of(
        agent: &mut Agent,
        _this_value: Value,
        arguments: ArgumentsList,
    ) -> JsResult<Value> {
        let o = arguments.get(0);
        let proto = arguments.get(1);
        // 1. Set O to ? RequireObjectCoercible(O).
        crate::ecmascript::abstract_operations::testing_and_comparison::require_object_coercible(
            agent, o,
        )?;
        // 2. If proto is not an Object and proto is not null, throw a
        //    TypeError exception.
        let proto = match proto {
            Value::Null => None,
            _ => match Object::try_from(proto) {
                Ok(proto) => Some(proto),
                Err(()) => {
                    return Err(agent.throw_exception_with_static_message(
                        ExceptionType::TypeError,
                        "Object prototype may only be an Object or null",
                    ));
                }
            },
        };
        // 3. If O is not an Object, return O.
        let Ok(object) = Object::try_from(o) else {
            return Ok(o);
        };
        // 4. Let status be ? O.[[SetPrototypeOf]](proto).
        let status = object.internal_set_prototype_of(agent, proto)?;
        // 5. If status is false, throw a TypeError exception.
        if !status {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Could not set prototype",
            ));
        }
        // 6. Return O.
        Ok(o)
    }

    /// ### [20.1.2.23 Object.values ( O )](https://tc39.es/ecma262/#sec-object.values)
    fn values(agent: &mut Agent, _this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1. Let obj be ? ToObject(O).
        let obj = to_object(agent, arguments.get(0))?;
        // 2. Let valueList be ? EnumerableOwnProperties(obj, VALUE).
        let value_list = enumerable_own_properties(agent, obj, EnumPropKind::Value)?;
        // 3. Return CreateArrayFromList(valueList).
        Ok(
            crate::ecmascript::abstract_operations::operations_on_objects::create_array_from_list(
                agent,
                &value_list,
            )
            .into_value(),
        )
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent, realm: RealmIdentifier) {
        let object_prototype = agent.get_realm(realm).intrinsics().object_prototype();
        let object_constructor = BuiltinFunctionBuilder::new::<ObjectConstructorFunction>(
            agent, realm,
        )
        .with_prototype_property(object_prototype)
        .with_builtin_function_property::<ObjectAssign>()
        .with_builtin_function_property::<ObjectCreate>()
        .with_builtin_function_property::<ObjectDefineProperties>()
        .with_builtin_function_property::<ObjectDefineProperty>()
        .with_builtin_function_property::<ObjectEntries>()
        .with_builtin_function_property::<ObjectFreeze>()
        .with_builtin_function_property::<ObjectGetOwnPropertyDescriptor>()
        .with_builtin_function_property::<ObjectGetOwnPropertyNames>()
        .with_builtin_function_property::<ObjectGetPrototypeOf>()
        .with_builtin_function_property::<ObjectHasOwn>()
        .with_builtin_function_property::<ObjectIs>()
        .with_builtin_function_property::<ObjectIsExtensible>()
        .with_builtin_function_property::<ObjectIsFrozen>()
        .with_builtin_function_property::<ObjectKeys>()
        .with_builtin_function_property::<ObjectPreventExtensions>()
        .with_builtin_function_property::<ObjectSetPrototypeOf>()
        .with_builtin_function_property::<ObjectValues>()
        .build();
        agent
            .get_realm_mut(realm)
            .intrinsics_mut()
            .set("%Object%", object_constructor);

        // Wire %Object.prototype%.constructor.
        let constructor_key = PropertyKey::from_str(agent, "constructor");
        let Ok(object_prototype) =
            crate::ecmascript::types::OrdinaryObject::try_from(object_prototype)
        else {
            unreachable!()
        };
        agent[object_prototype].storage.set(
            constructor_key,
            crate::ecmascript::types::language::object::property_storage::PropertyData::Data {
                value: object_constructor.into_value(),
                writable: true,
                enumerable: false,
                configurable: true,
            },
        );
    }
}

struct ObjectConstructorFunction;
impl Builtin for ObjectConstructorFunction {
    const NAME: &'static str = "Object";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Constructor(ObjectConstructor::constructor);
}

/// ### [20.1.2.3.1 ObjectDefineProperties ( O, Properties )](https://tc39.es/ecma262/#sec-objectdefineproperties)
fn object_define_properties(
    agent: &mut Agent,
    o: Object,
    properties: Value,
) -> JsResult<()> {
    // 1. Let props be ? ToObject(Properties).
    let props = to_object(agent, properties)?;
    // 2. Let keys be ? props.[[OwnPropertyKeys]]().
    let keys = props.internal_own_property_keys(agent)?;
    // 3. Let descriptors be a new empty List.
    let mut descriptors = Vec::new();
    // 4. For each element nextKey of keys, do
    for next_key in keys {
        // a. Let propDesc be ? props.[[GetOwnProperty]](nextKey).
        let prop_desc = props.internal_get_own_property(agent, next_key)?;
        // b. If propDesc is not undefined and propDesc.[[Enumerable]] is
        //    true, then
        let Some(prop_desc) = prop_desc else { continue };
        if prop_desc.enumerable != Some(true) {
            continue;
        }
        // i. Let descObj be ? Get(props, nextKey).
        let desc_obj = get(agent, props, next_key)?;
        // ii. Let desc be ? ToPropertyDescriptor(descObj).
        let desc = PropertyDescriptor::to_property_descriptor(agent, desc_obj)?;
        // iii. Append the Record { [[Key]]: nextKey, [[Descriptor]]: desc }
        //      to descriptors.
        descriptors.push((next_key, desc));
    }
    // 5. For each element property of descriptors, do
    for (key, desc) in descriptors {
        // a. Perform ? DefinePropertyOrThrow(O, property.[[Key]],
        //    property.[[Descriptor]]).
        define_property_or_throw(agent, o, key, desc)?;
    }
    // 6. Return O.
    Ok(())
}
