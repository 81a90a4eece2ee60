use crate::{
    ecmascript::{
        abstract_operations::{
            operations_on_objects::{get, has_own_property},
            testing_and_comparison::is_prototype_of_loop,
            type_conversion::{to_object, to_property_key},
        },
        builders::ordinary_object_builder::OrdinaryObjectBuilder,
        builtins::builtin_function::{ArgumentsList, Behaviour, Builtin},
        execution::{
            agent::{Agent, JsResult},
            realm::RealmIdentifier,
        },
        types::{
            language::{
                object::{property_key::PropertyKey, Object},
                string::String,
                value::{IntoValue, Value},
            },
        },
    },
    heap::WellKnownSymbolIndexes,
};

pub(crate) struct ObjectPrototype;

struct ObjectPrototypeHasOwnProperty;
impl Builtin for ObjectPrototypeHasOwnProperty {
    const NAME: &'static str = "hasOwnProperty";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ObjectPrototype::has_own_property);
}
struct ObjectPrototypeIsPrototypeOf;
impl Builtin for ObjectPrototypeIsPrototypeOf {
    const NAME: &'static str = "isPrototypeOf";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ObjectPrototype::is_prototype_of);
}
struct ObjectPrototypePropertyIsEnumerable;
impl Builtin for ObjectPrototypePropertyIsEnumerable {
    const NAME: &'static str = "propertyIsEnumerable";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ObjectPrototype::property_is_enumerable);
}
struct ObjectPrototypeToLocaleString;
impl Builtin for ObjectPrototypeToLocaleString {
    const NAME: &'static str = "toLocaleString";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ObjectPrototype::to_locale_string);
}
struct ObjectPrototypeToString;
impl Builtin for ObjectPrototypeToString {
    const NAME: &'static str = "toString";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ObjectPrototype::to_string);
}
struct ObjectPrototypeValueOf;
impl Builtin for ObjectPrototypeValueOf {
    const NAME: &'static str = "valueOf";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ObjectPrototype::value_of);
}

impl ObjectPrototype {
    /// ### [20.1.3.2 Object.prototype.hasOwnProperty ( V )](https://tc39.es/ecma262/#sec-object.prototype.hasownproperty)
    fn has_own_property(
        agent: &mut Agent,
        this_value: Value,
        arguments: ArgumentsList,
    ) -> JsResult<Value> {
        // 1. Let P be ? ToPropertyKey(V).
        let p = to_property_key(agent, arguments.get(0))?;
        // 2. Let O be ? ToObject(this value).
        let o = to_object(agent, this_value)?;
        // 3. Return ? HasOwnProperty(O, P).
        Ok(has_own_property(agent, o, p)?.into())
    }

    /// ### [20.1.3.3 Object.prototype.isPrototypeOf ( V )](https://tc39.es/ecma262/#sec-object.prototype.isprototypeof)
    fn is_prototype_of(
        agent: &mut Agent,
        this_value: Value,
        arguments: ArgumentsList,
    ) -> JsResult<Value> {
        // 1. If V is not an Object, return false.
        let Ok(v) = Object::try_from(arguments.get(0)) else {
            return Ok(false.into());
        };
        // 2. Let O be ? ToObject(this value).
        let o = to_object(agent, this_value)?;
        // 3. Repeat: walk V's prototype chain.
        Ok(is_prototype_of_loop(agent, o, v)?.into())
    }

    /// ### [20.1.3.4 Object.prototype.propertyIsEnumerable ( V )](https://tc39.es/ecma262/#sec-object.prototype.propertyisenumerable)
    fn property_is_enumerable(
        agent: &mut Agent,
        this_value: Value,
        arguments: ArgumentsList,
    ) -> JsResult<Value> {
        use crate::ecmascript::types::language::object::internal_methods::InternalMethods;
        // 1. Let P be ? ToPropertyKey(V).
        let p = to_property_key(agent, arguments.get(0))?;
        // 2. Let O be ? ToObject(this value).
        let o = to_object(agent, this_value)?;
        // 3. Let desc be ? O.[[GetOwnProperty]](P).
        let desc = o.internal_get_own_property(agent, p)?;
        // 4. If desc is undefined, return false.
        // 5. Return the value of desc.[[Enumerable]].
        Ok(desc
            .is_some_and(|desc| desc.enumerable == Some(true))
            .into())
    }

    /// ### [20.1.3.5 Object.prototype.toLocaleString ( )](https://tc39.es/ecma262/#sec-object.prototype.tolocalestring)
    fn to_locale_string(
        agent: &mut Agent,
        this_value: Value,
        _arguments: ArgumentsList,
    ) -> JsResult<Value> {
        // 1. Let O be the this value.
        // 2. Return ? Invoke(O, "toString").
        let to_string_key = PropertyKey::from_str(agent, "toString");
        crate::ecmascript::abstract_operations::operations_on_objects::invoke(
            agent,
            this_value,
            to_string_key,
            None,
        )
    }

    /// ### [20.1.3.6 Object.prototype.toString ( )](https://tc39.es/ecma262/#sec-object.prototype.tostring)
    fn to_string(
        agent: &mut Agent,
        this_value: Value,
        _arguments: ArgumentsList,
    ) -> JsResult<Value> {
        // 1. If the this value is undefined, return "[object Undefined]".
        // 2. If the this value is null, return "[object Null]".
        let builtin_tag = match this_value {
            Value::Undefined => {
                return Ok(String::from_str(agent, "[object Undefined]").into_value())
            }
            Value::Null => return Ok(String::from_str(agent, "[object Null]").into_value()),
            // 4.-13. The builtinTag by intrinsic kind.
            Value::Array(_) => "Array",
            Value::BoundFunction(_)
            | Value::BuiltinFunction(_)
            | Value::BuiltinConstructorFunction(_)
            | Value::ECMAScriptFunction(_) => "Function",
            Value::Error(_) => "Error",
            Value::PrimitiveObject(o) => {
                if o.is_boolean_object(agent) {
                    "Boolean"
                } else {
                    match agent[o].data {
                        crate::ecmascript::builtins::primitive_objects::PrimitiveObjectData::Number(_) => "Number",
                        crate::ecmascript::builtins::primitive_objects::PrimitiveObjectData::String(_) => "String",
                        _ => "Object",
                    }
                }
            }
            _ => "Object",
        };
        // 3. Let O be ! ToObject(this value).
        let o = to_object(agent, this_value).unwrap();
        // 14. Let tag be ? Get(O, %Symbol.toStringTag%).
        let tag = get(
            agent,
            o,
            PropertyKey::from(WellKnownSymbolIndexes::ToStringTag),
        )?;
        // 15. If tag is not a String, set tag to builtinTag.
        let tag_text = match tag {
            Value::String(tag) => tag.as_str(agent).to_owned(),
            _ => builtin_tag.to_owned(),
        };
        // 16. Return the string-concatenation of "[object ", tag, and "]".
        let text = format!("[object {}]", tag_text);
        Ok(String::from_string(agent, text).into_value())
    }

    /// ### [20.1.3.7 Object.prototype.valueOf ( )](https://tc39.es/ecma262/#sec-object.prototype.valueof)
    fn value_of(
        agent: &mut Agent,
        this_value: Value,
        _arguments: ArgumentsList,
    ) -> JsResult<Value> {
        // 1. Return ? ToObject(this value).
        Ok(to_object(agent, this_value)?.into_value())
    }

    /// Populate the bootstrapped %Object.prototype% object. Its
    /// \[\[Prototype\]\] is null.
    pub(crate) fn populate_intrinsic(
        agent: &mut Agent,
        realm: RealmIdentifier,
        object_prototype: crate::ecmascript::types::OrdinaryObject,
    ) {
        OrdinaryObjectBuilder::new_intrinsic_object(agent, realm, object_prototype)
            .with_builtin_function_property::<ObjectPrototypeHasOwnProperty>()
            .with_builtin_function_property::<ObjectPrototypeIsPrototypeOf>()
            .with_builtin_function_property::<ObjectPrototypePropertyIsEnumerable>()
            .with_builtin_function_property::<ObjectPrototypeToLocaleString>()
            .with_builtin_function_property::<ObjectPrototypeToString>()
            .with_builtin_function_property::<ObjectPrototypeValueOf>()
            .build();

        // %Object.prototype.toString% is itself a named intrinsic.
        let to_string_key = PropertyKey::from_str(agent, "toString");
        let to_string_fn = crate::ecmascript::abstract_operations::operations_on_objects::get(
            agent,
            object_prototype,
            to_string_key,
        )
        .unwrap();
        let to_string_fn = Object::try_from(to_string_fn).unwrap();
        agent
            .get_realm_mut(realm)
            .intrinsics_mut()
            .set("%Object.prototype.toString%", to_string_fn);
    }
}
