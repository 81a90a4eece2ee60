use crate::ecmascript::{
    builders::ordinary_object_builder::OrdinaryObjectBuilder,
    builtins::{
        builtin_function::{ArgumentsList, Behaviour, Builtin},
        primitive_objects::PrimitiveObjectData,
    },
    execution::{
        agent::{Agent, ExceptionType, JsResult},
        realm::RealmIdentifier,
    },
    types::{
        language::{string::String, value::{IntoValue, Value}},
    },
};

pub(crate) struct BooleanPrototype;

struct BooleanPrototypeToString;
impl Builtin for BooleanPrototypeToString {
    const NAME: &'static str = "toString";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(BooleanPrototype::to_string);
}
struct BooleanPrototypeValueOf;
impl Builtin for BooleanPrototypeValueOf {
    const NAME: &'static str = "valueOf";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(BooleanPrototype::value_of);
}

/// ### [20.3.3.3.1 ThisBooleanValue ( value )](https://tc39.es/ecma262/#sec-thisbooleanvalue)
fn this_boolean_value(agent: &mut Agent, value: Value) -> JsResult<bool> {
    match value {
        // 1. If value is a Boolean, return value.
        Value::Boolean(b) => Ok(b),
        // 2. If value is an Object and value has a [[BooleanData]] internal
        //    slot, return value.[[BooleanData]].
        Value::PrimitiveObject(o) => {
            if let PrimitiveObjectData::Boolean(b) = agent[o].data {
                Ok(b)
            } else {
                Err(agent.throw_exception_with_static_message(
                    ExceptionType::TypeError,
                    "Not a Boolean or Boolean object",
                ))
            }
        }
        // 3. Throw a TypeError exception.
        _ => Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Not a Boolean or Boolean object",
        )),
    }
}

impl BooleanPrototype {
    /// ### [20.3.3.2 Boolean.prototype.toString ( )](https://tc39.es/ecma262/#sec-boolean.prototype.tostring)
    fn to_string(
        agent: &mut Agent,
        this_value: Value,
        _arguments: ArgumentsList,
    ) -> JsResult<Value> {
        // 1. Let b be ? ThisBooleanValue(this value).
        let b = this_boolean_value(agent, this_value)?;
        // 2. If b is true, return "true"; else return "false".
        Ok(String::from_str(agent, if b { "true" } else { "false" }).into_value())
    }

    /// ### [20.3.3.3 Boolean.prototype.valueOf ( )](https://tc39.es/ecma262/#sec-boolean.prototype.valueof)
    fn value_of(
        agent: &mut Agent,
        this_value: Value,
        _arguments: ArgumentsList,
    ) -> JsResult<Value> {
        // 1. Return ? ThisBooleanValue(this value).
        Ok(this_boolean_value(agent, this_value)?.into())
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent, realm: RealmIdentifier) {
        let object_prototype = agent.get_realm(realm).intrinsics().object_prototype();
        let boolean_prototype = OrdinaryObjectBuilder::new(agent, realm)
            .with_prototype(object_prototype)
            .with_builtin_function_property::<BooleanPrototypeToString>()
            .with_builtin_function_property::<BooleanPrototypeValueOf>()
            .build();
        agent
            .get_realm_mut(realm)
            .intrinsics_mut()
            .set("%Boolean.prototype%", boolean_prototype);
    }
}
