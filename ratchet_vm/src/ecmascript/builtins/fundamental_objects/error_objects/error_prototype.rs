use crate::ecmascript::{
    abstract_operations::{operations_on_objects::get, type_conversion::to_string},
    builders::ordinary_object_builder::OrdinaryObjectBuilder,
    builtins::builtin_function::{ArgumentsList, Behaviour, Builtin},
    execution::{
        agent::{Agent, ExceptionType, JsResult},
        realm::RealmIdentifier,
    },
    types::{
        language::{
            object::{property_key::PropertyKey, Object},
            string::String,
            value::{IntoValue, Value},
        },
    },
};

pub(crate) struct ErrorPrototype;

struct ErrorPrototypeToString;
impl Builtin for ErrorPrototypeToString {
    const NAME: &'static str = "toString";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ErrorPrototype::to_string);
}

impl ErrorPrototype {
    /// ### [20.5.3.4 Error.prototype.toString ( )](https://tc39.es/ecma262/#sec-error.prototype.tostring)
    fn to_string(
        agent: &mut Agent,
        this_value: Value,
        _arguments: ArgumentsList,
    ) -> JsResult<Value> {
        // 1. Let O be the this value.
        // 2. If O is not an Object, throw a TypeError exception.
        let Ok(o) = Object::try_from(this_value) else {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Error.prototype.toString called on non-object",
            ));
        };
        // 3. Let name be ? Get(O, "name").
        let name_key = PropertyKey::from_str(agent, "name");
        let name = get(agent, o, name_key)?;
        // 4. If name is undefined, set name to "Error"; otherwise set name
        //    to ? ToString(name).
        let name = if name.is_undefined() {
            String::from_str(agent, "Error")
        } else {
            to_string(agent, name)?
        };
        // 5. Let msg be ? Get(O, "message").
        let message_key = PropertyKey::from_str(agent, "message");
        let msg = get(agent, o, message_key)?;
        // 6. If msg is undefined, set msg to the empty String; otherwise
        //    set msg to ? ToString(msg).
        let msg = if msg.is_undefined() {
            String::EMPTY_STRING
        } else {
            to_string(agent, msg)?
        };
        // 7. If name is the empty String, return msg.
        if name.is_empty(agent) {
            return Ok(msg.into_value());
        }
        // 8. If msg is the empty String, return name.
        if msg.is_empty(agent) {
            return Ok(name.into_value());
        }
        // 9. Return the string-concatenation of name, ": ", and msg.
        let text = format!("{}: {}", name.as_str(agent), msg.as_str(agent));
        Ok(String::from_string(agent, text).into_value())
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent, realm: RealmIdentifier) {
        let object_prototype = agent.get_realm(realm).intrinsics().object_prototype();
        let name_key = PropertyKey::from_str(agent, "name");
        let name_value = String::from_str(agent, "Error").into_value();
        let message_key = PropertyKey::from_str(agent, "message");
        let error_prototype = OrdinaryObjectBuilder::new(agent, realm)
            .with_prototype(object_prototype)
            .with_data_property(message_key, String::EMPTY_STRING.into_value())
            .with_data_property(name_key, name_value)
            .with_builtin_function_property::<ErrorPrototypeToString>()
            .build();
        agent
            .get_realm_mut(realm)
            .intrinsics_mut()
            .set("%Error.prototype%", error_prototype);
    }
}
