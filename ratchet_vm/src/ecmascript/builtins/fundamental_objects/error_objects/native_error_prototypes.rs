use crate::ecmascript::{
    builders::ordinary_object_builder::OrdinaryObjectBuilder,
    execution::{agent::Agent, realm::RealmIdentifier},
    types::{
        language::{object::property_key::PropertyKey, string::String, value::IntoValue},
    },
};

/// ### [20.5.6.3 Properties of the NativeError Prototype Objects](https://tc39.es/ecma262/#sec-properties-of-the-nativeerror-prototype-objects)
pub(crate) struct NativeErrorPrototypes;

const NATIVE_ERRORS: [(&str, &str); 6] = [
    ("EvalError", "%EvalError.prototype%"),
    ("RangeError", "%RangeError.prototype%"),
    ("ReferenceError", "%ReferenceError.prototype%"),
    ("SyntaxError", "%SyntaxError.prototype%"),
    ("TypeError", "%TypeError.prototype%"),
    ("URIError", "%URIError.prototype%"),
];

impl NativeErrorPrototypes {
    pub(crate) fn create_intrinsic(agent: &mut Agent, realm: RealmIdentifier) {
        let error_prototype = agent
            .get_realm(realm)
            .intrinsics()
            .get("%Error.prototype%")
            .unwrap();
        for (name, intrinsic_name) in NATIVE_ERRORS {
            let name_key = PropertyKey::from_str(agent, "name");
            let name_value = String::from_str(agent, name).into_value();
            let message_key = PropertyKey::from_str(agent, "message");
            let prototype = OrdinaryObjectBuilder::new(agent, realm)
                .with_prototype(error_prototype)
                .with_data_property(message_key, String::EMPTY_STRING.into_value())
                .with_data_property(name_key, name_value)
                .build();
            agent
                .get_realm_mut(realm)
                .intrinsics_mut()
                .set(intrinsic_name, prototype);
        }
    }
}
