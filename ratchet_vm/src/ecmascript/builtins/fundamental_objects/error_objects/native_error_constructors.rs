use super::error_constructor::error_constructor_behaviour;
use crate::ecmascript::{
    builders::builtin_function_builder::BuiltinFunctionBuilder,
    builtins::builtin_function::{ArgumentsList, Behaviour, Builtin, BuiltinFunction},
    execution::{
        agent::{Agent, ExceptionType, JsResult},
        realm::{ProtoIntrinsics, RealmIdentifier},
    },
    types::{
        language::{
            object::{property_key::PropertyKey, IntoObject, Object},
            value::{IntoValue, Value},
        },
    },
};

/// ### [20.5.6 NativeError Object Structure](https://tc39.es/ecma262/#sec-nativeerror-object-structure)
pub(crate) struct NativeErrorConstructors;

macro_rules! native_error {
    ($builtin: ident, $name: literal, $kind: ident, $behaviour: ident) => {
        struct $builtin;
        impl Builtin for $builtin {
            const NAME: &'static str = $name;
            const LENGTH: u8 = 1;
            const BEHAVIOUR: Behaviour = Behaviour::Constructor($behaviour);
        }

        fn $behaviour(
            agent: &mut Agent,
            _this_value: Value,
            arguments: ArgumentsList,
            new_target: Option<Object>,
        ) -> JsResult<Value> {
            error_constructor_behaviour(
                agent,
                ExceptionType::$kind,
                ProtoIntrinsics::$kind,
                arguments,
                new_target,
            )
        }
    };
}

native_error!(EvalErrorConstructor, "EvalError", EvalError, eval_error_behaviour);
native_error!(RangeErrorConstructor, "RangeError", RangeError, range_error_behaviour);
native_error!(
    ReferenceErrorConstructor,
    "ReferenceError",
    ReferenceError,
    reference_error_behaviour
);
native_error!(SyntaxErrorConstructor, "SyntaxError", SyntaxError, syntax_error_behaviour);
native_error!(TypeErrorConstructor, "TypeError", TypeError, type_error_behaviour);
native_error!(UriErrorConstructor, "URIError", UriError, uri_error_behaviour);

impl NativeErrorConstructors {
    pub(crate) fn create_intrinsic(
        agent: &mut Agent,
        realm: RealmIdentifier,
        error_constructor: BuiltinFunction,
    ) {
        fn install<T: Builtin>(
            agent: &mut Agent,
            realm: RealmIdentifier,
            error_constructor: BuiltinFunction,
            constructor_name: &'static str,
            prototype_name: &'static str,
        ) {
            let prototype = agent
                .get_realm(realm)
                .intrinsics()
                .get(prototype_name)
                .unwrap();
            let constructor = BuiltinFunctionBuilder::new::<T>(agent, realm)
                .with_prototype(error_constructor.into_object())
                .with_prototype_property(prototype)
                .build();
            agent
                .get_realm_mut(realm)
                .intrinsics_mut()
                .set(constructor_name, constructor);

            let constructor_key = PropertyKey::from_str(agent, "constructor");
            let Object::Object(prototype) = prototype else {
                unreachable!()
            };
            agent[prototype].storage.set(
                constructor_key,
                crate::ecmascript::types::language::object::property_storage::PropertyData::Data {
                    value: constructor.into_value(),
                    writable: true,
                    enumerable: false,
                    configurable: true,
                },
            );
        }

        install::<EvalErrorConstructor>(
            agent,
            realm,
            error_constructor,
            "%EvalError%",
            "%EvalError.prototype%",
        );
        install::<RangeErrorConstructor>(
            agent,
            realm,
            error_constructor,
            "%RangeError%",
            "%RangeError.prototype%",
        );
        install::<ReferenceErrorConstructor>(
            agent,
            realm,
            error_constructor,
            "%ReferenceError%",
            "%ReferenceError.prototype%",
        );
        install::<SyntaxErrorConstructor>(
            agent,
            realm,
            error_constructor,
            "%SyntaxError%",
            "%SyntaxError.prototype%",
        );
        install::<TypeErrorConstructor>(
            agent,
            realm,
            error_constructor,
            "%TypeError%",
            "%TypeError.prototype%",
        );
        install::<UriErrorConstructor>(
            agent,
            realm,
            error_constructor,
            "%URIError%",
            "%URIError.prototype%",
        );
    }
}
