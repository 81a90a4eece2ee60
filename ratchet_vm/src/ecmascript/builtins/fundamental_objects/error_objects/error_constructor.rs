use crate::{
    ecmascript::{
        abstract_operations::{
            operations_on_objects::{get, has_property},
            type_conversion::to_string,
        },
        builders::builtin_function_builder::BuiltinFunctionBuilder,
        builtins::{
            builtin_function::{ArgumentsList, Behaviour, Builtin, BuiltinFunction},
            error::{Error, ErrorHeapData},
            ordinary::get_prototype_from_constructor,
        },
        execution::{
            agent::{Agent, ExceptionType, JsResult},
            realm::{ProtoIntrinsics, RealmIdentifier},
        },
        types::{
            language::{
                function::Function,
                object::{data::ObjectHeapData, property_key::PropertyKey, Object},
                value::{IntoValue, Value},
            },
        },
    },
    heap::CreateHeapData,
};

pub(crate) struct ErrorConstructor;

struct ErrorConstructorFunction;
impl Builtin for ErrorConstructorFunction {
    const NAME: &'static str = "Error";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Constructor(ErrorConstructor::constructor);
}

/// ### [20.5.1.1 Error ( message \[ , options \] )](https://tc39.es/ecma262/#sec-error-message)
///
/// The shared constructor behaviour of %Error% and the native error
/// constructors.
pub(crate) fn error_constructor_behaviour(
    agent: &mut Agent,
    kind: ExceptionType,
    proto_intrinsic: ProtoIntrinsics,
    arguments: ArgumentsList,
    new_target: Option<Object>,
) -> JsResult<Value> {
    // 1. If NewTarget is undefined, let newTarget be the active function
    //    object; else let newTarget be NewTarget.
    let new_target = new_target.unwrap_or_else(|| {
        use crate::ecmascript::types::language::object::IntoObject;
        agent.active_function_object().into_object()
    });
    let new_target = Function::try_from(new_target.into_value()).unwrap();

    // 2. Let O be ? OrdinaryCreateFromConstructor(newTarget,
    //    "%Error.prototype%", « [[ErrorData]] »).
    let prototype = get_prototype_from_constructor(agent, new_target, proto_intrinsic)?;
    let backing_object = agent.heap.create(ObjectHeapData::new(prototype));

    // 3. If message is not undefined, then
    let message = arguments.get(0);
    let message = if message.is_undefined() {
        None
    } else {
        // a. Let msg be ? ToString(message).
        // b. Perform CreateNonEnumerableDataPropertyOrThrow(O, "message",
        //    msg).
        Some(to_string(agent, message)?)
    };

    // 4. Perform ? InstallErrorCause(O, options).
    let options = arguments.get(1);
    let cause = if let Ok(options) = Object::try_from(options) {
        let cause_key = PropertyKey::from_str(agent, "cause");
        // InstallErrorCause: if options has a "cause" property, define it.
        if has_property(agent, options, cause_key)? {
            Some(get(agent, options, cause_key)?)
        } else {
            None
        }
    } else {
        None
    };

    let error: Error = agent.heap.create(ErrorHeapData::new(kind, message, cause));
    agent[error].object_index = Some(backing_object);

    // 5. Return O.
    Ok(error.into_value())
}

impl ErrorConstructor {
    fn constructor(
        agent: &mut Agent,
        _this_value: Value,
        arguments: ArgumentsList,
        new_target: Option<Object>,
    ) -> JsResult<Value> {
        error_constructor_behaviour(
            agent,
            ExceptionType::Error,
            ProtoIntrinsics::Error,
            arguments,
            new_target,
        )
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent, realm: RealmIdentifier) -> BuiltinFunction {
        let error_prototype = agent
            .get_realm(realm)
            .intrinsics()
            .get("%Error.prototype%")
            .unwrap();
        let error_constructor =
            BuiltinFunctionBuilder::new::<ErrorConstructorFunction>(agent, realm)
                .with_prototype_property(error_prototype)
                .build();
        agent
            .get_realm_mut(realm)
            .intrinsics_mut()
            .set("%Error%", error_constructor);

        // Wire %Error.prototype%.constructor.
        let constructor_key = PropertyKey::from_str(agent, "constructor");
        let Object::Object(error_prototype) = error_prototype else {
            unreachable!()
        };
        agent[error_prototype].storage.set(
            constructor_key,
            crate::ecmascript::types::language::object::property_storage::PropertyData::Data {
                value: error_constructor.into_value(),
                writable: true,
                enumerable: false,
                configurable: true,
            },
        );
        error_constructor
    }
}
