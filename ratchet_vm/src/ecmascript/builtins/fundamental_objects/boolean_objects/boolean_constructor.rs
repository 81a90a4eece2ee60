use crate::ecmascript::{
    abstract_operations::type_conversion::to_boolean,
    builders::builtin_function_builder::BuiltinFunctionBuilder,
    builtins::{
        builtin_function::{ArgumentsList, Behaviour, Builtin},
        ordinary::get_prototype_from_constructor,
        primitive_objects::{PrimitiveObjectData, PrimitiveObjectHeapData},
    },
    execution::{
        agent::{Agent, JsResult},
        realm::{ProtoIntrinsics, RealmIdentifier},
    },
    types::{
        language::{
            function::Function,
            object::{internal_slots::InternalSlots, property_key::PropertyKey, Object},
            value::{IntoValue, Value},
        },
    },
};
use crate::heap::CreateHeapData;

pub(crate) struct BooleanConstructor;

struct BooleanConstructorFunction;
impl Builtin for BooleanConstructorFunction {
    const NAME: &'static str = "Boolean";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Constructor(BooleanConstructor::constructor);
}

impl BooleanConstructor {
    /// ### [20.3.1.1 Boolean ( value )](https://tc39.es/ecma262/#sec-boolean-constructor-boolean-value)
    fn constructor(
        agent: &mut Agent,
        _this_value: Value,
        arguments: ArgumentsList,
        new_target: Option<Object>,
    ) -> JsResult<Value> {
        // 1. Let b be ToBoolean(value).
        let b = to_boolean(agent, arguments.get(0));
        // 2. If NewTarget is undefined, return b.
        let Some(new_target) = new_target else {
            return Ok(b.into());
        };
        // 3. Let O be ? OrdinaryCreateFromConstructor(NewTarget,
        //    "%Boolean.prototype%", « [[BooleanData]] »).
        let new_target = Function::try_from(new_target.into_value()).unwrap();
        let prototype =
            get_prototype_from_constructor(agent, new_target, ProtoIntrinsics::Boolean)?;
        // 4. Set O.[[BooleanData]] to b.
        let o = agent
            .heap
            .create(PrimitiveObjectHeapData::new(PrimitiveObjectData::Boolean(b)));
        if let Some(prototype) = prototype {
            o.internal_set_prototype(agent, Some(prototype));
        }
        // 5. Return O.
        Ok(o.into_value())
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent, realm: RealmIdentifier) {
        let boolean_prototype = agent
            .get_realm(realm)
            .intrinsics()
            .get("%Boolean.prototype%")
            .unwrap();
        let boolean_constructor = BuiltinFunctionBuilder::new::<BooleanConstructorFunction>(
            agent, realm,
        )
        .with_prototype_property(boolean_prototype)
        .build();
        agent
            .get_realm_mut(realm)
            .intrinsics_mut()
            .set("%Boolean%", boolean_constructor);

        // Wire %Boolean.prototype%.constructor.
        let constructor_key = PropertyKey::from_str(agent, "constructor");
        let Object::Object(boolean_prototype) = boolean_prototype else {
            unreachable!()
        };
        agent[boolean_prototype].storage.set(
            constructor_key,
            crate::ecmascript::types::language::object::property_storage::PropertyData::Data {
                value: boolean_constructor.into_value(),
                writable: true,
                enumerable: false,
                configurable: true,
            },
        );
    }
}
