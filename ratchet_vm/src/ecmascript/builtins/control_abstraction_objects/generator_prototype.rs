use crate::{
    ecmascript::{
        builders::ordinary_object_builder::OrdinaryObjectBuilder,
        builtins::{
            builtin_function::{ArgumentsList, Behaviour, Builtin},
            generator_objects::{Generator, GeneratorAbruptKind},
        },
        execution::{
            agent::{Agent, ExceptionType, JsResult},
            realm::RealmIdentifier,
        },
        types::{
            language::{
                object::property_key::PropertyKey,
                string::String,
                value::{IntoValue, Value},
            },
        },
    },
    heap::WellKnownSymbolIndexes,
};

pub(crate) struct GeneratorPrototype;

struct GeneratorPrototypeNext;
impl Builtin for GeneratorPrototypeNext {
    const NAME: &'static str = "next";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(GeneratorPrototype::next);
}
struct GeneratorPrototypeReturn;
impl Builtin for GeneratorPrototypeReturn {
    const NAME: &'static str = "return";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(GeneratorPrototype::r#return);
}
struct GeneratorPrototypeThrow;
impl Builtin for GeneratorPrototypeThrow {
    const NAME: &'static str = "throw";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(GeneratorPrototype::throw);
}

/// ### [27.5.3.2 GeneratorValidate ( generator, generatorBrand )](https://tc39.es/ecma262/#sec-generatorvalidate)
fn generator_validate(agent: &mut Agent, value: Value) -> JsResult<Generator> {
    Generator::try_from(value).map_err(|_| {
        agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Method called on incompatible receiver",
        )
    })
}

impl GeneratorPrototype {
    /// ### [27.5.1.2 Generator.prototype.next ( value )](https://tc39.es/ecma262/#sec-generator.prototype.next)
    fn next(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1. Return ? GeneratorResume(this value, value, EMPTY).
        let generator = generator_validate(agent, this_value)?;
        generator.resume(agent, arguments.get(0))
    }

    /// ### [27.5.1.3 Generator.prototype.return ( value )](https://tc39.es/ecma262/#sec-generator.prototype.return)
    fn r#return(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1.-2. Let C be Completion Record { [[Type]]: RETURN }; return
        //       ? GeneratorResumeAbrupt(g, C, EMPTY).
        let generator = generator_validate(agent, this_value)?;
        generator.resume_abrupt(agent, GeneratorAbruptKind::Return, arguments.get(0))
    }

    /// ### [27.5.1.4 Generator.prototype.throw ( exception )](https://tc39.es/ecma262/#sec-generator.prototype.throw)
    fn throw(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1.-2. Let C be ThrowCompletion(exception); return
        //       ? GeneratorResumeAbrupt(g, C, EMPTY).
        let generator = generator_validate(agent, this_value)?;
        generator.resume_abrupt(agent, GeneratorAbruptKind::Throw, arguments.get(0))
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent, realm: RealmIdentifier) {
        let iterator_prototype = agent.get_realm(realm).intrinsics().iterator_prototype();
        let tag_key = PropertyKey::from(WellKnownSymbolIndexes::ToStringTag);
        let tag_value = String::from_str(agent, "Generator").into_value();
        let generator_prototype = OrdinaryObjectBuilder::new(agent, realm)
            .with_prototype(iterator_prototype)
            .with_builtin_function_property::<GeneratorPrototypeNext>()
            .with_builtin_function_property::<GeneratorPrototypeReturn>()
            .with_builtin_function_property::<GeneratorPrototypeThrow>()
            .with_property(|property| {
                property
                    .with_key(tag_key)
                    .with_value(tag_value)
                    .with_writable(false)
                    .with_enumerable(false)
                    .with_configurable(true)
                    .build()
            })
            .build();
        agent
            .get_realm_mut(realm)
            .intrinsics_mut()
            .set("%GeneratorPrototype%", generator_prototype);

        // %GeneratorFunction.prototype%: the prototype of every generator
        // function object.
        let function_prototype = agent.get_realm(realm).intrinsics().function_prototype();
        let tag_value = String::from_str(agent, "GeneratorFunction").into_value();
        let prototype_key = PropertyKey::from_str(agent, "prototype");
        let generator_function_prototype = OrdinaryObjectBuilder::new(agent, realm)
            .with_prototype(function_prototype)
            .with_property(|property| {
                property
                    .with_key(prototype_key)
                    .with_value(generator_prototype.into_value())
                    .with_writable(false)
                    .with_enumerable(false)
                    .with_configurable(true)
                    .build()
            })
            .with_property(|property| {
                property
                    .with_key(tag_key)
                    .with_value(tag_value)
                    .with_writable(false)
                    .with_enumerable(false)
                    .with_configurable(true)
                    .build()
            })
            .build();
        agent
            .get_realm_mut(realm)
            .intrinsics_mut()
            .set("%GeneratorFunction.prototype%", generator_function_prototype);

        // %GeneratorPrototype%.constructor → %GeneratorFunction.prototype%.
        let constructor_key = PropertyKey::from_str(agent, "constructor");
        agent[generator_prototype].storage.set(
            constructor_key,
            crate::ecmascript::types::language::object::property_storage::PropertyData::Data {
                value: generator_function_prototype.into_value(),
                writable: false,
                enumerable: false,
                configurable: true,
            },
        );
    }
}
