use crate::{
    ecmascript::{
        abstract_operations::{
            operations_on_iterator_objects::{
                get_iterator, iterator_close_with_error, iterator_step_value,
            },
            operations_on_objects::{call_function, get},
            testing_and_comparison::is_callable,
        },
        builders::builtin_function_builder::BuiltinFunctionBuilder,
        builtins::{
            builtin_function::{ArgumentsList, Behaviour, Builtin, BuiltinGetter},
            ordinary::get_prototype_from_constructor,
            set::{Set, SetHeapData},
        },
        execution::{
            agent::{Agent, ExceptionType, JsResult},
            realm::{ProtoIntrinsics, RealmIdentifier},
        },
        types::{
            language::{
                function::{Function, IntoFunction},
                object::{
                    data::ObjectHeapData, internal_slots::InternalSlots,
                    property_key::PropertyKey, IntoObject, Object,
                },
                value::{IntoValue, Value},
            },
        },
    },
    heap::{CreateHeapData, WellKnownSymbolIndexes},
};

pub(crate) struct SetConstructor;

struct SetConstructorFunction;
impl Builtin for SetConstructorFunction {
    const NAME: &'static str = "Set";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Constructor(SetConstructor::constructor);
}
struct SetSpecies;
impl Builtin for SetSpecies {
    const NAME: &'static str = "[Symbol.species]";
    const KEY: Option<WellKnownSymbolIndexes> = Some(WellKnownSymbolIndexes::Species);
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(SetConstructor::species);
}
impl BuiltinGetter for SetSpecies {}

impl SetConstructor {
    /// ### [24.2.2.1 Set ( \[ iterable \] )](https://tc39.es/ecma262/#sec-set-iterable)
    fn constructor(
        agent: &mut Agent,
        _this_value: Value,
        arguments: ArgumentsList,
        new_target: Option<Object>,
    ) -> JsResult<Value> {
        // 1. If NewTarget is undefined, throw a TypeError exception.
        let Some(new_target) = new_target else {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Constructor Set requires 'new'",
            ));
        };
        // 2. Let set be ? OrdinaryCreateFromConstructor(NewTarget,
        //    "%Set.prototype%", « [[SetData]] »).
        let new_target = Function::try_from(new_target.into_value()).unwrap();
        let prototype = get_prototype_from_constructor(agent, new_target, ProtoIntrinsics::Set)?;
        let backing_object = agent.heap.create(ObjectHeapData::new(prototype));
        // 3. Set set.[[SetData]] to a new empty List.
        let set: Set = agent.heap.create(SetHeapData::default());
        agent[set].object_index = Some(backing_object);

        // 4. If iterable is either undefined or null, return set.
        let iterable = arguments.get(0);
        if iterable.is_nullish() {
            return Ok(set.into_value());
        }
        // 5. Let adder be ? Get(set, "add").
        let add_key = PropertyKey::from_str(agent, "add");
        let adder = get(agent, set, add_key)?;
        // 6. If IsCallable(adder) is false, throw a TypeError exception.
        let Some(adder) = is_callable(adder) else {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "'add' of Set is not callable",
            ));
        };
        // 7. Let iteratorRecord be ? GetIterator(iterable, SYNC).
        let mut iterator = get_iterator(agent, iterable)?;
        // 8. Repeat,
        loop {
            // a. Let next be ? IteratorStepValue(iteratorRecord).
            let next = iterator_step_value(agent, &mut iterator)?;
            // b. If next is DONE, return set.
            let Some(next) = next else {
                return Ok(set.into_value());
            };
            // c. Let status be Completion(Call(adder, set, « next »)).
            let status = call_function(agent, adder, set.into_value(), Some(&[next]));
            // d. IfAbruptCloseIterator(status, iteratorRecord).
            if let Err(err) = status {
                return Err(iterator_close_with_error(agent, iterator.iterator, err));
            }
        }
    }

    /// ### [24.2.3.2 get Set \[ %Symbol.species% \]](https://tc39.es/ecma262/#sec-get-set-%symbol.species%)
    fn species(
        _agent: &mut Agent,
        this_value: Value,
        _arguments: ArgumentsList,
    ) -> JsResult<Value> {
        // 1. Return the this value.
        Ok(this_value)
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent, realm: RealmIdentifier) {
        let set_prototype = agent
            .get_realm(realm)
            .intrinsics()
            .get("%Set.prototype%")
            .unwrap();
        let set_constructor = BuiltinFunctionBuilder::new::<SetConstructorFunction>(agent, realm)
            .with_prototype_property(set_prototype)
            .build();
        agent
            .get_realm_mut(realm)
            .intrinsics_mut()
            .set("%Set%", set_constructor);

        // The [Symbol.species] accessor.
        let species_getter =
            crate::ecmascript::builtins::builtin_function::create_builtin_function(
                agent,
                SetSpecies::BEHAVIOUR,
                crate::ecmascript::builtins::builtin_function::BuiltinFunctionArgs::new(
                    0,
                    SetSpecies::NAME,
                    realm,
                ),
            );
        let species_key = PropertyKey::from(WellKnownSymbolIndexes::Species);
        let backing_object = set_constructor.get_or_create_backing_object(agent);
        agent[backing_object].storage.set(
            species_key,
            crate::ecmascript::types::language::object::property_storage::PropertyData::Accessor {
                get: Some(species_getter.into_function()),
                set: None,
                enumerable: false,
                configurable: true,
            },
        );

        // Wire %Set.prototype%.constructor.
        let constructor_key = PropertyKey::from_str(agent, "constructor");
        let Object::Object(set_prototype) = set_prototype else {
            unreachable!()
        };
        agent[set_prototype].storage.set(
            constructor_key,
            crate::ecmascript::types::language::object::property_storage::PropertyData::Data {
                value: set_constructor.into_value(),
                writable: true,
                enumerable: false,
                configurable: true,
            },
        );
    }
}
