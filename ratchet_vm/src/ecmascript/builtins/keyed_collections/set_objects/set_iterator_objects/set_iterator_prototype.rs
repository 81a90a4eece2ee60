use crate::{
    ecmascript::{
        abstract_operations::{
            operations_on_iterator_objects::create_iter_result_object,
            operations_on_objects::create_array_from_list,
        },
        builders::ordinary_object_builder::OrdinaryObjectBuilder,
        builtins::{
            builtin_function::{ArgumentsList, Behaviour, Builtin},
            indexed_collections::array_objects::array_iterator_objects::array_iterator::CollectionIteratorKind,
            keyed_collections::set_objects::set_iterator_objects::set_iterator::SetIterator,
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

pub(crate) struct SetIteratorPrototype;

struct SetIteratorPrototypeNext;
impl Builtin for SetIteratorPrototypeNext {
    const NAME: &'static str = "next";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(SetIteratorPrototype::next);
}

impl SetIteratorPrototype {
    /// ### [24.2.6.2.1 %SetIteratorPrototype%.next ( )](https://tc39.es/ecma262/#sec-%setiteratorprototype%.next)
    fn next(agent: &mut Agent, this_value: Value, _arguments: ArgumentsList) -> JsResult<Value> {
        let Ok(iterator) = SetIterator::try_from(this_value) else {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Method called on incompatible receiver",
            ));
        };
        let Some(set) = agent[iterator].set else {
            return Ok(create_iter_result_object(agent, Value::Undefined, true).into_value());
        };
        let kind = agent[iterator].kind;
        // Skip the holes that deletions leave behind.
        loop {
            let index = agent[iterator].next_index;
            if index >= agent[set].set_data.len() {
                agent[iterator].set = None;
                return Ok(
                    create_iter_result_object(agent, Value::Undefined, true).into_value()
                );
            }
            agent[iterator].next_index = index + 1;
            if let Some(value) = agent[set].set_data[index] {
                let result = match kind {
                    CollectionIteratorKind::Value | CollectionIteratorKind::Key => value,
                    CollectionIteratorKind::KeyAndValue => {
                        create_array_from_list(agent, &[value, value]).into_value()
                    }
                };
                return Ok(create_iter_result_object(agent, result, false).into_value());
            }
        }
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent, realm: RealmIdentifier) {
        let iterator_prototype = agent.get_realm(realm).intrinsics().iterator_prototype();
        let tag_key = PropertyKey::from(WellKnownSymbolIndexes::ToStringTag);
        let tag_value = String::from_str(agent, "Set Iterator").into_value();
        let set_iterator_prototype = OrdinaryObjectBuilder::new(agent, realm)
            .with_prototype(iterator_prototype)
            .with_builtin_function_property::<SetIteratorPrototypeNext>()
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
            .set("%SetIteratorPrototype%", set_iterator_prototype);
    }
}
