use crate::{
    ecmascript::{
        abstract_operations::{
            operations_on_iterator_objects::create_iter_result_object,
            operations_on_objects::{create_array_from_list, get, length_of_array_like},
        },
        builders::ordinary_object_builder::OrdinaryObjectBuilder,
        builtins::{
            builtin_function::{ArgumentsList, Behaviour, Builtin},
            indexed_collections::array_objects::array_iterator_objects::array_iterator::{
                ArrayIterator, CollectionIteratorKind,
            },
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

pub(crate) struct ArrayIteratorPrototype;

struct ArrayIteratorPrototypeNext;
impl Builtin for ArrayIteratorPrototypeNext {
    const NAME: &'static str = "next";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayIteratorPrototype::next);
}

impl ArrayIteratorPrototype {
    /// ### [23.1.5.2.1 %ArrayIteratorPrototype%.next ( )](https://tc39.es/ecma262/#sec-%arrayiteratorprototype%.next)
    fn next(agent: &mut Agent, this_value: Value, _arguments: ArgumentsList) -> JsResult<Value> {
        let Ok(iterator) = ArrayIterator::try_from(this_value) else {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Method called on incompatible receiver",
            ));
        };
        // The iterator has completed.
        let Some(array) = agent[iterator].array else {
            return Ok(create_iter_result_object(agent, Value::Undefined, true).into_value());
        };
        let index = agent[iterator].next_index;
        let kind = agent[iterator].kind;
        let len = length_of_array_like(agent, array)?;
        if index >= len {
            agent[iterator].array = None;
            return Ok(create_iter_result_object(agent, Value::Undefined, true).into_value());
        }
        agent[iterator].next_index = index + 1;
        let result = match kind {
            CollectionIteratorKind::Key => Value::Number(index as f64),
            CollectionIteratorKind::Value => {
                get(agent, array, PropertyKey::Integer(index as u32))?
            }
            CollectionIteratorKind::KeyAndValue => {
                let value = get(agent, array, PropertyKey::Integer(index as u32))?;
                create_array_from_list(agent, &[Value::Number(index as f64), value]).into_value()
            }
        };
        Ok(create_iter_result_object(agent, result, false).into_value())
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent, realm: RealmIdentifier) {
        let iterator_prototype = agent.get_realm(realm).intrinsics().iterator_prototype();
        let tag_key = PropertyKey::from(WellKnownSymbolIndexes::ToStringTag);
        let tag_value = String::from_str(agent, "Array Iterator").into_value();
        let array_iterator_prototype = OrdinaryObjectBuilder::new(agent, realm)
            .with_prototype(iterator_prototype)
            .with_builtin_function_property::<ArrayIteratorPrototypeNext>()
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
            .set("%ArrayIteratorPrototype%", array_iterator_prototype);
    }
}
