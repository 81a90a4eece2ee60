use crate::{
    ecmascript::{
        abstract_operations::operations_on_objects::call_function,
        builders::ordinary_object_builder::OrdinaryObjectBuilder,
        builtins::{
            builtin_function::{ArgumentsList, Behaviour, Builtin, BuiltinGetter},
            keyed_collections::set_objects::set_iterator_objects::set_iterator::SetIterator,
            indexed_collections::array_objects::array_iterator_objects::array_iterator::CollectionIteratorKind,
            set::Set,
        },
        execution::{
            agent::{Agent, ExceptionType, JsResult},
            realm::RealmIdentifier,
        },
        types::{
            language::{
                object::{
                    internal_slots::InternalSlots, property_key::PropertyKey,
                    property_storage::PropertyData,
                },
                string::String,
                value::{IntoValue, Value},
            },
        },
    },
    heap::WellKnownSymbolIndexes,
};

pub(crate) struct SetPrototype;

struct SetPrototypeAdd;
impl Builtin for SetPrototypeAdd {
    const NAME: &'static str = "add";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(SetPrototype::add);
}
struct SetPrototypeClear;
impl Builtin for SetPrototypeClear {
    const NAME: &'static str = "clear";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(SetPrototype::clear);
}
struct SetPrototypeDelete;
impl Builtin for SetPrototypeDelete {
    const NAME: &'static str = "delete";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(SetPrototype::delete);
}
struct SetPrototypeEntries;
impl Builtin for SetPrototypeEntries {
    const NAME: &'static str = "entries";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(SetPrototype::entries);
}
struct SetPrototypeForEach;
impl Builtin for SetPrototypeForEach {
    const NAME: &'static str = "forEach";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(SetPrototype::for_each);
}
struct SetPrototypeHas;
impl Builtin for SetPrototypeHas {
    const NAME: &'static str = "has";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(SetPrototype::has);
}
struct SetPrototypeSize;
impl Builtin for SetPrototypeSize {
    const NAME: &'static str = "size";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(SetPrototype::size);
}
impl BuiltinGetter for SetPrototypeSize {}
struct SetPrototypeValues;
impl Builtin for SetPrototypeValues {
    const NAME: &'static str = "values";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(SetPrototype::values);
}

fn this_set_value(agent: &mut Agent, value: Value) -> JsResult<Set> {
    Set::try_from(value).map_err(|_| {
        agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Method called on incompatible receiver",
        )
    })
}

impl SetPrototype {
    /// ### [24.2.4.1 Set.prototype.add ( value )](https://tc39.es/ecma262/#sec-set.prototype.add)
    fn add(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1.-2. Let S be the this value; perform
        //       ? RequireInternalSlot(S, [[SetData]]).
        let s = this_set_value(agent, this_value)?;
        let mut value = arguments.get(0);
        // 4. If value is -0𝔽, set value to +0𝔽.
        if let Value::Number(n) = value {
            if n == 0.0 {
                value = Value::Number(0.0);
            }
        }
        // 3. For each element e of S.[[SetData]]: if SameValueZero(e,
        //    value), return S.
        if s.position(agent, value).is_none() {
            // 5. Append value to S.[[SetData]].
            agent[s].set_data.push(Some(value));
        }
        // 6. Return S.
        Ok(s.into_value())
    }

    /// ### [24.2.4.2 Set.prototype.clear ( )](https://tc39.es/ecma262/#sec-set.prototype.clear)
    fn clear(agent: &mut Agent, this_value: Value, _arguments: ArgumentsList) -> JsResult<Value> {
        let s = this_set_value(agent, this_value)?;
        // 3. For each element e of S.[[SetData]], replace it with EMPTY:
        //    live iterators keep their position.
        for entry in agent[s].set_data.iter_mut() {
            *entry = None;
        }
        // 4. Return undefined.
        Ok(Value::Undefined)
    }

    /// ### [24.2.4.4 Set.prototype.delete ( value )](https://tc39.es/ecma262/#sec-set.prototype.delete)
    fn delete(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let s = this_set_value(agent, this_value)?;
        let value = arguments.get(0);
        // 3. For each element e: replace the matching element with EMPTY
        //    and return true.
        if let Some(position) = s.position(agent, value) {
            agent[s].set_data[position] = None;
            Ok(true.into())
        } else {
            // 4. Return false.
            Ok(false.into())
        }
    }

    /// ### [24.2.4.5 Set.prototype.entries ( )](https://tc39.es/ecma262/#sec-set.prototype.entries)
    fn entries(agent: &mut Agent, this_value: Value, _arguments: ArgumentsList) -> JsResult<Value> {
        let s = this_set_value(agent, this_value)?;
        // 2. Return ? CreateSetIterator(S, KEY+VALUE).
        Ok(SetIterator::from_set(agent, s, CollectionIteratorKind::KeyAndValue).into_value())
    }

    /// ### [24.2.4.6 Set.prototype.forEach ( callback \[ , thisArg \] )](https://tc39.es/ecma262/#sec-set.prototype.foreach)
    fn for_each(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let s = this_set_value(agent, this_value)?;
        // 3. If IsCallable(callback) is false, throw a TypeError exception.
        let Some(callback) =
            crate::ecmascript::abstract_operations::testing_and_comparison::is_callable(
                arguments.get(0),
            )
        else {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Callback is not callable",
            ));
        };
        let this_arg = arguments.get(1);
        // 4.-5. Visit the live entries in insertion order; entries added
        //       during iteration are visited.
        let mut index = 0;
        while index < agent[s].set_data.len() {
            if let Some(value) = agent[s].set_data[index] {
                call_function(
                    agent,
                    callback,
                    this_arg,
                    Some(&[value, value, s.into_value()]),
                )?;
            }
            index += 1;
        }
        // 6. Return undefined.
        Ok(Value::Undefined)
    }

    /// ### [24.2.4.7 Set.prototype.has ( value )](https://tc39.es/ecma262/#sec-set.prototype.has)
    fn has(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let s = this_set_value(agent, this_value)?;
        let value = arguments.get(0);
        // 3.-4. SameValueZero membership.
        Ok(s.position(agent, value).is_some().into())
    }

    /// ### [24.2.4.9 get Set.prototype.size](https://tc39.es/ecma262/#sec-get-set.prototype.size)
    fn size(agent: &mut Agent, this_value: Value, _arguments: ArgumentsList) -> JsResult<Value> {
        let s = this_set_value(agent, this_value)?;
        // 3.-4. Count the live entries.
        Ok(Value::Number(s.size(agent) as f64))
    }

    /// ### [24.2.4.10 Set.prototype.values ( )](https://tc39.es/ecma262/#sec-set.prototype.values)
    fn values(agent: &mut Agent, this_value: Value, _arguments: ArgumentsList) -> JsResult<Value> {
        let s = this_set_value(agent, this_value)?;
        // 2. Return ? CreateSetIterator(S, VALUE).
        Ok(SetIterator::from_set(agent, s, CollectionIteratorKind::Value).into_value())
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent, realm: RealmIdentifier) {
        let object_prototype = agent.get_realm(realm).intrinsics().object_prototype();
        let tag_key = PropertyKey::from(WellKnownSymbolIndexes::ToStringTag);
        let tag_value = String::from_str(agent, "Set").into_value();
        let set_prototype = OrdinaryObjectBuilder::new(agent, realm)
            .with_prototype(object_prototype)
            .with_builtin_function_property::<SetPrototypeAdd>()
            .with_builtin_function_property::<SetPrototypeClear>()
            .with_builtin_function_property::<SetPrototypeDelete>()
            .with_builtin_function_property::<SetPrototypeEntries>()
            .with_builtin_function_property::<SetPrototypeForEach>()
            .with_builtin_function_property::<SetPrototypeHas>()
            .with_builtin_function_getter_property::<SetPrototypeSize>()
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
            .set("%Set.prototype%", set_prototype);

        // Set.prototype.keys, Set.prototype.values and
        // %Set.prototype%[%Symbol.iterator%] are the same function object.
        let values_fn = crate::ecmascript::builtins::builtin_function::create_builtin_function(
            agent,
            SetPrototypeValues::BEHAVIOUR,
            crate::ecmascript::builtins::builtin_function::BuiltinFunctionArgs::new(
                0, "values", realm,
            ),
        );
        let values_key = PropertyKey::from_str(agent, "values");
        let keys_key = PropertyKey::from_str(agent, "keys");
        let iterator_key = PropertyKey::from(WellKnownSymbolIndexes::Iterator);
        for key in [values_key, keys_key, iterator_key] {
            agent[set_prototype].storage.set(
                key,
                PropertyData::Data {
                    value: values_fn.into_value(),
                    writable: true,
                    enumerable: false,
                    configurable: true,
                },
            );
        }
    }
}
