use crate::{
    ecmascript::{
        abstract_operations::{
            operations_on_iterator_objects::{get_iterator_from_method, iterator_step_value},
            operations_on_objects::{
                call_function, create_data_property_or_throw, get_method, length_of_array_like,
                set,
            },
            testing_and_comparison::{is_array, is_callable},
            type_conversion::to_uint32_number,
        },
        builders::builtin_function_builder::BuiltinFunctionBuilder,
        builtins::{
            array::abstract_operations::array_create,
            builtin_function::{ArgumentsList, Behaviour, Builtin, BuiltinGetter},
            ordinary::get_prototype_from_constructor,
        },
        execution::{
            agent::{Agent, ExceptionType, JsResult},
            realm::{ProtoIntrinsics, RealmIdentifier},
        },
        types::{
            language::{
                function::{Function, IntoFunction},
                object::{
                    internal_slots::InternalSlots, property_key::PropertyKey, IntoObject, Object,
                },
                value::{IntoValue, Value},
            },
        },
    },
    heap::WellKnownSymbolIndexes,
};

pub(crate) struct ArrayConstructor;

struct ArrayConstructorFunction;
impl Builtin for ArrayConstructorFunction {
    const NAME: &'static str = "Array";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Constructor(ArrayConstructor::constructor);
}
struct ArrayFrom;
impl Builtin for ArrayFrom {
    const NAME: &'static str = "from";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayConstructor::from);
}
struct ArrayIsArray;
impl Builtin for ArrayIsArray {
    const NAME: &'static str = "isArray";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayConstructor::is_array);
}
struct ArrayOf;
impl Builtin for ArrayOf {
    const NAME: &'static str = "of";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayConstructor::of);
}
struct ArraySpecies;
impl Builtin for ArraySpecies {
    const NAME: &'static str = "[Symbol.species]";
    const KEY: Option<WellKnownSymbolIndexes> = Some(WellKnownSymbolIndexes::Species);
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayConstructor::species);
}
impl BuiltinGetter for ArraySpecies {}

impl ArrayConstructor {
    /// ### [23.1.1.1 Array ( ...values )](https://tc39.es/ecma262/#sec-array)
    fn constructor(
        agent: &mut Agent,
        _this_value: Value,
        arguments: ArgumentsList,
        new_target: Option<Object>,
    ) -> JsResult<Value> {
        // 1. If NewTarget is undefined, let newTarget be the active
        //    function object; else let newTarget be NewTarget.
        let new_target = new_target
            .unwrap_or_else(|| agent.active_function_object().into_object());
        let new_target = Function::try_from(new_target.into_value()).unwrap();
        // 2. Let proto be ? GetPrototypeFromConstructor(newTarget,
        //    "%Array.prototype%").
        let proto = get_prototype_from_constructor(agent, new_target, ProtoIntrinsics::Array)?;
        // 3. Let numberOfArgs be the number of elements in values.
        match arguments.len() {
            // 4. If numberOfArgs = 0: return ! ArrayCreate(0, proto).
            0 => Ok(array_create(agent, 0, proto)?.into_value()),
            1 => {
                let len = arguments.get(0);
                // 5.b. Let array be ! ArrayCreate(0, proto).
                // 5.c. If len is not a Number: perform
                //      ! CreateDataPropertyOrThrow(array, "0", len); let
                //      intLen be 1.
                if let Value::Number(len) = len {
                    // 5.d. Else: let intLen be ! ToUint32(len); if
                    //      SameValueZero(intLen, len) is false, throw a
                    //      RangeError exception.
                    let int_len = to_uint32_number(len);
                    if int_len as f64 != len {
                        return Err(agent.throw_exception_with_static_message(
                            ExceptionType::RangeError,
                            "invalid array length",
                        ));
                    }
                    Ok(array_create(agent, int_len as usize, proto)?.into_value())
                } else {
                    let array = array_create(agent, 0, proto)?;
                    create_data_property_or_throw(agent, array, PropertyKey::Integer(0), len)?;
                    Ok(array.into_value())
                }
            }
            // 6. Else: fill the array from values.
            count => {
                let array = array_create(agent, count, proto)?;
                for (index, value) in arguments.iter().enumerate() {
                    create_data_property_or_throw(
                        agent,
                        array,
                        PropertyKey::Integer(index as u32),
                        *value,
                    )?;
                }
                Ok(array.into_value())
            }
        }
    }

    /// ### [23.1.2.1 Array.from ( items \[ , mapper \[ , thisArg \] \] )](https://tc39.es/ecma262/#sec-array.from)
    fn from(agent: &mut Agent, _this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let items = arguments.get(0);
        let mapper = arguments.get(1);
        let this_arg = arguments.get(2);
        // 2.-3. If mapper is undefined, mapping is false; else it must be
        //       callable.
        let map_function = if mapper.is_undefined() {
            None
        } else {
            let Some(map_function) = is_callable(mapper) else {
                return Err(agent.throw_exception_with_static_message(
                    ExceptionType::TypeError,
                    "Array.from mapper is not a function",
                ));
            };
            Some(map_function)
        };
        // 4. Let usingIterator be ? GetMethod(items, %Symbol.iterator%).
        let using_iterator = get_method(
            agent,
            items,
            PropertyKey::from(WellKnownSymbolIndexes::Iterator),
        )?;
        let array = array_create(agent, 0, None)?;
        if let Some(using_iterator) = using_iterator {
            // 5. Iterate items, mapping each value.
            let mut iterator = get_iterator_from_method(agent, items, using_iterator)?;
            let mut index: u32 = 0;
            while let Some(value) = iterator_step_value(agent, &mut iterator)? {
                let value = match map_function {
                    Some(map_function) => call_function(
                        agent,
                        map_function,
                        this_arg,
                        Some(&[value, Value::Number(index as f64)]),
                    )?,
                    None => value,
                };
                create_data_property_or_throw(
                    agent,
                    array,
                    PropertyKey::Integer(index),
                    value,
                )?;
                index += 1;
            }
            let length_key = PropertyKey::from_str(agent, "length");
            set(agent, array, length_key, Value::Number(index as f64), true)?;
            return Ok(array.into_value());
        }
        // 7.-12. items is array-like.
        let array_like =
            crate::ecmascript::abstract_operations::type_conversion::to_object(agent, items)?;
        let len = length_of_array_like(agent, array_like)?;
        for index in 0..len {
            let value = crate::ecmascript::abstract_operations::operations_on_objects::get(
                agent,
                array_like,
                PropertyKey::Integer(index as u32),
            )?;
            let value = match map_function {
                Some(map_function) => call_function(
                    agent,
                    map_function,
                    this_arg,
                    Some(&[value, Value::Number(index as f64)]),
                )?,
                None => value,
            };
            create_data_property_or_throw(
                agent,
                array,
                PropertyKey::Integer(index as u32),
                value,
            )?;
        }
        let length_key = PropertyKey::from_str(agent, "length");
        set(agent, array, length_key, Value::Number(len as f64), true)?;
        Ok(array.into_value())
    }

    /// ### [23.1.2.2 Array.isArray ( arg )](https://tc39.es/ecma262/#sec-array.isarray)
    fn is_array(
        agent: &mut Agent,
        _this_value: Value,
        arguments: ArgumentsList,
    ) -> JsResult<Value> {
        // 1. Return ? IsArray(arg).
        Ok(is_array(agent, arguments.get(0))?.into())
    }

    /// ### [23.1.2.3 Array.of ( ...items )](https://tc39.es/ecma262/#sec-array.of)
    fn of(agent: &mut Agent, _this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1.-5. Create an array of the passed values.
        let array = array_create(agent, arguments.len(), None)?;
        for (index, value) in arguments.iter().enumerate() {
            create_data_property_or_throw(
                agent,
                array,
                PropertyKey::Integer(index as u32),
                *value,
            )?;
        }
        // 6.-8. Return A.
        Ok(array.into_value())
    }

    /// ### [23.1.2.5 get Array \[ %Symbol.species% \]](https://tc39.es/ecma262/#sec-get-array-%symbol.species%)
    fn species(
        _agent: &mut Agent,
        this_value: Value,
        _arguments: ArgumentsList,
    ) -> JsResult<Value> {
        // 1. Return the this value.
        Ok(this_value)
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent, realm: RealmIdentifier) {
        let array_prototype = agent.get_realm(realm).intrinsics().array_prototype();
        let array_constructor = BuiltinFunctionBuilder::new::<ArrayConstructorFunction>(
            agent, realm,
        )
        .with_prototype_property(array_prototype)
        .with_builtin_function_property::<ArrayFrom>()
        .with_builtin_function_property::<ArrayIsArray>()
        .with_builtin_function_property::<ArrayOf>()
        .build();
        agent
            .get_realm_mut(realm)
            .intrinsics_mut()
            .set("%Array%", array_constructor);

        // The [Symbol.species] accessor.
        let species_getter = crate::ecmascript::builtins::builtin_function::create_builtin_function(
            agent,
            ArraySpecies::BEHAVIOUR,
            crate::ecmascript::builtins::builtin_function::BuiltinFunctionArgs::new(
                0,
                ArraySpecies::NAME,
                realm,
            ),
        );
        let species_key = PropertyKey::from(WellKnownSymbolIndexes::Species);
        let backing_object = array_constructor.get_or_create_backing_object(agent);
        agent[backing_object].storage.set(
            species_key,
            crate::ecmascript::types::language::object::property_storage::PropertyData::Accessor {
                get: Some(species_getter.into_function()),
                set: None,
                enumerable: false,
                configurable: true,
            },
        );

        // Wire %Array.prototype%.constructor.
        let constructor_key = PropertyKey::from_str(agent, "constructor");
        let Object::Array(array_prototype) = array_prototype else {
            unreachable!("%Array.prototype% is an Array exotic object")
        };
        let backing_object = array_prototype.get_or_create_backing_object(agent);
        agent[backing_object].storage.set(
            constructor_key,
            crate::ecmascript::types::language::object::property_storage::PropertyData::Data {
                value: array_constructor.into_value(),
                writable: true,
                enumerable: false,
                configurable: true,
            },
        );
    }
}
