//! ### [10.4.2 Array Exotic Objects — abstract operations](https://tc39.es/ecma262/#sec-array-exotic-objects)

use super::{Array, ArrayHeapData};
use crate::{
    ecmascript::{
        abstract_operations::{
            operations_on_objects::{construct, get, get_function_realm},
            testing_and_comparison::{is_array, is_constructor, same_value},
            type_conversion::{to_number, to_uint32},
        },
        builtins::{
            builtin_function::ArgumentsList,
            ordinary::{is_compatible_property_descriptor, ordinary_delete},
        },
        execution::agent::{Agent, ExceptionType, JsResult},
        types::{
            language::{
                number::number_same_value_zero,
                object::{
                    data::ObjectHeapData, internal_slots::InternalSlots, property_key::PropertyKey,
                    IntoObject, Object,
                },
                value::{IntoValue, Value},
            },
            spec::property_descriptor::PropertyDescriptor,
        },
    },
    heap::{CreateHeapData, WellKnownSymbolIndexes},
};

/// ### [10.4.2.2 ArrayCreate ( length \[ , proto \] )](https://tc39.es/ecma262/#sec-arraycreate)
pub(crate) fn array_create(
    agent: &mut Agent,
    length: usize,
    proto: Option<Object>,
) -> JsResult<Array> {
    // 1. If length > 2³² - 1, throw a RangeError exception.
    if length > (u32::MAX as usize) {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::RangeError,
            "invalid array length",
        ));
    }

    // 2. If proto is not present, set proto to %Array.prototype%.
    // An explicit backing object is only needed when the prototype deviates
    // from the default.
    let object_index = match proto {
        Some(proto)
            if agent
                .current_realm()
                .intrinsics()
                .get("%Array.prototype%")
                != Some(proto) =>
        {
            Some(agent.heap.create(ObjectHeapData::new(Some(proto))))
        }
        _ => None,
    };

    // 3. Let A be MakeBasicObject(« [[Prototype]], [[Extensible]] »).
    // 4. Set A.[[Prototype]] to proto.
    // 5. Set A.[[DefineOwnProperty]] as specified in 10.4.2.1.
    // 6. Perform ! OrdinaryDefineOwnProperty(A, "length", the
    //    PropertyDescriptor { [[Value]]: 𝔽(length), [[Writable]]: true,
    //    [[Enumerable]]: false, [[Configurable]]: false }).
    // 7. Return A.
    Ok(agent.heap.create(ArrayHeapData {
        object_index,
        len: length as u32,
        len_writable: true,
    }))
}

/// ### [10.4.2.3 ArraySpeciesCreate ( originalArray, length )](https://tc39.es/ecma262/#sec-arrayspeciescreate)
pub(crate) fn array_species_create(
    agent: &mut Agent,
    original_array: Object,
    length: usize,
) -> JsResult<Object> {
    // 1. Let isArray be ? IsArray(originalArray).
    let original_is_array = is_array(agent, original_array.into_value())?;

    // 2. If isArray is false, return ? ArrayCreate(length).
    if !original_is_array {
        let new_array = array_create(agent, length, None)?;
        return Ok(new_array.into_object());
    }

    // 3. Let C be ? Get(originalArray, "constructor").
    let constructor_key = PropertyKey::from_str(agent, "constructor");
    let mut c = get(agent, original_array, constructor_key)?;

    // 4. If IsConstructor(C) is true, then
    if let Some(c_func) = is_constructor(agent, c) {
        // a. Let thisRealm be the current Realm Record.
        let this_realm = agent.current_realm_id();
        // b. Let realmC be ? GetFunctionRealm(C).
        let realm_c = get_function_realm(agent, c_func);
        // c. If thisRealm and realmC are not the same Realm Record, then
        if this_realm != realm_c {
            // i. If SameValue(C, realmC.[[Intrinsics]].[[%Array%]]) is
            //    true, set C to undefined.
            let realm_c_array = agent
                .get_realm(realm_c)
                .intrinsics()
                .array_constructor()
                .into_value();
            if same_value(agent, c, realm_c_array) {
                c = Value::Undefined;
            }
        }
    }

    // 5. If C is an Object, then
    if let Ok(c_obj) = Object::try_from(c) {
        // a. Set C to ? Get(C, %Symbol.species%).
        c = get(
            agent,
            c_obj,
            PropertyKey::from(WellKnownSymbolIndexes::Species),
        )?;
        // b. If C is null, set C to undefined.
        if c.is_null() {
            c = Value::Undefined;
        }
    }

    // 6. If C is undefined, return ? ArrayCreate(length).
    if c.is_undefined() {
        let new_array = array_create(agent, length, None)?;
        return Ok(new_array.into_object());
    }

    // 7. If IsConstructor(C) is false, throw a TypeError exception.
    let Some(c) = is_constructor(agent, c) else {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Not a constructor",
        ));
    };

    // 8. Return ? Construct(C, « 𝔽(length) »).
    let length_value = Value::Number(length as f64);
    construct(agent, c, Some(ArgumentsList(&[length_value])), None)
}

/// Apply a descriptor to the virtual "length" property, enforcing the
/// ordinary define-own-property validation against its current state.
fn define_virtual_length(agent: &mut Agent, a: Array, descriptor: PropertyDescriptor) -> bool {
    let current = a.length_descriptor(agent);
    if !is_compatible_property_descriptor(agent, false, descriptor, Some(current)) {
        return false;
    }
    if let Some(Value::Number(value)) = descriptor.value {
        agent[a].len = value as u32;
    }
    if let Some(writable) = descriptor.writable {
        // Writable can only transition from true to false.
        if !writable {
            agent[a].len_writable = false;
        }
    }
    true
}

/// ### [10.4.2.4 ArraySetLength ( A, Desc )](https://tc39.es/ecma262/#sec-arraysetlength)
pub(crate) fn array_set_length(
    agent: &mut Agent,
    a: Array,
    descriptor: PropertyDescriptor,
) -> JsResult<bool> {
    // 1. If Desc does not have a [[Value]] field, then
    let Some(descriptor_value) = descriptor.value else {
        // a. Return ! OrdinaryDefineOwnProperty(A, "length", Desc).
        return Ok(define_virtual_length(agent, a, descriptor));
    };

    // 2. Let newLenDesc be a copy of Desc.
    let mut new_length_descriptor = descriptor;

    // 3. Let newLen be ? ToUint32(Desc.[[Value]]).
    let new_len = to_uint32(agent, descriptor_value)?;

    // 4. Let numberLen be ? ToNumber(Desc.[[Value]]).
    // Note: the double coercion is specification-mandated; a valueOf on the
    // descriptor value observably runs twice.
    let number_len = to_number(agent, descriptor_value)?;

    // 5. If SameValueZero(newLen, numberLen) is false, throw a RangeError
    //    exception.
    if !number_same_value_zero(new_len as f64, number_len) {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::RangeError,
            "invalid array length",
        ));
    }

    // 6. Set newLenDesc.[[Value]] to 𝔽(newLen).
    new_length_descriptor.value = Some(Value::Number(new_len as f64));

    // 7. Let oldLenDesc be OrdinaryGetOwnProperty(A, "length").
    // 8. Assert: IsDataDescriptor(oldLenDesc) is true.
    // 9. Let oldLen be oldLenDesc.[[Value]].
    let old_len = agent[a].len;
    let old_len_writable = agent[a].len_writable;

    // 10. If newLen ≥ oldLen, then
    if new_len >= old_len {
        // a. Return ! OrdinaryDefineOwnProperty(A, "length", newLenDesc).
        return Ok(define_virtual_length(agent, a, new_length_descriptor));
    }

    // 11. If oldLenDesc.[[Writable]] is false, return false.
    if !old_len_writable {
        return Ok(false);
    }

    // 12. If newLenDesc does not have a [[Writable]] field or
    //     newLenDesc.[[Writable]] is true, let newWritable be true.
    let new_writable = if new_length_descriptor.writable != Some(false) {
        true
    } else {
        // 13. Else,
        // a. NOTE: Setting the [[Writable]] attribute to false is deferred
        //    in case any elements cannot be deleted.
        // b. Let newWritable be false.
        // c. Set newLenDesc.[[Writable]] to true.
        new_length_descriptor.writable = Some(true);
        false
    };

    // 14. Let succeeded be ! OrdinaryDefineOwnProperty(A, "length",
    //     newLenDesc).
    // 15. If succeeded is false, return false.
    if !define_virtual_length(agent, a, new_length_descriptor) {
        return Ok(false);
    }

    // 16. For each own property key P of A such that P is an array index
    //     and ! ToUint32(P) ≥ newLen, in descending numeric index order, do
    let keys_to_delete = match a.get_backing_object(agent) {
        Some(backing_object) => agent[backing_object].storage.array_index_keys_from(new_len),
        None => Vec::new(),
    };
    for index in keys_to_delete {
        // a. Let deleteSucceeded be ! A.[[Delete]](P).
        let delete_succeeded = ordinary_delete(
            agent,
            a.get_backing_object(agent),
            PropertyKey::Integer(index),
        );
        // b. If deleteSucceeded is false, then
        if !delete_succeeded {
            // i. Set newLenDesc.[[Value]] to 𝔽(! ToUint32(P) + 1𝔽).
            agent[a].len = index + 1;
            // ii. If newWritable is false, set newLenDesc.[[Writable]] to
            //     false.
            if !new_writable {
                agent[a].len_writable = false;
            }
            // iii. Perform ! OrdinaryDefineOwnProperty(A, "length",
            //      newLenDesc).
            // iv. Return false.
            return Ok(false);
        }
    }

    // 17. If newWritable is false, then
    if !new_writable {
        // a. Set succeeded to ! OrdinaryDefineOwnProperty(A, "length",
        //    PropertyDescriptor { [[Writable]]: false }).
        // b. Assert: succeeded is true.
        agent[a].len_writable = false;
    }

    // 18. Return true.
    Ok(true)
}
