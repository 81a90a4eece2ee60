//! ## [10.1 Ordinary Object Internal Methods and Internal Slots](https://tc39.es/ecma262/#sec-ordinary-object-internal-methods-and-internal-slots)
//!
//! The shared base algorithms behind the eleven internal methods. Exotic
//! objects call into these for the parts of their behaviour that stay
//! ordinary.

use crate::{
    ecmascript::{
        abstract_operations::testing_and_comparison::same_value,
        execution::{
            agent::{Agent, ExceptionType, JsResult},
            realm::ProtoIntrinsics,
        },
        types::{
            language::{
                object::{
                    data::ObjectHeapData,
                    internal_methods::InternalMethods,
                    internal_slots::InternalSlots,
                    property_key::PropertyKey,
                    property_storage::PropertyData,
                    IntoObject, Object, OrdinaryObject,
                },
                value::{IntoValue, Value},
            },
            spec::property_descriptor::PropertyDescriptor,
        },
    },
    heap::CreateHeapData,
};

impl InternalMethods for OrdinaryObject {}

/// ### [10.1.2.1 OrdinarySetPrototypeOf ( O, V )](https://tc39.es/ecma262/#sec-ordinarysetprototypeof)
pub(crate) fn ordinary_set_prototype_of(
    agent: &mut Agent,
    object: Object,
    prototype: Option<Object>,
) -> bool {
    // 1. Let current be O.[[Prototype]].
    let current = object.internal_prototype(agent);

    // 2. If SameValue(V, current) is true, return true.
    if prototype == current {
        return true;
    }

    // 3. Let extensible be O.[[Extensible]].
    // 4. If extensible is false, return false.
    if !object.internal_extensible(agent) {
        return false;
    }

    // 5. Let p be V.
    let mut p = prototype;
    // 6. Let done be false.
    // 7. Repeat, while done is false,
    while let Some(p_inner) = p {
        // b. Else if SameValue(p, O) is true, return false.
        if p_inner == object {
            return false;
        }
        // c. Else,
        // i. If p.[[GetPrototypeOf]] is not the ordinary object internal
        //    method defined in 10.1.1, set done to true. Every object kind
        //    in this engine uses the ordinary slot lookup.
        // ii. Else, set p to p.[[Prototype]].
        p = p_inner.internal_prototype(agent);
    }

    // 8. Set O.[[Prototype]] to V.
    object.internal_set_prototype(agent, prototype);

    // 9. Return true.
    true
}

/// ### [10.1.5.1 OrdinaryGetOwnProperty ( O, P )](https://tc39.es/ecma262/#sec-ordinarygetownproperty)
pub(crate) fn ordinary_get_own_property(
    agent: &Agent,
    backing_object: Option<OrdinaryObject>,
    property_key: PropertyKey,
) -> Option<PropertyDescriptor> {
    // 1. If O does not have an own property with key P, return undefined.
    let backing_object = backing_object?;
    // 2.-9. Return a fully populated descriptor of the property's
    //       attributes.
    agent[backing_object]
        .storage
        .get(property_key)
        .map(PropertyData::descriptor)
}

/// ### [10.1.6.1 OrdinaryDefineOwnProperty ( O, P, Desc )](https://tc39.es/ecma262/#sec-ordinarydefineownproperty)
pub(crate) fn ordinary_define_own_property(
    agent: &mut Agent,
    object: Object,
    backing_object: OrdinaryObject,
    property_key: PropertyKey,
    descriptor: PropertyDescriptor,
) -> JsResult<bool> {
    // 1. Let current be ? O.[[GetOwnProperty]](P).
    let current = object.internal_get_own_property(agent, property_key)?;

    // 2. Let extensible be ? IsExtensible(O).
    let extensible = object.internal_is_extensible(agent)?;

    // 3. Return ValidateAndApplyPropertyDescriptor(O, P, extensible, Desc,
    //    current).
    Ok(validate_and_apply_property_descriptor(
        agent,
        Some(backing_object),
        property_key,
        extensible,
        descriptor,
        current,
    ))
}

/// ### [10.1.6.2 IsCompatiblePropertyDescriptor ( Extensible, Desc, Current )](https://tc39.es/ecma262/#sec-iscompatiblepropertydescriptor)
pub(crate) fn is_compatible_property_descriptor(
    agent: &mut Agent,
    extensible: bool,
    descriptor: PropertyDescriptor,
    current: Option<PropertyDescriptor>,
) -> bool {
    // 1. Return ValidateAndApplyPropertyDescriptor(undefined, "",
    //    Extensible, Desc, Current).
    let property_key = PropertyKey::Integer(0);
    validate_and_apply_property_descriptor(
        agent,
        None,
        property_key,
        extensible,
        descriptor,
        current,
    )
}

/// ### [10.1.6.3 ValidateAndApplyPropertyDescriptor ( O, P, extensible, Desc, current )](https://tc39.es/ecma262/#sec-validateandapplypropertydescriptor)
pub(crate) fn validate_and_apply_property_descriptor(
    agent: &mut Agent,
    object: Option<OrdinaryObject>,
    property_key: PropertyKey,
    extensible: bool,
    descriptor: PropertyDescriptor,
    current: Option<PropertyDescriptor>,
) -> bool {
    // 1. Assert: IsPropertyKey(P) is true.

    // 2. If current is undefined, then
    let Some(current) = current else {
        // a. If extensible is false, return false.
        if !extensible {
            return false;
        }

        // b. If O is undefined, return true.
        let Some(object) = object else {
            return true;
        };

        // c. If IsAccessorDescriptor(Desc) is true, then
        let data = if descriptor.is_accessor_descriptor() {
            // i. Create an own accessor property named P of object O whose
            //    [[Get]], [[Set]], [[Enumerable]], and [[Configurable]]
            //    attributes are set to the value of the corresponding field
            //    in Desc if Desc has that field, or to the attribute's
            //    default value otherwise.
            PropertyData::Accessor {
                get: descriptor.get.unwrap_or(None),
                set: descriptor.set.unwrap_or(None),
                enumerable: descriptor.enumerable.unwrap_or(false),
                configurable: descriptor.configurable.unwrap_or(false),
            }
        } else {
            // d. Else,
            // i. Create an own data property named P of object O whose
            //    [[Value]], [[Writable]], [[Enumerable]], and
            //    [[Configurable]] attributes are set to the value of the
            //    corresponding field in Desc if Desc has that field, or to
            //    the attribute's default value otherwise.
            PropertyData::Data {
                value: descriptor.value.unwrap_or(Value::Undefined),
                writable: descriptor.writable.unwrap_or(false),
                enumerable: descriptor.enumerable.unwrap_or(false),
                configurable: descriptor.configurable.unwrap_or(false),
            }
        };
        agent[object].storage.set(property_key, data);

        // e. Return true.
        return true;
    };

    // 3. Assert: current is a fully populated Property Descriptor.
    debug_assert!(current.is_fully_populated());

    // 4. If Desc does not have any fields, return true.
    if !descriptor.has_fields() {
        return true;
    }

    // 5. If current.[[Configurable]] is false, then
    if current.configurable == Some(false) {
        // a. If Desc has a [[Configurable]] field and Desc.[[Configurable]]
        //    is true, return false.
        if descriptor.configurable == Some(true) {
            return false;
        }

        // b. If Desc has an [[Enumerable]] field and
        //    SameValue(Desc.[[Enumerable]], current.[[Enumerable]]) is
        //    false, return false.
        if descriptor.enumerable.is_some() && descriptor.enumerable != current.enumerable {
            return false;
        }

        // c. If IsGenericDescriptor(Desc) is false and
        //    SameValue(IsAccessorDescriptor(Desc),
        //    IsAccessorDescriptor(current)) is false, return false.
        if !descriptor.is_generic_descriptor()
            && descriptor.is_accessor_descriptor() != current.is_accessor_descriptor()
        {
            return false;
        }

        // d. If IsAccessorDescriptor(current) is true, then
        if current.is_accessor_descriptor() {
            // i. If Desc has a [[Get]] field and SameValue(Desc.[[Get]],
            //    current.[[Get]]) is false, return false.
            if let Some(desc_get) = descriptor.get {
                if desc_get != current.get.unwrap_or(None) {
                    return false;
                }
            }

            // ii. If Desc has a [[Set]] field and SameValue(Desc.[[Set]],
            //     current.[[Set]]) is false, return false.
            if let Some(desc_set) = descriptor.set {
                if desc_set != current.set.unwrap_or(None) {
                    return false;
                }
            }
        }
        // e. Else if current.[[Writable]] is false, then
        else if current.writable == Some(false) {
            // i. If Desc has a [[Writable]] field and Desc.[[Writable]] is
            //    true, return false.
            if descriptor.writable == Some(true) {
                return false;
            }

            // ii. If Desc has a [[Value]] field and
            //     SameValue(Desc.[[Value]], current.[[Value]]) is false,
            //     return false.
            if let Some(desc_value) = descriptor.value {
                if !same_value(agent, desc_value, current.value.unwrap()) {
                    return false;
                }
            }
        }
    }

    // 6. If O is not undefined, then
    if let Some(object) = object {
        // a. If IsDataDescriptor(current) is true and
        //    IsAccessorDescriptor(Desc) is true, then
        let data = if current.is_data_descriptor() && descriptor.is_accessor_descriptor() {
            // i. If Desc has a [[Configurable]] field, let configurable be
            //    Desc.[[Configurable]]; else let configurable be
            //    current.[[Configurable]].
            // ii. If Desc has a [[Enumerable]] field, let enumerable be
            //     Desc.[[Enumerable]]; else let enumerable be
            //     current.[[Enumerable]].
            // iii. Replace the property named P of object O with an
            //      accessor property whose [[Configurable]] and
            //      [[Enumerable]] attributes are set to configurable and
            //      enumerable, respectively, and whose [[Get]] and [[Set]]
            //      attributes are set to the value of the corresponding
            //      field in Desc if Desc has that field, or to the
            //      attribute's default value otherwise.
            PropertyData::Accessor {
                get: descriptor.get.unwrap_or(None),
                set: descriptor.set.unwrap_or(None),
                enumerable: descriptor.enumerable.or(current.enumerable).unwrap(),
                configurable: descriptor.configurable.or(current.configurable).unwrap(),
            }
        } else if current.is_accessor_descriptor() && descriptor.is_data_descriptor() {
            // b. Else if IsAccessorDescriptor(current) is true and
            //    IsDataDescriptor(Desc) is true, then
            // iii. Replace the property named P of object O with a data
            //      property whose [[Configurable]] and [[Enumerable]]
            //      attributes are set to configurable and enumerable,
            //      respectively, and whose [[Value]] and [[Writable]]
            //      attributes are set to the value of the corresponding
            //      field in Desc if Desc has that field, or to the
            //      attribute's default value otherwise.
            PropertyData::Data {
                value: descriptor.value.unwrap_or(Value::Undefined),
                writable: descriptor.writable.unwrap_or(false),
                enumerable: descriptor.enumerable.or(current.enumerable).unwrap(),
                configurable: descriptor.configurable.or(current.configurable).unwrap(),
            }
        } else if descriptor.is_accessor_descriptor() || current.is_accessor_descriptor() {
            // c. Else: for each field of Desc, set the corresponding
            //    attribute of the property named P of object O to the value
            //    of the field.
            PropertyData::Accessor {
                get: descriptor.get.or(current.get).unwrap_or(None),
                set: descriptor.set.or(current.set).unwrap_or(None),
                enumerable: descriptor.enumerable.or(current.enumerable).unwrap(),
                configurable: descriptor.configurable.or(current.configurable).unwrap(),
            }
        } else {
            PropertyData::Data {
                value: descriptor.value.or(current.value).unwrap_or(Value::Undefined),
                writable: descriptor.writable.or(current.writable).unwrap_or(false),
                enumerable: descriptor.enumerable.or(current.enumerable).unwrap(),
                configurable: descriptor.configurable.or(current.configurable).unwrap(),
            }
        };
        agent[object].storage.set(property_key, data);
    }

    // 7. Return true.
    true
}

/// ### [10.1.7.1 OrdinaryHasProperty ( O, P )](https://tc39.es/ecma262/#sec-ordinaryhasproperty)
pub(crate) fn ordinary_has_property(
    agent: &mut Agent,
    object: Object,
    property_key: PropertyKey,
) -> JsResult<bool> {
    // 1. Let hasOwn be ? O.[[GetOwnProperty]](P).
    let has_own = object.internal_get_own_property(agent, property_key)?;

    // 2. If hasOwn is not undefined, return true.
    if has_own.is_some() {
        return Ok(true);
    }

    // 3. Let parent be ? O.[[GetPrototypeOf]]().
    let parent = object.internal_get_prototype_of(agent)?;

    // 4. If parent is not null, then
    if let Some(parent) = parent {
        // a. Return ? parent.[[HasProperty]](P).
        return parent.internal_has_property(agent, property_key);
    }

    // 5. Return false.
    Ok(false)
}

/// ### [10.1.8.1 OrdinaryGet ( O, P, Receiver )](https://tc39.es/ecma262/#sec-ordinaryget)
pub(crate) fn ordinary_get(
    agent: &mut Agent,
    object: Object,
    property_key: PropertyKey,
    receiver: Value,
) -> JsResult<Value> {
    // 1. Let desc be ? O.[[GetOwnProperty]](P).
    let Some(descriptor) = object.internal_get_own_property(agent, property_key)? else {
        // 2. If desc is undefined, then
        // a. Let parent be ? O.[[GetPrototypeOf]]().
        let Some(parent) = object.internal_get_prototype_of(agent)? else {
            // b. If parent is null, return undefined.
            return Ok(Value::Undefined);
        };

        // c. Return ? parent.[[Get]](P, Receiver).
        return parent.internal_get(agent, property_key, receiver);
    };

    // 3. If IsDataDescriptor(desc) is true, return desc.[[Value]].
    if let Some(value) = descriptor.value {
        return Ok(value);
    }

    // 4. Assert: IsAccessorDescriptor(desc) is true.
    debug_assert!(descriptor.is_accessor_descriptor());

    // 5. Let getter be desc.[[Get]].
    // 6. If getter is undefined, return undefined.
    let Some(Some(getter)) = descriptor.get else {
        return Ok(Value::Undefined);
    };

    // 7. Return ? Call(getter, Receiver).
    crate::ecmascript::abstract_operations::operations_on_objects::call_function(
        agent, getter, receiver, None,
    )
}

/// ### [10.1.9.1 OrdinarySet ( O, P, V, Receiver )](https://tc39.es/ecma262/#sec-ordinaryset)
pub(crate) fn ordinary_set(
    agent: &mut Agent,
    object: Object,
    property_key: PropertyKey,
    value: Value,
    receiver: Value,
) -> JsResult<bool> {
    // 1. Let ownDesc be ? O.[[GetOwnProperty]](P).
    let own_descriptor = object.internal_get_own_property(agent, property_key)?;

    // 2. Return ? OrdinarySetWithOwnDescriptor(O, P, V, Receiver, ownDesc).
    ordinary_set_with_own_descriptor(agent, object, property_key, value, receiver, own_descriptor)
}

/// ### [10.1.9.2 OrdinarySetWithOwnDescriptor ( O, P, V, Receiver, ownDesc )](https://tc39.es/ecma262/#sec-ordinarysetwithowndescriptor)
pub(crate) fn ordinary_set_with_own_descriptor(
    agent: &mut Agent,
    object: Object,
    property_key: PropertyKey,
    value: Value,
    receiver: Value,
    own_descriptor: Option<PropertyDescriptor>,
) -> JsResult<bool> {
    // 1. If ownDesc is undefined, then
    let own_descriptor = if let Some(own_descriptor) = own_descriptor {
        own_descriptor
    } else {
        // a. Let parent be ? O.[[GetPrototypeOf]]().
        let parent = object.internal_get_prototype_of(agent)?;

        // b. If parent is not null, then
        if let Some(parent) = parent {
            // i. Return ? parent.[[Set]](P, V, Receiver).
            return parent.internal_set(agent, property_key, value, receiver);
        }

        // c. Else: set ownDesc to the PropertyDescriptor { [[Value]]:
        //    undefined, [[Writable]]: true, [[Enumerable]]: true,
        //    [[Configurable]]: true }.
        PropertyDescriptor::new_data_descriptor(Value::Undefined)
    };

    // 2. If IsDataDescriptor(ownDesc) is true, then
    if own_descriptor.is_data_descriptor() {
        // a. If ownDesc.[[Writable]] is false, return false.
        if own_descriptor.writable == Some(false) {
            return Ok(false);
        }

        // b. If Receiver is not an Object, return false.
        let Ok(receiver) = Object::try_from(receiver) else {
            return Ok(false);
        };

        // c. Let existingDescriptor be ? Receiver.[[GetOwnProperty]](P).
        let existing_descriptor = receiver.internal_get_own_property(agent, property_key)?;

        // d. If existingDescriptor is not undefined, then
        if let Some(existing_descriptor) = existing_descriptor {
            // i. If IsAccessorDescriptor(existingDescriptor) is true,
            //    return false.
            if existing_descriptor.is_accessor_descriptor() {
                return Ok(false);
            }

            // ii. If existingDescriptor.[[Writable]] is false, return
            //     false.
            if existing_descriptor.writable == Some(false) {
                return Ok(false);
            }

            // iii. Let valueDesc be the PropertyDescriptor { [[Value]]: V }.
            let value_descriptor = PropertyDescriptor {
                value: Some(value),
                ..Default::default()
            };

            // iv. Return ? Receiver.[[DefineOwnProperty]](P, valueDesc).
            return receiver.internal_define_own_property(agent, property_key, value_descriptor);
        }

        // e. Else: Assert: Receiver does not currently have a property P.
        //    Return ? CreateDataProperty(Receiver, P, V).
        return crate::ecmascript::abstract_operations::operations_on_objects::create_data_property(
            agent,
            receiver,
            property_key,
            value,
        );
    }

    // 3. Assert: IsAccessorDescriptor(ownDesc) is true.
    debug_assert!(own_descriptor.is_accessor_descriptor());

    // 4. Let setter be ownDesc.[[Set]].
    // 5. If setter is undefined, return false.
    let Some(Some(setter)) = own_descriptor.set else {
        return Ok(false);
    };

    // 6. Perform ? Call(setter, Receiver, « V »).
    crate::ecmascript::abstract_operations::operations_on_objects::call_function(
        agent,
        setter,
        receiver,
        Some(&[value]),
    )?;

    // 7. Return true.
    Ok(true)
}

/// ### [10.1.10.1 OrdinaryDelete ( O, P )](https://tc39.es/ecma262/#sec-ordinarydelete)
pub(crate) fn ordinary_delete(
    agent: &mut Agent,
    backing_object: Option<OrdinaryObject>,
    property_key: PropertyKey,
) -> bool {
    // 1. Let desc be ? O.[[GetOwnProperty]](P).
    let Some(backing_object) = backing_object else {
        // 2. If desc is undefined, return true.
        return true;
    };
    let Some(descriptor) = agent[backing_object].storage.get(property_key) else {
        return true;
    };

    // 3. If desc.[[Configurable]] is true, then
    if descriptor.is_configurable() {
        // a. Remove the own property with name P from O.
        agent[backing_object].storage.remove(property_key);
        // b. Return true.
        return true;
    }

    // 4. Return false.
    false
}

/// ### [10.1.11.1 OrdinaryOwnPropertyKeys ( O )](https://tc39.es/ecma262/#sec-ordinaryownpropertykeys)
pub(crate) fn ordinary_own_property_keys(
    agent: &Agent,
    backing_object: Option<OrdinaryObject>,
) -> Vec<PropertyKey> {
    // 1. Let keys be a new empty List.
    let Some(backing_object) = backing_object else {
        return Vec::new();
    };
    // 2. For each own property key P of O such that P is an array index, in
    //    ascending numeric index order: append P.
    // 3. For each own property key P of O such that P is a String and P is
    //    not an array index, in ascending chronological order of property
    //    creation: append P.
    // 4. For each own property key P of O such that P is a Symbol, in
    //    ascending chronological order of property creation: append P.
    // 5. Return keys.
    agent[backing_object].storage.keys()
}

/// ### [10.1.12 OrdinaryObjectCreate ( proto \[ , additionalInternalSlotsList \] )](https://tc39.es/ecma262/#sec-ordinaryobjectcreate)
pub(crate) fn ordinary_object_create(
    agent: &mut Agent,
    proto: Option<Object>,
) -> OrdinaryObject {
    // 1. Let internalSlotsList be « [[Prototype]], [[Extensible]] ».
    // 2. Let O be MakeBasicObject(internalSlotsList).
    // 3. Set O.[[Prototype]] to proto.
    // 4. Return O.
    agent.heap.create(ObjectHeapData::new(proto))
}

/// OrdinaryObjectCreate with the prototype drawn from the current realm's
/// intrinsics.
pub(crate) fn ordinary_object_create_with_intrinsics(
    agent: &mut Agent,
    proto_intrinsics: Option<ProtoIntrinsics>,
) -> OrdinaryObject {
    let prototype = proto_intrinsics.and_then(|intrinsic| {
        agent
            .current_realm()
            .intrinsics()
            .get_intrinsic_default_proto(intrinsic)
    });
    ordinary_object_create(agent, prototype)
}

/// ### [10.1.13 OrdinaryCreateFromConstructor ( constructor, intrinsicDefaultProto \[ , internalSlotsList \] )](https://tc39.es/ecma262/#sec-ordinarycreatefromconstructor)
pub(crate) fn ordinary_create_from_constructor(
    agent: &mut Agent,
    constructor: crate::ecmascript::types::language::function::Function,
    intrinsic_default_proto: ProtoIntrinsics,
) -> JsResult<OrdinaryObject> {
    // 1. Assert: intrinsicDefaultProto is this specification's name of an
    //    intrinsic object.
    // 2. Let proto be ? GetPrototypeFromConstructor(constructor,
    //    intrinsicDefaultProto).
    let proto = get_prototype_from_constructor(agent, constructor, intrinsic_default_proto)?;
    // 3. Return OrdinaryObjectCreate(proto, internalSlotsList).
    Ok(ordinary_object_create(agent, proto))
}

/// ### [10.1.14 GetPrototypeFromConstructor ( constructor, intrinsicDefaultProto )](https://tc39.es/ecma262/#sec-getprototypefromconstructor)
pub(crate) fn get_prototype_from_constructor(
    agent: &mut Agent,
    constructor: crate::ecmascript::types::language::function::Function,
    intrinsic_default_proto: ProtoIntrinsics,
) -> JsResult<Option<Object>> {
    // 1. Assert: intrinsicDefaultProto is this specification's name of an
    //    intrinsic object. The corresponding object must be an intrinsic
    //    that is intended to be used as the [[Prototype]] value of an
    //    object.
    // 2. Let proto be ? Get(constructor, "prototype").
    let prototype_key = PropertyKey::from_str(agent, "prototype");
    let proto = crate::ecmascript::abstract_operations::operations_on_objects::get(
        agent,
        constructor.into_object(),
        prototype_key,
    )?;

    // 3. If proto is not an Object, then
    if let Ok(proto) = Object::try_from(proto) {
        Ok(Some(proto))
    } else {
        // a. Let realm be ? GetFunctionRealm(constructor).
        let realm =
            crate::ecmascript::abstract_operations::operations_on_objects::get_function_realm(
                agent,
                constructor,
            );
        // b. Set proto to realm's intrinsic object named
        //    intrinsicDefaultProto.
        Ok(agent
            .get_realm(realm)
            .intrinsics()
            .get_intrinsic_default_proto(intrinsic_default_proto))
    }
}

/// A data-property define helper shared by object and array literal
/// evaluation: no user code runs when the target is a freshly created
/// literal object.
pub(crate) fn ordinary_object_insert_value(
    agent: &mut Agent,
    object: OrdinaryObject,
    property_key: PropertyKey,
    value: Value,
) {
    agent[object].storage.set(
        property_key,
        PropertyData::Data {
            value,
            writable: true,
            enumerable: true,
            configurable: true,
        },
    );
}

/// Throw helper used where exotic objects reject a define on a non-object
/// receiver path.
#[allow(dead_code)]
pub(crate) fn throw_no_proto_error(agent: &mut Agent) -> crate::ecmascript::execution::agent::JsError {
    agent.throw_exception_with_static_message(
        ExceptionType::TypeError,
        "Object prototype may only be an Object or null",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_descriptor(value: Value, writable: bool, configurable: bool) -> PropertyDescriptor {
        PropertyDescriptor {
            value: Some(value),
            writable: Some(writable),
            enumerable: Some(true),
            configurable: Some(configurable),
            ..Default::default()
        }
    }

    #[test]
    fn non_configurable_rejects_reconfiguration() {
        let mut agent = Agent::new(
            Default::default(),
            &crate::ecmascript::execution::DefaultHostHooks,
        );
        let current = Some(data_descriptor(Value::Null, false, false));
        // Flipping configurable to true must be rejected.
        let attempt = PropertyDescriptor {
            configurable: Some(true),
            ..Default::default()
        };
        assert!(!is_compatible_property_descriptor(
            &mut agent, true, attempt, current
        ));
        // Changing the value of a non-writable property must be rejected.
        let attempt = PropertyDescriptor {
            value: Some(Value::Undefined),
            ..Default::default()
        };
        assert!(!is_compatible_property_descriptor(
            &mut agent, true, attempt, current
        ));
        // Re-stating the same value is allowed.
        let attempt = PropertyDescriptor {
            value: Some(Value::Null),
            ..Default::default()
        };
        assert!(is_compatible_property_descriptor(
            &mut agent, true, attempt, current
        ));
    }

    #[test]
    fn new_properties_require_extensibility() {
        let mut agent = Agent::new(
            Default::default(),
            &crate::ecmascript::execution::DefaultHostHooks,
        );
        let attempt = data_descriptor(Value::Null, true, true);
        assert!(!is_compatible_property_descriptor(
            &mut agent, false, attempt, None
        ));
        assert!(is_compatible_property_descriptor(
            &mut agent, true, attempt, None
        ));
    }
}
