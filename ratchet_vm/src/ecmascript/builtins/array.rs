pub(crate) mod abstract_operations;

use self::abstract_operations::array_set_length;
use crate::{
    ecmascript::{
        builtins::ordinary::{
            ordinary_define_own_property, ordinary_delete, ordinary_get_own_property,
            ordinary_own_property_keys,
        },
        execution::{
            agent::{Agent, JsResult},
            realm::ProtoIntrinsics,
        },
        types::{
            language::{
                object::{
                    internal_methods::InternalMethods, internal_slots::InternalSlots,
                    property_key::PropertyKey, IntoObject, Object, OrdinaryObject,
                },
                value::{IntoValue, Value},
            },
            spec::property_descriptor::PropertyDescriptor,
        },
    },
    heap::{impl_index_access, indexes::ArrayIndex},
};

/// ### [10.4.2 Array Exotic Objects](https://tc39.es/ecma262/#sec-array-exotic-objects)
///
/// An Array is an exotic object that gives special treatment to array index
/// property keys. Its `length` property is a virtual, sealable slot; every
/// own array-index key is below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Array(pub(crate) ArrayIndex);

#[derive(Debug, Clone, Copy)]
pub struct ArrayHeapData {
    pub(crate) object_index: Option<OrdinaryObject>,
    /// The value of the "length" property.
    pub(crate) len: u32,
    /// The \[\[Writable\]\] attribute of the "length" property; its other
    /// attributes are fixed at { enumerable: false, configurable: false }.
    pub(crate) len_writable: bool,
}

impl Array {
    pub(crate) const fn get_index(self) -> usize {
        self.0.into_index()
    }

    pub fn len(self, agent: &Agent) -> u32 {
        agent[self].len
    }

    /// The fully populated descriptor of the "length" property.
    pub(crate) fn length_descriptor(self, agent: &Agent) -> PropertyDescriptor {
        PropertyDescriptor {
            value: Some(Value::Number(agent[self].len as f64)),
            writable: Some(agent[self].len_writable),
            get: None,
            set: None,
            enumerable: Some(false),
            configurable: Some(false),
        }
    }
}

impl From<ArrayIndex> for Array {
    fn from(value: ArrayIndex) -> Self {
        Array(value)
    }
}

impl IntoObject for Array {
    fn into_object(self) -> Object {
        Object::Array(self)
    }
}

impl IntoValue for Array {
    fn into_value(self) -> Value {
        Value::Array(self)
    }
}

impl From<Array> for Object {
    fn from(value: Array) -> Self {
        Object::Array(value)
    }
}

impl TryFrom<Value> for Array {
    type Error = ();

    fn try_from(value: Value) -> Result<Self, ()> {
        match value {
            Value::Array(a) => Ok(a),
            _ => Err(()),
        }
    }
}

impl_index_access!(Array, ArrayHeapData, arrays, "Array");

impl InternalSlots for Array {
    const DEFAULT_PROTOTYPE: ProtoIntrinsics = ProtoIntrinsics::Array;

    fn get_backing_object(self, agent: &Agent) -> Option<OrdinaryObject> {
        agent[self].object_index
    }

    fn set_backing_object(self, agent: &mut Agent, backing_object: OrdinaryObject) {
        assert!(agent[self].object_index.replace(backing_object).is_none());
    }
}

impl InternalMethods for Array {
    /// ### [10.4.2.1 \[\[GetOwnProperty\]\] ( P )](https://tc39.es/ecma262/#sec-array-exotic-objects-getownproperty-p)
    fn internal_get_own_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
    ) -> JsResult<Option<PropertyDescriptor>> {
        if is_length_key(agent, property_key) {
            return Ok(Some(self.length_descriptor(agent)));
        }
        Ok(ordinary_get_own_property(
            agent,
            self.get_backing_object(agent),
            property_key,
        ))
    }

    /// ### [10.4.2.1 \[\[DefineOwnProperty\]\] ( P, Desc )](https://tc39.es/ecma262/#sec-array-exotic-objects-defineownproperty-p-desc)
    fn internal_define_own_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        property_descriptor: PropertyDescriptor,
    ) -> JsResult<bool> {
        // 1. If P is "length", then
        if is_length_key(agent, property_key) {
            // a. Return ? ArraySetLength(A, Desc).
            return array_set_length(agent, self, property_descriptor);
        }
        // 2. Else if P is an array index, then
        if let PropertyKey::Integer(index) = property_key {
            // a. Let lengthDesc be OrdinaryGetOwnProperty(A, "length").
            // c. Let oldLen be lengthDesc.[[Value]].
            let old_len = agent[self].len;
            // e. If index ≥ oldLen and lengthDesc.[[Writable]] is false,
            //    return false.
            if index >= old_len && !agent[self].len_writable {
                return Ok(false);
            }
            // f. Let succeeded be ! OrdinaryDefineOwnProperty(A, P, Desc).
            let backing_object = self.get_or_create_backing_object(agent);
            let succeeded = ordinary_define_own_property(
                agent,
                self.into_object(),
                backing_object,
                property_key,
                property_descriptor,
            )?;
            // g. If succeeded is false, return false.
            if !succeeded {
                return Ok(false);
            }
            // h. If index ≥ oldLen, then
            if index >= old_len {
                // i. Set lengthDesc.[[Value]] to index + 1𝔽.
                // ii. Set succeeded to ! OrdinaryDefineOwnProperty(A,
                //     "length", lengthDesc).
                // iii. Assert: succeeded is true.
                agent[self].len = index + 1;
            }
            // i. Return true.
            return Ok(true);
        }
        // 3. Return ? OrdinaryDefineOwnProperty(A, P, Desc).
        let backing_object = self.get_or_create_backing_object(agent);
        ordinary_define_own_property(
            agent,
            self.into_object(),
            backing_object,
            property_key,
            property_descriptor,
        )
    }

    fn internal_delete(self, agent: &mut Agent, property_key: PropertyKey) -> JsResult<bool> {
        if is_length_key(agent, property_key) {
            // The "length" property is non-configurable.
            return Ok(false);
        }
        Ok(ordinary_delete(
            agent,
            self.get_backing_object(agent),
            property_key,
        ))
    }

    fn internal_own_property_keys(self, agent: &mut Agent) -> JsResult<Vec<PropertyKey>> {
        // Array index keys in ascending numeric order, then "length" (the
        // first string-keyed property of every array), then the remaining
        // string and symbol keys in insertion order.
        let ordered = ordinary_own_property_keys(agent, self.get_backing_object(agent));
        let length_key = PropertyKey::from_str(agent, "length");
        let mut keys = Vec::with_capacity(ordered.len() + 1);
        let mut length_inserted = false;
        for key in ordered {
            if !length_inserted && !matches!(key, PropertyKey::Integer(_)) {
                keys.push(length_key);
                length_inserted = true;
            }
            keys.push(key);
        }
        if !length_inserted {
            keys.push(length_key);
        }
        Ok(keys)
    }
}

fn is_length_key(agent: &mut Agent, property_key: PropertyKey) -> bool {
    let PropertyKey::String(key) = property_key else {
        return false;
    };
    key.as_str(agent) == "length"
}
