use crate::{
    ecmascript::{
        execution::{agent::Agent, realm::ProtoIntrinsics},
        types::language::{
            bigint::BigInt,
            object::{
                internal_methods::InternalMethods, internal_slots::InternalSlots, IntoObject,
                Object, OrdinaryObject,
            },
            string::String,
            symbol::Symbol,
            value::{IntoValue, Value},
        },
    },
    heap::{impl_index_access, indexes::PrimitiveObjectIndex},
};

/// A wrapper object around a primitive value: the \[\[BooleanData\]\],
/// \[\[NumberData\]\], \[\[StringData\]\], \[\[SymbolData\]\] or
/// \[\[BigIntData\]\] internal slot of the specification, unified into one
/// object kind tagged by its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PrimitiveObject(pub(crate) PrimitiveObjectIndex);

#[derive(Debug, Clone, Copy)]
pub enum PrimitiveObjectData {
    Boolean(bool),
    Number(f64),
    String(String),
    Symbol(Symbol),
    BigInt(BigInt),
}

#[derive(Debug)]
pub struct PrimitiveObjectHeapData {
    pub(crate) object_index: Option<OrdinaryObject>,
    pub(crate) data: PrimitiveObjectData,
}

impl PrimitiveObjectHeapData {
    pub(crate) fn new(data: PrimitiveObjectData) -> Self {
        Self {
            object_index: None,
            data,
        }
    }
}

impl PrimitiveObject {
    pub(crate) const fn get_index(self) -> usize {
        self.0.into_index()
    }

    pub(crate) fn is_boolean_object(self, agent: &Agent) -> bool {
        matches!(agent[self].data, PrimitiveObjectData::Boolean(_))
    }

    /// The wrapped primitive as a language value.
    pub(crate) fn data_value(self, agent: &Agent) -> Value {
        match agent[self].data {
            PrimitiveObjectData::Boolean(b) => Value::Boolean(b),
            PrimitiveObjectData::Number(n) => Value::Number(n),
            PrimitiveObjectData::String(s) => Value::String(s),
            PrimitiveObjectData::Symbol(s) => Value::Symbol(s),
            PrimitiveObjectData::BigInt(b) => Value::BigInt(b),
        }
    }
}

impl From<PrimitiveObjectIndex> for PrimitiveObject {
    fn from(value: PrimitiveObjectIndex) -> Self {
        PrimitiveObject(value)
    }
}

impl IntoObject for PrimitiveObject {
    fn into_object(self) -> Object {
        Object::PrimitiveObject(self)
    }
}

impl IntoValue for PrimitiveObject {
    fn into_value(self) -> Value {
        Value::PrimitiveObject(self)
    }
}

impl From<PrimitiveObject> for Object {
    fn from(value: PrimitiveObject) -> Self {
        Object::PrimitiveObject(value)
    }
}

impl TryFrom<Value> for PrimitiveObject {
    type Error = ();

    fn try_from(value: Value) -> Result<Self, ()> {
        match value {
            Value::PrimitiveObject(o) => Ok(o),
            _ => Err(()),
        }
    }
}

impl_index_access!(
    PrimitiveObject,
    PrimitiveObjectHeapData,
    primitive_objects,
    "PrimitiveObject"
);

impl InternalSlots for PrimitiveObject {
    const DEFAULT_PROTOTYPE: ProtoIntrinsics = ProtoIntrinsics::Object;

    fn get_backing_object(self, agent: &Agent) -> Option<OrdinaryObject> {
        agent[self].object_index
    }

    fn set_backing_object(self, agent: &mut Agent, backing_object: OrdinaryObject) {
        assert!(agent[self].object_index.replace(backing_object).is_none());
    }

    fn internal_prototype(self, agent: &Agent) -> Option<Object> {
        if let Some(backing_object) = self.get_backing_object(agent) {
            agent[backing_object].prototype
        } else {
            let intrinsic = match agent[self].data {
                PrimitiveObjectData::Boolean(_) => ProtoIntrinsics::Boolean,
                PrimitiveObjectData::Number(_) => ProtoIntrinsics::Number,
                PrimitiveObjectData::String(_) => ProtoIntrinsics::String,
                PrimitiveObjectData::Symbol(_) => ProtoIntrinsics::Symbol,
                PrimitiveObjectData::BigInt(_) => ProtoIntrinsics::BigInt,
            };
            agent
                .current_realm()
                .intrinsics()
                .get_intrinsic_default_proto(intrinsic)
        }
    }
}

impl InternalMethods for PrimitiveObject {}
