use crate::{
    ecmascript::{
        abstract_operations::testing_and_comparison::same_value_zero,
        execution::{agent::Agent, realm::ProtoIntrinsics},
        types::language::{
            object::{
                internal_methods::InternalMethods, internal_slots::InternalSlots, IntoObject,
                Object, OrdinaryObject,
            },
            value::{IntoValue, Value},
        },
    },
    heap::{impl_index_access, indexes::SetIndex},
};

/// ### [24.2 Set Objects](https://tc39.es/ecma262/#sec-set-objects)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Set(pub(crate) SetIndex);

/// ### \[\[SetData\]\]
///
/// Insertion-ordered entries; deleted entries leave a hole so that live
/// iterators keep their position.
#[derive(Debug, Default)]
pub struct SetHeapData {
    pub(crate) object_index: Option<OrdinaryObject>,
    pub(crate) set_data: Vec<Option<Value>>,
}

impl Set {
    pub(crate) const fn get_index(self) -> usize {
        self.0.into_index()
    }

    /// The number of live entries.
    pub(crate) fn size(self, agent: &Agent) -> u32 {
        agent[self]
            .set_data
            .iter()
            .filter(|entry| entry.is_some())
            .count() as u32
    }

    /// The position of `value` in \[\[SetData\]\], compared with
    /// SameValueZero.
    pub(crate) fn position(self, agent: &Agent, value: Value) -> Option<usize> {
        agent[self].set_data.iter().position(|entry| {
            entry.is_some_and(|entry| same_value_zero(agent, entry, value))
        })
    }
}

impl From<SetIndex> for Set {
    fn from(value: SetIndex) -> Self {
        Set(value)
    }
}

impl IntoObject for Set {
    fn into_object(self) -> Object {
        Object::Set(self)
    }
}

impl IntoValue for Set {
    fn into_value(self) -> Value {
        Value::Set(self)
    }
}

impl From<Set> for Object {
    fn from(value: Set) -> Self {
        Object::Set(value)
    }
}

impl TryFrom<Value> for Set {
    type Error = ();

    fn try_from(value: Value) -> Result<Self, ()> {
        match value {
            Value::Set(s) => Ok(s),
            _ => Err(()),
        }
    }
}

impl_index_access!(Set, SetHeapData, sets, "Set");

impl InternalSlots for Set {
    const DEFAULT_PROTOTYPE: ProtoIntrinsics = ProtoIntrinsics::Set;

    fn get_backing_object(self, agent: &Agent) -> Option<OrdinaryObject> {
        agent[self].object_index
    }

    fn set_backing_object(self, agent: &mut Agent, backing_object: OrdinaryObject) {
        assert!(agent[self].object_index.replace(backing_object).is_none());
    }
}

impl InternalMethods for Set {}
