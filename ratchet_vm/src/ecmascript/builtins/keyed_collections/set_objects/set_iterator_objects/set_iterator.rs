use crate::{
    ecmascript::{
        builtins::{
            indexed_collections::array_objects::array_iterator_objects::array_iterator::CollectionIteratorKind,
            set::Set,
        },
        execution::{agent::Agent, realm::ProtoIntrinsics},
        types::language::{
            object::{
                internal_methods::InternalMethods, internal_slots::InternalSlots, IntoObject,
                Object, OrdinaryObject,
            },
            value::{IntoValue, Value},
        },
    },
    heap::{impl_index_access, indexes::SetIteratorIndex, CreateHeapData},
};

/// ### [24.2.6 Set Iterator Objects](https://tc39.es/ecma262/#sec-set-iterator-objects)
///
/// A Set Iterator is an ordinary object that represents a specific
/// iteration over some specific Set instance object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct SetIterator(pub(crate) SetIteratorIndex);

#[derive(Debug)]
pub struct SetIteratorHeapData {
    pub(crate) object_index: Option<OrdinaryObject>,
    /// ### \[\[IteratedSet\]\]
    ///
    /// `None` when iteration has completed.
    pub(crate) set: Option<Set>,
    /// ### \[\[SetNextIndex\]\]
    pub(crate) next_index: usize,
    /// ### \[\[SetIterationKind\]\]
    pub(crate) kind: CollectionIteratorKind,
}

impl SetIterator {
    pub(crate) const fn get_index(self) -> usize {
        self.0.into_index()
    }

    /// ### [24.2.6.1 CreateSetIterator ( set, kind )](https://tc39.es/ecma262/#sec-createsetiterator)
    pub(crate) fn from_set(
        agent: &mut Agent,
        set: Set,
        kind: CollectionIteratorKind,
    ) -> SetIterator {
        agent.heap.create(SetIteratorHeapData {
            object_index: None,
            set: Some(set),
            next_index: 0,
            kind,
        })
    }
}

impl From<SetIteratorIndex> for SetIterator {
    fn from(value: SetIteratorIndex) -> Self {
        SetIterator(value)
    }
}

impl IntoObject for SetIterator {
    fn into_object(self) -> Object {
        Object::SetIterator(self)
    }
}

impl IntoValue for SetIterator {
    fn into_value(self) -> Value {
        Value::SetIterator(self)
    }
}

impl From<SetIterator> for Object {
    fn from(value: SetIterator) -> Self {
        Object::SetIterator(value)
    }
}

impl TryFrom<Value> for SetIterator {
    type Error = ();

    fn try_from(value: Value) -> Result<Self, ()> {
        match value {
            Value::SetIterator(it) => Ok(it),
            _ => Err(()),
        }
    }
}

impl_index_access!(
    SetIterator,
    SetIteratorHeapData,
    set_iterators,
    "SetIterator"
);

impl InternalSlots for SetIterator {
    const DEFAULT_PROTOTYPE: ProtoIntrinsics = ProtoIntrinsics::SetIterator;

    fn get_backing_object(self, agent: &Agent) -> Option<OrdinaryObject> {
        agent[self].object_index
    }

    fn set_backing_object(self, agent: &mut Agent, backing_object: OrdinaryObject) {
        assert!(agent[self].object_index.replace(backing_object).is_none());
    }
}

impl InternalMethods for SetIterator {}
