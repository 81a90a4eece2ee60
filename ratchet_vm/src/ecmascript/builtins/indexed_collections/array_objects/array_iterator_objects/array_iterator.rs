use crate::{
    ecmascript::{
        execution::{agent::Agent, realm::ProtoIntrinsics},
        types::language::{
            object::{
                internal_methods::InternalMethods, internal_slots::InternalSlots, IntoObject,
                Object, OrdinaryObject,
            },
            value::{IntoValue, Value},
        },
    },
    heap::{impl_index_access, indexes::ArrayIteratorIndex, CreateHeapData},
};

/// What a collection iterator yields per step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum CollectionIteratorKind {
    #[default]
    KeyAndValue,
    Key,
    Value,
}

/// ### [23.1.5 Array Iterator Objects](https://tc39.es/ecma262/#sec-array-iterator-objects)
///
/// An Array Iterator is an object that represents a specific iteration over
/// some specific Array instance object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ArrayIterator(pub(crate) ArrayIteratorIndex);

#[derive(Debug)]
pub struct ArrayIteratorHeapData {
    pub(crate) object_index: Option<OrdinaryObject>,
    /// ### \[\[IteratedArrayLike\]\]
    ///
    /// `None` when iteration has completed.
    pub(crate) array: Option<Object>,
    /// ### \[\[ArrayLikeNextIndex\]\]
    pub(crate) next_index: i64,
    /// ### \[\[ArrayLikeIterationKind\]\]
    pub(crate) kind: CollectionIteratorKind,
}

impl ArrayIterator {
    pub(crate) const fn get_index(self) -> usize {
        self.0.into_index()
    }

    /// ### [23.1.5.1 CreateArrayIterator ( array, kind )](https://tc39.es/ecma262/#sec-createarrayiterator)
    pub(crate) fn from_object(
        agent: &mut Agent,
        array: Object,
        kind: CollectionIteratorKind,
    ) -> ArrayIterator {
        agent.heap.create(ArrayIteratorHeapData {
            object_index: None,
            array: Some(array),
            next_index: 0,
            kind,
        })
    }
}

impl From<ArrayIteratorIndex> for ArrayIterator {
    fn from(value: ArrayIteratorIndex) -> Self {
        ArrayIterator(value)
    }
}

impl IntoObject for ArrayIterator {
    fn into_object(self) -> Object {
        Object::ArrayIterator(self)
    }
}

impl IntoValue for ArrayIterator {
    fn into_value(self) -> Value {
        Value::ArrayIterator(self)
    }
}

impl From<ArrayIterator> for Object {
    fn from(value: ArrayIterator) -> Self {
        Object::ArrayIterator(value)
    }
}

impl TryFrom<Value> for ArrayIterator {
    type Error = ();

    fn try_from(value: Value) -> Result<Self, ()> {
        match value {
            Value::ArrayIterator(it) => Ok(it),
            _ => Err(()),
        }
    }
}

impl_index_access!(
    ArrayIterator,
    ArrayIteratorHeapData,
    array_iterators,
    "ArrayIterator"
);

impl InternalSlots for ArrayIterator {
    const DEFAULT_PROTOTYPE: ProtoIntrinsics = ProtoIntrinsics::ArrayIterator;

    fn get_backing_object(self, agent: &Agent) -> Option<OrdinaryObject> {
        agent[self].object_index
    }

    fn set_backing_object(self, agent: &mut Agent, backing_object: OrdinaryObject) {
        assert!(agent[self].object_index.replace(backing_object).is_none());
    }
}

impl InternalMethods for ArrayIterator {}
