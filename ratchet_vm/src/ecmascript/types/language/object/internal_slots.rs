use super::{data::ObjectHeapData, IntoObject, Object, OrdinaryObject};
use crate::{
    ecmascript::execution::{agent::Agent, realm::ProtoIntrinsics},
    heap::CreateHeapData,
};

/// Dispatch a method call to the kind-specific handle of an [`Object`].
macro_rules! dispatch_object {
    ($object: expr, $method: ident $(, $arg: expr)*) => {
        match $object {
            Object::Object(data) => data.$method($($arg),*),
            Object::Array(data) => data.$method($($arg),*),
            Object::ArrayIterator(data) => data.$method($($arg),*),
            Object::BoundFunction(data) => data.$method($($arg),*),
            Object::BuiltinConstructorFunction(data) => data.$method($($arg),*),
            Object::BuiltinFunction(data) => data.$method($($arg),*),
            Object::ECMAScriptFunction(data) => data.$method($($arg),*),
            Object::Error(data) => data.$method($($arg),*),
            Object::Generator(data) => data.$method($($arg),*),
            Object::PrimitiveObject(data) => data.$method($($arg),*),
            Object::Set(data) => data.$method($($arg),*),
            Object::SetIterator(data) => data.$method($($arg),*),
        }
    };
}

pub(crate) use dispatch_object;

/// ### [10.1 Ordinary Object Internal Methods and Internal Slots](https://tc39.es/ecma262/#sec-ordinary-object-internal-methods-and-internal-slots)
///
/// Every object kind exposes its ordinary internal slots through this trait.
/// Exotic and built-in objects store their ordinary properties in a lazily
/// created backing object; their other internal slots live in their own heap
/// data.
pub trait InternalSlots
where
    Self: Sized + Copy + IntoObject,
{
    /// The intrinsic used as \[\[Prototype\]\] when the object has no
    /// backing object recording an explicit prototype.
    const DEFAULT_PROTOTYPE: ProtoIntrinsics;

    fn get_backing_object(self, agent: &Agent) -> Option<OrdinaryObject>;

    fn set_backing_object(self, agent: &mut Agent, backing_object: OrdinaryObject);

    fn create_backing_object(self, agent: &mut Agent) -> OrdinaryObject {
        debug_assert!(self.get_backing_object(agent).is_none());
        let prototype = self.internal_prototype(agent);
        let backing_object = agent.heap.create(ObjectHeapData::new(prototype));
        self.set_backing_object(agent, backing_object);
        backing_object
    }

    fn get_or_create_backing_object(self, agent: &mut Agent) -> OrdinaryObject {
        match self.get_backing_object(agent) {
            Some(backing_object) => backing_object,
            None => self.create_backing_object(agent),
        }
    }

    /// ### \[\[Prototype\]\]
    fn internal_prototype(self, agent: &Agent) -> Option<Object> {
        if let Some(backing_object) = self.get_backing_object(agent) {
            agent[backing_object].prototype
        } else {
            agent
                .current_realm()
                .intrinsics()
                .get_intrinsic_default_proto(Self::DEFAULT_PROTOTYPE)
        }
    }

    fn internal_set_prototype(self, agent: &mut Agent, prototype: Option<Object>) {
        let backing_object = self.get_or_create_backing_object(agent);
        agent[backing_object].prototype = prototype;
    }

    /// ### \[\[Extensible\]\]
    fn internal_extensible(self, agent: &Agent) -> bool {
        self.get_backing_object(agent)
            .map_or(true, |backing_object| agent[backing_object].extensible)
    }

    fn internal_set_extensible(self, agent: &mut Agent, value: bool) {
        let backing_object = self.get_or_create_backing_object(agent);
        agent[backing_object].extensible = value;
    }
}

impl InternalSlots for OrdinaryObject {
    const DEFAULT_PROTOTYPE: ProtoIntrinsics = ProtoIntrinsics::Object;

    fn get_backing_object(self, _agent: &Agent) -> Option<OrdinaryObject> {
        Some(self)
    }

    fn set_backing_object(self, _agent: &mut Agent, _backing_object: OrdinaryObject) {
        unreachable!("ordinary objects are their own backing object");
    }

    fn create_backing_object(self, _agent: &mut Agent) -> OrdinaryObject {
        unreachable!("ordinary objects are their own backing object");
    }

    fn internal_prototype(self, agent: &Agent) -> Option<Object> {
        agent[self].prototype
    }

    fn internal_set_prototype(self, agent: &mut Agent, prototype: Option<Object>) {
        agent[self].prototype = prototype;
    }

    fn internal_extensible(self, agent: &Agent) -> bool {
        agent[self].extensible
    }

    fn internal_set_extensible(self, agent: &mut Agent, value: bool) {
        agent[self].extensible = value;
    }
}

impl InternalSlots for Object {
    const DEFAULT_PROTOTYPE: ProtoIntrinsics = ProtoIntrinsics::Object;

    fn get_backing_object(self, agent: &Agent) -> Option<OrdinaryObject> {
        dispatch_object!(self, get_backing_object, agent)
    }

    fn set_backing_object(self, agent: &mut Agent, backing_object: OrdinaryObject) {
        dispatch_object!(self, set_backing_object, agent, backing_object)
    }

    fn create_backing_object(self, agent: &mut Agent) -> OrdinaryObject {
        dispatch_object!(self, create_backing_object, agent)
    }

    fn internal_prototype(self, agent: &Agent) -> Option<Object> {
        dispatch_object!(self, internal_prototype, agent)
    }

    fn internal_set_prototype(self, agent: &mut Agent, prototype: Option<Object>) {
        dispatch_object!(self, internal_set_prototype, agent, prototype)
    }

    fn internal_extensible(self, agent: &Agent) -> bool {
        dispatch_object!(self, internal_extensible, agent)
    }

    fn internal_set_extensible(self, agent: &mut Agent, value: bool) {
        dispatch_object!(self, internal_set_extensible, agent, value)
    }
}
