use super::{
    internal_slots::{dispatch_object, InternalSlots},
    property_key::PropertyKey,
    IntoObject, Object,
};
use crate::ecmascript::{
    builtins::{
        builtin_function::ArgumentsList,
        ordinary::{
            ordinary_define_own_property, ordinary_delete, ordinary_get,
            ordinary_get_own_property, ordinary_has_property, ordinary_own_property_keys,
            ordinary_set, ordinary_set_prototype_of,
        },
    },
    execution::agent::{Agent, JsResult},
    types::{
        language::{function::Function, value::Value},
        spec::property_descriptor::PropertyDescriptor,
    },
};

/// ### [6.1.7.2 Object Internal Methods and Internal Slots](https://tc39.es/ecma262/#sec-object-internal-methods-and-internal-slots)
///
/// The eleven essential internal methods, with the ordinary object
/// algorithms as defaults. Exotic objects override only the methods in
/// which their behaviour deviates. Any method may call back into user code
/// (accessors, user prototypes) and therefore returns a completion.
pub trait InternalMethods
where
    Self: InternalSlots,
{
    /// ### \[\[GetPrototypeOf\]\]
    fn internal_get_prototype_of(self, agent: &mut Agent) -> JsResult<Option<Object>> {
        // 1. Return OrdinaryGetPrototypeOf(O).
        Ok(self.internal_prototype(agent))
    }

    /// ### \[\[SetPrototypeOf\]\]
    fn internal_set_prototype_of(
        self,
        agent: &mut Agent,
        prototype: Option<Object>,
    ) -> JsResult<bool> {
        // 1. Return OrdinarySetPrototypeOf(O, V).
        Ok(ordinary_set_prototype_of(
            agent,
            self.into_object(),
            prototype,
        ))
    }

    /// ### \[\[IsExtensible\]\]
    fn internal_is_extensible(self, agent: &mut Agent) -> JsResult<bool> {
        // 1. Return OrdinaryIsExtensible(O).
        Ok(self.internal_extensible(agent))
    }

    /// ### \[\[PreventExtensions\]\]
    fn internal_prevent_extensions(self, agent: &mut Agent) -> JsResult<bool> {
        // 1. Return OrdinaryPreventExtensions(O).
        self.internal_set_extensible(agent, false);
        Ok(true)
    }

    /// ### \[\[GetOwnProperty\]\]
    fn internal_get_own_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
    ) -> JsResult<Option<PropertyDescriptor>> {
        // 1. Return OrdinaryGetOwnProperty(O, P).
        Ok(ordinary_get_own_property(
            agent,
            self.get_backing_object(agent),
            property_key,
        ))
    }

    /// ### \[\[DefineOwnProperty\]\]
    fn internal_define_own_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        property_descriptor: PropertyDescriptor,
    ) -> JsResult<bool> {
        let backing_object = self.get_or_create_backing_object(agent);
        ordinary_define_own_property(
            agent,
            self.into_object(),
            backing_object,
            property_key,
            property_descriptor,
        )
    }

    /// ### \[\[HasProperty\]\]
    fn internal_has_property(self, agent: &mut Agent, property_key: PropertyKey) -> JsResult<bool> {
        // 1. Return OrdinaryHasProperty(O, P).
        ordinary_has_property(agent, self.into_object(), property_key)
    }

    /// ### \[\[Get\]\]
    fn internal_get(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        receiver: Value,
    ) -> JsResult<Value> {
        // 1. Return OrdinaryGet(O, P, Receiver).
        ordinary_get(agent, self.into_object(), property_key, receiver)
    }

    /// ### \[\[Set\]\]
    fn internal_set(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        value: Value,
        receiver: Value,
    ) -> JsResult<bool> {
        // 1. Return OrdinarySetWithOwnDescriptor(O, P, V, Receiver, ownDesc).
        ordinary_set(agent, self.into_object(), property_key, value, receiver)
    }

    /// ### \[\[Delete\]\]
    fn internal_delete(self, agent: &mut Agent, property_key: PropertyKey) -> JsResult<bool> {
        // 1. Return OrdinaryDelete(O, P).
        Ok(ordinary_delete(
            agent,
            self.get_backing_object(agent),
            property_key,
        ))
    }

    /// ### \[\[OwnPropertyKeys\]\]
    fn internal_own_property_keys(self, agent: &mut Agent) -> JsResult<Vec<PropertyKey>> {
        // 1. Return OrdinaryOwnPropertyKeys(O).
        Ok(ordinary_own_property_keys(
            agent,
            self.get_backing_object(agent),
        ))
    }

    /// ### \[\[Call\]\]
    ///
    /// Provided only by callable object kinds.
    fn internal_call(
        self,
        _agent: &mut Agent,
        _this_argument: Value,
        _arguments_list: ArgumentsList,
    ) -> JsResult<Value> {
        unreachable!("object is not callable");
    }

    /// ### \[\[Construct\]\]
    ///
    /// Provided only by constructor object kinds.
    fn internal_construct(
        self,
        _agent: &mut Agent,
        _arguments_list: ArgumentsList,
        _new_target: Function,
    ) -> JsResult<Object> {
        unreachable!("object is not a constructor");
    }
}

impl InternalMethods for Object {
    fn internal_get_prototype_of(self, agent: &mut Agent) -> JsResult<Option<Object>> {
        dispatch_object!(self, internal_get_prototype_of, agent)
    }

    fn internal_set_prototype_of(
        self,
        agent: &mut Agent,
        prototype: Option<Object>,
    ) -> JsResult<bool> {
        dispatch_object!(self, internal_set_prototype_of, agent, prototype)
    }

    fn internal_is_extensible(self, agent: &mut Agent) -> JsResult<bool> {
        dispatch_object!(self, internal_is_extensible, agent)
    }

    fn internal_prevent_extensions(self, agent: &mut Agent) -> JsResult<bool> {
        dispatch_object!(self, internal_prevent_extensions, agent)
    }

    fn internal_get_own_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
    ) -> JsResult<Option<PropertyDescriptor>> {
        dispatch_object!(self, internal_get_own_property, agent, property_key)
    }

    fn internal_define_own_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        property_descriptor: PropertyDescriptor,
    ) -> JsResult<bool> {
        dispatch_object!(
            self,
            internal_define_own_property,
            agent,
            property_key,
            property_descriptor
        )
    }

    fn internal_has_property(self, agent: &mut Agent, property_key: PropertyKey) -> JsResult<bool> {
        dispatch_object!(self, internal_has_property, agent, property_key)
    }

    fn internal_get(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        receiver: Value,
    ) -> JsResult<Value> {
        dispatch_object!(self, internal_get, agent, property_key, receiver)
    }

    fn internal_set(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        value: Value,
        receiver: Value,
    ) -> JsResult<bool> {
        dispatch_object!(self, internal_set, agent, property_key, value, receiver)
    }

    fn internal_delete(self, agent: &mut Agent, property_key: PropertyKey) -> JsResult<bool> {
        dispatch_object!(self, internal_delete, agent, property_key)
    }

    fn internal_own_property_keys(self, agent: &mut Agent) -> JsResult<Vec<PropertyKey>> {
        dispatch_object!(self, internal_own_property_keys, agent)
    }

    fn internal_call(
        self,
        agent: &mut Agent,
        this_argument: Value,
        arguments_list: ArgumentsList,
    ) -> JsResult<Value> {
        dispatch_object!(self, internal_call, agent, this_argument, arguments_list)
    }

    fn internal_construct(
        self,
        agent: &mut Agent,
        arguments_list: ArgumentsList,
        new_target: Function,
    ) -> JsResult<Object> {
        dispatch_object!(self, internal_construct, agent, arguments_list, new_target)
    }
}

macro_rules! dispatch_function {
    ($function: expr, $method: ident $(, $arg: expr)*) => {
        match $function {
            Function::BoundFunction(data) => data.$method($($arg),*),
            Function::BuiltinConstructorFunction(data) => data.$method($($arg),*),
            Function::BuiltinFunction(data) => data.$method($($arg),*),
            Function::ECMAScriptFunction(data) => data.$method($($arg),*),
        }
    };
}

impl InternalSlots for Function {
    const DEFAULT_PROTOTYPE: crate::ecmascript::execution::realm::ProtoIntrinsics =
        crate::ecmascript::execution::realm::ProtoIntrinsics::Function;

    fn get_backing_object(self, agent: &Agent) -> Option<super::OrdinaryObject> {
        dispatch_function!(self, get_backing_object, agent)
    }

    fn set_backing_object(self, agent: &mut Agent, backing_object: super::OrdinaryObject) {
        dispatch_function!(self, set_backing_object, agent, backing_object)
    }

    fn internal_prototype(self, agent: &Agent) -> Option<Object> {
        dispatch_function!(self, internal_prototype, agent)
    }

    fn internal_extensible(self, agent: &Agent) -> bool {
        dispatch_function!(self, internal_extensible, agent)
    }

    fn internal_set_extensible(self, agent: &mut Agent, value: bool) {
        dispatch_function!(self, internal_set_extensible, agent, value)
    }
}

impl InternalMethods for Function {
    fn internal_get_own_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
    ) -> JsResult<Option<PropertyDescriptor>> {
        dispatch_function!(self, internal_get_own_property, agent, property_key)
    }

    fn internal_define_own_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        property_descriptor: PropertyDescriptor,
    ) -> JsResult<bool> {
        dispatch_function!(
            self,
            internal_define_own_property,
            agent,
            property_key,
            property_descriptor
        )
    }

    fn internal_has_property(self, agent: &mut Agent, property_key: PropertyKey) -> JsResult<bool> {
        dispatch_function!(self, internal_has_property, agent, property_key)
    }

    fn internal_get(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        receiver: Value,
    ) -> JsResult<Value> {
        dispatch_function!(self, internal_get, agent, property_key, receiver)
    }

    fn internal_set(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        value: Value,
        receiver: Value,
    ) -> JsResult<bool> {
        dispatch_function!(self, internal_set, agent, property_key, value, receiver)
    }

    fn internal_call(
        self,
        agent: &mut Agent,
        this_argument: Value,
        arguments_list: ArgumentsList,
    ) -> JsResult<Value> {
        dispatch_function!(self, internal_call, agent, this_argument, arguments_list)
    }

    fn internal_construct(
        self,
        agent: &mut Agent,
        arguments_list: ArgumentsList,
        new_target: Function,
    ) -> JsResult<Object> {
        dispatch_function!(self, internal_construct, agent, arguments_list, new_target)
    }
}
