use crate::{
    ecmascript::{
        execution::{
            agent::{Agent, ExceptionType, JsResult},
            realm::ProtoIntrinsics,
        },
        types::{
            language::{
                object::{
                    internal_methods::InternalMethods, internal_slots::InternalSlots,
                    property_key::PropertyKey, IntoObject, Object, OrdinaryObject,
                },
                string::String,
                value::{IntoValue, Value},
            },
            spec::property_descriptor::PropertyDescriptor,
        },
    },
    heap::{impl_index_access, indexes::ErrorIndex},
};

/// ### [20.5.8 Properties of Error Instances](https://tc39.es/ecma262/#sec-properties-of-error-instances)
///
/// Error instances carry their kind and message in internal slots; the
/// `message` own property is synthesized on first observation so that the
/// engine can construct throw values without touching intrinsics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Error(pub(crate) ErrorIndex);

#[derive(Debug)]
pub struct ErrorHeapData {
    pub(crate) object_index: Option<OrdinaryObject>,
    pub(crate) kind: ExceptionType,
    pub(crate) message: Option<String>,
    pub(crate) cause: Option<Value>,
}

impl ErrorHeapData {
    pub(crate) fn new(kind: ExceptionType, message: Option<String>, cause: Option<Value>) -> Self {
        Self {
            object_index: None,
            kind,
            message,
            cause,
        }
    }
}

impl Error {
    pub(crate) const fn get_index(self) -> usize {
        self.0.into_index()
    }
}

impl From<ErrorIndex> for Error {
    fn from(value: ErrorIndex) -> Self {
        Error(value)
    }
}

impl IntoObject for Error {
    fn into_object(self) -> Object {
        Object::Error(self)
    }
}

impl IntoValue for Error {
    fn into_value(self) -> Value {
        Value::Error(self)
    }
}

impl From<Error> for Object {
    fn from(value: Error) -> Self {
        Object::Error(value)
    }
}

impl TryFrom<Value> for Error {
    type Error = ();

    fn try_from(value: Value) -> Result<Self, ()> {
        match value {
            Value::Error(e) => Ok(e),
            _ => Err(()),
        }
    }
}

impl_index_access!(Error, ErrorHeapData, errors, "Error");

impl Error {
    /// Move the synthesized `message` and `cause` properties into the
    /// backing object; needed before ordinary algorithms take over.
    fn materialize_synthesized_properties(self, agent: &mut Agent) {
        let message = agent[self].message.take();
        let cause = agent[self].cause.take();
        if message.is_none() && cause.is_none() {
            return;
        }
        let backing_object = self.get_or_create_backing_object(agent);
        if let Some(message) = message {
            let message_key = PropertyKey::from_str(agent, "message");
            if !agent[backing_object].storage.contains_key(message_key) {
                agent[backing_object].storage.set(
                    message_key,
                    crate::ecmascript::types::language::object::property_storage::PropertyData::Data {
                        value: message.into_value(),
                        writable: true,
                        enumerable: false,
                        configurable: true,
                    },
                );
            }
        }
        if let Some(cause) = cause {
            let cause_key = PropertyKey::from_str(agent, "cause");
            if !agent[backing_object].storage.contains_key(cause_key) {
                agent[backing_object].storage.set(
                    cause_key,
                    crate::ecmascript::types::language::object::property_storage::PropertyData::Data {
                        value: cause,
                        writable: true,
                        enumerable: false,
                        configurable: true,
                    },
                );
            }
        }
    }
}

impl InternalSlots for Error {
    const DEFAULT_PROTOTYPE: ProtoIntrinsics = ProtoIntrinsics::Error;

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
            let kind = agent[self].kind;
            agent.current_realm().intrinsics().error_prototype(kind)
        }
    }
}

impl InternalMethods for Error {
    fn internal_get_own_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
    ) -> JsResult<Option<PropertyDescriptor>> {
        self.materialize_synthesized_properties(agent);
        Ok(
            crate::ecmascript::builtins::ordinary::ordinary_get_own_property(
                agent,
                self.get_backing_object(agent),
                property_key,
            ),
        )
    }

    fn internal_define_own_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        property_descriptor: PropertyDescriptor,
    ) -> JsResult<bool> {
        self.materialize_synthesized_properties(agent);
        let backing_object = self.get_or_create_backing_object(agent);
        crate::ecmascript::builtins::ordinary::ordinary_define_own_property(
            agent,
            self.into_object(),
            backing_object,
            property_key,
            property_descriptor,
        )
    }

    fn internal_delete(self, agent: &mut Agent, property_key: PropertyKey) -> JsResult<bool> {
        self.materialize_synthesized_properties(agent);
        Ok(crate::ecmascript::builtins::ordinary::ordinary_delete(
            agent,
            self.get_backing_object(agent),
            property_key,
        ))
    }

    fn internal_own_property_keys(self, agent: &mut Agent) -> JsResult<Vec<PropertyKey>> {
        self.materialize_synthesized_properties(agent);
        Ok(
            crate::ecmascript::builtins::ordinary::ordinary_own_property_keys(
                agent,
                self.get_backing_object(agent),
            ),
        )
    }
}
