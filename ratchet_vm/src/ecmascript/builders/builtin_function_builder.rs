use crate::{
    ecmascript::{
        builtins::builtin_function::{
            create_builtin_function, Builtin, BuiltinFunction, BuiltinFunctionArgs,
        },
        execution::{agent::Agent, realm::RealmIdentifier},
        types::{
            language::{
                object::{
                    internal_slots::InternalSlots, property_key::PropertyKey,
                    property_storage::PropertyData, Object,
                },
                value::{IntoValue, Value},
            },
        },
    },
};

use super::property_builder::PropertyBuilder;

/// The property key a [`Builtin`] declaration installs under.
pub(crate) fn builtin_property_key<T: Builtin>(agent: &mut Agent) -> PropertyKey {
    match T::KEY {
        Some(symbol) => PropertyKey::from(symbol),
        None => PropertyKey::from_str(agent, T::NAME),
    }
}

/// Builds one built-in function object: behaviour, name, length, own
/// properties.
pub(crate) struct BuiltinFunctionBuilder<'agent> {
    agent: &'agent mut Agent,
    realm: RealmIdentifier,
    name: &'static str,
    length: u8,
    behaviour: crate::ecmascript::builtins::builtin_function::Behaviour,
    prototype: Option<Object>,
    properties: Vec<(PropertyKey, PropertyData)>,
}

impl<'agent> BuiltinFunctionBuilder<'agent> {
    #[must_use]
    pub(crate) fn new<T: Builtin>(
        agent: &'agent mut Agent,
        realm: RealmIdentifier,
    ) -> BuiltinFunctionBuilder<'agent> {
        BuiltinFunctionBuilder {
            agent,
            realm,
            name: T::NAME,
            length: T::LENGTH,
            behaviour: T::BEHAVIOUR,
            prototype: None,
            properties: Vec::new(),
        }
    }

    /// Override the function's \[\[Prototype\]\] (the default is
    /// %Function.prototype%).
    #[must_use]
    pub(crate) fn with_prototype(mut self, prototype: Object) -> Self {
        self.prototype = Some(prototype);
        self
    }

    #[must_use]
    pub(crate) fn with_data_property(mut self, key: PropertyKey, value: Value) -> Self {
        self.properties.push((
            key,
            PropertyData::Data {
                value,
                writable: true,
                enumerable: false,
                configurable: true,
            },
        ));
        self
    }

    #[must_use]
    pub(crate) fn with_property(
        mut self,
        creator: impl FnOnce(PropertyBuilder) -> (PropertyKey, PropertyData),
    ) -> Self {
        let property = creator(PropertyBuilder::new());
        self.properties.push(property);
        self
    }

    /// Install a built-in function as a method of this function.
    #[must_use]
    pub(crate) fn with_builtin_function_property<T: Builtin>(mut self) -> Self {
        let function =
            create_builtin_function(self.agent, T::BEHAVIOUR, BuiltinFunctionArgs::new(
                T::LENGTH as u32,
                T::NAME,
                self.realm,
            ));
        let key = builtin_property_key::<T>(self.agent);
        self.properties.push((
            key,
            PropertyData::Data {
                value: function.into_value(),
                writable: T::WRITABLE,
                enumerable: T::ENUMERABLE,
                configurable: T::CONFIGURABLE,
            },
        ));
        self
    }

    /// Install the non-writable "prototype" property of a constructor.
    #[must_use]
    pub(crate) fn with_prototype_property(mut self, prototype: Object) -> Self {
        let key = PropertyKey::from_str(self.agent, "prototype");
        self.properties.push((
            key,
            PropertyData::Data {
                value: prototype.into_value(),
                writable: false,
                enumerable: false,
                configurable: false,
            },
        ));
        self
    }

    pub(crate) fn build(self) -> BuiltinFunction {
        let Self {
            agent,
            realm,
            name,
            length,
            behaviour,
            prototype,
            properties,
        } = self;
        let function = create_builtin_function(
            agent,
            behaviour,
            BuiltinFunctionArgs {
                length: length as u32,
                name,
                realm: Some(realm),
                prototype,
            },
        );
        let backing_object = function.get_or_create_backing_object(agent);
        for (key, data) in properties {
            agent[backing_object].storage.set(key, data);
        }
        function
    }
}
