use crate::{
    ecmascript::{
        builtins::builtin_function::{
            create_builtin_function, Builtin, BuiltinFunctionArgs, BuiltinGetter,
        },
        execution::{agent::Agent, realm::RealmIdentifier},
        types::{
            language::{
                function::IntoFunction,
                object::{
                    data::ObjectHeapData, property_key::PropertyKey,
                    property_storage::PropertyData, Object, OrdinaryObject,
                },
                value::{IntoValue, Value},
            },
        },
    },
    heap::CreateHeapData,
};

use super::{
    builtin_function_builder::builtin_property_key, property_builder::PropertyBuilder,
};

/// Builds one intrinsic ordinary object: prototype, extensibility, data
/// properties and built-in methods.
pub(crate) struct OrdinaryObjectBuilder<'agent> {
    agent: &'agent mut Agent,
    realm: RealmIdentifier,
    /// An already-created intrinsic object to populate instead of
    /// allocating a fresh one.
    this: Option<OrdinaryObject>,
    prototype: Option<Object>,
    extensible: bool,
    properties: Vec<(PropertyKey, PropertyData)>,
}

impl<'agent> OrdinaryObjectBuilder<'agent> {
    #[must_use]
    pub(crate) fn new(agent: &'agent mut Agent, realm: RealmIdentifier) -> Self {
        Self {
            agent,
            realm,
            this: None,
            prototype: None,
            extensible: true,
            properties: Vec::new(),
        }
    }

    /// Populate an intrinsic object that was allocated during realm
    /// bootstrapping.
    #[must_use]
    pub(crate) fn new_intrinsic_object(
        agent: &'agent mut Agent,
        realm: RealmIdentifier,
        this: OrdinaryObject,
    ) -> Self {
        Self {
            agent,
            realm,
            this: Some(this),
            prototype: None,
            extensible: true,
            properties: Vec::new(),
        }
    }

    #[must_use]
    pub(crate) fn with_prototype(mut self, prototype: Object) -> Self {
        self.prototype = Some(prototype);
        self
    }

    #[must_use]
    #[allow(dead_code)]
    pub(crate) fn with_extensible(mut self, extensible: bool) -> Self {
        self.extensible = extensible;
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

    /// Install a built-in function as a method of this object.
    #[must_use]
    pub(crate) fn with_builtin_function_property<T: Builtin>(mut self) -> Self {
        let function = create_builtin_function(
            self.agent,
            T::BEHAVIOUR,
            BuiltinFunctionArgs::new(T::LENGTH as u32, T::NAME, self.realm),
        );
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

    /// Install a built-in accessor getter on this object.
    #[must_use]
    pub(crate) fn with_builtin_function_getter_property<T: BuiltinGetter>(mut self) -> Self {
        let getter = create_builtin_function(
            self.agent,
            T::BEHAVIOUR,
            BuiltinFunctionArgs::new(0, T::NAME, self.realm),
        );
        let key = builtin_property_key::<T>(self.agent);
        self.properties.push((
            key,
            PropertyData::Accessor {
                get: Some(getter.into_function()),
                set: None,
                enumerable: T::ENUMERABLE,
                configurable: T::CONFIGURABLE,
            },
        ));
        self
    }

    pub(crate) fn build(self) -> OrdinaryObject {
        let Self {
            agent,
            realm: _,
            this,
            prototype,
            extensible,
            properties,
        } = self;
        if let Some(this) = this {
            if let Some(prototype) = prototype {
                agent[this].prototype = Some(prototype);
            }
            agent[this].extensible = extensible;
            for (key, property) in properties {
                agent[this].storage.set(key, property);
            }
            this
        } else {
            let mut data = ObjectHeapData::new(prototype);
            data.extensible = extensible;
            for (key, property) in properties {
                data.storage.set(key, property);
            }
            agent.heap.create(data)
        }
    }
}
