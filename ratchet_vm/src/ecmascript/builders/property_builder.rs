use crate::ecmascript::types::{
    language::{
        function::Function,
        object::{property_key::PropertyKey, property_storage::PropertyData},
        value::Value,
    },
};

/// Builds one property definition for an intrinsic object under
/// construction.
pub(crate) struct PropertyBuilder {
    key: Option<PropertyKey>,
    value: Option<Value>,
    get: Option<Function>,
    set: Option<Function>,
    writable: bool,
    enumerable: bool,
    configurable: bool,
}

impl PropertyBuilder {
    pub(crate) fn new() -> Self {
        Self {
            key: None,
            value: None,
            get: None,
            set: None,
            writable: true,
            enumerable: false,
            configurable: true,
        }
    }

    #[must_use]
    pub(crate) fn with_key(mut self, key: PropertyKey) -> Self {
        self.key = Some(key);
        self
    }

    #[must_use]
    pub(crate) fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    #[must_use]
    pub(crate) fn with_getter_function(mut self, getter: Function) -> Self {
        self.get = Some(getter);
        self
    }

    #[must_use]
    pub(crate) fn with_setter_function(mut self, setter: Function) -> Self {
        self.set = Some(setter);
        self
    }

    #[must_use]
    pub(crate) fn with_writable(mut self, writable: bool) -> Self {
        self.writable = writable;
        self
    }

    #[must_use]
    pub(crate) fn with_enumerable(mut self, enumerable: bool) -> Self {
        self.enumerable = enumerable;
        self
    }

    #[must_use]
    pub(crate) fn with_configurable(mut self, configurable: bool) -> Self {
        self.configurable = configurable;
        self
    }

    pub(crate) fn build(self) -> (PropertyKey, PropertyData) {
        let key = self.key.expect("property built without a key");
        let data = if self.get.is_some() || self.set.is_some() {
            debug_assert!(self.value.is_none());
            PropertyData::Accessor {
                get: self.get,
                set: self.set,
                enumerable: self.enumerable,
                configurable: self.configurable,
            }
        } else {
            PropertyData::Data {
                value: self.value.expect("data property built without a value"),
                writable: self.writable,
                enumerable: self.enumerable,
                configurable: self.configurable,
            }
        };
        (key, data)
    }
}
