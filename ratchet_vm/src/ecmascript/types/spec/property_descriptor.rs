use crate::ecmascript::{
    abstract_operations::{
        operations_on_objects::{create_data_property_or_throw, get, has_property},
        testing_and_comparison::is_callable,
        type_conversion::to_boolean,
    },
    builtins::ordinary::ordinary_object_create_with_intrinsics,
    execution::{
        agent::{Agent, ExceptionType, JsResult},
        realm::ProtoIntrinsics,
    },
    types::{
        language::{
            function::Function,
            object::{property_key::PropertyKey, Object},
            value::{IntoValue, Value},
        },
    },
};

/// ### [6.2.6 The Property Descriptor Specification Type](https://tc39.es/ecma262/#sec-property-descriptor-specification-type)
///
/// A partial record: every field is optional, and for `get`/`set` the
/// presence of the field is tracked separately from whether it holds a
/// function or undefined.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PropertyDescriptor {
    /// \[\[Value]]
    pub value: Option<Value>,

    /// \[\[Writable]]
    pub writable: Option<bool>,

    /// \[\[Get]]
    pub get: Option<Option<Function>>,

    /// \[\[Set]]
    pub set: Option<Option<Function>>,

    /// \[\[Enumerable]]
    pub enumerable: Option<bool>,

    /// \[\[Configurable]]
    pub configurable: Option<bool>,
}

impl PropertyDescriptor {
    pub(crate) fn new_data_descriptor(value: Value) -> Self {
        Self {
            value: Some(value),
            writable: Some(true),
            get: None,
            set: None,
            enumerable: Some(true),
            configurable: Some(true),
        }
    }

    /// ### [6.2.6.1 IsAccessorDescriptor ( Desc )](https://tc39.es/ecma262/#sec-isaccessordescriptor)
    pub(crate) fn is_accessor_descriptor(&self) -> bool {
        // 1. If Desc is undefined, return false.
        // 2. If Desc has a [[Get]] field, return true.
        // 3. If Desc has a [[Set]] field, return true.
        // 4. Return false.
        self.get.is_some() || self.set.is_some()
    }

    /// ### [6.2.6.2 IsDataDescriptor ( Desc )](https://tc39.es/ecma262/#sec-isdatadescriptor)
    pub(crate) fn is_data_descriptor(&self) -> bool {
        // 1. If Desc is undefined, return false.
        // 2. If Desc has a [[Value]] field, return true.
        // 3. If Desc has a [[Writable]] field, return true.
        // 4. Return false.
        self.value.is_some() || self.writable.is_some()
    }

    /// ### [6.2.6.3 IsGenericDescriptor ( Desc )](https://tc39.es/ecma262/#sec-isgenericdescriptor)
    pub(crate) fn is_generic_descriptor(&self) -> bool {
        !self.is_accessor_descriptor() && !self.is_data_descriptor()
    }

    pub(crate) fn has_fields(&self) -> bool {
        self.value.is_some()
            || self.writable.is_some()
            || self.get.is_some()
            || self.set.is_some()
            || self.enumerable.is_some()
            || self.configurable.is_some()
    }

    pub(crate) fn is_fully_populated(&self) -> bool {
        ((self.value.is_some() && self.writable.is_some())
            || (self.get.is_some() && self.set.is_some()))
            && self.enumerable.is_some()
            && self.configurable.is_some()
    }

    /// ### [6.2.6.6 CompletePropertyDescriptor ( Desc )](https://tc39.es/ecma262/#sec-completepropertydescriptor)
    pub(crate) fn complete_property_descriptor(mut self) -> Self {
        if self.is_generic_descriptor() || self.is_data_descriptor() {
            if self.value.is_none() {
                self.value = Some(Value::Undefined);
            }
            if self.writable.is_none() {
                self.writable = Some(false);
            }
        } else {
            if self.get.is_none() {
                self.get = Some(None);
            }
            if self.set.is_none() {
                self.set = Some(None);
            }
        }
        if self.enumerable.is_none() {
            self.enumerable = Some(false);
        }
        if self.configurable.is_none() {
            self.configurable = Some(false);
        }
        self
    }

    /// ### [6.2.6.4 FromPropertyDescriptor ( Desc )](https://tc39.es/ecma262/#sec-frompropertydescriptor)
    pub(crate) fn from_property_descriptor(
        agent: &mut Agent,
        descriptor: Option<PropertyDescriptor>,
    ) -> JsResult<Value> {
        // 1. If Desc is undefined, return undefined.
        let Some(descriptor) = descriptor else {
            return Ok(Value::Undefined);
        };
        // 2. Let obj be OrdinaryObjectCreate(%Object.prototype%).
        let obj = ordinary_object_create_with_intrinsics(agent, Some(ProtoIntrinsics::Object));
        // 4. If Desc has a [[Value]] field, then
        if let Some(value) = descriptor.value {
            let key = PropertyKey::from_str(agent, "value");
            create_data_property_or_throw(agent, obj, key, value)?;
        }
        // 5. If Desc has a [[Writable]] field, then
        if let Some(writable) = descriptor.writable {
            let key = PropertyKey::from_str(agent, "writable");
            create_data_property_or_throw(agent, obj, key, writable.into())?;
        }
        // 6. If Desc has a [[Get]] field, then
        if let Some(get) = descriptor.get {
            let key = PropertyKey::from_str(agent, "get");
            let value = get.map_or(Value::Undefined, |f| f.into_value());
            create_data_property_or_throw(agent, obj, key, value)?;
        }
        // 7. If Desc has a [[Set]] field, then
        if let Some(set) = descriptor.set {
            let key = PropertyKey::from_str(agent, "set");
            let value = set.map_or(Value::Undefined, |f| f.into_value());
            create_data_property_or_throw(agent, obj, key, value)?;
        }
        // 8. If Desc has an [[Enumerable]] field, then
        if let Some(enumerable) = descriptor.enumerable {
            let key = PropertyKey::from_str(agent, "enumerable");
            create_data_property_or_throw(agent, obj, key, enumerable.into())?;
        }
        // 9. If Desc has a [[Configurable]] field, then
        if let Some(configurable) = descriptor.configurable {
            let key = PropertyKey::from_str(agent, "configurable");
            create_data_property_or_throw(agent, obj, key, configurable.into())?;
        }
        // 10. Return obj.
        Ok(obj.into_value())
    }

    /// ### [6.2.6.5 ToPropertyDescriptor ( Obj )](https://tc39.es/ecma262/#sec-topropertydescriptor)
    pub(crate) fn to_property_descriptor(agent: &mut Agent, obj: Value) -> JsResult<Self> {
        // 1. If Obj is not an Object, throw a TypeError exception.
        let Ok(obj) = Object::try_from(obj) else {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Property descriptor must be an object",
            ));
        };
        // 2. Let desc be a new Property Descriptor that initially has no
        //    fields.
        let mut descriptor = PropertyDescriptor::default();
        // 3. Let hasEnumerable be ? HasProperty(Obj, "enumerable").
        let enumerable_key = PropertyKey::from_str(agent, "enumerable");
        if has_property(agent, obj, enumerable_key)? {
            let value = get(agent, obj, enumerable_key)?;
            descriptor.enumerable = Some(to_boolean(agent, value));
        }
        // 5. Let hasConfigurable be ? HasProperty(Obj, "configurable").
        let configurable_key = PropertyKey::from_str(agent, "configurable");
        if has_property(agent, obj, configurable_key)? {
            let value = get(agent, obj, configurable_key)?;
            descriptor.configurable = Some(to_boolean(agent, value));
        }
        // 7. Let hasValue be ? HasProperty(Obj, "value").
        let value_key = PropertyKey::from_str(agent, "value");
        if has_property(agent, obj, value_key)? {
            descriptor.value = Some(get(agent, obj, value_key)?);
        }
        // 9. Let hasWritable be ? HasProperty(Obj, "writable").
        let writable_key = PropertyKey::from_str(agent, "writable");
        if has_property(agent, obj, writable_key)? {
            let value = get(agent, obj, writable_key)?;
            descriptor.writable = Some(to_boolean(agent, value));
        }
        // 11. Let hasGet be ? HasProperty(Obj, "get").
        let get_key = PropertyKey::from_str(agent, "get");
        if has_property(agent, obj, get_key)? {
            let getter = get(agent, obj, get_key)?;
            // b. If IsCallable(getter) is false and getter is not undefined,
            //    throw a TypeError exception.
            if getter.is_undefined() {
                descriptor.get = Some(None);
            } else if let Some(getter) = is_callable(getter) {
                descriptor.get = Some(Some(getter));
            } else {
                return Err(agent.throw_exception_with_static_message(
                    ExceptionType::TypeError,
                    "getter is not callable",
                ));
            }
        }
        // 13. Let hasSet be ? HasProperty(Obj, "set").
        let set_key = PropertyKey::from_str(agent, "set");
        if has_property(agent, obj, set_key)? {
            let setter = get(agent, obj, set_key)?;
            if setter.is_undefined() {
                descriptor.set = Some(None);
            } else if let Some(setter) = is_callable(setter) {
                descriptor.set = Some(Some(setter));
            } else {
                return Err(agent.throw_exception_with_static_message(
                    ExceptionType::TypeError,
                    "setter is not callable",
                ));
            }
        }
        // 15. If desc has a [[Get]] field or desc has a [[Set]] field, then
        if (descriptor.get.is_some() || descriptor.set.is_some())
            && (descriptor.value.is_some() || descriptor.writable.is_some())
        {
            // a. If desc has a [[Value]] field or desc has a [[Writable]]
            //    field, throw a TypeError exception.
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Invalid property descriptor. Cannot both specify accessors and a value or writable attribute",
            ));
        }
        // 16. Return desc.
        Ok(descriptor)
    }
}
