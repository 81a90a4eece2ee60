use super::{ObjectEnvironmentIndex, OuterEnv};
use crate::{
    ecmascript::{
        abstract_operations::{
            operations_on_objects::{define_property_or_throw, get, has_property, set},
            type_conversion::to_boolean,
        },
        execution::agent::{Agent, ExceptionType, JsResult},
        types::{
            language::{
                object::{internal_methods::InternalMethods, property_key::PropertyKey, Object},
                string::String,
                value::Value,
            },
            spec::property_descriptor::PropertyDescriptor,
        },
    },
    heap::WellKnownSymbolIndexes,
};

/// ### [9.1.1.2 Object Environment Records](https://tc39.es/ecma262/#sec-object-environment-records)
///
/// Each Object Environment Record is associated with an object called its
/// binding object. An Object Environment Record binds the set of string
/// identifier names that directly correspond to the property names of its
/// binding object.
#[derive(Debug, Clone)]
pub struct ObjectEnvironmentRecord {
    /// ### \[\[BindingObject\]\]
    binding_object: Object,

    /// ### \[\[IsWithEnvironment\]\]
    ///
    /// Indicates whether this Environment Record is created for a `with`
    /// statement.
    is_with_environment: bool,

    /// ### \[\[OuterEnv\]\]
    pub(crate) outer_env: OuterEnv,
}

impl ObjectEnvironmentRecord {
    pub(crate) fn new(
        binding_object: Object,
        is_with_environment: bool,
        outer_env: OuterEnv,
    ) -> ObjectEnvironmentRecord {
        ObjectEnvironmentRecord {
            binding_object,
            is_with_environment,
            outer_env,
        }
    }

    pub(crate) fn get_binding_object(&self) -> Object {
        self.binding_object
    }
}

/// ### [9.1.2.3 NewObjectEnvironment ( O, W, E )](https://tc39.es/ecma262/#sec-newobjectenvironment)
pub(crate) fn new_object_environment(
    agent: &mut Agent,
    binding_object: Object,
    is_with_environment: bool,
    outer_env: OuterEnv,
) -> ObjectEnvironmentIndex {
    // 1. Let env be a new Object Environment Record.
    // 2. Set env.[[BindingObject]] to O.
    // 3. Set env.[[IsWithEnvironment]] to W.
    // 4. Set env.[[OuterEnv]] to E.
    // 5. Return env.
    agent
        .heap
        .environments
        .push_object_environment(ObjectEnvironmentRecord::new(
            binding_object,
            is_with_environment,
            outer_env,
        ))
}

impl ObjectEnvironmentIndex {
    /// ### [9.1.1.2.1 HasBinding ( N )](https://tc39.es/ecma262/#sec-object-environment-records-hasbinding-n)
    pub(crate) fn has_binding(self, agent: &mut Agent, name: String) -> JsResult<bool> {
        let env_rec = &agent[self];
        let binding_object = env_rec.binding_object;
        let is_with_environment = env_rec.is_with_environment;
        let n = PropertyKey::from(name);

        // 1. Let bindingObject be envRec.[[BindingObject]].
        // 2. Let foundBinding be ? HasProperty(bindingObject, N).
        let found_binding = has_property(agent, binding_object, n)?;

        // 3. If foundBinding is false, return false.
        if !found_binding {
            return Ok(false);
        }

        // 4. If envRec.[[IsWithEnvironment]] is false, return true.
        if !is_with_environment {
            return Ok(true);
        }

        // 5. Let unscopables be ? Get(bindingObject, %Symbol.unscopables%).
        let unscopables = get(
            agent,
            binding_object,
            PropertyKey::from(WellKnownSymbolIndexes::Unscopables),
        )?;

        // 6. If unscopables is an Object, then
        if let Ok(unscopables) = Object::try_from(unscopables) {
            // a. Let blocked be ToBoolean(? Get(unscopables, N)).
            let blocked = get(agent, unscopables, n)?;
            let blocked = to_boolean(agent, blocked);

            // b. If blocked is true, return false.
            if blocked {
                return Ok(false);
            }
        }

        // 7. Return true.
        Ok(true)
    }

    /// ### [9.1.1.2.2 CreateMutableBinding ( N, D )](https://tc39.es/ecma262/#sec-object-environment-records-createmutablebinding-n-d)
    pub(crate) fn create_mutable_binding(
        self,
        agent: &mut Agent,
        name: String,
        is_deletable: bool,
    ) -> JsResult<()> {
        // 1. Let bindingObject be envRec.[[BindingObject]].
        let binding_object = agent[self].binding_object;

        // 2. Perform ? DefinePropertyOrThrow(bindingObject, N,
        //    PropertyDescriptor { [[Value]]: undefined, [[Writable]]: true,
        //    [[Enumerable]]: true, [[Configurable]]: D }).
        define_property_or_throw(
            agent,
            binding_object,
            PropertyKey::from(name),
            PropertyDescriptor {
                value: Some(Value::Undefined),
                writable: Some(true),
                enumerable: Some(true),
                configurable: Some(is_deletable),
                ..Default::default()
            },
        )?;

        // 3. Return UNUSED.
        Ok(())
    }

    /// ### [9.1.1.2.4 InitializeBinding ( N, V )](https://tc39.es/ecma262/#sec-object-environment-records-initializebinding-n-v)
    pub(crate) fn initialize_binding(
        self,
        agent: &mut Agent,
        name: String,
        value: Value,
    ) -> JsResult<()> {
        // 1. Perform ? envRec.SetMutableBinding(N, V, false).
        self.set_mutable_binding(agent, name, value, false)

        // 2. Return UNUSED.
    }

    /// ### [9.1.1.2.5 SetMutableBinding ( N, V, S )](https://tc39.es/ecma262/#sec-object-environment-records-setmutablebinding-n-v-s)
    pub(crate) fn set_mutable_binding(
        self,
        agent: &mut Agent,
        name: String,
        value: Value,
        is_strict: bool,
    ) -> JsResult<()> {
        // 1. Let bindingObject be envRec.[[BindingObject]].
        let binding_object = agent[self].binding_object;
        let n = PropertyKey::from(name);

        // 2. Let stillExists be ? HasProperty(bindingObject, N).
        let still_exists = has_property(agent, binding_object, n)?;

        // 3. If stillExists is false and S is true, throw a ReferenceError
        //    exception.
        if !still_exists && is_strict {
            let error_message = format!("Property '{}' does not exist.", name.as_str(agent));
            return Err(agent.throw_exception(ExceptionType::ReferenceError, error_message));
        }

        // 4. Perform ? Set(bindingObject, N, V, S).
        set(agent, binding_object, n, value, is_strict)?;

        // 5. Return UNUSED.
        Ok(())
    }

    /// ### [9.1.1.2.6 GetBindingValue ( N, S )](https://tc39.es/ecma262/#sec-object-environment-records-getbindingvalue-n-s)
    pub(crate) fn get_binding_value(
        self,
        agent: &mut Agent,
        name: String,
        is_strict: bool,
    ) -> JsResult<Value> {
        // 1. Let bindingObject be envRec.[[BindingObject]].
        let binding_object = agent[self].binding_object;
        let n = PropertyKey::from(name);

        // 2. Let value be ? HasProperty(bindingObject, N).
        let value = has_property(agent, binding_object, n)?;

        // 3. If value is false, then
        if !value {
            // a. If S is false, return undefined; otherwise throw a
            //    ReferenceError exception.
            if !is_strict {
                return Ok(Value::Undefined);
            }
            let error_message = format!(
                "Property '{}' does not exist in binding object.",
                name.as_str(agent)
            );
            return Err(agent.throw_exception(ExceptionType::ReferenceError, error_message));
        }

        // 4. Return ? Get(bindingObject, N).
        get(agent, binding_object, n)
    }

    /// ### [9.1.1.2.7 DeleteBinding ( N )](https://tc39.es/ecma262/#sec-object-environment-records-deletebinding-n)
    pub(crate) fn delete_binding(self, agent: &mut Agent, name: String) -> JsResult<bool> {
        // 1. Let bindingObject be envRec.[[BindingObject]].
        let binding_object = agent[self].binding_object;

        // 2. Return ? bindingObject.[[Delete]](N).
        binding_object.internal_delete(agent, PropertyKey::from(name))
    }

    /// ### [9.1.1.2.10 WithBaseObject ( )](https://tc39.es/ecma262/#sec-object-environment-records-withbaseobject)
    pub(crate) fn with_base_object(self, agent: &Agent) -> Option<Object> {
        let env_rec = &agent[self];
        // 1. If envRec.[[IsWithEnvironment]] is true, return
        //    envRec.[[BindingObject]].
        if env_rec.is_with_environment {
            return Some(env_rec.binding_object);
        }
        // 2. Otherwise, return undefined.
        None
    }
}
