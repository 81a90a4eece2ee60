use ahash::AHashSet;

use super::{
    declarative_environment::DeclarativeEnvironmentRecord,
    object_environment::ObjectEnvironmentRecord, DeclarativeEnvironmentIndex,
    GlobalEnvironmentIndex, ObjectEnvironmentIndex,
};
use crate::ecmascript::{
    abstract_operations::operations_on_objects::{define_property_or_throw, has_own_property, set},
    execution::agent::{Agent, ExceptionType, JsResult},
    types::{
        language::{
            object::{internal_methods::InternalMethods, property_key::PropertyKey, Object},
            string::String,
            value::Value,
        },
        spec::property_descriptor::PropertyDescriptor,
    },
};

/// ### [9.1.1.4 Global Environment Records](https://tc39.es/ecma262/#sec-global-environment-records)
///
/// A Global Environment Record is used to represent the outer most scope
/// that is shared by all of the ECMAScript Script elements that are
/// processed in a common realm. It is a composite encapsulating an Object
/// Environment Record over the global object and a Declarative Environment
/// Record for all other declarations.
#[derive(Debug)]
pub struct GlobalEnvironmentRecord {
    /// ### \[\[ObjectRecord\]\]
    ///
    /// Binding object is the global object. Contains global built-in
    /// bindings as well as FunctionDeclaration, GeneratorDeclaration, and
    /// VariableDeclaration bindings in global code for the associated realm.
    pub(crate) object_record: ObjectEnvironmentIndex,

    /// ### \[\[GlobalThisValue\]\]
    ///
    /// The value returned by `this` in global scope.
    pub(crate) global_this_value: Object,

    /// ### \[\[DeclarativeRecord\]\]
    ///
    /// Contains bindings for all declarations in global code for the
    /// associated realm code except for FunctionDeclaration,
    /// GeneratorDeclaration, and VariableDeclaration bindings.
    pub(crate) declarative_record: DeclarativeEnvironmentIndex,

    /// ### \[\[VarNames\]\]
    ///
    /// The string names bound by FunctionDeclaration, GeneratorDeclaration,
    /// and VariableDeclaration declarations in global code for the
    /// associated realm.
    var_names: AHashSet<String>,
}

/// ### [9.1.2.5 NewGlobalEnvironment ( G, thisValue )](https://tc39.es/ecma262/#sec-newglobalenvironment)
pub(crate) fn new_global_environment(
    agent: &mut Agent,
    global: Object,
    this_value: Object,
) -> GlobalEnvironmentIndex {
    // 1. Let objRec be NewObjectEnvironment(G, false, null).
    let object_record = ObjectEnvironmentRecord::new(global, false, None);
    let object_record = agent.heap.environments.push_object_environment(object_record);

    // 2. Let dclRec be NewDeclarativeEnvironment(null).
    let declarative_record = DeclarativeEnvironmentRecord::new(None);
    let declarative_record = agent
        .heap
        .environments
        .push_declarative_environment(declarative_record);

    // 3. Let env be a new Global Environment Record.
    let env = GlobalEnvironmentRecord {
        // 4. Set env.[[ObjectRecord]] to objRec.
        object_record,

        // 5. Set env.[[GlobalThisValue]] to thisValue.
        global_this_value: this_value,

        // 6. Set env.[[DeclarativeRecord]] to dclRec.
        declarative_record,

        // 7. Set env.[[VarNames]] to a new empty List.
        var_names: AHashSet::default(),
    };

    // 8. Set env.[[OuterEnv]] to null.
    // 9. Return env.
    agent.heap.environments.push_global_environment(env)
}

impl GlobalEnvironmentIndex {
    /// ### [9.1.1.4.1 HasBinding ( N )](https://tc39.es/ecma262/#sec-global-environment-records-hasbinding-n)
    pub(crate) fn has_binding(self, agent: &mut Agent, name: String) -> JsResult<bool> {
        let env_rec = &agent[self];
        // 1. Let DclRec be envRec.[[DeclarativeRecord]].
        // 2. If ! DclRec.HasBinding(N) is true, return true.
        if env_rec.declarative_record.has_binding(agent, name) {
            return Ok(true);
        }

        // 3. Let ObjRec be envRec.[[ObjectRecord]].
        // 4. Return ? ObjRec.HasBinding(N).
        env_rec.object_record.has_binding(agent, name)
    }

    /// ### [9.1.1.4.2 CreateMutableBinding ( N, D )](https://tc39.es/ecma262/#sec-global-environment-records-createmutablebinding-n-d)
    pub(crate) fn create_mutable_binding(
        self,
        agent: &mut Agent,
        name: String,
        is_deletable: bool,
    ) -> JsResult<()> {
        let dcl_rec = agent[self].declarative_record;
        // 1. Let DclRec be envRec.[[DeclarativeRecord]].
        // 2. If ! DclRec.HasBinding(N) is true, throw a TypeError exception.
        if dcl_rec.has_binding(agent, name) {
            let error_message =
                format!("Redeclaration of global binding '{}'.", name.as_str(agent));
            Err(agent.throw_exception(ExceptionType::TypeError, error_message))
        } else {
            // 3. Return ! DclRec.CreateMutableBinding(N, D).
            dcl_rec.create_mutable_binding(agent, name, is_deletable);
            Ok(())
        }
    }

    /// ### [9.1.1.4.3 CreateImmutableBinding ( N, S )](https://tc39.es/ecma262/#sec-global-environment-records-createimmutablebinding-n-s)
    pub(crate) fn create_immutable_binding(
        self,
        agent: &mut Agent,
        name: String,
        is_strict: bool,
    ) -> JsResult<()> {
        let dcl_rec = agent[self].declarative_record;
        // 1. Let DclRec be envRec.[[DeclarativeRecord]].
        // 2. If ! DclRec.HasBinding(N) is true, throw a TypeError exception.
        if dcl_rec.has_binding(agent, name) {
            let error_message =
                format!("Redeclaration of global binding '{}'.", name.as_str(agent));
            Err(agent.throw_exception(ExceptionType::TypeError, error_message))
        } else {
            // 3. Return ! DclRec.CreateImmutableBinding(N, S).
            dcl_rec.create_immutable_binding(agent, name, is_strict);
            Ok(())
        }
    }

    /// ### [9.1.1.4.4 InitializeBinding ( N, V )](https://tc39.es/ecma262/#sec-global-environment-records-initializebinding-n-v)
    pub(crate) fn initialize_binding(
        self,
        agent: &mut Agent,
        name: String,
        value: Value,
    ) -> JsResult<()> {
        let env_rec = &agent[self];
        // 1. Let DclRec be envRec.[[DeclarativeRecord]].
        // 2. If ! DclRec.HasBinding(N) is true, then
        if env_rec.declarative_record.has_binding(agent, name) {
            // a. Return ! DclRec.InitializeBinding(N, V).
            env_rec.declarative_record.initialize_binding(agent, name, value);
            Ok(())
        } else {
            // 3. Assert: If the binding exists, it must be in the Object
            //    Environment Record.
            // 4. Let ObjRec be envRec.[[ObjectRecord]].
            // 5. Return ? ObjRec.InitializeBinding(N, V).
            let obj_rec = env_rec.object_record;
            obj_rec.initialize_binding(agent, name, value)
        }
    }

    /// ### [9.1.1.4.5 SetMutableBinding ( N, V, S )](https://tc39.es/ecma262/#sec-global-environment-records-setmutablebinding-n-v-s)
    pub(crate) fn set_mutable_binding(
        self,
        agent: &mut Agent,
        name: String,
        value: Value,
        is_strict: bool,
    ) -> JsResult<()> {
        let env_rec = &agent[self];
        // 1. Let DclRec be envRec.[[DeclarativeRecord]].
        // 2. If ! DclRec.HasBinding(N) is true, then
        if env_rec.declarative_record.has_binding(agent, name) {
            // a. Return ? DclRec.SetMutableBinding(N, V, S).
            let dcl_rec = env_rec.declarative_record;
            dcl_rec.set_mutable_binding(agent, name, value, is_strict)
        } else {
            // 3. Let ObjRec be envRec.[[ObjectRecord]].
            // 4. Return ? ObjRec.SetMutableBinding(N, V, S).
            let obj_rec = env_rec.object_record;
            obj_rec.set_mutable_binding(agent, name, value, is_strict)
        }
    }

    /// ### [9.1.1.4.6 GetBindingValue ( N, S )](https://tc39.es/ecma262/#sec-global-environment-records-getbindingvalue-n-s)
    pub(crate) fn get_binding_value(
        self,
        agent: &mut Agent,
        name: String,
        is_strict: bool,
    ) -> JsResult<Value> {
        let env_rec = &agent[self];
        // 1. Let DclRec be envRec.[[DeclarativeRecord]].
        // 2. If ! DclRec.HasBinding(N) is true, then
        if env_rec.declarative_record.has_binding(agent, name) {
            // a. Return ? DclRec.GetBindingValue(N, S).
            let dcl_rec = env_rec.declarative_record;
            dcl_rec.get_binding_value(agent, name, is_strict)
        } else {
            // 3. Let ObjRec be envRec.[[ObjectRecord]].
            // 4. Return ? ObjRec.GetBindingValue(N, S).
            let obj_rec = env_rec.object_record;
            obj_rec.get_binding_value(agent, name, is_strict)
        }
    }

    /// ### [9.1.1.4.7 DeleteBinding ( N )](https://tc39.es/ecma262/#sec-global-environment-records-deletebinding-n)
    pub(crate) fn delete_binding(self, agent: &mut Agent, name: String) -> JsResult<bool> {
        let env_rec = &agent[self];
        // 1. Let DclRec be envRec.[[DeclarativeRecord]].
        // 2. If ! DclRec.HasBinding(N) is true, then
        if env_rec.declarative_record.has_binding(agent, name) {
            // a. Return ! DclRec.DeleteBinding(N).
            let dcl_rec = env_rec.declarative_record;
            return Ok(dcl_rec.delete_binding(agent, name));
        }

        // 3. Let ObjRec be envRec.[[ObjectRecord]].
        // 4. Let globalObject be ObjRec.[[BindingObject]].
        let obj_rec = env_rec.object_record;
        let global_object = agent[obj_rec].get_binding_object();

        // 5. Let existingProp be ? HasOwnProperty(globalObject, N).
        let n = PropertyKey::from(name);
        let existing_prop = has_own_property(agent, global_object, n)?;

        // 6. If existingProp is true, then
        if existing_prop {
            // a. Let status be ? ObjRec.DeleteBinding(N).
            let status = obj_rec.delete_binding(agent, name)?;

            // b. If status is true and envRec.[[VarNames]] contains N, then
            if status {
                // i. Remove N from envRec.[[VarNames]].
                agent[self].var_names.remove(&name);
            }

            // c. Return status.
            Ok(status)
        } else {
            // 7. Return true.
            Ok(true)
        }
    }

    /// ### [9.1.1.4.11 GetThisBinding ( )](https://tc39.es/ecma262/#sec-global-environment-records-getthisbinding)
    pub(crate) fn get_this_binding(self, agent: &Agent) -> Object {
        // 1. Return envRec.[[GlobalThisValue]].
        agent[self].global_this_value
    }

    /// ### [9.1.1.4.12 HasVarDeclaration ( N )](https://tc39.es/ecma262/#sec-hasvardeclaration)
    pub(crate) fn has_var_declaration(self, agent: &Agent, name: String) -> bool {
        // 1. Let varDeclaredNames be envRec.[[VarNames]].
        // 2. If varDeclaredNames contains N, return true.
        // 3. Return false.
        agent[self].var_names.contains(&name)
    }

    /// ### [9.1.1.4.13 HasLexicalDeclaration ( N )](https://tc39.es/ecma262/#sec-haslexicaldeclaration)
    pub(crate) fn has_lexical_declaration(self, agent: &Agent, name: String) -> bool {
        // 1. Let DclRec be envRec.[[DeclarativeRecord]].
        // 2. Return ! DclRec.HasBinding(N).
        agent[self].declarative_record.has_binding(agent, name)
    }

    /// ### [9.1.1.4.14 HasRestrictedGlobalProperty ( N )](https://tc39.es/ecma262/#sec-hasrestrictedglobalproperty)
    pub(crate) fn has_restricted_global_property(
        self,
        agent: &mut Agent,
        name: String,
    ) -> JsResult<bool> {
        // 1. Let ObjRec be envRec.[[ObjectRecord]].
        // 2. Let globalObject be ObjRec.[[BindingObject]].
        let global_object = agent[agent[self].object_record].get_binding_object();

        // 3. Let existingProp be ? globalObject.[[GetOwnProperty]](N).
        let n = PropertyKey::from(name);
        let existing_prop = global_object.internal_get_own_property(agent, n)?;

        // 4. If existingProp is undefined, return false.
        let Some(existing_prop) = existing_prop else {
            return Ok(false);
        };

        // 5. If existingProp.[[Configurable]] is true, return false.
        // 6. Return true.
        Ok(existing_prop.configurable != Some(true))
    }

    /// ### [9.1.1.4.15 CanDeclareGlobalVar ( N )](https://tc39.es/ecma262/#sec-candeclareglobalvar)
    pub(crate) fn can_declare_global_var(self, agent: &mut Agent, name: String) -> JsResult<bool> {
        // 1. Let ObjRec be envRec.[[ObjectRecord]].
        // 2. Let globalObject be ObjRec.[[BindingObject]].
        let global_object = agent[agent[self].object_record].get_binding_object();

        // 3. Let hasProperty be ? HasOwnProperty(globalObject, N).
        let n = PropertyKey::from(name);
        let has_property = has_own_property(agent, global_object, n)?;

        // 4. If hasProperty is true, return true.
        if has_property {
            return Ok(true);
        }

        // 5. Return ? IsExtensible(globalObject).
        global_object.internal_is_extensible(agent)
    }

    /// ### [9.1.1.4.16 CanDeclareGlobalFunction ( N )](https://tc39.es/ecma262/#sec-candeclareglobalfunction)
    pub(crate) fn can_declare_global_function(
        self,
        agent: &mut Agent,
        name: String,
    ) -> JsResult<bool> {
        // 1. Let ObjRec be envRec.[[ObjectRecord]].
        // 2. Let globalObject be ObjRec.[[BindingObject]].
        let global_object = agent[agent[self].object_record].get_binding_object();

        // 3. Let existingProp be ? globalObject.[[GetOwnProperty]](N).
        let n = PropertyKey::from(name);
        let existing_prop = global_object.internal_get_own_property(agent, n)?;

        // 4. If existingProp is undefined, return ? IsExtensible(globalObject).
        let Some(existing_prop) = existing_prop else {
            return global_object.internal_is_extensible(agent);
        };

        // 5. If existingProp.[[Configurable]] is true, return true.
        if existing_prop.configurable == Some(true) {
            return Ok(true);
        }

        // 6. If IsDataDescriptor(existingProp) is true and existingProp has
        //    attribute values { [[Writable]]: true, [[Enumerable]]: true },
        //    return true.
        if existing_prop.is_data_descriptor()
            && existing_prop.writable == Some(true)
            && existing_prop.enumerable == Some(true)
        {
            return Ok(true);
        }

        // 7. Return false.
        Ok(false)
    }

    /// ### [9.1.1.4.17 CreateGlobalVarBinding ( N, D )](https://tc39.es/ecma262/#sec-createglobalvarbinding)
    pub(crate) fn create_global_var_binding(
        self,
        agent: &mut Agent,
        name: String,
        is_deletable: bool,
    ) -> JsResult<()> {
        // 1. Let ObjRec be envRec.[[ObjectRecord]].
        // 2. Let globalObject be ObjRec.[[BindingObject]].
        let obj_rec = agent[self].object_record;
        let global_object = agent[obj_rec].get_binding_object();

        // 3. Let hasProperty be ? HasOwnProperty(globalObject, N).
        let n = PropertyKey::from(name);
        let has_property = has_own_property(agent, global_object, n)?;

        // 4. Let extensible be ? IsExtensible(globalObject).
        let extensible = global_object.internal_is_extensible(agent)?;

        // 5. If hasProperty is false and extensible is true, then
        if !has_property && extensible {
            // a. Perform ? ObjRec.CreateMutableBinding(N, D).
            obj_rec.create_mutable_binding(agent, name, is_deletable)?;

            // b. Perform ? ObjRec.InitializeBinding(N, undefined).
            obj_rec.initialize_binding(agent, name, Value::Undefined)?;
        }

        // 6. If envRec.[[VarNames]] does not contain N, then
        // a. Append N to envRec.[[VarNames]].
        agent[self].var_names.insert(name);

        // 7. Return UNUSED.
        Ok(())
    }

    /// ### [9.1.1.4.18 CreateGlobalFunctionBinding ( N, V, D )](https://tc39.es/ecma262/#sec-createglobalfunctionbinding)
    pub(crate) fn create_global_function_binding(
        self,
        agent: &mut Agent,
        name: String,
        value: Value,
        is_deletable: bool,
    ) -> JsResult<()> {
        // 1. Let ObjRec be envRec.[[ObjectRecord]].
        // 2. Let globalObject be ObjRec.[[BindingObject]].
        let global_object = agent[agent[self].object_record].get_binding_object();

        // 3. Let existingProp be ? globalObject.[[GetOwnProperty]](N).
        let n = PropertyKey::from(name);
        let existing_prop = global_object.internal_get_own_property(agent, n)?;

        // 4. If existingProp is undefined or existingProp.[[Configurable]]
        //    is true, then
        let desc = if existing_prop
            .map_or(true, |existing_prop| existing_prop.configurable == Some(true))
        {
            // a. Let desc be the PropertyDescriptor { [[Value]]: V,
            //    [[Writable]]: true, [[Enumerable]]: true,
            //    [[Configurable]]: D }.
            PropertyDescriptor {
                value: Some(value),
                writable: Some(true),
                enumerable: Some(true),
                configurable: Some(is_deletable),
                ..Default::default()
            }
        } else {
            // 5. Else,
            // a. Let desc be the PropertyDescriptor { [[Value]]: V }.
            PropertyDescriptor {
                value: Some(value),
                ..Default::default()
            }
        };

        // 6. Perform ? DefinePropertyOrThrow(globalObject, N, desc).
        define_property_or_throw(agent, global_object, n, desc)?;

        // 7. Perform ? Set(globalObject, N, V, false).
        set(agent, global_object, n, value, false)?;

        // 8. Append N to envRec.[[VarNames]].
        agent[self].var_names.insert(name);

        // 9. Return UNUSED.
        Ok(())
    }
}
