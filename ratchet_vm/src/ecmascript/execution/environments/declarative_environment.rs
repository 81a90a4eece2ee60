use ahash::AHashMap;

use super::{DeclarativeEnvironmentIndex, OuterEnv};
use crate::ecmascript::{
    execution::agent::{Agent, ExceptionType, JsResult},
    types::{language::string::String, language::value::Value},
};

/// ### [9.1.1.1 Declarative Environment Records](https://tc39.es/ecma262/#sec-declarative-environment-records)
///
/// A Declarative Environment Record is used to define the effect of
/// ECMAScript language syntactic elements such as FunctionDeclarations,
/// VariableDeclarations, and Catch clauses that directly associate
/// identifier bindings with ECMAScript language values.
#[derive(Debug, Clone, Default)]
pub struct DeclarativeEnvironmentRecord {
    /// ### \[\[OuterEnv\]\]
    pub(crate) outer_env: OuterEnv,

    /// The environment's bindings.
    bindings: AHashMap<String, Binding>,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Binding {
    /// `None` while the binding is uninitialized (the temporal dead zone).
    pub(crate) value: Option<Value>,
    pub(crate) strict: bool,
    pub(crate) mutable: bool,
    pub(crate) deletable: bool,
}

impl DeclarativeEnvironmentRecord {
    pub(crate) fn new(outer_env: OuterEnv) -> DeclarativeEnvironmentRecord {
        DeclarativeEnvironmentRecord {
            outer_env,
            bindings: AHashMap::default(),
        }
    }

    pub(crate) fn has_binding_record(&self, name: String) -> bool {
        self.bindings.contains_key(&name)
    }

    pub(crate) fn get_binding(&self, name: String) -> Option<&Binding> {
        self.bindings.get(&name)
    }
}

/// ### [9.1.2.2 NewDeclarativeEnvironment ( E )](https://tc39.es/ecma262/#sec-newdeclarativeenvironment)
pub(crate) fn new_declarative_environment(
    agent: &mut Agent,
    outer_env: OuterEnv,
) -> DeclarativeEnvironmentIndex {
    // 1. Let env be a new Declarative Environment Record containing no
    //    bindings.
    // 2. Set env.[[OuterEnv]] to E.
    // 3. Return env.
    agent
        .heap
        .environments
        .push_declarative_environment(DeclarativeEnvironmentRecord::new(outer_env))
}

impl DeclarativeEnvironmentIndex {
    /// ### [9.1.1.1.1 HasBinding ( N )](https://tc39.es/ecma262/#sec-declarative-environment-records-hasbinding-n)
    pub(crate) fn has_binding(self, agent: &Agent, name: String) -> bool {
        // 1. If envRec has a binding for N, return true.
        // 2. Return false.
        agent[self].has_binding_record(name)
    }

    /// ### [9.1.1.1.2 CreateMutableBinding ( N, D )](https://tc39.es/ecma262/#sec-declarative-environment-records-createmutablebinding-n-d)
    pub(crate) fn create_mutable_binding(self, agent: &mut Agent, name: String, is_deletable: bool) {
        // 1. Assert: envRec does not already have a binding for N.
        debug_assert!(!self.has_binding(agent, name));

        // 2. Create a mutable binding in envRec for N and record that it is
        //    uninitialized.
        agent[self].bindings.insert(
            name,
            Binding {
                value: None,
                // Strictness only matters for immutable bindings.
                strict: false,
                mutable: true,
                deletable: is_deletable,
            },
        );

        // 3. Return UNUSED.
    }

    /// ### [9.1.1.1.3 CreateImmutableBinding ( N, S )](https://tc39.es/ecma262/#sec-declarative-environment-records-createimmutablebinding-n-s)
    pub(crate) fn create_immutable_binding(self, agent: &mut Agent, name: String, is_strict: bool) {
        // 1. Assert: envRec does not already have a binding for N.
        debug_assert!(!self.has_binding(agent, name));

        // 2. Create an immutable binding in envRec for N and record that it
        //    is uninitialized. If S is true, record that the newly created
        //    binding is a strict binding.
        agent[self].bindings.insert(
            name,
            Binding {
                value: None,
                strict: is_strict,
                mutable: false,
                deletable: false,
            },
        );

        // 3. Return UNUSED.
    }

    /// ### [9.1.1.1.4 InitializeBinding ( N, V )](https://tc39.es/ecma262/#sec-declarative-environment-records-initializebinding-n-v)
    pub(crate) fn initialize_binding(self, agent: &mut Agent, name: String, value: Value) {
        // 1. Assert: envRec must have an uninitialized binding for N.
        let binding = agent[self].bindings.get_mut(&name).unwrap();
        debug_assert!(binding.value.is_none());

        // 2. Set the bound value for N in envRec to V.
        // 3. Record that the binding for N in envRec has been initialized.
        // Note: the initialization status is the Some/None of the value.
        binding.value = Some(value);

        // 4. Return UNUSED.
    }

    /// ### [9.1.1.1.5 SetMutableBinding ( N, V, S )](https://tc39.es/ecma262/#sec-declarative-environment-records-setmutablebinding-n-v-s)
    pub(crate) fn set_mutable_binding(
        self,
        agent: &mut Agent,
        name: String,
        value: Value,
        mut is_strict: bool,
    ) -> JsResult<()> {
        // 1. If envRec does not have a binding for N, then
        if !self.has_binding(agent, name) {
            // a. If S is true, throw a ReferenceError exception.
            if is_strict {
                let error_message =
                    format!("Could not set mutable binding '{}'.", name.as_str(agent));
                return Err(agent.throw_exception(ExceptionType::ReferenceError, error_message));
            }

            // b. Perform ! envRec.CreateMutableBinding(N, true).
            self.create_mutable_binding(agent, name, true);

            // c. Perform ! envRec.InitializeBinding(N, V).
            self.initialize_binding(agent, name, value);

            // d. Return UNUSED.
            return Ok(());
        }

        let binding = *agent[self].bindings.get(&name).unwrap();

        // 2. If the binding for N in envRec is a strict binding, set S to
        //    true.
        if binding.strict {
            is_strict = true;
        }

        // 3. If the binding for N in envRec has not yet been initialized,
        //    then
        if binding.value.is_none() {
            // a. Throw a ReferenceError exception.
            let error_message =
                format!("Identifier '{}' has not been initialized.", name.as_str(agent));
            return Err(agent.throw_exception(ExceptionType::ReferenceError, error_message));
        }

        // 4. Else if the binding for N in envRec is a mutable binding, then
        if binding.mutable {
            // a. Change its bound value to V.
            agent[self].bindings.get_mut(&name).unwrap().value = Some(value);
        }
        // 5. Else,
        else {
            // a. Assert: This is an attempt to change the value of an
            //    immutable binding.
            // b. If S is true, throw a TypeError exception.
            if is_strict {
                let error_message = format!(
                    "Cannot assign to immutable identifier '{}' in strict mode.",
                    name.as_str(agent)
                );
                return Err(agent.throw_exception(ExceptionType::TypeError, error_message));
            }
        }

        // 6. Return UNUSED.
        Ok(())
    }

    /// ### [9.1.1.1.6 GetBindingValue ( N, S )](https://tc39.es/ecma262/#sec-declarative-environment-records-getbindingvalue-n-s)
    pub(crate) fn get_binding_value(
        self,
        agent: &mut Agent,
        name: String,
        _is_strict: bool,
    ) -> JsResult<Value> {
        // 1. Assert: envRec has a binding for N.
        let binding = agent[self].bindings.get(&name).unwrap();

        // 2. If the binding for N in envRec is an uninitialized binding,
        //    throw a ReferenceError exception.
        let Some(value) = binding.value else {
            let error_message = format!(
                "Cannot access '{}' before initialization.",
                name.as_str(agent)
            );
            return Err(agent.throw_exception(ExceptionType::ReferenceError, error_message));
        };

        // 3. Return the value currently bound to N in envRec.
        Ok(value)
    }

    /// ### [9.1.1.1.7 DeleteBinding ( N )](https://tc39.es/ecma262/#sec-declarative-environment-records-deletebinding-n)
    pub(crate) fn delete_binding(self, agent: &mut Agent, name: String) -> bool {
        // 1. Assert: envRec has a binding for N.
        let binding = agent[self].bindings.get(&name).unwrap();

        // 2. If the binding for N in envRec cannot be deleted, return false.
        if !binding.deletable {
            return false;
        }

        // 3. Remove the binding for N from envRec.
        agent[self].bindings.remove(&name);

        // 4. Return true.
        true
    }
}
