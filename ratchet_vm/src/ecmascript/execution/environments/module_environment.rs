use ahash::AHashMap;

use super::{ModuleEnvironmentIndex, OuterEnv};
use crate::ecmascript::{
    execution::agent::{Agent, ExceptionType, JsResult},
    types::language::{string::String, value::Value},
};

/// A binding in a Module Environment Record: either a direct lexical
/// binding, or an indirect binding created for an import that targets a
/// binding in another module's environment.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ModuleBinding {
    Direct {
        /// `None` while the binding is uninitialized.
        value: Option<Value>,
        mutable: bool,
    },
    Indirect {
        module_env: ModuleEnvironmentIndex,
        name: String,
    },
}

/// ### [9.1.1.5 Module Environment Records](https://tc39.es/ecma262/#sec-module-environment-records)
///
/// A Module Environment Record is a Declarative Environment Record that is
/// used to represent the outer scope of an ECMAScript Module. In additional
/// to normal mutable and immutable bindings, Module Environment Records also
/// provide immutable import bindings which provide indirect access to a
/// target binding that exists in another Environment Record.
#[derive(Debug, Default)]
pub struct ModuleEnvironmentRecord {
    /// ### \[\[OuterEnv\]\]
    pub(crate) outer_env: OuterEnv,

    bindings: AHashMap<String, ModuleBinding>,
}

impl ModuleEnvironmentIndex {
    /// ### [9.1.1.1.1 HasBinding ( N )](https://tc39.es/ecma262/#sec-declarative-environment-records-hasbinding-n)
    pub(crate) fn has_binding(self, agent: &Agent, name: String) -> bool {
        agent[self].bindings.contains_key(&name)
    }

    pub(crate) fn create_mutable_binding(self, agent: &mut Agent, name: String, _is_deletable: bool) {
        debug_assert!(!self.has_binding(agent, name));
        agent[self].bindings.insert(
            name,
            ModuleBinding::Direct {
                value: None,
                mutable: true,
            },
        );
    }

    pub(crate) fn create_immutable_binding(self, agent: &mut Agent, name: String, _is_strict: bool) {
        debug_assert!(!self.has_binding(agent, name));
        agent[self].bindings.insert(
            name,
            ModuleBinding::Direct {
                value: None,
                mutable: false,
            },
        );
    }

    /// ### [9.1.1.5.5 CreateImportBinding ( N, M, N2 )](https://tc39.es/ecma262/#sec-createimportbinding)
    ///
    /// Create an immutable indirect binding for the name N to the binding N2
    /// in the environment of module M.
    pub(crate) fn create_import_binding(
        self,
        agent: &mut Agent,
        name: String,
        module_env: ModuleEnvironmentIndex,
        target_name: String,
    ) {
        // 1. Assert: envRec does not already have a binding for N.
        debug_assert!(!self.has_binding(agent, name));
        // 2. Assert: When M.[[Environment]] is instantiated, it will have a
        //    direct binding for N2.
        // 3. Create an immutable indirect binding in envRec for N that
        //    references M and N2 as its target binding.
        agent[self].bindings.insert(
            name,
            ModuleBinding::Indirect {
                module_env,
                name: target_name,
            },
        );
        // 4. Return UNUSED.
    }

    pub(crate) fn initialize_binding(self, agent: &mut Agent, name: String, value: Value) {
        let binding = agent[self].bindings.get_mut(&name).unwrap();
        match binding {
            ModuleBinding::Direct { value: slot, .. } => {
                debug_assert!(slot.is_none());
                *slot = Some(value);
            }
            ModuleBinding::Indirect { .. } => {
                unreachable!("initializing an indirect import binding")
            }
        }
    }

    pub(crate) fn set_mutable_binding(
        self,
        agent: &mut Agent,
        name: String,
        value: Value,
        _is_strict: bool,
    ) -> JsResult<()> {
        let binding = agent[self].bindings.get_mut(&name).unwrap();
        match binding {
            ModuleBinding::Direct {
                value: slot,
                mutable: true,
            } => {
                *slot = Some(value);
                Ok(())
            }
            _ => {
                // Module code is always strict; assignment to an immutable
                // or import binding throws.
                let error_message = format!(
                    "Assignment to constant binding '{}'.",
                    name.as_str(agent)
                );
                Err(agent.throw_exception(ExceptionType::TypeError, error_message))
            }
        }
    }

    /// ### [9.1.1.5.1 GetBindingValue ( N, S )](https://tc39.es/ecma262/#sec-module-environment-records-getbindingvalue-n-s)
    pub(crate) fn get_binding_value(
        self,
        agent: &mut Agent,
        name: String,
        is_strict: bool,
    ) -> JsResult<Value> {
        // 1. Assert: S is true.
        debug_assert!(is_strict);
        // 2. Assert: envRec has a binding for N.
        let binding = *agent[self].bindings.get(&name).unwrap();
        match binding {
            // 3. If the binding for N is an indirect binding, then
            ModuleBinding::Indirect { module_env, name } => {
                // c. If targetEnv is EMPTY, throw a ReferenceError
                //    exception; otherwise return
                //    ? targetEnv.GetBindingValue(N2, true).
                module_env.get_binding_value(agent, name, true)
            }
            // 4. If the binding for N in envRec is an uninitialized binding,
            //    throw a ReferenceError exception.
            ModuleBinding::Direct { value: None, .. } => {
                let error_message = format!(
                    "Cannot access '{}' before initialization.",
                    name.as_str(agent)
                );
                Err(agent.throw_exception(ExceptionType::ReferenceError, error_message))
            }
            // 5. Return the value currently bound to N in envRec.
            ModuleBinding::Direct {
                value: Some(value), ..
            } => Ok(value),
        }
    }

    /// ### [9.1.1.5.4 GetThisBinding ( )](https://tc39.es/ecma262/#sec-module-environment-records-getthisbinding)
    pub(crate) fn get_this_binding(self) -> Value {
        // 1. Return undefined.
        Value::Undefined
    }
}
