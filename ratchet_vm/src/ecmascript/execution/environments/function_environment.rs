use super::{
    declarative_environment::DeclarativeEnvironmentRecord, DeclarativeEnvironmentIndex,
    EnvironmentIndex, FunctionEnvironmentIndex,
};
use crate::ecmascript::{
    builtins::ecmascript_function::{ECMAScriptFunction, ThisMode},
    execution::agent::{Agent, ExceptionType, JsResult},
    types::{
        language::{
            function::{Function, IntoFunction},
            object::{internal_methods::InternalMethods, Object},
            string::String,
            value::{IntoValue, Value},
        },
    },
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ThisBindingStatus {
    /// Function is an ArrowFunction and does not have a local `this` value.
    Lexical,
    /// Function is a normal function and does not have a bound `this` value.
    Uninitialized,
    /// Function is a normal function and has a bound `this` value.
    Initialized,
}

/// ### [9.1.1.3 Function Environment Records](https://tc39.es/ecma262/#sec-function-environment-records)
///
/// A Function Environment Record is a Declarative Environment Record that is
/// used to represent the top-level scope of a function and, if the function
/// is not an ArrowFunction, provides a `this` binding. If a function is not
/// an ArrowFunction function and references super, its Function Environment
/// Record also contains the state that is used to perform super method
/// invocations from within the function.
#[derive(Debug)]
pub struct FunctionEnvironmentRecord {
    /// ### \[\[ThisValue\]\]
    this_value: Option<Value>,

    /// ### \[\[ThisBindingStatus\]\]
    this_binding_status: ThisBindingStatus,

    /// ### \[\[FunctionObject\]\]
    ///
    /// The function object whose invocation caused this Environment Record
    /// to be created.
    function_object: Function,

    /// ### \[\[NewTarget\]\]
    ///
    /// If this Environment Record was created by the \[\[Construct\]\]
    /// internal method, \[\[NewTarget\]\] is the value of the newTarget
    /// parameter. Otherwise, its value is undefined.
    new_target: Option<Object>,

    /// Function Environment Records support all of the Declarative
    /// Environment Record methods and share the same specifications for all
    /// of those methods except for HasThisBinding and HasSuperBinding.
    pub(crate) declarative_environment: DeclarativeEnvironmentIndex,
}

/// ### [9.1.2.4 NewFunctionEnvironment ( F, newTarget )](https://tc39.es/ecma262/#sec-newfunctionenvironment)
pub(crate) fn new_function_environment(
    agent: &mut Agent,
    f: ECMAScriptFunction,
    new_target: Option<Object>,
) -> FunctionEnvironmentIndex {
    let this_mode = agent[f].this_mode;
    let outer_env = agent[f].environment;
    // 1. Let env be a new Function Environment Record containing no
    //    bindings.
    let declarative_environment = agent
        .heap
        .environments
        .push_declarative_environment(DeclarativeEnvironmentRecord::new(Some(outer_env)));
    let env = FunctionEnvironmentRecord {
        this_value: None,

        // 3. If F.[[ThisMode]] is LEXICAL, set env.[[ThisBindingStatus]] to
        //    LEXICAL.
        // 4. Else, set env.[[ThisBindingStatus]] to UNINITIALIZED.
        this_binding_status: if this_mode == ThisMode::Lexical {
            ThisBindingStatus::Lexical
        } else {
            ThisBindingStatus::Uninitialized
        },

        // 2. Set env.[[FunctionObject]] to F.
        function_object: f.into_function(),

        // 5. Set env.[[NewTarget]] to newTarget.
        new_target,

        // 6. Set env.[[OuterEnv]] to F.[[Environment]].
        declarative_environment,
    };
    // 7. Return env.
    agent.heap.environments.push_function_environment(env)
}

/// ### NewClassStaticElementEnvironment ( classConstructor )
///
/// This is a non-standard abstract operation that performs the same steps as
/// NewFunctionEnvironment, but for a class static element's evaluation
/// function. Such functions are never visible to ECMAScript code, so their
/// creation is skipped; the environment binds the class constructor as both
/// the `this` value and the \[\[FunctionObject]].
pub(crate) fn new_class_static_element_environment(
    agent: &mut Agent,
    class_constructor: Function,
) -> FunctionEnvironmentIndex {
    let outer_env = agent.current_lexical_environment();
    let declarative_environment = agent
        .heap
        .environments
        .push_declarative_environment(DeclarativeEnvironmentRecord::new(Some(outer_env)));

    let env = FunctionEnvironmentRecord {
        this_value: Some(class_constructor.into_value()),
        this_binding_status: ThisBindingStatus::Initialized,
        function_object: class_constructor,
        new_target: None,
        declarative_environment,
    };
    agent.heap.environments.push_function_environment(env)
}

/// A non-standard variant of NewFunctionEnvironment for evaluating a class
/// field initializer with the instance under construction as `this`.
pub(crate) fn new_class_field_initializer_environment(
    agent: &mut Agent,
    class_constructor: Function,
    class_instance: Object,
    outer_env: EnvironmentIndex,
) -> FunctionEnvironmentIndex {
    let declarative_environment = agent
        .heap
        .environments
        .push_declarative_environment(DeclarativeEnvironmentRecord::new(Some(outer_env)));
    agent
        .heap
        .environments
        .push_function_environment(FunctionEnvironmentRecord {
            this_value: Some(class_instance.into_value()),
            this_binding_status: ThisBindingStatus::Initialized,
            function_object: class_constructor,
            new_target: None,
            declarative_environment,
        })
}

impl FunctionEnvironmentIndex {
    pub(crate) fn get_function_object(self, agent: &Agent) -> Function {
        agent[self].function_object
    }

    pub(crate) fn get_new_target(self, agent: &Agent) -> Option<Object> {
        agent[self].new_target
    }

    pub(crate) fn get_this_binding_status(self, agent: &Agent) -> ThisBindingStatus {
        agent[self].this_binding_status
    }

    /// ### [9.1.1.3.4 GetThisBinding ( )](https://tc39.es/ecma262/#sec-function-environment-records-getthisbinding)
    pub(crate) fn get_this_binding(self, agent: &mut Agent) -> JsResult<Value> {
        let env_rec = &agent[self];
        // 1. Assert: envRec.[[ThisBindingStatus]] is not LEXICAL.
        // 2. If envRec.[[ThisBindingStatus]] is UNINITIALIZED, throw a
        //    ReferenceError exception.
        // 3. Return envRec.[[ThisValue]].
        match env_rec.this_binding_status {
            ThisBindingStatus::Lexical => unreachable!(),
            ThisBindingStatus::Initialized => Ok(env_rec.this_value.unwrap()),
            ThisBindingStatus::Uninitialized => Err(agent.throw_exception_with_static_message(
                ExceptionType::ReferenceError,
                "Must call super constructor in derived class before accessing 'this'",
            )),
        }
    }

    /// ### [9.1.1.3.1 BindThisValue ( V )](https://tc39.es/ecma262/#sec-bindthisvalue)
    pub(crate) fn bind_this_value(self, agent: &mut Agent, value: Value) -> JsResult<Value> {
        // 1. Assert: envRec.[[ThisBindingStatus]] is not LEXICAL.
        debug_assert!(agent[self].this_binding_status != ThisBindingStatus::Lexical);

        // 2. If envRec.[[ThisBindingStatus]] is INITIALIZED, throw a
        //    ReferenceError exception.
        if agent[self].this_binding_status == ThisBindingStatus::Initialized {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::ReferenceError,
                "Super constructor may only be called once",
            ));
        }

        let env_rec = &mut agent[self];

        // 3. Set envRec.[[ThisValue]] to V.
        env_rec.this_value = Some(value);

        // 4. Set envRec.[[ThisBindingStatus]] to INITIALIZED.
        env_rec.this_binding_status = ThisBindingStatus::Initialized;

        // 5. Return V.
        Ok(value)
    }

    /// ### [9.1.1.3.2 HasThisBinding ( )](https://tc39.es/ecma262/#sec-function-environment-records-hasthisbinding)
    pub(crate) fn has_this_binding(self, agent: &Agent) -> bool {
        // 1. If envRec.[[ThisBindingStatus]] is LEXICAL, return false;
        //    otherwise, return true.
        agent[self].this_binding_status != ThisBindingStatus::Lexical
    }

    /// ### [9.1.1.3.3 HasSuperBinding ( )](https://tc39.es/ecma262/#sec-function-environment-records-hassuperbinding)
    pub(crate) fn has_super_binding(self, agent: &Agent) -> bool {
        let env_rec = &agent[self];
        // 1. If envRec.[[ThisBindingStatus]] is LEXICAL, return false.
        if env_rec.this_binding_status == ThisBindingStatus::Lexical {
            return false;
        }

        // 2. If envRec.[[FunctionObject]].[[HomeObject]] is undefined,
        //    return false; otherwise, return true.
        match env_rec.function_object {
            Function::ECMAScriptFunction(func) => agent[func].home_object.is_some(),
            _ => false,
        }
    }

    /// ### [9.1.1.3.5 GetSuperBase ( )](https://tc39.es/ecma262/#sec-getsuperbase)
    pub(crate) fn get_super_base(self, agent: &mut Agent) -> JsResult<Value> {
        // 1. Let home be envRec.[[FunctionObject]].[[HomeObject]].
        let home = match agent[self].function_object {
            Function::ECMAScriptFunction(func) => agent[func].home_object,
            _ => None,
        };
        // 2. If home is undefined, return undefined.
        let Some(home) = home else {
            return Ok(Value::Undefined);
        };
        // 3. Assert: home is an ordinary object.
        // 4. Return ! home.[[GetPrototypeOf]]().
        Ok(home
            .internal_get_prototype_of(agent)?
            .map_or(Value::Undefined, |o| o.into_value()))
    }

    /// ### [9.1.1.1.1 HasBinding ( N )](https://tc39.es/ecma262/#sec-declarative-environment-records-hasbinding-n)
    pub(crate) fn has_binding(self, agent: &Agent, name: String) -> bool {
        agent[self].declarative_environment.has_binding(agent, name)
    }

    /// ### [9.1.1.1.2 CreateMutableBinding ( N, D )](https://tc39.es/ecma262/#sec-declarative-environment-records-createmutablebinding-n-d)
    pub(crate) fn create_mutable_binding(self, agent: &mut Agent, name: String, is_deletable: bool) {
        agent[self]
            .declarative_environment
            .create_mutable_binding(agent, name, is_deletable)
    }

    /// ### [9.1.1.1.3 CreateImmutableBinding ( N, S )](https://tc39.es/ecma262/#sec-declarative-environment-records-createimmutablebinding-n-s)
    pub(crate) fn create_immutable_binding(self, agent: &mut Agent, name: String, is_strict: bool) {
        agent[self]
            .declarative_environment
            .create_immutable_binding(agent, name, is_strict)
    }

    /// ### [9.1.1.1.4 InitializeBinding ( N, V )](https://tc39.es/ecma262/#sec-declarative-environment-records-initializebinding-n-v)
    pub(crate) fn initialize_binding(self, agent: &mut Agent, name: String, value: Value) {
        agent[self]
            .declarative_environment
            .initialize_binding(agent, name, value)
    }

    /// ### [9.1.1.1.5 SetMutableBinding ( N, V, S )](https://tc39.es/ecma262/#sec-declarative-environment-records-setmutablebinding-n-v-s)
    pub(crate) fn set_mutable_binding(
        self,
        agent: &mut Agent,
        name: String,
        value: Value,
        is_strict: bool,
    ) -> JsResult<()> {
        agent[self]
            .declarative_environment
            .set_mutable_binding(agent, name, value, is_strict)
    }

    /// ### [9.1.1.1.6 GetBindingValue ( N, S )](https://tc39.es/ecma262/#sec-declarative-environment-records-getbindingvalue-n-s)
    pub(crate) fn get_binding_value(
        self,
        agent: &mut Agent,
        name: String,
        is_strict: bool,
    ) -> JsResult<Value> {
        agent[self]
            .declarative_environment
            .get_binding_value(agent, name, is_strict)
    }

    /// ### [9.1.1.1.7 DeleteBinding ( N )](https://tc39.es/ecma262/#sec-declarative-environment-records-deletebinding-n)
    pub(crate) fn delete_binding(self, agent: &mut Agent, name: String) -> bool {
        agent[self].declarative_environment.delete_binding(agent, name)
    }
}
