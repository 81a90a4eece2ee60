use super::{
    agent::Agent,
    environments::{EnvironmentIndex, PrivateEnvironmentIndex},
    realm::RealmIdentifier,
};
use crate::ecmascript::{
    scripts_and_modules::{source_code::SourceCode, ScriptOrModule},
    types::language::{function::Function, object::Object},
};

/// ### [code evaluation state](https://tc39.es/ecma262/#table-state-components-for-ecmascript-code-execution-contexts)
///
/// ECMAScript code execution contexts have these additional state
/// components.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ECMAScriptCodeEvaluationState {
    /// ### LexicalEnvironment
    ///
    /// Identifies the Environment Record used to resolve identifier
    /// references made by code within this execution context.
    pub(crate) lexical_environment: EnvironmentIndex,

    /// ### VariableEnvironment
    ///
    /// Identifies the Environment Record that holds bindings created by
    /// VariableStatements within this execution context.
    pub(crate) variable_environment: EnvironmentIndex,

    /// ### PrivateEnvironment
    ///
    /// Identifies the PrivateEnvironment Record that holds Private Names
    /// created by ClassElements in the nearest containing class. None if
    /// there is no containing class.
    pub(crate) private_environment: Option<PrivateEnvironmentIndex>,

    /// Whether the code of this context is strict mode code. The
    /// specification derives this syntactically; tracking it here saves the
    /// evaluator from re-deriving it at each suspension point.
    pub(crate) is_strict_mode: bool,

    /// Which source text the currently evaluated code was parsed from. The
    /// source keeps the AST arena alive.
    pub(crate) source_code: SourceCode,
}

/// ### [9.4 Execution Contexts](https://tc39.es/ecma262/#sec-execution-contexts)
///
/// An execution context is a specification device that is used to track the
/// runtime evaluation of code. At any point in time, there is at most one
/// execution context per agent that is actually executing code.
#[derive(Debug, Clone)]
pub(crate) struct ExecutionContext {
    /// ### code evaluation state
    ///
    /// Any state needed to perform, suspend, and resume evaluation of the
    /// code associated with this execution context. None for contexts that
    /// are not evaluating ECMAScript code (built-in calls, realm creation).
    pub(crate) ecmascript_code: Option<ECMAScriptCodeEvaluationState>,

    /// ### Function
    ///
    /// If this execution context is evaluating the code of a function
    /// object, then the value of this component is that function object. If
    /// the context is evaluating the code of a Script, the value is None.
    pub(crate) function: Option<Function>,

    /// ### Realm
    ///
    /// The Realm Record from which associated code accesses ECMAScript
    /// resources.
    pub(crate) realm: RealmIdentifier,

    /// ### ScriptOrModule
    ///
    /// The Script Record or Module Record from which associated code
    /// originates. If there is no originating script, as is the case for
    /// the original execution context created in
    /// InitializeHostDefinedRealm, the value is None.
    pub(crate) script_or_module: Option<ScriptOrModule>,
}

impl ExecutionContext {
    /// A context carrying only a realm, pushed around realm initialization
    /// and built-in function invocations.
    pub(crate) fn new_realm_context(realm: RealmIdentifier) -> Self {
        Self {
            ecmascript_code: None,
            function: None,
            realm,
            script_or_module: None,
        }
    }
}

/// ### [9.4.6 GetGlobalObject ( )](https://tc39.es/ecma262/#sec-getglobalobject)
///
/// The abstract operation GetGlobalObject takes no arguments and returns an
/// Object. It returns the global object used by the currently running
/// execution context.
pub(crate) fn get_global_object(agent: &Agent) -> Object {
    // 1. Let currentRealm be the current Realm Record.
    let current_realm = agent.current_realm();
    // 2. Return currentRealm.[[GlobalObject]].
    current_realm.global_object
}

/// ### [9.4.3 GetThisEnvironment ( )](https://tc39.es/ecma262/#sec-getthisenvironment)
///
/// The abstract operation GetThisEnvironment takes no arguments and returns
/// an Environment Record. It finds the Environment Record that currently
/// supplies the binding of the keyword `this`.
pub(crate) fn get_this_environment(agent: &Agent) -> EnvironmentIndex {
    // 1. Let env be the running execution context's LexicalEnvironment.
    let mut env = agent.current_lexical_environment();
    // 2. Repeat,
    loop {
        // a. Let exists be env.HasThisBinding().
        // b. If exists is true, return env.
        if env.has_this_binding(agent) {
            return env;
        }
        // c. Let outer be env.[[OuterEnv]].
        // d. Assert: outer is not null.
        // e. Set env to outer.
        env = env.get_outer_env(agent).unwrap();
    }
}
