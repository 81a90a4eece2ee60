use std::rc::Rc;

use ahash::AHashMap;

use crate::{
    ecmascript::{
        builtins::error::ErrorHeapData,
        execution::{
            environments::{
                get_identifier_reference, EnvironmentIndex, PrivateEnvironmentIndex,
            },
            execution_context::ExecutionContext,
            realm::{initialize_host_defined_realm, Realm, RealmIdentifier},
        },
        plugins::{ExtensionHandler, ExtensionNodeKind, Plugin, PluginError},
        scripts_and_modules::ScriptOrModule,
        types::{
            language::{
                function::Function,
                object::Object,
                string::String,
                value::{IntoValue, Value},
            },
            spec::reference::Reference,
        },
    },
    heap::{CreateHeapData, Heap},
};

#[derive(Debug, Default)]
pub struct Options {
    /// Print engine-internal representations from the inspection helpers.
    pub print_internals: bool,
    /// Initial step budget armed for every top-level evaluation; `None`
    /// runs to completion.
    pub step_budget: Option<u64>,
}

pub type JsResult<T> = std::result::Result<T, JsError>;

/// A throw completion: the thrown language value.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsError(Value);

impl JsError {
    pub(crate) fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn value(self) -> Value {
        self.0
    }
}

/// ### [5.2.3.2 Throw an Exception](https://tc39.es/ecma262/#sec-throw-an-exception)
///
/// The native error kinds the engine can construct for its own throws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptionType {
    Error,
    EvalError,
    RangeError,
    ReferenceError,
    SyntaxError,
    TypeError,
    UriError,
}

pub trait HostHooks: std::fmt::Debug {
    /// ### [19.2.1.2 HostEnsureCanCompileStrings ( calleeRealm )](https://tc39.es/ecma262/#sec-hostensurecancompilestrings)
    fn host_ensure_can_compile_strings(&self, _callee_realm: &mut Realm) -> JsResult<()> {
        // The default implementation of HostEnsureCanCompileStrings is to
        // return NormalCompletion(unused).
        Ok(())
    }

    /// The sink for the console shim. The default writes to stdout.
    fn print(&self, message: &str) {
        println!("{}", message);
    }

    /// The value thrown when the driver interrupts evaluation between two
    /// machine steps. The embedder chooses the identity; the default is a
    /// plain Error.
    fn interrupt_exception(&self, agent: &mut Agent) -> Value {
        agent.create_exception_with_static_message(ExceptionType::Error, "Evaluation interrupted")
    }
}

/// ### [9.7 Agents](https://tc39.es/ecma262/#sec-agents)
///
/// The agent owns the heap, the execution context stack, and the plugin
/// registry. Every abstract operation receives the agent explicitly; there
/// is no process-global interpreter state.
#[derive(Debug)]
pub struct Agent {
    pub(crate) heap: Heap,
    pub(crate) options: Options,
    pub(crate) host_hooks: &'static dyn HostHooks,
    pub(crate) execution_context_stack: Vec<ExecutionContext>,
    /// Plugins registered before the first realm was created.
    pub(crate) plugins: Vec<Rc<dyn Plugin>>,
    /// Evaluator handlers contributed by plugins for the open node kinds.
    pub(crate) evaluation_extensions: AHashMap<ExtensionNodeKind, ExtensionHandler>,
    /// Remaining machine steps before an interrupt is synthesized.
    pub(crate) step_budget: Option<u64>,
}

impl Agent {
    pub fn new(options: Options, host_hooks: &'static dyn HostHooks) -> Self {
        let step_budget = options.step_budget;
        Self {
            heap: Heap::new(),
            options,
            host_hooks,
            execution_context_stack: Vec::new(),
            plugins: Vec::new(),
            evaluation_extensions: AHashMap::default(),
            step_budget,
        }
    }

    /// Register a plugin. Plugins must be registered before the realms that
    /// should see their intrinsics are created.
    pub fn register_plugin(&mut self, plugin: Rc<dyn Plugin>) -> Result<(), PluginError> {
        if self.plugins.iter().any(|p| p.id() == plugin.id()) {
            return Err(PluginError::DuplicateId(plugin.id()));
        }
        for (kind, handler) in plugin.evaluation_extensions() {
            self.evaluation_extensions.insert(*kind, *handler);
        }
        self.plugins.push(plugin);
        Ok(())
    }

    /// Creates a new Realm populated by the registered plugins.
    pub fn create_realm(
        &mut self,
        create_global_object: Option<impl FnOnce(&mut Agent) -> Object>,
        create_global_this_value: Option<impl FnOnce(&mut Agent) -> Object>,
    ) -> Result<RealmIdentifier, PluginError> {
        initialize_host_defined_realm(self, create_global_object, create_global_this_value)?;
        // Realm creation pushed a realm-only execution context; the realm
        // identifier survives the pop.
        let identifier = self.current_realm_id();
        let _ = self.execution_context_stack.pop();
        Ok(identifier)
    }

    /// Creates a default realm with default global object and this value.
    pub fn create_default_realm(&mut self) -> Result<RealmIdentifier, PluginError> {
        self.create_realm(
            None::<fn(&mut Agent) -> Object>,
            None::<fn(&mut Agent) -> Object>,
        )
    }

    pub fn run_in_realm<F, R>(&mut self, realm: RealmIdentifier, func: F) -> R
    where
        F: for<'agent> FnOnce(&'agent mut Agent) -> R,
    {
        let execution_stack_depth_before_call = self.execution_context_stack.len();
        self.execution_context_stack
            .push(ExecutionContext::new_realm_context(realm));
        let result = func(self);
        assert_eq!(
            self.execution_context_stack.len(),
            execution_stack_depth_before_call + 1
        );
        self.execution_context_stack.pop();
        result
    }

    /// Arm the step budget: after `budget` machine steps, evaluation is
    /// interrupted with the host's interrupt exception.
    pub fn set_step_budget(&mut self, budget: u64) {
        self.step_budget = Some(budget);
    }

    pub fn clear_step_budget(&mut self) {
        self.step_budget = None;
    }

    /// Consume one step of the budget. Returns true when the budget is
    /// exhausted and an interrupt must be synthesized. The budget disarms
    /// after firing so that `finally` blocks and iterator teardown still
    /// run to completion.
    pub(crate) fn consume_step(&mut self) -> bool {
        match &mut self.step_budget {
            Some(0) => {
                self.step_budget = None;
                true
            }
            Some(budget) => {
                *budget -= 1;
                false
            }
            None => false,
        }
    }

    pub fn current_realm_id(&self) -> RealmIdentifier {
        self.execution_context_stack.last().unwrap().realm
    }

    pub(crate) fn current_realm(&self) -> &Realm {
        self.get_realm(self.current_realm_id())
    }

    pub(crate) fn current_realm_mut(&mut self) -> &mut Realm {
        self.get_realm_mut(self.current_realm_id())
    }

    pub(crate) fn get_realm(&self, id: RealmIdentifier) -> &Realm {
        &self[id]
    }

    pub(crate) fn get_realm_mut(&mut self, id: RealmIdentifier) -> &mut Realm {
        &mut self[id]
    }

    pub(crate) fn create_exception_with_static_message(
        &mut self,
        kind: ExceptionType,
        message: &'static str,
    ) -> Value {
        let message = String::from_str(self, message);
        self.heap
            .create(ErrorHeapData::new(kind, Some(message), None))
            .into_value()
    }

    /// ### [5.2.3.2 Throw an Exception](https://tc39.es/ecma262/#sec-throw-an-exception)
    pub fn throw_exception_with_static_message(
        &mut self,
        kind: ExceptionType,
        message: &'static str,
    ) -> JsError {
        JsError(self.create_exception_with_static_message(kind, message))
    }

    pub fn throw_exception(&mut self, kind: ExceptionType, message: std::string::String) -> JsError {
        let message = String::from_string(self, message);
        JsError(
            self.heap
                .create(ErrorHeapData::new(kind, Some(message), None))
                .into_value(),
        )
    }

    pub(crate) fn running_execution_context(&self) -> &ExecutionContext {
        self.execution_context_stack.last().unwrap()
    }

    pub(crate) fn running_execution_context_mut(&mut self) -> &mut ExecutionContext {
        self.execution_context_stack.last_mut().unwrap()
    }

    pub(crate) fn push_execution_context(&mut self, context: ExecutionContext) {
        self.execution_context_stack.push(context);
    }

    pub(crate) fn pop_execution_context(&mut self) -> Option<ExecutionContext> {
        self.execution_context_stack.pop()
    }

    /// Panics if no active function object exists.
    pub(crate) fn active_function_object(&self) -> Function {
        self.execution_context_stack
            .last()
            .unwrap()
            .function
            .unwrap()
    }

    pub(crate) fn current_lexical_environment(&self) -> EnvironmentIndex {
        self.running_execution_context()
            .ecmascript_code
            .as_ref()
            .unwrap()
            .lexical_environment
    }

    pub(crate) fn current_variable_environment(&self) -> EnvironmentIndex {
        self.running_execution_context()
            .ecmascript_code
            .as_ref()
            .unwrap()
            .variable_environment
    }

    pub(crate) fn current_private_environment(&self) -> Option<PrivateEnvironmentIndex> {
        self.execution_context_stack
            .last()?
            .ecmascript_code
            .as_ref()?
            .private_environment
    }

    pub(crate) fn set_current_lexical_environment(&mut self, env: EnvironmentIndex) {
        self.running_execution_context_mut()
            .ecmascript_code
            .as_mut()
            .unwrap()
            .lexical_environment = env;
    }

    pub(crate) fn set_current_variable_environment(&mut self, env: EnvironmentIndex) {
        self.running_execution_context_mut()
            .ecmascript_code
            .as_mut()
            .unwrap()
            .variable_environment = env;
    }

    pub(crate) fn set_current_private_environment(&mut self, env: Option<PrivateEnvironmentIndex>) {
        self.running_execution_context_mut()
            .ecmascript_code
            .as_mut()
            .unwrap()
            .private_environment = env;
    }

    pub(crate) fn set_current_strict_mode(&mut self, strict: bool) {
        self.running_execution_context_mut()
            .ecmascript_code
            .as_mut()
            .unwrap()
            .is_strict_mode = strict;
    }

    pub(crate) fn is_strict_mode(&self) -> bool {
        self.running_execution_context()
            .ecmascript_code
            .as_ref()
            .map_or(true, |state| state.is_strict_mode)
    }

    /// The registered evaluator extension for an open node kind, if any.
    pub(crate) fn evaluation_extension(
        &self,
        kind: ExtensionNodeKind,
    ) -> Option<ExtensionHandler> {
        self.evaluation_extensions.get(&kind).copied()
    }
}

/// ### [9.4.1 GetActiveScriptOrModule ()](https://tc39.es/ecma262/#sec-getactivescriptormodule)
///
/// The abstract operation GetActiveScriptOrModule takes no arguments and
/// returns a Script Record, a Module Record, or null. It is used to
/// determine the running script or module, based on the running execution
/// context.
pub(crate) fn get_active_script_or_module(agent: &Agent) -> Option<ScriptOrModule> {
    if agent.execution_context_stack.is_empty() {
        return None;
    }
    let ec = agent
        .execution_context_stack
        .iter()
        .rev()
        .find(|context| context.script_or_module.is_some());
    ec.and_then(|context| context.script_or_module)
}

/// ### [9.4.2 ResolveBinding ( name \[ , env \] )](https://tc39.es/ecma262/#sec-resolvebinding)
///
/// The abstract operation ResolveBinding takes argument name (a String) and
/// optional argument env (an Environment Record or undefined) and returns
/// either a normal completion containing a Reference Record or a throw
/// completion. It is used to determine the binding of name.
pub(crate) fn resolve_binding(
    agent: &mut Agent,
    name: String,
    env: Option<EnvironmentIndex>,
) -> JsResult<Reference> {
    // 1. If env is not present or env is undefined, then
    //    a. Set env to the running execution context's LexicalEnvironment.
    let env = env.unwrap_or_else(|| agent.current_lexical_environment());

    // 2. Assert: env is an Environment Record.
    // Implicit from env's type.

    // 3. Let strict be IsStrict(the syntactic production that is being
    //    evaluated).
    let strict = agent.is_strict_mode();

    // 4. Return ? GetIdentifierReference(env, name, strict).
    get_identifier_reference(agent, Some(env), name, strict)
}
