use oxc_ast::ast::{Expression, FormalParameters, FunctionBody};
use oxc_span::Span;

use crate::{
    ecmascript::{
        abstract_operations::{
            operations_on_objects::{define_property_or_throw, initialize_instance_elements},
            type_conversion::to_object,
        },
        builtins::{
            builtin_function::ArgumentsList,
            ordinary::{ordinary_create_from_constructor, ordinary_object_create},
        },
        execution::{
            agent::{get_active_script_or_module, Agent, ExceptionType, JsResult},
            environments::{
                new_function_environment, EnvironmentIndex, FunctionEnvironmentIndex,
                PrivateEnvironmentIndex, ThisBindingStatus,
            },
            execution_context::{ECMAScriptCodeEvaluationState, ExecutionContext},
            realm::{ProtoIntrinsics, RealmIdentifier},
        },
        scripts_and_modules::{source_code::SourceCode, ScriptOrModule},
        syntax_directed_operations::function_definitions::{
            evaluate_function_body, evaluate_generator_body,
        },
        types::{
            language::{
                function::{Function, IntoFunction},
                object::{
                    data::ObjectHeapData,
                    internal_methods::InternalMethods,
                    internal_slots::InternalSlots,
                    property_key::PropertyKey,
                    property_storage::PropertyData,
                    IntoObject, Object, OrdinaryObject,
                },
                string::String,
                value::{IntoValue, Value},
            },
            spec::{private_name::PrivateElement, property_descriptor::PropertyDescriptor},
        },
    },
    heap::{impl_index_access, indexes::ECMAScriptFunctionIndex, CreateHeapData},
};

/// ### \[\[ThisMode\]\]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThisMode {
    /// `this` refers to the `this` value of a lexically enclosing function.
    Lexical,
    /// The `this` value is used exactly as provided by an invocation.
    Strict,
    /// A `this` value of undefined or null is interpreted as a reference to
    /// the global object, and any other `this` value is first passed to
    /// ToObject.
    Global,
}

/// ### \[\[ConstructorKind\]\] and constructability in one flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructorStatus {
    NonConstructor,
    ConstructorFunction,
    BaseClass,
    DerivedClass,
}

impl ConstructorStatus {
    pub fn is_constructor(self) -> bool {
        self != ConstructorStatus::NonConstructor
    }

    pub fn is_class_constructor(self) -> bool {
        matches!(
            self,
            ConstructorStatus::BaseClass | ConstructorStatus::DerivedClass
        )
    }

    pub fn is_derived_class(self) -> bool {
        self == ConstructorStatus::DerivedClass
    }
}

/// ### [ClassFieldDefinition Records](https://tc39.es/ecma262/#sec-classfielddefinition-records)
#[derive(Debug, Clone, Copy)]
pub(crate) struct ClassFieldDefinitionRecord {
    /// ### \[\[Name\]\]
    pub(crate) name: PropertyKey,
    /// ### \[\[Initializer\]\]
    pub(crate) initializer: Option<ECMAScriptFunction>,
}

/// ### \[\[ECMAScriptCode\]\]
///
/// The body of a source-bearing function: a statement list for ordinary
/// bodies (including arrows, whose concise form is flagged separately), or
/// a bare expression for synthesized class field initializers.
#[derive(Debug, Clone, Copy)]
pub(crate) enum FunctionCode {
    Body(&'static FunctionBody<'static>),
    Expression(&'static Expression<'static>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ECMAScriptFunction(pub(crate) ECMAScriptFunctionIndex);

#[derive(Debug)]
pub struct ECMAScriptFunctionHeapData {
    pub(crate) object_index: Option<OrdinaryObject>,
    pub(crate) length: u8,

    /// ### \[\[Environment\]\]
    pub(crate) environment: EnvironmentIndex,

    /// ### \[\[PrivateEnvironment\]\]
    pub(crate) private_environment: Option<PrivateEnvironmentIndex>,

    /// ### \[\[FormalParameters\]\]
    ///
    /// None for synthesized functions with an empty parameter list.
    pub(crate) formal_parameters: Option<&'static FormalParameters<'static>>,

    /// ### \[\[ECMAScriptCode\]\]
    pub(crate) ecmascript_code: FunctionCode,

    /// Whether the function body is the expression form of an arrow
    /// function's concise body.
    pub(crate) is_concise_arrow_function: bool,

    pub(crate) is_generator: bool,

    /// ### \[\[ConstructorKind\]\] and \[\[IsClassConstructor\]\]
    pub(crate) constructor_status: ConstructorStatus,

    /// ### \[\[Realm\]\]
    pub(crate) realm: RealmIdentifier,

    /// ### \[\[ScriptOrModule\]\]
    pub(crate) script_or_module: Option<ScriptOrModule>,

    /// ### \[\[ThisMode\]\]
    pub(crate) this_mode: ThisMode,

    /// ### \[\[Strict\]\]
    pub(crate) strict: bool,

    /// ### \[\[HomeObject\]\]
    pub(crate) home_object: Option<Object>,

    /// ### \[\[SourceText\]\]
    pub(crate) source_text: Span,

    /// Keeps the AST arena of the function's source alive.
    pub(crate) source_code: SourceCode,

    pub(crate) name: Option<String>,

    /// ### \[\[Fields\]\]
    pub(crate) fields: Vec<ClassFieldDefinitionRecord>,

    /// ### \[\[PrivateMethods\]\]
    pub(crate) private_methods: Vec<PrivateElement>,

    /// ### \[\[ClassFieldInitializerName\]\]
    pub(crate) class_field_initializer_name: Option<PropertyKey>,
}

pub(crate) struct OrdinaryFunctionCreateParams {
    pub function_prototype: Option<Object>,
    pub source_text: Span,
    pub parameters_list: Option<&'static FormalParameters<'static>>,
    pub body: FunctionCode,
    pub is_concise_arrow_function: bool,
    pub is_generator: bool,
    pub lexical_this: bool,
    pub env: EnvironmentIndex,
    pub private_env: Option<PrivateEnvironmentIndex>,
}

impl ECMAScriptFunction {
    pub(crate) const fn get_index(self) -> usize {
        self.0.into_index()
    }

    pub fn is_constructor(self, agent: &Agent) -> bool {
        agent[self].constructor_status.is_constructor()
    }
}

impl From<ECMAScriptFunctionIndex> for ECMAScriptFunction {
    fn from(value: ECMAScriptFunctionIndex) -> Self {
        ECMAScriptFunction(value)
    }
}

impl IntoObject for ECMAScriptFunction {
    fn into_object(self) -> Object {
        Object::ECMAScriptFunction(self)
    }
}

impl IntoValue for ECMAScriptFunction {
    fn into_value(self) -> Value {
        Value::ECMAScriptFunction(self)
    }
}

impl IntoFunction for ECMAScriptFunction {
    fn into_function(self) -> Function {
        Function::ECMAScriptFunction(self)
    }
}

impl From<ECMAScriptFunction> for Object {
    fn from(value: ECMAScriptFunction) -> Self {
        Object::ECMAScriptFunction(value)
    }
}

impl TryFrom<Value> for ECMAScriptFunction {
    type Error = ();

    fn try_from(value: Value) -> Result<Self, ()> {
        match value {
            Value::ECMAScriptFunction(function) => Ok(function),
            _ => Err(()),
        }
    }
}

impl_index_access!(
    ECMAScriptFunction,
    ECMAScriptFunctionHeapData,
    ecmascript_functions,
    "ECMAScriptFunction"
);

impl InternalSlots for ECMAScriptFunction {
    const DEFAULT_PROTOTYPE: ProtoIntrinsics = ProtoIntrinsics::Function;

    fn get_backing_object(self, agent: &Agent) -> Option<OrdinaryObject> {
        agent[self].object_index
    }

    fn set_backing_object(self, agent: &mut Agent, backing_object: OrdinaryObject) {
        assert!(agent[self].object_index.replace(backing_object).is_none());
    }

    fn internal_prototype(self, agent: &Agent) -> Option<Object> {
        if let Some(backing_object) = self.get_backing_object(agent) {
            agent[backing_object].prototype
        } else {
            let realm = agent[self].realm;
            let intrinsics = agent.get_realm(realm).intrinsics();
            if agent[self].is_generator {
                intrinsics.get("%GeneratorFunction.prototype%")
            } else {
                Some(intrinsics.function_prototype())
            }
        }
    }
}

impl InternalMethods for ECMAScriptFunction {
    /// ### [10.2.1 \[\[Call\]\] ( thisArgument, argumentsList )](https://tc39.es/ecma262/#sec-ecmascript-function-objects-call-thisargument-argumentslist)
    fn internal_call(
        self,
        agent: &mut Agent,
        this_argument: Value,
        arguments_list: ArgumentsList,
    ) -> JsResult<Value> {
        // 1. Let callerContext be the running execution context.
        let _ = agent.running_execution_context();
        // 2. Let calleeContext be PrepareForOrdinaryCall(F, undefined).
        let local_env = prepare_for_ordinary_call(agent, self, None);
        // 3. Assert: calleeContext is now the running execution context.

        // 4. If F.[[IsClassConstructor]] is true, then
        if agent[self].constructor_status.is_class_constructor() {
            // a. Let error be a newly created TypeError object.
            let error = agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "class constructors must be invoked with 'new'",
            );
            // b. NOTE: error is created in calleeContext with F's associated
            //    Realm Record.
            // c. Remove calleeContext from the execution context stack.
            agent.pop_execution_context();
            // d. Return ThrowCompletion(error).
            return Err(error);
        }

        // 5. Perform OrdinaryCallBindThis(F, calleeContext, thisArgument).
        ordinary_call_bind_this(agent, self, local_env, this_argument);

        // 6. Let result be Completion(OrdinaryCallEvaluateBody(F,
        //    argumentsList)).
        let result = ordinary_call_evaluate_body(agent, self, arguments_list);

        // 7. Remove calleeContext from the execution context stack and
        //    restore callerContext as the running execution context.
        agent.pop_execution_context();

        // 8. If result is a return completion, return result.[[Value]].
        // 9. ReturnIfAbrupt(result).
        // 10. Return undefined: the body evaluation already collapses a
        //     normal completion into undefined.
        result
    }

    /// ### [10.2.2 \[\[Construct\]\] ( argumentsList, newTarget )](https://tc39.es/ecma262/#sec-ecmascript-function-objects-construct-argumentslist-newtarget)
    fn internal_construct(
        self,
        agent: &mut Agent,
        arguments_list: ArgumentsList,
        new_target: Function,
    ) -> JsResult<Object> {
        // 1. Let callerContext be the running execution context.
        // 2. Let kind be F.[[ConstructorKind]].
        let is_base = !agent[self].constructor_status.is_derived_class();

        // 3. If kind is BASE, then
        let this_argument = if is_base {
            // a. Let thisArgument be ? OrdinaryCreateFromConstructor(
            //    newTarget, "%Object.prototype%").
            Some(ordinary_create_from_constructor(
                agent,
                new_target,
                ProtoIntrinsics::Object,
            )?)
        } else {
            None
        };

        // 4. Let calleeContext be PrepareForOrdinaryCall(F, newTarget).
        let constructor_env =
            prepare_for_ordinary_call(agent, self, Some(new_target.into_object()));
        // 5. Assert: calleeContext is now the running execution context.

        if let Some(this_argument) = this_argument {
            // 6. If kind is BASE, then
            // a. Perform OrdinaryCallBindThis(F, calleeContext,
            //    thisArgument).
            ordinary_call_bind_this(agent, self, constructor_env, this_argument.into_value());
            // b. Let initializeResult be Completion(
            //    InitializeInstanceElements(thisArgument, F)).
            let initialize_result = initialize_instance_elements(
                agent,
                this_argument.into_object(),
                self.into_function(),
            );
            // c. If initializeResult is an abrupt completion, then
            if let Err(err) = initialize_result {
                // i. Remove calleeContext from the execution context stack.
                agent.pop_execution_context();
                // ii. Return ? initializeResult.
                return Err(err);
            }
        }

        // 7. Let constructorEnv be the LexicalEnvironment of calleeContext.
        // 8. Let result be Completion(OrdinaryCallEvaluateBody(F,
        //    argumentsList)).
        let result = ordinary_call_evaluate_body(agent, self, arguments_list);

        // 9. Remove calleeContext from the execution context stack and
        //    restore callerContext as the running execution context.
        agent.pop_execution_context();

        match result {
            // 10. If result is a return completion, then
            Ok(value) => {
                // a. If result.[[Value]] is an Object, return
                //    result.[[Value]].
                if let Ok(object) = Object::try_from(value) {
                    return Ok(object);
                }
                // b. If kind is BASE, return thisArgument.
                if let Some(this_argument) = this_argument {
                    return Ok(this_argument.into_object());
                }
                // c. If result.[[Value]] is not undefined, throw a
                //    TypeError exception.
                if !value.is_undefined() {
                    return Err(agent.throw_exception_with_static_message(
                        ExceptionType::TypeError,
                        "derived class constructor returned an invalid value",
                    ));
                }
            }
            // 11. Else, ReturnIfAbrupt(result).
            Err(err) => return Err(err),
        }

        // 12. Let thisBinding be ? constructorEnv.GetThisBinding().
        let this_binding = constructor_env.get_this_binding(agent)?;
        // 13. Assert: thisBinding is an Object.
        // 14. Return thisBinding.
        Ok(Object::try_from(this_binding).unwrap())
    }
}

/// ### [10.2.1.1 PrepareForOrdinaryCall ( F, newTarget )](https://tc39.es/ecma262/#sec-prepareforordinarycall)
pub(crate) fn prepare_for_ordinary_call(
    agent: &mut Agent,
    f: ECMAScriptFunction,
    new_target: Option<Object>,
) -> FunctionEnvironmentIndex {
    // 1. Let callerContext be the running execution context.
    // 2. Let calleeContext be a new ECMAScript code execution context.
    // 8. Let localEnv be NewFunctionEnvironment(F, newTarget).
    let local_env = new_function_environment(agent, f, new_target);
    let function_data = &agent[f];
    let callee_context = ExecutionContext {
        ecmascript_code: Some(ECMAScriptCodeEvaluationState {
            // 9. Set the LexicalEnvironment of calleeContext to localEnv.
            lexical_environment: EnvironmentIndex::Function(local_env),
            // 10. Set the VariableEnvironment of calleeContext to localEnv.
            variable_environment: EnvironmentIndex::Function(local_env),
            // 11. Set the PrivateEnvironment of calleeContext to
            //     F.[[PrivateEnvironment]].
            private_environment: function_data.private_environment,
            is_strict_mode: function_data.strict,
            source_code: function_data.source_code,
        }),
        // 3. Set the Function of calleeContext to F.
        function: Some(f.into_function()),
        // 4. Let calleeRealm be F.[[Realm]].
        // 5. Set the Realm of calleeContext to calleeRealm.
        realm: function_data.realm,
        // 6. Set the ScriptOrModule of calleeContext to
        //    F.[[ScriptOrModule]].
        script_or_module: function_data.script_or_module,
    };
    // 12. Push calleeContext onto the execution context stack; calleeContext
    //     is now the running execution context.
    agent.push_execution_context(callee_context);
    // 13. NOTE: Any exception objects produced after this point are
    //     associated with calleeRealm.
    // 14. Return calleeContext.
    local_env
}

/// ### [10.2.1.2 OrdinaryCallBindThis ( F, calleeContext, thisArgument )](https://tc39.es/ecma262/#sec-ordinarycallbindthis)
pub(crate) fn ordinary_call_bind_this(
    agent: &mut Agent,
    f: ECMAScriptFunction,
    local_env: FunctionEnvironmentIndex,
    this_argument: Value,
) {
    // 1. Let thisMode be F.[[ThisMode]].
    let this_mode = agent[f].this_mode;

    // 2. If thisMode is LEXICAL, return UNUSED.
    if this_mode == ThisMode::Lexical {
        return;
    }

    // 3. Let calleeRealm be F.[[Realm]].
    let callee_realm = agent[f].realm;
    // 4. Let localEnv be the LexicalEnvironment of calleeContext.

    // 5. If thisMode is STRICT, then let thisValue be thisArgument.
    let this_value = if this_mode == ThisMode::Strict {
        this_argument
    } else {
        // 6. Else,
        // a. If thisArgument is either undefined or null, then
        if this_argument.is_nullish() {
            // i. Let globalEnv be calleeRealm.[[GlobalEnv]].
            let global_env = agent.get_realm(callee_realm).global_env.unwrap();
            // iii. Let thisValue be globalEnv.[[GlobalThisValue]].
            global_env.get_this_binding(agent).into_value()
        } else {
            // b. Else,
            // i. Let thisValue be ! ToObject(thisArgument).
            // ii. NOTE: ToObject produces wrapper objects using
            //     calleeRealm.
            to_object(agent, this_argument).unwrap().into_value()
        }
    };

    // 7. Assert: localEnv is a Function Environment Record.
    // 8. Assert: The next step never returns an abrupt completion because
    //    localEnv.[[ThisBindingStatus]] is not INITIALIZED.
    debug_assert!(local_env.get_this_binding_status(agent) != ThisBindingStatus::Initialized);

    // 9. Perform ! localEnv.BindThisValue(thisValue).
    local_env.bind_this_value(agent, this_value).unwrap();

    // 10. Return UNUSED.
}

/// ### [10.2.1.4 OrdinaryCallEvaluateBody ( F, argumentsList )](https://tc39.es/ecma262/#sec-ordinarycallevaluatebody)
pub(crate) fn ordinary_call_evaluate_body(
    agent: &mut Agent,
    f: ECMAScriptFunction,
    arguments_list: ArgumentsList,
) -> JsResult<Value> {
    // 1. Return ? EvaluateBody of the parsed code that is
    //    F.[[ECMAScriptCode]] with arguments F and argumentsList.
    if agent[f].is_generator {
        evaluate_generator_body(agent, f, arguments_list)
    } else {
        evaluate_function_body(agent, f, arguments_list)
    }
}

/// ### [10.2.3 OrdinaryFunctionCreate ( functionPrototype, sourceText, ParameterList, Body, thisMode, env, privateEnv )](https://tc39.es/ecma262/#sec-ordinaryfunctioncreate)
pub(crate) fn ordinary_function_create(
    agent: &mut Agent,
    params: OrdinaryFunctionCreateParams,
) -> ECMAScriptFunction {
    // 1. Let internalSlotsList be the internal slots listed in Table 30.
    // 2. Let F be OrdinaryObjectCreate(functionPrototype,
    //    internalSlotsList).
    let function_prototype = params.function_prototype.unwrap_or_else(|| {
        agent.current_realm().intrinsics().function_prototype()
    });

    // 9. Let Strict be IsStrict(Body).
    let body_is_strict = match params.body {
        FunctionCode::Body(body) => body.has_use_strict_directive(),
        FunctionCode::Expression(_) => false,
    };
    let strict = agent.is_strict_mode() || body_is_strict;

    // 11. If thisMode is LEXICAL-THIS, set F.[[ThisMode]] to LEXICAL.
    let this_mode = if params.lexical_this {
        ThisMode::Lexical
    } else if strict {
        // 12. Else if Strict is true, set F.[[ThisMode]] to STRICT.
        ThisMode::Strict
    } else {
        // 13. Else, set F.[[ThisMode]] to GLOBAL.
        ThisMode::Global
    };

    // SetFunctionLength(F, len): the expected argument count is the number
    // of parameters to the left of the first one with a default value or a
    // rest parameter.
    let length = params.parameters_list.map_or(0, |parameters| {
        parameters
            .items
            .iter()
            .take_while(|parameter| {
                !matches!(
                    parameter.pattern.kind,
                    oxc_ast::ast::BindingPatternKind::AssignmentPattern(_)
                )
            })
            .count()
    });

    let backing_data = {
        let mut data = ObjectHeapData::new(Some(function_prototype));
        let length_key = PropertyKey::from_str(agent, "length");
        data.storage.set(
            length_key,
            PropertyData::Data {
                value: Value::Number(length as f64),
                writable: false,
                enumerable: false,
                configurable: true,
            },
        );
        data
    };
    let backing_object = agent.heap.create(backing_data);

    // 30. Return F.
    agent.heap.create(ECMAScriptFunctionHeapData {
        object_index: Some(backing_object),
        length: length as u8,
        // 20. Set F.[[Environment]] to env.
        environment: params.env,
        // 21. Set F.[[PrivateEnvironment]] to privateEnv.
        private_environment: params.private_env,
        // 4. Set F.[[FormalParameters]] to ParameterList.
        formal_parameters: params.parameters_list,
        // 5. Set F.[[ECMAScriptCode]] to Body.
        ecmascript_code: params.body,
        is_concise_arrow_function: params.is_concise_arrow_function,
        is_generator: params.is_generator,
        // 25. Set F.[[IsClassConstructor]] to false.
        constructor_status: ConstructorStatus::NonConstructor,
        // 22. Set F.[[ScriptOrModule]] to GetActiveScriptOrModule().
        script_or_module: get_active_script_or_module(agent),
        // 23. Set F.[[Realm]] to the current Realm Record.
        realm: agent.current_realm_id(),
        this_mode,
        // 10. Set F.[[Strict]] to Strict.
        strict,
        // 26. Set F.[[HomeObject]] to undefined.
        home_object: None,
        // 3. Set F.[[SourceText]] to sourceText.
        source_text: params.source_text,
        source_code: agent
            .running_execution_context()
            .ecmascript_code
            .as_ref()
            .unwrap()
            .source_code,
        name: None,
        // 27. Set F.[[Fields]] to a new empty List.
        fields: Vec::new(),
        // 28. Set F.[[PrivateMethods]] to a new empty List.
        private_methods: Vec::new(),
        // 29. Set F.[[ClassFieldInitializerName]] to EMPTY.
        class_field_initializer_name: None,
    })
}

/// ### [10.2.5 MakeConstructor ( F \[ , writablePrototype \[ , prototype \] \] )](https://tc39.es/ecma262/#sec-makeconstructor)
pub(crate) fn make_constructor(
    agent: &mut Agent,
    function: ECMAScriptFunction,
    writable_prototype: Option<bool>,
    prototype: Option<OrdinaryObject>,
) {
    // 1. If F is an ECMAScript function object, then
    // a. Assert: IsConstructor(F) is false.
    debug_assert!(!function.is_constructor(agent));
    // b. Assert: F is an extensible object that does not have a "prototype"
    //    own property.
    // 3. Set F.[[ConstructorKind]] to BASE.
    agent[function].constructor_status = ConstructorStatus::ConstructorFunction;

    // 4. If writablePrototype is not present, set writablePrototype to
    //    true.
    let writable_prototype = writable_prototype.unwrap_or(true);

    // 5. If prototype is not present, then
    let prototype = prototype.unwrap_or_else(|| {
        // a. Set prototype to OrdinaryObjectCreate(%Object.prototype%).
        let object_prototype = agent.current_realm().intrinsics().object_prototype();
        let prototype = ordinary_object_create(agent, Some(object_prototype));
        // b. Perform ! DefinePropertyOrThrow(prototype, "constructor",
        //    PropertyDescriptor { [[Value]]: F, [[Writable]]:
        //    writablePrototype, [[Enumerable]]: false, [[Configurable]]:
        //    true }).
        let constructor_key = PropertyKey::from_str(agent, "constructor");
        agent[prototype].storage.set(
            constructor_key,
            PropertyData::Data {
                value: function.into_value(),
                writable: writable_prototype,
                enumerable: false,
                configurable: true,
            },
        );
        prototype
    });

    // 6. Perform ! DefinePropertyOrThrow(F, "prototype",
    //    PropertyDescriptor { [[Value]]: prototype, [[Writable]]:
    //    writablePrototype, [[Enumerable]]: false, [[Configurable]]:
    //    false }).
    let prototype_key = PropertyKey::from_str(agent, "prototype");
    let backing_object = function.get_or_create_backing_object(agent);
    agent[backing_object].storage.set(
        prototype_key,
        PropertyData::Data {
            value: prototype.into_value(),
            writable: writable_prototype,
            enumerable: false,
            configurable: false,
        },
    );

    // 7. Return UNUSED.
}

/// ### [10.2.7 MakeMethod ( F, homeObject )](https://tc39.es/ecma262/#sec-makemethod)
pub(crate) fn make_method(agent: &mut Agent, f: ECMAScriptFunction, home_object: Object) {
    // 1. Set F.[[HomeObject]] to homeObject.
    agent[f].home_object = Some(home_object);
    // 2. Return UNUSED.
}

/// ### [10.2.9 SetFunctionName ( F, name \[ , prefix \] )](https://tc39.es/ecma262/#sec-setfunctionname)
pub(crate) fn set_function_name(
    agent: &mut Agent,
    function: impl IntoFunction,
    name: PropertyKey,
    prefix: Option<&str>,
) {
    // 2. If name is a Symbol, then
    let name_string = match name {
        PropertyKey::Symbol(symbol) => {
            // a. Let description be name's [[Description]] value.
            // b. If description is undefined, set name to the empty String.
            // c. Else, set name to the string-concatenation of "[",
            //    description, and "]".
            match agent[symbol].descriptor {
                Some(description) => {
                    let text = format!("[{}]", description.as_str(agent));
                    String::from_string(agent, text)
                }
                None => String::EMPTY_STRING,
            }
        }
        PropertyKey::String(name) => name,
        PropertyKey::Integer(index) => String::from_string(agent, index.to_string()),
        // 3. Else if name is a Private Name, then
        // a. Set name to name.[[Description]] prefixed with "#".
        PropertyKey::PrivateName(private_name) => {
            let description = private_name
                .get_description(agent)
                .map_or_else(std::string::String::new, |d| d.as_str(agent).to_owned());
            String::from_string(agent, format!("#{}", description))
        }
    };

    // 5. If prefix is present, then set name to the string-concatenation of
    //    prefix, the code unit 0x0020 (SPACE), and name.
    let name_string = if let Some(prefix) = prefix {
        let text = format!("{} {}", prefix, name_string.as_str(agent));
        String::from_string(agent, text)
    } else {
        name_string
    };

    // 6. Perform ! DefinePropertyOrThrow(F, "name", PropertyDescriptor {
    //    [[Value]]: name, [[Writable]]: false, [[Enumerable]]: false,
    //    [[Configurable]]: true }).
    let function = function.into_function();
    if let Function::ECMAScriptFunction(f) = function {
        debug_assert!(agent[f].name.is_none());
        agent[f].name = Some(name_string);
    }
    let name_key = PropertyKey::from_str(agent, "name");
    let backing_object = function.get_or_create_backing_object(agent);
    agent[backing_object].storage.set(
        name_key,
        PropertyData::Data {
            value: name_string.into_value(),
            writable: false,
            enumerable: false,
            configurable: true,
        },
    );
}

/// Install an explicit "prototype" slot value on a function, used by
/// generator functions whose prototype property is not a constructor
/// prototype.
pub(crate) fn define_prototype_property(
    agent: &mut Agent,
    function: ECMAScriptFunction,
    prototype: Object,
) {
    let prototype_key = PropertyKey::from_str(agent, "prototype");
    define_property_or_throw(
        agent,
        function,
        prototype_key,
        PropertyDescriptor {
            value: Some(prototype.into_value()),
            writable: Some(true),
            get: None,
            set: None,
            enumerable: Some(false),
            configurable: Some(false),
        },
    )
    .unwrap();
}
