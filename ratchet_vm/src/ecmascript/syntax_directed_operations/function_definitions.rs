use oxc_ast::ast;

use crate::{
    ecmascript::{
        builtins::{
            builtin_function::ArgumentsList,
            ecmascript_function::{
                make_constructor, ordinary_function_create, set_function_name,
                ECMAScriptFunction, FunctionCode, OrdinaryFunctionCreateParams,
            },
            generator_objects::{GeneratorHeapData, GeneratorState},
            ordinary::{get_prototype_from_constructor, ordinary_object_create},
        },
        execution::{
            agent::{Agent, JsResult},
            environments::{
                new_declarative_environment, EnvironmentIndex, PrivateEnvironmentIndex,
            },
            realm::ProtoIntrinsics,
        },
        syntax_directed_operations::class_definitions::class_definition_evaluation,
        types::{
            language::{
                function::IntoFunction,
                object::{
                    data::ObjectHeapData, internal_slots::InternalSlots,
                    property_key::PropertyKey, IntoObject,
                },
                string::String,
                value::{IntoValue, Value},
            },
        },
    },
    engine::{
        function_declaration_instantiation::function_declaration_instantiation,
        vm::{BodyKind, Vm},
    },
    heap::CreateHeapData,
};

/// ### [15.2.4 Runtime Semantics: InstantiateOrdinaryFunctionObject](https://tc39.es/ecma262/#sec-runtime-semantics-instantiateordinaryfunctionobject)
/// and its generator counterpart; used for hoisted function declarations.
pub(crate) fn instantiate_function_object(
    agent: &mut Agent,
    function: &'static ast::Function<'static>,
    env: EnvironmentIndex,
    private_env: Option<PrivateEnvironmentIndex>,
) -> ECMAScriptFunction {
    // 1. Let name be StringValue of BindingIdentifier; "default" for
    //    anonymous default exports.
    let name = if let Some(id) = &function.id {
        PropertyKey::from_str(agent, id.name.as_str())
    } else {
        PropertyKey::String(String::from_str(agent, "default"))
    };

    // 2.-3. Let F be OrdinaryFunctionCreate(%Function.prototype%,
    //       sourceText, FormalParameters, FunctionBody, NON-LEXICAL-THIS,
    //       env, privateEnv); perform SetFunctionName(F, name).
    let params = OrdinaryFunctionCreateParams {
        function_prototype: None,
        source_text: function.span,
        parameters_list: Some(&function.params),
        body: FunctionCode::Body(function.body.as_deref().unwrap()),
        is_concise_arrow_function: false,
        is_generator: function.generator,
        lexical_this: false,
        env,
        private_env,
    };
    let f = ordinary_function_create(agent, params);
    set_function_name(agent, f, name, None);

    if !function.generator {
        // 4. Perform MakeConstructor(F).
        make_constructor(agent, f, None, None);
    } else {
        // GeneratorDeclaration: Let prototype be
        // OrdinaryObjectCreate(%GeneratorFunction.prototype.prototype%);
        // perform ! DefinePropertyOrThrow(F, "prototype", ...).
        let generator_prototype = agent.current_realm().intrinsics().generator_prototype();
        let prototype = ordinary_object_create(agent, Some(generator_prototype));
        crate::ecmascript::builtins::ecmascript_function::define_prototype_property(
            agent,
            f,
            prototype.into_object(),
        );
    }

    // 5. Return F.
    f
}

/// ### [15.2.5 Runtime Semantics: InstantiateOrdinaryFunctionExpression](https://tc39.es/ecma262/#sec-runtime-semantics-instantiateordinaryfunctionexpression)
pub(crate) fn instantiate_ordinary_function_expression(
    agent: &mut Agent,
    function: &'static ast::Function<'static>,
    name: Option<PropertyKey>,
) -> ECMAScriptFunction {
    let lexical_environment = agent.current_lexical_environment();
    let private_environment = agent.current_private_environment();

    let (name, env, named_binding) = if let Some(id) = &function.id {
        // FunctionExpression : function BindingIdentifier ( ... ) { ... }
        // 1. Assert: name is not present.
        debug_assert!(name.is_none());
        // 2. Set name to StringValue of BindingIdentifier.
        let binding_name = String::from_str(agent, id.name.as_str());
        // 3. Let funcEnv be NewDeclarativeEnvironment(env).
        let func_env = new_declarative_environment(agent, Some(lexical_environment));
        // 4. Perform ! funcEnv.CreateImmutableBinding(name, false).
        func_env.create_immutable_binding(agent, binding_name, false);
        (
            PropertyKey::String(binding_name),
            EnvironmentIndex::Declarative(func_env),
            Some((func_env, binding_name)),
        )
    } else {
        // 1. If name is not present, set name to "".
        let name = name.unwrap_or(PropertyKey::String(String::EMPTY_STRING));
        (name, lexical_environment, None)
    };

    // 5. Let closure be OrdinaryFunctionCreate(...).
    let params = OrdinaryFunctionCreateParams {
        function_prototype: None,
        source_text: function.span,
        parameters_list: Some(&function.params),
        body: FunctionCode::Body(function.body.as_deref().unwrap()),
        is_concise_arrow_function: false,
        is_generator: function.generator,
        lexical_this: false,
        env,
        private_env: private_environment,
    };
    let closure = ordinary_function_create(agent, params);

    // 6. Perform SetFunctionName(closure, name).
    set_function_name(agent, closure, name, None);

    // 7. Perform MakeConstructor(closure) (generators get their prototype
    //    object instead).
    if !function.generator {
        make_constructor(agent, closure, None, None);
    } else {
        let generator_prototype = agent.current_realm().intrinsics().generator_prototype();
        let prototype = ordinary_object_create(agent, Some(generator_prototype));
        crate::ecmascript::builtins::ecmascript_function::define_prototype_property(
            agent,
            closure,
            prototype.into_object(),
        );
    }

    // 8. Perform ! funcEnv.InitializeBinding(name, closure).
    if let Some((func_env, binding_name)) = named_binding {
        func_env.initialize_binding(agent, binding_name, closure.into_value());
    }

    // 9. Return closure.
    closure
}

/// ### [15.3.4 Runtime Semantics: InstantiateArrowFunctionExpression](https://tc39.es/ecma262/#sec-runtime-semantics-instantiatearrowfunctionexpression)
pub(crate) fn instantiate_arrow_function_expression(
    agent: &mut Agent,
    arrow: &'static ast::ArrowFunctionExpression<'static>,
    name: Option<PropertyKey>,
) -> ECMAScriptFunction {
    // 1. If name is not present, set name to "".
    let name = name.unwrap_or(PropertyKey::String(String::EMPTY_STRING));
    let env = agent.current_lexical_environment();
    let private_env = agent.current_private_environment();

    // 2.-4. Let closure be OrdinaryFunctionCreate(%Function.prototype%,
    //       sourceText, ArrowParameters, ConciseBody, LEXICAL-THIS, env,
    //       privateEnv); SetFunctionName(closure, name).
    let params = OrdinaryFunctionCreateParams {
        function_prototype: None,
        source_text: arrow.span,
        parameters_list: Some(&arrow.params),
        body: FunctionCode::Body(&arrow.body),
        is_concise_arrow_function: arrow.expression,
        is_generator: false,
        lexical_this: true,
        env,
        private_env,
    };
    let closure = ordinary_function_create(agent, params);
    set_function_name(agent, closure, name, None);

    // 5. Return closure.
    closure
}

/// Whether an expression is an anonymous function definition subject to
/// NamedEvaluation.
pub(crate) fn is_anonymous_function_definition(expression: &ast::Expression) -> bool {
    match expression {
        ast::Expression::FunctionExpression(function) => function.id.is_none(),
        ast::Expression::ArrowFunctionExpression(_) => true,
        ast::Expression::ClassExpression(class) => class.id.is_none(),
        ast::Expression::ParenthesizedExpression(inner) => {
            is_anonymous_function_definition(&inner.expression)
        }
        _ => false,
    }
}

/// ### [8.6.5 Runtime Semantics: NamedEvaluation](https://tc39.es/ecma262/#sec-runtime-semantics-namedevaluation)
pub(crate) fn named_evaluation(
    agent: &mut Agent,
    expression: &'static ast::Expression<'static>,
    name: PropertyKey,
) -> JsResult<Value> {
    match expression {
        ast::Expression::FunctionExpression(function) => Ok(
            instantiate_ordinary_function_expression(agent, function, Some(name)).into_value(),
        ),
        ast::Expression::ArrowFunctionExpression(arrow) => Ok(
            instantiate_arrow_function_expression(agent, arrow, Some(name)).into_value(),
        ),
        ast::Expression::ClassExpression(class) => {
            class_definition_evaluation(agent, class, Some(name)).map(|f| f.into_value())
        }
        ast::Expression::ParenthesizedExpression(inner) => {
            named_evaluation(agent, &inner.expression, name)
        }
        _ => unreachable!("NamedEvaluation of a non-anonymous expression"),
    }
}

/// ### [10.2.1.3 Runtime Semantics: EvaluateBody](https://tc39.es/ecma262/#sec-runtime-semantics-evaluatebody)
/// for ordinary function bodies: FunctionDeclarationInstantiation followed
/// by the body on a fresh machine.
pub(crate) fn evaluate_function_body(
    agent: &mut Agent,
    function_object: ECMAScriptFunction,
    arguments_list: ArgumentsList,
) -> JsResult<Value> {
    // 1. Perform ? FunctionDeclarationInstantiation(functionObject,
    //    argumentsList).
    let mut vm = Vm::for_function_body(function_object);
    function_declaration_instantiation(agent, &mut vm, function_object, arguments_list)?;

    // 2. Return ? Evaluation of FunctionStatementList.
    vm.run(agent).into_js_result()
}

/// ### [15.5.2 Runtime Semantics: EvaluateGeneratorBody](https://tc39.es/ecma262/#sec-runtime-semantics-evaluategeneratorbody)
pub(crate) fn evaluate_generator_body(
    agent: &mut Agent,
    function_object: ECMAScriptFunction,
    arguments_list: ArgumentsList,
) -> JsResult<Value> {
    // 1. Perform ? FunctionDeclarationInstantiation(functionObject,
    //    argumentsList). Parameter binding runs eagerly, before the
    //    generator object exists.
    let mut fdi_vm = Vm::new(BodyKind::Function);
    function_declaration_instantiation(agent, &mut fdi_vm, function_object, arguments_list)?;
    fdi_vm.run(agent).into_js_result()?;

    // 2. Let G be ? OrdinaryCreateFromConstructor(functionObject,
    //    "%GeneratorFunction.prototype.prototype%", « [[GeneratorState]],
    //    [[GeneratorContext]], [[GeneratorBrand]] »).
    let prototype = get_prototype_from_constructor(
        agent,
        function_object.into_function(),
        ProtoIntrinsics::Generator,
    )?;
    let backing_object = agent.heap.create(ObjectHeapData::new(prototype));

    // 3. Set G.[[GeneratorBrand]] to EMPTY.
    // 4. Perform GeneratorStart(G, FunctionBody): the body's machine is
    //    built but not stepped; its context is the running execution
    //    context, which the generator detaches and owns.
    let body_vm = Vm::for_function_body(function_object);
    let generator = agent.heap.create(GeneratorHeapData {
        object_index: Some(backing_object),
        generator_state: Some(GeneratorState::SuspendedStart {
            vm: body_vm.suspend(),
            execution_context: agent.running_execution_context().clone(),
        }),
    });

    // 5. Return Completion Record { [[Type]]: RETURN, [[Value]]: G }.
    Ok(generator.into_value())
}
