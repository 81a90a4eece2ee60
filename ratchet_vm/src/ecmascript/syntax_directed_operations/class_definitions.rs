use oxc_ast::ast;

use crate::{
    ecmascript::{
        abstract_operations::{
            operations_on_objects::{
                define_field, define_property_or_throw, get, private_method_or_accessor_add,
            },
            testing_and_comparison::is_constructor,
            type_conversion::to_property_key,
        },
        builtins::{
            builtin_constructor::{BuiltinConstructorFunction, BuiltinConstructorHeapData},
            ecmascript_function::{
                make_method, ordinary_function_create, set_function_name,
                ClassFieldDefinitionRecord, ConstructorStatus, ECMAScriptFunction, FunctionCode,
                OrdinaryFunctionCreateParams,
            },
            ordinary::ordinary_object_create,
        },
        execution::{
            agent::{Agent, ExceptionType, JsResult},
            environments::{
                new_class_static_element_environment, new_declarative_environment,
                new_private_environment, EnvironmentIndex, PrivateEnvironmentIndex,
            },
            execution_context::{ECMAScriptCodeEvaluationState, ExecutionContext},
        },
        syntax_directed_operations::{
            function_definitions::instantiate_function_object,
            scope_analysis::{
                top_level_lexically_scoped_declarations, top_level_var_scoped_declarations,
                VarScopedDeclaration,
            },
        },
        types::{
            language::{
                function::{Function, IntoFunction},
                object::{
                    data::ObjectHeapData,
                    internal_slots::InternalSlots,
                    property_key::PropertyKey,
                    property_storage::PropertyData,
                    IntoObject, Object,
                },
                string::String,
                value::{IntoValue, Value},
            },
            spec::private_name::{PrivateElement, PrivateElementKind},
        },
    },
    engine::vm::Vm,
    heap::CreateHeapData,
};

/// The flavour of a method being defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MethodKind {
    Normal,
    Get,
    Set,
}

/// ### [15.7.14 Runtime Semantics: ClassDefinitionEvaluation](https://tc39.es/ecma262/#sec-runtime-semantics-classdefinitionevaluation)
///
/// Evaluates a class declaration or expression to its constructor function.
/// `name` supplies the NamedEvaluation name for anonymous class
/// expressions.
pub(crate) fn class_definition_evaluation(
    agent: &mut Agent,
    class: &'static ast::Class<'static>,
    name: Option<PropertyKey>,
) -> JsResult<Function> {
    // ClassDefinitionEvaluation always runs as strict mode code, whatever
    // the surrounding script is.
    let outer_strict = agent.is_strict_mode();
    agent.set_current_strict_mode(true);
    let result = class_definition_evaluation_inner(agent, class, name);
    agent.set_current_strict_mode(outer_strict);
    result
}

fn class_definition_evaluation_inner(
    agent: &mut Agent,
    class: &'static ast::Class<'static>,
    name: Option<PropertyKey>,
) -> JsResult<Function> {
    // 1. Let env be the LexicalEnvironment of the running execution
    //    context.
    let outer_env = agent.current_lexical_environment();
    let outer_variable_env = agent.current_variable_environment();

    // 2. Let classEnv be NewDeclarativeEnvironment(env).
    let class_env = new_declarative_environment(agent, Some(outer_env));

    // 3. If classBinding is not undefined, then
    //    a. Perform ! classEnv.CreateImmutableBinding(classBinding, true).
    let class_binding = class.id.as_ref().map(|id| {
        let binding = String::from_str(agent, id.name.as_str());
        class_env.create_immutable_binding(agent, binding, true);
        binding
    });

    let class_name = class_binding.map(PropertyKey::String).or(name).unwrap_or(
        PropertyKey::String(String::EMPTY_STRING),
    );

    // 4. Let outerPrivateEnvironment be the running execution context's
    //    PrivateEnvironment.
    let outer_private_environment = agent.current_private_environment();

    // 5. Let classPrivateEnvironment be
    //    NewPrivateEnvironment(outerPrivateEnvironment).
    let class_private_environment =
        new_private_environment(agent, outer_private_environment);

    // 6. If ClassBody is present, for each String dn of the
    //    PrivateBoundIdentifiers of ClassBody: perform
    //    AddPrivateName(classPrivateEnvironment, dn).
    declare_private_names(agent, class, class_private_environment)?;

    // 7.-8. Resolve the class heritage.
    let (proto_parent, constructor_parent) = if let Some(super_class) = &class.super_class {
        // a. Set the running execution context's LexicalEnvironment to
        //    classEnv.
        agent.set_current_lexical_environment(EnvironmentIndex::Declarative(class_env));
        // c. Let superclassRef be Completion(Evaluation of ClassHeritage).
        let superclass = Vm::evaluate_expression(agent, super_class);
        // d. Set the running execution context's LexicalEnvironment to env.
        agent.set_current_lexical_environment(outer_env);
        // e. Let superclass be ? GetValue(? superclassRef).
        let superclass = superclass?;

        if superclass.is_null() {
            // f. If superclass is null, then protoParent = null,
            //    constructorParent = %Function.prototype%.
            (None, agent.current_realm().intrinsics().function_prototype())
        } else if let Some(superclass) = is_constructor(agent, superclass) {
            // h. Else: let protoParent be ? Get(superclass, "prototype").
            let prototype_key = PropertyKey::from_str(agent, "prototype");
            let proto_parent = get(agent, superclass.into_object(), prototype_key)?;
            let proto_parent = match proto_parent {
                Value::Null => None,
                other => match Object::try_from(other) {
                    Ok(object) => Some(object),
                    // i. If protoParent is not an Object and protoParent
                    //    is not null, throw a TypeError exception.
                    Err(()) => {
                        return Err(agent.throw_exception_with_static_message(
                            ExceptionType::TypeError,
                            "Class extends value does not have valid prototype property",
                        ));
                    }
                },
            };
            // j. Let constructorParent be superclass.
            (proto_parent, superclass.into_object())
        } else {
            // g. Else if IsConstructor(superclass) is false, throw a
            //    TypeError exception.
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Class extends value is not a constructor",
            ));
        }
    } else {
        // 7. If ClassHeritage is not present: protoParent =
        //    %Object.prototype%, constructorParent = %Function.prototype%.
        let intrinsics = agent.current_realm().intrinsics();
        (
            Some(intrinsics.object_prototype()),
            intrinsics.function_prototype(),
        )
    };

    // 9. Let proto be OrdinaryObjectCreate(protoParent).
    let proto = ordinary_object_create(agent, proto_parent);

    // 10. If ClassBody is not present, let constructor be EMPTY; else let
    //     constructor be the ConstructorMethod of ClassBody.
    let constructor_method = class.body.body.iter().find_map(|element| match element {
        ast::ClassElement::MethodDefinition(method)
            if method.kind == ast::MethodDefinitionKind::Constructor =>
        {
            Some(&**method)
        }
        _ => None,
    });

    // 11. Set the running execution context's LexicalEnvironment to
    //     classEnv and PrivateEnvironment to classPrivateEnvironment.
    agent.set_current_lexical_environment(EnvironmentIndex::Declarative(class_env));
    agent.set_current_private_environment(Some(class_private_environment));

    let is_derived = class.super_class.is_some();

    // 12.-14. Create the constructor function.
    let f: Function = if let Some(constructor_method) = constructor_method {
        // a. Let constructorInfo be ! DefineMethod of constructor with
        //    arguments proto and constructorParent.
        let params = OrdinaryFunctionCreateParams {
            function_prototype: Some(constructor_parent),
            source_text: constructor_method.value.span,
            parameters_list: Some(&constructor_method.value.params),
            body: FunctionCode::Body(constructor_method.value.body.as_deref().unwrap()),
            is_concise_arrow_function: false,
            is_generator: false,
            lexical_this: false,
            env: EnvironmentIndex::Declarative(class_env),
            private_env: Some(class_private_environment),
        };
        let f = ordinary_function_create(agent, params);
        make_method(agent, f, proto.into_object());

        // b. Perform SetFunctionName(F, className).
        set_function_name(agent, f, class_name, None);

        // c. Perform MakeConstructor(F, false, proto).
        // d. If ClassHeritage is present, set F.[[ConstructorKind]] to
        //    DERIVED.
        agent[f].constructor_status = if is_derived {
            ConstructorStatus::DerivedClass
        } else {
            ConstructorStatus::BaseClass
        };
        let prototype_key = PropertyKey::from_str(agent, "prototype");
        let backing_object = f.get_or_create_backing_object(agent);
        agent[backing_object].storage.set(
            prototype_key,
            PropertyData::Data {
                value: proto.into_value(),
                writable: false,
                enumerable: false,
                configurable: false,
            },
        );
        f.into_function()
    } else {
        // 14. Else: synthesize the default constructor.
        let class_name_string = match class_name {
            PropertyKey::String(name) => name,
            PropertyKey::Integer(index) => String::from_string(agent, index.to_string()),
            PropertyKey::Symbol(symbol) => match agent[symbol].descriptor {
                Some(description) => {
                    let text = format!("[{}]", description.as_str(agent));
                    String::from_string(agent, text)
                }
                None => String::EMPTY_STRING,
            },
            PropertyKey::PrivateName(_) => String::EMPTY_STRING,
        };
        let backing_object = {
            let mut data = ObjectHeapData::new(Some(constructor_parent));
            let length_key = PropertyKey::from_str(agent, "length");
            data.storage.set(
                length_key,
                PropertyData::Data {
                    value: Value::Number(0.0),
                    writable: false,
                    enumerable: false,
                    configurable: true,
                },
            );
            let name_key = PropertyKey::from_str(agent, "name");
            data.storage.set(
                name_key,
                PropertyData::Data {
                    value: class_name_string.into_value(),
                    writable: false,
                    enumerable: false,
                    configurable: true,
                },
            );
            agent.heap.create(data)
        };
        let f: BuiltinConstructorFunction = agent.heap.create(BuiltinConstructorHeapData {
            object_index: Some(backing_object),
            realm: agent.current_realm_id(),
            is_derived,
            fields: Vec::new(),
            private_methods: Vec::new(),
            source_text: class.span,
        });
        // The default constructor's "prototype" property.
        let prototype_key = PropertyKey::from_str(agent, "prototype");
        agent[backing_object].storage.set(
            prototype_key,
            PropertyData::Data {
                value: proto.into_value(),
                writable: false,
                enumerable: false,
                configurable: false,
            },
        );
        f.into_function()
    };

    // 16. Perform ! DefineMethodProperty(proto, "constructor", F, false).
    let constructor_key = PropertyKey::from_str(agent, "constructor");
    agent[proto].storage.set(
        constructor_key,
        PropertyData::Data {
            value: f.into_value(),
            writable: true,
            enumerable: false,
            configurable: true,
        },
    );

    // 17.-20. Evaluate the remaining class elements in source order.
    let mut instance_private_methods: Vec<PrivateElement> = Vec::new();
    let mut static_private_methods: Vec<PrivateElement> = Vec::new();
    let mut instance_fields: Vec<ClassFieldDefinitionRecord> = Vec::new();
    let mut static_elements: Vec<StaticElement> = Vec::new();

    for element in &class.body.body {
        let result = evaluate_class_element(
            agent,
            element,
            proto.into_object(),
            f,
            &mut instance_private_methods,
            &mut static_private_methods,
            &mut instance_fields,
            &mut static_elements,
        );
        // e. If any element evaluation completes abruptly: restore the
        //    outer environments and propagate.
        if let Err(err) = result {
            agent.set_current_lexical_environment(outer_env);
            agent.set_current_private_environment(outer_private_environment);
            return Err(err);
        }
    }

    // 25. Set the running execution context's LexicalEnvironment to env.
    agent.set_current_lexical_environment(outer_env);

    // 26. If classBinding is not undefined, perform
    //     ! classEnv.InitializeBinding(classBinding, F).
    if let Some(class_binding) = class_binding {
        class_env.initialize_binding(agent, class_binding, f.into_value());
    }

    // 27.-28. Set F.[[PrivateMethods]] and F.[[Fields]].
    match f {
        Function::ECMAScriptFunction(constructor) => {
            agent[constructor].private_methods = instance_private_methods;
            agent[constructor].fields = instance_fields;
        }
        Function::BuiltinConstructorFunction(constructor) => {
            agent[constructor].private_methods = instance_private_methods;
            agent[constructor].fields = instance_fields;
        }
        _ => unreachable!(),
    }

    // 29. For each PrivateElement method of staticPrivateMethods, perform
    //     ! PrivateMethodOrAccessorAdd(F, method).
    for method in static_private_methods {
        private_method_or_accessor_add(agent, f.into_object(), method)?;
    }

    // 30. For each element of staticElements:
    let result = (|| -> JsResult<()> {
        for element in static_elements {
            match element {
                // a. If elementRecord is a ClassFieldDefinition Record:
                //    perform ? DefineField(F, elementRecord).
                StaticElement::Field(record) => {
                    define_field(agent, f.into_object(), &record)?;
                }
                // b. Else: elementRecord is a ClassStaticBlockDefinition
                //    Record; perform ? Call(elementRecord.[[BodyFunction]],
                //    F).
                StaticElement::Block(block) => {
                    evaluate_class_static_block_body(agent, f, block)?;
                }
            }
        }
        Ok(())
    })();

    // 31. Set the running execution context's PrivateEnvironment to
    //     outerPrivateEnvironment.
    agent.set_current_private_environment(outer_private_environment);
    agent.set_current_variable_environment(outer_variable_env);
    result?;

    // 32. Return F.
    Ok(f)
}

enum StaticElement {
    Field(ClassFieldDefinitionRecord),
    Block(&'static ast::StaticBlock<'static>),
}

/// Collect the PrivateBoundIdentifiers of a class body into its private
/// environment, rejecting invalid redeclarations.
fn declare_private_names(
    agent: &mut Agent,
    class: &'static ast::Class<'static>,
    class_private_environment: PrivateEnvironmentIndex,
) -> JsResult<()> {
    #[derive(PartialEq, Clone, Copy)]
    enum Declared {
        Field,
        Method,
        Getter,
        Setter,
        GetterSetter,
    }
    let mut declared: Vec<(&str, Declared)> = Vec::new();
    for element in &class.body.body {
        let (name, kind) = match element {
            ast::ClassElement::MethodDefinition(method) => {
                let ast::PropertyKey::PrivateIdentifier(id) = &method.key else {
                    continue;
                };
                let kind = match method.kind {
                    ast::MethodDefinitionKind::Get => Declared::Getter,
                    ast::MethodDefinitionKind::Set => Declared::Setter,
                    _ => Declared::Method,
                };
                (id.name.as_str(), kind)
            }
            ast::ClassElement::PropertyDefinition(property) => {
                let ast::PropertyKey::PrivateIdentifier(id) = &property.key else {
                    continue;
                };
                (id.name.as_str(), Declared::Field)
            }
            _ => continue,
        };
        if let Some(entry) = declared.iter_mut().find(|(n, _)| *n == name) {
            // A name may be used once for a getter and once for a setter;
            // any other duplicate is a redeclaration.
            entry.1 = match (entry.1, kind) {
                (Declared::Getter, Declared::Setter) => Declared::GetterSetter,
                (Declared::Setter, Declared::Getter) => Declared::GetterSetter,
                _ => {
                    let error_message =
                        format!("Duplicate private element '#{}' in class definition", name);
                    return Err(agent.throw_exception(ExceptionType::SyntaxError, error_message));
                }
            };
        } else {
            declared.push((name, kind));
        }
        let description = String::from_str(agent, name);
        class_private_environment.add_private_name(agent, description);
    }
    Ok(())
}

/// ### [15.7.13 Runtime Semantics: ClassElementEvaluation](https://tc39.es/ecma262/#sec-static-semantics-classelementevaluation)
#[allow(clippy::too_many_arguments)]
fn evaluate_class_element(
    agent: &mut Agent,
    element: &'static ast::ClassElement<'static>,
    proto: Object,
    f: Function,
    instance_private_methods: &mut Vec<PrivateElement>,
    static_private_methods: &mut Vec<PrivateElement>,
    instance_fields: &mut Vec<ClassFieldDefinitionRecord>,
    static_elements: &mut Vec<StaticElement>,
) -> JsResult<()> {
    match element {
        ast::ClassElement::MethodDefinition(method) => {
            if method.kind == ast::MethodDefinitionKind::Constructor {
                return Ok(());
            }
            let home = if method.r#static {
                f.into_object()
            } else {
                proto
            };
            let key = evaluate_class_element_name(agent, &method.key, method.computed)?;
            let kind = match method.kind {
                ast::MethodDefinitionKind::Get => MethodKind::Get,
                ast::MethodDefinitionKind::Set => MethodKind::Set,
                _ => MethodKind::Normal,
            };
            let private_element =
                method_definition_evaluation(agent, home, key, &method.value, kind, false)?;
            if let Some(private_element) = private_element {
                let target = if method.r#static {
                    static_private_methods
                } else {
                    instance_private_methods
                };
                merge_private_element(agent, target, private_element)?;
            }
            Ok(())
        }
        ast::ClassElement::PropertyDefinition(property) => {
            // ClassFieldDefinitionEvaluation.
            let key = evaluate_class_element_name(agent, &property.key, property.computed)?;
            let home = if property.r#static {
                f.into_object()
            } else {
                proto
            };
            let initializer = property.value.as_ref().map(|value_expr| {
                // The initializer is a synthesized function with the
                // instance as its `this` and the class's scope captured.
                let params = OrdinaryFunctionCreateParams {
                    function_prototype: None,
                    source_text: property.span,
                    parameters_list: None,
                    body: FunctionCode::Expression(value_expr),
                    is_concise_arrow_function: false,
                    is_generator: false,
                    lexical_this: false,
                    env: agent.current_lexical_environment(),
                    private_env: agent.current_private_environment(),
                };
                let initializer = ordinary_function_create(agent, params);
                make_method(agent, initializer, home);
                agent[initializer].class_field_initializer_name = Some(key);
                initializer
            });
            let record = ClassFieldDefinitionRecord { name: key, initializer };
            if property.r#static {
                static_elements.push(StaticElement::Field(record));
            } else {
                instance_fields.push(record);
            }
            Ok(())
        }
        ast::ClassElement::StaticBlock(block) => {
            static_elements.push(StaticElement::Block(block));
            Ok(())
        }
        ast::ClassElement::AccessorProperty(_) | ast::ClassElement::TSIndexSignature(_) => {
            Ok(())
        }
    }
}

/// Merge a private accessor half into an existing element with the same
/// key, or append.
fn merge_private_element(
    agent: &mut Agent,
    elements: &mut Vec<PrivateElement>,
    element: PrivateElement,
) -> JsResult<()> {
    if element.kind == PrivateElementKind::Accessor {
        if let Some(existing) = elements
            .iter_mut()
            .find(|e| e.key == element.key && e.kind == PrivateElementKind::Accessor)
        {
            if existing.get.is_none() {
                existing.get = element.get;
            }
            if existing.set.is_none() {
                existing.set = element.set;
            }
            return Ok(());
        }
    } else if elements.iter().any(|e| e.key == element.key) {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::SyntaxError,
            "Duplicate private element",
        ));
    }
    elements.push(element);
    Ok(())
}

/// ### ClassElementName evaluation: a property key, or a Private Name
/// resolved in the class's private environment.
pub(crate) fn evaluate_class_element_name(
    agent: &mut Agent,
    key: &'static ast::PropertyKey<'static>,
    computed: bool,
) -> JsResult<PropertyKey> {
    match key {
        ast::PropertyKey::PrivateIdentifier(id) => {
            let private_environment = agent
                .current_private_environment()
                .expect("private identifier outside class");
            let description = String::from_str(agent, id.name.as_str());
            let private_name = private_environment
                .resolve_private_identifier(agent, description)
                .expect("unresolvable private identifier");
            Ok(PropertyKey::PrivateName(private_name))
        }
        ast::PropertyKey::StaticIdentifier(id) => {
            Ok(PropertyKey::from_str(agent, id.name.as_str()))
        }
        _ => {
            debug_assert!(computed);
            let expression = key.as_expression().unwrap();
            let value = Vm::evaluate_expression(agent, expression)?;
            to_property_key(agent, value)
        }
    }
}

/// ### [15.4.4 Runtime Semantics: DefineMethod](https://tc39.es/ecma262/#sec-runtime-semantics-definemethod)
/// and [15.4.5 MethodDefinitionEvaluation](https://tc39.es/ecma262/#sec-runtime-semantics-methoddefinitionevaluation),
/// shared by class elements and object literal methods.
///
/// Returns the PrivateElement for private-named methods; public methods
/// are installed on `object` directly.
pub(crate) fn method_definition_evaluation(
    agent: &mut Agent,
    object: Object,
    key: PropertyKey,
    function: &'static ast::Function<'static>,
    kind: MethodKind,
    enumerable: bool,
) -> JsResult<Option<PrivateElement>> {
    // DefineMethod: let closure be OrdinaryFunctionCreate(prototype,
    // sourceText, UniqueFormalParameters, FunctionBody, NON-LEXICAL-THIS,
    // env, privateEnv); perform MakeMethod(closure, object).
    let params = OrdinaryFunctionCreateParams {
        function_prototype: None,
        source_text: function.span,
        parameters_list: Some(&function.params),
        body: FunctionCode::Body(function.body.as_deref().unwrap()),
        is_concise_arrow_function: false,
        is_generator: function.generator,
        lexical_this: false,
        env: agent.current_lexical_environment(),
        private_env: agent.current_private_environment(),
    };
    let closure = ordinary_function_create(agent, params);
    make_method(agent, closure, object);

    // SetFunctionName(closure, propKey, prefix for accessors).
    let prefix = match kind {
        MethodKind::Get => Some("get"),
        MethodKind::Set => Some("set"),
        MethodKind::Normal => None,
    };
    set_function_name(agent, closure, key, prefix);

    if function.generator && kind == MethodKind::Normal {
        let generator_prototype = agent.current_realm().intrinsics().generator_prototype();
        let prototype = ordinary_object_create(agent, Some(generator_prototype));
        crate::ecmascript::builtins::ecmascript_function::define_prototype_property(
            agent,
            closure,
            prototype.into_object(),
        );
    }

    if let PropertyKey::PrivateName(private_name) = key {
        // Private methods and accessors are not installed on the object;
        // they are added to instances (or the constructor) later.
        let element = match kind {
            MethodKind::Normal => PrivateElement::method(private_name, closure.into_function()),
            MethodKind::Get => {
                PrivateElement::accessor(private_name, Some(closure.into_function()), None)
            }
            MethodKind::Set => {
                PrivateElement::accessor(private_name, None, Some(closure.into_function()))
            }
        };
        return Ok(Some(element));
    }

    // DefineMethodProperty / accessor installation.
    let descriptor = match kind {
        MethodKind::Normal => crate::ecmascript::types::PropertyDescriptor {
            value: Some(closure.into_value()),
            writable: Some(true),
            get: None,
            set: None,
            enumerable: Some(enumerable),
            configurable: Some(true),
        },
        MethodKind::Get => crate::ecmascript::types::PropertyDescriptor {
            value: None,
            writable: None,
            get: Some(Some(closure.into_function())),
            set: None,
            enumerable: Some(enumerable),
            configurable: Some(true),
        },
        MethodKind::Set => crate::ecmascript::types::PropertyDescriptor {
            value: None,
            writable: None,
            get: None,
            set: Some(Some(closure.into_function())),
            enumerable: Some(enumerable),
            configurable: Some(true),
        },
    };
    define_property_or_throw(agent, object, key, descriptor)?;
    Ok(None)
}

/// ### [15.7.11 Runtime Semantics: EvaluateClassStaticBlockBody](https://tc39.es/ecma262/#sec-runtime-semantics-evaluateclassstaticblockbody)
///
/// Performs FunctionDeclarationInstantiation with no arguments, then
/// evaluates the block body on its own machine, capturing the final
/// completion. The block runs in a function environment whose `this` is
/// the class constructor.
pub(crate) fn evaluate_class_static_block_body(
    agent: &mut Agent,
    class_constructor: Function,
    block: &'static ast::StaticBlock<'static>,
) -> JsResult<()> {
    let func_env = new_class_static_element_environment(agent, class_constructor);
    let env = EnvironmentIndex::Function(func_env);

    let callee_context = ExecutionContext {
        ecmascript_code: Some(ECMAScriptCodeEvaluationState {
            lexical_environment: env,
            variable_environment: env,
            private_environment: agent.current_private_environment(),
            is_strict_mode: true,
            source_code: agent
                .running_execution_context()
                .ecmascript_code
                .as_ref()
                .unwrap()
                .source_code,
        }),
        function: Some(class_constructor),
        realm: agent.current_realm_id(),
        script_or_module: agent.running_execution_context().script_or_module,
    };
    agent.push_execution_context(callee_context);

    // FunctionDeclarationInstantiation with an empty parameter list: only
    // the var- and lexically-scoped declarations of the block body are
    // instantiated.
    let result = instantiate_simple_body(agent, &block.body, env)
        .and_then(|()| Vm::for_statement_list(&block.body).run(agent).into_js_result());

    agent.pop_execution_context();
    result.map(|_| ())
}

/// Hoisting for parameterless bodies (class static blocks): var bindings,
/// function declarations, and top-level lexical declarations.
pub(crate) fn instantiate_simple_body(
    agent: &mut Agent,
    statements: &'static [ast::Statement<'static>],
    env: EnvironmentIndex,
) -> JsResult<()> {
    let private_env = agent.current_private_environment();

    for name in crate::ecmascript::syntax_directed_operations::scope_analysis::top_level_var_declared_names(statements) {
        let name = String::from_str(agent, name.as_str());
        if !env.has_binding(agent, name)? {
            env.create_mutable_binding(agent, name, false)?;
            env.initialize_binding(agent, name, Value::Undefined)?;
        }
    }

    for declaration in top_level_lexically_scoped_declarations(statements) {
        let mut names = Vec::new();
        declaration.bound_names(&mut |name| names.push(name));
        for name in names {
            let name = String::from_str(agent, name.as_str());
            if declaration.is_constant_declaration() {
                env.create_immutable_binding(agent, name, true)?;
            } else {
                env.create_mutable_binding(agent, name, false)?;
            }
        }
    }

    for declaration in top_level_var_scoped_declarations(statements) {
        if let VarScopedDeclaration::Function(function) = declaration {
            let mut function_name = None;
            use oxc_ecmascript::BoundNames;
            function.bound_names(&mut |identifier| function_name = Some(identifier.name));
            let function_name = function_name.unwrap();
            let function_object =
                instantiate_function_object(agent, function, env, private_env);
            let name = String::from_str(agent, function_name.as_str());
            env.set_mutable_binding(agent, name, function_object.into_value(), false)?;
        }
    }

    Ok(())
}
