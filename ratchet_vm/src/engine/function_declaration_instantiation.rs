//! ### [10.2.11 FunctionDeclarationInstantiation ( func, argumentsList )](https://tc39.es/ecma262/#sec-functiondeclarationinstantiation)
//!
//! Parameter, var and function hoisting for a function invocation. The
//! parts that cannot run user code execute immediately; parameter binding
//! (defaults, destructuring) is pushed as machine frames, followed by the
//! variable-scope installation frame.

use oxc_ast::ast;
use oxc_ecmascript::{BoundNames, IsSimpleParameterList};
use oxc_span::Atom;

use super::{
    frame::Frame,
    vm::Vm,
};
use crate::{
    ecmascript::{
        abstract_operations::operations_on_objects::create_array_from_list,
        builtins::{
            builtin_function::ArgumentsList,
            ecmascript_function::{ECMAScriptFunction, FunctionCode, ThisMode},
            ordinary::ordinary_object_create_with_intrinsics,
        },
        execution::{
            agent::{Agent, JsResult},
            environments::{new_declarative_environment, EnvironmentIndex},
            realm::ProtoIntrinsics,
        },
        syntax_directed_operations::scope_analysis::{
            top_level_lexically_scoped_declarations, top_level_var_declared_names,
            top_level_var_scoped_declarations, VarScopedDeclaration,
        },
        types::{
            language::{
                object::{
                    internal_methods::InternalMethods, property_key::PropertyKey,
                    property_storage::PropertyData, IntoObject, OrdinaryObject,
                },
                string::String,
                value::{IntoValue, Value},
            },
            spec::property_descriptor::PropertyDescriptor,
        },
    },
    heap::{CreateHeapData, WellKnownSymbolIndexes},
};

/// Whether a binding pattern contains an expression (a default initializer
/// or a computed property key).
fn contains_expression(pattern: &ast::BindingPattern) -> bool {
    match &pattern.kind {
        ast::BindingPatternKind::BindingIdentifier(_) => false,
        ast::BindingPatternKind::AssignmentPattern(_) => true,
        ast::BindingPatternKind::ObjectPattern(pattern) => {
            pattern
                .properties
                .iter()
                .any(|property| property.computed || contains_expression(&property.value))
                || pattern
                    .rest
                    .as_ref()
                    .is_some_and(|rest| contains_expression(&rest.argument))
        }
        ast::BindingPatternKind::ArrayPattern(pattern) => {
            pattern
                .elements
                .iter()
                .flatten()
                .any(contains_expression)
                || pattern
                    .rest
                    .as_ref()
                    .is_some_and(|rest| contains_expression(&rest.argument))
        }
    }
}

fn has_parameter_expressions(formals: Option<&'static ast::FormalParameters<'static>>) -> bool {
    let Some(formals) = formals else {
        return false;
    };
    formals
        .items
        .iter()
        .any(|parameter| contains_expression(&parameter.pattern))
        || formals
            .rest
            .as_ref()
            .is_some_and(|rest| contains_expression(&rest.argument))
}

fn parameter_names(formals: Option<&'static ast::FormalParameters<'static>>) -> Vec<Atom<'static>> {
    let mut names = Vec::new();
    if let Some(formals) = formals {
        formals.bound_names(&mut |identifier| names.push(identifier.name));
    }
    names
}

fn body_statements(
    agent: &Agent,
    function: ECMAScriptFunction,
) -> &'static [ast::Statement<'static>] {
    match agent[function].ecmascript_code {
        FunctionCode::Body(body) if !agent[function].is_concise_arrow_function => {
            &body.statements
        }
        _ => &[],
    }
}

pub(crate) fn function_declaration_instantiation(
    agent: &mut Agent,
    vm: &mut Vm,
    function: ECMAScriptFunction,
    arguments: ArgumentsList,
) -> JsResult<()> {
    // 1. Let calleeContext be the running execution context.
    // 2. Let code be func.[[ECMAScriptCode]].
    // 3. Let strict be func.[[Strict]].
    let strict = agent[function].strict;
    // 4. Let formals be func.[[FormalParameters]].
    let formals = agent[function].formal_parameters;
    // 5. Let parameterNames be the BoundNames of formals.
    let parameter_atoms = parameter_names(formals);
    // 6. If parameterNames has any duplicate entries, let hasDuplicates be
    //    true.
    let has_duplicates = parameter_atoms
        .iter()
        .enumerate()
        .any(|(index, name)| parameter_atoms[..index].contains(name));
    // 7. Let simpleParameterList be IsSimpleParameterList of formals.
    let simple_parameter_list =
        formals.map_or(true, |formals| formals.is_simple_parameter_list());
    // 8. Let hasParameterExpressions be ContainsExpression of formals.
    let parameter_expressions = has_parameter_expressions(formals);

    let statements = body_statements(agent, function);
    // 9.-11. Let varNames, varDeclarations and lexicalNames be the
    //        VarDeclaredNames, VarScopedDeclarations and
    //        LexicallyDeclaredNames of code.
    let lexical_names: Vec<Atom<'static>> =
        crate::ecmascript::syntax_directed_operations::scope_analysis::top_level_lexically_declared_names(statements);
    // 12.-14. Collect functionsToInitialize (last declaration wins).
    let mut function_names: Vec<Atom<'static>> = Vec::new();
    for declaration in top_level_var_scoped_declarations(statements).iter().rev() {
        if let VarScopedDeclaration::Function(decl) = declaration {
            let mut name = None;
            decl.bound_names(&mut |identifier| name = Some(identifier.name));
            let name = name.unwrap();
            if !function_names.contains(&name) {
                function_names.push(name);
            }
        }
    }

    // 15.-18. Let argumentsObjectNeeded be true, unless the function has a
    //         lexical this (arrows), binds "arguments" itself, or contains
    //         a top-level "arguments" function or lexical declaration.
    let arguments_atom_in = |names: &[Atom<'static>]| names.iter().any(|n| n.as_str() == "arguments");
    let arguments_object_needed = agent[function].this_mode != ThisMode::Lexical
        && !arguments_atom_in(&parameter_atoms)
        && !(!parameter_expressions
            && (arguments_atom_in(&function_names) || arguments_atom_in(&lexical_names)));

    // 19.-21. Parameters are bound in the callee context's
    //         LexicalEnvironment.
    let env = agent.current_lexical_environment();

    // 22. For each String paramName of parameterNames, do
    let mut bound: Vec<Atom<'static>> = Vec::new();
    for atom in &parameter_atoms {
        // a. Let alreadyDeclared be ! env.HasBinding(paramName).
        if bound.contains(atom) {
            continue;
        }
        bound.push(*atom);
        // c. If alreadyDeclared is false, then
        let name = String::from_str(agent, atom.as_str());
        // i. Perform ! env.CreateMutableBinding(paramName, false).
        env.create_mutable_binding(agent, name, false)?;
        // ii. If hasDuplicates is true, perform ! env.InitializeBinding(
        //     paramName, undefined).
        if has_duplicates {
            env.initialize_binding(agent, name, Value::Undefined)?;
        }
    }

    // 23.-26. If argumentsObjectNeeded is true, create the arguments
    //         object and bind it.
    if arguments_object_needed {
        // a.-f. Strict mode or a non-simple parameter list gets the
        //       unmapped arguments object; mapped arguments are an
        //       extension point, so every function receives the unmapped
        //       form.
        let _ = simple_parameter_list;
        let arguments_object = create_unmapped_arguments_object(agent, arguments);
        let name = String::from_str(agent, "arguments");
        if strict {
            // b. Perform ! env.CreateImmutableBinding("arguments", false).
            env.create_immutable_binding(agent, name, false)?;
        } else {
            // c. Perform ! env.CreateMutableBinding("arguments", false).
            env.create_mutable_binding(agent, name, false)?;
        }
        // d. Perform ! env.InitializeBinding("arguments", ao).
        env.initialize_binding(agent, name, arguments_object.into_value())?;
    }

    // 27.-28. IteratorBindingInitialization of formals with argumentsList
    //         and env; duplicates bind with PutValue instead.
    let binding_environment = if has_duplicates { None } else { Some(env) };

    // The variable scopes install once the parameters are bound.
    vm.frames.push(Frame::FunctionVarScopes { function });

    if let Some(formals) = formals {
        if let Some(rest) = &formals.rest {
            let rest_values: Vec<Value> = arguments
                .iter()
                .skip(formals.items.len())
                .copied()
                .collect();
            let rest_array = create_array_from_list(agent, &rest_values);
            vm.frames.push(Frame::BindingInit {
                pattern: &rest.argument,
                environment: binding_environment,
            });
            vm.frames.push(Frame::LoadValue(rest_array.into_value()));
        }
        for (index, parameter) in formals.items.iter().enumerate().rev() {
            vm.frames.push(Frame::BindingInit {
                pattern: &parameter.pattern,
                environment: binding_environment,
            });
            vm.frames.push(Frame::LoadValue(arguments.get(index)));
        }
    }

    Ok(())
}

/// The second half of FunctionDeclarationInstantiation: once parameters
/// are bound, install the var environment, the lexical environment, and
/// the hoisted functions.
pub(crate) fn instantiate_function_var_scopes(
    agent: &mut Agent,
    _vm: &mut Vm,
    function: ECMAScriptFunction,
) -> JsResult<()> {
    let strict = agent[function].strict;
    let formals = agent[function].formal_parameters;
    let parameter_expressions = has_parameter_expressions(formals);
    let statements = body_statements(agent, function);
    let parameter_atoms = parameter_names(formals);
    let var_names = top_level_var_declared_names(statements);
    let function_env = agent.current_lexical_environment();

    // 27./28. Install the var-scoped bindings.
    let var_env = if !parameter_expressions {
        // 27.a. NOTE: Only a single Environment Record is needed for the
        //       parameters and top-level vars.
        let mut instantiated: Vec<Atom<'static>> = parameter_atoms.clone();
        for atom in &var_names {
            if instantiated.contains(atom) {
                continue;
            }
            instantiated.push(*atom);
            let name = String::from_str(agent, atom.as_str());
            if !function_env.has_binding(agent, name)? {
                function_env.create_mutable_binding(agent, name, false)?;
                function_env.initialize_binding(agent, name, Value::Undefined)?;
            }
        }
        function_env
    } else {
        // 28.a. NOTE: A separate Environment Record is needed so that
        //       closures created by expressions in the formal parameter
        //       list do not see the vars of the body.
        let var_env = new_declarative_environment(agent, Some(function_env));
        let var_env = EnvironmentIndex::Declarative(var_env);
        agent.set_current_variable_environment(var_env);
        let mut instantiated: Vec<Atom<'static>> = Vec::new();
        for atom in &var_names {
            if instantiated.contains(atom) {
                continue;
            }
            instantiated.push(*atom);
            let name = String::from_str(agent, atom.as_str());
            var_env.create_mutable_binding(agent, name, false)?;
            // d.iv. The initial value of a var shadowing a parameter is the
            //       parameter's current value.
            let initial_value = if parameter_atoms.contains(atom)
                && !function_names_contains(statements, *atom)
            {
                function_env.get_binding_value(agent, name, false)?
            } else {
                Value::Undefined
            };
            var_env.initialize_binding(agent, name, initial_value)?;
        }
        var_env
    };
    if !parameter_expressions {
        agent.set_current_variable_environment(var_env);
    }

    // 29.-30. NOTE: Annex B.3.2.1 is not applied here.
    // 30./31. Let lexEnv be the lexical environment of the body.
    let lex_env = if strict {
        var_env
    } else {
        // NOTE: Non-strict functions use a separate Environment Record for
        // top-level lexical declarations so that direct eval can
        // distinguish them from vars.
        EnvironmentIndex::Declarative(new_declarative_environment(agent, Some(var_env)))
    };
    // 32. Set the LexicalEnvironment of calleeContext to lexEnv.
    agent.set_current_lexical_environment(lex_env);

    // 33.-34. Instantiate the lexically scoped declarations (TDZ bindings).
    for declaration in top_level_lexically_scoped_declarations(statements) {
        let mut atoms: Vec<Atom<'static>> = Vec::new();
        declaration.bound_names(&mut |name| atoms.push(name));
        for atom in atoms {
            let name = String::from_str(agent, atom.as_str());
            // Early error: a lexical name clashing with a parameter or var
            // name.
            if lex_env.has_binding(agent, name)? {
                let error_message = format!(
                    "Identifier '{}' has already been declared.",
                    atom.as_str()
                );
                return Err(agent
                    .throw_exception(
                        crate::ecmascript::execution::agent::ExceptionType::SyntaxError,
                        error_message,
                    )
                    .into());
            }
            if declaration.is_constant_declaration() {
                lex_env.create_immutable_binding(agent, name, true)?;
            } else {
                lex_env.create_mutable_binding(agent, name, false)?;
            }
        }
    }

    // 35.-36. Instantiate the hoisted function declarations.
    let private_env = agent.current_private_environment();
    let mut initialized: Vec<Atom<'static>> = Vec::new();
    for declaration in top_level_var_scoped_declarations(statements).iter().rev() {
        if let VarScopedDeclaration::Function(decl) = declaration {
            let mut atom = None;
            decl.bound_names(&mut |identifier| atom = Some(identifier.name));
            let atom = atom.unwrap();
            if initialized.contains(&atom) {
                continue;
            }
            initialized.push(atom);
            let function_object =
                crate::ecmascript::syntax_directed_operations::function_definitions::instantiate_function_object(
                    agent, decl, lex_env, private_env,
                );
            let name = String::from_str(agent, atom.as_str());
            var_env.set_mutable_binding(agent, name, function_object.into_value(), false)?;
        }
    }

    // 37. Return UNUSED.
    Ok(())
}

fn function_names_contains(
    statements: &'static [ast::Statement<'static>],
    name: Atom<'static>,
) -> bool {
    top_level_var_scoped_declarations(statements)
        .iter()
        .any(|declaration| match declaration {
            VarScopedDeclaration::Function(decl) => {
                let mut found = false;
                decl.bound_names(&mut |identifier| found |= identifier.name == name);
                found
            }
            _ => false,
        })
}

/// ### [10.4.4.6 CreateUnmappedArgumentsObject ( argumentsList )](https://tc39.es/ecma262/#sec-createunmappedargumentsobject)
fn create_unmapped_arguments_object(
    agent: &mut Agent,
    arguments: ArgumentsList,
) -> OrdinaryObject {
    // 1.-3. Let obj be OrdinaryObjectCreate(%Object.prototype%, ...).
    let object = ordinary_object_create_with_intrinsics(agent, Some(ProtoIntrinsics::Object));

    // 4. Perform ! DefinePropertyOrThrow(obj, "length", PropertyDescriptor
    //    { [[Value]]: 𝔽(len), [[Writable]]: true, [[Enumerable]]: false,
    //    [[Configurable]]: true }).
    let length_key = PropertyKey::from_str(agent, "length");
    agent[object].storage.set(
        length_key,
        PropertyData::Data {
            value: Value::Number(arguments.len() as f64),
            writable: true,
            enumerable: false,
            configurable: true,
        },
    );

    // 5.-6. Index properties.
    for (index, value) in arguments.iter().enumerate() {
        agent[object].storage.set(
            PropertyKey::Integer(index as u32),
            PropertyData::Data {
                value: *value,
                writable: true,
                enumerable: true,
                configurable: true,
            },
        );
    }

    // 7. Perform ! DefinePropertyOrThrow(obj, %Symbol.iterator%,
    //    PropertyDescriptor { [[Value]]: %Array.prototype.values%, ... }).
    if let Some(values_fn) = agent
        .current_realm()
        .intrinsics()
        .get("%Array.prototype.values%")
    {
        agent[object].storage.set(
            PropertyKey::from(WellKnownSymbolIndexes::Iterator),
            PropertyData::Data {
                value: values_fn.into_value(),
                writable: true,
                enumerable: false,
                configurable: true,
            },
        );
    }

    // 8. Perform ! DefinePropertyOrThrow(obj, "callee", PropertyDescriptor
    //    { [[Get]]: %ThrowTypeError%, [[Set]]: %ThrowTypeError%,
    //    [[Enumerable]]: false, [[Configurable]]: false }).
    if let Some(throw_type_error) = agent.current_realm().intrinsics().get("%ThrowTypeError%") {
        let throw_type_error =
            crate::ecmascript::types::Function::try_from(throw_type_error.into_value()).ok();
        let callee_key = PropertyKey::from_str(agent, "callee");
        agent[object].storage.set(
            callee_key,
            PropertyData::Accessor {
                get: throw_type_error,
                set: throw_type_error,
                enumerable: false,
                configurable: false,
            },
        );
    }

    // 9. Return obj.
    object
}
