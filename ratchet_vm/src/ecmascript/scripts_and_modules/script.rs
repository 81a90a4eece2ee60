use core::{marker::PhantomData, mem::ManuallyDrop, num::NonZeroU32};

use oxc_ast::ast::Program;
use oxc_diagnostics::OxcDiagnostic;
use oxc_ecmascript::BoundNames;
use oxc_span::Atom;

use super::{source_code::SourceCode, ScriptOrModule};
use crate::{
    ecmascript::{
        execution::{
            agent::{Agent, ExceptionType, JsResult},
            environments::{EnvironmentIndex, GlobalEnvironmentIndex},
            execution_context::{ECMAScriptCodeEvaluationState, ExecutionContext},
            realm::RealmIdentifier,
        },
        syntax_directed_operations::{
            function_definitions::instantiate_function_object,
            scope_analysis::{
                top_level_lexically_declared_names, top_level_lexically_scoped_declarations,
                top_level_var_declared_names, top_level_var_scoped_declarations,
                VarScopedDeclaration,
            },
        },
        types::{
            language::{
                string::String,
                value::{IntoValue, Value},
            },
        },
    },
    engine::Vm,
};

/// An index to a [`ScriptRecord`] stored in the heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Script(NonZeroU32, PhantomData<ScriptRecord>);

impl Script {
    pub(crate) const fn from_index(value: usize) -> Self {
        assert!(value < u32::MAX as usize);
        // SAFETY: Value + 1 cannot be zero without overflowing first.
        Self(
            unsafe { NonZeroU32::new_unchecked(value as u32 + 1) },
            PhantomData,
        )
    }

    pub(crate) const fn into_index(self) -> usize {
        self.0.get() as usize - 1
    }
}

impl core::ops::Index<Script> for Agent {
    type Output = ScriptRecord;

    fn index(&self, index: Script) -> &Self::Output {
        self.heap
            .scripts
            .get(index.into_index())
            .expect("Script out of bounds")
            .as_ref()
            .expect("Script slot empty")
    }
}

/// ### [16.1.4 Script Records](https://tc39.es/ecma262/#sec-script-records)
#[derive(Debug)]
pub struct ScriptRecord {
    /// ### \[\[Realm\]\]
    pub(crate) realm: RealmIdentifier,

    /// ### \[\[ECMAScriptCode\]\]
    ///
    /// The AST lives in the arena owned by `source_code`; dropping it here
    /// would touch freed arena memory, so the record never drops it.
    pub(crate) ecmascript_code: ManuallyDrop<Program<'static>>,

    /// The source text and arena backing the AST.
    pub(crate) source_code: SourceCode,
}

/// ### [16.1.5 ParseScript ( sourceText, realm, hostDefined )](https://tc39.es/ecma262/#sec-parse-script)
///
/// Creates a Script Record based upon the result of parsing sourceText as a
/// Script; parse failures return the parser's diagnostics.
pub fn parse_script(
    agent: &mut Agent,
    source_text: String,
    realm: RealmIdentifier,
    strict_mode: bool,
) -> Result<Script, Vec<OxcDiagnostic>> {
    // 1. Let script be ParseText(sourceText, Script).
    // SAFETY: The Script Record keeps the SourceCode alive in the heap,
    // which keeps the Program's arena alive.
    let parse_result = unsafe { SourceCode::parse_source(agent, source_text, strict_mode) };

    // 2. If script is a List of errors, return script.
    let (program, source_code) = parse_result?;

    // 3. Return Script Record {
    let script_record = ScriptRecord {
        // [[Realm]]: realm,
        realm,
        // [[ECMAScriptCode]]: script,
        ecmascript_code: ManuallyDrop::new(program),
        source_code,
    };
    // }.
    agent.heap.scripts.push(Some(script_record));
    Ok(Script::from_index(agent.heap.scripts.len() - 1))
}

/// ### [16.1.6 ScriptEvaluation ( scriptRecord )](https://tc39.es/ecma262/#sec-runtime-semantics-scriptevaluation)
pub fn script_evaluation(agent: &mut Agent, script: Script) -> JsResult<Value> {
    let script_record = &agent[script];
    let realm_id = script_record.realm;
    let source_code = script_record.source_code;
    let is_strict_mode = script_record.ecmascript_code.source_type.is_strict()
        || script_record
            .ecmascript_code
            .directives
            .iter()
            .any(|directive| directive.directive == "use strict");

    // 1. Let globalEnv be scriptRecord.[[Realm]].[[GlobalEnv]].
    let global_env = agent.get_realm(realm_id).global_env.unwrap();

    // 2. Let scriptContext be a new ECMAScript code execution context.
    let script_context = ExecutionContext {
        // 3. Set the Function of scriptContext to null.
        function: None,

        // 4. Set the Realm of scriptContext to scriptRecord.[[Realm]].
        realm: realm_id,

        // 5. Set the ScriptOrModule of scriptContext to scriptRecord.
        script_or_module: Some(ScriptOrModule::Script(script)),

        ecmascript_code: Some(ECMAScriptCodeEvaluationState {
            // 6. Set the VariableEnvironment of scriptContext to globalEnv.
            variable_environment: EnvironmentIndex::Global(global_env),

            // 7. Set the LexicalEnvironment of scriptContext to globalEnv.
            lexical_environment: EnvironmentIndex::Global(global_env),

            // 8. Set the PrivateEnvironment of scriptContext to null.
            private_environment: None,

            is_strict_mode,

            source_code,
        }),
    };

    // 9. Suspend the running execution context.
    // 10. Push scriptContext onto the execution context stack;
    //     scriptContext is now the running execution context.
    agent.push_execution_context(script_context);

    // 11. Let script be scriptRecord.[[ECMAScriptCode]].
    // SAFETY: The Script Record and its SourceCode stay alive in the heap
    // for the lifetime of the agent.
    let program = unsafe {
        core::mem::transmute::<&Program, &'static Program<'static>>(
            &agent[script].ecmascript_code,
        )
    };

    // 12. Let result be Completion(GlobalDeclarationInstantiation(script,
    //     globalEnv)).
    let result = global_declaration_instantiation(agent, program, global_env);

    // 13. If result.[[Type]] is normal, then
    let result = match result {
        // a. Set result to Completion(Evaluation of script).
        // b. If result.[[Type]] is normal and result.[[Value]] is empty,
        //    set result to NormalCompletion(undefined).
        Ok(()) => Vm::for_script(program).run(agent).into_js_result(),
        Err(err) => Err(err),
    };

    // 14. Suspend scriptContext and remove it from the execution context
    //     stack.
    let _ = agent.pop_execution_context();

    // 16. Resume the context that is now on the top of the execution
    //     context stack as the running execution context.
    // 17. Return ? result.
    result
}

/// Parse and evaluate `source_text` in `realm`; parse failures surface as
/// a SyntaxError throw completion.
pub fn evaluate_script(
    agent: &mut Agent,
    source_text: std::string::String,
    realm: RealmIdentifier,
) -> JsResult<Value> {
    let source = String::from_string(agent, source_text);
    match parse_script(agent, source, realm, false) {
        Ok(script) => script_evaluation(agent, script),
        Err(errors) => {
            let message = errors
                .first()
                .map_or_else(|| "Invalid script".to_owned(), |error| error.to_string());
            Err(agent.throw_exception(ExceptionType::SyntaxError, message))
        }
    }
}

/// ### [16.1.7 GlobalDeclarationInstantiation ( script, env )](https://tc39.es/ecma262/#sec-globaldeclarationinstantiation)
pub(crate) fn global_declaration_instantiation(
    agent: &mut Agent,
    program: &'static Program<'static>,
    env: GlobalEnvironmentIndex,
) -> JsResult<()> {
    let statements: &'static [oxc_ast::ast::Statement<'static>] = &program.body;

    // 1. Let lexNames be the LexicallyDeclaredNames of script.
    let lex_names = top_level_lexically_declared_names(statements);
    // 2. Let varNames be the VarDeclaredNames of script.
    let var_names = top_level_var_declared_names(statements);

    // Early errors: duplicate lexical names, and lexical names that also
    // occur in the VarDeclaredNames of the script.
    for (index, atom) in lex_names.iter().enumerate() {
        if lex_names[..index].contains(atom) || var_names.contains(atom) {
            let error_message = format!(
                "Identifier '{}' has already been declared.",
                atom.as_str()
            );
            return Err(agent.throw_exception(ExceptionType::SyntaxError, error_message));
        }
    }

    // 3. For each element name of lexNames, do
    for atom in &lex_names {
        let name = String::from_str(agent, atom.as_str());
        // a. If env.HasVarDeclaration(name) is true, throw a SyntaxError
        //    exception.
        // b. If env.HasLexicalDeclaration(name) is true, throw a
        //    SyntaxError exception.
        // c. Let hasRestrictedGlobal be
        //    ? env.HasRestrictedGlobalProperty(name).
        // d. If hasRestrictedGlobal is true, throw a SyntaxError exception.
        if env.has_var_declaration(agent, name)
            || env.has_lexical_declaration(agent, name)
            || env.has_restricted_global_property(agent, name)?
        {
            let error_message = format!(
                "Identifier '{}' has already been declared.",
                atom.as_str()
            );
            return Err(agent.throw_exception(ExceptionType::SyntaxError, error_message));
        }
    }

    // 4. For each element name of varNames, do
    for atom in &var_names {
        // a. If env.HasLexicalDeclaration(name) is true, throw a
        //    SyntaxError exception.
        let name = String::from_str(agent, atom.as_str());
        if env.has_lexical_declaration(agent, name) {
            let error_message = format!(
                "Identifier '{}' has already been declared.",
                atom.as_str()
            );
            return Err(agent.throw_exception(ExceptionType::SyntaxError, error_message));
        }
    }

    // 5.-8. Collect functionsToInitialize (last declaration of a name
    //       wins) and verify they are declarable.
    let var_declarations = top_level_var_scoped_declarations(statements);
    let mut declared_function_names: Vec<Atom<'static>> = Vec::new();
    let mut functions_to_initialize: Vec<&'static oxc_ast::ast::Function<'static>> = Vec::new();
    for declaration in var_declarations.iter().rev() {
        if let VarScopedDeclaration::Function(decl) = declaration {
            let mut function_name = None;
            decl.bound_names(&mut |identifier| function_name = Some(identifier.name));
            let function_name = function_name.unwrap();
            // iv. If declaredFunctionNames does not contain fn, then
            if declared_function_names.contains(&function_name) {
                continue;
            }
            // 1. Let fnDefinable be ? env.CanDeclareGlobalFunction(fn).
            let name = String::from_str(agent, function_name.as_str());
            let fn_definable = env.can_declare_global_function(agent, name)?;
            // 2. If fnDefinable is false, throw a TypeError exception.
            if !fn_definable {
                let error_message = format!(
                    "Cannot declare global function '{}'.",
                    function_name.as_str()
                );
                return Err(agent.throw_exception(ExceptionType::TypeError, error_message));
            }
            declared_function_names.push(function_name);
            functions_to_initialize.insert(0, decl);
        }
    }

    // 9.-10. Collect declaredVarNames, verifying declarability.
    let mut declared_var_names: Vec<Atom<'static>> = Vec::new();
    for declaration in &var_declarations {
        if let VarScopedDeclaration::Variable(decl) = declaration {
            let mut atoms: Vec<Atom<'static>> = Vec::new();
            decl.id.bound_names(&mut |identifier| atoms.push(identifier.name));
            for atom in atoms {
                if declared_function_names.contains(&atom) || declared_var_names.contains(&atom)
                {
                    continue;
                }
                // a. Let vnDefinable be ? env.CanDeclareGlobalVar(vn).
                let name = String::from_str(agent, atom.as_str());
                let vn_definable = env.can_declare_global_var(agent, name)?;
                // b. If vnDefinable is false, throw a TypeError exception.
                if !vn_definable {
                    let error_message =
                        format!("Cannot declare global variable '{}'.", atom.as_str());
                    return Err(agent.throw_exception(ExceptionType::TypeError, error_message));
                }
                declared_var_names.push(atom);
            }
        }
    }

    // 11.-14. NOTE: Annex B.3.2.2 is not applied; no abnormal terminations
    //         occur after this algorithm step.
    // 15. For each element d of lexDeclarations, do
    for declaration in top_level_lexically_scoped_declarations(statements) {
        // a. For each element dn of the BoundNames of d, do
        let mut atoms: Vec<Atom<'static>> = Vec::new();
        declaration.bound_names(&mut |name| atoms.push(name));
        for atom in atoms {
            let name = String::from_str(agent, atom.as_str());
            if declaration.is_constant_declaration() {
                // i. If IsConstantDeclaration of d is true:
                //    perform ? env.CreateImmutableBinding(dn, true).
                env.create_immutable_binding(agent, name, true)?;
            } else {
                // ii. Else: perform ? env.CreateMutableBinding(dn, false).
                env.create_mutable_binding(agent, name, false)?;
            }
        }
    }

    // 16. For each Parse Node f of functionsToInitialize, do
    for function in functions_to_initialize {
        let mut function_name = None;
        function.bound_names(&mut |identifier| function_name = Some(identifier.name));
        let function_name = function_name.unwrap();
        // b. Let fo be InstantiateFunctionObject of f with arguments env
        //    and privateEnv.
        let function_object = instantiate_function_object(
            agent,
            function,
            EnvironmentIndex::Global(env),
            None,
        );
        // c. Perform ? env.CreateGlobalFunctionBinding(fn, fo, false).
        let name = String::from_str(agent, function_name.as_str());
        env.create_global_function_binding(agent, name, function_object.into_value(), false)?;
    }

    // 17. For each String vn of declaredVarNames, do
    for atom in declared_var_names {
        // a. Perform ? env.CreateGlobalVarBinding(vn, false).
        let name = String::from_str(agent, atom.as_str());
        env.create_global_var_binding(agent, name, false)?;
    }

    // 18. Return UNUSED.
    Ok(())
}
