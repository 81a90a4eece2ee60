//! Statement dispatch and the statement-level continuation frames.

use std::rc::Rc;

use oxc_ast::ast;
use oxc_ecmascript::BoundNames;
use oxc_span::Atom;

use super::{
    frame::{AbruptCompletion, Frame},
    vm::Vm,
};
use crate::ecmascript::{
    abstract_operations::{
        operations_on_iterator_objects::{get_iterator, iterator_step_value},
        operations_on_objects::has_property,
        testing_and_comparison::is_strictly_equal,
        type_conversion::{to_boolean, to_object},
    },
    execution::{
        agent::{resolve_binding, Agent},
        environments::{
            new_declarative_environment, new_object_environment, EnvironmentIndex,
        },
    },
    syntax_directed_operations::{
        class_definitions::class_definition_evaluation,
        function_definitions::is_anonymous_function_definition,
        scope_analysis::{
            case_block_lexically_scoped_declarations,
            statement_list_lexically_scoped_declarations, LexicallyScopedDeclaration,
        },
    },
    types::{
        language::{
            object::{internal_methods::InternalMethods, property_key::PropertyKey, Object},
            string::String,
            value::{IntoValue, Value},
        },
        spec::reference::initialize_referenced_binding,
    },
};

impl Vm {
    /// Evaluate one statement: either synchronously, or by pushing its
    /// continuation frames. `labels` carries the label set of an enclosing
    /// chain of labelled statements.
    pub(super) fn begin_statement(
        &mut self,
        agent: &mut Agent,
        statement: &'static ast::Statement<'static>,
        labels: Rc<[Atom<'static>]>,
    ) -> Result<(), AbruptCompletion> {
        match statement {
            ast::Statement::EmptyStatement(_) | ast::Statement::DebuggerStatement(_) => Ok(()),
            ast::Statement::ExpressionStatement(statement) => {
                self.frames.push(Frame::StoreResult);
                self.frames.push(Frame::Expression(&statement.expression));
                Ok(())
            }
            ast::Statement::BlockStatement(block) => {
                self.begin_block(agent, &block.body);
                Ok(())
            }
            ast::Statement::VariableDeclaration(declaration) => {
                self.begin_variable_declaration(agent, declaration)
            }
            ast::Statement::FunctionDeclaration(_) => {
                // Hoisted by the surrounding declaration instantiation.
                Ok(())
            }
            ast::Statement::ClassDeclaration(class) => {
                // BindingClassDeclarationEvaluation.
                let value = class_definition_evaluation(agent, class, None)?;
                let id = class.id.as_ref().expect("class declaration without name");
                let name = String::from_str(agent, id.name.as_str());
                let reference = resolve_binding(agent, name, None)?;
                initialize_referenced_binding(agent, &reference, value.into_value())?;
                Ok(())
            }
            ast::Statement::IfStatement(statement) => {
                self.frames.push(Frame::IfCheck(statement));
                self.frames.push(Frame::Expression(&statement.test));
                Ok(())
            }
            ast::Statement::WhileStatement(statement) => {
                let restore = self.restore_point(agent);
                self.frames.push(Frame::BreakTarget {
                    labels: labels.clone(),
                    catches_unlabeled: true,
                    restore,
                });
                self.frames.push(Frame::WhileTest { statement, labels });
                Ok(())
            }
            ast::Statement::DoWhileStatement(statement) => {
                let restore = self.restore_point(agent);
                self.frames.push(Frame::BreakTarget {
                    labels: labels.clone(),
                    catches_unlabeled: true,
                    restore,
                });
                self.push_do_while_cycle(agent, statement, labels);
                Ok(())
            }
            ast::Statement::ForStatement(statement) => {
                self.begin_for_statement(agent, statement, labels)
            }
            ast::Statement::ForInStatement(statement) => {
                let restore = self.restore_point(agent);
                self.frames.push(Frame::BreakTarget {
                    labels: labels.clone(),
                    catches_unlabeled: true,
                    restore,
                });
                self.frames.push(Frame::ForInBegin { statement, labels });
                self.begin_for_head_expression(agent, &statement.left, &statement.right);
                Ok(())
            }
            ast::Statement::ForOfStatement(statement) => {
                let restore = self.restore_point(agent);
                self.frames.push(Frame::BreakTarget {
                    labels: labels.clone(),
                    catches_unlabeled: true,
                    restore,
                });
                self.frames.push(Frame::ForOfBegin { statement, labels });
                self.begin_for_head_expression(agent, &statement.left, &statement.right);
                Ok(())
            }
            ast::Statement::SwitchStatement(statement) => {
                let restore = self.restore_point(agent);
                self.frames.push(Frame::BreakTarget {
                    labels: labels.clone(),
                    catches_unlabeled: true,
                    restore,
                });
                self.frames.push(Frame::SwitchBegin { statement, labels });
                self.frames
                    .push(Frame::Expression(&statement.discriminant));
                Ok(())
            }
            ast::Statement::TryStatement(statement) => {
                let restore = self.restore_point(agent);
                if let Some(finalizer) = &statement.finalizer {
                    self.frames.push(Frame::FinallyHandler {
                        block: finalizer,
                        restore,
                    });
                }
                if statement.handler.is_some() {
                    self.frames.push(Frame::CatchHandler {
                        r#try: statement,
                        restore,
                    });
                }
                self.begin_block(agent, &statement.block.body);
                Ok(())
            }
            ast::Statement::ThrowStatement(statement) => {
                self.frames.push(Frame::ThrowValue);
                self.frames.push(Frame::Expression(&statement.argument));
                Ok(())
            }
            ast::Statement::ReturnStatement(statement) => {
                if let Some(argument) = &statement.argument {
                    self.frames.push(Frame::ReturnValue);
                    self.frames.push(Frame::Expression(argument));
                    Ok(())
                } else {
                    Err(AbruptCompletion::Return(Value::Undefined))
                }
            }
            ast::Statement::BreakStatement(statement) => Err(AbruptCompletion::Break(
                statement.label.as_ref().map(|label| label.name),
            )),
            ast::Statement::ContinueStatement(statement) => Err(AbruptCompletion::Continue(
                statement.label.as_ref().map(|label| label.name),
            )),
            ast::Statement::LabeledStatement(statement) => {
                // Collect the chain of labels down to the labelled item.
                let mut chain: Vec<Atom<'static>> = labels.to_vec();
                chain.push(statement.label.name);
                let mut inner = &statement.body;
                while let ast::Statement::LabeledStatement(labeled) = inner {
                    chain.push(labeled.label.name);
                    inner = &labeled.body;
                }
                let chain: Rc<[Atom<'static>]> = chain.into();
                match inner {
                    ast::Statement::WhileStatement(_)
                    | ast::Statement::DoWhileStatement(_)
                    | ast::Statement::ForStatement(_)
                    | ast::Statement::ForInStatement(_)
                    | ast::Statement::ForOfStatement(_)
                    | ast::Statement::SwitchStatement(_) => {
                        self.begin_statement(agent, inner, chain)
                    }
                    _ => {
                        let restore = self.restore_point(agent);
                        self.frames.push(Frame::BreakTarget {
                            labels: chain,
                            catches_unlabeled: false,
                            restore,
                        });
                        self.begin_statement(agent, inner, Rc::from([]))
                    }
                }
            }
            ast::Statement::WithStatement(statement) => {
                self.frames.push(Frame::WithBegin { statement });
                self.frames.push(Frame::Expression(&statement.object));
                Ok(())
            }
            _ => {
                // Module items and TypeScript-only statements do not occur
                // in script-parsed source.
                Ok(())
            }
        }
    }

    /// ### [14.2.2 Block evaluation](https://tc39.es/ecma262/#sec-block-runtime-semantics-evaluation)
    pub(super) fn begin_block(
        &mut self,
        agent: &mut Agent,
        statements: &'static [ast::Statement<'static>],
    ) {
        // 1. Let oldEnv be the running execution context's
        //    LexicalEnvironment.
        let old_lexical = agent.current_lexical_environment();
        let old_variable = agent.current_variable_environment();
        // 2. Let blockEnv be NewDeclarativeEnvironment(oldEnv).
        let block_env = new_declarative_environment(agent, Some(old_lexical));
        let block_env = EnvironmentIndex::Declarative(block_env);
        // 3. Perform BlockDeclarationInstantiation(StatementList, blockEnv).
        block_declaration_instantiation(agent, statements, block_env);
        // 4. Set the running execution context's LexicalEnvironment to
        //    blockEnv.
        agent.set_current_lexical_environment(block_env);
        // 5.-6. Evaluate the statement list, then restore oldEnv.
        self.frames.push(Frame::RestoreEnvironment {
            lexical_environment: old_lexical,
            variable_environment: old_variable,
        });
        self.frames.push(Frame::StatementList {
            statements,
            index: 0,
        });
    }

    /// ### [14.15.2 CatchClauseEvaluation](https://tc39.es/ecma262/#sec-runtime-semantics-catchclauseevaluation)
    pub(super) fn begin_catch(
        &mut self,
        agent: &mut Agent,
        r#try: &'static ast::TryStatement<'static>,
        thrown: crate::ecmascript::execution::agent::JsError,
    ) -> Result<(), AbruptCompletion> {
        let handler = r#try.handler.as_ref().unwrap();
        let Some(param) = &handler.param else {
            // Catch : catch Block
            // 1. Return ? Evaluation of Block.
            self.begin_block(agent, &handler.body.body);
            return Ok(());
        };

        // 1. Let oldEnv be the running execution context's
        //    LexicalEnvironment.
        let old_lexical = agent.current_lexical_environment();
        let old_variable = agent.current_variable_environment();

        // 2. Let catchEnv be NewDeclarativeEnvironment(oldEnv).
        let catch_env = new_declarative_environment(agent, Some(old_lexical));

        // 3. For each element argName of the BoundNames of CatchParameter,
        //    perform ! catchEnv.CreateMutableBinding(argName, false).
        let mut names: Vec<Atom<'static>> = Vec::new();
        param.pattern.bound_names(&mut |identifier| names.push(identifier.name));
        for name in names {
            let name = String::from_str(agent, name.as_str());
            catch_env.create_mutable_binding(agent, name, false);
        }

        // 4. Set the running execution context's LexicalEnvironment to
        //    catchEnv.
        agent.set_current_lexical_environment(EnvironmentIndex::Declarative(catch_env));

        // 8.-9. Evaluate Block, then restore oldEnv on every exit path
        //       (the interceptors' restore points cover the abrupt paths).
        self.frames.push(Frame::RestoreEnvironment {
            lexical_environment: old_lexical,
            variable_environment: old_variable,
        });
        self.begin_block(agent, &handler.body.body);

        // 5. Let status be Completion(BindingInitialization of
        //    CatchParameter with arguments thrownValue and catchEnv).
        self.frames.push(Frame::BindingInit {
            pattern: &param.pattern,
            environment: Some(EnvironmentIndex::Declarative(catch_env)),
        });
        self.frames.push(Frame::LoadValue(thrown.value()));
        Ok(())
    }

    /// ### [14.3.1.2 / 14.3.2.1 Variable and lexical declaration evaluation](https://tc39.es/ecma262/#sec-let-and-const-declarations)
    pub(super) fn begin_variable_declaration(
        &mut self,
        agent: &mut Agent,
        declaration: &'static ast::VariableDeclaration<'static>,
    ) -> Result<(), AbruptCompletion> {
        let is_lexical = declaration.kind.is_lexical();
        let environment = if is_lexical {
            Some(agent.current_lexical_environment())
        } else {
            None
        };
        for declarator in declaration.declarations.iter().rev() {
            match &declarator.init {
                Some(init) => {
                    self.frames.push(Frame::BindingInit {
                        pattern: &declarator.id,
                        environment,
                    });
                    let name = if let ast::BindingPatternKind::BindingIdentifier(id) =
                        &declarator.id.kind
                    {
                        Some(PropertyKey::from_str(agent, id.name.as_str()))
                    } else {
                        None
                    };
                    self.push_expression_with_name(agent, init, name);
                }
                None => {
                    if is_lexical {
                        // let without an initializer: initialize to
                        // undefined.
                        let ast::BindingPatternKind::BindingIdentifier(id) = &declarator.id.kind
                        else {
                            unreachable!("lexical pattern binding without initializer");
                        };
                        let name = String::from_str(agent, id.name.as_str());
                        let reference = resolve_binding(agent, name, environment)?;
                        initialize_referenced_binding(agent, &reference, Value::Undefined)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Push an expression frame, routing anonymous function definitions
    /// through NamedEvaluation.
    pub(super) fn push_expression_with_name(
        &mut self,
        _agent: &mut Agent,
        expression: &'static ast::Expression<'static>,
        name: Option<PropertyKey>,
    ) {
        match name {
            Some(name) if is_anonymous_function_definition(expression) => {
                self.frames.push(Frame::NamedExpression { expression, name });
            }
            _ => self.frames.push(Frame::Expression(expression)),
        }
    }

    fn begin_for_statement(
        &mut self,
        agent: &mut Agent,
        statement: &'static ast::ForStatement<'static>,
        labels: Rc<[Atom<'static>]>,
    ) -> Result<(), AbruptCompletion> {
        let restore = self.restore_point(agent);
        let old_lexical = agent.current_lexical_environment();
        self.frames.push(Frame::RestoreEnvironment {
            lexical_environment: old_lexical,
            variable_environment: agent.current_variable_environment(),
        });
        self.frames.push(Frame::BreakTarget {
            labels: labels.clone(),
            catches_unlabeled: true,
            restore,
        });

        let mut per_iteration_lets: Rc<[String]> = Rc::from([]);
        match &statement.init {
            Some(ast::ForStatementInit::VariableDeclaration(declaration))
                if declaration.kind.is_lexical() =>
            {
                // 2.-9. Let loopEnv be NewDeclarativeEnvironment(oldEnv)
                //       with the bound names of the declaration, constants
                //       immutable.
                let loop_env = new_declarative_environment(agent, Some(old_lexical));
                let is_const = declaration.kind == ast::VariableDeclarationKind::Const;
                let mut atoms: Vec<Atom<'static>> = Vec::new();
                declaration.bound_names(&mut |identifier| atoms.push(identifier.name));
                let mut names = Vec::with_capacity(atoms.len());
                for atom in atoms {
                    let name = String::from_str(agent, atom.as_str());
                    if is_const {
                        loop_env.create_immutable_binding(agent, name, true);
                    } else {
                        loop_env.create_mutable_binding(agent, name, false);
                    }
                    names.push(name);
                }
                agent.set_current_lexical_environment(EnvironmentIndex::Declarative(loop_env));
                // 10. If isConst is false, let perIterationLets be
                //     BoundNames of LexicalDeclaration.
                if !is_const {
                    per_iteration_lets = names.into();
                }
                self.frames.push(Frame::ForUpdate {
                    statement,
                    labels,
                    per_iteration_lets,
                    run_update: false,
                });
                self.begin_variable_declaration(agent, declaration)?;
            }
            Some(ast::ForStatementInit::VariableDeclaration(declaration)) => {
                self.frames.push(Frame::ForUpdate {
                    statement,
                    labels,
                    per_iteration_lets,
                    run_update: false,
                });
                self.begin_variable_declaration(agent, declaration)?;
            }
            Some(init) => {
                let expression = init.as_expression().unwrap();
                self.frames.push(Frame::ForUpdate {
                    statement,
                    labels,
                    per_iteration_lets,
                    run_update: false,
                });
                self.frames.push(Frame::DiscardValue);
                self.frames.push(Frame::Expression(expression));
            }
            None => {
                self.frames.push(Frame::ForUpdate {
                    statement,
                    labels,
                    per_iteration_lets,
                    run_update: false,
                });
            }
        }
        Ok(())
    }

    /// ### [14.7.4.9 CreatePerIterationEnvironment](https://tc39.es/ecma262/#sec-createperiterationenvironment)
    fn create_per_iteration_environment(
        &mut self,
        agent: &mut Agent,
        per_iteration_lets: &[String],
    ) -> Result<(), AbruptCompletion> {
        // 1. If perIterationBindings has any elements, then
        if per_iteration_lets.is_empty() {
            return Ok(());
        }
        // a. Let lastIterationEnv be the running execution context's
        //    LexicalEnvironment.
        let last_iteration_env = agent.current_lexical_environment();
        // b. Let outer be lastIterationEnv.[[OuterEnv]].
        let outer = last_iteration_env.get_outer_env(agent);
        // d. Let thisIterationEnv be NewDeclarativeEnvironment(outer).
        let this_iteration_env = new_declarative_environment(agent, outer);
        // e. For each element bn of perIterationBindings, do
        for name in per_iteration_lets {
            // i. Perform ! thisIterationEnv.CreateMutableBinding(bn, false).
            this_iteration_env.create_mutable_binding(agent, *name, false);
            // ii. Let lastValue be ? lastIterationEnv.GetBindingValue(bn,
            //     true).
            let last_value = last_iteration_env.get_binding_value(agent, *name, true)?;
            // iii. Perform ! thisIterationEnv.InitializeBinding(bn,
            //      lastValue).
            this_iteration_env.initialize_binding(agent, *name, last_value);
        }
        // f. Set the running execution context's LexicalEnvironment to
        //    thisIterationEnv.
        agent.set_current_lexical_environment(EnvironmentIndex::Declarative(
            this_iteration_env,
        ));
        // 2. Return UNUSED.
        Ok(())
    }

    /// ForIn/OfHeadEvaluation: evaluate the head expression, inside a TDZ
    /// environment when the left-hand side is a lexical declaration.
    fn begin_for_head_expression(
        &mut self,
        agent: &mut Agent,
        left: &'static ast::ForStatementLeft<'static>,
        right: &'static ast::Expression<'static>,
    ) {
        if let ast::ForStatementLeft::VariableDeclaration(declaration) = left {
            if declaration.kind.is_lexical() {
                let old_lexical = agent.current_lexical_environment();
                let old_variable = agent.current_variable_environment();
                // 2.a. Let newEnv be NewDeclarativeEnvironment(oldEnv).
                let new_env = new_declarative_environment(agent, Some(old_lexical));
                // 2.c. For each string name of uninitializedBoundNames:
                //      perform ! newEnv.CreateMutableBinding(name, false).
                let mut atoms: Vec<Atom<'static>> = Vec::new();
                declaration.bound_names(&mut |identifier| atoms.push(identifier.name));
                for atom in atoms {
                    let name = String::from_str(agent, atom.as_str());
                    new_env.create_mutable_binding(agent, name, false);
                }
                // 2.d. Set the running execution context's
                //      LexicalEnvironment to newEnv.
                agent
                    .set_current_lexical_environment(EnvironmentIndex::Declarative(new_env));
                // 3.-5. Evaluate expr, then restore the old environment.
                self.frames.push(Frame::RestoreEnvironment {
                    lexical_environment: old_lexical,
                    variable_environment: old_variable,
                });
            }
        }
        self.frames.push(Frame::Expression(right));
    }

    /// ForIn/OfBodyEvaluation per-iteration binding of the left-hand side.
    pub(super) fn begin_for_left_binding(
        &mut self,
        agent: &mut Agent,
        left: &'static ast::ForStatementLeft<'static>,
        value: Value,
    ) -> Result<(), AbruptCompletion> {
        match left {
            ast::ForStatementLeft::VariableDeclaration(declaration) => {
                let declarator = &declaration.declarations[0];
                if declaration.kind.is_lexical() {
                    // ITERATION-ENVIRONMENT: a fresh environment per
                    // iteration holding the bound names.
                    let outer = agent.current_lexical_environment();
                    let iteration_env = new_declarative_environment(agent, Some(outer));
                    let is_const =
                        declaration.kind == ast::VariableDeclarationKind::Const;
                    let mut atoms: Vec<Atom<'static>> = Vec::new();
                    declaration.bound_names(&mut |identifier| atoms.push(identifier.name));
                    for atom in atoms {
                        let name = String::from_str(agent, atom.as_str());
                        if is_const {
                            iteration_env.create_immutable_binding(agent, name, true);
                        } else {
                            iteration_env.create_mutable_binding(agent, name, false);
                        }
                    }
                    agent.set_current_lexical_environment(EnvironmentIndex::Declarative(
                        iteration_env,
                    ));
                    self.frames.push(Frame::BindingInit {
                        pattern: &declarator.id,
                        environment: Some(EnvironmentIndex::Declarative(iteration_env)),
                    });
                    self.frames.push(Frame::LoadValue(value));
                } else {
                    // var binding: resolve and assign.
                    self.frames.push(Frame::BindingInit {
                        pattern: &declarator.id,
                        environment: None,
                    });
                    self.frames.push(Frame::LoadValue(value));
                }
                Ok(())
            }
            _ => {
                let target = left.as_assignment_target().unwrap();
                self.begin_assignment_target_binding(agent, target, value)
            }
        }
    }

    // === Frame executors =================================================

    pub(super) fn execute_if_check(
        &mut self,
        agent: &mut Agent,
        statement: &'static ast::IfStatement<'static>,
    ) -> Result<(), AbruptCompletion> {
        let test = self.pop_value();
        if to_boolean(agent, test) {
            self.begin_statement(agent, &statement.consequent, Rc::from([]))
        } else if let Some(alternate) = &statement.alternate {
            self.begin_statement(agent, alternate, Rc::from([]))
        } else {
            Ok(())
        }
    }

    pub(super) fn execute_while_test(
        &mut self,
        statement: &'static ast::WhileStatement<'static>,
        labels: Rc<[Atom<'static>]>,
    ) {
        self.frames.push(Frame::WhileCheck { statement, labels });
        self.frames.push(Frame::Expression(&statement.test));
    }

    pub(super) fn execute_while_check(
        &mut self,
        agent: &mut Agent,
        statement: &'static ast::WhileStatement<'static>,
        labels: Rc<[Atom<'static>]>,
    ) -> Result<(), AbruptCompletion> {
        let test = self.pop_value();
        if to_boolean(agent, test) {
            let restore = self.restore_point(agent);
            self.frames.push(Frame::WhileTest {
                statement,
                labels: labels.clone(),
            });
            self.frames.push(Frame::ContinueTarget { labels, restore });
            self.begin_statement(agent, &statement.body, Rc::from([]))?;
        }
        Ok(())
    }

    pub(super) fn push_do_while_cycle(
        &mut self,
        agent: &mut Agent,
        statement: &'static ast::DoWhileStatement<'static>,
        labels: Rc<[Atom<'static>]>,
    ) {
        let restore = self.restore_point(agent);
        self.frames.push(Frame::DoWhileCheck {
            statement,
            labels: labels.clone(),
        });
        self.frames.push(Frame::Expression(&statement.test));
        self.frames.push(Frame::ContinueTarget { labels, restore });
        self.frames.push(Frame::Statement(&statement.body));
    }

    pub(super) fn execute_do_while_check(
        &mut self,
        agent: &mut Agent,
        statement: &'static ast::DoWhileStatement<'static>,
        labels: Rc<[Atom<'static>]>,
    ) {
        let test = self.pop_value();
        if to_boolean(agent, test) {
            self.push_do_while_cycle(agent, statement, labels);
        }
    }

    pub(super) fn execute_for_update(
        &mut self,
        agent: &mut Agent,
        statement: &'static ast::ForStatement<'static>,
        labels: Rc<[Atom<'static>]>,
        per_iteration_lets: Rc<[String]>,
        run_update: bool,
    ) -> Result<(), AbruptCompletion> {
        self.create_per_iteration_environment(agent, &per_iteration_lets)?;
        self.frames.push(Frame::ForTest {
            statement,
            labels,
            per_iteration_lets,
        });
        if run_update {
            if let Some(update) = &statement.update {
                self.frames.push(Frame::DiscardValue);
                self.frames.push(Frame::Expression(update));
            }
        }
        Ok(())
    }

    pub(super) fn execute_for_test(
        &mut self,
        statement: &'static ast::ForStatement<'static>,
        labels: Rc<[Atom<'static>]>,
        per_iteration_lets: Rc<[String]>,
    ) {
        self.frames.push(Frame::ForCheck {
            statement,
            labels,
            per_iteration_lets,
        });
        match &statement.test {
            Some(test) => self.frames.push(Frame::Expression(test)),
            None => self.frames.push(Frame::LoadValue(Value::Boolean(true))),
        }
    }

    pub(super) fn execute_for_check(
        &mut self,
        agent: &mut Agent,
        statement: &'static ast::ForStatement<'static>,
        labels: Rc<[Atom<'static>]>,
        per_iteration_lets: Rc<[String]>,
    ) -> Result<(), AbruptCompletion> {
        let test = self.pop_value();
        if to_boolean(agent, test) {
            let restore = self.restore_point(agent);
            self.frames.push(Frame::ForUpdate {
                statement,
                labels: labels.clone(),
                per_iteration_lets,
                run_update: true,
            });
            self.frames.push(Frame::ContinueTarget { labels, restore });
            self.begin_statement(agent, &statement.body, Rc::from([]))?;
        }
        Ok(())
    }

    pub(super) fn execute_for_in_begin(
        &mut self,
        agent: &mut Agent,
        statement: &'static ast::ForInStatement<'static>,
        labels: Rc<[Atom<'static>]>,
    ) -> Result<(), AbruptCompletion> {
        let expr_value = self.pop_value();
        // 6.b. If exprValue is either undefined or null: return Completion
        //      Record { [[Type]]: BREAK }.
        if expr_value.is_nullish() {
            return Err(AbruptCompletion::Break(None));
        }
        // 6.c. Let obj be ! ToObject(exprValue).
        let object = to_object(agent, expr_value).unwrap();
        // 6.d.-e. EnumerateObjectProperties(obj).
        let keys = for_in_keys(agent, object)?;
        self.frames.push(Frame::ForInNext {
            statement,
            labels,
            object,
            keys: Rc::new(keys),
            index: 0,
        });
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    pub(super) fn execute_for_in_next(
        &mut self,
        agent: &mut Agent,
        statement: &'static ast::ForInStatement<'static>,
        labels: Rc<[Atom<'static>]>,
        object: Object,
        keys: Rc<Vec<PropertyKey>>,
        index: usize,
    ) -> Result<(), AbruptCompletion> {
        let mut index = index;
        let key = loop {
            let Some(key) = keys.get(index).copied() else {
                return Ok(());
            };
            // Properties deleted during enumeration are not visited.
            if has_property(agent, object, key)? {
                break key;
            }
            index += 1;
        };
        let key_value = key.into_value(agent);
        let restore = self.restore_point(agent);
        self.frames.push(Frame::ForInNext {
            statement,
            labels: labels.clone(),
            object,
            keys,
            index: index + 1,
        });
        self.frames.push(Frame::ContinueTarget { labels, restore });
        self.frames.push(Frame::Statement(&statement.body));
        self.begin_for_left_binding(agent, &statement.left, key_value)
    }

    pub(super) fn execute_for_of_begin(
        &mut self,
        agent: &mut Agent,
        statement: &'static ast::ForOfStatement<'static>,
        labels: Rc<[Atom<'static>]>,
    ) -> Result<(), AbruptCompletion> {
        let expr_value = self.pop_value();
        // 7. Return ? GetIterator(exprValue, iteratorKind).
        let iterator = get_iterator(agent, expr_value)?;
        self.iterators.push(iterator);
        self.frames.push(Frame::ForOfNext { statement, labels });
        Ok(())
    }

    pub(super) fn execute_for_of_next(
        &mut self,
        agent: &mut Agent,
        statement: &'static ast::ForOfStatement<'static>,
        labels: Rc<[Atom<'static>]>,
    ) -> Result<(), AbruptCompletion> {
        let iterator_index = self.iterators.len() - 1;
        let mut record = *self.iterators.last().unwrap();
        let step = iterator_step_value(agent, &mut record);
        *self.iterators.last_mut().unwrap() = record;
        let Some(value) = step? else {
            // The iterator completed; no close is needed.
            self.iterators.pop();
            return Ok(());
        };
        let restore = self.restore_point(agent);
        self.frames.push(Frame::ForOfNext {
            statement,
            labels: labels.clone(),
        });
        self.frames
            .push(Frame::IteratorCloseOnAbrupt { iterator_index });
        self.frames.push(Frame::ContinueTarget { labels, restore });
        self.frames.push(Frame::Statement(&statement.body));
        self.begin_for_left_binding(agent, &statement.left, value)
    }

    pub(super) fn execute_switch_begin(
        &mut self,
        agent: &mut Agent,
        statement: &'static ast::SwitchStatement<'static>,
    ) -> Result<(), AbruptCompletion> {
        let discriminant = self.pop_value();
        // 2. Let oldEnv be the running execution context's
        //    LexicalEnvironment.
        let old_lexical = agent.current_lexical_environment();
        let old_variable = agent.current_variable_environment();
        // 3. Let blockEnv be NewDeclarativeEnvironment(oldEnv).
        let block_env = new_declarative_environment(agent, Some(old_lexical));
        let block_env = EnvironmentIndex::Declarative(block_env);
        // 4. Perform BlockDeclarationInstantiation(CaseBlock, blockEnv).
        let declarations = case_block_lexically_scoped_declarations(&statement.cases);
        declare_lexical_bindings(agent, declarations, block_env);
        // 5. Set the running execution context's LexicalEnvironment to
        //    blockEnv.
        agent.set_current_lexical_environment(block_env);
        // 6.-8. Evaluate the case block, then restore oldEnv.
        self.frames.push(Frame::RestoreEnvironment {
            lexical_environment: old_lexical,
            variable_environment: old_variable,
        });
        self.frames.push(Frame::SwitchCaseTest {
            statement,
            discriminant,
            index: 0,
        });
        Ok(())
    }

    pub(super) fn execute_switch_case_test(
        &mut self,
        statement: &'static ast::SwitchStatement<'static>,
        discriminant: Value,
        index: usize,
    ) {
        let mut index = index;
        while let Some(case) = statement.cases.get(index) {
            if let Some(test) = &case.test {
                self.frames.push(Frame::SwitchCaseCheck {
                    statement,
                    discriminant,
                    index,
                });
                self.frames.push(Frame::Expression(test));
                return;
            }
            index += 1;
        }
        // No further case clause matched; run from the default clause if
        // one exists.
        if let Some(default_index) = statement
            .cases
            .iter()
            .position(|case| case.test.is_none())
        {
            self.frames.push(Frame::SwitchRunCases {
                statement,
                case_index: default_index,
            });
        }
    }

    pub(super) fn execute_switch_case_check(
        &mut self,
        agent: &mut Agent,
        statement: &'static ast::SwitchStatement<'static>,
        discriminant: Value,
        index: usize,
    ) {
        let test = self.pop_value();
        // CaseClauseIsSelected: IsStrictlyEqual(input, clauseSelector).
        if is_strictly_equal(agent, discriminant, test) {
            self.frames.push(Frame::SwitchRunCases {
                statement,
                case_index: index,
            });
        } else {
            self.execute_switch_case_test(statement, discriminant, index + 1);
        }
    }

    pub(super) fn execute_switch_run_cases(
        &mut self,
        statement: &'static ast::SwitchStatement<'static>,
        case_index: usize,
    ) {
        if let Some(case) = statement.cases.get(case_index) {
            self.frames.push(Frame::SwitchRunCases {
                statement,
                case_index: case_index + 1,
            });
            self.frames.push(Frame::StatementList {
                statements: &case.consequent,
                index: 0,
            });
        }
    }

    pub(super) fn execute_with_begin(
        &mut self,
        agent: &mut Agent,
        statement: &'static ast::WithStatement<'static>,
    ) -> Result<(), AbruptCompletion> {
        // 1.-2. Let obj be ? ToObject(? GetValue(val)).
        let value = self.pop_value();
        let object = to_object(agent, value)?;
        // 3. Let oldEnv be the running execution context's
        //    LexicalEnvironment.
        let old_lexical = agent.current_lexical_environment();
        let old_variable = agent.current_variable_environment();
        // 4. Let newEnv be NewObjectEnvironment(obj, true, oldEnv).
        let new_env = new_object_environment(agent, object, true, Some(old_lexical));
        // 5. Set the running execution context's LexicalEnvironment to
        //    newEnv.
        agent.set_current_lexical_environment(EnvironmentIndex::Object(new_env));
        // 6.-8. Evaluate the statement, then restore oldEnv.
        self.frames.push(Frame::RestoreEnvironment {
            lexical_environment: old_lexical,
            variable_environment: old_variable,
        });
        self.frames.push(Frame::Statement(&statement.body));
        Ok(())
    }
}

/// ### [14.2.3 BlockDeclarationInstantiation ( code, env )](https://tc39.es/ecma262/#sec-blockdeclarationinstantiation)
pub(crate) fn block_declaration_instantiation(
    agent: &mut Agent,
    statements: &'static [ast::Statement<'static>],
    env: EnvironmentIndex,
) {
    let declarations = statement_list_lexically_scoped_declarations(statements);
    declare_lexical_bindings(agent, declarations, env);
}

fn declare_lexical_bindings(
    agent: &mut Agent,
    declarations: Vec<LexicallyScopedDeclaration>,
    env: EnvironmentIndex,
) {
    let private_env = agent.current_private_environment();
    // 1. Let declarations be the LexicallyScopedDeclarations of code.
    // 2. For each element d of declarations, do
    for declaration in declarations {
        // a. For each element dn of the BoundNames of d, do
        let mut names: Vec<Atom<'static>> = Vec::new();
        declaration.bound_names(&mut |name| names.push(name));
        for name in names {
            let name = String::from_str(agent, name.as_str());
            if declaration.is_constant_declaration() {
                // i. If IsConstantDeclaration of d is true:
                //    perform ! env.CreateImmutableBinding(dn, true).
                env.create_immutable_binding(agent, name, true).unwrap();
            } else if !env.has_binding(agent, name).unwrap() {
                // ii. Else: perform ! env.CreateMutableBinding(dn, false).
                env.create_mutable_binding(agent, name, false).unwrap();
            }
        }
        // b. If d is either a FunctionDeclaration or a GeneratorDeclaration:
        if let LexicallyScopedDeclaration::Function(function) = declaration {
            // i. Let fn be the sole element of the BoundNames of d.
            let mut function_name = None;
            function.bound_names(&mut |identifier| function_name = Some(identifier.name));
            let function_name = function_name.unwrap();
            // ii. Let fo be InstantiateFunctionObject of d with arguments
            //     env and privateEnv.
            let function_object =
                crate::ecmascript::syntax_directed_operations::function_definitions::instantiate_function_object(
                    agent, function, env, private_env,
                );
            // iii. Perform ! env.InitializeBinding(fn, fo).
            let name = String::from_str(agent, function_name.as_str());
            env.initialize_binding(agent, name, function_object.into_value())
                .unwrap();
        }
    }
}

/// ### [14.7.5.9 EnumerateObjectProperties ( O )](https://tc39.es/ecma262/#sec-enumerate-object-properties)
///
/// The for-in key list: own enumerable string-keyed properties of each
/// object on the prototype chain, in OwnPropertyKeys order, with keys
/// already seen at an inner level (even non-enumerably) suppressing outer
/// occurrences.
fn for_in_keys(agent: &mut Agent, object: Object) -> crate::ecmascript::execution::JsResult<Vec<PropertyKey>> {
    let mut keys = Vec::new();
    let mut visited: Vec<PropertyKey> = Vec::new();
    let mut current = Some(object);
    while let Some(object) = current {
        for key in object.internal_own_property_keys(agent)? {
            if matches!(key, PropertyKey::Symbol(_)) {
                continue;
            }
            if visited.contains(&key) {
                continue;
            }
            visited.push(key);
            let Some(descriptor) = object.internal_get_own_property(agent, key)? else {
                continue;
            };
            if descriptor.enumerable == Some(true) {
                keys.push(key);
            }
        }
        current = object.internal_get_prototype_of(agent)?;
    }
    Ok(keys)
}
