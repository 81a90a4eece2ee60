//! Expression dispatch, the expression continuation frames, and the frame
//! dispatcher itself.

use std::rc::Rc;

use oxc_ast::ast;
use oxc_span::Atom;
use oxc_syntax::operator::{
    AssignmentOperator, BinaryOperator, LogicalOperator, UnaryOperator, UpdateOperator,
};

use super::{
    frame::{AbruptCompletion, Frame, MemberKey},
    vm::{DelegateOutcome, FrameOutcome, Vm},
};
use crate::{
    ecmascript::{
        abstract_operations::{
            operations_on_iterator_objects::{
                create_iter_result_object, get_iterator, iterator_close_with_value,
                iterator_complete, iterator_next, iterator_value,
            },
            operations_on_objects::{
                call, call_function, construct, copy_data_properties,
                create_data_property, create_data_property_or_throw, get_method, has_property,
                initialize_instance_elements, instanceof_operator, private_element_find,
                set_integrity_level, IntegrityLevel,
            },
            testing_and_comparison::{
                is_callable, is_constructor, is_less_than, is_loosely_equal, is_strictly_equal,
            },
            type_conversion::{
                to_boolean, to_int32_number, to_number, to_numeric, to_object, to_primitive,
                to_property_key, to_string, to_uint32_number,
            },
        },
        builtins::{
            array::abstract_operations::array_create,
            builtin_function::ArgumentsList,
            ecmascript_function::ECMAScriptFunction,
            ordinary::ordinary_object_create_with_intrinsics,
        },
        execution::{
            agent::{resolve_binding, Agent, ExceptionType, JsError, JsResult},
            environments::EnvironmentIndex,
            execution_context::get_this_environment,
            realm::ProtoIntrinsics,
        },
        plugins::ExtensionNodeKind,
        syntax_directed_operations::{
            class_definitions::{
                class_definition_evaluation, method_definition_evaluation, MethodKind,
            },
            function_definitions::{
                instantiate_arrow_function_expression, instantiate_ordinary_function_expression,
                is_anonymous_function_definition, named_evaluation,
            },
        },
        types::{
            language::{
                bigint::BigInt,
                function::Function,
                object::{
                    internal_methods::InternalMethods, property_key::PropertyKey, IntoObject,
                    Object,
                },
                string::String,
                value::{IntoValue, Value},
            },
            spec::reference::{
                get_this_value, get_value, initialize_referenced_binding, put_value, Reference,
            },
        },
    },
};

impl Vm {
    /// Execute one popped frame.
    pub(super) fn execute_frame(
        &mut self,
        agent: &mut Agent,
        frame: Frame,
    ) -> Result<FrameOutcome, AbruptCompletion> {
        match frame {
            // === Dispatch ================================================
            Frame::Statement(statement) => {
                self.begin_statement(agent, statement, Rc::from([]))?;
            }
            Frame::StatementList { statements, index } => {
                if let Some(statement) = statements.get(index) {
                    self.frames.push(Frame::StatementList {
                        statements,
                        index: index + 1,
                    });
                    self.begin_statement(agent, statement, Rc::from([]))?;
                }
            }
            Frame::Expression(expression) => {
                self.begin_expression(agent, expression)?;
            }
            Frame::NamedExpression { expression, name } => {
                let value = named_evaluation(agent, expression, name)?;
                self.push_value(value);
            }
            Frame::LoadValue(value) => self.push_value(value),

            // === Generic continuations ==================================
            Frame::DiscardValue => {
                self.pop_value();
            }
            Frame::StoreResult => {
                let value = self.pop_value();
                self.result = Some(value);
            }
            Frame::ToStringValue => {
                let value = self.pop_value();
                let string = to_string(agent, value)?;
                self.push_value(string.into_value());
            }
            Frame::TemplateConcat { template } => self.execute_template_concat(agent, template)?,
            Frame::UnaryApply { operator } => self.execute_unary_apply(agent, operator)?,
            Frame::BinaryApply { operator } => {
                let rval = self.pop_value();
                let lval = self.pop_value();
                let result = apply_binary_operator(agent, operator, lval, rval)?;
                self.push_value(result);
            }
            Frame::LogicalCheck { operator, right } => {
                let lval = self.pop_value();
                let done = match operator {
                    LogicalOperator::And => !to_boolean(agent, lval),
                    LogicalOperator::Or => to_boolean(agent, lval),
                    LogicalOperator::Coalesce => !lval.is_nullish(),
                };
                if done {
                    self.push_value(lval);
                } else {
                    self.frames.push(Frame::Expression(right));
                }
            }
            Frame::ConditionalCheck {
                consequent,
                alternate,
            } => {
                let test = self.pop_value();
                if to_boolean(agent, test) {
                    self.frames.push(Frame::Expression(consequent));
                } else {
                    self.frames.push(Frame::Expression(alternate));
                }
            }
            Frame::OptionalCheck => {
                let value = self.pop_value();
                if value.is_nullish() {
                    return Err(AbruptCompletion::ShortCircuit);
                }
                self.push_value(value);
            }
            Frame::ChainEnd { .. } => {
                // Normal completion of the chain; the result is on the
                // stack.
            }

            // === References =============================================
            Frame::BuildPropertyReference { key, strict } => {
                self.execute_build_property_reference(agent, key, strict)?;
            }
            Frame::BuildSuperReference {
                computed,
                field,
                strict,
            } => {
                self.execute_build_super_reference(agent, computed, field, strict)?;
            }
            Frame::RefGetValue => {
                let reference = self.pop_reference();
                let value = get_value(agent, &reference)?;
                self.push_value(value);
            }
            Frame::RefGetValueKeep => {
                let reference = *self.references.last().expect("reference stack underflow");
                let value = get_value(agent, &reference)?;
                self.push_value(value);
            }
            Frame::PutValue => {
                let value = self.pop_value();
                let reference = self.pop_reference();
                put_value(agent, &reference, value)?;
                self.push_value(value);
            }
            Frame::InitializeRef => {
                let value = self.pop_value();
                let reference = self.pop_reference();
                initialize_referenced_binding(agent, &reference, value)?;
            }
            Frame::CompoundApply { operator } => {
                let rval = self.pop_value();
                let lval = self.pop_value();
                let result = apply_binary_operator(agent, operator, lval, rval)?;
                self.push_value(result);
            }
            Frame::LogicalAssignCheck {
                operator,
                right,
                name,
            } => {
                let lval = self.pop_value();
                let done = match operator {
                    LogicalOperator::And => !to_boolean(agent, lval),
                    LogicalOperator::Or => to_boolean(agent, lval),
                    LogicalOperator::Coalesce => !lval.is_nullish(),
                };
                if done {
                    self.pop_reference();
                    self.push_value(lval);
                } else {
                    self.frames.push(Frame::PutValue);
                    match name {
                        Some(name) if is_anonymous_function_definition(right) => {
                            self.frames.push(Frame::NamedExpression {
                                expression: right,
                                name,
                            });
                        }
                        _ => self.frames.push(Frame::Expression(right)),
                    }
                }
            }
            Frame::UpdateApply { operator, prefix } => {
                let reference = self.pop_reference();
                let old_value = get_value(agent, &reference)?;
                let old_value = to_numeric(agent, old_value)?;
                let new_value = match (operator, old_value) {
                    (UpdateOperator::Increment, Value::Number(n)) => Value::Number(n + 1.0),
                    (UpdateOperator::Decrement, Value::Number(n)) => Value::Number(n - 1.0),
                    (UpdateOperator::Increment, Value::BigInt(b)) => {
                        let one = BigInt::from_i64(agent, 1);
                        BigInt::add(agent, b, one).into_value()
                    }
                    (UpdateOperator::Decrement, Value::BigInt(b)) => {
                        let one = BigInt::from_i64(agent, 1);
                        BigInt::subtract(agent, b, one).into_value()
                    }
                    _ => unreachable!(),
                };
                put_value(agent, &reference, new_value)?;
                self.push_value(if prefix { new_value } else { old_value });
            }
            Frame::DeleteApply => self.execute_delete(agent)?,
            Frame::PrivateInApply { field } => {
                let rval = self.pop_value();
                let Ok(object) = Object::try_from(rval) else {
                    return Err(agent
                        .throw_exception_with_static_message(
                            ExceptionType::TypeError,
                            "Cannot use 'in' operator to search for a private field in a non-object",
                        )
                        .into());
                };
                let private_name = resolve_private_name(agent, field)?;
                let found = private_element_find(agent, object, private_name).is_some();
                self.push_value(found.into());
            }

            // === Calls ===================================================
            Frame::CallWithRef {
                arguments,
                optional_call,
            } => {
                let reference = self.pop_reference();
                let this_value = if reference.is_property_reference() {
                    get_this_value(&reference)
                } else {
                    reference
                        .base_env()
                        .with_base_object(agent)
                        .map_or(Value::Undefined, |o| o.into_value())
                };
                let func = get_value(agent, &reference)?;
                if optional_call && func.is_nullish() {
                    return Err(AbruptCompletion::ShortCircuit);
                }
                self.push_value(this_value);
                self.push_value(func);
                self.begin_arguments(arguments, Frame::CallApply);
            }
            Frame::CallWithValue {
                arguments,
                optional_call,
            } => {
                let func = self.pop_value();
                if optional_call && func.is_nullish() {
                    return Err(AbruptCompletion::ShortCircuit);
                }
                self.push_value(Value::Undefined);
                self.push_value(func);
                self.begin_arguments(arguments, Frame::CallApply);
            }
            Frame::CallApply => {
                let args = self.lists.pop().expect("list stack underflow");
                let func = self.pop_value();
                let this_value = self.pop_value();
                let result = call(agent, func, this_value, Some(ArgumentsList(&args)))?;
                self.push_value(result);
            }
            Frame::ConstructWithValue { arguments } => {
                let constructor = self.pop_value();
                self.push_value(constructor);
                self.begin_arguments(arguments, Frame::ConstructApply);
            }
            Frame::ConstructApply => {
                let args = self.lists.pop().expect("list stack underflow");
                let constructor = self.pop_value();
                let Some(constructor) = is_constructor(agent, constructor) else {
                    return Err(agent
                        .throw_exception_with_static_message(
                            ExceptionType::TypeError,
                            "Not a constructor",
                        )
                        .into());
                };
                let result =
                    construct(agent, constructor, Some(ArgumentsList(&args)), None)?;
                self.push_value(result.into_value());
            }
            Frame::SuperCall { arguments } => {
                self.begin_arguments(arguments, Frame::SuperCallApply);
            }
            Frame::SuperCallApply => self.execute_super_call_apply(agent)?,
            Frame::PushToList => {
                let value = self.pop_value();
                self.lists
                    .last_mut()
                    .expect("list stack underflow")
                    .push(value);
            }
            Frame::SpreadBegin => {
                let value = self.pop_value();
                let iterator = get_iterator(agent, value)?;
                self.iterators.push(iterator);
                self.frames.push(Frame::SpreadStep);
            }
            Frame::SpreadStep => {
                let mut record = *self.iterators.last().unwrap();
                let step =
                    crate::ecmascript::abstract_operations::operations_on_iterator_objects::iterator_step_value(
                        agent,
                        &mut record,
                    );
                *self.iterators.last_mut().unwrap() = record;
                match step? {
                    Some(value) => {
                        self.lists
                            .last_mut()
                            .expect("list stack underflow")
                            .push(value);
                        self.frames.push(Frame::SpreadStep);
                    }
                    None => {
                        self.iterators.pop();
                    }
                }
            }
            Frame::TaggedTemplateCall { tagged, with_ref } => {
                self.execute_tagged_template_call(agent, tagged, with_ref)?;
            }

            // === Object and array literals ==============================
            Frame::ObjectDefineProperty { property, key } => {
                self.execute_object_define_property(agent, property, key)?;
            }
            Frame::ObjectComputedKey { property } => {
                let key_value = self.pop_value();
                let key = to_property_key(agent, key_value)?;
                self.push_object_property_value(agent, property, key);
            }
            Frame::ObjectSpread => {
                let source = self.pop_value();
                let object = Object::try_from(self.peek_value()).unwrap();
                copy_data_properties(agent, object, source, &[])?;
            }
            Frame::ObjectSetPrototype => {
                let value = self.pop_value();
                let object = Object::try_from(self.peek_value()).unwrap();
                match value {
                    Value::Null => {
                        object.internal_set_prototype_of(agent, None)?;
                    }
                    _ => {
                        if let Ok(proto) = Object::try_from(value) {
                            object.internal_set_prototype_of(agent, Some(proto))?;
                        }
                        // Non-object values are ignored.
                    }
                }
            }
            Frame::ArrayLiteralNext { elements, index } => {
                self.execute_array_literal_next(agent, elements, index)?;
            }
            Frame::ArrayAppend => {
                let value = self.pop_value();
                let Value::Array(array) = self.peek_value() else {
                    unreachable!()
                };
                let index = agent[array].len;
                create_data_property_or_throw(
                    agent,
                    array,
                    PropertyKey::Integer(index),
                    value,
                )?;
            }
            Frame::ArraySpreadBegin => {
                let value = self.pop_value();
                let iterator = get_iterator(agent, value)?;
                self.iterators.push(iterator);
                self.frames.push(Frame::ArraySpreadStep);
            }
            Frame::ArraySpreadStep => {
                let mut record = *self.iterators.last().unwrap();
                let step =
                    crate::ecmascript::abstract_operations::operations_on_iterator_objects::iterator_step_value(
                        agent,
                        &mut record,
                    );
                *self.iterators.last_mut().unwrap() = record;
                match step? {
                    Some(value) => {
                        let Value::Array(array) = self.peek_value() else {
                            unreachable!()
                        };
                        let index = agent[array].len;
                        create_data_property(
                            agent,
                            array,
                            PropertyKey::Integer(index),
                            value,
                        )?;
                        self.frames.push(Frame::ArraySpreadStep);
                    }
                    None => {
                        self.iterators.pop();
                    }
                }
            }

            // === Control-flow targets on their normal path ===============
            Frame::BreakTarget { restore, .. } | Frame::ContinueTarget { restore, .. } => {
                self.restore(agent, restore);
            }
            Frame::RestoreEnvironment {
                lexical_environment,
                variable_environment,
            } => {
                agent.set_current_lexical_environment(lexical_environment);
                agent.set_current_variable_environment(variable_environment);
            }
            Frame::CatchHandler { .. } => {}
            Frame::FinallyHandler { block, .. } => {
                // The try block completed normally; run the finalizer with
                // no pending completion.
                self.frames
                    .push(Frame::FinallyCompletion { completion: None });
                self.begin_block(agent, &block.body);
            }
            Frame::FinallyCompletion { completion } => {
                // The finalizer completed normally; resume the prior
                // completion.
                if let Some(completion) = completion {
                    return Err(completion);
                }
            }
            Frame::IteratorCloseOnAbrupt { .. } => {}
            Frame::ArrayPatternClose { iterator_index } => {
                let record = self.iterators[iterator_index];
                self.iterators.truncate(iterator_index);
                if !record.done {
                    crate::ecmascript::abstract_operations::operations_on_iterator_objects::iterator_close_with_value(
                        agent,
                        record.iterator,
                        Value::Undefined,
                    )?;
                }
            }

            // === Statements =============================================
            Frame::IfCheck(statement) => self.execute_if_check(agent, statement)?,
            Frame::WhileTest { statement, labels } => {
                self.execute_while_test(statement, labels)
            }
            Frame::WhileCheck { statement, labels } => {
                self.execute_while_check(agent, statement, labels)?
            }
            Frame::DoWhileCheck { statement, labels } => {
                self.execute_do_while_check(agent, statement, labels)
            }
            Frame::ForTest {
                statement,
                labels,
                per_iteration_lets,
            } => self.execute_for_test(statement, labels, per_iteration_lets),
            Frame::ForCheck {
                statement,
                labels,
                per_iteration_lets,
            } => self.execute_for_check(agent, statement, labels, per_iteration_lets)?,
            Frame::ForUpdate {
                statement,
                labels,
                per_iteration_lets,
                run_update,
            } => self.execute_for_update(
                agent,
                statement,
                labels,
                per_iteration_lets,
                run_update,
            )?,
            Frame::ForInBegin { statement, labels } => {
                self.execute_for_in_begin(agent, statement, labels)?
            }
            Frame::ForInNext {
                statement,
                labels,
                object,
                keys,
                index,
            } => self.execute_for_in_next(agent, statement, labels, object, keys, index)?,
            Frame::ForOfBegin { statement, labels } => {
                self.execute_for_of_begin(agent, statement, labels)?
            }
            Frame::ForOfNext { statement, labels } => {
                self.execute_for_of_next(agent, statement, labels)?
            }
            Frame::WithBegin { statement } => self.execute_with_begin(agent, statement)?,
            Frame::SwitchBegin { statement, .. } => self.execute_switch_begin(agent, statement)?,
            Frame::SwitchCaseTest {
                statement,
                discriminant,
                index,
            } => self.execute_switch_case_test(statement, discriminant, index),
            Frame::SwitchCaseCheck {
                statement,
                discriminant,
                index,
            } => self.execute_switch_case_check(agent, statement, discriminant, index),
            Frame::SwitchRunCases {
                statement,
                case_index,
            } => self.execute_switch_run_cases(statement, case_index),
            Frame::ReturnValue => {
                let value = self.pop_value();
                return Err(AbruptCompletion::Return(value));
            }
            Frame::ThrowValue => {
                let value = self.pop_value();
                return Err(AbruptCompletion::Throw(JsError::new(value)));
            }

            // === Function bodies ========================================
            Frame::FunctionVarScopes { function } => {
                super::function_declaration_instantiation::instantiate_function_var_scopes(
                    agent, self, function,
                )?;
            }
            Frame::EvaluateBody { function } => self.execute_evaluate_body(agent, function),

            // === Generators =============================================
            Frame::Yield => {
                let value = self.pop_value();
                let iter_result = create_iter_result_object(agent, value, false);
                return Ok(FrameOutcome::Yield(iter_result.into_value()));
            }
            Frame::YieldDelegateBegin => {
                let value = self.pop_value();
                let iterator = get_iterator(agent, value)?;
                self.iterators.push(iterator);
                let iterator_index = self.iterators.len() - 1;
                self.frames.push(Frame::YieldDelegate {
                    iterator_index,
                    resumed: false,
                });
                self.frames.push(Frame::LoadValue(Value::Undefined));
            }
            Frame::YieldDelegate { iterator_index, .. } => {
                let received = self.pop_value();
                let record = self.iterators[iterator_index];
                // Let innerResult be ? Call(iteratorRecord.[[NextMethod]],
                // iteratorRecord.[[Iterator]], « received.[[Value]] »).
                let inner_result = iterator_next(agent, &record, Some(received))?;
                let done = iterator_complete(agent, inner_result)?;
                if done {
                    // Return ? IteratorValue(innerResult).
                    let value = iterator_value(agent, inner_result)?;
                    self.iterators.truncate(iterator_index);
                    self.push_value(value);
                } else {
                    self.frames.push(Frame::YieldDelegate {
                        iterator_index,
                        resumed: true,
                    });
                    return Ok(FrameOutcome::Yield(inner_result.into_value()));
                }
            }

            // === Patterns ===============================================
            Frame::BindingInit {
                pattern,
                environment,
            } => {
                let value = self.pop_value();
                self.bind_pattern(agent, pattern, value, environment)?;
            }
            Frame::ObjectPatternNext {
                pattern,
                index,
                environment,
                source,
                seen,
            } => {
                self.execute_object_pattern_next(agent, pattern, index, environment, source, seen)?;
            }
            Frame::ObjectPatternComputedKey {
                pattern,
                index,
                environment,
                source,
                seen,
            } => {
                self.execute_object_pattern_computed_key(
                    agent,
                    pattern,
                    index,
                    environment,
                    source,
                    seen,
                )?;
            }
            Frame::ArrayPatternNext {
                pattern,
                index,
                environment,
                iterator_index,
            } => {
                self.execute_array_pattern_next(
                    agent,
                    pattern,
                    index,
                    environment,
                    iterator_index,
                )?;
            }
            Frame::AssignmentPatternInit { target } => {
                let value = self.pop_value();
                self.begin_destructuring_assignment(agent, target, value)?;
            }
            Frame::ObjectAssignNext {
                pattern,
                index,
                source,
                seen,
            } => {
                self.execute_object_assign_next(agent, pattern, index, source, seen)?;
            }
            Frame::ObjectAssignComputedKey {
                pattern,
                index,
                source,
                seen,
            } => {
                self.execute_object_assign_computed_key(agent, pattern, index, source, seen)?;
            }
            Frame::ArrayAssignNext {
                pattern,
                index,
                iterator_index,
            } => {
                self.execute_array_assign_next(agent, pattern, index, iterator_index)?;
            }
            Frame::DuplicateValue => {
                let value = self.peek_value();
                self.push_value(value);
            }
        }
        Ok(FrameOutcome::Continue)
    }

    /// Evaluate one expression: either synchronously pushing its value, or
    /// by pushing its continuation frames.
    pub(super) fn begin_expression(
        &mut self,
        agent: &mut Agent,
        expression: &'static ast::Expression<'static>,
    ) -> Result<(), AbruptCompletion> {
        match expression {
            // === Primary expressions ====================================
            ast::Expression::BooleanLiteral(literal) => {
                self.push_value(literal.value.into());
            }
            ast::Expression::NullLiteral(_) => self.push_value(Value::Null),
            ast::Expression::NumericLiteral(literal) => {
                self.push_value(Value::Number(literal.value));
            }
            ast::Expression::StringLiteral(literal) => {
                let string = String::from_str(agent, literal.value.as_str());
                self.push_value(string.into_value());
            }
            ast::Expression::BigIntLiteral(literal) => {
                let value = parse_bigint_literal(agent, literal)?;
                self.push_value(value.into_value());
            }
            ast::Expression::RegExpLiteral(_) => {
                match agent.evaluation_extension(ExtensionNodeKind::RegExpLiteral) {
                    Some(handler) => {
                        let value = handler(agent, expression)?;
                        self.push_value(value);
                    }
                    None => {
                        return Err(agent
                            .throw_exception_with_static_message(
                                ExceptionType::SyntaxError,
                                "Regular expressions require a host plugin",
                            )
                            .into());
                    }
                }
            }
            ast::Expression::Identifier(identifier) => {
                let name = String::from_str(agent, identifier.name.as_str());
                let reference = resolve_binding(agent, name, None)?;
                let value = get_value(agent, &reference)?;
                self.push_value(value);
            }
            ast::Expression::ThisExpression(_) => {
                let value = resolve_this_binding(agent)?;
                self.push_value(value);
            }
            ast::Expression::MetaProperty(meta) => {
                // new.target is the only meta property in script code.
                if meta.meta.name == "new" {
                    let this_env = get_this_environment(agent);
                    let EnvironmentIndex::Function(this_env) = this_env else {
                        unreachable!("new.target outside a function environment")
                    };
                    let value = this_env
                        .get_new_target(agent)
                        .map_or(Value::Undefined, |o| o.into_value());
                    self.push_value(value);
                } else {
                    self.push_value(Value::Undefined);
                }
            }
            ast::Expression::ArrayExpression(array) => {
                let array_object = array_create(agent, 0, None)?;
                self.push_value(array_object.into_value());
                self.frames.push(Frame::ArrayLiteralNext {
                    elements: &array.elements,
                    index: 0,
                });
            }
            ast::Expression::ObjectExpression(object) => {
                self.begin_object_literal(agent, object);
            }
            ast::Expression::FunctionExpression(function) => {
                let closure = instantiate_ordinary_function_expression(agent, function, None);
                self.push_value(closure.into_value());
            }
            ast::Expression::ArrowFunctionExpression(arrow) => {
                let closure = instantiate_arrow_function_expression(agent, arrow, None);
                self.push_value(closure.into_value());
            }
            ast::Expression::ClassExpression(class) => {
                let constructor = class_definition_evaluation(agent, class, None)?;
                self.push_value(constructor.into_value());
            }
            ast::Expression::TemplateLiteral(template) => {
                self.begin_template_literal(agent, template)?;
            }
            ast::Expression::TaggedTemplateExpression(tagged) => {
                self.begin_tagged_template(agent, tagged)?;
            }
            ast::Expression::ParenthesizedExpression(parenthesized) => {
                self.begin_expression(agent, &parenthesized.expression)?;
            }

            // === Member access ==========================================
            ast::Expression::ComputedMemberExpression(_)
            | ast::Expression::StaticMemberExpression(_)
            | ast::Expression::PrivateFieldExpression(_) => {
                self.frames.push(Frame::RefGetValue);
                self.begin_member_reference(agent, expression)?;
            }
            ast::Expression::ChainExpression(chain) => {
                let restore = self.restore_point(agent);
                self.frames.push(Frame::ChainEnd {
                    restore,
                    short_circuit_value: Value::Undefined,
                });
                match &chain.expression {
                    ast::ChainElement::CallExpression(call_expression) => {
                        self.begin_call_expression(agent, call_expression)?;
                    }
                    _ => {
                        let member = chain
                            .expression
                            .as_member_expression()
                            .expect("chain element is not a member expression");
                        self.frames.push(Frame::RefGetValue);
                        self.begin_member_expression_reference(agent, member)?;
                    }
                }
            }

            // === Calls ===================================================
            ast::Expression::CallExpression(call_expression) => {
                self.begin_call_expression(agent, call_expression)?;
            }
            ast::Expression::NewExpression(new_expression) => {
                self.frames.push(Frame::ConstructWithValue {
                    arguments: &new_expression.arguments,
                });
                self.frames.push(Frame::Expression(&new_expression.callee));
            }
            ast::Expression::ImportExpression(_) => {
                match agent.evaluation_extension(ExtensionNodeKind::ImportExpression) {
                    Some(handler) => {
                        let value = handler(agent, expression)?;
                        self.push_value(value);
                    }
                    None => {
                        return Err(agent
                            .throw_exception_with_static_message(
                                ExceptionType::TypeError,
                                "Dynamic import requires a host plugin",
                            )
                            .into());
                    }
                }
            }

            // === Operators ==============================================
            ast::Expression::UnaryExpression(unary) => {
                self.begin_unary_expression(agent, unary)?;
            }
            ast::Expression::BinaryExpression(binary) => {
                self.frames.push(Frame::BinaryApply {
                    operator: binary.operator,
                });
                self.frames.push(Frame::Expression(&binary.right));
                self.frames.push(Frame::Expression(&binary.left));
            }
            ast::Expression::PrivateInExpression(private_in) => {
                self.frames.push(Frame::PrivateInApply {
                    field: private_in.left.name,
                });
                self.frames.push(Frame::Expression(&private_in.right));
            }
            ast::Expression::LogicalExpression(logical) => {
                self.frames.push(Frame::LogicalCheck {
                    operator: logical.operator,
                    right: &logical.right,
                });
                self.frames.push(Frame::Expression(&logical.left));
            }
            ast::Expression::ConditionalExpression(conditional) => {
                self.frames.push(Frame::ConditionalCheck {
                    consequent: &conditional.consequent,
                    alternate: &conditional.alternate,
                });
                self.frames.push(Frame::Expression(&conditional.test));
            }
            ast::Expression::SequenceExpression(sequence) => {
                let count = sequence.expressions.len();
                for (index, expression) in sequence.expressions.iter().enumerate().rev() {
                    if index != count - 1 {
                        self.frames.push(Frame::DiscardValue);
                    }
                    self.frames.push(Frame::Expression(expression));
                }
            }
            ast::Expression::UpdateExpression(update) => {
                self.frames.push(Frame::UpdateApply {
                    operator: update.operator,
                    prefix: update.prefix,
                });
                self.begin_simple_assignment_target_reference(agent, &update.argument)?;
            }
            ast::Expression::AssignmentExpression(assignment) => {
                self.begin_assignment_expression(agent, assignment)?;
            }

            // === Generators =============================================
            ast::Expression::YieldExpression(yield_expression) => {
                if yield_expression.delegate {
                    self.frames.push(Frame::YieldDelegateBegin);
                    self.frames.push(Frame::Expression(
                        yield_expression
                            .argument
                            .as_ref()
                            .expect("yield* without an argument"),
                    ));
                } else {
                    self.frames.push(Frame::Yield);
                    match &yield_expression.argument {
                        Some(argument) => self.frames.push(Frame::Expression(argument)),
                        None => self.frames.push(Frame::LoadValue(Value::Undefined)),
                    }
                }
            }
            ast::Expression::AwaitExpression(_) => {
                match agent.evaluation_extension(ExtensionNodeKind::AwaitExpression) {
                    Some(handler) => {
                        let value = handler(agent, expression)?;
                        self.push_value(value);
                    }
                    None => {
                        return Err(agent
                            .throw_exception_with_static_message(
                                ExceptionType::SyntaxError,
                                "await is only available through a host plugin",
                            )
                            .into());
                    }
                }
            }

            ast::Expression::Super(_) => {
                unreachable!("super outside a call or member position")
            }
            other => {
                // JSX and TypeScript expression kinds do not occur in
                // script-parsed source.
                let _ = other;
                self.push_value(Value::Undefined);
            }
        }
        Ok(())
    }
}

/// ### [13.4 ResolveThisBinding](https://tc39.es/ecma262/#sec-resolvethisbinding)
fn resolve_this_binding(agent: &mut Agent) -> JsResult<Value> {
    // 1. Let envRec be GetThisEnvironment().
    let env_rec = get_this_environment(agent);
    // 2. Return ? envRec.GetThisBinding().
    match env_rec {
        EnvironmentIndex::Function(env) => env.get_this_binding(agent),
        EnvironmentIndex::Global(env) => Ok(env.get_this_binding(agent).into_value()),
        EnvironmentIndex::Module(_) => Ok(Value::Undefined),
        _ => unreachable!(),
    }
}

fn resolve_private_name(agent: &mut Agent, field: Atom<'static>) -> JsResult<crate::ecmascript::types::PrivateName> {
    let private_name = agent.current_private_environment().and_then(|environment| {
        let description = String::from_str(agent, field.as_str());
        environment.resolve_private_identifier(agent, description)
    });
    private_name.ok_or_else(|| {
        let error_message = format!(
            "Private field '#{}' must be declared in an enclosing class",
            field.as_str()
        );
        agent.throw_exception(ExceptionType::SyntaxError, error_message)
    })
}

fn parse_bigint_literal(
    agent: &mut Agent,
    literal: &ast::BigIntLiteral,
) -> Result<BigInt, AbruptCompletion> {
    // The literal text is recovered from the source span; it always ends
    // in the `n` suffix.
    let source_code = agent
        .running_execution_context()
        .ecmascript_code
        .as_ref()
        .unwrap()
        .source_code;
    let source = agent[source_code].source;
    let raw = source
        .as_str(agent)
        .get(literal.span.start as usize..literal.span.end as usize)
        .unwrap_or("")
        .to_owned();
    let digits = raw.strip_suffix('n').unwrap_or(&raw);
    let (digits, radix) = if let Some(rest) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        (rest, 16)
    } else if let Some(rest) = digits
        .strip_prefix("0o")
        .or_else(|| digits.strip_prefix("0O"))
    {
        (rest, 8)
    } else if let Some(rest) = digits
        .strip_prefix("0b")
        .or_else(|| digits.strip_prefix("0B"))
    {
        (rest, 2)
    } else {
        (digits, 10)
    };
    let digits = digits.replace('_', "");
    match num_bigint::BigInt::parse_bytes(digits.as_bytes(), radix) {
        Some(data) => Ok(BigInt::from_data(agent, data)),
        None => Err(agent
            .throw_exception_with_static_message(
                ExceptionType::SyntaxError,
                "Invalid BigInt literal",
            )
            .into()),
    }
}

impl Vm {
    // === Calls ===========================================================

    pub(super) fn begin_call_expression(
        &mut self,
        agent: &mut Agent,
        call: &'static ast::CallExpression<'static>,
    ) -> Result<(), AbruptCompletion> {
        match &call.callee {
            // SuperCall : super Arguments
            ast::Expression::Super(_) => {
                self.frames.push(Frame::SuperCall {
                    arguments: &call.arguments,
                });
                Ok(())
            }
            // Method call: the reference supplies the this value.
            callee if callee.as_member_expression().is_some() => {
                let member = callee.as_member_expression().unwrap();
                self.frames.push(Frame::CallWithRef {
                    arguments: &call.arguments,
                    optional_call: call.optional,
                });
                self.begin_member_expression_reference(agent, member)
            }
            // Plain identifier call: resolve the function now; a
            // with-environment base supplies the this value.
            ast::Expression::Identifier(identifier) => {
                let name = String::from_str(agent, identifier.name.as_str());
                let reference = resolve_binding(agent, name, None)?;
                let func = get_value(agent, &reference)?;
                if call.optional && func.is_nullish() {
                    return Err(AbruptCompletion::ShortCircuit);
                }
                let this_value = if reference.is_unresolvable_reference() {
                    Value::Undefined
                } else {
                    reference
                        .base_env()
                        .with_base_object(agent)
                        .map_or(Value::Undefined, |o| o.into_value())
                };
                self.push_value(this_value);
                self.push_value(func);
                self.begin_arguments(&call.arguments, Frame::CallApply);
                Ok(())
            }
            other => {
                self.frames.push(Frame::CallWithValue {
                    arguments: &call.arguments,
                    optional_call: call.optional,
                });
                self.frames.push(Frame::Expression(other));
                Ok(())
            }
        }
    }

    /// ### [13.3.8.1 Runtime Semantics: ArgumentListEvaluation](https://tc39.es/ecma262/#sec-runtime-semantics-argumentlistevaluation)
    pub(super) fn begin_arguments(
        &mut self,
        arguments: &'static [ast::Argument<'static>],
        apply: Frame,
    ) {
        self.frames.push(apply);
        self.lists.push(Vec::with_capacity(arguments.len()));
        for argument in arguments.iter().rev() {
            match argument {
                ast::Argument::SpreadElement(spread) => {
                    self.frames.push(Frame::SpreadBegin);
                    self.frames.push(Frame::Expression(&spread.argument));
                }
                _ => {
                    self.frames.push(Frame::PushToList);
                    self.frames
                        .push(Frame::Expression(argument.as_expression().unwrap()));
                }
            }
        }
    }

    // === Member references ===============================================

    pub(super) fn begin_member_reference(
        &mut self,
        agent: &mut Agent,
        expression: &'static ast::Expression<'static>,
    ) -> Result<(), AbruptCompletion> {
        let member = expression
            .as_member_expression()
            .expect("expression is not a member expression");
        self.begin_member_expression_reference(agent, member)
    }

    pub(super) fn begin_member_expression_reference(
        &mut self,
        agent: &mut Agent,
        member: &'static ast::MemberExpression<'static>,
    ) -> Result<(), AbruptCompletion> {
        let strict = agent.is_strict_mode();
        match member {
            ast::MemberExpression::ComputedMemberExpression(computed) => {
                if matches!(computed.object, ast::Expression::Super(_)) {
                    self.frames.push(Frame::BuildSuperReference {
                        computed: true,
                        field: None,
                        strict,
                    });
                    self.frames.push(Frame::Expression(&computed.expression));
                } else {
                    self.frames.push(Frame::BuildPropertyReference {
                        key: MemberKey::Computed,
                        strict,
                    });
                    self.frames.push(Frame::Expression(&computed.expression));
                    if computed.optional {
                        self.frames.push(Frame::OptionalCheck);
                    }
                    self.frames.push(Frame::Expression(&computed.object));
                }
            }
            ast::MemberExpression::StaticMemberExpression(static_member) => {
                if matches!(static_member.object, ast::Expression::Super(_)) {
                    self.frames.push(Frame::BuildSuperReference {
                        computed: false,
                        field: Some(static_member.property.name),
                        strict,
                    });
                } else {
                    self.frames.push(Frame::BuildPropertyReference {
                        key: MemberKey::Static(static_member.property.name),
                        strict,
                    });
                    if static_member.optional {
                        self.frames.push(Frame::OptionalCheck);
                    }
                    self.frames.push(Frame::Expression(&static_member.object));
                }
            }
            ast::MemberExpression::PrivateFieldExpression(private_field) => {
                self.frames.push(Frame::BuildPropertyReference {
                    key: MemberKey::Private(private_field.field.name),
                    strict,
                });
                if private_field.optional {
                    self.frames.push(Frame::OptionalCheck);
                }
                self.frames.push(Frame::Expression(&private_field.object));
            }
        }
        Ok(())
    }

    pub(super) fn execute_build_property_reference(
        &mut self,
        agent: &mut Agent,
        key: MemberKey,
        strict: bool,
    ) -> Result<(), AbruptCompletion> {
        match key {
            MemberKey::Computed => {
                let key_value = self.pop_value();
                let base = self.pop_value();
                if base.is_nullish() {
                    return Err(throw_read_undefined_error(agent, base, None).into());
                }
                let property_key = to_property_key(agent, key_value)?;
                self.references
                    .push(Reference::new_property_reference(base, property_key, strict));
            }
            MemberKey::Static(name) => {
                let base = self.pop_value();
                if base.is_nullish() {
                    return Err(throw_read_undefined_error(agent, base, Some(name.as_str())).into());
                }
                let property_key = PropertyKey::from_str(agent, name.as_str());
                self.references
                    .push(Reference::new_property_reference(base, property_key, strict));
            }
            MemberKey::Private(field) => {
                let base = self.pop_value();
                if base.is_nullish() {
                    return Err(throw_read_undefined_error(agent, base, Some(field.as_str())).into());
                }
                let private_name = resolve_private_name(agent, field)?;
                self.references
                    .push(Reference::new_private_reference(base, private_name));
            }
        }
        Ok(())
    }

    /// ### [13.3.7.3 MakeSuperPropertyReference](https://tc39.es/ecma262/#sec-makesuperpropertyreference)
    pub(super) fn execute_build_super_reference(
        &mut self,
        agent: &mut Agent,
        computed: bool,
        field: Option<Atom<'static>>,
        strict: bool,
    ) -> Result<(), AbruptCompletion> {
        let property_key = if computed {
            let key_value = self.pop_value();
            to_property_key(agent, key_value)?
        } else {
            PropertyKey::from_str(agent, field.unwrap().as_str())
        };
        // 1. Let env be GetThisEnvironment().
        let env = get_this_environment(agent);
        let EnvironmentIndex::Function(env) = env else {
            unreachable!("super property outside a function environment")
        };
        // 2. Let actualThis be ? env.GetThisBinding().
        let actual_this = env.get_this_binding(agent)?;
        // 3. Let baseValue be ? env.GetSuperBase().
        let base_value = env.get_super_base(agent)?;
        // 4. Return the Reference Record { [[Base]]: baseValue,
        //    [[ReferencedName]]: propertyKey, [[Strict]]: strict,
        //    [[ThisValue]]: actualThis }.
        self.references.push(Reference::new_super_reference(
            base_value,
            property_key,
            strict,
            actual_this,
        ));
        Ok(())
    }

    /// ### [13.3.7.1 SuperCall evaluation](https://tc39.es/ecma262/#sec-super-keyword-runtime-semantics-evaluation)
    pub(super) fn execute_super_call_apply(
        &mut self,
        agent: &mut Agent,
    ) -> Result<(), AbruptCompletion> {
        let args = self.lists.pop().expect("list stack underflow");
        // 1. Let newTarget be GetNewTarget().
        let this_env = get_this_environment(agent);
        let EnvironmentIndex::Function(func_env) = this_env else {
            unreachable!("super call outside a function environment")
        };
        // 2. Assert: newTarget is an Object.
        let new_target = func_env
            .get_new_target(agent)
            .expect("super call without an active newTarget");
        // 3. Let func be GetSuperConstructor().
        let active_function = func_env.get_function_object(agent);
        let super_constructor = active_function
            .into_object()
            .internal_get_prototype_of(agent)?;
        // 5. If IsConstructor(func) is false, throw a TypeError exception.
        let Some(super_constructor) = super_constructor
            .map(|o| o.into_value())
            .and_then(|v| is_constructor(agent, v))
        else {
            return Err(agent
                .throw_exception_with_static_message(
                    ExceptionType::TypeError,
                    "Super constructor is not a constructor",
                )
                .into());
        };
        // 6. Let result be ? Construct(func, argList, newTarget).
        let new_target = Function::try_from(new_target.into_value()).unwrap();
        let result = construct(
            agent,
            super_constructor,
            Some(ArgumentsList(&args)),
            Some(new_target),
        )?;
        // 7.-8. Let thisER be GetThisEnvironment();
        //       perform ? thisER.BindThisValue(result).
        func_env.bind_this_value(agent, result.into_value())?;
        // 9.-11. Let F be thisER.[[FunctionObject]]; perform
        //        ? InitializeInstanceElements(result, F).
        initialize_instance_elements(agent, result, active_function)?;
        // 12. Return result.
        self.push_value(result.into_value());
        Ok(())
    }

    // === Unary and delete ================================================

    fn begin_unary_expression(
        &mut self,
        agent: &mut Agent,
        unary: &'static ast::UnaryExpression<'static>,
    ) -> Result<(), AbruptCompletion> {
        match unary.operator {
            UnaryOperator::Delete => match &unary.argument {
                argument if argument.as_member_expression().is_some() => {
                    self.frames.push(Frame::DeleteApply);
                    self.begin_member_expression_reference(
                        agent,
                        argument.as_member_expression().unwrap(),
                    )
                }
                ast::Expression::Identifier(identifier) => {
                    let name = String::from_str(agent, identifier.name.as_str());
                    let reference = resolve_binding(agent, name, None)?;
                    self.references.push(reference);
                    self.frames.push(Frame::DeleteApply);
                    Ok(())
                }
                ast::Expression::ChainExpression(chain) => {
                    let restore = self.restore_point(agent);
                    self.frames.push(Frame::ChainEnd {
                        restore,
                        short_circuit_value: Value::Boolean(true),
                    });
                    self.frames.push(Frame::DeleteApply);
                    let member = chain
                        .expression
                        .as_member_expression()
                        .expect("delete of an optional call");
                    self.begin_member_expression_reference(agent, member)
                }
                other => {
                    // delete of a non-reference evaluates the operand and
                    // returns true.
                    self.frames.push(Frame::LoadValue(Value::Boolean(true)));
                    self.frames.push(Frame::DiscardValue);
                    self.frames.push(Frame::Expression(other));
                    Ok(())
                }
            },
            UnaryOperator::Typeof => {
                if let ast::Expression::Identifier(identifier) = &unary.argument {
                    // typeof of an unresolvable identifier is "undefined",
                    // not a ReferenceError.
                    let name = String::from_str(agent, identifier.name.as_str());
                    let reference = resolve_binding(agent, name, None)?;
                    let type_string = if reference.is_unresolvable_reference() {
                        "undefined"
                    } else {
                        let value = get_value(agent, &reference)?;
                        value.type_of(agent)
                    };
                    let result = String::from_str(agent, type_string);
                    self.push_value(result.into_value());
                    Ok(())
                } else {
                    self.frames.push(Frame::UnaryApply {
                        operator: UnaryOperator::Typeof,
                    });
                    self.frames.push(Frame::Expression(&unary.argument));
                    Ok(())
                }
            }
            operator => {
                self.frames.push(Frame::UnaryApply { operator });
                self.frames.push(Frame::Expression(&unary.argument));
                Ok(())
            }
        }
    }

    pub(super) fn execute_unary_apply(
        &mut self,
        agent: &mut Agent,
        operator: UnaryOperator,
    ) -> Result<(), AbruptCompletion> {
        let value = self.pop_value();
        let result = match operator {
            // ### [13.5.5 Unary - Operator](https://tc39.es/ecma262/#sec-unary-minus-operator)
            UnaryOperator::UnaryNegation => match to_numeric(agent, value)? {
                Value::Number(n) => Value::Number(-n),
                Value::BigInt(b) => BigInt::unary_minus(agent, b).into_value(),
                _ => unreachable!(),
            },
            // ### [13.5.4 Unary + Operator](https://tc39.es/ecma262/#sec-unary-plus-operator)
            UnaryOperator::UnaryPlus => Value::Number(to_number(agent, value)?),
            // ### [13.5.7 Logical NOT Operator](https://tc39.es/ecma262/#sec-logical-not-operator)
            UnaryOperator::LogicalNot => (!to_boolean(agent, value)).into(),
            // ### [13.5.6 Bitwise NOT Operator](https://tc39.es/ecma262/#sec-bitwise-not-operator)
            UnaryOperator::BitwiseNot => match to_numeric(agent, value)? {
                Value::Number(n) => Value::Number(!to_int32_number(n) as f64),
                Value::BigInt(b) => BigInt::bitwise_not(agent, b).into_value(),
                _ => unreachable!(),
            },
            // ### [13.5.2 The void Operator](https://tc39.es/ecma262/#sec-void-operator)
            UnaryOperator::Void => Value::Undefined,
            // ### [13.5.3 The typeof Operator](https://tc39.es/ecma262/#sec-typeof-operator)
            UnaryOperator::Typeof => {
                String::from_str(agent, value.type_of(agent)).into_value()
            }
            UnaryOperator::Delete => unreachable!("delete evaluates through DeleteApply"),
        };
        self.push_value(result);
        Ok(())
    }

    /// ### [13.5.1 The delete Operator](https://tc39.es/ecma262/#sec-delete-operator)
    pub(super) fn execute_delete(&mut self, agent: &mut Agent) -> Result<(), AbruptCompletion> {
        let reference = self.pop_reference();
        // 3. If IsUnresolvableReference(ref) is true, then
        if reference.is_unresolvable_reference() {
            // a. Assert: ref.[[Strict]] is false.
            // b. Return true.
            self.push_value(true.into());
            return Ok(());
        }
        // 4. If IsPropertyReference(ref) is true, then
        if reference.is_property_reference() {
            // a. Assert: IsPrivateReference(ref) is false.
            // b. If IsSuperReference(ref) is true, throw a ReferenceError
            //    exception.
            if reference.is_super_reference() {
                return Err(agent
                    .throw_exception_with_static_message(
                        ExceptionType::ReferenceError,
                        "Unsupported reference to 'super'",
                    )
                    .into());
            }
            // c. Let baseObj be ? ToObject(ref.[[Base]]).
            let base_obj = to_object(agent, reference.base_value())?;
            // d. Let deleteStatus be ? baseObj.[[Delete]](ref.[[ReferencedName]]).
            let delete_status = base_obj.internal_delete(agent, reference.referenced_name)?;
            // e. If deleteStatus is false and ref.[[Strict]] is true, throw
            //    a TypeError exception.
            if !delete_status && reference.strict {
                let name = reference.referenced_name.to_display_string(agent);
                let error_message = format!("Cannot delete property '{}'", name);
                return Err(agent
                    .throw_exception(ExceptionType::TypeError, error_message)
                    .into());
            }
            // f. Return deleteStatus.
            self.push_value(delete_status.into());
        } else {
            // 5. Else: let base be ref.[[Base]];
            //    return ? base.DeleteBinding(ref.[[ReferencedName]]).
            let env = reference.base_env();
            let name = reference.referenced_name_string();
            let status = env.delete_binding(agent, name)?;
            self.push_value(status.into());
        }
        Ok(())
    }

    // === Assignment ======================================================

    fn begin_assignment_expression(
        &mut self,
        agent: &mut Agent,
        assignment: &'static ast::AssignmentExpression<'static>,
    ) -> Result<(), AbruptCompletion> {
        match assignment.operator {
            AssignmentOperator::Assign => {
                match &assignment.left {
                    ast::AssignmentTarget::ArrayAssignmentTarget(_)
                    | ast::AssignmentTarget::ObjectAssignmentTarget(_) => {
                        // Destructuring assignment: evaluate the right-hand
                        // side, keep a copy as the expression's value, and
                        // destructure the other.
                        self.frames.push(Frame::AssignmentPatternInit {
                            target: &assignment.left,
                        });
                        self.frames.push(Frame::DuplicateValue);
                        self.frames.push(Frame::Expression(&assignment.right));
                        Ok(())
                    }
                    target => {
                        self.frames.push(Frame::PutValue);
                        let name = assignment_target_identifier_name(agent, target);
                        self.push_expression_with_name(agent, &assignment.right, name);
                        self.begin_assignment_target_reference(agent, target)
                    }
                }
            }
            AssignmentOperator::LogicalAnd
            | AssignmentOperator::LogicalOr
            | AssignmentOperator::LogicalNullish => {
                let operator = match assignment.operator {
                    AssignmentOperator::LogicalAnd => LogicalOperator::And,
                    AssignmentOperator::LogicalOr => LogicalOperator::Or,
                    _ => LogicalOperator::Coalesce,
                };
                let name = assignment_target_identifier_name(agent, &assignment.left);
                self.frames.push(Frame::LogicalAssignCheck {
                    operator,
                    right: &assignment.right,
                    name,
                });
                self.frames.push(Frame::RefGetValueKeep);
                self.begin_assignment_target_reference(agent, &assignment.left)
            }
            operator => {
                self.frames.push(Frame::PutValue);
                self.frames.push(Frame::CompoundApply {
                    operator: assignment_to_binary_operator(operator),
                });
                self.frames.push(Frame::Expression(&assignment.right));
                self.frames.push(Frame::RefGetValueKeep);
                self.begin_assignment_target_reference(agent, &assignment.left)
            }
        }
    }

    /// Push the reference of a non-pattern assignment target.
    pub(super) fn begin_assignment_target_reference(
        &mut self,
        agent: &mut Agent,
        target: &'static ast::AssignmentTarget<'static>,
    ) -> Result<(), AbruptCompletion> {
        match target {
            ast::AssignmentTarget::AssignmentTargetIdentifier(identifier) => {
                let name = String::from_str(agent, identifier.name.as_str());
                let reference = resolve_binding(agent, name, None)?;
                self.references.push(reference);
                Ok(())
            }
            _ => {
                let member = target
                    .as_simple_assignment_target()
                    .and_then(|target| target.as_member_expression())
                    .expect("assignment target is not a simple target");
                self.begin_member_expression_reference(agent, member)
            }
        }
    }

    /// Push the reference of an update expression's target.
    pub(super) fn begin_simple_assignment_target_reference(
        &mut self,
        agent: &mut Agent,
        target: &'static ast::SimpleAssignmentTarget<'static>,
    ) -> Result<(), AbruptCompletion> {
        match target {
            ast::SimpleAssignmentTarget::AssignmentTargetIdentifier(identifier) => {
                let name = String::from_str(agent, identifier.name.as_str());
                let reference = resolve_binding(agent, name, None)?;
                self.references.push(reference);
                Ok(())
            }
            _ => {
                let member = target
                    .as_member_expression()
                    .expect("update target is not a simple target");
                self.begin_member_expression_reference(agent, member)
            }
        }
    }

    // === Literals ========================================================

    fn begin_object_literal(
        &mut self,
        agent: &mut Agent,
        object_expression: &'static ast::ObjectExpression<'static>,
    ) {
        // 1. Let obj be OrdinaryObjectCreate(%Object.prototype%).
        let object = ordinary_object_create_with_intrinsics(agent, Some(ProtoIntrinsics::Object));
        self.push_value(object.into_value());
        // 2. Perform ? PropertyDefinitionEvaluation of PropertyDefinitionList.
        for property in object_expression.properties.iter().rev() {
            match property {
                ast::ObjectPropertyKind::SpreadProperty(spread) => {
                    self.frames.push(Frame::ObjectSpread);
                    self.frames.push(Frame::Expression(&spread.argument));
                }
                ast::ObjectPropertyKind::ObjectProperty(property) => {
                    if property.computed {
                        self.frames.push(Frame::ObjectComputedKey { property });
                        self.frames.push(Frame::Expression(
                            property.key.as_expression().unwrap(),
                        ));
                    } else {
                        let key = static_property_key(agent, &property.key);
                        // __proto__ : AssignmentExpression is a prototype
                        // setter, not a property definition.
                        if property.kind == ast::PropertyKind::Init
                            && !property.method
                            && !property.shorthand
                            && matches!(key, PropertyKey::String(name) if name.as_str(agent) == "__proto__")
                        {
                            self.frames.push(Frame::ObjectSetPrototype);
                            self.frames.push(Frame::Expression(&property.value));
                        } else {
                            self.push_object_property_value(agent, property, key);
                        }
                    }
                }
            }
        }
    }

    /// Push the value-evaluation frames of one object literal property with
    /// a known key.
    pub(super) fn push_object_property_value(
        &mut self,
        agent: &mut Agent,
        property: &'static ast::ObjectProperty<'static>,
        key: PropertyKey,
    ) {
        if property.kind != ast::PropertyKind::Init || property.method {
            // Methods and accessors are defined when the frame executes.
            self.frames.push(Frame::ObjectDefineProperty {
                property,
                key: Some(key),
            });
        } else {
            self.frames.push(Frame::ObjectDefineProperty {
                property,
                key: Some(key),
            });
            let name = if is_anonymous_function_definition(&property.value) {
                Some(key)
            } else {
                None
            };
            self.push_expression_with_name(agent, &property.value, name);
        }
    }

    pub(super) fn execute_object_define_property(
        &mut self,
        agent: &mut Agent,
        property: &'static ast::ObjectProperty<'static>,
        key: Option<PropertyKey>,
    ) -> Result<(), AbruptCompletion> {
        let key = key.expect("object literal property without a key");
        if property.kind != ast::PropertyKind::Init || property.method {
            let object = Object::try_from(self.peek_value()).unwrap();
            let ast::Expression::FunctionExpression(function) = &property.value else {
                unreachable!("object literal method is not a function expression")
            };
            let kind = match property.kind {
                ast::PropertyKind::Get => MethodKind::Get,
                ast::PropertyKind::Set => MethodKind::Set,
                ast::PropertyKind::Init => MethodKind::Normal,
            };
            method_definition_evaluation(agent, object, key, function, kind, true)?;
        } else {
            let value = self.pop_value();
            let object = Object::try_from(self.peek_value()).unwrap();
            create_data_property_or_throw(agent, object, key, value)?;
        }
        Ok(())
    }

    pub(super) fn execute_array_literal_next(
        &mut self,
        agent: &mut Agent,
        elements: &'static [ast::ArrayExpressionElement<'static>],
        index: usize,
    ) -> Result<(), AbruptCompletion> {
        let mut index = index;
        while let Some(element) = elements.get(index) {
            match element {
                ast::ArrayExpressionElement::Elision(_) => {
                    // A hole extends the length without creating a
                    // property.
                    let Value::Array(array) = self.peek_value() else {
                        unreachable!()
                    };
                    agent[array].len += 1;
                    index += 1;
                }
                ast::ArrayExpressionElement::SpreadElement(spread) => {
                    self.frames.push(Frame::ArrayLiteralNext {
                        elements,
                        index: index + 1,
                    });
                    self.frames.push(Frame::ArraySpreadBegin);
                    self.frames.push(Frame::Expression(&spread.argument));
                    return Ok(());
                }
                _ => {
                    self.frames.push(Frame::ArrayLiteralNext {
                        elements,
                        index: index + 1,
                    });
                    self.frames.push(Frame::ArrayAppend);
                    self.frames
                        .push(Frame::Expression(element.as_expression().unwrap()));
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    // === Templates =======================================================

    fn begin_template_literal(
        &mut self,
        agent: &mut Agent,
        template: &'static ast::TemplateLiteral<'static>,
    ) -> Result<(), AbruptCompletion> {
        if template.expressions.is_empty() {
            let cooked = template.quasis[0]
                .value
                .cooked
                .as_ref()
                .expect("untagged template with invalid escape");
            let string = String::from_str(agent, cooked.as_str());
            self.push_value(string.into_value());
            return Ok(());
        }
        self.frames.push(Frame::TemplateConcat { template });
        for expression in template.expressions.iter().rev() {
            self.frames.push(Frame::ToStringValue);
            self.frames.push(Frame::Expression(expression));
        }
        Ok(())
    }

    pub(super) fn execute_template_concat(
        &mut self,
        agent: &mut Agent,
        template: &'static ast::TemplateLiteral<'static>,
    ) -> Result<(), AbruptCompletion> {
        let count = template.expressions.len();
        let mut parts: Vec<Value> = Vec::with_capacity(count);
        for _ in 0..count {
            parts.push(self.pop_value());
        }
        parts.reverse();
        let mut result = std::string::String::new();
        for (index, quasi) in template.quasis.iter().enumerate() {
            let cooked = quasi
                .value
                .cooked
                .as_ref()
                .expect("untagged template with invalid escape");
            result.push_str(cooked.as_str());
            if let Some(part) = parts.get(index) {
                let Value::String(part) = part else {
                    unreachable!()
                };
                result.push_str(part.as_str(agent));
            }
        }
        let string = String::from_string(agent, result);
        self.push_value(string.into_value());
        Ok(())
    }

    fn begin_tagged_template(
        &mut self,
        agent: &mut Agent,
        tagged: &'static ast::TaggedTemplateExpression<'static>,
    ) -> Result<(), AbruptCompletion> {
        match &tagged.tag {
            tag if tag.as_member_expression().is_some() => {
                self.frames.push(Frame::TaggedTemplateCall {
                    tagged,
                    with_ref: true,
                });
                self.begin_member_expression_reference(agent, tag.as_member_expression().unwrap())
            }
            tag => {
                self.frames.push(Frame::TaggedTemplateCall {
                    tagged,
                    with_ref: false,
                });
                self.frames.push(Frame::Expression(tag));
                Ok(())
            }
        }
    }

    pub(super) fn execute_tagged_template_call(
        &mut self,
        agent: &mut Agent,
        tagged: &'static ast::TaggedTemplateExpression<'static>,
        with_ref: bool,
    ) -> Result<(), AbruptCompletion> {
        let (this_value, func) = if with_ref {
            let reference = self.pop_reference();
            let this_value = get_this_value(&reference);
            let func = get_value(agent, &reference)?;
            (this_value, func)
        } else {
            (Value::Undefined, self.pop_value())
        };
        self.push_value(this_value);
        self.push_value(func);
        self.frames.push(Frame::CallApply);
        let mut list = Vec::with_capacity(tagged.quasi.expressions.len() + 1);
        // GetTemplateObject is the first argument.
        let template_object = get_template_object(agent, &tagged.quasi)?;
        list.push(template_object);
        self.lists.push(list);
        for expression in tagged.quasi.expressions.iter().rev() {
            self.frames.push(Frame::PushToList);
            self.frames.push(Frame::Expression(expression));
        }
        Ok(())
    }

    // === Function bodies =================================================

    pub(super) fn execute_evaluate_body(
        &mut self,
        agent: &mut Agent,
        function: ECMAScriptFunction,
    ) {
        match agent[function].ecmascript_code {
            crate::ecmascript::builtins::ecmascript_function::FunctionCode::Body(body) => {
                if agent[function].is_concise_arrow_function {
                    // ExpressionBody : AssignmentExpression
                    // 1. Return Completion Record { [[Type]]: RETURN,
                    //    [[Value]]: ? GetValue(exprRef) }.
                    let ast::Statement::ExpressionStatement(statement) = &body.statements[0]
                    else {
                        unreachable!("concise arrow body is not an expression statement")
                    };
                    self.frames.push(Frame::ReturnValue);
                    self.frames.push(Frame::Expression(&statement.expression));
                } else {
                    self.frames.push(Frame::StatementList {
                        statements: &body.statements,
                        index: 0,
                    });
                }
            }
            crate::ecmascript::builtins::ecmascript_function::FunctionCode::Expression(
                expression,
            ) => {
                self.frames.push(Frame::ReturnValue);
                self.frames.push(Frame::Expression(expression));
            }
        }
    }
}

fn throw_read_undefined_error(
    agent: &mut Agent,
    base: Value,
    name: Option<&str>,
) -> JsError {
    let base = if base.is_null() { "null" } else { "undefined" };
    let error_message = match name {
        Some(name) => format!("Cannot read properties of {} (reading '{}')", base, name),
        None => format!("Cannot read properties of {}", base),
    };
    agent.throw_exception(ExceptionType::TypeError, error_message)
}

/// The NamedEvaluation name of a simple assignment target, when the target
/// is a plain identifier.
fn assignment_target_identifier_name(
    agent: &mut Agent,
    target: &'static ast::AssignmentTarget<'static>,
) -> Option<PropertyKey> {
    match target {
        ast::AssignmentTarget::AssignmentTargetIdentifier(identifier) => {
            Some(PropertyKey::from_str(agent, identifier.name.as_str()))
        }
        _ => None,
    }
}

fn assignment_to_binary_operator(operator: AssignmentOperator) -> BinaryOperator {
    match operator {
        AssignmentOperator::Addition => BinaryOperator::Addition,
        AssignmentOperator::Subtraction => BinaryOperator::Subtraction,
        AssignmentOperator::Multiplication => BinaryOperator::Multiplication,
        AssignmentOperator::Division => BinaryOperator::Division,
        AssignmentOperator::Remainder => BinaryOperator::Remainder,
        AssignmentOperator::Exponential => BinaryOperator::Exponential,
        AssignmentOperator::ShiftLeft => BinaryOperator::ShiftLeft,
        AssignmentOperator::ShiftRight => BinaryOperator::ShiftRight,
        AssignmentOperator::ShiftRightZeroFill => BinaryOperator::ShiftRightZeroFill,
        AssignmentOperator::BitwiseOR => BinaryOperator::BitwiseOR,
        AssignmentOperator::BitwiseXOR => BinaryOperator::BitwiseXOR,
        AssignmentOperator::BitwiseAnd => BinaryOperator::BitwiseAnd,
        _ => unreachable!("logical assignment handled separately"),
    }
}

/// A non-computed object literal property key.
pub(super) fn static_property_key(agent: &mut Agent, key: &'static ast::PropertyKey<'static>) -> PropertyKey {
    match key {
        ast::PropertyKey::StaticIdentifier(identifier) => {
            PropertyKey::from_str(agent, identifier.name.as_str())
        }
        ast::PropertyKey::StringLiteral(literal) => {
            PropertyKey::from_str(agent, literal.value.as_str())
        }
        ast::PropertyKey::NumericLiteral(literal) => {
            let text = crate::ecmascript::types::language::number::number_to_std_string(
                literal.value,
            );
            PropertyKey::from_string(agent, text)
        }
        _ => unreachable!("static property key of unexpected kind"),
    }
}

/// ### [13.2.8.4 GetTemplateObject ( templateLiteral )](https://tc39.es/ecma262/#sec-gettemplateobject)
fn get_template_object(
    agent: &mut Agent,
    template: &'static ast::TemplateLiteral<'static>,
) -> JsResult<Value> {
    // 1.-3. The realm keeps a template map keyed by the parse node; each
    //       call site gets one template object per realm.
    let site = template as *const _ as usize;
    if let Some(existing) = agent.current_realm().template_object(site) {
        return Ok(existing.into_value());
    }

    // 4.-9. Build the cooked and raw arrays.
    let mut cooked_values = Vec::with_capacity(template.quasis.len());
    let mut raw_values = Vec::with_capacity(template.quasis.len());
    for quasi in &template.quasis {
        let cooked = match &quasi.value.cooked {
            Some(cooked) => String::from_str(agent, cooked.as_str()).into_value(),
            None => Value::Undefined,
        };
        cooked_values.push(cooked);
        let raw = String::from_str(agent, quasi.value.raw.as_str());
        raw_values.push(raw.into_value());
    }
    let template_array =
        crate::ecmascript::abstract_operations::operations_on_objects::create_array_from_list(
            agent,
            &cooked_values,
        );
    let raw_array =
        crate::ecmascript::abstract_operations::operations_on_objects::create_array_from_list(
            agent,
            &raw_values,
        );

    // 10.-12. Define template.raw, freeze both, remember the site.
    let raw_key = PropertyKey::from_str(agent, "raw");
    crate::ecmascript::abstract_operations::operations_on_objects::define_property_or_throw(
        agent,
        template_array,
        raw_key,
        crate::ecmascript::types::PropertyDescriptor {
            value: Some(raw_array.into_value()),
            writable: Some(false),
            get: None,
            set: None,
            enumerable: Some(false),
            configurable: Some(false),
        },
    )?;
    set_integrity_level(agent, raw_array.into_object(), IntegrityLevel::Frozen)?;
    set_integrity_level(agent, template_array.into_object(), IntegrityLevel::Frozen)?;
    agent
        .current_realm_mut()
        .remember_template_object(site, template_array.into_object());
    Ok(template_array.into_value())
}

/// ### [13.15.3 ApplyStringOrNumericBinaryOperator ( lval, opText, rval )](https://tc39.es/ecma262/#sec-applystringornumericbinaryoperator)
/// plus the relational, equality, `in` and `instanceof` operators.
pub(super) fn apply_binary_operator(
    agent: &mut Agent,
    operator: BinaryOperator,
    lval: Value,
    rval: Value,
) -> JsResult<Value> {
    match operator {
        // 1. If opText is +, then
        BinaryOperator::Addition => {
            // a. Let lprim be ? ToPrimitive(lval).
            let lprim = to_primitive(agent, lval, None)?;
            // b. Let rprim be ? ToPrimitive(rval).
            let rprim = to_primitive(agent, rval, None)?;
            // c. If lprim is a String or rprim is a String, then
            if lprim.is_string() || rprim.is_string() {
                // i.-iii. Return the string-concatenation of
                //         ? ToString(lprim) and ? ToString(rprim).
                let lstr = to_string(agent, lprim)?;
                let rstr = to_string(agent, rprim)?;
                Ok(String::concat(agent, lstr, rstr).into_value())
            } else {
                apply_numeric_operator(agent, operator, lprim, rprim)
            }
        }
        BinaryOperator::Subtraction
        | BinaryOperator::Multiplication
        | BinaryOperator::Division
        | BinaryOperator::Remainder
        | BinaryOperator::Exponential
        | BinaryOperator::ShiftLeft
        | BinaryOperator::ShiftRight
        | BinaryOperator::ShiftRightZeroFill
        | BinaryOperator::BitwiseOR
        | BinaryOperator::BitwiseXOR
        | BinaryOperator::BitwiseAnd => apply_numeric_operator(agent, operator, lval, rval),
        // ### [13.10 Relational Operators](https://tc39.es/ecma262/#sec-relational-operators)
        BinaryOperator::LessThan => {
            let result = is_less_than::<true>(agent, lval, rval)?;
            Ok(result.unwrap_or(false).into())
        }
        BinaryOperator::GreaterThan => {
            let result = is_less_than::<false>(agent, rval, lval)?;
            Ok(result.unwrap_or(false).into())
        }
        BinaryOperator::LessEqualThan => {
            let result = is_less_than::<false>(agent, rval, lval)?;
            Ok(matches!(result, Some(false)).into())
        }
        BinaryOperator::GreaterEqualThan => {
            let result = is_less_than::<true>(agent, lval, rval)?;
            Ok(matches!(result, Some(false)).into())
        }
        // ### [13.11 Equality Operators](https://tc39.es/ecma262/#sec-equality-operators)
        BinaryOperator::Equality => Ok(is_loosely_equal(agent, lval, rval)?.into()),
        BinaryOperator::Inequality => Ok((!is_loosely_equal(agent, lval, rval)?).into()),
        BinaryOperator::StrictEquality => Ok(is_strictly_equal(agent, lval, rval).into()),
        BinaryOperator::StrictInequality => Ok((!is_strictly_equal(agent, lval, rval)).into()),
        // ### [13.10.1 The in operator](https://tc39.es/ecma262/#sec-relational-operators-runtime-semantics-evaluation)
        BinaryOperator::In => {
            let Ok(robj) = Object::try_from(rval) else {
                return Err(agent.throw_exception_with_static_message(
                    ExceptionType::TypeError,
                    "Cannot use 'in' operator to search in a non-object",
                ));
            };
            let key = to_property_key(agent, lval)?;
            Ok(has_property(agent, robj, key)?.into())
        }
        BinaryOperator::Instanceof => Ok(instanceof_operator(agent, lval, rval)?.into()),
    }
}

fn apply_numeric_operator(
    agent: &mut Agent,
    operator: BinaryOperator,
    lval: Value,
    rval: Value,
) -> JsResult<Value> {
    // 2. NOTE: At this point, it must be a numeric operation.
    // 3. Let lnum be ? ToNumeric(lval).
    let lnum = to_numeric(agent, lval)?;
    // 4. Let rnum be ? ToNumeric(rval).
    let rnum = to_numeric(agent, rval)?;
    // 5. If Type(lnum) is not Type(rnum), throw a TypeError exception.
    match (lnum, rnum) {
        (Value::Number(l), Value::Number(r)) => {
            let result = match operator {
                BinaryOperator::Addition => l + r,
                BinaryOperator::Subtraction => l - r,
                BinaryOperator::Multiplication => l * r,
                BinaryOperator::Division => l / r,
                BinaryOperator::Remainder => l % r,
                BinaryOperator::Exponential => number_exponentiate(l, r),
                BinaryOperator::ShiftLeft => {
                    (to_int32_number(l) << (to_uint32_number(r) & 31)) as f64
                }
                BinaryOperator::ShiftRight => {
                    (to_int32_number(l) >> (to_uint32_number(r) & 31)) as f64
                }
                BinaryOperator::ShiftRightZeroFill => {
                    (to_uint32_number(l) >> (to_uint32_number(r) & 31)) as f64
                }
                BinaryOperator::BitwiseOR => (to_int32_number(l) | to_int32_number(r)) as f64,
                BinaryOperator::BitwiseXOR => (to_int32_number(l) ^ to_int32_number(r)) as f64,
                BinaryOperator::BitwiseAnd => (to_int32_number(l) & to_int32_number(r)) as f64,
                _ => unreachable!(),
            };
            Ok(Value::Number(result))
        }
        (Value::BigInt(l), Value::BigInt(r)) => {
            let result = match operator {
                BinaryOperator::Addition => BigInt::add(agent, l, r),
                BinaryOperator::Subtraction => BigInt::subtract(agent, l, r),
                BinaryOperator::Multiplication => BigInt::multiply(agent, l, r),
                BinaryOperator::Division => BigInt::divide(agent, l, r)?,
                BinaryOperator::Remainder => BigInt::remainder(agent, l, r)?,
                BinaryOperator::Exponential => BigInt::exponentiate(agent, l, r)?,
                BinaryOperator::BitwiseOR => {
                    let data = &agent[l].data | &agent[r].data;
                    BigInt::from_data(agent, data)
                }
                BinaryOperator::BitwiseXOR => {
                    let data = &agent[l].data ^ &agent[r].data;
                    BigInt::from_data(agent, data)
                }
                BinaryOperator::BitwiseAnd => {
                    let data = &agent[l].data & &agent[r].data;
                    BigInt::from_data(agent, data)
                }
                BinaryOperator::ShiftLeft | BinaryOperator::ShiftRight => {
                    bigint_shift(agent, operator, l, r)?
                }
                BinaryOperator::ShiftRightZeroFill => {
                    return Err(agent.throw_exception_with_static_message(
                        ExceptionType::TypeError,
                        "BigInts have no unsigned right shift",
                    ));
                }
                _ => unreachable!(),
            };
            Ok(result.into_value())
        }
        _ => Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Cannot mix BigInt and other types, use explicit conversions",
        )),
    }
}

/// ### [6.1.6.1.3 Number::exponentiate ( base, exponent )](https://tc39.es/ecma262/#sec-numeric-types-number-exponentiate)
fn number_exponentiate(base: f64, exponent: f64) -> f64 {
    // The ECMAScript operator deviates from IEEE pow for NaN exponents and
    // |base| = 1 with infinite exponents.
    if exponent.is_nan() {
        return f64::NAN;
    }
    if exponent == 0.0 {
        return 1.0;
    }
    if base.abs() == 1.0 && exponent.is_infinite() {
        return f64::NAN;
    }
    base.powf(exponent)
}

fn bigint_shift(
    agent: &mut Agent,
    operator: BinaryOperator,
    l: BigInt,
    r: BigInt,
) -> JsResult<BigInt> {
    use num_traits::{Signed, ToPrimitive};
    let shift = &agent[r].data;
    let negative_shift = shift.is_negative();
    let Some(magnitude) = shift.abs().to_u32() else {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::RangeError,
            "BigInt shift count over bounds",
        ));
    };
    let left_shift = (operator == BinaryOperator::ShiftLeft) != negative_shift;
    let data = if left_shift {
        &agent[l].data << magnitude
    } else {
        &agent[l].data >> magnitude
    };
    Ok(BigInt::from_data(agent, data))
}

impl Vm {
    /// ### [15.5.5 Runtime Semantics: Evaluation — YieldExpression : yield * AssignmentExpression](https://tc39.es/ecma262/#sec-generator-function-definitions-runtime-semantics-evaluation)
    ///
    /// Forward an abrupt generator resume (throw/return) to the delegated
    /// iterator.
    pub(super) fn yield_delegate_forward(
        &mut self,
        agent: &mut Agent,
        iterator_index: usize,
        completion: AbruptCompletion,
    ) -> Result<DelegateOutcome, JsError> {
        let record = self.iterators[iterator_index];
        match completion {
            // b. Else if received is a throw completion, then
            AbruptCompletion::Throw(err) => {
                // i. Let throw be ? GetMethod(iterator, "throw").
                let throw_key = PropertyKey::from_str(agent, "throw");
                let throw_method = get_method(agent, record.iterator.into_value(), throw_key)?;
                // ii. If throw is not undefined, then
                if let Some(throw_method) = throw_method {
                    // 1. Let innerResult be ? Call(throw, iterator,
                    //    « received.[[Value]] »).
                    let inner_result = call_function(
                        agent,
                        throw_method,
                        record.iterator.into_value(),
                        Some(&[err.value()]),
                    )?;
                    // 4. If innerResult is not an Object, throw a TypeError
                    //    exception.
                    let Ok(inner_result) = Object::try_from(inner_result) else {
                        return Err(agent.throw_exception_with_static_message(
                            ExceptionType::TypeError,
                            "Iterator result is not an object",
                        ));
                    };
                    // 5. Let done be ? IteratorComplete(innerResult).
                    let done = iterator_complete(agent, inner_result)?;
                    if done {
                        // 6. If done is true: return
                        //    ? IteratorValue(innerResult).
                        let value = iterator_value(agent, inner_result)?;
                        self.iterators.truncate(iterator_index);
                        self.push_value(value);
                        Ok(DelegateOutcome::Finished)
                    } else {
                        // 7. Let received be Completion(GeneratorYield(
                        //    innerResult)).
                        self.frames.push(Frame::YieldDelegate {
                            iterator_index,
                            resumed: true,
                        });
                        Ok(DelegateOutcome::Resumed(inner_result.into_value()))
                    }
                } else {
                    // iii. NOTE: If iterator does not have a throw method,
                    //      this throw is going to terminate the yield*
                    //      loop; but first we need to give iterator a
                    //      chance to clean up.
                    // iv.-vi. Perform ? IteratorClose(iteratorRecord,
                    //         NormalCompletion(EMPTY)); throw a TypeError
                    //         exception.
                    self.iterators.truncate(iterator_index);
                    iterator_close_with_value(agent, record.iterator, Value::Undefined)?;
                    Err(agent.throw_exception_with_static_message(
                        ExceptionType::TypeError,
                        "The iterator does not provide a 'throw' method",
                    ))
                }
            }
            // c. Else: received is a return completion.
            AbruptCompletion::Return(value) => {
                // ii. Let return be ? GetMethod(iterator, "return").
                let return_key = PropertyKey::from_str(agent, "return");
                let return_method =
                    get_method(agent, record.iterator.into_value(), return_key)?;
                // iii. If return is undefined, then return ? received.
                let Some(return_method) = return_method else {
                    self.iterators.truncate(iterator_index);
                    return Ok(DelegateOutcome::Unwind(AbruptCompletion::Return(value)));
                };
                // iv. Let innerReturnResult be ? Call(return, iterator,
                //     « received.[[Value]] »).
                let inner_result = call_function(
                    agent,
                    return_method,
                    record.iterator.into_value(),
                    Some(&[value]),
                )?;
                // v. If innerReturnResult is not an Object, throw a
                //    TypeError exception.
                let Ok(inner_result) = Object::try_from(inner_result) else {
                    return Err(agent.throw_exception_with_static_message(
                        ExceptionType::TypeError,
                        "Iterator result is not an object",
                    ));
                };
                // vi. Let done be ? IteratorComplete(innerReturnResult).
                let done = iterator_complete(agent, inner_result)?;
                if done {
                    // vii. If done is true: return Completion Record {
                    //      [[Type]]: RETURN, [[Value]]:
                    //      ? IteratorValue(innerReturnResult) }.
                    let value = iterator_value(agent, inner_result)?;
                    self.iterators.truncate(iterator_index);
                    Ok(DelegateOutcome::Unwind(AbruptCompletion::Return(value)))
                } else {
                    // viii. Let received be Completion(GeneratorYield(
                    //       innerReturnResult)).
                    self.frames.push(Frame::YieldDelegate {
                        iterator_index,
                        resumed: true,
                    });
                    Ok(DelegateOutcome::Resumed(inner_result.into_value()))
                }
            }
            other => {
                self.iterators.truncate(iterator_index);
                Ok(DelegateOutcome::Unwind(other))
            }
        }
    }
}
