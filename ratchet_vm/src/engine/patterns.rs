//! Destructuring: BindingInitialization for declarations, parameters and
//! catch clauses, and DestructuringAssignmentEvaluation for assignment
//! targets.

use oxc_ast::ast;

use super::{
    frame::{AbruptCompletion, Frame},
    vm::Vm,
};
use crate::ecmascript::{
    abstract_operations::{
        operations_on_iterator_objects::{get_iterator, iterator_step_value},
        operations_on_objects::{
            copy_data_properties_into_object, create_array_from_list, get_v,
        },
        testing_and_comparison::require_object_coercible,
        type_conversion::to_property_key,
    },
    execution::{
        agent::{resolve_binding, Agent},
        environments::EnvironmentIndex,
    },
    syntax_directed_operations::function_definitions::is_anonymous_function_definition,
    types::{
        language::{
            object::property_key::PropertyKey,
            string::String,
            value::{IntoValue, Value},
        },
        spec::reference::{initialize_referenced_binding, put_value},
    },
};

impl Vm {
    /// ### [8.6.2 Runtime Semantics: BindingInitialization](https://tc39.es/ecma262/#sec-runtime-semantics-bindinginitialization)
    ///
    /// Bind `value` to `pattern`. With an environment the bindings are
    /// initialized in it; without one, names resolve through the running
    /// environment chain and are assigned with PutValue (var declarations
    /// and sloppy parameters).
    pub(super) fn bind_pattern(
        &mut self,
        agent: &mut Agent,
        pattern: &'static ast::BindingPattern<'static>,
        value: Value,
        environment: Option<EnvironmentIndex>,
    ) -> Result<(), AbruptCompletion> {
        match &pattern.kind {
            ast::BindingPatternKind::BindingIdentifier(identifier) => {
                self.bind_identifier(agent, identifier.name.as_str(), value, environment)
            }
            ast::BindingPatternKind::AssignmentPattern(assignment) => {
                if value.is_undefined() {
                    // The default initializer applies.
                    self.frames.push(Frame::BindingInit {
                        pattern: &assignment.left,
                        environment,
                    });
                    let name = if let ast::BindingPatternKind::BindingIdentifier(id) =
                        &assignment.left.kind
                    {
                        if is_anonymous_function_definition(&assignment.right) {
                            Some(PropertyKey::from_str(agent, id.name.as_str()))
                        } else {
                            None
                        }
                    } else {
                        None
                    };
                    self.push_expression_with_name(agent, &assignment.right, name);
                    Ok(())
                } else {
                    self.bind_pattern(agent, &assignment.left, value, environment)
                }
            }
            ast::BindingPatternKind::ObjectPattern(object_pattern) => {
                // 1. Perform ? RequireObjectCoercible(value).
                require_object_coercible(agent, value)?;
                self.frames.push(Frame::ObjectPatternNext {
                    pattern: object_pattern,
                    index: 0,
                    environment,
                    source: value,
                    seen: Vec::new(),
                });
                Ok(())
            }
            ast::BindingPatternKind::ArrayPattern(array_pattern) => {
                // 1. Let iteratorRecord be ? GetIterator(value, SYNC).
                let iterator = get_iterator(agent, value)?;
                self.iterators.push(iterator);
                let iterator_index = self.iterators.len() - 1;
                // 3. If iteratorRecord.[[Done]] is false, return
                //    ? IteratorClose(iteratorRecord, result).
                self.frames.push(Frame::ArrayPatternClose { iterator_index });
                self.frames.push(Frame::ArrayPatternNext {
                    pattern: array_pattern,
                    index: 0,
                    environment,
                    iterator_index,
                });
                Ok(())
            }
        }
    }

    fn bind_identifier(
        &mut self,
        agent: &mut Agent,
        name: &str,
        value: Value,
        environment: Option<EnvironmentIndex>,
    ) -> Result<(), AbruptCompletion> {
        let name = String::from_str(agent, name);
        // 1. Let lhs be ? ResolveBinding(name, environment).
        let reference = resolve_binding(agent, name, environment)?;
        if environment.is_some() {
            // 2. If environment is not undefined: perform
            //    ! InitializeReferencedBinding(lhs, value).
            initialize_referenced_binding(agent, &reference, value)?;
        } else {
            // 3. Else: perform ? PutValue(lhs, value).
            put_value(agent, &reference, value)?;
        }
        Ok(())
    }

    pub(super) fn execute_object_pattern_next(
        &mut self,
        agent: &mut Agent,
        pattern: &'static ast::ObjectPattern<'static>,
        index: usize,
        environment: Option<EnvironmentIndex>,
        source: Value,
        seen: Vec<PropertyKey>,
    ) -> Result<(), AbruptCompletion> {
        let Some(property) = pattern.properties.get(index) else {
            // BindingRestProperty: copy the unvisited properties.
            if let Some(rest) = &pattern.rest {
                let rest_object = copy_data_properties_into_object(agent, source, &seen)?;
                self.bind_pattern(agent, &rest.argument, rest_object.into_value(), environment)?;
            }
            return Ok(());
        };
        if property.computed {
            self.frames.push(Frame::ObjectPatternComputedKey {
                pattern,
                index,
                environment,
                source,
                seen,
            });
            self.frames
                .push(Frame::Expression(property.key.as_expression().unwrap()));
            return Ok(());
        }
        let key = super::expressions::static_property_key(agent, &property.key);
        self.continue_object_pattern_property(agent, pattern, index, environment, source, seen, key)
    }

    pub(super) fn execute_object_pattern_computed_key(
        &mut self,
        agent: &mut Agent,
        pattern: &'static ast::ObjectPattern<'static>,
        index: usize,
        environment: Option<EnvironmentIndex>,
        source: Value,
        seen: Vec<PropertyKey>,
    ) -> Result<(), AbruptCompletion> {
        let key_value = self.pop_value();
        let key = to_property_key(agent, key_value)?;
        self.continue_object_pattern_property(agent, pattern, index, environment, source, seen, key)
    }

    #[allow(clippy::too_many_arguments)]
    fn continue_object_pattern_property(
        &mut self,
        agent: &mut Agent,
        pattern: &'static ast::ObjectPattern<'static>,
        index: usize,
        environment: Option<EnvironmentIndex>,
        source: Value,
        mut seen: Vec<PropertyKey>,
        key: PropertyKey,
    ) -> Result<(), AbruptCompletion> {
        let property = &pattern.properties[index];
        seen.push(key);
        // KeyedBindingInitialization: let v be ? GetV(value, propertyKey).
        let v = get_v(agent, source, key)?;
        self.frames.push(Frame::ObjectPatternNext {
            pattern,
            index: index + 1,
            environment,
            source,
            seen,
        });
        self.frames.push(Frame::BindingInit {
            pattern: &property.value,
            environment,
        });
        self.frames.push(Frame::LoadValue(v));
        Ok(())
    }

    /// ### [8.6.3 Runtime Semantics: IteratorBindingInitialization](https://tc39.es/ecma262/#sec-runtime-semantics-iteratorbindinginitialization)
    pub(super) fn execute_array_pattern_next(
        &mut self,
        agent: &mut Agent,
        pattern: &'static ast::ArrayPattern<'static>,
        index: usize,
        environment: Option<EnvironmentIndex>,
        iterator_index: usize,
    ) -> Result<(), AbruptCompletion> {
        let Some(element) = pattern.elements.get(index) else {
            // BindingRestElement: collect the remaining values.
            if let Some(rest) = &pattern.rest {
                let values = self.drain_iterator(agent, iterator_index)?;
                let array = create_array_from_list(agent, &values);
                self.bind_pattern(agent, &rest.argument, array.into_value(), environment)?;
            }
            return Ok(());
        };
        let value = self.step_pattern_iterator(agent, iterator_index)?;
        self.frames.push(Frame::ArrayPatternNext {
            pattern,
            index: index + 1,
            environment,
            iterator_index,
        });
        if let Some(target) = element {
            // An elision consumes the iterator value without binding.
            self.frames.push(Frame::BindingInit {
                pattern: target,
                environment,
            });
            self.frames.push(Frame::LoadValue(value));
        }
        Ok(())
    }

    /// One IteratorStepValue against the destructuring iterator; done
    /// iterators yield undefined.
    fn step_pattern_iterator(
        &mut self,
        agent: &mut Agent,
        iterator_index: usize,
    ) -> Result<Value, AbruptCompletion> {
        let mut record = self.iterators[iterator_index];
        if record.done {
            return Ok(Value::Undefined);
        }
        let step = iterator_step_value(agent, &mut record);
        self.iterators[iterator_index] = record;
        Ok(step?.unwrap_or(Value::Undefined))
    }

    fn drain_iterator(
        &mut self,
        agent: &mut Agent,
        iterator_index: usize,
    ) -> Result<Vec<Value>, AbruptCompletion> {
        let mut values = Vec::new();
        loop {
            let mut record = self.iterators[iterator_index];
            if record.done {
                break;
            }
            let step = iterator_step_value(agent, &mut record);
            self.iterators[iterator_index] = record;
            match step? {
                Some(value) => values.push(value),
                None => break,
            }
        }
        Ok(values)
    }

    // === Destructuring assignment ========================================

    /// ### [13.15.5 Runtime Semantics: DestructuringAssignmentEvaluation](https://tc39.es/ecma262/#sec-runtime-semantics-destructuringassignmentevaluation)
    pub(super) fn begin_destructuring_assignment(
        &mut self,
        agent: &mut Agent,
        target: &'static ast::AssignmentTarget<'static>,
        value: Value,
    ) -> Result<(), AbruptCompletion> {
        match target {
            ast::AssignmentTarget::ObjectAssignmentTarget(pattern) => {
                require_object_coercible(agent, value)?;
                self.frames.push(Frame::ObjectAssignNext {
                    pattern,
                    index: 0,
                    source: value,
                    seen: Vec::new(),
                });
                Ok(())
            }
            ast::AssignmentTarget::ArrayAssignmentTarget(pattern) => {
                let iterator = get_iterator(agent, value)?;
                self.iterators.push(iterator);
                let iterator_index = self.iterators.len() - 1;
                self.frames.push(Frame::ArrayPatternClose { iterator_index });
                self.frames.push(Frame::ArrayAssignNext {
                    pattern,
                    index: 0,
                    iterator_index,
                });
                Ok(())
            }
            _ => unreachable!("destructuring assignment to a simple target"),
        }
    }

    /// Assignment of `value` to a for-loop left-hand side or rest target:
    /// simple targets go through PutValue, patterns recurse.
    pub(super) fn begin_assignment_target_binding(
        &mut self,
        agent: &mut Agent,
        target: &'static ast::AssignmentTarget<'static>,
        value: Value,
    ) -> Result<(), AbruptCompletion> {
        match target {
            ast::AssignmentTarget::ObjectAssignmentTarget(_)
            | ast::AssignmentTarget::ArrayAssignmentTarget(_) => {
                self.begin_destructuring_assignment(agent, target, value)
            }
            _ => {
                self.frames.push(Frame::DiscardValue);
                self.frames.push(Frame::PutValue);
                self.frames.push(Frame::LoadValue(value));
                self.begin_assignment_target_reference(agent, target)
            }
        }
    }

    pub(super) fn execute_object_assign_next(
        &mut self,
        agent: &mut Agent,
        pattern: &'static ast::ObjectAssignmentTarget<'static>,
        index: usize,
        source: Value,
        mut seen: Vec<PropertyKey>,
    ) -> Result<(), AbruptCompletion> {
        let Some(property) = pattern.properties.get(index) else {
            if let Some(rest) = &pattern.rest {
                let rest_object = copy_data_properties_into_object(agent, source, &seen)?;
                self.begin_assignment_target_binding(
                    agent,
                    &rest.target,
                    rest_object.into_value(),
                )?;
            }
            return Ok(());
        };
        match property {
            ast::AssignmentTargetProperty::AssignmentTargetPropertyIdentifier(property) => {
                // AssignmentProperty : IdentifierReference Initializer?
                let key = PropertyKey::from_str(agent, property.binding.name.as_str());
                seen.push(key);
                let v = get_v(agent, source, key)?;
                let name = String::from_str(agent, property.binding.name.as_str());
                let reference = resolve_binding(agent, name, None)?;
                self.references.push(reference);
                self.frames.push(Frame::ObjectAssignNext {
                    pattern,
                    index: index + 1,
                    source,
                    seen,
                });
                self.frames.push(Frame::DiscardValue);
                self.frames.push(Frame::PutValue);
                match &property.init {
                    Some(init) if v.is_undefined() => {
                        let name = if is_anonymous_function_definition(init) {
                            Some(key)
                        } else {
                            None
                        };
                        self.push_expression_with_name(agent, init, name);
                    }
                    _ => self.frames.push(Frame::LoadValue(v)),
                }
                Ok(())
            }
            ast::AssignmentTargetProperty::AssignmentTargetPropertyProperty(property) => {
                match &property.name {
                    ast::PropertyKey::StaticIdentifier(_)
                    | ast::PropertyKey::StringLiteral(_)
                    | ast::PropertyKey::NumericLiteral(_) => {
                        let key =
                            super::expressions::static_property_key(agent, &property.name);
                        self.continue_object_assign_property(
                            agent, pattern, index, source, seen, key,
                        )
                    }
                    _ => {
                        self.frames.push(Frame::ObjectAssignComputedKey {
                            pattern,
                            index,
                            source,
                            seen,
                        });
                        self.frames
                            .push(Frame::Expression(property.name.as_expression().unwrap()));
                        Ok(())
                    }
                }
            }
        }
    }

    pub(super) fn execute_object_assign_computed_key(
        &mut self,
        agent: &mut Agent,
        pattern: &'static ast::ObjectAssignmentTarget<'static>,
        index: usize,
        source: Value,
        seen: Vec<PropertyKey>,
    ) -> Result<(), AbruptCompletion> {
        let key_value = self.pop_value();
        let key = to_property_key(agent, key_value)?;
        self.continue_object_assign_property(agent, pattern, index, source, seen, key)
    }

    fn continue_object_assign_property(
        &mut self,
        agent: &mut Agent,
        pattern: &'static ast::ObjectAssignmentTarget<'static>,
        index: usize,
        source: Value,
        mut seen: Vec<PropertyKey>,
        key: PropertyKey,
    ) -> Result<(), AbruptCompletion> {
        let ast::AssignmentTargetProperty::AssignmentTargetPropertyProperty(property) =
            &pattern.properties[index]
        else {
            unreachable!()
        };
        seen.push(key);
        let v = get_v(agent, source, key)?;
        self.frames.push(Frame::ObjectAssignNext {
            pattern,
            index: index + 1,
            source,
            seen,
        });
        self.push_assignment_element(agent, &property.binding, v)
    }

    pub(super) fn execute_array_assign_next(
        &mut self,
        agent: &mut Agent,
        pattern: &'static ast::ArrayAssignmentTarget<'static>,
        index: usize,
        iterator_index: usize,
    ) -> Result<(), AbruptCompletion> {
        let Some(element) = pattern.elements.get(index) else {
            if let Some(rest) = &pattern.rest {
                let values = self.drain_iterator(agent, iterator_index)?;
                let array = create_array_from_list(agent, &values);
                self.begin_assignment_target_binding(agent, &rest.target, array.into_value())?;
            }
            return Ok(());
        };
        let value = self.step_pattern_iterator(agent, iterator_index)?;
        self.frames.push(Frame::ArrayAssignNext {
            pattern,
            index: index + 1,
            iterator_index,
        });
        if let Some(element) = element {
            self.push_assignment_element(agent, element, value)?;
        }
        Ok(())
    }

    /// One element of a destructuring assignment: defaults, nested
    /// patterns, or PutValue to a simple target.
    fn push_assignment_element(
        &mut self,
        agent: &mut Agent,
        element: &'static ast::AssignmentTargetMaybeDefault<'static>,
        value: Value,
    ) -> Result<(), AbruptCompletion> {
        match element {
            ast::AssignmentTargetMaybeDefault::AssignmentTargetWithDefault(with_default) => {
                match &with_default.binding {
                    target @ (ast::AssignmentTarget::ObjectAssignmentTarget(_)
                    | ast::AssignmentTarget::ArrayAssignmentTarget(_)) => {
                        if value.is_undefined() {
                            self.frames.push(Frame::AssignmentPatternInit { target });
                            self.frames.push(Frame::Expression(&with_default.init));
                        } else {
                            self.begin_destructuring_assignment(agent, target, value)?;
                        }
                        Ok(())
                    }
                    target => {
                        self.frames.push(Frame::DiscardValue);
                        self.frames.push(Frame::PutValue);
                        if value.is_undefined() {
                            let name = match target {
                                ast::AssignmentTarget::AssignmentTargetIdentifier(id)
                                    if is_anonymous_function_definition(&with_default.init) =>
                                {
                                    Some(PropertyKey::from_str(agent, id.name.as_str()))
                                }
                                _ => None,
                            };
                            self.push_expression_with_name(agent, &with_default.init, name);
                        } else {
                            self.frames.push(Frame::LoadValue(value));
                        }
                        self.begin_assignment_target_reference(agent, target)
                    }
                }
            }
            _ => {
                let target = element.as_assignment_target().unwrap();
                self.begin_assignment_target_binding(agent, target, value)
            }
        }
    }
}
