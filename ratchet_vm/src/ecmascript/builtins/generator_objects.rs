use crate::{
    ecmascript::{
        abstract_operations::operations_on_iterator_objects::create_iter_result_object,
        execution::{
            agent::{Agent, ExceptionType, JsError, JsResult},
            execution_context::ExecutionContext,
            realm::ProtoIntrinsics,
        },
        types::language::{
            object::{
                internal_methods::InternalMethods, internal_slots::InternalSlots, IntoObject,
                Object, OrdinaryObject,
            },
            value::{IntoValue, Value},
        },
    },
    engine::vm::{ExecutionResult, SuspendedVm},
    heap::{impl_index_access, indexes::GeneratorIndex},
};

/// ### [27.5.2 Properties of Generator Instances](https://tc39.es/ecma262/#sec-properties-of-generator-instances)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Generator(pub(crate) GeneratorIndex);

/// ### \[\[GeneratorState\]\]
///
/// The suspended states own the generator's machine and the execution
/// context it runs in.
#[derive(Debug)]
pub(crate) enum GeneratorState {
    SuspendedStart {
        vm: SuspendedVm,
        execution_context: ExecutionContext,
    },
    SuspendedYield {
        vm: SuspendedVm,
        execution_context: ExecutionContext,
    },
    Executing,
    Completed,
}

#[derive(Debug)]
pub struct GeneratorHeapData {
    pub(crate) object_index: Option<OrdinaryObject>,
    /// None only transiently while the state is being swapped.
    pub(crate) generator_state: Option<GeneratorState>,
}

/// The abrupt completions a generator can be resumed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GeneratorAbruptKind {
    Return,
    Throw,
}

impl Generator {
    pub(crate) const fn get_index(self) -> usize {
        self.0.into_index()
    }

    /// ### [27.5.3.3 GeneratorResume ( generator, value, generatorBrand )](https://tc39.es/ecma262/#sec-generatorresume)
    pub(crate) fn resume(self, agent: &mut Agent, value: Value) -> JsResult<Value> {
        // 1. Let state be ? GeneratorValidate(generator, generatorBrand).
        match agent[self].generator_state.as_ref().unwrap() {
            GeneratorState::Executing => {
                return Err(agent.throw_exception_with_static_message(
                    ExceptionType::TypeError,
                    "The generator is currently running",
                ));
            }
            // 2. If state is COMPLETED, return
            //    CreateIteratorResultObject(undefined, true).
            GeneratorState::Completed => {
                return Ok(create_iter_result_object(agent, Value::Undefined, true).into_value());
            }
            // 3. Assert: state is either SUSPENDED-START or
            //    SUSPENDED-YIELD.
            GeneratorState::SuspendedStart { .. } | GeneratorState::SuspendedYield { .. } => {}
        }

        // 7. Set generator.[[GeneratorState]] to EXECUTING.
        let state = agent[self]
            .generator_state
            .replace(GeneratorState::Executing)
            .unwrap();

        // 4. Let genContext be generator.[[GeneratorContext]].
        // 5. Let methodContext be the running execution context.
        // 6. Suspend methodContext.
        // 8. Push genContext onto the execution context stack; genContext
        //    is now the running execution context.
        // 9. Resume the suspended evaluation of genContext using
        //    NormalCompletion(value) as the result of the operation that
        //    suspended it. Let result be the value returned by the resumed
        //    computation.
        let execution_result = match state {
            GeneratorState::SuspendedStart {
                vm,
                execution_context,
            } => {
                agent.push_execution_context(execution_context);
                vm.start(agent)
            }
            GeneratorState::SuspendedYield {
                vm,
                execution_context,
            } => {
                agent.push_execution_context(execution_context);
                vm.resume(agent, value)
            }
            _ => unreachable!(),
        };

        // 10. Assert: When we return here, genContext has already been
        //     removed from the execution context stack and methodContext is
        //     the currently running execution context.
        let execution_context = agent.pop_execution_context().unwrap();

        // 11. Return ? result.
        self.handle_execution_result(agent, execution_result, execution_context)
    }

    /// ### [27.5.3.4 GeneratorResumeAbrupt ( generator, abruptCompletion, generatorBrand )](https://tc39.es/ecma262/#sec-generatorresumeabrupt)
    pub(crate) fn resume_abrupt(
        self,
        agent: &mut Agent,
        kind: GeneratorAbruptKind,
        value: Value,
    ) -> JsResult<Value> {
        // 1. Let state be ? GeneratorValidate(generator, generatorBrand).
        match agent[self].generator_state.as_ref().unwrap() {
            GeneratorState::Executing => {
                return Err(agent.throw_exception_with_static_message(
                    ExceptionType::TypeError,
                    "The generator is currently running",
                ));
            }
            GeneratorState::SuspendedStart { .. } => {
                // 2. If state is SUSPENDED-START, then
                // a. Set generator.[[GeneratorState]] to COMPLETED.
                // b. NOTE: Once a generator enters the completed state it
                //    never leaves it.
                agent[self].generator_state = Some(GeneratorState::Completed);
                // c. Set state to COMPLETED.
                return self.finish_abrupt(agent, kind, value);
            }
            // 3. If state is COMPLETED, then
            GeneratorState::Completed => {
                return self.finish_abrupt(agent, kind, value);
            }
            // 4. Assert: state is SUSPENDED-YIELD.
            GeneratorState::SuspendedYield { .. } => {}
        }

        let state = agent[self]
            .generator_state
            .replace(GeneratorState::Executing)
            .unwrap();
        let GeneratorState::SuspendedYield {
            vm,
            execution_context,
        } = state
        else {
            unreachable!()
        };

        // 5.-9. Push genContext and resume the suspended evaluation of
        //       genContext using abruptCompletion as the result of the
        //       operation that suspended it.
        agent.push_execution_context(execution_context);
        let execution_result = match kind {
            GeneratorAbruptKind::Return => vm.resume_return(agent, value),
            GeneratorAbruptKind::Throw => vm.resume_throw(agent, JsError::new(value)),
        };
        let execution_context = agent.pop_execution_context().unwrap();

        // 10. Return ? result.
        self.handle_execution_result(agent, execution_result, execution_context)
    }

    fn finish_abrupt(
        self,
        agent: &mut Agent,
        kind: GeneratorAbruptKind,
        value: Value,
    ) -> JsResult<Value> {
        match kind {
            // a. If abruptCompletion is a return completion, then
            //    i. Return CreateIteratorResultObject(
            //       abruptCompletion.[[Value]], true).
            GeneratorAbruptKind::Return => {
                Ok(create_iter_result_object(agent, value, true).into_value())
            }
            // b. Return ? abruptCompletion.
            GeneratorAbruptKind::Throw => Err(JsError::new(value)),
        }
    }

    fn handle_execution_result(
        self,
        agent: &mut Agent,
        execution_result: ExecutionResult,
        execution_context: ExecutionContext,
    ) -> JsResult<Value> {
        match execution_result {
            ExecutionResult::Return(result_value) => {
                // GeneratorStart step 4.g. Set generator.[[GeneratorState]]
                // to COMPLETED.
                agent[self].generator_state = Some(GeneratorState::Completed);
                // 4.j. Return CreateIteratorResultObject(resultValue,
                //      true).
                Ok(create_iter_result_object(agent, result_value, true).into_value())
            }
            ExecutionResult::Throw(err) => {
                agent[self].generator_state = Some(GeneratorState::Completed);
                Err(err)
            }
            ExecutionResult::Yield { vm, yielded } => {
                // GeneratorYield: the generator suspends with the iterator
                // result object as the resume value of GeneratorResume.
                agent[self].generator_state = Some(GeneratorState::SuspendedYield {
                    vm,
                    execution_context,
                });
                Ok(yielded)
            }
        }
    }
}

impl From<GeneratorIndex> for Generator {
    fn from(value: GeneratorIndex) -> Self {
        Generator(value)
    }
}

impl IntoObject for Generator {
    fn into_object(self) -> Object {
        Object::Generator(self)
    }
}

impl IntoValue for Generator {
    fn into_value(self) -> Value {
        Value::Generator(self)
    }
}

impl From<Generator> for Object {
    fn from(value: Generator) -> Self {
        Object::Generator(value)
    }
}

impl TryFrom<Value> for Generator {
    type Error = ();

    fn try_from(value: Value) -> Result<Self, ()> {
        match value {
            Value::Generator(generator) => Ok(generator),
            _ => Err(()),
        }
    }
}

impl_index_access!(Generator, GeneratorHeapData, generators, "Generator");

impl InternalSlots for Generator {
    const DEFAULT_PROTOTYPE: ProtoIntrinsics = ProtoIntrinsics::Generator;

    fn get_backing_object(self, agent: &Agent) -> Option<OrdinaryObject> {
        agent[self].object_index
    }

    fn set_backing_object(self, agent: &mut Agent, backing_object: OrdinaryObject) {
        assert!(agent[self].object_index.replace(backing_object).is_none());
    }
}

impl InternalMethods for Generator {}
