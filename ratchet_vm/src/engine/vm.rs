use oxc_ast::ast;

use super::frame::{AbruptCompletion, Frame, RestorePoint};
use crate::ecmascript::{
    abstract_operations::operations_on_iterator_objects::{
        iterator_close_with_error, iterator_close_with_value, IteratorRecord,
    },
    builtins::ecmascript_function::ECMAScriptFunction,
    execution::agent::{Agent, ExceptionType, JsError, JsResult},
    types::{
        language::value::Value,
        spec::reference::Reference,
    },
};

impl From<JsError> for AbruptCompletion {
    fn from(value: JsError) -> Self {
        AbruptCompletion::Throw(value)
    }
}

/// What kind of body this machine evaluates; decides the value produced
/// when the frame stack drains without an abrupt completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BodyKind {
    /// Top-level script: produces the script's completion value.
    Script,
    /// Function-like body: produces undefined unless `return` was used.
    Function,
    /// A single expression evaluated by a nested sub-machine.
    Expression,
}

/// The final state of a machine run.
#[derive(Debug)]
pub(crate) enum ExecutionResult {
    Return(Value),
    Throw(JsError),
    /// The body suspended at a `yield`; `yielded` is the iterator result
    /// object passed to the caller of GeneratorResume.
    Yield { vm: SuspendedVm, yielded: Value },
}

impl ExecutionResult {
    pub(crate) fn into_js_result(self) -> JsResult<Value> {
        match self {
            ExecutionResult::Return(value) => Ok(value),
            ExecutionResult::Throw(err) => Err(err),
            ExecutionResult::Yield { .. } => {
                unreachable!("non-generator body suspended")
            }
        }
    }
}

pub(crate) enum FrameOutcome {
    Continue,
    /// Suspend the machine, handing `Value` to the resumer.
    Yield(Value),
}

enum UnwindResult {
    Handled,
    Return(Value),
    Throw(JsError),
    /// `yield*` re-suspended while forwarding an abrupt resume.
    Yield(Value),
}

/// A machine suspended between two steps; owned by a generator object.
#[derive(Debug)]
pub(crate) struct SuspendedVm(Box<Vm>);

impl SuspendedVm {
    /// Resume a SUSPENDED-START machine: nothing consumes the resume
    /// value.
    pub(crate) fn start(self, agent: &mut Agent) -> ExecutionResult {
        self.0.run(agent)
    }

    /// Resume a SUSPENDED-YIELD machine with a normal completion: the
    /// value becomes the result of the `yield` expression.
    pub(crate) fn resume(self, agent: &mut Agent, value: Value) -> ExecutionResult {
        let mut vm = *self.0;
        vm.values.push(value);
        vm.run(agent)
    }

    /// Resume with a throw completion raised at the suspension point.
    pub(crate) fn resume_throw(self, agent: &mut Agent, err: JsError) -> ExecutionResult {
        let mut vm = *self.0;
        vm.resume_abrupt(agent, AbruptCompletion::Throw(err))
    }

    /// Resume with a return completion raised at the suspension point.
    pub(crate) fn resume_return(self, agent: &mut Agent, value: Value) -> ExecutionResult {
        let mut vm = *self.0;
        vm.resume_abrupt(agent, AbruptCompletion::Return(value))
    }
}

/// The step machine: a frame stack of AST continuations, an operand stack,
/// a reference stack, an iterator stack and a list stack. One [`Vm::step`]
/// pops and executes one frame.
#[derive(Debug)]
pub(crate) struct Vm {
    kind: BodyKind,
    pub(crate) frames: Vec<Frame>,
    pub(crate) values: Vec<Value>,
    pub(crate) references: Vec<Reference>,
    pub(crate) iterators: Vec<IteratorRecord>,
    pub(crate) lists: Vec<Vec<Value>>,
    /// The statement completion value (scripts only).
    pub(crate) result: Option<Value>,
}

impl Vm {
    pub(crate) fn new(kind: BodyKind) -> Self {
        Self {
            kind,
            frames: Vec::with_capacity(32),
            values: Vec::with_capacity(16),
            references: Vec::with_capacity(4),
            iterators: Vec::new(),
            lists: Vec::new(),
            result: None,
        }
    }

    /// A machine for a script's statement list.
    pub(crate) fn for_script(program: &'static ast::Program<'static>) -> Self {
        let mut vm = Self::new(BodyKind::Script);
        vm.frames.push(Frame::StatementList {
            statements: &program.body,
            index: 0,
        });
        vm
    }

    /// A machine for a function body; parameter binding has already run.
    pub(crate) fn for_function_body(function: ECMAScriptFunction) -> Self {
        let mut vm = Self::new(BodyKind::Function);
        vm.frames.push(Frame::EvaluateBody { function });
        vm
    }

    /// A machine for a bare statement list running in the current
    /// execution context (class static blocks).
    pub(crate) fn for_statement_list(statements: &'static [ast::Statement<'static>]) -> Self {
        let mut vm = Self::new(BodyKind::Function);
        vm.frames.push(Frame::StatementList {
            statements,
            index: 0,
        });
        vm
    }

    /// Package the machine up for storage in a generator object.
    pub(crate) fn suspend(self) -> SuspendedVm {
        SuspendedVm(Box::new(self))
    }

    /// Run a single expression on a nested sub-machine in the current
    /// execution context. Used where the evaluator needs a value
    /// mid-operation (class heritage, computed class element keys).
    pub(crate) fn evaluate_expression(
        agent: &mut Agent,
        expression: &'static ast::Expression<'static>,
    ) -> JsResult<Value> {
        let mut vm = Self::new(BodyKind::Expression);
        vm.frames.push(Frame::Expression(expression));
        match vm.run(agent) {
            ExecutionResult::Return(value) => Ok(value),
            ExecutionResult::Throw(err) => Err(err),
            ExecutionResult::Yield { .. } => Err(agent.throw_exception_with_static_message(
                ExceptionType::SyntaxError,
                "yield is not available in this position",
            )),
        }
    }

    /// Drive the machine until it returns, throws, or suspends.
    pub(crate) fn run(mut self, agent: &mut Agent) -> ExecutionResult {
        loop {
            // The driver may interrupt between any two steps; the interrupt
            // is a throw completion and runs the usual teardown path.
            if agent.consume_step() {
                let hooks = agent.host_hooks;
                let value = hooks.interrupt_exception(agent);
                match self.unwind(agent, AbruptCompletion::Throw(JsError::new(value))) {
                    UnwindResult::Handled => {}
                    UnwindResult::Return(value) => return ExecutionResult::Return(value),
                    UnwindResult::Throw(err) => return ExecutionResult::Throw(err),
                    UnwindResult::Yield(yielded) => {
                        return ExecutionResult::Yield {
                            vm: SuspendedVm(Box::new(self)),
                            yielded,
                        }
                    }
                }
                continue;
            }

            let Some(frame) = self.frames.pop() else {
                let value = match self.kind {
                    BodyKind::Script => self.result.take().unwrap_or(Value::Undefined),
                    BodyKind::Function => Value::Undefined,
                    BodyKind::Expression => self.values.pop().unwrap_or(Value::Undefined),
                };
                return ExecutionResult::Return(value);
            };

            match self.execute_frame(agent, frame) {
                Ok(FrameOutcome::Continue) => {}
                Ok(FrameOutcome::Yield(yielded)) => {
                    return ExecutionResult::Yield {
                        vm: SuspendedVm(Box::new(self)),
                        yielded,
                    }
                }
                Err(abrupt) => match self.unwind(agent, abrupt) {
                    UnwindResult::Handled => {}
                    UnwindResult::Return(value) => return ExecutionResult::Return(value),
                    UnwindResult::Throw(err) => return ExecutionResult::Throw(err),
                    UnwindResult::Yield(yielded) => {
                        return ExecutionResult::Yield {
                            vm: SuspendedVm(Box::new(self)),
                            yielded,
                        }
                    }
                },
            }
        }
    }

    fn resume_abrupt(mut self, agent: &mut Agent, abrupt: AbruptCompletion) -> ExecutionResult {
        match self.unwind(agent, abrupt) {
            UnwindResult::Handled => self.run(agent),
            UnwindResult::Return(value) => ExecutionResult::Return(value),
            UnwindResult::Throw(err) => ExecutionResult::Throw(err),
            UnwindResult::Yield(yielded) => ExecutionResult::Yield {
                vm: SuspendedVm(Box::new(self)),
                yielded,
            },
        }
    }

    // === Stack helpers ===================================================

    pub(crate) fn push_value(&mut self, value: Value) {
        self.values.push(value);
    }

    pub(crate) fn pop_value(&mut self) -> Value {
        self.values.pop().expect("value stack underflow")
    }

    pub(crate) fn peek_value(&self) -> Value {
        *self.values.last().expect("value stack underflow")
    }

    pub(crate) fn pop_reference(&mut self) -> Reference {
        self.references.pop().expect("reference stack underflow")
    }

    pub(crate) fn restore_point(&self, agent: &Agent) -> RestorePoint {
        RestorePoint {
            lexical_environment: agent.current_lexical_environment(),
            variable_environment: agent.current_variable_environment(),
            values_len: self.values.len(),
            references_len: self.references.len(),
            iterators_len: self.iterators.len(),
            lists_len: self.lists.len(),
        }
    }

    pub(crate) fn restore(&mut self, agent: &mut Agent, restore: RestorePoint) {
        self.values.truncate(restore.values_len);
        self.references.truncate(restore.references_len);
        self.iterators.truncate(restore.iterators_len);
        self.lists.truncate(restore.lists_len);
        agent.set_current_lexical_environment(restore.lexical_environment);
        agent.set_current_variable_environment(restore.variable_environment);
    }

    // === Unwinding =======================================================

    /// Propagate an abrupt completion outward until a frame intercepts it
    /// or the machine's boundary is reached.
    fn unwind(&mut self, agent: &mut Agent, completion: AbruptCompletion) -> UnwindResult {
        let mut completion = completion;
        loop {
            let Some(frame) = self.frames.pop() else {
                return match completion {
                    AbruptCompletion::Throw(err) => UnwindResult::Throw(err),
                    AbruptCompletion::Return(value) => UnwindResult::Return(value),
                    AbruptCompletion::Break(_)
                    | AbruptCompletion::Continue(_)
                    | AbruptCompletion::ShortCircuit => {
                        unreachable!("unterminated control-flow completion")
                    }
                };
            };
            match frame {
                Frame::BreakTarget {
                    labels,
                    catches_unlabeled,
                    restore,
                } => match completion {
                    AbruptCompletion::Break(None) if catches_unlabeled => {
                        self.restore(agent, restore);
                        return UnwindResult::Handled;
                    }
                    AbruptCompletion::Break(Some(label)) if labels.contains(&label) => {
                        self.restore(agent, restore);
                        return UnwindResult::Handled;
                    }
                    _ => {}
                },
                Frame::ContinueTarget { labels, restore } => match completion {
                    AbruptCompletion::Continue(None) => {
                        self.restore(agent, restore);
                        return UnwindResult::Handled;
                    }
                    AbruptCompletion::Continue(Some(label)) if labels.contains(&label) => {
                        self.restore(agent, restore);
                        return UnwindResult::Handled;
                    }
                    _ => {}
                },
                Frame::CatchHandler { r#try, restore } => {
                    if let AbruptCompletion::Throw(err) = completion {
                        self.restore(agent, restore);
                        match self.begin_catch(agent, r#try, err) {
                            Ok(()) => return UnwindResult::Handled,
                            Err(abrupt) => {
                                completion = abrupt;
                            }
                        }
                    }
                }
                Frame::FinallyHandler { block, restore } => {
                    if matches!(completion, AbruptCompletion::ShortCircuit) {
                        continue;
                    }
                    self.restore(agent, restore);
                    // The finalizer runs with the prior completion saved;
                    // its own abrupt completion overrides the saved one by
                    // unwinding straight through FinallyCompletion.
                    self.frames.push(Frame::FinallyCompletion {
                        completion: Some(completion),
                    });
                    self.begin_block(agent, &block.body);
                    return UnwindResult::Handled;
                }
                Frame::FinallyCompletion { .. } => {
                    // The finalizer itself completed abruptly; the saved
                    // completion is discarded.
                }
                Frame::IteratorCloseOnAbrupt { iterator_index }
                | Frame::ArrayPatternClose { iterator_index } => {
                    if matches!(completion, AbruptCompletion::ShortCircuit) {
                        continue;
                    }
                    let record = self.iterators[iterator_index];
                    self.iterators.truncate(iterator_index);
                    if !record.done {
                        completion = close_iterator_on_abrupt(agent, record, completion);
                    }
                }
                Frame::ChainEnd {
                    restore,
                    short_circuit_value,
                } => {
                    if matches!(completion, AbruptCompletion::ShortCircuit) {
                        self.restore(agent, restore);
                        self.values.push(short_circuit_value);
                        return UnwindResult::Handled;
                    }
                }
                Frame::YieldDelegate { iterator_index, .. } => {
                    match self.yield_delegate_forward(agent, iterator_index, completion) {
                        Ok(DelegateOutcome::Resumed(yielded)) => {
                            return UnwindResult::Yield(yielded);
                        }
                        Ok(DelegateOutcome::Finished) => return UnwindResult::Handled,
                        Ok(DelegateOutcome::Unwind(next)) => {
                            completion = next;
                        }
                        Err(err) => {
                            completion = AbruptCompletion::Throw(err);
                        }
                    }
                }
                _ => {
                    // Plain continuation frames are discarded.
                }
            }
        }
    }
}

pub(crate) enum DelegateOutcome {
    /// The inner iterator yielded again; the machine re-suspends.
    Resumed(Value),
    /// Delegation finished normally; the `yield*` value is on the stack.
    Finished,
    /// Delegation converted the completion; continue unwinding with it.
    Unwind(AbruptCompletion),
}

fn close_iterator_on_abrupt(
    agent: &mut Agent,
    record: IteratorRecord,
    completion: AbruptCompletion,
) -> AbruptCompletion {
    match completion {
        // Throw wins over errors from the `return` call.
        AbruptCompletion::Throw(err) => {
            AbruptCompletion::Throw(iterator_close_with_error(agent, record.iterator, err))
        }
        // Break, continue and return run the `return` method; an error
        // from it replaces the completion.
        AbruptCompletion::Return(_)
        | AbruptCompletion::Break(_)
        | AbruptCompletion::Continue(_) => {
            match iterator_close_with_value(agent, record.iterator, Value::Undefined) {
                Ok(_) => completion,
                Err(err) => AbruptCompletion::Throw(err),
            }
        }
        AbruptCompletion::ShortCircuit => completion,
    }
}
