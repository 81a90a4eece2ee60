//! The machine's continuation frames.
//!
//! A frame is one unit of pending work. Executing a frame may push values,
//! references or further frames; control-flow frames additionally intercept
//! abrupt completions during unwinding. Every frame documents its stack
//! contract at its variant.

use std::rc::Rc;

use oxc_ast::ast;
use oxc_span::Atom;
use oxc_syntax::operator::{BinaryOperator, LogicalOperator, UnaryOperator, UpdateOperator};

use crate::ecmascript::{
    execution::{agent::JsError, environments::EnvironmentIndex},
    types::{
        language::{object::property_key::PropertyKey, string::String, value::Value},
    },
};

/// An abrupt completion travelling up the frame stack.
#[derive(Debug, Clone, Copy)]
pub(crate) enum AbruptCompletion {
    Throw(JsError),
    Return(Value),
    Break(Option<Atom<'static>>),
    Continue(Option<Atom<'static>>),
    /// An optional chain hit a nullish base; intercepted only by
    /// [`Frame::ChainEnd`] and never escapes an expression.
    ShortCircuit,
}

/// The stack depths and environments an interceptor restores when it
/// catches an abrupt completion.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RestorePoint {
    pub(crate) lexical_environment: EnvironmentIndex,
    pub(crate) variable_environment: EnvironmentIndex,
    pub(crate) values_len: usize,
    pub(crate) references_len: usize,
    pub(crate) iterators_len: usize,
    pub(crate) lists_len: usize,
}

/// The key of a member access continuation.
#[derive(Debug, Clone, Copy)]
pub(crate) enum MemberKey {
    /// `base.name`; the name is interned on first use.
    Static(Atom<'static>),
    /// `base[expr]`; the key value is popped from the value stack.
    Computed,
    /// `base.#name`; resolved through the running private environment.
    Private(Atom<'static>),
}

#[derive(Debug)]
pub(crate) enum Frame {
    // === Dispatch ========================================================
    /// Evaluate a statement.
    Statement(&'static ast::Statement<'static>),
    /// Evaluate the remainder of a statement list, one statement per step.
    StatementList {
        statements: &'static [ast::Statement<'static>],
        index: usize,
    },
    /// Evaluate an expression; pushes its value.
    Expression(&'static ast::Expression<'static>),
    /// NamedEvaluation of an anonymous function or class expression.
    NamedExpression {
        expression: &'static ast::Expression<'static>,
        name: PropertyKey,
    },
    /// Push a precomputed value.
    LoadValue(Value),

    // === Generic continuations ==========================================
    /// Pop and discard the top value.
    DiscardValue,
    /// Pop the top value into the machine's result register.
    StoreResult,
    /// Pop a value, convert with ToString, push the string.
    ToStringValue,
    /// Pop the template's expression strings and interleave them with the
    /// cooked quasis.
    TemplateConcat {
        template: &'static ast::TemplateLiteral<'static>,
    },
    UnaryApply {
        operator: UnaryOperator,
    },
    BinaryApply {
        operator: BinaryOperator,
    },
    /// Pop the left operand; push it back and stop, or evaluate the right
    /// operand, per the operator's short-circuit rule.
    LogicalCheck {
        operator: LogicalOperator,
        right: &'static ast::Expression<'static>,
    },
    ConditionalCheck {
        consequent: &'static ast::Expression<'static>,
        alternate: &'static ast::Expression<'static>,
    },
    /// Pop a value; if it is nullish, short-circuit the containing chain,
    /// otherwise push it back.
    OptionalCheck,
    /// The boundary of an optional chain; intercepts
    /// [`AbruptCompletion::ShortCircuit`] and pushes the chain's
    /// short-circuit result (undefined, or true for `delete`).
    ChainEnd {
        restore: RestorePoint,
        short_circuit_value: Value,
    },

    // === References ======================================================
    /// Pop the base (and computed key); push a property Reference.
    BuildPropertyReference {
        key: MemberKey,
        strict: bool,
    },
    /// Pop the computed key (if any); push a super property Reference.
    BuildSuperReference {
        computed: bool,
        field: Option<Atom<'static>>,
        strict: bool,
    },
    /// GetValue on the top reference; pops it and pushes the value.
    RefGetValue,
    /// Keep the top reference and push its current value as well.
    RefGetValueKeep,
    /// Pop a value and the top reference; PutValue and push the value.
    PutValue,
    /// Pop a value and the top reference; InitializeReferencedBinding.
    InitializeRef,
    /// Pop rhs and lhs values, apply the operator, push the result.
    CompoundApply {
        operator: BinaryOperator,
    },
    /// Pop the current value of the logical-assignment target; either
    /// finish with it or evaluate and assign the right-hand side.
    LogicalAssignCheck {
        operator: LogicalOperator,
        right: &'static ast::Expression<'static>,
        name: Option<PropertyKey>,
    },
    /// Pop the top reference; read, increment/decrement, write back; push
    /// the old or new value.
    UpdateApply {
        operator: UpdateOperator,
        prefix: bool,
    },
    /// Pop the top reference and delete the referenced property/binding.
    DeleteApply,
    /// Pop the right operand of `#field in obj`.
    PrivateInApply {
        field: Atom<'static>,
    },

    // === Calls ===========================================================
    /// Pop the top reference; push this-value and function; begin argument
    /// evaluation, ending in CallApply.
    CallWithRef {
        arguments: &'static [ast::Argument<'static>],
        optional_call: bool,
    },
    /// Pop the callee value; this is undefined; begin argument evaluation.
    CallWithValue {
        arguments: &'static [ast::Argument<'static>],
        optional_call: bool,
    },
    /// Pop the argument list, function and this-value; call; push result.
    CallApply,
    /// Pop the constructor value; begin argument evaluation ending in
    /// ConstructApply.
    ConstructWithValue {
        arguments: &'static [ast::Argument<'static>],
    },
    /// Pop the argument list and constructor; construct; push result.
    ConstructApply,
    /// Begin argument evaluation for `super(...)`.
    SuperCall {
        arguments: &'static [ast::Argument<'static>],
    },
    /// Pop the argument list; invoke the super constructor, bind `this`.
    SuperCallApply,
    /// Pop the tag reference/value of a tagged template and begin its
    /// argument evaluation (template object first).
    TaggedTemplateCall {
        tagged: &'static ast::TaggedTemplateExpression<'static>,
        with_ref: bool,
    },
    /// Pop a value and append it to the open argument list.
    PushToList,
    /// Pop an iterable and start spreading it into the open list.
    SpreadBegin,
    /// Step the spread iterator once; repushes itself until done.
    SpreadStep,

    // === Object and array literals ======================================
    /// Define one property of an object literal; the object is below the
    /// operands on the value stack.
    ObjectDefineProperty {
        property: &'static ast::ObjectProperty<'static>,
        key: Option<PropertyKey>,
    },
    /// Pop the computed key of an object literal property and continue
    /// with its value.
    ObjectComputedKey {
        property: &'static ast::ObjectProperty<'static>,
    },
    /// Pop a source value and copy its enumerable own properties into the
    /// object literal under construction.
    ObjectSpread,
    /// Pop a value and install it as the literal's prototype.
    ObjectSetPrototype,
    /// Process the next element of an array literal; the array is on top
    /// of the value stack between elements.
    ArrayLiteralNext {
        elements: &'static [ast::ArrayExpressionElement<'static>],
        index: usize,
    },
    /// Pop a value and append it at the array literal's current length.
    ArrayAppend,
    /// Pop an iterable and start spreading it into the array literal.
    ArraySpreadBegin,
    ArraySpreadStep,

    // === Control-flow targets and handlers ==============================
    /// Catches `break` completions addressed to this statement. An
    /// unlabeled `break` stops at the nearest breakable target (loop or
    /// switch).
    BreakTarget {
        labels: Rc<[Atom<'static>]>,
        catches_unlabeled: bool,
        restore: RestorePoint,
    },
    /// Catches `continue` completions addressed to this iteration.
    ContinueTarget {
        labels: Rc<[Atom<'static>]>,
        restore: RestorePoint,
    },
    /// Restores the environments on normal completion of a block.
    RestoreEnvironment {
        lexical_environment: EnvironmentIndex,
        variable_environment: EnvironmentIndex,
    },
    /// Catches throw completions of a try block.
    CatchHandler {
        r#try: &'static ast::TryStatement<'static>,
        restore: RestorePoint,
    },
    /// Runs the finalizer on every exit path of a try block.
    FinallyHandler {
        block: &'static ast::BlockStatement<'static>,
        restore: RestorePoint,
    },
    /// Resumes the completion that was pending when the finalizer started.
    FinallyCompletion {
        completion: Option<AbruptCompletion>,
    },
    /// Closes the for-of (or destructuring) iterator when an abrupt
    /// completion passes by.
    IteratorCloseOnAbrupt {
        iterator_index: usize,
    },

    // === Statements ======================================================
    IfCheck(&'static ast::IfStatement<'static>),
    WhileTest {
        statement: &'static ast::WhileStatement<'static>,
        labels: Rc<[Atom<'static>]>,
    },
    WhileCheck {
        statement: &'static ast::WhileStatement<'static>,
        labels: Rc<[Atom<'static>]>,
    },
    DoWhileCheck {
        statement: &'static ast::DoWhileStatement<'static>,
        labels: Rc<[Atom<'static>]>,
    },
    ForTest {
        statement: &'static ast::ForStatement<'static>,
        labels: Rc<[Atom<'static>]>,
        per_iteration_lets: Rc<[String]>,
    },
    ForCheck {
        statement: &'static ast::ForStatement<'static>,
        labels: Rc<[Atom<'static>]>,
        per_iteration_lets: Rc<[String]>,
    },
    ForUpdate {
        statement: &'static ast::ForStatement<'static>,
        labels: Rc<[Atom<'static>]>,
        per_iteration_lets: Rc<[String]>,
        /// False for the entry into the loop, where only the first
        /// per-iteration environment copy runs.
        run_update: bool,
    },
    /// Pop the object of a for-in statement and begin enumeration.
    ForInBegin {
        statement: &'static ast::ForInStatement<'static>,
        labels: Rc<[Atom<'static>]>,
    },
    ForInNext {
        statement: &'static ast::ForInStatement<'static>,
        labels: Rc<[Atom<'static>]>,
        object: crate::ecmascript::types::Object,
        keys: Rc<Vec<PropertyKey>>,
        index: usize,
    },
    /// Pop the iterable of a for-of statement and begin iteration.
    ForOfBegin {
        statement: &'static ast::ForOfStatement<'static>,
        labels: Rc<[Atom<'static>]>,
    },
    ForOfNext {
        statement: &'static ast::ForOfStatement<'static>,
        labels: Rc<[Atom<'static>]>,
    },
    /// Pop the with-statement object and enter its object environment.
    WithBegin {
        statement: &'static ast::WithStatement<'static>,
    },
    /// Pop the switch discriminant and begin case selection.
    SwitchBegin {
        statement: &'static ast::SwitchStatement<'static>,
        labels: Rc<[Atom<'static>]>,
    },
    SwitchCaseTest {
        statement: &'static ast::SwitchStatement<'static>,
        discriminant: Value,
        index: usize,
    },
    SwitchCaseCheck {
        statement: &'static ast::SwitchStatement<'static>,
        discriminant: Value,
        index: usize,
    },
    SwitchRunCases {
        statement: &'static ast::SwitchStatement<'static>,
        case_index: usize,
    },
    /// Pop a value and raise a Return completion.
    ReturnValue,
    /// Pop a value and raise a Throw completion.
    ThrowValue,

    // === Function bodies =================================================
    /// Install the variable scopes of a function after parameter binding
    /// and push its body.
    FunctionVarScopes {
        function: crate::ecmascript::builtins::ecmascript_function::ECMAScriptFunction,
    },
    /// Push the statements (or concise expression) of a function body.
    EvaluateBody {
        function: crate::ecmascript::builtins::ecmascript_function::ECMAScriptFunction,
    },

    // === Generators ======================================================
    /// Pop a value and suspend the machine, yielding an iterator result.
    Yield,
    /// Pop the iterable of `yield*` and begin delegation.
    YieldDelegateBegin,
    /// Drive one step of `yield*` delegation; intercepts resumed throw and
    /// return completions to forward them to the inner iterator.
    YieldDelegate {
        iterator_index: usize,
        /// Whether the next execution consumes a resumed value from the
        /// value stack (true after a suspension) or starts with the top
        /// value as the first `next` argument.
        resumed: bool,
    },

    // === Binding patterns ================================================
    /// Pop a value and bind it to a pattern (declaration or parameter).
    BindingInit {
        pattern: &'static ast::BindingPattern<'static>,
        environment: Option<EnvironmentIndex>,
    },
    ObjectPatternNext {
        pattern: &'static ast::ObjectPattern<'static>,
        index: usize,
        environment: Option<EnvironmentIndex>,
        source: Value,
        seen: Vec<PropertyKey>,
    },
    /// Pop the computed key of an object pattern property, then continue
    /// with ObjectPatternNext.
    ObjectPatternComputedKey {
        pattern: &'static ast::ObjectPattern<'static>,
        index: usize,
        environment: Option<EnvironmentIndex>,
        source: Value,
        seen: Vec<PropertyKey>,
    },
    ArrayPatternNext {
        pattern: &'static ast::ArrayPattern<'static>,
        index: usize,
        environment: Option<EnvironmentIndex>,
        iterator_index: usize,
    },
    /// Closes the destructuring iterator: on normal completion when the
    /// iterator is not done, and on any abrupt completion passing by.
    ArrayPatternClose {
        iterator_index: usize,
    },

    // === Assignment patterns =============================================
    /// Pop a value and destructure it into assignment targets.
    AssignmentPatternInit {
        target: &'static ast::AssignmentTarget<'static>,
    },
    ObjectAssignNext {
        pattern: &'static ast::ObjectAssignmentTarget<'static>,
        index: usize,
        source: Value,
        seen: Vec<PropertyKey>,
    },
    ObjectAssignComputedKey {
        pattern: &'static ast::ObjectAssignmentTarget<'static>,
        index: usize,
        source: Value,
        seen: Vec<PropertyKey>,
    },
    ArrayAssignNext {
        pattern: &'static ast::ArrayAssignmentTarget<'static>,
        index: usize,
        iterator_index: usize,
    },
    /// Duplicate the top value.
    DuplicateValue,
}
