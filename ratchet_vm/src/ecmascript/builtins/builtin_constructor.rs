use oxc_span::Span;

use crate::{
    ecmascript::{
        abstract_operations::{
            operations_on_objects::{construct, initialize_instance_elements},
            testing_and_comparison::is_constructor,
        },
        builtins::{
            builtin_function::ArgumentsList,
            ecmascript_function::ClassFieldDefinitionRecord,
            ordinary::ordinary_create_from_constructor,
        },
        execution::{
            agent::{Agent, ExceptionType, JsResult},
            execution_context::ExecutionContext,
            realm::{ProtoIntrinsics, RealmIdentifier},
        },
        types::{
            language::{
                function::{Function, IntoFunction},
                object::{
                    internal_methods::InternalMethods, internal_slots::InternalSlots, IntoObject,
                    Object, OrdinaryObject,
                },
                value::{IntoValue, Value},
            },
            spec::private_name::PrivateElement,
        },
    },
    heap::{impl_index_access, indexes::BuiltinConstructorIndex},
};

/// A synthesized class default constructor: a class definition with no
/// `constructor` method gets one of these as its constructor function. It
/// carries the class's fields and private methods but has no ECMAScript
/// code of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct BuiltinConstructorFunction(pub(crate) BuiltinConstructorIndex);

#[derive(Debug)]
pub struct BuiltinConstructorHeapData {
    pub(crate) object_index: Option<OrdinaryObject>,
    /// ### \[\[Realm\]\]
    pub(crate) realm: RealmIdentifier,
    /// Whether the synthesized constructor belongs to a derived class.
    pub(crate) is_derived: bool,
    /// ### \[\[Fields\]\]
    pub(crate) fields: Vec<ClassFieldDefinitionRecord>,
    /// ### \[\[PrivateMethods\]\]
    pub(crate) private_methods: Vec<PrivateElement>,
    /// ### \[\[SourceText\]\]
    pub(crate) source_text: Span,
}

impl BuiltinConstructorFunction {
    pub(crate) const fn get_index(self) -> usize {
        self.0.into_index()
    }
}

impl From<BuiltinConstructorIndex> for BuiltinConstructorFunction {
    fn from(value: BuiltinConstructorIndex) -> Self {
        BuiltinConstructorFunction(value)
    }
}

impl IntoObject for BuiltinConstructorFunction {
    fn into_object(self) -> Object {
        Object::BuiltinConstructorFunction(self)
    }
}

impl IntoValue for BuiltinConstructorFunction {
    fn into_value(self) -> Value {
        Value::BuiltinConstructorFunction(self)
    }
}

impl IntoFunction for BuiltinConstructorFunction {
    fn into_function(self) -> Function {
        Function::BuiltinConstructorFunction(self)
    }
}

impl From<BuiltinConstructorFunction> for Object {
    fn from(value: BuiltinConstructorFunction) -> Self {
        Object::BuiltinConstructorFunction(value)
    }
}

impl TryFrom<Value> for BuiltinConstructorFunction {
    type Error = ();

    fn try_from(value: Value) -> Result<Self, ()> {
        match value {
            Value::BuiltinConstructorFunction(f) => Ok(f),
            _ => Err(()),
        }
    }
}

impl_index_access!(
    BuiltinConstructorFunction,
    BuiltinConstructorHeapData,
    builtin_constructors,
    "BuiltinConstructorFunction"
);

impl InternalSlots for BuiltinConstructorFunction {
    const DEFAULT_PROTOTYPE: ProtoIntrinsics = ProtoIntrinsics::Function;

    fn get_backing_object(self, agent: &Agent) -> Option<OrdinaryObject> {
        agent[self].object_index
    }

    fn set_backing_object(self, agent: &mut Agent, backing_object: OrdinaryObject) {
        assert!(agent[self].object_index.replace(backing_object).is_none());
    }
}

impl InternalMethods for BuiltinConstructorFunction {
    fn internal_call(
        self,
        agent: &mut Agent,
        _this_argument: Value,
        _arguments_list: ArgumentsList,
    ) -> JsResult<Value> {
        // ii. If NewTarget is undefined, throw a TypeError exception: class
        //     constructors cannot be called without new.
        Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "class constructors must be invoked with 'new'",
        ))
    }

    fn internal_construct(
        self,
        agent: &mut Agent,
        arguments_list: ArgumentsList,
        new_target: Function,
    ) -> JsResult<Object> {
        // The default constructor runs in its own execution context so that
        // error objects it creates are associated with its realm.
        let callee_context = ExecutionContext {
            ecmascript_code: None,
            function: Some(self.into_function()),
            realm: agent[self].realm,
            script_or_module: None,
        };
        agent.push_execution_context(callee_context);
        let result = if agent[self].is_derived {
            derived_class_default_constructor(agent, arguments_list, new_target)
        } else {
            base_class_default_constructor(agent, new_target)
        };
        agent.pop_execution_context();
        result
    }
}

/// The behaviour of `constructor() {}` in a base class.
fn base_class_default_constructor(agent: &mut Agent, new_target: Function) -> JsResult<Object> {
    // iii. Let F be the active function object.
    let f = BuiltinConstructorFunction::try_from(
        agent.active_function_object().into_value(),
    )
    .unwrap();

    // v. Else,
    // 1. NOTE: This branch behaves similarly to constructor() {}.
    // 2. Let result be ? OrdinaryCreateFromConstructor(NewTarget,
    //    "%Object.prototype%").
    let result = ordinary_create_from_constructor(agent, new_target, ProtoIntrinsics::Object)?;

    // vi. Perform ? InitializeInstanceElements(result, F).
    initialize_instance_elements(agent, result.into_object(), f.into_function())?;

    // vii. Return result.
    Ok(result.into_object())
}

/// The behaviour of `constructor(...args) { super(...args); }` in a derived
/// class. The most notable distinction from that source text is that this
/// function does not observably call the %Symbol.iterator% method of
/// %Array.prototype%.
fn derived_class_default_constructor(
    agent: &mut Agent,
    args: ArgumentsList,
    new_target: Function,
) -> JsResult<Object> {
    // iii. Let F be the active function object.
    let f = BuiltinConstructorFunction::try_from(
        agent.active_function_object().into_value(),
    )
    .unwrap();

    // 2. Let func be ! F.[[GetPrototypeOf]]().
    let func = f.into_object().internal_get_prototype_of(agent)?;

    // 3. If IsConstructor(func) is false, throw a TypeError exception.
    let Some(func) = func.and_then(|func| is_constructor(agent, func.into_value())) else {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Expected callable function",
        ));
    };

    // 4. Let result be ? Construct(func, args, NewTarget).
    let result = construct(agent, func, Some(args), Some(new_target))?;

    // vi. Perform ? InitializeInstanceElements(result, F).
    initialize_instance_elements(agent, result, f.into_function())?;

    // vii. Return result.
    Ok(result)
}
