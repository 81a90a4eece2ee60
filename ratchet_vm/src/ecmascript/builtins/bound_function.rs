use crate::{
    ecmascript::{
        builtins::builtin_function::ArgumentsList,
        execution::{
            agent::{Agent, JsResult},
            realm::ProtoIntrinsics,
        },
        types::{
            language::{
                function::{Function, IntoFunction},
                object::{
                    data::ObjectHeapData, internal_methods::InternalMethods,
                    internal_slots::InternalSlots, IntoObject, Object, OrdinaryObject,
                },
                value::{IntoValue, Value},
            },
        },
    },
    heap::{impl_index_access, indexes::BoundFunctionIndex, CreateHeapData},
};

/// ### [10.4.1 Bound Function Exotic Objects](https://tc39.es/ecma262/#sec-bound-function-exotic-objects)
///
/// A bound function exotic object is an exotic object that wraps another
/// function object. Calling a bound function generally results in a call of
/// its wrapped function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct BoundFunction(pub(crate) BoundFunctionIndex);

#[derive(Debug)]
pub struct BoundFunctionHeapData {
    pub(crate) object_index: Option<OrdinaryObject>,
    /// ### \[\[BoundTargetFunction\]\]
    ///
    /// The wrapped function object.
    pub(crate) bound_target_function: Function,
    /// ### \[\[BoundThis\]\]
    ///
    /// The value that is always passed as the this value when calling the
    /// wrapped function.
    pub(crate) bound_this: Value,
    /// ### \[\[BoundArguments\]\]
    ///
    /// A list of values whose elements are used as the first arguments to
    /// any call to the wrapped function.
    pub(crate) bound_arguments: Vec<Value>,
}

impl BoundFunction {
    pub(crate) const fn get_index(self) -> usize {
        self.0.into_index()
    }

    pub fn is_constructor(self, agent: &Agent) -> bool {
        agent[self].bound_target_function.is_constructor(agent)
    }
}

impl From<BoundFunctionIndex> for BoundFunction {
    fn from(value: BoundFunctionIndex) -> Self {
        BoundFunction(value)
    }
}

impl IntoObject for BoundFunction {
    fn into_object(self) -> Object {
        Object::BoundFunction(self)
    }
}

impl IntoValue for BoundFunction {
    fn into_value(self) -> Value {
        Value::BoundFunction(self)
    }
}

impl IntoFunction for BoundFunction {
    fn into_function(self) -> Function {
        Function::BoundFunction(self)
    }
}

impl From<BoundFunction> for Object {
    fn from(value: BoundFunction) -> Self {
        Object::BoundFunction(value)
    }
}

impl_index_access!(
    BoundFunction,
    BoundFunctionHeapData,
    bound_functions,
    "BoundFunction"
);

impl InternalSlots for BoundFunction {
    const DEFAULT_PROTOTYPE: ProtoIntrinsics = ProtoIntrinsics::Function;

    fn get_backing_object(self, agent: &Agent) -> Option<OrdinaryObject> {
        agent[self].object_index
    }

    fn set_backing_object(self, agent: &mut Agent, backing_object: OrdinaryObject) {
        assert!(agent[self].object_index.replace(backing_object).is_none());
    }
}

impl InternalMethods for BoundFunction {
    /// ### [10.4.1.1 \[\[Call\]\] ( thisArgument, argumentsList )](https://tc39.es/ecma262/#sec-bound-function-exotic-objects-call-thisargument-argumentslist)
    fn internal_call(
        self,
        agent: &mut Agent,
        _this_argument: Value,
        arguments_list: ArgumentsList,
    ) -> JsResult<Value> {
        // 1. Let target be F.[[BoundTargetFunction]].
        let target = agent[self].bound_target_function;
        // 2. Let boundThis be F.[[BoundThis]].
        let bound_this = agent[self].bound_this;
        // 3. Let boundArgs be F.[[BoundArguments]].
        // 4. Let args be the list-concatenation of boundArgs and
        //    argumentsList.
        let mut args = agent[self].bound_arguments.clone();
        args.extend_from_slice(&arguments_list);
        // 5. Return ? Call(target, boundThis, args).
        target.internal_call(agent, bound_this, ArgumentsList(&args))
    }

    /// ### [10.4.1.2 \[\[Construct\]\] ( argumentsList, newTarget )](https://tc39.es/ecma262/#sec-bound-function-exotic-objects-construct-argumentslist-newtarget)
    fn internal_construct(
        self,
        agent: &mut Agent,
        arguments_list: ArgumentsList,
        new_target: Function,
    ) -> JsResult<Object> {
        // 1. Let target be F.[[BoundTargetFunction]].
        let target = agent[self].bound_target_function;
        // 2. Assert: IsConstructor(target) is true.
        debug_assert!(target.is_constructor(agent));
        // 3. Let boundArgs be F.[[BoundArguments]].
        // 4. Let args be the list-concatenation of boundArgs and
        //    argumentsList.
        let mut args = agent[self].bound_arguments.clone();
        args.extend_from_slice(&arguments_list);
        // 5. If SameValue(F, newTarget) is true, set newTarget to target.
        let new_target = if new_target == self.into_function() {
            target
        } else {
            new_target
        };
        // 6. Return ? Construct(target, args, newTarget).
        target.internal_construct(agent, ArgumentsList(&args), new_target)
    }
}

/// ### [10.4.1.3 BoundFunctionCreate ( targetFunction, boundThis, boundArgs )](https://tc39.es/ecma262/#sec-boundfunctioncreate)
pub(crate) fn bound_function_create(
    agent: &mut Agent,
    target_function: Function,
    bound_this: Value,
    bound_args: &[Value],
) -> JsResult<BoundFunction> {
    // 1. Let proto be ? targetFunction.[[GetPrototypeOf]]().
    let proto = target_function
        .into_object()
        .internal_get_prototype_of(agent)?;
    // 2. Let internalSlotsList be the list-concatenation of
    //    « [[Prototype]], [[Extensible]] » and the internal slots listed in
    //    Table 31.
    // 3. Let obj be MakeBasicObject(internalSlotsList).
    // 4. Set obj.[[Prototype]] to proto.
    let backing_object = agent.heap.create(ObjectHeapData::new(proto));
    // 5. Set obj.[[Call]] as described in 10.4.1.1.
    // 6. If IsConstructor(targetFunction) is true, set obj.[[Construct]] as
    //    described in 10.4.1.2.
    // 7.-9. Set the bound slots.
    // 10. Return obj.
    Ok(agent.heap.create(BoundFunctionHeapData {
        object_index: Some(backing_object),
        bound_target_function: target_function,
        bound_this,
        bound_arguments: bound_args.to_vec(),
    }))
}
