use core::ops::Deref;

use crate::{
    ecmascript::{
        execution::{
            agent::{Agent, JsResult},
            execution_context::ExecutionContext,
            realm::{ProtoIntrinsics, RealmIdentifier},
        },
        types::{
            language::{
                function::{Function, IntoFunction},
                object::{
                    data::ObjectHeapData,
                    internal_methods::InternalMethods,
                    internal_slots::InternalSlots,
                    property_key::PropertyKey,
                    property_storage::PropertyData,
                    IntoObject, Object, OrdinaryObject,
                },
                string::String,
                value::{IntoValue, Value},
            },
        },
    },
    heap::{impl_index_access, indexes::BuiltinFunctionIndex, CreateHeapData, WellKnownSymbolIndexes},
};

/// The arguments of a \[\[Call\]\] or \[\[Construct\]\] invocation. Absent
/// positions read as undefined.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArgumentsList<'a>(pub(crate) &'a [Value]);

impl<'a> Deref for ArgumentsList<'a> {
    type Target = &'a [Value];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl ArgumentsList<'_> {
    #[inline]
    pub fn get(&self, index: usize) -> Value {
        *self.0.get(index).unwrap_or(&Value::Undefined)
    }
}

pub type RegularFn = fn(&mut Agent, Value, ArgumentsList) -> JsResult<Value>;
pub type ConstructorFn = fn(&mut Agent, Value, ArgumentsList, Option<Object>) -> JsResult<Value>;

/// The behaviour of a built-in function: a plain callable, or a constructor
/// that also observes its newTarget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behaviour {
    Regular(RegularFn),
    Constructor(ConstructorFn),
}

impl Behaviour {
    pub(crate) fn is_constructor(&self) -> bool {
        matches!(self, Behaviour::Constructor(_))
    }
}

/// A statically described built-in function: the plugins declare one
/// implementation of this trait per function they install.
pub trait Builtin {
    const NAME: &'static str;
    const LENGTH: u8;
    const BEHAVIOUR: Behaviour;

    /// A well-known-symbol property key; `None` means NAME is the key.
    const KEY: Option<WellKnownSymbolIndexes> = None;

    const WRITABLE: bool = true;
    const ENUMERABLE: bool = false;
    const CONFIGURABLE: bool = true;
}

/// A statically described built-in accessor getter.
pub trait BuiltinGetter: Builtin {}

#[derive(Debug, Default)]
pub struct BuiltinFunctionArgs {
    pub length: u32,
    pub name: &'static str,
    pub realm: Option<RealmIdentifier>,
    pub prototype: Option<Object>,
}

impl BuiltinFunctionArgs {
    pub fn new(length: u32, name: &'static str, realm: RealmIdentifier) -> Self {
        Self {
            length,
            name,
            realm: Some(realm),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct BuiltinFunction(pub(crate) BuiltinFunctionIndex);

#[derive(Debug)]
pub struct BuiltinFunctionHeapData {
    pub(crate) object_index: Option<OrdinaryObject>,
    pub(crate) length: u8,
    /// ### \[\[Realm\]\]
    pub(crate) realm: RealmIdentifier,
    /// ### \[\[InitialName\]\]
    pub(crate) initial_name: Option<String>,
    pub(crate) behaviour: Behaviour,
}

impl BuiltinFunction {
    pub(crate) const fn get_index(self) -> usize {
        self.0.into_index()
    }

    pub fn is_constructor(self, agent: &Agent) -> bool {
        agent[self].behaviour.is_constructor()
    }
}

impl From<BuiltinFunctionIndex> for BuiltinFunction {
    fn from(value: BuiltinFunctionIndex) -> Self {
        BuiltinFunction(value)
    }
}

impl IntoObject for BuiltinFunction {
    fn into_object(self) -> Object {
        Object::BuiltinFunction(self)
    }
}

impl IntoValue for BuiltinFunction {
    fn into_value(self) -> Value {
        Value::BuiltinFunction(self)
    }
}

impl IntoFunction for BuiltinFunction {
    fn into_function(self) -> Function {
        Function::BuiltinFunction(self)
    }
}

impl From<BuiltinFunction> for Object {
    fn from(value: BuiltinFunction) -> Self {
        Object::BuiltinFunction(value)
    }
}

impl_index_access!(
    BuiltinFunction,
    BuiltinFunctionHeapData,
    builtin_functions,
    "BuiltinFunction"
);

impl InternalSlots for BuiltinFunction {
    const DEFAULT_PROTOTYPE: ProtoIntrinsics = ProtoIntrinsics::Function;

    fn get_backing_object(self, agent: &Agent) -> Option<OrdinaryObject> {
        agent[self].object_index
    }

    fn set_backing_object(self, agent: &mut Agent, backing_object: OrdinaryObject) {
        assert!(agent[self].object_index.replace(backing_object).is_none());
    }

    fn internal_prototype(self, agent: &Agent) -> Option<Object> {
        if let Some(backing_object) = self.get_backing_object(agent) {
            agent[backing_object].prototype
        } else {
            let realm = agent[self].realm;
            Some(agent.get_realm(realm).intrinsics().function_prototype())
        }
    }
}

impl InternalMethods for BuiltinFunction {
    /// ### [10.3.1 \[\[Call\]\] ( thisArgument, argumentsList )](https://tc39.es/ecma262/#sec-built-in-function-objects-call-thisargument-argumentslist)
    fn internal_call(
        self,
        agent: &mut Agent,
        this_argument: Value,
        arguments_list: ArgumentsList,
    ) -> JsResult<Value> {
        // 1. Return ? BuiltinCallOrConstruct(F, thisArgument,
        //    argumentsList, undefined).
        builtin_call_or_construct(agent, self, this_argument, arguments_list, None)
    }

    /// ### [10.3.2 \[\[Construct\]\] ( argumentsList, newTarget )](https://tc39.es/ecma262/#sec-built-in-function-objects-construct-argumentslist-newtarget)
    fn internal_construct(
        self,
        agent: &mut Agent,
        arguments_list: ArgumentsList,
        new_target: Function,
    ) -> JsResult<Object> {
        // 1. Return ? BuiltinCallOrConstruct(F, UNINITIALIZED,
        //    argumentsList, newTarget).
        let result = builtin_call_or_construct(
            agent,
            self,
            Value::Undefined,
            arguments_list,
            Some(new_target),
        )?;
        // 2. Assert: result is an Object: built-in constructors always
        //    return an object.
        Ok(Object::try_from(result).expect("built-in constructor returned a non-object"))
    }
}

/// ### [10.3.3 BuiltinCallOrConstruct ( F, thisArgument, argumentsList, newTarget )](https://tc39.es/ecma262/#sec-builtincallorconstruct)
pub(crate) fn builtin_call_or_construct(
    agent: &mut Agent,
    f: BuiltinFunction,
    this_argument: Value,
    arguments_list: ArgumentsList,
    new_target: Option<Function>,
) -> JsResult<Value> {
    // 1. Let callerContext be the running execution context.
    // 2. If callerContext is not already suspended, suspend callerContext.
    // 3. Let calleeContext be a new execution context.
    let callee_context = ExecutionContext {
        // 8. Perform any necessary implementation-defined initialization of
        //    calleeContext.
        ecmascript_code: None,

        // 4. Set the Function of calleeContext to F.
        function: Some(f.into_function()),

        // 5. Let calleeRealm be F.[[Realm]].
        // 6. Set the Realm of calleeContext to calleeRealm.
        realm: agent[f].realm,

        // 7. Set the ScriptOrModule of calleeContext to null.
        script_or_module: None,
    };

    // 9. Push calleeContext onto the execution context stack.
    agent.push_execution_context(callee_context);

    // 10. Let result be the Completion Record that is the result of
    //     evaluating F in a manner that conforms to the specification of F.
    //     If thisArgument is UNINITIALIZED, the this value is uninitialized;
    //     otherwise thisArgument provides the this value. argumentsList
    //     provides the named parameters. newTarget provides the NewTarget
    //     value.
    let result = match agent[f].behaviour {
        Behaviour::Regular(func) => func(agent, this_argument, arguments_list),
        Behaviour::Constructor(func) => func(
            agent,
            this_argument,
            arguments_list,
            new_target.map(|f| f.into_object()),
        ),
    };

    // 11. NOTE: If F is defined in this document, "the specification of F"
    //     is the behaviour specified for it.
    // 12. Remove calleeContext from the execution context stack.
    agent.pop_execution_context();

    // 13. Return ? result.
    result
}

/// ### [10.3.4 CreateBuiltinFunction ( behaviour, length, name, additionalInternalSlotsList \[ , realm \[ , prototype \[ , prefix \] \] \] )](https://tc39.es/ecma262/#sec-createbuiltinfunction)
pub fn create_builtin_function(
    agent: &mut Agent,
    behaviour: Behaviour,
    args: BuiltinFunctionArgs,
) -> BuiltinFunction {
    // 1. If realm is not present, set realm to the current Realm Record.
    let realm = args.realm.unwrap_or_else(|| agent.current_realm_id());

    // 2. If prototype is not present, set prototype to
    //    realm.[[Intrinsics]].[[%Function.prototype%]].
    let prototype = args
        .prototype
        .or_else(|| Some(agent.get_realm(realm).intrinsics().function_prototype()));

    // 3.-8. Let func be a new built-in function object; set its internal
    //       slots.
    let initial_name = String::from_str(agent, args.name);

    // 9.-10. Perform SetFunctionLength(func, length) and
    //        SetFunctionName(func, name): the "length" and "name"
    //        properties are installed on the backing object directly.
    let mut backing_data = ObjectHeapData::new(prototype);
    let length_key = PropertyKey::from_str(agent, "length");
    backing_data.storage.set(
        length_key,
        PropertyData::Data {
            value: Value::Number(args.length as f64),
            writable: false,
            enumerable: false,
            configurable: true,
        },
    );
    let name_key = PropertyKey::from_str(agent, "name");
    backing_data.storage.set(
        name_key,
        PropertyData::Data {
            value: initial_name.into_value(),
            writable: false,
            enumerable: false,
            configurable: true,
        },
    );
    let backing_object = agent.heap.create(backing_data);

    // 11. Return func.
    agent.heap.create(BuiltinFunctionHeapData {
        object_index: Some(backing_object),
        length: args.length as u8,
        realm,
        initial_name: Some(initial_name),
        behaviour,
    })
}
