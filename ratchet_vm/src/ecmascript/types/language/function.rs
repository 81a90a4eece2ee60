use crate::ecmascript::{
    builtins::{
        bound_function::BoundFunction, builtin_constructor::BuiltinConstructorFunction,
        builtin_function::BuiltinFunction, ecmascript_function::ECMAScriptFunction,
    },
    execution::agent::Agent,
    types::language::{
        object::{IntoObject, Object},
        value::{IntoValue, Value},
    },
};

/// https://tc39.es/ecma262/#function-object
///
/// A callable object: the subset of [`Object`] kinds that provide
/// \[\[Call\]\] (and, for constructors, \[\[Construct\]\]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    BoundFunction(BoundFunction),
    BuiltinConstructorFunction(BuiltinConstructorFunction),
    BuiltinFunction(BuiltinFunction),
    ECMAScriptFunction(ECMAScriptFunction),
}

/// Conversion into the [`Function`] supertype; implemented by the callable
/// object kinds.
pub trait IntoFunction
where
    Self: Sized + Copy,
{
    fn into_function(self) -> Function;
}

impl IntoFunction for Function {
    fn into_function(self) -> Function {
        self
    }
}

impl Function {
    pub(crate) fn is_constructor(self, agent: &Agent) -> bool {
        match self {
            Function::BoundFunction(f) => f.is_constructor(agent),
            Function::BuiltinConstructorFunction(_) => true,
            Function::BuiltinFunction(f) => f.is_constructor(agent),
            Function::ECMAScriptFunction(f) => f.is_constructor(agent),
        }
    }
}

impl IntoObject for Function {
    fn into_object(self) -> Object {
        match self {
            Function::BoundFunction(d) => Object::BoundFunction(d),
            Function::BuiltinConstructorFunction(d) => Object::BuiltinConstructorFunction(d),
            Function::BuiltinFunction(d) => Object::BuiltinFunction(d),
            Function::ECMAScriptFunction(d) => Object::ECMAScriptFunction(d),
        }
    }
}

impl IntoValue for Function {
    fn into_value(self) -> Value {
        self.into_object().into_value()
    }
}

impl From<Function> for Object {
    fn from(value: Function) -> Self {
        value.into_object()
    }
}

impl From<Function> for Value {
    fn from(value: Function) -> Self {
        value.into_value()
    }
}

impl TryFrom<Value> for Function {
    type Error = ();

    fn try_from(value: Value) -> Result<Self, ()> {
        match value {
            Value::BoundFunction(d) => Ok(Function::BoundFunction(d)),
            Value::BuiltinConstructorFunction(d) => Ok(Function::BuiltinConstructorFunction(d)),
            Value::BuiltinFunction(d) => Ok(Function::BuiltinFunction(d)),
            Value::ECMAScriptFunction(d) => Ok(Function::ECMAScriptFunction(d)),
            _ => Err(()),
        }
    }
}

impl TryFrom<Object> for Function {
    type Error = ();

    fn try_from(value: Object) -> Result<Self, ()> {
        match value {
            Object::BoundFunction(d) => Ok(Function::BoundFunction(d)),
            Object::BuiltinConstructorFunction(d) => Ok(Function::BuiltinConstructorFunction(d)),
            Object::BuiltinFunction(d) => Ok(Function::BuiltinFunction(d)),
            Object::ECMAScriptFunction(d) => Ok(Function::ECMAScriptFunction(d)),
            _ => Err(()),
        }
    }
}
