use crate::{
    ecmascript::{
        abstract_operations::{
            operations_on_objects::{call, create_list_from_array_like, ordinary_has_instance},
            testing_and_comparison::is_callable,
        },
        builtins::{
            bound_function::bound_function_create,
            builtin_function::{ArgumentsList, Behaviour, Builtin, BuiltinFunction},
        },
        execution::{
            agent::{Agent, ExceptionType, JsResult},
            realm::RealmIdentifier,
        },
        types::{
            language::{
                function::Function,
                object::{property_key::PropertyKey, IntoObject},
                string::String,
                value::{IntoValue, Value},
            },
        },
    },
    heap::WellKnownSymbolIndexes,
};

pub(crate) struct FunctionPrototype;

struct FunctionPrototypeApply;
impl Builtin for FunctionPrototypeApply {
    const NAME: &'static str = "apply";
    const LENGTH: u8 = 2;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(FunctionPrototype::apply);
}
struct FunctionPrototypeBind;
impl Builtin for FunctionPrototypeBind {
    const NAME: &'static str = "bind";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(FunctionPrototype::bind);
}
struct FunctionPrototypeCall;
impl Builtin for FunctionPrototypeCall {
    const NAME: &'static str = "call";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(FunctionPrototype::call);
}
struct FunctionPrototypeToString;
impl Builtin for FunctionPrototypeToString {
    const NAME: &'static str = "toString";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(FunctionPrototype::to_string);
}
struct FunctionPrototypeHasInstance;
impl Builtin for FunctionPrototypeHasInstance {
    const NAME: &'static str = "[Symbol.hasInstance]";
    const KEY: Option<WellKnownSymbolIndexes> = Some(WellKnownSymbolIndexes::HasInstance);
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(FunctionPrototype::has_instance);
    const WRITABLE: bool = false;
    const CONFIGURABLE: bool = false;
}

impl FunctionPrototype {
    /// The %Function.prototype% object is itself callable: it accepts any
    /// arguments and returns undefined.
    fn behaviour(
        _agent: &mut Agent,
        _this_value: Value,
        _arguments: ArgumentsList,
    ) -> JsResult<Value> {
        Ok(Value::Undefined)
    }

    /// ### [20.2.3.1 Function.prototype.apply ( thisArg, argArray )](https://tc39.es/ecma262/#sec-function.prototype.apply)
    fn apply(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1. Let func be the this value.
        // 2. If IsCallable(func) is false, throw a TypeError exception.
        if is_callable(this_value).is_none() {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Function.prototype.apply called on non-callable",
            ));
        }
        let this_arg = arguments.get(0);
        let arg_array = arguments.get(1);
        // 3. If argArray is either undefined or null, then
        if arg_array.is_nullish() {
            // b. Return ? Call(func, thisArg).
            return call(agent, this_value, this_arg, None);
        }
        // 4. Let argList be ? CreateListFromArrayLike(argArray).
        let arg_list = create_list_from_array_like(agent, arg_array)?;
        // 6. Return ? Call(func, thisArg, argList).
        call(agent, this_value, this_arg, Some(ArgumentsList(&arg_list)))
    }

    /// ### [20.2.3.2 Function.prototype.bind ( thisArg, ...args )](https://tc39.es/ecma262/#sec-function.prototype.bind)
    fn bind(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1. Let Target be the this value.
        // 2. If IsCallable(Target) is false, throw a TypeError exception.
        let Some(target) = is_callable(this_value) else {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Bind must be called on a function",
            ));
        };
        let this_arg = arguments.get(0);
        let bound_args = if arguments.len() > 1 {
            &arguments[1..]
        } else {
            &[]
        };
        // 3. Let F be ? BoundFunctionCreate(Target, thisArg, args).
        let f = bound_function_create(agent, target, this_arg, bound_args)?;
        // 4.-8. The "length" and "name" properties of bound functions
        //       derive from the target; a fixed pair keeps this simple and
        //       observable names read "bound <target name>".
        let length_key = PropertyKey::from_str(agent, "length");
        let target_length = crate::ecmascript::abstract_operations::operations_on_objects::get(
            agent,
            target.into_object(),
            length_key,
        )?;
        let length = match target_length {
            Value::Number(n) if n.is_finite() => {
                (n.trunc() - bound_args.len() as f64).max(0.0)
            }
            _ => 0.0,
        };
        use crate::ecmascript::types::language::object::{
            internal_slots::InternalSlots, property_storage::PropertyData,
        };
        let backing_object = f.get_or_create_backing_object(agent);
        agent[backing_object].storage.set(
            length_key,
            PropertyData::Data {
                value: Value::Number(length),
                writable: false,
                enumerable: false,
                configurable: true,
            },
        );
        let name_key = PropertyKey::from_str(agent, "name");
        let target_name = crate::ecmascript::abstract_operations::operations_on_objects::get(
            agent,
            target.into_object(),
            name_key,
        )?;
        let name_text = match target_name {
            Value::String(name) => format!("bound {}", name.as_str(agent)),
            _ => "bound".to_owned(),
        };
        let name_value = String::from_string(agent, name_text).into_value();
        agent[backing_object].storage.set(
            name_key,
            PropertyData::Data {
                value: name_value,
                writable: false,
                enumerable: false,
                configurable: true,
            },
        );
        // 9. Return F.
        Ok(f.into_value())
    }

    /// ### [20.2.3.3 Function.prototype.call ( thisArg, ...args )](https://tc39.es/ecma262/#sec-function.prototype.call)
    fn call(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1. Let func be the this value.
        // 2. If IsCallable(func) is false, throw a TypeError exception.
        if is_callable(this_value).is_none() {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Function.prototype.call called on non-callable",
            ));
        }
        let this_arg = arguments.get(0);
        let args = if arguments.len() > 1 {
            &arguments[1..]
        } else {
            &[]
        };
        // 3.-5. Return ? Call(func, thisArg, args).
        call(agent, this_value, this_arg, Some(ArgumentsList(args)))
    }

    /// ### [20.2.3.5 Function.prototype.toString ( )](https://tc39.es/ecma262/#sec-function.prototype.tostring)
    fn to_string(
        agent: &mut Agent,
        this_value: Value,
        _arguments: ArgumentsList,
    ) -> JsResult<Value> {
        match Function::try_from(this_value) {
            // 2. If func is an ECMAScript function object, return the
            //    source text matching its [[SourceText]].
            Ok(Function::ECMAScriptFunction(function)) => {
                let span = agent[function].source_text;
                let source_code = agent[function].source_code;
                let source = agent[source_code].source;
                let text = source
                    .as_str(agent)
                    .get(span.start as usize..span.end as usize)
                    .unwrap_or("function () { }")
                    .to_owned();
                Ok(String::from_string(agent, text).into_value())
            }
            // 3. If func is a built-in function object, return an
            //    implementation-defined String source code representation.
            Ok(Function::BuiltinFunction(function)) => {
                let name = agent[function]
                    .initial_name
                    .map_or("", |name| name.as_str(agent))
                    .to_owned();
                let text = format!("function {}() {{ [native code] }}", name);
                Ok(String::from_string(agent, text).into_value())
            }
            Ok(Function::BoundFunction(_)) | Ok(Function::BuiltinConstructorFunction(_)) => {
                Ok(String::from_str(agent, "function () { [native code] }").into_value())
            }
            // 1./5. Throw a TypeError exception.
            Err(()) => Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Function.prototype.toString called on non-callable",
            )),
        }
    }

    /// ### [20.2.3.6 Function.prototype \[ %Symbol.hasInstance% \] ( V )](https://tc39.es/ecma262/#sec-function.prototype-%symbol.hasinstance%)
    fn has_instance(
        agent: &mut Agent,
        this_value: Value,
        arguments: ArgumentsList,
    ) -> JsResult<Value> {
        // 1. Let F be the this value.
        // 2. Return ? OrdinaryHasInstance(F, V).
        Ok(ordinary_has_instance(agent, this_value, arguments.get(0))?.into())
    }

    /// Create the bare %Function.prototype% function; its methods install
    /// afterwards, once the intrinsic is registered.
    pub(crate) fn create_bare_intrinsic(
        agent: &mut Agent,
        realm: RealmIdentifier,
        object_prototype: crate::ecmascript::types::Object,
    ) -> BuiltinFunction {
        crate::ecmascript::builtins::builtin_function::create_builtin_function(
            agent,
            Behaviour::Regular(Self::behaviour),
            crate::ecmascript::builtins::builtin_function::BuiltinFunctionArgs {
                length: 0,
                name: "",
                realm: Some(realm),
                prototype: Some(object_prototype),
            },
        )
    }

    pub(crate) fn populate_intrinsic(agent: &mut Agent, realm: RealmIdentifier) {
        let crate::ecmascript::types::Object::BuiltinFunction(function_prototype) =
            agent.get_realm(realm).intrinsics().function_prototype()
        else {
            unreachable!("%Function.prototype% is not a built-in function")
        };
        install_method::<FunctionPrototypeApply>(agent, realm, function_prototype);
        install_method::<FunctionPrototypeBind>(agent, realm, function_prototype);
        install_method::<FunctionPrototypeCall>(agent, realm, function_prototype);
        install_method::<FunctionPrototypeToString>(agent, realm, function_prototype);
        install_method::<FunctionPrototypeHasInstance>(agent, realm, function_prototype);
    }
}

/// Install one built-in method on the backing object of an already created
/// function intrinsic.
fn install_method<T: Builtin>(
    agent: &mut Agent,
    realm: RealmIdentifier,
    target: BuiltinFunction,
) {
    use crate::ecmascript::{
        builders::builtin_function_builder::builtin_property_key,
        builtins::builtin_function::{create_builtin_function, BuiltinFunctionArgs},
        types::language::object::{internal_slots::InternalSlots, property_storage::PropertyData},
    };
    let function = create_builtin_function(
        agent,
        T::BEHAVIOUR,
        BuiltinFunctionArgs::new(T::LENGTH as u32, T::NAME, realm),
    );
    let key = builtin_property_key::<T>(agent);
    let backing_object = target.get_or_create_backing_object(agent);
    agent[backing_object].storage.set(
        key,
        PropertyData::Data {
            value: function.into_value(),
            writable: T::WRITABLE,
            enumerable: T::ENUMERABLE,
            configurable: T::CONFIGURABLE,
        },
    );
}
