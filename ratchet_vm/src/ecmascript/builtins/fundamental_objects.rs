pub mod boolean_objects;
pub mod error_objects;
pub mod function_objects;
pub mod object_objects;
pub mod symbol_objects;

use crate::ecmascript::{
    abstract_operations::operations_on_objects::define_property_or_throw,
    builtins::{
        builtin_function::{create_builtin_function, ArgumentsList, Behaviour, BuiltinFunctionArgs},
        ordinary::ordinary_object_create,
    },
    execution::{
        agent::{Agent, ExceptionType, JsResult},
        realm::RealmIdentifier,
    },
    plugins::Plugin,
    types::{
        language::{
            object::{internal_slots::InternalSlots, property_key::PropertyKey, IntoObject},
            value::{IntoValue, Value},
        },
        spec::property_descriptor::PropertyDescriptor,
    },
};

use self::{
    boolean_objects::{boolean_constructor::BooleanConstructor, boolean_prototype::BooleanPrototype},
    error_objects::{
        error_constructor::ErrorConstructor, error_prototype::ErrorPrototype,
        native_error_constructors::NativeErrorConstructors,
        native_error_prototypes::NativeErrorPrototypes,
    },
    function_objects::function_prototype::FunctionPrototype,
    object_objects::{object_constructor::ObjectConstructor, object_prototype::ObjectPrototype},
    symbol_objects::{symbol_constructor::SymbolConstructor, symbol_prototype::SymbolPrototype},
};

/// The language-mandatory plugin: Object, Function.prototype, Boolean,
/// Symbol, the error constructors, and the global value properties. Every
/// realm needs this plugin; the rest of the surface is optional.
#[derive(Debug)]
pub struct FundamentalObjectsPlugin;

impl Plugin for FundamentalObjectsPlugin {
    fn id(&self) -> &'static str {
        "fundamental_objects"
    }

    fn create_intrinsics(&self, agent: &mut Agent, realm: RealmIdentifier) {
        // %Object.prototype% and %Function.prototype% bootstrap each other:
        // both exist bare before either grows methods.
        let object_prototype = ordinary_object_create(agent, None);
        agent
            .get_realm_mut(realm)
            .intrinsics_mut()
            .set("%Object.prototype%", object_prototype);

        let function_prototype =
            FunctionPrototype::create_bare_intrinsic(agent, realm, object_prototype.into_object());
        agent
            .get_realm_mut(realm)
            .intrinsics_mut()
            .set("%Function.prototype%", function_prototype);

        FunctionPrototype::populate_intrinsic(agent, realm);
        ObjectPrototype::populate_intrinsic(agent, realm, object_prototype);
        ObjectConstructor::create_intrinsic(agent, realm);

        BooleanPrototype::create_intrinsic(agent, realm);
        BooleanConstructor::create_intrinsic(agent, realm);

        SymbolPrototype::create_intrinsic(agent, realm);
        SymbolConstructor::create_intrinsic(agent, realm);

        ErrorPrototype::create_intrinsic(agent, realm);
        let error_constructor = ErrorConstructor::create_intrinsic(agent, realm);
        NativeErrorPrototypes::create_intrinsic(agent, realm);
        NativeErrorConstructors::create_intrinsic(agent, realm, error_constructor);

        // %ThrowTypeError%: the poisoned accessor of the arguments object.
        let throw_type_error = create_builtin_function(
            agent,
            Behaviour::Regular(throw_type_error_behaviour),
            BuiltinFunctionArgs::new(0, "", realm),
        );
        throw_type_error.internal_set_extensible(agent, false);
        agent
            .get_realm_mut(realm)
            .intrinsics_mut()
            .set("%ThrowTypeError%", throw_type_error);
    }

    fn set_default_global_bindings(
        &self,
        agent: &mut Agent,
        realm: RealmIdentifier,
    ) -> JsResult<()> {
        let global = agent.get_realm(realm).global_object;

        // ### [19.1 Value Properties of the Global Object](https://tc39.es/ecma262/#sec-value-properties-of-the-global-object)
        let global_env = agent.get_realm(realm).global_env.unwrap();
        let this_value = global_env.get_this_binding(agent).into_value();
        let global_this_key = PropertyKey::from_str(agent, "globalThis");
        define_property_or_throw(
            agent,
            global,
            global_this_key,
            PropertyDescriptor {
                value: Some(this_value),
                writable: Some(true),
                enumerable: Some(false),
                configurable: Some(true),
                ..Default::default()
            },
        )?;
        for (name, value) in [
            ("undefined", Value::Undefined),
            ("NaN", Value::Number(f64::NAN)),
            ("Infinity", Value::Number(f64::INFINITY)),
        ] {
            let key = PropertyKey::from_str(agent, name);
            define_property_or_throw(
                agent,
                global,
                key,
                PropertyDescriptor {
                    value: Some(value),
                    writable: Some(false),
                    enumerable: Some(false),
                    configurable: Some(false),
                    ..Default::default()
                },
            )?;
        }

        // ### [19.3 Constructor Properties of the Global Object](https://tc39.es/ecma262/#sec-constructor-properties-of-the-global-object)
        for (name, intrinsic) in [
            ("Object", "%Object%"),
            ("Boolean", "%Boolean%"),
            ("Symbol", "%Symbol%"),
            ("Error", "%Error%"),
            ("EvalError", "%EvalError%"),
            ("RangeError", "%RangeError%"),
            ("ReferenceError", "%ReferenceError%"),
            ("SyntaxError", "%SyntaxError%"),
            ("TypeError", "%TypeError%"),
            ("URIError", "%URIError%"),
        ] {
            stage_intrinsic_global(agent, realm, name, intrinsic)?;
        }
        Ok(())
    }
}

/// Define an intrinsic as a global property with the attributes
/// { [[Writable]]: true, [[Enumerable]]: false, [[Configurable]]: true }.
pub(crate) fn stage_intrinsic_global(
    agent: &mut Agent,
    realm: RealmIdentifier,
    name: &'static str,
    intrinsic_name: &'static str,
) -> JsResult<()> {
    let global = agent.get_realm(realm).global_object;
    let value = agent
        .get_realm(realm)
        .intrinsics()
        .get(intrinsic_name)
        .unwrap_or_else(|| panic!("intrinsic {} missing", intrinsic_name))
        .into_value();
    let key = PropertyKey::from_str(agent, name);
    define_property_or_throw(
        agent,
        global,
        key,
        PropertyDescriptor {
            value: Some(value),
            writable: Some(true),
            enumerable: Some(false),
            configurable: Some(true),
            ..Default::default()
        },
    )
}

/// ### [10.2.4.1 %ThrowTypeError% ( )](https://tc39.es/ecma262/#sec-%throwtypeerror%)
fn throw_type_error_behaviour(
    agent: &mut Agent,
    _this_value: Value,
    _arguments: ArgumentsList,
) -> JsResult<Value> {
    Err(agent.throw_exception_with_static_message(
        ExceptionType::TypeError,
        "'caller', 'callee', and 'arguments' properties may not be accessed on strict mode functions",
    ))
}
