use crate::{
    ecmascript::{
        builders::ordinary_object_builder::OrdinaryObjectBuilder,
        builtins::{
            builtin_function::{ArgumentsList, Behaviour, Builtin, BuiltinGetter},
            primitive_objects::PrimitiveObjectData,
        },
        execution::{
            agent::{Agent, ExceptionType, JsResult},
            realm::RealmIdentifier,
        },
        types::{
            language::{
                string::String,
                symbol::Symbol,
                value::{IntoValue, Value},
            },
        },
    },
    heap::WellKnownSymbolIndexes,
};

pub(crate) struct SymbolPrototype;

struct SymbolPrototypeToString;
impl Builtin for SymbolPrototypeToString {
    const NAME: &'static str = "toString";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(SymbolPrototype::to_string);
}
struct SymbolPrototypeValueOf;
impl Builtin for SymbolPrototypeValueOf {
    const NAME: &'static str = "valueOf";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(SymbolPrototype::value_of);
}
struct SymbolPrototypeDescription;
impl Builtin for SymbolPrototypeDescription {
    const NAME: &'static str = "description";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(SymbolPrototype::description);
}
impl BuiltinGetter for SymbolPrototypeDescription {}
struct SymbolPrototypeToPrimitive;
impl Builtin for SymbolPrototypeToPrimitive {
    const NAME: &'static str = "[Symbol.toPrimitive]";
    const KEY: Option<WellKnownSymbolIndexes> = Some(WellKnownSymbolIndexes::ToPrimitive);
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(SymbolPrototype::value_of);
    const WRITABLE: bool = false;
}

/// ### [20.4.3 thisSymbolValue ( value )](https://tc39.es/ecma262/#thissymbolvalue)
fn this_symbol_value(agent: &mut Agent, value: Value) -> JsResult<Symbol> {
    match value {
        Value::Symbol(symbol) => Ok(symbol),
        Value::PrimitiveObject(object) => {
            if let PrimitiveObjectData::Symbol(symbol) = agent[object].data {
                Ok(symbol)
            } else {
                Err(agent.throw_exception_with_static_message(
                    ExceptionType::TypeError,
                    "this is not a Symbol",
                ))
            }
        }
        _ => Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "this is not a Symbol",
        )),
    }
}

impl SymbolPrototype {
    /// ### [20.4.3.3 Symbol.prototype.toString ( )](https://tc39.es/ecma262/#sec-symbol.prototype.tostring)
    fn to_string(
        agent: &mut Agent,
        this_value: Value,
        _arguments: ArgumentsList,
    ) -> JsResult<Value> {
        // 1. Let sym be ? thisSymbolValue(this value).
        let sym = this_symbol_value(agent, this_value)?;
        // 2. Return SymbolDescriptiveString(sym).
        Ok(sym.descriptive_string(agent).into_value())
    }

    /// ### [20.4.3.4 Symbol.prototype.valueOf ( )](https://tc39.es/ecma262/#sec-symbol.prototype.valueof)
    fn value_of(
        agent: &mut Agent,
        this_value: Value,
        _arguments: ArgumentsList,
    ) -> JsResult<Value> {
        // 1. Return ? thisSymbolValue(this value).
        Ok(this_symbol_value(agent, this_value)?.into_value())
    }

    /// ### [20.4.3.2 get Symbol.prototype.description](https://tc39.es/ecma262/#sec-symbol.prototype.description)
    fn description(
        agent: &mut Agent,
        this_value: Value,
        _arguments: ArgumentsList,
    ) -> JsResult<Value> {
        // 1.-3. Let sym be ? thisSymbolValue(s); return
        //       sym.[[Description]].
        let sym = this_symbol_value(agent, this_value)?;
        Ok(agent[sym]
            .descriptor
            .map_or(Value::Undefined, |descriptor| descriptor.into_value()))
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent, realm: RealmIdentifier) {
        let object_prototype = agent.get_realm(realm).intrinsics().object_prototype();
        let tag_value = String::from_str(agent, "Symbol").into_value();
        let tag_key =
            crate::ecmascript::types::PropertyKey::from(WellKnownSymbolIndexes::ToStringTag);
        let symbol_prototype = OrdinaryObjectBuilder::new(agent, realm)
            .with_prototype(object_prototype)
            .with_builtin_function_property::<SymbolPrototypeToString>()
            .with_builtin_function_property::<SymbolPrototypeValueOf>()
            .with_builtin_function_getter_property::<SymbolPrototypeDescription>()
            .with_builtin_function_property::<SymbolPrototypeToPrimitive>()
            .with_property(|property| {
                property
                    .with_key(tag_key)
                    .with_value(tag_value)
                    .with_writable(false)
                    .with_enumerable(false)
                    .with_configurable(true)
                    .build()
            })
            .build();
        agent
            .get_realm_mut(realm)
            .intrinsics_mut()
            .set("%Symbol.prototype%", symbol_prototype);
    }
}
