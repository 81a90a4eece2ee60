use crate::{
    ecmascript::{
        abstract_operations::type_conversion::to_string,
        builders::builtin_function_builder::BuiltinFunctionBuilder,
        builtins::builtin_function::{ArgumentsList, Behaviour, Builtin},
        execution::{
            agent::{Agent, ExceptionType, JsResult},
            realm::RealmIdentifier,
        },
        types::{
            language::{
                object::{property_key::PropertyKey, Object},
                symbol::SymbolHeapData,
                value::{IntoValue, Value},
            },
        },
    },
    heap::{CreateHeapData, WellKnownSymbolIndexes},
};

pub(crate) struct SymbolConstructor;

struct SymbolConstructorFunction;
impl Builtin for SymbolConstructorFunction {
    const NAME: &'static str = "Symbol";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Constructor(SymbolConstructor::constructor);
}

impl SymbolConstructor {
    /// ### [20.4.1.1 Symbol ( \[ description \] )](https://tc39.es/ecma262/#sec-symbol-description)
    fn constructor(
        agent: &mut Agent,
        _this_value: Value,
        arguments: ArgumentsList,
        new_target: Option<Object>,
    ) -> JsResult<Value> {
        // 1. If NewTarget is not undefined, throw a TypeError exception.
        if new_target.is_some() {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Symbol is not a constructor",
            ));
        }
        // 2. If description is undefined, let descString be undefined.
        let description = arguments.get(0);
        let descriptor = if description.is_undefined() {
            None
        } else {
            // 3. Else, let descString be ? ToString(description).
            Some(to_string(agent, description)?)
        };
        // 4. Return a new Symbol whose [[Description]] is descString.
        Ok(agent
            .heap
            .create(SymbolHeapData { descriptor })
            .into_value())
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent, realm: RealmIdentifier) {
        let symbol_prototype = agent
            .get_realm(realm)
            .intrinsics()
            .get("%Symbol.prototype%")
            .unwrap();

        // The well-known symbol value properties, { [[Writable]]: false,
        // [[Enumerable]]: false, [[Configurable]]: false }.
        let mut well_known_entries = Vec::new();
        for (name, symbol) in [
            ("asyncIterator", WellKnownSymbolIndexes::AsyncIterator),
            ("hasInstance", WellKnownSymbolIndexes::HasInstance),
            ("isConcatSpreadable", WellKnownSymbolIndexes::IsConcatSpreadable),
            ("iterator", WellKnownSymbolIndexes::Iterator),
            ("species", WellKnownSymbolIndexes::Species),
            ("toPrimitive", WellKnownSymbolIndexes::ToPrimitive),
            ("toStringTag", WellKnownSymbolIndexes::ToStringTag),
            ("unscopables", WellKnownSymbolIndexes::Unscopables),
        ] {
            let key = PropertyKey::from_str(agent, name);
            well_known_entries.push((key, symbol.to_symbol().into_value()));
        }

        let mut builder = BuiltinFunctionBuilder::new::<SymbolConstructorFunction>(agent, realm)
            .with_prototype_property(symbol_prototype);
        for (key, value) in well_known_entries {
            builder = builder.with_property(|property| {
                property
                    .with_key(key)
                    .with_value(value)
                    .with_writable(false)
                    .with_enumerable(false)
                    .with_configurable(false)
                    .build()
            });
        }

        let symbol_constructor = builder.build();
        agent
            .get_realm_mut(realm)
            .intrinsics_mut()
            .set("%Symbol%", symbol_constructor);

        let constructor_key = PropertyKey::from_str(agent, "constructor");
        let Object::Object(symbol_prototype) = symbol_prototype else {
            unreachable!()
        };
        agent[symbol_prototype].storage.set(
            constructor_key,
            crate::ecmascript::types::language::object::property_storage::PropertyData::Data {
                value: symbol_constructor.into_value(),
                writable: true,
                enumerable: false,
                configurable: true,
            },
        );
    }
}
