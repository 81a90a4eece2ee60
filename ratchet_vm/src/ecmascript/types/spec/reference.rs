//! ### [6.2.5 The Reference Record Specification Type](https://tc39.es/ecma262/#sec-reference-record-specification-type)
//!
//! The Reference Record is the lvalue produced by identifier, member and
//! `super` expressions before they are read or assigned.

use crate::ecmascript::{
    abstract_operations::{
        operations_on_objects::{private_get, private_set, set},
        type_conversion::to_object,
    },
    execution::{
        agent::{Agent, ExceptionType, JsResult},
        environments::EnvironmentIndex,
        execution_context::get_global_object,
    },
    types::{
        language::{
            object::{internal_methods::InternalMethods, property_key::PropertyKey},
            string::String,
            value::Value,
        },
        spec::private_name::PrivateName,
    },
};

/// ### \[\[Base\]\]
///
/// The value or Environment Record which holds the binding, or the
/// UNRESOLVABLE sentinel for references that failed to resolve.
#[derive(Debug, Clone, Copy)]
pub enum Base {
    Value(Value),
    Environment(EnvironmentIndex),
    Unresolvable,
}

/// ### [6.2.5 The Reference Record Specification Type](https://tc39.es/ecma262/#sec-reference-record-specification-type)
#[derive(Debug, Clone, Copy)]
pub struct Reference {
    /// ### \[\[Base\]\]
    pub(crate) base: Base,

    /// ### \[\[ReferencedName\]\]
    ///
    /// The name of the binding; a String, Symbol, canonical integer string,
    /// or Private Name.
    pub(crate) referenced_name: PropertyKey,

    /// ### \[\[Strict\]\]
    pub(crate) strict: bool,

    /// ### \[\[ThisValue\]\]
    ///
    /// Only non-empty for `super` references: the `this` value at the point
    /// the reference was created.
    pub(crate) this_value: Option<Value>,
}

impl Reference {
    pub(crate) fn new_unresolvable_reference(referenced_name: String, strict: bool) -> Self {
        Self {
            base: Base::Unresolvable,
            referenced_name: PropertyKey::String(referenced_name),
            strict,
            this_value: None,
        }
    }

    pub(crate) fn new_variable_reference(
        base: EnvironmentIndex,
        referenced_name: String,
        strict: bool,
    ) -> Self {
        Self {
            base: Base::Environment(base),
            referenced_name: PropertyKey::String(referenced_name),
            strict,
            this_value: None,
        }
    }

    pub(crate) fn new_property_reference(
        base: Value,
        referenced_name: PropertyKey,
        strict: bool,
    ) -> Self {
        Self {
            base: Base::Value(base),
            referenced_name,
            strict,
            this_value: None,
        }
    }

    pub(crate) fn new_super_reference(
        base: Value,
        referenced_name: PropertyKey,
        strict: bool,
        this_value: Value,
    ) -> Self {
        Self {
            base: Base::Value(base),
            referenced_name,
            strict,
            this_value: Some(this_value),
        }
    }

    /// ### [6.2.5.9 MakePrivateReference ( baseValue, privateIdentifier )](https://tc39.es/ecma262/#sec-makeprivatereference)
    pub(crate) fn new_private_reference(base: Value, private_name: PrivateName) -> Self {
        Self {
            base: Base::Value(base),
            referenced_name: PropertyKey::PrivateName(private_name),
            strict: true,
            this_value: None,
        }
    }

    /// ### [6.2.5.1 IsPropertyReference ( V )](https://tc39.es/ecma262/#sec-ispropertyreference)
    pub(crate) fn is_property_reference(&self) -> bool {
        matches!(self.base, Base::Value(_))
    }

    /// ### [6.2.5.2 IsUnresolvableReference ( V )](https://tc39.es/ecma262/#sec-isunresolvablereference)
    pub(crate) fn is_unresolvable_reference(&self) -> bool {
        matches!(self.base, Base::Unresolvable)
    }

    /// ### [6.2.5.3 IsSuperReference ( V )](https://tc39.es/ecma262/#sec-issuperreference)
    pub(crate) fn is_super_reference(&self) -> bool {
        self.this_value.is_some()
    }

    /// ### [6.2.5.4 IsPrivateReference ( V )](https://tc39.es/ecma262/#sec-isprivatereference)
    pub(crate) fn is_private_reference(&self) -> bool {
        matches!(self.referenced_name, PropertyKey::PrivateName(_))
    }

    /// The referenced name as a binding name. Panics for property
    /// references whose name is not a plain string.
    pub(crate) fn referenced_name_string(&self) -> String {
        match self.referenced_name {
            PropertyKey::String(name) => name,
            _ => unreachable!("environment reference with a non-string name"),
        }
    }

    pub(crate) fn base_value(&self) -> Value {
        match self.base {
            Base::Value(value) => value,
            _ => unreachable!("reference base is not a value"),
        }
    }

    pub(crate) fn base_env(&self) -> EnvironmentIndex {
        match self.base {
            Base::Environment(env) => env,
            _ => unreachable!("reference base is not an environment"),
        }
    }
}

/// ### [6.2.5.5 GetValue ( V )](https://tc39.es/ecma262/#sec-getvalue)
pub(crate) fn get_value(agent: &mut Agent, reference: &Reference) -> JsResult<Value> {
    match reference.base {
        Base::Value(base) => {
            // 3. If IsPropertyReference(V) is true, then
            // a. Let baseObj be ? ToObject(V.[[Base]]).
            let base_obj = to_object(agent, base)?;
            // b. If IsPrivateReference(V) is true, then
            if let PropertyKey::PrivateName(private_name) = reference.referenced_name {
                // i. Return ? PrivateGet(baseObj, V.[[ReferencedName]]).
                return private_get(agent, base_obj, private_name);
            }
            // c. Return ? baseObj.[[Get]](V.[[ReferencedName]], GetThisValue(V)).
            let receiver = get_this_value(reference);
            base_obj.internal_get(agent, reference.referenced_name, receiver)
        }
        Base::Environment(env) => {
            // 4. Else,
            // b. Return ? base.GetBindingValue(V.[[ReferencedName]], V.[[Strict]]).
            let name = reference.referenced_name_string();
            env.get_binding_value(agent, name, reference.strict)
        }
        Base::Unresolvable => {
            // 2. If IsUnresolvableReference(V) is true, throw a ReferenceError exception.
            let name = reference.referenced_name.to_display_string(agent);
            let error_message = format!("{} is not defined", name);
            Err(agent.throw_exception(ExceptionType::ReferenceError, error_message))
        }
    }
}

/// ### [6.2.5.6 PutValue ( V, W )](https://tc39.es/ecma262/#sec-putvalue)
pub(crate) fn put_value(agent: &mut Agent, reference: &Reference, value: Value) -> JsResult<()> {
    match reference.base {
        Base::Unresolvable => {
            // 2. If IsUnresolvableReference(V) is true, then
            if reference.strict {
                // a. If V.[[Strict]] is true, throw a ReferenceError exception.
                let name = reference.referenced_name.to_display_string(agent);
                let error_message = format!("{} is not defined", name);
                return Err(agent.throw_exception(ExceptionType::ReferenceError, error_message));
            }
            // b. Let globalObj be GetGlobalObject().
            let global_obj = get_global_object(agent);
            // c. Perform ? Set(globalObj, V.[[ReferencedName]], W, false).
            set(agent, global_obj, reference.referenced_name, value, false)?;
            // d. Return UNUSED.
            Ok(())
        }
        Base::Value(base) => {
            // 3. If IsPropertyReference(V) is true, then
            // a. Let baseObj be ? ToObject(V.[[Base]]).
            let base_obj = to_object(agent, base)?;
            // b. If IsPrivateReference(V) is true, then
            if let PropertyKey::PrivateName(private_name) = reference.referenced_name {
                // i. Return ? PrivateSet(baseObj, V.[[ReferencedName]], W).
                return private_set(agent, base_obj, private_name, value);
            }
            // c. Let succeeded be ? baseObj.[[Set]](V.[[ReferencedName]], W, GetThisValue(V)).
            let receiver = get_this_value(reference);
            let succeeded =
                base_obj.internal_set(agent, reference.referenced_name, value, receiver)?;
            // d. If succeeded is false and V.[[Strict]] is true, throw a TypeError exception.
            if !succeeded && reference.strict {
                let name = reference.referenced_name.to_display_string(agent);
                let error_message = format!("Cannot assign to read only property '{}'", name);
                return Err(agent.throw_exception(ExceptionType::TypeError, error_message));
            }
            // e. Return UNUSED.
            Ok(())
        }
        Base::Environment(env) => {
            // 4. Else,
            // b. Return ? base.SetMutableBinding(V.[[ReferencedName]], W, V.[[Strict]]).
            let name = reference.referenced_name_string();
            env.set_mutable_binding(agent, name, value, reference.strict)
        }
    }
}

/// ### [6.2.5.8 InitializeReferencedBinding ( V, W )](https://tc39.es/ecma262/#sec-initializereferencedbinding)
pub(crate) fn initialize_referenced_binding(
    agent: &mut Agent,
    reference: &Reference,
    value: Value,
) -> JsResult<()> {
    // 1. Assert: IsUnresolvableReference(V) is false.
    let Base::Environment(env) = reference.base else {
        unreachable!("initializing a non-environment reference");
    };
    // 3. Return ? base.InitializeBinding(V.[[ReferencedName]], W).
    let name = reference.referenced_name_string();
    env.initialize_binding(agent, name, value)
}

/// ### [6.2.5.7 GetThisValue ( V )](https://tc39.es/ecma262/#sec-getthisvalue)
pub(crate) fn get_this_value(reference: &Reference) -> Value {
    // 1. Assert: IsPropertyReference(V) is true.
    // 2. If IsSuperReference(V) is true, return V.[[ThisValue]]; otherwise
    //    return V.[[Base]].
    reference
        .this_value
        .unwrap_or_else(|| reference.base_value())
}
