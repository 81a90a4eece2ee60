//! ### [6.2.12 Private Names](https://tc39.es/ecma262/#sec-private-names)
//!
//! The Private Name specification type describes a globally unique value
//! (one which differs from any other Private Name, even if they are
//! otherwise indistinguishable) which represents the key of a private class
//! element (field, method, or accessor). Each Private Name has an associated
//! immutable \[\[Description\]\] which is a String value; the description is
//! resolved through the private environment chain when needed.

use crate::ecmascript::{
    execution::agent::Agent,
    types::language::{
        function::Function,
        string::String,
        value::{IntoValue, Value},
    },
};

/// ### [6.2.12 Private Names](https://tc39.es/ecma262/#sec-private-names)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PrivateName(u32);

impl PrivateName {
    pub(crate) const fn from_u32(data: u32) -> Self {
        Self(data)
    }

    /// Try to resolve this name's \[\[Description]] through the running
    /// private environment chain. Only succeeds where the name is in scope.
    pub(crate) fn get_description(self, agent: &Agent) -> Option<String> {
        let env = agent.current_private_environment()?;
        env.resolve_description(agent, self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivateElementKind {
    /// The element is backed by a per-instance value slot.
    Field,
    /// The element is a method shared by all instances.
    Method,
    /// The element is a getter/setter pair shared by all instances.
    Accessor,
}

/// ### [6.2.10 The PrivateElement Specification Type](https://tc39.es/ecma262/#sec-privateelement-specification-type)
#[derive(Debug, Clone, Copy)]
pub struct PrivateElement {
    /// ### \[\[Key\]\]
    pub(crate) key: PrivateName,
    pub(crate) kind: PrivateElementKind,
    /// ### \[\[Value\]\]
    ///
    /// Present for field and method kinds.
    pub(crate) value: Option<Value>,
    /// ### \[\[Get\]\]
    pub(crate) get: Option<Function>,
    /// ### \[\[Set\]\]
    pub(crate) set: Option<Function>,
}

impl PrivateElement {
    pub(crate) fn field(key: PrivateName, value: Value) -> Self {
        Self {
            key,
            kind: PrivateElementKind::Field,
            value: Some(value),
            get: None,
            set: None,
        }
    }

    pub(crate) fn method(key: PrivateName, method: Function) -> Self {
        Self {
            key,
            kind: PrivateElementKind::Method,
            value: Some(method.into_value()),
            get: None,
            set: None,
        }
    }

    pub(crate) fn accessor(key: PrivateName, get: Option<Function>, set: Option<Function>) -> Self {
        Self {
            key,
            kind: PrivateElementKind::Accessor,
            value: None,
            get,
            set,
        }
    }
}
