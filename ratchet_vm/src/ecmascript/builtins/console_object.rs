//! The console shim: a host-facing logging surface that formats values
//! with the inspection printer and emits through [`HostHooks::print`].
//!
//! [`HostHooks::print`]: crate::ecmascript::execution::agent::HostHooks

use crate::ecmascript::{
    abstract_operations::operations_on_objects::define_property_or_throw,
    builders::ordinary_object_builder::OrdinaryObjectBuilder,
    builtins::builtin_function::{ArgumentsList, Behaviour, Builtin},
    execution::{
        agent::{Agent, JsResult},
        realm::RealmIdentifier,
    },
    plugins::Plugin,
    types::{
        language::{
            object::{property_key::PropertyKey, IntoObject},
            value::{IntoValue, Value},
        },
        spec::property_descriptor::PropertyDescriptor,
    },
};
use crate::engine::debug_string;

pub(crate) struct ConsoleObject;

macro_rules! console_method {
    ($builtin: ident, $name: literal) => {
        struct $builtin;
        impl Builtin for $builtin {
            const NAME: &'static str = $name;
            const LENGTH: u8 = 0;
            const BEHAVIOUR: Behaviour = Behaviour::Regular(ConsoleObject::log);
        }
    };
}

console_method!(ConsoleLog, "log");
console_method!(ConsoleInfo, "info");
console_method!(ConsoleWarn, "warn");
console_method!(ConsoleError, "error");
console_method!(ConsoleDebug, "debug");

impl ConsoleObject {
    /// All console levels share the formatter: arguments are rendered with
    /// the inspector (strings unquoted), joined by spaces, and handed to
    /// the host.
    fn log(agent: &mut Agent, _this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let mut parts = Vec::with_capacity(arguments.len());
        for argument in arguments.iter() {
            let part = match argument {
                Value::String(text) => text.as_str(agent).to_owned(),
                other => debug_string(agent, *other, 4),
            };
            parts.push(part);
        }
        let hooks = agent.host_hooks;
        hooks.print(&parts.join(" "));
        Ok(Value::Undefined)
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent, realm: RealmIdentifier) {
        let object_prototype = agent.get_realm(realm).intrinsics().object_prototype();
        let console = OrdinaryObjectBuilder::new(agent, realm)
            .with_prototype(object_prototype)
            .with_builtin_function_property::<ConsoleLog>()
            .with_builtin_function_property::<ConsoleInfo>()
            .with_builtin_function_property::<ConsoleWarn>()
            .with_builtin_function_property::<ConsoleError>()
            .with_builtin_function_property::<ConsoleDebug>()
            .build();
        agent
            .get_realm_mut(realm)
            .intrinsics_mut()
            .set("%console%", console);
    }
}

/// The console plugin: the `console` global.
#[derive(Debug)]
pub struct ConsolePlugin;

impl Plugin for ConsolePlugin {
    fn id(&self) -> &'static str {
        "console"
    }

    fn dependencies(&self) -> &'static [&'static str] {
        &["fundamental_objects"]
    }

    fn create_intrinsics(&self, agent: &mut Agent, realm: RealmIdentifier) {
        ConsoleObject::create_intrinsic(agent, realm);
    }

    fn set_default_global_bindings(
        &self,
        agent: &mut Agent,
        realm: RealmIdentifier,
    ) -> JsResult<()> {
        let global = agent.get_realm(realm).global_object;
        let console = agent
            .get_realm(realm)
            .intrinsics()
            .get("%console%")
            .unwrap();
        let key = PropertyKey::from_str(agent, "console");
        define_property_or_throw(
            agent,
            global,
            key,
            PropertyDescriptor {
                value: Some(console.into_value()),
                writable: Some(true),
                enumerable: Some(false),
                configurable: Some(true),
                ..Default::default()
            },
        )
    }
}
