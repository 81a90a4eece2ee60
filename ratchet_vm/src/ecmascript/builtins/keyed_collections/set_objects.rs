pub mod set_constructor;
pub mod set_iterator_objects;
pub mod set_prototype;

use crate::ecmascript::{
    builtins::fundamental_objects::stage_intrinsic_global,
    execution::{
        agent::{Agent, JsResult},
        realm::RealmIdentifier,
    },
    plugins::Plugin,
};

/// The Set plugin: %Set%, %Set.prototype%, the set iterator, and the `Set`
/// global.
#[derive(Debug)]
pub struct SetPlugin;

impl Plugin for SetPlugin {
    fn id(&self) -> &'static str {
        "set_objects"
    }

    fn dependencies(&self) -> &'static [&'static str] {
        &["fundamental_objects", "iteration"]
    }

    fn create_intrinsics(&self, agent: &mut Agent, realm: RealmIdentifier) {
        set_prototype::SetPrototype::create_intrinsic(agent, realm);
        set_constructor::SetConstructor::create_intrinsic(agent, realm);
        set_iterator_objects::set_iterator_prototype::SetIteratorPrototype::create_intrinsic(
            agent, realm,
        );
    }

    fn set_default_global_bindings(
        &self,
        agent: &mut Agent,
        realm: RealmIdentifier,
    ) -> JsResult<()> {
        stage_intrinsic_global(agent, realm, "Set", "%Set%")
    }
}
