pub mod array_constructor;
pub mod array_iterator_objects;
pub mod array_prototype;

use crate::ecmascript::{
    builtins::fundamental_objects::stage_intrinsic_global,
    execution::{
        agent::{Agent, JsResult},
        realm::RealmIdentifier,
    },
    plugins::Plugin,
};

/// The Array plugin: %Array%, %Array.prototype%, the array iterator, and
/// the `Array` global.
#[derive(Debug)]
pub struct ArrayPlugin;

impl Plugin for ArrayPlugin {
    fn id(&self) -> &'static str {
        "array_objects"
    }

    fn dependencies(&self) -> &'static [&'static str] {
        &["fundamental_objects", "iteration"]
    }

    fn create_intrinsics(&self, agent: &mut Agent, realm: RealmIdentifier) {
        array_prototype::ArrayPrototype::create_intrinsic(agent, realm);
        array_constructor::ArrayConstructor::create_intrinsic(agent, realm);
        array_iterator_objects::array_iterator_prototype::ArrayIteratorPrototype::create_intrinsic(
            agent, realm,
        );
    }

    fn set_default_global_bindings(
        &self,
        agent: &mut Agent,
        realm: RealmIdentifier,
    ) -> JsResult<()> {
        stage_intrinsic_global(agent, realm, "Array", "%Array%")
    }
}
