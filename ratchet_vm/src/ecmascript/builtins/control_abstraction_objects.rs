pub mod generator_prototype;
pub mod iteration;

use crate::ecmascript::{
    execution::{agent::Agent, realm::RealmIdentifier},
    plugins::Plugin,
};

/// The iteration plugin: %IteratorPrototype%, %GeneratorPrototype% and the
/// generator-function prototype surface.
#[derive(Debug)]
pub struct IterationPlugin;

impl Plugin for IterationPlugin {
    fn id(&self) -> &'static str {
        "iteration"
    }

    fn dependencies(&self) -> &'static [&'static str] {
        &["fundamental_objects"]
    }

    fn create_intrinsics(&self, agent: &mut Agent, realm: RealmIdentifier) {
        iteration::iterator_prototype::IteratorPrototype::create_intrinsic(agent, realm);
        generator_prototype::GeneratorPrototype::create_intrinsic(agent, realm);
    }
}
