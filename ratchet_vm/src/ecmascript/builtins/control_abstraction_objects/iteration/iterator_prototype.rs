use crate::{
    ecmascript::{
        builders::ordinary_object_builder::OrdinaryObjectBuilder,
        builtins::builtin_function::{ArgumentsList, Behaviour, Builtin},
        execution::{
            agent::{Agent, JsResult},
            realm::RealmIdentifier,
        },
        types::language::value::Value,
    },
    heap::WellKnownSymbolIndexes,
};

pub(crate) struct IteratorPrototype;

struct IteratorPrototypeIterator;
impl Builtin for IteratorPrototypeIterator {
    const NAME: &'static str = "[Symbol.iterator]";
    const KEY: Option<WellKnownSymbolIndexes> = Some(WellKnownSymbolIndexes::Iterator);
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(IteratorPrototype::iterator);
}

impl IteratorPrototype {
    /// ### [27.1.4.1 %Iterator.prototype% \[ %Symbol.iterator% \] ( )](https://tc39.es/ecma262/#sec-%iteratorprototype%-%symbol.iterator%)
    fn iterator(
        _agent: &mut Agent,
        this_value: Value,
        _arguments: ArgumentsList,
    ) -> JsResult<Value> {
        // 1. Return the this value.
        Ok(this_value)
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent, realm: RealmIdentifier) {
        let object_prototype = agent.get_realm(realm).intrinsics().object_prototype();
        let iterator_prototype = OrdinaryObjectBuilder::new(agent, realm)
            .with_prototype(object_prototype)
            .with_builtin_function_property::<IteratorPrototypeIterator>()
            .build();
        agent
            .get_realm_mut(realm)
            .intrinsics_mut()
            .set("%IteratorPrototype%", iterator_prototype);
    }
}
