use ahash::AHashMap;

use super::PrivateEnvironmentIndex;
use crate::ecmascript::{
    execution::agent::Agent,
    types::{language::string::String, spec::private_name::PrivateName},
};

/// ### [9.2 PrivateEnvironment Records](https://tc39.es/ecma262/#sec-privateenvironment-records)
///
/// A PrivateEnvironment Record is a specification mechanism used to track
/// Private Names based upon the lexical nesting structure of
/// ClassDeclarations and ClassExpressions in ECMAScript code. Each time such
/// a class is evaluated, a new PrivateEnvironment Record is created to
/// record the Private Names declared by that class.
#[derive(Debug)]
pub struct PrivateEnvironmentRecord {
    /// ### \[\[OuterPrivateEnvironment\]\]
    ///
    /// The PrivateEnvironment Record of the nearest containing class. None
    /// if the class with which this PrivateEnvironment Record is associated
    /// is not contained in any other class.
    pub(crate) outer_private_environment: Option<PrivateEnvironmentIndex>,

    /// ### \[\[Names\]\]
    ///
    /// The Private Names declared by this class.
    pub(crate) names: AHashMap<String, PrivateName>,
}

/// ### [9.2.1.1 NewPrivateEnvironment ( outerPrivEnv )](https://tc39.es/ecma262/#sec-newprivateenvironment)
pub(crate) fn new_private_environment(
    agent: &mut Agent,
    outer_private_environment: Option<PrivateEnvironmentIndex>,
) -> PrivateEnvironmentIndex {
    // 1. Let names be a new empty List.
    // 2. Return the PrivateEnvironment Record {
    //      [[OuterPrivateEnvironment]]: outerPrivEnv,
    //      [[Names]]: names
    //    }.
    agent
        .heap
        .environments
        .push_private_environment(PrivateEnvironmentRecord {
            outer_private_environment,
            names: AHashMap::default(),
        })
}

impl PrivateEnvironmentIndex {
    pub(crate) fn get_outer_env(self, agent: &Agent) -> Option<PrivateEnvironmentIndex> {
        agent[self].outer_private_environment
    }

    /// Add a fresh Private Name for `description`, or return the existing
    /// one (getter/setter pairs share a name).
    pub(crate) fn add_private_name(self, agent: &mut Agent, description: String) -> PrivateName {
        if let Some(existing) = agent[self].names.get(&description) {
            return *existing;
        }
        let name = agent.heap.create_private_name();
        agent[self].names.insert(description, name);
        name
    }

    pub(crate) fn get_private_name(self, agent: &Agent, description: String) -> Option<PrivateName> {
        agent[self].names.get(&description).copied()
    }

    /// ### [9.2.1.2 ResolvePrivateIdentifier ( privEnv, identifier )](https://tc39.es/ecma262/#sec-resolve-private-identifier)
    pub(crate) fn resolve_private_identifier(
        self,
        agent: &Agent,
        identifier: String,
    ) -> Option<PrivateName> {
        // 1. Let names be privEnv.[[Names]].
        // 2. For each Private Name pn of names, do
        //    a. If pn.[[Description]] is identifier, then return pn.
        if let Some(name) = self.get_private_name(agent, identifier) {
            return Some(name);
        }
        // 3. Let outerPrivEnv be privEnv.[[OuterPrivateEnvironment]].
        // 4. Assert: outerPrivEnv is not null.
        // 5. Return ResolvePrivateIdentifier(outerPrivEnv, identifier).
        let outer = self.get_outer_env(agent)?;
        outer.resolve_private_identifier(agent, identifier)
    }

    /// Reverse lookup of a Private Name's \[\[Description]] through this
    /// environment chain, for diagnostics.
    pub(crate) fn resolve_description(self, agent: &Agent, name: PrivateName) -> Option<String> {
        for (description, pn) in agent[self].names.iter() {
            if *pn == name {
                return Some(*description);
            }
        }
        let outer = self.get_outer_env(agent)?;
        outer.resolve_description(agent, name)
    }
}
