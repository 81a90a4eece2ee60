//! The plugin registry.
//!
//! A realm's intrinsics are not built into the evaluator core: they are
//! contributed by plugins, each of which installs its intrinsic objects and
//! stages its global properties when a realm is initialized. Plugins name
//! their dependencies; realm initialization orders them topologically and
//! rejects cycles and unknown ids. This lets a host subset the language: a
//! sandboxed embedding may omit the console, a server embedding may omit
//! Set, and so on.

use std::rc::Rc;

use crate::ecmascript::{
    execution::{
        agent::{Agent, JsResult},
        realm::RealmIdentifier,
    },
    types::language::value::Value,
};

/// The AST node kinds the core evaluator leaves open for plugins. An
/// expression of one of these kinds with no registered handler throws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionNodeKind {
    RegExpLiteral,
    AwaitExpression,
    ImportExpression,
}

/// An evaluator handler for an open node kind.
pub type ExtensionHandler =
    fn(&mut Agent, &'static oxc_ast::ast::Expression<'static>) -> JsResult<Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginError {
    DuplicateId(&'static str),
    UnknownDependency {
        plugin: &'static str,
        dependency: &'static str,
    },
    DependencyCycle(&'static str),
}

impl core::fmt::Display for PluginError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PluginError::DuplicateId(id) => write!(f, "plugin '{}' registered twice", id),
            PluginError::UnknownDependency { plugin, dependency } => {
                write!(f, "plugin '{}' depends on unknown plugin '{}'", plugin, dependency)
            }
            PluginError::DependencyCycle(id) => {
                write!(f, "plugin dependency cycle through '{}'", id)
            }
        }
    }
}

impl std::error::Error for PluginError {}

/// A composable unit of language surface: intrinsic objects, global
/// bindings, and (optionally) evaluator handlers for the open node kinds.
pub trait Plugin: std::fmt::Debug {
    /// A unique identifier for this plugin.
    fn id(&self) -> &'static str;

    /// The ids of the plugins whose intrinsics must exist before this
    /// plugin's are created.
    fn dependencies(&self) -> &'static [&'static str] {
        &[]
    }

    /// Install this plugin's intrinsic objects into the realm's intrinsics
    /// table.
    fn create_intrinsics(&self, agent: &mut Agent, realm: RealmIdentifier);

    /// Stage this plugin's global properties on the realm's global object.
    /// Runs after every plugin's intrinsics exist.
    fn set_default_global_bindings(
        &self,
        _agent: &mut Agent,
        _realm: RealmIdentifier,
    ) -> JsResult<()> {
        Ok(())
    }

    /// Evaluator handlers keyed by open node kind.
    fn evaluation_extensions(&self) -> &'static [(ExtensionNodeKind, ExtensionHandler)] {
        &[]
    }
}

/// Order `plugins` so that every plugin appears after its dependencies.
/// Rejects unknown dependencies and cycles.
pub(crate) fn sort_plugins(
    plugins: &[Rc<dyn Plugin>],
) -> Result<Vec<Rc<dyn Plugin>>, PluginError> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Unvisited,
        InProgress,
        Done,
    }

    fn visit(
        index: usize,
        plugins: &[Rc<dyn Plugin>],
        marks: &mut [Mark],
        sorted: &mut Vec<Rc<dyn Plugin>>,
    ) -> Result<(), PluginError> {
        match marks[index] {
            Mark::Done => return Ok(()),
            Mark::InProgress => {
                return Err(PluginError::DependencyCycle(plugins[index].id()));
            }
            Mark::Unvisited => {}
        }
        marks[index] = Mark::InProgress;
        for dependency in plugins[index].dependencies() {
            let Some(dep_index) = plugins.iter().position(|p| p.id() == *dependency) else {
                return Err(PluginError::UnknownDependency {
                    plugin: plugins[index].id(),
                    dependency,
                });
            };
            visit(dep_index, plugins, marks, sorted)?;
        }
        marks[index] = Mark::Done;
        sorted.push(plugins[index].clone());
        Ok(())
    }

    let mut marks = vec![Mark::Unvisited; plugins.len()];
    let mut sorted = Vec::with_capacity(plugins.len());
    for index in 0..plugins.len() {
        visit(index, plugins, &mut marks, &mut sorted)?;
    }
    Ok(sorted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct TestPlugin {
        id: &'static str,
        deps: &'static [&'static str],
    }

    impl Plugin for TestPlugin {
        fn id(&self) -> &'static str {
            self.id
        }

        fn dependencies(&self) -> &'static [&'static str] {
            self.deps
        }

        fn create_intrinsics(&self, _agent: &mut Agent, _realm: RealmIdentifier) {}
    }

    fn plugin(id: &'static str, deps: &'static [&'static str]) -> Rc<dyn Plugin> {
        Rc::new(TestPlugin { id, deps })
    }

    #[test]
    fn sorts_dependencies_first() {
        let plugins = [
            plugin("array", &["iteration", "fundamental"]),
            plugin("iteration", &["fundamental"]),
            plugin("fundamental", &[]),
        ];
        let sorted = sort_plugins(&plugins).unwrap();
        let ids: Vec<_> = sorted.iter().map(|p| p.id()).collect();
        assert_eq!(ids, ["fundamental", "iteration", "array"]);
    }

    #[test]
    fn rejects_cycles() {
        let plugins = [plugin("a", &["b"]), plugin("b", &["a"])];
        assert!(matches!(
            sort_plugins(&plugins),
            Err(PluginError::DependencyCycle(_))
        ));
    }

    #[test]
    fn rejects_unknown_dependencies() {
        let plugins = [plugin("a", &["missing"])];
        assert!(matches!(
            sort_plugins(&plugins),
            Err(PluginError::UnknownDependency { .. })
        ));
    }
}
