pub mod script;
pub mod source_code;

use script::Script;

/// ### [ScriptOrModule](https://tc39.es/ecma262/#script-record)
///
/// The source of the code an execution context is running. Module records
/// are a host extension point; the core evaluates scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptOrModule {
    Script(Script),
}
