pub mod array;
pub mod bound_function;
pub mod builtin_constructor;
pub mod builtin_function;
pub mod console_object;
pub mod control_abstraction_objects;
pub mod ecmascript_function;
pub mod error;
pub mod fundamental_objects;
pub mod generator_objects;
pub mod indexed_collections;
pub mod keyed_collections;
pub mod ordinary;
pub mod primitive_objects;
pub mod set;

use std::rc::Rc;

pub use builtin_function::{
    create_builtin_function, ArgumentsList, Behaviour, Builtin, BuiltinFunction,
    BuiltinFunctionArgs,
};
pub use console_object::ConsolePlugin;
pub use control_abstraction_objects::IterationPlugin;
pub use fundamental_objects::FundamentalObjectsPlugin;
pub use indexed_collections::array_objects::ArrayPlugin;
pub use keyed_collections::set_objects::SetPlugin;

use crate::ecmascript::{execution::agent::Agent, plugins::Plugin};

/// The full default plugin set, in no particular order; realm creation
/// resolves the dependency order.
pub fn default_plugins() -> Vec<Rc<dyn Plugin>> {
    vec![
        Rc::new(FundamentalObjectsPlugin),
        Rc::new(IterationPlugin),
        Rc::new(ArrayPlugin),
        Rc::new(SetPlugin),
        Rc::new(ConsolePlugin),
    ]
}

/// Register the default plugins on an agent.
pub fn register_default_plugins(agent: &mut Agent) {
    for plugin in default_plugins() {
        agent.register_plugin(plugin).unwrap();
    }
}
