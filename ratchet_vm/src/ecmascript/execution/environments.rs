//! ### [9.1 Environment Records](https://tc39.es/ecma262/#sec-environment-records)
//!
//! Environment Record is a specification type used to define the association
//! of Identifiers to specific variables and functions, based upon the
//! lexical nesting structure of ECMAScript code. Each time such code is
//! evaluated, a new Environment Record is created to record the identifier
//! bindings that are created by that code.
//!
//! Every Environment Record has an \[\[OuterEnv\]\] field, which is either
//! null or a reference to an outer Environment Record, modelling the logical
//! nesting of environments.

use core::{marker::PhantomData, num::NonZeroU32};

pub mod declarative_environment;
pub mod function_environment;
pub mod global_environment;
pub mod module_environment;
pub mod object_environment;
pub mod private_environment;

pub(crate) use declarative_environment::new_declarative_environment;
pub(crate) use function_environment::{
    new_class_field_initializer_environment, new_class_static_element_environment,
    new_function_environment, ThisBindingStatus,
};
pub(crate) use global_environment::new_global_environment;
pub(crate) use object_environment::new_object_environment;
pub(crate) use private_environment::new_private_environment;

use crate::ecmascript::types::{
    language::{object::Object, string::String, value::Value},
    spec::reference::Reference,
};

use super::agent::{Agent, JsResult};

/// ### [\[\[OuterEnv\]\]](https://tc39.es/ecma262/#sec-environment-records)
pub(crate) type OuterEnv = Option<EnvironmentIndex>;

macro_rules! create_environment_index {
    ($record: ident, $index: ident, $entry: ident) => {
        /// An index used to access an environment record from
        /// [`Environments`]. The index is stored as a [`NonZeroU32`] holding
        /// the position plus one so that `Option<$index>` stays four bytes
        /// wide.
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $index(NonZeroU32, PhantomData<$record>);

        impl core::fmt::Debug for $index {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, concat!(stringify!($index), "({:?})"), self.0.get() - 1)
            }
        }

        impl $index {
            /// Creates a new index from a one-based u32.
            ///
            /// ## Panics
            /// - If the value is equal to 0.
            pub(crate) const fn from_u32(value: u32) -> Self {
                assert!(value != 0);
                // SAFETY: Number is not 0, checked above in const context.
                Self(unsafe { NonZeroU32::new_unchecked(value) }, PhantomData)
            }

            pub(crate) const fn into_index(self) -> usize {
                self.0.get() as usize - 1
            }

            pub(crate) fn last(vec: &[Option<$record>]) -> Self {
                Self::from_u32(vec.len() as u32)
            }
        }

        impl core::ops::Index<$index> for Agent {
            type Output = $record;

            fn index(&self, index: $index) -> &Self::Output {
                &self.heap.environments.$entry[index]
            }
        }

        impl core::ops::IndexMut<$index> for Agent {
            fn index_mut(&mut self, index: $index) -> &mut Self::Output {
                &mut self.heap.environments.$entry[index]
            }
        }

        impl core::ops::Index<$index> for Vec<Option<$record>> {
            type Output = $record;

            fn index(&self, index: $index) -> &Self::Output {
                self.get(index.into_index())
                    .expect("Environment out of bounds")
                    .as_ref()
                    .expect("Environment slot empty")
            }
        }

        impl core::ops::IndexMut<$index> for Vec<Option<$record>> {
            fn index_mut(&mut self, index: $index) -> &mut Self::Output {
                self.get_mut(index.into_index())
                    .expect("Environment out of bounds")
                    .as_mut()
                    .expect("Environment slot empty")
            }
        }
    };
}

use declarative_environment::DeclarativeEnvironmentRecord;
use function_environment::FunctionEnvironmentRecord;
use global_environment::GlobalEnvironmentRecord;
use module_environment::ModuleEnvironmentRecord;
use object_environment::ObjectEnvironmentRecord;
use private_environment::PrivateEnvironmentRecord;

create_environment_index!(
    DeclarativeEnvironmentRecord,
    DeclarativeEnvironmentIndex,
    declarative
);
create_environment_index!(FunctionEnvironmentRecord, FunctionEnvironmentIndex, function);
create_environment_index!(GlobalEnvironmentRecord, GlobalEnvironmentIndex, global);
create_environment_index!(ModuleEnvironmentRecord, ModuleEnvironmentIndex, module);
create_environment_index!(ObjectEnvironmentRecord, ObjectEnvironmentIndex, object);
create_environment_index!(PrivateEnvironmentRecord, PrivateEnvironmentIndex, private);

/// The storage arenas for all environment records, held by the heap.
#[derive(Debug, Default)]
pub struct Environments {
    pub(crate) declarative: Vec<Option<DeclarativeEnvironmentRecord>>,
    pub(crate) function: Vec<Option<FunctionEnvironmentRecord>>,
    pub(crate) global: Vec<Option<GlobalEnvironmentRecord>>,
    pub(crate) module: Vec<Option<ModuleEnvironmentRecord>>,
    pub(crate) object: Vec<Option<ObjectEnvironmentRecord>>,
    pub(crate) private: Vec<Option<PrivateEnvironmentRecord>>,
}

impl Environments {
    pub(crate) fn push_declarative_environment(
        &mut self,
        env: DeclarativeEnvironmentRecord,
    ) -> DeclarativeEnvironmentIndex {
        self.declarative.push(Some(env));
        DeclarativeEnvironmentIndex::last(&self.declarative)
    }

    pub(crate) fn push_function_environment(
        &mut self,
        env: FunctionEnvironmentRecord,
    ) -> FunctionEnvironmentIndex {
        self.function.push(Some(env));
        FunctionEnvironmentIndex::last(&self.function)
    }

    pub(crate) fn push_global_environment(
        &mut self,
        env: GlobalEnvironmentRecord,
    ) -> GlobalEnvironmentIndex {
        self.global.push(Some(env));
        GlobalEnvironmentIndex::last(&self.global)
    }

    pub(crate) fn push_module_environment(
        &mut self,
        env: ModuleEnvironmentRecord,
    ) -> ModuleEnvironmentIndex {
        self.module.push(Some(env));
        ModuleEnvironmentIndex::last(&self.module)
    }

    pub(crate) fn push_object_environment(
        &mut self,
        env: ObjectEnvironmentRecord,
    ) -> ObjectEnvironmentIndex {
        self.object.push(Some(env));
        ObjectEnvironmentIndex::last(&self.object)
    }

    pub(crate) fn push_private_environment(
        &mut self,
        env: PrivateEnvironmentRecord,
    ) -> PrivateEnvironmentIndex {
        self.private.push(Some(env));
        PrivateEnvironmentIndex::last(&self.private)
    }
}

/// ### [9.1.1 The Environment Record Type Hierarchy](https://tc39.es/ecma262/#sec-the-environment-record-type-hierarchy)
///
/// Environment Records can be thought of as existing in a simple
/// object-oriented hierarchy where Environment Record is an abstract class
/// with three concrete subclasses: Declarative, Object, and Global.
/// Function and Module Environment Records are subclasses of Declarative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentIndex {
    Declarative(DeclarativeEnvironmentIndex),
    Function(FunctionEnvironmentIndex),
    Global(GlobalEnvironmentIndex),
    Module(ModuleEnvironmentIndex),
    Object(ObjectEnvironmentIndex),
}

impl From<DeclarativeEnvironmentIndex> for EnvironmentIndex {
    fn from(value: DeclarativeEnvironmentIndex) -> Self {
        EnvironmentIndex::Declarative(value)
    }
}

impl From<FunctionEnvironmentIndex> for EnvironmentIndex {
    fn from(value: FunctionEnvironmentIndex) -> Self {
        EnvironmentIndex::Function(value)
    }
}

impl From<GlobalEnvironmentIndex> for EnvironmentIndex {
    fn from(value: GlobalEnvironmentIndex) -> Self {
        EnvironmentIndex::Global(value)
    }
}

impl From<ModuleEnvironmentIndex> for EnvironmentIndex {
    fn from(value: ModuleEnvironmentIndex) -> Self {
        EnvironmentIndex::Module(value)
    }
}

impl From<ObjectEnvironmentIndex> for EnvironmentIndex {
    fn from(value: ObjectEnvironmentIndex) -> Self {
        EnvironmentIndex::Object(value)
    }
}

impl EnvironmentIndex {
    pub(crate) fn get_outer_env(self, agent: &Agent) -> OuterEnv {
        match self {
            EnvironmentIndex::Declarative(index) => agent[index].outer_env,
            EnvironmentIndex::Function(index) => {
                agent[agent[index].declarative_environment].outer_env
            }
            EnvironmentIndex::Global(_) => None,
            EnvironmentIndex::Module(index) => agent[index].outer_env,
            EnvironmentIndex::Object(index) => agent[index].outer_env,
        }
    }

    /// ### [HasBinding(N)](https://tc39.es/ecma262/#table-abstract-methods-of-environment-records)
    ///
    /// Determine if an Environment Record has a binding for the String value
    /// N. Return true if it does and false if it does not.
    pub(crate) fn has_binding(self, agent: &mut Agent, name: String) -> JsResult<bool> {
        match self {
            EnvironmentIndex::Declarative(index) => Ok(index.has_binding(agent, name)),
            EnvironmentIndex::Function(index) => Ok(index.has_binding(agent, name)),
            EnvironmentIndex::Global(index) => index.has_binding(agent, name),
            EnvironmentIndex::Module(index) => Ok(index.has_binding(agent, name)),
            EnvironmentIndex::Object(index) => index.has_binding(agent, name),
        }
    }

    /// ### [CreateMutableBinding(N, D)](https://tc39.es/ecma262/#table-abstract-methods-of-environment-records)
    ///
    /// Create a new but uninitialized mutable binding in an Environment
    /// Record. If the Boolean argument D is true the binding may be
    /// subsequently deleted.
    pub(crate) fn create_mutable_binding(
        self,
        agent: &mut Agent,
        name: String,
        is_deletable: bool,
    ) -> JsResult<()> {
        match self {
            EnvironmentIndex::Declarative(index) => {
                index.create_mutable_binding(agent, name, is_deletable);
                Ok(())
            }
            EnvironmentIndex::Function(index) => {
                index.create_mutable_binding(agent, name, is_deletable);
                Ok(())
            }
            EnvironmentIndex::Global(index) => {
                index.create_mutable_binding(agent, name, is_deletable)
            }
            EnvironmentIndex::Module(index) => {
                index.create_mutable_binding(agent, name, is_deletable);
                Ok(())
            }
            EnvironmentIndex::Object(index) => {
                index.create_mutable_binding(agent, name, is_deletable)
            }
        }
    }

    /// ### [CreateImmutableBinding(N, S)](https://tc39.es/ecma262/#table-abstract-methods-of-environment-records)
    ///
    /// Create a new but uninitialized immutable binding in an Environment
    /// Record. If S is true then attempts to set it after it has been
    /// initialized will always throw an exception.
    pub(crate) fn create_immutable_binding(
        self,
        agent: &mut Agent,
        name: String,
        is_strict: bool,
    ) -> JsResult<()> {
        match self {
            EnvironmentIndex::Declarative(index) => {
                index.create_immutable_binding(agent, name, is_strict);
                Ok(())
            }
            EnvironmentIndex::Function(index) => {
                index.create_immutable_binding(agent, name, is_strict);
                Ok(())
            }
            EnvironmentIndex::Global(index) => {
                index.create_immutable_binding(agent, name, is_strict)
            }
            EnvironmentIndex::Module(index) => {
                index.create_immutable_binding(agent, name, is_strict);
                Ok(())
            }
            EnvironmentIndex::Object(_) => unreachable!(),
        }
    }

    /// ### [InitializeBinding(N, V)](https://tc39.es/ecma262/#table-abstract-methods-of-environment-records)
    ///
    /// Set the value of an already existing but uninitialized binding in an
    /// Environment Record.
    pub(crate) fn initialize_binding(
        self,
        agent: &mut Agent,
        name: String,
        value: Value,
    ) -> JsResult<()> {
        match self {
            EnvironmentIndex::Declarative(index) => {
                index.initialize_binding(agent, name, value);
                Ok(())
            }
            EnvironmentIndex::Function(index) => {
                index.initialize_binding(agent, name, value);
                Ok(())
            }
            EnvironmentIndex::Global(index) => index.initialize_binding(agent, name, value),
            EnvironmentIndex::Module(index) => {
                index.initialize_binding(agent, name, value);
                Ok(())
            }
            EnvironmentIndex::Object(index) => index.initialize_binding(agent, name, value),
        }
    }

    /// ### [SetMutableBinding(N, V, S)](https://tc39.es/ecma262/#table-abstract-methods-of-environment-records)
    ///
    /// Set the value of an already existing mutable binding in an
    /// Environment Record.
    pub(crate) fn set_mutable_binding(
        self,
        agent: &mut Agent,
        name: String,
        value: Value,
        is_strict: bool,
    ) -> JsResult<()> {
        match self {
            EnvironmentIndex::Declarative(index) => {
                index.set_mutable_binding(agent, name, value, is_strict)
            }
            EnvironmentIndex::Function(index) => {
                index.set_mutable_binding(agent, name, value, is_strict)
            }
            EnvironmentIndex::Global(index) => {
                index.set_mutable_binding(agent, name, value, is_strict)
            }
            EnvironmentIndex::Module(index) => {
                index.set_mutable_binding(agent, name, value, is_strict)
            }
            EnvironmentIndex::Object(index) => {
                index.set_mutable_binding(agent, name, value, is_strict)
            }
        }
    }

    /// ### [GetBindingValue(N, S)](https://tc39.es/ecma262/#table-abstract-methods-of-environment-records)
    ///
    /// Returns the value of an already existing binding from an Environment
    /// Record.
    pub(crate) fn get_binding_value(
        self,
        agent: &mut Agent,
        name: String,
        is_strict: bool,
    ) -> JsResult<Value> {
        match self {
            EnvironmentIndex::Declarative(index) => {
                index.get_binding_value(agent, name, is_strict)
            }
            EnvironmentIndex::Function(index) => index.get_binding_value(agent, name, is_strict),
            EnvironmentIndex::Global(index) => index.get_binding_value(agent, name, is_strict),
            EnvironmentIndex::Module(index) => index.get_binding_value(agent, name, is_strict),
            EnvironmentIndex::Object(index) => index.get_binding_value(agent, name, is_strict),
        }
    }

    /// ### [DeleteBinding(N)](https://tc39.es/ecma262/#table-abstract-methods-of-environment-records)
    ///
    /// Delete a binding from an Environment Record.
    pub(crate) fn delete_binding(self, agent: &mut Agent, name: String) -> JsResult<bool> {
        match self {
            EnvironmentIndex::Declarative(index) => Ok(index.delete_binding(agent, name)),
            EnvironmentIndex::Function(index) => Ok(index.delete_binding(agent, name)),
            EnvironmentIndex::Global(index) => index.delete_binding(agent, name),
            EnvironmentIndex::Module(_) => unreachable!(),
            EnvironmentIndex::Object(index) => index.delete_binding(agent, name),
        }
    }

    /// ### [HasThisBinding()](https://tc39.es/ecma262/#table-abstract-methods-of-environment-records)
    pub(crate) fn has_this_binding(self, agent: &Agent) -> bool {
        match self {
            EnvironmentIndex::Declarative(_) => false,
            EnvironmentIndex::Function(index) => index.has_this_binding(agent),
            EnvironmentIndex::Global(_) => true,
            EnvironmentIndex::Module(_) => true,
            EnvironmentIndex::Object(_) => false,
        }
    }

    /// ### [HasSuperBinding()](https://tc39.es/ecma262/#table-abstract-methods-of-environment-records)
    pub(crate) fn has_super_binding(self, agent: &Agent) -> bool {
        match self {
            EnvironmentIndex::Declarative(_) => false,
            EnvironmentIndex::Function(index) => index.has_super_binding(agent),
            EnvironmentIndex::Global(_) => false,
            EnvironmentIndex::Module(_) => false,
            EnvironmentIndex::Object(_) => false,
        }
    }

    /// ### [WithBaseObject()](https://tc39.es/ecma262/#table-abstract-methods-of-environment-records)
    ///
    /// If this Environment Record is associated with a `with` statement,
    /// return the with object. Otherwise, return undefined.
    pub(crate) fn with_base_object(self, agent: &Agent) -> Option<Object> {
        match self {
            EnvironmentIndex::Object(index) => index.with_base_object(agent),
            _ => None,
        }
    }
}

/// ### [9.1.2.1 GetIdentifierReference ( env, name, strict )](https://tc39.es/ecma262/#sec-getidentifierreference)
pub(crate) fn get_identifier_reference(
    agent: &mut Agent,
    env: Option<EnvironmentIndex>,
    name: String,
    strict: bool,
) -> JsResult<Reference> {
    // 1. If env is null, then
    let Some(env) = env else {
        // a. Return the Reference Record {
        //      [[Base]]: UNRESOLVABLE,
        //      [[ReferencedName]]: name,
        //      [[Strict]]: strict,
        //      [[ThisValue]]: EMPTY
        //    }.
        return Ok(Reference::new_unresolvable_reference(name, strict));
    };

    // 2. Let exists be ? env.HasBinding(name).
    let exists = env.has_binding(agent, name)?;

    // 3. If exists is true, then
    if exists {
        // a. Return the Reference Record {
        //      [[Base]]: env,
        //      [[ReferencedName]]: name,
        //      [[Strict]]: strict,
        //      [[ThisValue]]: EMPTY
        //    }.
        Ok(Reference::new_variable_reference(env, name, strict))
    }
    // 4. Else,
    else {
        // a. Let outer be env.[[OuterEnv]].
        let outer = env.get_outer_env(agent);
        // b. Return ? GetIdentifierReference(outer, name, strict).
        get_identifier_reference(agent, outer, name, strict)
    }
}
