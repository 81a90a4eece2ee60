use core::{marker::PhantomData, num::NonZeroU32};

use ahash::AHashMap;

use super::{
    agent::Agent,
    environments::{new_global_environment, GlobalEnvironmentIndex},
    execution_context::ExecutionContext,
};
use crate::{
    ecmascript::{
        plugins::{sort_plugins, PluginError},
        types::language::{
            function::Function,
            object::{data::ObjectHeapData, IntoObject, Object},
        },
    },
    heap::CreateHeapData,
};

/// An index to a [`Realm`] stored in the heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RealmIdentifier(NonZeroU32, PhantomData<Realm>);

impl RealmIdentifier {
    pub(crate) const fn from_index(value: usize) -> Self {
        assert!(value < u32::MAX as usize);
        // SAFETY: Value + 1 cannot be zero without overflowing first.
        Self(
            unsafe { NonZeroU32::new_unchecked(value as u32 + 1) },
            PhantomData,
        )
    }

    pub(crate) fn last(realms: &[Option<Realm>]) -> Self {
        Self::from_index(realms.len() - 1)
    }

    pub(crate) const fn into_index(self) -> usize {
        self.0.get() as usize - 1
    }

    pub fn global_object(self, agent: &Agent) -> Object {
        agent[self].global_object
    }
}

impl core::ops::Index<RealmIdentifier> for Agent {
    type Output = Realm;

    fn index(&self, index: RealmIdentifier) -> &Self::Output {
        self.heap
            .realms
            .get(index.into_index())
            .expect("RealmIdentifier out of bounds")
            .as_ref()
            .expect("RealmIdentifier slot empty")
    }
}

impl core::ops::IndexMut<RealmIdentifier> for Agent {
    fn index_mut(&mut self, index: RealmIdentifier) -> &mut Self::Output {
        self.heap
            .realms
            .get_mut(index.into_index())
            .expect("RealmIdentifier out of bounds")
            .as_mut()
            .expect("RealmIdentifier slot empty")
    }
}

/// ### [9.3 Realms](https://tc39.es/ecma262/#sec-code-realms)
///
/// Before it is evaluated, all ECMAScript code must be associated with a
/// realm. A realm consists of a set of intrinsic objects, an ECMAScript
/// global environment, and all of the ECMAScript code that is loaded within
/// the scope of that global environment.
#[derive(Debug)]
pub struct Realm {
    intrinsics: Intrinsics,

    /// ### \[\[GlobalObject\]\]
    pub(crate) global_object: Object,

    /// ### \[\[GlobalEnv\]\]
    pub(crate) global_env: Option<GlobalEnvironmentIndex>,

    /// ### \[\[TemplateMap\]\]
    ///
    /// Template objects are canonicalized per call site within a realm.
    template_map: AHashMap<usize, Object>,
}

impl Realm {
    pub(crate) fn intrinsics(&self) -> &Intrinsics {
        &self.intrinsics
    }

    pub(crate) fn intrinsics_mut(&mut self) -> &mut Intrinsics {
        &mut self.intrinsics
    }

    pub(crate) fn template_object(&self, site: usize) -> Option<Object> {
        self.template_map.get(&site).copied()
    }

    pub(crate) fn remember_template_object(&mut self, site: usize, template_object: Object) {
        self.template_map.insert(site, template_object);
    }
}

/// Enumeration of the intrinsics intended to be used as the
/// \[\[Prototype\]\] value of an object. Used in
/// GetPrototypeFromConstructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtoIntrinsics {
    Array,
    ArrayIterator,
    BigInt,
    Boolean,
    Error,
    EvalError,
    Function,
    Generator,
    Iterator,
    Number,
    Object,
    RangeError,
    ReferenceError,
    Set,
    SetIterator,
    String,
    Symbol,
    SyntaxError,
    TypeError,
    UriError,
}

impl ProtoIntrinsics {
    /// The canonical intrinsic name of this prototype.
    pub(crate) const fn intrinsic_name(self) -> &'static str {
        match self {
            ProtoIntrinsics::Array => "%Array.prototype%",
            ProtoIntrinsics::ArrayIterator => "%ArrayIteratorPrototype%",
            ProtoIntrinsics::BigInt => "%BigInt.prototype%",
            ProtoIntrinsics::Boolean => "%Boolean.prototype%",
            ProtoIntrinsics::Error => "%Error.prototype%",
            ProtoIntrinsics::EvalError => "%EvalError.prototype%",
            ProtoIntrinsics::Function => "%Function.prototype%",
            ProtoIntrinsics::Generator => "%GeneratorPrototype%",
            ProtoIntrinsics::Iterator => "%IteratorPrototype%",
            ProtoIntrinsics::Number => "%Number.prototype%",
            ProtoIntrinsics::Object => "%Object.prototype%",
            ProtoIntrinsics::RangeError => "%RangeError.prototype%",
            ProtoIntrinsics::ReferenceError => "%ReferenceError.prototype%",
            ProtoIntrinsics::Set => "%Set.prototype%",
            ProtoIntrinsics::SetIterator => "%SetIteratorPrototype%",
            ProtoIntrinsics::String => "%String.prototype%",
            ProtoIntrinsics::Symbol => "%Symbol.prototype%",
            ProtoIntrinsics::SyntaxError => "%SyntaxError.prototype%",
            ProtoIntrinsics::TypeError => "%TypeError.prototype%",
            ProtoIntrinsics::UriError => "%URIError.prototype%",
        }
    }
}

/// ### [9.3.2 CreateIntrinsics ( realmRec )](https://tc39.es/ecma262/#sec-createintrinsics)
///
/// The per-realm intrinsics table, keyed by the canonical percent-delimited
/// intrinsic names. Populated exactly once, by the realm's plugin set, in
/// dependency order.
#[derive(Debug, Default)]
pub struct Intrinsics {
    table: AHashMap<&'static str, Object>,
}

impl Intrinsics {
    /// Look up an intrinsic by its canonical name.
    pub fn get(&self, name: &str) -> Option<Object> {
        self.table.get(name).copied()
    }

    /// Install an intrinsic. Each name may be populated only once.
    pub fn set(&mut self, name: &'static str, intrinsic: impl IntoObject) {
        let previous = self.table.insert(name, intrinsic.into_object());
        assert!(previous.is_none(), "intrinsic {} populated twice", name);
    }

    pub(crate) fn get_intrinsic_default_proto(
        &self,
        proto_intrinsic: ProtoIntrinsics,
    ) -> Option<Object> {
        self.get(proto_intrinsic.intrinsic_name())
    }

    fn expect(&self, name: &str) -> Object {
        self.get(name)
            .unwrap_or_else(|| panic!("intrinsic {} missing; is its plugin registered?", name))
    }

    pub(crate) fn object_prototype(&self) -> Object {
        self.expect("%Object.prototype%")
    }

    pub(crate) fn function_prototype(&self) -> Object {
        self.expect("%Function.prototype%")
    }

    pub(crate) fn array_prototype(&self) -> Object {
        self.expect("%Array.prototype%")
    }

    pub(crate) fn iterator_prototype(&self) -> Object {
        self.expect("%IteratorPrototype%")
    }

    pub(crate) fn generator_prototype(&self) -> Object {
        self.expect("%GeneratorPrototype%")
    }

    pub(crate) fn array_constructor(&self) -> Function {
        Function::try_from(self.expect("%Array%")).unwrap()
    }

    pub(crate) fn throw_type_error(&self) -> Function {
        Function::try_from(self.expect("%ThrowTypeError%")).unwrap()
    }

    /// The constructor intrinsic for a native error kind.
    pub(crate) fn error_constructor(
        &self,
        kind: super::agent::ExceptionType,
    ) -> Option<Object> {
        use super::agent::ExceptionType;
        self.get(match kind {
            ExceptionType::Error => "%Error%",
            ExceptionType::EvalError => "%EvalError%",
            ExceptionType::RangeError => "%RangeError%",
            ExceptionType::ReferenceError => "%ReferenceError%",
            ExceptionType::SyntaxError => "%SyntaxError%",
            ExceptionType::TypeError => "%TypeError%",
            ExceptionType::UriError => "%URIError%",
        })
    }

    /// The prototype intrinsic for a native error kind.
    pub(crate) fn error_prototype(&self, kind: super::agent::ExceptionType) -> Option<Object> {
        use super::agent::ExceptionType;
        self.get(match kind {
            ExceptionType::Error => "%Error.prototype%",
            ExceptionType::EvalError => "%EvalError.prototype%",
            ExceptionType::RangeError => "%RangeError.prototype%",
            ExceptionType::ReferenceError => "%ReferenceError.prototype%",
            ExceptionType::SyntaxError => "%SyntaxError.prototype%",
            ExceptionType::TypeError => "%TypeError.prototype%",
            ExceptionType::UriError => "%URIError.prototype%",
        })
    }
}

/// ### [9.3.1 InitializeHostDefinedRealm ( )](https://tc39.es/ecma262/#sec-initializehostdefinedrealm) (first half)
///
/// Creates the realm record and pushes the realm-only execution context.
pub(crate) fn create_realm(agent: &mut Agent) -> RealmIdentifier {
    // 1. Let realm be a new Realm Record.
    let realm_rec = Realm {
        // 2. Perform CreateIntrinsics(realm): deferred to the plugin set.
        intrinsics: Intrinsics::default(),

        // 3. Set realm.[[GlobalObject]] to undefined: replaced by
        //    SetRealmGlobalObject before any code can observe it.
        global_object: Object::Object(
            crate::ecmascript::types::language::object::OrdinaryObject::_def(),
        ),

        // 4. Set realm.[[GlobalEnv]] to undefined.
        global_env: None,

        template_map: AHashMap::default(),
    };

    agent.heap.realms.push(Some(realm_rec));
    RealmIdentifier::last(&agent.heap.realms)
}

/// SetRealmGlobalObject ( realmRec, globalObj, thisValue )
pub(crate) fn set_realm_global_object(
    agent: &mut Agent,
    realm_id: RealmIdentifier,
    global_object: Option<Object>,
    this_value: Option<Object>,
) {
    // 1. If globalObj is undefined, then
    let global_object = global_object.unwrap_or_else(|| {
        // a. Assert: intrinsics is a Record with fields listed in Table 6.
        // b. Set globalObj to
        //    OrdinaryObjectCreate(intrinsics.[[%Object.prototype%]]).
        let prototype = agent.get_realm(realm_id).intrinsics().object_prototype();
        agent
            .heap
            .create(ObjectHeapData::new(Some(prototype)))
            .into_object()
    });

    // 2. If thisValue is undefined, set thisValue to globalObj.
    let this_value = this_value.unwrap_or(global_object);

    // 3. Set realmRec.[[GlobalObject]] to globalObj.
    agent[realm_id].global_object = global_object;

    // 4. Let newGlobalEnv be NewGlobalEnvironment(globalObj, thisValue).
    let new_global_env = new_global_environment(agent, global_object, this_value);

    // 5. Set realmRec.[[GlobalEnv]] to newGlobalEnv.
    agent[realm_id].global_env = Some(new_global_env);

    // 6. Return UNUSED.
}

/// ### [9.3.1 InitializeHostDefinedRealm ( )](https://tc39.es/ecma262/#sec-initializehostdefinedrealm)
pub(crate) fn initialize_host_defined_realm(
    agent: &mut Agent,
    create_global_object: Option<impl FnOnce(&mut Agent) -> Object>,
    create_global_this_value: Option<impl FnOnce(&mut Agent) -> Object>,
) -> Result<RealmIdentifier, PluginError> {
    // The plugin order must resolve before any realm state exists.
    let plugins = sort_plugins(&agent.plugins)?;

    // 1. Let realm be a new Realm Record.
    let realm = create_realm(agent);

    // 2. Let newContext be a new execution context.
    // 3. Set the Function of newContext to null.
    // 4. Set the Realm of newContext to realm.
    // 5. Push newContext onto the execution context stack.
    agent.push_execution_context(ExecutionContext::new_realm_context(realm));

    // 6. Perform CreateIntrinsics(realm): run every registered plugin's
    //    intrinsic creation hook in dependency order.
    for plugin in plugins.iter() {
        plugin.create_intrinsics(agent, realm);
    }

    // 7. If the host requires use of an exotic object to serve as realm's
    //    global object, let global be such an object created in a
    //    host-defined manner.
    let global_object = create_global_object.map(|create| create(agent));

    // 8. If the host requires that the `this` binding in realm's global
    //    scope return an object other than the global object, let
    //    thisValue be such an object.
    let this_value = create_global_this_value.map(|create| create(agent));

    // 9. Perform SetRealmGlobalObject(realm, global, thisValue).
    set_realm_global_object(agent, realm, global_object, this_value);

    // 10. Let globalObj be ? SetDefaultGlobalBindings(realm): each plugin
    //     stages its global properties.
    for plugin in plugins.iter() {
        plugin
            .set_default_global_bindings(agent, realm)
            .expect("staging default global bindings failed");
    }

    // 11. Create any host-defined global object properties on globalObj.
    // 12. Return UNUSED.
    Ok(realm)
}
