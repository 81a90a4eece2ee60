pub(crate) mod indexes;

use core::hash::{BuildHasher, Hash, Hasher};

use ahash::AHashMap;

use crate::ecmascript::{
    builtins::{
        array::ArrayHeapData,
        bound_function::BoundFunctionHeapData,
        builtin_constructor::BuiltinConstructorHeapData,
        builtin_function::BuiltinFunctionHeapData,
        ecmascript_function::ECMAScriptFunctionHeapData,
        error::ErrorHeapData,
        generator_objects::GeneratorHeapData,
        indexed_collections::array_objects::array_iterator_objects::array_iterator::ArrayIteratorHeapData,
        keyed_collections::set_objects::set_iterator_objects::set_iterator::SetIteratorHeapData,
        primitive_objects::PrimitiveObjectHeapData,
        set::SetHeapData,
    },
    execution::{environments::Environments, realm::Realm},
    scripts_and_modules::{script::ScriptRecord, source_code::SourceCodeHeapData},
    types::{
        language::{
            bigint::{BigInt, BigIntHeapData},
            object::data::ObjectHeapData,
            string::{String, StringHeapData},
            symbol::{Symbol, SymbolHeapData},
        },
        spec::private_name::PrivateName,
    },
};

use self::indexes::{StringIndex, SymbolIndex};

/// Helper trait for allocating data into the heap and getting back a handle
/// of the matching kind.
pub(crate) trait CreateHeapData<T, F> {
    fn create(&mut self, data: T) -> F;
}

/// Indexes of the well-known symbols, allocated at fixed slots when the heap
/// is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub(crate) enum WellKnownSymbolIndexes {
    AsyncIterator = 0,
    HasInstance,
    IsConcatSpreadable,
    Iterator,
    Species,
    ToPrimitive,
    ToStringTag,
    Unscopables,
}

impl WellKnownSymbolIndexes {
    const DESCRIPTIONS: [&'static str; 8] = [
        "Symbol.asyncIterator",
        "Symbol.hasInstance",
        "Symbol.isConcatSpreadable",
        "Symbol.iterator",
        "Symbol.species",
        "Symbol.toPrimitive",
        "Symbol.toStringTag",
        "Symbol.unscopables",
    ];

    pub(crate) const fn to_symbol(self) -> Symbol {
        Symbol(SymbolIndex::from_u32_index(self as u32))
    }
}

impl From<WellKnownSymbolIndexes> for Symbol {
    fn from(value: WellKnownSymbolIndexes) -> Self {
        value.to_symbol()
    }
}

#[derive(Debug)]
pub struct Heap {
    pub(crate) arrays: Vec<Option<ArrayHeapData>>,
    pub(crate) array_iterators: Vec<Option<ArrayIteratorHeapData>>,
    pub(crate) bigints: Vec<Option<BigIntHeapData>>,
    pub(crate) bound_functions: Vec<Option<BoundFunctionHeapData>>,
    pub(crate) builtin_constructors: Vec<Option<BuiltinConstructorHeapData>>,
    pub(crate) builtin_functions: Vec<Option<BuiltinFunctionHeapData>>,
    pub(crate) ecmascript_functions: Vec<Option<ECMAScriptFunctionHeapData>>,
    pub(crate) environments: Environments,
    pub(crate) errors: Vec<Option<ErrorHeapData>>,
    pub(crate) generators: Vec<Option<GeneratorHeapData>>,
    pub(crate) objects: Vec<Option<ObjectHeapData>>,
    pub(crate) primitive_objects: Vec<Option<PrimitiveObjectHeapData>>,
    pub(crate) realms: Vec<Option<Realm>>,
    pub(crate) scripts: Vec<Option<ScriptRecord>>,
    pub(crate) sets: Vec<Option<SetHeapData>>,
    pub(crate) set_iterators: Vec<Option<SetIteratorHeapData>>,
    pub(crate) source_codes: Vec<Option<SourceCodeHeapData>>,
    pub(crate) strings: Vec<Option<StringHeapData>>,
    /// Interning table for heap strings: hash of the string data to the
    /// indexes of strings with that hash.
    string_lookup: AHashMap<u64, Vec<StringIndex>>,
    string_hasher: ahash::RandomState,
    pub(crate) symbols: Vec<Option<SymbolHeapData>>,
    /// Counter backing [`PrivateName`] allocation; every evaluation of a
    /// class produces fresh identities.
    private_name_count: u32,
}

impl Heap {
    pub(crate) fn new() -> Self {
        let mut heap = Self {
            arrays: Vec::new(),
            array_iterators: Vec::new(),
            bigints: Vec::new(),
            bound_functions: Vec::new(),
            builtin_constructors: Vec::new(),
            builtin_functions: Vec::with_capacity(256),
            ecmascript_functions: Vec::new(),
            environments: Environments::default(),
            errors: Vec::new(),
            generators: Vec::new(),
            objects: Vec::with_capacity(1024),
            primitive_objects: Vec::new(),
            realms: Vec::with_capacity(1),
            scripts: Vec::with_capacity(1),
            sets: Vec::new(),
            set_iterators: Vec::new(),
            source_codes: Vec::with_capacity(1),
            strings: Vec::with_capacity(1024),
            string_lookup: AHashMap::with_capacity(1024),
            string_hasher: ahash::RandomState::new(),
            symbols: Vec::with_capacity(16),
            private_name_count: 0,
        };
        // The empty string must occupy slot zero; String::EMPTY_STRING
        // depends on it.
        let empty = heap.create_string("");
        assert_eq!(empty, String::EMPTY_STRING);
        for description in WellKnownSymbolIndexes::DESCRIPTIONS {
            let description = heap.create_string(description);
            heap.symbols.push(Some(SymbolHeapData {
                descriptor: Some(description),
            }));
        }
        heap
    }

    fn hash_str(&self, data: &str) -> u64 {
        let mut hasher = self.string_hasher.build_hasher();
        data.hash(&mut hasher);
        hasher.finish()
    }

    /// Get or create the interned heap string for `data`.
    pub(crate) fn create_string(&mut self, data: &str) -> String {
        let hash = self.hash_str(data);
        if let Some(bucket) = self.string_lookup.get(&hash) {
            for index in bucket {
                if &*self.strings[index.into_index()].as_ref().unwrap().data == data {
                    return String(*index);
                }
            }
        }
        self.insert_string(hash, data.into())
    }

    /// Get or create the interned heap string for an owned `data`, avoiding a
    /// copy when the string is new.
    pub(crate) fn create_string_from_owned(&mut self, data: std::string::String) -> String {
        let hash = self.hash_str(&data);
        if let Some(bucket) = self.string_lookup.get(&hash) {
            for index in bucket {
                if *self.strings[index.into_index()].as_ref().unwrap().data == *data {
                    return String(*index);
                }
            }
        }
        self.insert_string(hash, data.into_boxed_str())
    }

    fn insert_string(&mut self, hash: u64, data: Box<str>) -> String {
        self.strings.push(Some(StringHeapData { data }));
        let index = StringIndex::last(&self.strings);
        self.string_lookup.entry(hash).or_default().push(index);
        String(index)
    }

    pub(crate) fn create_private_name(&mut self) -> PrivateName {
        let name = PrivateName::from_u32(self.private_name_count);
        self.private_name_count += 1;
        name
    }
}

impl Drop for Heap {
    fn drop(&mut self) {
        // Source code allocators are leaked while the heap is alive so that
        // AST references stay valid; release them with the heap itself.
        for source_code in self.source_codes.iter_mut().flatten() {
            // SAFETY: The allocator was created by Box::leak when the source
            // was parsed and is dropped exactly once, here, after all AST
            // references are unreachable.
            unsafe { source_code.release_allocator() };
        }
    }
}

macro_rules! impl_heap_data {
    ($table: ident, $in: ty, $out: ty) => {
        impl CreateHeapData<$in, $out> for Heap {
            fn create(&mut self, data: $in) -> $out {
                self.$table.push(Some(data));
                <$out>::from(indexes::BaseIndex::last(&self.$table))
            }
        }
    };
}

impl_heap_data!(arrays, ArrayHeapData, crate::ecmascript::builtins::array::Array);
impl_heap_data!(
    array_iterators,
    ArrayIteratorHeapData,
    crate::ecmascript::builtins::indexed_collections::array_objects::array_iterator_objects::array_iterator::ArrayIterator
);
impl_heap_data!(bigints, BigIntHeapData, BigInt);
impl_heap_data!(
    bound_functions,
    BoundFunctionHeapData,
    crate::ecmascript::builtins::bound_function::BoundFunction
);
impl_heap_data!(
    builtin_constructors,
    BuiltinConstructorHeapData,
    crate::ecmascript::builtins::builtin_constructor::BuiltinConstructorFunction
);
impl_heap_data!(
    builtin_functions,
    BuiltinFunctionHeapData,
    crate::ecmascript::builtins::builtin_function::BuiltinFunction
);
impl_heap_data!(
    ecmascript_functions,
    ECMAScriptFunctionHeapData,
    crate::ecmascript::builtins::ecmascript_function::ECMAScriptFunction
);
impl_heap_data!(errors, ErrorHeapData, crate::ecmascript::builtins::error::Error);
impl_heap_data!(
    generators,
    GeneratorHeapData,
    crate::ecmascript::builtins::generator_objects::Generator
);
impl_heap_data!(
    objects,
    ObjectHeapData,
    crate::ecmascript::types::language::object::OrdinaryObject
);
impl_heap_data!(
    primitive_objects,
    PrimitiveObjectHeapData,
    crate::ecmascript::builtins::primitive_objects::PrimitiveObject
);
impl_heap_data!(sets, SetHeapData, crate::ecmascript::builtins::set::Set);
impl_heap_data!(
    set_iterators,
    SetIteratorHeapData,
    crate::ecmascript::builtins::keyed_collections::set_objects::set_iterator_objects::set_iterator::SetIterator
);
impl_heap_data!(
    source_codes,
    SourceCodeHeapData,
    crate::ecmascript::scripts_and_modules::source_code::SourceCode
);
impl_heap_data!(symbols, SymbolHeapData, Symbol);

macro_rules! impl_index_access {
    ($handle: ty, $data: ty, $table: ident, $expect: literal) => {
        impl core::ops::Index<$handle> for crate::ecmascript::execution::agent::Agent {
            type Output = $data;

            fn index(&self, index: $handle) -> &Self::Output {
                self.heap
                    .$table
                    .get(index.get_index())
                    .expect(concat!($expect, " out of bounds"))
                    .as_ref()
                    .expect(concat!($expect, " slot empty"))
            }
        }

        impl core::ops::IndexMut<$handle> for crate::ecmascript::execution::agent::Agent {
            fn index_mut(&mut self, index: $handle) -> &mut Self::Output {
                self.heap
                    .$table
                    .get_mut(index.get_index())
                    .expect(concat!($expect, " out of bounds"))
                    .as_mut()
                    .expect(concat!($expect, " slot empty"))
            }
        }
    };
}

pub(crate) use impl_index_access;
