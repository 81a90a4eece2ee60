use core::{fmt::Debug, hash::Hash, hash::Hasher, marker::PhantomData, num::NonZeroU32};

/// A typed index into one of the heap's data vectors.
///
/// The index is stored in a [`NonZeroU32`] holding the offset plus one, so
/// that `Option<BaseIndex<T>>` is still four bytes wide. A `BaseIndex` implies
/// a reference from its holder to the data at the given slot; the heap never
/// reuses slots, so indexes stay valid for the lifetime of the heap.
pub struct BaseIndex<T: ?Sized>(NonZeroU32, PhantomData<T>);

const _: () = assert!(core::mem::size_of::<BaseIndex<()>>() == core::mem::size_of::<u32>());
const _: () =
    assert!(core::mem::size_of::<Option<BaseIndex<()>>>() == core::mem::size_of::<u32>());

impl<T: ?Sized> Debug for BaseIndex<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        (self.0.get() - 1).fmt(f)
    }
}

impl<T: ?Sized> Clone for BaseIndex<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for BaseIndex<T> {}

impl<T: ?Sized> PartialEq for BaseIndex<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T: ?Sized> Eq for BaseIndex<T> {}

impl<T: ?Sized> PartialOrd for BaseIndex<T> {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: ?Sized> Ord for BaseIndex<T> {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T: ?Sized> Hash for BaseIndex<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state)
    }
}

impl<T: ?Sized> BaseIndex<T> {
    /// Creates an index from a one-based `u32`.
    ///
    /// ## Panics
    /// - If the value is equal to 0.
    pub(crate) const fn from_u32(value: u32) -> Self {
        assert!(value != 0);
        // SAFETY: Value is non-zero, checked above in const context.
        Self(unsafe { NonZeroU32::new_unchecked(value) }, PhantomData)
    }

    pub(crate) const fn from_u32_index(value: u32) -> Self {
        // SAFETY: Value + 1 cannot be zero without overflowing first.
        Self(unsafe { NonZeroU32::new_unchecked(value + 1) }, PhantomData)
    }

    pub(crate) const fn from_index(value: usize) -> Self {
        assert!(value < u32::MAX as usize);
        Self::from_u32_index(value as u32)
    }

    pub(crate) const fn into_index(self) -> usize {
        self.0.get() as usize - 1
    }

    pub(crate) const fn into_u32_index(self) -> u32 {
        self.0.get() - 1
    }

    /// The index of the most recently pushed entry in `vec`.
    pub(crate) fn last<U>(vec: &[Option<U>]) -> Self {
        assert!(!vec.is_empty());
        Self::from_index(vec.len() - 1)
    }
}

pub(crate) type ArrayIndex = BaseIndex<crate::ecmascript::builtins::array::ArrayHeapData>;
pub(crate) type ArrayIteratorIndex = BaseIndex<
    crate::ecmascript::builtins::indexed_collections::array_objects::array_iterator_objects::array_iterator::ArrayIteratorHeapData,
>;
pub(crate) type BigIntIndex =
    BaseIndex<crate::ecmascript::types::language::bigint::BigIntHeapData>;
pub(crate) type BoundFunctionIndex =
    BaseIndex<crate::ecmascript::builtins::bound_function::BoundFunctionHeapData>;
pub(crate) type BuiltinConstructorIndex =
    BaseIndex<crate::ecmascript::builtins::builtin_constructor::BuiltinConstructorHeapData>;
pub(crate) type BuiltinFunctionIndex =
    BaseIndex<crate::ecmascript::builtins::builtin_function::BuiltinFunctionHeapData>;
pub(crate) type ECMAScriptFunctionIndex =
    BaseIndex<crate::ecmascript::builtins::ecmascript_function::ECMAScriptFunctionHeapData>;
pub(crate) type ErrorIndex = BaseIndex<crate::ecmascript::builtins::error::ErrorHeapData>;
pub(crate) type GeneratorIndex =
    BaseIndex<crate::ecmascript::builtins::generator_objects::GeneratorHeapData>;
pub(crate) type ObjectIndex =
    BaseIndex<crate::ecmascript::types::language::object::data::ObjectHeapData>;
pub(crate) type PrimitiveObjectIndex =
    BaseIndex<crate::ecmascript::builtins::primitive_objects::PrimitiveObjectHeapData>;
pub(crate) type ScriptIndex =
    BaseIndex<crate::ecmascript::scripts_and_modules::script::ScriptRecord>;
pub(crate) type SetIndex = BaseIndex<crate::ecmascript::builtins::set::SetHeapData>;
pub(crate) type SetIteratorIndex = BaseIndex<
    crate::ecmascript::builtins::keyed_collections::set_objects::set_iterator_objects::set_iterator::SetIteratorHeapData,
>;
pub(crate) type SourceCodeIndex =
    BaseIndex<crate::ecmascript::scripts_and_modules::source_code::SourceCodeHeapData>;
pub(crate) type StringIndex =
    BaseIndex<crate::ecmascript::types::language::string::StringHeapData>;
pub(crate) type SymbolIndex =
    BaseIndex<crate::ecmascript::types::language::symbol::SymbolHeapData>;
