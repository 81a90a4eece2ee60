pub mod language;
pub mod spec;

pub use language::{
    bigint::BigInt,
    function::{Function, IntoFunction},
    object::{
        internal_methods::InternalMethods, internal_slots::InternalSlots,
        property_key::PropertyKey, IntoObject, Object, OrdinaryObject,
    },
    string::String,
    symbol::Symbol,
    value::{IntoValue, Value},
};
pub use spec::{
    private_name::{PrivateElement, PrivateElementKind, PrivateName},
    property_descriptor::PropertyDescriptor,
    reference::{Base, Reference},
};
