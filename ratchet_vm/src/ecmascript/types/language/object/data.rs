use super::{property_storage::PropertyStorage, Object};
use crate::ecmascript::types::spec::private_name::PrivateElement;

/// The heap data of an ordinary object (and of the backing object carrying
/// an exotic object's ordinary properties).
#[derive(Debug, Clone)]
pub struct ObjectHeapData {
    /// ### \[\[Extensible\]\]
    pub(crate) extensible: bool,
    /// ### \[\[Prototype\]\]
    pub(crate) prototype: Option<Object>,
    /// The insertion-ordered own property map.
    pub(crate) storage: PropertyStorage,
    /// ### \[\[PrivateElements\]\]
    ///
    /// Private fields, methods and accessors stamped onto this object,
    /// keyed by Private Name identity.
    pub(crate) private_elements: Vec<PrivateElement>,
}

impl ObjectHeapData {
    pub(crate) fn new(prototype: Option<Object>) -> Self {
        Self {
            extensible: true,
            prototype,
            storage: PropertyStorage::default(),
            private_elements: Vec::new(),
        }
    }
}
