use super::property_key::PropertyKey;
use crate::ecmascript::types::{
    language::{function::Function, value::Value},
    spec::property_descriptor::PropertyDescriptor,
};

/// One fully populated own property.
#[derive(Debug, Clone, Copy)]
pub(crate) enum PropertyData {
    Data {
        value: Value,
        writable: bool,
        enumerable: bool,
        configurable: bool,
    },
    Accessor {
        get: Option<Function>,
        set: Option<Function>,
        enumerable: bool,
        configurable: bool,
    },
}

impl PropertyData {
    pub(crate) fn is_enumerable(&self) -> bool {
        match self {
            PropertyData::Data { enumerable, .. } | PropertyData::Accessor { enumerable, .. } => {
                *enumerable
            }
        }
    }

    pub(crate) fn is_configurable(&self) -> bool {
        match self {
            PropertyData::Data { configurable, .. }
            | PropertyData::Accessor { configurable, .. } => *configurable,
        }
    }

    /// The fully populated Property Descriptor for this property.
    pub(crate) fn descriptor(&self) -> PropertyDescriptor {
        match *self {
            PropertyData::Data {
                value,
                writable,
                enumerable,
                configurable,
            } => PropertyDescriptor {
                value: Some(value),
                writable: Some(writable),
                get: None,
                set: None,
                enumerable: Some(enumerable),
                configurable: Some(configurable),
            },
            PropertyData::Accessor {
                get,
                set,
                enumerable,
                configurable,
            } => PropertyDescriptor {
                value: None,
                writable: None,
                get: Some(get),
                set: Some(set),
                enumerable: Some(enumerable),
                configurable: Some(configurable),
            },
        }
    }

    /// Build property data from a fully populated descriptor. Panics if the
    /// descriptor is not fully populated; ValidateAndApplyPropertyDescriptor
    /// completes descriptors before installing them.
    pub(crate) fn from_descriptor(descriptor: PropertyDescriptor) -> Self {
        if descriptor.is_accessor_descriptor() {
            PropertyData::Accessor {
                get: descriptor.get.unwrap_or(None),
                set: descriptor.set.unwrap_or(None),
                enumerable: descriptor.enumerable.unwrap(),
                configurable: descriptor.configurable.unwrap(),
            }
        } else {
            PropertyData::Data {
                value: descriptor.value.unwrap(),
                writable: descriptor.writable.unwrap(),
                enumerable: descriptor.enumerable.unwrap(),
                configurable: descriptor.configurable.unwrap(),
            }
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct PropertyEntry {
    pub(crate) key: PropertyKey,
    pub(crate) data: PropertyData,
}

/// The own-property map: insertion-ordered entries with the integer keys
/// surfaced in ascending numeric order by [`PropertyStorage::keys`], per the
/// OwnPropertyKeys ordering contract.
#[derive(Debug, Clone, Default)]
pub(crate) struct PropertyStorage {
    entries: Vec<PropertyEntry>,
}

impl PropertyStorage {
    pub(crate) fn get(&self, key: PropertyKey) -> Option<&PropertyData> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.data)
    }

    pub(crate) fn get_mut(&mut self, key: PropertyKey) -> Option<&mut PropertyData> {
        self.entries
            .iter_mut()
            .find(|entry| entry.key == key)
            .map(|entry| &mut entry.data)
    }

    pub(crate) fn contains_key(&self, key: PropertyKey) -> bool {
        self.get(key).is_some()
    }

    /// Install or replace a property. Replacement keeps the original
    /// insertion position.
    pub(crate) fn set(&mut self, key: PropertyKey, data: PropertyData) {
        debug_assert!(!matches!(key, PropertyKey::PrivateName(_)));
        if let Some(slot) = self.get_mut(key) {
            *slot = data;
        } else {
            self.entries.push(PropertyEntry { key, data });
        }
    }

    pub(crate) fn remove(&mut self, key: PropertyKey) -> bool {
        if let Some(position) = self.entries.iter().position(|entry| entry.key == key) {
            self.entries.remove(position);
            true
        } else {
            false
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = &PropertyEntry> {
        self.entries.iter()
    }

    /// Own keys in the specification order: array indices in ascending
    /// numeric order, then strings in insertion order, then symbols in
    /// insertion order.
    pub(crate) fn keys(&self) -> Vec<PropertyKey> {
        let mut integer_keys: Vec<u32> = Vec::new();
        let mut string_keys: Vec<PropertyKey> = Vec::new();
        let mut symbol_keys: Vec<PropertyKey> = Vec::new();
        for entry in &self.entries {
            match entry.key {
                PropertyKey::Integer(index) => integer_keys.push(index),
                PropertyKey::String(_) => string_keys.push(entry.key),
                PropertyKey::Symbol(_) => symbol_keys.push(entry.key),
                PropertyKey::PrivateName(_) => unreachable!(),
            }
        }
        integer_keys.sort_unstable();
        let mut keys = Vec::with_capacity(self.entries.len());
        keys.extend(integer_keys.into_iter().map(PropertyKey::Integer));
        keys.extend(string_keys);
        keys.extend(symbol_keys);
        keys
    }

    /// Array index keys at or above `from`, in descending order. Used by
    /// ArraySetLength's truncation loop.
    pub(crate) fn array_index_keys_from(&self, from: u32) -> Vec<u32> {
        let mut keys: Vec<u32> = self
            .entries
            .iter()
            .filter_map(|entry| match entry.key {
                PropertyKey::Integer(index) if index >= from => Some(index),
                _ => None,
            })
            .collect();
        keys.sort_unstable_by(|a, b| b.cmp(a));
        keys
    }

    /// The largest array index key, if any.
    pub(crate) fn largest_array_index(&self) -> Option<u32> {
        self.entries
            .iter()
            .filter_map(|entry| match entry.key {
                PropertyKey::Integer(index) => Some(index),
                _ => None,
            })
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(value: Value) -> PropertyData {
        PropertyData::Data {
            value,
            writable: true,
            enumerable: true,
            configurable: true,
        }
    }

    #[test]
    fn keys_order_integers_first_then_insertion_order() {
        let mut storage = PropertyStorage::default();
        storage.set(PropertyKey::Integer(2), data(Value::Undefined));
        storage.set(PropertyKey::Integer(0), data(Value::Undefined));
        storage.set(PropertyKey::Integer(1), data(Value::Undefined));
        assert_eq!(
            storage.keys(),
            vec![
                PropertyKey::Integer(0),
                PropertyKey::Integer(1),
                PropertyKey::Integer(2),
            ]
        );
    }

    #[test]
    fn replacement_keeps_insertion_position() {
        let mut storage = PropertyStorage::default();
        storage.set(PropertyKey::Integer(7), data(Value::Undefined));
        storage.set(PropertyKey::Integer(7), data(Value::Null));
        assert_eq!(storage.len(), 1);
        assert!(matches!(
            storage.get(PropertyKey::Integer(7)),
            Some(PropertyData::Data {
                value: Value::Null,
                ..
            })
        ));
    }
}
