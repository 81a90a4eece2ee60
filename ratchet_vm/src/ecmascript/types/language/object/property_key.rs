use crate::ecmascript::{
    execution::agent::Agent,
    types::{
        language::{string::String, symbol::Symbol, value::Value},
        spec::private_name::PrivateName,
    },
    abstract_operations::type_conversion::parse_string_to_integer_property_key,
};
use crate::heap::WellKnownSymbolIndexes;

/// A property key: a String or a Symbol, with array-index strings kept in
/// canonical integer form so that integer keys can be recognized and ordered
/// without string parsing. Private Names travel as property keys through the
/// reference machinery but never enter ordinary property storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    /// A string key whose canonical uint32 round-trip equals itself and whose
    /// value is below 2³²−1: an array index.
    Integer(u32),
    String(String),
    Symbol(Symbol),
    PrivateName(PrivateName),
}

impl PropertyKey {
    /// Create a string property key, canonicalizing array-index strings.
    pub fn from_str(agent: &mut Agent, data: &str) -> PropertyKey {
        if let Some(key) = parse_string_to_integer_property_key(data) {
            return key;
        }
        PropertyKey::String(String::from_str(agent, data))
    }

    pub(crate) fn from_string(agent: &mut Agent, data: std::string::String) -> PropertyKey {
        if let Some(key) = parse_string_to_integer_property_key(&data) {
            return key;
        }
        PropertyKey::String(String::from_string(agent, data))
    }

    /// Whether this key is an array index (string form of a uint32 below
    /// 2³²−1).
    pub(crate) fn is_array_index(self) -> bool {
        matches!(self, PropertyKey::Integer(_))
    }

    /// The key as a language value, converting canonical integers back to
    /// their string form. Panics on private names, which are not values.
    pub(crate) fn into_value(self, agent: &mut Agent) -> Value {
        match self {
            PropertyKey::Integer(data) => {
                Value::String(String::from_string(agent, data.to_string()))
            }
            PropertyKey::String(data) => Value::String(data),
            PropertyKey::Symbol(data) => Value::Symbol(data),
            PropertyKey::PrivateName(_) => unreachable!("private name used as a language value"),
        }
    }

    /// A display form for diagnostics and error messages.
    pub(crate) fn to_display_string(self, agent: &Agent) -> std::string::String {
        match self {
            PropertyKey::Integer(data) => data.to_string(),
            PropertyKey::String(data) => data.as_str(agent).to_owned(),
            PropertyKey::Symbol(data) => {
                if let Some(descriptor) = agent[data].descriptor {
                    format!("Symbol({})", descriptor.as_str(agent))
                } else {
                    "Symbol()".to_owned()
                }
            }
            PropertyKey::PrivateName(name) => {
                if let Some(description) = name.get_description(agent) {
                    format!("#{}", description.as_str(agent))
                } else {
                    "#<private>".to_owned()
                }
            }
        }
    }
}

impl From<String> for PropertyKey {
    fn from(value: String) -> Self {
        // Interned strings that look like array indices must still be
        // canonicalized by the caller through PropertyKey::from_str; a plain
        // String conversion is only valid for known non-index names.
        PropertyKey::String(value)
    }
}

impl From<Symbol> for PropertyKey {
    fn from(value: Symbol) -> Self {
        PropertyKey::Symbol(value)
    }
}

impl From<PrivateName> for PropertyKey {
    fn from(value: PrivateName) -> Self {
        PropertyKey::PrivateName(value)
    }
}

impl From<WellKnownSymbolIndexes> for PropertyKey {
    fn from(value: WellKnownSymbolIndexes) -> Self {
        PropertyKey::Symbol(value.to_symbol())
    }
}
