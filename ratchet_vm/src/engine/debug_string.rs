//! Inspection printing for values: cycle-tolerant, depth-bounded, and
//! side-effect free (accessors are shown, not invoked).

use crate::ecmascript::{
    builtins::primitive_objects::PrimitiveObjectData,
    execution::agent::Agent,
    types::{
        language::{
            number::number_to_std_string,
            object::{
                internal_slots::InternalSlots, property_key::PropertyKey,
                property_storage::PropertyData, Object,
            },
            value::Value,
        },
    },
};

/// Render `value` for diagnostics, descending at most `depth` levels into
/// object graphs.
pub fn debug_string(agent: &mut Agent, value: Value, depth: u32) -> std::string::String {
    let mut seen = Vec::new();
    render(agent, value, depth, &mut seen)
}

fn render(
    agent: &mut Agent,
    value: Value,
    depth: u32,
    seen: &mut Vec<Object>,
) -> std::string::String {
    match value {
        Value::Undefined => "undefined".to_owned(),
        Value::Null => "null".to_owned(),
        Value::Boolean(true) => "true".to_owned(),
        Value::Boolean(false) => "false".to_owned(),
        Value::Number(n) => {
            // Debug output distinguishes negative zero.
            if n == 0.0 && n.is_sign_negative() {
                "-0".to_owned()
            } else {
                number_to_std_string(n)
            }
        }
        Value::BigInt(b) => format!("{}n", agent[b].data),
        Value::String(s) => format!("'{}'", s.as_str(agent)),
        Value::Symbol(s) => {
            let string = s.descriptive_string(agent);
            string.as_str(agent).to_owned()
        }
        Value::Error(e) => {
            let kind = format!("{:?}", agent[e].kind);
            match agent[e].message {
                Some(message) => format!("{}: {}", kind, message.as_str(agent)),
                None => kind,
            }
        }
        Value::BoundFunction(_)
        | Value::BuiltinFunction(_)
        | Value::BuiltinConstructorFunction(_)
        | Value::ECMAScriptFunction(_) => render_function(agent, value),
        Value::Generator(_) => "[object Generator]".to_owned(),
        Value::PrimitiveObject(o) => {
            let inner = match agent[o].data {
                PrimitiveObjectData::Boolean(b) => b.to_string(),
                PrimitiveObjectData::Number(n) => number_to_std_string(n),
                PrimitiveObjectData::String(s) => format!("'{}'", s.as_str(agent)),
                PrimitiveObjectData::Symbol(_) => "Symbol()".to_owned(),
                PrimitiveObjectData::BigInt(b) => format!("{}n", agent[b].data),
            };
            format!("[{}]", inner)
        }
        Value::Array(array) => {
            let object = Object::Array(array);
            if depth == 0 || seen.contains(&object) {
                return "[Array]".to_owned();
            }
            seen.push(object);
            let len = array.len(agent);
            let mut parts = Vec::new();
            for index in 0..len.min(16) {
                let element = own_data_value(agent, object, PropertyKey::Integer(index));
                parts.push(match element {
                    Some(element) => render(agent, element, depth - 1, seen),
                    None => "<empty>".to_owned(),
                });
            }
            if len > 16 {
                parts.push(format!("... {} more", len - 16));
            }
            seen.pop();
            format!("[ {} ]", parts.join(", "))
        }
        Value::Set(set) => {
            let size = set.size(agent);
            format!("Set({})", size)
        }
        Value::ArrayIterator(_) => "[object Array Iterator]".to_owned(),
        Value::SetIterator(_) => "[object Set Iterator]".to_owned(),
        Value::Object(_) => {
            let object = Object::try_from(value).unwrap();
            if depth == 0 || seen.contains(&object) {
                return "[Object]".to_owned();
            }
            seen.push(object);
            let keys = object
                .get_backing_object(agent)
                .map(|backing| agent[backing].storage.keys())
                .unwrap_or_default();
            let mut parts = Vec::new();
            for key in keys.into_iter().take(16) {
                let name = key.to_display_string(agent);
                match own_data_value(agent, object, key) {
                    Some(value) => {
                        let rendered = render(agent, value, depth - 1, seen);
                        parts.push(format!("{}: {}", name, rendered));
                    }
                    None => parts.push(format!("{}: [Getter/Setter]", name)),
                }
            }
            seen.pop();
            if parts.is_empty() {
                "{}".to_owned()
            } else {
                format!("{{ {} }}", parts.join(", "))
            }
        }
    }
}

fn render_function(agent: &mut Agent, value: Value) -> std::string::String {
    let name_key = PropertyKey::from_str(agent, "name");
    let object = Object::try_from(value).unwrap();
    let name = own_data_value(agent, object, name_key);
    match name {
        Some(Value::String(name)) if !name.is_empty(agent) => {
            format!("[Function: {}]", name.as_str(agent))
        }
        _ => "[Function (anonymous)]".to_owned(),
    }
}

/// An own data property's value, without running accessors.
fn own_data_value(agent: &mut Agent, object: Object, key: PropertyKey) -> Option<Value> {
    let backing = object.get_backing_object(agent)?;
    match agent[backing].storage.get(key)? {
        PropertyData::Data { value, .. } => Some(*value),
        _ => None,
    }
}
