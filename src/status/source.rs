use serde_json::Value;

use crate::record::Record;

/// What a node in a value graph looks like to the resolver.
pub enum Shape<'a, N> {
    Text(&'a str),
    Sequence(Vec<N>),
    /// Field values in insertion order. Keys are never inspected.
    Mapping(Vec<N>),
    /// Numbers, booleans, null.
    Other,
}

/// A value graph the resolver can walk.
///
/// Implemented for [`JsonNode`]; hosts with their own shared or cyclic
/// structures can implement it directly and call
/// [`StatusResolver::resolve_source`](super::StatusResolver::resolve_source).
pub trait StatusSource: Sized {
    fn shape(&self) -> Shape<'_, Self>;

    /// Direct field lookup on a mapping. `None` for anything else.
    fn field(&self, name: &str) -> Option<Self>;

    /// Address-like identity. Two handles to the same node must agree.
    fn identity(&self) -> usize;
}

/// Borrowed view over JSON input: a bare string, any JSON value, or a record.
#[derive(Debug, Clone, Copy)]
pub enum JsonNode<'v> {
    Text(&'v str),
    Value(&'v Value),
    Object(&'v Record),
}

impl<'v> From<&'v str> for JsonNode<'v> {
    fn from(text: &'v str) -> Self {
        JsonNode::Text(text)
    }
}

impl<'v> From<&'v String> for JsonNode<'v> {
    fn from(text: &'v String) -> Self {
        JsonNode::Text(text)
    }
}

impl<'v> From<&'v Value> for JsonNode<'v> {
    fn from(value: &'v Value) -> Self {
        JsonNode::Value(value)
    }
}

impl<'v> From<&'v Record> for JsonNode<'v> {
    fn from(record: &'v Record) -> Self {
        JsonNode::Object(record)
    }
}

fn mapping<'v>(map: &'v Record) -> Vec<JsonNode<'v>> {
    map.values().map(JsonNode::Value).collect()
}

impl<'v> StatusSource for JsonNode<'v> {
    fn shape(&self) -> Shape<'_, Self> {
        match *self {
            JsonNode::Text(text) => Shape::Text(text),
            JsonNode::Object(map) => Shape::Mapping(mapping(map)),
            JsonNode::Value(value) => match value {
                Value::String(text) => Shape::Text(text),
                Value::Array(items) => Shape::Sequence(items.iter().map(JsonNode::Value).collect()),
                Value::Object(map) => Shape::Mapping(mapping(map)),
                Value::Null | Value::Bool(_) | Value::Number(_) => Shape::Other,
            },
        }
    }

    fn field(&self, name: &str) -> Option<Self> {
        let map = match *self {
            JsonNode::Object(map) => map,
            JsonNode::Value(Value::Object(map)) => map,
            _ => return None,
        };
        map.get(name).map(JsonNode::Value)
    }

    fn identity(&self) -> usize {
        match *self {
            JsonNode::Text(text) => text.as_ptr() as usize,
            JsonNode::Value(value) => value as *const Value as usize,
            JsonNode::Object(map) => map as *const Record as usize,
        }
    }
}
