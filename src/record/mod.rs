//! Records - opaque field maps as they arrive from the query layer.

use serde_json::{Map, Number, Value};
use std::fmt;

/// A record is an opaque mapping of field name to JSON value.
pub type Record = Map<String, Value>;

/// Identity of a record inside a cache.
///
/// Keys compare by kind and value, so `1` and `"1"` are different records.
/// Numbers are held in a canonical text form where integral values print
/// without a fraction, so `1` and `1.0` are the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordKey {
    Number(String),
    Text(String),
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKey::Number(n) => write!(f, "{}", n),
            RecordKey::Text(s) => write!(f, "{:?}", s),
        }
    }
}

/// Extract the identity key of a record from `key_field`.
///
/// Only strings and numbers qualify; anything else (including absence) yields `None`.
pub fn record_key(record: &Record, key_field: &str) -> Option<RecordKey> {
    match record.get(key_field)? {
        Value::Number(n) => Some(RecordKey::Number(canonical_number(n))),
        Value::String(s) => Some(RecordKey::Text(s.clone())),
        _ => None,
    }
}

fn canonical_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
            (f as i64).to_string()
        }
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// Stringify a field for free-text matching. Absent and null fields are empty.
pub fn field_text(record: &Record, field: &str) -> String {
    match record.get(field) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Collect the object elements of a JSON array into records.
///
/// Non-array input yields no records; non-object elements are dropped.
pub fn records_from(value: Value) -> Vec<Record> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}
