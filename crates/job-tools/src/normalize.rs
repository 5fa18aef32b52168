//! Response normalization.
//!
//! Adzuna decorates every JSON object with a `__CLASS__` marker naming its internal type. The
//! marker is removed at every depth before a payload leaves the gateway; search responses are
//! additionally projected down to `{count, results}`.

use crate::error::{JobToolsError, Result};
use serde_json::{Map, Value};

pub const INTERNAL_MARKER_KEY: &str = "__CLASS__";

/// Fields removed from each search result.
pub const SEARCH_DROPPED_RESULT_FIELDS: &[&str] = &["salary_min", "salary_max"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseRule {
    /// Strip internal markers, otherwise return the upstream body as-is.
    Passthrough,
    /// Strip markers, keep only `count` and `results`, drop salary fields per result.
    SearchResults,
}

/// Remove `key` from every object in the tree, in place.
pub fn strip_key_in_place(value: &mut Value, key: &str) {
    match value {
        Value::Object(map) => {
            map.remove(key);
            for v in map.values_mut() {
                strip_key_in_place(v, key);
            }
        }
        Value::Array(items) => {
            for v in items {
                strip_key_in_place(v, key);
            }
        }
        _ => {}
    }
}

/// Apply `rule` to a decoded upstream body.
///
/// Fails only for [`ResponseRule::SearchResults`] when the body is not a JSON object.
pub fn normalize(rule: ResponseRule, mut body: Value) -> Result<Value> {
    strip_key_in_place(&mut body, INTERNAL_MARKER_KEY);
    match rule {
        ResponseRule::Passthrough => Ok(body),
        ResponseRule::SearchResults => project_search(body),
    }
}

fn project_search(body: Value) -> Result<Value> {
    let Value::Object(mut map) = body else {
        return Err(JobToolsError::Decode(format!(
            "expected a JSON object for search results, got {}",
            json_type_name(&body)
        )));
    };

    let count = map.remove("count").unwrap_or_else(|| Value::from(0));
    let mut results = match map.remove("results") {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    };
    for item in &mut results {
        if let Value::Object(obj) = item {
            for field in SEARCH_DROPPED_RESULT_FIELDS {
                obj.remove(*field);
            }
        }
    }

    let mut out = Map::new();
    out.insert("count".to_string(), count);
    out.insert("results".to_string(), Value::Array(results));
    Ok(Value::Object(out))
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
