//! Local parameter validation and coercion.
//!
//! Arguments arrive either as REST query strings (always JSON strings) or as MCP tool arguments
//! (typed JSON). Both go through [`coerce`], so the two surfaces accept the same inputs.

use crate::error::{JobToolsError, Result};
use crate::operations::{ParamDefault, ParamKind, ParamSpec};
use serde_json::Value;

/// A validated parameter value, ready to be rendered into the upstream URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Bool(bool),
}

impl ParamValue {
    /// Upstream rendering. Booleans become `1`/`0`.
    #[must_use]
    pub fn to_upstream(&self) -> String {
        match self {
            Self::Str(s) => s.clone(),
            Self::Int(n) => n.to_string(),
            Self::Bool(true) => "1".to_string(),
            Self::Bool(false) => "0".to_string(),
        }
    }
}

impl From<ParamDefault> for ParamValue {
    fn from(d: ParamDefault) -> Self {
        match d {
            ParamDefault::Str(s) => Self::Str(s.to_string()),
            ParamDefault::Int(n) => Self::Int(n),
        }
    }
}

/// Validate one supplied argument against its declaration.
///
/// Returns `Ok(None)` when the caller did not supply a value: absent, JSON `null`, or a blank
/// optional string. Required parameters are rejected here; defaults are applied by the caller.
pub fn coerce(spec: &ParamSpec, raw: Option<&Value>) -> Result<Option<ParamValue>> {
    let raw = match raw {
        None | Some(Value::Null) => None,
        Some(v) => Some(v),
    };

    let Some(raw) = raw else {
        if spec.required {
            return Err(missing(spec));
        }
        return Ok(None);
    };

    let value = match spec.kind {
        ParamKind::String => ParamValue::Str(coerce_string(spec, raw)?),
        ParamKind::Integer { min, max } => ParamValue::Int(coerce_integer(spec, raw, min, max)?),
        ParamKind::Boolean => ParamValue::Bool(coerce_bool(spec, raw)?),
    };

    if let ParamValue::Str(s) = &value
        && s.trim().is_empty()
    {
        if spec.required {
            return Err(missing(spec));
        }
        return Ok(None);
    }

    Ok(Some(value))
}

fn missing(spec: &ParamSpec) -> JobToolsError {
    JobToolsError::Validation(format!("Missing required parameter: {}", spec.name))
}

fn invalid(spec: &ParamSpec, expected: &str) -> JobToolsError {
    JobToolsError::Validation(format!(
        "Invalid parameter '{}': must be {expected}",
        spec.name
    ))
}

fn coerce_string(spec: &ParamSpec, raw: &Value) -> Result<String> {
    match raw {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(invalid(spec, "a string")),
    }
}

fn coerce_integer(
    spec: &ParamSpec,
    raw: &Value,
    min: Option<i64>,
    max: Option<i64>,
) -> Result<i64> {
    let n = match raw {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or_else(|| invalid(spec, "an integer"))?;

    if let Some(min) = min
        && n < min
    {
        return Err(JobToolsError::Validation(format!(
            "Invalid parameter '{}': must be greater than or equal to {min}",
            spec.name
        )));
    }
    if let Some(max) = max
        && n > max
    {
        return Err(JobToolsError::Validation(format!(
            "Invalid parameter '{}': must be less than or equal to {max}",
            spec.name
        )));
    }
    Ok(n)
}

fn coerce_bool(spec: &ParamSpec, raw: &Value) -> Result<bool> {
    match raw {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Ok(true),
            Some(0) => Ok(false),
            _ => Err(invalid(spec, "a boolean")),
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(invalid(spec, "a boolean")),
        },
        _ => Err(invalid(spec, "a boolean")),
    }
}
