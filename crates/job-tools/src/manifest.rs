//! Tool manifest: MCP tool descriptors, the OpenAPI document and the health report.
//!
//! Everything here is derived from the static operation table, so the REST and MCP surfaces can
//! never disagree about names, parameters or defaults.

use crate::operations::{Operation, OperationDescriptor, ParamDefault, ParamKind, ParamSpec, Tag};
use rmcp::model::{JsonObject, Tool, ToolAnnotations};
use serde_json::{Map, Value, json};
use std::sync::Arc;

/// MCP tool descriptors for every operation, in table order.
#[must_use]
pub fn tools() -> Vec<Tool> {
    Operation::ALL
        .into_iter()
        .map(|op| {
            let d = op.descriptor();
            let mut tool = Tool::new(d.tool_name, d.description, Arc::new(input_schema(d)));
            tool.annotations = Some(annotations_for(d));
            tool
        })
        .collect()
}

/// JSON Schema for an operation's arguments.
///
/// `required` is only emitted when non-empty.
#[must_use]
pub fn input_schema(descriptor: &OperationDescriptor) -> JsonObject {
    let mut properties = Map::new();
    let mut required: Vec<&str> = Vec::new();
    for spec in descriptor.params {
        properties.insert(spec.name.to_string(), param_schema(spec));
        if spec.required {
            required.push(spec.name);
        }
    }

    let mut schema = Map::new();
    schema.insert("type".to_string(), json!("object"));
    schema.insert("properties".to_string(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert("required".to_string(), json!(required));
    }
    schema
}

fn param_schema(spec: &ParamSpec) -> Value {
    let mut schema = match spec.kind {
        ParamKind::String => json!({"type": "string"}),
        ParamKind::Boolean => json!({"type": "boolean"}),
        ParamKind::Integer { min, max } => {
            let mut s = json!({"type": "integer"});
            if let Some(min) = min {
                s["minimum"] = json!(min);
            }
            if let Some(max) = max {
                s["maximum"] = json!(max);
            }
            s
        }
    };
    schema["description"] = json!(spec.description);
    match spec.default {
        Some(ParamDefault::Str(s)) => schema["default"] = json!(s),
        Some(ParamDefault::Int(n)) => schema["default"] = json!(n),
        None => {}
    }
    schema
}

/// Upstream-backed tools only read from an external service; health is answered locally.
#[must_use]
pub fn annotations_for(descriptor: &OperationDescriptor) -> ToolAnnotations {
    ToolAnnotations {
        title: Some(descriptor.summary.to_string()),
        read_only_hint: Some(true),
        destructive_hint: Some(false),
        idempotent_hint: Some(true),
        open_world_hint: Some(descriptor.upstream.is_some()),
    }
}

/// Body of the health operation.
///
/// `credentials_configured` is the capitalized string `"True"`/`"False"`, which existing clients
/// compare against.
#[must_use]
pub fn health_report(credentials_configured: bool) -> Value {
    json!({
        "status": "healthy",
        "credentials_configured": if credentials_configured { "True" } else { "False" },
    })
}

/// OpenAPI 3.1 document describing the REST surface.
#[must_use]
pub fn openapi_document(title: &str, version: &str, description: &str) -> Value {
    let mut paths = Map::new();
    for op in Operation::ALL {
        let d = op.descriptor();
        paths.insert(d.route.to_string(), json!({ "get": openapi_operation(d) }));
    }

    json!({
        "openapi": "3.1.0",
        "info": {
            "title": title,
            "version": version,
            "description": description,
        },
        "tags": [
            {"name": Tag::Jobs.as_str(), "description": "Job search and labour-market data"},
            {"name": Tag::System.as_str(), "description": "Service status"},
        ],
        "paths": paths,
        "components": {
            "schemas": {
                "ErrorDetail": {
                    "type": "object",
                    "properties": {"detail": {"type": "string"}},
                    "required": ["detail"],
                }
            }
        }
    })
}

fn openapi_operation(d: &OperationDescriptor) -> Value {
    let parameters: Vec<Value> = d
        .params
        .iter()
        .map(|spec| {
            json!({
                "name": spec.name,
                "in": "query",
                "required": spec.required,
                "description": spec.description,
                "schema": param_schema(spec),
            })
        })
        .collect();

    let error = json!({
        "content": {
            "application/json": {"schema": {"$ref": "#/components/schemas/ErrorDetail"}}
        }
    });
    let mut responses = Map::new();
    responses.insert(
        "200".to_string(),
        json!({
            "description": "Successful Response",
            "content": {"application/json": {"schema": {"type": "object"}}},
        }),
    );
    if !d.params.is_empty() {
        let mut e = error.clone();
        e["description"] = json!("Validation Error");
        responses.insert("422".to_string(), e);
    }
    if d.upstream.is_some() {
        let mut e = error;
        e["description"] = json!("Upstream or configuration error");
        responses.insert("500".to_string(), e);
    }

    json!({
        "operationId": d.tool_name,
        "summary": d.summary,
        "description": d.description,
        "tags": [d.tag.as_str()],
        "parameters": parameters,
        "responses": responses,
    })
}
