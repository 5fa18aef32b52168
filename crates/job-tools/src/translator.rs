//! Request translation: local arguments to one outbound upstream GET.

use crate::credentials::Credentials;
use crate::error::{JobToolsError, Result};
use crate::operations::{OperationDescriptor, ParamLocation, PathSegment};
use crate::params::{ParamValue, coerce};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// A fully-formed upstream request. Built per call, never retained.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: reqwest::Method,
    pub url: Url,
    pub timeout: Duration,
}

/// Build the upstream request for `descriptor` from caller-supplied `args`.
///
/// # Errors
///
/// - [`JobToolsError::CredentialsMissing`] if either credential is empty (checked first).
/// - [`JobToolsError::Validation`] for missing or malformed parameters.
/// - [`JobToolsError::Config`] if the operation has no upstream call or the base URL cannot
///   carry path segments.
pub fn build_request(
    base_url: &Url,
    credentials: &Credentials,
    timeout: Duration,
    descriptor: &OperationDescriptor,
    args: &Map<String, Value>,
) -> Result<OutboundRequest> {
    if !credentials.is_configured() {
        return Err(JobToolsError::CredentialsMissing);
    }

    let Some(upstream) = descriptor.upstream else {
        return Err(JobToolsError::Config(format!(
            "operation '{}' has no upstream call",
            descriptor.tool_name
        )));
    };

    for key in args.keys() {
        if descriptor.param(key).is_none() {
            debug!(
                operation = descriptor.tool_name,
                param = %key,
                "ignoring undeclared parameter"
            );
        }
    }

    let mut path_values: HashMap<&str, String> = HashMap::new();
    let mut query_values: Vec<(&str, String)> = Vec::new();
    for spec in descriptor.params {
        let value =
            coerce(spec, args.get(spec.name))?.or_else(|| spec.default.map(ParamValue::from));
        let Some(value) = value else {
            continue;
        };
        match spec.location {
            ParamLocation::Path => {
                path_values.insert(spec.upstream_name, value.to_upstream());
            }
            ParamLocation::Query => query_values.push((spec.upstream_name, value.to_upstream())),
        }
    }

    let mut url = base_url.clone();
    {
        let mut segments = url.path_segments_mut().map_err(|()| {
            JobToolsError::Config(format!("base URL cannot carry a path: {base_url}"))
        })?;
        segments.pop_if_empty();
        for seg in upstream.path {
            match seg {
                PathSegment::Literal(s) => {
                    segments.push(s);
                }
                PathSegment::Param(name) => {
                    let value = path_values.get(name).ok_or_else(|| {
                        JobToolsError::Config(format!(
                            "operation '{}' has no value for path segment '{name}'",
                            descriptor.tool_name
                        ))
                    })?;
                    segments.push(value);
                }
            }
        }
    }

    url.set_query(None);
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("app_id", credentials.app_id());
        query.append_pair("app_key", credentials.app_key());
        for (k, v) in upstream.fixed_query {
            query.append_pair(k, v);
        }
        for (k, v) in &query_values {
            query.append_pair(k, v);
        }
    }

    Ok(OutboundRequest {
        method: reqwest::Method::GET,
        url,
        timeout,
    })
}
