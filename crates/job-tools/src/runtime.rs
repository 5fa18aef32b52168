use crate::credentials::Credentials;
use crate::error::{JobToolsError, Result};
use crate::manifest;
use crate::normalize::normalize;
use crate::operations::Operation;
use crate::redact::{redact_url, sanitize_reqwest_error};
use crate::translator::{OutboundRequest, build_request};
use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.adzuna.com/v1/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest upstream error body quoted in an error message, in characters.
const ERROR_BODY_EXCERPT_CHARS: usize = 512;

/// Where and how to reach the upstream API.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Executes job operations against the Adzuna API.
///
/// Cheap to clone; all clones share one HTTP client and one immutable credential pair.
#[derive(Clone)]
pub struct JobToolSource {
    inner: Arc<Inner>,
}

struct Inner {
    credentials: Credentials,
    base_url: Url,
    timeout: Duration,
    client: reqwest::Client,
}

impl JobToolSource {
    /// Create a tool source.
    ///
    /// Empty credentials are accepted here; upstream-backed operations then fail per call.
    ///
    /// # Errors
    ///
    /// Returns [`JobToolsError::Config`] if the base URL is invalid or the HTTP client cannot be
    /// built.
    pub fn new(credentials: Credentials, config: UpstreamConfig) -> Result<Self> {
        let base_url = Url::parse(config.base_url.trim()).map_err(|e| {
            JobToolsError::Config(format!("invalid upstream base URL '{}': {e}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(JobToolsError::Config(format!(
                "invalid upstream base URL '{}': cannot carry a path",
                config.base_url
            )));
        }

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| JobToolsError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            inner: Arc::new(Inner {
                credentials,
                base_url,
                timeout: config.timeout,
                client,
            }),
        })
    }

    #[must_use]
    pub fn credentials_configured(&self) -> bool {
        self.inner.credentials.is_configured()
    }

    #[must_use]
    pub fn list_tools(&self) -> Vec<Tool> {
        manifest::tools()
    }

    /// Translate without sending. Exposed for diagnostics and tests.
    ///
    /// # Errors
    ///
    /// See [`build_request`].
    pub fn build_request(&self, op: Operation, args: &JsonObject) -> Result<OutboundRequest> {
        build_request(
            &self.inner.base_url,
            &self.inner.credentials,
            self.inner.timeout,
            op.descriptor(),
            args,
        )
    }

    /// Run one operation and return the normalized body.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - credentials are not configured (no request is sent)
    /// - an argument fails validation (no request is sent)
    /// - the upstream call fails (transport, timeout, or non-2xx status)
    /// - the upstream body is not valid JSON of the expected shape
    pub async fn invoke(&self, op: Operation, args: &JsonObject) -> Result<Value> {
        let descriptor = op.descriptor();
        if descriptor.upstream.is_none() {
            return Ok(manifest::health_report(self.credentials_configured()));
        }

        let request = self.build_request(op, args)?;
        let body = self.send(op, &request).await?;
        normalize(descriptor.response, body)
    }

    async fn send(&self, op: Operation, request: &OutboundRequest) -> Result<Value> {
        let started = Instant::now();
        let redacted = redact_url(&request.url);

        let response = self
            .inner
            .client
            .request(request.method.clone(), request.url.clone())
            .timeout(request.timeout)
            .send()
            .await
            .map_err(|e| {
                let msg = sanitize_reqwest_error(&e);
                warn!(
                    operation = op.tool_name(),
                    url = %redacted,
                    elapsed_ms = elapsed_ms(started),
                    error = %msg,
                    "upstream request failed"
                );
                JobToolsError::Upstream(msg)
            })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            JobToolsError::Upstream(format!(
                "failed to read response body: {}",
                sanitize_reqwest_error(&e)
            ))
        })?;

        debug!(
            operation = op.tool_name(),
            url = %redacted,
            status = status.as_u16(),
            elapsed_ms = elapsed_ms(started),
            bytes = bytes.len(),
            "upstream responded"
        );

        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("Unknown");
            let excerpt = body_excerpt(&bytes);
            warn!(
                operation = op.tool_name(),
                status = status.as_u16(),
                "upstream returned error status"
            );
            return Err(JobToolsError::Upstream(format!(
                "upstream returned {} {reason}: {excerpt}",
                status.as_u16()
            )));
        }

        serde_json::from_slice(&bytes).map_err(|e| JobToolsError::Decode(e.to_string()))
    }

    /// Execute a tool call by name.
    ///
    /// Unknown tools and invalid arguments are returned as `Err` so the MCP layer can answer with
    /// a protocol error. Configuration and upstream failures are reported in-band as a
    /// `CallToolResult` with `is_error` set.
    ///
    /// # Errors
    ///
    /// Returns [`JobToolsError::UnknownTool`] or [`JobToolsError::Validation`].
    pub async fn call_tool(
        &self,
        tool_name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult> {
        let op = Operation::from_tool_name(tool_name)
            .ok_or_else(|| JobToolsError::UnknownTool(tool_name.to_string()))?;
        let arguments = arguments.unwrap_or_default();

        match self.invoke(op, &arguments).await {
            Ok(body) => {
                let text = serde_json::to_string(&body).unwrap_or_else(|_| body.to_string());
                Ok(CallToolResult::success(vec![Content::text(text)]))
            }
            Err(e) if e.is_client_error() => Err(e),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn body_excerpt(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    let text = text.trim();
    let mut out: String = text.chars().take(ERROR_BODY_EXCERPT_CHARS).collect();
    if text.chars().count() > ERROR_BODY_EXCERPT_CHARS {
        out.push_str("...");
    }
    out
}
