#![allow(dead_code)]

use adzuna_job_tools::{Credentials, JobToolSource, UpstreamConfig};
use adzuna_mcp_gateway::{AppState, router};
use anyhow::Context as _;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

pub fn test_credentials() -> Credentials {
    Credentials::new("test-id", "test-key")
}

/// In-process gateway bound to an ephemeral port. Stops when dropped.
pub struct Gateway {
    pub base_url: String,
    shutdown: Option<oneshot::Sender<()>>,
    sessions: CancellationToken,
}

impl Gateway {
    pub async fn start(upstream_base_url: &str, credentials: Credentials) -> anyhow::Result<Self> {
        let tools = JobToolSource::new(
            credentials,
            UpstreamConfig {
                base_url: upstream_base_url.to_string(),
                timeout: Duration::from_secs(5),
            },
        )
        .context("build job tools")?;
        let state = AppState::new(tools);
        let sessions = state.shutdown.clone();
        let app = router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("bind gateway")?;
        let addr = listener.local_addr()?;
        let (tx, rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = rx.await;
                })
                .await;
        });

        Ok(Self {
            base_url: format!("http://{addr}"),
            shutdown: Some(tx),
            sessions,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET a path and return status + parsed JSON body.
    pub async fn get_json(&self, path_and_query: &str) -> anyhow::Result<(u16, Value)> {
        let resp = reqwest::Client::new()
            .get(self.url(path_and_query))
            .send()
            .await
            .with_context(|| format!("GET {path_and_query}"))?;
        let status = resp.status().as_u16();
        let body: Value = resp.json().await.context("response json")?;
        Ok((status, body))
    }
}

impl Drop for Gateway {
    fn drop(&mut self) {
        self.sessions.cancel();
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

pub const SESSION_HEADER: &str = "mcp-session-id";

/// One HTTP exchange with `/mcp`: status, session header and every JSON-RPC message in the body.
pub struct McpReply {
    pub status: u16,
    pub session_id: Option<String>,
    pub messages: Vec<Value>,
}

/// Streamable-HTTP MCP client: JSON bodies in, JSON or SSE bodies out.
pub struct McpClient {
    client: reqwest::Client,
    uri: String,
    session_id: Option<String>,
    next_id: AtomicI64,
}

impl McpClient {
    /// Client without a session; call [`McpClient::initialize`] before other requests.
    pub fn new(gateway: &Gateway) -> Self {
        Self {
            client: reqwest::Client::new(),
            uri: gateway.url("/mcp"),
            session_id: None,
            next_id: AtomicI64::new(1),
        }
    }

    /// New client with a finished initialize handshake.
    pub async fn connect(gateway: &Gateway) -> anyhow::Result<Self> {
        let mut client = Self::new(gateway);
        client.initialize("2025-03-26").await?;
        Ok(client)
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// `initialize` then `notifications/initialized`; returns the initialize response.
    pub async fn initialize(&mut self, protocol_version: &str) -> anyhow::Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let msg = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "initialize",
            "params": {
                "protocolVersion": protocol_version,
                "capabilities": {},
                "clientInfo": {"name": "adzuna-gateway-tests", "version": "0"}
            }
        });
        let reply = self.post(msg.to_string()).await?;
        anyhow::ensure!(reply.status == 200, "initialize status {}", reply.status);
        self.session_id = Some(reply.session_id.context("initialize returned no session id")?);
        let response = reply
            .messages
            .into_iter()
            .find(|m| m["id"] == json!(id))
            .context("initialize response missing")?;

        let ack = self
            .post(json!({"jsonrpc": "2.0", "method": "notifications/initialized"}).to_string())
            .await?;
        anyhow::ensure!(ack.status == 202, "initialized status {}", ack.status);
        Ok(response)
    }

    /// POST a raw body, with the session header once one is known.
    pub async fn post(&self, body: impl Into<String>) -> anyhow::Result<McpReply> {
        let mut req = self
            .client
            .post(&self.uri)
            .header("content-type", "application/json")
            .header("accept", "application/json, text/event-stream")
            .body(body.into());
        if let Some(session_id) = &self.session_id {
            req = req.header(SESSION_HEADER, session_id);
        }
        let resp = req.send().await.context("POST /mcp")?;
        let status = resp.status().as_u16();
        let session_id = resp
            .headers()
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let is_sse = resp
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("text/event-stream"));
        let text = resp.text().await.context("read body")?;
        let messages = if is_sse {
            sse_messages(&text)?
        } else {
            serde_json::from_str::<Value>(&text).into_iter().collect()
        };
        Ok(McpReply {
            status,
            session_id,
            messages,
        })
    }

    /// Send a request with a fresh id and return its JSON-RPC response.
    pub async fn request(&self, method: &str, params: Value) -> anyhow::Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let msg = json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params});
        let reply = self.post(msg.to_string()).await?;
        anyhow::ensure!(reply.status == 200, "unexpected status {}", reply.status);
        reply
            .messages
            .into_iter()
            .find(|m| m["id"] == json!(id))
            .with_context(|| format!("no response for {method} (id {id})"))
    }

    /// `tools/call` and return the `result` object.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> anyhow::Result<Value> {
        let resp = self
            .request("tools/call", json!({"name": name, "arguments": arguments}))
            .await?;
        resp.get("result")
            .cloned()
            .with_context(|| format!("tools/call returned no result: {resp}"))
    }
}

/// JSON payloads of an SSE body; priming events and keep-alive comments carry none.
fn sse_messages(text: &str) -> anyhow::Result<Vec<Value>> {
    text.lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(str::trim)
        .filter(|data| !data.is_empty())
        .map(|data| serde_json::from_str(data).context("sse data is json"))
        .collect()
}

/// Parse `result.content[0].text` of a tool result as JSON.
pub fn tool_result_json(result: &Value) -> anyhow::Result<Value> {
    let text = result
        .get("content")
        .and_then(Value::as_array)
        .and_then(|c| c.first())
        .and_then(|c| c.get("text"))
        .and_then(Value::as_str)
        .context("tools/call missing result.content[0].text")?;
    serde_json::from_str(text).context("tool text is json")
}

pub fn tool_result_text(result: &Value) -> anyhow::Result<String> {
    result
        .get("content")
        .and_then(Value::as_array)
        .and_then(|c| c.first())
        .and_then(|c| c.get("text"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .context("tools/call missing result.content[0].text")
}
