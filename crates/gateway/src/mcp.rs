//! MCP over streamable HTTP at `/mcp`.
//!
//! [`JobToolsServer`] answers the tool capability from the shared [`JobToolSource`]; rmcp's
//! [`StreamableHttpService`] owns the transport, sessions and protocol-version negotiation.

use crate::SERVER_NAME;
use adzuna_job_tools::JobToolSource;
use rmcp::model::{
    CallToolRequestParams, CallToolResult, Implementation, ListToolsResult,
    PaginatedRequestParams, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::RequestContext;
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::streamable_http_server::{StreamableHttpServerConfig, StreamableHttpService};
use rmcp::{ErrorData, RoleServer, ServerHandler};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub const INSTRUCTIONS: &str = "Search Adzuna job listings and labour-market statistics. \
    Every tool forwards its arguments to the Adzuna API; call health_check to see whether \
    credentials are configured.";

/// One instance per MCP session; all of them share the same tool source.
#[derive(Clone)]
pub struct JobToolsServer {
    tools: JobToolSource,
}

impl JobToolsServer {
    #[must_use]
    pub fn new(tools: JobToolSource) -> Self {
        Self { tools }
    }
}

impl ServerHandler for JobToolsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::default()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
            ..ServerInfo::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult {
            tools: self.tools.list_tools(),
            ..Default::default()
        })
    }

    fn get_tool(&self, name: &str) -> Option<Tool> {
        self.tools.list_tools().into_iter().find(|t| t.name == name)
    }

    /// Unknown tools and bad arguments are protocol errors; upstream and credential failures
    /// come back as `isError` results.
    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let name = request.name.as_ref();
        match self.tools.call_tool(name, request.arguments).await {
            Ok(result) => {
                if result.is_error == Some(true) {
                    warn!(tool = name, "tool call failed");
                }
                Ok(result)
            }
            Err(e) => {
                debug!(tool = name, error = %e, "tool call rejected");
                Err(ErrorData::invalid_params(e.to_string(), None))
            }
        }
    }
}

/// Tower service to nest at `/mcp`. Cancelling `shutdown` closes every open session.
pub fn service(
    tools: JobToolSource,
    shutdown: CancellationToken,
) -> StreamableHttpService<JobToolsServer, LocalSessionManager> {
    let config = StreamableHttpServerConfig {
        cancellation_token: shutdown,
        ..StreamableHttpServerConfig::default()
    };
    StreamableHttpService::new(
        move || Ok(JobToolsServer::new(tools.clone())),
        Arc::new(LocalSessionManager::default()),
        config,
    )
}
