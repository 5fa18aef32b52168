//! Adzuna job-search gateway.
//!
//! Mounts the operations from `adzuna-job-tools` twice: as plain REST routes returning JSON, and
//! as MCP tools behind a streamable-HTTP endpoint at `/mcp`.

pub mod config;
pub mod http;
pub mod mcp;

use adzuna_job_tools::JobToolSource;
use axum::Router;
use tokio_util::sync::CancellationToken;

/// Title reported in the OpenAPI document.
pub const API_TITLE: &str = "Adzuna Job Search API";
/// Version of the REST contract (independent of the crate version).
pub const API_VERSION: &str = "1.0.0";
pub const API_DESCRIPTION: &str =
    "MCP server for searching and retrieving job listings from Adzuna";

/// MCP `serverInfo.name`.
pub const SERVER_NAME: &str = "adzuna-mcp-gateway";

#[derive(Clone)]
pub struct AppState {
    pub tools: JobToolSource,
    /// Cancelled on shutdown; closes open MCP sessions and their streams.
    pub shutdown: CancellationToken,
}

impl AppState {
    #[must_use]
    pub fn new(tools: JobToolSource) -> Self {
        Self {
            tools,
            shutdown: CancellationToken::new(),
        }
    }
}

/// Full application router: REST routes, OpenAPI document, MCP endpoint.
pub fn router(state: AppState) -> Router {
    let mcp = mcp::service(state.tools.clone(), state.shutdown.clone());
    http::routes()
        .nest_service("/mcp", mcp)
        .fallback(http::not_found)
        .with_state(state)
}
