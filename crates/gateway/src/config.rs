use adzuna_job_tools::UpstreamConfig;
use adzuna_job_tools::runtime::DEFAULT_BASE_URL;
use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// Command-line and environment configuration for the gateway binary.
///
/// Credentials are not flags; they come from `ADZUNA_APP_ID` / `ADZUNA_APP_KEY` (process
/// environment first, then the env file).
#[derive(Debug, Clone, Parser)]
#[command(
    name = "adzuna-mcp-gateway",
    version,
    about = "Adzuna job-search gateway exposing REST routes and MCP tools"
)]
pub struct Args {
    /// Address to listen on.
    #[arg(long, env = "ADZUNA_GATEWAY_BIND", default_value = "0.0.0.0:8000")]
    pub bind: SocketAddr,

    /// KEY=VALUE file seeding variables the process environment does not define.
    #[arg(long, env = "ADZUNA_ENV_FILE", default_value = ".env")]
    pub env_file: PathBuf,

    #[arg(long, env = "ADZUNA_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub upstream_base_url: String,

    /// Per-call upstream timeout.
    #[arg(long, env = "ADZUNA_API_TIMEOUT_SECS", default_value_t = 10)]
    pub upstream_timeout_secs: u64,

    /// Default log filter; `RUST_LOG` overrides it when set.
    #[arg(long, default_value = "info")]
    pub log_level: String,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Args {
    #[must_use]
    pub fn upstream(&self) -> UpstreamConfig {
        UpstreamConfig {
            base_url: self.upstream_base_url.clone(),
            timeout: Duration::from_secs(self.upstream_timeout_secs),
        }
    }
}
