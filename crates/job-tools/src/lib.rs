//! Adzuna job-search operations exposed as local routes and MCP tools.
//!
//! This crate owns the two layers every operation shares:
//! - the request translator (validated arguments -> one upstream GET with credentials attached)
//! - the response normalizer (upstream JSON -> local body, or one uniform error)
//!
//! It intentionally contains **no** server loop; `adzuna-mcp-gateway` mounts it over HTTP.

pub mod credentials;
pub mod error;
pub mod manifest;
pub mod normalize;
pub mod operations;
pub mod params;
pub mod redact;
pub mod runtime;
pub mod translator;

pub use credentials::Credentials;
pub use error::{JobToolsError, Result};
pub use operations::Operation;
pub use runtime::{JobToolSource, UpstreamConfig};
