//! REST surface: one `GET` route per operation plus the OpenAPI document.

use crate::{API_DESCRIPTION, API_TITLE, API_VERSION, AppState};
use adzuna_job_tools::manifest::openapi_document;
use adzuna_job_tools::{JobToolsError, Operation};
use axum::Router;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse as _, Json, Redirect, Response};
use axum::routing::get;
use rmcp::model::JsonObject;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, warn};

pub const OPENAPI_PATH: &str = "/openapi.json";

pub fn routes() -> Router<AppState> {
    let mut router = Router::new()
        .route("/", get(root_redirect))
        .route(OPENAPI_PATH, get(openapi));

    for op in Operation::ALL {
        router = router.route(
            op.descriptor().route,
            get(
                move |State(state): State<AppState>,
                      query: Result<Query<HashMap<String, String>>, QueryRejection>| async move {
                    match query {
                        Ok(Query(query)) => run_operation(&state, op, query).await,
                        Err(rejection) => query_rejected(op, &rejection),
                    }
                },
            ),
        );
    }
    router
}

async fn root_redirect() -> Redirect {
    Redirect::temporary(OPENAPI_PATH)
}

async fn openapi() -> Json<Value> {
    Json(openapi_document(API_TITLE, API_VERSION, API_DESCRIPTION))
}

pub async fn not_found() -> Response {
    detail_response(StatusCode::NOT_FOUND, "Not Found")
}

async fn run_operation(
    state: &AppState,
    op: Operation,
    query: HashMap<String, String>,
) -> Response {
    let started = Instant::now();
    // Query strings carry no types; coercion happens in the translator.
    let args: JsonObject = query
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect();

    match state.tools.invoke(op, &args).await {
        Ok(body) => {
            debug!(
                operation = op.tool_name(),
                elapsed_ms = elapsed_ms(started),
                "request served"
            );
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => error_response(op, &e),
    }
}

fn error_response(op: Operation, e: &JobToolsError) -> Response {
    let status = e.status();
    if e.is_client_error() {
        debug!(operation = op.tool_name(), status = status.as_u16(), error = %e, "request rejected");
    } else {
        warn!(operation = op.tool_name(), status = status.as_u16(), error = %e, "request failed");
    }
    detail_response(status, &e.to_string())
}

fn query_rejected(op: Operation, rejection: &QueryRejection) -> Response {
    debug!(operation = op.tool_name(), error = %rejection, "query string rejected");
    detail_response(StatusCode::UNPROCESSABLE_ENTITY, &rejection.body_text())
}

fn detail_response(status: StatusCode, detail: &str) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
