mod common;

use adzuna_job_tools::Credentials;
use adzuna_test_support::{StubResponse, StubUpstream};
use common::{Gateway, test_credentials};
use serde_json::json;

#[tokio::test]
async fn search_strips_markers_and_salary_fields() -> anyhow::Result<()> {
    let stub = StubUpstream::json(&json!({
        "__CLASS__": "Adzuna::API::Response::JobSearchResults",
        "count": 2,
        "results": [{
            "__CLASS__": "Adzuna::API::Response::Job",
            "title": "Senior Data Scientist",
            "salary_min": 80000,
            "salary_max": 120000
        }]
    }))
    .await?;
    let gw = Gateway::start(stub.base_url(), test_credentials()).await?;

    let (status, body) = gw
        .get_json("/jobs/search?what=data%20scientist&country=sg")
        .await?;
    assert_eq!(status, 200, "{body}");
    assert_eq!(
        body,
        json!({"count": 2, "results": [{"title": "Senior Data Scientist"}]})
    );

    let req = stub.last_request().expect("upstream request");
    assert_eq!(req.path, "/jobs/sg/search/1");
    assert_eq!(req.query_value("what"), Some("data scientist"));
    assert_eq!(req.query_value("results_per_page"), Some("10"));
    assert_eq!(req.query_value("content-type"), Some("application/json"));
    Ok(())
}

#[tokio::test]
async fn boolean_query_strings_become_one_and_zero() -> anyhow::Result<()> {
    let stub = StubUpstream::json(&json!({"count": 0, "results": []})).await?;
    let gw = Gateway::start(stub.base_url(), test_credentials()).await?;

    let (status, _) = gw
        .get_json("/jobs/search?what=x&full_time=true&permanent=false&page=2&results_per_page=5")
        .await?;
    assert_eq!(status, 200);

    let req = stub.last_request().expect("upstream request");
    assert_eq!(req.path, "/jobs/sg/search/2");
    assert_eq!(req.query_value("full_time"), Some("1"));
    assert_eq!(req.query_value("permanent"), Some("0"));
    assert!(!req.has_query("part_time"));
    assert!(!req.has_query("contract"));
    assert_eq!(req.query_value("results_per_page"), Some("5"));
    Ok(())
}

#[tokio::test]
async fn empty_optional_query_values_are_not_forwarded() -> anyhow::Result<()> {
    let stub = StubUpstream::json(&json!({"count": 0, "results": []})).await?;
    let gw = Gateway::start(stub.base_url(), test_credentials()).await?;

    let (status, _) = gw
        .get_json("/jobs/search?what=x&where=&sort_by=&country=")
        .await?;
    assert_eq!(status, 200);

    let req = stub.last_request().expect("upstream request");
    assert_eq!(req.path, "/jobs/sg/search/1");
    assert_eq!(req.query_value("what"), Some("x"));
    assert!(!req.has_query("where"));
    assert!(!req.has_query("sort_by"));

    let (status, _) = gw.get_json("/jobs/categories?country=").await?;
    assert_eq!(status, 200);
    let req = stub.last_request().expect("upstream request");
    assert_eq!(req.path, "/jobs/sg/categories");
    Ok(())
}

#[tokio::test]
async fn zero_result_search_is_success_with_empty_list() -> anyhow::Result<()> {
    let stub = StubUpstream::json(&json!({"__CLASS__": "X", "count": 0})).await?;
    let gw = Gateway::start(stub.base_url(), test_credentials()).await?;

    let (status, body) = gw.get_json("/jobs/search?what=unicorn%20wrangler").await?;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"count": 0, "results": []}));
    Ok(())
}

#[tokio::test]
async fn missing_what_is_422_without_upstream_call() -> anyhow::Result<()> {
    let stub = StubUpstream::json(&json!({})).await?;
    let gw = Gateway::start(stub.base_url(), test_credentials()).await?;

    for path in ["/jobs/search", "/jobs/search?what=", "/jobs/histogram?country=gb"] {
        let (status, body) = gw.get_json(path).await?;
        assert_eq!(status, 422, "{path}: {body}");
        assert_eq!(body["detail"], "Missing required parameter: what");
    }

    let (status, body) = gw.get_json("/jobs/search?what=x&results_per_page=500").await?;
    assert_eq!(status, 422);
    assert!(
        body["detail"]
            .as_str()
            .is_some_and(|d| d.contains("results_per_page"))
    );

    assert_eq!(stub.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn unconfigured_credentials_fail_every_upstream_route() -> anyhow::Result<()> {
    let stub = StubUpstream::json(&json!({})).await?;
    let gw = Gateway::start(stub.base_url(), Credentials::new("", "")).await?;

    for path in [
        "/jobs/search?what=x",
        "/jobs/top-companies",
        "/jobs/histogram?what=x",
        "/jobs/geodata",
        "/jobs/history",
        "/jobs/categories",
        "/jobs/version",
    ] {
        let (status, body) = gw.get_json(path).await?;
        assert_eq!(status, 500, "{path}");
        assert!(
            body["detail"]
                .as_str()
                .is_some_and(|d| d.contains("credentials not configured")),
            "{path}: {body}"
        );
    }
    assert_eq!(stub.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn upstream_failure_is_500_with_prefix() -> anyhow::Result<()> {
    let stub =
        StubUpstream::start(StubResponse::json_with_status(502, &json!({"oops": true}))).await?;
    let gw = Gateway::start(stub.base_url(), test_credentials()).await?;

    let (status, body) = gw.get_json("/jobs/top-companies?country=gb").await?;
    assert_eq!(status, 500);
    let detail = body["detail"].as_str().expect("detail string");
    assert!(detail.starts_with("Error calling Adzuna API: "), "{detail}");
    assert!(!detail.contains("test-key"), "{detail}");

    stub.set_response(StubResponse::raw(200, "not json", "text/plain"));
    let (status, body) = gw.get_json("/jobs/categories").await?;
    assert_eq!(status, 500);
    assert!(
        body["detail"]
            .as_str()
            .is_some_and(|d| d.contains("failed to decode JSON response"))
    );
    Ok(())
}

#[tokio::test]
async fn passthrough_routes_hit_expected_upstream_paths() -> anyhow::Result<()> {
    let stub = StubUpstream::json(&json!({"__CLASS__": "X", "data": [{"__CLASS__": "Y", "v": 1}]}))
        .await?;
    let gw = Gateway::start(stub.base_url(), test_credentials()).await?;

    let cases = [
        ("/jobs/top-companies?country=gb&what=rust", "/jobs/gb/top_companies"),
        ("/jobs/histogram?what=nurse", "/jobs/sg/histogram"),
        ("/jobs/geodata?location0=UK", "/jobs/sg/geodata"),
        ("/jobs/history?months=3", "/jobs/sg/history"),
        ("/jobs/categories?country=us", "/jobs/us/categories"),
        ("/jobs/version", "/version"),
    ];
    for (local, upstream) in cases {
        let (status, body) = gw.get_json(local).await?;
        assert_eq!(status, 200, "{local}: {body}");
        assert_eq!(body, json!({"data": [{"v": 1}]}), "{local}");
        let req = stub.last_request().expect("upstream request");
        assert_eq!(req.path, upstream, "{local}");
        assert_eq!(req.query_value("app_id"), Some("test-id"));
        assert!(!req.has_query("content-type"), "{local}");
    }
    assert_eq!(stub.call_count(), cases.len());
    Ok(())
}

#[tokio::test]
async fn health_reports_credentials_flag() -> anyhow::Result<()> {
    let stub = StubUpstream::json(&json!({})).await?;

    let gw = Gateway::start(stub.base_url(), test_credentials()).await?;
    let (status, body) = gw.get_json("/health").await?;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({"status": "healthy", "credentials_configured": "True"})
    );

    let gw = Gateway::start(stub.base_url(), Credentials::default()).await?;
    let (_, body) = gw.get_json("/health").await?;
    assert_eq!(body["credentials_configured"], "False");

    assert_eq!(stub.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn openapi_document_and_root_redirect() -> anyhow::Result<()> {
    let stub = StubUpstream::json(&json!({})).await?;
    let gw = Gateway::start(stub.base_url(), test_credentials()).await?;

    let (status, doc) = gw.get_json("/openapi.json").await?;
    assert_eq!(status, 200);
    assert_eq!(doc["info"]["title"], "Adzuna Job Search API");
    assert_eq!(doc["paths"]["/jobs/search"]["get"]["operationId"], "search_jobs");
    assert_eq!(doc["paths"]["/health"]["get"]["operationId"], "health_check");

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;
    let resp = client.get(gw.url("/")).send().await?;
    assert_eq!(resp.status().as_u16(), 307);
    assert_eq!(
        resp.headers()
            .get("location")
            .and_then(|v| v.to_str().ok()),
        Some("/openapi.json")
    );

    let (status, body) = gw.get_json("/no/such/route").await?;
    assert_eq!(status, 404);
    assert_eq!(body["detail"], "Not Found");
    Ok(())
}
