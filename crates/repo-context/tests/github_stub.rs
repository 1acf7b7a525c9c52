//! GitHub client tests against a local stub server.
//!
//! Each test stands up an axum router serving canned GitHub API
//! responses on an ephemeral port and points the client at it with
//! `with_api_base`, driving the status-mapping branches a live API
//! would make flaky to hit.

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use repo_context::{ContextSource, FetchError, GitHubContextSource};

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve stub");
    });
    format!("http://{addr}")
}

fn client_for(base: &str) -> GitHubContextSource {
    GitHubContextSource::new(None).with_api_base(base)
}

#[tokio::test]
async fn missing_repository_maps_to_not_found() {
    let router = Router::new().route(
        "/repos/:owner/:name",
        get(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(json!({"message": "Not Found"})),
            )
        }),
    );
    let base = serve(router).await;

    let err = client_for(&base)
        .fetch_context("octo", "gone", None)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::NotFound));
}

#[tokio::test]
async fn server_error_maps_to_upstream_with_status() {
    let router = Router::new().route(
        "/repos/:owner/:name",
        get(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"message": "boom"})),
            )
        }),
    );
    let base = serve(router).await;

    let err = client_for(&base)
        .fetch_context("octo", "demo", None)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Upstream { status: 500 }));
}

#[tokio::test]
async fn tree_error_status_maps_to_upstream() {
    let router = Router::new()
        .route(
            "/repos/:owner/:name",
            get(|| async { Json(json!({"default_branch": "main"})) }),
        )
        .route(
            "/repos/:owner/:name/git/trees/:branch",
            get(|| async {
                (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({"message": "upstream down"})),
                )
            }),
        );
    let base = serve(router).await;

    let err = client_for(&base)
        .fetch_context("octo", "demo", None)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Upstream { status: 502 }));
}

#[tokio::test]
async fn tree_response_without_tree_field_is_empty() {
    let router = Router::new()
        .route(
            "/repos/:owner/:name",
            get(|| async { Json(json!({"default_branch": "main"})) }),
        )
        .route(
            "/repos/:owner/:name/git/trees/:branch",
            get(|| async { Json(json!({"truncated": false})) }),
        );
    let base = serve(router).await;

    let err = client_for(&base)
        .fetch_context("octo", "empty", None)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::EmptyTree));
}

#[tokio::test]
async fn fully_excluded_tree_is_empty() {
    let router = Router::new()
        .route(
            "/repos/:owner/:name",
            get(|| async { Json(json!({"default_branch": "main"})) }),
        )
        .route(
            "/repos/:owner/:name/git/trees/:branch",
            get(|| async {
                Json(json!({"tree": [
                    {"path": "node_modules/a/index.js"},
                    {"path": "docs/guide.md"},
                ]}))
            }),
        );
    let base = serve(router).await;

    let err = client_for(&base)
        .fetch_context("octo", "deps-only", None)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::EmptyTree));
}

#[tokio::test]
async fn happy_path_degrades_missing_readme_to_empty() {
    let router = Router::new()
        .route(
            "/repos/:owner/:name",
            get(|| async { Json(json!({"default_branch": "trunk"})) }),
        )
        .route(
            "/repos/:owner/:name/git/trees/:branch",
            get(|| async {
                Json(json!({"tree": [
                    {"path": "src/main.rs"},
                    {"path": "src/lib.rs"},
                ]}))
            }),
        )
        .route(
            "/repos/:owner/:name/readme",
            get(|| async { (StatusCode::NOT_FOUND, Json(json!({"message": "Not Found"}))) }),
        );
    let base = serve(router).await;

    let context = client_for(&base)
        .fetch_context("octo", "demo", None)
        .await
        .unwrap();
    assert_eq!(context.default_branch, "trunk");
    assert_eq!(context.file_tree, "src/main.rs\nsrc/lib.rs");
    assert_eq!(context.readme, "");
}

#[tokio::test]
async fn missing_default_branch_falls_back_to_main() {
    let router = Router::new()
        .route("/repos/:owner/:name", get(|| async { Json(json!({})) }))
        .route(
            "/repos/:owner/:name/git/trees/:branch",
            get(|| async { Json(json!({"tree": [{"path": "src/main.rs"}]})) }),
        )
        .route(
            "/repos/:owner/:name/readme",
            get(|| async { (StatusCode::NOT_FOUND, Json(json!({}))) }),
        );
    let base = serve(router).await;

    let context = client_for(&base)
        .fetch_context("octo", "demo", None)
        .await
        .unwrap();
    assert_eq!(context.default_branch, "main");
}
