//! Integration tests for symdash-di API endpoints
//!
//! Tests cover:
//! - [REQ-DI-NF-040] Health endpoint
//! - [REQ-DI-F-030] View session replacement
//! - [REQ-DI-F-010] Image classification in the list view
//! - [REQ-DI-F-050] Candidate priority ordering
//! - [REQ-DI-F-060] Address / identifier / path search
//! - [REQ-DI-F-070] Faceted filtering and its default checked state
//! - [REQ-DI-F-080] Delete proxy error mapping
//!
//! The upstream symbol store is deliberately unreachable (port 9), which
//! exercises the degrade-to-unreconciled path end to end.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot` method

use symdash_di::client::SymbolStoreClient;
use symdash_di::{build_router, AppState};

/// Test helper: app wired to an unreachable symbol store
fn setup_app() -> axum::Router {
    let store = SymbolStoreClient::new("http://127.0.0.1:9").expect("client should build");
    build_router(AppState::new(store))
}

/// Test helper: create request without body
fn test_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: create JSON request
fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// Fixture: a crash event with three images across the status spectrum
fn event_fixture() -> Value {
    json!({
        "event_id": "5b8ac2b1-2f9a-4a5e-9a36-6a3b1c2d3e4f",
        "images": [
            {
                "debug_id": "ABCD1234-DEAD-BEEF-0000-111122223333",
                "code_id": "abcd1234deadbeef",
                "code_file": "/usr/lib/libfoo.so",
                "debug_file": "/usr/lib/debug/libfoo.so.dbg",
                "arch": "x86_64",
                "image_addr": "0x1000",
                "image_size": 4096,
                "debug_status": "found",
                "unwind_status": "unused",
                "candidates": [
                    {
                        "source": "microsoft",
                        "source_name": "Microsoft",
                        "location": "https://msdl.microsoft.com/libfoo.pdb",
                        "download": {"status": "not_found"}
                    },
                    {
                        "source": "internal",
                        "source_name": "Internal Store",
                        "location": "internal://debug-file/abc",
                        "download": {
                            "status": "ok",
                            "features": {"has_debug_info": true, "has_symbols": true}
                        }
                    },
                    {
                        "source": "s3-mirror",
                        "source_name": "Team S3 Mirror",
                        "location": "s3://symbols/libfoo.so.dbg",
                        "download": {"status": "no_permission", "details": "AccessDenied"}
                    },
                    {
                        "source": "gcs-mirror",
                        "source_name": "GCS Mirror",
                        "location": "gs://symbols/libfoo.so.dbg",
                        "download": {"status": "malformed", "details": "truncated DWARF"}
                    }
                ]
            },
            {
                "debug_id": "99990000-1111-2222-3333-444455556666",
                "code_file": "/usr/lib/libbar.so",
                "arch": "x86_64",
                "image_addr": "0x4000",
                "debug_status": "missing",
                "candidates": []
            },
            {
                "debug_id": "77770000-aaaa-bbbb-cccc-ddddeeeeffff",
                "code_file": "/usr/lib/libnull.so",
                "arch": "x86_64",
                "image_addr": "0x0",
                "image_size": 65536,
                "candidates": []
            }
        ]
    })
}

/// Test helper: push the fixture event into the app
async fn load_fixture(app: &axum::Router) {
    let response = app
        .clone()
        .oneshot(json_request("PUT", "/api/event", &event_fixture()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Health / buildinfo [REQ-DI-NF-040]
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app();

    let response = app.oneshot(test_request("GET", "/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "symdash-di");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_buildinfo_endpoint() {
    let app = setup_app();

    let response = app
        .oneshot(test_request("GET", "/api/buildinfo"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert!(body["version"].is_string());
    assert!(body["git_hash"].is_string());
    assert!(body["build_profile"].is_string());
}

// =============================================================================
// View session [REQ-DI-F-030]
// =============================================================================

#[tokio::test]
async fn test_images_view_requires_a_loaded_event() {
    let app = setup_app();

    let response = app
        .oneshot(test_request("GET", "/api/images"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_put_event_returns_summary() {
    let app = setup_app();

    let response = app
        .oneshot(json_request("PUT", "/api/event", &event_fixture()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["image_count"], 3);
    assert_eq!(body["event_id"], "5b8ac2b1-2f9a-4a5e-9a36-6a3b1c2d3e4f");
}

// =============================================================================
// Image list view [REQ-DI-F-010, REQ-DI-F-060, REQ-DI-F-070]
// =============================================================================

#[tokio::test]
async fn test_image_list_is_classified_and_address_ordered() {
    let app = setup_app();
    load_fixture(&app).await;

    // Explicit empty status param: no facet constraint
    let response = app
        .oneshot(test_request("GET", "/api/images?status="))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;

    assert_eq!(body["total_results"], 3);
    let images = body["images"].as_array().unwrap();
    let addrs: Vec<&str> = images
        .iter()
        .map(|i| i["image_addr"].as_str().unwrap())
        .collect();
    assert_eq!(addrs, vec!["0x0", "0x1000", "0x4000"]);

    // Derived statuses: classifier output, not stored fields
    let statuses: Vec<&str> = images
        .iter()
        .map(|i| i["status"].as_str().unwrap())
        .collect();
    assert_eq!(statuses, vec!["unused", "found", "missing"]);
}

#[tokio::test]
async fn test_image_list_default_facets_exclude_missing() {
    let app = setup_app();
    load_fixture(&app).await;

    // No status param at all: the initial checked state applies
    let response = app
        .oneshot(test_request("GET", "/api/images"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;

    assert_eq!(body["total_results"], 2);
    for image in body["images"].as_array().unwrap() {
        assert_ne!(image["status"], "missing");
    }

    // The options advertise that state: everything checked except missing
    for option in body["status_options"].as_array().unwrap() {
        let expected = option["id"] != "missing";
        assert_eq!(option["is_checked"].as_bool().unwrap(), expected);
    }
}

#[tokio::test]
async fn test_image_list_explicit_status_filter() {
    let app = setup_app();
    load_fixture(&app).await;

    let response = app
        .oneshot(test_request("GET", "/api/images?status=missing"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;

    assert_eq!(body["total_results"], 1);
    assert_eq!(body["images"][0]["code_file"], "/usr/lib/libbar.so");
}

#[tokio::test]
async fn test_address_search_selects_covering_image() {
    let app = setup_app();
    load_fixture(&app).await;

    // 0x1500 falls inside [0x1000, 0x2000)
    let response = app
        .clone()
        .oneshot(test_request("GET", "/api/images?status=&query=0x1500"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["total_results"], 1);
    assert_eq!(body["images"][0]["code_file"], "/usr/lib/libfoo.so");

    // 0x9000 is beyond every mapped range; the null-base image never
    // participates in address search even though 0x9000 < 0x10000
    let response = app
        .oneshot(test_request("GET", "/api/images?status=&query=0x9000"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["total_results"], 0);
}

#[tokio::test]
async fn test_identifier_prefix_search_is_normalized() {
    let app = setup_app();
    load_fixture(&app).await;

    let response = app
        .oneshot(test_request("GET", "/api/images?status=&query=abcd-1234"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["total_results"], 1);
    assert_eq!(
        body["images"][0]["debug_id"],
        "ABCD1234-DEAD-BEEF-0000-111122223333"
    );
}

#[tokio::test]
async fn test_path_substring_search() {
    let app = setup_app();
    load_fixture(&app).await;

    let response = app
        .oneshot(test_request("GET", "/api/images?status=&query=LIBBAR"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["total_results"], 1);
    assert_eq!(body["images"][0]["code_file"], "/usr/lib/libbar.so");
}

// =============================================================================
// Candidate list view [REQ-DI-F-040, REQ-DI-F-050, REQ-DI-F-070]
// =============================================================================

#[tokio::test]
async fn test_candidates_unknown_image_is_404() {
    let app = setup_app();
    load_fixture(&app).await;

    let response = app
        .oneshot(test_request("GET", "/api/images/ffffffff/candidates"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_candidates_degrade_to_unreconciled_and_sort_by_priority() {
    let app = setup_app();
    load_fixture(&app).await;

    let response = app
        .oneshot(test_request(
            "GET",
            "/api/images/ABCD1234-DEAD-BEEF-0000-111122223333/candidates",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    // Store is unreachable: the embedded list is served unreconciled
    assert_eq!(body["reconciled"], false);
    assert_eq!(body["total_results"], 4);

    // Fixed bucket priority: no_permission, malformed, ok, then not_found
    let statuses: Vec<&str> = body["candidates"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["download"]["status"].as_str().unwrap())
        .collect();
    assert_eq!(statuses, vec!["no_permission", "malformed", "ok", "not_found"]);
}

#[tokio::test]
async fn test_candidates_lookup_tolerates_identifier_formatting() {
    let app = setup_app();
    load_fixture(&app).await;

    // Lowercase, dashes stripped: still the same image
    let response = app
        .oneshot(test_request(
            "GET",
            "/api/images/abcd1234deadbeef0000111122223333/candidates",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_candidate_facets_start_unchecked() {
    let app = setup_app();
    load_fixture(&app).await;

    let response = app
        .oneshot(test_request(
            "GET",
            "/api/images/ABCD1234-DEAD-BEEF-0000-111122223333/candidates",
        ))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;

    // Candidate view: nothing checked by default, so nothing is excluded
    for option in body["status_options"].as_array().unwrap() {
        assert_eq!(option["is_checked"], false);
    }
    for option in body["source_options"].as_array().unwrap() {
        assert_eq!(option["is_checked"], false);
    }
}

#[tokio::test]
async fn test_candidate_status_and_source_facets_conjoin() {
    let app = setup_app();
    load_fixture(&app).await;

    let base = "/api/images/ABCD1234-DEAD-BEEF-0000-111122223333/candidates";

    // OR within a category
    let response = app
        .clone()
        .oneshot(test_request("GET", &format!("{base}?status=ok,malformed")))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["total_results"], 2);

    // AND across categories
    let response = app
        .oneshot(test_request(
            "GET",
            &format!("{base}?status=ok,malformed&source=internal"),
        ))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["total_results"], 1);
    assert_eq!(body["candidates"][0]["source"], "internal");
}

#[tokio::test]
async fn test_candidate_text_search() {
    let app = setup_app();
    load_fixture(&app).await;

    let base = "/api/images/ABCD1234-DEAD-BEEF-0000-111122223333/candidates";
    let response = app
        .oneshot(test_request("GET", &format!("{base}?query=msdl")))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["total_results"], 1);
    assert_eq!(body["candidates"][0]["source"], "microsoft");
}

// =============================================================================
// Delete proxy [REQ-DI-F-080]
// =============================================================================

#[tokio::test]
async fn test_delete_maps_upstream_failure_to_502() {
    let app = setup_app();

    let response = app
        .oneshot(test_request("DELETE", "/api/debug-files/abc"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");
}

#[tokio::test]
async fn test_symbol_sources_maps_upstream_failure_to_502() {
    let app = setup_app();

    let response = app
        .oneshot(test_request("GET", "/api/symbol-sources"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}
