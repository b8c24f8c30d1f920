//! Integration tests for the HTTP transport and client.
//!
//! These tests use wiremock to mock the API and verify the requests the
//! client sends and how responses are mapped.

use std::io::Write;
use std::time::Duration;

use futures::TryStreamExt;
use increase_core::codec::{FileUpload, MultipartForm};
use increase_core::{
    ApiClient, ClientConfig, Field, IncreaseError, RequestOptions, TransportError,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use wiremock::matchers::{
    body_json, header, method, path, query_param, query_param_is_missing,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize, PartialEq)]
struct Item {
    id: String,
}

#[derive(Serialize)]
struct StatusIn {
    r#in: Vec<&'static str>,
}

#[derive(Serialize, Default)]
struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<StatusIn>,
}

#[derive(Serialize, Default)]
struct UpdateParams {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    name: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    description: Field<String>,
}

fn client_for(server: &MockServer) -> ApiClient {
    client_with_timeout(server, Duration::from_secs(5))
}

fn client_with_timeout(server: &MockServer, timeout: Duration) -> ApiClient {
    let config = ClientConfig::builder()
        .api_key("test-key")
        .base_url(server.uri())
        .timeout(timeout)
        .build()
        .unwrap();
    ApiClient::new(config).unwrap()
}

fn page(ids: &[&str], next_cursor: Option<&str>) -> serde_json::Value {
    json!({
        "data": ids.iter().map(|id| json!({ "id": id })).collect::<Vec<_>>(),
        "next_cursor": next_cursor,
    })
}

async fn mount_three_pages(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param_is_missing("cursor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&["a", "b"], Some("c2"))))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("cursor", "c2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&["c"], Some("c3"))))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("cursor", "c3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&["d"], None)))
        .expect(1)
        .mount(server)
        .await;
}

/// Test that the bearer token and default headers are sent.
#[tokio::test]
async fn test_get_sends_auth_and_accept_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items/item_1"))
        .and(header("authorization", "Bearer test-key"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "item_1" })))
        .expect(1)
        .mount(&server)
        .await;

    let item: Item = client_for(&server)
        .get("items/item_1", &RequestOptions::default())
        .await
        .unwrap();
    assert_eq!(item.id, "item_1");
}

/// Test that a 404 body becomes a structured API error.
#[tokio::test]
async fn test_not_found_maps_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({ "status": 404, "error_code": "not_found" })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get::<Item>("items/missing", &RequestOptions::default())
        .await
        .unwrap_err();

    match err {
        IncreaseError::Api(api) => {
            assert_eq!(api.status, 404);
            assert_eq!(api.code.as_deref(), Some("not_found"));
            assert!(api.is_not_found());
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

/// Test that `in` filters are comma-joined and no limit is injected.
#[tokio::test]
async fn test_in_filter_and_no_default_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("status[in]", "accepted,rejected"))
        .and(query_param_is_missing("limit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&["a"], None)))
        .expect(1)
        .mount(&server)
        .await;

    let query = ListQuery {
        status: Some(StatusIn {
            r#in: vec!["accepted", "rejected"],
        }),
        ..Default::default()
    };
    let first = client_for(&server)
        .list::<_, Item>("items", &query, &RequestOptions::default())
        .await
        .unwrap();
    assert_eq!(first.len(), 1);
    assert!(!first.has_next_page());
}

/// Test that the limit and filters are repeated on every page.
#[tokio::test]
async fn test_template_is_reused_for_every_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("limit", "1"))
        .and(query_param_is_missing("cursor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&["a"], Some("next"))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("limit", "1"))
        .and(query_param("cursor", "next"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&["b"], None)))
        .expect(1)
        .mount(&server)
        .await;

    let query = ListQuery {
        limit: Some(1),
        ..Default::default()
    };
    let first = client_for(&server)
        .list::<_, Item>("items", &query, &RequestOptions::default())
        .await
        .unwrap();
    let second = first.next_page().await.unwrap().expect("second page");
    assert_eq!(second.data(), &[Item { id: "b".into() }]);
    assert!(second.next_page().await.unwrap().is_none());
}

/// Test the pager across three pages and the exhaustion signal.
#[tokio::test]
async fn test_pager_walks_three_pages() {
    let server = MockServer::start().await;
    mount_three_pages(&server).await;

    let mut pager = client_for(&server)
        .list_auto_paging::<_, Item>("items", &ListQuery::default(), &RequestOptions::default())
        .unwrap();

    let mut pages = Vec::new();
    while let Some(page) = pager.next_page().await.unwrap() {
        pages.push(page.data().iter().map(|i| i.id.clone()).collect::<Vec<_>>());
    }
    assert_eq!(pages, vec![vec!["a", "b"], vec!["c"], vec!["d"]]);
    assert!(pager.is_exhausted());
    assert!(pager.next_page().await.unwrap().is_none());
}

/// Test that streaming yields items across pages in server order.
#[tokio::test]
async fn test_stream_collects_all_items() {
    let server = MockServer::start().await;
    mount_three_pages(&server).await;

    let ids: Vec<String> = client_for(&server)
        .list_auto_paging::<_, Item>("items", &(), &RequestOptions::default())
        .unwrap()
        .into_stream()
        .map_ok(|item| item.id)
        .try_collect()
        .await
        .unwrap();
    assert_eq!(ids, vec!["a", "b", "c", "d"]);
}

/// Test that only set fields reach the PATCH body.
#[tokio::test]
async fn test_patch_omits_unset_fields() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/items/item_1"))
        .and(body_json(json!({ "description": null })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "item_1" })))
        .expect(1)
        .mount(&server)
        .await;

    let params = UpdateParams {
        description: Field::Null,
        ..Default::default()
    };
    let _: Item = client_for(&server)
        .patch("items/item_1", &params, &RequestOptions::default())
        .await
        .unwrap();
}

/// Test that the idempotency key header is forwarded.
#[tokio::test]
async fn test_idempotency_key_header() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/items"))
        .and(header("idempotency-key", "create-item-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "item_1" })))
        .expect(1)
        .mount(&server)
        .await;

    let options = RequestOptions::new().idempotency_key("create-item-1");
    let _: Item = client_for(&server)
        .post("items", &json!({ "name": "x" }), &options)
        .await
        .unwrap();
}

/// Test that a file plus two fields is sent as three parts, streamed from disk.
#[tokio::test]
async fn test_multipart_upload_from_path() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "file_1" })))
        .expect(1)
        .mount(&server)
        .await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    let content = "0123456789".repeat(20_000);
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();

    let params = UpdateParams {
        name: "check_image_front".into(),
        description: "Front of check".into(),
    };
    let form = MultipartForm::from_fields(&params)
        .unwrap()
        .prepend_file(
            "file",
            FileUpload::from_path(file.path()).with_content_type("image/png"),
        );
    let created: Item = client_for(&server)
        .post_multipart("files", form, &RequestOptions::default())
        .await
        .unwrap();
    assert_eq!(created.id, "file_1");

    let requests = server.received_requests().await.unwrap();
    let request = &requests[0];
    let content_type = request.headers.get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("multipart/form-data"));

    let body = String::from_utf8_lossy(&request.body);
    assert_eq!(body.matches("Content-Disposition: form-data").count(), 3);
    assert!(body.contains("name=\"name\""));
    assert!(body.contains("name=\"description\""));
    assert!(body.contains("Content-Type: image/png"));
    assert!(body.contains(&content));
}

/// Test that a missing upload file is reported as a body error.
#[tokio::test]
async fn test_multipart_missing_file() {
    let server = MockServer::start().await;

    let form = MultipartForm::new().file("file", FileUpload::from_path("/no/such/file.pdf"));
    let err = client_for(&server)
        .post_multipart::<Item>("files", form, &RequestOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        IncreaseError::Transport(TransportError::Body(_))
    ));
}

/// Test that a slow response produces a timeout error, not an API error.
#[tokio::test]
async fn test_timeout_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "id": "x" }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let err = client_with_timeout(&server, Duration::from_millis(100))
        .get::<Item>("slow", &RequestOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        IncreaseError::Transport(TransportError::Timeout { duration_ms: 100 })
    ));
}

/// Test that cancelling aborts the in-flight request.
#[tokio::test]
async fn test_cancel_signal_aborts_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "id": "x" }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let signal = increase_core::CancelSignal::new();
    let options = RequestOptions::new().cancel_signal(signal.clone());
    let client = client_for(&server);

    let handle = tokio::spawn(async move { client.get::<Item>("slow", &options).await });
    tokio::time::sleep(Duration::from_millis(50)).await;
    signal.cancel();

    let err = tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("cancel should finish before the response")
        .unwrap()
        .unwrap_err();
    assert!(err.is_cancelled());
}

/// Test that a 500 with a non-JSON body keeps the raw text.
#[tokio::test]
async fn test_server_error_with_text_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items/item_1"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get::<Item>("items/item_1", &RequestOptions::default())
        .await
        .unwrap_err();
    let api = err.as_api_error().expect("API error");
    assert!(api.is_server_error());
    assert_eq!(api.raw_body, "Bad Gateway");
    assert_eq!(api.message(), "Bad Gateway");
}

/// Test that a single GET with a query sends bracketed, comma-joined pairs.
#[tokio::test]
async fn test_get_with_query_flattens_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items/summary"))
        .and(query_param("limit", "5"))
        .and(query_param("status[in]", "open,closed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "summary_1" })))
        .expect(1)
        .mount(&server)
        .await;

    let query = ListQuery {
        limit: Some(5),
        status: Some(StatusIn {
            r#in: vec!["open", "closed"],
        }),
    };
    let item: Item = client_for(&server)
        .get_with_query("items/summary", &query, &RequestOptions::default())
        .await
        .unwrap();
    assert_eq!(item.id, "summary_1");
}

/// Test that delete sends a DELETE and decodes the returned object.
#[tokio::test]
async fn test_delete_decodes_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/items/item_1"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "item_1" })))
        .expect(1)
        .mount(&server)
        .await;

    let deleted: Item = client_for(&server)
        .delete("items/item_1", &RequestOptions::default())
        .await
        .unwrap();
    assert_eq!(deleted, Item { id: "item_1".into() });
}
