//! Gateway integration tests
//!
//! Drive the full router through tower's oneshot, with the mock engine and
//! the in-memory document store behind it.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use synapse_api::routes::create_app;
use synapse_api::store::MemoryDocumentStore;
use synapse_api::{AppState, GatewayConfig};
use synapse_engine::MockEngine;
use tower::ServiceExt;

const BOUNDARY: &str = "synapse-test-boundary";

fn app(engine: Arc<MockEngine>) -> Router {
    let state = AppState::new(
        GatewayConfig::default(),
        engine,
        Arc::new(MemoryDocumentStore::new()),
    );
    create_app(state)
}

async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn multipart_body(files: &[(&str, &str, &[u8])]) -> Body {
    let mut body = Vec::new();
    for (name, content_type, bytes) in files {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"files\"; filename=\"{}\"\r\n",
                name
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    Body::from(body)
}

async fn upload(app: &Router, brain_id: &str, files: &[(&str, &str, &[u8])]) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("/brains/{}/documents", brain_id))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(multipart_body(files))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn create_brain(app: &Router, name: &str) -> String {
    let (status, body) = send_json(
        app,
        Method::POST,
        "/brains",
        Some(json!({ "name": name })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

// ============================================================================
// BRAIN LIFECYCLE
// ============================================================================

#[tokio::test]
async fn test_create_get_list_brains() {
    let app = app(Arc::new(MockEngine::new()));

    let id = create_brain(&app, "Docs").await;

    let (status, body) = send_json(&app, Method::GET, &format!("/brains/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Docs");
    assert_eq!(body["document_count"], 0);
    assert_eq!(body["llm_provider"], "anthropic");

    let (status, body) = send_json(&app, Method::GET, "/brains", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
}

#[tokio::test]
async fn test_create_brain_validation() {
    let app = app(Arc::new(MockEngine::new()));

    let (status, body) =
        send_json(&app, Method::POST, "/brains", Some(json!({ "name": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("name"));

    let (status, _) = send_json(
        &app,
        Method::POST,
        "/brains",
        Some(json!({ "name": "x".repeat(101) })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_missing_brain_is_404() {
    let app = app(Arc::new(MockEngine::new()));
    let (status, body) = send_json(
        &app,
        Method::GET,
        &format!("/brains/{}", uuid::Uuid::new_v4()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

// ============================================================================
// DOCUMENTS
// ============================================================================

#[tokio::test]
async fn test_upload_then_delete_document_scenario() {
    let engine = Arc::new(MockEngine::new());
    let app = app(engine.clone());
    let id = create_brain(&app, "Docs").await;

    // Upload a.pdf and b.txt
    let (status, body) = upload(
        &app,
        &id,
        &[
            ("a.pdf", "application/pdf", b"pdf bytes"),
            ("b.txt", "text/plain", b"text bytes"),
        ],
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["document_count"], 2);
    assert_eq!(body["files"].as_array().unwrap().len(), 2);

    // Delete a.pdf
    let (status, _) = send_json(
        &app,
        Method::DELETE,
        &format!("/brains/{}/documents/a.pdf", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, brain) = send_json(&app, Method::GET, &format!("/brains/{}", id), None).await;
    assert_eq!(brain["document_count"], 1);

    // A query can no longer cite the deleted document
    let (status, answer) = send_json(
        &app,
        Method::POST,
        &format!("/brains/{}/query", id),
        Some(json!({ "question": "what is in the docs?" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let sources: Vec<&str> = answer["sources"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s.as_str().unwrap())
        .collect();
    assert_eq!(sources, vec!["b.txt"]);
}

#[tokio::test]
async fn test_upload_batch_rejected_atomically() {
    let app = app(Arc::new(MockEngine::new()));
    let id = create_brain(&app, "Docs").await;

    let (status, body) = upload(
        &app,
        &id,
        &[
            ("ok.txt", "text/plain", b"fine"),
            ("virus.exe", "application/octet-stream", b"nope"),
        ],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("virus.exe"));

    // Nothing persisted, count unchanged
    let (_, docs) = send_json(&app, Method::GET, &format!("/brains/{}/documents", id), None).await;
    assert_eq!(docs["total"], 0);
    let (_, brain) = send_json(&app, Method::GET, &format!("/brains/{}", id), None).await;
    assert_eq!(brain["document_count"], 0);
}

#[tokio::test]
async fn test_document_metadata_and_missing_document() {
    let app = app(Arc::new(MockEngine::new()));
    let id = create_brain(&app, "Docs").await;
    upload(&app, &id, &[("a.txt", "text/plain", b"hello")]).await;

    let (status, meta) = send_json(
        &app,
        Method::GET,
        &format!("/brains/{}/documents/a.txt", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(meta["name"], "a.txt");
    assert_eq!(meta["size"], 5);

    let (status, _) = send_json(
        &app,
        Method::GET,
        &format!("/brains/{}/documents/ghost.txt", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upload_traversal_filename_rejected() {
    let app = app(Arc::new(MockEngine::new()));
    let id = create_brain(&app, "Docs").await;

    let (status, body) = upload(&app, &id, &[("../escape.txt", "text/plain", b"out")]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("../escape.txt"));

    let (_, brain) = send_json(&app, Method::GET, &format!("/brains/{}", id), None).await;
    assert_eq!(brain["document_count"], 0);
    let (_, docs) = send_json(&app, Method::GET, &format!("/brains/{}/documents", id), None).await;
    assert_eq!(docs["total"], 0);
}

#[tokio::test]
async fn test_document_routes_reject_traversal_names() {
    let app = app(Arc::new(MockEngine::new()));
    let id = create_brain(&app, "Docs").await;
    upload(&app, &id, &[("a.txt", "text/plain", b"hello")]).await;

    // Percent-encoded separators decode after route matching
    let (status, body) = send_json(
        &app,
        Method::GET,
        &format!("/brains/{}/documents/..%2Fescape.txt", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Invalid filename"));

    let (status, _) = send_json(
        &app,
        Method::DELETE,
        &format!("/brains/{}/documents/..%5C..%5Cescape.txt", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, brain) = send_json(&app, Method::GET, &format!("/brains/{}", id), None).await;
    assert_eq!(brain["document_count"], 1);
}

// ============================================================================
// QUERIES
// ============================================================================

#[tokio::test]
async fn test_query_empty_brain_rejected_before_engine() {
    let engine = Arc::new(MockEngine::new());
    let app = app(engine.clone());
    let id = create_brain(&app, "Empty").await;

    let (status, body) = send_json(
        &app,
        Method::POST,
        &format!("/brains/{}/query", id),
        Some(json!({ "question": "anything?" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Brain has no documents");
    assert_eq!(engine.answer_calls(), 0);
}

#[tokio::test]
async fn test_query_validation_bounds() {
    let app = app(Arc::new(MockEngine::new()));
    let id = create_brain(&app, "Docs").await;
    upload(&app, &id, &[("a.txt", "text/plain", b"x")]).await;

    for body in [
        json!({ "question": "" }),
        json!({ "question": "ok", "max_tokens": 50 }),
        json!({ "question": "ok", "temperature": 1.5 }),
    ] {
        let (status, _) = send_json(
            &app,
            Method::POST,
            &format!("/brains/{}/query", id),
            Some(body),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_query_engine_failure_is_503() {
    let engine = Arc::new(MockEngine::new());
    let app = app(engine.clone());
    let id = create_brain(&app, "Docs").await;
    upload(&app, &id, &[("a.txt", "text/plain", b"x")]).await;
    engine.set_failing(true);

    let (status, body) = send_json(
        &app,
        Method::POST,
        &format!("/brains/{}/query", id),
        Some(json!({ "question": "hello?" })),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["request_id"].is_string());
}

// ============================================================================
// BRAIN DELETE CASCADE
// ============================================================================

#[tokio::test]
async fn test_delete_brain_cascades() {
    let app = app(Arc::new(MockEngine::new()));
    let id = create_brain(&app, "Docs").await;
    upload(&app, &id, &[("a.txt", "text/plain", b"x")]).await;

    let (status, conv) = send_json(
        &app,
        Method::POST,
        "/conversations",
        Some(json!({ "brain_id": id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let conv_id = conv["id"].as_str().unwrap().to_string();

    let (status, _) = send_json(&app, Method::DELETE, &format!("/brains/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // Former children are gone
    let (status, _) = send_json(&app, Method::GET, &format!("/brains/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send_json(
        &app,
        Method::GET,
        &format!("/brains/{}/documents", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send_json(
        &app,
        Method::GET,
        &format!("/conversations/{}", conv_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// CONVERSATIONS
// ============================================================================

#[tokio::test]
async fn test_conversation_lifecycle() {
    let app = app(Arc::new(MockEngine::with_answer("the answer")));
    let id = create_brain(&app, "Docs").await;
    upload(&app, &id, &[("a.txt", "text/plain", b"x")]).await;

    let (_, conv) = send_json(
        &app,
        Method::POST,
        "/conversations",
        Some(json!({ "brain_id": id, "title": "My chat" })),
    )
    .await;
    let conv_id = conv["id"].as_str().unwrap().to_string();
    assert_eq!(conv["title"], "My chat");

    // Query appends both the question and the answer
    let (status, answer) = send_json(
        &app,
        Method::POST,
        &format!("/conversations/{}/query", conv_id),
        Some(json!({ "question": "what?" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(answer["answer"], "the answer");

    let (_, fetched) = send_json(
        &app,
        Method::GET,
        &format!("/conversations/{}?include_messages=true", conv_id),
        None,
    )
    .await;
    let messages = fetched["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(messages[1]["role"], "assistant");

    // Rename, then clear
    let (status, renamed) = send_json(
        &app,
        Method::PATCH,
        &format!("/conversations/{}/title", conv_id),
        Some(json!({ "title": "Renamed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["title"], "Renamed");

    let (status, _) = send_json(
        &app,
        Method::DELETE,
        &format!("/conversations/{}/messages", conv_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, cleared) = send_json(
        &app,
        Method::GET,
        &format!("/conversations/{}", conv_id),
        None,
    )
    .await;
    assert_eq!(cleared["message_count"], 0);
    assert_eq!(cleared["title"], "Renamed");
}

#[tokio::test]
async fn test_conversation_listing_filtered_by_brain() {
    let app = app(Arc::new(MockEngine::new()));
    let first = create_brain(&app, "First").await;
    let second = create_brain(&app, "Second").await;

    for brain in [&first, &first, &second] {
        send_json(
            &app,
            Method::POST,
            "/conversations",
            Some(json!({ "brain_id": brain })),
        )
        .await;
    }

    let (_, all) = send_json(&app, Method::GET, "/conversations", None).await;
    assert_eq!(all["total"], 3);

    let (_, filtered) = send_json(
        &app,
        Method::GET,
        &format!("/conversations?brain_id={}", first),
        None,
    )
    .await;
    assert_eq!(filtered["total"], 2);
}

#[tokio::test]
async fn test_add_message_endpoint() {
    let app = app(Arc::new(MockEngine::new()));
    let id = create_brain(&app, "Docs").await;
    let (_, conv) = send_json(
        &app,
        Method::POST,
        "/conversations",
        Some(json!({ "brain_id": id })),
    )
    .await;
    let conv_id = conv["id"].as_str().unwrap();

    let (status, message) = send_json(
        &app,
        Method::POST,
        &format!("/conversations/{}/messages", conv_id),
        Some(json!({ "role": "user", "content": "hello" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(message["content"], "hello");

    let (status, _) = send_json(
        &app,
        Method::POST,
        &format!("/conversations/{}/messages", conv_id),
        Some(json!({ "role": "user", "content": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ============================================================================
// STREAMING
// ============================================================================

async fn collect_sse_events(response: axum::response::Response) -> Vec<Value> {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    text.lines()
        .filter_map(|line| line.strip_prefix("data: "))
        .filter_map(|data| serde_json::from_str(data).ok())
        .collect()
}

#[tokio::test]
async fn test_stream_brain_query_event_protocol() {
    let app = app(Arc::new(MockEngine::with_answer(
        "one two three four five six",
    )));
    let id = create_brain(&app, "Docs").await;
    upload(&app, &id, &[("a.txt", "text/plain", b"x")]).await;

    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("/stream/brains/{}/query", id))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "question": "what?" }).to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/event-stream"));

    let events = collect_sse_events(response).await;
    assert!(events.len() >= 3);

    // content events first, then sources, then done
    let types: Vec<&str> = events.iter().map(|e| e["type"].as_str().unwrap()).collect();
    let sources_at = types.iter().position(|t| *t == "sources").unwrap();
    assert!(types[..sources_at].iter().all(|t| *t == "content"));
    assert_eq!(types[types.len() - 1], "done");
    assert_eq!(types.iter().filter(|t| **t == "done").count(), 1);

    let text: String = events
        .iter()
        .filter(|e| e["type"] == "content")
        .map(|e| e["content"].as_str().unwrap())
        .collect();
    assert_eq!(text, "one two three four five six");
}

#[tokio::test]
async fn test_stream_empty_brain_is_http_error_not_stream() {
    let app = app(Arc::new(MockEngine::new()));
    let id = create_brain(&app, "Empty").await;

    let (status, body) = send_json(
        &app,
        Method::POST,
        &format!("/stream/brains/{}/query", id),
        Some(json!({ "question": "what?" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Brain has no documents");
}

#[tokio::test]
async fn test_stream_engine_failure_yields_error_event() {
    let engine = Arc::new(MockEngine::new());
    let app = app(engine.clone());
    let id = create_brain(&app, "Docs").await;
    upload(&app, &id, &[("a.txt", "text/plain", b"x")]).await;
    engine.set_failing(true);

    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("/stream/brains/{}/query", id))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "question": "what?" }).to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let events = collect_sse_events(response).await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["type"], "error");
}

#[tokio::test]
async fn test_stream_conversation_query_appends_transcript() {
    let app = app(Arc::new(MockEngine::with_answer("streamed")));
    let id = create_brain(&app, "Docs").await;
    upload(&app, &id, &[("a.txt", "text/plain", b"x")]).await;

    let (_, conv) = send_json(
        &app,
        Method::POST,
        "/conversations",
        Some(json!({ "brain_id": id })),
    )
    .await;
    let conv_id = conv["id"].as_str().unwrap().to_string();

    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("/stream/conversations/{}/query", conv_id))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "question": "what?" }).to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let events = collect_sse_events(response).await;
    assert_eq!(events.last().unwrap()["type"], "done");

    let (_, fetched) = send_json(
        &app,
        Method::GET,
        &format!("/conversations/{}?include_messages=true", conv_id),
        None,
    )
    .await;
    let messages = fetched["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1]["content"], "streamed");
}

// ============================================================================
// TEMPLATES
// ============================================================================

#[tokio::test]
async fn test_template_catalog_and_lookup() {
    let app = app(Arc::new(MockEngine::new()));

    let (status, body) = send_json(&app, Method::GET, "/templates", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 6);
    let ids: Vec<&str> = body["templates"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert!(ids.contains(&"general"));
    assert!(ids.contains(&"customer_support"));

    let (status, body) = send_json(&app, Method::GET, "/templates/legal", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Legal Documents");
    assert_eq!(body["suggested_temperature"], 0.2);
    assert_eq!(body["llm_provider"], "anthropic");

    let (status, body) = send_json(&app, Method::GET, "/templates/ghost", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Template 'ghost' not found");
}

#[tokio::test]
async fn test_create_brain_from_template() {
    let app = app(Arc::new(MockEngine::new()));

    let (status, brain) = send_json(
        &app,
        Method::POST,
        "/templates/technical/create",
        Some(json!({ "name": "API KB" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(brain["name"], "API KB");
    assert_eq!(brain["llm_provider"], "anthropic");
    assert_eq!(brain["model"], "claude-3-5-sonnet-20241022");
    // Description falls back to the template's
    assert_eq!(
        brain["description"],
        "Optimized for technical documentation, code, and API references"
    );
    assert_eq!(brain["document_count"], 0);

    // An explicit description wins over the template's
    let (status, brain) = send_json(
        &app,
        Method::POST,
        "/templates/research/create",
        Some(json!({ "name": "Papers", "description": "Arxiv digests" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(brain["description"], "Arxiv digests");

    // The created brains are ordinary brains
    let (_, body) = send_json(&app, Method::GET, "/brains", None).await;
    assert_eq!(body["total"], 2);
}

#[tokio::test]
async fn test_create_brain_from_template_validation() {
    let app = app(Arc::new(MockEngine::new()));

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/templates/ghost/create",
        Some(json!({ "name": "X" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Template 'ghost' not found");

    let (status, _) = send_json(
        &app,
        Method::POST,
        "/templates/general/create",
        Some(json!({ "name": "  " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ============================================================================
// SERVICE METADATA
// ============================================================================

#[tokio::test]
async fn test_health_and_banner() {
    let app = app(Arc::new(MockEngine::new()));

    let (status, body) = send_json(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["engine"], "ok");

    let (status, body) = send_json(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "synapse");

    let (status, body) = send_json(&app, Method::GET, "/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/brains"].is_object());
}
