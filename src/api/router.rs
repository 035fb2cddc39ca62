use axum::{extract::DefaultBodyLimit, middleware, routing::get, Router};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use super::health;
use super::middleware::{logging_middleware, metrics_middleware, security_headers_middleware};
use super::state::AppState;
use super::v1;
use crate::infrastructure::observability::{create_metrics_router, PrometheusMetrics};

/// Create a minimal router without state
/// Note: /ready endpoint is not available without state
pub fn create_router() -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .layer(TraceLayer::new_for_http())
}

/// Create the full router with application state
pub fn create_router_with_state(state: AppState, metrics: Option<PrometheusMetrics>) -> Router {
    let max_upload_bytes = state.max_upload_bytes;

    let mut router = Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .nest("/api/v1", v1::create_v1_router())
        .with_state(state)
        // Multipart reads honour the same limit as the raw body
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(RequestBodyLimitLayer::new(max_upload_bytes))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    if let Some(m) = metrics {
        router = router.merge(create_metrics_router(m));
    }

    router
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::infrastructure::storage::InMemoryBlobStore;

    const BOUNDARY: &str = "subtitle-boundary";

    const SRT: &str = "1\n00:00:01,000 --> 00:00:02,000\n<i>Hello</i>\n\n2\n00:00:03,000 --> 00:00:04,000\n<b>world</b>\n";

    enum Part<'a> {
        Text(&'a str, &'a str),
        File(&'a str, &'a [u8]),
    }

    fn app() -> Router {
        let state = crate::create_app_state_with_blob_store(Arc::new(InMemoryBlobStore::new()))
            .unwrap()
            .with_max_upload_bytes(1024);

        create_router_with_state(state, None)
    }

    fn multipart(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
        let mut body = Vec::new();

        for part in parts {
            body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());

            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                            .as_bytes(),
                    );
                    body.extend_from_slice(value.as_bytes());
                }
                Part::File(file_name, content) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n\
                             Content-Type: application/octet-stream\r\n\r\n",
                            file_name
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(content);
                }
            }

            body.extend_from_slice(b"\r\n");
        }

        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_str(&body_text(response).await).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = app();

        for uri in ["/health", "/live", "/ready"] {
            let response = app.clone().oneshot(get(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_minimal_router() {
        let response = create_router().oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_request_id_and_security_headers() {
        let response = app().oneshot(get("/health")).await.unwrap();

        assert!(response.headers().contains_key("x-request-id"));
        assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    }

    #[tokio::test]
    async fn test_convert_returns_plain_text() {
        let request = multipart(
            "/api/v1/subtitles/convert",
            &[Part::Text("format", "srt"), Part::File("movie.srt", SRT.as_bytes())],
        );

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
        assert_eq!(body_text(response).await, "Hello\nworld");
    }

    #[tokio::test]
    async fn test_convert_infers_format_from_file_name() {
        let request = multipart(
            "/api/v1/subtitles/convert",
            &[Part::File("movie.sbv", b"0:00:01.000,0:00:02.000\nHi\n")],
        );

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "Hi");
    }

    #[tokio::test]
    async fn test_convert_unknown_format_is_bad_request() {
        let request = multipart(
            "/api/v1/subtitles/convert",
            &[Part::Text("format", "docx"), Part::File("a.docx", b"x")],
        );

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["status"], 400);
        assert_eq!(json["errors"][0]["code"], "ValidationError");
    }

    #[tokio::test]
    async fn test_convert_markup_only_is_unprocessable() {
        let request = multipart(
            "/api/v1/subtitles/convert",
            &[
                Part::Text("format", "ass"),
                Part::File("a.ass", b"[Script Info]\nTitle: none\n"),
            ],
        );

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(json["errors"][0]["code"], "UnprocessableContent");
    }

    #[tokio::test]
    async fn test_convert_missing_file() {
        let request = multipart("/api/v1/subtitles/convert", &[Part::Text("format", "srt")]);

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_post_convert_applies_options_in_order() {
        let request = multipart(
            "/api/v1/subtitles/post-convert",
            &[
                Part::Text("option", "DeleteTags"),
                Part::Text("option", "ToOneLine"),
                Part::File("a.txt", b"<i>One</i>\n<b>Two</b>\n"),
            ],
        );

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "One Two");
    }

    #[tokio::test]
    async fn test_oversized_upload_is_rejected() {
        let big = vec![b'a'; 4096];
        let request = multipart(
            "/api/v1/subtitles/convert",
            &[Part::Text("format", "srt"), Part::File("big.srt", &big)],
        );

        let response = app().oneshot(request).await.unwrap();

        assert!(response.status().is_client_error());
        assert_ne!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_subtitle_lifecycle() {
        let app = app();

        // Upload
        let request = multipart(
            "/api/v1/subtitles",
            &[
                Part::Text("format", "srt"),
                Part::Text("options", "ToOneLine"),
                Part::File("movie.srt", SRT.as_bytes()),
            ],
        );
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let created = body_json(response).await;
        let id = created["id"].as_str().unwrap().to_string();
        assert_eq!(created["name"], "movie.srt");
        assert_eq!(created["content_size"], "Hello world".len());

        // List
        let response = app.clone().oneshot(get("/api/v1/subtitles")).await.unwrap();
        let list = body_json(response).await;
        assert_eq!(list["total"], 1);

        // Metadata
        let response = app
            .clone()
            .oneshot(get(&format!("/api/v1/subtitles/{}", id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Content
        let response = app
            .clone()
            .oneshot(get(&format!("/api/v1/subtitles/{}/content", id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .contains("movie.srt"));
        assert_eq!(body_text(response).await, "Hello world");

        // Rename
        let request = Request::builder()
            .method("PATCH")
            .uri(format!("/api/v1/subtitles/{}", id))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"name":"renamed.txt"}"#))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["name"], "renamed.txt");

        // Delete
        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/api/v1/subtitles/{}", id))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        // Gone
        let response = app
            .oneshot(get(&format!("/api/v1/subtitles/{}", id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["errors"][0]["code"], "NotFound");
    }

    #[tokio::test]
    async fn test_rename_with_invalid_json() {
        let id = crate::domain::subtitle::FileContextId::generate();
        let request = Request::builder()
            .method("PATCH")
            .uri(format!("/api/v1/subtitles/{}", id))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{"))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_id_is_bad_request() {
        let response = app()
            .oneshot(get("/api/v1/subtitles/not-a-uuid"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
