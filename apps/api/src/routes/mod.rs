pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::chat::handlers as chat;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Chat API
        .route("/api/chat", post(chat::handle_chat))
        .route("/api/ask", get(chat::handle_ask))
        .route("/api/rag/chat", post(chat::handle_rag_chat))
        // Resume API
        .route("/api/analyze", post(resume::handle_analyze))
        .route("/api/ats-check", post(resume::handle_ats_check))
        .route("/api/health", get(health::health_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::{Embedder, LlmClient};
    use crate::retrieval::QuestionAnswerAdvisor;
    use crate::vector_store::{SearchConfig, SimpleVectorStore};
    use axum::body::Body;
    use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    /// Router wired to the given model endpoint with an empty vector store.
    /// `http://127.0.0.1:1` makes model calls fail fast with connection
    /// errors; validation paths never touch the endpoint at all.
    fn make_router_against(base_url: &str) -> Router {
        let llm = LlmClient::new(
            "test-key".to_string(),
            base_url.to_string(),
            "test-chat-model".to_string(),
            "test-embedding-model".to_string(),
        );
        let embedder: Arc<dyn Embedder> = Arc::new(llm.clone());
        let store = Arc::new(SimpleVectorStore::new(embedder));
        let advisor = Arc::new(QuestionAnswerAdvisor::new(store, SearchConfig::default()));

        build_router(AppState { llm, advisor })
    }

    fn make_router() -> Router {
        make_router_against("http://127.0.0.1:1")
    }

    /// Serves a canned chat completion on an ephemeral port and returns its
    /// base URL.
    async fn spawn_stub_model() -> String {
        let stub = Router::new().route(
            "/chat/completions",
            post(|| async {
                axum::Json(serde_json::json!({
                    "choices": [{"message": {"role": "assistant", "content": "stubbed reply"}}],
                    "usage": {"prompt_tokens": 3, "completion_tokens": 2}
                }))
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, stub).await.unwrap();
        });

        format!("http://{addr}")
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    /// Builds a multipart/form-data request body. `filename: None` renders a
    /// plain text field.
    fn multipart_post(uri: &str, parts: &[(&str, Option<&str>, &str)]) -> Request<Body> {
        let boundary = "test-boundary-7d9f8";
        let mut body = String::new();
        for (name, filename, value) in parts {
            body.push_str(&format!("--{boundary}\r\n"));
            match filename {
                Some(filename) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\r\n"
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )),
            }
            body.push_str(value);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{boundary}--\r\n"));

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn health_reports_up() {
        let response = make_router()
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "UP");
        assert_eq!(body["service"], "parley-api");
        assert!(body["version"].is_string());
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let response = make_router()
            .oneshot(Request::get("/api/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn chat_rejects_empty_message() {
        let response = make_router()
            .oneshot(json_post("/api/chat", r#"{"message": ""}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Message cannot be empty");
    }

    #[tokio::test]
    async fn chat_rejects_whitespace_only_message() {
        let response = make_router()
            .oneshot(json_post("/api/chat", r#"{"message": "   "}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn chat_rejects_missing_message_field() {
        let response = make_router()
            .oneshot(json_post("/api/chat", "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Message cannot be empty");
    }

    #[tokio::test]
    async fn ask_rejects_missing_question() {
        let response = make_router()
            .oneshot(Request::get("/api/ask").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Question cannot be empty");
    }

    #[tokio::test]
    async fn ask_rejects_blank_question() {
        let response = make_router()
            .oneshot(
                Request::get("/api/ask?question=%20%20")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rag_chat_rejects_empty_message() {
        let response = make_router()
            .oneshot(json_post("/api/rag/chat", r#"{"message": ""}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Message cannot be empty");
    }

    #[tokio::test]
    async fn chat_returns_the_model_reply() {
        let base_url = spawn_stub_model().await;
        let response = make_router_against(&base_url)
            .oneshot(json_post("/api/chat", r#"{"message": "hello"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["response"], "stubbed reply");
    }

    #[tokio::test]
    async fn rag_chat_answers_even_with_an_empty_store() {
        let base_url = spawn_stub_model().await;
        let response = make_router_against(&base_url)
            .oneshot(json_post("/api/rag/chat", r#"{"message": "what is in the docs?"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["response"], "stubbed reply");
    }

    #[tokio::test]
    async fn analyze_returns_the_analysis_envelope() {
        let base_url = spawn_stub_model().await;
        let response = make_router_against(&base_url)
            .oneshot(multipart_post(
                "/api/analyze",
                &[("file", Some("resume.txt"), "Jane Doe, Rust engineer")],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["analysis"], "stubbed reply");
    }

    #[tokio::test]
    async fn chat_model_failure_maps_to_500_with_endpoint_prefix() {
        let response = make_router()
            .oneshot(json_post("/api/chat", r#"{"message": "hello"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        let message = body["error"].as_str().unwrap();
        assert!(
            message.starts_with("Error in /chat: "),
            "unexpected error message: {message}"
        );
    }

    #[tokio::test]
    async fn rag_chat_model_failure_maps_to_500_with_endpoint_prefix() {
        // The store is empty, so retrieval short-circuits and the failure
        // comes from the chat call itself.
        let response = make_router()
            .oneshot(json_post("/api/rag/chat", r#"{"message": "hello"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Error in /rag/chat: "));
    }

    #[tokio::test]
    async fn analyze_requires_a_file_part() {
        let response = make_router()
            .oneshot(multipart_post(
                "/api/analyze",
                &[("jd", None, "not a file")],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "file is required");
    }

    #[tokio::test]
    async fn ats_check_requires_a_jd_part() {
        let response = make_router()
            .oneshot(multipart_post(
                "/api/ats-check",
                &[("file", Some("resume.txt"), "Jane Doe, Rust engineer")],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "jd is required");
    }

    #[tokio::test]
    async fn ats_check_model_failure_maps_to_500_with_endpoint_prefix() {
        let response = make_router()
            .oneshot(multipart_post(
                "/api/ats-check",
                &[
                    ("file", Some("resume.txt"), "Jane Doe, Rust engineer"),
                    ("jd", None, "Looking for a Rust engineer"),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Error in /ats-check: "));
    }
}
