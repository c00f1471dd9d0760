//! HTTP request handlers.

use super::types::{ChatRequest, ChatResponse, ErrorResponse, LeadRequest, LeadResponse};
use super::AppState;
use crate::conversation::Turn;
use crate::leads::Lead;
use crate::llm::CompletionRequest;
use crate::persona::NOVA_PERSONA;
use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;

/// Upper bound on the model's reply, in tokens.
const MAX_OUTPUT_TOKENS: u32 = 300;

/// Greeting for health checks, matching the original deployment.
const WELCOME: &str =
    "Servidor de NovaAI funcionando correctamente. ¡Listo para recibir peticiones del chatbot!";

const EMPTY_MESSAGE_ERROR: &str = "No se ha proporcionado ningún mensaje.";
const MISSING_EMAIL_ERROR: &str = "No se ha proporcionado ningún email.";
const CHAT_FAILURE: &str = "Ha ocurrido un error al procesar tu solicitud.";
const LEAD_FAILURE: &str = "Ha ocurrido un error al procesar el lead.";
const LEAD_ACCEPTED: &str = "Lead recibido correctamente.";

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/chat", post(chat))
        .route("/leads", post(capture_lead))
        .with_state(state)
}

/// CORS layer restricted to the configured origin allow-list.
pub fn cors_layer(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

async fn welcome() -> &'static str {
    WELCOME
}

async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if req.message.trim().is_empty() {
        return Err(AppError::BadRequest(EMPTY_MESSAGE_ERROR.to_string()));
    }

    let history: Vec<Turn> = req.history.into_iter().map(Turn::from).collect();
    let request = CompletionRequest {
        system: NOVA_PERSONA.to_string(),
        history,
        message: req.message,
        max_output_tokens: MAX_OUTPUT_TOKENS,
    };

    // Upstream detail goes to the logs, never to the caller.
    let completion = state.llm.complete(&request).await.map_err(|err| {
        tracing::error!(kind = ?err.kind, error = %err, "upstream model call failed");
        AppError::Internal(CHAT_FAILURE.to_string())
    })?;

    Ok(Json(ChatResponse {
        response: completion.text,
    }))
}

async fn capture_lead(
    State(state): State<AppState>,
    Json(req): Json<LeadRequest>,
) -> Result<Json<LeadResponse>, AppError> {
    let email = match req.email {
        Some(email) if !email.trim().is_empty() => email,
        _ => return Err(AppError::BadRequest(MISSING_EMAIL_ERROR.to_string())),
    };

    let lead = Lead {
        email,
        user_name: req.user_name,
    };
    state.leads.record(&lead).await.map_err(|err| {
        tracing::error!(error = %err, "lead sink failure");
        AppError::Internal(LEAD_FAILURE.to_string())
    })?;

    Ok(Json(LeadResponse {
        message: LEAD_ACCEPTED.to_string(),
    }))
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leads::testing::MemoryLeadSink;
    use crate::llm::{CompletionResponse, LlmError, LlmService, Usage};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    /// Model double: records requests, replays a scripted outcome.
    struct MockLlm {
        reply: Option<String>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl MockLlm {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Some(text.to_string()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: None,
                requests: Mutex::new(Vec::new()),
            })
        }

        fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl LlmService for MockLlm {
        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            self.requests.lock().unwrap().push(request.clone());
            match &self.reply {
                Some(text) => Ok(CompletionResponse {
                    text: text.clone(),
                    usage: Usage::default(),
                }),
                None => Err(LlmError::auth("API key not valid")),
            }
        }

        fn model_id(&self) -> &str {
            "mock-model"
        }
    }

    fn app(llm: &Arc<MockLlm>, sink: &Arc<MemoryLeadSink>) -> Router {
        let llm: Arc<dyn LlmService> = llm.clone();
        let leads: Arc<dyn crate::leads::LeadSink> = sink.clone();
        create_router(AppState::new(llm, leads))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn welcome_answers_health_checks() {
        let llm = MockLlm::replying("hola");
        let sink = Arc::new(MemoryLeadSink::default());

        let response = app(&llm, &sink)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(String::from_utf8(bytes.to_vec()).unwrap().contains("NovaAI"));
    }

    #[tokio::test]
    async fn chat_replays_history_and_returns_model_text() {
        let llm = MockLlm::replying("Ofrecemos cinco servicios.");
        let sink = Arc::new(MemoryLeadSink::default());

        let request = post_json(
            "/chat",
            json!({
                "message": "¿qué servicios tienen?",
                "history": [
                    {"role": "user", "parts": [{"text": "hola"}]},
                    {"role": "model", "parts": [{"text": "¡Hola! Soy Nova."}]}
                ]
            }),
        );
        let response = app(&llm, &sink).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"response": "Ofrecemos cinco servicios."})
        );

        let requests = llm.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].message, "¿qué servicios tienen?");
        assert_eq!(requests[0].history.len(), 2);
        assert_eq!(requests[0].max_output_tokens, MAX_OUTPUT_TOKENS);
        assert!(requests[0].system.contains("Eres Nova"));
    }

    #[tokio::test]
    async fn empty_message_is_rejected_without_upstream_call() {
        let llm = MockLlm::replying("hola");
        let sink = Arc::new(MemoryLeadSink::default());

        let request = post_json("/chat", json!({"message": "   ", "history": []}));
        let response = app(&llm, &sink).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"error": EMPTY_MESSAGE_ERROR})
        );
        assert_eq!(llm.request_count(), 0);
    }

    #[tokio::test]
    async fn absent_message_field_is_also_a_400() {
        let llm = MockLlm::replying("hola");
        let sink = Arc::new(MemoryLeadSink::default());

        let response = app(&llm, &sink)
            .oneshot(post_json("/chat", json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(llm.request_count(), 0);
    }

    #[tokio::test]
    async fn upstream_failure_is_a_generic_500() {
        let llm = MockLlm::failing();
        let sink = Arc::new(MemoryLeadSink::default());

        let request = post_json("/chat", json!({"message": "hola"}));
        let response = app(&llm, &sink).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        // The upstream detail ("API key not valid") must not leak.
        assert_eq!(body_json(response).await, json!({"error": CHAT_FAILURE}));
    }

    #[tokio::test]
    async fn lead_is_recorded_and_acknowledged() {
        let llm = MockLlm::replying("hola");
        let sink = Arc::new(MemoryLeadSink::default());

        let request = post_json(
            "/leads",
            json!({"email": "me@example.com", "userName": "Ana"}),
        );
        let response = app(&llm, &sink).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"message": LEAD_ACCEPTED}));

        let recorded = sink.recorded.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].email, "me@example.com");
        assert_eq!(recorded[0].user_name.as_deref(), Some("Ana"));
    }

    #[tokio::test]
    async fn lead_without_email_is_rejected() {
        let llm = MockLlm::replying("hola");
        let sink = Arc::new(MemoryLeadSink::default());

        let response = app(&llm, &sink)
            .oneshot(post_json("/leads", json!({"userName": "Ana"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(sink.recorded.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn lead_sink_failure_is_a_500() {
        let llm = MockLlm::replying("hola");
        let sink = Arc::new(MemoryLeadSink::failing());

        let response = app(&llm, &sink)
            .oneshot(post_json("/leads", json!({"email": "me@example.com"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({"error": LEAD_FAILURE}));
    }

    #[tokio::test]
    async fn cors_grants_only_allowed_origins() {
        let llm = MockLlm::replying("hola");
        let sink = Arc::new(MemoryLeadSink::default());
        let origins = vec![HeaderValue::from_static("https://decoarche.com")];

        let mut request = post_json("/chat", json!({"message": "hola"}));
        request
            .headers_mut()
            .insert(header::ORIGIN, HeaderValue::from_static("https://decoarche.com"));
        let response = app(&llm, &sink)
            .layer(cors_layer(origins.clone()))
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .map(|v| v.to_str().unwrap().to_string()),
            Some("https://decoarche.com".to_string())
        );

        let mut request = post_json("/leads", json!({"email": "me@example.com"}));
        request
            .headers_mut()
            .insert(header::ORIGIN, HeaderValue::from_static("https://evil.example"));
        let response = app(&llm, &sink)
            .layer(cors_layer(origins))
            .oneshot(request)
            .await
            .unwrap();
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }
}
