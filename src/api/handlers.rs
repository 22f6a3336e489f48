//! HTTP request handlers

use super::types::UssdRequest;
use super::AppState;
use axum::{
    async_trait,
    extract::{FromRequest, Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::Instrument;

const WELCOME: &str = "Welcome, MamaPesa\n";
const INVALID_ROUTE: &str = "Invalid route. Please check your URL and try again.";

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome).fallback(invalid_route))
        .route("/ussd", post(ussd_callback).fallback(invalid_route))
        .fallback(invalid_route)
        .with_state(state)
        .layer(cors_layer())
}

/// Any origin, method and header may call the service
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Whether a content type names JSON, ignoring case and parameters
fn is_json_content_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .eq_ignore_ascii_case("application/json")
}

async fn welcome() -> &'static str {
    WELCOME
}

async fn invalid_route() -> AppError {
    AppError::RouteNotFound
}

/// Gateway callback: one dialed path in, one CON/END line out
async fn ussd_callback(
    State(state): State<AppState>,
    UssdPayload(req): UssdPayload,
) -> Response {
    let span = tracing::info_span!(
        "ussd",
        session_id = req.session_id.as_deref().unwrap_or(""),
        service_code = req.service_code.as_deref().unwrap_or(""),
        network_code = req.network_code.as_deref().unwrap_or(""),
    );

    let envelope = state.engine.respond(&req.text).instrument(span.clone()).await;
    span.in_scope(|| {
        tracing::info!(
            action = envelope.action.prefix(),
            dialed_len = req.text.len(),
            "USSD response"
        );
    });

    (
        [(header::CONTENT_TYPE, "text/plain")],
        envelope.to_string(),
    )
        .into_response()
}

/// Gateway body, accepted as JSON or url-encoded form
struct UssdPayload(UssdRequest);

#[async_trait]
impl<S> FromRequest<S> for UssdPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(is_json_content_type);

        if is_json {
            let Json(body) = Json::<UssdRequest>::from_request(req, state)
                .await
                .map_err(|e| AppError::MalformedBody(e.body_text()))?;
            Ok(Self(body))
        } else {
            let Form(body) = Form::<UssdRequest>::from_request(req, state)
                .await
                .map_err(|e| AppError::MalformedBody(e.body_text()))?;
            Ok(Self(body))
        }
    }
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    RouteNotFound,
    MalformedBody(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::RouteNotFound => {}
            AppError::MalformedBody(detail) => {
                tracing::warn!(error = %detail, "Rejected USSD callback body");
            }
        }
        (StatusCode::BAD_REQUEST, INVALID_ROUTE).into_response()
    }
}
