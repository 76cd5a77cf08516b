//! # folio-server
//!
//! The HTTP surface of the contact intake.
//!
//! Routes:
//!
//! | Method | Path                        | Handler                           |
//! |--------|-----------------------------|-----------------------------------|
//! | any    | `intake_path` (`/process_contact`) | [`IntakeHandler`] via `spawn_blocking` |
//! | `GET`  | `/healthz`                  | `{"status":"ok"}`                 |
//!
//! The intake route accepts every method so that a wrong one still gets the
//! JSON failure body instead of axum's bare 405.  The body is only read for
//! `POST`, and only up to `body_limit_bytes`.  Both
//! `application/x-www-form-urlencoded` and `multipart/form-data` bodies are
//! decoded; a browser `FormData` submission arrives as the latter.

use std::{error::Error as _, future::Future, net::SocketAddr, sync::Arc};

use axum::{
    body::{to_bytes, Body, Bytes},
    extract::{ConnectInfo, FromRequest, Multipart, Request, State},
    http::{
        header::{CONTENT_TYPE, USER_AGENT},
        request::Parts,
        HeaderMap, StatusCode,
    },
    routing::{any, get},
    Json, Router,
};
use http_body_util::LengthLimitError;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::{error, warn};

use folio_config::{ServerConfig, HEALTH_PATH};
use folio_contracts::{
    response::{IntakeReply, IntakeResponse, IntakeStatus},
    submission::ContactForm,
};
use folio_core::{IntakeHandler, IntakeRequest};

/// Failure message for a `POST` body over the configured limit.
pub const MSG_BODY_TOO_LARGE: &str = "Request body too large.";

/// Failure message for a body that could not be read or decoded.
pub const MSG_BODY_MALFORMED: &str = "Malformed request body.";

/// Shared by every request.
#[derive(Clone)]
pub struct AppState {
    handler: Arc<IntakeHandler>,
    body_limit: usize,
}

impl AppState {
    pub fn new(handler: IntakeHandler, body_limit: usize) -> Self {
        Self {
            handler: Arc::new(handler),
            body_limit,
        }
    }
}

/// Build the router for `server`'s intake path and body limit.
pub fn build_router(handler: IntakeHandler, server: &ServerConfig) -> Router {
    let state = AppState::new(handler, server.body_limit_bytes);
    Router::new()
        .route(HEALTH_PATH, get(healthz))
        .route(&server.intake_path, any(intake))
        .with_state(state)
}

/// Serve `router` on `listener` until `shutdown` resolves.
///
/// Connection info is attached so the intake handler can record the
/// caller's address.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await
}

/// HTTP status for each intake outcome.
pub fn status_code(status: IntakeStatus) -> StatusCode {
    match status {
        IntakeStatus::Accepted => StatusCode::OK,
        IntakeStatus::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        IntakeStatus::Invalid => StatusCode::UNPROCESSABLE_ENTITY,
        IntakeStatus::StoreFailed => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Decode an `application/x-www-form-urlencoded` body into the five fields.
///
/// Absent fields stay empty, unknown keys are ignored, and a repeated key
/// keeps its last value.
pub fn parse_form(body: &[u8]) -> ContactForm {
    ContactForm::from_pairs(url::form_urlencoded::parse(body))
}

/// Decode a `multipart/form-data` body into the five fields.
///
/// `headers` must carry the `Content-Type` with its boundary.  Field rules
/// match [`parse_form`]; parts without a name are skipped.
pub async fn parse_multipart(headers: &HeaderMap, body: Bytes) -> Result<ContactForm, axum::Error> {
    let mut request = Request::new(Body::from(body));
    *request.headers_mut() = headers.clone();

    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(axum::Error::new)?;

    let mut pairs = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(axum::Error::new)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let value = field.text().await.map_err(axum::Error::new)?;
        pairs.push((name, value));
    }
    Ok(ContactForm::from_pairs(pairs))
}

/// Whether `headers` declare a `multipart/form-data` body.
pub fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| {
            ct.trim_start()
                .to_ascii_lowercase()
                .starts_with("multipart/form-data")
        })
}

/// Whether a body read failed because it ran past the size limit.
pub fn exceeds_body_limit(e: &axum::Error) -> bool {
    let mut source = e.source();
    while let Some(err) = source {
        if err.is::<LengthLimitError>() {
            return true;
        }
        source = err.source();
    }
    false
}

// ── Handlers ──────────────────────────────────────────────────────────────────

type Rejection = (StatusCode, Json<IntakeResponse>);

fn reject(status: StatusCode, message: &str) -> Rejection {
    (status, Json(IntakeResponse::failure(message)))
}

async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Read and decode a `POST` body, bounded by `limit`.
async fn read_form(parts: &Parts, body: Body, limit: usize) -> Result<ContactForm, Rejection> {
    let bytes = to_bytes(body, limit).await.map_err(|e| {
        if exceeds_body_limit(&e) {
            warn!(limit, "intake rejected: body too large");
            reject(StatusCode::PAYLOAD_TOO_LARGE, MSG_BODY_TOO_LARGE)
        } else {
            warn!(error = %e, "intake rejected: body unreadable");
            reject(StatusCode::BAD_REQUEST, MSG_BODY_MALFORMED)
        }
    })?;

    if is_multipart(&parts.headers) {
        parse_multipart(&parts.headers, bytes).await.map_err(|e| {
            warn!(error = %e, "intake rejected: malformed multipart body");
            reject(StatusCode::BAD_REQUEST, MSG_BODY_MALFORMED)
        })
    } else {
        Ok(parse_form(&bytes))
    }
}

async fn intake(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request,
) -> (StatusCode, Json<IntakeResponse>) {
    let (parts, body) = request.into_parts();

    let form = if IntakeHandler::accepts_method(parts.method.as_str()) {
        match read_form(&parts, body, state.body_limit).await {
            Ok(form) => form,
            Err(rejection) => return rejection,
        }
    } else {
        ContactForm::default()
    };

    let request = IntakeRequest {
        method: parts.method.as_str().to_string(),
        form,
        remote_addr: connect_info.map(|ConnectInfo(addr)| addr.ip().to_string()),
        user_agent: parts
            .headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    };

    let handler = state.handler.clone();
    let reply = match tokio::task::spawn_blocking(move || handler.handle(request)).await {
        Ok(reply) => reply,
        Err(e) => {
            error!(error = %e, "intake task did not complete");
            IntakeReply::store_failed()
        }
    };

    (status_code(reply.status), Json(reply.body))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
