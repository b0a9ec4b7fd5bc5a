//! HTTP server and webhook dispatch pipeline.
//!
//! Authentication → decode → channel resolution → rendering →
//! delivery, short-circuiting on the first failure. Failures the
//! sender can act on (bad token, bad payload) are surfaced as 400;
//! once a request is accepted, resolution and delivery failures are
//! logged and the sender still sees 200, so the provider never
//! retries an event the bridge cannot currently route.

use std::sync::Arc;

use axum::body::to_bytes;
use axum::extract::{Query, Request, State};
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use serde::Deserialize;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use mattermost::{Api, NewPost};
use pingdom::{CheckEvent, DecodeError};

use crate::auth::authenticate;
use crate::channel::Resolver;
use crate::config::HookConfig;
use crate::error::DeliverError;
use crate::render::render;

/// Plaintext body served to GET requests, used as a liveness probe.
pub const SERVICE_NAME: &str = "Pingdom Notification Bridge";

/// Fixed rejection body for missing or mismatched tokens.
const INVALID_TOKEN_BODY: &str = "Invalid or missing token";

/// Upper bound on the buffered webhook body. Pingdom payloads are a
/// few kilobytes; anything near this limit is not a check event.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Shared application state.
///
/// The hook set is read by every request and shared with whatever
/// reloads configuration; the binding cache inside the resolver is
/// additionally written on first-time resolutions. Both live behind
/// reader/writer locks.
pub struct AppState {
    /// Configured hooks.
    pub hooks: RwLock<Vec<HookConfig>>,
    /// Hook-to-channel resolver and binding cache.
    pub resolver: Resolver,
    /// Mattermost API handle used for message delivery.
    pub api: Arc<dyn Api>,
}

impl AppState {
    /// Assemble the state from its parts.
    #[must_use]
    pub fn new(hooks: Vec<HookConfig>, api: Arc<dyn Api>) -> Self {
        Self {
            hooks: RwLock::new(hooks),
            resolver: Resolver::new(Arc::clone(&api)),
            api,
        }
    }
}

/// Query parameters of the webhook endpoint.
#[derive(Debug, Deserialize)]
struct TokenQuery {
    /// Shared secret issued to the monitoring provider.
    #[serde(default)]
    token: Option<String>,
}

/// Build the HTTP router for the bridge.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/webhook", post(handle_webhook).get(liveness))
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe; any GET path answers with the service name.
async fn liveness() -> (StatusCode, &'static str) {
    (StatusCode::OK, SERVICE_NAME)
}

/// Catch-all for paths outside the webhook family: GETs are liveness
/// probes, anything else is authenticated and then rejected as an
/// unknown endpoint.
async fn fallback(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    Query(query): Query<TokenQuery>,
) -> Response {
    if method == Method::GET {
        return liveness().await.into_response();
    }

    let Some(hook) = check_token(&state, query.token.as_deref()).await else {
        return (StatusCode::BAD_REQUEST, INVALID_TOKEN_BODY).into_response();
    };

    warn!(hook = %hook.id, path = %uri.path(), "No such endpoint");
    StatusCode::NOT_FOUND.into_response()
}

/// Authenticate the token query parameter against the hook set.
///
/// Returns a clone of the matching hook so no lock is held across
/// the rest of the pipeline.
async fn check_token(state: &AppState, token: Option<&str>) -> Option<HookConfig> {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        warn!("No token provided in the webhook request");
        return None;
    };

    // Log only the edges of the token.
    if token.len() > 8 {
        if let (Some(prefix), Some(suffix)) = (token.get(..4), token.get(token.len() - 4..)) {
            debug!(token_prefix = prefix, token_suffix = suffix, "Webhook token received");
        }
    } else {
        debug!("Webhook token too short to preview");
    }

    let hooks = state.hooks.read().await;
    let Some(hook) = authenticate(token, &hooks) else {
        warn!("Webhook token is invalid or its hook is disabled");
        return None;
    };
    Some(hook.clone())
}

/// Handle a webhook POST: the full pipeline.
///
/// The body is buffered only after the token checks out, so an
/// unauthenticated sender never gets the bridge to read its payload.
async fn handle_webhook(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TokenQuery>,
    request: Request,
) -> Response {
    let Some(hook) = check_token(&state, query.token.as_deref()).await else {
        return (StatusCode::BAD_REQUEST, INVALID_TOKEN_BODY).into_response();
    };

    info!(hook = %hook.id, "Received Pingdom notification");

    let body = match to_bytes(request.into_body(), MAX_BODY_BYTES).await {
        Ok(body) => body,
        Err(e) => {
            error!(error = %e, "Failed to read webhook body");
            return (StatusCode::BAD_REQUEST, "Failed to decode message").into_response();
        }
    };

    let event = match CheckEvent::from_slice(&body) {
        Ok(event) => event,
        Err(DecodeError::Json(e)) => {
            error!(error = %e, "Failed to decode webhook message");
            return (StatusCode::BAD_REQUEST, "Failed to decode message").into_response();
        }
        Err(DecodeError::Invalid(e)) => {
            error!(error = %e, "Invalid webhook message");
            return (StatusCode::BAD_REQUEST, "Invalid webhook message").into_response();
        }
    };

    // The request is accepted from here on: routing and delivery
    // failures are this service's responsibility, not the sender's,
    // and reporting them upstream would only trigger re-delivery of
    // an event we still could not route.
    match deliver(&state, &hook, &event).await {
        Ok(()) => {
            debug!(hook = %hook.id, check_id = event.check_id, "Pingdom notification processing is done");
        }
        Err(e) => {
            error!(hook = %hook.id, check_id = event.check_id, error = %e, "Failed to deliver notification");
        }
    }
    StatusCode::OK.into_response()
}

/// Resolve the destination channel, render the event, and post it.
///
/// Split out from the handler so tests can observe processing
/// failures independently of the accepted response.
///
/// # Errors
///
/// Returns a [`DeliverError`] when resolution or posting fails.
pub async fn deliver(
    state: &AppState,
    hook: &HookConfig,
    event: &CheckEvent,
) -> Result<(), DeliverError> {
    let channel_id = state.resolver.channel_for(hook).await?;
    let attachment = render(hook, event);
    state
        .api
        .create_post(&NewPost::with_attachments(&channel_id, vec![attachment]))
        .await
        .map_err(DeliverError::Post)?;
    Ok(())
}
