//! HTTP server: ingestion/query API, Telegram webhook and Prometheus metrics.
//!
//! | Route | Method | Auth | Purpose |
//! |---|---|---|---|
//! | `/` | GET | - | version string |
//! | `/ipaddress` | POST | `userid` | ingest a router message, return the new deny list |
//! | `/ipaddress` | GET | `userid` | current deny list |
//! | `/telegram` | POST | - | bot webhook (`/list`, `/version`) |
//! | `/metrics` | GET | - | Prometheus text format |

use crate::bot::{BotCommand, WebhookUpdate};
use crate::config::AuthorizedUser;
use crate::error::{ApiError, ApiResult};
use crate::ingest::IngestRequest;
use crate::render;
use crate::security::DeniedAddress;
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Header carrying the caller's credential.
pub const USER_ID_HEADER: &str = "userid";

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .route("/", get(index_handler))
        .route("/ipaddress", get(list_handler).post(ingest_handler))
        .route("/telegram", axum::routing::post(telegram_handler));

    if state.metrics_enabled {
        app = app.route("/metrics", get(metrics_handler));
    }

    app.with_state(state)
}

/// Bind to `addr` and serve until the server fails.
pub async fn run_http_server(addr: SocketAddr, state: Arc<AppState>) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %listener.local_addr()?, "HTTP server listening");
    axum::serve(listener, router(state)).await
}

/// Resolve the `userid` header to a configured user.
fn authorize<'a>(state: &'a AppState, headers: &HeaderMap) -> ApiResult<&'a AuthorizedUser> {
    let credential = headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    match state.users.authorize(credential) {
        Some(user) => Ok(user),
        None => {
            warn!(header_present = !credential.is_empty(), "Not authorized");
            crate::metrics::record_unauthorized();
            Err(ApiError::Unauthorized)
        }
    }
}

/// Handler for GET / - returns the API version.
async fn index_handler() -> String {
    let version = render::version();
    debug!("{}", version);
    version
}

/// Handler for POST /ipaddress - applies one batch.
async fn ingest_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<Vec<DeniedAddress>>> {
    let user = authorize(&state, &headers)?;
    let request: IngestRequest = serde_json::from_slice(&body)?;
    info!(user = %user.name, bytes = request.message.len(), "New message from router");

    let snapshot = state.ingest(&request.message);
    Ok(Json(snapshot.entries.clone()))
}

/// Handler for GET /ipaddress - returns the current deny list.
async fn list_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<DeniedAddress>>> {
    let user = authorize(&state, &headers)?;
    let snapshot = state.snapshot();
    debug!(user = %user.name, entries = snapshot.len(), "Deny list queried");
    Ok(Json(snapshot.entries.clone()))
}

/// Handler for POST /telegram - answers bot commands through the queue.
async fn telegram_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<StatusCode> {
    let update: WebhookUpdate = serde_json::from_slice(&body)?;
    let chat_id = update.message.chat.id;

    match BotCommand::parse(&update.message.text) {
        Some(command) => {
            debug!(chat_id, command = ?command, "Bot command received");
            let reply = command.reply(&state.snapshot());
            state.notifications.enqueue(chat_id, reply);
        }
        None => debug!(chat_id, "Ignoring non-command message"),
    }

    Ok(StatusCode::OK)
}

/// Handler for GET /metrics - returns Prometheus metrics in text format.
async fn metrics_handler() -> String {
    crate::metrics::gather_metrics()
}
