//! HTTP transport implementation.
//!
//! Plain GET endpoints, so `curl | sh` works against any script route. Each
//! handler turns the request into a [`Request`] plus a [`RenderContext`] and
//! takes the body from [`InstallerServer::dispatch`].

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

use super::{TransportConfig, TransportError, TransportResult};
use crate::core::context::RenderContext;
use crate::core::server::{MediaKind, Output, Request};
use crate::core::{Error, InstallerServer};
use crate::domains::catalog::{ClientKind, ListFormat};

/// HTTP transport handler.
pub struct HttpTransport {
    config: TransportConfig,
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    server: InstallerServer,
}

/// Query parameters accepted by every content endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct TemplatingQuery {
    no_templating: Option<String>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    /// Run the HTTP transport until Ctrl-C.
    pub async fn run(self, server: InstallerServer) -> TransportResult<()> {
        let addr = self.config.address();
        let banner = format!("{} v{}", server.name(), server.version());
        let app = router(server, self.config.enable_cors);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!(
            "{} ready - listening on http://{} (CORS {})",
            banner, addr, cors_status
        );
        info!("  → Catalog:   GET /");
        info!("  → Installer: GET /install");
        info!("  → Health:    GET /health");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Build the route table.
pub fn router(server: InstallerServer, enable_cors: bool) -> Router {
    let static_dir = server.static_dir();
    let state = AppState { server };

    let mut app = Router::new()
        .route("/", get(root_handler).head(head_root))
        .route("/list", get(list_handler))
        .route("/list/json", get(list_json_handler))
        .route("/help", get(help_handler))
        .route("/health", get(health_check))
        .route("/install", get(bundle_installer))
        .route("/install/", get(bundle_installer))
        .route("/install/{*rest}", get(bundle_installer))
        .route("/installer", get(installer_handler))
        .route("/favicon.ico", get(favicon_handler))
        .route("/{tool}/install", get(tool_installer))
        .route("/{tool}", get(tool_handler))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}

/// Render `request` against the current request's headers.
fn render(
    state: &AppState,
    request: Request,
    headers: &HeaderMap,
    uri: &Uri,
    no_templating: Option<&str>,
) -> Response {
    let ctx = RenderContext::from_request(
        state.server.config(),
        headers,
        uri.scheme_str(),
        no_templating,
    );

    match state.server.dispatch(&request, &ctx) {
        Ok(output) => output.into_response(),
        Err(e) => e.into_response(),
    }
}

fn header_str<'h>(headers: &'h HeaderMap, name: header::HeaderName) -> Option<&'h str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Catalog: plain text for CLI clients, HTML for browsers.
async fn root_handler(State(state): State<AppState>, headers: HeaderMap, uri: Uri) -> Response {
    let client = ClientKind::from_user_agent(header_str(&headers, header::USER_AGENT));
    render(&state, Request::Catalog(client), &headers, &uri, None)
}

async fn head_root() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, MediaKind::Text.content_type())], "")
}

/// Tool list, negotiated on `Accept`.
async fn list_handler(State(state): State<AppState>, headers: HeaderMap, uri: Uri) -> Response {
    let format = ListFormat::from_accept(header_str(&headers, header::ACCEPT));
    render(&state, Request::List(format), &headers, &uri, None)
}

async fn list_json_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    render(&state, Request::List(ListFormat::Json), &headers, &uri, None)
}

async fn help_handler(State(state): State<AppState>, headers: HeaderMap, uri: Uri) -> Response {
    render(&state, Request::Help, &headers, &uri, None)
}

/// Health check endpoint.
async fn health_check(State(state): State<AppState>, headers: HeaderMap, uri: Uri) -> Response {
    render(&state, Request::Health, &headers, &uri, None)
}

async fn bundle_installer(
    State(state): State<AppState>,
    Query(query): Query<TemplatingQuery>,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    render(
        &state,
        Request::BundleInstaller,
        &headers,
        &uri,
        query.no_templating.as_deref(),
    )
}

async fn installer_handler(
    State(state): State<AppState>,
    Query(query): Query<TemplatingQuery>,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    render(
        &state,
        Request::Installer,
        &headers,
        &uri,
        query.no_templating.as_deref(),
    )
}

async fn favicon_handler(State(state): State<AppState>) -> Response {
    match state.server.favicon() {
        Ok(bytes) => ([(header::CONTENT_TYPE, "image/png")], bytes).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn tool_installer(
    State(state): State<AppState>,
    Path(tool): Path<String>,
    Query(query): Query<TemplatingQuery>,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    render(
        &state,
        Request::ToolInstaller(tool),
        &headers,
        &uri,
        query.no_templating.as_deref(),
    )
}

async fn tool_handler(
    State(state): State<AppState>,
    Path(tool): Path<String>,
    Query(query): Query<TemplatingQuery>,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    render(
        &state,
        Request::from_segment(&tool),
        &headers,
        &uri,
        query.no_templating.as_deref(),
    )
}

impl IntoResponse for Output {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, self.media.content_type())], self.body).into_response()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = if self.is_not_found() {
            debug!("Not found: {}", self);
            StatusCode::NOT_FOUND
        } else {
            error!("Request failed: {}", self);
            StatusCode::INTERNAL_SERVER_ERROR
        };

        (status, Json(serde_json::json!({ "detail": self.to_string() }))).into_response()
    }
}
