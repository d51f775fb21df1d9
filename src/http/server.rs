//! HTTP server setup and the vanity handler.
//!
//! # Responsibilities
//! - Create Axum Router with a single catch-all handler
//! - Wire up middleware (request id, tracing, timeout)
//! - Look up the request path in the shared store and render the page

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use percent_encoding::percent_decode_str;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{ConfigStore, ServerConfig};
use crate::http::page::VanityPage;
use crate::http::request::{request_id_of, MakeRequestUuidV4};
use crate::observability::metrics;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: ConfigStore,
    pub host: Arc<str>,
    pub doc_url: Arc<str>,
}

/// HTTP server for vanity pages.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(config: &ServerConfig, store: ConfigStore) -> Self {
        let state = AppState {
            store,
            host: Arc::from(config.host.as_str()),
            doc_url: Arc::from(config.doc_url.as_str()),
        };

        Self {
            router: Self::build_router(state),
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(vanity_handler))
            .route("/", any(vanity_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
    }

    /// The configured router, for serving through other means.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Every method is treated as a lookup of the request path.
async fn vanity_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request_id_of(&request).to_string();
    let path = lookup_path(request.uri());

    tracing::info!(
        request_id = %request_id,
        method = %request.method(),
        path = %path,
        "Vanity request"
    );

    let response = match state.store.lookup(&path) {
        None => (StatusCode::NOT_FOUND, "404 page not found").into_response(),
        Some(entry) => match VanityPage::new(&state.host, &path, &entry, &state.doc_url).into_response() {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(request_id = %request_id, path = %path, error = %e, "Render failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "cannot render the page").into_response()
            }
        },
    };

    let status = response.status().as_u16();
    metrics::record_request(status, start_time);
    tracing::info!(request_id = %request_id, path = %path, status, "Vanity response");

    response
}

/// Percent-decoded request path, the form mapping keys are written in.
fn lookup_path(uri: &Uri) -> String {
    percent_decode_str(uri.path()).decode_utf8_lossy().into_owned()
}
