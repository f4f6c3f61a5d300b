//! Same-origin passthrough for the calendar feed, so browsers can read it without tripping
//! over cross-origin restrictions. The feed is relayed verbatim, never parsed.

mod handlers;

use crate::feed::api::build_client;
use axum::routing::get;
use axum::Router;
use reqwest_middleware::ClientWithMiddleware;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use handlers::fetch_ics;

pub const PROXY_PATH: &str = "/fetch-ics";
pub const NETLIFY_FUNCTION_PATH: &str = "/.netlify/functions/fetch-ics";

#[derive(Debug, Clone)]
pub struct ProxyState {
    pub client: ClientWithMiddleware,
    pub upstream_url: String,
}

impl ProxyState {
    pub fn new(upstream_url: impl Into<String>, max_retries: u32) -> Self {
        Self {
            client: build_client(max_retries),
            upstream_url: upstream_url.into(),
        }
    }
}

pub fn build_router(state: ProxyState) -> Router {
    Router::new()
        .route(PROXY_PATH, get(fetch_ics))
        .route(NETLIFY_FUNCTION_PATH, get(fetch_ics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(addr: &str, state: ProxyState) -> Result<(), std::io::Error> {
    tracing::info!("Starting feed proxy on {} for {}", addr, state.upstream_url);

    let listener = TcpListener::bind(addr).await?;

    serve(listener, state).await
}

pub async fn serve(listener: TcpListener, state: ProxyState) -> Result<(), std::io::Error> {
    axum::serve(listener, build_router(state)).await
}
