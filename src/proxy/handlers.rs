use super::ProxyState;
use axum::extract::State;
use axum::http::header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::fmt::Display;
use tracing::{debug, error, info, instrument, warn};

/// Relays the upstream feed as `text/plain`. Upstream failures keep their status code;
/// anything else becomes a 500 carrying the error message.
#[instrument(skip_all)]
pub async fn fetch_ics(State(state): State<ProxyState>) -> Response {
    debug!("Fetching {}", state.upstream_url);

    let upstream = match state.client.get(&state.upstream_url).send().await {
        Ok(upstream) => upstream,
        Err(err) => return server_error(err),
    };

    let status = upstream.status();

    if !status.is_success() {
        warn!("Upstream feed answered {}", status);

        return (
            status,
            format!(
                "ICS fetch failed: {}",
                status.canonical_reason().unwrap_or_default()
            ),
        )
            .into_response();
    }

    match upstream.text().await {
        Ok(ics) => {
            info!("Relaying feed ({} bytes)", ics.len());

            (
                [
                    (CONTENT_TYPE, "text/plain; charset=utf-8"),
                    (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
                    (ACCESS_CONTROL_ALLOW_HEADERS, "*"),
                ],
                ics,
            )
                .into_response()
        }
        Err(err) => server_error(err),
    }
}

fn server_error(err: impl Display) -> Response {
    error!("Failed to relay feed: {}", err);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Server error: {}", err),
    )
        .into_response()
}
