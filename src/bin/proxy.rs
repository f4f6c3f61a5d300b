use seasideevents::config::env_loader::load_config;
use seasideevents::proxy::{start_server, ProxyState};
use seasideevents::tracing::setup_loki;
use std::process::ExitCode;
use tracing::{error, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let _loki = setup_loki("proxy").await;

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            warn!("Aborting, configuration is invalid: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let state = ProxyState::new(config.feed.url, config.feed.max_retries);

    match start_server(&config.proxy_bind_addr, state).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Proxy stopped: {}", err);
            ExitCode::FAILURE
        }
    }
}
