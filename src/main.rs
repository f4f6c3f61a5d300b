use chrono::Local;
use itertools::Itertools;
use seasideevents::calendar::display::{format_date_range, NO_EVENTS_MESSAGE};
use seasideevents::calendar::filter::FilterOptions;
use seasideevents::config::env_loader::load_config;
use seasideevents::config::model::Config;
use seasideevents::feed::api::CalendarFeedAPI;
use seasideevents::local_guide::model::LocalGuide;
use seasideevents::tracing::setup_loki;
use std::process::ExitCode;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let loki = setup_loki("events").await;

    let exit_code = match load_config() {
        Ok(config) => run(&config).await,
        Err(err) => {
            warn!("Aborting, configuration is invalid: {}", err);
            ExitCode::FAILURE
        }
    };

    if let Some((controller, handle)) = loki {
        controller.shutdown().await;
        let _ = handle.await;
    }

    exit_code
}

async fn run(config: &Config) -> ExitCode {
    let api = CalendarFeedAPI::new(config.feed.url.as_str(), config.feed.max_retries);
    let towns = config.town_classifier();

    let events = match api
        .get_events(&towns, Local::now(), config.grace_period)
        .await
    {
        Ok(events) => events,
        Err(err) => {
            error!("Error loading events: {}", err);
            println!("{}", err.user_message());
            return ExitCode::FAILURE;
        }
    };

    let options = FilterOptions::from_events(&events);

    info!("Areas: {}", options.town_choices().join(", "));
    info!("Tags: {}", options.tags.join(", "));

    let visible = config.filter.apply(&events);

    if visible.is_empty() {
        println!("{}", NO_EVENTS_MESSAGE);
    }

    for event in visible {
        let when = event
            .start
            .map(|start| format_date_range(&start, event.end.as_ref()))
            .unwrap_or_default();

        println!(
            "{} | {} | {} | {}",
            event.title,
            when,
            event.town,
            event.tags.iter().join(", ")
        );
    }

    if let Some(path) = &config.local_guide_path {
        match LocalGuide::load(path) {
            Ok(guide) => info!("Local guide covers: {}", guide.towns().join(", ")),
            Err(err) => warn!("Local guide unavailable: {}", err),
        }
    }

    ExitCode::SUCCESS
}
