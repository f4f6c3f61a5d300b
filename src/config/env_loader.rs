use crate::calendar::expiry::DEFAULT_GRACE_DAYS;
use crate::calendar::filter::FilterCriteria;
use crate::config::model::{Config, ConfigError, FeedConfig};
use chrono::Duration;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_FEED_URL: &str = "https://calendar.google.com/calendar/ical/0841982bf57ed3d9d6c39aacece5b0f25bc7bc5894b1c6750218d64a047c96f4%40group.calendar.google.com/public/basic.ics";
pub const DEFAULT_PROXY_BIND_ADDR: &str = "0.0.0.0:8888";
pub const DEFAULT_KNOWN_TOWNS: [&str; 9] = [
    "Seabrook",
    "Hampton Falls",
    "North Hampton",
    "Hampton",
    "Rye",
    "Salisbury",
    "Newburyport",
    "Portsmouth",
    "Exeter",
];

pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(|name| env::var(name).ok())
}

/// Builds the configuration from a variable lookup, so it can be fed something other than
/// the process environment.
pub fn load_config_from<F>(var: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let known_towns = match var("KNOWN_TOWNS") {
        Some(towns) => split_list(&towns),
        None => DEFAULT_KNOWN_TOWNS.iter().map(|town| town.to_string()).collect(),
    };
    let grace_days: i64 = load_number_config(&var, "EXPIRY_GRACE_DAYS", DEFAULT_GRACE_DAYS)?;

    Ok(Config {
        feed: FeedConfig {
            url: var("FEED_URL").unwrap_or_else(|| DEFAULT_FEED_URL.to_string()),
            max_retries: load_number_config(&var, "FEED_MAX_RETRIES", 0)?,
        },
        known_towns,
        grace_period: Duration::days(grace_days),
        proxy_bind_addr: var("PROXY_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_PROXY_BIND_ADDR.to_string()),
        local_guide_path: var("LOCAL_GUIDE_PATH").map(PathBuf::from),
        filter: FilterCriteria::from_controls(
            &var("FILTER_TOWN").unwrap_or_default(),
            split_list(&var("FILTER_TAGS").unwrap_or_default()).as_slice(),
            &var("FILTER_FROM").unwrap_or_default(),
            &var("FILTER_TO").unwrap_or_default(),
        ),
    })
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn load_number_config<F, N>(var: &F, name: &str, default: N) -> Result<N, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    N: FromStr + PartialOrd + Default,
{
    match var(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<N>()
            .ok()
            .filter(|number| *number >= N::default())
            .ok_or_else(|| ConfigError::InvalidNumber {
                name: name.to_string(),
                value,
            }),
    }
}
