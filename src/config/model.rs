use crate::calendar::filter::FilterCriteria;
use crate::calendar::town::TownClassifier;
use chrono::Duration;
use std::fmt::Display;
use std::path::PathBuf;

#[derive(Debug)]
pub struct Config {
    pub feed: FeedConfig,
    /// Ordered: the first town found in a location wins.
    pub known_towns: Vec<String>,
    pub grace_period: Duration,
    pub proxy_bind_addr: String,
    pub local_guide_path: Option<PathBuf>,
    /// Selection applied by the command-line listing.
    pub filter: FilterCriteria,
}

#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub url: String,
    pub max_retries: u32,
}

impl Config {
    pub fn town_classifier(&self) -> TownClassifier {
        TownClassifier::new(self.known_towns.iter().cloned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidNumber { name: String, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidNumber { name, value } => write!(
                f,
                "Invalid config '{}'. Expected a non-negative integer, got '{}'",
                name, value
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
