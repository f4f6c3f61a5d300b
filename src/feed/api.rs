use crate::calendar::expiry::remove_expired;
use crate::calendar::model::EventRecord;
use crate::calendar::parse_events;
use crate::calendar::town::TownClassifier;
use chrono::{DateTime, Duration, Local};
use reqwest::{Client, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::policies::ExponentialBackoff;
use reqwest_retry::RetryTransientMiddleware;
use std::fmt::{Display, Formatter};
use tracing::{error, info, instrument};

pub const FEED_ERROR_MESSAGE: &str =
    "We\u{2019}re having trouble loading events right now. Please try again later.";

pub fn build_client(max_retries: u32) -> ClientWithMiddleware {
    ClientBuilder::new(Client::new())
        .with(RetryTransientMiddleware::new_with_policy(
            ExponentialBackoff::builder().build_with_max_retries(max_retries),
        ))
        .build()
}

/// Reads the public calendar feed, either directly or through the proxy.
#[derive(Debug, Clone)]
pub struct CalendarFeedAPI {
    client: ClientWithMiddleware,
    feed_url: String,
}

impl CalendarFeedAPI {
    pub fn new(feed_url: impl Into<String>, max_retries: u32) -> Self {
        Self {
            client: build_client(max_retries),
            feed_url: feed_url.into(),
        }
    }

    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }

    #[instrument(skip(self), fields(feed_url = %self.feed_url))]
    pub async fn fetch_raw(&self) -> Result<String, FeedError> {
        let response = self
            .client
            .get(&self.feed_url)
            .send()
            .await
            .map_err(|err| {
                error!("Error sending request: {}", err);
                FeedError::Request(err)
            })?;

        let status = response.status();

        if !status.is_success() {
            error!("Feed request failed with status {}", status);
            return Err(FeedError::Status(status));
        }

        let ics = response.text().await.map_err(|err| {
            error!("Received invalid response: {}", err);
            FeedError::Body(err)
        })?;

        info!("Fetched feed ({} bytes)", ics.len());

        Ok(ics)
    }

    /// Fetches and parses the feed, leaving out events that ended before `now - grace_period`.
    pub async fn get_events(
        &self,
        towns: &TownClassifier,
        now: DateTime<Local>,
        grace_period: Duration,
    ) -> Result<Vec<EventRecord>, FeedError> {
        let ics = self.fetch_raw().await?;

        Ok(remove_expired(parse_events(&ics, towns), now, grace_period))
    }
}

#[derive(Debug)]
pub enum FeedError {
    Request(reqwest_middleware::Error),
    Status(StatusCode),
    Body(reqwest::Error),
}

impl FeedError {
    /// What visitors see instead of the event list, whatever the cause.
    pub fn user_message(&self) -> &'static str {
        FEED_ERROR_MESSAGE
    }
}

impl Display for FeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedError::Request(err) => write!(f, "ICS request failed: {}", err),
            FeedError::Status(status) => write!(f, "ICS fetch failed: {}", status.as_u16()),
            FeedError::Body(err) => write!(f, "ICS body could not be read: {}", err),
        }
    }
}

impl std::error::Error for FeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeedError::Request(err) => Some(err),
            FeedError::Status(_) => None,
            FeedError::Body(err) => Some(err),
        }
    }
}
