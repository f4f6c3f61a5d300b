use super::date::{end_of_day, start_of_day};
use super::model::EventRecord;
use super::town::OTHER_TOWN;
use chrono::NaiveDate;
use itertools::Itertools;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Value of the town control that disables town filtering.
pub const ALL_TOWNS: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TownFilter {
    #[default]
    All,
    Only(String),
}

impl TownFilter {
    pub fn from_control(value: &str) -> Self {
        let value = value.trim();

        if value.is_empty() || value == ALL_TOWNS {
            TownFilter::All
        } else {
            TownFilter::Only(value.to_string())
        }
    }

    pub fn matches(&self, town: &str) -> bool {
        match self {
            TownFilter::All => true,
            TownFilter::Only(selected) => selected == town,
        }
    }
}

/// Inclusive range of calendar days; a missing bound is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    fn overlaps(&self, event: &EventRecord) -> bool {
        if self.is_unbounded() {
            return true;
        }

        let Some(start) = event.start else {
            return false;
        };
        let end = event.end_or_start().unwrap_or(start);

        if let Some(range_start) = self.from.and_then(start_of_day) {
            if end < range_start {
                return false;
            }
        }

        if let Some(range_end) = self.to.and_then(end_of_day) {
            if start > range_end {
                return false;
            }
        }

        true
    }
}

/// What the visitor selected. The default value is the cleared state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub town: TownFilter,
    /// All of these must be present on an event.
    pub tags: BTreeSet<String>,
    pub date_range: DateRange,
}

impl FilterCriteria {
    /// Builds criteria from raw control values. Blank tags (the placeholder option) are
    /// ignored, and a date that isn't `YYYY-MM-DD` leaves its bound open.
    pub fn from_controls<S: AsRef<str>>(town: &str, tags: &[S], from: &str, to: &str) -> Self {
        Self {
            town: TownFilter::from_control(town),
            tags: tags
                .iter()
                .map(|tag| tag.as_ref().trim())
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect(),
            date_range: DateRange {
                from: parse_date_control(from),
                to: parse_date_control(to),
            },
        }
    }

    pub fn matches(&self, event: &EventRecord) -> bool {
        self.town.matches(&event.town)
            && self.tags.iter().all(|tag| event.has_tag(tag))
            && self.date_range.overlaps(event)
    }

    /// Whether each event is shown, index for index.
    pub fn visibility(&self, events: &[EventRecord]) -> Vec<bool> {
        events.iter().map(|event| self.matches(event)).collect()
    }

    pub fn apply<'a>(&self, events: &'a [EventRecord]) -> Vec<&'a EventRecord> {
        let visible: Vec<&EventRecord> = events.iter().filter(|event| self.matches(event)).collect();

        debug!("{} of {} events match {:?}", visible.len(), events.len(), self);

        visible
    }
}

fn parse_date_control(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    if value.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .inspect_err(|err| warn!("Ignoring invalid date '{}': {}", value, err))
        .ok()
}

/// Choices for the filter controls, derived from the loaded events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub towns: Vec<String>,
    pub tags: Vec<String>,
}

impl FilterOptions {
    pub fn from_events(events: &[EventRecord]) -> Self {
        Self {
            towns: events
                .iter()
                .map(|event| {
                    if event.town.is_empty() {
                        OTHER_TOWN
                    } else {
                        event.town.as_str()
                    }
                })
                .unique()
                .sorted()
                .map(str::to_string)
                .collect(),
            tags: events
                .iter()
                .flat_map(|event| event.tags.iter())
                .unique()
                .sorted()
                .cloned()
                .collect(),
        }
    }

    /// Town control values, headed by the "all" option.
    pub fn town_choices(&self) -> impl Iterator<Item = &str> {
        std::iter::once(ALL_TOWNS).chain(self.towns.iter().map(String::as_str))
    }
}
