use chrono::{DateTime, Local};
use std::collections::BTreeSet;

pub const UNTITLED_EVENT: &str = "(Untitled event)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    /// Feed `UID`, or a random one when the entry had none (not stable across fetches).
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub town: String,
    pub tags: BTreeSet<String>,
    pub start: Option<DateTime<Local>>,
    pub end: Option<DateTime<Local>>,
}

impl EventRecord {
    /// End of the event, treating a missing end as coinciding with the start.
    pub fn end_or_start(&self) -> Option<DateTime<Local>> {
        self.end.or(self.start)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}
