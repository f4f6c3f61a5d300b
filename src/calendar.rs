pub mod date;
pub mod display;
pub mod expiry;
pub mod filter;
pub mod ics;
pub mod model;
pub mod tags;
pub mod town;

use self::date::parse_ics_date;
use self::ics::{split_event_blocks, unfold_lines, EventFields};
use self::model::{EventRecord, UNTITLED_EVENT};
use self::tags::parse_tags;
use self::town::TownClassifier;
use itertools::Itertools;
use std::cmp::Ordering;
use tracing::{debug, info, instrument, trace};
use uuid::Uuid;

/// Turns a raw calendar feed into event records sorted by start.
///
/// Entries repeating an already seen `UID` and start are dropped. Entries without a
/// start keep their relative order and go after the dated ones.
#[instrument(skip_all, fields(feed_len = ics.len()))]
pub fn parse_events(ics: &str, towns: &TownClassifier) -> Vec<EventRecord> {
    let unfolded = unfold_lines(ics);
    let blocks = split_event_blocks(&unfolded);

    debug!("Found {} event blocks", blocks.len());

    let mut events: Vec<EventRecord> = blocks
        .into_iter()
        .map(|block| assemble_event(&EventFields::from_block(block), towns))
        .unique_by(|event| (event.id.clone(), event.start))
        .collect();

    events.sort_by(compare_start);

    info!("Parsed {} events", events.len());

    events
}

pub fn assemble_event(fields: &EventFields, towns: &TownClassifier) -> EventRecord {
    let summary = parse_tags(fields.summary.as_deref().unwrap_or_default());
    let description = parse_tags(fields.description.as_deref().unwrap_or_default());

    let id = fields.uid.clone().unwrap_or_else(|| {
        let id = Uuid::new_v4().to_string();
        debug!("Event '{}' has no UID, using {}", summary.clean, id);
        id
    });

    let title = if summary.clean.is_empty() {
        UNTITLED_EVENT.to_string()
    } else {
        summary.clean
    };

    let event = EventRecord {
        id,
        title,
        description: description.clean,
        town: towns.classify(fields.location.as_deref()),
        location: fields.location.clone().unwrap_or_default(),
        tags: summary.tags.into_iter().chain(description.tags).collect(),
        start: fields.start.as_deref().and_then(parse_ics_date),
        end: fields.end.as_deref().and_then(parse_ics_date),
    };

    trace!("Assembled event {:?}", event);

    event
}

fn compare_start(a: &EventRecord, b: &EventRecord) -> Ordering {
    match (a.start, b.start) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
