use chrono::{DateTime, Local};
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Url;

pub const NO_EVENTS_MESSAGE: &str = "No upcoming events found. Check back soon!";

const DATE_FORMAT: &str = "%a, %b %-d, %Y";
const TIME_FORMAT: &str = "%-I:%M %p";

lazy_static! {
    static ref LINK_MARKUP: Regex = Regex::new(r"\{Link:\s*([^|}]*?)\s*\|\s*([^}]*?)\s*\}")
        .expect("Failed to create link markup regex");
}

/// `Sat, Jun 6, 2026 • 4:00 PM–8:00 PM`, or both dates when the event spans several days.
pub fn format_date_range(start: &DateTime<Local>, end: Option<&DateTime<Local>>) -> String {
    let date = start.format(DATE_FORMAT);
    let start_time = start.format(TIME_FORMAT);

    match end {
        None => format!("{date} • {start_time}"),
        Some(end) if end.date_naive() == start.date_naive() => {
            format!("{date} • {start_time}–{}", end.format(TIME_FORMAT))
        }
        Some(end) => format!(
            "{date} {start_time} → {} {}",
            end.format(DATE_FORMAT),
            end.format(TIME_FORMAT)
        ),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptionSegment<'a> {
    Text(&'a str),
    Link { label: &'a str, url: &'a str },
}

/// Splits a description around its `{Link: label | url}` tokens.
pub fn description_segments(description: &str) -> Vec<DescriptionSegment<'_>> {
    let mut segments = Vec::new();
    let mut last_end = 0;

    for captures in LINK_MARKUP.captures_iter(description) {
        let (Some(token), Some(label), Some(url)) = (captures.get(0), captures.get(1), captures.get(2))
        else {
            continue;
        };

        if token.start() > last_end {
            segments.push(DescriptionSegment::Text(&description[last_end..token.start()]));
        }

        segments.push(DescriptionSegment::Link {
            label: label.as_str(),
            url: url.as_str(),
        });
        last_end = token.end();
    }

    if last_end < description.len() {
        segments.push(DescriptionSegment::Text(&description[last_end..]));
    }

    segments
}

/// Escaped HTML for a description, with link tokens turned into anchors. Links that aren't
/// http(s) are rendered as their label.
pub fn render_description_html(description: &str) -> String {
    description_segments(description)
        .into_iter()
        .map(|segment| match segment {
            DescriptionSegment::Text(text) => escape_html(text).replace('\n', "<br>"),
            DescriptionSegment::Link { label, url } => {
                let label = if label.is_empty() { url } else { label };

                match safe_url(url) {
                    Some(url) => format!(
                        r#"<a href="{}" target="_blank" rel="noreferrer">{}</a>"#,
                        escape_html(url.as_str()),
                        escape_html(label)
                    ),
                    None => escape_html(label),
                }
            }
        })
        .collect()
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

/// Parses `raw` as an absolute http or https URL.
pub fn safe_url(raw: &str) -> Option<Url> {
    Url::parse(raw.trim())
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
}
