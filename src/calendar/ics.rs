use lazy_static::lazy_static;
use regex::Regex;

const BEGIN_EVENT: &str = "BEGIN:VEVENT";
const END_EVENT: &str = "END:VEVENT";

lazy_static! {
    static ref FOLDED_LINE: Regex = Regex::new(r"\r?\n[ \t]").expect("Failed to create folding regex");
}

/// Joins continuation lines (a line break followed by one space or tab) onto the line before them.
pub fn unfold_lines(ics: &str) -> String {
    FOLDED_LINE.replace_all(ics, "").into_owned()
}

/// Returns the text of every `VEVENT` entry, in feed order.
///
/// The split is naive: whatever precedes the first begin marker is dropped, and an entry
/// without an end marker runs until the next begin marker (or the end of the feed).
pub fn split_event_blocks(ics: &str) -> Vec<&str> {
    ics.split(BEGIN_EVENT)
        .skip(1)
        .map(|chunk| chunk.split_once(END_EVENT).map_or(chunk, |(block, _)| block))
        .collect()
}

/// Finds the first `NAME[;PARAMS]:VALUE` line of the block whose name matches `name`
/// (case-insensitively) and returns its trimmed, unescaped value.
pub fn property(block: &str, name: &str) -> Option<String> {
    block.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        let property_name = key.split_once(';').map_or(key, |(property_name, _)| property_name);

        property_name
            .trim()
            .eq_ignore_ascii_case(name)
            .then(|| unescape_text(value.trim()))
    })
}

/// Undoes the feed's text escaping: `\n` becomes a newline, `\,` a comma, and any other
/// backslash is dropped in favour of the character it escapes.
pub fn unescape_text(value: &str) -> String {
    let value = value
        .replace("\\n", "\n")
        .replace("\\N", "\n")
        .replace("\\,", ",");

    let mut unescaped = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                unescaped.push(escaped);
            }
        } else {
            unescaped.push(c);
        }
    }

    unescaped
}

/// Raw property values of one entry. `None` means the property was not in the entry at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFields {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub uid: Option<String>,
}

impl EventFields {
    pub fn from_block(block: &str) -> Self {
        Self {
            summary: property(block, "SUMMARY"),
            description: property(block, "DESCRIPTION"),
            location: property(block, "LOCATION"),
            start: property(block, "DTSTART"),
            end: property(block, "DTEND"),
            uid: property(block, "UID").filter(|uid| !uid.is_empty()),
        }
    }
}
