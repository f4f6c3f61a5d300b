use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TAG_GROUP: Regex = Regex::new(r"\[([^\]]*)\]").expect("Failed to create tag regex");
}

/// Text with its `[tag, tag]` annotations pulled out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaggedText {
    pub clean: String,
    /// Unique tags, in the order they first appear.
    pub tags: Vec<String>,
}

pub fn parse_tags(text: &str) -> TaggedText {
    let tags = TAG_GROUP
        .captures_iter(text)
        .flat_map(|group| {
            group[1]
                .split(',')
                .map(|tag| strip_backslashes(tag.trim()))
                .collect::<Vec<String>>()
        })
        .filter(|tag| !tag.is_empty())
        .unique()
        .collect();

    TaggedText {
        clean: TAG_GROUP.replace_all(text, "").trim().to_string(),
        tags,
    }
}

fn strip_backslashes(tag: &str) -> String {
    tag.replace('\\', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn should_extract_every_tag_of_every_group() {
        let result = parse_tags("Sunset Yoga [Outdoors, Free] on the beach [Family,Weekly]");

        assert_eq!(result.tags, vec!["Outdoors", "Free", "Family", "Weekly"]);
        assert_eq!(result.clean, "Sunset Yoga  on the beach");
        assert!(!result.clean.contains('[') && !result.clean.contains(']'));
    }

    #[test_log::test]
    fn should_keep_first_occurrence_of_repeated_tags() {
        let result = parse_tags("[Music] Concert [music, Music]");

        assert_eq!(result.tags, vec!["Music", "music"]);
        assert_eq!(result.clean, "Concert");
    }

    #[test_log::test]
    fn should_skip_empty_pieces() {
        let result = parse_tags("Fireworks [ , Free,, ] []");

        assert_eq!(result.tags, vec!["Free"]);
        assert_eq!(result.clean, "Fireworks");
    }

    #[test_log::test]
    fn should_unescape_tag_pieces() {
        let result = parse_tags(r"Open Mic [Kids\; Teens]");

        assert_eq!(result.tags, vec!["Kids; Teens"]);
    }

    #[test_log::test]
    fn text_without_tags_should_only_be_trimmed() {
        let result = parse_tags("  Tide pool walk  ");

        assert!(result.tags.is_empty());
        assert_eq!(result.clean, "Tide pool walk");
    }
}
