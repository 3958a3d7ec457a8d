//! Locating the mention under a plain-text offset

use super::scanner::{scan, MarkupEvent};
use super::template::Template;

/// Plain-text start of the mention whose display span contains `index`.
///
/// Returns `index` itself when no mention covers it. A mention covers
/// `start..start + display_len`, so an offset at the very start of a mention
/// also returns `index` unchanged.
pub fn find_start_of_mention_in_plain_text(value: &str, template: &Template, index: usize) -> usize {
    scan(value, template)
        .find_map(|event| match event {
            MarkupEvent::Mention(mention)
                if mention.plain_text_index <= index && index < mention.plain_text_end() =>
            {
                Some(mention.plain_text_index)
            }
            _ => None,
        })
        .unwrap_or(index)
}

/// Whether `index` sits strictly inside a mention's display text.
pub fn is_inside_of_mention(value: &str, template: &Template, index: usize) -> bool {
    find_start_of_mention_in_plain_text(value, template, index) != index
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALUE: &str = "Hi @[John](u1), how are you?";

    fn template() -> Template {
        Template::parse("@[__display__](__id__)").unwrap()
    }

    #[test]
    fn test_finds_mention_start() {
        let template = template();
        for index in 3..7 {
            assert_eq!(find_start_of_mention_in_plain_text(VALUE, &template, index), 3);
        }
        assert_eq!(find_start_of_mention_in_plain_text(VALUE, &template, 7), 7);
        assert_eq!(find_start_of_mention_in_plain_text(VALUE, &template, 1), 1);
    }

    #[test]
    fn test_is_inside_of_mention() {
        let template = template();
        assert!(!is_inside_of_mention(VALUE, &template, 3));
        assert!(is_inside_of_mention(VALUE, &template, 4));
        assert!(is_inside_of_mention(VALUE, &template, 6));
        assert!(!is_inside_of_mention(VALUE, &template, 7));
    }

    #[test]
    fn test_second_of_adjacent_mentions() {
        let template = template();
        assert_eq!(find_start_of_mention_in_plain_text("@[ab](1)@[cd](2)", &template, 3), 2);
    }
}
