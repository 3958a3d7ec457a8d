//! Mapping plain-text offsets back into the marked-up value

use super::scanner::{scan, MarkupEvent};
use super::template::Template;
use super::text::char_len;

/// What to return for an offset that falls strictly inside a mention's display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Boundary {
    /// The offset where the mention's markup starts.
    #[default]
    Start,
    /// The offset just past the mention's markup.
    End,
    /// No offset at all.
    Null,
}

/// Map the plain-text offset `index` to an offset in the marked-up `value`.
///
/// Offsets in literal text map one to one. An offset at the edge of a mention
/// belongs to the neighbouring literal run, so only offsets strictly inside a
/// display span are resolved through `boundary`. Offsets past the end of the
/// plain text map to the end of `value`.
///
/// Returns `None` only for [`Boundary::Null`] inside a mention.
pub fn map_plain_text_index(
    value: &str,
    template: &Template,
    index: usize,
    boundary: Boundary,
) -> Option<usize> {
    for event in scan(value, template) {
        match event {
            MarkupEvent::Text(run) => {
                if run.plain_text_index + char_len(run.text) >= index {
                    return Some(run.index + index.saturating_sub(run.plain_text_index));
                }
            }
            MarkupEvent::Mention(mention) => {
                if mention.plain_text_end() > index {
                    return match boundary {
                        Boundary::Start => Some(mention.index),
                        Boundary::End => Some(mention.end()),
                        Boundary::Null => None,
                    };
                }
            }
        }
    }

    Some(char_len(value))
}
