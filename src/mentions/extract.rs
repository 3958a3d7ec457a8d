//! Collecting mentions out of a marked-up value

use super::scanner::{scan, MarkupEvent};
use super::template::Template;
use super::text::char_len;
use serde::{Deserialize, Serialize};

/// An owned mention record, as found in a marked-up value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mention {
    pub id: String,
    /// Display text, after the template's display transform.
    pub display: String,
    #[serde(rename = "type")]
    pub mention_type: Option<String>,
    /// Offset of the markup in the marked-up value.
    pub index: usize,
    /// Offset of the display text in the plain text.
    pub plain_text_index: usize,
}

impl Mention {
    /// Offset in the plain text just past the display text.
    pub fn plain_text_end(&self) -> usize {
        self.plain_text_index + char_len(&self.display)
    }
}

/// All mentions in `value`, in source order.
pub fn get_mentions(value: &str, template: &Template) -> Vec<Mention> {
    scan(value, template)
        .filter_map(|event| match event {
            MarkupEvent::Mention(mention) => Some(Mention {
                id: mention.id.to_string(),
                display: mention.display.into_owned(),
                mention_type: mention.mention_type.map(str::to_string),
                index: mention.index,
                plain_text_index: mention.plain_text_index,
            }),
            MarkupEvent::Text(_) => None,
        })
        .collect()
}

/// Plain-text offset just past the last mention, or 0 if there is none.
pub fn get_end_of_last_mention(value: &str, template: &Template) -> usize {
    get_mentions(value, template)
        .last()
        .map(Mention::plain_text_end)
        .unwrap_or(0)
}
