//! Markup scanning
//!
//! Walks a marked-up value left to right and yields an ordered stream of
//! literal runs and mention occurrences. Every other operation (index mapping,
//! mention lookup, extraction) is a consumer of this stream.
//!
//! Stream shape, for a value with matches `m1 .. mn`:
//!
//! ```text
//! Text(before m1) Mention(m1) Text(between m1 and m2) Mention(m2) ... Text(tail)
//! ```
//!
//! The run in front of each mention is emitted even when empty, the tail run
//! only when non-empty. Offsets are in chars. The plain-text counter advances
//! by the transformed display length of each mention.

use super::template::Template;
use super::text::char_len;
use regex::CaptureMatches;
use serde::Serialize;
use std::borrow::Cow;
use std::iter::FusedIterator;

/// A run of literal text between mentions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextRun<'v> {
    pub text: &'v str,
    /// Offset of the run in the marked-up value.
    pub index: usize,
    /// Offset of the run in the plain text.
    pub plain_text_index: usize,
}

/// A single mention found in the marked-up value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MentionOccurrence<'v> {
    /// The whole matched markup, e.g. `@[John](u1)`.
    pub markup: &'v str,
    /// Offset of the markup in the marked-up value.
    pub index: usize,
    /// Offset of the display text in the plain text.
    pub plain_text_index: usize,
    pub id: &'v str,
    /// Display text, after the template's display transform.
    pub display: Cow<'v, str>,
    #[serde(rename = "type")]
    pub mention_type: Option<&'v str>,
    /// Plain-text offset where the literal run before this mention ends.
    pub preceding_plain_text_end: usize,
}

impl MentionOccurrence<'_> {
    /// Offset in the marked-up value just past the markup.
    pub fn end(&self) -> usize {
        self.index + char_len(self.markup)
    }

    pub fn display_len(&self) -> usize {
        char_len(&self.display)
    }

    /// Offset in the plain text just past the display text.
    pub fn plain_text_end(&self) -> usize {
        self.plain_text_index + self.display_len()
    }
}

/// One event of the scan stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkupEvent<'v> {
    Text(TextRun<'v>),
    Mention(MentionOccurrence<'v>),
}

/// Iterator over the events of a marked-up value.
///
/// Owns its own scan position; create a fresh one with [`scan`] to restart.
pub struct MentionsIter<'v, 't> {
    value: &'v str,
    template: &'t Template,
    matches: CaptureMatches<'t, 'v>,
    byte_cursor: usize,
    char_cursor: usize,
    plain_text_index: usize,
    pending: Option<MentionOccurrence<'v>>,
    done: bool,
}

/// Scan `value` for mentions of `template`.
pub fn scan<'v, 't>(value: &'v str, template: &'t Template) -> MentionsIter<'v, 't> {
    MentionsIter {
        value,
        template,
        matches: template.pattern().captures_iter(value),
        byte_cursor: 0,
        char_cursor: 0,
        plain_text_index: 0,
        pending: None,
        done: false,
    }
}

impl<'v> Iterator for MentionsIter<'v, '_> {
    type Item = MarkupEvent<'v>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(mention) = self.pending.take() {
            return Some(MarkupEvent::Mention(mention));
        }
        if self.done {
            return None;
        }

        let Some(captures) = self.matches.next() else {
            self.done = true;
            tracing::trace!(
                chars = self.char_cursor,
                plain_text_len = self.plain_text_index,
                "markup scan finished"
            );
            if self.byte_cursor < self.value.len() {
                return Some(MarkupEvent::Text(TextRun {
                    text: &self.value[self.byte_cursor..],
                    index: self.char_cursor,
                    plain_text_index: self.plain_text_index,
                }));
            }
            return None;
        };

        let whole = captures.get(0)?;
        let text = &self.value[self.byte_cursor..whole.start()];
        let run = TextRun {
            text,
            index: self.char_cursor,
            plain_text_index: self.plain_text_index,
        };
        let text_len = char_len(text);
        self.plain_text_index += text_len;

        let (id, display, mention_type) = self.template.extract(&captures);
        let mention = MentionOccurrence {
            markup: whole.as_str(),
            index: self.char_cursor + text_len,
            plain_text_index: self.plain_text_index,
            id,
            display: self.template.display_for(id, display, mention_type),
            mention_type,
            preceding_plain_text_end: run.plain_text_index + text_len,
        };
        self.plain_text_index += mention.display_len();
        self.char_cursor = mention.end();
        self.byte_cursor = whole.end();
        self.pending = Some(mention);

        Some(MarkupEvent::Text(run))
    }
}

impl FusedIterator for MentionsIter<'_, '_> {}

/// Callback form of [`scan`]: `on_text` for each literal run, `on_mention`
/// for each mention, in source order.
pub fn iterate_mentions_markup<T, M>(
    value: &str,
    template: &Template,
    mut on_text: T,
    mut on_mention: M,
) where
    T: FnMut(&TextRun<'_>),
    M: FnMut(&MentionOccurrence<'_>),
{
    for event in scan(value, template) {
        match &event {
            MarkupEvent::Text(run) => on_text(run),
            MarkupEvent::Mention(mention) => on_mention(mention),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> Template {
        Template::parse("@[__display__](__id__)").unwrap()
    }

    #[test]
    fn test_no_mentions_is_single_run() {
        let template = template();
        let events: Vec<_> = scan("plain text", &template).collect();
        assert_eq!(
            events,
            vec![MarkupEvent::Text(TextRun {
                text: "plain text",
                index: 0,
                plain_text_index: 0
            })]
        );
    }

    #[test]
    fn test_empty_value_has_no_events() {
        let template = template();
        assert_eq!(scan("", &template).count(), 0);
    }

    #[test]
    fn test_leading_mention_gets_empty_run() {
        let template = template();
        let events: Vec<_> = scan("@[a](1)@[b](2)", &template).collect();
        assert_eq!(events.len(), 4);
        assert!(matches!(&events[0], MarkupEvent::Text(run) if run.text.is_empty()));
        assert!(matches!(&events[2], MarkupEvent::Text(run) if run.text.is_empty() && run.index == 7));
        match &events[3] {
            MarkupEvent::Mention(mention) => {
                assert_eq!(mention.id, "2");
                assert_eq!(mention.index, 7);
                assert_eq!(mention.plain_text_index, 1);
                assert_eq!(mention.end(), 14);
            }
            other => panic!("expected mention, got {other:?}"),
        }
    }

    #[test]
    fn test_offsets_count_chars() {
        let template = template();
        let mentions: Vec<_> = scan("héé @[Zoë](z) ok", &template)
            .filter_map(|event| match event {
                MarkupEvent::Mention(mention) => Some(mention),
                MarkupEvent::Text(_) => None,
            })
            .collect();
        assert_eq!(mentions[0].index, 4);
        assert_eq!(mentions[0].plain_text_index, 4);
        assert_eq!(mentions[0].plain_text_end(), 7);
    }

    #[test]
    fn test_transform_affects_plain_text_offsets() {
        let template = template().with_display_transform(|_, display, _| format!("@{display}"));
        let mut runs = Vec::new();
        iterate_mentions_markup(
            "@[John](u1) hi",
            &template,
            |run| runs.push((run.text.to_string(), run.plain_text_index)),
            |_| {},
        );
        assert_eq!(runs, vec![(String::new(), 0), (" hi".to_string(), 5)]);
    }

    #[test]
    fn test_type_is_read_when_present() {
        let template = Template::parse("@[__display__](__type__:__id__)").unwrap();
        let mut seen = Vec::new();
        iterate_mentions_markup("x @[Ann](user:7)", &template, |_| {}, |mention| {
            seen.push((
                mention.id.to_string(),
                mention.display.to_string(),
                mention.mention_type.map(str::to_string),
                mention.preceding_plain_text_end,
            ))
        });
        assert_eq!(
            seen,
            vec![("7".to_string(), "Ann".to_string(), Some("user".to_string()), 2)]
        );
    }
}
