//! Reconciling a plain-text edit into the marked-up value
//!
//! The input widget only knows the plain text and its selection before and
//! after a keystroke. From those, [`apply_change_to_value`] works out which
//! plain-text range was replaced and with what, maps that range into the
//! marked-up value and splices it.
//!
//! Mentions are atomic: a splice boundary strictly inside a mention's display
//! text is widened to the whole mention markup, so the mention is removed
//! rather than partially edited.
//!
//! Autocorrect and IME composition can change text outside the reported
//! selection. When the result does not project back to the expected plain
//! text, a single recovery pass re-derives the range from the first differing
//! char and the unchanged tail of the new text.

use super::index_map::{map_plain_text_index, Boundary};
use super::plain_text::get_plain_text;
use super::template::Template;
use super::text::{char_len, common_prefix_len, rfind, slice, slice_from, splice_string};

/// Selection offsets reported by the widget around an edit, in plain-text chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionChange {
    /// Selection start in the old plain text; unknown for programmatic changes.
    pub start_before: Option<usize>,
    /// Selection end in the old plain text; defaults to `start_before`.
    pub end_before: Option<usize>,
    /// Selection end (the caret) in the new plain text.
    pub end_after: usize,
}

impl SelectionChange {
    pub fn new(start_before: usize, end_before: usize, end_after: usize) -> Self {
        Self {
            start_before: Some(start_before),
            end_before: Some(end_before),
            end_after,
        }
    }

    /// A change where only the caret after the edit is known.
    pub fn caret_after(end_after: usize) -> Self {
        Self {
            start_before: None,
            end_before: None,
            end_after,
        }
    }
}

/// Compute the new marked-up value after the user changed the plain text of
/// `value` into `plain_text_value`.
///
/// `value` is never modified; the result is a new string. Ambiguous edits
/// degrade to a best-effort splice instead of failing.
pub fn apply_change_to_value(
    value: &str,
    template: &Template,
    plain_text_value: &str,
    selection: SelectionChange,
) -> String {
    let old_plain_text = get_plain_text(value, template);
    let old_len = char_len(&old_plain_text) as isize;
    let new_len = char_len(plain_text_value) as isize;
    let length_delta = old_len - new_len;
    let end_after = selection.end_after as isize;

    let mut start_before = selection
        .start_before
        .map(|start| start as isize)
        .unwrap_or(end_after + length_delta);
    let end_before = selection
        .end_before
        .map(|end| end as isize)
        .unwrap_or(start_before);

    // Nothing changed and nothing was selected
    if old_plain_text == plain_text_value && start_before == end_before && end_before == end_after {
        return value.to_string();
    }

    // Composed characters (e.g. a diacritic typed over a letter) replace one
    // char while the widget reports a collapsed, unmoved caret.
    if start_before == end_before && end_before == end_after && old_len == new_len {
        start_before -= 1;
    }

    let insert = slice(plain_text_value, clamp(start_before), clamp(end_after));

    let splice_start = start_before.min(end_after);
    let splice_end = if start_before == end_after {
        // Backspace / Delete without a range: cover everything that disappeared
        end_before.max(start_before + length_delta)
    } else {
        end_before
    };
    let (splice_start, splice_end) = (clamp(splice_start), clamp(splice_end));

    let will_remove_mention =
        map_plain_text_index(value, template, splice_start, Boundary::Null).is_none()
            || map_plain_text_index(value, template, splice_end, Boundary::Null).is_none();

    let new_value = splice_mapped(value, template, splice_start, splice_end, insert);

    if will_remove_mention {
        tracing::debug!(splice_start, splice_end, "edit touches a mention, removing it");
        return new_value;
    }

    let control_plain_text = get_plain_text(&new_value, template);
    if control_plain_text == plain_text_value {
        return new_value;
    }

    // Autocorrect changed text outside the selection
    let corrected_start = common_prefix_len(plain_text_value, &control_plain_text);
    let corrected_insert = slice(plain_text_value, corrected_start, clamp(end_after));
    let unchanged_tail = slice_from(plain_text_value, clamp(end_after));
    let corrected_end = match rfind(&old_plain_text, unchanged_tail) {
        Some(end) => end,
        None => {
            tracing::warn!(
                tail = unchanged_tail,
                "unchanged tail not found in previous plain text, keeping first splice"
            );
            splice_end
        }
    };

    tracing::debug!(
        corrected_start,
        corrected_end,
        insert = corrected_insert,
        "recovering from autocorrect"
    );

    splice_mapped(value, template, corrected_start, corrected_end, corrected_insert)
}

/// Splice `insert` over the plain-text range `start..end` of `value`,
/// widening the range over any mention it cuts into.
fn splice_mapped(value: &str, template: &Template, start: usize, end: usize, insert: &str) -> String {
    let mapped_start = map_boundary(value, template, start, Boundary::Start);
    let mapped_end = map_boundary(value, template, end, Boundary::End);
    splice_string(value, mapped_start, mapped_end, insert)
}

fn map_boundary(value: &str, template: &Template, index: usize, boundary: Boundary) -> usize {
    // Start and End always resolve to an offset
    map_plain_text_index(value, template, index, boundary).unwrap_or(index)
}

fn clamp(index: isize) -> usize {
    index.max(0) as usize
}
