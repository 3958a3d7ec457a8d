//! Mention markup engine
//!
//! Converts between the stored, marked-up value (plain text interleaved with
//! mention tokens such as `@[John](u1)`) and the plain text shown in a text
//! input, and reconciles plain-text edits back into the marked-up value.
//!
//! Layering, leaf first:
//!
//!   template     compile `@[__display__](__id__)`-style templates
//!   scanner      ordered stream of literal runs and mentions
//!   plain_text   value -> plain text
//!   index_map    plain-text offset -> value offset
//!   locate       mention under a plain-text offset
//!   extract      owned mention records
//!   reconcile    plain-text edit -> new value
//!
//! plus the independent helpers `suggestions`, `search` and `escape`.
//!
//! All operations are pure: they take the full value on every call and return
//! new strings. Offsets count chars, see [`text`].

pub mod error;
pub mod escape;
pub mod extract;
pub mod index_map;
pub mod locate;
pub mod plain_text;
pub mod reconcile;
pub mod scanner;
pub mod search;
pub mod suggestions;
pub mod template;
pub mod text;

pub use error::{Result, TemplateError};
pub use escape::escape_html;
pub use extract::{get_end_of_last_mention, get_mentions, Mention};
pub use index_map::{map_plain_text_index, Boundary};
pub use locate::{find_start_of_mention_in_plain_text, is_inside_of_mention};
pub use plain_text::get_plain_text;
pub use reconcile::{apply_change_to_value, SelectionChange};
pub use scanner::{iterate_mentions_markup, scan, MarkupEvent, MentionOccurrence, MentionsIter, TextRun};
pub use search::get_substring_index;
pub use suggestions::{
    count_suggestions, get_suggestion, get_suggestions, SuggestionDescriptor, SuggestionEntry,
    SuggestionGroup, Suggestions,
};
pub use template::{
    escape_regex, get_position_of_capturing_group, make_mentions_markup, markup_to_regex,
    DisplayTransform, Parameter, Template,
};
pub use text::splice_string;
