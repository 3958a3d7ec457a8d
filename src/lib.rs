//! # mentions
//!
//! Bidirectional mapping between mention markup and the plain text a user
//! edits in a text input.
//!
//! A markup template such as `@[__display__](__id__)` describes how a mention
//! is stored. The library projects stored values into plain text, maps
//! plain-text offsets back into the stored value, and turns a plain-text edit
//! (old selection, new text, new caret) into the new stored value while
//! keeping mentions atomic.
//!
//! ```text
//! value:  Hi @[John](u1), how are you?
//! plain:  Hi John, how are you?
//! ```
//!
//! Everything lives in the [`mentions`] module; the most used items are
//! re-exported here.

pub mod mentions;

pub use mentions::{
    apply_change_to_value, get_mentions, get_plain_text, map_plain_text_index, Boundary, Mention,
    SelectionChange, Template, TemplateError,
};
