//! CLI operations
//!
//! Each subcommand maps to one library operation. Results are produced as JSON
//! values so every output format can render them the same way.

use mentions::mentions::{
    apply_change_to_value, escape_html, find_start_of_mention_in_plain_text,
    get_end_of_last_mention, get_mentions, get_plain_text, get_substring_index,
    is_inside_of_mention, map_plain_text_index, scan, Boundary, MarkupEvent, SelectionChange,
    Template,
};
use mentions_config::OutputFormat;
use serde_json::{json, Value};

/// A parsed subcommand with its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Plain {
        value: String,
    },
    Mentions {
        value: String,
    },
    Events {
        value: String,
    },
    Map {
        value: String,
        index: usize,
        boundary: Boundary,
    },
    Locate {
        value: String,
        index: usize,
    },
    Apply {
        value: String,
        plain: String,
        selection: SelectionChange,
    },
    Markup {
        id: String,
        display: String,
        mention_type: Option<String>,
    },
    Escape {
        text: String,
    },
    Search {
        text: String,
        query: String,
        ignore_accents: bool,
    },
}

/// Parse a boundary policy name.
pub fn parse_boundary(name: &str) -> Result<Boundary, String> {
    match name {
        "start" => Ok(Boundary::Start),
        "end" => Ok(Boundary::End),
        "null" => Ok(Boundary::Null),
        other => Err(format!(
            "Unknown boundary '{}' (expected start, end or null)",
            other
        )),
    }
}

/// Run an operation against a compiled template.
pub fn execute(operation: &Operation, template: &Template) -> Result<Value, String> {
    tracing::debug!(?operation, template = template.source(), "executing");

    let result = match operation {
        Operation::Plain { value } => Value::String(get_plain_text(value, template)),
        Operation::Mentions { value } => json!({
            "mentions": get_mentions(value, template),
            "endOfLastMention": get_end_of_last_mention(value, template),
            "endsWithMention": template.ends_with_mention(value),
        }),
        Operation::Events { value } => {
            let events: Vec<MarkupEvent<'_>> = scan(value, template).collect();
            serde_json::to_value(events)
                .map_err(|e| format!("JSON serialization failed: {}", e))?
        }
        Operation::Map {
            value,
            index,
            boundary,
        } => json!({ "index": map_plain_text_index(value, template, *index, *boundary) }),
        Operation::Locate { value, index } => json!({
            "start": find_start_of_mention_in_plain_text(value, template, *index),
            "inside": is_inside_of_mention(value, template, *index),
        }),
        Operation::Apply {
            value,
            plain,
            selection,
        } => {
            let new_value = apply_change_to_value(value, template, plain, *selection);
            let plain_text = get_plain_text(&new_value, template);
            json!({ "value": new_value, "plainText": plain_text })
        }
        Operation::Markup {
            id,
            display,
            mention_type,
        } => Value::String(template.make_markup(id, display, mention_type.as_deref())),
        Operation::Escape { text } => Value::String(escape_html(text).into_owned()),
        Operation::Search {
            text,
            query,
            ignore_accents,
        } => json!({ "index": get_substring_index(text, query, *ignore_accents) }),
    };

    Ok(result)
}

/// Render a result in the requested output format.
pub fn format_output(value: &Value, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|e| format!("JSON serialization failed: {}", e)),
        OutputFormat::Yaml => {
            serde_yaml::to_string(value).map_err(|e| format!("YAML serialization failed: {}", e))
        }
        OutputFormat::Text => Ok(match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }),
    }
}
