//! Markup template compilation
//!
//! A template is literal delimiter text with up to three placeholders, e.g.
//! `@[__display__](__id__)`. Compiling it yields:
//!
//! - the scan pattern: literals escaped, each placeholder replaced by a
//!   non-greedy `(.+?)` group
//! - an end-anchored variant of the same pattern
//! - the capture-group position of every parameter
//!
//! Positions are the rank of each placeholder's first occurrence in the
//! template. When only one of `__id__` / `__display__` is present, both
//! parameters read the same group. Only the first occurrence of a placeholder
//! becomes a group; repeated placeholders are matched as literal text.

use super::error::{Result, TemplateError};
use logos::Logos;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Caller-supplied rewrite of a mention's display string: `(id, display, type) -> display'`.
///
/// Must be deterministic, otherwise plain-text offsets drift between calls.
pub type DisplayTransform = Arc<dyn Fn(&str, &str, Option<&str>) -> String + Send + Sync>;

/// Tokens of the template mini-language
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateToken {
    #[token("__id__")]
    Id,

    #[token("__display__")]
    Display,

    #[token("__type__")]
    Type,

    // Anything without an underscore, or a lone underscore
    #[regex(r"[^_]+")]
    Literal,

    #[token("_")]
    Underscore,
}

impl TemplateToken {
    fn parameter(self) -> Option<Parameter> {
        match self {
            TemplateToken::Id => Some(Parameter::Id),
            TemplateToken::Display => Some(Parameter::Display),
            TemplateToken::Type => Some(Parameter::Type),
            TemplateToken::Literal | TemplateToken::Underscore => None,
        }
    }
}

/// Logical mention parameters a template can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    Id,
    Display,
    Type,
}

impl Parameter {
    /// The placeholder token for this parameter.
    pub fn placeholder(self) -> &'static str {
        match self {
            Parameter::Id => "__id__",
            Parameter::Display => "__display__",
            Parameter::Type => "__type__",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Parameter::Id => "id",
            Parameter::Display => "display",
            Parameter::Type => "type",
        };
        f.write_str(name)
    }
}

impl FromStr for Parameter {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "id" => Ok(Parameter::Id),
            "display" => Ok(Parameter::Display),
            "type" => Ok(Parameter::Type),
            other => Err(TemplateError::UnknownParameter(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(Parameter),
}

/// Zero-based capture-group positions (group 0 is the whole match, so the
/// regex group index is `position + 1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupPositions {
    pub id: usize,
    pub display: usize,
    pub mention_type: Option<usize>,
}

/// A compiled markup template, optionally bound to a display transform.
#[derive(Clone)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
    pattern: Regex,
    anchored: Regex,
    positions: GroupPositions,
    display_transform: Option<DisplayTransform>,
}

impl Template {
    /// Compile a template string.
    pub fn parse(template: &str) -> Result<Self> {
        let segments = tokenize(template);
        let positions = group_positions(template, &segments)?;

        let body = segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => Cow::Owned(escape_regex(text)),
                Segment::Placeholder(_) => Cow::Borrowed("(.+?)"),
            })
            .collect::<String>();
        let pattern = Regex::new(&body)?;
        let anchored = Regex::new(&format!("{body}$"))?;

        tracing::trace!(template, pattern = pattern.as_str(), "compiled markup template");

        Ok(Self {
            source: template.to_string(),
            segments,
            pattern,
            anchored,
            positions,
            display_transform: None,
        })
    }

    /// Bind a display transform applied wherever a mention's display is produced.
    pub fn with_display_transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(&str, &str, Option<&str>) -> String + Send + Sync + 'static,
    {
        self.display_transform = Some(Arc::new(transform));
        self
    }

    /// The template string this was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The global scan pattern.
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// The scan pattern, or its end-anchored variant when `match_at_end` is set.
    pub fn regex(&self, match_at_end: bool) -> &Regex {
        if match_at_end {
            &self.anchored
        } else {
            &self.pattern
        }
    }

    pub fn positions(&self) -> GroupPositions {
        self.positions
    }

    /// Capture-group position of `parameter`; `None` for an absent `type`.
    pub fn position_of(&self, parameter: Parameter) -> Option<usize> {
        match parameter {
            Parameter::Id => Some(self.positions.id),
            Parameter::Display => Some(self.positions.display),
            Parameter::Type => self.positions.mention_type,
        }
    }

    pub fn display_transform(&self) -> Option<&DisplayTransform> {
        self.display_transform.as_ref()
    }

    /// Apply the display transform (if any) to a raw display string.
    pub fn display_for<'a>(
        &self,
        id: &str,
        display: &'a str,
        mention_type: Option<&str>,
    ) -> Cow<'a, str> {
        match &self.display_transform {
            Some(transform) => Cow::Owned(transform(id, display, mention_type)),
            None => Cow::Borrowed(display),
        }
    }

    /// Read `(id, display, type)` out of a match of [`Template::pattern`].
    ///
    /// The display is the raw captured text, before any transform.
    pub fn extract<'v>(&self, captures: &Captures<'v>) -> (&'v str, &'v str, Option<&'v str>) {
        let group = |position: usize| {
            captures
                .get(position + 1)
                .map(|m| m.as_str())
                .unwrap_or_default()
        };
        let id = group(self.positions.id);
        let display = group(self.positions.display);
        let mention_type = self.positions.mention_type.map(group);
        (id, display, mention_type)
    }

    /// Serialize a single mention into markup.
    ///
    /// Each placeholder is substituted once; an absent type becomes empty text.
    pub fn make_markup(&self, id: &str, display: &str, mention_type: Option<&str>) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.as_str(),
                Segment::Placeholder(Parameter::Id) => id,
                Segment::Placeholder(Parameter::Display) => display,
                Segment::Placeholder(Parameter::Type) => mention_type.unwrap_or_default(),
            })
            .collect()
    }

    /// Whether `value` ends with a mention.
    pub fn ends_with_mention(&self, value: &str) -> bool {
        self.anchored.is_match(value)
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("source", &self.source)
            .field("pattern", &self.pattern.as_str())
            .field("positions", &self.positions)
            .field("display_transform", &self.display_transform.is_some())
            .finish()
    }
}

/// Split a template into literal runs and placeholders.
///
/// Only the first occurrence of each placeholder is kept as a placeholder.
fn tokenize(template: &str) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();
    let mut seen: Vec<Parameter> = Vec::new();
    let mut lexer = TemplateToken::lexer(template);

    while let Some(token) = lexer.next() {
        let slice = lexer.slice();
        match token.ok().and_then(TemplateToken::parameter) {
            Some(parameter) if !seen.contains(&parameter) => {
                seen.push(parameter);
                segments.push(Segment::Placeholder(parameter));
            }
            _ => {
                if let Some(Segment::Literal(existing)) = segments.last_mut() {
                    existing.push_str(slice);
                } else {
                    segments.push(Segment::Literal(slice.to_string()));
                }
            }
        }
    }

    segments
}

fn group_positions(template: &str, segments: &[Segment]) -> Result<GroupPositions> {
    let order: Vec<Parameter> = segments
        .iter()
        .filter_map(|segment| match segment {
            Segment::Placeholder(parameter) => Some(*parameter),
            Segment::Literal(_) => None,
        })
        .collect();
    let rank = |parameter: Parameter| order.iter().position(|p| *p == parameter);

    let (id, display) = match (rank(Parameter::Id), rank(Parameter::Display)) {
        (Some(id), Some(display)) => (id, display),
        (Some(id), None) => (id, id),
        (None, Some(display)) => (display, display),
        (None, None) => {
            return Err(TemplateError::MissingPlaceholders {
                template: template.to_string(),
            })
        }
    };

    Ok(GroupPositions {
        id,
        display,
        mention_type: rank(Parameter::Type),
    })
}

/// Escape literal text so it matches itself inside a pattern.
pub fn escape_regex(text: &str) -> String {
    regex::escape(text)
}

/// Capture-group position of the parameter named `parameter` in `template`.
pub fn get_position_of_capturing_group(template: &str, parameter: &str) -> Result<Option<usize>> {
    let parameter = parameter.parse::<Parameter>()?;
    Ok(Template::parse(template)?.position_of(parameter))
}

/// Compile `template` into its scan pattern (end-anchored when `match_at_end`).
pub fn markup_to_regex(template: &str, match_at_end: bool) -> Result<Regex> {
    Ok(Template::parse(template)?.regex(match_at_end).clone())
}

/// Serialize a single mention into markup using `template`.
pub fn make_mentions_markup(
    template: &str,
    id: &str,
    display: &str,
    mention_type: Option<&str>,
) -> Result<String> {
    Ok(Template::parse(template)?.make_markup(id, display, mention_type))
}
