//! Error types for markup templates

use thiserror::Error;

/// Errors raised while compiling or querying a markup template.
///
/// Template errors indicate caller misconfiguration and are never retried.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The template has neither a `__display__` nor an `__id__` placeholder.
    #[error("markup template `{template}` must contain `__display__` or `__id__`")]
    MissingPlaceholders { template: String },

    /// A parameter name other than `id`, `display` or `type` was requested.
    #[error("unknown markup parameter `{0}` (expected `id`, `display` or `type`)")]
    UnknownParameter(String),

    /// The generated pattern failed to compile.
    #[error("invalid markup pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result alias for template operations
pub type Result<T> = std::result::Result<T, TemplateError>;
