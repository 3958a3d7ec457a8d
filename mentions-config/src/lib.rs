//! Shared configuration loader for the mentions tools.
//!
//! `defaults/mentions.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files
//! on top of those defaults via [`Loader`] before deserializing into
//! [`MentionsConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use mentions::mentions::{Template, TemplateError};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/mentions.default.toml");

/// Top-level configuration consumed by the mentions tools.
#[derive(Debug, Clone, Deserialize)]
pub struct MentionsConfig {
    pub markup: MarkupConfig,
    pub suggestions: SuggestionsConfig,
    pub output: OutputConfig,
}

/// How mentions are stored and displayed.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkupConfig {
    pub template: String,
    pub display_prefix: String,
}

impl MarkupConfig {
    /// Compile the template, binding the display prefix as a display transform.
    pub fn compile(&self) -> Result<Template, TemplateError> {
        let template = Template::parse(&self.template)?;
        if self.display_prefix.is_empty() {
            return Ok(template);
        }
        let prefix = self.display_prefix.clone();
        Ok(template.with_display_transform(move |_, display, _| format!("{prefix}{display}")))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionsConfig {
    pub ignore_accents: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Json,
    Yaml,
    Text,
}

/// Builds a [`MentionsConfig`] from the embedded defaults, an optional
/// `mentions.toml` and command-line flags, later layers winning.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Seed with `defaults/mentions.default.toml`.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a TOML file passed with `--config`; building fails if it is missing.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer a TOML file only if it exists, such as a project-local `mentions.toml`.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Override a dotted key such as `suggestions.ignore_accents`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Replace the markup template (`--template`). Validated on [`MarkupConfig::compile`].
    pub fn with_template(self, template: &str) -> Result<Self, ConfigError> {
        self.set_override("markup.template", template)
    }

    /// Replace the output format (`--format`); unknown names fail in [`Loader::build`].
    pub fn with_output_format(self, format: &str) -> Result<Self, ConfigError> {
        self.set_override("output.format", format)
    }

    /// Merge every layer and deserialize it.
    pub fn build(self) -> Result<MentionsConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MentionsConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.markup.template, "@[__display__](__id__)");
        assert!(config.markup.display_prefix.is_empty());
        assert!(!config.suggestions.ignore_accents);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("output.format", "yaml")
            .expect("override to apply")
            .set_override("suggestions.ignore_accents", true)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, OutputFormat::Yaml);
        assert!(config.suggestions.ignore_accents);
    }

    #[test]
    fn layers_user_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[markup]\ntemplate = \"<@__id__>\"\ndisplay_prefix = \"@\"").unwrap();

        let config = Loader::new().with_file(file.path()).build().expect("config to build");
        assert_eq!(config.markup.template, "<@__id__>");
        assert_eq!(config.output.format, OutputFormat::Json);

        let template = config.markup.compile().expect("template to compile");
        assert_eq!(
            mentions::get_plain_text("hi <@42>", &template),
            "hi @42"
        );
    }

    #[test]
    fn flag_overrides_beat_files() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[output]\nformat = \"yaml\"").unwrap();

        let config = Loader::new()
            .with_file(file.path())
            .with_template("#[__display__]")
            .expect("override to apply")
            .with_output_format("text")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.markup.template, "#[__display__]");
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn unknown_output_format_fails_to_build() {
        let result = Loader::new()
            .with_output_format("xml")
            .expect("override to apply")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/definitely/not/here.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn invalid_template_surfaces_on_compile() {
        let config = Loader::new()
            .set_override("markup.template", "no placeholders")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(matches!(
            config.markup.compile(),
            Err(TemplateError::MissingPlaceholders { .. })
        ));
    }
}
