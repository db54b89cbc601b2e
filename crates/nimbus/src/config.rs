//! Configuration types for Nimbus diagram rendering.
//!
//! This module provides configuration structures that control how diagrams
//! are rendered and styled. All types implement [`serde::Deserialize`] for
//! flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining render and style settings.
//! - [`RenderConfig`] - Which [`Engine`] and [`OutputFormat`] to use, and where to write.
//! - [`StyleConfig`] - Diagram-wide visual options such as background color and font.
//!
//! # Example
//!
//! ```
//! # use nimbus::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.style().background_color().unwrap().is_none());
//! ```

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use nimbus_core::color::Color;

use crate::{
    NimbusError,
    export::{Engine, OutputFormat},
};

/// Top-level configuration combining render and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Render configuration section.
    #[serde(default)]
    render: RenderConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified render and style configurations.
    pub fn new(render: RenderConfig, style: StyleConfig) -> Self {
        Self { render, style }
    }

    /// Returns the render configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Output settings: engine, format and destination directory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    engine: Engine,

    #[serde(default)]
    format: OutputFormat,

    /// Directory the rendered file is written to; the working directory when unset.
    #[serde(default)]
    output_dir: Option<PathBuf>,
}

impl RenderConfig {
    /// Creates a new [`RenderConfig`].
    ///
    /// # Arguments
    ///
    /// * `engine` - Layout engine turning DOT into an image.
    /// * `format` - Output file format.
    /// * `output_dir` - Destination directory, `None` for the working directory.
    pub fn new(engine: Engine, format: OutputFormat, output_dir: Option<PathBuf>) -> Self {
        Self {
            engine,
            format,
            output_dir,
        }
    }

    pub fn engine(&self) -> Engine {
        self.engine
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Returns the destination directory, defaulting to `.`.
    pub fn output_dir(&self) -> &Path {
        self.output_dir.as_deref().unwrap_or(Path::new("."))
    }
}

/// Visual styling configuration for rendered diagrams.
///
/// Fields that are not set fall back to the renderer defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Diagram background [`Color`], as a color string.
    #[serde(default)]
    background_color: Option<String>,

    /// Font used for the title, cluster and node labels.
    #[serde(default)]
    font_name: Option<String>,

    /// Label [`Color`], as a color string.
    #[serde(default)]
    font_color: Option<String>,

    /// Extra DOT graph attributes, applied after the defaults and in order.
    #[serde(default)]
    graph_attributes: IndexMap<String, String>,
}

impl StyleConfig {
    /// Creates a [`StyleConfig`] with the given background color.
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns [`NimbusError::Config`] if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, NimbusError> {
        parse_color(self.background_color.as_deref(), "background")
    }

    /// Returns the parsed label [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns [`NimbusError::Config`] if the configured color string cannot be parsed.
    pub fn font_color(&self) -> Result<Option<Color>, NimbusError> {
        parse_color(self.font_color.as_deref(), "font")
    }

    pub fn font_name(&self) -> Option<&str> {
        self.font_name.as_deref()
    }

    pub fn graph_attributes(&self) -> &IndexMap<String, String> {
        &self.graph_attributes
    }
}

fn parse_color(value: Option<&str>, what: &str) -> Result<Option<Color>, NimbusError> {
    value
        .map(Color::new)
        .transpose()
        .map_err(|err| NimbusError::Config(format!("Invalid {what} color in config: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.render().engine(), Engine::Graphviz);
        assert_eq!(config.render().format(), OutputFormat::Png);
        assert_eq!(config.render().output_dir(), Path::new("."));
        assert!(config.style().font_name().is_none());
        assert!(config.style().graph_attributes().is_empty());
    }

    #[test]
    fn test_deserialize_full() {
        let config: AppConfig = toml::from_str(
            r##"
            [render]
            engine = "builtin"
            format = "svg"
            output_dir = "docs/diagrams"

            [style]
            background_color = "#fafafa"
            font_name = "Helvetica"
            font_color = "navy"

            [style.graph_attributes]
            splines = "curved"
            dpi = "150"
            "##,
        )
        .unwrap();

        assert_eq!(config.render().engine(), Engine::Builtin);
        assert_eq!(config.render().format(), OutputFormat::Svg);
        assert_eq!(config.render().output_dir(), Path::new("docs/diagrams"));
        assert_eq!(
            config.style().background_color().unwrap().unwrap().to_hex(),
            "#fafafa"
        );
        assert_eq!(config.style().font_name(), Some("Helvetica"));
        let keys: Vec<_> = config.style().graph_attributes().keys().collect();
        assert_eq!(keys, vec!["splines", "dpi"]);
    }

    #[test]
    fn test_invalid_color_is_config_error() {
        let style = StyleConfig::default().with_background_color("not-a-color");
        assert!(matches!(
            style.background_color(),
            Err(NimbusError::Config(msg)) if msg.contains("background")
        ));
    }

    #[test]
    fn test_unknown_format_rejected() {
        let result: Result<AppConfig, _> = toml::from_str("[render]\nformat = \"bmp\"\n");
        assert!(result.is_err());
    }
}
