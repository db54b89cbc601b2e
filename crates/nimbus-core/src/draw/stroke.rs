//! Stroke and line-style definitions.
//!
//! # Overview
//!
//! Exported types:
//! - [`StrokeDefinition`]: Color, width and line pattern of an edge
//! - [`StrokeStyle`]: Enum defining line patterns (solid, dashed, dotted, bold)
//!
//! A stroke only carries what the author set explicitly. Unset properties
//! (`color`, `width`) fall back to the renderer's edge defaults, which keeps
//! diagram-wide styling in one place.
//!
//! # Graphviz Attribute Mapping
//!
//! | Rust Property | DOT Attribute | Example Values |
//! |--------------|---------------|----------------|
//! | `color` | `color` | `"#a52a2a"` |
//! | `width` | `penwidth` | `2.0` |
//! | `style` | `style` | `"dashed"`, `"dotted"` |
//!
//! # Examples
//!
//! ```
//! use nimbus_core::draw::{StrokeDefinition, StrokeStyle};
//! use nimbus_core::color::Color;
//!
//! let stroke = StrokeDefinition::dashed(Color::new("brown").unwrap());
//! assert_eq!(*stroke.style(), StrokeStyle::Dashed);
//! assert_eq!(stroke.width(), None);
//! ```

use std::{fmt, str::FromStr};

use crate::color::Color;

/// Defines the line pattern of a stroke.
///
/// Each variant maps to the Graphviz edge `style` attribute of the same name.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrokeStyle {
    /// Solid continuous line (default)
    #[default]
    Solid,
    /// Dashed line
    Dashed,
    /// Dotted line
    Dotted,
    /// Heavier solid line
    Bold,
}

impl StrokeStyle {
    /// Returns the DOT `style` value for this pattern.
    pub fn to_dot_value(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
            Self::Bold => "bold",
        }
    }
}

impl FromStr for StrokeStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            "bold" => Ok(Self::Bold),
            _ => Err(format!(
                "invalid stroke style `{s}`, valid values: solid, dashed, dotted, bold"
            )),
        }
    }
}

impl fmt::Display for StrokeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_dot_value())
    }
}

/// A stroke definition for rendering edges.
///
/// # Examples
///
/// ```
/// use nimbus_core::draw::{StrokeDefinition, StrokeStyle};
/// use nimbus_core::color::Color;
///
/// // Inherit everything from the diagram defaults
/// let stroke = StrokeDefinition::default();
/// assert!(stroke.color().is_none());
///
/// // Colored dotted line with a heavier pen
/// let stroke = StrokeDefinition::dotted(Color::new("blue").unwrap()).with_width(2.0);
/// assert_eq!(stroke.width(), Some(2.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrokeDefinition {
    color: Option<Color>,
    width: Option<f32>,
    style: StrokeStyle,
}

impl StrokeDefinition {
    /// Creates a solid stroke with the given color.
    pub fn solid(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }

    /// Creates a dashed stroke with the given color.
    pub fn dashed(color: Color) -> Self {
        Self::solid(color).with_style(StrokeStyle::Dashed)
    }

    /// Creates a dotted stroke with the given color.
    pub fn dotted(color: Color) -> Self {
        Self::solid(color).with_style(StrokeStyle::Dotted)
    }

    /// Returns a copy of this stroke with the given line pattern.
    pub fn with_style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }

    /// Returns a copy of this stroke with the given pen width.
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    /// Returns a copy of this stroke with the given color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Returns the explicit stroke color, if any.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Returns the explicit pen width, if any.
    pub fn width(&self) -> Option<f32> {
        self.width
    }

    /// Returns the stroke style.
    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_default() {
        let stroke = StrokeDefinition::default();
        assert_eq!(stroke.color(), None);
        assert_eq!(stroke.width(), None);
        assert_eq!(*stroke.style(), StrokeStyle::Solid);
    }

    #[test]
    fn test_stroke_constructors() {
        let color = Color::new("red").unwrap();

        let solid = StrokeDefinition::solid(color);
        assert_eq!(solid.color(), Some(color));
        assert_eq!(*solid.style(), StrokeStyle::Solid);

        let dashed = StrokeDefinition::dashed(color);
        assert_eq!(*dashed.style(), StrokeStyle::Dashed);

        let dotted = StrokeDefinition::dotted(color);
        assert_eq!(*dotted.style(), StrokeStyle::Dotted);
    }

    #[test]
    fn test_stroke_builder_methods() {
        let stroke = StrokeDefinition::default()
            .with_color(Color::new("green").unwrap())
            .with_width(2.5)
            .with_style(StrokeStyle::Bold);

        assert_eq!(stroke.color(), Some(Color::new("green").unwrap()));
        assert_eq!(stroke.width(), Some(2.5));
        assert_eq!(*stroke.style(), StrokeStyle::Bold);
    }

    #[test]
    fn test_stroke_style_dot_values() {
        assert_eq!(StrokeStyle::Solid.to_dot_value(), "solid");
        assert_eq!(StrokeStyle::Dashed.to_dot_value(), "dashed");
        assert_eq!(StrokeStyle::Dotted.to_dot_value(), "dotted");
        assert_eq!(StrokeStyle::Bold.to_dot_value(), "bold");
    }

    #[test]
    fn test_stroke_style_from_str() {
        assert_eq!(StrokeStyle::from_str("solid").unwrap(), StrokeStyle::Solid);
        assert_eq!(
            StrokeStyle::from_str("dashed").unwrap(),
            StrokeStyle::Dashed
        );
        assert_eq!(
            StrokeStyle::from_str("dotted").unwrap(),
            StrokeStyle::Dotted
        );
        assert_eq!(StrokeStyle::from_str("bold").unwrap(), StrokeStyle::Bold);

        let result = StrokeStyle::from_str("10,5,2,5");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("invalid stroke style"));
    }
}
