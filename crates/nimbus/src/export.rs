//! Export backends.
//!
//! Every diagram is first lowered to a Graphviz DOT graph by [`dot`]. The
//! graph is then handed to one of two layout engines:
//!
//! - [`Engine::Graphviz`] runs the external `dot` binary and supports every
//!   [`OutputFormat`].
//! - [`Engine::Builtin`] lays the graph out in-process with `layout-rs` and
//!   only produces SVG.
//!
//! [`OutputFormat::Dot`] is engine-independent: the DOT source is returned as is.

pub(crate) mod builtin;
pub(crate) mod dot;
pub(crate) mod graphviz;

use std::{fmt, io, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

/// Errors raised by an export backend.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to run Graphviz `dot` (is Graphviz installed and on PATH?): {0}")]
    Graphviz(#[source] io::Error),
}

/// The layout engine used to turn DOT into an image.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// External Graphviz `dot` binary
    #[default]
    Graphviz,
    /// In-process layout, SVG only
    Builtin,
}

impl Engine {
    /// Whether this engine can produce `format`.
    pub fn supports(self, format: OutputFormat) -> bool {
        match self {
            Self::Graphviz => true,
            Self::Builtin => matches!(format, OutputFormat::Svg | OutputFormat::Dot),
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Graphviz => f.write_str("graphviz"),
            Self::Builtin => f.write_str("builtin"),
        }
    }
}

impl FromStr for Engine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "graphviz" => Ok(Self::Graphviz),
            "builtin" => Ok(Self::Builtin),
            _ => Err(format!(
                "invalid engine `{s}`, valid values: graphviz, builtin"
            )),
        }
    }
}

/// The file format of a rendered diagram.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpg,
    Svg,
    Pdf,
    Dot,
}

impl OutputFormat {
    /// File extension, without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
            Self::Dot => "dot",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpg),
            "svg" => Ok(Self::Svg),
            "pdf" => Ok(Self::Pdf),
            "dot" | "gv" => Ok(Self::Dot),
            _ => Err(format!(
                "invalid output format `{s}`, valid values: png, jpg, svg, pdf, dot"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_support_matrix() {
        assert!(Engine::Graphviz.supports(OutputFormat::Png));
        assert!(Engine::Graphviz.supports(OutputFormat::Pdf));
        assert!(Engine::Builtin.supports(OutputFormat::Svg));
        assert!(Engine::Builtin.supports(OutputFormat::Dot));
        assert!(!Engine::Builtin.supports(OutputFormat::Png));
        assert!(!Engine::Builtin.supports(OutputFormat::Jpg));
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("jpeg".parse::<OutputFormat>().unwrap(), OutputFormat::Jpg);
        assert_eq!("gv".parse::<OutputFormat>().unwrap(), OutputFormat::Dot);
        assert_eq!(OutputFormat::Svg.extension(), "svg");
        assert!("bmp".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_engine_from_str() {
        assert_eq!("builtin".parse::<Engine>().unwrap(), Engine::Builtin);
        assert_eq!(Engine::Graphviz.to_string(), "graphviz");
        assert!("neato".parse::<Engine>().is_err());
    }
}
