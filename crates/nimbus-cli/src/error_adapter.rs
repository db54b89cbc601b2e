//! Error adapter for converting NimbusError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::Diagnostic as MietteDiagnostic;

use nimbus::{Engine, NimbusError};

/// Adapter giving a [`NimbusError`] a diagnostic code and, where one
/// exists, a hint on how to fix it.
pub struct ErrorAdapter<'a>(pub &'a NimbusError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            NimbusError::Io(_) => "nimbus::io",
            NimbusError::Graph(_) => "nimbus::graph",
            NimbusError::Color(_) => "nimbus::color",
            NimbusError::Layout(_) => "nimbus::layout",
            NimbusError::Export(_) => "nimbus::export",
            NimbusError::UnsupportedFormat { .. } => "nimbus::unsupported_format",
            NimbusError::Config(_) => "nimbus::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            NimbusError::Export(_) => {
                "install Graphviz (https://graphviz.org/download/) or pass `--engine builtin`"
            }
            NimbusError::UnsupportedFormat {
                engine: Engine::Builtin,
                ..
            } => "the builtin engine only writes `svg` and `dot`; use `--engine graphviz` for raster and PDF output",
            NimbusError::Config(_) => "check the configuration file passed with `--config`",
            _ => return None,
        };
        Some(Box::new(help))
    }
}

#[cfg(test)]
mod tests {
    use nimbus::OutputFormat;

    use super::*;

    #[test]
    fn test_codes() {
        let err = NimbusError::Config("bad".to_string());
        let adapter = ErrorAdapter(&err);
        assert_eq!(adapter.code().unwrap().to_string(), "nimbus::config");
        assert_eq!(adapter.to_string(), "Configuration error: bad");
    }

    #[test]
    fn test_builtin_format_help() {
        let err = NimbusError::UnsupportedFormat {
            engine: Engine::Builtin,
            format: OutputFormat::Png,
        };
        let adapter = ErrorAdapter(&err);
        assert_eq!(
            adapter.code().unwrap().to_string(),
            "nimbus::unsupported_format"
        );
        assert!(adapter.help().unwrap().to_string().contains("--engine graphviz"));
    }

    #[test]
    fn test_layout_has_no_help() {
        let err = NimbusError::Layout("cycle".to_string());
        assert!(ErrorAdapter(&err).help().is_none());
    }

    #[test]
    fn test_report_renders() {
        let err = NimbusError::Color("not a color".to_string());
        let mut writer = String::new();
        miette::GraphicalReportHandler::new()
            .render_report(&mut writer, &ErrorAdapter(&err))
            .unwrap();
        assert!(writer.contains("not a color"));
    }
}
