//! Error types for Nimbus operations.
//!
//! This module provides the main error type [`NimbusError`] which wraps
//! the error conditions that can occur while building and rendering diagrams.

use std::io;

use thiserror::Error;

use nimbus_core::semantic::GraphError;

use crate::export::{Engine, OutputFormat};

/// The main error type for Nimbus operations.
#[derive(Debug, Error)]
pub enum NimbusError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Invalid color: {0}")]
    Color(String),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),

    #[error("The {engine} engine cannot produce `{format}` output")]
    UnsupportedFormat { engine: Engine, format: OutputFormat },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<crate::export::Error> for NimbusError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}
