//! Nimbus - declarative architecture diagrams.
//!
//! Diagrams are described in Rust with
//! [`DiagramBuilder`](semantic::DiagramBuilder), lowered to Graphviz DOT and
//! rendered either by the external Graphviz `dot` binary or by a built-in
//! pure-Rust layout engine.

pub mod config;

mod error;
mod export;

pub use nimbus_core::{color, draw, identifier, semantic};

pub use error::NimbusError;
pub use export::{Engine, OutputFormat};

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info};

use config::AppConfig;
use export::dot::{DotBuilder, Flavor};

/// Renders diagrams according to an [`AppConfig`].
///
/// # Examples
///
/// ```rust,no_run
/// use nimbus::{
///     OutputFormat, Renderer,
///     config::AppConfig,
///     semantic::{Category, DiagramBuilder},
/// };
///
/// let mut builder = DiagramBuilder::new("Hello");
/// let root = builder.root();
/// let web = builder.node(root, "Web", Category::Compute).unwrap();
/// let db = builder.node(root, "DB", Category::Database).unwrap();
/// builder.chain(&[web, db], &Default::default()).unwrap();
/// let diagram = builder.build();
///
/// let renderer = Renderer::new(AppConfig::default());
/// let dot = renderer.to_dot(&diagram).expect("Failed to lower diagram");
/// let path = renderer
///     .render_to_file(&diagram, OutputFormat::Png)
///     .expect("Failed to render diagram");
/// println!("{dot}\nwritten to {}", path.display());
/// ```
#[derive(Debug, Default)]
pub struct Renderer {
    config: AppConfig,
}

impl Renderer {
    /// Create a new renderer with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Lower a diagram to Graphviz DOT source.
    ///
    /// # Errors
    ///
    /// Returns [`NimbusError::Config`] if the style configuration holds an
    /// invalid color.
    pub fn to_dot(&self, diagram: &semantic::Diagram) -> Result<String, NimbusError> {
        let graph = DotBuilder::new(self.config.style(), Flavor::Graphviz).build(diagram)?;
        Ok(export::dot::print(graph))
    }

    /// Render a diagram to bytes in the given format with the configured engine.
    ///
    /// # Errors
    ///
    /// - [`NimbusError::UnsupportedFormat`] if the engine cannot produce `format`.
    /// - [`NimbusError::Export`] if Graphviz is missing or fails.
    /// - [`NimbusError::Layout`] if the built-in engine rejects the graph.
    pub fn render(
        &self,
        diagram: &semantic::Diagram,
        format: OutputFormat,
    ) -> Result<Vec<u8>, NimbusError> {
        let engine = self.config.render().engine();
        info!(title = diagram.title(), engine:% = engine, format:% = format; "Rendering diagram");

        if !engine.supports(format) {
            return Err(NimbusError::UnsupportedFormat { engine, format });
        }

        if format == OutputFormat::Dot {
            return self.to_dot(diagram).map(String::into_bytes);
        }

        match engine {
            Engine::Graphviz => {
                let graph =
                    DotBuilder::new(self.config.style(), Flavor::Graphviz).build(diagram)?;
                Ok(export::graphviz::render(graph, format)?)
            }
            Engine::Builtin => {
                let graph =
                    DotBuilder::new(self.config.style(), Flavor::Portable).build(diagram)?;
                export::builtin::render_svg(&export::dot::print(graph))
            }
        }
    }

    /// Path the diagram is written to: `<output_dir>/<file_stem>.<extension>`.
    pub fn output_path(&self, diagram: &semantic::Diagram, format: OutputFormat) -> PathBuf {
        self.config
            .render()
            .output_dir()
            .join(format!("{}.{}", diagram.file_stem(), format.extension()))
    }

    /// Render a diagram and write it into the configured output directory.
    ///
    /// Rendering the same diagram twice targets the same path.
    ///
    /// # Errors
    ///
    /// Everything [`Renderer::render`] returns, plus [`NimbusError::Io`] when
    /// the file cannot be written.
    pub fn render_to_file(
        &self,
        diagram: &semantic::Diagram,
        format: OutputFormat,
    ) -> Result<PathBuf, NimbusError> {
        let bytes = self.render(diagram, format)?;
        let path = self.output_path(diagram, format);

        if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            ensure_dir(parent)?;
        }
        fs::write(&path, bytes)?;

        info!(output_file = path.display().to_string(); "Diagram written");
        Ok(path)
    }
}

fn ensure_dir(dir: &Path) -> Result<(), NimbusError> {
    if !dir.exists() {
        debug!(dir = dir.display().to_string(); "Creating output directory");
        fs::create_dir_all(dir)?;
    }
    Ok(())
}
