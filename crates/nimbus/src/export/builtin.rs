//! In-process SVG rendering through `layout-rs`.

use layout::{
    backends::svg::SVGWriter,
    gv::{DotParser, GraphBuilder},
};
use log::{debug, error};

use crate::NimbusError;

/// Lays out DOT source and returns the resulting SVG document.
///
/// # Errors
///
/// Returns [`NimbusError::Layout`] if the DOT source cannot be parsed.
pub(crate) fn render_svg(dot: &str) -> Result<Vec<u8>, NimbusError> {
    let mut parser = DotParser::new(dot);
    let tree = parser.process().map_err(|err| {
        error!(err; "Built-in layout engine rejected DOT source");
        NimbusError::Layout(err)
    })?;

    let mut builder = GraphBuilder::new();
    builder.visit_graph(&tree);
    let mut graph = builder.get();

    let mut writer = SVGWriter::new();
    graph.do_it(false, false, false, &mut writer);
    let svg = writer.finalize();

    debug!(bytes = svg.len(); "Built-in layout complete");
    Ok(svg.into_bytes())
}
