//! Rendering through the external Graphviz `dot` binary.

use dot_structures::Graph;
use graphviz_rust::{
    cmd::{CommandArg, Format},
    printer::PrinterContext,
};
use log::{debug, error};

use super::{Error, OutputFormat};

fn command_format(format: OutputFormat) -> Format {
    match format {
        OutputFormat::Png => Format::Png,
        OutputFormat::Jpg => Format::Jpg,
        OutputFormat::Svg => Format::Svg,
        OutputFormat::Pdf => Format::Pdf,
        OutputFormat::Dot => Format::Dot,
    }
}

/// Runs `dot -T<format>` on `graph` and returns the produced bytes.
///
/// # Errors
///
/// Returns [`Error::Graphviz`] if the binary is missing or exits with an error.
pub(crate) fn render(graph: Graph, format: OutputFormat) -> Result<Vec<u8>, Error> {
    let output = graphviz_rust::exec(
        graph,
        &mut PrinterContext::default(),
        vec![CommandArg::Format(command_format(format))],
    )
    .map_err(|err| {
        error!(err:err, format = format.extension(); "Graphviz invocation failed");
        Error::Graphviz(err)
    })?;

    debug!(bytes = output.len(), format = format.extension(); "Graphviz render complete");
    Ok(output)
}
