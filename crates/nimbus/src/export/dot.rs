//! Lowering of a [`Diagram`] to a Graphviz DOT graph.
//!
//! Two flavors are produced:
//!
//! - [`Flavor::Graphviz`]: the full graph, with cluster subgraphs and the
//!   diagram-wide defaults (fonts, spacing, spline routing, palette).
//! - [`Flavor::Portable`]: a flat graph limited to labels, colors, line
//!   styles and rank direction, for the in-process layout engine, which does
//!   not understand clusters.

use dot_structures::{
    Attribute, Edge as DotEdge, EdgeTy, Graph, GraphAttributes, Id as DotId, Node as DotNode,
    NodeId, Stmt, Subgraph, Vertex,
};
use graphviz_rust::printer::PrinterContext;
use log::trace;

use nimbus_core::{
    color::Color,
    identifier::Id,
    semantic::{Category, Cluster, Diagram, Edge, Node},
};

use crate::{NimbusError, config::StyleConfig};

const DEFAULT_FONT_NAME: &str = "Sans-Serif";
const DEFAULT_FONT_COLOR: &str = "#2D3436";
const DEFAULT_EDGE_COLOR: &str = "#7B8894";
const CLUSTER_PEN_COLOR: &str = "#AEB6BE";

/// Cluster background colors, cycled by nesting depth.
const CLUSTER_BACKGROUNDS: [&str; 4] = ["#E5F5FD", "#EBF3E7", "#ECE8F6", "#FDF7E3"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flavor {
    Graphviz,
    Portable,
}

/// Builds DOT graphs for diagrams using a fixed [`StyleConfig`].
pub(crate) struct DotBuilder<'a> {
    style: &'a StyleConfig,
    flavor: Flavor,
}

impl<'a> DotBuilder<'a> {
    pub(crate) fn new(style: &'a StyleConfig, flavor: Flavor) -> Self {
        Self { style, flavor }
    }

    pub(crate) fn build(&self, diagram: &Diagram) -> Result<Graph, NimbusError> {
        let mut stmts = Vec::new();

        let id = match self.flavor {
            Flavor::Graphviz => {
                stmts.extend(self.graph_defaults(diagram)?);
                for node in diagram.nodes_in(None) {
                    stmts.push(self.node_stmt(node));
                }
                for cluster in diagram.child_clusters(None) {
                    stmts.push(self.cluster_stmt(diagram, cluster));
                }
                quoted(diagram.title())
            }
            Flavor::Portable => {
                stmts.push(Stmt::GAttribute(GraphAttributes::Graph(vec![attr(
                    "rankdir",
                    diagram.direction().to_dot_value(),
                )])));
                for node in diagram.nodes() {
                    stmts.push(self.node_stmt(node));
                }
                plain("diagram")
            }
        };

        for edge in diagram.edges() {
            stmts.push(self.edge_stmt(edge));
        }

        trace!(statements = stmts.len(); "DOT graph assembled");

        Ok(Graph::DiGraph {
            id,
            strict: false,
            stmts,
        })
    }

    fn graph_defaults(&self, diagram: &Diagram) -> Result<Vec<Stmt>, NimbusError> {
        let font_name = self.style.font_name().unwrap_or(DEFAULT_FONT_NAME);
        let font_color = self
            .style
            .font_color()?
            .map_or_else(|| DEFAULT_FONT_COLOR.to_string(), Color::to_hex);

        let mut graph = vec![
            attr("label", diagram.title()),
            attr("labelloc", "t"),
            attr("rankdir", diagram.direction().to_dot_value()),
            attr("splines", diagram.curve_style().to_dot_value()),
            attr("pad", "2.0"),
            attr("nodesep", "0.60"),
            attr("ranksep", "0.75"),
            attr("fontname", font_name),
            attr("fontsize", "15"),
            attr("fontcolor", &font_color),
        ];
        if let Some(background) = self.style.background_color()? {
            graph.push(attr("bgcolor", &background.to_hex()));
        }
        for (key, value) in self.style.graph_attributes() {
            graph.push(attr(key, value));
        }

        let mut stmts: Vec<Stmt> = graph.into_iter().map(Stmt::Attribute).collect();
        stmts.push(Stmt::GAttribute(GraphAttributes::Node(vec![
            attr("style", "rounded,filled"),
            attr("margin", "0.2,0.1"),
            attr("fontname", font_name),
            attr("fontsize", "13"),
            attr("fontcolor", &font_color),
        ])));
        stmts.push(Stmt::GAttribute(GraphAttributes::Edge(vec![attr(
            "color",
            DEFAULT_EDGE_COLOR,
        )])));

        Ok(stmts)
    }

    fn cluster_stmt(&self, diagram: &Diagram, cluster: &Cluster) -> Stmt {
        let background = CLUSTER_BACKGROUNDS[(cluster.depth() - 1) % CLUSTER_BACKGROUNDS.len()];
        let font_name = self.style.font_name().unwrap_or(DEFAULT_FONT_NAME);

        let mut stmts: Vec<Stmt> = [
            attr("label", cluster.label()),
            attr("labeljust", "l"),
            attr("style", "rounded,filled"),
            attr("pencolor", CLUSTER_PEN_COLOR),
            attr("fillcolor", background),
            attr("fontname", font_name),
            attr("fontsize", "12"),
        ]
        .into_iter()
        .map(Stmt::Attribute)
        .collect();

        for node in diagram.nodes_in(Some(cluster.id())) {
            stmts.push(self.node_stmt(node));
        }
        for child in diagram.child_clusters(Some(cluster.id())) {
            stmts.push(self.cluster_stmt(diagram, child));
        }

        Stmt::Subgraph(Subgraph {
            id: identifier(cluster.id()),
            stmts,
        })
    }

    fn node_stmt(&self, node: &Node) -> Stmt {
        let (shape, fill) = appearance(node.category());
        let mut attributes = vec![attr("label", node.label()), attr("fillcolor", fill)];
        if self.flavor == Flavor::Graphviz {
            attributes.push(attr("shape", shape));
            attributes.push(attr("tooltip", node.category().as_str()));
        }

        Stmt::Node(DotNode {
            id: NodeId(identifier(node.id()), None),
            attributes,
        })
    }

    fn edge_stmt(&self, edge: &Edge) -> Stmt {
        let stroke = edge.style().stroke();
        let mut attributes = vec![
            attr("dir", edge.direction().to_dot_value()),
            attr("style", stroke.style().to_dot_value()),
        ];
        if let Some(color) = stroke.color() {
            attributes.push(attr("color", &color.to_hex()));
        }
        if let Some(width) = stroke.width() {
            attributes.push(attr("penwidth", &width.to_string()));
        }
        if let Some(label) = edge.style().label() {
            // Orthogonal splines reject `label` on edges.
            let key = match self.flavor {
                Flavor::Graphviz => "xlabel",
                Flavor::Portable => "label",
            };
            attributes.push(attr(key, label));
        }

        Stmt::Edge(DotEdge {
            ty: EdgeTy::Pair(
                Vertex::N(NodeId(identifier(edge.source()), None)),
                Vertex::N(NodeId(identifier(edge.target()), None)),
            ),
            attributes,
        })
    }
}

/// Renders a DOT graph to its textual form.
pub(crate) fn print(graph: Graph) -> String {
    graphviz_rust::print(graph, &mut PrinterContext::default())
}

/// Shape and fill color for a node category.
fn appearance(category: Category) -> (&'static str, &'static str) {
    match category {
        Category::Compute => ("box", "#FDEBD0"),
        Category::Database => ("cylinder", "#D6DBF5"),
        Category::Storage => ("folder", "#E2F0CB"),
        Category::Network => ("hexagon", "#E8DAFF"),
        Category::Security => ("octagon", "#FAD7DC"),
        Category::Management => ("component", "#F9D5E9"),
        Category::Analytics => ("box3d", "#CCF0EA"),
        Category::CiCd => ("cds", "#E1E4E8"),
    }
}

fn attr(key: &str, value: &str) -> Attribute {
    Attribute(plain(key), quoted(value))
}

fn identifier(id: Id) -> DotId {
    plain(&id.to_string())
}

fn plain(value: &str) -> DotId {
    DotId::Plain(value.to_string())
}

fn quoted(value: &str) -> DotId {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    DotId::Escaped(format!("\"{escaped}\""))
}
