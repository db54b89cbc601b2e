//! Explicit, handle-based diagram construction.
//!
//! Nodes and clusters are assigned to their parent cluster by passing a
//! [`ClusterHandle`] rather than by lexical nesting. Every handle is scoped to
//! the builder that created it: a handle from one builder is rejected by any
//! other, so an edge can only ever reference nodes declared earlier in the
//! same diagram.
//!
//! # Examples
//!
//! ```
//! use nimbus_core::{
//!     color::Color,
//!     semantic::{Category, DiagramBuilder, Direction, EdgeStyle},
//! };
//!
//! # fn main() -> Result<(), nimbus_core::semantic::GraphError> {
//! let mut builder = DiagramBuilder::new("Web Service").with_direction(Direction::LeftToRight);
//! let root = builder.root();
//!
//! let dns = builder.node(root, "Route53", Category::Network)?;
//! let vpc = builder.cluster(root, "VPC")?;
//! let web = builder.node(vpc, "Web", Category::Compute)?;
//! let db = builder.node(vpc, "DB", Category::Database)?;
//!
//! builder.chain(&[dns, web, db], &EdgeStyle::default())?;
//! builder.link(web, db, &EdgeStyle::colored(Color::new("blue").unwrap()))?;
//!
//! let diagram = builder.build();
//! assert_eq!(diagram.nodes().len(), 3);
//! assert_eq!(diagram.edges().len(), 3);
//! # Ok(())
//! # }
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;
use thiserror::Error;

use crate::{
    identifier::Id,
    semantic::{
        diagram::{CurveStyle, Diagram, Direction},
        element::{Category, Cluster, Edge, EdgeDirection, EdgeStyle, Node},
    },
};

static NEXT_BUILDER: AtomicU64 = AtomicU64::new(0);

/// Errors raised while assembling a diagram.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("node `{0}` was declared by a different diagram builder")]
    ForeignNode(Id),

    #[error("cluster `{0}` was declared by a different diagram builder")]
    ForeignCluster(String),

    #[error("an edge chain needs at least two nodes, got {0}")]
    ChainTooShort(usize),

    #[error("fan-out and fan-in need at least one peer node")]
    NoPeers,
}

/// Opaque reference to a node declared by a [`DiagramBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    owner: u64,
    id: Id,
}

impl NodeHandle {
    /// The node's identifier inside the built [`Diagram`].
    pub fn id(&self) -> Id {
        self.id
    }
}

/// Opaque reference to a cluster (or the root scope) of a [`DiagramBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClusterHandle {
    owner: u64,
    id: Option<Id>,
}

impl ClusterHandle {
    /// The cluster's identifier, or `None` for the root scope.
    pub fn id(&self) -> Option<Id> {
        self.id
    }

    pub fn is_root(&self) -> bool {
        self.id.is_none()
    }
}

/// Incrementally declares nodes, clusters and edges, then produces a [`Diagram`].
#[derive(Debug)]
pub struct DiagramBuilder {
    owner: u64,
    title: String,
    direction: Direction,
    curve_style: CurveStyle,
    clusters: Vec<Cluster>,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl DiagramBuilder {
    /// Starts a new diagram with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            owner: NEXT_BUILDER.fetch_add(1, Ordering::Relaxed),
            title: title.into(),
            direction: Direction::default(),
            curve_style: CurveStyle::default(),
            clusters: Vec::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_curve_style(mut self, curve_style: CurveStyle) -> Self {
        self.curve_style = curve_style;
        self
    }

    /// Handle to the top-level scope of the diagram.
    pub fn root(&self) -> ClusterHandle {
        ClusterHandle {
            owner: self.owner,
            id: None,
        }
    }

    /// Declares a cluster nested inside `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::ForeignCluster`] if `parent` belongs to another builder.
    pub fn cluster(
        &mut self,
        parent: ClusterHandle,
        label: impl Into<String>,
    ) -> Result<ClusterHandle, GraphError> {
        self.check_cluster(parent)?;

        let depth = match parent.id {
            Some(parent_id) => self
                .clusters
                .iter()
                .find(|cluster| cluster.id() == parent_id)
                .map_or(1, |cluster| cluster.depth() + 1),
            None => 1,
        };
        let id = Id::indexed("cluster", self.clusters.len());
        self.clusters
            .push(Cluster::new(id, label.into(), parent.id, depth));

        Ok(ClusterHandle {
            owner: self.owner,
            id: Some(id),
        })
    }

    /// Declares a node inside `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::ForeignCluster`] if `parent` belongs to another builder.
    pub fn node(
        &mut self,
        parent: ClusterHandle,
        label: impl Into<String>,
        category: Category,
    ) -> Result<NodeHandle, GraphError> {
        self.check_cluster(parent)?;

        let id = Id::indexed("node", self.nodes.len());
        self.nodes
            .push(Node::new(id, label.into(), category, parent.id));

        Ok(NodeHandle {
            owner: self.owner,
            id,
        })
    }

    /// Adds a single edge between two declared nodes.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::ForeignNode`] if either handle belongs to another builder.
    pub fn connect(
        &mut self,
        source: NodeHandle,
        target: NodeHandle,
        direction: EdgeDirection,
        style: &EdgeStyle,
    ) -> Result<(), GraphError> {
        self.check_node(source)?;
        self.check_node(target)?;
        self.push_edge(source, target, direction, style);
        Ok(())
    }

    /// Adds an undirected edge.
    pub fn link(
        &mut self,
        a: NodeHandle,
        b: NodeHandle,
        style: &EdgeStyle,
    ) -> Result<(), GraphError> {
        self.connect(a, b, EdgeDirection::None, style)
    }

    /// Adds forward edges between consecutive nodes: `a -> b -> c`.
    ///
    /// Nothing is added unless every handle is valid.
    pub fn chain(&mut self, nodes: &[NodeHandle], style: &EdgeStyle) -> Result<(), GraphError> {
        if nodes.len() < 2 {
            return Err(GraphError::ChainTooShort(nodes.len()));
        }
        for node in nodes {
            self.check_node(*node)?;
        }
        for pair in nodes.windows(2) {
            self.push_edge(pair[0], pair[1], EdgeDirection::Forward, style);
        }
        Ok(())
    }

    /// Adds one forward edge from `source` to each of `targets`.
    ///
    /// Nothing is added unless every handle is valid.
    pub fn fan_out(
        &mut self,
        source: NodeHandle,
        targets: &[NodeHandle],
        style: &EdgeStyle,
    ) -> Result<(), GraphError> {
        if targets.is_empty() {
            return Err(GraphError::NoPeers);
        }
        self.check_node(source)?;
        for target in targets {
            self.check_node(*target)?;
        }
        for target in targets {
            self.push_edge(source, *target, EdgeDirection::Forward, style);
        }
        Ok(())
    }

    /// Adds one forward edge from each of `sources` to `target`.
    ///
    /// Nothing is added unless every handle is valid.
    pub fn fan_in(
        &mut self,
        sources: &[NodeHandle],
        target: NodeHandle,
        style: &EdgeStyle,
    ) -> Result<(), GraphError> {
        if sources.is_empty() {
            return Err(GraphError::NoPeers);
        }
        self.check_node(target)?;
        for source in sources {
            self.check_node(*source)?;
        }
        for source in sources {
            self.push_edge(*source, target, EdgeDirection::Forward, style);
        }
        Ok(())
    }

    /// Finishes construction.
    pub fn build(self) -> Diagram {
        debug!(
            title = self.title,
            nodes = self.nodes.len(),
            clusters = self.clusters.len(),
            edges = self.edges.len();
            "Diagram built"
        );

        Diagram::new(
            self.title,
            self.direction,
            self.curve_style,
            self.clusters,
            self.nodes,
            self.edges,
        )
    }

    fn push_edge(
        &mut self,
        source: NodeHandle,
        target: NodeHandle,
        direction: EdgeDirection,
        style: &EdgeStyle,
    ) {
        self.edges
            .push(Edge::new(source.id, target.id, direction, style.clone()));
    }

    fn check_node(&self, node: NodeHandle) -> Result<(), GraphError> {
        if node.owner == self.owner {
            Ok(())
        } else {
            Err(GraphError::ForeignNode(node.id))
        }
    }

    fn check_cluster(&self, cluster: ClusterHandle) -> Result<(), GraphError> {
        if cluster.owner == self.owner {
            Ok(())
        } else {
            Err(GraphError::ForeignCluster(
                cluster
                    .id
                    .map_or_else(|| "<root>".to_string(), |id| id.to_string()),
            ))
        }
    }
}
