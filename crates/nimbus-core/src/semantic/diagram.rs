//! The [`Diagram`] model and its diagram-wide settings.

use std::{fmt, str::FromStr};

use crate::{
    identifier::Id,
    semantic::element::{Cluster, Edge, Node},
};

/// Rank direction of the laid-out graph.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Top to bottom
    #[default]
    TopToBottom,
    /// Bottom to top
    BottomToTop,
    /// Left to right
    LeftToRight,
    /// Right to left
    RightToLeft,
}

impl Direction {
    /// Returns the DOT `rankdir` value.
    pub fn to_dot_value(self) -> &'static str {
        match self {
            Self::TopToBottom => "TB",
            Self::BottomToTop => "BT",
            Self::LeftToRight => "LR",
            Self::RightToLeft => "RL",
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TB" => Ok(Self::TopToBottom),
            "BT" => Ok(Self::BottomToTop),
            "LR" => Ok(Self::LeftToRight),
            "RL" => Ok(Self::RightToLeft),
            _ => Err(format!(
                "invalid direction `{s}`, valid values: TB, BT, LR, RL"
            )),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_dot_value())
    }
}

/// How edges are routed between nodes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveStyle {
    /// Axis-aligned segments
    #[default]
    Ortho,
    Curved,
    Spline,
    Polyline,
}

impl CurveStyle {
    /// Returns the DOT `splines` value.
    pub fn to_dot_value(self) -> &'static str {
        match self {
            Self::Ortho => "ortho",
            Self::Curved => "curved",
            Self::Spline => "spline",
            Self::Polyline => "polyline",
        }
    }
}

impl FromStr for CurveStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ortho" => Ok(Self::Ortho),
            "curved" => Ok(Self::Curved),
            "spline" => Ok(Self::Spline),
            "polyline" => Ok(Self::Polyline),
            _ => Err(format!(
                "invalid curve style `{s}`, valid values: ortho, curved, spline, polyline"
            )),
        }
    }
}

/// A fully constructed architecture diagram.
///
/// A `Diagram` is produced by [`DiagramBuilder::build`](super::DiagramBuilder::build)
/// and is immutable afterwards. Every edge refers to nodes declared in the same
/// diagram, and every node and cluster refers to an existing parent cluster.
#[derive(Debug, Clone)]
pub struct Diagram {
    title: String,
    direction: Direction,
    curve_style: CurveStyle,
    clusters: Vec<Cluster>,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Diagram {
    pub(crate) fn new(
        title: String,
        direction: Direction,
        curve_style: CurveStyle,
        clusters: Vec<Cluster>,
        nodes: Vec<Node>,
        edges: Vec<Edge>,
    ) -> Self {
        Self {
            title,
            direction,
            curve_style,
            clusters,
            nodes,
            edges,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn curve_style(&self) -> CurveStyle {
        self.curve_style
    }

    /// All clusters in declaration order.
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// All nodes in declaration order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges in declaration order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: Id) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id() == id)
    }

    pub fn cluster(&self, id: Id) -> Option<&Cluster> {
        self.clusters.iter().find(|cluster| cluster.id() == id)
    }

    /// Nodes whose innermost cluster is `scope` (`None` for the root).
    pub fn nodes_in(&self, scope: Option<Id>) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |node| node.cluster() == scope)
    }

    /// Clusters directly nested in `scope` (`None` for the root).
    pub fn child_clusters(&self, scope: Option<Id>) -> impl Iterator<Item = &Cluster> {
        self.clusters
            .iter()
            .filter(move |cluster| cluster.parent() == scope)
    }

    /// Labels of the clusters enclosing `node`, outermost first.
    ///
    /// Returns `None` if the node does not belong to this diagram.
    pub fn cluster_path(&self, node: Id) -> Option<Vec<&str>> {
        let mut path = Vec::new();
        let mut current = self.node(node)?.cluster();
        while let Some(cluster_id) = current {
            let cluster = self.cluster(cluster_id)?;
            path.push(cluster.label());
            current = cluster.parent();
        }
        path.reverse();
        Some(path)
    }

    /// File name stem derived from the title.
    ///
    /// Words are joined with `_` and lowercased; any character other than an
    /// ASCII alphanumeric, `_`, `-` or `.` becomes `_`, so the stem never
    /// contains a path separator.
    ///
    /// # Examples
    ///
    /// ```
    /// use nimbus_core::semantic::DiagramBuilder;
    ///
    /// let diagram = DiagramBuilder::new("Jira/Bitbucket Data Center on AWS").build();
    /// assert_eq!(diagram.file_stem(), "jira_bitbucket_data_center_on_aws");
    /// ```
    pub fn file_stem(&self) -> String {
        let stem: String = self
            .title
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        if stem.is_empty() {
            "diagram".to_string()
        } else {
            stem
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::semantic::{Category, DiagramBuilder};

    fn titled(title: &str) -> Diagram {
        DiagramBuilder::new(title).build()
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(titled("Web Service").file_stem(), "web_service");
        assert_eq!(titled("  spaced   out  ").file_stem(), "spaced_out");
        assert_eq!(titled("CI/CD: v2.0").file_stem(), "ci_cd__v2.0");
        assert_eq!(titled("").file_stem(), "diagram");
        assert_eq!(titled("Café").file_stem(), "caf_");
    }

    #[test]
    fn test_direction_from_str() {
        assert_eq!("LR".parse::<Direction>().unwrap(), Direction::LeftToRight);
        assert_eq!("tb".parse::<Direction>().unwrap(), Direction::TopToBottom);
        assert!("diagonal".parse::<Direction>().is_err());
    }

    #[test]
    fn test_curve_style_from_str() {
        assert_eq!("ortho".parse::<CurveStyle>().unwrap(), CurveStyle::Ortho);
        assert_eq!("curved".parse::<CurveStyle>().unwrap(), CurveStyle::Curved);
        assert!("wavy".parse::<CurveStyle>().is_err());
    }

    #[test]
    fn test_cluster_path() {
        let mut builder = DiagramBuilder::new("paths");
        let vpc = builder.cluster(builder.root(), "VPC").unwrap();
        let private = builder.cluster(vpc, "Private Subnet").unwrap();
        let ecs = builder.node(private, "ECS", Category::Compute).unwrap();
        let dns = builder.node(builder.root(), "DNS", Category::Network).unwrap();
        let diagram = builder.build();

        assert_eq!(
            diagram.cluster_path(ecs.id()).unwrap(),
            vec!["VPC", "Private Subnet"]
        );
        assert!(diagram.cluster_path(dns.id()).unwrap().is_empty());
        assert!(diagram.cluster_path(Id::new("missing")).is_none());
    }

    proptest! {
        #[test]
        fn file_stem_is_filesystem_safe(title in "\\PC{0,64}") {
            let stem = titled(&title).file_stem();
            prop_assert!(!stem.is_empty());
            prop_assert!(stem
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')));
            prop_assert!(!stem.chars().any(|c| c.is_ascii_uppercase()));
        }

        #[test]
        fn file_stem_is_deterministic(title in "[A-Za-z /]{0,32}") {
            prop_assert_eq!(titled(&title).file_stem(), titled(&title).file_stem());
        }
    }
}
