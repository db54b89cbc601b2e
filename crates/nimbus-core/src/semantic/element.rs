//! Diagram elements: nodes, clusters and edges.

use std::{fmt, str::FromStr};

use crate::{color::Color, draw::StrokeDefinition, identifier::Id};

/// The kind of infrastructure a [`Node`] stands for.
///
/// Renderers use the category to pick a shape and fill color, since nodes
/// carry no icon of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Compute,
    Database,
    Storage,
    Network,
    Security,
    Management,
    Analytics,
    CiCd,
}

impl Category {
    /// All categories, in declaration order.
    pub const ALL: [Category; 8] = [
        Category::Compute,
        Category::Database,
        Category::Storage,
        Category::Network,
        Category::Security,
        Category::Management,
        Category::Analytics,
        Category::CiCd,
    ];

    /// Returns the kebab-case name of the category.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compute => "compute",
            Self::Database => "database",
            Self::Storage => "storage",
            Self::Network => "network",
            Self::Security => "security",
            Self::Management => "management",
            Self::Analytics => "analytics",
            Self::CiCd => "ci-cd",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| format!("invalid node category `{s}`"))
    }
}

/// A single labeled infrastructure component.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: Id,
    label: String,
    category: Category,
    cluster: Option<Id>,
}

impl Node {
    pub(crate) fn new(id: Id, label: String, category: Category, cluster: Option<Id>) -> Self {
        Self {
            id,
            label,
            category,
            cluster,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// The innermost cluster containing this node, or `None` for the diagram root.
    pub fn cluster(&self) -> Option<Id> {
        self.cluster
    }
}

/// A named grouping of nodes and nested clusters.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    id: Id,
    label: String,
    parent: Option<Id>,
    depth: usize,
}

impl Cluster {
    pub(crate) fn new(id: Id, label: String, parent: Option<Id>, depth: usize) -> Self {
        Self {
            id,
            label,
            parent,
            depth,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The enclosing cluster, or `None` when the cluster sits at the diagram root.
    pub fn parent(&self) -> Option<Id> {
        self.parent
    }

    /// Nesting depth; clusters directly under the root have depth 1.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Which end(s) of an [`Edge`] carry an arrowhead.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeDirection {
    /// `source -> target`
    #[default]
    Forward,
    /// `source <- target`
    Back,
    /// `source <-> target`
    Both,
    /// Plain line, no arrowheads
    None,
}

impl EdgeDirection {
    /// Returns the DOT `dir` value for this direction.
    pub fn to_dot_value(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Back => "back",
            Self::Both => "both",
            Self::None => "none",
        }
    }
}

/// Visual hints attached to an edge: a stroke and an optional label.
///
/// # Examples
///
/// ```
/// use nimbus_core::{color::Color, draw::StrokeDefinition, semantic::EdgeStyle};
///
/// let security = EdgeStyle::colored(Color::new("red").unwrap());
/// let replication = EdgeStyle::new(StrokeDefinition::dotted(Color::new("blue").unwrap()))
///     .with_label("replication");
/// assert_eq!(replication.label(), Some("replication"));
/// # let _ = security;
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeStyle {
    stroke: StrokeDefinition,
    label: Option<String>,
}

impl EdgeStyle {
    pub fn new(stroke: StrokeDefinition) -> Self {
        Self {
            stroke,
            label: None,
        }
    }

    /// Solid line in the given color.
    pub fn colored(color: Color) -> Self {
        Self::new(StrokeDefinition::solid(color))
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// A styled connector between two declared nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    source: Id,
    target: Id,
    direction: EdgeDirection,
    style: EdgeStyle,
}

impl Edge {
    pub(crate) fn new(source: Id, target: Id, direction: EdgeDirection, style: EdgeStyle) -> Self {
        Self {
            source,
            target,
            direction,
            style,
        }
    }

    pub fn source(&self) -> Id {
        self.source
    }

    pub fn target(&self) -> Id {
        self.target
    }

    pub fn direction(&self) -> EdgeDirection {
        self.direction
    }

    pub fn style(&self) -> &EdgeStyle {
        &self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_roundtrip_names() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert_eq!(Category::CiCd.to_string(), "ci-cd");
        assert!("mainframe".parse::<Category>().is_err());
    }

    #[test]
    fn test_edge_direction_dot_values() {
        assert_eq!(EdgeDirection::Forward.to_dot_value(), "forward");
        assert_eq!(EdgeDirection::Back.to_dot_value(), "back");
        assert_eq!(EdgeDirection::Both.to_dot_value(), "both");
        assert_eq!(EdgeDirection::None.to_dot_value(), "none");
    }

    #[test]
    fn test_edge_style_defaults() {
        let style = EdgeStyle::default();
        assert_eq!(style.label(), None);
        assert_eq!(style.stroke().color(), None);
    }
}
