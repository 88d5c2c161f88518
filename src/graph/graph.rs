use std::fmt;

use ahash::AHashMap;
use ndarray::Array2;
use serde::{Serialize, Serializer};

use crate::graph::row_normalized_adjacency;
use crate::types::{Department, SituationAttribute};

/// Hand-authored "attribute implies relevance to department" links.
const RELEVANCE: [(SituationAttribute, Department); 7] = [
    (SituationAttribute::LargeWaste, Department::WasteManagement),
    (SituationAttribute::HazardousWaste, Department::WasteManagement),
    (SituationAttribute::LargeWaste, Department::WardOffice),
    (SituationAttribute::DeepPothole, Department::Roads),
    (SituationAttribute::LargePothole, Department::Roads),
    (SituationAttribute::NearElectric, Department::Electricity),
    (SituationAttribute::NearWater, Department::Water),
];

/// A node of the routing graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Node {
    Attribute(SituationAttribute),
    Department(Department),
}

impl Node {
    pub fn name(&self) -> &'static str {
        match self {
            Node::Attribute(attr) => attr.to_str(),
            Node::Department(dept) => dept.to_str(),
        }
    }

    #[inline] pub fn is_department(&self) -> bool { matches!(self, Node::Department(_)) }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// The fixed knowledge graph of situation attributes and departments.
///
/// Nodes are laid out attributes first, then departments, each in declaration
/// order; a node's position is its row in every feature and adjacency matrix.
/// The graph never changes after construction, so one instance is built at
/// startup and shared (usually behind an `Arc`).
#[derive(Debug, Clone)]
pub struct RoutingGraph {
    nodes: Vec<Node>,
    index: AHashMap<&'static str, usize>,
    edges: Vec<(u32, u32)>,
}

impl RoutingGraph {
    /// Build the civic routing graph.
    pub fn new() -> Self {
        let nodes: Vec<Node> = SituationAttribute::ALL.iter().copied().map(Node::Attribute)
            .chain(Department::ALL.iter().copied().map(Node::Department))
            .collect();

        let index = nodes.iter()
            .enumerate()
            .map(|(i, node)| (node.name(), i))
            .collect::<AHashMap<_, _>>();

        let edges = RELEVANCE.iter()
            .map(|&(attr, dept)| (
                Self::attribute_position(attr) as u32,
                Self::department_position(dept) as u32,
            ))
            .collect();

        Self { nodes, index, edges }
    }

    #[inline] fn attribute_position(attr: SituationAttribute) -> usize { attr.ordinal() }

    #[inline]
    fn department_position(dept: Department) -> usize { SituationAttribute::COUNT + dept.ordinal() }

    /// Get the number of nodes in the graph.
    #[inline] pub fn node_count(&self) -> usize { self.nodes.len() }

    /// Get the number of authored (directed) edges.
    #[inline] pub fn edge_count(&self) -> usize { self.edges.len() }

    /// Get the nodes in index order.
    #[inline] pub fn nodes(&self) -> &[Node] { &self.nodes }

    /// Get the index of a node by name.
    #[inline] pub fn node_index(&self, name: &str) -> Option<usize> { self.index.get(name).copied() }

    /// Get the row index of an attribute node.
    #[inline] pub fn attribute_index(&self, attr: SituationAttribute) -> usize { Self::attribute_position(attr) }

    /// Get the row index of a department node.
    #[inline] pub fn department_index(&self, dept: Department) -> usize { Self::department_position(dept) }

    /// Get an iterator over the authored edges as (source, target) nodes.
    pub fn edges(&self) -> impl Iterator<Item = (Node, Node)> + '_ {
        self.edges.iter().map(|&(u, v)| (self.nodes[u as usize], self.nodes[v as usize]))
    }

    /// Get an iterator over the authored edges as (source, target) indices.
    pub fn edge_indices(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges.iter().map(|&(u, v)| (u as usize, v as usize))
    }

    /// Get an iterator over the departments in output-column order.
    pub fn departments(&self) -> impl Iterator<Item = Department> + '_ {
        self.nodes.iter().filter_map(|node| match node {
            Node::Department(dept) => Some(*dept),
            Node::Attribute(_) => None,
        })
    }

    /// Build the symmetric, self-looped, row-normalized adjacency used for propagation.
    pub fn adjacency(&self) -> Array2<f32> {
        row_normalized_adjacency(self.node_count(), self.edge_indices())
    }
}

impl Default for RoutingGraph {
    fn default() -> Self { Self::new() }
}
