mod adjacency;
mod graph;

pub use adjacency::row_normalized_adjacency;
pub use graph::{Node, RoutingGraph};
