use anyhow::Result;
use civic_router::Node;
use serde::Serialize;

use crate::commands::{build_reasoner, print_json};

#[derive(Serialize)]
struct GraphDump<'a> {
    nodes: &'a [Node],
    edges: Vec<(Node, Node)>,
    adjacency: Vec<Vec<f32>>,
}

pub fn run(cli: &crate::cli::Cli) -> Result<()> {
    let reasoner = build_reasoner(cli)?;
    let graph = reasoner.graph();

    print_json(&GraphDump {
        nodes: graph.nodes(),
        edges: graph.edges().collect(),
        adjacency: reasoner.adjacency().rows().into_iter().map(|row| row.to_vec()).collect(),
    })
}
