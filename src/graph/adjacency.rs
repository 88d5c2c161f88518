use ndarray::{Array2, Axis};

/// Build a dense propagation matrix for a graph of `num_nodes` nodes.
///
/// Each edge is written in both directions, every node gets a self-loop, and
/// each row is divided by its sum. Rows summing to zero are left untouched
/// (unreachable while self-loops are present, but kept safe).
pub fn row_normalized_adjacency(num_nodes: usize, edges: impl IntoIterator<Item = (usize, usize)>) -> Array2<f32> {
    let mut adj = Array2::<f32>::zeros((num_nodes, num_nodes));

    for (u, v) in edges {
        assert!(u < num_nodes && v < num_nodes, "edge ({u}, {v}) out of range for {num_nodes} nodes");
        adj[[u, v]] = 1.0;
        adj[[v, u]] = 1.0;
    }

    adj.diag_mut().fill(1.0);

    for mut row in adj.axis_iter_mut(Axis(0)) {
        let sum = row.sum();
        if sum > 0.0 { row /= sum }
    }

    adj
}
