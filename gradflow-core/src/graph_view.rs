// src/graph_view.rs

//! A plain description of the graph behind a node, for inspection and rendering.

use crate::buffer::Buffer;
use crate::tensor::{NodeId, Tensor};
use std::collections::HashMap;
use std::fmt::Write;

/// One node of a [`GraphView`].
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    /// Position in the view; parents always have smaller ids than their children.
    pub id: usize,
    pub op: &'static str,
    pub value: Buffer,
    pub grad: Option<Buffer>,
    pub is_leaf: bool,
    pub requires_grad: bool,
}

/// Nodes reachable from a root and the `(parent, child)` edges between them.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphView {
    pub nodes: Vec<GraphNode>,
    /// One edge per operand; a node used twice by the same operation appears twice.
    pub edges: Vec<(usize, usize)>,
}

impl GraphView {
    /// Graphviz DOT text for the view. Rendering is left to the caller.
    pub fn to_dot(&self) -> String {
        let mut dot = String::from("digraph G {\n");
        dot.push_str("  rankdir=LR;\n");
        dot.push_str("  node [shape=box];\n\n");
        for node in &self.nodes {
            let style = if node.requires_grad { "" } else { ", style=dashed" };
            // Writing to a String cannot fail.
            let _ = writeln!(
                dot,
                "  n{} [label=\"{} {}\\nshape: {:?}\"{}];",
                node.id,
                node.op,
                node.id,
                node.value.shape(),
                style
            );
        }
        dot.push('\n');
        for (parent, child) in &self.edges {
            let _ = writeln!(dot, "  n{} -> n{};", parent, child);
        }
        dot.push_str("}\n");
        dot
    }
}

impl Tensor {
    /// Describes every node reachable from this one, including constants.
    pub fn draw_graph(&self) -> GraphView {
        let mut ids: HashMap<NodeId, usize> = HashMap::new();
        let mut nodes = Vec::new();
        let mut edges = Vec::new();
        let mut stack: Vec<(Tensor, bool)> = vec![(self.clone(), false)];

        while let Some((node, expanded)) = stack.pop() {
            let node_id = node.node_id();
            if expanded {
                if ids.contains_key(&node_id) {
                    continue;
                }
                let id = nodes.len();
                ids.insert(node_id, id);
                let guard = node.read_data();
                for parent in &guard.parents {
                    if let Some(&parent_id) = ids.get(&parent.node_id()) {
                        edges.push((parent_id, id));
                    }
                }
                nodes.push(GraphNode {
                    id,
                    op: guard.op_label,
                    value: guard.value.clone(),
                    grad: guard.grad.as_ref().map(|g| g.value()),
                    is_leaf: guard.is_leaf(),
                    requires_grad: guard.requires_grad,
                });
                continue;
            }
            if ids.contains_key(&node_id) {
                continue;
            }
            let parents = node.parents();
            stack.push((node, true));
            for parent in parents.into_iter().rev() {
                if !ids.contains_key(&parent.node_id()) {
                    stack.push((parent, false));
                }
            }
        }
        GraphView { nodes, edges }
    }
}

#[cfg(test)]
#[path = "graph_view_test.rs"]
mod tests;
