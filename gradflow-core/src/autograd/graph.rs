// src/autograd/graph.rs

use crate::autograd::grad_mode::set_grad_enabled;
use crate::buffer::Buffer;
use crate::error::GradFlowError;
use crate::ops::arithmetic::add_op;
use crate::tensor::{NodeId, Tensor};
use log::{debug, trace};
use std::collections::{HashMap, HashSet};

/// Options of a backward pass.
///
/// ```
/// use gradflow_core::{BackwardOptions, Tensor};
///
/// let x = Tensor::new(vec![1.0, 2.0], vec![2]).unwrap();
/// x.requires_grad_(true);
/// let y = x.mul(&x).unwrap();
/// let seed = Tensor::new(vec![1.0, 1.0], vec![2]).unwrap();
/// y.backward_with(BackwardOptions::default().with_seed(seed)).unwrap();
/// assert_eq!(x.grad_value().data(), &[2.0, 4.0]);
/// ```
#[derive(Debug, Clone)]
pub struct BackwardOptions {
    /// Gradient of the final objective with respect to the root. Defaults to ones for a
    /// single-element root.
    pub seed: Option<Tensor>,
    /// Record the backward computation so gradients are differentiable nodes.
    ///
    /// Gradient nodes point back into the graph they differentiate while the graph's
    /// nodes hold them in their gradient slots. Call `zero_grad()` on the root once the
    /// gradients are no longer needed, otherwise the graph is never freed.
    pub make_graph: bool,
    /// Keep backward rules usable after the pass.
    pub retain_graph: bool,
}

impl Default for BackwardOptions {
    fn default() -> Self {
        BackwardOptions {
            seed: None,
            make_graph: false,
            retain_graph: true,
        }
    }
}

impl BackwardOptions {
    pub fn with_seed(mut self, seed: Tensor) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn make_graph(mut self, make_graph: bool) -> Self {
        self.make_graph = make_graph;
        self
    }

    pub fn retain_graph(mut self, retain_graph: bool) -> Self {
        self.retain_graph = retain_graph;
        self
    }
}

/// Orders every node reachable from `root` through grad-requiring links so that each
/// node comes after all of its parents (post-order).
///
/// Iterative: graph depth is bounded by memory, not by the call stack.
pub(crate) fn topological_sort(root: &Tensor) -> Vec<Tensor> {
    let mut order = Vec::new();
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut stack: Vec<(Tensor, bool)> = vec![(root.clone(), false)];

    while let Some((node, expanded)) = stack.pop() {
        if expanded {
            order.push(node);
            continue;
        }
        if !visited.insert(node.node_id()) {
            continue;
        }
        let parents = node.parents();
        stack.push((node, true));
        // Reversed so the first operand is explored first.
        for parent in parents.into_iter().rev() {
            if parent.requires_grad() && !visited.contains(&parent.node_id()) {
                stack.push((parent, false));
            }
        }
    }
    order
}

/// Collects every node reachable from `root` through parent links, root first.
pub(crate) fn reachable_nodes(root: &Tensor) -> Vec<Tensor> {
    let mut nodes = Vec::new();
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut stack = vec![root.clone()];

    while let Some(node) = stack.pop() {
        if !visited.insert(node.node_id()) {
            continue;
        }
        for parent in node.parents().into_iter().rev() {
            if !visited.contains(&parent.node_id()) {
                stack.push(parent);
            }
        }
        nodes.push(node);
    }
    nodes
}

/// Runs reverse-mode differentiation from `root`.
///
/// Gradients flowing in this pass are combined per node in a pending map, then added to
/// the node's gradient slot when the node is processed. Parents always come later in the
/// reversed post-order, so a node's total is complete before its rule runs.
pub(crate) fn run_backward(root: &Tensor, options: BackwardOptions) -> Result<(), GradFlowError> {
    if !root.requires_grad() {
        debug!("backward on a tensor that does not require grad; nothing to do");
        return Ok(());
    }

    let root_shape = root.shape();
    let seed = match options.seed {
        Some(seed) => {
            if seed.shape() != root_shape {
                return Err(GradFlowError::ShapeMismatch {
                    expected: root_shape,
                    actual: seed.shape(),
                    operation: "backward (seed)".to_string(),
                });
            }
            seed
        }
        None if root.numel() == 1 => Tensor::constant(Buffer::ones(&root_shape)),
        None => return Err(GradFlowError::BackwardNonScalar { shape: root_shape }),
    };

    let sorted_nodes = topological_sort(root);
    debug!(
        "backward from '{}' over {} nodes (make_graph={}, retain_graph={})",
        root.op_name(),
        sorted_nodes.len(),
        options.make_graph,
        options.retain_graph
    );

    // Backward rules record a graph only in higher-order mode.
    let _mode = set_grad_enabled(options.make_graph);

    let mut pending: HashMap<NodeId, Tensor> = HashMap::new();
    pending.insert(root.node_id(), seed);

    for node in sorted_nodes.iter().rev() {
        let grad = match pending.remove(&node.node_id()) {
            Some(grad) => grad,
            None => continue,
        };
        trace!("backward through '{}' {:?}", node.op_name(), node.shape());

        let (op, parents, released, label) = {
            let guard = node.read_data();
            (
                guard.op.clone(),
                guard.parents.clone(),
                guard.released,
                guard.op_label,
            )
        };
        if released && !parents.is_empty() {
            return Err(GradFlowError::StaleGraph {
                operation: label.to_string(),
            });
        }

        accumulate_grad(node, &grad, options.make_graph)?;
        if parents.is_empty() {
            continue;
        }
        let op = op.ok_or_else(|| {
            GradFlowError::InternalError(format!("node '{}' has parents but no operation", label))
        })?;

        let input_grads = op.backward(&grad, &parents)?;
        if input_grads.len() != parents.len() {
            return Err(GradFlowError::InternalError(format!(
                "{} backward returned {} gradients for {} inputs",
                label,
                input_grads.len(),
                parents.len()
            )));
        }

        for (parent, input_grad) in parents.iter().zip(input_grads) {
            let input_grad = match input_grad {
                Some(g) if parent.requires_grad() => g,
                _ => continue,
            };
            if input_grad.shape() != parent.shape() {
                return Err(GradFlowError::ShapeMismatch {
                    expected: parent.shape(),
                    actual: input_grad.shape(),
                    operation: format!("{} backward", label),
                });
            }
            let combined = match pending.remove(&parent.node_id()) {
                Some(existing) => add_op(&existing, &input_grad)?,
                None => input_grad,
            };
            pending.insert(parent.node_id(), combined);
        }

        if !options.retain_graph {
            let mut guard = node.write_data();
            guard.released = true;
            guard.op = None;
        }
    }

    if !options.retain_graph {
        debug!("released graph below '{}'", root.op_name());
    }
    Ok(())
}

/// Adds `contribution` into the gradient slot of `node`.
///
/// Slots are replaced, never mutated, so a gradient node handed out earlier keeps its
/// value. In higher-order mode the sum is an `add` node, keeping the slot differentiable.
fn accumulate_grad(node: &Tensor, contribution: &Tensor, make_graph: bool) -> Result<(), GradFlowError> {
    let previous = node.grad();
    let updated = if make_graph {
        match previous {
            Some(prev) => add_op(&prev, contribution)?,
            None => contribution.clone(),
        }
    } else {
        let mut total = contribution.value();
        if let Some(prev) = previous {
            total.add_assign(&prev.value())?;
        }
        Tensor::constant(total)
    };
    node.write_data().grad = Some(updated);
    Ok(())
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
