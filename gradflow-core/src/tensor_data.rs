// src/tensor_data.rs

use crate::autograd::op::OpKind;
use crate::buffer::Buffer;
use crate::tensor::Tensor;
use std::fmt::Debug;
use std::sync::{Arc, PoisonError};

/// Internal record of a graph node.
///
/// It is wrapped in `Arc<RwLock<TensorData>>` by [`Tensor`] so that several handles (user
/// variables, children holding it as a parent, gradient nodes) can share one node while
/// the backward pass mutates its gradient slot.
#[derive(Debug)]
pub struct TensorData {
    /// Forward value. Never modified after construction.
    pub(crate) value: Buffer,

    // --- Autograd Metadata ---
    /// Flag indicating if gradients should flow into this node.
    pub(crate) requires_grad: bool,
    /// Accumulated gradient, same shape as `value`. `None` stands for zero.
    ///
    /// After a pass with `make_graph` this is itself a differentiable node.
    pub(crate) grad: Option<Tensor>,
    /// Operands this node was computed from, in operand order. Empty for leaves.
    pub(crate) parents: Vec<Tensor>,
    /// Operation that produced the node. `None` for leaves and released nodes.
    pub(crate) op: Option<OpKind>,
    /// Label of the producing operation, kept after release for diagnostics.
    pub(crate) op_label: &'static str,
    /// Set once a backward pass ran through this node with `retain_graph = false`.
    pub(crate) released: bool,
}

impl TensorData {
    /// A parentless node holding `value`.
    pub(crate) fn leaf(value: Buffer, requires_grad: bool) -> Self {
        TensorData {
            value,
            requires_grad,
            grad: None,
            parents: Vec::new(),
            op: None,
            op_label: "leaf",
            released: false,
        }
    }

    /// A node produced by `op` from `parents`. Always requires grad.
    pub(crate) fn result(value: Buffer, parents: Vec<Tensor>, op: OpKind) -> Self {
        TensorData {
            value,
            requires_grad: true,
            grad: None,
            parents,
            op_label: op.name(),
            op: Some(op),
            released: false,
        }
    }

    pub fn shape(&self) -> &[usize] {
        self.value.shape()
    }

    pub fn numel(&self) -> usize {
        self.value.numel()
    }

    pub fn is_leaf(&self) -> bool {
        self.parents.is_empty()
    }
}

impl Drop for TensorData {
    /// Tears down the ancestry iteratively.
    ///
    /// Parent links (and gradient nodes, which are graphs themselves after a
    /// `make_graph` pass) are moved into a worklist. A handle that turns out to be the
    /// last one hands its own links over before its record is freed, so dropping a long
    /// chain never nests one drop call per node.
    fn drop(&mut self) {
        let mut pending: Vec<Tensor> = std::mem::take(&mut self.parents);
        pending.extend(self.grad.take());

        while let Some(node) = pending.pop() {
            let Tensor { data } = node;
            if let Ok(lock) = Arc::try_unwrap(data) {
                let mut inner = lock.into_inner().unwrap_or_else(PoisonError::into_inner);
                pending.append(&mut inner.parents);
                pending.extend(inner.grad.take());
            }
        }
    }
}

#[cfg(test)]
#[path = "tensor_data_test.rs"]
mod tests;
