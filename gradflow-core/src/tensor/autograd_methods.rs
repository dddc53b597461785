// src/tensor/autograd_methods.rs

use crate::autograd::graph::{reachable_nodes, run_backward, BackwardOptions};
use crate::buffer::Buffer;
use crate::error::GradFlowError;
use crate::tensor::Tensor;
use log::{debug, warn};

impl Tensor {
    /// Checks if gradients flow into this tensor.
    pub fn requires_grad(&self) -> bool {
        self.read_data().requires_grad
    }

    /// Sets the `requires_grad` flag and returns `self` for chaining.
    ///
    /// Intended for leaves. Setting it on a result node only affects operations built
    /// from it afterwards.
    pub fn requires_grad_(&self, requires_grad: bool) -> &Self {
        let mut guard = self.write_data();
        if requires_grad && !guard.is_leaf() {
            warn!(
                "setting requires_grad on a non-leaf tensor produced by '{}'",
                guard.op_label
            );
        }
        guard.requires_grad = requires_grad;
        self
    }

    /// Returns the gradient node, if a backward pass reached this tensor.
    ///
    /// After a pass with `make_graph` the returned node is differentiable. It references
    /// the nodes it was derived from, this one included, so the graph stays alive until
    /// [`zero_grad`](Tensor::zero_grad) clears the slots.
    pub fn grad(&self) -> Option<Tensor> {
        self.read_data().grad.clone()
    }

    /// Returns the numeric gradient, zeros when no gradient has been accumulated.
    pub fn grad_value(&self) -> Buffer {
        let guard = self.read_data();
        match &guard.grad {
            Some(grad) => grad.value(),
            None => Buffer::zeros(guard.shape()),
        }
    }

    /// Backpropagates from this tensor with default options.
    ///
    /// A single-element tensor is seeded with one; anything larger needs an explicit seed
    /// through [`Tensor::backward_with`].
    ///
    /// ```
    /// use gradflow_core::Tensor;
    ///
    /// let x = Tensor::scalar(1.0, true);
    /// let y = Tensor::scalar(2.0, true);
    /// let z = (&x - &y).powf(2.0).unwrap();
    /// z.backward().unwrap();
    /// assert_eq!(x.grad_value().item().unwrap(), -2.0);
    /// assert_eq!(y.grad_value().item().unwrap(), 2.0);
    /// ```
    pub fn backward(&self) -> Result<(), GradFlowError> {
        run_backward(self, BackwardOptions::default())
    }

    /// Backpropagates from this tensor with explicit options.
    ///
    /// # Errors
    /// * `BackwardNonScalar` if no seed is given and the tensor has more than one element.
    /// * `ShapeMismatch` if the seed's shape differs from the tensor's.
    /// * `StaleGraph` if the pass reaches a node released by an earlier pass.
    pub fn backward_with(&self, options: BackwardOptions) -> Result<(), GradFlowError> {
        run_backward(self, options)
    }

    /// Clears the gradient of this tensor and of every tensor it was computed from.
    ///
    /// This also drops the gradient graphs recorded by a `make_graph` pass, which is what
    /// lets such a graph be freed.
    pub fn zero_grad(&self) {
        let nodes = reachable_nodes(self);
        debug!("zero_grad over {} nodes", nodes.len());
        for node in nodes {
            node.write_data().grad = None;
        }
    }

    /// Returns a new leaf with the same value that does not require grad.
    pub fn detach(&self) -> Tensor {
        Tensor::constant(self.value())
    }
}
