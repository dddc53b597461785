// src/ops/arithmetic/add.rs

use crate::autograd::op::OpKind;
use crate::error::GradFlowError;
use crate::ops::apply_binary_op;
use crate::ops::view::sum_to_op;
use crate::tensor::Tensor;

// --- Forward Operation ---

/// Element-wise addition with broadcasting.
///
/// # Errors
/// Returns `GradFlowError::BroadcastError` if the shapes are not broadcast-compatible.
pub fn add_op(a: &Tensor, b: &Tensor) -> Result<Tensor, GradFlowError> {
    apply_binary_op(a, b, OpKind::Add, |x, y| x + y)
}

// --- Backward Operation ---

/// `dL/da = sum_to(g, shape a)`, `dL/db = sum_to(g, shape b)`.
pub(crate) fn add_backward(
    grad_output: &Tensor,
    inputs: &[Tensor],
) -> Result<Vec<Option<Tensor>>, GradFlowError> {
    inputs
        .iter()
        .map(|input| {
            if input.requires_grad() {
                sum_to_op(grad_output, &input.shape()).map(Some)
            } else {
                Ok(None)
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
