// src/ops/view/expand.rs

use crate::autograd::builder::build_node;
use crate::autograd::op::OpKind;
use crate::error::GradFlowError;
use crate::ops::view::sum_to_op;
use crate::tensor::Tensor;

// --- Forward Operation ---

/// Expands size-1 and missing leading dimensions of `a` to `target_shape`.
///
/// Returns `a` itself when the shape already matches.
///
/// # Errors
/// Returns `GradFlowError::BroadcastError` if `a` cannot be broadcast to `target_shape`.
pub fn broadcast_to_op(a: &Tensor, target_shape: &[usize]) -> Result<Tensor, GradFlowError> {
    let value = {
        let guard = a.read_data();
        if guard.shape() == target_shape {
            return Ok(a.clone());
        }
        guard.value.broadcast_to(target_shape)?
    };
    Ok(build_node(OpKind::BroadcastTo, vec![a.clone()], value))
}

// --- Backward Operation ---

/// Sums the gradient over every expanded dimension.
pub(crate) fn broadcast_to_backward(
    grad_output: &Tensor,
    inputs: &[Tensor],
) -> Result<Vec<Option<Tensor>>, GradFlowError> {
    let input = &inputs[0];
    if !input.requires_grad() {
        return Ok(vec![None]);
    }
    Ok(vec![Some(sum_to_op(grad_output, &input.shape())?)])
}

#[cfg(test)]
#[path = "expand_test.rs"]
mod tests;
