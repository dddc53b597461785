// src/ops/view/sum_to.rs

use crate::autograd::builder::build_node;
use crate::autograd::op::OpKind;
use crate::error::GradFlowError;
use crate::ops::view::broadcast_to_op;
use crate::tensor::Tensor;

// --- Forward Operation ---

/// Sums `a` along the dimensions broadcasting would add to go from `target_shape` to the
/// shape of `a`. This is how a broadcast operand receives its gradient.
///
/// Returns `a` itself when the shape already matches.
///
/// # Errors
/// Returns `GradFlowError::ShapeMismatch` if `target_shape` does not broadcast to the shape
/// of `a`.
pub fn sum_to_op(a: &Tensor, target_shape: &[usize]) -> Result<Tensor, GradFlowError> {
    let value = {
        let guard = a.read_data();
        if guard.shape() == target_shape {
            return Ok(a.clone());
        }
        guard.value.sum_to_shape(target_shape)?
    };
    Ok(build_node(OpKind::SumTo, vec![a.clone()], value))
}

// --- Backward Operation ---

pub(crate) fn sum_to_backward(
    grad_output: &Tensor,
    inputs: &[Tensor],
) -> Result<Vec<Option<Tensor>>, GradFlowError> {
    let input = &inputs[0];
    if !input.requires_grad() {
        return Ok(vec![None]);
    }
    Ok(vec![Some(broadcast_to_op(grad_output, &input.shape())?)])
}
