// src/ops/view/reshape.rs

use crate::autograd::builder::build_node;
use crate::autograd::op::OpKind;
use crate::error::GradFlowError;
use crate::tensor::Tensor;

/// Returns the same row-major data under `shape`.
///
/// # Errors
/// Returns `GradFlowError::ShapeMismatch` if the element counts differ.
pub fn reshape_op(a: &Tensor, shape: &[usize]) -> Result<Tensor, GradFlowError> {
    let value = a.read_data().value.reshape(shape)?;
    Ok(build_node(OpKind::Reshape, vec![a.clone()], value))
}

pub(crate) fn reshape_backward(
    grad_output: &Tensor,
    inputs: &[Tensor],
) -> Result<Vec<Option<Tensor>>, GradFlowError> {
    let input = &inputs[0];
    if !input.requires_grad() {
        return Ok(vec![None]);
    }
    Ok(vec![Some(reshape_op(grad_output, &input.shape())?)])
}

#[cfg(test)]
#[path = "reshape_test.rs"]
mod tests;
