// src/ops/reduction/sum.rs

use crate::autograd::builder::build_node;
use crate::autograd::op::OpKind;
use crate::error::GradFlowError;
use crate::ops::reduction::expand_reduced_grad;
use crate::tensor::Tensor;

// --- Forward Operation ---

/// Sums the elements of `a` along `axes` (every axis when empty).
///
/// With `keep_dims` the reduced axes stay in the result with size 1.
///
/// # Errors
/// Returns `GradFlowError::InvalidAxis` if an axis is out of range.
pub fn sum_op(a: &Tensor, axes: &[usize], keep_dims: bool) -> Result<Tensor, GradFlowError> {
    let value = a.read_data().value.sum_axes(axes, keep_dims)?;
    Ok(build_node(
        OpKind::Sum {
            axes: axes.to_vec(),
            keep_dims,
        },
        vec![a.clone()],
        value,
    ))
}

// --- Backward Operation ---

/// Broadcasts the gradient back to the input shape.
pub(crate) fn sum_backward(
    grad_output: &Tensor,
    inputs: &[Tensor],
    axes: &[usize],
    keep_dims: bool,
) -> Result<Vec<Option<Tensor>>, GradFlowError> {
    let input = &inputs[0];
    if !input.requires_grad() {
        return Ok(vec![None]);
    }
    let grad = expand_reduced_grad(grad_output, &input.shape(), axes, keep_dims)?;
    Ok(vec![Some(grad)])
}

#[cfg(test)]
#[path = "sum_test.rs"]
mod tests;
