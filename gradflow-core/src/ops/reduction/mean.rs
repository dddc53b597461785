// src/ops/reduction/mean.rs

use crate::autograd::builder::build_node;
use crate::autograd::op::OpKind;
use crate::error::GradFlowError;
use crate::ops::arithmetic::mul_op;
use crate::ops::reduction::expand_reduced_grad;
use crate::ops::scalar_const;
use crate::tensor::utils::normalize_axes;
use crate::tensor::Tensor;

/// Number of input elements folded into each output element.
fn reduced_count(shape: &[usize], axes: &[usize]) -> Result<usize, GradFlowError> {
    Ok(normalize_axes(axes, shape.len())?
        .iter()
        .map(|&axis| shape[axis])
        .product())
}

// --- Forward Operation ---

/// Mean of the elements of `a` along `axes` (every axis when empty).
///
/// Reducing zero elements yields NaN.
pub fn mean_op(a: &Tensor, axes: &[usize], keep_dims: bool) -> Result<Tensor, GradFlowError> {
    let value = {
        let guard = a.read_data();
        let n = reduced_count(guard.shape(), axes)? as f64;
        guard.value.sum_axes(axes, keep_dims)?.map(|s| s / n)
    };
    Ok(build_node(
        OpKind::Mean {
            axes: axes.to_vec(),
            keep_dims,
        },
        vec![a.clone()],
        value,
    ))
}

// --- Backward Operation ---

/// Broadcasts the gradient back to the input shape and divides it by the element count.
pub(crate) fn mean_backward(
    grad_output: &Tensor,
    inputs: &[Tensor],
    axes: &[usize],
    keep_dims: bool,
) -> Result<Vec<Option<Tensor>>, GradFlowError> {
    let input = &inputs[0];
    if !input.requires_grad() {
        return Ok(vec![None]);
    }
    let input_shape = input.shape();
    let n = reduced_count(&input_shape, axes)? as f64;
    let spread = expand_reduced_grad(grad_output, &input_shape, axes, keep_dims)?;
    Ok(vec![Some(mul_op(&spread, &scalar_const(1.0 / n))?)])
}

#[cfg(test)]
#[path = "mean_test.rs"]
mod tests;
