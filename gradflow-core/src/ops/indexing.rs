// src/ops/indexing.rs

use crate::autograd::builder::build_node;
use crate::autograd::op::OpKind;
use crate::buffer::Buffer;
use crate::error::GradFlowError;
use crate::ops::view::reshape_op;
use crate::tensor::Tensor;

// --- Forward Operations ---

/// Extracts the element at row-major `index` as a 0-dimensional tensor.
///
/// # Errors
/// Returns `GradFlowError::IndexOutOfBounds` if `index >= a.numel()`.
pub fn element_op(a: &Tensor, index: usize) -> Result<Tensor, GradFlowError> {
    let value = {
        let guard = a.read_data();
        let len = guard.numel();
        let element = guard
            .value
            .data()
            .get(index)
            .copied()
            .ok_or(GradFlowError::IndexOutOfBounds { index, len })?;
        Buffer::scalar(element)
    };
    Ok(build_node(OpKind::Element { index }, vec![a.clone()], value))
}

/// Places the single value of `a` at row-major `index` of a zero tensor of `shape`.
///
/// # Errors
/// * `ShapeMismatch` if `a` does not hold exactly one element.
/// * `IndexOutOfBounds` if `index` is outside `shape`.
pub fn scatter_op(a: &Tensor, index: usize, shape: &[usize]) -> Result<Tensor, GradFlowError> {
    let mut value = Buffer::zeros(shape);
    let len = value.numel();
    if index >= len {
        return Err(GradFlowError::IndexOutOfBounds { index, len });
    }
    let element = a.item()?;
    value.data_mut()[index] = element;
    Ok(build_node(OpKind::Scatter { index }, vec![a.clone()], value))
}

// --- Backward Operations ---

/// The gradient of an extracted element lands at its position, zeros elsewhere.
pub(crate) fn element_backward(
    index: usize,
    grad_output: &Tensor,
    inputs: &[Tensor],
) -> Result<Vec<Option<Tensor>>, GradFlowError> {
    let input = &inputs[0];
    if !input.requires_grad() {
        return Ok(vec![None]);
    }
    Ok(vec![Some(scatter_op(grad_output, index, &input.shape())?)])
}

pub(crate) fn scatter_backward(
    index: usize,
    grad_output: &Tensor,
    inputs: &[Tensor],
) -> Result<Vec<Option<Tensor>>, GradFlowError> {
    let input = &inputs[0];
    if !input.requires_grad() {
        return Ok(vec![None]);
    }
    let picked = element_op(grad_output, index)?;
    Ok(vec![Some(reshape_op(&picked, &input.shape())?)])
}

#[cfg(test)]
#[path = "indexing_test.rs"]
mod tests;
