// src/ops/stack.rs

use crate::autograd::builder::build_node;
use crate::autograd::op::OpKind;
use crate::buffer::Buffer;
use crate::error::GradFlowError;
use crate::ops::indexing::element_op;
use crate::ops::view::reshape_op;
use crate::tensor::Tensor;

// --- Forward Operation ---

/// Assembles single-element tensors into one tensor of `shape`, in row-major order.
///
/// # Errors
/// * `TensorCreationError` if `shape` does not hold exactly `items.len()` elements.
/// * `ShapeMismatch` if an item holds more than one element.
pub fn stack_op(items: &[Tensor], shape: &[usize]) -> Result<Tensor, GradFlowError> {
    let data = items
        .iter()
        .map(|item| item.item())
        .collect::<Result<Vec<f64>, GradFlowError>>()?;
    let value = Buffer::new(data, shape.to_vec())?;
    Ok(build_node(OpKind::Stack, items.to_vec(), value))
}

// --- Backward Operation ---

/// Each item receives the gradient element at its position.
pub(crate) fn stack_backward(
    grad_output: &Tensor,
    inputs: &[Tensor],
) -> Result<Vec<Option<Tensor>>, GradFlowError> {
    inputs
        .iter()
        .enumerate()
        .map(|(i, item)| {
            if !item.requires_grad() {
                return Ok(None);
            }
            let picked = element_op(grad_output, i)?;
            reshape_op(&picked, &item.shape()).map(Some)
        })
        .collect()
}
