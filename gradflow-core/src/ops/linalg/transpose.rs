// src/ops/linalg/transpose.rs

use crate::autograd::builder::build_node;
use crate::autograd::op::OpKind;
use crate::error::GradFlowError;
use crate::tensor::Tensor;

/// Reverses the order of all dimensions. Rank 0 and 1 tensors keep their value.
pub fn transpose_op(a: &Tensor) -> Tensor {
    let value = a.read_data().value.transpose();
    build_node(OpKind::Transpose, vec![a.clone()], value)
}

pub(crate) fn transpose_backward(
    grad_output: &Tensor,
    inputs: &[Tensor],
) -> Result<Vec<Option<Tensor>>, GradFlowError> {
    if inputs[0].requires_grad() {
        Ok(vec![Some(transpose_op(grad_output))])
    } else {
        Ok(vec![None])
    }
}
