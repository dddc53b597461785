// src/ops/arithmetic/sub.rs

use crate::autograd::op::OpKind;
use crate::error::GradFlowError;
use crate::ops::apply_binary_op;
use crate::ops::arithmetic::neg_op;
use crate::ops::view::sum_to_op;
use crate::tensor::Tensor;

// --- Forward Operation ---

/// Element-wise subtraction `a - b` with broadcasting.
pub fn sub_op(a: &Tensor, b: &Tensor) -> Result<Tensor, GradFlowError> {
    apply_binary_op(a, b, OpKind::Sub, |x, y| x - y)
}

// --- Backward Operation ---

pub(crate) fn sub_backward(
    grad_output: &Tensor,
    inputs: &[Tensor],
) -> Result<Vec<Option<Tensor>>, GradFlowError> {
    let (a, b) = (&inputs[0], &inputs[1]);
    let grad_a = if a.requires_grad() {
        Some(sum_to_op(grad_output, &a.shape())?)
    } else {
        None
    };
    let grad_b = if b.requires_grad() {
        Some(sum_to_op(&neg_op(grad_output), &b.shape())?)
    } else {
        None
    };
    Ok(vec![grad_a, grad_b])
}
