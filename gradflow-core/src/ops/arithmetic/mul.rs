// src/ops/arithmetic/mul.rs

use crate::autograd::op::OpKind;
use crate::error::GradFlowError;
use crate::ops::apply_binary_op;
use crate::ops::view::sum_to_op;
use crate::tensor::Tensor;

// --- Forward Operation ---

/// Element-wise (Hadamard) product with broadcasting.
pub fn mul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, GradFlowError> {
    apply_binary_op(a, b, OpKind::Mul, |x, y| x * y)
}

// --- Backward Operation ---

/// `dL/da = sum_to(g * b)`, `dL/db = sum_to(g * a)`.
pub(crate) fn mul_backward(
    grad_output: &Tensor,
    inputs: &[Tensor],
) -> Result<Vec<Option<Tensor>>, GradFlowError> {
    let (a, b) = (&inputs[0], &inputs[1]);
    let grad_a = if a.requires_grad() {
        Some(sum_to_op(&mul_op(grad_output, b)?, &a.shape())?)
    } else {
        None
    };
    let grad_b = if b.requires_grad() {
        Some(sum_to_op(&mul_op(grad_output, a)?, &b.shape())?)
    } else {
        None
    };
    Ok(vec![grad_a, grad_b])
}

#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
