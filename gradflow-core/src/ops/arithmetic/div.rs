// src/ops/arithmetic/div.rs

use crate::autograd::op::OpKind;
use crate::error::GradFlowError;
use crate::ops::apply_binary_op;
use crate::ops::arithmetic::{mul_op, neg_op};
use crate::ops::view::sum_to_op;
use crate::tensor::Tensor;

// --- Forward Operation ---

/// Element-wise division `a / b` with broadcasting. Division by zero follows IEEE 754.
pub fn div_op(a: &Tensor, b: &Tensor) -> Result<Tensor, GradFlowError> {
    apply_binary_op(a, b, OpKind::Div, |x, y| x / y)
}

// --- Backward Operation ---

/// `dL/da = sum_to(g / b)`, `dL/db = sum_to(-g * a / b^2)`.
pub(crate) fn div_backward(
    grad_output: &Tensor,
    inputs: &[Tensor],
) -> Result<Vec<Option<Tensor>>, GradFlowError> {
    let (a, b) = (&inputs[0], &inputs[1]);
    let grad_a = if a.requires_grad() {
        Some(sum_to_op(&div_op(grad_output, b)?, &a.shape())?)
    } else {
        None
    };
    let grad_b = if b.requires_grad() {
        let numerator = mul_op(&neg_op(grad_output), a)?;
        let b_squared = mul_op(b, b)?;
        Some(sum_to_op(&div_op(&numerator, &b_squared)?, &b.shape())?)
    } else {
        None
    };
    Ok(vec![grad_a, grad_b])
}

#[cfg(test)]
#[path = "div_test.rs"]
mod tests;
