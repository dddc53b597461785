// src/ops/arithmetic/pow.rs

use crate::autograd::op::OpKind;
use crate::error::GradFlowError;
use crate::ops::apply_binary_op;
use crate::ops::arithmetic::{mul_op, sub_op};
use crate::ops::math_elem::{unary_op, UnaryOp};
use crate::ops::scalar_const;
use crate::ops::view::sum_to_op;
use crate::tensor::Tensor;

// --- Forward Operation ---

/// Element-wise power `base ^ exponent` with broadcasting.
///
/// Negative bases with non-integer exponents produce NaN, as `f64::powf` does.
pub fn pow_op(base: &Tensor, exponent: &Tensor) -> Result<Tensor, GradFlowError> {
    apply_binary_op(base, exponent, OpKind::Pow, f64::powf)
}

// --- Backward Operation ---

/// `dL/dbase = sum_to(g * e * base^(e - 1))`.
///
/// `dL/dexp = sum_to(g * base^e * ln(base))` is only formed when the exponent requires
/// grad, so constant exponents never evaluate `ln` of a non-positive base.
pub(crate) fn pow_backward(
    grad_output: &Tensor,
    inputs: &[Tensor],
) -> Result<Vec<Option<Tensor>>, GradFlowError> {
    let (base, exponent) = (&inputs[0], &inputs[1]);
    let grad_base = if base.requires_grad() {
        let exponent_minus_one = sub_op(exponent, &scalar_const(1.0))?;
        let local = mul_op(exponent, &pow_op(base, &exponent_minus_one)?)?;
        Some(sum_to_op(&mul_op(grad_output, &local)?, &base.shape())?)
    } else {
        None
    };
    let grad_exponent = if exponent.requires_grad() {
        let local = mul_op(&pow_op(base, exponent)?, &unary_op(base, UnaryOp::Log))?;
        Some(sum_to_op(&mul_op(grad_output, &local)?, &exponent.shape())?)
    } else {
        None
    };
    Ok(vec![grad_base, grad_exponent])
}

#[cfg(test)]
#[path = "pow_test.rs"]
mod tests;
