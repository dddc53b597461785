// src/ops/math_elem/unary.rs

use crate::autograd::op::OpKind;
use crate::error::GradFlowError;
use crate::ops::arithmetic::{add_op, div_op, mul_op, neg_op, sub_op};
use crate::ops::math_elem::UnaryOp;
use crate::ops::{apply_unary_op, scalar_const};
use crate::tensor::Tensor;

// --- Forward Operation ---

/// Applies the built-in element-wise function `op`.
pub fn unary_op(a: &Tensor, op: UnaryOp) -> Tensor {
    apply_unary_op(a, OpKind::Unary(op), |x| op.apply(x))
}

// --- Backward Operation ---

pub(crate) fn unary_backward(
    op: UnaryOp,
    grad_output: &Tensor,
    inputs: &[Tensor],
) -> Result<Vec<Option<Tensor>>, GradFlowError> {
    let x = &inputs[0];
    if !x.requires_grad() {
        return Ok(vec![None]);
    }
    let g = grad_output;
    let one = scalar_const(1.0);
    let grad = match op {
        // The kink at zero takes the right derivative.
        UnaryOp::Abs => {
            let sign = Tensor::constant(x.value().map(|v| if v < 0.0 { -1.0 } else { 1.0 }));
            mul_op(g, &sign)?
        }
        UnaryOp::Exp => mul_op(g, &unary_op(x, UnaryOp::Exp))?,
        UnaryOp::Log => div_op(g, x)?,
        UnaryOp::Sqrt => {
            let twice_root = mul_op(&unary_op(x, UnaryOp::Sqrt), &scalar_const(2.0))?;
            div_op(g, &twice_root)?
        }
        UnaryOp::Sin => mul_op(g, &unary_op(x, UnaryOp::Cos))?,
        UnaryOp::Cos => neg_op(&mul_op(g, &unary_op(x, UnaryOp::Sin))?),
        UnaryOp::Tan => {
            let cos = unary_op(x, UnaryOp::Cos);
            div_op(g, &mul_op(&cos, &cos)?)?
        }
        UnaryOp::Asin => div_op(g, &one_minus_square_root(x)?)?,
        UnaryOp::Acos => neg_op(&div_op(g, &one_minus_square_root(x)?)?),
        UnaryOp::Atan => div_op(g, &add_op(&one, &mul_op(x, x)?)?)?,
        UnaryOp::Sinh => mul_op(g, &unary_op(x, UnaryOp::Cosh))?,
        UnaryOp::Cosh => mul_op(g, &unary_op(x, UnaryOp::Sinh))?,
        UnaryOp::Tanh => {
            let t = unary_op(x, UnaryOp::Tanh);
            mul_op(g, &sub_op(&one, &mul_op(&t, &t)?)?)?
        }
        UnaryOp::Asinh => {
            let root = unary_op(&add_op(&mul_op(x, x)?, &one)?, UnaryOp::Sqrt);
            div_op(g, &root)?
        }
        UnaryOp::Acosh => {
            let root = unary_op(&sub_op(&mul_op(x, x)?, &one)?, UnaryOp::Sqrt);
            div_op(g, &root)?
        }
        UnaryOp::Atanh => div_op(g, &sub_op(&one, &mul_op(x, x)?)?)?,
    };
    Ok(vec![Some(grad)])
}

/// `sqrt(1 - x^2)`
fn one_minus_square_root(x: &Tensor) -> Result<Tensor, GradFlowError> {
    let inner = sub_op(&scalar_const(1.0), &mul_op(x, x)?)?;
    Ok(unary_op(&inner, UnaryOp::Sqrt))
}

#[cfg(test)]
#[path = "unary_test.rs"]
mod tests;
