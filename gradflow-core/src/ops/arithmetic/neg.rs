// src/ops/arithmetic/neg.rs

use crate::autograd::op::OpKind;
use crate::error::GradFlowError;
use crate::ops::apply_unary_op;
use crate::tensor::Tensor;

/// Element-wise negation.
pub fn neg_op(a: &Tensor) -> Tensor {
    apply_unary_op(a, OpKind::Neg, |x| -x)
}

pub(crate) fn neg_backward(
    grad_output: &Tensor,
    inputs: &[Tensor],
) -> Result<Vec<Option<Tensor>>, GradFlowError> {
    if inputs[0].requires_grad() {
        Ok(vec![Some(neg_op(grad_output))])
    } else {
        Ok(vec![None])
    }
}
