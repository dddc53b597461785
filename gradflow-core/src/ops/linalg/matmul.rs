// src/ops/linalg/matmul.rs

use crate::autograd::builder::build_node;
use crate::autograd::op::OpKind;
use crate::error::GradFlowError;
use crate::ops::linalg::transpose_op;
use crate::tensor::Tensor;

// --- Forward Operation ---

/// Matrix product of two 2-D tensors: `[M, K] x [K, N] -> [M, N]`.
///
/// # Errors
/// Returns `GradFlowError::IncompatibleShapes` if either operand is not 2-D or the inner
/// dimensions differ.
pub fn matmul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, GradFlowError> {
    let value = {
        let a_guard = a.read_data();
        if a.same_node(b) {
            a_guard.value.matmul(&a_guard.value)?
        } else {
            let b_guard = b.read_data();
            a_guard.value.matmul(&b_guard.value)?
        }
    };
    Ok(build_node(OpKind::MatMul, vec![a.clone(), b.clone()], value))
}

// --- Backward Operation ---

/// `dL/dA = g . B^T`, `dL/dB = A^T . g`.
pub(crate) fn matmul_backward(
    grad_output: &Tensor,
    inputs: &[Tensor],
) -> Result<Vec<Option<Tensor>>, GradFlowError> {
    let (a, b) = (&inputs[0], &inputs[1]);
    let grad_a = if a.requires_grad() {
        Some(matmul_op(grad_output, &transpose_op(b))?)
    } else {
        None
    };
    let grad_b = if b.requires_grad() {
        Some(matmul_op(&transpose_op(a), grad_output)?)
    } else {
        None
    };
    Ok(vec![grad_a, grad_b])
}

#[cfg(test)]
#[path = "matmul_test.rs"]
mod tests;
