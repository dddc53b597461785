// src/autograd/builder.rs

use crate::autograd::grad_mode::is_grad_enabled;
use crate::autograd::op::OpKind;
use crate::buffer::Buffer;
use crate::tensor::Tensor;
use crate::tensor_data::TensorData;

/// Wraps a freshly computed forward `value` into a node.
///
/// Linkage is recorded only when grad mode is on and at least one parent requires grad.
/// Otherwise the result is a constant leaf: no parents, no op, `requires_grad = false`.
pub(crate) fn build_node(op: OpKind, parents: Vec<Tensor>, value: Buffer) -> Tensor {
    let track = is_grad_enabled() && parents.iter().any(|p| p.requires_grad());
    if !track {
        return Tensor::constant(value);
    }
    Tensor::from_node(TensorData::result(value, parents, op))
}
