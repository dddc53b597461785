//! # Differentiable Operations (`ops`)
//!
//! Every operation is a pair of rules living in the same file:
//!
//! - **`xxx_op` function:** the forward rule. It validates shapes, computes the value with
//!   the [`Buffer`] kernels and hands it to the graph builder, which links the operands as
//!   parents when gradients are being tracked.
//! - **`xxx_backward` function:** the backward rule, dispatched from
//!   [`OpKind::backward`](crate::autograd::OpKind::backward). It maps the gradient of the
//!   output to one gradient per operand, using `xxx_op` functions only, so it can itself be
//!   differentiated.
//!
//! ## Submodules
//!
//! - [`arithmetic`]: broadcasting element-wise arithmetic (neg, add, sub, mul, div, pow).
//! - [`linalg`]: matrix product and transpose.
//! - [`reduction`]: sum and mean over all or selected axes.
//! - [`view`]: reshape, broadcast_to and its adjoint sum_to.
//! - [`math_elem`]: element-wise unary functions and user-supplied maps.
//! - [`indexing`]: single-element extraction and its adjoint.
//! - [`stack`]: assembling scalar nodes into one array node.

use crate::autograd::builder::build_node;
use crate::autograd::op::OpKind;
use crate::buffer::Buffer;
use crate::error::GradFlowError;
use crate::tensor::Tensor;

pub mod arithmetic;
pub mod indexing;
pub mod linalg;
pub mod math_elem;
pub mod reduction;
pub mod stack;
pub mod view;

/// Applies a broadcasting element-wise binary function and records `op`.
pub(crate) fn apply_binary_op<F>(a: &Tensor, b: &Tensor, op: OpKind, f: F) -> Result<Tensor, GradFlowError>
where
    F: Fn(f64, f64) -> f64,
{
    let value = {
        let a_guard = a.read_data();
        if a.same_node(b) {
            a_guard.value.zip_with(&a_guard.value, f)?
        } else {
            let b_guard = b.read_data();
            a_guard.value.zip_with(&b_guard.value, f)?
        }
    };
    Ok(build_node(op, vec![a.clone(), b.clone()], value))
}

/// Applies an element-wise unary function and records `op`.
pub(crate) fn apply_unary_op<F>(a: &Tensor, op: OpKind, f: F) -> Tensor
where
    F: Fn(f64) -> f64,
{
    let value = a.read_data().value.map(f);
    build_node(op, vec![a.clone()], value)
}

/// A 0-dimensional constant.
pub(crate) fn scalar_const(value: f64) -> Tensor {
    Tensor::constant(Buffer::scalar(value))
}
