// src/autograd/op.rs

use crate::error::GradFlowError;
use crate::ops::{arithmetic, indexing, linalg, math_elem, reduction, stack, view};
use crate::ops::math_elem::{ElementwiseFn, UnaryOp};
use crate::tensor::Tensor;

/// The fixed set of differentiable operations a node can be produced by.
///
/// Each variant carries only the context its backward rule needs beyond the operand
/// handles (which the node keeps in its parent list). Forward rules are the `*_op`
/// functions in [`crate::ops`]; [`OpKind::backward`] dispatches to the matching
/// backward rule.
///
/// Backward rules are written with the same differentiable `*_op` functions as the
/// forward pass, so running them with grad mode enabled records a graph of the gradient
/// computation itself.
#[derive(Debug, Clone)]
pub enum OpKind {
    Neg,
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    MatMul,
    Transpose,
    Sum { axes: Vec<usize>, keep_dims: bool },
    Mean { axes: Vec<usize>, keep_dims: bool },
    Reshape,
    BroadcastTo,
    SumTo,
    Unary(UnaryOp),
    Map(ElementwiseFn),
    Element { index: usize },
    Scatter { index: usize },
    Stack,
}

impl OpKind {
    /// Short label used by diagnostics and graph views.
    pub fn name(&self) -> &'static str {
        match self {
            OpKind::Neg => "neg",
            OpKind::Add => "add",
            OpKind::Sub => "sub",
            OpKind::Mul => "mul",
            OpKind::Div => "div",
            OpKind::Pow => "pow",
            OpKind::MatMul => "matmul",
            OpKind::Transpose => "transpose",
            OpKind::Sum { .. } => "sum",
            OpKind::Mean { .. } => "mean",
            OpKind::Reshape => "reshape",
            OpKind::BroadcastTo => "broadcast_to",
            OpKind::SumTo => "sum_to",
            OpKind::Unary(op) => op.name(),
            OpKind::Map(f) => f.name(),
            OpKind::Element { .. } => "element",
            OpKind::Scatter { .. } => "scatter",
            OpKind::Stack => "stack",
        }
    }

    /// Computes the gradient contribution for each input given the gradient of the output.
    ///
    /// Returns one entry per input; the entry is `None` when that input does not require
    /// grad. Every returned gradient has exactly the shape of its input.
    pub fn backward(
        &self,
        grad_output: &Tensor,
        inputs: &[Tensor],
    ) -> Result<Vec<Option<Tensor>>, GradFlowError> {
        let expected_inputs = match self {
            OpKind::Add | OpKind::Sub | OpKind::Mul | OpKind::Div | OpKind::Pow | OpKind::MatMul => 2,
            OpKind::Stack => inputs.len(),
            _ => 1,
        };
        if inputs.len() != expected_inputs {
            return Err(GradFlowError::InternalError(format!(
                "{} backward expected {} inputs, got {}",
                self.name(),
                expected_inputs,
                inputs.len()
            )));
        }

        match self {
            OpKind::Neg => arithmetic::neg::neg_backward(grad_output, inputs),
            OpKind::Add => arithmetic::add::add_backward(grad_output, inputs),
            OpKind::Sub => arithmetic::sub::sub_backward(grad_output, inputs),
            OpKind::Mul => arithmetic::mul::mul_backward(grad_output, inputs),
            OpKind::Div => arithmetic::div::div_backward(grad_output, inputs),
            OpKind::Pow => arithmetic::pow::pow_backward(grad_output, inputs),
            OpKind::MatMul => linalg::matmul::matmul_backward(grad_output, inputs),
            OpKind::Transpose => linalg::transpose::transpose_backward(grad_output, inputs),
            OpKind::Sum { axes, keep_dims } => {
                reduction::sum::sum_backward(grad_output, inputs, axes, *keep_dims)
            }
            OpKind::Mean { axes, keep_dims } => {
                reduction::mean::mean_backward(grad_output, inputs, axes, *keep_dims)
            }
            OpKind::Reshape => view::reshape::reshape_backward(grad_output, inputs),
            OpKind::BroadcastTo => view::expand::broadcast_to_backward(grad_output, inputs),
            OpKind::SumTo => view::sum_to::sum_to_backward(grad_output, inputs),
            OpKind::Unary(op) => math_elem::unary::unary_backward(*op, grad_output, inputs),
            OpKind::Map(f) => math_elem::map::map_backward(f, grad_output, inputs),
            OpKind::Element { index } => indexing::element_backward(*index, grad_output, inputs),
            OpKind::Scatter { index } => indexing::scatter_backward(*index, grad_output, inputs),
            OpKind::Stack => stack::stack_backward(grad_output, inputs),
        }
    }
}
