// src/tensor/ops_methods.rs

use crate::error::GradFlowError;
use crate::ops::arithmetic::{add_op, div_op, mul_op, neg_op, pow_op, sub_op};
use crate::ops::indexing::element_op;
use crate::ops::linalg::{matmul_op, transpose_op};
use crate::ops::math_elem::{map_op, unary_op, ElementwiseFn, UnaryOp};
use crate::ops::reduction::{mean_op, sum_op};
use crate::ops::scalar_const;
use crate::ops::view::{broadcast_to_op, reshape_op, sum_to_op};
use crate::tensor::Tensor;

macro_rules! unary_methods {
    ($($(#[$doc:meta])* $name:ident => $op:ident;)*) => {
        impl Tensor {
            $(
                $(#[$doc])*
                pub fn $name(&self) -> Tensor {
                    unary_op(self, UnaryOp::$op)
                }
            )*
        }
    };
}

impl Tensor {
    // --- Arithmetic ---

    pub fn add(&self, other: &Tensor) -> Result<Tensor, GradFlowError> {
        add_op(self, other)
    }

    pub fn sub(&self, other: &Tensor) -> Result<Tensor, GradFlowError> {
        sub_op(self, other)
    }

    pub fn mul(&self, other: &Tensor) -> Result<Tensor, GradFlowError> {
        mul_op(self, other)
    }

    pub fn div(&self, other: &Tensor) -> Result<Tensor, GradFlowError> {
        div_op(self, other)
    }

    pub fn neg(&self) -> Tensor {
        neg_op(self)
    }

    /// Element-wise power with a tensor exponent (broadcast).
    pub fn pow(&self, exponent: &Tensor) -> Result<Tensor, GradFlowError> {
        pow_op(self, exponent)
    }

    /// Element-wise power with a constant exponent.
    pub fn powf(&self, exponent: f64) -> Result<Tensor, GradFlowError> {
        pow_op(self, &scalar_const(exponent))
    }

    // --- Linear algebra ---

    pub fn matmul(&self, other: &Tensor) -> Result<Tensor, GradFlowError> {
        matmul_op(self, other)
    }

    /// Reverses all dimensions.
    pub fn transpose(&self) -> Tensor {
        transpose_op(self)
    }

    /// Short form of [`Tensor::transpose`].
    pub fn t(&self) -> Tensor {
        transpose_op(self)
    }

    // --- Reductions ---

    /// Sum of all elements, as a 0-dimensional tensor.
    pub fn sum(&self) -> Result<Tensor, GradFlowError> {
        sum_op(self, &[], false)
    }

    pub fn sum_axes(&self, axes: &[usize], keep_dims: bool) -> Result<Tensor, GradFlowError> {
        sum_op(self, axes, keep_dims)
    }

    /// Mean of all elements, as a 0-dimensional tensor.
    pub fn mean(&self) -> Result<Tensor, GradFlowError> {
        mean_op(self, &[], false)
    }

    pub fn mean_axes(&self, axes: &[usize], keep_dims: bool) -> Result<Tensor, GradFlowError> {
        mean_op(self, axes, keep_dims)
    }

    // --- Shape ---

    pub fn reshape(&self, shape: &[usize]) -> Result<Tensor, GradFlowError> {
        reshape_op(self, shape)
    }

    pub fn broadcast_to(&self, shape: &[usize]) -> Result<Tensor, GradFlowError> {
        broadcast_to_op(self, shape)
    }

    pub fn sum_to(&self, shape: &[usize]) -> Result<Tensor, GradFlowError> {
        sum_to_op(self, shape)
    }

    // --- Element-wise functions ---

    /// Applies a custom element-wise function. See [`ElementwiseFn`] for its limits.
    pub fn map(&self, func: &ElementwiseFn) -> Tensor {
        map_op(self, func)
    }

    /// Applies one of the built-in element-wise functions.
    pub fn apply(&self, op: UnaryOp) -> Tensor {
        unary_op(self, op)
    }

    // --- Elements ---

    /// The element at row-major `index`, as a differentiable 0-dimensional tensor.
    pub fn element(&self, index: usize) -> Result<Tensor, GradFlowError> {
        element_op(self, index)
    }

    /// Every element as a differentiable 0-dimensional tensor, in row-major order.
    pub fn elements(&self) -> Result<Vec<Tensor>, GradFlowError> {
        (0..self.numel()).map(|i| element_op(self, i)).collect()
    }
}

unary_methods! {
    /// Absolute value. The gradient at zero is taken as +1.
    abs => Abs;
    exp => Exp;
    /// Natural logarithm.
    log => Log;
    sqrt => Sqrt;
    sin => Sin;
    cos => Cos;
    tan => Tan;
    asin => Asin;
    acos => Acos;
    atan => Atan;
    sinh => Sinh;
    cosh => Cosh;
    tanh => Tanh;
    asinh => Asinh;
    acosh => Acosh;
    atanh => Atanh;
}
