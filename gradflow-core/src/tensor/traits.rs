// src/tensor/traits.rs

use crate::ops::arithmetic::{add_op, div_op, mul_op, neg_op, sub_op};
use crate::ops::scalar_const;
use crate::tensor::Tensor;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::sync::Arc;

impl Clone for Tensor {
    /// Shallow clone: both handles refer to the same node.
    fn clone(&self) -> Self {
        Tensor {
            data: Arc::clone(&self.data),
        }
    }
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let td = self.read_data();
        write!(
            f,
            "Tensor(op={}, shape={:?}, requires_grad={}, data={:?})",
            td.op_label,
            td.shape(),
            td.requires_grad,
            td.value.data()
        )
    }
}

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.read_data().value)
    }
}

impl PartialEq for Tensor {
    /// Compares shapes and values, not graph linkage.
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.data, &other.data) {
            return true;
        }
        self.read_data().value == other.read_data().value
    }
}

impl PartialOrd for Tensor {
    /// Orders single-element tensors by value, for data-dependent branching.
    ///
    /// Tensors with more than one element are unordered. Equal values of different
    /// shapes are unordered too, matching `eq`.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let lhs = self.item().ok()?;
        let rhs = other.item().ok()?;
        match lhs.partial_cmp(&rhs)? {
            Ordering::Equal if self.shape() != other.shape() => None,
            ordering => Some(ordering),
        }
    }
}

impl PartialEq<f64> for Tensor {
    fn eq(&self, other: &f64) -> bool {
        self.item().map_or(false, |v| v == *other)
    }
}

impl PartialOrd<f64> for Tensor {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        self.item().ok()?.partial_cmp(other)
    }
}

impl From<f64> for Tensor {
    /// A 0-dimensional constant.
    fn from(value: f64) -> Self {
        scalar_const(value)
    }
}

// --- Operator overloads ---
//
// Operators panic on shape errors; use the method forms (`add`, `sub`, ...) to get a
// `Result` instead.

macro_rules! impl_binary_operator {
    ($trait:ident, $method:ident, $op_fn:ident) => {
        impl $trait<&Tensor> for &Tensor {
            type Output = Tensor;
            fn $method(self, rhs: &Tensor) -> Tensor {
                $op_fn(self, rhs).unwrap_or_else(|e| panic!("{}", e))
            }
        }

        impl $trait<Tensor> for Tensor {
            type Output = Tensor;
            fn $method(self, rhs: Tensor) -> Tensor {
                $trait::$method(&self, &rhs)
            }
        }

        impl $trait<&Tensor> for Tensor {
            type Output = Tensor;
            fn $method(self, rhs: &Tensor) -> Tensor {
                $trait::$method(&self, rhs)
            }
        }

        impl $trait<Tensor> for &Tensor {
            type Output = Tensor;
            fn $method(self, rhs: Tensor) -> Tensor {
                $trait::$method(self, &rhs)
            }
        }

        impl $trait<f64> for &Tensor {
            type Output = Tensor;
            fn $method(self, rhs: f64) -> Tensor {
                $trait::$method(self, &scalar_const(rhs))
            }
        }

        impl $trait<f64> for Tensor {
            type Output = Tensor;
            fn $method(self, rhs: f64) -> Tensor {
                $trait::$method(&self, &scalar_const(rhs))
            }
        }

        impl $trait<&Tensor> for f64 {
            type Output = Tensor;
            fn $method(self, rhs: &Tensor) -> Tensor {
                $trait::$method(&scalar_const(self), rhs)
            }
        }

        impl $trait<Tensor> for f64 {
            type Output = Tensor;
            fn $method(self, rhs: Tensor) -> Tensor {
                $trait::$method(&scalar_const(self), &rhs)
            }
        }
    };
}

impl_binary_operator!(Add, add, add_op);
impl_binary_operator!(Sub, sub, sub_op);
impl_binary_operator!(Mul, mul, mul_op);
impl_binary_operator!(Div, div, div_op);

impl Neg for &Tensor {
    type Output = Tensor;
    fn neg(self) -> Tensor {
        neg_op(self)
    }
}

impl Neg for Tensor {
    type Output = Tensor;
    fn neg(self) -> Tensor {
        neg_op(&self)
    }
}
