// src/ops/math_elem/map.rs

use crate::autograd::op::OpKind;
use crate::error::GradFlowError;
use crate::ops::apply_unary_op;
use crate::ops::arithmetic::mul_op;
use crate::tensor::Tensor;
use std::fmt;
use std::sync::Arc;

type ScalarFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// A user-supplied element-wise function with its derivative.
///
/// The derivative is evaluated numerically during backward, so gradients flowing through
/// a custom map are first order only: a higher-order pass treats `df(x)` as a constant.
#[derive(Clone)]
pub struct ElementwiseFn {
    name: &'static str,
    f: ScalarFn,
    df: ScalarFn,
}

impl ElementwiseFn {
    pub fn new<F, D>(name: &'static str, f: F, df: D) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
        D: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        ElementwiseFn {
            name,
            f: Arc::new(f),
            df: Arc::new(df),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for ElementwiseFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementwiseFn").field("name", &self.name).finish()
    }
}

// --- Forward Operation ---

/// Applies a custom element-wise function.
pub fn map_op(a: &Tensor, func: &ElementwiseFn) -> Tensor {
    let f = Arc::clone(&func.f);
    apply_unary_op(a, OpKind::Map(func.clone()), move |x| f(x))
}

// --- Backward Operation ---

pub(crate) fn map_backward(
    func: &ElementwiseFn,
    grad_output: &Tensor,
    inputs: &[Tensor],
) -> Result<Vec<Option<Tensor>>, GradFlowError> {
    let x = &inputs[0];
    if !x.requires_grad() {
        return Ok(vec![None]);
    }
    let local = Tensor::constant(x.value().map(|v| (func.df)(v)));
    Ok(vec![Some(mul_op(grad_output, &local)?)])
}

#[cfg(test)]
#[path = "map_test.rs"]
mod tests;
