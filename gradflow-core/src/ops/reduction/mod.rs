//! Reductions over all or selected axes.

pub mod mean;
pub mod sum;

pub use mean::mean_op;
pub use sum::sum_op;

use crate::buffer::kept_dims_shape;
use crate::error::GradFlowError;
use crate::ops::view::{broadcast_to_op, reshape_op};
use crate::tensor::utils::normalize_axes;
use crate::tensor::Tensor;

/// Spreads the gradient of a reduction back over the reduced input shape.
///
/// Without `keep_dims` the reduced axes are first restored with size 1.
pub(crate) fn expand_reduced_grad(
    grad_output: &Tensor,
    input_shape: &[usize],
    axes: &[usize],
    keep_dims: bool,
) -> Result<Tensor, GradFlowError> {
    let axes = normalize_axes(axes, input_shape.len())?;
    let kept_shape = kept_dims_shape(input_shape, &axes);
    let grad = if keep_dims {
        grad_output.clone()
    } else {
        reshape_op(grad_output, &kept_shape)?
    };
    broadcast_to_op(&grad, input_shape)
}
