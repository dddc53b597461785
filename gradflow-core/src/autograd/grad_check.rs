// src/autograd/grad_check.rs

use crate::autograd::grad_mode::no_grad;
use crate::autograd::graph::BackwardOptions;
use crate::buffer::Buffer;
use crate::error::GradFlowError;
use crate::tensor::Tensor;
use thiserror::Error;

/// Error type for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}, element {element_index}: analytical {analytical_grad:?} != numerical {numerical_grad:?} (difference {difference:?})")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },
    #[error("Forward function failed during gradient check: {0}")]
    ForwardPassError(GradFlowError),
    #[error("Backward pass failed during gradient check: {0}")]
    BackwardPassError(GradFlowError),
    #[error("Tensor error during gradient check: {0}")]
    TensorError(GradFlowError),
    #[error("Numerical gradient is not finite for input {input_index}, element {element_index} (loss+ {loss_plus:?}, loss- {loss_minus:?})")]
    NumericalGradNotFinite {
        input_index: usize,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },
    #[error("Analytical gradient is not finite for input {input_index}, element {element_index}: {value:?}")]
    AnalyticalGradNotFinite {
        input_index: usize,
        element_index: usize,
        value: f64,
    },
    #[error("Gradient check input {input_index} must be a leaf.")]
    InputNotLeaf { input_index: usize },
    #[error("Function did not propagate requires_grad.")]
    RequiresGradPropagationError,
}

impl From<GradFlowError> for GradCheckError {
    fn from(err: GradFlowError) -> Self {
        GradCheckError::TensorError(err)
    }
}

/// Checks analytical gradients against central finite differences.
///
/// The scalar objective is `sum(func(inputs) * output_grad)`. For every element of every
/// input that requires grad, the analytical gradient from one backward pass is compared to
/// `(L(x + eps) - L(x - eps)) / (2 eps)`. A mismatch is reported only when both the
/// absolute and the relative difference exceed `tolerance`.
///
/// Gradients of `inputs` are cleared before the analytical pass and hold its result on
/// return.
pub fn check_grad<F>(
    func: F,
    inputs: &[Tensor],
    output_grad: &Tensor,
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&[Tensor]) -> Result<Tensor, GradFlowError>,
{
    for (i, input) in inputs.iter().enumerate() {
        if !input.is_leaf() {
            return Err(GradCheckError::InputNotLeaf { input_index: i });
        }
        input.write_data().grad = None;
    }

    // --- Analytical pass ---
    let output = func(inputs).map_err(GradCheckError::ForwardPassError)?;
    if inputs.iter().any(|t| t.requires_grad()) && !output.requires_grad() {
        return Err(GradCheckError::RequiresGradPropagationError);
    }
    output
        .backward_with(BackwardOptions::default().with_seed(output_grad.clone()))
        .map_err(GradCheckError::BackwardPassError)?;
    let weights = output_grad.value();

    // --- Numerical pass ---
    let _guard = no_grad();
    for (i, input) in inputs.iter().enumerate() {
        if !input.requires_grad() {
            continue;
        }
        let analytical = input.grad_value();
        let original = input.value();

        for elem_idx in 0..original.numel() {
            let loss_at = |delta: f64| -> Result<f64, GradCheckError> {
                let mut data = original.data().to_vec();
                data[elem_idx] += delta;
                let mut perturbed_inputs = inputs.to_vec();
                perturbed_inputs[i] = Tensor::new(data, original.shape().to_vec())?;
                let out = func(&perturbed_inputs).map_err(GradCheckError::ForwardPassError)?;
                weighted_sum(&out.value(), &weights)
            };
            let loss_plus = loss_at(epsilon)?;
            let loss_minus = loss_at(-epsilon)?;
            let numerical_grad = (loss_plus - loss_minus) / (2.0 * epsilon);
            let analytical_grad = analytical.data()[elem_idx];

            if !numerical_grad.is_finite() {
                return Err(GradCheckError::NumericalGradNotFinite {
                    input_index: i,
                    element_index: elem_idx,
                    loss_plus,
                    loss_minus,
                });
            }
            if !analytical_grad.is_finite() {
                return Err(GradCheckError::AnalyticalGradNotFinite {
                    input_index: i,
                    element_index: elem_idx,
                    value: analytical_grad,
                });
            }

            let difference = (analytical_grad - numerical_grad).abs();
            if difference > tolerance && difference / (analytical_grad.abs() + epsilon) > tolerance {
                return Err(GradCheckError::GradientMismatch {
                    input_index: i,
                    element_index: elem_idx,
                    analytical_grad,
                    numerical_grad,
                    difference,
                });
            }
        }
    }
    Ok(())
}

fn weighted_sum(output: &Buffer, weights: &Buffer) -> Result<f64, GradCheckError> {
    if output.shape() != weights.shape() {
        return Err(GradCheckError::TensorError(GradFlowError::ShapeMismatch {
            expected: output.shape().to_vec(),
            actual: weights.shape().to_vec(),
            operation: "check_grad (loss)".to_string(),
        }));
    }
    Ok(output
        .data()
        .iter()
        .zip(weights.data().iter())
        .map(|(o, w)| o * w)
        .sum())
}

#[cfg(test)]
#[path = "grad_check_test.rs"]
mod tests;
