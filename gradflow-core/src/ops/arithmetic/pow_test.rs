// gradflow-core/src/ops/arithmetic/pow_test.rs

use super::*;
use approx::assert_relative_eq;

#[test]
fn test_pow_forward() {
    let base = Tensor::new(vec![1.0, 2.0, 3.0], vec![3]).unwrap();
    let exponent = scalar_const(2.0);
    assert_eq!(pow_op(&base, &exponent).unwrap().to_vec(), vec![1.0, 4.0, 9.0]);
}

#[test]
fn test_pow_backward_constant_exponent() {
    let base = Tensor::scalar(3.0, true);
    let y = pow_op(&base, &scalar_const(3.0)).unwrap();
    y.backward().unwrap();
    assert_relative_eq!(base.grad_value().item().unwrap(), 27.0);
}

#[test]
fn test_pow_backward_negative_base_constant_exponent() {
    // No log branch for a constant exponent, so the gradient stays finite.
    let base = Tensor::scalar(-2.0, true);
    pow_op(&base, &scalar_const(2.0)).unwrap().backward().unwrap();
    assert_relative_eq!(base.grad_value().item().unwrap(), -4.0);
}

#[test]
fn test_pow_backward_tensor_exponent() {
    let base = Tensor::scalar(2.0, true);
    let exponent = Tensor::scalar(3.0, true);
    pow_op(&base, &exponent).unwrap().backward().unwrap();
    assert_relative_eq!(base.grad_value().item().unwrap(), 12.0);
    assert_relative_eq!(
        exponent.grad_value().item().unwrap(),
        8.0 * 2.0_f64.ln(),
        epsilon = 1e-12
    );
}
