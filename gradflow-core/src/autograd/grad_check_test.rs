// gradflow-core/src/autograd/grad_check_test.rs

use super::*;

#[test]
fn test_check_grad_passes_for_product() {
    let a = Tensor::new(vec![1.0, -2.0, 3.0], vec![3]).unwrap();
    let b = Tensor::new(vec![0.5, 4.0, -1.5], vec![3]).unwrap();
    a.requires_grad_(true);
    b.requires_grad_(true);
    let output_grad = Tensor::new(vec![1.0, 1.0, 1.0], vec![3]).unwrap();

    let result = check_grad(
        |inputs| inputs[0].mul(&inputs[1]),
        &[a, b],
        &output_grad,
        1e-6,
        1e-5,
    );
    assert_eq!(result, Ok(()));
}

#[test]
fn test_check_grad_detects_wrong_derivative() {
    use crate::ops::math_elem::ElementwiseFn;

    // Deliberately wrong derivative for x^2.
    let square = ElementwiseFn::new("bad_square", |x| x * x, |x| x);
    let a = Tensor::new(vec![1.0, 2.0], vec![2]).unwrap();
    a.requires_grad_(true);
    let output_grad = Tensor::new(vec![1.0, 1.0], vec![2]).unwrap();

    let err = check_grad(|inputs| Ok(inputs[0].map(&square)), &[a], &output_grad, 1e-6, 1e-4)
        .unwrap_err();
    assert!(matches!(
        err,
        GradCheckError::GradientMismatch { input_index: 0, element_index: 0, .. }
    ));
}

#[test]
fn test_check_grad_rejects_non_leaf() {
    let x = Tensor::scalar(2.0, true);
    let y = x.mul(&x).unwrap();
    let err = check_grad(|inputs| Ok(inputs[0].clone()), &[y], &Tensor::scalar(1.0, false), 1e-6, 1e-5)
        .unwrap_err();
    assert_eq!(err, GradCheckError::InputNotLeaf { input_index: 0 });
}
