// gradflow-core/src/ops/view/reshape_test.rs

use super::*;

#[test]
fn test_reshape_forward_and_error() {
    let t = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap();
    let r = reshape_op(&t, &[3, 2]).unwrap();
    assert_eq!(r.shape(), vec![3, 2]);
    assert_eq!(r.to_vec(), t.to_vec());
    assert!(matches!(
        reshape_op(&t, &[4]),
        Err(GradFlowError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_reshape_backward_restores_shape() {
    let t = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap();
    t.requires_grad_(true);
    let r = reshape_op(&t, &[6]).unwrap();
    let weights = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![6]).unwrap();
    r.mul(&weights).unwrap().sum().unwrap().backward().unwrap();
    assert_eq!(t.grad_value().shape(), &[2, 3]);
    assert_eq!(t.grad_value().data(), weights.value().data());
}
