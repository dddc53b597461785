// gradflow-core/src/ops/indexing_test.rs

use super::*;

#[test]
fn test_element_forward_and_bounds() {
    let t = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
    let e = element_op(&t, 2).unwrap();
    assert_eq!(e.shape(), Vec::<usize>::new());
    assert_eq!(e.item(), Ok(3.0));
    assert_eq!(
        element_op(&t, 4).unwrap_err(),
        GradFlowError::IndexOutOfBounds { index: 4, len: 4 }
    );
}

#[test]
fn test_element_backward_scatters() {
    let t = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
    t.requires_grad_(true);
    element_op(&t, 1).unwrap().backward().unwrap();
    assert_eq!(t.grad_value().shape(), &[2, 2]);
    assert_eq!(t.grad_value().data(), &[0.0, 1.0, 0.0, 0.0]);
}

#[test]
fn test_scatter_forward_and_backward() {
    let s = Tensor::scalar(5.0, true);
    let placed = scatter_op(&s, 2, &[3]).unwrap();
    assert_eq!(placed.to_vec(), vec![0.0, 0.0, 5.0]);
    let weights = Tensor::new(vec![1.0, 2.0, 3.0], vec![3]).unwrap();
    placed.mul(&weights).unwrap().sum().unwrap().backward().unwrap();
    assert_eq!(s.grad_value().item(), Ok(3.0));

    assert!(scatter_op(&s, 3, &[3]).is_err());
    let not_scalar = Tensor::new(vec![1.0, 2.0], vec![2]).unwrap();
    assert!(scatter_op(&not_scalar, 0, &[3]).is_err());
}

#[test]
fn test_elements_reassemble_gradients() {
    let t = Tensor::new(vec![1.0, 2.0, 3.0], vec![3]).unwrap();
    t.requires_grad_(true);
    let parts = t.elements().unwrap();
    // x0 * x1 + x2
    let y = parts[0].mul(&parts[1]).unwrap().add(&parts[2]).unwrap();
    y.backward().unwrap();
    assert_eq!(t.grad_value().data(), &[2.0, 1.0, 1.0]);
}
