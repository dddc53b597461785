// gradflow-core/src/array_test.rs

use super::*;

#[test]
fn test_array_from_containers() {
    assert_eq!(array(2.5, false).unwrap().shape(), Vec::<usize>::new());
    assert_eq!(array(vec![1.0, 2.0], false).unwrap().shape(), vec![2]);
    assert_eq!(array([1.0, 2.0, 3.0], false).unwrap().shape(), vec![3]);
    let slice: &[f64] = &[1.0, 2.0];
    assert_eq!(array(slice, false).unwrap().shape(), vec![2]);

    let m = array(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]], true).unwrap();
    assert_eq!(m.shape(), vec![2, 3]);
    assert_eq!(m.get(&[1, 0]), Ok(4.0));
    assert!(m.requires_grad());

    let fixed = array([[1.0, 2.0], [3.0, 4.0]], false).unwrap();
    assert_eq!(fixed.to_vec(), vec![1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_array_rejects_ragged() {
    let err = array(vec![vec![1.0, 2.0], vec![3.0]], false).unwrap_err();
    assert_eq!(
        err,
        GradFlowError::RaggedArray {
            row: 1,
            expected: 2,
            actual: 1
        }
    );
}

#[test]
fn test_array_grad_defaults_to_zeros() {
    let x = array(vec![1.0, 2.0], true).unwrap();
    assert_eq!(array_grad(&x), Buffer::zeros(&[2]));
}

#[test]
fn test_stack_and_scalar_grads() {
    let items: Vec<Tensor> = (1..=4).map(|v| Tensor::scalar(v as f64, true)).collect();
    let m = stack(&items, &[2, 2]).unwrap();
    assert_eq!(m.to_vec(), vec![1.0, 2.0, 3.0, 4.0]);

    let weights = array([[1.0, 10.0], [100.0, 1000.0]], false).unwrap();
    m.mul(&weights).unwrap().sum().unwrap().backward().unwrap();

    let grads = scalar_grads(&items, &[2, 2]).unwrap();
    assert_eq!(grads, weights.value());

    assert!(stack(&items, &[3]).is_err());
}

#[test]
fn test_array_zero_grad_over_collection() {
    let a = array(vec![1.0, 2.0], true).unwrap();
    let b = array(vec![3.0, 4.0], true).unwrap();
    let loss = a.mul(&b).unwrap().sum().unwrap();
    loss.backward().unwrap();
    assert_eq!(array_grad(&a).data(), &[3.0, 4.0]);

    array_zero_grad([&a, &b]);
    assert!(a.grad().is_none());
    assert!(b.grad().is_none());
    // The loss node is not reachable from the collection.
    assert!(loss.grad().is_some());
}

#[test]
fn test_array_rank_three() {
    let nested = vec![
        vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]],
        vec![vec![7.0, 8.0], vec![9.0, 10.0], vec![11.0, 12.0]],
    ];
    let t = array(nested, true).unwrap();
    assert_eq!(t.shape(), vec![2, 3, 2]);
    assert_eq!(t.get(&[1, 2, 0]), Ok(11.0));

    let fixed = array([[[1.0], [2.0]], [[3.0], [4.0]]], false).unwrap();
    assert_eq!(fixed.shape(), vec![2, 2, 1]);
    assert_eq!(fixed.to_vec(), vec![1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_array_rank_three_rejects_uneven_blocks() {
    let uneven = vec![vec![vec![1.0, 2.0]], vec![vec![3.0, 4.0], vec![5.0, 6.0]]];
    let err = array(uneven, false).unwrap_err();
    assert!(matches!(
        err,
        GradFlowError::ShapeMismatch { ref expected, ref actual, .. }
            if expected == &vec![1, 2] && actual == &vec![2, 2]
    ));

    let ragged_inside = vec![vec![vec![1.0, 2.0], vec![3.0]]];
    assert!(matches!(
        array(ragged_inside, false),
        Err(GradFlowError::RaggedArray { row: 1, .. })
    ));
}
