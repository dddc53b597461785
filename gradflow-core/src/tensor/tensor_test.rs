// gradflow-core/src/tensor/tensor_test.rs

use super::*;
use crate::autograd::no_grad;

#[test]
fn test_new_and_accessors() {
    let t = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap();
    assert_eq!(t.shape(), vec![2, 3]);
    assert_eq!(t.rank(), 2);
    assert_eq!(t.numel(), 6);
    assert_eq!(t.get(&[1, 2]), Ok(6.0));
    assert!(t.is_leaf());
    assert!(!t.requires_grad());
    assert_eq!(t.op_name(), "leaf");
}

#[test]
fn test_new_rejects_bad_length() {
    let err = Tensor::new(vec![1.0, 2.0], vec![3]).unwrap_err();
    assert!(matches!(err, GradFlowError::TensorCreationError { data_len: 2, .. }));
}

#[test]
fn test_scalar_from_integer() {
    let t = Tensor::scalar(3_i32, true);
    assert_eq!(t.item(), Ok(3.0));
    assert!(t.requires_grad());
    assert_eq!(t.shape(), Vec::<usize>::new());
}

#[test]
fn test_clone_shares_node() {
    let a = Tensor::scalar(1.0, false);
    let b = a.clone();
    assert!(a.same_node(&b));
    b.requires_grad_(true);
    assert!(a.requires_grad());
}

#[test]
fn test_result_links_parents_only_when_tracking() {
    let x = Tensor::scalar(2.0, true);
    let c = Tensor::scalar(3.0, false);

    let y = x.mul(&c).unwrap();
    assert!(y.requires_grad());
    assert_eq!(y.op_name(), "mul");
    assert_eq!(y.parents().len(), 2);

    let k = c.mul(&c).unwrap();
    assert!(!k.requires_grad());
    assert!(k.is_leaf());

    let _guard = no_grad();
    let z = x.mul(&x).unwrap();
    assert!(!z.requires_grad());
    assert!(z.parents().is_empty());
}

#[test]
fn test_operators_and_equality() {
    let a = Tensor::new(vec![1.0, 2.0], vec![2]).unwrap();
    let b = Tensor::new(vec![3.0, 5.0], vec![2]).unwrap();
    assert_eq!(&a + &b, Tensor::new(vec![4.0, 7.0], vec![2]).unwrap());
    assert_eq!(&b - &a, Tensor::new(vec![2.0, 3.0], vec![2]).unwrap());
    assert_eq!(&a * 2.0, Tensor::new(vec![2.0, 4.0], vec![2]).unwrap());
    assert_eq!(1.0_f64 / &a, Tensor::new(vec![1.0, 0.5], vec![2]).unwrap());
    assert_eq!(-&a, Tensor::new(vec![-1.0, -2.0], vec![2]).unwrap());
}

#[test]
#[should_panic(expected = "Cannot broadcast shapes")]
fn test_operator_panics_on_shape_error() {
    let a = Tensor::new(vec![1.0, 2.0], vec![2]).unwrap();
    let b = Tensor::new(vec![1.0, 2.0, 3.0], vec![3]).unwrap();
    let _ = &a + &b;
}

#[test]
fn test_detach() {
    let x = Tensor::scalar(2.0, true);
    let y = (&x * &x).detach();
    assert!(!y.requires_grad());
    assert!(y.is_leaf());
    assert_eq!(y.item(), Ok(4.0));
}

#[test]
fn test_requires_grad_on_result_still_sets_flag() {
    let x = Tensor::scalar(2.0, true);
    let y = &x + 1.0;
    y.requires_grad_(false);
    assert!(!y.requires_grad());
    y.requires_grad_(true);
    assert!(y.requires_grad());
}

#[test]
fn test_display_and_debug() {
    let s = Tensor::scalar(1.5, false);
    assert_eq!(format!("{}", s), "1.5");
    let debug = format!("{:?}", Tensor::scalar(1.5, true));
    assert!(debug.contains("requires_grad=true"));
}

#[test]
fn test_single_element_ordering() {
    let a = Tensor::scalar(1.0, true);
    let b = Tensor::scalar(2.0, false);
    assert!(a < b);
    assert!(b >= a);
    assert!(a <= a.clone());
    assert!(a > 0.5);
    assert!(a == 1.0);
    assert!(!(a < 1.0));

    // A gate chosen from a forward value still differentiates the chosen branch.
    let x = Tensor::scalar(-3.0, true);
    let y = if x > 0.0 { x.clone() } else { &x * 0.1 };
    y.backward().unwrap();
    assert_eq!(x.grad_value().item(), Ok(0.1));
}

#[test]
fn test_ordering_undefined_for_arrays_and_mismatched_shapes() {
    let v = Tensor::new(vec![1.0, 2.0], vec![2]).unwrap();
    let s = Tensor::scalar(1.0, false);
    assert_eq!(v.partial_cmp(&s), None);
    assert!(!(v < 3.0));
    assert!(v != 1.0);

    let column = Tensor::new(vec![1.0], vec![1, 1]).unwrap();
    assert_eq!(column.partial_cmp(&s), None);
    assert_ne!(column, s);
    let bigger = Tensor::new(vec![5.0], vec![1, 1]).unwrap();
    assert!(bigger > s);
}
