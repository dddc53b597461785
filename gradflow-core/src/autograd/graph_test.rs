// gradflow-core/src/autograd/graph_test.rs

use super::*;
use approx::assert_relative_eq;
use std::sync::Arc;

fn position(order: &[Tensor], node: &Tensor) -> usize {
    order
        .iter()
        .position(|t| t.same_node(node))
        .expect("node missing from order")
}

#[test]
fn test_topological_sort_parents_first() {
    let x = Tensor::scalar(2.0, true);
    let a = x.mul(&x).unwrap();
    let b = x.add(&a).unwrap();
    let c = a.mul(&b).unwrap();

    let order = topological_sort(&c);
    assert_eq!(order.len(), 4);
    assert!(position(&order, &x) < position(&order, &a));
    assert!(position(&order, &a) < position(&order, &b));
    assert!(position(&order, &b) < position(&order, &c));
    assert!(order.last().unwrap().same_node(&c));
}

#[test]
fn test_topological_sort_skips_constants() {
    let x = Tensor::scalar(2.0, true);
    let k = Tensor::scalar(3.0, false);
    let y = x.mul(&k).unwrap();
    let order = topological_sort(&y);
    assert_eq!(order.len(), 2);
    assert!(order.iter().all(|t| !t.same_node(&k)));
}

#[test]
fn test_reachable_nodes_includes_constants_once() {
    let x = Tensor::scalar(2.0, true);
    let k = Tensor::scalar(3.0, false);
    let y = x.mul(&k).unwrap().add(&x).unwrap();
    let nodes = reachable_nodes(&y);
    assert_eq!(nodes.len(), 4);
    assert!(nodes[0].same_node(&y));
}

#[test]
fn test_diamond_sums_contributions() {
    // y = x * x + x  =>  dy/dx = 2x + 1
    let x = Tensor::scalar(3.0, true);
    let y = x.mul(&x).unwrap().add(&x).unwrap();
    y.backward().unwrap();
    assert_relative_eq!(x.grad_value().item().unwrap(), 7.0);
}

#[test]
fn test_intermediate_nodes_receive_grad() {
    let x = Tensor::scalar(3.0, true);
    let a = x.mul(&x).unwrap();
    let y = a.mul(&Tensor::scalar(2.0, false)).unwrap();
    y.backward().unwrap();
    assert_relative_eq!(y.grad_value().item().unwrap(), 1.0);
    assert_relative_eq!(a.grad_value().item().unwrap(), 2.0);
    assert_relative_eq!(x.grad_value().item().unwrap(), 12.0);
}

#[test]
fn test_backward_accumulates_across_calls() {
    let x = Tensor::scalar(3.0, true);
    let y = x.mul(&x).unwrap();
    y.backward().unwrap();
    y.backward().unwrap();
    assert_relative_eq!(x.grad_value().item().unwrap(), 12.0);
}

#[test]
fn test_earlier_grad_handle_keeps_value() {
    let x = Tensor::scalar(3.0, true);
    let y = x.mul(&x).unwrap();
    y.backward().unwrap();
    let first = x.grad().unwrap();
    y.backward().unwrap();
    assert_relative_eq!(first.item().unwrap(), 6.0);
    assert_relative_eq!(x.grad_value().item().unwrap(), 12.0);
}

#[test]
fn test_backward_without_requires_grad_is_noop() {
    let x = Tensor::scalar(3.0, false);
    let y = x.mul(&x).unwrap();
    assert_eq!(y.backward(), Ok(()));
    assert!(x.grad().is_none());
    assert!(y.grad().is_none());
}

#[test]
fn test_non_scalar_root_needs_seed() {
    let x = Tensor::new(vec![1.0, 2.0], vec![2]).unwrap();
    x.requires_grad_(true);
    let y = x.mul(&x).unwrap();
    assert_eq!(
        y.backward(),
        Err(GradFlowError::BackwardNonScalar { shape: vec![2] })
    );

    let bad_seed = Tensor::new(vec![1.0, 1.0, 1.0], vec![3]).unwrap();
    let err = y
        .backward_with(BackwardOptions::default().with_seed(bad_seed))
        .unwrap_err();
    assert!(matches!(err, GradFlowError::ShapeMismatch { .. }));

    let seed = Tensor::new(vec![1.0, 0.5], vec![2]).unwrap();
    y.backward_with(BackwardOptions::default().with_seed(seed))
        .unwrap();
    assert_eq!(x.grad_value().data(), &[2.0, 2.0]);
}

#[test]
fn test_single_element_array_root_uses_default_seed() {
    let x = Tensor::new(vec![4.0], vec![1, 1]).unwrap();
    x.requires_grad_(true);
    let y = x.mul(&x).unwrap();
    y.backward().unwrap();
    assert_eq!(x.grad_value().shape(), &[1, 1]);
    assert_relative_eq!(x.grad_value().item().unwrap(), 8.0);
}

#[test]
fn test_released_graph_is_stale() {
    let x = Tensor::scalar(3.0, true);
    let y = x.mul(&x).unwrap();
    y.backward_with(BackwardOptions::default().retain_graph(false))
        .unwrap();
    assert_relative_eq!(x.grad_value().item().unwrap(), 6.0);

    let err = y.backward().unwrap_err();
    assert_eq!(
        err,
        GradFlowError::StaleGraph {
            operation: "mul".to_string()
        }
    );
    // Parent links survive release.
    assert_eq!(y.parents().len(), 2);
    assert_eq!(y.op_name(), "mul");
}

#[test]
fn test_make_graph_grad_is_differentiable() {
    let x = Tensor::scalar(3.0, true);
    let y = x.mul(&x).unwrap().mul(&x).unwrap();
    y.backward_with(BackwardOptions::default().make_graph(true))
        .unwrap();
    let dy_dx = x.grad().unwrap();
    assert!(dy_dx.requires_grad());
    assert_relative_eq!(dy_dx.item().unwrap(), 27.0);

    y.zero_grad();
    dy_dx.backward().unwrap();
    // d2(x^3)/dx2 = 6x
    assert_relative_eq!(x.grad_value().item().unwrap(), 18.0);
}

#[test]
fn test_plain_grad_is_constant() {
    let x = Tensor::scalar(3.0, true);
    let y = x.mul(&x).unwrap();
    y.backward().unwrap();
    let g = x.grad().unwrap();
    assert!(!g.requires_grad());
    assert!(g.is_leaf());
}

#[test]
fn test_zero_grad_clears_reachable() {
    let x = Tensor::scalar(3.0, true);
    let a = x.mul(&x).unwrap();
    let y = a.add(&x).unwrap();
    y.backward().unwrap();
    y.zero_grad();
    assert!(x.grad().is_none());
    assert!(a.grad().is_none());
    assert!(y.grad().is_none());
    assert_eq!(x.grad_value().item(), Ok(0.0));
}

#[test]
fn test_make_graph_cycle_freed_by_zero_grad() {
    let build = || {
        let x = Tensor::scalar(17.0, true);
        let y = Tensor::scalar(13.0, true);
        let d = x.sub(&y).unwrap();
        let z = d.mul(&d).unwrap();
        z.backward_with(BackwardOptions::default().make_graph(true))
            .unwrap();
        let weak_d = Arc::downgrade(&d.data);
        (z, weak_d)
    };

    // Gradient slots keep the graph alive without zero_grad.
    let (z, weak_d) = build();
    drop(z);
    assert!(weak_d.upgrade().is_some());

    let (z, weak_d) = build();
    z.zero_grad();
    drop(z);
    assert!(weak_d.upgrade().is_none());
}

#[test]
fn test_plain_pass_leaves_no_cycle() {
    let x = Tensor::scalar(3.0, true);
    let d = x.mul(&x).unwrap();
    let z = d.mul(&d).unwrap();
    z.backward().unwrap();
    let weak_d = Arc::downgrade(&d.data);
    drop((d, z));
    assert!(weak_d.upgrade().is_none());
    assert_relative_eq!(x.grad_value().item().unwrap(), 108.0);
}
