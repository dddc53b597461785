use gradflow_core::{Buffer, Tensor};

// Each integration test binary uses a different subset of these helpers.

#[allow(dead_code)]
pub(crate) fn leaf(data: Vec<f64>, shape: Vec<usize>) -> Tensor {
    let t = Tensor::new(data, shape).expect("Test tensor creation failed");
    t.requires_grad_(true);
    t
}

#[allow(dead_code)]
pub(crate) fn scalar(value: f64) -> Tensor {
    Tensor::scalar(value, true)
}

/// Asserts that `actual` has `expected_shape` and matches `expected` element-wise within
/// `tolerance`.
#[allow(dead_code)]
pub(crate) fn check_buffer_near(actual: &Buffer, expected_shape: &[usize], expected: &[f64], tolerance: f64) {
    assert_eq!(actual.shape(), expected_shape, "Shape mismatch");
    assert_eq!(actual.numel(), expected.len(), "Data length mismatch");
    for (i, (a, e)) in actual.data().iter().zip(expected.iter()).enumerate() {
        let diff = (a - e).abs();
        if diff > tolerance {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, a, e, diff, tolerance
            );
        }
    }
}
