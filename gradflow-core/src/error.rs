use thiserror::Error;

/// Custom error type for the gradflow engine.
///
/// Shape and seed errors are raised synchronously by the operation that detects them
/// (forward construction or the entry of a backward pass); nothing is deferred.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum GradFlowError {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Cannot broadcast shapes: {shape1:?} and {shape2:?}")]
    BroadcastError {
        shape1: Vec<usize>,
        shape2: Vec<usize>,
    },

    #[error("Incompatible shapes for operation {operation}: {shape1:?} and {shape2:?}")]
    IncompatibleShapes {
        shape1: Vec<usize>,
        shape2: Vec<usize>,
        operation: String,
    },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Ragged array: row {row} has length {actual}, expected {expected}")]
    RaggedArray {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid axis {axis} for tensor of rank {rank}")]
    InvalidAxis { axis: usize, rank: usize },

    #[error("Index out of bounds: index {index} for {len} elements")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Backward called on non-scalar tensor of shape {shape:?} without explicit seed gradient.")]
    BackwardNonScalar { shape: Vec<usize> },

    #[error("Backward reached node produced by '{operation}' whose graph was already released; pass retain_graph(true) to keep it.")]
    StaleGraph { operation: String },

    #[error("Internal error: {0}")]
    InternalError(String),
}
