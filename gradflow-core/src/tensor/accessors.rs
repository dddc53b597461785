// src/tensor/accessors.rs

use crate::buffer::Buffer;
use crate::error::GradFlowError;
use crate::tensor::Tensor;

impl Tensor {
    /// Returns a clone of the tensor's shape.
    pub fn shape(&self) -> Vec<usize> {
        self.read_data().shape().to_vec()
    }

    pub fn rank(&self) -> usize {
        self.read_data().shape().len()
    }

    pub fn numel(&self) -> usize {
        self.read_data().numel()
    }

    /// Returns a copy of the forward value.
    pub fn value(&self) -> Buffer {
        self.read_data().value.clone()
    }

    /// Returns a copy of the flat row-major data.
    pub fn to_vec(&self) -> Vec<f64> {
        self.read_data().value.data().to_vec()
    }

    /// Extracts the value of a one-element tensor.
    pub fn item(&self) -> Result<f64, GradFlowError> {
        self.read_data().value.item()
    }

    /// Reads the element at a multi-dimensional index.
    pub fn get(&self, index: &[usize]) -> Result<f64, GradFlowError> {
        self.read_data().value.get(index)
    }

    /// A leaf has no parents: it was created by the user or built without tracking.
    pub fn is_leaf(&self) -> bool {
        self.read_data().is_leaf()
    }

    /// Name of the operation that produced this node (`"leaf"` for leaves).
    pub fn op_name(&self) -> &'static str {
        self.read_data().op_label
    }

    /// Handles to the operands this node was computed from.
    pub fn parents(&self) -> Vec<Tensor> {
        self.read_data().parents.clone()
    }
}
