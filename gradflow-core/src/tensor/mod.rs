// src/tensor/mod.rs

use crate::buffer::Buffer;
use crate::error::GradFlowError;
use crate::tensor_data::TensorData;
use std::sync::{Arc, RwLock};

mod accessors;
mod autograd_methods;
pub mod create;
mod ops_methods;
mod traits;

pub mod utils;

pub use create::{full, ones, rand, randn, zeros};

/// Identity of a node: the stable address of its shared record.
pub(crate) type NodeId = *const RwLock<TensorData>;

/// A node of the computation graph.
///
/// `Tensor` uses `Arc<RwLock<TensorData>>` internally to allow for:
/// 1.  **Shared Ownership:** user variables, child nodes (through their parent lists) and
///     gradient nodes all point at the same record; cloning a `Tensor` is cheap.
/// 2.  **Interior Mutability:** the backward pass and `zero_grad` update the gradient
///     slot through shared handles.
///
/// A node stays alive while any handle or descendant references it.
pub struct Tensor {
    pub(crate) data: Arc<RwLock<TensorData>>,
}

impl Tensor {
    /// Creates a leaf tensor from row-major `data` and `shape`. Requires grad defaults to false.
    ///
    /// # Errors
    /// Returns `GradFlowError::TensorCreationError` if the length of `data` does not match `shape`.
    pub fn new(data: Vec<f64>, shape: Vec<usize>) -> Result<Self, GradFlowError> {
        Ok(Self::from_buffer(Buffer::new(data, shape)?, false))
    }

    /// Creates a leaf tensor around an existing buffer.
    pub fn from_buffer(value: Buffer, requires_grad: bool) -> Self {
        Self::from_node(TensorData::leaf(value, requires_grad))
    }

    /// Creates a 0-dimensional leaf from any primitive number.
    pub fn scalar<N: num_traits::AsPrimitive<f64>>(value: N, requires_grad: bool) -> Self {
        Self::from_buffer(Buffer::scalar(value.as_()), requires_grad)
    }

    /// A leaf that never requires grad. Raw numbers mixed into operations become constants.
    pub fn constant(value: Buffer) -> Self {
        Self::from_buffer(value, false)
    }

    pub(crate) fn from_node(node: TensorData) -> Self {
        Tensor {
            data: Arc::new(RwLock::new(node)),
        }
    }

    /// Acquires a read lock on the node record.
    ///
    /// Panics if the RwLock is poisoned.
    pub fn read_data(&self) -> std::sync::RwLockReadGuard<'_, TensorData> {
        self.data.read().expect("RwLock poisoned")
    }

    /// Acquires a write lock on the node record.
    ///
    /// Panics if the RwLock is poisoned.
    pub fn write_data(&self) -> std::sync::RwLockWriteGuard<'_, TensorData> {
        self.data.write().expect("RwLock poisoned")
    }

    pub(crate) fn node_id(&self) -> NodeId {
        Arc::as_ptr(&self.data)
    }

    /// Returns true if both handles refer to the same node.
    pub fn same_node(&self, other: &Tensor) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

#[cfg(test)]
#[path = "tensor_test.rs"]
mod tests;
