// src/buffer.rs

use crate::error::GradFlowError;
use crate::tensor::utils::{
    broadcast_shapes, calculate_strides, coord_to_index_broadcasted, index_to_coord,
    normalize_axes,
};
use approx::{AbsDiffEq, RelativeEq};
use std::fmt;

/// Contiguous, row-major storage of `f64` values together with their shape.
///
/// `Buffer` is the numeric value type carried by every node of the graph (its `value`)
/// and the plain numeric form of gradients. An empty shape denotes a scalar holding
/// exactly one element.
///
/// All kernels here are pure: they never touch the computation graph. Differentiable
/// operations in [`crate::ops`] call them to compute forward values.
#[derive(Debug, Clone, PartialEq)]
pub struct Buffer {
    data: Vec<f64>,
    shape: Vec<usize>,
}

impl Buffer {
    /// Creates a buffer from row-major `data` and `shape`.
    ///
    /// # Errors
    /// Returns `GradFlowError::TensorCreationError` if the length of `data` does not
    /// match the number of elements described by `shape`.
    pub fn new(data: Vec<f64>, shape: Vec<usize>) -> Result<Self, GradFlowError> {
        let numel: usize = shape.iter().product();
        if data.len() != numel {
            return Err(GradFlowError::TensorCreationError {
                data_len: data.len(),
                shape,
            });
        }
        Ok(Buffer { data, shape })
    }

    /// Builds a buffer whose length is already known to match `shape`.
    pub(crate) fn from_parts(data: Vec<f64>, shape: Vec<usize>) -> Self {
        debug_assert_eq!(data.len(), shape.iter().product::<usize>());
        Buffer { data, shape }
    }

    /// Creates a 0-dimensional buffer holding `value`.
    pub fn scalar(value: f64) -> Self {
        Buffer {
            data: vec![value],
            shape: vec![],
        }
    }

    /// Creates a buffer of `shape` filled with `value`.
    pub fn full(shape: &[usize], value: f64) -> Self {
        let numel = shape.iter().product();
        Buffer {
            data: vec![value; numel],
            shape: shape.to_vec(),
        }
    }

    pub fn zeros(shape: &[usize]) -> Self {
        Self::full(shape, 0.0)
    }

    pub fn ones(shape: &[usize]) -> Self {
        Self::full(shape, 1.0)
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    pub fn numel(&self) -> usize {
        self.data.len()
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Returns the single element of a one-element buffer (any rank).
    pub fn item(&self) -> Result<f64, GradFlowError> {
        if self.data.len() != 1 {
            return Err(GradFlowError::ShapeMismatch {
                expected: vec![],
                actual: self.shape.clone(),
                operation: "item".to_string(),
            });
        }
        Ok(self.data[0])
    }

    /// Reads the element at multi-dimensional `index`.
    pub fn get(&self, index: &[usize]) -> Result<f64, GradFlowError> {
        if index.len() != self.shape.len() {
            return Err(GradFlowError::ShapeMismatch {
                expected: self.shape.clone(),
                actual: index.to_vec(),
                operation: "get (index rank)".to_string(),
            });
        }
        let strides = calculate_strides(&self.shape);
        let mut offset = 0;
        for (dim, (&i, &size)) in index.iter().zip(self.shape.iter()).enumerate() {
            if i >= size {
                return Err(GradFlowError::IndexOutOfBounds { index: i, len: size });
            }
            offset += i * strides[dim];
        }
        Ok(self.data[offset])
    }

    /// Applies `f` to every element.
    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Buffer {
        Buffer {
            data: self.data.iter().map(|&x| f(x)).collect(),
            shape: self.shape.clone(),
        }
    }

    /// Combines two buffers element-wise after broadcasting them to a common shape.
    ///
    /// # Errors
    /// Returns `GradFlowError::BroadcastError` if the shapes are not broadcast-compatible.
    pub fn zip_with<F: Fn(f64, f64) -> f64>(&self, other: &Buffer, f: F) -> Result<Buffer, GradFlowError> {
        if self.shape == other.shape {
            let data = self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect();
            return Ok(Buffer {
                data,
                shape: self.shape.clone(),
            });
        }

        let result_shape = broadcast_shapes(&self.shape, &other.shape)?;
        let result_strides = calculate_strides(&result_shape);
        let a_strides = calculate_strides(&self.shape);
        let b_strides = calculate_strides(&other.shape);
        let numel: usize = result_shape.iter().product();

        let mut data = Vec::with_capacity(numel);
        for i in 0..numel {
            let coord = index_to_coord(i, &result_strides, &result_shape);
            let a_idx = coord_to_index_broadcasted(&coord, &self.shape, &a_strides);
            let b_idx = coord_to_index_broadcasted(&coord, &other.shape, &b_strides);
            data.push(f(self.data[a_idx], other.data[b_idx]));
        }
        Ok(Buffer {
            data,
            shape: result_shape,
        })
    }

    /// Adds `other` into `self` element-wise. Shapes must match exactly.
    pub fn add_assign(&mut self, other: &Buffer) -> Result<(), GradFlowError> {
        if self.shape != other.shape {
            return Err(GradFlowError::ShapeMismatch {
                expected: self.shape.clone(),
                actual: other.shape.clone(),
                operation: "add_assign".to_string(),
            });
        }
        self.data
            .iter_mut()
            .zip(other.data.iter())
            .for_each(|(a, &b)| *a += b);
        Ok(())
    }

    /// Expands size-1 and missing leading dimensions so the result has `target_shape`.
    pub fn broadcast_to(&self, target_shape: &[usize]) -> Result<Buffer, GradFlowError> {
        if self.shape == target_shape {
            return Ok(self.clone());
        }
        let broadcast = broadcast_shapes(&self.shape, target_shape)?;
        if broadcast != target_shape {
            return Err(GradFlowError::BroadcastError {
                shape1: self.shape.clone(),
                shape2: target_shape.to_vec(),
            });
        }

        let target_strides = calculate_strides(target_shape);
        let source_strides = calculate_strides(&self.shape);
        let numel: usize = target_shape.iter().product();
        let mut data = Vec::with_capacity(numel);
        for i in 0..numel {
            let coord = index_to_coord(i, &target_strides, target_shape);
            data.push(self.data[coord_to_index_broadcasted(&coord, &self.shape, &source_strides)]);
        }
        Ok(Buffer {
            data,
            shape: target_shape.to_vec(),
        })
    }

    /// Sums along every dimension that broadcasting would have expanded, so that the
    /// result has `target_shape`. This is the adjoint of [`Buffer::broadcast_to`].
    ///
    /// # Errors
    /// Returns `GradFlowError::ShapeMismatch` if `target_shape` does not broadcast to
    /// the shape of `self`.
    pub fn sum_to_shape(&self, target_shape: &[usize]) -> Result<Buffer, GradFlowError> {
        if self.shape == target_shape {
            return Ok(self.clone());
        }
        match broadcast_shapes(target_shape, &self.shape) {
            Ok(ref s) if *s == self.shape => {}
            _ => {
                return Err(GradFlowError::ShapeMismatch {
                    expected: target_shape.to_vec(),
                    actual: self.shape.clone(),
                    operation: "sum_to_shape".to_string(),
                })
            }
        }

        let source_strides = calculate_strides(&self.shape);
        let target_strides = calculate_strides(target_shape);
        let mut result = Buffer::zeros(target_shape);
        for (i, &value) in self.data.iter().enumerate() {
            let coord = index_to_coord(i, &source_strides, &self.shape);
            result.data[coord_to_index_broadcasted(&coord, target_shape, &target_strides)] += value;
        }
        Ok(result)
    }

    /// Sums along `axes` (all axes when empty).
    ///
    /// With `keep_dims` the reduced dimensions stay in the shape with size 1.
    pub fn sum_axes(&self, axes: &[usize], keep_dims: bool) -> Result<Buffer, GradFlowError> {
        let axes = normalize_axes(axes, self.rank())?;
        let kept_shape = kept_dims_shape(&self.shape, &axes);
        let kept_strides = calculate_strides(&kept_shape);
        let source_strides = calculate_strides(&self.shape);

        let mut result = Buffer::zeros(&kept_shape);
        for (i, &value) in self.data.iter().enumerate() {
            let mut coord = index_to_coord(i, &source_strides, &self.shape);
            for &axis in &axes {
                coord[axis] = 0;
            }
            let offset: usize = coord
                .iter()
                .zip(kept_strides.iter())
                .map(|(c, s)| c * s)
                .sum();
            result.data[offset] += value;
        }

        if !keep_dims {
            result.shape = self
                .shape
                .iter()
                .enumerate()
                .filter(|(i, _)| !axes.contains(i))
                .map(|(_, &d)| d)
                .collect();
        }
        Ok(result)
    }

    /// Returns the same data under a new shape with the same number of elements.
    pub fn reshape(&self, shape: &[usize]) -> Result<Buffer, GradFlowError> {
        let numel: usize = shape.iter().product();
        if numel != self.numel() {
            return Err(GradFlowError::ShapeMismatch {
                expected: self.shape.clone(),
                actual: shape.to_vec(),
                operation: "reshape".to_string(),
            });
        }
        Ok(Buffer {
            data: self.data.clone(),
            shape: shape.to_vec(),
        })
    }

    /// Reorders dimensions: output dimension `k` is input dimension `axes[k]`.
    pub fn permute(&self, axes: &[usize]) -> Result<Buffer, GradFlowError> {
        let rank = self.rank();
        if axes.len() != rank {
            return Err(GradFlowError::ShapeMismatch {
                expected: self.shape.clone(),
                actual: axes.to_vec(),
                operation: "permute".to_string(),
            });
        }
        let mut seen = vec![false; rank];
        for &axis in axes {
            if axis >= rank || seen[axis] {
                return Err(GradFlowError::InvalidAxis { axis, rank });
            }
            seen[axis] = true;
        }
        Ok(self.permute_unchecked(axes))
    }

    /// Reverses the order of all dimensions (`.T`). Rank 0 and 1 are unchanged.
    pub fn transpose(&self) -> Buffer {
        if self.rank() < 2 {
            return self.clone();
        }
        let axes: Vec<usize> = (0..self.rank()).rev().collect();
        self.permute_unchecked(&axes)
    }

    // `axes` must be a permutation of 0..rank.
    fn permute_unchecked(&self, axes: &[usize]) -> Buffer {
        let out_shape: Vec<usize> = axes.iter().map(|&a| self.shape[a]).collect();
        let out_strides = calculate_strides(&out_shape);
        let in_strides = calculate_strides(&self.shape);
        let mut data = Vec::with_capacity(self.numel());
        for i in 0..self.numel() {
            let out_coord = index_to_coord(i, &out_strides, &out_shape);
            let offset: usize = out_coord
                .iter()
                .zip(axes.iter())
                .map(|(&c, &axis)| c * in_strides[axis])
                .sum();
            data.push(self.data[offset]);
        }
        Buffer {
            data,
            shape: out_shape,
        }
    }

    /// Matrix product of two 2-D buffers: `[M, K] x [K, N] -> [M, N]`.
    pub fn matmul(&self, other: &Buffer) -> Result<Buffer, GradFlowError> {
        if self.rank() != 2 || other.rank() != 2 || self.shape[1] != other.shape[0] {
            return Err(GradFlowError::IncompatibleShapes {
                shape1: self.shape.clone(),
                shape2: other.shape.clone(),
                operation: "matmul".to_string(),
            });
        }
        let (m, k, n) = (self.shape[0], self.shape[1], other.shape[1]);
        let mut data = vec![0.0; m * n];
        for i in 0..m {
            for l in 0..k {
                let a = self.data[i * k + l];
                for j in 0..n {
                    data[i * n + j] += a * other.data[l * n + j];
                }
            }
        }
        Ok(Buffer {
            data,
            shape: vec![m, n],
        })
    }
}

/// Shape of `shape` after reducing `axes` with `keep_dims = true`.
pub(crate) fn kept_dims_shape(shape: &[usize], axes: &[usize]) -> Vec<usize> {
    shape
        .iter()
        .enumerate()
        .map(|(i, &d)| if axes.contains(&i) { 1 } else { d })
        .collect()
}

impl From<f64> for Buffer {
    fn from(value: f64) -> Self {
        Buffer::scalar(value)
    }
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.shape.is_empty() {
            return write!(f, "{}", self.data[0]);
        }
        write!(f, "{:?} (shape {:?})", self.data, self.shape)
    }
}

impl AbsDiffEq for Buffer {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.shape == other.shape
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Buffer {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.shape == other.shape
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

// --- Tests ---
#[cfg(test)]
#[path = "buffer_test.rs"]
mod tests;
