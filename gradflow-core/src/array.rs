// src/array.rs

//! Conversions between plain numeric containers and graph nodes.
//!
//! An array-valued node is one [`Tensor`]; its gradient is a [`Buffer`] of the same
//! shape. Containers of scalar nodes are bridged with [`stack`] and
//! [`Tensor::elements`].

use crate::buffer::Buffer;
use crate::error::GradFlowError;
use crate::ops::stack::stack_op;
use crate::tensor::Tensor;

/// Raw rectangular numeric data that can become a [`Buffer`].
pub trait IntoBuffer {
    fn into_buffer(self) -> Result<Buffer, GradFlowError>;
}

impl IntoBuffer for Buffer {
    fn into_buffer(self) -> Result<Buffer, GradFlowError> {
        Ok(self)
    }
}

impl IntoBuffer for f64 {
    fn into_buffer(self) -> Result<Buffer, GradFlowError> {
        Ok(Buffer::scalar(self))
    }
}

impl IntoBuffer for Vec<f64> {
    fn into_buffer(self) -> Result<Buffer, GradFlowError> {
        let len = self.len();
        Buffer::new(self, vec![len])
    }
}

impl IntoBuffer for &[f64] {
    fn into_buffer(self) -> Result<Buffer, GradFlowError> {
        self.to_vec().into_buffer()
    }
}

impl<const N: usize> IntoBuffer for [f64; N] {
    fn into_buffer(self) -> Result<Buffer, GradFlowError> {
        self.to_vec().into_buffer()
    }
}

impl IntoBuffer for Vec<Vec<f64>> {
    fn into_buffer(self) -> Result<Buffer, GradFlowError> {
        rows_to_buffer(self.iter().map(|row| row.as_slice()))
    }
}

impl<const N: usize, const M: usize> IntoBuffer for [[f64; N]; M] {
    fn into_buffer(self) -> Result<Buffer, GradFlowError> {
        rows_to_buffer(self.iter().map(|row| row.as_slice()))
    }
}

impl IntoBuffer for Vec<Vec<Vec<f64>>> {
    fn into_buffer(self) -> Result<Buffer, GradFlowError> {
        blocks_to_buffer(self.into_iter().map(IntoBuffer::into_buffer))
    }
}

impl<const N: usize, const M: usize, const L: usize> IntoBuffer for [[[f64; N]; M]; L] {
    fn into_buffer(self) -> Result<Buffer, GradFlowError> {
        blocks_to_buffer(self.into_iter().map(IntoBuffer::into_buffer))
    }
}

/// Stacks equally shaped blocks along a new leading axis.
fn blocks_to_buffer<I>(blocks: I) -> Result<Buffer, GradFlowError>
where
    I: Iterator<Item = Result<Buffer, GradFlowError>>,
{
    let mut data = Vec::new();
    let mut block_shape: Option<Vec<usize>> = None;
    let mut n_blocks = 0;
    for block in blocks {
        let block = block?;
        let expected = block_shape.get_or_insert_with(|| block.shape().to_vec());
        if block.shape() != expected.as_slice() {
            return Err(GradFlowError::ShapeMismatch {
                expected: expected.clone(),
                actual: block.shape().to_vec(),
                operation: format!("array (block {})", n_blocks),
            });
        }
        data.extend(block.into_vec());
        n_blocks += 1;
    }
    let mut shape = vec![n_blocks];
    shape.extend(block_shape.unwrap_or_else(|| vec![0, 0]));
    Buffer::new(data, shape)
}

/// Stacks rows into a `[rows, cols]` buffer, rejecting ragged input.
fn rows_to_buffer<'a, I>(rows: I) -> Result<Buffer, GradFlowError>
where
    I: ExactSizeIterator<Item = &'a [f64]>,
{
    let n_rows = rows.len();
    let mut data = Vec::new();
    let mut n_cols = None;
    for (row, values) in rows.enumerate() {
        let expected = *n_cols.get_or_insert(values.len());
        if values.len() != expected {
            return Err(GradFlowError::RaggedArray {
                row,
                expected,
                actual: values.len(),
            });
        }
        data.extend_from_slice(values);
    }
    Buffer::new(data, vec![n_rows, n_cols.unwrap_or(0)])
}

/// Wraps raw numeric data into one array-valued leaf.
///
/// Nesting up to three levels is accepted directly. Higher ranks go through
/// [`Buffer::new`] with flat data and an explicit shape.
///
/// ```
/// use gradflow_core::array;
///
/// let x = array([[1.0, 2.0], [3.0, 4.0]], true).unwrap();
/// assert_eq!(x.shape(), vec![2, 2]);
/// assert!(array(vec![vec![1.0], vec![2.0, 3.0]], false).is_err());
/// ```
pub fn array<R: IntoBuffer>(raw: R, requires_grad: bool) -> Result<Tensor, GradFlowError> {
    Ok(Tensor::from_buffer(raw.into_buffer()?, requires_grad))
}

/// The numeric gradient of an array node, zeros if none has been accumulated.
pub fn array_grad(node: &Tensor) -> Buffer {
    node.grad_value()
}

/// Clears gradients reachable from every node of a collection.
pub fn array_zero_grad<'a, I>(nodes: I)
where
    I: IntoIterator<Item = &'a Tensor>,
{
    for node in nodes {
        node.zero_grad();
    }
}

/// Assembles single-element nodes into one differentiable array node of `shape`.
pub fn stack(items: &[Tensor], shape: &[usize]) -> Result<Tensor, GradFlowError> {
    stack_op(items, shape)
}

/// Gradients of a collection of single-element nodes, laid out as one array of `shape`.
pub fn scalar_grads(items: &[Tensor], shape: &[usize]) -> Result<Buffer, GradFlowError> {
    let data = items
        .iter()
        .map(|item| item.grad_value().item())
        .collect::<Result<Vec<f64>, GradFlowError>>()?;
    Buffer::new(data, shape.to_vec())
}

#[cfg(test)]
#[path = "array_test.rs"]
mod tests;
