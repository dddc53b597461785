// src/tensor/create.rs

use crate::buffer::Buffer;
use crate::tensor::Tensor;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// Creates a leaf tensor filled with zeros.
pub fn zeros(shape: &[usize], requires_grad: bool) -> Tensor {
    Tensor::from_buffer(Buffer::zeros(shape), requires_grad)
}

/// Creates a leaf tensor filled with ones.
pub fn ones(shape: &[usize], requires_grad: bool) -> Tensor {
    Tensor::from_buffer(Buffer::ones(shape), requires_grad)
}

/// Creates a leaf tensor filled with `value`.
pub fn full(shape: &[usize], value: f64, requires_grad: bool) -> Tensor {
    Tensor::from_buffer(Buffer::full(shape, value), requires_grad)
}

/// Creates a leaf tensor with values drawn uniformly from `[0, 1)`.
pub fn rand(shape: &[usize], requires_grad: bool) -> Tensor {
    let numel: usize = shape.iter().product();
    let mut rng = rand::thread_rng();
    let data: Vec<f64> = (0..numel).map(|_| rng.gen::<f64>()).collect();
    Tensor::from_buffer(Buffer::from_parts(data, shape.to_vec()), requires_grad)
}

/// Creates a leaf tensor with values drawn from the standard normal distribution.
pub fn randn(shape: &[usize], requires_grad: bool) -> Tensor {
    let numel: usize = shape.iter().product();
    let mut rng = rand::thread_rng();
    let data: Vec<f64> = (0..numel)
        .map(|_| StandardNormal.sample(&mut rng))
        .collect();
    Tensor::from_buffer(Buffer::from_parts(data, shape.to_vec()), requires_grad)
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
