// src/autograd/mod.rs

//! Reverse-mode differentiation machinery.
//!
//! - [`grad_mode`]: per-thread switch controlling whether operations record parents.
//! - [`builder`]: turns a computed value into a node, linked or constant.
//! - [`op`]: the registry of differentiable operations and their backward dispatch.
//! - [`graph`]: ordering and execution of the backward pass.
//! - [`grad_check`]: numeric verification of analytical gradients.

pub(crate) mod builder;
pub mod grad_check;
pub mod grad_mode;
pub mod graph;
pub mod op;

pub use grad_check::{check_grad, GradCheckError};
pub use grad_mode::{enable_grad, is_grad_enabled, no_grad, set_grad_enabled, with_no_grad, GradModeGuard};
pub use graph::BackwardOptions;
pub use op::OpKind;
