//! Reverse-mode automatic differentiation over scalar and array values.
//!
//! Operations on [`Tensor`] handles build a computation graph on the fly. Calling
//! [`Tensor::backward`] on a result walks that graph in reverse and accumulates gradients
//! into every node that requires them. With `make_graph` the backward pass is itself
//! recorded, so gradients can be differentiated again.
//!
//! ```
//! use gradflow_core::{BackwardOptions, Tensor};
//!
//! let x = Tensor::scalar(17.0, true);
//! let y = Tensor::scalar(13.0, true);
//! let z = (&x - &y).powf(2.0).unwrap();
//! z.backward_with(BackwardOptions::default().make_graph(true)).unwrap();
//! let dz_dx = x.grad().unwrap();
//! assert_eq!(dz_dx.item().unwrap(), 8.0);
//!
//! z.zero_grad();
//! dz_dx.backward().unwrap();
//! assert_eq!(x.grad_value().item().unwrap(), 2.0);
//! assert_eq!(y.grad_value().item().unwrap(), -2.0);
//! ```

pub mod array;
pub mod autograd;
pub mod buffer;
pub mod error;
pub mod graph_view;
pub mod ops;
pub mod tensor;
pub mod tensor_data;

pub use array::{array, array_grad, array_zero_grad, scalar_grads, stack, IntoBuffer};
pub use autograd::{
    check_grad, enable_grad, is_grad_enabled, no_grad, set_grad_enabled, with_no_grad,
    BackwardOptions, GradCheckError, GradModeGuard,
};
pub use buffer::Buffer;
pub use error::GradFlowError;
pub use graph_view::{GraphNode, GraphView};
pub use ops::math_elem::{ElementwiseFn, UnaryOp};
pub use tensor::Tensor;
// Re-export traits required by public functions
pub use num_traits;
