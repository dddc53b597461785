//! Shape-changing operations.
//!
//! Values are always materialized contiguously; there are no strided views.

pub mod expand;
pub mod reshape;
pub mod sum_to;

pub use expand::broadcast_to_op;
pub use reshape::reshape_op;
pub use sum_to::sum_to_op;
