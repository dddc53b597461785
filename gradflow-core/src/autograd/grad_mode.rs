// src/autograd/grad_mode.rs

//! Scoped control over graph construction.
//!
//! The flag is per thread and starts enabled. Guards restore the value they replaced when
//! dropped, including during unwinding, so nested scopes compose.

use std::cell::Cell;

thread_local! {
    static GRAD_ENABLED: Cell<bool> = const { Cell::new(true) };
}

/// Returns true if operations currently record parents for backward.
pub fn is_grad_enabled() -> bool {
    GRAD_ENABLED.with(|flag| flag.get())
}

/// Restores the previous grad mode when dropped.
#[must_use = "grad mode is restored as soon as the guard is dropped"]
#[derive(Debug)]
pub struct GradModeGuard {
    prev: bool,
}

impl Drop for GradModeGuard {
    fn drop(&mut self) {
        GRAD_ENABLED.with(|flag| flag.set(self.prev));
    }
}

/// Sets grad mode to `enabled` until the returned guard is dropped.
pub fn set_grad_enabled(enabled: bool) -> GradModeGuard {
    let prev = GRAD_ENABLED.with(|flag| flag.replace(enabled));
    GradModeGuard { prev }
}

/// Disables graph construction until the returned guard is dropped.
///
/// ```
/// use gradflow_core::{no_grad, Tensor};
///
/// let x = Tensor::scalar(2.0, true);
/// let y = {
///     let _guard = no_grad();
///     x.mul(&x).unwrap()
/// };
/// assert!(!y.requires_grad());
/// assert!(y.is_leaf());
/// ```
pub fn no_grad() -> GradModeGuard {
    set_grad_enabled(false)
}

/// Forces graph construction on until the returned guard is dropped.
pub fn enable_grad() -> GradModeGuard {
    set_grad_enabled(true)
}

/// Runs `f` with graph construction disabled.
pub fn with_no_grad<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = no_grad();
    f()
}

#[cfg(test)]
#[path = "grad_mode_test.rs"]
mod tests;
