//! Container error types.

use thiserror::Error;

/// Errors reported by an immutable container.
///
/// None of these are fatal: the [`Replay`](super::Replay) handle logs them and
/// carries on, and `apply` treats an uninitialized container as a no-op.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ContainerError {
    /// A value was replayed before any subscriber was registered
    #[error("Trying to override state but no subscriber has been registered yet")]
    NoSubscriber,

    /// The container has no state value yet
    #[error("Container has not been initialized. Call .initialize(state) first")]
    Uninitialized,

    /// The replay handle outlived its container
    #[error("Container has been dropped")]
    Dropped,
}
