//! Replay handle given to `set_set_state` hooks.

use super::error::ContainerError;
use super::Binding;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Handle that pushes a past value through a container's subscriber.
///
/// A replay bypasses `will_update`, `on_update` and the structural update:
/// the target value becomes the container's current value and is delivered
/// to the registered subscriber as it is. The handle does not keep the
/// container alive.
pub struct Replay<T> {
    binding: Weak<RefCell<Binding<T>>>,
}

impl<T> Clone for Replay<T> {
    fn clone(&self) -> Self {
        Self {
            binding: Weak::clone(&self.binding),
        }
    }
}

impl<T> fmt::Debug for Replay<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Replay")
            .field("attached", &(self.binding.strong_count() > 0))
            .finish()
    }
}

impl<T: Clone> Replay<T> {
    pub(crate) fn new(binding: &Rc<RefCell<Binding<T>>>) -> Self {
        Self {
            binding: Rc::downgrade(binding),
        }
    }

    /// Replay `value`, logging and dropping it if it cannot be delivered.
    pub fn replay(&self, value: T) {
        if let Err(err) = self.try_replay(value) {
            tracing::error!(error = %err, "replayed state dropped");
        }
    }

    /// Replay `value`, reporting why it could not be delivered.
    ///
    /// The value is dropped, never queued, when no subscriber is registered.
    pub fn try_replay(&self, value: T) -> Result<(), ContainerError> {
        let binding = self.binding.upgrade().ok_or(ContainerError::Dropped)?;
        super::push_replay(&binding, value)
    }
}
