//! Builder for constructing immutable containers.

use super::ImmutableContainer;
use crate::core::{CloneOnWrite, StructuralUpdate};
use crate::hooks::LifecycleHooks;

/// Builder for configuring an [`ImmutableContainer`] with a fluent API.
///
/// Every setting is optional. Without a default value the container starts
/// uninitialized and ignores updates until `initialize` is called.
///
/// # Example
///
/// ```rust
/// use immutable_context::{ContainerBuilder, tools};
///
/// let container = ContainerBuilder::new()
///     .default_value(vec![1, 2, 3])
///     .hooks(tools::logger())
///     .build();
///
/// container.apply(|v| v.push(4));
/// assert_eq!(container.state(), Some(vec![1, 2, 3, 4]));
/// ```
pub struct ContainerBuilder<T: 'static, U = CloneOnWrite> {
    default_value: Option<T>,
    hooks: LifecycleHooks<T>,
    updater: U,
}

impl<T: Clone + 'static> ContainerBuilder<T> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            default_value: None,
            hooks: LifecycleHooks::new(),
            updater: CloneOnWrite,
        }
    }
}

impl<T: Clone + 'static> Default for ContainerBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, U> ContainerBuilder<T, U>
where
    T: Clone + 'static,
    U: StructuralUpdate<T>,
{
    /// Set the value the container starts with.
    pub fn default_value(mut self, value: T) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Set the lifecycle hooks, replacing any set earlier.
    pub fn hooks(mut self, hooks: LifecycleHooks<T>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Add hooks that run after the ones already configured.
    pub fn with_hooks(mut self, hooks: LifecycleHooks<T>) -> Self {
        self.hooks = self.hooks.chain(hooks);
        self
    }

    /// Use a different structural update strategy.
    pub fn updater<V>(self, updater: V) -> ContainerBuilder<T, V>
    where
        V: StructuralUpdate<T>,
    {
        ContainerBuilder {
            default_value: self.default_value,
            hooks: self.hooks,
            updater,
        }
    }

    /// Build the container. `set_set_state` hooks fire here.
    pub fn build(self) -> ImmutableContainer<T, U> {
        ImmutableContainer::assemble(self.default_value, self.hooks, self.updater)
    }
}
