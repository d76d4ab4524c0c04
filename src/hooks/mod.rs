//! Lifecycle hooks: the extension points of an immutable container.
//!
//! A [`LifecycleHooks`] value is plain configuration. Every hook is optional
//! and an absent hook is a no-op:
//!
//! | hook            | fires                                                    |
//! |-----------------|----------------------------------------------------------|
//! | `on_initialize` | once, on the container's first `initialize`             |
//! | `will_update`   | before each update is computed (observation only)       |
//! | `on_update`     | after each update is committed and sent to the subscriber |
//! | `set_set_state` | once, at construction, with the container's [`Replay`] handle |
//!
//! Anything that wants to observe or drive a container (the logger, the
//! undo manager) is expressed purely as a set of these hooks.
//!
//! # Example
//!
//! ```rust
//! use immutable_context::{ImmutableContainer, LifecycleHooks};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let updates = Rc::new(Cell::new(0));
//! let seen = Rc::clone(&updates);
//! let hooks = LifecycleHooks::new().on_update(move |_: &i32| seen.set(seen.get() + 1));
//!
//! let container = ImmutableContainer::new(0, hooks);
//! container.apply(|n| *n += 1);
//! container.apply(|n| *n += 1);
//!
//! assert_eq!(updates.get(), 2);
//! ```

mod mutation;

pub use crate::container::Replay;
pub use mutation::MutationRef;

use std::fmt;

type StateHook<T> = Box<dyn Fn(&T)>;
type WillUpdateHook<T> = Box<dyn Fn(&T, &MutationRef<'_>)>;
type SetStateHook<T> = Box<dyn Fn(Replay<T>)>;

/// Optional callbacks invoked by a container during its lifecycle.
pub struct LifecycleHooks<T> {
    on_initialize: Option<StateHook<T>>,
    will_update: Option<WillUpdateHook<T>>,
    on_update: Option<StateHook<T>>,
    set_set_state: Option<SetStateHook<T>>,
}

impl<T: 'static> Default for LifecycleHooks<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> LifecycleHooks<T> {
    /// Hooks with nothing configured.
    pub fn new() -> Self {
        Self {
            on_initialize: None,
            will_update: None,
            on_update: None,
            set_set_state: None,
        }
    }

    /// Called with the state on the container's first initialization.
    pub fn on_initialize<F>(mut self, hook: F) -> Self
    where
        F: Fn(&T) + 'static,
    {
        self.on_initialize = Some(Box::new(hook));
        self
    }

    /// Called with the current state and the pending mutation before each
    /// update is computed.
    pub fn will_update<F>(mut self, hook: F) -> Self
    where
        F: Fn(&T, &MutationRef<'_>) + 'static,
    {
        self.will_update = Some(Box::new(hook));
        self
    }

    /// Called with the new state after it has been committed and delivered.
    pub fn on_update<F>(mut self, hook: F) -> Self
    where
        F: Fn(&T) + 'static,
    {
        self.on_update = Some(Box::new(hook));
        self
    }

    /// Called once at construction with a handle that replays values through
    /// the container's subscriber.
    pub fn set_set_state<F>(mut self, hook: F) -> Self
    where
        F: Fn(Replay<T>) + 'static,
    {
        self.set_set_state = Some(Box::new(hook));
        self
    }

    /// Combine two hook sets. For every hook, `self` runs first and `other`
    /// second.
    ///
    /// ```rust
    /// use immutable_context::{HistoryManager, ImmutableContainer, tools};
    ///
    /// let history = HistoryManager::new();
    /// let hooks = tools::logger::<u32>().chain(history.hooks());
    ///
    /// let container = ImmutableContainer::new(0, hooks);
    /// container.initialize(0);
    /// container.apply(|n| *n += 5);
    ///
    /// assert_eq!(history.history_size(), 2);
    /// ```
    pub fn chain(self, other: Self) -> Self {
        Self {
            on_initialize: join_state_hooks(self.on_initialize, other.on_initialize),
            will_update: match (self.will_update, other.will_update) {
                (Some(first), Some(second)) => {
                    let joined: WillUpdateHook<T> =
                        Box::new(move |state: &T, mutation: &MutationRef<'_>| {
                            first(state, mutation);
                            second(state, mutation);
                        });
                    Some(joined)
                }
                (first, second) => first.or(second),
            },
            on_update: join_state_hooks(self.on_update, other.on_update),
            set_set_state: match (self.set_set_state, other.set_set_state) {
                (Some(first), Some(second)) => {
                    let joined: SetStateHook<T> = Box::new(move |replay: Replay<T>| {
                        first(replay.clone());
                        second(replay);
                    });
                    Some(joined)
                }
                (first, second) => first.or(second),
            },
        }
    }

    /// True when no hook is configured.
    pub fn is_empty(&self) -> bool {
        self.on_initialize.is_none()
            && self.will_update.is_none()
            && self.on_update.is_none()
            && self.set_set_state.is_none()
    }

    pub(crate) fn fire_initialize(&self, state: &T) {
        if let Some(hook) = &self.on_initialize {
            hook(state);
        }
    }

    pub(crate) fn fire_will_update(&self, state: &T, mutation: &MutationRef<'_>) {
        if let Some(hook) = &self.will_update {
            hook(state, mutation);
        }
    }

    pub(crate) fn fire_update(&self, state: &T) {
        if let Some(hook) = &self.on_update {
            hook(state);
        }
    }

    pub(crate) fn fire_set_set_state(&self, replay: Replay<T>) {
        if let Some(hook) = &self.set_set_state {
            hook(replay);
        }
    }
}

fn join_state_hooks<T: 'static>(
    first: Option<StateHook<T>>,
    second: Option<StateHook<T>>,
) -> Option<StateHook<T>> {
    match (first, second) {
        (Some(first), Some(second)) => {
            let joined: StateHook<T> = Box::new(move |state: &T| {
                first(state);
                second(state);
            });
            Some(joined)
        }
        (first, second) => first.or(second),
    }
}

impl<T> fmt::Debug for LifecycleHooks<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleHooks")
            .field("on_initialize", &self.on_initialize.is_some())
            .field("will_update", &self.will_update.is_some())
            .field("on_update", &self.on_update.is_some())
            .field("set_set_state", &self.set_set_state.is_some())
            .finish()
    }
}
