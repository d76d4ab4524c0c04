//! Undo/redo built on lifecycle hooks.
//!
//! The [`HistoryManager`] never talks to the container directly. It records
//! values through `on_initialize`/`on_update` and drives the container back
//! through the [`Replay`] handle it captures with `set_set_state`.

use crate::core::Timeline;
use crate::hooks::{LifecycleHooks, Replay};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

struct Inner<T> {
    timeline: Timeline<T>,
    replay: Option<Replay<T>>,
}

/// Linear undo/redo history for an immutable container.
///
/// Cloning a manager yields another handle to the same history.
///
/// The starting value is recorded through `on_initialize`, so the container
/// must be initialized (with `initialize` or `bind`) before its first update.
/// A container that only registers a subscriber and applies updates records
/// the updates but not the value they started from, and cannot be undone back
/// to it.
///
/// # Example
///
/// ```rust
/// use immutable_context::{HistoryManager, ImmutableContainer};
///
/// let history = HistoryManager::new();
/// let container = ImmutableContainer::new(0, history.hooks());
/// container.register_subscriber(|_: &i32| {});
///
/// container.initialize(0);
/// container.apply(|n| *n += 1);
/// container.apply(|n| *n += 1);
/// assert_eq!(history.history_size(), 3);
/// assert_eq!(history.index(), 2);
///
/// history.undo();
/// assert_eq!(history.index(), 1);
/// assert_eq!(container.state(), Some(1));
/// ```
pub struct HistoryManager<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for HistoryManager<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + 'static> Default for HistoryManager<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> HistoryManager<T> {
    /// Create a manager with an empty history.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                timeline: Timeline::new(),
                replay: None,
            })),
        }
    }

    /// Hooks that wire this manager into a container: every initialized or
    /// updated value is appended, and the container's replay handle is
    /// captured for `undo`/`redo`.
    pub fn hooks(&self) -> LifecycleHooks<T> {
        let on_initialize = self.clone();
        let on_update = self.clone();
        let set_set_state = self.clone();

        LifecycleHooks::new()
            .on_initialize(move |state: &T| on_initialize.append(state.clone()))
            .on_update(move |state: &T| on_update.append(state.clone()))
            .set_set_state(move |replay| set_set_state.capture_replay(replay))
    }

    /// Record `value` as the newest state, discarding any redo entries.
    pub fn append(&self, value: T) {
        let mut inner = self.inner.borrow_mut();
        inner.timeline.append(value);
        tracing::trace!(
            index = inner.timeline.index(),
            size = inner.timeline.len(),
            "history appended"
        );
    }

    /// Keep `replay` for later `undo`/`redo` calls.
    pub fn capture_replay(&self, replay: Replay<T>) {
        self.inner.borrow_mut().replay = Some(replay);
    }

    /// Step back one value and replay it. Returns whether the cursor moved.
    pub fn undo(&self) -> bool {
        self.travel(Timeline::step_back, "undo")
    }

    /// Step forward one value and replay it. Returns whether the cursor moved.
    pub fn redo(&self) -> bool {
        self.travel(Timeline::step_forward, "redo")
    }

    fn travel(&self, step: fn(&mut Timeline<T>) -> Option<&T>, direction: &str) -> bool {
        let (target, replay) = {
            let mut inner = self.inner.borrow_mut();
            let Some(target) = step(&mut inner.timeline).cloned() else {
                tracing::debug!(direction, "history boundary reached");
                return false;
            };
            (target, inner.replay.clone())
        };

        match replay {
            Some(replay) => replay.replay(target),
            None => tracing::debug!(direction, "no replay handle captured, state not restored"),
        }
        true
    }

    /// Number of recorded values, including redo targets.
    pub fn history_size(&self) -> usize {
        self.inner.borrow().timeline.len()
    }

    /// Cursor position, `-1` when the history is empty.
    pub fn index(&self) -> isize {
        self.inner.borrow().timeline.index()
    }

    /// Cursor position, `None` when the history is empty.
    pub fn cursor(&self) -> Option<usize> {
        self.inner.borrow().timeline.cursor()
    }

    pub fn can_undo(&self) -> bool {
        self.inner.borrow().timeline.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.inner.borrow().timeline.can_redo()
    }

    /// The value under the cursor.
    pub fn current(&self) -> Option<T> {
        self.inner.borrow().timeline.current().cloned()
    }

    /// Copy of every recorded value in order.
    pub fn snapshot(&self) -> Vec<T> {
        self.inner.borrow().timeline.entries().to_vec()
    }

    /// True once a container has handed over its replay handle.
    pub fn has_replay(&self) -> bool {
        self.inner.borrow().replay.is_some()
    }
}

impl<T: fmt::Debug> fmt::Debug for HistoryManager<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("HistoryManager")
            .field("timeline", &inner.timeline)
            .field("replay", &inner.replay)
            .finish()
    }
}
