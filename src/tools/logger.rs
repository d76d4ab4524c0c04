//! Logging hooks.

use crate::hooks::{LifecycleHooks, MutationRef};
use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;

/// Hooks that log initialization and every update.
///
/// Initialization and committed updates are logged at `info`, pending
/// updates at `debug` together with the mutation name.
///
/// ```rust
/// use immutable_context::{tools, ImmutableContainer};
///
/// let container = ImmutableContainer::new(0_u8, tools::logger());
/// container.apply_named("increment", |n| *n += 1);
/// ```
pub fn logger<T: Debug + 'static>() -> LifecycleHooks<T> {
    LifecycleHooks::new()
        .on_initialize(|state: &T| {
            tracing::info!(?state, "immutable context set up with initial state")
        })
        .will_update(|state: &T, mutation: &MutationRef<'_>| {
            tracing::debug!(update = mutation.name(), ?state, "applying update")
        })
        .on_update(|state: &T| tracing::info!(?state, "state updated"))
}

/// Every value observed by a [`history_logger`], oldest first.
///
/// Unlike the undo manager this never truncates and has no cursor.
pub struct HistoryLog<T> {
    entries: Rc<RefCell<Vec<T>>>,
}

impl<T> Clone for HistoryLog<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Rc::clone(&self.entries),
        }
    }
}

impl<T: Clone> HistoryLog<T> {
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn entries(&self) -> Vec<T> {
        self.entries.borrow().clone()
    }
}

/// Hooks that record every initialized and updated value, logging the
/// growing history at `debug`.
pub fn history_logger<T: Clone + Debug + 'static>() -> (LifecycleHooks<T>, HistoryLog<T>) {
    let log = HistoryLog {
        entries: Rc::new(RefCell::new(Vec::new())),
    };

    let record = {
        let log = log.clone();
        move |state: &T| {
            let mut entries = log.entries.borrow_mut();
            entries.push(state.clone());
            tracing::debug!(
                size = entries.len(),
                history = ?entries.as_slice(),
                "history recorded"
            );
        }
    };
    let hooks = LifecycleHooks::new()
        .on_initialize(record.clone())
        .on_update(record);

    (hooks, log)
}
