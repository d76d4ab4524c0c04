//! The immutable container.
//!
//! An [`ImmutableContainer`] owns a single immutable value. Every change goes
//! through [`apply`](ImmutableContainer::apply), which computes a new value
//! with a [`StructuralUpdate`], hands it to the registered subscriber and
//! fires the lifecycle hooks, synchronously and in a fixed order:
//!
//! 1. `will_update(current, mutation)`
//! 2. `next = produce(current, mutator)`
//! 3. `current = next`
//! 4. `subscriber(next)`
//! 5. `on_update(next)`
//!
//! The container is single-threaded. Callbacks run after internal state has
//! been released, so a subscriber or hook may read the container, but calling
//! `apply` from inside a hook is not supported.

mod builder;
mod error;
mod replay;

pub use builder::ContainerBuilder;
pub use error::ContainerError;
pub use replay::Replay;

use crate::core::{CloneOnWrite, StructuralUpdate};
use crate::hooks::{LifecycleHooks, MutationRef};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Callback that receives every new value, typically a UI redraw.
pub type Subscriber<T> = Rc<dyn Fn(&T)>;

pub(crate) struct Binding<T> {
    current: Option<T>,
    subscriber: Option<Subscriber<T>>,
    initialized: bool,
}

/// Single-value state container with lifecycle hooks.
///
/// # Example
///
/// ```rust
/// use immutable_context::{ImmutableContainer, LifecycleHooks};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Counter {
///     count: u32,
/// }
///
/// let container = ImmutableContainer::new(Counter { count: 0 }, LifecycleHooks::new());
///
/// let rendered = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&rendered);
/// container.register_subscriber(move |s: &Counter| sink.borrow_mut().push(s.count));
///
/// container.apply(|s| s.count += 1);
/// container.apply(|s| s.count += 1);
///
/// assert_eq!(container.state(), Some(Counter { count: 2 }));
/// assert_eq!(*rendered.borrow(), vec![1, 2]);
/// ```
pub struct ImmutableContainer<T: 'static, U = CloneOnWrite> {
    binding: Rc<RefCell<Binding<T>>>,
    hooks: LifecycleHooks<T>,
    updater: U,
}

impl<T: Clone + 'static> ImmutableContainer<T> {
    /// Create a container holding `default_value`, updated by [`CloneOnWrite`].
    ///
    /// If `hooks` has a `set_set_state` hook it is called before this returns.
    pub fn new(default_value: T, hooks: LifecycleHooks<T>) -> Self {
        Self::assemble(Some(default_value), hooks, CloneOnWrite)
    }

    /// Start configuring a container.
    pub fn builder() -> ContainerBuilder<T> {
        ContainerBuilder::new()
    }
}

impl<T, U> ImmutableContainer<T, U>
where
    T: Clone + 'static,
    U: StructuralUpdate<T>,
{
    pub(crate) fn assemble(current: Option<T>, hooks: LifecycleHooks<T>, updater: U) -> Self {
        let binding = Rc::new(RefCell::new(Binding {
            current,
            subscriber: None,
            initialized: false,
        }));
        hooks.fire_set_set_state(Replay::new(&binding));

        Self {
            binding,
            hooks,
            updater,
        }
    }

    /// Set the baseline value that later updates start from.
    ///
    /// `on_initialize` fires on the first call only. A registered subscriber
    /// receives the new value before `on_initialize` runs.
    pub fn initialize(&self, value: T) {
        self.set_baseline(value, true);
    }

    fn set_baseline(&self, value: T, notify: bool) {
        let (first, subscriber) = {
            let mut binding = self.binding.borrow_mut();
            binding.current = Some(value.clone());
            let first = !std::mem::replace(&mut binding.initialized, true);
            let subscriber = if notify { binding.subscriber.clone() } else { None };
            (first, subscriber)
        };

        if let Some(subscriber) = subscriber {
            subscriber(&value);
        }
        if first {
            tracing::trace!("container initialized");
            self.hooks.fire_initialize(&value);
        }
    }

    /// Apply an anonymous mutation.
    pub fn apply<F>(&self, mutator: F)
    where
        F: FnOnce(&mut T),
    {
        self.apply_mutation(None, mutator);
    }

    /// Apply a mutation that `will_update` observers see under `name`.
    pub fn apply_named<F>(&self, name: &str, mutator: F)
    where
        F: FnOnce(&mut T),
    {
        self.apply_mutation(Some(name), mutator);
    }

    fn apply_mutation<F>(&self, name: Option<&str>, mutator: F)
    where
        F: FnOnce(&mut T),
    {
        let Some(current) = self.binding.borrow().current.clone() else {
            tracing::debug!(error = %ContainerError::Uninitialized, "update ignored");
            return;
        };

        let mutation = MutationRef::of::<F>(name);
        self.hooks.fire_will_update(&current, &mutation);

        let next = self.updater.produce(&current, mutator);

        let subscriber = {
            let mut binding = self.binding.borrow_mut();
            binding.current = Some(next.clone());
            binding.subscriber.clone()
        };
        tracing::trace!(update = mutation.name(), "update committed");

        if let Some(subscriber) = subscriber {
            subscriber(&next);
        }
        self.hooks.fire_update(&next);
    }

    /// Replace the active subscriber. Updates applied afterwards go to the
    /// new callback only.
    ///
    /// This does not initialize the container, so `on_initialize` observers
    /// (such as a [`HistoryManager`](crate::HistoryManager)) never see the
    /// default value. Use [`bind`](Self::bind) to do both at once.
    pub fn register_subscriber<F>(&self, subscriber: F)
    where
        F: Fn(&T) + 'static,
    {
        self.binding.borrow_mut().subscriber = Some(Rc::new(subscriber));
    }

    /// Drop the active subscriber, if any.
    pub fn clear_subscriber(&self) {
        self.binding.borrow_mut().subscriber = None;
    }

    /// Bind a rendering layer: initialize with `value`, then register
    /// `subscriber`.
    ///
    /// A UI binding calls this on every render with the value it is showing,
    /// so `on_initialize` still fires only for the first binding. The value is
    /// not pushed to any subscriber: the caller is already showing it.
    pub fn bind<F>(&self, value: T, subscriber: F)
    where
        F: Fn(&T) + 'static,
    {
        self.set_baseline(value, false);
        self.register_subscriber(subscriber);
    }

    /// Push `value` through the subscriber without running hooks or the
    /// structural update.
    pub fn replay(&self, value: T) -> Result<(), ContainerError> {
        push_replay(&self.binding, value)
    }

    /// A handle equivalent to the one given to `set_set_state` hooks.
    pub fn replay_handle(&self) -> Replay<T> {
        Replay::new(&self.binding)
    }

    /// Copy of the current value, `None` until the container has one.
    pub fn state(&self) -> Option<T> {
        self.binding.borrow().current.clone()
    }

    /// Run `f` against the current value without cloning it.
    ///
    /// `f` must not update the container; it runs while the value is borrowed.
    pub fn with_state<R>(&self, f: impl FnOnce(Option<&T>) -> R) -> R {
        f(self.binding.borrow().current.as_ref())
    }

    /// True once `initialize` (or `bind`) has run.
    pub fn is_initialized(&self) -> bool {
        self.binding.borrow().initialized
    }

    pub fn has_subscriber(&self) -> bool {
        self.binding.borrow().subscriber.is_some()
    }
}

pub(crate) fn push_replay<T: Clone>(
    binding: &RefCell<Binding<T>>,
    value: T,
) -> Result<(), ContainerError> {
    let subscriber = {
        let mut binding = binding.borrow_mut();
        let subscriber = binding
            .subscriber
            .clone()
            .ok_or(ContainerError::NoSubscriber)?;
        binding.current = Some(value.clone());
        subscriber
    };

    tracing::trace!("state replayed");
    subscriber(&value);
    Ok(())
}

impl<T, U> fmt::Debug for ImmutableContainer<T, U>
where
    T: fmt::Debug + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let binding = self.binding.borrow();
        f.debug_struct("ImmutableContainer")
            .field("current", &binding.current)
            .field("subscribed", &binding.subscriber.is_some())
            .field("initialized", &binding.initialized)
            .field("hooks", &self.hooks)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::capture_events;
    use std::cell::Cell;
    use tracing::Level;

    #[derive(Clone, Debug, PartialEq)]
    struct Counter {
        count: i32,
    }

    type Log = Rc<RefCell<Vec<String>>>;

    fn log() -> Log {
        Rc::new(RefCell::new(Vec::new()))
    }

    fn traced_hooks(log: &Log) -> LifecycleHooks<Counter> {
        let (init, will, update) = (Rc::clone(log), Rc::clone(log), Rc::clone(log));
        LifecycleHooks::new()
            .on_initialize(move |s: &Counter| init.borrow_mut().push(format!("init:{}", s.count)))
            .will_update(move |s: &Counter, _: &MutationRef<'_>| {
                will.borrow_mut().push(format!("will:{}", s.count))
            })
            .on_update(move |s: &Counter| update.borrow_mut().push(format!("update:{}", s.count)))
    }

    fn subscribe(container: &ImmutableContainer<Counter>, log: &Log) {
        let sink = Rc::clone(log);
        container.register_subscriber(move |s: &Counter| {
            sink.borrow_mut().push(format!("render:{}", s.count))
        });
    }

    #[test]
    fn apply_increments_twice() {
        let container = ImmutableContainer::new(Counter { count: 0 }, LifecycleHooks::new());
        let rendered = log();
        subscribe(&container, &rendered);

        container.apply(|s| s.count += 1);
        container.apply(|s| s.count += 1);

        assert_eq!(container.state(), Some(Counter { count: 2 }));
        assert_eq!(*rendered.borrow(), vec!["render:1", "render:2"]);
    }

    #[test]
    fn hooks_fire_in_order() {
        let events = log();
        let container = ImmutableContainer::new(Counter { count: 0 }, traced_hooks(&events));
        subscribe(&container, &events);

        container.apply(|s| s.count += 5);

        assert_eq!(*events.borrow(), vec!["will:0", "render:5", "update:5"]);
    }

    #[test]
    fn will_update_runs_before_mutator() {
        let order = log();
        let seen = Rc::clone(&order);
        let hooks = LifecycleHooks::new().will_update(move |_: &Counter, _: &MutationRef<'_>| {
            seen.borrow_mut().push("will".into())
        });
        let container = ImmutableContainer::new(Counter { count: 0 }, hooks);

        let inside = Rc::clone(&order);
        container.apply(move |s| {
            inside.borrow_mut().push("mutate".into());
            s.count = 9;
        });

        assert_eq!(*order.borrow(), vec!["will", "mutate"]);
    }

    #[test]
    fn apply_named_reports_name_to_will_update() {
        let names = log();
        let sink = Rc::clone(&names);
        let hooks = LifecycleHooks::new().will_update(move |_: &Counter, m: &MutationRef<'_>| {
            sink.borrow_mut().push(m.name().to_string())
        });
        let container = ImmutableContainer::new(Counter { count: 0 }, hooks);

        container.apply_named("increment", |s| s.count += 1);

        assert_eq!(*names.borrow(), vec!["increment"]);
    }

    #[test]
    fn initialize_fires_hook_only_once() {
        let events = log();
        let container = ImmutableContainer::new(Counter { count: 0 }, traced_hooks(&events));

        assert!(!container.is_initialized());
        container.initialize(Counter { count: 3 });
        container.initialize(Counter { count: 4 });

        assert!(container.is_initialized());
        assert_eq!(*events.borrow(), vec!["init:3"]);
        assert_eq!(container.state(), Some(Counter { count: 4 }));
    }

    #[test]
    fn initialize_sets_baseline_for_updates() {
        let container = ImmutableContainer::new(Counter { count: 0 }, LifecycleHooks::new());

        container.initialize(Counter { count: 10 });
        container.apply(|s| s.count += 1);

        assert_eq!(container.state(), Some(Counter { count: 11 }));
    }

    #[test]
    fn apply_without_subscriber_still_commits() {
        let events = log();
        let container = ImmutableContainer::new(Counter { count: 0 }, traced_hooks(&events));

        container.apply(|s| s.count -= 1);

        assert_eq!(container.state(), Some(Counter { count: -1 }));
        assert_eq!(*events.borrow(), vec!["will:0", "update:-1"]);
    }

    #[test]
    fn falsy_looking_values_are_still_updated() {
        let container = ImmutableContainer::new(0_u32, LifecycleHooks::new());
        container.apply(|n| *n += 1);
        assert_eq!(container.state(), Some(1));

        let text = ImmutableContainer::new(String::new(), LifecycleHooks::new());
        text.apply(|s| s.push('x'));
        assert_eq!(text.state().as_deref(), Some("x"));
    }

    #[test]
    fn apply_on_uninitialized_container_is_noop() {
        let events = log();
        let container = ContainerBuilder::new().hooks(traced_hooks(&events)).build();
        subscribe(&container, &events);

        let ((), captured) = capture_events(|| container.apply(|s| s.count += 1));

        assert_eq!(container.state(), None);
        assert!(events.borrow().is_empty());
        assert!(captured
            .iter()
            .any(|e| e.level == Level::DEBUG && e.message == "update ignored"));
    }

    #[test]
    fn replaced_subscriber_receives_later_updates() {
        let container = ImmutableContainer::new(Counter { count: 0 }, LifecycleHooks::new());
        let first = log();
        let second = log();

        subscribe(&container, &first);
        container.apply(|s| s.count += 1);
        subscribe(&container, &second);
        container.apply(|s| s.count += 1);

        assert_eq!(*first.borrow(), vec!["render:1"]);
        assert_eq!(*second.borrow(), vec!["render:2"]);
    }

    #[test]
    fn bind_initializes_then_subscribes() {
        let events = log();
        let container = ImmutableContainer::new(Counter { count: 0 }, traced_hooks(&events));
        let sink = Rc::clone(&events);

        container.bind(Counter { count: 1 }, move |s: &Counter| {
            sink.borrow_mut().push(format!("render:{}", s.count))
        });
        container.apply(|s| s.count *= 7);

        assert!(container.has_subscriber());
        assert_eq!(
            *events.borrow(),
            vec!["init:1", "will:1", "render:7", "update:7"]
        );
    }

    #[test]
    fn replay_pushes_value_without_hooks() {
        let events = log();
        let container = ImmutableContainer::new(Counter { count: 0 }, traced_hooks(&events));
        subscribe(&container, &events);

        container.replay(Counter { count: 42 }).unwrap();

        assert_eq!(*events.borrow(), vec!["render:42"]);
        assert_eq!(container.state(), Some(Counter { count: 42 }));
    }

    #[test]
    fn replay_becomes_baseline_for_next_update() {
        let container = ImmutableContainer::new(Counter { count: 5 }, LifecycleHooks::new());
        subscribe(&container, &log());

        container.replay(Counter { count: 1 }).unwrap();
        container.apply(|s| s.count += 1);

        assert_eq!(container.state(), Some(Counter { count: 2 }));
    }

    #[test]
    fn replay_without_subscriber_is_reported() {
        let container = ImmutableContainer::new(Counter { count: 5 }, LifecycleHooks::new());

        let result = container.replay(Counter { count: 1 });

        assert_eq!(result, Err(ContainerError::NoSubscriber));
        assert_eq!(container.state(), Some(Counter { count: 5 }));
    }

    #[test]
    fn replay_handle_logs_misuse_and_drops_value() {
        let captured_handle = Rc::new(RefCell::new(None));
        let slot = Rc::clone(&captured_handle);
        let hooks =
            LifecycleHooks::new().set_set_state(move |replay| *slot.borrow_mut() = Some(replay));
        let container = ImmutableContainer::new(Counter { count: 5 }, hooks);

        let replay: Replay<Counter> = captured_handle.borrow().clone().unwrap();
        let ((), captured) = capture_events(|| replay.replay(Counter { count: 1 }));

        assert_eq!(container.state(), Some(Counter { count: 5 }));
        assert!(captured
            .iter()
            .any(|e| e.level == Level::ERROR && e.message == "replayed state dropped"));
    }

    #[test]
    fn set_set_state_is_called_once_at_construction() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let hooks = LifecycleHooks::new()
            .set_set_state(move |_: Replay<Counter>| counter.set(counter.get() + 1));

        let container = ImmutableContainer::new(Counter { count: 0 }, hooks);
        container.initialize(Counter { count: 0 });
        container.apply(|s| s.count += 1);

        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn replay_after_container_dropped_is_reported() {
        let container = ImmutableContainer::new(Counter { count: 0 }, LifecycleHooks::new());
        let replay = container.replay_handle();
        drop(container);

        assert_eq!(
            replay.try_replay(Counter { count: 1 }),
            Err(ContainerError::Dropped)
        );
    }

    #[test]
    fn subscriber_can_read_container_state() {
        let container = Rc::new(ImmutableContainer::new(
            Counter { count: 0 },
            LifecycleHooks::new(),
        ));
        let seen = Rc::new(RefCell::new(Vec::new()));

        let weak = Rc::downgrade(&container);
        let sink = Rc::clone(&seen);
        container.register_subscriber(move |_: &Counter| {
            if let Some(container) = weak.upgrade() {
                sink.borrow_mut().push(container.state());
            }
        });
        container.apply(|s| s.count = 3);

        assert_eq!(*seen.borrow(), vec![Some(Counter { count: 3 })]);
    }

    #[test]
    fn cleared_subscriber_stops_receiving() {
        let container = ImmutableContainer::new(Counter { count: 0 }, LifecycleHooks::new());
        let rendered = log();
        subscribe(&container, &rendered);

        container.clear_subscriber();
        container.apply(|s| s.count += 1);

        assert!(!container.has_subscriber());
        assert!(rendered.borrow().is_empty());
        assert_eq!(container.replay(Counter { count: 0 }), Err(ContainerError::NoSubscriber));
    }

    #[test]
    fn initialize_delivers_value_to_registered_subscriber() {
        let events = log();
        let container = ImmutableContainer::new(Counter { count: 0 }, traced_hooks(&events));
        subscribe(&container, &events);

        container.initialize(Counter { count: 10 });
        container.initialize(Counter { count: 11 });

        assert_eq!(*events.borrow(), vec!["render:10", "init:10", "render:11"]);
        assert_eq!(container.state(), Some(Counter { count: 11 }));
    }

    #[test]
    fn rebinding_does_not_notify_previous_subscriber() {
        let container = ImmutableContainer::new(Counter { count: 0 }, LifecycleHooks::new());
        let first = log();
        let second = log();

        let sink = Rc::clone(&first);
        container.bind(Counter { count: 1 }, move |s: &Counter| {
            sink.borrow_mut().push(format!("render:{}", s.count))
        });
        let sink = Rc::clone(&second);
        container.bind(Counter { count: 2 }, move |s: &Counter| {
            sink.borrow_mut().push(format!("render:{}", s.count))
        });

        assert!(first.borrow().is_empty());
        assert!(second.borrow().is_empty());
        assert_eq!(container.state(), Some(Counter { count: 2 }));
    }

    #[test]
    fn with_state_reads_without_cloning() {
        let container = ImmutableContainer::new(Counter { count: 4 }, LifecycleHooks::new());
        assert_eq!(container.with_state(|s| s.map(|c| c.count * 2)), Some(8));

        let empty = ContainerBuilder::<Counter>::new().build();
        assert!(empty.with_state(|s| s.is_none()));
    }

    #[test]
    #[should_panic(expected = "will_update failed")]
    fn will_update_panic_propagates_to_caller() {
        let hooks = LifecycleHooks::new()
            .will_update(|_: &Counter, _: &MutationRef<'_>| panic!("will_update failed"));
        let container = ImmutableContainer::new(Counter { count: 0 }, hooks);

        container.apply(|s| s.count += 1);
    }

    #[test]
    fn on_update_panic_leaves_update_committed() {
        let hooks = LifecycleHooks::new().on_update(|_: &Counter| panic!("on_update failed"));
        let container = ImmutableContainer::new(Counter { count: 0 }, hooks);
        let rendered = log();
        subscribe(&container, &rendered);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            container.apply(|s| s.count += 1)
        }));

        assert!(result.is_err());
        assert_eq!(container.state(), Some(Counter { count: 1 }));
        assert_eq!(*rendered.borrow(), vec!["render:1"]);

        // the container is still usable afterwards
        let again = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            container.apply(|s| s.count += 1)
        }));
        assert!(again.is_err());
        assert_eq!(container.state(), Some(Counter { count: 2 }));
    }
}
