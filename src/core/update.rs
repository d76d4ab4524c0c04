//! Structural updates: computing a new immutable value from an old one.
//!
//! The container never mutates its current value in place. Instead it asks a
//! [`StructuralUpdate`] to produce a new value from the old one plus a
//! mutator, leaving the old value untouched.

/// Capability that produces a new value from a base value and a mutator.
///
/// Implementations must not modify `base` and should share every part of it
/// the mutator leaves untouched.
///
/// # Example
///
/// ```rust
/// use immutable_context::core::{CloneOnWrite, StructuralUpdate};
///
/// let base = vec![1, 2, 3];
/// let next = CloneOnWrite.produce(&base, |v: &mut Vec<i32>| v.push(4));
///
/// assert_eq!(base, vec![1, 2, 3]);
/// assert_eq!(next, vec![1, 2, 3, 4]);
/// ```
pub trait StructuralUpdate<T> {
    /// Produce the value that results from running `mutator` against `base`.
    fn produce<F>(&self, base: &T, mutator: F) -> T
    where
        F: FnOnce(&mut T);
}

/// Default update strategy: clone the base into a draft and mutate the draft.
///
/// Cloning is shallow for values whose subtrees live behind `Arc` (or `Rc`),
/// so mutators that go through `Arc::make_mut` copy only the path they touch
/// and every other subtree stays shared with the base.
///
/// ```rust
/// use immutable_context::core::{CloneOnWrite, StructuralUpdate};
/// use std::sync::Arc;
///
/// #[derive(Clone)]
/// struct Doc {
///     title: Arc<String>,
///     body: Arc<Vec<String>>,
/// }
///
/// let base = Doc {
///     title: Arc::new("draft".into()),
///     body: Arc::new(vec!["hello".into()]),
/// };
/// let next = CloneOnWrite.produce(&base, |d: &mut Doc| {
///     Arc::make_mut(&mut d.title).push_str(" v2");
/// });
///
/// assert_eq!(next.title.as_str(), "draft v2");
/// assert!(Arc::ptr_eq(&base.body, &next.body));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CloneOnWrite;

impl<T: Clone> StructuralUpdate<T> for CloneOnWrite {
    fn produce<F>(&self, base: &T, mutator: F) -> T
    where
        F: FnOnce(&mut T),
    {
        let mut draft = base.clone();
        mutator(&mut draft);
        draft
    }
}
