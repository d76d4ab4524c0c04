//! Descriptions of pending mutations handed to `will_update` observers.

use std::any::type_name;

/// Borrowed description of a mutator that is about to run.
///
/// Observers cannot call the mutator; they only get to see what is about to
/// happen. The name is either the one passed to
/// [`apply_named`](crate::container::ImmutableContainer::apply_named) or, for
/// anonymous updates, the mutator's type name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MutationRef<'a> {
    label: Option<&'a str>,
    type_name: &'static str,
}

impl<'a> MutationRef<'a> {
    pub(crate) fn of<F>(label: Option<&'a str>) -> Self {
        Self {
            label,
            type_name: type_name::<F>(),
        }
    }

    /// Name to report for this mutation.
    pub fn name(&self) -> &str {
        self.label.unwrap_or(self.type_name)
    }

    /// The explicit label, if the update was applied with one.
    pub fn label(&self) -> Option<&'a str> {
        self.label
    }

    /// Type name of the mutator closure or function.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}
