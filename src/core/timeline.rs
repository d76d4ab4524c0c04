//! Linear undo/redo timeline.
//!
//! A `Timeline` is an ordered record of values plus a cursor marking the
//! value currently shown. It holds no callbacks and performs no I/O, which
//! keeps the undo/redo arithmetic testable in isolation from the container.

/// Ordered record of observed values with a cursor.
///
/// Invariants:
/// - the cursor is `None` exactly when there are no entries
/// - otherwise it points at an existing entry
/// - appending after stepping back discards every entry past the cursor
///
/// # Example
///
/// ```rust
/// use immutable_context::core::Timeline;
///
/// let mut timeline = Timeline::new();
/// timeline.append("a");
/// timeline.append("b");
/// timeline.append("c");
///
/// assert_eq!(timeline.step_back(), Some(&"b"));
/// timeline.append("d");
///
/// assert_eq!(timeline.entries(), &["a", "b", "d"]);
/// assert_eq!(timeline.index(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Timeline<T> {
    entries: Vec<T>,
    cursor: Option<usize>,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Timeline<T> {
    /// Create an empty timeline.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
        }
    }

    /// Record `value` right after the cursor and move the cursor onto it.
    ///
    /// Entries beyond the cursor (stale redo targets) are dropped first, so
    /// the timeline never branches.
    pub fn append(&mut self, value: T) {
        let next = self.cursor.map_or(0, |cursor| cursor + 1);
        self.entries.truncate(next);
        self.entries.push(value);
        self.cursor = Some(next);
    }

    /// Move the cursor one entry back and return the entry it lands on.
    ///
    /// Returns `None` without moving when the timeline is empty or the cursor
    /// already sits on the oldest entry.
    pub fn step_back(&mut self) -> Option<&T> {
        match self.cursor {
            Some(cursor) if cursor > 0 => {
                self.cursor = Some(cursor - 1);
                self.entries.get(cursor - 1)
            }
            _ => None,
        }
    }

    /// Move the cursor one entry forward and return the entry it lands on.
    ///
    /// Returns `None` without moving when there is nothing to redo.
    pub fn step_forward(&mut self) -> Option<&T> {
        match self.cursor {
            Some(cursor) if cursor + 1 < self.entries.len() => {
                self.cursor = Some(cursor + 1);
                self.entries.get(cursor + 1)
            }
            _ => None,
        }
    }

    /// Number of recorded entries, including redo targets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position of the current entry, `None` when empty.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Position of the current entry, `-1` when empty.
    pub fn index(&self) -> isize {
        self.cursor.map_or(-1, |cursor| cursor as isize)
    }

    /// The entry under the cursor.
    pub fn current(&self) -> Option<&T> {
        self.cursor.and_then(|cursor| self.entries.get(cursor))
    }

    /// All entries in recording order.
    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(cursor) if cursor > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.cursor, Some(cursor) if cursor + 1 < self.entries.len())
    }
}
