//! Immutable Context: a single-value immutable state container
//!
//! The container holds one immutable value, computes every new value with a
//! structural update (unchanged subtrees are shared, never copied), delivers
//! it to a subscriber such as a UI redraw, and exposes lifecycle hooks for
//! cross-cutting behavior like logging and undo/redo.
//!
//! # Core Concepts
//!
//! - **Container**: owns the current value and applies updates in a fixed order
//! - **Hooks**: optional callbacks for initialize, before update, after update
//!   and replay capture
//! - **History**: undo/redo built only on the hook contract
//!
//! # Example
//!
//! ```rust
//! use immutable_context::{HistoryManager, ImmutableContainer};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Counter {
//!     count: u32,
//! }
//!
//! let history = HistoryManager::new();
//! let container = ImmutableContainer::new(Counter { count: 0 }, history.hooks());
//!
//! container.bind(Counter { count: 0 }, |s: &Counter| println!("render {}", s.count));
//! container.apply(|s| s.count += 1);
//! container.apply(|s| s.count += 1);
//!
//! assert_eq!(history.history_size(), 3);
//!
//! history.undo();
//! assert_eq!(container.state(), Some(Counter { count: 1 }));
//! ```

pub mod container;
pub mod core;
pub mod history;
pub mod hooks;
pub mod tools;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use container::{ContainerBuilder, ContainerError, ImmutableContainer, Replay, Subscriber};
pub use core::{CloneOnWrite, StructuralUpdate, Timeline};
pub use history::HistoryManager;
pub use hooks::{LifecycleHooks, MutationRef};
