//! Pure building blocks.
//!
//! This module contains the side-effect free parts of the crate:
//! - Structural updates via the `StructuralUpdate` trait
//! - The linear undo/redo `Timeline`
//!
//! Nothing in here invokes callbacks or logs; the container and the history
//! manager wrap these pieces with hooks and replay.

mod timeline;
mod update;

pub use timeline::Timeline;
pub use update::{CloneOnWrite, StructuralUpdate};
