//! Ready-made hook bundles.
//!
//! - [`logger`]: reports every lifecycle event through `tracing`
//! - [`history_logger`]: keeps every value the container has held
//!
//! The undo manager lives in [`crate::history`].

mod logger;

pub use logger::{history_logger, logger, HistoryLog};
