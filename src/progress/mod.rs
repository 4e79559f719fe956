//! Progress reporting for resize runs.
//!
//! The batch layer emits a `ProgressEvent` before and after each file; the
//! command-line front end turns `Converted` events into its `→ <output>`
//! lines.

mod callback;
mod handler;

pub use callback::CallbackProgress;
pub use handler::{NullProgress, ProgressEvent, ProgressHandler, ProgressPhase};
