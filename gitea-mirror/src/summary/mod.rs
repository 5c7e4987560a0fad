//! Run summary types and helpers.

mod outcome;
mod run_summary;

pub use outcome::{CloneOutcome, CloneStatus};
pub use run_summary::RunSummary;
