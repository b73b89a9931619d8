//! Run state tracking module
//!
//! This module defines per-page outcomes and the run-level accumulator the
//! run loop writes into. There is no persistence: state lives for one
//! process and is cleared only by starting a new run.

mod outcome;
mod run_state;

pub use outcome::{PageFailure, PageOutcome, PageStatus};
pub use run_state::{RunState, RunSummary};
