//! Status model: outcome values and their combination rules.
//!
//! Aggregation of a scenario's final status from its step and hook results
//! follows a fixed precedence, strongest to weakest:
//! `failed > ambiguous > pending > undefined > skipped > passed`.

mod result;
mod status;

pub use result::StepResult;
pub use status::Status;
