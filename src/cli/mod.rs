//! Command-line facing workflow entry points

pub mod orchestration;

pub use orchestration::{run_release_workflow, ReleaseWorkflowArgs, RunMode, RunOutcome};
