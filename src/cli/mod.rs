//! Command workflows, decoupled from argument parsing so they can be driven
//! programmatically and tested without clap.

pub mod orchestration;

pub use orchestration::{Outcome, Workflow, WorkflowOptions, WorkflowSettings};
