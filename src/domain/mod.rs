//! Run-level value types shared by the dispatcher, the CLI, and the report.
mod run;


pub use run::{LaunchRate, RunConfig, RunPhase};
