//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;


pub use cli::LoadArgs;

pub(crate) use defaults::DEFAULT_USER_AGENT;
pub use defaults::{DEFAULT_RATE, DEFAULT_REQUESTS, DEFAULT_TIMEOUT};
