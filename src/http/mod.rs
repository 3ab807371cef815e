//! Request execution, launch pacing, and the dispatcher that drives a run.
mod executor;
mod rate;
mod sender;
mod target;


pub use executor::{Executor, HttpExecutor};
pub use sender::Dispatcher;
pub use target::{DEFAULT_TARGET_URL, Target};
