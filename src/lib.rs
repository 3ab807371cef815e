//! Core library for the `paceload` CLI.
//!
//! The binary fires a fixed number of HTTP GET requests at a steady launch
//! rate, counts every outcome per response code, and prints a summary. This
//! crate holds the building blocks: argument and config handling, the request
//! executor, the dispatcher, outcome aggregation, and report rendering.
pub mod args;
pub mod config;
pub mod domain;
pub mod error;
pub mod http;
pub mod logger;
pub mod metrics;
pub mod progress;
pub mod shutdown;
pub mod shutdown_handlers;
pub mod summary;
