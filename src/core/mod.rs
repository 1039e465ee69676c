//! Core infrastructure shared by host detection and teardown
//!
//! Execution context, error types, terminal output, external command
//! plumbing and operator prompts.

pub mod context;
pub mod error;
pub mod fsops;
pub mod output;
pub mod prompt;
pub mod runner;
