//! `stockmatrix-cli`
//!
//! **Responsibility:** the binary adapter around the analytics engine.
//!
//! Reads CSV tables, runs the policy job and writes the report. All
//! filesystem and terminal IO lives here; the engine crates stay pure.

pub mod cli;
pub mod input;
pub mod output;
pub mod sample;

pub use cli::{Cli, Command, DemoArgs, OutputFormat, RunArgs};
