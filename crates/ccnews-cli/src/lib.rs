//! Interactive command line for loading CC-NEWS capture files.
//!
//! `ccnews <YYYY/MM>` shows the month's catalog, asks for an ID or a range of
//! IDs and ingests the selected files with bounded concurrency.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by main.rs
use dotenvy as _;
use tokio as _;

pub mod app;
pub mod error;
pub mod logging;
pub mod parser;
pub mod presentation;
pub mod prompt;

// Re-export primary types for convenient access
pub use error::CliError;
pub use parser::Cli;
pub use prompt::{EditorSource, LineSource, PromptInput};

// Used only by the session tests under tests/
#[cfg(test)]
use async_trait as _;
#[cfg(test)]
use bytes as _;
#[cfg(test)]
use flate2 as _;
#[cfg(test)]
use futures_util as _;
