//! # portal-console
//!
//! Command-line front end driving the portal services against local storage.

pub mod cli;
pub mod commands;
pub mod render;

pub use cli::{Cli, Command};
pub use commands::{execute, Output};
