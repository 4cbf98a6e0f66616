//! Library components of the `formkit` command-line tool.

pub mod commands;
pub mod config;
pub mod logging;
