//! Command-line interface
//!
//! Argument definitions and command handlers for `monocle-sanitizer`.

pub mod args;
pub mod commands;
