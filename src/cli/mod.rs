//! CLI module for the askql command-line interface.
//!
//! `ask` answers a question against the live databases; `plan` only shows
//! which intent and SQL a question resolves to.

mod commands;
mod output;

pub use commands::*;
