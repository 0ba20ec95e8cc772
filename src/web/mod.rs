//! Web UI module for askql.
//!
//! Serves a single page for asking questions from a browser.

mod handlers;
mod static_files;

pub use handlers::*;
pub use static_files::*;
