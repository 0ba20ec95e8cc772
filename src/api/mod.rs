//! HTTP API module for askql.
//!
//! Exposes question answering over a form-encoded `POST /ask` endpoint
//! plus a liveness probe.

mod handlers;
mod rest;

pub use handlers::*;
pub use rest::*;
