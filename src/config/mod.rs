//! Configuration for askql.

mod settings;

pub use settings::*;
