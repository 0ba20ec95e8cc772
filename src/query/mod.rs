//! Natural Language Query Interface for askql.
//!
//! This module provides:
//! - Vocabularies and entity extractors for departments, years, limits and products
//! - The ordered intent dispatcher that selects and binds a SQL template
//! - Plan execution against the University and Sales databases

pub mod dictionary;
pub mod dispatcher;
pub mod executor;
pub mod extract;
pub mod types;

pub use dispatcher::*;
pub use executor::*;
pub use extract::*;
pub use types::*;
