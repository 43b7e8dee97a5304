// Core infrastructure modules
pub mod core;

// Feature-specific modules
pub mod config;
pub mod data;
pub mod test_utils;

pub use crate::core::db::{Connection, Connector};
pub use crate::core::{Result, UniError};
pub use crate::data::{Field, FieldDefinition, FieldSet};
