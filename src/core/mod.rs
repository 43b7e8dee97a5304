/// Core Module for UniObjects
///
/// This module contains the session layer: the driver capability traits,
/// the connection that owns a session, response parsing and the shared
/// error type.

pub mod db;
pub mod error;

// Re-export commonly used types for convenience
pub use error::{Result, UniError};
