/// Database Module
///
/// This module provides the session layer over a UniObjects-style driver,
/// organized into focused submodules.
///
/// ## Architecture
///
/// - **Driver Capabilities** (`driver.rs`): traits the external driver implements
/// - **Connection Management** (`connection.rs`): session lifecycle and query execution
/// - **Response Parsing** (`query.rs`): turns delimited LIST output into field sets
///
/// ## Error Handling
///
/// All operations use the standardized `UniError` type. Nothing in this layer
/// retries or suppresses a driver error.
pub mod connection;
pub mod driver;
pub mod query;

pub use connection::*;
pub use driver::*;
pub use query::*;
