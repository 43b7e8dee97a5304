/// UniObjects Error Module
///
/// This module defines the error type shared by the whole crate. Driver
/// implementations report their failures through the same enum so that
/// errors reach the caller unchanged.
use thiserror::Error;

/// Error type for connection, session, command and configuration failures.
///
/// The first three variants mirror the failure classes of a UniObjects
/// driver:
/// - `Connection`: the driver rejected the connection parameters
/// - `Session`: session setup or teardown failed, or the session is invalid
/// - `Command`: a command failed to execute
#[derive(Error, Debug)]
pub enum UniError {
    /// The driver rejected the connection parameters
    #[error("Connection error: {0}")]
    Connection(String),

    /// Session setup, teardown or state errors
    #[error("Session error: {0}")]
    Session(String),

    /// Command execution errors reported by the driver
    #[error("Command error: {0}")]
    Command(String),

    /// A query was attempted while the session is not active
    #[error("Not connected to the data source")]
    NotConnected,

    /// The connection has never opened a session
    #[error("No session has been opened; call connect() first")]
    NullSession,

    /// Invalid row or field separator pattern
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// Configuration parsing and validation errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system and I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Result to use UniError as the error type.
pub type Result<T> = std::result::Result<T, UniError>;
