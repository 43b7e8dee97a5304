/// Driver Capability Module
///
/// The actual network and session work is done by an external UniObjects
/// driver. These traits describe the subset of that driver the connection
/// layer relies on, so that any binding (or the scripted driver in
/// `test_utils`) can be plugged into a `Connection`.

use crate::core::Result;

/// Data-source type passed to every session opened by a `Connection`.
pub const DBTYPE_UNIDATA: &str = "UNIDATA";

/// Session factory for a UniObjects driver.
///
/// A driver value is owned by the `Connection` that uses it; there is no
/// process-wide session factory.
pub trait Driver {
    /// Session type produced by this driver
    type Session: Session;

    /// Creates a new, not yet connected, session.
    fn open_session(&self) -> Result<Self::Session>;

    /// Closes a session previously returned by `open_session`.
    ///
    /// Fails with `UniError::Session` if the session is not in a state the
    /// driver can close.
    fn close_session(&self, session: &mut Self::Session) -> Result<()>;
}

/// A single driver session.
pub trait Session {
    /// Command type produced by this session
    type Command: Command;

    fn set_user_name(&mut self, user_name: &str) -> Result<()>;
    fn set_password(&mut self, password: &str) -> Result<()>;
    fn set_host_name(&mut self, host_name: &str) -> Result<()>;
    fn set_account_path(&mut self, account_path: &str) -> Result<()>;
    fn set_data_source_type(&mut self, data_source_type: &str) -> Result<()>;

    /// Establishes the session with the configured parameters.
    ///
    /// Fails with `UniError::Connection` when the parameters are rejected and
    /// `UniError::Session` when session setup fails.
    fn connect(&mut self) -> Result<()>;

    /// Whether the session is currently connected.
    fn is_active(&self) -> bool;

    /// Creates a command bound to this session.
    fn command(&mut self) -> Result<Self::Command>;
}

/// A command executed on a session.
pub trait Command {
    /// Sets the command text to execute.
    fn set_command(&mut self, text: &str);

    /// Executes the command synchronously.
    fn exec(&mut self) -> Result<()>;

    /// Raw response text of the last execution.
    fn response(&self) -> Result<String>;
}
