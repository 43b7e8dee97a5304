/// Connection Management Module
///
/// This module owns the session lifecycle against a UniObjects driver and
/// routes queries and their results through it.

use super::driver::{Command, Driver, Session, DBTYPE_UNIDATA};
use super::query::parse_into_field_sets;
use crate::config::ConnectionConfig;
use crate::core::{Result, UniError};
use crate::data::{Field, FieldDefinition, FieldSet};
use std::fmt;
use tracing::{debug, warn};

/// Minimal contract for anything that connects to a UniData data source.
pub trait Connector {
    /// Connect to the data source
    fn connect(&mut self) -> Result<()>;
    /// Disconnect from the data source
    fn disconnect(&mut self) -> Result<()>;
    /// Run a query on the data source and return its raw response
    fn query(&mut self, query: &str) -> Result<String>;
}

/// A connection to a UniData data source.
///
/// Holds the connection parameters, the driver used to open sessions and at
/// most one session. Creating a connection does not connect; see
/// [`Connection::connect`].
pub struct Connection<D: Driver> {
    driver: D,
    host: String,
    account: String,
    username: String,
    password: String,
    session: Option<D::Session>,
}

impl<D: Driver> Connection<D> {
    /// Creates a connection with the given parameters.
    pub fn new(
        driver: D,
        username: impl Into<String>,
        password: impl Into<String>,
        host: impl Into<String>,
        account: impl Into<String>,
    ) -> Self {
        Connection {
            driver,
            host: host.into(),
            account: account.into(),
            username: username.into(),
            password: password.into(),
            session: None,
        }
    }

    /// Creates a connection from the `[connection]` configuration section.
    pub fn from_config(driver: D, config: &ConnectionConfig) -> Self {
        Connection::new(
            driver,
            config.username.clone(),
            config.password.clone(),
            config.host.clone(),
            config.account.clone(),
        )
    }

    /// Opens a new session and connects it to the data source.
    ///
    /// A still-active session from a previous `connect` is closed first. The
    /// new session is kept even if connecting it fails, so `is_active`
    /// reports `false` afterwards instead of `NullSession`.
    ///
    /// # Errors
    ///
    /// `UniError::Connection` if the driver rejects the parameters,
    /// `UniError::Session` if session setup fails.
    pub fn connect(&mut self) -> Result<()> {
        if let Some(previous) = self.session.as_mut() {
            if previous.is_active() {
                warn!("Replacing active session to {}", self.host);
                self.driver.close_session(previous)?;
            }
        }

        debug!("Opening session to {} (account {}) as {}", self.host, self.account, self.username);
        let session = self.session.insert(self.driver.open_session()?);
        session.set_user_name(&self.username)?;
        session.set_password(&self.password)?;
        session.set_host_name(&self.host)?;
        session.set_account_path(&self.account)?;
        session.set_data_source_type(DBTYPE_UNIDATA)?;

        session.connect()?;
        debug!("Session to {} connected", self.host);
        Ok(())
    }

    /// Closes the current session.
    ///
    /// # Errors
    ///
    /// `UniError::NullSession` if `connect` was never called,
    /// `UniError::Session` if the driver cannot close the session.
    pub fn disconnect(&mut self) -> Result<()> {
        let session = self.session.as_mut().ok_or(UniError::NullSession)?;
        debug!("Closing session to {}", self.host);
        self.driver.close_session(session)
    }

    /// Whether the current session is active.
    ///
    /// # Errors
    ///
    /// `UniError::NullSession` if `connect` was never called.
    pub fn is_active(&self) -> Result<bool> {
        self.session
            .as_ref()
            .map(Session::is_active)
            .ok_or(UniError::NullSession)
    }

    /// Executes a command and returns the response with surrounding
    /// whitespace trimmed.
    ///
    /// # Errors
    ///
    /// `UniError::NotConnected` if the session is not active (no command is
    /// sent), otherwise any command or session error from the driver.
    pub fn query(&mut self, query: &str) -> Result<String> {
        if !self.is_active()? {
            return Err(UniError::NotConnected);
        }
        let session = self.session.as_mut().ok_or(UniError::NullSession)?;

        debug!("Executing: {}", query);
        let mut command = session.command()?;
        command.set_command(query);
        command.exec()?;
        let response = command.response()?;
        let response = response.trim();
        debug!("Received {} bytes", response.len());
        Ok(response.to_string())
    }

    /// Runs the `LIST` query described by `definition` and parses the result.
    ///
    /// Returns `Ok(None)` when the data source returns an empty response.
    pub fn get_fields(&mut self, definition: &FieldDefinition) -> Result<Option<Vec<FieldSet>>> {
        let result = self.query(&definition.query_string())?;
        if result.is_empty() {
            return Ok(None);
        }
        Ok(parse_into_field_sets(&result, definition))
    }

    /// [`get_fields`](Self::get_fields) for plain field names.
    pub fn get_fields_by_name<I, S>(&mut self, file: &str, names: I) -> Result<Option<Vec<FieldSet>>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut definition = FieldDefinition::new(file);
        definition.set_fields_by_name(names);
        self.get_fields(&definition)
    }

    /// [`get_fields`](Self::get_fields) for `(field name, friendly name)` pairs.
    pub fn get_fields_with_friendly_names<I, K, V>(
        &mut self,
        file: &str,
        pairs: I,
    ) -> Result<Option<Vec<FieldSet>>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut definition = FieldDefinition::new(file);
        definition.set_fields_with_friendly_names(pairs);
        self.get_fields(&definition)
    }

    /// [`get_fields`](Self::get_fields) for field templates.
    pub fn get_fields_from<I>(&mut self, file: &str, fields: I) -> Result<Option<Vec<FieldSet>>>
    where
        I: IntoIterator<Item = Field>,
    {
        self.get_fields(&FieldDefinition::with_fields(file, fields))
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn set_host(&mut self, host: impl Into<String>) {
        self.host = host.into();
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn set_account(&mut self, account: impl Into<String>) {
        self.account = account.into();
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    /// The underlying driver session, if one was opened.
    pub fn session(&self) -> Option<&D::Session> {
        self.session.as_ref()
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }
}

impl<D: Driver> Connector for Connection<D> {
    fn connect(&mut self) -> Result<()> {
        Connection::connect(self)
    }

    fn disconnect(&mut self) -> Result<()> {
        Connection::disconnect(self)
    }

    fn query(&mut self, query: &str) -> Result<String> {
        Connection::query(self, query)
    }
}

impl<D: Driver> fmt::Debug for Connection<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("host", &self.host)
            .field("account", &self.account)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("has_session", &self.session.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{MockDriver, MockFailure};

    fn connection(driver: MockDriver) -> Connection<MockDriver> {
        Connection::new(driver, "reader", "secret", "unidata.example.edu", "/datatel/live")
    }

    #[test]
    fn test_connect_configures_session() {
        let driver = MockDriver::new();
        let mut conn = connection(driver.clone());
        conn.connect().unwrap();
        assert!(conn.is_active().unwrap());

        let state = driver.state();
        assert_eq!(state.sessions_opened, 1);
        assert_eq!(state.user_name.as_deref(), Some("reader"));
        assert_eq!(state.password.as_deref(), Some("secret"));
        assert_eq!(state.host_name.as_deref(), Some("unidata.example.edu"));
        assert_eq!(state.account_path.as_deref(), Some("/datatel/live"));
        assert_eq!(state.data_source_type.as_deref(), Some(DBTYPE_UNIDATA));
    }

    #[test]
    fn test_connect_errors_surface_unchanged() {
        let mut conn = connection(MockDriver::new().failing_connect(MockFailure::Connection));
        assert!(matches!(conn.connect(), Err(UniError::Connection(_))));
        assert!(!conn.is_active().unwrap());

        let mut conn = connection(MockDriver::new().failing_connect(MockFailure::Session));
        assert!(matches!(conn.connect(), Err(UniError::Session(_))));
    }

    #[test]
    fn test_session_before_connect_is_null() {
        let mut conn = connection(MockDriver::new());
        assert!(matches!(conn.is_active(), Err(UniError::NullSession)));
        assert!(matches!(conn.disconnect(), Err(UniError::NullSession)));
        assert!(conn.session().is_none());
    }

    #[test]
    fn test_disconnect_closes_session() {
        let driver = MockDriver::new();
        let mut conn = connection(driver.clone());
        conn.connect().unwrap();
        conn.disconnect().unwrap();
        assert!(!conn.is_active().unwrap());
        assert_eq!(driver.state().sessions_closed, 1);

        // A closed session is no longer valid for the driver.
        assert!(matches!(conn.disconnect(), Err(UniError::Session(_))));
    }

    #[test]
    fn test_reconnect_closes_active_session() {
        let driver = MockDriver::new();
        let mut conn = connection(driver.clone());
        conn.connect().unwrap();
        conn.connect().unwrap();
        let state = driver.state();
        assert_eq!(state.sessions_opened, 2);
        assert_eq!(state.sessions_closed, 1);
    }

    #[test]
    fn test_query_trims_response() {
        let driver = MockDriver::new().with_response("  1|Ada|~\n");
        let mut conn = connection(driver.clone());
        conn.connect().unwrap();
        assert_eq!(conn.query("LIST STUDENTS").unwrap(), "1|Ada|~");
        assert_eq!(driver.state().commands, vec!["LIST STUDENTS".to_string()]);
    }

    #[test]
    fn test_query_when_inactive_sends_nothing() {
        let driver = MockDriver::new().leaving_inactive();
        let mut conn = connection(driver.clone());
        conn.connect().unwrap();
        assert!(matches!(conn.query("LIST STUDENTS"), Err(UniError::NotConnected)));
        assert_eq!(driver.state().commands_created, 0);
    }

    #[test]
    fn test_command_error_propagates() {
        let mut conn = connection(MockDriver::new().failing_exec());
        conn.connect().unwrap();
        assert!(matches!(conn.query("BOGUS"), Err(UniError::Command(_))));
    }

    #[test]
    fn test_get_fields_builds_query_and_parses() {
        let driver = MockDriver::new().with_response("1|Ada|~2|Grace|~");
        let mut conn = connection(driver.clone());
        conn.connect().unwrap();

        let rows = conn
            .get_fields_with_friendly_names("STUDENTS", [("ID", "id"), ("FIRST.NAME", "fname")])
            .unwrap()
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].data("fname"), Some("Grace"));
        assert_eq!(
            driver.state().commands[0],
            "LIST STUDENTS EVAL\"ID:'|':FIRST.NAME:'|':'~'\" FMT \"300L\" ID.SUP HDR.SUP COL.SUP NO.PAGE COUNT.SUP"
        );
    }

    #[test]
    fn test_get_fields_empty_response_is_none() {
        let mut conn = connection(MockDriver::new().with_response("   "));
        conn.connect().unwrap();
        assert!(conn.get_fields_by_name("STUDENTS", ["ID"]).unwrap().is_none());
    }

    #[test]
    fn test_connector_trait_object() {
        let driver = MockDriver::new().with_response("ok");
        let mut conn = connection(driver);
        let connector: &mut dyn Connector = &mut conn;
        connector.connect().unwrap();
        assert_eq!(connector.query("WHO").unwrap(), "ok");
        connector.disconnect().unwrap();
    }

    #[test]
    fn test_debug_redacts_password() {
        let conn = connection(MockDriver::new());
        let rendered = format!("{:?}", conn);
        assert!(rendered.contains("unidata.example.edu"));
        assert!(!rendered.contains("secret"));
    }
}
