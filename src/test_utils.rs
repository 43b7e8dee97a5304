/// # Test Utilities Module
///
/// A scripted in-memory driver for exercising the connection layer without a
/// UniData server.
///
/// The driver records every session it opens, the parameters configured on
/// it and every command executed, and can be scripted to:
/// - reject the connection parameters or fail session setup
/// - leave the session inactive after connecting
/// - fail command execution
///
/// Clones share the same recorded state, so a test can keep a clone of the
/// driver after moving one into a `Connection`.

use crate::core::db::{Command, Driver, Session};
use crate::core::{Result, UniError};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Everything the mock driver has been asked to do.
#[derive(Debug, Default)]
pub struct MockState {
    pub sessions_opened: usize,
    pub sessions_closed: usize,
    pub commands_created: usize,
    /// Command texts in execution order
    pub commands: Vec<String>,
    pub user_name: Option<String>,
    pub password: Option<String>,
    pub host_name: Option<String>,
    pub account_path: Option<String>,
    pub data_source_type: Option<String>,
}

/// Failure raised by `Session::connect` on a scripted driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockFailure {
    /// Parameters rejected (`UniError::Connection`)
    Connection,
    /// Session setup failure (`UniError::Session`)
    Session,
}

#[derive(Debug, Clone, Default)]
pub struct MockDriver {
    state: Arc<Mutex<MockState>>,
    responses: Arc<Mutex<VecDeque<String>>>,
    default_response: String,
    connect_failure: Option<MockFailure>,
    stay_inactive: bool,
    fail_exec: bool,
}

impl MockDriver {
    /// Creates a driver whose sessions connect and answer every command with
    /// an empty response
    pub fn new() -> Self {
        MockDriver::default()
    }

    /// Response returned once the queued responses are used up.
    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.default_response = response.into();
        self
    }

    /// Queues responses returned by successive commands.
    pub fn with_responses<I, S>(self, responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        lock(&self.responses).extend(responses.into_iter().map(Into::into));
        self
    }

    pub fn failing_connect(mut self, failure: MockFailure) -> Self {
        self.connect_failure = Some(failure);
        self
    }

    /// Sessions connect without error but report themselves inactive.
    pub fn leaving_inactive(mut self) -> Self {
        self.stay_inactive = true;
        self
    }

    pub fn failing_exec(mut self) -> Self {
        self.fail_exec = true;
        self
    }

    /// Recorded state shared by all clones of this driver.
    pub fn state(&self) -> MutexGuard<'_, MockState> {
        lock(&self.state)
    }

    fn next_response(&self) -> String {
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| self.default_response.clone())
    }
}

impl Driver for MockDriver {
    type Session = MockSession;

    fn open_session(&self) -> Result<MockSession> {
        self.state().sessions_opened += 1;
        Ok(MockSession {
            driver: self.clone(),
            active: false,
        })
    }

    fn close_session(&self, session: &mut MockSession) -> Result<()> {
        if !session.active {
            return Err(UniError::Session("session is not open".to_string()));
        }
        session.active = false;
        self.state().sessions_closed += 1;
        Ok(())
    }
}

#[derive(Debug)]
pub struct MockSession {
    driver: MockDriver,
    active: bool,
}

impl Session for MockSession {
    type Command = MockCommand;

    fn set_user_name(&mut self, user_name: &str) -> Result<()> {
        self.driver.state().user_name = Some(user_name.to_string());
        Ok(())
    }

    fn set_password(&mut self, password: &str) -> Result<()> {
        self.driver.state().password = Some(password.to_string());
        Ok(())
    }

    fn set_host_name(&mut self, host_name: &str) -> Result<()> {
        self.driver.state().host_name = Some(host_name.to_string());
        Ok(())
    }

    fn set_account_path(&mut self, account_path: &str) -> Result<()> {
        self.driver.state().account_path = Some(account_path.to_string());
        Ok(())
    }

    fn set_data_source_type(&mut self, data_source_type: &str) -> Result<()> {
        self.driver.state().data_source_type = Some(data_source_type.to_string());
        Ok(())
    }

    fn connect(&mut self) -> Result<()> {
        match self.driver.connect_failure {
            Some(MockFailure::Connection) => {
                Err(UniError::Connection("host rejected the connection parameters".to_string()))
            }
            Some(MockFailure::Session) => Err(UniError::Session("unable to start session".to_string())),
            None => {
                self.active = !self.driver.stay_inactive;
                Ok(())
            }
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn command(&mut self) -> Result<MockCommand> {
        if !self.active {
            return Err(UniError::Session("session is not active".to_string()));
        }
        self.driver.state().commands_created += 1;
        Ok(MockCommand {
            driver: self.driver.clone(),
            text: String::new(),
            response: None,
        })
    }
}

#[derive(Debug)]
pub struct MockCommand {
    driver: MockDriver,
    text: String,
    response: Option<String>,
}

impl Command for MockCommand {
    fn set_command(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn exec(&mut self) -> Result<()> {
        self.driver.state().commands.push(self.text.clone());
        if self.driver.fail_exec {
            return Err(UniError::Command(format!("unable to execute '{}'", self.text)));
        }
        self.response = Some(self.driver.next_response());
        Ok(())
    }

    fn response(&self) -> Result<String> {
        self.response
            .clone()
            .ok_or_else(|| UniError::Command("command has not been executed".to_string()))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
