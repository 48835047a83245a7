//! Scripted collaborators for exercising the init flow without a terminal,
//! a network or a disk.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use account::{AccountError, AccountService, LoginOutcome, LoginRequest, Token};
use async_trait::async_trait;
use config::{Config, ConfigError, ConfigStore};

use crate::prompt::{InputPrompt, PromptError, Prompter};

#[derive(Debug, Clone)]
pub enum Answer {
    Line(String),
    Password(String),
    Confirm(bool),
}

pub fn line(value: &str) -> Answer {
    Answer::Line(value.to_string())
}

/// Replays answers in order. An exhausted script behaves like end of input.
///
/// `input` mimics the terminal: an empty line takes the default, and a value
/// rejected by the validator is recorded and the next answer is read.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<Answer>>,
    pub asked: RefCell<Vec<String>>,
    pub rejections: RefCell<Vec<String>>,
    pub defaults: RefCell<Vec<Option<String>>>,
    pub printed: RefCell<Vec<String>>,
    pub warnings: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: RefCell::new(answers.into_iter().collect()),
            ..Default::default()
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }

    pub fn prompt_count(&self) -> usize {
        self.asked.borrow().len()
    }

    pub fn printed_text(&self) -> String {
        self.printed.borrow().join("\n")
    }

    fn next(&self, prompt: &str) -> Result<Answer, PromptError> {
        self.asked.borrow_mut().push(prompt.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or(PromptError::Cancelled)
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&self, request: &InputPrompt<'_>) -> Result<String, PromptError> {
        self.defaults
            .borrow_mut()
            .push(request.default.map(str::to_string));
        loop {
            let value = match self.next(request.prompt)? {
                Answer::Line(value) => value,
                other => panic!("expected a line for '{}', got {other:?}", request.prompt),
            };
            let value = match (value.is_empty(), request.default) {
                (true, Some(default)) => default.to_string(),
                _ => value,
            };
            match request.check(&value) {
                Ok(()) => return Ok(value),
                Err(message) => self.rejections.borrow_mut().push(message),
            }
        }
    }

    fn password(&self, prompt: &str) -> Result<String, PromptError> {
        match self.next(prompt)? {
            Answer::Password(value) => Ok(value),
            other => panic!("expected a password for '{prompt}', got {other:?}"),
        }
    }

    fn confirm(&self, prompt: &str, _default: bool) -> Result<bool, PromptError> {
        match self.next(prompt)? {
            Answer::Confirm(value) => Ok(value),
            other => panic!("expected a confirmation for '{prompt}', got {other:?}"),
        }
    }

    fn println(&self, message: &str) {
        self.printed.borrow_mut().push(message.to_string());
    }

    fn warn(&self, message: &str) {
        self.warnings.borrow_mut().push(message.to_string());
    }
}

/// Records every call; responses are queued per operation.
#[derive(Default)]
pub struct FakeAccount {
    logins: Mutex<VecDeque<Result<LoginOutcome, AccountError>>>,
    organizations: Mutex<Option<Result<Vec<String>, AccountError>>>,
    access_key: Mutex<Option<Result<String, AccountError>>>,
    pub login_calls: Mutex<Vec<LoginRequest>>,
    pub organization_calls: Mutex<Vec<String>>,
    pub access_key_calls: Mutex<Vec<String>>,
}

impl FakeAccount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_login(self, outcome: Result<LoginOutcome, AccountError>) -> Self {
        self.logins.lock().unwrap().push_back(outcome);
        self
    }

    pub fn with_organizations(self, ids: Result<Vec<String>, AccountError>) -> Self {
        *self.organizations.lock().unwrap() = Some(ids);
        self
    }

    pub fn with_access_key(self, access_key: Result<String, AccountError>) -> Self {
        *self.access_key.lock().unwrap() = Some(access_key);
        self
    }

    pub fn login_count(&self) -> usize {
        self.login_calls.lock().unwrap().len()
    }

    pub fn remote_calls(&self) -> usize {
        self.login_count()
            + self.organization_calls.lock().unwrap().len()
            + self.access_key_calls.lock().unwrap().len()
    }
}

pub fn issued(secret_key: &str) -> Result<LoginOutcome, AccountError> {
    Ok(LoginOutcome::Issued(Token {
        secret_key: secret_key.to_string(),
        access_key: None,
    }))
}

pub fn api_error(status: u16, message: &str) -> AccountError {
    AccountError::Api {
        status,
        message: message.to_string(),
    }
}

#[async_trait]
impl AccountService for FakeAccount {
    async fn login(&self, request: &LoginRequest) -> account::Result<LoginOutcome> {
        self.login_calls.lock().unwrap().push(request.clone());
        self.logins
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected login call")
    }

    async fn list_organization_ids(&self, secret_key: &str) -> account::Result<Vec<String>> {
        self.organization_calls
            .lock()
            .unwrap()
            .push(secret_key.to_string());
        self.organizations
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn get_access_key(&self, secret_key: &str) -> account::Result<String> {
        self.access_key_calls
            .lock()
            .unwrap()
            .push(secret_key.to_string());
        self.access_key
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(api_error(404, "token not found")))
    }
}

/// In-memory store keeping a log of every successful save.
pub struct MemoryStore {
    path: PathBuf,
    current: RefCell<Option<Config>>,
    pub saves: RefCell<Vec<Config>>,
    fail_on_save: Option<usize>,
    save_attempts: RefCell<usize>,
}

impl MemoryStore {
    pub fn empty() -> Self {
        Self {
            path: PathBuf::from("/home/test/.config/stratus/config.yaml"),
            current: RefCell::new(None),
            saves: RefCell::new(Vec::new()),
            fail_on_save: None,
            save_attempts: RefCell::new(0),
        }
    }

    pub fn with_config(config: Config) -> Self {
        let store = Self::empty();
        *store.current.borrow_mut() = Some(config);
        store
    }

    /// Make the `n`th save attempt (1-based) fail.
    pub fn failing_on_save(mut self, n: usize) -> Self {
        self.fail_on_save = Some(n);
        self
    }

    pub fn current(&self) -> Option<Config> {
        self.current.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.borrow().len()
    }
}

impl ConfigStore for MemoryStore {
    fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> config::store::Result<Option<Config>> {
        Ok(self.current.borrow().clone())
    }

    fn save(&self, config: &Config) -> config::store::Result<()> {
        let attempt = {
            let mut attempts = self.save_attempts.borrow_mut();
            *attempts += 1;
            *attempts
        };
        if self.fail_on_save == Some(attempt) {
            return Err(ConfigError::Write {
                path: self.path.clone(),
                source: std::io::Error::other("disk full"),
            });
        }
        *self.current.borrow_mut() = Some(config.clone());
        self.saves.borrow_mut().push(config.clone());
        Ok(())
    }
}
