//! Stub auth endpoints for session tests.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::domain::{LoginForm, RegisterRequest};
use crate::error::{Error, Result};
use crate::port::AuthApi;

/// Auth endpoints answering from scripted queues.
///
/// An exhausted queue answers with a connection error.
#[derive(Default)]
pub struct StubAuthApi {
    login_results: Mutex<VecDeque<Result<Value>>>,
    register_results: Mutex<VecDeque<Result<Value>>>,
    logins: Mutex<Vec<LoginForm>>,
}

impl StubAuthApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_login(self, result: Result<Value>) -> Self {
        self.login_results.lock().push_back(result);
        self
    }

    pub fn with_register(self, result: Result<Value>) -> Self {
        self.register_results.lock().push_back(result);
        self
    }

    /// Login forms received so far.
    pub fn logins(&self) -> Vec<LoginForm> {
        self.logins.lock().clone()
    }
}

fn next(queue: &Mutex<VecDeque<Result<Value>>>) -> Result<Value> {
    queue
        .lock()
        .pop_front()
        .unwrap_or_else(|| Err(Error::Connection("no scripted response".into())))
}

#[async_trait]
impl AuthApi for StubAuthApi {
    async fn login(&self, form: &LoginForm) -> Result<Value> {
        self.logins.lock().push(form.clone());
        next(&self.login_results)
    }

    async fn register(&self, _user: &RegisterRequest) -> Result<Value> {
        next(&self.register_results)
    }
}
