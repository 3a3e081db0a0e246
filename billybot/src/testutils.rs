use crate::{
    route::{Route, Router},
    services::{
        auth::{AuthError, IdentityProvider, Session, SignUp, SignUpRequest, User},
        store::{ClientRecord, DataStore, StoreError},
    },
};

use std::sync::Mutex;

use async_trait::async_trait;

pub const DUMMY_USER_ID: &str = "6f3c2a10-0b6a-4d61-9f52-7c1e2f7e1f1f";

pub fn dummy_user() -> User {
    User {
        id: DUMMY_USER_ID.to_string(),
        email: Some("billy@example.com".to_string()),
    }
}

pub fn dummy_session() -> Session {
    Session {
        access_token: "dummy-access-token".to_string(),
        refresh_token: "dummy-refresh-token".to_string(),
        token_type: "bearer".to_string(),
        expires_in: Some(3600),
        expires_at: None,
    }
}

/// What the provider was asked, owned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpCall {
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
}

pub struct DummyProvider {
    pub response: Result<SignUp, AuthError>,
    pub resend_response: Result<(), AuthError>,
    pub calls: Mutex<Vec<SignUpCall>>,
    pub resend_calls: Mutex<Vec<String>>,
}

impl DummyProvider {
    pub fn new(response: Result<SignUp, AuthError>) -> Self {
        Self {
            response,
            resend_response: Ok(()),
            calls: Mutex::new(Vec::new()),
            resend_calls: Mutex::new(Vec::new()),
        }
    }

    /// A user pending email confirmation.
    pub fn pending_confirmation() -> Self {
        Self::new(Ok(SignUp {
            user: Some(dummy_user()),
            session: None,
        }))
    }

    /// A user with a session.
    pub fn confirmed() -> Self {
        Self::new(Ok(SignUp {
            user: Some(dummy_user()),
            session: Some(dummy_session()),
        }))
    }

    pub fn calls(&self) -> Vec<SignUpCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityProvider for DummyProvider {
    async fn sign_up(&self, request: SignUpRequest<'_>) -> Result<SignUp, AuthError> {
        self.calls.lock().unwrap().push(SignUpCall {
            email: request.email.to_string(),
            password: request.password.to_string(),
            phone: request.phone.map(str::to_string),
        });
        self.response.clone()
    }

    async fn resend_confirmation(&self, email: &str) -> Result<(), AuthError> {
        self.resend_calls.lock().unwrap().push(email.to_string());
        self.resend_response.clone()
    }
}

pub struct DummyStore {
    pub response: Result<(), StoreError>,
    pub upserts: Mutex<Vec<(ClientRecord, Option<String>)>>,
}

impl DummyStore {
    pub fn new(response: Result<(), StoreError>) -> Self {
        Self {
            response,
            upserts: Mutex::new(Vec::new()),
        }
    }

    pub fn upserts(&self) -> Vec<(ClientRecord, Option<String>)> {
        self.upserts.lock().unwrap().clone()
    }
}

impl Default for DummyStore {
    fn default() -> Self {
        Self::new(Ok(()))
    }
}

#[async_trait]
impl DataStore for DummyStore {
    async fn upsert_client(
        &self,
        record: &ClientRecord,
        access_token: Option<&str>,
    ) -> Result<(), StoreError> {
        self.upserts
            .lock()
            .unwrap()
            .push((record.clone(), access_token.map(str::to_string)));
        self.response.clone()
    }
}

#[derive(Debug, Default)]
pub struct DummyRouter {
    pub visited: Vec<Route>,
}

impl Router for DummyRouter {
    fn navigate(&mut self, route: Route) {
        self.visited.push(route);
    }
}
