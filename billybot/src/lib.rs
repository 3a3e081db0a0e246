//! BillyBot account signup.
//!
//! Validates the signup form locally, creates the identity with the hosted auth service, writes
//! the matching `clients` row to the hosted database and decides where the user lands next.

pub mod config;
pub mod route;
pub mod services;
pub mod signup;
#[cfg(test)]
mod testutils;

use std::sync::Arc;

pub use crate::{
    config::Config,
    route::{Route, Router},
    signup::{SignupError, SignupFlow, SignupInput, SignupVariant, SubmissionState},
};

use crate::services::{auth::AuthClient, store::StoreClient};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

pub const VERSION: Version = Version {
    major: 0,
    minor: 1,
    patch: 0,
};

/// Build the signup flow from the configuration, with a single set of HTTP clients shared by
/// every submission.
pub fn signup_flow(config: &Config) -> SignupFlow {
    let auth = &config.auth_config;
    let http = reqwest::Client::new();
    let provider = AuthClient::with_http(
        http.clone(),
        auth.url.clone(),
        auth.api_public_key.clone(),
        auth.email_redirect_to.clone(),
    );
    let store = StoreClient::with_http(http, auth.url.clone(), auth.api_public_key.clone());
    SignupFlow::new(Arc::new(provider), Arc::new(store), config.variant)
}
