//! The signup form controller.
//!
//! A submission goes through [`validate`] first, which never touches the network, then through
//! [`SignupFlow::submit`] which creates the identity, writes its `clients` row and picks the
//! [`Route`](crate::Route) to navigate to. [`SubmissionState`] tracks the attempt for the form.

pub mod error;
pub mod state;
pub mod submit;
pub mod validate;

use serde::{Deserialize, Serialize};

pub use error::SignupError;
pub use state::{Attempt, SubmissionState};
pub use submit::SignupFlow;
pub use validate::{validate, ValidSignup, ValidationError};

/// Which fields the form asks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SignupVariant {
    /// Email, password and business name.
    #[default]
    Basic,
    /// Same as `Basic` plus a required mobile number.
    Mobile,
}

impl SignupVariant {
    pub fn asks_mobile(&self) -> bool {
        matches!(self, Self::Mobile)
    }
}

/// Raw form values, as typed by the user. Empty optional fields mean "not provided".
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SignupInput {
    pub email: String,
    pub password: String,
    pub mobile: String,
    pub business_name: String,
}

impl std::fmt::Debug for SignupInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupInput")
            .field("email", &self.email)
            .field("password", &"REDACTED")
            .field("mobile", &self.mobile)
            .field("business_name", &self.business_name)
            .finish()
    }
}
