use thiserror::Error;

use super::ValidationError;

pub const SIGNUP_FALLBACK: &str = "Unable to create your account. Please try again.";
pub const SETUP_FALLBACK: &str =
    "Your account was created, but setup failed. Please try logging in.";
pub const RESEND_FALLBACK: &str = "Unable to resend the confirmation email. Please try again.";
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Why a signup attempt stopped. Every variant is terminal for the attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignupError {
    #[error("Invalid form: {0}")]
    Validation(#[from] ValidationError),
    #[error("Identity provider rejected the signup: {}", .0.as_deref().unwrap_or("no message"))]
    Provider(Option<String>),
    #[error("Identity provider did not return a user id")]
    MissingIdentity,
    /// The identity exists but its client record could not be written.
    #[error("Client record upsert failed: {}", .0.as_deref().unwrap_or("no message"))]
    Upsert(Option<String>),
    #[error("Resending the confirmation email failed: {}", .0.as_deref().unwrap_or("no message"))]
    Resend(Option<String>),
    #[error("Unexpected failure: {0}")]
    Unexpected(String),
}

impl SignupError {
    /// The single message shown to the user for this failure.
    pub fn user_message(&self) -> String {
        let reported = |message: &Option<String>, fallback: &str| {
            message
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .unwrap_or(fallback)
                .to_string()
        };
        match self {
            Self::Validation(e) => e.to_string(),
            Self::Provider(message) => reported(message, SIGNUP_FALLBACK),
            Self::MissingIdentity => SIGNUP_FALLBACK.to_string(),
            Self::Upsert(message) => reported(message, SETUP_FALLBACK),
            Self::Resend(message) => reported(message, RESEND_FALLBACK),
            Self::Unexpected(_) => GENERIC_FAILURE.to_string(),
        }
    }

    /// The identity was created but the account is not fully set up.
    pub fn is_partial_success(&self) -> bool {
        matches!(self, Self::Upsert(_))
    }
}
