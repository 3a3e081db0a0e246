use std::{fmt, sync::Arc};

use tracing::{debug, error, info, warn};

use crate::{
    route::{Route, Router},
    services::{
        auth::{AuthError, IdentityProvider, SignUpRequest},
        store::{ClientRecord, DataStore, StoreError},
    },
};

use super::{
    validate::{validate, ValidSignup, ValidationError},
    SignupError, SignupInput, SignupVariant, SubmissionState,
};

/// Creates BillyBot accounts. Cheap to clone: the service clients are shared.
#[derive(Clone)]
pub struct SignupFlow {
    provider: Arc<dyn IdentityProvider>,
    store: Arc<dyn DataStore>,
    variant: SignupVariant,
}

impl fmt::Debug for SignupFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupFlow")
            .field("variant", &self.variant)
            .finish_non_exhaustive()
    }
}

impl SignupFlow {
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        store: Arc<dyn DataStore>,
        variant: SignupVariant,
    ) -> Self {
        Self {
            provider,
            store,
            variant,
        }
    }

    pub fn variant(&self) -> SignupVariant {
        self.variant
    }

    pub fn validate(&self, input: &SignupInput) -> Result<ValidSignup, ValidationError> {
        validate(input, self.variant)
    }

    /// Create the identity then its client record, and decide where to go next.
    ///
    /// The client record is only written if the provider returned a user id. A failure to write
    /// it leaves the identity in place: nothing is rolled back nor retried.
    pub async fn submit(&self, signup: ValidSignup) -> Result<Route, SignupError> {
        info!("Creating a new account");
        let created = self
            .provider
            .sign_up(SignUpRequest {
                email: &signup.email,
                password: &signup.password,
                phone: signup.phone.as_deref(),
            })
            .await
            .map_err(|e| match e {
                AuthError::Rejected { message, .. } => {
                    warn!("Identity provider rejected the signup: {}", or_no_message(&message));
                    SignupError::Provider(message)
                }
                e => {
                    error!("Failed to create identity: {}", e);
                    SignupError::Unexpected(e.to_string())
                }
            })?;

        let id = created
            .identity_id()
            .ok_or_else(|| {
                warn!("Identity provider answered without a user id");
                SignupError::MissingIdentity
            })?
            .to_string();
        let has_session = created.session.is_some();
        debug!("Identity {} created, session issued: {}", id, has_session);

        let record = ClientRecord {
            id,
            business_name: signup.business_name,
        };
        let access_token = created.session.as_ref().map(|s| s.access_token.as_str());
        if let Err(e) = self.store.upsert_client(&record, access_token).await {
            error!(
                "Identity {} was created but its client record could not be written: {}",
                record.id, e
            );
            return Err(match e {
                StoreError::Rejected { message, .. } => SignupError::Upsert(message),
                StoreError::Transport(e) => SignupError::Unexpected(e),
            });
        }

        let route = Route::after_signup(has_session);
        info!("Account {} created, navigating to {}", record.id, route);
        Ok(route)
    }

    /// The whole form submission: validate, submit, settle the state and navigate on success.
    ///
    /// Does nothing if an attempt is already in flight for this state.
    pub async fn run<R: Router>(
        &self,
        input: &SignupInput,
        state: &mut SubmissionState,
        router: &mut R,
    ) -> Option<Route> {
        let Some(attempt) = state.attempt() else {
            debug!("Ignoring submission: an attempt is already in flight");
            return None;
        };

        let result = match self.validate(input) {
            Ok(signup) => self.submit(signup).await,
            Err(e) => Err(e.into()),
        };

        let route = attempt.settle(result)?;
        router.navigate(route);
        Some(route)
    }

    /// Ask the provider to send the confirmation email again.
    pub async fn resend_confirmation(&self, email: &str) -> Result<(), SignupError> {
        info!("Resending the confirmation email");
        self.provider
            .resend_confirmation(email)
            .await
            .map_err(|e| match e {
                AuthError::Rejected { message, .. } => SignupError::Resend(message),
                e => {
                    error!("Failed to resend the confirmation email: {}", e);
                    SignupError::Unexpected(e.to_string())
                }
            })
    }
}

fn or_no_message(message: &Option<String>) -> &str {
    message.as_deref().unwrap_or("no message")
}
