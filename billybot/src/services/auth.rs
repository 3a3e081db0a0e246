use std::fmt;

use async_trait::async_trait;
use reqwest::{IntoUrl, Method, RequestBuilder};
use serde::{Deserialize, Serialize};

use crate::services::http::{NotSuccessResponseInfo, ResponseExt};

/// What the identity provider needs to create an account.
#[derive(Clone, Copy)]
pub struct SignUpRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    /// Stored as user metadata, not as the login phone.
    pub phone: Option<&'a str>,
}

impl fmt::Debug for SignUpRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("email", &self.email)
            .field("password", &"REDACTED")
            .field("phone", &self.phone)
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct UserMetadata<'a> {
    phone: &'a str,
}

#[derive(Serialize)]
struct SignUpBody<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<UserMetadata<'a>>,
}

#[derive(Debug, Serialize)]
struct ResendConfirmation<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    email: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Clone, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub expires_at: Option<i64>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"REDACTED")
            .field("refresh_token", &"REDACTED")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Outcome of a successful sign up call.
#[derive(Debug, Clone, Default)]
pub struct SignUp {
    pub user: Option<User>,
    /// Only issued when the project does not require email confirmation.
    pub session: Option<Session>,
}

impl SignUp {
    pub fn identity_id(&self) -> Option<&str> {
        self.user
            .as_ref()
            .map(|u| u.id.as_str())
            .filter(|id| !id.trim().is_empty())
    }
}

#[derive(Deserialize)]
struct SessionResponse {
    #[serde(default)]
    user: Option<User>,
    #[serde(flatten)]
    session: Session,
}

impl SignUp {
    /// The signup endpoint answers with a session embedding the user when one could be issued,
    /// and with the bare user otherwise.
    fn from_response(body: serde_json::Value) -> Result<Self, serde_json::Error> {
        if body.get("access_token").is_some() {
            let SessionResponse { user, session } = serde_json::from_value(body)?;
            Ok(SignUp {
                user,
                session: Some(session),
            })
        } else {
            Ok(SignUp {
                user: Some(serde_json::from_value(body)?),
                session: None,
            })
        }
    }
}

#[derive(Debug, Clone)]
pub enum AuthError {
    /// The auth service answered and refused the request.
    Rejected {
        http_status: u16,
        message: Option<String>,
    },
    /// No answer could be obtained.
    Transport(String),
    /// An answer was obtained but it isn't what we expect.
    UnexpectedResponse(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Rejected {
                http_status,
                message: Some(message),
            } => write!(f, "{}: {}", http_status, message),
            Self::Rejected {
                http_status,
                message: None,
            } => write!(f, "{}: request rejected", http_status),
            Self::Transport(e) => write!(f, "Auth request failed: {}", e),
            Self::UnexpectedResponse(e) => write!(f, "Unexpected auth response: {}", e),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<reqwest::Error> for AuthError {
    fn from(value: reqwest::Error) -> Self {
        AuthError::Transport(value.to_string())
    }
}

impl From<NotSuccessResponseInfo> for AuthError {
    fn from(info: NotSuccessResponseInfo) -> Self {
        AuthError::Rejected {
            http_status: info.status_code,
            message: info.message(),
        }
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(value: serde_json::Error) -> Self {
        AuthError::UnexpectedResponse(value.to_string())
    }
}

/// The hosted identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_up(&self, request: SignUpRequest<'_>) -> Result<SignUp, AuthError>;

    /// Send the signup confirmation email again.
    async fn resend_confirmation(&self, email: &str) -> Result<(), AuthError>;
}

#[derive(Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    url: String,
    api_public_key: String,
    email_redirect_to: Option<String>,
}

impl fmt::Debug for AuthClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthClient")
            .field("url", &self.url)
            .field("email_redirect_to", &self.email_redirect_to)
            .finish()
    }
}

impl AuthClient {
    pub fn new(url: String, api_public_key: String) -> Self {
        Self::with_http(reqwest::Client::new(), url, api_public_key, None)
    }

    pub fn with_http(
        http: reqwest::Client,
        url: String,
        api_public_key: String,
        email_redirect_to: Option<String>,
    ) -> Self {
        AuthClient {
            http,
            url: url.trim_end_matches('/').to_string(),
            api_public_key,
            email_redirect_to,
        }
    }

    fn request<U: IntoUrl + fmt::Display>(&self, method: Method, url: U) -> RequestBuilder {
        tracing::debug!("Sending http request: {} {}", method, url);
        let req = self
            .http
            .request(method, url)
            .header("apikey", &self.api_public_key)
            .header("Content-Type", "application/json");
        match &self.email_redirect_to {
            Some(redirect_to) => req.query(&[("redirect_to", redirect_to)]),
            None => req,
        }
    }
}

#[async_trait]
impl IdentityProvider for AuthClient {
    async fn sign_up(&self, request: SignUpRequest<'_>) -> Result<SignUp, AuthError> {
        let response = self
            .request(Method::POST, format!("{}/auth/v1/signup", self.url))
            .json(&SignUpBody {
                email: request.email,
                password: request.password,
                data: request.phone.map(|phone| UserMetadata { phone }),
            })
            .send()
            .await?
            .check_success()
            .await?;

        let body: serde_json::Value = response.json().await?;
        Ok(SignUp::from_response(body)?)
    }

    async fn resend_confirmation(&self, email: &str) -> Result<(), AuthError> {
        self.request(Method::POST, format!("{}/auth/v1/resend", self.url))
            .json(&ResendConfirmation {
                kind: "signup",
                email,
            })
            .send()
            .await?
            .check_success()
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::POST, MockServer};
    use serde_json::json;

    const USER_ID: &str = "0b6a7c1e-2f7e-4d61-9f52-1f1f8f3c2a10";

    fn request<'a>(phone: Option<&'a str>) -> SignUpRequest<'a> {
        SignUpRequest {
            email: "billy@example.com",
            password: "correct horse",
            phone,
        }
    }

    #[tokio::test]
    async fn sign_up_pending_confirmation() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/auth/v1/signup")
                    .header("apikey", "anon-key")
                    .json_body(json!({
                        "email": "billy@example.com",
                        "password": "correct horse",
                    }));
                then.status(200).json_body(json!({
                    "id": USER_ID,
                    "email": "billy@example.com",
                    "confirmation_sent_at": "2026-10-14T09:00:00Z",
                }));
            })
            .await;

        let client = AuthClient::new(server.base_url(), "anon-key".to_string());
        let signup = client.sign_up(request(None)).await.unwrap();
        mock.assert_async().await;
        assert_eq!(signup.identity_id(), Some(USER_ID));
        assert!(signup.session.is_none());
    }

    #[tokio::test]
    async fn sign_up_with_session_and_phone() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/auth/v1/signup")
                    .query_param("redirect_to", "https://app.billybot.io/welcome")
                    .json_body(json!({
                        "email": "billy@example.com",
                        "password": "correct horse",
                        "data": { "phone": "+61400111222" },
                    }));
                then.status(200).json_body(json!({
                    "access_token": "access-secret",
                    "refresh_token": "refresh-secret",
                    "token_type": "bearer",
                    "expires_in": 3600,
                    "user": { "id": USER_ID, "email": "billy@example.com" },
                }));
            })
            .await;

        let client = AuthClient::with_http(
            reqwest::Client::new(),
            format!("{}/", server.base_url()),
            "anon-key".to_string(),
            Some("https://app.billybot.io/welcome".to_string()),
        );
        let signup = client.sign_up(request(Some("+61400111222"))).await.unwrap();
        mock.assert_async().await;
        assert_eq!(signup.identity_id(), Some(USER_ID));
        let session = signup.session.expect("session issued");
        assert_eq!(session.access_token, "access-secret");
        assert_eq!(session.expires_in, Some(3600));
        assert!(!format!("{:?}", session).contains("refresh-secret"));
    }

    #[tokio::test]
    async fn sign_up_rejected() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/auth/v1/signup");
                then.status(422).json_body(json!({
                    "code": 422,
                    "error_code": "user_already_exists",
                    "msg": "User already registered",
                }));
            })
            .await;

        let client = AuthClient::new(server.base_url(), "anon-key".to_string());
        match client.sign_up(request(None)).await {
            Err(AuthError::Rejected {
                http_status,
                message,
            }) => {
                assert_eq!(http_status, 422);
                assert_eq!(message.as_deref(), Some("User already registered"));
            }
            res => panic!("unexpected result: {:?}", res),
        }
    }

    #[tokio::test]
    async fn sign_up_rejected_without_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/auth/v1/signup");
                then.status(500).body("upstream error");
            })
            .await;

        let client = AuthClient::new(server.base_url(), "anon-key".to_string());
        assert!(matches!(
            client.sign_up(request(None)).await,
            Err(AuthError::Rejected {
                http_status: 500,
                message: None
            })
        ));
    }

    #[tokio::test]
    async fn sign_up_unexpected_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/auth/v1/signup");
                then.status(200).json_body(json!("ok"));
            })
            .await;

        let client = AuthClient::new(server.base_url(), "anon-key".to_string());
        assert!(matches!(
            client.sign_up(request(None)).await,
            Err(AuthError::UnexpectedResponse(_))
        ));
    }

    #[tokio::test]
    async fn sign_up_without_user_id() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/auth/v1/signup");
                then.status(200).json_body(json!({ "email": "billy@example.com" }));
            })
            .await;

        let client = AuthClient::new(server.base_url(), "anon-key".to_string());
        let signup = client.sign_up(request(None)).await.unwrap();
        assert_eq!(signup.identity_id(), None);
    }

    #[tokio::test]
    async fn resend_confirmation_email() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/auth/v1/resend")
                    .header("apikey", "anon-key")
                    .json_body(json!({ "type": "signup", "email": "billy@example.com" }));
                then.status(200).json_body(json!({}));
            })
            .await;

        let client = AuthClient::new(server.base_url(), "anon-key".to_string());
        client
            .resend_confirmation("billy@example.com")
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[test]
    fn password_is_redacted() {
        assert!(!format!("{:?}", request(None)).contains("correct horse"));
    }
}
