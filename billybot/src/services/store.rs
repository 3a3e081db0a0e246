use std::fmt;

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;

use crate::services::http::{NotSuccessResponseInfo, ResponseExt};

pub const CLIENTS_TABLE: &str = "clients";

/// The business attached to a BillyBot account, keyed by the identity id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientRecord {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
}

#[derive(Debug, Clone)]
pub enum StoreError {
    Rejected {
        http_status: u16,
        message: Option<String>,
    },
    Transport(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected {
                http_status,
                message,
            } => write!(
                f,
                "Store rejected the write ({}): {}",
                http_status,
                message.as_deref().unwrap_or("no message")
            ),
            Self::Transport(e) => write!(f, "Store request failed: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

impl From<NotSuccessResponseInfo> for StoreError {
    fn from(info: NotSuccessResponseInfo) -> Self {
        Self::Rejected {
            http_status: info.status_code,
            message: info.message(),
        }
    }
}

/// The hosted database.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Insert the record, or update the existing one with the same id.
    ///
    /// `access_token` is the session of the freshly created user, if any. Without it the request
    /// runs with the public key only.
    async fn upsert_client(
        &self,
        record: &ClientRecord,
        access_token: Option<&str>,
    ) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct StoreClient {
    http: reqwest::Client,
    url: String,
    api_public_key: String,
}

impl fmt::Debug for StoreClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreClient").field("url", &self.url).finish()
    }
}

impl StoreClient {
    pub fn new(url: String, api_public_key: String) -> Self {
        Self::with_http(reqwest::Client::new(), url, api_public_key)
    }

    pub fn with_http(http: reqwest::Client, url: String, api_public_key: String) -> Self {
        Self {
            http,
            url: url.trim_end_matches('/').to_string(),
            api_public_key,
        }
    }
}

#[async_trait]
impl DataStore for StoreClient {
    async fn upsert_client(
        &self,
        record: &ClientRecord,
        access_token: Option<&str>,
    ) -> Result<(), StoreError> {
        let url = format!("{}/rest/v1/{}", self.url, CLIENTS_TABLE);
        tracing::debug!("Sending http request: POST {}", url);
        let bearer = access_token.unwrap_or(&self.api_public_key);
        self.http
            .request(Method::POST, &url)
            .query(&[("on_conflict", "id")])
            .header("apikey", &self.api_public_key)
            .bearer_auth(bearer)
            .header("Content-Type", "application/json")
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(record)
            .send()
            .await?
            .check_success()
            .await?;

        Ok(())
    }
}
