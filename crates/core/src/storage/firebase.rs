use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::state::AppState;
use super::document;
use super::traits::StateStore;

const STORE_NAME: &str = "Firebase";

/// Default request timeout for the REST API.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Firebase Realtime Database, spoken to over its REST API.
///
/// - **Read**: `GET {database_url}/{path}.json` (`null` when absent)
/// - **Write**: `PUT {database_url}/{path}.json` with the whole document
/// - **Auth**: optional, sent as the `auth` query parameter
///
/// No retries and no offline cache: a failed call is reported once and
/// the caller decides what to do with it.
pub struct FirebaseStore {
    client: Client,
    document_url: String,
    auth_token: Option<String>,
}

impl FirebaseStore {
    pub fn new(database_url: &str, document_path: &str) -> Self {
        Self::with_options(
            database_url,
            document_path,
            None,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    pub fn with_options(
        database_url: &str,
        document_path: &str,
        auth_token: Option<String>,
        timeout: Duration,
    ) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            document_url: document_url(database_url, document_path),
            auth_token: auth_token.filter(|t| !t.is_empty()),
        }
    }

    /// Full URL of the budget document (without the auth query).
    pub fn document_url(&self) -> &str {
        &self.document_url
    }

    fn request(&self, method: reqwest::Method) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, &self.document_url);
        match &self.auth_token {
            Some(token) => builder.query(&[("auth", token)]),
            None => builder,
        }
    }

    async fn check_status(resp: reqwest::Response, action: &str) -> Result<reqwest::Response, CoreError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(CoreError::Store {
            store: STORE_NAME.into(),
            message: format!("{action} failed with HTTP {status}: {}", body.trim()),
        })
    }
}

/// Join the database base URL and the document path into the REST endpoint.
pub fn document_url(database_url: &str, document_path: &str) -> String {
    format!(
        "{}/{}.json",
        database_url.trim_end_matches('/'),
        document_path.trim_matches('/')
    )
}

#[async_trait]
impl StateStore for FirebaseStore {
    fn name(&self) -> &str {
        STORE_NAME
    }

    async fn load(&self) -> Result<Option<AppState>, CoreError> {
        let resp = self.request(reqwest::Method::GET).send().await?;
        let resp = Self::check_status(resp, "Load").await?;
        let bytes = resp.bytes().await?;
        document::decode(&bytes)
    }

    async fn save(&self, state: &AppState) -> Result<(), CoreError> {
        let body = document::encode(state)?;
        let resp = self
            .request(reqwest::Method::PUT)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        Self::check_status(resp, "Save").await?;
        Ok(())
    }
}
