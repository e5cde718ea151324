//! HTTP client implementation for the MAZNA backend.
//!
//! This module provides a reqwest-based implementation of the [`MaznaClient`](crate::MaznaClient) trait.

use crate::config::Config;
use crate::{
    Credentials, Entry, EntryCreated, EntryUpdate, LoginResponse, MaznaClient, MaznaError,
    MessageResponse, NewAccount, NewEntry,
};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

/// Client for the MAZNA backend using reqwest.
#[derive(Clone, Debug)]
pub struct ReqwestMaznaClient {
    base_url: String,
    auth_token: Option<SecretString>,
    client: reqwest::Client,
}

impl ReqwestMaznaClient {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `base_url` - The backend root (e.g., "http://127.0.0.1:5000")
    /// * `auth_token` - Optional bearer token attached to every request
    pub fn new(base_url: &str, auth_token: Option<SecretString>) -> Self {
        Self::with_http_client(base_url, auth_token, reqwest::Client::new())
    }

    /// Create a client around an existing reqwest client (shared pool, custom timeouts).
    pub fn with_http_client(
        base_url: &str,
        auth_token: Option<SecretString>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token,
            client,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.base_url, config.auth_token.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    fn get_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.authorize(self.client.get(url))
    }

    fn post_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.authorize(self.client.post(url))
    }

    fn put_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.authorize(self.client.put(url))
    }

    fn delete_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.authorize(self.client.delete(url))
    }

    /// Execute a request and decode a JSON body, reporting decode failures
    /// with a snippet of the offending body.
    async fn execute_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        what: &'static str,
    ) -> Result<T, MaznaError> {
        let resp = request.send().await?;
        if !resp.status().is_success() {
            return Err(self.error_from_response(resp).await);
        }
        let text = resp.text().await?;
        serde_json::from_str::<T>(&text).map_err(|e| {
            let body_snippet: String = text.chars().take(256).collect();
            MaznaError::Decode {
                what,
                message: format!("{e} - body: {body_snippet}"),
            }
        })
    }

    /// Execute a request with no expected response body.
    async fn execute_empty(&self, request: reqwest::RequestBuilder) -> Result<(), MaznaError> {
        let resp = request.send().await?;
        if !resp.status().is_success() {
            return Err(self.error_from_response(resp).await);
        }
        Ok(())
    }

    /// Extract error information from a failed response.
    async fn error_from_response(&self, resp: reqwest::Response) -> MaznaError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        let body_snippet: String = body.chars().take(256).collect();
        tracing::debug!(status, body = %body_snippet, "backend returned an error status");
        MaznaError::from_status(status, body_snippet)
    }
}

#[async_trait]
impl MaznaClient for ReqwestMaznaClient {
    async fn list_entries(&self, account_id: Option<i64>) -> Result<Vec<Entry>, MaznaError> {
        let url = self.url("/entries");
        let mut pairs: Vec<(&str, String)> = Vec::new();
        if let Some(id) = account_id {
            pairs.push(("account_id", id.to_string()));
        }
        tracing::debug!(%url, ?account_id, "listing entries");
        self.execute_json(self.get_request(&url).query(&pairs), "entries")
            .await
    }

    async fn get_entry(&self, entry_id: i64) -> Result<Entry, MaznaError> {
        let url = self.url(&format!("/entries/{entry_id}"));
        self.execute_json(self.get_request(&url), "entry").await
    }

    async fn create_entry(&self, entry: &NewEntry) -> Result<EntryCreated, MaznaError> {
        entry.validate()?;
        let url = self.url("/entries");
        self.execute_json(self.post_request(&url).json(entry), "created entry")
            .await
    }

    async fn update_entry(
        &self,
        entry_id: i64,
        update: &EntryUpdate,
    ) -> Result<MessageResponse, MaznaError> {
        if update.is_empty() {
            return Err(MaznaError::InvalidInput(
                "entry update must change at least one field".into(),
            ));
        }
        let url = self.url(&format!("/entries/{entry_id}"));
        self.execute_json(self.put_request(&url).json(update), "update result")
            .await
    }

    async fn delete_entry(&self, entry_id: i64) -> Result<(), MaznaError> {
        let url = self.url(&format!("/entries/{entry_id}"));
        self.execute_empty(self.delete_request(&url)).await
    }

    async fn validate_login(
        &self,
        credentials: &Credentials,
    ) -> Result<LoginResponse, MaznaError> {
        let password = credentials.password.expose_secret();
        if credentials.username.trim().is_empty() || password.is_empty() {
            return Err(MaznaError::InvalidInput(
                "username and password are required".into(),
            ));
        }
        let url = self.url("/validateUserLogin");
        let body = serde_json::json!({
            "username": credentials.username,
            "password": password,
        });
        self.execute_json(self.post_request(&url).json(&body), "login response")
            .await
    }

    async fn create_account(&self, account: &NewAccount) -> Result<MessageResponse, MaznaError> {
        account.validate()?;
        let url = self.url("/createUserAccount");
        let body = serde_json::json!({
            "username": account.username,
            "password": account.password.expose_secret(),
            "firstname": account.first_name,
            "middlename": account.middle_name.clone().unwrap_or_default(),
            "lastname": account.last_name,
            "dob": account.dob,
        });
        self.execute_json(self.post_request(&url).json(&body), "account response")
            .await
    }
}
