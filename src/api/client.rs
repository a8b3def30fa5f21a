//! HTTP client for the users service
//!
//! Posts registrations as JSON to the `/users` resource below the
//! configured base URL.

use super::error::ApiError;
use super::traits::UsersApi;
use crate::state::FormState;
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

/// Client for the users REST endpoint
#[derive(Debug, Clone)]
pub struct UsersClient {
    http: reqwest::Client,
    users_url: Url,
}

impl UsersClient {
    /// Create a client for `{base_url}/users`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let users_url = Url::parse(&format!("{}/users", base_url.trim_end_matches('/')))?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("signup-tui/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, users_url })
    }

    pub fn users_url(&self) -> &Url {
        &self.users_url
    }
}

#[async_trait]
impl UsersApi for UsersClient {
    async fn create_user(&self, user: &FormState) -> Result<(), ApiError> {
        tracing::debug!(url = %self.users_url, "posting registration");

        let response = self
            .http
            .post(self.users_url.clone())
            .json(user)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(status = status.as_u16(), "registration accepted");
            return Ok(());
        }

        let message = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}
